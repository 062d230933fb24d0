//! CLI argument definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Inspect and maintain an itinerary error journal
#[derive(Parser, Debug)]
#[command(name = "itinerary-journal")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every journal command
#[derive(Args, Debug, Clone)]
pub struct JournalArgs {
    /// Path to the persisted journal
    #[arg(long, default_value = "./journal.json")]
    pub journal: PathBuf,

    /// Path to an engine configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Append a failure to the journal
    Record {
        #[command(flatten)]
        target: JournalArgs,

        /// Failure category identifier, e.g. networkFailure
        #[arg(long)]
        category: String,

        /// Failure message
        #[arg(long)]
        message: String,

        /// Mark the failure as unrecoverable
        #[arg(long)]
        unrecoverable: bool,

        /// Retries already attempted
        #[arg(long, default_value_t = 0)]
        retry_count: u32,
    },

    /// Print every record, oldest first
    Inspect {
        #[command(flatten)]
        target: JournalArgs,
    },

    /// Print records inside a time window
    Recent {
        #[command(flatten)]
        target: JournalArgs,

        /// Window in seconds (defaults to the configured window)
        #[arg(long)]
        within_secs: Option<u64>,
    },

    /// Print an analytics report over the journal
    Report {
        #[command(flatten)]
        target: JournalArgs,
    },

    /// Print the presentation and recovery plan for a category
    Explain {
        /// Failure category identifier
        category: String,
    },

    /// Remove every record
    Clear {
        #[command(flatten)]
        target: JournalArgs,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
