//! CLI for inspecting a persisted journal
//!
//! - record: append one failure
//! - inspect: dump every record with per-category counts
//! - recent: records inside a time window
//! - report: analytics over the journal
//! - explain: disclosure and recovery for a category
//! - clear: empty the journal

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, JournalArgs};
pub use commands::{run, run_command};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_journal_file, write_error, write_journal_file, write_response};
