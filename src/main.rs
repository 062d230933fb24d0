//! itinerary-journal CLI entry point
//!
//! Delegates everything to the CLI module; errors have already been
//! written to stdout as JSON, so only the summary goes to stderr.

use itinerary_journal::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
