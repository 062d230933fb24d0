//! # Error Journal
//!
//! Bounded, concurrency-safe collection of error records for the
//! running session.
//!
//! ## Invariants
//!
//! - Length never exceeds [`JOURNAL_CAPACITY`]; the oldest record is
//!   evicted first
//! - All mutations go through one write lock; readers get a cloned
//!   snapshot, never a live reference
//! - No journal operation panics or returns an error for bad input
//!   except `restore`, which reports it as a value

mod journal;
mod persistence;

pub use journal::{ErrorJournal, JOURNAL_CAPACITY};
pub use persistence::RestoreSummary;
