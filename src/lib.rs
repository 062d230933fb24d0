//! itinerary-journal - error journal and disclosure engine
//!
//! Captures failures raised anywhere in the itinerary application,
//! keeps a bounded, concurrency-safe journal of them, and answers how
//! each failure should be shown, how the user can recover, and what the
//! failure history looks like.
//!
//! # Components
//!
//! - [`record`]: immutable error records and their flat codec
//! - [`journal`]: bounded session journal with persistence
//! - [`disclosure`] / [`recovery`]: pure per-category policies
//! - [`batch`]: per-item result aggregation
//! - [`undo`]: snapshot restoration after a failed update
//! - [`analytics`]: frequency, pattern and trend reports

pub mod analytics;
pub mod batch;
pub mod cli;
pub mod config;
pub mod disclosure;
pub mod journal;
pub mod observability;
pub mod record;
pub mod recovery;
pub mod taxonomy;
pub mod undo;

pub use journal::{ErrorJournal, JOURNAL_CAPACITY};
pub use record::ErrorRecord;
pub use taxonomy::{DomainError, FailureCategory};
