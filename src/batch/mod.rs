//! # Batch Outcomes
//!
//! Summary statistics over the per-item results of a multi-item
//! operation (bulk delete, import, sync). Stateless.

mod outcome;

pub use outcome::{BatchOutcome, FailedOperation};
