//! # Error Analytics
//!
//! Session-scoped history of (category, timestamp) observations and the
//! frequency, pattern and trend reports derived from it.
//!
//! History is append-only and independent of the journal; it is never
//! evicted, only cleared.

mod engine;
mod report;

pub use engine::{AnalyticsConfig, AnalyticsEngine, Observation};
pub use report::{AnalyticsReport, ErrorPattern, Trend};
