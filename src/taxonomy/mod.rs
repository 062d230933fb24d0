//! # Failure Taxonomy
//!
//! The closed set of failure categories shared by capture, disclosure,
//! recovery and analytics, plus the adapter trait through which the
//! application's own error types are classified.
//!
//! ## Invariant
//!
//! Classification is total: every domain error maps to exactly one
//! category, falling back to [`FailureCategory::Other`].

mod category;
mod domain;

pub use category::{FailureCategory, ParseCategoryError};
pub use domain::{AppError, DomainError};
