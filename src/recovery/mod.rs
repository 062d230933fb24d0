//! # Recovery Planner
//!
//! Pure mapping from a failure category to ordered, user-facing
//! remediation steps and an automatic retry policy.

mod planner;

pub use planner::{RecoveryPlan, RecoveryPlanner, RetryPolicy};
