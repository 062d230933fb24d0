//! # Disclosure Policy
//!
//! Pure mapping from a failure category to how it is presented.
//!
//! ## Invariant
//!
//! Every alert-level presentation has high priority and cannot be
//! dismissed without choosing one of its actions.

mod policy;

pub use policy::{DisclosureAction, DisclosureLevel, DisclosurePolicy, Presentation, Priority};
