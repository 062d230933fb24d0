//! Failure categories
//!
//! Identifiers are stable: they appear verbatim in persisted journals.
//! Unknown identifiers are rejected, never coerced to `Other`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an operation failed.
///
/// Declaration order is the canonical ordering used by every sorted
/// report in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureCategory {
    /// Persisting a change failed
    SaveFailure,
    /// No connectivity or the transport failed
    NetworkFailure,
    /// A model-level validation rule failed
    ValidationError,
    /// The local store is unreadable
    DatabaseCorrupted,
    /// The iCloud storage quota is exhausted
    CloudKitQuota,
    /// A request did not complete in time
    Timeout,
    /// The remote service answered with an error
    ServerError,
    /// User input could not be accepted
    InvalidInput,
    /// A required field was left empty
    MissingField,
    /// A value fell outside its allowed range
    InvalidRange,
    /// Anything not classified above
    Other,
}

impl FailureCategory {
    /// Every category, in canonical order.
    pub const ALL: [FailureCategory; 11] = [
        FailureCategory::SaveFailure,
        FailureCategory::NetworkFailure,
        FailureCategory::ValidationError,
        FailureCategory::DatabaseCorrupted,
        FailureCategory::CloudKitQuota,
        FailureCategory::Timeout,
        FailureCategory::ServerError,
        FailureCategory::InvalidInput,
        FailureCategory::MissingField,
        FailureCategory::InvalidRange,
        FailureCategory::Other,
    ];

    /// Stable identifier used on the wire and in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureCategory::SaveFailure => "saveFailure",
            FailureCategory::NetworkFailure => "networkFailure",
            FailureCategory::ValidationError => "validationError",
            FailureCategory::DatabaseCorrupted => "databaseCorrupted",
            FailureCategory::CloudKitQuota => "cloudKitQuota",
            FailureCategory::Timeout => "timeout",
            FailureCategory::ServerError => "serverError",
            FailureCategory::InvalidInput => "invalidInput",
            FailureCategory::MissingField => "missingField",
            FailureCategory::InvalidRange => "invalidRange",
            FailureCategory::Other => "other",
        }
    }

    /// Failures caused by the network or the remote service.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            FailureCategory::NetworkFailure | FailureCategory::Timeout | FailureCategory::ServerError
        )
    }

    /// Failures caused by data the user entered.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            FailureCategory::ValidationError
                | FailureCategory::InvalidInput
                | FailureCategory::MissingField
                | FailureCategory::InvalidRange
        )
    }

    /// Recoverability assumed when a record does not say otherwise.
    ///
    /// Only a corrupted store is unrecoverable from the user's side.
    pub fn default_recoverable(&self) -> bool {
        !matches!(self, FailureCategory::DatabaseCorrupted)
    }
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An identifier that names no known category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown failure category: {0}")]
pub struct ParseCategoryError(pub String);

impl FromStr for FailureCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FailureCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers_round_trip() {
        for category in FailureCategory::ALL {
            assert_eq!(category.as_str().parse::<FailureCategory>(), Ok(category));
        }
    }

    #[test]
    fn test_unknown_identifier_rejected() {
        let err = "quantumFailure".parse::<FailureCategory>().unwrap_err();
        assert_eq!(err, ParseCategoryError("quantumFailure".to_string()));
        // Case matters
        assert!("NetworkFailure".parse::<FailureCategory>().is_err());
    }

    #[test]
    fn test_serde_matches_as_str() {
        for category in FailureCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
        assert!(serde_json::from_str::<FailureCategory>("\"bogus\"").is_err());
    }

    #[test]
    fn test_class_predicates() {
        assert!(FailureCategory::Timeout.is_connectivity());
        assert!(!FailureCategory::SaveFailure.is_connectivity());
        assert!(FailureCategory::MissingField.is_validation());
        assert!(!FailureCategory::CloudKitQuota.is_validation());
    }

    #[test]
    fn test_only_corruption_unrecoverable() {
        let unrecoverable: Vec<_> = FailureCategory::ALL
            .iter()
            .filter(|c| !c.default_recoverable())
            .collect();
        assert_eq!(unrecoverable, vec![&FailureCategory::DatabaseCorrupted]);
    }
}
