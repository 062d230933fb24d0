//! Classification of application errors
//!
//! This is the only coupling point between the journal and the error
//! types raised by trips, organizations, activities and the rest of the
//! itinerary model.

use thiserror::Error;

use super::FailureCategory;

/// An error raised somewhere in the application that the journal can
/// classify.
///
/// `failure_category` is required so every implementor is forced to pick
/// a category; the remaining methods have sensible defaults.
pub trait DomainError: std::fmt::Display {
    /// Category this error belongs to.
    fn failure_category(&self) -> FailureCategory;

    /// Message stored in the journal. Defaults to the `Display` text.
    fn failure_message(&self) -> String {
        self.to_string()
    }

    /// Whether the user can recover from this error.
    fn is_recoverable(&self) -> bool {
        self.failure_category().default_recoverable()
    }
}

/// Failures surfaced by the itinerary application.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    // ==================
    // Persistence
    // ==================
    /// Saving a change failed
    #[error("Failed to save {entity}: {reason}")]
    SaveFailed { entity: String, reason: String },

    /// The local store cannot be read
    #[error("Local data is corrupted: {0}")]
    DatabaseCorrupted(String),

    /// iCloud storage is full
    #[error("iCloud storage quota exceeded")]
    CloudKitQuotaExceeded,

    // ==================
    // Connectivity
    // ==================
    /// No network connection
    #[error("Network unavailable: {0}")]
    NetworkUnavailable(String),

    /// A request took too long
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// The server returned an error status
    #[error("Server error (status {status}): {message}")]
    Server { status: u16, message: String },

    // ==================
    // Validation
    // ==================
    /// A model rule rejected the change
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The user entered something unusable
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// A required field is empty
    #[error("{0} is required")]
    MissingField(String),

    /// A value is outside its allowed range
    #[error("{field} must be between {min} and {max}")]
    InvalidRange {
        field: String,
        min: String,
        max: String,
    },

    // ==================
    // Unclassified
    // ==================
    /// Anything else
    #[error("{0}")]
    Other(String),
}

impl DomainError for AppError {
    fn failure_category(&self) -> FailureCategory {
        match self {
            AppError::SaveFailed { .. } => FailureCategory::SaveFailure,
            AppError::DatabaseCorrupted(_) => FailureCategory::DatabaseCorrupted,
            AppError::CloudKitQuotaExceeded => FailureCategory::CloudKitQuota,
            AppError::NetworkUnavailable(_) => FailureCategory::NetworkFailure,
            AppError::Timeout(_) => FailureCategory::Timeout,
            AppError::Server { .. } => FailureCategory::ServerError,
            AppError::Validation(_) => FailureCategory::ValidationError,
            AppError::InvalidInput { .. } => FailureCategory::InvalidInput,
            AppError::MissingField(_) => FailureCategory::MissingField,
            AppError::InvalidRange { .. } => FailureCategory::InvalidRange,
            AppError::Other(_) => FailureCategory::Other,
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            // 4xx means the request itself is wrong; retrying will not help
            AppError::Server { status, .. } => *status >= 500,
            other => other.failure_category().default_recoverable(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_categories() {
        assert_eq!(
            AppError::Timeout(30).failure_category(),
            FailureCategory::Timeout
        );
        assert_eq!(
            AppError::MissingField("Trip name".into()).failure_category(),
            FailureCategory::MissingField
        );
        assert_eq!(
            AppError::Other("boom".into()).failure_category(),
            FailureCategory::Other
        );
    }

    #[test]
    fn test_message_defaults_to_display() {
        let err = AppError::MissingField("Trip name".into());
        assert_eq!(err.failure_message(), "Trip name is required");
    }

    #[test]
    fn test_client_errors_not_recoverable() {
        let client = AppError::Server {
            status: 404,
            message: "not found".into(),
        };
        let server = AppError::Server {
            status: 503,
            message: "unavailable".into(),
        };
        assert!(!client.is_recoverable());
        assert!(server.is_recoverable());
        assert!(!AppError::DatabaseCorrupted("bad page".into()).is_recoverable());
    }

    struct Opaque;

    impl std::fmt::Display for Opaque {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "opaque failure")
        }
    }

    impl DomainError for Opaque {
        fn failure_category(&self) -> FailureCategory {
            FailureCategory::Other
        }
    }

    #[test]
    fn test_foreign_error_uses_defaults() {
        assert_eq!(Opaque.failure_message(), "opaque failure");
        assert!(Opaque.is_recoverable());
    }
}
