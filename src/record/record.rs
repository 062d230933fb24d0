//! A single observed failure

use chrono::{DateTime, Utc};

use crate::taxonomy::{DomainError, FailureCategory};

/// One observed failure. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    category: FailureCategory,
    message: String,
    is_recoverable: bool,
    retry_count: u32,
    timestamp: DateTime<Utc>,
}

impl ErrorRecord {
    /// Create a record with every field explicit
    pub fn new(
        category: FailureCategory,
        message: impl Into<String>,
        is_recoverable: bool,
        retry_count: u32,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            category,
            message: message.into(),
            is_recoverable,
            retry_count,
            timestamp,
        }
    }

    /// Create a first-attempt record stamped with the current time,
    /// using the category's default recoverability
    pub fn now(category: FailureCategory, message: impl Into<String>) -> Self {
        Self::new(
            category,
            message,
            category.default_recoverable(),
            0,
            Utc::now(),
        )
    }

    /// Classify a domain error, prefixing its message with `context`
    /// when one is given.
    pub fn from_domain_error<E: DomainError + ?Sized>(error: &E, context: &str) -> Self {
        let detail = error.failure_message();
        let message = if context.trim().is_empty() {
            detail
        } else {
            format!("{}: {}", context.trim(), detail)
        };
        Self::new(
            error.failure_category(),
            message,
            error.is_recoverable(),
            0,
            Utc::now(),
        )
    }

    /// Copy of this record for the next attempt of the same operation
    pub fn next_attempt(&self, timestamp: DateTime<Utc>) -> Self {
        Self {
            retry_count: self.retry_count.saturating_add(1),
            timestamp,
            ..self.clone()
        }
    }

    pub fn category(&self) -> FailureCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_recoverable(&self) -> bool {
        self.is_recoverable
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Seconds elapsed between the record's timestamp and `now`.
    ///
    /// Negative when the timestamp lies after `now`.
    pub fn age_in_seconds_at(&self, now: DateTime<Utc>) -> f64 {
        now.signed_duration_since(self.timestamp).num_milliseconds() as f64 / 1000.0
    }

    /// Seconds elapsed since the record was created
    pub fn age_in_seconds(&self) -> f64 {
        self.age_in_seconds_at(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::AppError;
    use chrono::Duration;

    #[test]
    fn test_now_uses_category_default() {
        let record = ErrorRecord::now(FailureCategory::DatabaseCorrupted, "bad page");
        assert!(!record.is_recoverable());
        assert_eq!(record.retry_count(), 0);
    }

    #[test]
    fn test_age_positive_and_negative() {
        let now = Utc::now();
        let past = ErrorRecord::new(
            FailureCategory::Timeout,
            "slow",
            true,
            0,
            now - Duration::seconds(90),
        );
        let future = ErrorRecord::new(
            FailureCategory::Timeout,
            "slow",
            true,
            0,
            now + Duration::seconds(30),
        );
        assert_eq!(past.age_in_seconds_at(now), 90.0);
        assert_eq!(future.age_in_seconds_at(now), -30.0);
    }

    #[test]
    fn test_age_at_range_extremes_does_not_panic() {
        let record = ErrorRecord::new(
            FailureCategory::Other,
            "",
            true,
            0,
            DateTime::<Utc>::MAX_UTC,
        );
        assert!(record.age_in_seconds_at(DateTime::<Utc>::MIN_UTC) < 0.0);
    }

    #[test]
    fn test_from_domain_error_prefixes_context() {
        let err = AppError::NetworkUnavailable("offline".into());
        let record = ErrorRecord::from_domain_error(&err, "Syncing trip");
        assert_eq!(record.category(), FailureCategory::NetworkFailure);
        assert_eq!(record.message(), "Syncing trip: Network unavailable: offline");
        assert!(record.is_recoverable());

        let bare = ErrorRecord::from_domain_error(&err, "  ");
        assert_eq!(bare.message(), "Network unavailable: offline");
    }

    #[test]
    fn test_next_attempt_increments_retry() {
        let first = ErrorRecord::now(FailureCategory::ServerError, "503");
        let later = first.timestamp() + Duration::seconds(5);
        let second = first.next_attempt(later);
        assert_eq!(second.retry_count(), 1);
        assert_eq!(second.timestamp(), later);
        assert_eq!(second.message(), first.message());
    }
}
