//! # Record Errors
//!
//! Decode failures are reported values, never panics. Callers treat any
//! of these as "no record available".

use thiserror::Error;

/// Result type for record decoding
pub type RecordResult<T> = Result<T, RecordError>;

/// Why a payload did not produce a record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Zero-length input
    #[error("Empty payload")]
    Empty,

    /// Truncated, corrupted or otherwise not well-formed input
    #[error("Malformed payload: {0}")]
    Malformed(String),

    /// Well-formed, but not a key/value object
    #[error("Payload is not an object")]
    NotAnObject,

    /// A journal payload that is not a list of records
    #[error("Payload is not a record list")]
    NotAList,

    /// The category key is absent or not a string
    #[error("Missing category")]
    MissingCategory,

    /// The category identifier is not one this build knows
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Seconds/nanos outside the representable instant range
    #[error("Timestamp out of range: {seconds}s + {nanos}ns")]
    TimestampOutOfRange { seconds: i64, nanos: u32 },
}

impl RecordError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            RecordError::Empty => "JOURNAL_DECODE_EMPTY",
            RecordError::Malformed(_) => "JOURNAL_DECODE_MALFORMED",
            RecordError::NotAnObject => "JOURNAL_DECODE_NOT_OBJECT",
            RecordError::NotAList => "JOURNAL_DECODE_NOT_LIST",
            RecordError::MissingCategory => "JOURNAL_DECODE_MISSING_CATEGORY",
            RecordError::UnknownCategory(_) => "JOURNAL_DECODE_UNKNOWN_CATEGORY",
            RecordError::TimestampOutOfRange { .. } => "JOURNAL_DECODE_TIMESTAMP_RANGE",
        }
    }
}

impl From<serde_json::Error> for RecordError {
    fn from(e: serde_json::Error) -> Self {
        RecordError::Malformed(e.to_string())
    }
}
