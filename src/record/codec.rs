//! Flat key/value codec for error records
//!
//! Wire form (JSON object, keys sorted):
//!
//! ```text
//! {"category":"timeout","isRecoverable":true,"message":"...",
//!  "retryCount":0,"schemaVersion":2,"timestamp":1700000000,"timestampNanos":0}
//! ```
//!
//! The instant is split into whole seconds since the Unix epoch and a
//! nanosecond remainder so every `DateTime<Utc>` round-trips exactly.

use chrono::DateTime;
use serde::Deserialize;
use serde_json::{json, Value};

use super::errors::{RecordError, RecordResult};
use super::record::ErrorRecord;
use crate::taxonomy::FailureCategory;

/// Schema version written by this build
pub const SCHEMA_VERSION: u32 = 2;

/// Records written before versioning carried only the minimal key set
fn legacy_schema_version() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordWire {
    #[serde(default = "legacy_schema_version")]
    #[allow(dead_code)]
    schema_version: u32,
    category: FailureCategory,
    message: String,
    #[serde(default)]
    is_recoverable: Option<bool>,
    #[serde(default)]
    retry_count: u32,
    timestamp: i64,
    #[serde(default)]
    timestamp_nanos: u32,
}

impl TryFrom<RecordWire> for ErrorRecord {
    type Error = RecordError;

    fn try_from(wire: RecordWire) -> RecordResult<Self> {
        let timestamp = DateTime::from_timestamp(wire.timestamp, wire.timestamp_nanos).ok_or(
            RecordError::TimestampOutOfRange {
                seconds: wire.timestamp,
                nanos: wire.timestamp_nanos,
            },
        )?;
        let is_recoverable = wire
            .is_recoverable
            .unwrap_or_else(|| wire.category.default_recoverable());
        Ok(ErrorRecord::new(
            wire.category,
            wire.message,
            is_recoverable,
            wire.retry_count,
            timestamp,
        ))
    }
}

/// Encode a record as a JSON object value
pub fn encode_value(record: &ErrorRecord) -> Value {
    let timestamp = record.timestamp();
    json!({
        "schemaVersion": SCHEMA_VERSION,
        "category": record.category().as_str(),
        "message": record.message(),
        "isRecoverable": record.is_recoverable(),
        "retryCount": record.retry_count(),
        "timestamp": timestamp.timestamp(),
        "timestampNanos": timestamp.timestamp_subsec_nanos(),
    })
}

/// Encode a record to bytes. Deterministic for equal records.
pub fn encode(record: &ErrorRecord) -> Vec<u8> {
    encode_value(record).to_string().into_bytes()
}

/// Decode a record from bytes
pub fn decode(bytes: &[u8]) -> RecordResult<ErrorRecord> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(RecordError::Empty);
    }
    let value: Value = serde_json::from_slice(bytes)?;
    decode_value(value)
}

/// Decode a record from an already-parsed JSON value.
///
/// The category is validated before any other field is extracted, so a
/// payload with an unknown category is rejected whole.
pub fn decode_value(value: Value) -> RecordResult<ErrorRecord> {
    let object = value.as_object().ok_or(RecordError::NotAnObject)?;
    let category = object
        .get("category")
        .and_then(Value::as_str)
        .ok_or(RecordError::MissingCategory)?;
    if category.parse::<FailureCategory>().is_err() {
        return Err(RecordError::UnknownCategory(category.to_string()));
    }

    let wire: RecordWire = serde_json::from_value(value)?;
    ErrorRecord::try_from(wire)
}
