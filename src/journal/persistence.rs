//! Whole-journal persistence
//!
//! The payload is a JSON array of flat record objects, oldest first.
//! Restoring keeps only the newest [`JOURNAL_CAPACITY`] entries.

use std::collections::VecDeque;

use serde::Serialize;
use serde_json::Value;

use super::journal::{ErrorJournal, JOURNAL_CAPACITY};
use crate::observability::{log_event_with_fields, Event};
use crate::record::{decode_value, encode_value, RecordError, RecordResult};

/// Outcome of a successful `restore`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RestoreSummary {
    /// Records now held by the journal
    pub restored: usize,
    /// Entries that failed to decode and were skipped
    pub skipped: usize,
    /// Decoded entries dropped because they exceeded capacity
    pub dropped: usize,
}

impl ErrorJournal {
    /// Serialize every record, oldest first
    pub fn serialize_all(&self) -> Vec<u8> {
        let entries: Vec<Value> = self.read_guard().iter().map(encode_value).collect();
        Value::Array(entries).to_string().into_bytes()
    }

    /// Replace the journal contents with a persisted payload.
    ///
    /// Empty input restores an empty journal. Individual entries that
    /// fail to decode are skipped. A payload that is not a JSON array
    /// is rejected and the journal is left untouched.
    pub fn restore(&self, bytes: &[u8]) -> RecordResult<RestoreSummary> {
        let entries = match parse_entries(bytes) {
            Ok(entries) => entries,
            Err(e) => {
                if let Some(metrics) = self.metrics() {
                    metrics.add_decode_failures(1);
                }
                log_event_with_fields(
                    Event::JournalRestoreRejected,
                    &[("code", e.code()), ("reason", &e.to_string())],
                );
                return Err(e);
            }
        };

        let total = entries.len();
        let mut decoded: VecDeque<_> = entries
            .into_iter()
            .filter_map(|entry| match decode_value(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    log_event_with_fields(Event::RecordDecodeRejected, &[("code", e.code())]);
                    None
                }
            })
            .collect();
        let skipped = total - decoded.len();

        let dropped = decoded.len().saturating_sub(JOURNAL_CAPACITY);
        decoded.drain(..dropped);

        let summary = RestoreSummary {
            restored: decoded.len(),
            skipped,
            dropped,
        };

        *self.write_guard() = decoded;

        if let Some(metrics) = self.metrics() {
            metrics.increment_restores();
            metrics.add_decode_failures(skipped as u64);
        }
        log_event_with_fields(
            Event::JournalRestore,
            &[
                ("dropped", &summary.dropped.to_string()),
                ("restored", &summary.restored.to_string()),
                ("skipped", &summary.skipped.to_string()),
            ],
        );

        Ok(summary)
    }
}

fn parse_entries(bytes: &[u8]) -> RecordResult<Vec<Value>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Array(entries) => Ok(entries),
        _ => Err(RecordError::NotAList),
    }
}
