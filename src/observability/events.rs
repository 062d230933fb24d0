//! Observable journal events
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events in the error journal and its collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Journal
    /// A record was appended
    JournalRecord,
    /// The oldest record was evicted to stay within capacity
    JournalEvict,
    /// The journal was emptied
    JournalClear,
    /// The journal was restored from a persisted payload
    JournalRestore,
    /// A persisted payload could not be restored
    JournalRestoreRejected,

    // Codec
    /// A record payload failed to decode
    RecordDecodeRejected,

    // Undo
    /// An entity was restored from its snapshot
    UndoPerformed,
    /// An undo was refused before touching the store
    UndoRejected,
    /// The store lookup or write failed during undo
    UndoFailed,

    // Analytics
    /// An analytics report was produced
    AnalyticsReport,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::JournalRecord => "JOURNAL_RECORD",
            Event::JournalEvict => "JOURNAL_EVICT",
            Event::JournalClear => "JOURNAL_CLEAR",
            Event::JournalRestore => "JOURNAL_RESTORE",
            Event::JournalRestoreRejected => "JOURNAL_RESTORE_REJECTED",
            Event::RecordDecodeRejected => "RECORD_DECODE_REJECTED",
            Event::UndoPerformed => "UNDO_PERFORMED",
            Event::UndoRejected => "UNDO_REJECTED",
            Event::UndoFailed => "UNDO_FAILED",
            Event::AnalyticsReport => "ANALYTICS_REPORT",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> super::Severity {
        use super::Severity;
        match self {
            Event::JournalRecord | Event::JournalEvict => Severity::Trace,
            Event::JournalClear | Event::JournalRestore | Event::UndoPerformed => Severity::Info,
            Event::AnalyticsReport => Severity::Info,
            Event::RecordDecodeRejected | Event::UndoRejected => Severity::Warn,
            Event::JournalRestoreRejected | Event::UndoFailed => Severity::Error,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
