//! The journal itself

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, Utc};

use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::record::ErrorRecord;
use crate::taxonomy::{DomainError, FailureCategory};

/// Maximum number of records held at once
pub const JOURNAL_CAPACITY: usize = 50;

/// Session-scoped error journal.
///
/// Construct one at application start and share it by reference or
/// `Arc`; there is no global instance.
#[derive(Debug, Default)]
pub struct ErrorJournal {
    /// Oldest first
    records: RwLock<VecDeque<ErrorRecord>>,

    metrics: Option<Arc<MetricsRegistry>>,
}

impl ErrorJournal {
    /// Create an empty journal
    pub fn new() -> Self {
        Self {
            records: RwLock::new(VecDeque::with_capacity(JOURNAL_CAPACITY)),
            metrics: None,
        }
    }

    /// Create an empty journal that reports into `metrics`
    pub fn with_metrics(metrics: Arc<MetricsRegistry>) -> Self {
        Self {
            metrics: Some(metrics),
            ..Self::new()
        }
    }

    // A producer that panicked mid-append cannot leave the deque in a
    // state that violates the capacity bound, so poisoned locks are
    // recovered rather than propagated.
    pub(super) fn read_guard(&self) -> RwLockReadGuard<'_, VecDeque<ErrorRecord>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(super) fn write_guard(&self) -> RwLockWriteGuard<'_, VecDeque<ErrorRecord>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub(super) fn metrics(&self) -> Option<&MetricsRegistry> {
        self.metrics.as_deref()
    }

    /// Append a record, evicting the oldest when over capacity.
    ///
    /// Returns the evicted record, if any.
    pub fn record(&self, record: ErrorRecord) -> Option<ErrorRecord> {
        let category = record.category();
        let evicted = {
            let mut records = self.write_guard();
            records.push_back(record);
            if records.len() > JOURNAL_CAPACITY {
                records.pop_front()
            } else {
                None
            }
        };

        if let Some(metrics) = self.metrics() {
            metrics.increment_recorded();
            if evicted.is_some() {
                metrics.increment_evicted();
            }
        }
        log_event_with_fields(Event::JournalRecord, &[("category", category.as_str())]);
        if let Some(ref old) = evicted {
            log_event_with_fields(Event::JournalEvict, &[("category", old.category().as_str())]);
        }

        evicted
    }

    /// Classify a domain error and record it.
    ///
    /// Returns a copy of the stored record.
    pub fn record_from_domain_error<E: DomainError + ?Sized>(
        &self,
        error: &E,
        context: &str,
    ) -> ErrorRecord {
        let record = ErrorRecord::from_domain_error(error, context);
        self.record(record.clone());
        record
    }

    /// Snapshot of every record, oldest first
    pub fn all(&self) -> Vec<ErrorRecord> {
        self.read_guard().iter().cloned().collect()
    }

    /// Records no older than `within`, oldest first
    pub fn recent(&self, within: Duration) -> Vec<ErrorRecord> {
        self.recent_at(within, Utc::now())
    }

    /// Records whose age relative to `now` is at most `within`.
    ///
    /// Records stamped after `now` have negative age and are included.
    pub fn recent_at(&self, within: Duration, now: DateTime<Utc>) -> Vec<ErrorRecord> {
        self.read_guard()
            .iter()
            .filter(|r| now.signed_duration_since(r.timestamp()) <= within)
            .cloned()
            .collect()
    }

    /// Partition of `all()` by category; each list stays oldest first
    pub fn grouped_by_category(&self) -> BTreeMap<FailureCategory, Vec<ErrorRecord>> {
        let mut groups: BTreeMap<FailureCategory, Vec<ErrorRecord>> = BTreeMap::new();
        for record in self.read_guard().iter() {
            groups
                .entry(record.category())
                .or_default()
                .push(record.clone());
        }
        groups
    }

    /// Number of records per category present in the journal
    pub fn count_by_category(&self) -> BTreeMap<FailureCategory, usize> {
        let mut counts = BTreeMap::new();
        for record in self.read_guard().iter() {
            *counts.entry(record.category()).or_insert(0) += 1;
        }
        counts
    }

    /// Most recently recorded entry
    pub fn latest(&self) -> Option<ErrorRecord> {
        self.read_guard().back().cloned()
    }

    pub fn len(&self) -> usize {
        self.read_guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every record
    pub fn clear(&self) {
        let removed = {
            let mut records = self.write_guard();
            let n = records.len();
            records.clear();
            n
        };
        log_event_with_fields(Event::JournalClear, &[("removed", &removed.to_string())]);
    }
}
