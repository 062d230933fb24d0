//! Journal Invariant Tests
//!
//! - Length never exceeds capacity; oldest records are evicted first
//! - Concurrent producers neither lose nor corrupt entries
//! - Readers always see a self-consistent snapshot
//! - Restoring a persisted journal keeps only the newest entries

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use chrono::{Duration, Utc};
use itinerary_journal::record::{encode_value, ErrorRecord};
use itinerary_journal::taxonomy::{AppError, FailureCategory};
use itinerary_journal::{ErrorJournal, JOURNAL_CAPACITY};
use serde_json::Value;

// =============================================================================
// Helper Functions
// =============================================================================

fn message_record(message: String) -> ErrorRecord {
    ErrorRecord::now(FailureCategory::Other, message)
}

fn messages(journal: &ErrorJournal) -> Vec<String> {
    journal.all().iter().map(|r| r.message().to_string()).collect()
}

// =============================================================================
// Capacity Tests
// =============================================================================

#[test]
fn test_first_record_visible() {
    let journal = ErrorJournal::new();
    journal.record(ErrorRecord::new(
        FailureCategory::NetworkFailure,
        "timeout",
        true,
        0,
        Utc::now(),
    ));

    let all = journal.all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].category(), FailureCategory::NetworkFailure);
}

#[test]
fn test_length_never_exceeds_capacity() {
    let journal = ErrorJournal::new();
    for i in 0..200 {
        journal.record(message_record(format!("msg-{}", i)));
        assert!(journal.len() <= JOURNAL_CAPACITY);
    }
}

#[test]
fn test_51st_record_evicts_first() {
    let journal = ErrorJournal::new();
    for i in 0..51 {
        journal.record(message_record(format!("msg-{}", i)));
    }
    let kept = messages(&journal);
    assert!(!kept.contains(&"msg-0".to_string()));
    assert_eq!(kept.first().unwrap(), "msg-1");
}

#[test]
fn test_sixty_sequential_records_keep_last_fifty() {
    let journal = ErrorJournal::new();
    for i in 0..60 {
        journal.record(message_record(format!("msg-{}", i)));
    }

    let expected: Vec<String> = (10..60).map(|i| format!("msg-{}", i)).collect();
    assert_eq!(journal.len(), 50);
    assert_eq!(messages(&journal), expected);
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_records_all_retained() {
    let journal = Arc::new(ErrorJournal::new());
    let mut handles = vec![];

    for i in 0..50 {
        let journal = Arc::clone(&journal);
        handles.push(thread::spawn(move || {
            journal.record(message_record(format!("concurrent-{}", i)));
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let kept = messages(&journal);
    assert_eq!(kept.len(), 50.min(JOURNAL_CAPACITY));

    let unique: HashSet<_> = kept.iter().collect();
    assert_eq!(unique.len(), kept.len());
    for i in 0..50 {
        assert!(unique.contains(&format!("concurrent-{}", i)));
    }
}

#[test]
fn test_concurrent_overflow_stays_bounded() {
    let journal = Arc::new(ErrorJournal::new());
    let mut handles = vec![];

    for t in 0..8 {
        let journal = Arc::clone(&journal);
        handles.push(thread::spawn(move || {
            for i in 0..100 {
                journal.record(message_record(format!("t{}-{}", t, i)));
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(journal.len(), JOURNAL_CAPACITY);
}

#[test]
fn test_readers_see_consistent_snapshots() {
    let journal = Arc::new(ErrorJournal::new());

    let writer = {
        let journal = Arc::clone(&journal);
        thread::spawn(move || {
            for i in 0..500 {
                journal.record(message_record(format!("w-{:04}", i)));
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let journal = Arc::clone(&journal);
            thread::spawn(move || {
                for _ in 0..200 {
                    let snapshot = messages(&journal);
                    assert!(snapshot.len() <= JOURNAL_CAPACITY);
                    // Single writer: a snapshot is always a contiguous, ordered run
                    let mut sorted = snapshot.clone();
                    sorted.sort();
                    assert_eq!(snapshot, sorted);
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
}

// =============================================================================
// Query Tests
// =============================================================================

#[test]
fn test_recent_filters_by_age() {
    let journal = ErrorJournal::new();
    let now = Utc::now();
    journal.record(ErrorRecord::new(
        FailureCategory::Timeout,
        "yesterday",
        true,
        0,
        now - Duration::days(1),
    ));
    journal.record(ErrorRecord::new(FailureCategory::Timeout, "now", true, 0, now));

    let recent = journal.recent(Duration::minutes(5));
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].message(), "now");
}

#[test]
fn test_domain_errors_grouped() {
    let journal = ErrorJournal::new();
    journal.record_from_domain_error(&AppError::Timeout(30), "Loading lodging");
    journal.record_from_domain_error(&AppError::MissingField("Start date".into()), "Editing trip");
    journal.record_from_domain_error(&AppError::Timeout(10), "Loading flights");

    let groups = journal.grouped_by_category();
    assert_eq!(groups[&FailureCategory::Timeout].len(), 2);
    assert_eq!(
        groups[&FailureCategory::MissingField][0].message(),
        "Editing trip: Start date is required"
    );
}

// =============================================================================
// Persistence Tests
// =============================================================================

#[test]
fn test_restore_seventy_keeps_newest_fifty() {
    let entries: Vec<Value> = (0..70)
        .map(|i| encode_value(&message_record(format!("disk-{}", i))))
        .collect();
    let payload = Value::Array(entries).to_string();

    let journal = ErrorJournal::new();
    let summary = journal.restore(payload.as_bytes()).unwrap();

    assert_eq!(summary.restored, 50);
    assert_eq!(summary.dropped, 20);
    let expected: Vec<String> = (20..70).map(|i| format!("disk-{}", i)).collect();
    assert_eq!(messages(&journal), expected);

    // Serializing again yields exactly the retained fifty
    let again = ErrorJournal::new();
    assert_eq!(again.restore(&journal.serialize_all()).unwrap().restored, 50);
    assert_eq!(again.all(), journal.all());
}

#[test]
fn test_restore_never_panics_on_garbage() {
    let journal = ErrorJournal::new();
    for payload in [&b""[..], b"[]", b"null", b"\xff\xfe", b"[{", b"{\"records\":[]}"] {
        let _ = journal.restore(payload);
        assert!(journal.len() <= JOURNAL_CAPACITY);
    }
}
