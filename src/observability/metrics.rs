//! Metrics registry
//!
//! - Counters only
//! - Monotonic increase
//! - Reset only on construction
//! - Thread-safe but lock-free

use std::sync::atomic::{AtomicU64, Ordering};

/// Operational counters for the journal, analytics and undo paths
///
/// Uses Relaxed ordering; counters are independent of each other.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    records_recorded: AtomicU64,
    records_evicted: AtomicU64,
    decode_failures: AtomicU64,
    restores: AtomicU64,
    undo_attempts: AtomicU64,
    undo_failures: AtomicU64,
    observations: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_recorded(&self) {
        self.records_recorded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_evicted(&self) {
        self.records_evicted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_decode_failures(&self, count: u64) {
        self.decode_failures.fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_restores(&self) {
        self.restores.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_undo_attempts(&self) {
        self.undo_attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_undo_failures(&self) {
        self.undo_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_observations(&self) {
        self.observations.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            records_recorded: self.records_recorded.load(Ordering::Relaxed),
            records_evicted: self.records_evicted.load(Ordering::Relaxed),
            decode_failures: self.decode_failures.load(Ordering::Relaxed),
            restores: self.restores.load(Ordering::Relaxed),
            undo_attempts: self.undo_attempts.load(Ordering::Relaxed),
            undo_failures: self.undo_failures.load(Ordering::Relaxed),
            observations: self.observations.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MetricsSnapshot {
    pub records_recorded: u64,
    pub records_evicted: u64,
    pub decode_failures: u64,
    pub restores: u64,
    pub undo_attempts: u64,
    pub undo_failures: u64,
    pub observations: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_has_zero_values() {
        let snapshot = MetricsRegistry::new().snapshot();
        assert_eq!(snapshot.records_recorded, 0);
        assert_eq!(snapshot.undo_failures, 0);
    }

    #[test]
    fn test_increment_counters() {
        let registry = MetricsRegistry::new();

        registry.increment_recorded();
        registry.increment_recorded();
        registry.increment_evicted();
        registry.add_decode_failures(3);
        registry.increment_restores();
        registry.increment_undo_attempts();
        registry.increment_undo_failures();
        registry.increment_observations();

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.records_recorded, 2);
        assert_eq!(snapshot.records_evicted, 1);
        assert_eq!(snapshot.decode_failures, 3);
        assert_eq!(snapshot.restores, 1);
        assert_eq!(snapshot.undo_attempts, 1);
        assert_eq!(snapshot.undo_failures, 1);
        assert_eq!(snapshot.observations, 1);
    }

    #[test]
    fn test_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let registry = Arc::new(MetricsRegistry::new());
        let mut handles = vec![];

        for _ in 0..10 {
            let reg = Arc::clone(&registry);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    reg.increment_recorded();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.snapshot().records_recorded, 1000);
    }
}
