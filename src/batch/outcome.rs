//! Aggregation of per-item results

use std::collections::BTreeMap;

use serde::Serialize;
use uuid::Uuid;

use crate::taxonomy::FailureCategory;

/// One item that failed within a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FailedOperation {
    pub entity_id: Uuid,
    pub category: FailureCategory,
}

/// Aggregate result of a batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    pub total_operations: usize,
    pub successful_operations: usize,
    /// In the order the items were processed
    pub failed_operations: Vec<FailedOperation>,
}

impl BatchOutcome {
    /// Aggregate per-item results
    pub fn from_results<I>(results: I) -> Self
    where
        I: IntoIterator<Item = (Uuid, Result<(), FailureCategory>)>,
    {
        let mut outcome = Self::default();
        for (entity_id, result) in results {
            outcome.total_operations += 1;
            match result {
                Ok(()) => outcome.successful_operations += 1,
                Err(category) => outcome
                    .failed_operations
                    .push(FailedOperation { entity_id, category }),
            }
        }
        outcome
    }

    pub fn failure_count(&self) -> usize {
        self.failed_operations.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.failed_operations.is_empty()
    }

    /// Some items succeeded and some failed
    pub fn partial_success(&self) -> bool {
        self.successful_operations > 0 && self.has_errors()
    }

    /// Fraction of items that succeeded; 1.0 for an empty batch
    pub fn success_rate(&self) -> f64 {
        if self.total_operations == 0 {
            return 1.0;
        }
        self.successful_operations as f64 / self.total_operations as f64
    }

    /// Failed entity ids grouped by category
    pub fn failures_by_category(&self) -> BTreeMap<FailureCategory, Vec<Uuid>> {
        let mut groups: BTreeMap<FailureCategory, Vec<Uuid>> = BTreeMap::new();
        for failure in &self.failed_operations {
            groups.entry(failure.category).or_default().push(failure.entity_id);
        }
        groups
    }

    pub fn failed_ids(&self) -> Vec<Uuid> {
        self.failed_operations.iter().map(|f| f.entity_id).collect()
    }

    /// Short human-readable summary
    pub fn summary(&self) -> String {
        if !self.has_errors() {
            return format!("All {} operations succeeded", self.total_operations);
        }
        if self.successful_operations == 0 {
            return format!("All {} operations failed", self.total_operations);
        }
        format!(
            "{} of {} operations succeeded",
            self.successful_operations, self.total_operations
        )
    }
}
