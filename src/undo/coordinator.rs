//! Snapshot restoration

use std::sync::Arc;

use super::errors::{UndoError, UndoResult};
use super::snapshot::{Snapshotable, UndoableFailure};
use super::store::EntityStore;
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};

/// Restores entities from the snapshot attached to a failed update
#[derive(Debug, Default)]
pub struct UndoCoordinator {
    metrics: Option<Arc<MetricsRegistry>>,
}

impl UndoCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metrics(metrics: Arc<MetricsRegistry>) -> Self {
        Self {
            metrics: Some(metrics),
        }
    }

    /// Put the live entity back to its snapshot state.
    ///
    /// The live entity is looked up by id, its mutable fields are
    /// overwritten on a detached copy, and the copy is persisted with a
    /// single write. Returns the restored entity.
    pub fn perform_undo<T, S>(&self, failure: &UndoableFailure<T>, store: &S) -> UndoResult<T>
    where
        T: Snapshotable,
        S: EntityStore<T> + ?Sized,
    {
        if let Some(metrics) = self.metrics.as_deref() {
            metrics.increment_undo_attempts();
        }

        let snapshot = failure.snapshot();
        let id = snapshot.entity_id().to_string();

        if !failure.can_undo() {
            log_event_with_fields(
                Event::UndoRejected,
                &[("entity_id", &id), ("operation", failure.operation().as_str())],
            );
            return Err(UndoError::NotUndoable(failure.operation()));
        }

        let result = store
            .find(snapshot.entity_id())
            .and_then(|live| {
                let mut restored = live;
                restored.apply(snapshot.fields());
                store.write(&restored).map(|()| restored)
            })
            .map_err(UndoError::from);

        match &result {
            Ok(_) => {
                log_event_with_fields(
                    Event::UndoPerformed,
                    &[("category", failure.category().as_str()), ("entity_id", &id)],
                );
            }
            Err(e) => {
                if let Some(metrics) = self.metrics.as_deref() {
                    metrics.increment_undo_failures();
                }
                log_event_with_fields(
                    Event::UndoFailed,
                    &[("code", e.code()), ("entity_id", &id)],
                );
            }
        }

        result
    }
}
