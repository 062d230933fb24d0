//! Snapshots and undoable failures

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::taxonomy::{DomainError, FailureCategory};

/// A domain entity whose mutable fields can be captured and restored.
pub trait Snapshotable: Clone {
    /// The mutable fields, detached from the entity
    type Fields: Clone + fmt::Debug;

    fn entity_id(&self) -> Uuid;

    /// Name used in user-facing text, e.g. `Trip "Lisbon"`
    fn entity_label(&self) -> String;

    fn capture(&self) -> Self::Fields;

    /// Overwrite every mutable field from `fields`
    fn apply(&mut self, fields: &Self::Fields);
}

/// The mutation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Update,
    Delete,
    Create,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Update => "update",
            OperationKind::Delete => "delete",
            OperationKind::Create => "create",
        }
    }

    /// Only an update leaves a live entity whose fields a snapshot can restore
    pub fn is_undoable(&self) -> bool {
        matches!(self, OperationKind::Update)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Mutable fields of one entity captured just before a mutation
#[derive(Debug, Clone)]
pub struct Snapshot<T: Snapshotable> {
    entity_id: Uuid,
    entity_label: String,
    fields: T::Fields,
    captured_at: DateTime<Utc>,
}

impl<T: Snapshotable> Snapshot<T> {
    /// Capture `entity` now
    pub fn capture(entity: &T) -> Self {
        Self {
            entity_id: entity.entity_id(),
            entity_label: entity.entity_label(),
            fields: entity.capture(),
            captured_at: Utc::now(),
        }
    }

    pub fn entity_id(&self) -> Uuid {
        self.entity_id
    }

    pub fn entity_label(&self) -> &str {
        &self.entity_label
    }

    pub fn fields(&self) -> &T::Fields {
        &self.fields
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }
}

/// A failed mutation together with the state it started from
#[derive(Debug, Clone)]
pub struct UndoableFailure<T: Snapshotable> {
    snapshot: Snapshot<T>,
    category: FailureCategory,
    operation: OperationKind,
    message: String,
}

impl<T: Snapshotable> UndoableFailure<T> {
    pub fn new(
        snapshot: Snapshot<T>,
        category: FailureCategory,
        operation: OperationKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            snapshot,
            category,
            operation,
            message: message.into(),
        }
    }

    /// Classify `error` and pair it with `snapshot`
    pub fn from_domain_error<E: DomainError + ?Sized>(
        snapshot: Snapshot<T>,
        error: &E,
        operation: OperationKind,
    ) -> Self {
        Self::new(
            snapshot,
            error.failure_category(),
            operation,
            error.failure_message(),
        )
    }

    pub fn snapshot(&self) -> &Snapshot<T> {
        &self.snapshot
    }

    pub fn category(&self) -> FailureCategory {
        self.category
    }

    pub fn operation(&self) -> OperationKind {
        self.operation
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn can_undo(&self) -> bool {
        self.operation.is_undoable()
    }

    pub fn undo_description(&self) -> String {
        format!("Restore {} to previous state", self.snapshot.entity_label)
    }
}
