//! # Undo Errors

use thiserror::Error;
use uuid::Uuid;

use super::snapshot::OperationKind;

/// Result type for entity store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for undo operations
pub type UndoResult<T> = Result<T, UndoError>;

/// Failures reported by an entity store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No live entity with this id
    #[error("Entity not found: {0}")]
    NotFound(Uuid),

    /// The store could not be read or written
    #[error("Persist failed: {0}")]
    PersistFailed(String),
}

/// Why an undo did not happen
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UndoError {
    /// The failed operation cannot be reversed by restoring a snapshot
    #[error("Cannot undo a failed {0}")]
    NotUndoable(OperationKind),

    /// The entity was removed after the snapshot was taken
    #[error("Entity not found: {0}")]
    NotFound(Uuid),

    /// Writing the restored entity failed
    #[error("Persist failed: {0}")]
    PersistFailed(String),
}

impl UndoError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            UndoError::NotUndoable(_) => "UNDO_NOT_UNDOABLE",
            UndoError::NotFound(_) => "UNDO_NOT_FOUND",
            UndoError::PersistFailed(_) => "UNDO_PERSIST_FAILED",
        }
    }
}

impl From<StoreError> for UndoError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => UndoError::NotFound(id),
            StoreError::PersistFailed(reason) => UndoError::PersistFailed(reason),
        }
    }
}
