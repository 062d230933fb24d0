//! # Undo / Snapshot Coordination
//!
//! Pairs a pre-mutation snapshot of an entity with the failure of that
//! mutation so the caller can put the entity back.
//!
//! ## Invariants
//!
//! - Only failed updates are undoable; deletes and creates are refused
//!   before the store is touched
//! - Restoration happens on a detached copy and is persisted with a
//!   single write, so a failure leaves the store as it was

mod coordinator;
mod errors;
mod snapshot;
mod store;

pub use coordinator::UndoCoordinator;
pub use errors::{StoreError, StoreResult, UndoError, UndoResult};
pub use snapshot::{OperationKind, Snapshot, Snapshotable, UndoableFailure};
pub use store::{EntityStore, MemoryEntityStore};
