//! Entity store seam

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use uuid::Uuid;

use super::errors::{StoreError, StoreResult};
use super::snapshot::Snapshotable;

/// Persistence the undo coordinator restores into.
///
/// Implementations may block; async hosts call the coordinator from a
/// blocking-capable context.
pub trait EntityStore<T>: Send + Sync + fmt::Debug {
    /// Look up the live entity
    fn find(&self, id: Uuid) -> StoreResult<T>;

    /// Persist `entity`, replacing the stored version
    fn write(&self, entity: &T) -> StoreResult<()>;
}

/// In-memory store, with optional write failure injection
#[derive(Debug)]
pub struct MemoryEntityStore<T> {
    entities: RwLock<HashMap<Uuid, T>>,
    fail_writes: AtomicBool,
}

impl<T> Default for MemoryEntityStore<T> {
    fn default() -> Self {
        Self {
            entities: RwLock::new(HashMap::new()),
            fail_writes: AtomicBool::new(false),
        }
    }
}

impl<T: Snapshotable> MemoryEntityStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, entity: T) {
        let mut entities = self.entities.write().unwrap_or_else(PoisonError::into_inner);
        entities.insert(entity.entity_id(), entity);
    }

    pub fn remove(&self, id: Uuid) -> Option<T> {
        let mut entities = self.entities.write().unwrap_or_else(PoisonError::into_inner);
        entities.remove(&id)
    }

    pub fn get(&self, id: Uuid) -> Option<T> {
        let entities = self.entities.read().unwrap_or_else(PoisonError::into_inner);
        entities.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.entities
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make every subsequent `write` fail
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl<T> EntityStore<T> for MemoryEntityStore<T>
where
    T: Snapshotable + Send + Sync + fmt::Debug,
{
    fn find(&self, id: Uuid) -> StoreResult<T> {
        self.get(id).ok_or(StoreError::NotFound(id))
    }

    fn write(&self, entity: &T) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::PersistFailed("write failure injected".to_string()));
        }
        let id = entity.entity_id();
        let mut entities = self.entities.write().unwrap_or_else(PoisonError::into_inner);
        if !entities.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }
        entities.insert(id, entity.clone());
        Ok(())
    }
}
