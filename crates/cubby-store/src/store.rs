use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use cubby_backend::{Backend, BackendError};
use cubby_types::{Object, ObjectKey};

use crate::error::{StoreError, StoreResult};

/// Caller-visible result of a save: a brand-new key versus an overwrite of
/// an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The key was absent; a new object was inserted under it.
    Created(ObjectKey),
    /// The key was present; its body and ttl were replaced in place.
    Updated,
}

impl SaveOutcome {
    /// Returns `true` for a brand-new object.
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Concurrent in-memory object store bridged to a durable backend.
///
/// The map is the working set: every save and get is served from memory with
/// no backend I/O. The backend is touched at exactly two points -- a bulk
/// load on construction and a clear-then-reinsert snapshot on [`stop`]. In
/// between, memory and backend are allowed to diverge arbitrarily.
///
/// All map access is serialized behind one exclusive lock. Results are
/// cloned out; internal references never escape, so callers cannot mutate
/// stored objects around the lock.
///
/// [`stop`]: Store::stop
pub struct Store {
    objects: Mutex<HashMap<ObjectKey, Object>>,
    backend: Arc<dyn Backend>,
}

impl Store {
    /// Construct the store and load every persisted object from the backend.
    ///
    /// Construction itself never fails: a backend that reports no persisted
    /// objects yields a valid empty store, and any other read failure is
    /// logged and also yields an empty store. The process stays up with zero
    /// objects rather than refusing to start.
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let store = Self {
            objects: Mutex::new(HashMap::new()),
            backend,
        };
        store.load();
        store
    }

    /// Insert or overwrite the object under its key.
    ///
    /// A present key has its body and ttl replaced in place and reports
    /// [`SaveOutcome::Updated`]; an absent key reports
    /// [`SaveOutcome::Created`]. The backend is never touched. The error
    /// side of the result is reserved and not currently reachable.
    pub fn save(&self, object: Object) -> StoreResult<SaveOutcome> {
        let mut objects = self.objects.lock().expect("lock poisoned");

        let key = object.key;
        match objects.insert(key, object) {
            Some(_) => {
                tracing::debug!(key, "object updated in place");
                Ok(SaveOutcome::Updated)
            }
            None => {
                tracing::debug!(key, "object created");
                Ok(SaveOutcome::Created(key))
            }
        }
    }

    /// Return a copy of the object stored under `key`.
    pub fn get(&self, key: ObjectKey) -> StoreResult<Object> {
        let objects = self.objects.lock().expect("lock poisoned");

        objects
            .get(&key)
            .cloned()
            .ok_or(StoreError::NotFound(key))
    }

    /// Liveness predicate.
    ///
    /// Reports [`StoreError::Unavailable`] only when the map's lock has been
    /// poisoned by a panicking holder; otherwise always succeeds. This is
    /// process-level availability, not backend health.
    pub fn check(&self) -> StoreResult<()> {
        if self.objects.is_poisoned() {
            return Err(StoreError::Unavailable);
        }

        Ok(())
    }

    /// Number of objects currently held in memory.
    pub fn len(&self) -> usize {
        self.objects.lock().expect("lock poisoned").len()
    }

    /// Returns `true` if the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.lock().expect("lock poisoned").is_empty()
    }

    /// Write the snapshot to the backend. Call at most once, during orderly
    /// shutdown.
    ///
    /// An empty map skips the backend entirely. Otherwise the backend is
    /// cleared first -- a failed clear aborts the whole snapshot, losing the
    /// in-memory updates -- and each object is then inserted independently,
    /// continuing past individual failures. The clear-then-reinsert sequence
    /// is not atomic: a crash mid-snapshot can leave the backend with fewer
    /// objects than memory held.
    pub fn stop(&self) {
        let objects = self.objects.lock().expect("lock poisoned");

        if objects.is_empty() {
            tracing::info!("no objects to snapshot");
            return;
        }

        if let Err(err) = self.backend.delete_all() {
            tracing::error!(%err, "cannot clear backend before snapshot, aborting");
            return;
        }

        let mut persisted = 0usize;
        for object in objects.values() {
            match self.backend.insert(object) {
                Ok(()) => persisted += 1,
                Err(err) => {
                    tracing::error!(key = object.key, %err, "cannot persist object, skipping");
                }
            }
        }

        tracing::info!(persisted, total = objects.len(), "snapshot written to backend");
    }

    fn load(&self) {
        let loaded = match self.backend.read_all() {
            Ok(objects) => objects,
            Err(BackendError::Empty) => {
                tracing::info!("backend holds no objects");
                return;
            }
            Err(err) => {
                tracing::error!(%err, "cannot load objects from backend, starting empty");
                return;
            }
        };

        let mut objects = self.objects.lock().expect("lock poisoned");
        let count = loaded.len();
        for object in loaded {
            objects.insert(object.key, object);
        }

        tracing::info!(count, "loaded objects from backend");
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("object_count", &self.len())
            .finish()
    }
}
