use std::collections::BTreeMap;
use std::sync::Mutex;

use cubby_types::{Object, ObjectKey};

use crate::error::{BackendError, BackendResult};
use crate::traits::Backend;

/// In-memory, `BTreeMap`-based backend.
///
/// Intended for tests and embedding. Honors the same contract as the durable
/// realization: append-only inserts, a distinguished empty signal, and an
/// all-or-nothing clear. Nothing survives process exit.
pub struct MemoryBackend {
    rows: Mutex<BTreeMap<ObjectKey, Object>>,
}

impl MemoryBackend {
    /// Create a new empty backend.
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
        }
    }

    /// Number of persisted objects.
    pub fn len(&self) -> usize {
        self.rows.lock().expect("lock poisoned").len()
    }

    /// Returns `true` if nothing is persisted.
    pub fn is_empty(&self) -> bool {
        self.rows.lock().expect("lock poisoned").is_empty()
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for MemoryBackend {
    fn insert(&self, object: &Object) -> BackendResult<()> {
        let mut rows = self.rows.lock().expect("lock poisoned");
        if rows.contains_key(&object.key) {
            return Err(BackendError::Conflict(object.key));
        }
        rows.insert(object.key, object.clone());

        Ok(())
    }

    fn read_all(&self) -> BackendResult<Vec<Object>> {
        let rows = self.rows.lock().expect("lock poisoned");
        if rows.is_empty() {
            return Err(BackendError::Empty);
        }

        Ok(rows.values().cloned().collect())
    }

    fn delete_all(&self) -> BackendResult<()> {
        self.rows.lock().expect("lock poisoned").clear();

        Ok(())
    }

    fn close(&self) {}
}

impl std::fmt::Debug for MemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBackend")
            .field("object_count", &self.len())
            .finish()
    }
}
