use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use cubby_types::{Object, ObjectKey};

use crate::error::{BackendError, BackendResult};
use crate::traits::Backend;

/// Persisted row value: everything except the key, which lives in the tree
/// key itself as big-endian bytes.
#[derive(Serialize, Deserialize)]
struct Row {
    body: Vec<u8>,
    ttl: Option<Duration>,
}

/// Sled-backed durable object storage.
///
/// One tree, keyed by the object key encoded as big-endian `i64` bytes, with
/// a bincode-encoded [`Row`] as the value. Opening is idempotent: the
/// database is created if absent and reused otherwise.
pub struct SledBackend {
    db: sled::Db,
}

impl SledBackend {
    /// Open (or create) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> BackendResult<Self> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// Number of persisted objects.
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Returns `true` if nothing is persisted.
    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }
}

impl Backend for SledBackend {
    fn insert(&self, object: &Object) -> BackendResult<()> {
        let key = object.key.to_be_bytes();
        if self.db.contains_key(key)? {
            return Err(BackendError::Conflict(object.key));
        }

        let row = Row {
            body: object.body.clone(),
            ttl: object.ttl,
        };
        let value =
            bincode::serialize(&row).map_err(|err| BackendError::Encoding(err.to_string()))?;

        self.db.insert(key, value)?;
        self.db.flush()?;

        Ok(())
    }

    fn read_all(&self) -> BackendResult<Vec<Object>> {
        if self.db.is_empty() {
            return Err(BackendError::Empty);
        }

        let mut objects = Vec::with_capacity(self.db.len());
        for entry in self.db.iter() {
            let (key, value) = entry?;
            objects.push(decode_row(&key, &value)?);
        }

        Ok(objects)
    }

    fn delete_all(&self) -> BackendResult<()> {
        self.db.clear()?;
        self.db.flush()?;

        Ok(())
    }

    fn close(&self) {
        if let Err(err) = self.db.flush() {
            tracing::warn!(%err, "closing object database failed, ignoring");
        }
    }
}

fn decode_row(key: &[u8], value: &[u8]) -> BackendResult<Object> {
    let key_bytes: [u8; 8] = key
        .try_into()
        .map_err(|_| BackendError::Encoding(format!("key is {} bytes, expected 8", key.len())))?;
    let key = ObjectKey::from_be_bytes(key_bytes);

    let row: Row =
        bincode::deserialize(value).map_err(|err| BackendError::Encoding(err.to_string()))?;

    Ok(Object {
        key,
        body: row.body,
        ttl: row.ttl,
    })
}

impl std::fmt::Debug for SledBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SledBackend")
            .field("object_count", &self.len())
            .finish()
    }
}
