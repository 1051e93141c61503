use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Integer identifier for a stored object.
///
/// Caller-supplied and unique within the depot. Serves as both the in-memory
/// map key and the backend's primary key.
pub type ObjectKey = i64;

/// A stored object: integer key + opaque body + optional time-to-live.
///
/// The body is validated as JSON once at the HTTP boundary and treated as
/// opaque bytes everywhere below it. The time-to-live is parsed and carried
/// but no expiry sweep acts on it; object lifetime is otherwise unbounded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    /// Unique identifier for this object.
    pub key: ObjectKey,
    /// The raw bytes of the object.
    pub body: Vec<u8>,
    /// Requested time-to-live. Stored, never enforced.
    pub ttl: Option<Duration>,
}

impl Object {
    /// Create an object without a time-to-live.
    pub fn new(key: ObjectKey, body: Vec<u8>) -> Self {
        Self {
            key,
            body,
            ttl: None,
        }
    }

    /// Create an object with an explicit time-to-live.
    pub fn with_ttl(key: ObjectKey, body: Vec<u8>, ttl: Duration) -> Self {
        Self {
            key,
            body,
            ttl: Some(ttl),
        }
    }

    /// Size of the body in bytes.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns `true` if the body is empty.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
