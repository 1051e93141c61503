//! Concurrent in-memory object store for the cubby object depot.
//!
//! The [`Store`] owns a lock-guarded map from integer key to object and
//! serves every save and get from memory. Durable storage is involved at
//! exactly two points in the process lifetime:
//!
//! 1. **Load** -- on construction, every persisted object is read from the
//!    backend into the map. A fresh backend is a valid empty start; any
//!    other read failure degrades to an empty start rather than refusing to
//!    come up.
//! 2. **Snapshot** -- on [`Store::stop`], the backend is cleared and the
//!    in-memory objects are reinserted one by one. The sequence is not
//!    atomic and individual row failures are skipped, not fatal.
//!
//! Between those two points the map and the backend diverge freely; the
//! backend is not a write-through cache.

pub mod error;
pub mod store;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use store::{SaveOutcome, Store};
