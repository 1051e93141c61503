use cubby_types::Object;

use crate::error::BackendResult;

/// Durable object persistence.
///
/// The backend is consumed only at the two lifecycle edges of the depot:
/// a bulk read at startup and a clear-then-reinsert snapshot at shutdown.
/// It is never read or written mid-session.
///
/// All implementations must satisfy these invariants:
/// - `insert` is append-only: a second insert for the same key fails with
///   [`BackendError::Conflict`] rather than overwriting.
/// - `read_all` reports an empty backend as [`BackendError::Empty`], never
///   as an empty list, so callers can tell "fresh" apart from "failed".
/// - `delete_all` is all-or-nothing; callers do not retry or recover from
///   a partial clear.
/// - `close` is best-effort: failures are logged, never propagated.
///
/// [`BackendError::Conflict`]: crate::error::BackendError::Conflict
/// [`BackendError::Empty`]: crate::error::BackendError::Empty
pub trait Backend: Send + Sync {
    /// Persist one object.
    fn insert(&self, object: &Object) -> BackendResult<()>;

    /// Read every persisted object.
    fn read_all(&self) -> BackendResult<Vec<Object>>;

    /// Remove every persisted object.
    fn delete_all(&self) -> BackendResult<()>;

    /// Release backend resources.
    fn close(&self);
}
