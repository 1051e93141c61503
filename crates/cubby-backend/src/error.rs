use cubby_types::ObjectKey;

/// Errors from backend operations.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The backend holds no persisted objects. Distinguished from an I/O
    /// failure so callers can treat a fresh backend as a valid empty start.
    #[error("no persisted objects")]
    Empty,

    /// An object with this key is already persisted.
    #[error("object {0} already persisted")]
    Conflict(ObjectKey),

    /// A persisted row could not be encoded or decoded.
    #[error("row encoding error: {0}")]
    Encoding(String),

    /// Failure in the underlying storage medium.
    #[error("backend I/O error: {0}")]
    Io(#[from] sled::Error),
}

/// Result alias for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;
