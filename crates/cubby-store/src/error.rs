use cubby_types::ObjectKey;

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested key is absent from the store.
    #[error("object not found: {0}")]
    NotFound(ObjectKey),

    /// The store's internal state is compromised and it can no longer serve
    /// requests. Reported by the health check only.
    #[error("store is not available")]
    Unavailable,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
