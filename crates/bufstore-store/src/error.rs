use bufstore_types::BlockId;

/// Errors from block store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested block is not in the store.
    ///
    /// Layered stores treat this variant as the signal to fall through to
    /// the next layer; every other variant is surfaced to the caller.
    #[error("block not found: {0}")]
    NotFound(BlockId),

    /// Hash verification on read found a payload that does not match its id.
    #[error("hash mismatch for {id}: payload hashes to {computed}")]
    HashMismatch { id: BlockId, computed: BlockId },

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other backend failure (corruption, unavailable service, ...).
    #[error("backend error: {0}")]
    Backend(String),

    /// Key enumeration needs a tokio runtime to drive its producer task.
    #[error("key enumeration requires a tokio runtime")]
    NoRuntime,
}

impl StoreError {
    /// Returns `true` for the [`StoreError::NotFound`] sentinel.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
