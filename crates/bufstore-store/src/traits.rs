use bufstore_types::BlockId;
use tokio_util::sync::CancellationToken;

use crate::block::Block;
use crate::error::StoreResult;
use crate::keys::KeyStream;

/// Content-addressed block store.
///
/// All implementations must satisfy these invariants:
/// - Blocks are immutable once written; the same payload always maps to the
///   same identifier.
/// - A missing block is reported as [`StoreError::NotFound`], distinct from
///   every other failure. Layered stores route on that distinction.
/// - Concurrent use from multiple threads is safe.
/// - All I/O errors are propagated, never silently ignored.
///
/// [`StoreError::NotFound`]: crate::StoreError::NotFound
pub trait BlockStore: Send + Sync {
    /// Fetch a block by identifier.
    fn get(&self, id: &BlockId) -> StoreResult<Block>;

    /// Check whether a block exists without fetching it.
    fn has(&self, id: &BlockId) -> StoreResult<bool>;

    /// Payload size in bytes of the block with this identifier.
    fn get_size(&self, id: &BlockId) -> StoreResult<u64>;

    /// Store one block. Storing a block that is already present is a no-op.
    fn put(&self, block: Block) -> StoreResult<()>;

    /// Store many blocks, stopping at the first error.
    ///
    /// Default implementation calls `put()` for each block. Backends may
    /// override for better performance (e.g., a single fsync).
    fn put_many(&self, blocks: Vec<Block>) -> StoreResult<()> {
        blocks.into_iter().try_for_each(|block| self.put(block))
    }

    /// Remove a block. Behaviour for an absent identifier is up to the
    /// backend.
    fn delete_block(&self, id: &BlockId) -> StoreResult<()>;

    /// Start enumerating every identifier in the store.
    ///
    /// Returns `Err` if enumeration cannot begin. The stream ends when all
    /// identifiers were yielded or `cancel` fires.
    fn all_keys(&self, cancel: CancellationToken) -> StoreResult<KeyStream>;

    /// Toggle hash verification of payloads on read.
    fn hash_on_read(&self, enabled: bool);

    /// Fetch many blocks, `None` for each identifier that is missing.
    ///
    /// Default implementation calls `get()` for each identifier and maps
    /// `NotFound` to `None`; any other error aborts the batch.
    fn get_many(&self, ids: &[BlockId]) -> StoreResult<Vec<Option<Block>>> {
        ids.iter()
            .map(|id| match self.get(id) {
                Ok(block) => Ok(Some(block)),
                Err(e) if e.is_not_found() => Ok(None),
                Err(e) => Err(e),
            })
            .collect()
    }
}
