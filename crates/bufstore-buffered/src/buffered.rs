use std::sync::Arc;

use bufstore_store::{
    current_runtime, Block, BlockStore, InMemoryBlockStore, KeyStream, StoreResult,
};
use bufstore_types::BlockId;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::config::BufferConfig;
use crate::merge::merge_key_streams;

/// A block store that buffers new writes in memory on top of a base store.
///
/// Routing is fixed per operation:
///
/// | Operation | Base (`read`) | Overlay (`write`) |
/// |---|---|---|
/// | `get`, `get_size` | first | only on `NotFound` |
/// | `has` | first | only if absent from base |
/// | `put`, `put_many` | never | always |
/// | `delete_block` | first | only if the base delete succeeded |
/// | `all_keys` | merged | merged |
/// | `hash_on_read` | always | always |
///
/// The base copy wins when both stores hold an identifier. The store adds
/// no locking of its own; thread safety comes from the two stores.
pub struct BufferedStore {
    read: Arc<dyn BlockStore>,
    write: Arc<dyn BlockStore>,
    config: BufferConfig,
}

impl BufferedStore {
    /// Overlay a fresh, empty in-memory store on top of `base`.
    pub fn new(base: Arc<dyn BlockStore>) -> Self {
        Self::with_config(base, BufferConfig::default())
    }

    /// Like [`BufferedStore::new`], applying `config`.
    pub fn with_config(base: Arc<dyn BlockStore>, config: BufferConfig) -> Self {
        Self::from_parts_with_config(base, Arc::new(InMemoryBlockStore::new()), config)
    }

    /// Pair an existing base store with an existing overlay.
    pub fn from_parts(read: Arc<dyn BlockStore>, write: Arc<dyn BlockStore>) -> Self {
        Self::from_parts_with_config(read, write, BufferConfig::default())
    }

    /// Pair an existing base store with an existing overlay, applying `config`.
    pub fn from_parts_with_config(
        read: Arc<dyn BlockStore>,
        write: Arc<dyn BlockStore>,
        config: BufferConfig,
    ) -> Self {
        if config.hash_on_read {
            read.hash_on_read(true);
            write.hash_on_read(true);
        }
        Self {
            read,
            write,
            config,
        }
    }

    /// The base store, for tooling that needs to bypass the routing policy.
    pub fn read(&self) -> &Arc<dyn BlockStore> {
        &self.read
    }

    /// The in-memory overlay holding every block written through this store.
    pub fn write(&self) -> &Arc<dyn BlockStore> {
        &self.write
    }

    /// The configuration this store was built with.
    pub fn config(&self) -> &BufferConfig {
        &self.config
    }
}

impl BlockStore for BufferedStore {
    fn get(&self, id: &BlockId) -> StoreResult<Block> {
        match self.read.get(id) {
            Err(e) if e.is_not_found() => {
                trace!(id = %id.short_hex(), "get: not in base store, trying overlay");
                self.write.get(id)
            }
            other => other,
        }
    }

    fn has(&self, id: &BlockId) -> StoreResult<bool> {
        if self.read.has(id)? {
            return Ok(true);
        }
        self.write.has(id)
    }

    fn get_size(&self, id: &BlockId) -> StoreResult<u64> {
        match self.read.get_size(id) {
            Err(e) if e.is_not_found() => {
                trace!(id = %id.short_hex(), "get_size: not in base store, trying overlay");
                self.write.get_size(id)
            }
            other => other,
        }
    }

    fn put(&self, block: Block) -> StoreResult<()> {
        self.write.put(block)
    }

    fn put_many(&self, blocks: Vec<Block>) -> StoreResult<()> {
        self.write.put_many(blocks)
    }

    /// Deletes from the base store, then from the overlay.
    ///
    /// Not atomic. A base failure leaves both stores untouched; an overlay
    /// failure after a successful base delete leaves the block only in the
    /// overlay.
    fn delete_block(&self, id: &BlockId) -> StoreResult<()> {
        self.read.delete_block(id)?;
        if let Err(e) = self.write.delete_block(id) {
            warn!(id = %id, error = %e, "block deleted from base store but not from overlay");
            return Err(e);
        }
        debug!(id = %id.short_hex(), "block deleted");
        Ok(())
    }

    fn all_keys(&self, cancel: CancellationToken) -> StoreResult<KeyStream> {
        let runtime = current_runtime()?;
        let read = self.read.all_keys(cancel.clone())?;
        let write = self.write.all_keys(cancel.clone())?;
        debug!(capacity = self.config.key_stream_capacity, "key merge started");
        Ok(merge_key_streams(
            &runtime,
            read,
            write,
            self.config.key_stream_capacity,
            cancel,
        ))
    }

    fn hash_on_read(&self, enabled: bool) {
        self.read.hash_on_read(enabled);
        self.write.hash_on_read(enabled);
    }
}

impl std::fmt::Debug for BufferedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferedStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
