use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use bufstore_types::BlockId;
use tokio_util::sync::CancellationToken;

use crate::block::Block;
use crate::error::{StoreError, StoreResult};
use crate::keys::{spawn_key_producer, KeyStream, DEFAULT_KEY_CHANNEL_CAPACITY};
use crate::traits::BlockStore;

/// In-memory, HashMap-based block store.
///
/// Used as the write overlay of a buffered store and as a base store in
/// tests. Blocks live behind a `RwLock`; payloads are shared `Bytes`, so
/// reads clone cheaply.
pub struct InMemoryBlockStore {
    blocks: RwLock<HashMap<BlockId, Block>>,
    hash_on_read: AtomicBool,
}

impl InMemoryBlockStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            blocks: RwLock::new(HashMap::new()),
            hash_on_read: AtomicBool::new(false),
        }
    }

    /// Number of blocks currently stored.
    pub fn len(&self) -> usize {
        self.blocks.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.blocks.read().expect("lock poisoned").is_empty()
    }

    /// Return a sorted list of all block identifiers in the store.
    pub fn all_ids(&self) -> Vec<BlockId> {
        let map = self.blocks.read().expect("lock poisoned");
        let mut ids: Vec<BlockId> = map.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Whether payloads are re-hashed on every read.
    pub fn is_hash_on_read(&self) -> bool {
        self.hash_on_read.load(Ordering::Relaxed)
    }

    fn lookup(&self, id: &BlockId) -> StoreResult<Block> {
        let map = self.blocks.read().expect("lock poisoned");
        map.get(id).cloned().ok_or(StoreError::NotFound(*id))
    }
}

impl Default for InMemoryBlockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockStore for InMemoryBlockStore {
    fn get(&self, id: &BlockId) -> StoreResult<Block> {
        let block = self.lookup(id)?;
        if self.is_hash_on_read() {
            block.verify()?;
        }
        Ok(block)
    }

    fn has(&self, id: &BlockId) -> StoreResult<bool> {
        let map = self.blocks.read().expect("lock poisoned");
        Ok(map.contains_key(id))
    }

    fn get_size(&self, id: &BlockId) -> StoreResult<u64> {
        Ok(self.lookup(id)?.size())
    }

    fn put(&self, block: Block) -> StoreResult<()> {
        let mut map = self.blocks.write().expect("lock poisoned");
        // Idempotent: an existing entry under the same id is kept.
        map.entry(block.id()).or_insert(block);
        Ok(())
    }

    fn put_many(&self, blocks: Vec<Block>) -> StoreResult<()> {
        let mut map = self.blocks.write().expect("lock poisoned");
        for block in blocks {
            map.entry(block.id()).or_insert(block);
        }
        Ok(())
    }

    fn delete_block(&self, id: &BlockId) -> StoreResult<()> {
        self.blocks.write().expect("lock poisoned").remove(id);
        Ok(())
    }

    fn all_keys(&self, cancel: CancellationToken) -> StoreResult<KeyStream> {
        spawn_key_producer(self.all_ids(), DEFAULT_KEY_CHANNEL_CAPACITY, cancel)
    }

    fn hash_on_read(&self, enabled: bool) {
        self.hash_on_read.store(enabled, Ordering::Relaxed);
    }
}

impl std::fmt::Debug for InMemoryBlockStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryBlockStore")
            .field("block_count", &self.len())
            .field("hash_on_read", &self.is_hash_on_read())
            .finish()
    }
}
