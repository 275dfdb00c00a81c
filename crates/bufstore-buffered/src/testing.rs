//! Instrumented block store for routing tests.

use std::collections::HashSet;
use std::sync::Mutex;

use bufstore_store::{Block, BlockStore, InMemoryBlockStore, KeyStream, StoreError, StoreResult};
use bufstore_types::BlockId;
use tokio_util::sync::CancellationToken;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    Get,
    Has,
    GetSize,
    Put,
    PutMany,
    Delete,
    AllKeys,
    HashOnRead,
}

/// Wraps an [`InMemoryBlockStore`], recording every call and failing the
/// operations it was told to fail.
#[derive(Default)]
pub struct RecordingStore {
    inner: InMemoryBlockStore,
    calls: Mutex<Vec<Op>>,
    failing: Mutex<HashSet<Op>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blocks(blocks: &[Block]) -> Self {
        let store = Self::new();
        store.inner.put_many(blocks.to_vec()).unwrap();
        store
    }

    pub fn fail(&self, op: Op) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn calls(&self) -> Vec<Op> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn inner(&self) -> &InMemoryBlockStore {
        &self.inner
    }

    fn enter(&self, op: Op) -> StoreResult<()> {
        self.calls.lock().unwrap().push(op);
        if self.failing.lock().unwrap().contains(&op) {
            return Err(StoreError::Backend(format!("injected {op:?} failure")));
        }
        Ok(())
    }
}

impl BlockStore for RecordingStore {
    fn get(&self, id: &BlockId) -> StoreResult<Block> {
        self.enter(Op::Get)?;
        self.inner.get(id)
    }

    fn has(&self, id: &BlockId) -> StoreResult<bool> {
        self.enter(Op::Has)?;
        self.inner.has(id)
    }

    fn get_size(&self, id: &BlockId) -> StoreResult<u64> {
        self.enter(Op::GetSize)?;
        self.inner.get_size(id)
    }

    fn put(&self, block: Block) -> StoreResult<()> {
        self.enter(Op::Put)?;
        self.inner.put(block)
    }

    fn put_many(&self, blocks: Vec<Block>) -> StoreResult<()> {
        self.enter(Op::PutMany)?;
        self.inner.put_many(blocks)
    }

    fn delete_block(&self, id: &BlockId) -> StoreResult<()> {
        self.enter(Op::Delete)?;
        self.inner.delete_block(id)
    }

    fn all_keys(&self, cancel: CancellationToken) -> StoreResult<KeyStream> {
        self.enter(Op::AllKeys)?;
        self.inner.all_keys(cancel)
    }

    fn hash_on_read(&self, enabled: bool) {
        self.calls.lock().unwrap().push(Op::HashOnRead);
        self.inner.hash_on_read(enabled);
    }
}
