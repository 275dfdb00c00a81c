use bufstore_crypto::ContentHasher;
use bufstore_types::BlockId;
use bytes::Bytes;

use crate::error::{StoreError, StoreResult};

/// An immutable payload paired with its content-derived identifier.
///
/// `Block` is the unit of storage. Stores never interpret the payload; they
/// key it by [`Block::id`]. Cloning is cheap because the payload is a shared
/// [`Bytes`] buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    id: BlockId,
    data: Bytes,
}

impl Block {
    /// Create a block, deriving its identifier from the payload.
    pub fn new(data: impl Into<Bytes>) -> Self {
        let data = data.into();
        let id = ContentHasher::BLOCK.hash(&data);
        Self { id, data }
    }

    /// Pair a payload with a caller-supplied identifier without hashing.
    ///
    /// The pairing is not checked here. Stores with hash-on-read enabled will
    /// reject the block on retrieval if the two disagree.
    pub fn with_id(id: BlockId, data: impl Into<Bytes>) -> Self {
        Self {
            id,
            data: data.into(),
        }
    }

    /// The content-derived identifier.
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// The payload bytes.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Payload length in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Consume the block, returning its payload.
    pub fn into_data(self) -> Bytes {
        self.data
    }

    /// Recompute the payload hash and compare it with the stored identifier.
    pub fn verify(&self) -> StoreResult<()> {
        if ContentHasher::BLOCK.verify(&self.data, &self.id) {
            return Ok(());
        }
        Err(StoreError::HashMismatch {
            id: self.id,
            computed: ContentHasher::BLOCK.hash(&self.data),
        })
    }
}
