use std::fmt;

use serde::{Deserialize, Serialize};

/// Length in bytes of a [`BlockId`].
pub const BLOCK_ID_LEN: usize = 32;

/// Content-derived identifier for a block.
///
/// A `BlockId` is the 32-byte BLAKE3 digest of a block's payload (see
/// `bufstore-crypto` for the domain tag). Equal payloads always produce equal
/// identifiers, so a block can be looked up in any store that holds it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId([u8; BLOCK_ID_LEN]);

impl BlockId {
    /// Wrap a pre-computed digest.
    pub const fn from_hash(hash: [u8; BLOCK_ID_LEN]) -> Self {
        Self(hash)
    }

    /// The null identifier (all zeros). Never produced by hashing in practice.
    pub const fn null() -> Self {
        Self([0u8; BLOCK_ID_LEN])
    }

    /// Returns `true` if this is the null identifier.
    pub fn is_null(&self) -> bool {
        self.0 == [0u8; BLOCK_ID_LEN]
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; BLOCK_ID_LEN] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Debug for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockId({})", self.short_hex())
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
