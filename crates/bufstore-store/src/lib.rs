//! Content-addressed block storage for bufstore.
//!
//! Every block is an immutable payload keyed by the domain-separated BLAKE3
//! hash of its bytes. This crate defines the capability all stores share and
//! the in-memory implementation used as a write overlay.
//!
//! # Storage Backends
//!
//! All backends implement the [`BlockStore`] trait:
//!
//! - [`InMemoryBlockStore`] -- `HashMap`-based store for overlays and tests
//!
//! Persistent backends live outside this workspace and plug in through the
//! same trait.
//!
//! # Design Rules
//!
//! 1. Blocks are immutable once written (content addressing guarantees this).
//! 2. A missing block is always [`StoreError::NotFound`], never a generic error.
//! 3. Concurrent reads are always safe.
//! 4. Key enumeration is lazy, bounded and cancellable ([`KeyStream`]).
//! 5. All I/O errors are propagated, never silently ignored.

pub mod block;
pub mod error;
pub mod keys;
pub mod memory;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use block::Block;
pub use error::{StoreError, StoreResult};
pub use keys::{
    current_runtime, key_channel, spawn_key_producer, KeySender, KeyStream,
    DEFAULT_KEY_CHANNEL_CAPACITY,
};
pub use memory::InMemoryBlockStore;
pub use traits::BlockStore;
