//! Content hashing for bufstore.
//!
//! Block identifiers are domain-separated BLAKE3 digests of the block
//! payload. All hashing goes through [`ContentHasher`] so every store agrees
//! on how an identifier is derived.

pub mod hasher;

pub use hasher::ContentHasher;
