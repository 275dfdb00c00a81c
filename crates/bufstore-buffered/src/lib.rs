//! Write-buffered block store.
//!
//! [`BufferedStore`] overlays an in-memory block store on top of a slower,
//! authoritative base store. New blocks accumulate in the overlay; lookups
//! consult the base first and fall back to the overlay; key enumeration
//! merges both stores into a single cancellable stream.
//!
//! Moving buffered blocks into the base store is left to callers, who can
//! reach both layers through [`BufferedStore::read`] and
//! [`BufferedStore::write`].

pub mod buffered;
pub mod config;
mod merge;

#[cfg(test)]
mod testing;

pub use buffered::BufferedStore;
pub use config::{BufferConfig, ConfigError, ConfigResult};
