//! Foundation types for bufstore.
//!
//! Every other bufstore crate depends on `bufstore-types` for the
//! [`BlockId`] content address.

pub mod block_id;

pub use block_id::{BlockId, BLOCK_ID_LEN};
