//! Cancellable, pull-driven streams of block identifiers.
//!
//! Key enumeration hands identifiers from a producer task to the consumer
//! through a bounded channel, so the consumer's pace governs the producer.
//! Both ends observe the same [`CancellationToken`]: once it fires the
//! producer stops pushing and the consumer stops yielding, even if an
//! identifier is still sitting in the channel buffer.

use bufstore_types::BlockId;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::error::{StoreError, StoreResult};

/// Default buffer between a key producer and its consumer.
pub const DEFAULT_KEY_CHANNEL_CAPACITY: usize = 1;

/// Create a connected producer/consumer pair.
///
/// A `capacity` of zero is rounded up to one; tokio channels cannot be
/// unbuffered.
pub fn key_channel(capacity: usize, cancel: CancellationToken) -> (KeySender, KeyStream) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (
        KeySender {
            tx,
            cancel: cancel.clone(),
        },
        KeyStream { rx, cancel },
    )
}

/// Returns the ambient tokio runtime, or [`StoreError::NoRuntime`].
pub fn current_runtime() -> StoreResult<Handle> {
    Handle::try_current().map_err(|_| StoreError::NoRuntime)
}

/// Stream a fixed set of identifiers from a spawned producer task.
///
/// Used by stores that can snapshot their key set up front.
pub fn spawn_key_producer(
    ids: Vec<BlockId>,
    capacity: usize,
    cancel: CancellationToken,
) -> StoreResult<KeyStream> {
    let runtime = current_runtime()?;
    let (tx, stream) = key_channel(capacity, cancel);
    runtime.spawn(async move {
        let total = ids.len();
        for (sent, id) in ids.into_iter().enumerate() {
            if !tx.send(id).await {
                trace!(sent, total, "key producer stopped early");
                return;
            }
        }
        trace!(total, "key producer exhausted");
    });
    Ok(stream)
}

/// Producer half of a key stream.
#[derive(Clone, Debug)]
pub struct KeySender {
    tx: mpsc::Sender<BlockId>,
    cancel: CancellationToken,
}

impl KeySender {
    /// Hand one identifier to the consumer, waiting for buffer space.
    ///
    /// Returns `false` if the token was cancelled or the consumer went away;
    /// the producer should stop in either case.
    pub async fn send(&self, id: BlockId) -> bool {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => false,
            res = self.tx.send(id) => res.is_ok(),
        }
    }
}

/// Consumer half of a key stream: a lazy, one-shot, cancellable sequence.
#[derive(Debug)]
pub struct KeyStream {
    rx: mpsc::Receiver<BlockId>,
    cancel: CancellationToken,
}

impl KeyStream {
    /// Next identifier, or `None` once the producer finished or the
    /// token was cancelled.
    pub async fn next(&mut self) -> Option<BlockId> {
        let next = if self.cancel.is_cancelled() {
            None
        } else {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => None,
                id = self.rx.recv() => id,
            }
        };
        if next.is_none() {
            self.rx.close();
        }
        next
    }

    /// Drain the stream into a vector.
    pub async fn collect(mut self) -> Vec<BlockId> {
        let mut ids = Vec::new();
        while let Some(id) = self.next().await {
            ids.push(id);
        }
        ids
    }
}
