use bufstore_store::{key_channel, KeyStream};
use bufstore_types::BlockId;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// What one turn of the merge loop observed.
enum Pulled {
    Read(Option<BlockId>),
    Write(Option<BlockId>),
    Cancelled,
}

/// Fan two key streams into one.
///
/// A single task owns both upstreams and the downstream sender. Each turn it
/// waits for whichever upstream yields first (or for cancellation) and
/// forwards the identifier before pulling again, so at most one identifier
/// is in flight. No dedup and no ordering: an identifier present in both
/// upstreams is forwarded twice.
pub(crate) fn merge_key_streams(
    runtime: &Handle,
    mut read: KeyStream,
    mut write: KeyStream,
    capacity: usize,
    cancel: CancellationToken,
) -> KeyStream {
    let (tx, merged) = key_channel(capacity, cancel.clone());

    runtime.spawn(async move {
        let mut read_open = true;
        let mut write_open = true;
        let mut forwarded = 0usize;

        while read_open || write_open {
            let pulled = tokio::select! {
                _ = cancel.cancelled() => Pulled::Cancelled,
                id = read.next(), if read_open => Pulled::Read(id),
                id = write.next(), if write_open => Pulled::Write(id),
            };

            let id = match pulled {
                Pulled::Cancelled => {
                    debug!(forwarded, "key merge cancelled");
                    return;
                }
                Pulled::Read(None) => {
                    trace!("base store keys exhausted");
                    read_open = false;
                    continue;
                }
                Pulled::Write(None) => {
                    trace!("overlay keys exhausted");
                    write_open = false;
                    continue;
                }
                Pulled::Read(Some(id)) | Pulled::Write(Some(id)) => id,
            };

            if !tx.send(id).await {
                debug!(forwarded, "key merge stopped by consumer");
                return;
            }
            forwarded += 1;
        }

        debug!(forwarded, "key merge finished");
    });

    merged
}
