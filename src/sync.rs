//! Event loop driving record reconciliation from the container event stream.

use futures::StreamExt;
use tracing::{error, info, warn};

use crate::docker::EventSource;
use crate::hosts::HostTable;
use crate::metrics::{self, ReconnectReason};
use crate::reconcile::{reconcile, Outcome};
use crate::store::KvStore;

/// Drives the record store from a container lifecycle event stream.
///
/// Events are processed strictly one at a time: the store mutation for an
/// event completes before the next event is consumed. When the stream
/// yields an error or ends, a fresh subscription is established
/// immediately, with no backoff and no retry bound; only process
/// termination stops the loop.
pub struct Synchronizer<E, S> {
    source: E,
    table: HostTable,
    store: S,
}

impl<E, S> Synchronizer<E, S>
where
    E: EventSource,
    S: KvStore,
{
    /// Create a synchronizer over the given event source and record store.
    pub fn new(source: E, table: HostTable, store: S) -> Self {
        Self {
            source,
            table,
            store,
        }
    }

    /// Run the event loop. Does not return during normal operation.
    pub async fn run(self) {
        let mut reason = ReconnectReason::InitialConnect;

        loop {
            info!("subscribing to container lifecycle events");
            metrics::record_stream_reconnect(reason);

            let mut stream = self.source.subscribe();

            loop {
                match stream.next().await {
                    Some(Ok(event)) => {
                        let outcome = reconcile(&event, &self.table, &self.store).await;
                        metrics::record_event(event.action.as_str(), outcome.metric());

                        if let Outcome::Failed(err) = outcome {
                            error!(
                                container = %event.id,
                                action = %event.action,
                                error = %err,
                                "store mutation failed, continuing with next event"
                            );
                        }
                    }
                    Some(Err(err)) => {
                        warn!(error = %err, "event stream error, resubscribing");
                        reason = ReconnectReason::StreamError;
                        break;
                    }
                    None => {
                        info!("event stream ended, resubscribing");
                        reason = ReconnectReason::StreamEnded;
                        break;
                    }
                }
            }
        }
    }
}
