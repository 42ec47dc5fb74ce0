//! Event classification and record reconciliation.

use tracing::{debug, info, warn};

use crate::event::{Action, LifecycleEvent};
use crate::hosts::HostTable;
use crate::keys::record_key;
use crate::metrics::{self, EventOutcome, StoreOp, Timer};
use crate::store::{KvStore, RecordValue, StoreError};

/// Why an event produced no store mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Event carries no hostname attribute.
    NoHostnameAttribute,
    /// Hostname matches no configured suffix.
    NoSuffixMatch,
    /// Action has no record mapping.
    IrrelevantAction,
    /// Hostname cannot be turned into a storage key.
    InvalidHostname,
}

/// Result of reconciling one lifecycle event.
#[derive(Debug)]
pub enum Outcome {
    /// A record was written for the event's hostname.
    Created,
    /// The record for the event's hostname was removed.
    Deleted,
    /// The event required no store mutation.
    Skipped(SkipReason),
    /// The store mutation failed; the event is not retried.
    Failed(StoreError),
}

impl Outcome {
    /// Metrics label for this outcome.
    pub(crate) fn metric(&self) -> EventOutcome {
        match self {
            Outcome::Created => EventOutcome::Created,
            Outcome::Deleted => EventOutcome::Deleted,
            Outcome::Skipped(_) => EventOutcome::Skipped,
            Outcome::Failed(_) => EventOutcome::Failed,
        }
    }
}

/// Reconcile one lifecycle event against the record store.
///
/// Issues at most one store mutation: a put for `start`/`create`, a delete
/// for `stop`/`die`/`destroy`. Events without a hostname attribute, or whose
/// hostname matches no configured suffix, are skipped without error. Failed
/// mutations are reported in the outcome and not retried.
pub async fn reconcile<S>(event: &LifecycleEvent, table: &HostTable, store: &S) -> Outcome
where
    S: KvStore + ?Sized,
{
    let Some(hostname) = event.hostname() else {
        return Outcome::Skipped(SkipReason::NoHostnameAttribute);
    };

    let address = match table.resolve(hostname) {
        Ok(address) => address,
        Err(_) => {
            debug!(container = %event.id, hostname, "hostname outside managed suffixes, skipping");
            return Outcome::Skipped(SkipReason::NoSuffixMatch);
        }
    };

    debug!(container = %event.id, hostname, address, "resolved host suffix match");

    let key = match record_key(hostname) {
        Ok(key) => key,
        Err(err) => {
            warn!(container = %event.id, error = %err, "cannot derive storage key, skipping");
            return Outcome::Skipped(SkipReason::InvalidHostname);
        }
    };

    match event.action {
        Action::Start | Action::Create => {
            let value = RecordValue {
                host: address.to_string(),
            };
            let value = match serde_json::to_string(&value) {
                Ok(value) => value,
                Err(err) => return Outcome::Failed(StoreError::new(err.to_string())),
            };

            let timer = Timer::start();
            match store.put(&key, &value).await {
                Ok(()) => {
                    metrics::record_store_operation(StoreOp::Put, true, timer.elapsed());
                    info!(container = %event.id, hostname, key = %key, "added record");
                    Outcome::Created
                }
                Err(err) => {
                    metrics::record_store_operation(StoreOp::Put, false, timer.elapsed());
                    Outcome::Failed(err)
                }
            }
        }
        Action::Stop | Action::Die | Action::Destroy => {
            let timer = Timer::start();
            match store.delete(&key).await {
                Ok(()) => {
                    metrics::record_store_operation(StoreOp::Delete, true, timer.elapsed());
                    info!(container = %event.id, hostname, key = %key, "deleted record");
                    Outcome::Deleted
                }
                Err(err) => {
                    metrics::record_store_operation(StoreOp::Delete, false, timer.elapsed());
                    Outcome::Failed(err)
                }
            }
        }
        Action::Other => Outcome::Skipped(SkipReason::IrrelevantAction),
    }
}
