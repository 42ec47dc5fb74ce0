//! Metrics instrumentation for docker-dns.
//!
//! All metrics are prefixed with `docker_dns.`

use metrics::{counter, gauge, histogram};
use std::time::Instant;

/// Record a processed lifecycle event.
pub fn record_event(action: &str, outcome: EventOutcome) {
    let outcome_str = match outcome {
        EventOutcome::Created => "created",
        EventOutcome::Deleted => "deleted",
        EventOutcome::Skipped => "skipped",
        EventOutcome::Failed => "failed",
    };

    counter!("docker_dns.event.count", "action" => action.to_string(), "outcome" => outcome_str)
        .increment(1);
}

/// Event outcome for metrics.
#[derive(Debug, Clone, Copy)]
pub enum EventOutcome {
    /// A record was written.
    Created,
    /// A record was removed.
    Deleted,
    /// The event required no store mutation.
    Skipped,
    /// The store mutation failed.
    Failed,
}

/// Record a store mutation.
pub fn record_store_operation(op: StoreOp, ok: bool, duration: std::time::Duration) {
    let op_str = match op {
        StoreOp::Put => "put",
        StoreOp::Delete => "delete",
    };
    let result_str = if ok { "ok" } else { "error" };

    counter!("docker_dns.store.operation.count", "op" => op_str, "result" => result_str)
        .increment(1);
    histogram!("docker_dns.store.operation.duration.seconds", "op" => op_str)
        .record(duration.as_secs_f64());
}

/// Store mutation types.
#[derive(Debug, Clone, Copy)]
pub enum StoreOp {
    /// Record upsert.
    Put,
    /// Record removal.
    Delete,
}

/// Record a (re)subscription to the event stream.
pub fn record_stream_reconnect(reason: ReconnectReason) {
    let reason_str = match reason {
        ReconnectReason::InitialConnect => "initial_connect",
        ReconnectReason::StreamError => "stream_error",
        ReconnectReason::StreamEnded => "stream_ended",
    };

    counter!("docker_dns.stream.reconnect.count", "reason" => reason_str).increment(1);
}

/// Reconnect reasons.
#[derive(Debug, Clone, Copy)]
pub enum ReconnectReason {
    /// First subscription after startup.
    InitialConnect,
    /// The event stream yielded an error.
    StreamError,
    /// The event stream ended without an error.
    StreamEnded,
}

/// Record the size of the configured host table.
pub fn record_host_table_size(count: usize) {
    gauge!("docker_dns.hosts.count").set(count as f64);
}

/// Helper for timing operations.
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed duration since timer start.
    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}
