//! Error types for docker-dns.

use thiserror::Error;

use crate::store::StoreError;

/// Errors that stop the daemon before the event loop starts.
///
/// Everything recoverable at runtime (unmatched hostnames, failed store
/// mutations, stream interruptions) is handled locally by the reconciler
/// and event loop and never surfaces through this type.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Docker engine client error
    #[error("docker client error: {0}")]
    Docker(#[from] bollard::errors::Error),

    /// Record store error
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
