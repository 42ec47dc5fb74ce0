//! Key-value store client for published records.

use std::time::Duration;

use async_trait::async_trait;
use etcd_client::{Client, ConnectOptions};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Timeout for establishing the initial store connection.
const DIAL_TIMEOUT: Duration = Duration::from_secs(5);

/// Failure of a store connection or mutation.
#[derive(Debug, Clone, Error)]
#[error("store operation failed: {message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    /// Create a store error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<etcd_client::Error> for StoreError {
    fn from(err: etcd_client::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Value stored for each published record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordValue {
    /// Resolved address for the record's hostname.
    pub host: String,
}

/// Mutations the reconciler issues against the record store.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Write `value` at `key`, overwriting any existing record.
    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove the record at `key`, if any.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// Record store backed by an etcd cluster.
#[derive(Clone)]
pub struct EtcdStore {
    client: Client,
}

impl EtcdStore {
    /// Connect to etcd at `endpoint` with a bounded dial timeout.
    pub async fn connect(endpoint: &str) -> Result<Self, StoreError> {
        let options = ConnectOptions::new().with_connect_timeout(DIAL_TIMEOUT);
        let client = Client::connect([endpoint], Some(options)).await?;
        debug!(endpoint, "connected to etcd");

        Ok(Self { client })
    }
}

#[async_trait]
impl KvStore for EtcdStore {
    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut kv = self.client.kv_client();
        kv.put(key, value, None).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut kv = self.client.kv_client();
        kv.delete(key, None).await?;
        Ok(())
    }
}
