//! docker-dns - Publishes DNS records for Docker containers into etcd.
//!
//! This crate watches the Docker engine's container lifecycle event stream
//! and maintains name-to-address records in etcd, so that other services can
//! resolve container hostnames without external DNS infrastructure. It is a
//! reactive synchronizer: one event source, one record store, and a
//! deterministic mapping between them.
//!
//! ## Features
//!
//! - Records written on container `start`/`create`, removed on
//!   `stop`/`die`/`destroy`
//! - Longest-suffix hostname resolution against a configured host table
//! - Reversed hierarchical storage keys (`a.b.com` → `/internaldns/com/b/a`)
//! - Automatic resubscription to the event stream on transport errors
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                          docker-dns                            │
//! │                                                                │
//! │  ┌────────────────┐     ┌──────────────────┐                   │
//! │  │ Docker engine  │────▶│   Synchronizer   │                   │
//! │  │ (event stream) │     │   (event loop)   │                   │
//! │  └────────────────┘     └────────┬─────────┘                   │
//! │                                  │ reconcile                   │
//! │                                  ▼                             │
//! │   ┌───────────┐  resolve  ┌──────────────┐   put/delete        │
//! │   │ HostTable │◀──────────│  Reconciler  │────────────▶ etcd   │
//! │   └───────────┘           └──────────────┘                     │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Record mapping
//!
//! ```text
//! container start, attribute internaldns.host=svc1.cluster.example.com
//!   → longest matching suffix in the host table picks the address
//!   → key /internaldns/com/example/cluster/svc1
//!   → put {"host": "<address>"}
//! ```
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use std::path::Path;
//!
//! use docker_dns::{Config, DockerEvents, EtcdStore, HostTable, Synchronizer};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::load(Path::new("docker-dns.toml")).unwrap();
//!
//!     let table = HostTable::from_config(&config.hosts).unwrap();
//!     let store = EtcdStore::connect(&config.etcd_endpoint).await.unwrap();
//!     let source = DockerEvents::connect().unwrap();
//!
//!     Synchronizer::new(source, table, store).run().await;
//! }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod docker;
pub mod error;
pub mod event;
pub mod hosts;
pub mod keys;
pub mod metrics;
pub mod reconcile;
pub mod store;
pub mod sync;
pub mod telemetry;

// Re-export main types
pub use config::{Config, HostConfig, TelemetryConfig};
pub use docker::{DockerEvents, EventSource, StreamError};
pub use error::SyncError;
pub use event::{Action, LifecycleEvent, HOSTNAME_ATTRIBUTE};
pub use hosts::{HostEntry, HostTable};
pub use store::{EtcdStore, KvStore, StoreError};
pub use sync::Synchronizer;
