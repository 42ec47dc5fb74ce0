//! Shared test infrastructure for synchronizer integration tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};

use docker_dns::docker::{EventSource, StreamError};
use docker_dns::event::{Action, LifecycleEvent, HOSTNAME_ATTRIBUTE};
use docker_dns::hosts::{HostEntry, HostTable};
use docker_dns::store::{KvStore, StoreError};

// --- Event builders ---

/// Build a lifecycle event carrying the hostname attribute.
pub fn make_event(action: Action, hostname: &str) -> LifecycleEvent {
    let mut attributes = HashMap::new();
    attributes.insert(HOSTNAME_ATTRIBUTE.to_string(), hostname.to_string());
    LifecycleEvent {
        id: format!("container-{}", hostname),
        action,
        attributes,
    }
}

/// Build a lifecycle event without the hostname attribute.
pub fn make_plain_event(action: Action) -> LifecycleEvent {
    LifecycleEvent {
        id: "container-plain".to_string(),
        action,
        attributes: HashMap::new(),
    }
}

// --- Host table ---

pub fn test_table() -> HostTable {
    HostTable::from_entries(vec![
        HostEntry {
            suffix: "example.com".to_string(),
            address: "10.0.0.1".to_string(),
        },
        HostEntry {
            suffix: "cluster.example.com".to_string(),
            address: "10.0.0.2".to_string(),
        },
    ])
    .expect("failed to build test host table")
}

// --- MockStore ---

/// One observed store mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Put { key: String, value: String },
    Delete { key: String },
}

#[derive(Default)]
struct MockStoreInner {
    calls: Vec<StoreCall>,
    records: HashMap<String, String>,
    fail_remaining: usize,
}

/// Store double that records every mutation and keeps records in a map.
///
/// Clones share state, so a clone can be handed to the synchronizer while
/// the test keeps observing calls.
#[derive(Clone, Default)]
pub struct MockStore {
    inner: Arc<Mutex<MockStoreInner>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose first `n` mutations fail before succeeding again.
    pub fn failing_first(n: usize) -> Self {
        let store = Self::default();
        store.inner.lock().unwrap().fail_remaining = n;
        store
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn records(&self) -> HashMap<String, String> {
        self.inner.lock().unwrap().records.clone()
    }
}

#[async_trait]
impl KvStore for MockStore {
    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(StoreCall::Put {
            key: key.to_string(),
            value: value.to_string(),
        });
        if inner.fail_remaining > 0 {
            inner.fail_remaining -= 1;
            return Err(StoreError::new("etcd unavailable"));
        }
        inner.records.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(StoreCall::Delete {
            key: key.to_string(),
        });
        if inner.fail_remaining > 0 {
            inner.fail_remaining -= 1;
            return Err(StoreError::new("etcd unavailable"));
        }
        inner.records.remove(key);
        Ok(())
    }
}

// --- ScriptedSource ---

type Script = Vec<Result<LifecycleEvent, StreamError>>;

struct ScriptedInner {
    scripts: Mutex<VecDeque<Script>>,
    subscribes: AtomicUsize,
}

/// Event source double that replays scripted subscriptions.
///
/// Each `subscribe` call pops the next script. A script that runs out of
/// items ends the stream (the synchronizer resubscribes); the final script
/// stays open so the loop parks on it instead of spinning.
#[derive(Clone)]
pub struct ScriptedSource {
    inner: Arc<ScriptedInner>,
}

impl ScriptedSource {
    pub fn new(scripts: Vec<Script>) -> Self {
        Self {
            inner: Arc::new(ScriptedInner {
                scripts: Mutex::new(scripts.into()),
                subscribes: AtomicUsize::new(0),
            }),
        }
    }

    /// How many subscriptions have been opened so far.
    pub fn subscribe_count(&self) -> usize {
        self.inner.subscribes.load(Ordering::SeqCst)
    }
}

impl EventSource for ScriptedSource {
    fn subscribe(&self) -> BoxStream<'static, Result<LifecycleEvent, StreamError>> {
        self.inner.subscribes.fetch_add(1, Ordering::SeqCst);

        let mut scripts = self.inner.scripts.lock().unwrap();
        match scripts.pop_front() {
            Some(items) if scripts.is_empty() => {
                stream::iter(items).chain(stream::pending()).boxed()
            }
            Some(items) => stream::iter(items).boxed(),
            None => stream::pending().boxed(),
        }
    }
}

// --- Waiting ---

/// Poll the store until it has seen at least `count` mutations.
pub async fn wait_for_calls(store: &MockStore, count: usize) {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if store.calls().len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap_or_else(|_| {
        panic!(
            "timed out waiting for {} store calls, saw {:?}",
            count,
            store.calls()
        )
    });
}
