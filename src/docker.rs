//! Docker engine event source.

use std::collections::HashMap;

use bollard::system::EventsOptions;
use bollard::Docker;
use futures::stream::BoxStream;
use futures::StreamExt;
use thiserror::Error;
use tracing::debug;

use crate::error::SyncError;
use crate::event::LifecycleEvent;

/// Actions subscribed to from the engine; everything else is filtered
/// server-side.
const EVENT_FILTER: [&str; 5] = ["start", "create", "stop", "die", "destroy"];

/// Failure reported by the event stream.
#[derive(Debug, Clone, Error)]
#[error("event stream error: {message}")]
pub struct StreamError {
    message: String,
}

impl StreamError {
    /// Create a stream error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<bollard::errors::Error> for StreamError {
    fn from(err: bollard::errors::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Source of container lifecycle events.
///
/// A subscription is a finite view of an infinite stream: it yields events
/// until the transport fails or ends, at which point the caller is expected
/// to subscribe again.
pub trait EventSource: Send + Sync {
    /// Open a fresh subscription to the event stream.
    fn subscribe(&self) -> BoxStream<'static, Result<LifecycleEvent, StreamError>>;
}

/// Event source backed by a Docker engine.
#[derive(Clone)]
pub struct DockerEvents {
    docker: Docker,
}

impl DockerEvents {
    /// Wrap an existing Docker client.
    pub fn new(docker: Docker) -> Self {
        Self { docker }
    }

    /// Connect to the local Docker engine.
    pub fn connect() -> Result<Self, SyncError> {
        let docker = Docker::connect_with_local_defaults()?;
        debug!("connected to docker engine");

        Ok(Self::new(docker))
    }
}

impl EventSource for DockerEvents {
    fn subscribe(&self) -> BoxStream<'static, Result<LifecycleEvent, StreamError>> {
        let mut filters = HashMap::new();
        filters.insert("type", vec!["container"]);
        filters.insert("event", EVENT_FILTER.to_vec());

        let options = EventsOptions {
            filters,
            ..Default::default()
        };

        self.docker
            .events(Some(options))
            .map(|result| result.map(LifecycleEvent::from).map_err(StreamError::from))
            .boxed()
    }
}
