//! Container lifecycle events consumed by the reconciler.

use std::collections::HashMap;
use std::fmt;

use bollard::models::EventMessage;

/// Actor attribute a container sets to request a DNS record.
pub const HOSTNAME_ATTRIBUTE: &str = "internaldns.host";

/// Lifecycle actions the reconciler distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Container started.
    Start,
    /// Container created.
    Create,
    /// Container stopped.
    Stop,
    /// Container's main process exited.
    Die,
    /// Container removed.
    Destroy,
    /// Any action with no record mapping.
    Other,
}

impl Action {
    /// Stable string form, used for logs and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Create => "create",
            Action::Stop => "stop",
            Action::Die => "die",
            Action::Destroy => "destroy",
            Action::Other => "other",
        }
    }
}

impl From<&str> for Action {
    fn from(action: &str) -> Self {
        match action {
            "start" => Action::Start,
            "create" => Action::Create,
            "stop" => Action::Stop,
            "die" => Action::Die,
            "destroy" => Action::Destroy,
            _ => Action::Other,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One container lifecycle notification.
///
/// Transient: produced by the event source, consumed immediately by the
/// reconciler, never retained.
#[derive(Debug, Clone)]
pub struct LifecycleEvent {
    /// Id of the container the event refers to.
    pub id: String,
    /// Lifecycle action reported by the runtime.
    pub action: Action,
    /// Actor attributes attached to the event.
    pub attributes: HashMap<String, String>,
}

impl LifecycleEvent {
    /// The hostname this container requests a record for, if declared.
    pub fn hostname(&self) -> Option<&str> {
        self.attributes.get(HOSTNAME_ATTRIBUTE).map(String::as_str)
    }
}

impl From<EventMessage> for LifecycleEvent {
    fn from(message: EventMessage) -> Self {
        let action = message
            .action
            .as_deref()
            .map(Action::from)
            .unwrap_or(Action::Other);

        let (id, attributes) = match message.actor {
            Some(actor) => (
                actor.id.unwrap_or_default(),
                actor.attributes.unwrap_or_default(),
            ),
            None => (String::new(), HashMap::new()),
        };

        Self {
            id,
            action,
            attributes,
        }
    }
}
