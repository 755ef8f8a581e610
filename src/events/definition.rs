//! Event definitions.
//!
//! An event is a scripted game moment: a dialogue prompt, an enemy wave,
//! a tutorial step, a boss phase. The engine tracks only its identity,
//! kind, priority and lifecycle status. `content` is an opaque payload
//! that only the host interprets.

use serde::{Deserialize, Serialize};

/// Unique identifier for an event.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub String);

impl EventId {
    /// Create a new event ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the flag set when this event completes.
    ///
    /// ```
    /// use cue_engine::events::EventId;
    ///
    /// assert_eq!(EventId::new("intro").completion_flag(), "event_intro_completed");
    /// ```
    #[must_use]
    pub fn completion_flag(&self) -> String {
        format!("event_{}_completed", self.0)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EventId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What kind of moment an event describes.
///
/// The engine does not branch on kind; hosts use it to route fired events
/// to the right presenter. Serialized as a plain lowercase string; any
/// string other than the four built-ins becomes `Custom`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    /// Dialogue box or conversation.
    Dialogue,
    /// Entity spawn.
    Spawn,
    /// Tutorial prompt.
    Tutorial,
    /// Boss phase transition.
    Boss,
    /// Game-defined kind.
    Custom(String),
}

impl EventKind {
    /// The kind's string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            EventKind::Dialogue => "dialogue",
            EventKind::Spawn => "spawn",
            EventKind::Tutorial => "tutorial",
            EventKind::Boss => "boss",
            EventKind::Custom(s) => s,
        }
    }
}

impl From<String> for EventKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "dialogue" => EventKind::Dialogue,
            "spawn" => EventKind::Spawn,
            "tutorial" => EventKind::Tutorial,
            "boss" => EventKind::Boss,
            _ => EventKind::Custom(s),
        }
    }
}

impl From<&str> for EventKind {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::Custom(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of an event.
///
/// Status only moves forward: `Registered -> Active -> Completed`.
/// The derived ordering follows that progression.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// Known to the engine but not yet activated.
    #[default]
    Registered,
    /// Activated by a trigger or manually; the host is presenting it.
    Active,
    /// Finished. Terminal until the event is registered again.
    Completed,
}

impl EventStatus {
    /// Whether moving to `next` is a legal forward transition.
    #[must_use]
    pub fn can_advance_to(self, next: EventStatus) -> bool {
        next > self
    }
}

/// A scripted event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDefinition {
    /// Unique identifier.
    pub id: EventId,

    /// What kind of moment this is.
    pub kind: EventKind,

    /// Host-defined priority, carried through untouched. Any JSON number.
    #[serde(default)]
    pub priority: f64,

    /// Opaque payload interpreted by the host.
    #[serde(default)]
    pub content: serde_json::Value,

    /// Current lifecycle status.
    #[serde(default, skip_deserializing)]
    pub status: EventStatus,
}

impl EventDefinition {
    /// Create a new event in the `Registered` state.
    pub fn new(id: impl Into<EventId>, kind: impl Into<EventKind>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            priority: 0.0,
            content: serde_json::Value::Null,
            status: EventStatus::Registered,
        }
    }

    /// Set the priority (builder pattern).
    #[must_use]
    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = priority;
        self
    }

    /// Set the payload (builder pattern).
    #[must_use]
    pub fn with_content(mut self, content: serde_json::Value) -> Self {
        self.content = content;
        self
    }

    /// Check if the event is currently active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == EventStatus::Active
    }

    /// Check if the event has completed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == EventStatus::Completed
    }
}
