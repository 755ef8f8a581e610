//! Event registry.
//!
//! Stores event definitions and owns their lifecycle transitions.
//! Iteration follows registration order.

use rustc_hash::FxHashMap;

use super::definition::{EventDefinition, EventId, EventKind, EventStatus};

/// Registry of scripted events.
///
/// ## Example
///
/// ```
/// use cue_engine::events::{EventDefinition, EventRegistry, EventStatus};
///
/// let mut registry = EventRegistry::new();
/// registry.register(EventDefinition::new("door_open", "tutorial"));
///
/// assert_eq!(registry.activate(&"door_open".into()), Some(true));
/// assert_eq!(registry.status(&"door_open".into()), Some(EventStatus::Active));
/// ```
#[derive(Clone, Debug, Default)]
pub struct EventRegistry {
    events: FxHashMap<EventId, EventDefinition>,

    /// Registration order.
    order: Vec<EventId>,
}

impl EventRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event, resetting it to `Registered`.
    ///
    /// An event with the same ID is replaced and returned. The replacement
    /// keeps the original's position in registration order.
    pub fn register(&mut self, mut event: EventDefinition) -> Option<EventDefinition> {
        event.status = EventStatus::Registered;
        let id = event.id.clone();
        let previous = self.events.insert(id.clone(), event);
        if previous.is_none() {
            self.order.push(id);
        }
        previous
    }

    /// Remove an event.
    pub fn remove(&mut self, id: &EventId) -> Option<EventDefinition> {
        let removed = self.events.remove(id)?;
        self.order.retain(|e| e != id);
        Some(removed)
    }

    /// Get an event by ID.
    #[must_use]
    pub fn get(&self, id: &EventId) -> Option<&EventDefinition> {
        self.events.get(id)
    }

    /// Check if an event ID is registered.
    #[must_use]
    pub fn contains(&self, id: &EventId) -> bool {
        self.events.contains_key(id)
    }

    /// Current status of an event.
    #[must_use]
    pub fn status(&self, id: &EventId) -> Option<EventStatus> {
        self.events.get(id).map(|e| e.status)
    }

    /// Move an event to `Active`.
    ///
    /// Returns `None` for unknown events, `Some(true)` if the status changed,
    /// and `Some(false)` if the event was already active or completed.
    pub fn activate(&mut self, id: &EventId) -> Option<bool> {
        self.advance_status(id, EventStatus::Active)
    }

    /// Move an event to `Completed`.
    ///
    /// Returns `None` for unknown events, `Some(true)` if the status changed,
    /// and `Some(false)` if the event was already completed.
    pub fn complete(&mut self, id: &EventId) -> Option<bool> {
        self.advance_status(id, EventStatus::Completed)
    }

    fn advance_status(&mut self, id: &EventId, next: EventStatus) -> Option<bool> {
        let event = self.events.get_mut(id)?;
        if event.status.can_advance_to(next) {
            event.status = next;
            Some(true)
        } else {
            Some(false)
        }
    }

    /// All events currently `Active`, in registration order.
    pub fn active_events(&self) -> Vec<&EventDefinition> {
        self.iter().filter(|e| e.is_active()).collect()
    }

    /// All events of a given kind, in registration order.
    pub fn events_of_kind<'a>(&'a self, kind: &'a EventKind) -> impl Iterator<Item = &'a EventDefinition> {
        self.iter().filter(move |e| &e.kind == kind)
    }

    /// Get the number of registered events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterate over all events in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &EventDefinition> {
        self.order.iter().filter_map(|id| self.events.get(id))
    }
}
