//! Trigger registry.
//!
//! Stores trigger definitions in registration order, with an index from
//! event ID to the triggers that activate it. Evaluation walks the
//! registration order; nothing else about ordering is promised.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::Millis;
use crate::events::EventId;

use super::condition::{TriggerCondition, TriggerType};

/// Unique identifier for a trigger.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TriggerId(pub String);

impl TriggerId {
    /// Create a new trigger ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TriggerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TriggerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for TriggerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A trigger definition.
///
/// Links one condition to one event. Runtime state (`fired`, `fire_count`,
/// `start_time` and the edge detector) is reset whenever the trigger is
/// registered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerDefinition {
    /// Unique identifier.
    pub id: TriggerId,

    /// The event this trigger activates.
    pub event_id: EventId,

    /// When the trigger fires.
    #[serde(flatten)]
    pub condition: TriggerCondition,

    /// Removed from the registry after its first fire.
    pub one_time: bool,

    /// Has this trigger fired at least once?
    #[serde(default)]
    pub fired: bool,

    /// How many times this trigger has fired.
    #[serde(default)]
    pub fire_count: u32,

    /// When the delay timer started (time triggers only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Millis>,

    /// Result of the previous decided evaluation, for edge detection.
    #[serde(skip)]
    pub(crate) last_result: bool,
}

impl TriggerDefinition {
    /// Create a new one-time trigger.
    pub fn new(id: impl Into<TriggerId>, event_id: impl Into<EventId>, condition: TriggerCondition) -> Self {
        Self {
            id: id.into(),
            event_id: event_id.into(),
            condition,
            one_time: true,
            fired: false,
            fire_count: 0,
            start_time: None,
            last_result: false,
        }
    }

    /// Allow the trigger to fire more than once (builder pattern).
    #[must_use]
    pub fn repeatable(mut self) -> Self {
        self.one_time = false;
        self
    }

    /// Set one-time/repeatable explicitly (builder pattern).
    #[must_use]
    pub fn with_one_time(mut self, one_time: bool) -> Self {
        self.one_time = one_time;
        self
    }

    /// The condition family.
    #[must_use]
    pub fn trigger_type(&self) -> TriggerType {
        self.condition.trigger_type()
    }

    /// Clear runtime state.
    pub fn reset(&mut self) {
        self.fired = false;
        self.fire_count = 0;
        self.start_time = None;
        self.last_result = false;
    }

    /// Record one fire.
    pub(crate) fn record_fire(&mut self) {
        self.fired = true;
        self.fire_count = self.fire_count.saturating_add(1);
    }
}

/// Registry for triggers.
#[derive(Clone, Debug, Default)]
pub struct TriggerRegistry {
    /// All registered triggers.
    triggers: FxHashMap<TriggerId, TriggerDefinition>,

    /// Registration order.
    order: Vec<TriggerId>,

    /// Index by linked event.
    by_event: FxHashMap<EventId, Vec<TriggerId>>,
}

impl TriggerRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a trigger with fresh runtime state.
    ///
    /// A trigger with the same ID is replaced and returned; the replacement
    /// keeps the original's place in registration order.
    pub fn register(&mut self, mut trigger: TriggerDefinition) -> Option<TriggerDefinition> {
        trigger.reset();
        let id = trigger.id.clone();

        let previous = self.triggers.remove(&id);
        match &previous {
            Some(old) if old.event_id == trigger.event_id => {}
            Some(old) => {
                self.unindex(&id, &old.event_id);
                self.index_in_order(&id, &trigger.event_id);
            }
            None => {
                self.order.push(id.clone());
                self.by_event
                    .entry(trigger.event_id.clone())
                    .or_default()
                    .push(id.clone());
            }
        }

        self.triggers.insert(id, trigger);
        previous
    }

    /// Index a replacement under its new event, keeping the list in
    /// registration order.
    fn index_in_order(&mut self, id: &TriggerId, event_id: &EventId) {
        let order = &self.order;
        let rank = |t: &TriggerId| order.iter().position(|o| o == t);
        let list = self.by_event.entry(event_id.clone()).or_default();
        let at = list.partition_point(|t| rank(t) < rank(id));
        list.insert(at, id.clone());
    }

    /// Unregister a trigger.
    pub fn remove(&mut self, id: &TriggerId) -> Option<TriggerDefinition> {
        let trigger = self.triggers.remove(id)?;
        self.order.retain(|t| t != id);
        self.unindex(id, &trigger.event_id);
        Some(trigger)
    }

    fn unindex(&mut self, id: &TriggerId, event_id: &EventId) {
        if let Some(list) = self.by_event.get_mut(event_id) {
            list.retain(|t| t != id);
            if list.is_empty() {
                self.by_event.remove(event_id);
            }
        }
    }

    /// Get a trigger by ID.
    #[must_use]
    pub fn get(&self, id: &TriggerId) -> Option<&TriggerDefinition> {
        self.triggers.get(id)
    }

    /// Get a mutable trigger by ID.
    pub fn get_mut(&mut self, id: &TriggerId) -> Option<&mut TriggerDefinition> {
        self.triggers.get_mut(id)
    }

    /// Check if a trigger ID is registered.
    #[must_use]
    pub fn contains(&self, id: &TriggerId) -> bool {
        self.triggers.contains_key(id)
    }

    /// Snapshot of all trigger IDs in registration order.
    #[must_use]
    pub fn ids(&self) -> Vec<TriggerId> {
        self.order.clone()
    }

    /// Triggers that activate an event, in registration order.
    pub fn triggers_for_event(&self, event_id: &EventId) -> Vec<&TriggerDefinition> {
        let Some(ids) = self.by_event.get(event_id) else {
            return Vec::new();
        };
        ids.iter().filter_map(|id| self.triggers.get(id)).collect()
    }

    /// Get total trigger count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// Iterate all triggers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &TriggerDefinition> {
        self.order.iter().filter_map(|id| self.triggers.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tid(s: &str) -> TriggerId {
        TriggerId::new(s)
    }

    #[test]
    fn test_trigger_id() {
        let id = TriggerId::new("door_timer");
        assert_eq!(id.as_str(), "door_timer");
        assert_eq!(format!("{}", id), "door_timer");
    }

    #[test]
    fn test_trigger_builder() {
        let trigger = TriggerDefinition::new("t1", "door_open", TriggerCondition::after(100));
        assert!(trigger.one_time);
        assert_eq!(trigger.trigger_type(), TriggerType::Time);
        assert!(!trigger.fired);

        let repeating = trigger.repeatable();
        assert!(!repeating.one_time);
    }

    #[test]
    fn test_registry_register() {
        let mut registry = TriggerRegistry::new();
        let previous = registry.register(TriggerDefinition::new("t1", "e1", TriggerCondition::after(10)));

        assert!(previous.is_none());
        assert!(registry.get(&tid("t1")).is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_resets_runtime_state() {
        let mut registry = TriggerRegistry::new();
        let mut trigger = TriggerDefinition::new("t1", "e1", TriggerCondition::after(10));
        trigger.fired = true;
        trigger.fire_count = 4;
        trigger.start_time = Some(99);

        registry.register(trigger);
        let stored = registry.get(&tid("t1")).unwrap();
        assert!(!stored.fired);
        assert_eq!(stored.fire_count, 0);
        assert_eq!(stored.start_time, None);
    }

    #[test]
    fn test_replace_keeps_order_and_reindexes() {
        let mut registry = TriggerRegistry::new();
        registry.register(TriggerDefinition::new("a", "e1", TriggerCondition::after(10)));
        registry.register(TriggerDefinition::new("b", "e1", TriggerCondition::after(10)));

        let previous = registry.register(TriggerDefinition::new("a", "e2", TriggerCondition::after(50)));
        assert_eq!(previous.unwrap().event_id, EventId::new("e1"));

        assert_eq!(registry.ids(), vec![tid("a"), tid("b")]);
        let for_e1: Vec<_> = registry
            .triggers_for_event(&EventId::new("e1"))
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(for_e1, vec!["b"]);
        assert_eq!(registry.triggers_for_event(&EventId::new("e2")).len(), 1);
    }

    #[test]
    fn test_registry_remove() {
        let mut registry = TriggerRegistry::new();
        registry.register(TriggerDefinition::new("a", "e1", TriggerCondition::after(10)));
        registry.register(TriggerDefinition::new("b", "e1", TriggerCondition::after(10)));

        let removed = registry.remove(&tid("a"));
        assert!(removed.is_some());
        assert!(registry.remove(&tid("a")).is_none());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.ids(), vec![tid("b")]);
        assert_eq!(registry.triggers_for_event(&EventId::new("e1")).len(), 1);

        registry.remove(&tid("b"));
        assert!(registry.is_empty());
        assert!(registry.triggers_for_event(&EventId::new("e1")).is_empty());
    }

    #[test]
    fn test_event_index_order_survives_replacement() {
        let mut registry = TriggerRegistry::new();
        registry.register(TriggerDefinition::new("a", "e1", TriggerCondition::after(1)));
        registry.register(TriggerDefinition::new("b", "e2", TriggerCondition::after(1)));
        registry.register(TriggerDefinition::new("c", "e1", TriggerCondition::after(1)));

        let ids = |r: &TriggerRegistry, event: &str| -> Vec<String> {
            r.triggers_for_event(&EventId::new(event))
                .iter()
                .map(|t| t.id.to_string())
                .collect()
        };

        // Same event: position unchanged
        registry.register(TriggerDefinition::new("a", "e1", TriggerCondition::after(5)));
        assert_eq!(ids(&registry, "e1"), vec!["a", "c"]);

        // Moved to another event: slotted by registration order
        registry.register(TriggerDefinition::new("b", "e1", TriggerCondition::after(5)));
        assert_eq!(ids(&registry, "e1"), vec!["a", "b", "c"]);
        assert!(ids(&registry, "e2").is_empty());
    }

    #[test]
    fn test_iter_registration_order() {
        let mut registry = TriggerRegistry::new();
        for name in ["z", "m", "a"] {
            registry.register(TriggerDefinition::new(name, "e", TriggerCondition::after(1)));
        }
        let ids: Vec<_> = registry.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "m", "a"]);
    }

    #[test]
    fn test_definition_serialization_shape() {
        let trigger = TriggerDefinition::new("t1", "boss_intro", TriggerCondition::circle(1.0, 2.0, 3.0))
            .repeatable();
        let json = serde_json::to_value(&trigger).unwrap();

        assert_eq!(json["id"], "t1");
        assert_eq!(json["eventId"], "boss_intro");
        assert_eq!(json["type"], "spatial");
        assert_eq!(json["condition"]["radius"], 3.0);
        assert_eq!(json["oneTime"], false);

        let parsed: TriggerDefinition = serde_json::from_value(json!({
            "id": "t1",
            "eventId": "boss_intro",
            "type": "spatial",
            "condition": { "x": 1.0, "y": 2.0, "radius": 3.0, "shape": "circle" },
            "oneTime": false
        }))
        .unwrap();
        assert_eq!(parsed, trigger);
    }
}
