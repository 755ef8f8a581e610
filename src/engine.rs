//! The host-owned trigger engine.
//!
//! `TriggerEngine` ties the flag store, both registries and the evaluator
//! together. A host creates one per scene (or per save slot), feeds it a
//! [`TickInput`] every frame, and reacts to the returned fires.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::{ConfigDocument, ConfigLoader, LoadSummary};
use crate::core::{EngineConfig, Millis, TickInput};
use crate::error::{EngineError, Result, ValidationError};
use crate::events::{EventDefinition, EventId, EventRegistry};
use crate::flags::{FlagStore, FlagValue};
use crate::preview::{self, SpatialPreview};
use crate::triggers::{FiredTrigger, SpatialCondition, TriggerDefinition, TriggerEvaluator, TriggerId, TriggerRegistry};

/// Scripted-event trigger engine.
///
/// ## Example
///
/// ```
/// use cue_engine::core::{Point, TickInput};
/// use cue_engine::engine::TriggerEngine;
///
/// let mut engine = TriggerEngine::new();
/// engine
///     .load_config(r#"{
///         "events":   [{ "id": "ambush", "kind": "spawn" }],
///         "triggers": [{ "id": "camp", "eventId": "ambush", "type": "spatial",
///                        "condition": { "x": 100, "y": 100, "radius": 50, "shape": "circle" } }]
///     }"#)
///     .unwrap();
///
/// let fired = engine.advance(&TickInput::at(16).with_position(Point::new(120.0, 110.0)));
/// assert_eq!(fired.len(), 1);
/// assert_eq!(engine.active_events().len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TriggerEngine {
    config: EngineConfig,
    flags: FlagStore,
    events: EventRegistry,
    triggers: TriggerRegistry,
    evaluator: TriggerEvaluator,
}

impl TriggerEngine {
    /// Create an engine with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with a custom configuration.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            evaluator: TriggerEvaluator::starting_at(config.clock_origin),
            config,
            ..Self::default()
        }
    }

    /// Get the engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // === Events ===

    /// Register an event. Re-registering an id replaces the event and
    /// resets it to `Registered`.
    pub fn register_event(&mut self, event: EventDefinition) -> Option<EventDefinition> {
        let id = event.id.clone();
        let previous = self.events.register(event);
        if let Some(old) = &previous {
            debug!(event = %id, previous_status = ?old.status, "Event re-registered");
        }
        previous
    }

    /// Remove an event. Triggers referencing it stay registered.
    pub fn remove_event(&mut self, id: &EventId) -> Option<EventDefinition> {
        self.events.remove(id)
    }

    /// Get an event by id.
    #[must_use]
    pub fn get_event(&self, id: &EventId) -> Option<&EventDefinition> {
        self.events.get(id)
    }

    /// All events in registration order.
    #[must_use]
    pub fn all_events(&self) -> Vec<&EventDefinition> {
        self.events.iter().collect()
    }

    /// Activate an event directly, bypassing its triggers.
    ///
    /// Returns whether the status changed. Completed events stay completed.
    pub fn trigger_event(&mut self, id: &EventId) -> Result<bool> {
        let activated = self
            .events
            .activate(id)
            .ok_or_else(|| EngineError::UnknownEvent(id.clone()))?;
        debug!(event = %id, activated, "Event triggered manually");
        Ok(activated)
    }

    /// Events currently `Active`, in registration order.
    #[must_use]
    pub fn active_events(&self) -> Vec<&EventDefinition> {
        self.events.active_events()
    }

    /// Mark an event completed and set its `event_<id>_completed` flag.
    pub fn complete_event(&mut self, id: &EventId) -> Result<()> {
        self.events
            .complete(id)
            .ok_or_else(|| EngineError::UnknownEvent(id.clone()))?;
        self.flags.set(id.completion_flag(), true);
        debug!(event = %id, "Event completed");
        Ok(())
    }

    // === Triggers ===

    /// Register a trigger after checking its condition.
    ///
    /// A trigger with the same id is replaced and returned.
    pub fn register_trigger(&mut self, trigger: TriggerDefinition) -> Result<Option<TriggerDefinition>> {
        trigger
            .condition
            .validate()
            .map_err(|reason| ValidationError::InvalidCondition {
                id: trigger.id.clone(),
                trigger_type: trigger.trigger_type(),
                reason,
            })?;

        if !self.events.contains(&trigger.event_id) {
            warn!(
                trigger = %trigger.id,
                event = %trigger.event_id,
                "Trigger references an event that is not defined"
            );
        }
        Ok(self.insert_trigger(trigger))
    }

    fn insert_trigger(&mut self, trigger: TriggerDefinition) -> Option<TriggerDefinition> {
        let id = trigger.id.clone();
        let previous = self.triggers.register(trigger);
        if previous.is_some() {
            debug!(trigger = %id, "Trigger re-registered");
        }
        previous
    }

    /// Unregister a trigger.
    pub fn remove_trigger(&mut self, id: &TriggerId) -> Option<TriggerDefinition> {
        self.triggers.remove(id)
    }

    /// Get a trigger by id.
    #[must_use]
    pub fn get_trigger(&self, id: &TriggerId) -> Option<&TriggerDefinition> {
        self.triggers.get(id)
    }

    /// All triggers in registration order.
    #[must_use]
    pub fn all_triggers(&self) -> Vec<&TriggerDefinition> {
        self.triggers.iter().collect()
    }

    /// Clear a trigger's runtime state so it is evaluated as if new.
    pub fn reset_trigger(&mut self, id: &TriggerId) -> Result<()> {
        let trigger = self
            .triggers
            .get_mut(id)
            .ok_or_else(|| EngineError::UnknownTrigger(id.clone()))?;
        trigger.reset();
        Ok(())
    }

    // === Flags ===

    /// Set a flag. Triggers observe the change on the next `advance`.
    pub fn set_flag(&mut self, name: impl Into<String>, value: impl Into<FlagValue>) -> Option<FlagValue> {
        self.flags.set(name, value)
    }

    /// Read a flag.
    #[must_use]
    pub fn get_flag(&self, name: &str) -> Option<&FlagValue> {
        self.flags.get(name)
    }

    // === Evaluation ===

    /// Declare the host clock reading at which the session starts.
    ///
    /// Timers first seen on the next `advance` count from `now`. Hosts
    /// whose clock does not start at 0 call this (or set
    /// `EngineConfig::clock_origin`) before the first tick.
    pub fn start_clock(&mut self, now: Millis) {
        self.evaluator.restart_clock(now);
        debug!(now, "Clock started");
    }

    /// Run one evaluation pass and return the triggers that fired.
    pub fn advance(&mut self, input: &TickInput) -> Vec<FiredTrigger> {
        self.evaluator
            .advance(input, &mut self.triggers, &mut self.events, &self.flags)
    }

    // === Configuration ===

    /// Load a configuration document from raw JSON.
    ///
    /// Nothing is registered unless the whole document is valid.
    pub fn load_config(&mut self, raw: &str) -> Result<LoadSummary> {
        let document = ConfigLoader::new(&self.config, &self.events).parse_str(raw)?;
        Ok(self.apply(document))
    }

    /// Load an already-parsed configuration document.
    pub fn load_config_value(&mut self, value: Value) -> Result<LoadSummary> {
        let document = ConfigLoader::new(&self.config, &self.events).parse_value(value)?;
        Ok(self.apply(document))
    }

    fn apply(&mut self, document: ConfigDocument) -> LoadSummary {
        let mut summary = LoadSummary::default();

        for event in document.events {
            let id = event.id.clone();
            if self.register_event(event).is_some() {
                warn!(event = %id, "Configuration replaced a registered event");
                summary.replaced_events += 1;
            }
            summary.events += 1;
        }

        for trigger in document.triggers {
            let id = trigger.id.clone();
            if self.insert_trigger(trigger).is_some() {
                warn!(trigger = %id, "Configuration replaced a registered trigger");
                summary.replaced_triggers += 1;
            }
            summary.triggers += 1;
        }

        info!(
            events = summary.events,
            triggers = summary.triggers,
            replaced_events = summary.replaced_events,
            replaced_triggers = summary.replaced_triggers,
            "Configuration loaded"
        );
        summary
    }

    // === Read access ===

    /// Geometry of a spatial trigger and of an optional unsaved edit.
    #[must_use]
    pub fn spatial_preview(&self, id: &TriggerId, edit_buffer: Option<&SpatialCondition>) -> Option<SpatialPreview> {
        preview::spatial_preview(&self.triggers, id, edit_buffer)
    }

    /// The flag store.
    #[must_use]
    pub fn flags(&self) -> &FlagStore {
        &self.flags
    }

    /// The event registry.
    #[must_use]
    pub fn events(&self) -> &EventRegistry {
        &self.events
    }

    /// The trigger registry.
    #[must_use]
    pub fn triggers(&self) -> &TriggerRegistry {
        &self.triggers
    }
}
