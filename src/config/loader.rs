//! Configuration document parsing and validation.
//!
//! The loader turns a document into fully-built definitions without
//! touching any registry. Only a document that passes every check yields a
//! [`ConfigDocument`]; the engine then inserts its entries through the same
//! registration paths hosts use.

use rustc_hash::FxHashSet;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::core::{EngineConfig, ReferencePolicy};
use crate::error::{EntryRef, Section, ValidationError};
use crate::events::{EventDefinition, EventId, EventRegistry};
use crate::triggers::{TriggerCondition, TriggerDefinition, TriggerId, TriggerType};

/// A validated configuration document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfigDocument {
    /// Events, in document order.
    pub events: Vec<EventDefinition>,
    /// Triggers, in document order.
    pub triggers: Vec<TriggerDefinition>,
}

/// Counts reported after a successful load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Events inserted.
    pub events: usize,
    /// Triggers inserted.
    pub triggers: usize,
    /// Events that replaced an already registered event with the same id.
    pub replaced_events: usize,
    /// Triggers that replaced an already registered trigger with the same id.
    pub replaced_triggers: usize,
}

/// Raw trigger entry. The condition payload is checked against `type`
/// separately so errors can name the condition family.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct TriggerEntry {
    id: TriggerId,
    event_id: EventId,
    #[serde(rename = "type")]
    trigger_type: TriggerType,
    condition: Value,
    #[serde(default)]
    one_time: Option<bool>,
}

/// Validating parser for configuration documents.
///
/// ## Example
///
/// ```
/// use cue_engine::config::ConfigLoader;
/// use cue_engine::core::EngineConfig;
/// use cue_engine::events::EventRegistry;
///
/// let config = EngineConfig::default();
/// let known = EventRegistry::new();
/// let loader = ConfigLoader::new(&config, &known);
///
/// let doc = loader
///     .parse_str(r#"{ "events": [{ "id": "intro", "kind": "dialogue" }] }"#)
///     .unwrap();
/// assert_eq!(doc.events.len(), 1);
///
/// assert!(loader.parse_str("not valid json").is_err());
/// ```
pub struct ConfigLoader<'a> {
    config: &'a EngineConfig,
    known_events: &'a EventRegistry,
}

impl<'a> ConfigLoader<'a> {
    /// Create a loader. `known_events` resolves trigger references that the
    /// document itself does not define.
    pub fn new(config: &'a EngineConfig, known_events: &'a EventRegistry) -> Self {
        Self { config, known_events }
    }

    /// Parse and validate a raw JSON document.
    pub fn parse_str(&self, raw: &str) -> Result<ConfigDocument, ValidationError> {
        let value: Value = serde_json::from_str(raw).map_err(|e| ValidationError::Parse(e.to_string()))?;
        self.parse_value(value)
    }

    /// Validate an already-parsed document.
    pub fn parse_value(&self, value: Value) -> Result<ConfigDocument, ValidationError> {
        let mut root = match value {
            Value::Object(root) => root,
            other => {
                return Err(ValidationError::NotAnObject {
                    found: json_type(&other),
                })
            }
        };

        let raw_events = take_section(&mut root, Section::Events)?;
        let raw_triggers = take_section(&mut root, Section::Triggers)?;
        if raw_events.is_none() && raw_triggers.is_none() {
            return Err(ValidationError::MissingSections);
        }

        let events = raw_events
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, entry)| parse_event(index, entry))
            .collect::<Result<Vec<_>, _>>()?;

        let mut event_ids = FxHashSet::default();
        for (index, event) in events.iter().enumerate() {
            if !event_ids.insert(&event.id) {
                return Err(ValidationError::DuplicateId {
                    entry: entry_at(Section::Events, index, Some(event.id.as_str())),
                });
            }
        }

        let triggers = raw_triggers
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, entry)| self.parse_trigger(index, entry))
            .collect::<Result<Vec<_>, _>>()?;

        let mut trigger_ids = FxHashSet::default();
        for (index, trigger) in triggers.iter().enumerate() {
            if !trigger_ids.insert(&trigger.id) {
                return Err(ValidationError::DuplicateId {
                    entry: entry_at(Section::Triggers, index, Some(trigger.id.as_str())),
                });
            }

            if event_ids.contains(&trigger.event_id) || self.known_events.contains(&trigger.event_id) {
                continue;
            }
            match self.config.reference_policy {
                ReferencePolicy::Reject => {
                    return Err(ValidationError::DanglingReference {
                        entry: entry_at(Section::Triggers, index, Some(trigger.id.as_str())),
                        event: trigger.event_id.clone(),
                    });
                }
                ReferencePolicy::Warn => {
                    warn!(
                        trigger = %trigger.id,
                        event = %trigger.event_id,
                        "Trigger references an event that is not defined"
                    );
                }
            }
        }

        Ok(ConfigDocument { events, triggers })
    }

    fn parse_trigger(&self, index: usize, entry: Value) -> Result<TriggerDefinition, ValidationError> {
        let at = entry_ref(Section::Triggers, index, &entry);
        expect_object(&at, &entry)?;

        let raw: TriggerEntry = serde_json::from_value(entry).map_err(|e| invalid(&at, e.to_string()))?;
        if raw.id.as_str().is_empty() {
            return Err(invalid(&at, "id must not be empty"));
        }
        if raw.event_id.as_str().is_empty() {
            return Err(invalid(&at, "eventId must not be empty"));
        }

        let condition = TriggerCondition::from_parts(raw.trigger_type, raw.condition)
            .map_err(|reason| invalid(&at, format!("invalid {} condition: {reason}", raw.trigger_type)))?;

        let one_time = raw.one_time.unwrap_or(self.config.default_one_time);
        Ok(TriggerDefinition::new(raw.id, raw.event_id, condition).with_one_time(one_time))
    }
}

fn parse_event(index: usize, entry: Value) -> Result<EventDefinition, ValidationError> {
    let at = entry_ref(Section::Events, index, &entry);
    expect_object(&at, &entry)?;

    let event: EventDefinition = serde_json::from_value(entry).map_err(|e| invalid(&at, e.to_string()))?;
    if event.id.as_str().is_empty() {
        return Err(invalid(&at, "id must not be empty"));
    }
    if event.kind.as_str().is_empty() {
        return Err(invalid(&at, "kind must not be empty"));
    }
    Ok(event)
}

fn take_section(
    root: &mut serde_json::Map<String, Value>,
    section: Section,
) -> Result<Option<Vec<Value>>, ValidationError> {
    match root.remove(section.key()) {
        None => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items)),
        Some(other) => Err(ValidationError::SectionNotArray {
            section,
            found: json_type(&other),
        }),
    }
}

fn expect_object(at: &EntryRef, entry: &Value) -> Result<(), ValidationError> {
    if entry.is_object() {
        Ok(())
    } else {
        Err(invalid(at, format!("expected an object, found {}", json_type(entry))))
    }
}

fn entry_ref(section: Section, index: usize, entry: &Value) -> EntryRef {
    entry_at(section, index, entry.get("id").and_then(Value::as_str))
}

fn entry_at(section: Section, index: usize, id: Option<&str>) -> EntryRef {
    EntryRef {
        section,
        index,
        id: id.map(str::to_string),
    }
}

fn invalid(at: &EntryRef, reason: impl Into<String>) -> ValidationError {
    ValidationError::InvalidEntry {
        entry: at.clone(),
        reason: reason.into(),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
