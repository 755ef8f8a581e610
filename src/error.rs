//! Error types for the trigger engine.
//!
//! Nothing here is fatal to the host. The worst outcome of any error is a
//! scripted event that never activates, which reloading configuration or
//! re-registering fixes.

use thiserror::Error;

use crate::events::EventId;
use crate::triggers::{TriggerId, TriggerType};

/// Section of a configuration document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    /// The `events` array.
    Events,
    /// The `triggers` array.
    Triggers,
}

impl Section {
    /// Key of the section in the document.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Section::Events => "events",
            Section::Triggers => "triggers",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Location of an entry inside a configuration document.
///
/// Displays as `triggers[2]` or `triggers[2] ("boss_gate")` when the
/// entry's id could be read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryRef {
    /// Which array the entry is in.
    pub section: Section,
    /// Position in the array.
    pub index: usize,
    /// The entry's `id`, if it had a readable one.
    pub id: Option<String>,
}

impl std::fmt::Display for EntryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.section, self.index)?;
        if let Some(id) = &self.id {
            write!(f, " ({id:?})")?;
        }
        Ok(())
    }
}

/// A malformed configuration document or trigger definition.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The raw document is not JSON.
    #[error("Configuration is not valid JSON: {0}")]
    Parse(String),

    /// The document's top level is not an object.
    #[error("Configuration must be a JSON object, found {found}")]
    NotAnObject {
        /// JSON type found instead.
        found: &'static str,
    },

    /// Neither `events` nor `triggers` is present.
    #[error("Configuration must contain an `events` or `triggers` array")]
    MissingSections,

    /// A section is present but not an array.
    #[error("`{section}` must be an array, found {found}")]
    SectionNotArray {
        /// The offending section.
        section: Section,
        /// JSON type found instead.
        found: &'static str,
    },

    /// An entry is missing a field or has a field of the wrong shape.
    #[error("{entry}: {reason}")]
    InvalidEntry {
        /// The offending entry.
        entry: EntryRef,
        /// What is wrong with it.
        reason: String,
    },

    /// Two entries in the same section share an id.
    #[error("{entry}: duplicate id")]
    DuplicateId {
        /// The second entry using the id.
        entry: EntryRef,
    },

    /// A trigger refers to an event that is neither in the document nor
    /// registered. Only raised under `ReferencePolicy::Reject`.
    #[error("{entry}: event `{event}` is not defined")]
    DanglingReference {
        /// The offending trigger entry.
        entry: EntryRef,
        /// The unresolved event id.
        event: EventId,
    },

    /// A programmatically registered trigger failed its condition schema.
    #[error("Trigger `{id}`: invalid {trigger_type} condition: {reason}")]
    InvalidCondition {
        /// The trigger.
        id: TriggerId,
        /// Its condition family.
        trigger_type: TriggerType,
        /// What is wrong with it.
        reason: String,
    },
}

/// Top-level error type for engine operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Rejected configuration or trigger definition.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No event with this id is registered.
    #[error("Event not found: {0}")]
    UnknownEvent(EventId),

    /// No trigger with this id is registered.
    #[error("Trigger not found: {0}")]
    UnknownTrigger(TriggerId),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_ref_display() {
        let entry = EntryRef { section: Section::Triggers, index: 2, id: Some("boss_gate".into()) };
        assert_eq!(entry.to_string(), "triggers[2] (\"boss_gate\")");

        let anonymous = EntryRef { section: Section::Events, index: 0, id: None };
        assert_eq!(anonymous.to_string(), "events[0]");
    }

    #[test]
    fn test_error_messages() {
        let err = ValidationError::InvalidEntry {
            entry: EntryRef { section: Section::Events, index: 1, id: None },
            reason: "missing field `kind`".into(),
        };
        assert_eq!(err.to_string(), "events[1]: missing field `kind`");

        let err: EngineError = ValidationError::MissingSections.into();
        assert!(err.to_string().contains("`events` or `triggers`"));

        let err = EngineError::UnknownEvent(EventId::new("ghost"));
        assert_eq!(err.to_string(), "Event not found: ghost");
    }
}
