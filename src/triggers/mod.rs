//! Trigger system: conditions that activate scripted events.
//!
//! A trigger links one condition to one event. Four condition families
//! exist, and each one reads a different input:
//!
//! | Family     | Input                   | Fires when                          |
//! |------------|-------------------------|-------------------------------------|
//! | `time`     | tick clock              | delay elapsed since timer start     |
//! | `flag`     | `FlagStore`             | comparisons become true (edge)      |
//! | `spatial`  | tick position           | position inside circle / rectangle  |
//! | `viewport` | tick viewport rectangle | viewport overlaps trigger rectangle |
//!
//! ## Key Components
//!
//! - [`TriggerCondition`]: Tagged union of the four condition shapes
//! - [`ConditionEvaluator`]: Stateless condition checks
//! - [`TriggerDefinition`]: A trigger with its runtime state
//! - [`TriggerRegistry`]: Storage in registration order
//! - [`TriggerEvaluator`]: The per-tick firing algorithm
//!
//! ## Example Usage
//!
//! ```
//! use cue_engine::core::TickInput;
//! use cue_engine::events::{EventDefinition, EventRegistry, EventStatus};
//! use cue_engine::flags::FlagStore;
//! use cue_engine::triggers::{TriggerCondition, TriggerDefinition, TriggerEvaluator, TriggerRegistry};
//!
//! let mut events = EventRegistry::new();
//! events.register(EventDefinition::new("door_open", "tutorial"));
//!
//! let mut triggers = TriggerRegistry::new();
//! triggers.register(TriggerDefinition::new("door_timer", "door_open", TriggerCondition::after(100)));
//!
//! let flags = FlagStore::new();
//! let mut evaluator = TriggerEvaluator::new();
//!
//! assert!(evaluator.advance(&TickInput::at(50), &mut triggers, &mut events, &flags).is_empty());
//! let fired = evaluator.advance(&TickInput::at(120), &mut triggers, &mut events, &flags);
//!
//! assert_eq!(fired.len(), 1);
//! assert_eq!(events.status(&"door_open".into()), Some(EventStatus::Active));
//! assert!(triggers.is_empty());
//! ```

mod condition;
mod evaluator;
mod registry;

pub use condition::{
    ConditionContext, ConditionEvaluator, FlagCondition, FlagRequirement, SpatialCondition,
    SpatialShape, TimeCondition, TriggerCondition, TriggerType, ViewportCondition,
};
pub use evaluator::{FiredTrigger, TriggerEvaluator};
pub use registry::{TriggerDefinition, TriggerId, TriggerRegistry};
