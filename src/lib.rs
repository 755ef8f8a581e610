//! # cue-engine
//!
//! A trigger engine for scripted gameplay moments.
//!
//! Designers declare *events* (a dialogue line, an enemy spawn, a tutorial
//! hint, a boss intro) and *triggers* that activate them. Once per
//! simulation tick the host feeds the engine its clock, the player position
//! and the camera viewport, and gets back the triggers that fired.
//!
//! ## Design Principles
//!
//! 1. **Host-Driven**: The engine never reads wall-clock time or spawns
//!    work. Everything happens inside `advance`.
//!
//! 2. **Data Out, Not Callbacks**: Fires are returned as values. The host
//!    decides what activating an event means.
//!
//! 3. **Configuration Over Code**: Events and triggers load from JSON
//!    documents, validated all-or-nothing.
//!
//! ## Modules
//!
//! - `core`: Geometry, tick input, engine configuration
//! - `flags`: Named world-state values and comparison operators
//! - `events`: Event definitions and their lifecycle
//! - `triggers`: Trigger conditions, storage and per-tick evaluation
//! - `config`: Configuration document loading
//! - `engine`: The host-facing `TriggerEngine`
//! - `preview`: Geometry descriptors for the editor overlay
//! - `error`: Error types

pub mod core;
pub mod flags;
pub mod events;
pub mod triggers;
pub mod config;
pub mod engine;
pub mod preview;
pub mod error;

// Re-export commonly used types
pub use crate::core::{EngineConfig, Millis, Point, Rect, ReferencePolicy, Region, TickInput};

pub use crate::flags::{CompareOp, FlagStore, FlagValue};

pub use crate::events::{EventDefinition, EventId, EventKind, EventRegistry, EventStatus};

pub use crate::triggers::{
    FiredTrigger, FlagRequirement, SpatialCondition, TriggerCondition, TriggerDefinition, TriggerEvaluator,
    TriggerId, TriggerRegistry, TriggerType,
};

pub use crate::config::{ConfigLoader, LoadSummary};
pub use crate::engine::TriggerEngine;
pub use crate::preview::SpatialPreview;
pub use crate::error::{EngineError, Result, ValidationError};
