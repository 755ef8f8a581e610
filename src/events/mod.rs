//! Event system: scripted moments and their lifecycle.
//!
//! ## Key Types
//!
//! - `EventId`: String identifier for an event
//! - `EventKind`: Dialogue, spawn, tutorial, boss, or game-defined
//! - `EventStatus`: `Registered -> Active -> Completed`
//! - `EventDefinition`: The event record with its opaque content payload
//! - `EventRegistry`: Storage and lifecycle transitions

pub mod definition;
pub mod registry;

pub use definition::{EventDefinition, EventId, EventKind, EventStatus};
pub use registry::EventRegistry;
