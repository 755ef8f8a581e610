//! Core engine types: geometry, per-tick input, configuration.
//!
//! These are the game-agnostic building blocks shared by every condition
//! family. Hosts tune engine-wide policy via `EngineConfig` rather than
//! modifying the evaluator.

pub mod geometry;
pub mod tick;
pub mod config;

pub use geometry::{Point, Rect, Region};
pub use tick::{Millis, TickInput};
pub use config::{EngineConfig, ReferencePolicy};
