//! Per-tick input supplied by the host.
//!
//! The engine never reads a clock or queries entity/camera systems. Each
//! call to `advance` receives everything it needs in a [`TickInput`]:
//! a monotonic millisecond reading plus the optional player position and
//! camera viewport for that frame.

use serde::{Deserialize, Serialize};

use super::geometry::{Point, Rect};

/// Monotonic clock reading in milliseconds.
pub type Millis = u64;

/// Inputs for one evaluation pass.
///
/// ## Example
///
/// ```
/// use cue_engine::core::{Point, Rect, TickInput};
///
/// let input = TickInput::at(1_500)
///     .with_position(Point::new(320.0, 240.0))
///     .with_viewport(Rect::new(0.0, 0.0, 640.0, 480.0));
///
/// assert_eq!(input.now, 1_500);
/// assert!(input.position.is_some());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Clock reading for this tick.
    pub now: Millis,

    /// Current tracked position (usually the player). Spatial triggers are
    /// skipped on ticks without one.
    pub position: Option<Point>,

    /// Current camera rectangle. Viewport triggers are skipped on ticks
    /// without one.
    pub viewport: Option<Rect>,
}

impl TickInput {
    /// Create input for a tick with no position or viewport.
    #[must_use]
    pub const fn at(now: Millis) -> Self {
        Self {
            now,
            position: None,
            viewport: None,
        }
    }

    /// Set the tracked position (builder pattern).
    #[must_use]
    pub const fn with_position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    /// Set the viewport rectangle (builder pattern).
    #[must_use]
    pub const fn with_viewport(mut self, viewport: Rect) -> Self {
        self.viewport = Some(viewport);
        self
    }
}
