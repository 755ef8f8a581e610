//! Planar geometry used by spatial and viewport triggers.
//!
//! Coordinates are world units supplied by the host. The engine never
//! interprets them beyond distance, containment and overlap tests, so any
//! consistent unit (pixels, tiles, meters) works.

use serde::{Deserialize, Serialize};

/// A point in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Whether both coordinates are finite numbers.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An axis-aligned rectangle anchored at its minimum corner.
///
/// The rectangle spans `[x, x + width] × [y, y + height]`, edges included.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Minimum horizontal coordinate.
    pub x: f64,
    /// Minimum vertical coordinate.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Maximum horizontal coordinate.
    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Maximum vertical coordinate.
    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Whether a point lies inside the rectangle (edges included).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.max_x() && point.y >= self.y && point.y <= self.max_y()
    }

    /// Standard AABB intersection. Rectangles that share only an edge overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x <= other.max_x()
            && other.x <= self.max_x()
            && self.y <= other.max_y()
            && other.y <= self.max_y()
    }

    /// Whether all components are finite and both extents are non-negative.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }
}

/// A closed region a point can be tested against.
///
/// Spatial triggers resolve their condition to a `Region`; the editor
/// overlay draws the same value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Region {
    /// Disc around a center point, boundary included.
    Circle {
        /// Center of the disc.
        center: Point,
        /// Radius of the disc.
        radius: f64,
    },
    /// Axis-aligned rectangle, edges included.
    Rectangle(Rect),
}

impl Region {
    /// Whether a point lies inside the region.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        match self {
            Region::Circle { center, radius } => center.distance(point) <= *radius,
            Region::Rectangle(rect) => rect.contains(point),
        }
    }

    /// Smallest rectangle enclosing the region.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        match self {
            Region::Circle { center, radius } => Rect::new(
                center.x - radius,
                center.y - radius,
                radius * 2.0,
                radius * 2.0,
            ),
            Region::Rectangle(rect) => *rect,
        }
    }
}
