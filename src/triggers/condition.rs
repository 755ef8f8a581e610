//! Trigger conditions.
//!
//! A trigger carries exactly one of four condition shapes. Each shape has
//! its own schema check (`validate`) and its own stateless test in
//! [`ConditionEvaluator`]. Per-trigger state (timers, edge detection) lives
//! in the evaluator, not here.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use smallvec::SmallVec;

use crate::core::{Millis, Point, Rect, Region, TickInput};
use crate::flags::{CompareOp, FlagStore, FlagValue};

/// Discriminant of a trigger condition, as written in `"type"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerType {
    /// Elapsed time.
    Time,
    /// Flag comparisons.
    Flag,
    /// Position inside a region.
    Spatial,
    /// Viewport overlapping a rectangle.
    Viewport,
}

impl TriggerType {
    /// The type's string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TriggerType::Time => "time",
            TriggerType::Flag => "flag",
            TriggerType::Spatial => "spatial",
            TriggerType::Viewport => "viewport",
        }
    }
}

impl std::fmt::Display for TriggerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fires once `delay_ms` have elapsed since the timer started.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TimeCondition {
    /// Delay in milliseconds. Documents may write any non-negative number;
    /// fractional delays round up.
    #[serde(deserialize_with = "deserialize_delay")]
    pub delay_ms: Millis,
}

fn deserialize_delay<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Millis, D::Error> {
    let ms = f64::deserialize(deserializer)?;
    if !ms.is_finite() || ms < 0.0 {
        return Err(D::Error::custom(format!("delayMs must be a non-negative number, got {ms}")));
    }
    Ok(ms.ceil() as Millis)
}

/// One `flag <operator> value` comparison.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlagRequirement {
    /// Flag name.
    pub flag: String,
    /// Comparison operator.
    pub operator: CompareOp,
    /// Value to compare against.
    pub value: FlagValue,
}

impl FlagRequirement {
    /// Create a new requirement.
    pub fn new(flag: impl Into<String>, operator: CompareOp, value: impl Into<FlagValue>) -> Self {
        Self {
            flag: flag.into(),
            operator,
            value: value.into(),
        }
    }

    /// Check this requirement against a store.
    #[must_use]
    pub fn holds(&self, flags: &FlagStore) -> bool {
        flags.compare(&self.flag, self.operator, &self.value)
    }
}

fn default_true() -> bool {
    true
}

/// Fires when the flag requirements hold.
///
/// `all_required = true` combines requirements with AND; `false` with OR.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FlagCondition {
    /// Comparisons to check.
    pub required_flags: SmallVec<[FlagRequirement; 4]>,
    /// AND (`true`) or OR (`false`) combination.
    #[serde(default = "default_true")]
    pub all_required: bool,
}

/// Shape of a spatial trigger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpatialShape {
    /// Disc of `radius` around `(x, y)`.
    #[default]
    Circle,
    /// Rectangle spanning `[x, x + width] × [y, y + height]`.
    Rectangle,
}

/// Fires when the tracked position lies inside a region.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpatialCondition {
    /// Circle center, or rectangle minimum corner.
    pub x: f64,
    /// Circle center, or rectangle minimum corner.
    pub y: f64,
    /// Circle radius. Required for circles, unused for rectangles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    /// Region shape.
    pub shape: SpatialShape,
    /// Rectangle width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Rectangle height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl SpatialCondition {
    /// Circle around `(x, y)`.
    #[must_use]
    pub const fn circle(x: f64, y: f64, radius: f64) -> Self {
        Self {
            x,
            y,
            radius: Some(radius),
            shape: SpatialShape::Circle,
            width: None,
            height: None,
        }
    }

    /// Rectangle anchored at `(x, y)`.
    #[must_use]
    pub const fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            radius: None,
            shape: SpatialShape::Rectangle,
            width: Some(width),
            height: Some(height),
        }
    }

    /// Resolve to a region. `None` when the shape's size fields are missing.
    #[must_use]
    pub fn region(&self) -> Option<Region> {
        match self.shape {
            SpatialShape::Circle => Some(Region::Circle {
                center: Point::new(self.x, self.y),
                radius: self.radius?,
            }),
            SpatialShape::Rectangle => Some(Region::Rectangle(Rect::new(
                self.x,
                self.y,
                self.width?,
                self.height?,
            ))),
        }
    }

    /// Schema check.
    pub fn validate(&self) -> Result<(), String> {
        if !Point::new(self.x, self.y).is_finite() {
            return Err("x and y must be finite numbers".to_string());
        }
        match self.shape {
            SpatialShape::Circle => {
                let Some(radius) = self.radius else {
                    return Err("circle requires radius".to_string());
                };
                if !radius.is_finite() || radius < 0.0 {
                    return Err(format!("radius must be a non-negative number, got {radius}"));
                }
            }
            SpatialShape::Rectangle => {
                let (Some(width), Some(height)) = (self.width, self.height) else {
                    return Err("rectangle requires width and height".to_string());
                };
                if !Rect::new(self.x, self.y, width, height).is_well_formed() {
                    return Err(format!(
                        "width and height must be non-negative numbers, got {width} x {height}"
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Fires when the camera viewport overlaps a rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewportCondition {
    /// Minimum corner.
    pub x: f64,
    /// Minimum corner.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl ViewportCondition {
    /// The trigger rectangle.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A trigger's condition: one of the four families.
///
/// Serialized adjacently tagged, matching configuration documents:
/// `{ "type": "time", "condition": { "delayMs": 100 } }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "condition", rename_all = "lowercase")]
pub enum TriggerCondition {
    /// Elapsed time.
    Time(TimeCondition),
    /// Flag comparisons.
    Flag(FlagCondition),
    /// Position inside a region.
    Spatial(SpatialCondition),
    /// Viewport overlap.
    Viewport(ViewportCondition),
}

impl TriggerCondition {
    /// Time condition.
    pub fn after(delay_ms: Millis) -> Self {
        Self::Time(TimeCondition { delay_ms })
    }

    /// Flag condition requiring every comparison.
    pub fn all_flags(requirements: impl IntoIterator<Item = FlagRequirement>) -> Self {
        Self::Flag(FlagCondition {
            required_flags: requirements.into_iter().collect(),
            all_required: true,
        })
    }

    /// Flag condition requiring at least one comparison.
    pub fn any_flag(requirements: impl IntoIterator<Item = FlagRequirement>) -> Self {
        Self::Flag(FlagCondition {
            required_flags: requirements.into_iter().collect(),
            all_required: false,
        })
    }

    /// Spatial circle.
    pub fn circle(x: f64, y: f64, radius: f64) -> Self {
        Self::Spatial(SpatialCondition::circle(x, y, radius))
    }

    /// Spatial rectangle.
    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::Spatial(SpatialCondition::rectangle(x, y, width, height))
    }

    /// Viewport rectangle.
    pub fn viewport(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::Viewport(ViewportCondition { x, y, width, height })
    }

    /// The condition family.
    #[must_use]
    pub const fn trigger_type(&self) -> TriggerType {
        match self {
            Self::Time(_) => TriggerType::Time,
            Self::Flag(_) => TriggerType::Flag,
            Self::Spatial(_) => TriggerType::Spatial,
            Self::Viewport(_) => TriggerType::Viewport,
        }
    }

    /// Parse a condition payload for a given type and check its schema.
    pub fn from_parts(trigger_type: TriggerType, payload: serde_json::Value) -> Result<Self, String> {
        let condition = match trigger_type {
            TriggerType::Time => serde_json::from_value(payload).map(Self::Time),
            TriggerType::Flag => serde_json::from_value(payload).map(Self::Flag),
            TriggerType::Spatial => serde_json::from_value(payload).map(Self::Spatial),
            TriggerType::Viewport => serde_json::from_value(payload).map(Self::Viewport),
        }
        .map_err(|e| e.to_string())?;

        condition.validate()?;
        Ok(condition)
    }

    /// Schema check for the payload.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Time(_) => Ok(()),
            Self::Flag(condition) => {
                if condition.required_flags.is_empty() {
                    return Err("requiredFlags must contain at least one entry".to_string());
                }
                if condition.required_flags.iter().any(|r| r.flag.is_empty()) {
                    return Err("flag names must not be empty".to_string());
                }
                Ok(())
            }
            Self::Spatial(condition) => condition.validate(),
            Self::Viewport(condition) => {
                if condition.rect().is_well_formed() {
                    Ok(())
                } else {
                    Err("viewport rectangle must have finite coordinates and non-negative size".to_string())
                }
            }
        }
    }

    /// Geometry of spatial and viewport conditions.
    #[must_use]
    pub fn region(&self) -> Option<Region> {
        match self {
            Self::Spatial(condition) => condition.region(),
            Self::Viewport(condition) => Some(Region::Rectangle(condition.rect())),
            Self::Time(_) | Self::Flag(_) => None,
        }
    }
}

/// Inputs available when checking conditions.
#[derive(Clone, Copy, Debug)]
pub struct ConditionContext<'a> {
    /// Current flags.
    pub flags: &'a FlagStore,
    /// This tick's clock, position and viewport.
    pub input: &'a TickInput,
}

impl<'a> ConditionContext<'a> {
    /// Create a new context.
    pub fn new(flags: &'a FlagStore, input: &'a TickInput) -> Self {
        Self { flags, input }
    }
}

/// Stateless condition checks.
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Check a condition against this tick's inputs.
    ///
    /// Returns `None` when the condition cannot be decided this tick: the
    /// timer has not started, or the tick lacks the position or viewport
    /// the condition needs.
    pub fn evaluate(
        condition: &TriggerCondition,
        ctx: &ConditionContext,
        timer_start: Option<Millis>,
    ) -> Option<bool> {
        match condition {
            TriggerCondition::Time(c) => {
                timer_start.map(|start| Self::delay_elapsed(c, start, ctx.input.now))
            }
            TriggerCondition::Flag(c) => Some(Self::flags_hold(c, ctx.flags)),
            TriggerCondition::Spatial(c) => {
                ctx.input.position.map(|p| Self::position_inside(c, p))
            }
            TriggerCondition::Viewport(c) => {
                ctx.input.viewport.map(|v| Self::viewport_overlaps(c, &v))
            }
        }
    }

    /// Whether the delay has elapsed. Clock readings earlier than `start`
    /// count as zero elapsed time.
    #[must_use]
    pub fn delay_elapsed(condition: &TimeCondition, start: Millis, now: Millis) -> bool {
        now.saturating_sub(start) >= condition.delay_ms
    }

    /// Combine the requirements with AND or OR.
    #[must_use]
    pub fn flags_hold(condition: &FlagCondition, flags: &FlagStore) -> bool {
        let mut requirements = condition.required_flags.iter();
        if condition.all_required {
            requirements.all(|r| r.holds(flags))
        } else {
            requirements.any(|r| r.holds(flags))
        }
    }

    /// Whether a position lies inside the spatial region.
    #[must_use]
    pub fn position_inside(condition: &SpatialCondition, position: Point) -> bool {
        condition.region().is_some_and(|region| region.contains(position))
    }

    /// Whether the viewport overlaps the trigger rectangle.
    #[must_use]
    pub fn viewport_overlaps(condition: &ViewportCondition, viewport: &Rect) -> bool {
        condition.rect().overlaps(viewport)
    }
}
