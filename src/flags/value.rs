//! Flag values.
//!
//! A flag holds a single scalar. Three types are supported:
//!
//! - `Bool`: story switches (`door_unlocked`, `event_intro_completed`)
//! - `Number`: counters and scores (`score`, `waves_cleared`)
//! - `Text`: named states (`chapter`, `weather`)
//!
//! Values serialize untagged, so configuration documents write plain JSON
//! scalars (`true`, `150`, `"night"`).

use serde::{Deserialize, Serialize};

/// Value stored under a flag name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    /// Boolean switch.
    Bool(bool),
    /// Numeric value. Integers from JSON are stored as `f64`.
    Number(f64),
    /// Text value.
    Text(String),
}

impl FlagValue {
    /// Get as bool if this is a Bool value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FlagValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as number if this is a Number value.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FlagValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as string reference if this is a Text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FlagValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Name of the variant, for diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            FlagValue::Bool(_) => "bool",
            FlagValue::Number(_) => "number",
            FlagValue::Text(_) => "text",
        }
    }

    /// Truthiness: `false`, `0`, NaN and the empty string are falsy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            FlagValue::Bool(v) => *v,
            FlagValue::Number(v) => *v != 0.0 && !v.is_nan(),
            FlagValue::Text(s) => !s.is_empty(),
        }
    }
}

impl std::fmt::Display for FlagValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlagValue::Bool(v) => write!(f, "{v}"),
            FlagValue::Number(v) => write!(f, "{v}"),
            FlagValue::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<bool> for FlagValue {
    fn from(v: bool) -> Self {
        FlagValue::Bool(v)
    }
}

impl From<f64> for FlagValue {
    fn from(v: f64) -> Self {
        FlagValue::Number(v)
    }
}

impl From<i64> for FlagValue {
    fn from(v: i64) -> Self {
        FlagValue::Number(v as f64)
    }
}

impl From<i32> for FlagValue {
    fn from(v: i32) -> Self {
        FlagValue::Number(f64::from(v))
    }
}

impl From<u32> for FlagValue {
    fn from(v: u32) -> Self {
        FlagValue::Number(f64::from(v))
    }
}

impl From<String> for FlagValue {
    fn from(v: String) -> Self {
        FlagValue::Text(v)
    }
}

impl From<&str> for FlagValue {
    fn from(v: &str) -> Self {
        FlagValue::Text(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert_eq!(FlagValue::Bool(true).as_bool(), Some(true));
        assert_eq!(FlagValue::Bool(true).as_number(), None);
        assert_eq!(FlagValue::Number(3.5).as_number(), Some(3.5));
        assert_eq!(FlagValue::Text("night".into()).as_text(), Some("night"));
        assert_eq!(FlagValue::Text("night".into()).as_bool(), None);
    }

    #[test]
    fn test_from_conversions() {
        let int: FlagValue = 42i32.into();
        assert_eq!(int, FlagValue::Number(42.0));

        let boolean: FlagValue = true.into();
        assert_eq!(boolean, FlagValue::Bool(true));

        let text: FlagValue = "boss".into();
        assert_eq!(text.as_text(), Some("boss"));
    }

    #[test]
    fn test_truthiness() {
        assert!(FlagValue::Bool(true).is_truthy());
        assert!(!FlagValue::Bool(false).is_truthy());
        assert!(!FlagValue::Number(0.0).is_truthy());
        assert!(FlagValue::Number(-1.0).is_truthy());
        assert!(!FlagValue::Text(String::new()).is_truthy());
    }

    #[test]
    fn test_untagged_serialization() {
        let values: Vec<FlagValue> = serde_json::from_str(r#"[true, 150, "night"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                FlagValue::Bool(true),
                FlagValue::Number(150.0),
                FlagValue::Text("night".to_string()),
            ]
        );

        let json = serde_json::to_string(&FlagValue::Bool(false)).unwrap();
        assert_eq!(json, "false");
    }
}
