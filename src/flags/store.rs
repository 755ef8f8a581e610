//! Flag storage and comparison operators.
//!
//! The `FlagStore` is owned by a single engine instance. Hosts write to it
//! through `set_flag`; the engine writes completion flags when events
//! complete. Nothing fires directly from a write: flag triggers notice the
//! change on the next evaluation pass.

use std::cmp::Ordering;
use std::str::FromStr;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::value::FlagValue;

/// Comparison operator used by flag requirements.
///
/// Serialized as its symbol (`"=="`, `">="`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOp {
    /// Strict equality.
    #[serde(rename = "==", alias = "===")]
    Eq,
    /// Strict inequality.
    #[serde(rename = "!=", alias = "!==")]
    Ne,
    /// Greater than.
    #[serde(rename = ">")]
    Gt,
    /// Greater than or equal.
    #[serde(rename = ">=")]
    Ge,
    /// Less than.
    #[serde(rename = "<")]
    Lt,
    /// Less than or equal.
    #[serde(rename = "<=")]
    Le,
}

impl CompareOp {
    /// All operators, in declaration order.
    pub const ALL: [CompareOp; 6] = [
        CompareOp::Eq,
        CompareOp::Ne,
        CompareOp::Gt,
        CompareOp::Ge,
        CompareOp::Lt,
        CompareOp::Le,
    ];

    /// The operator's symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
        }
    }

    /// Compare a flag's current value against an expected value.
    ///
    /// - `==` / `!=` use strict equality: same type and same value. An unset
    ///   flag equals nothing.
    /// - Relational operators compare numbers numerically, text
    ///   lexicographically and booleans with `false < true`. Mixed types,
    ///   NaN and unset flags always yield `false`.
    #[must_use]
    pub fn compare(self, actual: Option<&FlagValue>, expected: &FlagValue) -> bool {
        match self {
            CompareOp::Eq => actual.is_some_and(|a| a == expected),
            CompareOp::Ne => actual.is_none_or(|a| a != expected),
            CompareOp::Gt => ordering(actual, expected) == Some(Ordering::Greater),
            CompareOp::Ge => matches!(
                ordering(actual, expected),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            CompareOp::Lt => ordering(actual, expected) == Some(Ordering::Less),
            CompareOp::Le => matches!(
                ordering(actual, expected),
                Some(Ordering::Less | Ordering::Equal)
            ),
        }
    }
}

fn ordering(actual: Option<&FlagValue>, expected: &FlagValue) -> Option<Ordering> {
    match (actual?, expected) {
        (FlagValue::Number(a), FlagValue::Number(b)) => a.partial_cmp(b),
        (FlagValue::Text(a), FlagValue::Text(b)) => Some(a.cmp(b)),
        (FlagValue::Bool(a), FlagValue::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

impl std::fmt::Display for CompareOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Error returned when parsing an unknown operator symbol.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown comparison operator `{0}`")]
pub struct UnknownOperator(pub String);

impl FromStr for CompareOp {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "==" | "===" => Ok(CompareOp::Eq),
            "!=" | "!==" => Ok(CompareOp::Ne),
            ">" => Ok(CompareOp::Gt),
            ">=" => Ok(CompareOp::Ge),
            "<" => Ok(CompareOp::Lt),
            "<=" => Ok(CompareOp::Le),
            other => Err(UnknownOperator(other.to_string())),
        }
    }
}

/// Named scalar store.
///
/// ## Example
///
/// ```
/// use cue_engine::flags::{CompareOp, FlagStore, FlagValue};
///
/// let mut flags = FlagStore::new();
/// flags.set("score", 150);
///
/// assert!(flags.compare("score", CompareOp::Ge, &FlagValue::from(100)));
/// assert!(!flags.compare("lives", CompareOp::Gt, &FlagValue::from(0)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct FlagStore {
    flags: FxHashMap<String, FlagValue>,
}

impl FlagStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a flag. Unset flags return `None`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FlagValue> {
        self.flags.get(name)
    }

    /// Write a flag, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FlagValue>) -> Option<FlagValue> {
        self.flags.insert(name.into(), value.into())
    }

    /// Check whether a flag has ever been set.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    /// Compare a stored flag against an expected value.
    #[must_use]
    pub fn compare(&self, name: &str, op: CompareOp, expected: &FlagValue) -> bool {
        op.compare(self.get(name), expected)
    }

    /// Number of flags set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Check if no flag has been set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Iterate all flags (unordered).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlagValue)> {
        self.flags.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(v: f64) -> FlagValue {
        FlagValue::Number(v)
    }

    #[test]
    fn test_set_and_get() {
        let mut store = FlagStore::new();
        assert!(store.get("door").is_none());

        assert_eq!(store.set("door", true), None);
        assert_eq!(store.get("door"), Some(&FlagValue::Bool(true)));

        let previous = store.set("door", false);
        assert_eq!(previous, Some(FlagValue::Bool(true)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_numeric_operators() {
        let five = Some(num(5.0));
        let five = five.as_ref();

        assert!(CompareOp::Eq.compare(five, &num(5.0)));
        assert!(!CompareOp::Ne.compare(five, &num(5.0)));
        assert!(CompareOp::Gt.compare(five, &num(4.0)));
        assert!(!CompareOp::Gt.compare(five, &num(5.0)));
        assert!(CompareOp::Ge.compare(five, &num(5.0)));
        assert!(CompareOp::Lt.compare(five, &num(6.0)));
        assert!(CompareOp::Le.compare(five, &num(5.0)));
        assert!(!CompareOp::Le.compare(five, &num(4.9)));
    }

    #[test]
    fn test_text_operators() {
        let value = FlagValue::from("beta");
        let actual = Some(&value);

        assert!(CompareOp::Eq.compare(actual, &"beta".into()));
        assert!(CompareOp::Gt.compare(actual, &"alpha".into()));
        assert!(CompareOp::Lt.compare(actual, &"gamma".into()));
    }

    #[test]
    fn test_unset_flag() {
        assert!(!CompareOp::Eq.compare(None, &FlagValue::Bool(false)));
        assert!(CompareOp::Ne.compare(None, &FlagValue::Bool(false)));
        for op in [CompareOp::Gt, CompareOp::Ge, CompareOp::Lt, CompareOp::Le] {
            assert!(!op.compare(None, &num(0.0)), "{op} against unset flag");
        }
    }

    #[test]
    fn test_no_coercion_between_types() {
        let value = FlagValue::from("100");
        let actual = Some(&value);

        assert!(!CompareOp::Eq.compare(actual, &num(100.0)));
        assert!(CompareOp::Ne.compare(actual, &num(100.0)));
        assert!(!CompareOp::Ge.compare(actual, &num(100.0)));
        assert!(!CompareOp::Le.compare(actual, &num(100.0)));

        let flag = FlagValue::Bool(true);
        assert!(!CompareOp::Eq.compare(Some(&flag), &num(1.0)));
    }

    #[test]
    fn test_nan_never_orders() {
        let nan = num(f64::NAN);
        assert!(!CompareOp::Eq.compare(Some(&nan), &nan));
        assert!(!CompareOp::Ge.compare(Some(&nan), &num(0.0)));
        assert!(!CompareOp::Le.compare(Some(&nan), &num(0.0)));
    }

    #[test]
    fn test_operator_symbols() {
        for op in CompareOp::ALL {
            assert_eq!(op.symbol().parse::<CompareOp>(), Ok(op));
            let json = serde_json::to_string(&op).unwrap();
            assert_eq!(json, format!("\"{}\"", op.symbol()));
        }
        assert_eq!("===".parse::<CompareOp>(), Ok(CompareOp::Eq));
        assert!("=>".parse::<CompareOp>().is_err());
    }

    #[test]
    fn test_store_compare() {
        let mut store = FlagStore::new();
        store.set("score", 50);
        assert!(!store.compare("score", CompareOp::Ge, &num(100.0)));
        store.set("score", 150);
        assert!(store.compare("score", CompareOp::Ge, &num(100.0)));
    }
}
