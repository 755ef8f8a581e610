//! Flag system: named scalars used as trigger inputs and for chaining.
//!
//! ## Key Components
//!
//! - [`FlagValue`]: A boolean, number or text value
//! - [`CompareOp`]: The six comparison operators used by flag triggers
//! - [`FlagStore`]: The per-engine flag map
//!
//! Completing an event writes `event_{id}_completed = true` into the store,
//! which is how one scripted step unlocks the next.

mod store;
mod value;

pub use store::{CompareOp, FlagStore, UnknownOperator};
pub use value::FlagValue;
