//! Declarative configuration loading.
//!
//! A configuration document describes events and triggers as JSON:
//!
//! ```json
//! {
//!   "events":   [{ "id": "door_open", "kind": "tutorial", "priority": 1, "content": {} }],
//!   "triggers": [{ "id": "door_timer", "eventId": "door_open", "type": "time",
//!                  "condition": { "delayMs": 100 }, "oneTime": true }]
//! }
//! ```
//!
//! Either key may be omitted. Loading is all-or-nothing: one bad entry
//! rejects the document and leaves the engine untouched.

mod loader;

pub use loader::{ConfigDocument, ConfigLoader, LoadSummary};
