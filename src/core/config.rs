//! Engine configuration.
//!
//! Hosts tune a few engine-wide policies at construction time:
//! - `ReferencePolicy`: what to do with triggers pointing at unknown events
//! - `default_one_time`: firing mode for documents that omit `oneTime`
//! - `clock_origin`: the host clock reading at which the session starts
//!
//! `EngineConfig` is serde-enabled so it can live inside the host's own
//! settings file.

use serde::{Deserialize, Serialize};

use super::Millis;

/// How the loader treats a trigger whose `eventId` resolves to no event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferencePolicy {
    /// Accept the trigger and log a warning. A fire of such a trigger is a
    /// no-op that is logged again.
    #[default]
    Warn,
    /// Reject the whole document with a validation error.
    Reject,
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Handling of dangling trigger -> event references at load time.
    pub reference_policy: ReferencePolicy,

    /// Whether document triggers without an explicit `oneTime` are one-time.
    pub default_one_time: bool,

    /// Clock reading that time triggers count from before the first
    /// `advance`. Hosts whose clock does not start at 0 (milliseconds since
    /// process start, `performance.now()`) must set this.
    pub clock_origin: Millis,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reference_policy: ReferencePolicy::Warn,
            default_one_time: true,
            clock_origin: 0,
        }
    }
}

impl EngineConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reference policy (builder pattern).
    #[must_use]
    pub fn with_reference_policy(mut self, policy: ReferencePolicy) -> Self {
        self.reference_policy = policy;
        self
    }

    /// Make document triggers repeatable unless they say otherwise.
    #[must_use]
    pub fn repeatable_by_default(mut self) -> Self {
        self.default_one_time = false;
        self
    }

    /// Set the session's clock origin (builder pattern).
    #[must_use]
    pub fn with_clock_origin(mut self, origin: Millis) -> Self {
        self.clock_origin = origin;
        self
    }
}
