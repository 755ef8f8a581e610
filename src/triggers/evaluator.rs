//! Per-tick trigger evaluation.
//!
//! The evaluator walks a snapshot of the registry in registration order and
//! applies each family's firing rule:
//!
//! - **time**: the first observation starts the timer without firing.
//!   The start is the previous pass's clock reading, or the clock origin
//!   before the first pass. Later ticks fire once `now - start >= delay`.
//!   Repeatable timers restart from the fire tick.
//! - **flag**: edge-triggered. Fires only on the tick where the combined
//!   predicate goes from false to true.
//! - **spatial** / **viewport**: fire on every tick the position or
//!   viewport satisfies the region. Ticks without the input are skipped.
//!
//! Fires are reported as [`FiredTrigger`] records; the evaluator never
//! calls back into the host.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{Millis, TickInput};
use crate::events::{EventId, EventRegistry};
use crate::flags::FlagStore;

use super::condition::{ConditionContext, ConditionEvaluator, TriggerCondition};
use super::registry::{TriggerDefinition, TriggerId, TriggerRegistry};

/// A trigger that fired this tick.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiredTrigger {
    /// The trigger that fired.
    pub trigger_id: TriggerId,
    /// The event it activated.
    pub event_id: EventId,
}

/// Stateful per-tick evaluator.
///
/// Remembers the previous tick's clock reading, which becomes the start of
/// any time trigger observed for the first time. Before the first pass the
/// clock origin stands in for it.
#[derive(Clone, Debug, Default)]
pub struct TriggerEvaluator {
    origin: Millis,
    last_tick: Option<Millis>,
}

impl TriggerEvaluator {
    /// Create an evaluator that has not seen a tick yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an evaluator whose host clock starts at `origin`.
    #[must_use]
    pub fn starting_at(origin: Millis) -> Self {
        Self {
            origin,
            last_tick: None,
        }
    }

    /// Forget previous passes and count new timers from `now`.
    pub fn restart_clock(&mut self, now: Millis) {
        self.origin = now;
        self.last_tick = None;
    }

    /// Clock reading timers count from before the first pass.
    #[must_use]
    pub fn origin(&self) -> Millis {
        self.origin
    }

    /// Clock reading of the most recent pass.
    #[must_use]
    pub fn last_tick(&self) -> Option<Millis> {
        self.last_tick
    }

    /// Run one evaluation pass.
    ///
    /// Fired one-time triggers are removed from `triggers`; linked events in
    /// `events` move to `Active` unless already completed. Triggers linked
    /// to unknown events are consumed as usual but omitted from the result.
    pub fn advance(
        &mut self,
        input: &TickInput,
        triggers: &mut TriggerRegistry,
        events: &mut EventRegistry,
        flags: &FlagStore,
    ) -> Vec<FiredTrigger> {
        let timer_origin = self.last_tick.unwrap_or(self.origin).min(input.now);
        let ctx = ConditionContext::new(flags, input);
        let mut fired = Vec::new();

        // Firing removes triggers, so walk a snapshot.
        for trigger_id in triggers.ids() {
            let Some(trigger) = triggers.get_mut(&trigger_id) else {
                continue;
            };
            if !Self::should_fire(trigger, &ctx, timer_origin) {
                continue;
            }

            trigger.record_fire();
            let event_id = trigger.event_id.clone();
            let fire_count = trigger.fire_count;
            if trigger.one_time {
                triggers.remove(&trigger_id);
            } else if let TriggerCondition::Time(_) = trigger.condition {
                trigger.start_time = Some(input.now);
            }

            match events.activate(&event_id) {
                Some(activated) => {
                    debug!(
                        trigger = %trigger_id,
                        event = %event_id,
                        now = input.now,
                        fire_count,
                        activated,
                        "Trigger fired"
                    );
                    fired.push(FiredTrigger { trigger_id, event_id });
                }
                None => {
                    warn!(
                        trigger = %trigger_id,
                        event = %event_id,
                        "Trigger fired for an event that is not registered"
                    );
                }
            }
        }

        self.last_tick = Some(input.now);
        fired
    }

    fn should_fire(trigger: &mut TriggerDefinition, ctx: &ConditionContext, timer_origin: Millis) -> bool {
        let decided = ConditionEvaluator::evaluate(&trigger.condition, ctx, trigger.start_time);

        match &trigger.condition {
            TriggerCondition::Time(_) => {
                if trigger.start_time.is_none() {
                    trigger.start_time = Some(timer_origin);
                    trace!(trigger = %trigger.id, start = timer_origin, "Timer started");
                    return false;
                }
                decided.unwrap_or(false)
            }
            TriggerCondition::Flag(_) => {
                let holds = decided.unwrap_or(false);
                let rising = holds && !trigger.last_result;
                trigger.last_result = holds;
                rising
            }
            TriggerCondition::Spatial(_) | TriggerCondition::Viewport(_) => match decided {
                Some(holds) => holds,
                None => {
                    trace!(
                        trigger = %trigger.id,
                        kind = %trigger.trigger_type(),
                        "Skipped, tick has no input for this trigger"
                    );
                    false
                }
            },
        }
    }
}
