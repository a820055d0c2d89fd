//! The `BehaviorModel` trait.

use epi_agent::Agent;
use epi_core::SimRng;

use crate::{Intent, SimContext};

/// Pluggable daily-activity decision.
///
/// Called once per agent per tick, after the agent's infection and
/// stay-at-home state have been updated for the tick.  Random draws come
/// from the replication's stream, so the number and order of draws is part
/// of the model's reproducible behavior.
pub trait BehaviorModel: Send + Sync + 'static {
    /// The activity `agent` wants to start now, if any.
    fn plan(&self, agent: &Agent, ctx: &SimContext<'_>, rng: &mut SimRng) -> Option<Intent>;
}
