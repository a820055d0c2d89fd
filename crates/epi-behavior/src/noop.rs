use epi_agent::Agent;
use epi_core::SimRng;

use crate::{BehaviorModel, Intent, SimContext};

/// A [`BehaviorModel`] under which nobody ever leaves home.
///
/// Transmission is then confined to households.
pub struct NoopBehavior;

impl BehaviorModel for NoopBehavior {
    fn plan(&self, _agent: &Agent, _ctx: &SimContext<'_>, _rng: &mut SimRng) -> Option<Intent> {
        None
    }
}
