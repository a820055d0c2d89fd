//! Infection state machine.
//!
//! ```text
//! Susceptible -> Exposed -> Presymptomatic -> Mild ---------> Recovered
//!                                          \-> Asymptomatic -/
//! ```
//!
//! `Susceptible -> Exposed` is driven from outside (transmission or random
//! seeding).  Every other edge is taken by [`Agent::update_infection`] once
//! the agent's frozen stage duration has elapsed.

use epi_core::{CellId, SimRng, Tick};

use crate::Agent;

/// Symptomatic probability per age decade; the last bucket covers 80+.
const SYMPTOMATIC_BY_DECADE: [f64; 9] = [0.50, 0.55, 0.60, 0.65, 0.70, 0.75, 0.80, 0.85, 0.90];

pub fn symptomatic_probability(age: u8) -> f64 {
    SYMPTOMATIC_BY_DECADE[usize::from(age / 10).min(SYMPTOMATIC_BY_DECADE.len() - 1)]
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InfectionState {
    #[default]
    Susceptible,
    Exposed,
    Presymptomatic,
    Mild,
    Asymptomatic,
    Recovered,
}

impl InfectionState {
    /// Can transmit to co-occupants.
    #[inline]
    pub fn is_infectious(self) -> bool {
        matches!(
            self,
            InfectionState::Presymptomatic | InfectionState::Mild | InfectionState::Asymptomatic
        )
    }

    /// Exposed or infectious: the epidemic is still running while any agent
    /// is in one of these states.
    #[inline]
    pub fn is_active(self) -> bool {
        matches!(self, InfectionState::Exposed) || self.is_infectious()
    }
}

/// A state change produced by [`Agent::update_infection`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Transition {
    BecameInfectious,
    Onset { symptomatic: bool },
    Recovered,
}

impl Agent {
    /// Expose a susceptible agent.  Returns `false` for any other state.
    pub fn expose(&mut self, tick: Tick, cell: Option<CellId>) -> bool {
        if self.infection != InfectionState::Susceptible {
            return false;
        }
        self.infection = InfectionState::Exposed;
        self.exposed_at = Some(tick);
        self.cell_of_infection = cell;
        true
    }

    /// Start the agent directly in the presymptomatic stage, as an initial
    /// seed of the epidemic.  Seeds count as cases at once.
    pub fn seed_infectious(&mut self, tick: Tick) -> bool {
        if self.infection != InfectionState::Susceptible {
            return false;
        }
        self.infection = InfectionState::Presymptomatic;
        self.exposed_at = Some(tick);
        self.infectious_at = Some(tick);
        self.case_counted = true;
        true
    }

    /// Advance the infection state if the current stage has run its course.
    pub fn update_infection(&mut self, tick: Tick, rng: &mut SimRng) -> Option<Transition> {
        let elapsed = |since: Option<Tick>| since.map_or(0.0, |t| tick.since(t) as f64);

        match self.infection {
            InfectionState::Susceptible | InfectionState::Recovered => None,
            InfectionState::Exposed => {
                if elapsed(self.exposed_at) < self.durations.exposed {
                    return None;
                }
                self.infection = InfectionState::Presymptomatic;
                self.infectious_at = Some(tick);
                Some(Transition::BecameInfectious)
            }
            InfectionState::Presymptomatic => {
                if elapsed(self.infectious_at) <= self.durations.presymptomatic {
                    return None;
                }
                let symptomatic = rng.gen_bool(symptomatic_probability(self.age()));
                self.infection = if symptomatic {
                    InfectionState::Mild
                } else {
                    InfectionState::Asymptomatic
                };
                self.onset_at = Some(tick);
                Some(Transition::Onset { symptomatic })
            }
            InfectionState::Mild => self.recover_after(tick, elapsed(self.onset_at), self.durations.mild),
            InfectionState::Asymptomatic => {
                self.recover_after(tick, elapsed(self.onset_at), self.durations.asymptomatic)
            }
        }
    }

    fn recover_after(&mut self, tick: Tick, elapsed: f64, duration: f64) -> Option<Transition> {
        if elapsed <= duration {
            return None;
        }
        self.infection = InfectionState::Recovered;
        self.recovered_at = Some(tick);
        Some(Transition::Recovered)
    }

    /// Mark the agent as a counted case.  `false` if it already was one.
    pub fn mark_case(&mut self) -> bool {
        !std::mem::replace(&mut self.case_counted, true)
    }
}
