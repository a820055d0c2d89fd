//! Stay-at-home and household-quarantine rules.

use epi_core::Tick;

use crate::{Agent, InfectionState};

impl Agent {
    /// Symptomatic agents stop leaving home `delay` ticks after onset.
    ///
    /// A mild agent still inside the delay keeps its previous flag; every
    /// other state clears it.
    pub fn decide_stay_home(&mut self, tick: Tick, delay: u64) {
        match self.infection {
            InfectionState::Mild => {
                if self.onset_at.is_some_and(|t| tick.since(t) >= delay) {
                    self.stay_at_home = true;
                }
            }
            InfectionState::Susceptible
            | InfectionState::Exposed
            | InfectionState::Presymptomatic
            | InfectionState::Asymptomatic
            | InfectionState::Recovered => self.stay_at_home = false,
        }
    }

    /// `true` when this agent should put its household into quarantine.
    pub fn isolation_due(&self, tick: Tick, delay: u64) -> bool {
        self.infection == InfectionState::Mild
            && !self.quarantined
            && self.onset_at.is_some_and(|t| tick.since(t) >= delay)
    }

    /// Enter quarantine at `tick`.  The agent stays home from this tick on.
    pub fn quarantine(&mut self, tick: Tick) {
        self.quarantined = true;
        self.quarantined_at = Some(tick);
        self.stay_at_home = true;
    }

    /// Keep a quarantined agent at home for `window` ticks, then lift the
    /// quarantine.
    pub fn update_quarantine(&mut self, tick: Tick, window: u64) {
        if !self.quarantined {
            return;
        }
        if self.quarantined_at.is_some_and(|t| tick.since(t) < window) {
            self.stay_at_home = true;
        } else {
            self.stay_at_home = false;
            self.quarantined = false;
        }
    }
}
