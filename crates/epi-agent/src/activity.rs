//! The agent's current activity.
//!
//! An activity is a destination plus a length in ticks.  On the first step
//! the agent moves to the destination; once the length has elapsed it goes
//! home and the slot clears.

use epi_core::{ActivityKind, CellId};

use crate::Agent;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Activity {
    pub kind: ActivityKind,
    /// Destination still to be reached; cleared after the first step.
    pub target: Option<CellId>,
    /// Length in ticks.
    pub duration: u32,
    pub elapsed: u32,
}

impl Agent {
    /// Start `kind` at `target` for `duration` ticks.
    ///
    /// Ignored while another activity is running unless `overwrite` is set.
    /// Returns `true` if the activity was started.
    pub fn initialize_activity(
        &mut self,
        kind: ActivityKind,
        target: CellId,
        duration: u32,
        overwrite: bool,
    ) -> bool {
        if self.activity.is_some() && !overwrite {
            return false;
        }
        self.activity = Some(Activity {
            kind,
            target: Some(target),
            duration,
            elapsed: 0,
        });
        self.activities_today.push(kind);
        true
    }

    /// Advance the current activity by one tick.
    ///
    /// Returns the cell the agent must move to this tick, if any.
    pub fn step_activity(&mut self) -> Option<CellId> {
        let activity = self.activity.as_mut()?;
        let mut destination = activity.target.take();
        if activity.elapsed < activity.duration {
            activity.elapsed += 1;
        } else {
            self.activity = None;
            destination = Some(self.locations.home);
        }
        destination
    }
}
