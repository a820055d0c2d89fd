//! Activity intents.

use epi_core::{ActivityKind, CellId};

/// A request to start an activity.
///
/// Applied by the simulation loop via `Agent::initialize_activity`, which
/// ignores it if another activity is running and `overwrite` is unset.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Intent {
    pub kind:      ActivityKind,
    pub target:    CellId,
    /// Length in ticks.
    pub duration:  u32,
    pub overwrite: bool,
}
