//! Read-only state passed to every behavior callback.

use epi_core::{SimClock, Tick};
use epi_schedule::{MeasureRegime, SectorTables};

use crate::ActivitySettings;

/// Built once per tick by `epi-sim` and shared by every agent's decision.
pub struct SimContext<'a> {
    pub tick: Tick,
    pub clock: &'a SimClock,
    pub ticks_per_hour: u32,
    /// Regime active on the current date.
    pub regime: &'a MeasureRegime,
    pub sectors: &'a SectorTables,
    /// The same settings the assignment phase used for age ranges.
    pub settings: &'a ActivitySettings,
}

impl SimContext<'_> {
    /// Whole ticks covering `hours`.  A started tick counts in full, so any
    /// positive amount of hours lasts at least one tick.
    #[inline]
    pub fn ticks_for_hours(&self, hours: f64) -> u32 {
        (hours.max(0.0) * f64::from(self.ticks_per_hour)).ceil() as u32
    }
}
