//! Read-only reference data shared by every replication of a batch.

use epi_agent::DurationParams;
use epi_behavior::ActivitySettings;
use epi_population::HouseholdTable;
use epi_schedule::SectorTables;

use crate::{SimError, SimResult};

// ── CapacityRatios ────────────────────────────────────────────────────────────

/// Fixed ratios that size facilities and their sub-groups.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapacityRatios {
    pub pupils_per_school: u32,
    pub pupils_per_class: u32,
    /// Kids per kindergarten; each kindergarten is a single group.
    pub kids_per_kindergarten: u32,
    pub colleagues_per_division: u32,
    pub students_per_university: u32,
    pub agents_per_supermarket: u32,
    /// Supermarkets drawn per agent, with replacement.
    pub favourite_supermarkets: u32,
}

impl Default for CapacityRatios {
    fn default() -> Self {
        Self {
            pupils_per_school: 250,
            pupils_per_class: 21,
            kids_per_kindergarten: 10,
            colleagues_per_division: 10,
            students_per_university: 100_000,
            agents_per_supermarket: 1_000,
            favourite_supermarkets: 2,
        }
    }
}

impl CapacityRatios {
    pub fn validate(&self) -> SimResult<()> {
        let ratios = [
            ("pupils_per_school", self.pupils_per_school),
            ("pupils_per_class", self.pupils_per_class),
            ("kids_per_kindergarten", self.kids_per_kindergarten),
            ("colleagues_per_division", self.colleagues_per_division),
            ("students_per_university", self.students_per_university),
            ("agents_per_supermarket", self.agents_per_supermarket),
            ("favourite_supermarkets", self.favourite_supermarkets),
        ];
        match ratios.iter().find(|(_, v)| *v == 0) {
            Some((name, _)) => Err(SimError::InvalidParams(format!("{name} must be at least 1"))),
            None => Ok(()),
        }
    }
}

// ── ReferenceData ─────────────────────────────────────────────────────────────

/// Everything a replication reads but never mutates.
///
/// Shared by `&` across worker threads.
#[derive(Clone, Debug)]
pub struct ReferenceData {
    pub households: HouseholdTable,
    pub sectors: SectorTables,
    pub capacity: CapacityRatios,
    pub durations: DurationParams,
    pub settings: ActivitySettings,
}

impl ReferenceData {
    /// Reference data with default ratios, durations and settings.
    pub fn new(households: HouseholdTable, sectors: SectorTables) -> Self {
        Self {
            households,
            sectors,
            capacity: CapacityRatios::default(),
            durations: DurationParams::default(),
            settings: ActivitySettings::default(),
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        self.households.validate()?;
        self.capacity.validate()?;
        self.settings.validate()?;
        Ok(())
    }
}
