//! Per-sector probability tables.
//!
//! Each table maps a regime column name to a per-sector probability.  The
//! work-from-home table is keyed by NACE division, the lockdown and
//! short-time-work tables by NACE section.  A sector missing from a column
//! has probability zero.

use rustc_hash::FxHashMap;

use epi_core::Sector;

use crate::{ScheduleError, ScheduleResult};

#[derive(Clone, Debug, Default)]
pub struct ProbabilityTable {
    columns: FxHashMap<String, FxHashMap<u8, f64>>,
}

impl ProbabilityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the probability of `key` under `column`.
    pub fn insert(&mut self, column: &str, key: u8, probability: f64) -> ScheduleResult<()> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(ScheduleError::InvalidProbability {
                regime: column.to_owned(),
                field: "sector",
                value: probability,
            });
        }
        self.columns
            .entry(column.to_owned())
            .or_default()
            .insert(key, probability);
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert) for literal tables.
    pub fn with(mut self, column: &str, key: u8, probability: f64) -> ScheduleResult<Self> {
        self.insert(column, key, probability)?;
        Ok(self)
    }

    /// Register an empty column so regimes may refer to it.
    pub fn add_column(&mut self, column: &str) {
        self.columns.entry(column.to_owned()).or_default();
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    /// Probability for `key` under `column`; zero when either is absent.
    pub fn probability(&self, column: Option<&str>, key: u8) -> f64 {
        column
            .and_then(|c| self.columns.get(c))
            .and_then(|col| col.get(&key))
            .copied()
            .unwrap_or(0.0)
    }
}

/// The three sector-dependent tables consulted on workday mornings.
#[derive(Clone, Debug, Default)]
pub struct SectorTables {
    /// Keyed by division.
    pub work_from_home: ProbabilityTable,
    /// Keyed by section.
    pub lockdown: ProbabilityTable,
    /// Keyed by section.
    pub short_time_work: ProbabilityTable,
}

impl SectorTables {
    pub fn work_from_home(&self, column: Option<&str>, sector: Sector) -> f64 {
        self.work_from_home.probability(column, sector.division())
    }

    pub fn lockdown(&self, column: Option<&str>, sector: Sector) -> f64 {
        self.lockdown.probability(column, sector.section())
    }

    pub fn short_time_work(&self, column: Option<&str>, sector: Sector) -> f64 {
        self.short_time_work.probability(column, sector.section())
    }
}
