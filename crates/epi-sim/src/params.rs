//! Validated run parameters.

use rustc_hash::FxHashMap;

use epi_core::{LocationKind, SimConfig};
use epi_schedule::MeasureTimetable;

use crate::{ReferenceData, SimError, SimResult};

// ── TransmissionTable ─────────────────────────────────────────────────────────

/// Per-hour transmission probability per location kind.
///
/// Every kind uses `per_hour` unless an override is set for it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransmissionTable {
    pub per_hour: f64,
    overrides: FxHashMap<LocationKind, f64>,
}

impl TransmissionTable {
    pub fn new(per_hour: f64) -> Self {
        Self {
            per_hour,
            overrides: FxHashMap::default(),
        }
    }

    /// Use `per_hour` for cells of `kind`.
    pub fn with_override(mut self, kind: LocationKind, per_hour: f64) -> Self {
        self.overrides.insert(kind, per_hour);
        self
    }

    pub fn per_hour(&self, kind: LocationKind) -> f64 {
        self.overrides.get(&kind).copied().unwrap_or(self.per_hour)
    }

    /// Probability of one exposure attempt succeeding within a single tick.
    #[inline]
    pub fn per_tick(&self, kind: LocationKind, ticks_per_hour: u32) -> f64 {
        self.per_hour(kind) / f64::from(ticks_per_hour.max(1))
    }

    pub fn validate(&self) -> SimResult<()> {
        let invalid = std::iter::once((None, self.per_hour))
            .chain(self.overrides.iter().map(|(&k, &p)| (Some(k), p)))
            .find(|(_, p)| !(0.0..=1.0).contains(p));
        match invalid {
            Some((None, p)) => Err(SimError::InvalidParams(format!(
                "transmission probability must lie in [0, 1], got {p}"
            ))),
            Some((Some(kind), p)) => Err(SimError::InvalidParams(format!(
                "transmission probability for {kind} must lie in [0, 1], got {p}"
            ))),
            None => Ok(()),
        }
    }
}

// ── EpidemicParams ────────────────────────────────────────────────────────────

/// Run parameters of one batch.
///
/// # Defaults
///
/// | Field                  | Default          |
/// |------------------------|------------------|
/// | `random_infection_rate`| 0                |
/// | `ticks_to_quarantine`  | one day          |
/// | `ticks_to_stay_home`   | one day          |
/// | `quarantine_days`      | 14               |
/// | `n_internal_runs`      | 1                |
/// | grid                   | 100 x 100        |
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpidemicParams {
    pub transmission: TransmissionTable,
    /// Agents seeded as infectious at tick 0.
    pub initial_infections: usize,
    pub target_population: usize,
    /// Below 1: per-day probability of one random exposure.  Otherwise:
    /// exposures per day, rounded.
    pub random_infection_rate: f64,
    pub timetable: MeasureTimetable,
    /// Ticks from symptom onset until the household is isolated.  `None`
    /// means one day.
    pub ticks_to_quarantine: Option<u64>,
    /// Ticks from symptom onset until a mild case stops leaving home.
    /// `None` means one day.
    pub ticks_to_stay_home: Option<u64>,
    pub quarantine_days: u64,
    pub n_internal_runs: usize,
    pub grid_width: u32,
    pub grid_height: u32,
    /// Empirical cumulative cases per 100k on day 0, used to align output.
    pub empirical_day0_per_100k: Option<f64>,
}

impl EpidemicParams {
    pub fn new(
        per_hour: f64,
        initial_infections: usize,
        target_population: usize,
        timetable: MeasureTimetable,
    ) -> Self {
        Self {
            transmission: TransmissionTable::new(per_hour),
            initial_infections,
            target_population,
            random_infection_rate: 0.0,
            timetable,
            ticks_to_quarantine: None,
            ticks_to_stay_home: None,
            quarantine_days: 14,
            n_internal_runs: 1,
            grid_width: 100,
            grid_height: 100,
            empirical_day0_per_100k: None,
        }
    }

    pub fn stay_home_delay(&self, config: &SimConfig) -> u64 {
        self.ticks_to_stay_home.unwrap_or_else(|| config.ticks_per_day())
    }

    pub fn quarantine_delay(&self, config: &SimConfig) -> u64 {
        self.ticks_to_quarantine.unwrap_or_else(|| config.ticks_per_day())
    }

    /// Quarantine length in ticks.
    pub fn quarantine_window(&self, config: &SimConfig) -> u64 {
        config.ticks_for_days(self.quarantine_days)
    }

    /// Precondition checks, run before any replication state exists.
    pub fn validate(&self, config: &SimConfig, reference: &ReferenceData) -> SimResult<()> {
        self.transmission.validate()?;
        if self.target_population == 0 {
            return Err(SimError::InvalidParams(
                "target population must be at least 1".into(),
            ));
        }
        if self.initial_infections > self.target_population {
            return Err(SimError::TooManyInitialInfections {
                initial: self.initial_infections,
                population: self.target_population,
            });
        }
        if !self.random_infection_rate.is_finite() || self.random_infection_rate < 0.0 {
            return Err(SimError::InvalidParams(format!(
                "random infection rate must be non-negative, got {}",
                self.random_infection_rate
            )));
        }
        if self.n_internal_runs == 0 {
            return Err(SimError::InvalidParams(
                "at least one replication is required".into(),
            ));
        }
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(SimError::InvalidParams(format!(
                "grid must not be empty, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        self.timetable
            .validate(config.start.date(), &reference.sectors)?;
        Ok(())
    }
}
