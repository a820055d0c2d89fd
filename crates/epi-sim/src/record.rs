//! Daily case records and the replication output.

use chrono::NaiveDateTime;

use epi_core::Tick;

/// Case counts snapshotted at the start of a simulated day.
///
/// `new_*` fields cover the previous day; cumulative fields and the age
/// brackets cover everything since tick 0, initial infections included.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DailyRecord {
    pub day: u32,
    pub tick: Tick,
    pub datetime: NaiveDateTime,
    pub new_cases: u64,
    pub cumulative_cases: u64,
    /// Sum of ages over `new_cases`.
    pub new_cases_age: u64,
    pub cumulative_cases_age: u64,
    pub cases_age_0_29: u64,
    pub cases_age_30_59: u64,
    pub cases_age_60_plus: u64,
    /// Multiply a count by this to get a count per 100 000 agents.
    pub scale_to_100k: f64,
}

impl DailyRecord {
    #[inline]
    pub fn cumulative_per_100k(&self) -> f64 {
        self.cumulative_cases as f64 * self.scale_to_100k
    }
}

// ── CaseCounter ───────────────────────────────────────────────────────────────

/// Running case tallies between two daily snapshots.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaseCounter {
    pub new_cases: u64,
    pub cumulative_cases: u64,
    pub new_cases_age: u64,
    pub cumulative_cases_age: u64,
    pub age_0_29: u64,
    pub age_30_59: u64,
    pub age_60_plus: u64,
}

impl CaseCounter {
    pub fn count(&mut self, age: u8) {
        let age_sum = u64::from(age);
        self.new_cases += 1;
        self.cumulative_cases += 1;
        self.new_cases_age += age_sum;
        self.cumulative_cases_age += age_sum;
        match age {
            0..=29 => self.age_0_29 += 1,
            30..=59 => self.age_30_59 += 1,
            _ => self.age_60_plus += 1,
        }
    }

    /// Emit a record and reset the per-day tallies.
    pub fn snapshot(
        &mut self,
        day: u32,
        tick: Tick,
        datetime: NaiveDateTime,
        population: usize,
    ) -> DailyRecord {
        let record = DailyRecord {
            day,
            tick,
            datetime,
            new_cases: self.new_cases,
            cumulative_cases: self.cumulative_cases,
            new_cases_age: self.new_cases_age,
            cumulative_cases_age: self.cumulative_cases_age,
            cases_age_0_29: self.age_0_29,
            cases_age_30_59: self.age_30_59,
            cases_age_60_plus: self.age_60_plus,
            scale_to_100k: 100_000.0 / population.max(1) as f64,
        };
        self.new_cases = 0;
        self.new_cases_age = 0;
        record
    }
}

// ── ReplicationOutput ─────────────────────────────────────────────────────────

/// Everything one replication hands back to its caller.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplicationOutput {
    pub seed: u64,
    pub population: usize,
    /// One record per simulated day, day 0 first.
    pub records: Vec<DailyRecord>,
    /// Age of every agent that left the susceptible state, by agent id.
    pub infected_ages: Vec<u8>,
}

impl ReplicationOutput {
    pub fn cumulative_per_100k(&self) -> Vec<f64> {
        self.records
            .iter()
            .map(DailyRecord::cumulative_per_100k)
            .collect()
    }

    /// Cumulative cases per 100k shifted so that day 0 equals
    /// `empirical_day0`.  Unshifted when no anchor is given.
    pub fn adjusted_per_100k(&self, empirical_day0: Option<f64>) -> Vec<f64> {
        let raw = self.cumulative_per_100k();
        match (empirical_day0, raw.first().copied()) {
            (Some(anchor), Some(first)) => {
                let offset = first - anchor;
                raw.into_iter().map(|v| v - offset).collect()
            }
            _ => raw,
        }
    }
}
