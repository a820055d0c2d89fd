//! Date-keyed measure timetable.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::{MeasureRegime, ScheduleError, ScheduleResult, SectorTables};

/// Regimes keyed by the date they come into force.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasureTimetable {
    entries: BTreeMap<NaiveDate, MeasureRegime>,
}

impl MeasureTimetable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A timetable with a single regime in force from `from` onwards.
    pub fn constant(from: NaiveDate, regime: MeasureRegime) -> Self {
        let mut timetable = Self::new();
        timetable.insert(from, regime);
        timetable
    }

    /// Add or replace the regime taking effect on `from`.
    pub fn insert(&mut self, from: NaiveDate, regime: MeasureRegime) {
        self.entries.insert(from, regime);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &MeasureRegime)> {
        self.entries.iter()
    }

    /// The regime with the latest key `<= date`.
    pub fn active(&self, date: NaiveDate) -> Option<&MeasureRegime> {
        self.entries.range(..=date).next_back().map(|(_, r)| r)
    }

    /// Non-empty, in force from `start` onwards, and every regime valid
    /// against `tables`.
    pub fn validate(&self, start: NaiveDate, tables: &SectorTables) -> ScheduleResult<()> {
        let Some(&first) = self.entries.keys().next() else {
            return Err(ScheduleError::EmptyTimetable);
        };
        if first > start {
            return Err(ScheduleError::StartsTooLate { first, start });
        }
        self.entries
            .values()
            .try_for_each(|regime| regime.validate(tables))
    }
}
