//! A named set of policy measures.

use std::fmt;
use std::str::FromStr;

use crate::{ScheduleError, ScheduleResult, SectorTables};

/// Whether symptomatic agents send their household into quarantine.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuarantinePolicy {
    #[default]
    None,
    Household,
}

impl FromStr for QuarantinePolicy {
    type Err = ScheduleError;

    fn from_str(s: &str) -> ScheduleResult<Self> {
        match s.trim() {
            "" | "none" => Ok(QuarantinePolicy::None),
            "household" => Ok(QuarantinePolicy::Household),
            other => Err(ScheduleError::Parse(format!(
                "invalid quarantine policy {other:?}: expected \"none\" or \"household\""
            ))),
        }
    }
}

impl fmt::Display for QuarantinePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuarantinePolicy::None => f.write_str("none"),
            QuarantinePolicy::Household => f.write_str("household"),
        }
    }
}

/// Measures in force while a timetable entry is active.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasureRegime {
    pub name: String,
    pub quarantine: QuarantinePolicy,
    /// Column of the work-from-home table; `None` means nobody works from home.
    pub work_from_home: Option<String>,
    /// Column of the sector-lockdown table; `None` means no lockdown.
    pub sector_lockdown: Option<String>,
    /// Column of the short-time-work table; `None` means no reduction.
    pub short_time_work: Option<String>,
    /// Probability that a pupil attends school on a workday.
    pub school: f64,
    pub kindergarten: f64,
    pub university: f64,
    pub supermarket: f64,
}

impl MeasureRegime {
    /// No measures: every facility open, nobody kept away from work.
    pub fn all_open(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quarantine: QuarantinePolicy::None,
            work_from_home: None,
            sector_lockdown: None,
            short_time_work: None,
            school: 1.0,
            kindergarten: 1.0,
            university: 1.0,
            supermarket: 1.0,
        }
    }

    pub fn validate(&self, tables: &SectorTables) -> ScheduleResult<()> {
        for (field, value) in [
            ("school", self.school),
            ("kindergarten", self.kindergarten),
            ("university", self.university),
            ("supermarket", self.supermarket),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ScheduleError::InvalidProbability {
                    regime: self.name.clone(),
                    field,
                    value,
                });
            }
        }
        for (table, column, lookup) in [
            ("work-from-home", &self.work_from_home, &tables.work_from_home),
            ("sector-lockdown", &self.sector_lockdown, &tables.lockdown),
            ("short-time-work", &self.short_time_work, &tables.short_time_work),
        ] {
            if let Some(column) = column {
                if !lookup.has_column(column) {
                    return Err(ScheduleError::MissingColumn {
                        regime: self.name.clone(),
                        table,
                        column: column.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
