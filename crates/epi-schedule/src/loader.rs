//! CSV loaders for timetables and sector probability tables.
//!
//! # Timetable format
//!
//! One row per regime change.  Empty table columns mean "not applied".
//!
//! ```csv
//! date,regime,quarantine,work_from_home,sector_lockdown,short_time_work,school,kindergarten,university,supermarket
//! 2020-03-01,open,none,,,,1.0,1.0,1.0,1.0
//! 2020-03-16,lockdown,household,wfh_high,closed,reduced,0.0,0.1,0.0,0.8
//! ```
//!
//! # Probability-table format
//!
//! Wide format: the first column holds the sector key (division or
//! section number), every further header is a regime column.
//!
//! ```csv
//! nace2,wfh_low,wfh_high
//! 47,0.05,0.2
//! 62,0.4,0.9
//! ```

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::{MeasureRegime, MeasureTimetable, ProbabilityTable, ScheduleError, ScheduleResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RegimeRow {
    date:            String,
    regime:          String,
    quarantine:      String,
    work_from_home:  Option<String>,
    sector_lockdown: Option<String>,
    short_time_work: Option<String>,
    school:          f64,
    kindergarten:    f64,
    university:      f64,
    supermarket:     f64,
}

// ── Timetable ─────────────────────────────────────────────────────────────────

pub fn load_timetable_csv(path: &Path) -> ScheduleResult<MeasureTimetable> {
    let file = std::fs::File::open(path)?;
    load_timetable_reader(file)
}

/// Like [`load_timetable_csv`] but accepts any `Read` source.
pub fn load_timetable_reader<R: Read>(reader: R) -> ScheduleResult<MeasureTimetable> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut timetable = MeasureTimetable::new();

    for result in csv_reader.deserialize::<RegimeRow>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        let date = NaiveDate::parse_from_str(row.date.trim(), "%Y-%m-%d")
            .map_err(|e| ScheduleError::Parse(format!("invalid date {:?}: {e}", row.date)))?;
        timetable.insert(
            date,
            MeasureRegime {
                name:            row.regime,
                quarantine:      row.quarantine.parse()?,
                work_from_home:  non_empty(row.work_from_home),
                sector_lockdown: non_empty(row.sector_lockdown),
                short_time_work: non_empty(row.short_time_work),
                school:          row.school,
                kindergarten:    row.kindergarten,
                university:      row.university,
                supermarket:     row.supermarket,
            },
        );
    }
    Ok(timetable)
}

// ── Probability table ─────────────────────────────────────────────────────────

pub fn load_probability_table_csv(path: &Path) -> ScheduleResult<ProbabilityTable> {
    let file = std::fs::File::open(path)?;
    load_probability_table_reader(file)
}

/// Like [`load_probability_table_csv`] but accepts any `Read` source.
pub fn load_probability_table_reader<R: Read>(reader: R) -> ScheduleResult<ProbabilityTable> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader
        .headers()
        .map_err(|e| ScheduleError::Parse(e.to_string()))?
        .clone();
    if headers.len() < 2 {
        return Err(ScheduleError::Parse(
            "probability table needs a key column and at least one regime column".into(),
        ));
    }

    let mut table = ProbabilityTable::new();
    for column in headers.iter().skip(1) {
        table.add_column(column.trim());
    }

    for result in csv_reader.records() {
        let record = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        let key_field = record.get(0).unwrap_or_default().trim();
        let key: u8 = key_field
            .parse()
            .map_err(|_| ScheduleError::Parse(format!("invalid sector key {key_field:?}")))?;
        for (column, value) in headers.iter().zip(record.iter()).skip(1) {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            let p: f64 = value.parse().map_err(|_| {
                ScheduleError::Parse(format!("invalid probability {value:?} for sector {key}"))
            })?;
            table.insert(column.trim(), key, p)?;
        }
    }
    Ok(table)
}

fn non_empty(field: Option<String>) -> Option<String> {
    field
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}
