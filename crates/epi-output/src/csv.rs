//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `daily_cases.csv`: one row per replication and day
//! - `calibration_series.csv`: one row per day
//! - `infected_ages.csv`: one row per infected agent

use std::fs::File;
use std::path::Path;

use csv::Writer;

use epi_sim::DailyRecord;

use crate::OutputResult;
use crate::writer::OutputWriter;

pub const DAILY_HEADER: [&str; 12] = [
    "replication",
    "day",
    "tick",
    "datetime",
    "new_cases",
    "cumulative_cases",
    "new_cases_age",
    "cumulative_cases_age",
    "cases_age_0_29",
    "cases_age_30_59",
    "cases_age_60_plus",
    "cumulative_per_100k",
];

/// Writes batch output to three CSV files.
pub struct CsvWriter {
    daily: Writer<File>,
    calibration: Writer<File>,
    ages: Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut daily = Writer::from_path(dir.join("daily_cases.csv"))?;
        daily.write_record(DAILY_HEADER)?;

        let mut calibration = Writer::from_path(dir.join("calibration_series.csv"))?;
        calibration.write_record(["day", "cumulative_per_100k"])?;

        let mut ages = Writer::from_path(dir.join("infected_ages.csv"))?;
        ages.write_record(["replication", "age"])?;

        Ok(Self {
            daily,
            calibration,
            ages,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_daily(&mut self, replication: usize, records: &[DailyRecord]) -> OutputResult<()> {
        for r in records {
            self.daily.write_record(&[
                replication.to_string(),
                r.day.to_string(),
                r.tick.0.to_string(),
                r.datetime.format("%Y-%m-%d %H:%M").to_string(),
                r.new_cases.to_string(),
                r.cumulative_cases.to_string(),
                r.new_cases_age.to_string(),
                r.cumulative_cases_age.to_string(),
                r.cases_age_0_29.to_string(),
                r.cases_age_30_59.to_string(),
                r.cases_age_60_plus.to_string(),
                r.cumulative_per_100k().to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_calibration(&mut self, series: &[f64]) -> OutputResult<()> {
        for (day, value) in series.iter().enumerate() {
            self.calibration
                .write_record(&[day.to_string(), value.to_string()])?;
        }
        Ok(())
    }

    fn write_infected_ages(&mut self, replication: usize, ages: &[u8]) -> OutputResult<()> {
        let replication = replication.to_string();
        for age in ages {
            self.ages
                .write_record(&[replication.clone(), age.to_string()])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.daily.flush()?;
        self.calibration.flush()?;
        self.ages.flush()?;
        Ok(())
    }
}
