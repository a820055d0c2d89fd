//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! three tables: `daily_cases`, `calibration_series` and `infected_ages`.

use std::path::Path;

use rusqlite::Connection;

use epi_sim::DailyRecord;

use crate::OutputResult;
use crate::writer::OutputWriter;

/// Writes batch output to an SQLite database.
pub struct SqliteWriter {
    conn: Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS daily_cases (
                 replication          INTEGER NOT NULL,
                 day                  INTEGER NOT NULL,
                 tick                 INTEGER NOT NULL,
                 datetime             TEXT    NOT NULL,
                 new_cases            INTEGER NOT NULL,
                 cumulative_cases     INTEGER NOT NULL,
                 new_cases_age        INTEGER NOT NULL,
                 cumulative_cases_age INTEGER NOT NULL,
                 cases_age_0_29       INTEGER NOT NULL,
                 cases_age_30_59      INTEGER NOT NULL,
                 cases_age_60_plus    INTEGER NOT NULL,
                 cumulative_per_100k  REAL    NOT NULL,
                 PRIMARY KEY (replication, day)
             );
             CREATE TABLE IF NOT EXISTS calibration_series (
                 day                 INTEGER PRIMARY KEY,
                 cumulative_per_100k REAL NOT NULL
             );
             CREATE TABLE IF NOT EXISTS infected_ages (
                 replication INTEGER NOT NULL,
                 age         INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_daily(&mut self, replication: usize, records: &[DailyRecord]) -> OutputResult<()> {
        if records.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO daily_cases \
                 (replication, day, tick, datetime, new_cases, cumulative_cases, \
                  new_cases_age, cumulative_cases_age, cases_age_0_29, \
                  cases_age_30_59, cases_age_60_plus, cumulative_per_100k) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            )?;
            for r in records {
                stmt.execute(rusqlite::params![
                    replication as i64,
                    r.day,
                    r.tick.0 as i64,
                    r.datetime.format("%Y-%m-%d %H:%M").to_string(),
                    r.new_cases as i64,
                    r.cumulative_cases as i64,
                    r.new_cases_age as i64,
                    r.cumulative_cases_age as i64,
                    r.cases_age_0_29 as i64,
                    r.cases_age_30_59 as i64,
                    r.cases_age_60_plus as i64,
                    r.cumulative_per_100k(),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_calibration(&mut self, series: &[f64]) -> OutputResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO calibration_series (day, cumulative_per_100k) VALUES (?1, ?2)",
            )?;
            for (day, value) in series.iter().enumerate() {
                stmt.execute(rusqlite::params![day as i64, value])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_infected_ages(&mut self, replication: usize, ages: &[u8]) -> OutputResult<()> {
        if ages.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO infected_ages (replication, age) VALUES (?1, ?2)",
            )?;
            for &age in ages {
                stmt.execute(rusqlite::params![replication as i64, age])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
