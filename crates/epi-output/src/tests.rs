//! Unit tests for epi-output.

#[cfg(test)]
mod fixtures {
    use chrono::{NaiveDate, NaiveDateTime};
    use epi_core::Tick;
    use epi_runner::BatchOutput;
    use epi_sim::{CaseCounter, DailyRecord, ReplicationOutput};

    pub fn datetime(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 3, 2 + day)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    /// Three days of a population of 1000: two cases on day 0, one on day 1.
    pub fn records() -> Vec<DailyRecord> {
        let mut cases = CaseCounter::default();
        cases.count(25);
        cases.count(70);
        let day0 = cases.snapshot(0, Tick(0), datetime(0), 1000);
        cases.count(40);
        let day1 = cases.snapshot(1, Tick(17), datetime(1), 1000);
        let day2 = cases.snapshot(2, Tick(35), datetime(2), 1000);
        vec![day0, day1, day2]
    }

    pub fn batch() -> BatchOutput {
        let replication = |seed| ReplicationOutput {
            seed,
            population: 1000,
            records: records(),
            infected_ages: vec![25, 70, 40],
        };
        BatchOutput {
            replications: vec![replication(1), replication(2)],
            calibration_series: vec![200.0, 300.0, 300.0],
        }
    }
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::fixtures::{batch, records};
    use crate::csv::{CsvWriter, DAILY_HEADER};
    use crate::writer::{OutputWriter, write_batch};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn read_rows(dir: &TempDir, file: &str) -> Vec<Vec<String>> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.records()
            .map(|r| r.unwrap().iter().map(str::to_owned).collect())
            .collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("daily_cases.csv").exists());
        assert!(dir.path().join("calibration_series.csv").exists());
        assert!(dir.path().join("infected_ages.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("daily_cases.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, DAILY_HEADER);

        let mut rdr2 = csv::Reader::from_path(dir.path().join("calibration_series.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, ["day", "cumulative_per_100k"]);
    }

    #[test]
    fn daily_rows_carry_counts() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_daily(3, &records()).unwrap();
        w.finish().unwrap();

        let rows = read_rows(&dir, "daily_cases.csv");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][0], "3");
        assert_eq!(rows[0][3], "2020-03-02 08:00");
        // Day 1: one new case, three cumulative.
        assert_eq!(rows[1][4], "1");
        assert_eq!(rows[1][5], "3");
        assert_eq!(rows[2][4], "0");
        assert_eq!(rows[2][11].parse::<f64>().unwrap(), 300.0);
    }

    #[test]
    fn batch_writes_every_replication() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        write_batch(&mut w, &batch()).unwrap();

        let daily = read_rows(&dir, "daily_cases.csv");
        assert_eq!(daily.len(), 6);
        assert_eq!(daily[3][0], "1");

        let ages = read_rows(&dir, "infected_ages.csv");
        assert_eq!(ages.len(), 6);
        assert_eq!(ages[1], ["0", "70"]);

        let series = read_rows(&dir, "calibration_series.csv");
        assert_eq!(series.len(), 3);
        assert_eq!(series[1][0], "1");
        assert_eq!(series[1][1].parse::<f64>().unwrap(), 300.0);
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use super::fixtures::{batch, records};
    use crate::sqlite::SqliteWriter;
    use crate::writer::{OutputWriter, write_batch};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn count(dir: &TempDir, table: &str) -> i64 {
        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
            .unwrap()
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_batch_counts() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        write_batch(&mut w, &batch()).unwrap();

        assert_eq!(count(&dir, "daily_cases"), 6);
        assert_eq!(count(&dir, "infected_ages"), 6);
        assert_eq!(count(&dir, "calibration_series"), 3);
    }

    #[test]
    fn sqlite_cumulative_stored() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_daily(0, &records()).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (cases, per_100k): (i64, f64) = conn
            .query_row(
                "SELECT cumulative_cases, cumulative_per_100k FROM daily_cases WHERE day = 2",
                [],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .unwrap();
        assert_eq!(cases, 3);
        assert_eq!(per_100k, 300.0);
    }

    #[test]
    fn sqlite_duplicate_day_rejected() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_daily(0, &records()).unwrap();
        assert!(w.write_daily(0, &records()).is_err());
    }
}
