//! `epi-output` — persistence of batch results for plotting and reporting.
//!
//! Two backends are provided behind Cargo features:
//!
//! | Feature   | Backend | Files created                                                   |
//! |-----------|---------|-----------------------------------------------------------------|
//! | *(none)*  | CSV     | `daily_cases.csv`, `calibration_series.csv`, `infected_ages.csv` |
//! | `sqlite`  | SQLite  | `output.db`                                                     |
//!
//! Both implement [`OutputWriter`]; [`write_batch`] drives any of them from
//! an `epi_runner::BatchOutput`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use epi_output::{CsvWriter, write_batch};
//!
//! let batch = epi_runner::run_batch(&config, &reference, &params, &behavior)?;
//! let mut writer = CsvWriter::new(Path::new("./output"))?;
//! write_batch(&mut writer, &batch)?;
//! ```

pub mod csv;
pub mod error;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use writer::{OutputWriter, write_batch};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
