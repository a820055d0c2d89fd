//! The `OutputWriter` trait implemented by all backend writers.

use epi_runner::BatchOutput;
use epi_sim::DailyRecord;

use crate::OutputResult;

/// Trait implemented by the CSV and SQLite writers.
pub trait OutputWriter {
    /// Write the daily records of replication `replication`.
    fn write_daily(&mut self, replication: usize, records: &[DailyRecord]) -> OutputResult<()>;

    /// Write the averaged calibration series, one value per day.
    fn write_calibration(&mut self, series: &[f64]) -> OutputResult<()>;

    /// Write the ages of every agent infected in replication `replication`.
    fn write_infected_ages(&mut self, replication: usize, ages: &[u8]) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Write every replication of `batch`, then the calibration series, then
/// finish the writer.
pub fn write_batch<W: OutputWriter>(writer: &mut W, batch: &BatchOutput) -> OutputResult<()> {
    for (index, replication) in batch.replications.iter().enumerate() {
        writer.write_daily(index, &replication.records)?;
        writer.write_infected_ages(index, &replication.infected_ages)?;
    }
    writer.write_calibration(&batch.calibration_series)?;
    writer.finish()
}
