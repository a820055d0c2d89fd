//! Aggregation across replications.

use crate::{RunnerError, RunnerResult};

/// Elementwise arithmetic mean of equally long series.
///
/// Each value of the result lies between the minimum and maximum of the
/// inputs at that position.
pub fn mean_series(series: &[Vec<f64>]) -> RunnerResult<Vec<f64>> {
    let Some(first) = series.first() else {
        return Err(RunnerError::NoReplications);
    };
    let expected = first.len();
    if let Some((index, s)) = series.iter().enumerate().find(|(_, s)| s.len() != expected) {
        return Err(RunnerError::LengthMismatch {
            index,
            expected,
            got: s.len(),
        });
    }

    let n = series.len() as f64;
    Ok((0..expected)
        .map(|i| series.iter().map(|s| s[i]).sum::<f64>() / n)
        .collect())
}
