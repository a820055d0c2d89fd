//! Population-subsystem error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PopulationError {
    #[error("household table is empty")]
    EmptyTable,

    #[error("household {0} has no persons")]
    EmptyHousehold(u64),

    #[error("no household has a positive sampling weight")]
    ZeroWeight,

    #[error("target population must be at least 1")]
    ZeroTarget,

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PopulationResult<T> = Result<T, PopulationError>;
