//! Agent-subsystem error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("{stage} duration needs positive finite mean and variance, got ({mean}, {variance})")]
    InvalidDuration {
        stage: &'static str,
        mean: f64,
        variance: f64,
    },

    #[error("household {0} has no members")]
    EmptyHousehold(usize),
}

pub type AgentResult<T> = Result<T, AgentError>;
