use thiserror::Error;

use epi_sim::SimError;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error(transparent)]
    Sim(#[from] SimError),

    #[error("replication {index} failed: {source}")]
    Replication {
        index: usize,
        #[source]
        source: SimError,
    },

    #[error("could not build the worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("no series to average")]
    NoReplications,

    #[error("series {index} has length {got}, expected {expected}")]
    LengthMismatch {
        index: usize,
        expected: usize,
        got: usize,
    },
}

pub type RunnerResult<T> = Result<T, RunnerError>;
