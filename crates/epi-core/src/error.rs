//! Core error type.
//!
//! Sub-crates define their own enums and wrap this one where they need it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `epi-core`.
pub type CoreResult<T> = Result<T, CoreError>;
