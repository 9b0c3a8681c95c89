//! Workspace error type.
//!
//! Only [`HosError::InvalidInput`] is a contractual failure of trip
//! planning.  Time and date degradations are never surfaced as errors; they
//! are counted in the plan diagnostics instead.

use thiserror::Error;

/// The top-level error type for `hos-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum HosError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `hos-*` crates.
pub type HosResult<T> = Result<T, HosError>;
