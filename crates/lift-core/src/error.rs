//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// The base error type for `lift-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("clock cannot move backwards from {now} to {to}")]
    TimeReversal { now: f64, to: f64 },
}

/// Shorthand result type for `lift-core`.
pub type CoreResult<T> = Result<T, CoreError>;
