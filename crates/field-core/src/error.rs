//! Error types for the field core

use shared_types::PathError;
use thiserror::Error;

/// Errors surfaced by container-level operations.
///
/// Field mutators themselves never fail: malformed input is a no-op.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("Invalid field path: {0}")]
    Path(#[from] PathError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors reported by a validator engine.
///
/// The field logs these and records an empty outcome.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidatorError {
    #[error("Unknown rule: {0}")]
    UnknownRule(String),

    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    #[error("Validator failed: {0}")]
    Failed(String),
}
