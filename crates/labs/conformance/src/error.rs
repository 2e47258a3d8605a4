//! Error types for the validation framework itself.
//!
//! Check failures are not errors: they are recorded as
//! [`Finding`](crate::findings::Finding)s in the report. These errors cover
//! misconfiguration and malformed input that prevent a run from starting.

use labs_core::LabsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("configuration parse error: {0}")]
    ConfigParse(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error(transparent)]
    Labs(#[from] LabsError),
}

/// Convenience result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;
