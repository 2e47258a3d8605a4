//! Error types for LABS core operations.

use thiserror::Error;

/// Errors raised by sequence construction, encoding and enumeration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabsError {
    #[error("invalid spin value {value} at index {index} (expected +1 or -1)")]
    InvalidInput { index: usize, value: i64 },

    #[error("invalid bit value {value} at index {index} (expected 0 or 1)")]
    InvalidBit { index: usize, value: i64 },

    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("cannot enumerate 2^{length} sequences")]
    EnumerationTooLarge { length: usize },

    #[error("parse error: {0}")]
    Parse(String),
}

/// Convenience result type for LABS core operations.
pub type LabsResult<T> = Result<T, LabsError>;
