//! Structured diagnostics produced by checks.
//!
//! Every finding carries the inputs needed to reproduce it: the sequence,
//! the transform or encoding involved, and the raw values on both sides.

use labs_core::{Bitstring, Energy, Sequence, SpinEncoding, Symmetry};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Recorded but does not fail the check.
    Warning,
    /// Fails the check.
    Error,
}

/// Which pair of energy sources disagreed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchSource {
    /// Classical energy vs. oracle energy of the encoded sequence.
    OracleVsClassical,
    /// Optimizer's reported energy vs. recomputation of its sequence.
    OptimizerVsRecomputed,
    /// Optimizer's reported energy vs. oracle energy of its sequence.
    OptimizerVsOracle,
    /// Optimizer reported an energy below the exhaustive optimum.
    OptimizerVsGroundTruth,
}

impl fmt::Display for MismatchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MismatchSource::OracleVsClassical => write!(f, "classical vs oracle"),
            MismatchSource::OptimizerVsRecomputed => write!(f, "optimizer report vs recomputed"),
            MismatchSource::OptimizerVsOracle => write!(f, "optimizer report vs oracle"),
            MismatchSource::OptimizerVsGroundTruth => {
                write!(f, "optimizer report vs exhaustive optimum")
            }
        }
    }
}

/// A single diagnostic raised by a check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// Malformed input reached a check.
    InvalidInput { context: String, reason: String },

    /// A positive symmetry check failed.
    InvariantViolation {
        sequence: Sequence,
        transform: Symmetry,
        energy: Energy,
        transformed_energy: Energy,
    },

    /// An orbit member has a different energy, or the orbit has an impossible size.
    OrbitViolation {
        sequence: Sequence,
        orbit_size: usize,
        member: Option<Sequence>,
        energy: Energy,
        member_energy: Option<Energy>,
    },

    /// A reference value was not reproduced.
    ReferenceMismatch {
        label: String,
        sequence: Option<Sequence>,
        expected: Energy,
        actual: Option<Energy>,
    },

    /// The enumeration result breaks its own contract.
    EnumerationViolation { length: usize, reason: String },

    /// Rotation left the energy unchanged on a known example.
    NegativeCheckAnomaly {
        sequence: Sequence,
        rotation: isize,
        energy: Energy,
    },

    /// Two energy sources disagree.
    CrossValidationMismatch {
        source: MismatchSource,
        sequence: Sequence,
        bits: Option<Bitstring>,
        encoding: SpinEncoding,
        expected: i64,
        actual: i64,
    },

    /// The optimizer returned something worse than its input.
    OptimizerRegression {
        initial: Sequence,
        initial_energy: Energy,
        best: Sequence,
        reported_energy: i64,
        recomputed_energy: Energy,
    },

    /// An external collaborator returned an error.
    CollaboratorFailure {
        collaborator: String,
        operation: String,
        sequence: Option<Sequence>,
        reason: String,
    },
}

impl Finding {
    pub fn severity(&self) -> Severity {
        match self {
            Finding::NegativeCheckAnomaly { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    /// Short machine-friendly name of the finding kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Finding::InvalidInput { .. } => "invalid_input",
            Finding::InvariantViolation { .. } => "invariant_violation",
            Finding::OrbitViolation { .. } => "orbit_violation",
            Finding::ReferenceMismatch { .. } => "reference_mismatch",
            Finding::EnumerationViolation { .. } => "enumeration_violation",
            Finding::NegativeCheckAnomaly { .. } => "negative_check_anomaly",
            Finding::CrossValidationMismatch { .. } => "cross_validation_mismatch",
            Finding::OptimizerRegression { .. } => "optimizer_regression",
            Finding::CollaboratorFailure { .. } => "collaborator_failure",
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::InvalidInput { context, reason } => {
                write!(f, "invalid input in {}: {}", context, reason)
            }
            Finding::InvariantViolation {
                sequence,
                transform,
                energy,
                transformed_energy,
            } => write!(
                f,
                "{} symmetry violated for {}: E={} but E({})={}",
                transform, sequence, energy, transform, transformed_energy
            ),
            Finding::OrbitViolation {
                sequence,
                orbit_size,
                member,
                energy,
                member_energy,
            } => match (member, member_energy) {
                (Some(m), Some(me)) => write!(
                    f,
                    "orbit of {} (size {}) has member {} with E={} != {}",
                    sequence, orbit_size, m, me, energy
                ),
                _ => write!(f, "orbit of {} has invalid size {}", sequence, orbit_size),
            },
            Finding::ReferenceMismatch {
                label,
                sequence,
                expected,
                actual,
            } => {
                write!(f, "reference {} expected E={}", label, expected)?;
                match actual {
                    Some(a) => write!(f, ", got {}", a)?,
                    None => write!(f, ", got nothing")?,
                }
                if let Some(s) = sequence {
                    write!(f, " (sequence {})", s)?;
                }
                Ok(())
            }
            Finding::EnumerationViolation { length, reason } => {
                write!(f, "enumeration of N={} invalid: {}", length, reason)
            }
            Finding::NegativeCheckAnomaly {
                sequence,
                rotation,
                energy,
            } => write!(
                f,
                "rotation by {} left E={} unchanged for {}; check for cyclic autocorrelation",
                rotation, energy, sequence
            ),
            Finding::CrossValidationMismatch {
                source,
                sequence,
                bits,
                encoding,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "{} mismatch for {}: expected {}, got {} (encoding {}",
                    source, sequence, expected, actual, encoding
                )?;
                if let Some(b) = bits {
                    write!(f, ", bits {}", b)?;
                }
                write!(f, ")")
            }
            Finding::OptimizerRegression {
                initial,
                initial_energy,
                best,
                reported_energy,
                recomputed_energy,
            } => write!(
                f,
                "optimizer regressed from {} (E={}) to {} (reported {}, recomputed {})",
                initial, initial_energy, best, reported_energy, recomputed_energy
            ),
            Finding::CollaboratorFailure {
                collaborator,
                operation,
                sequence,
                reason,
            } => {
                write!(f, "{} failed during {}: {}", collaborator, operation, reason)?;
                if let Some(s) = sequence {
                    write!(f, " (input {})", s)?;
                }
                Ok(())
            }
        }
    }
}
