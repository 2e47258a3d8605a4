//! Contracts for the external collaborators the harness validates against.
//!
//! Both traits are async: an oracle may be a simulated measurement and an
//! optimizer a long search, and the harness awaits each call on its own.

use async_trait::async_trait;
use labs_core::{Bitstring, Sequence, SpinEncoding};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned by an external collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),

    #[error("rejected input: {0}")]
    Rejected(String),

    #[error("collaborator failed: {0}")]
    Failed(String),
}

/// An independent source of ground-truth energies.
#[async_trait]
pub trait EnergyOracle: Send + Sync {
    /// Name used in reports
    fn name(&self) -> &str;

    /// The bit/spin convention this oracle documents. Informational: the
    /// harness uses its own configured encoding and records both.
    fn encoding(&self) -> SpinEncoding;

    /// Energy of the state described by `bits`.
    async fn oracle_energy(&self, bits: &Bitstring) -> Result<i64, CollaboratorError>;
}

/// What an optimizer claims to have found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizerOutcome {
    pub best: Sequence,
    pub best_energy: i64,
}

/// A heuristic search that should never return a worse sequence than its input.
#[async_trait]
pub trait Optimizer: Send + Sync {
    /// Name used in reports
    fn name(&self) -> &str;

    async fn optimize(
        &self,
        initial: &Sequence,
        budget: usize,
    ) -> Result<OptimizerOutcome, CollaboratorError>;
}
