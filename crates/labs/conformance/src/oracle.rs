//! Hamiltonian-based reference oracle.
//!
//! Builds the Ising form of the LABS cost,
//! `H = Σ_k (Σ_i Z_i Z_{i+k})²`, expanded into a sum of Pauli-Z strings,
//! and evaluates its expectation on a computational basis state. For a
//! basis state the expectation is exact, so this gives an energy computed
//! by a method unrelated to the autocorrelation loop in `labs_core`.

use crate::collaborators::{CollaboratorError, EnergyOracle};
use async_trait::async_trait;
use labs_core::{Bitstring, LabsError, LabsResult, SpinEncoding};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One Pauli-Z string with an integer coefficient. Empty `qubits` is the identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauliTerm {
    pub coefficient: i64,
    pub qubits: Vec<usize>,
}

impl PauliTerm {
    /// Eigenvalue on a basis state: |0⟩ → +1, |1⟩ → -1 per qubit.
    fn eigenvalue(&self, bits: &[u8]) -> i64 {
        let ones = self.qubits.iter().filter(|q| bits[**q] == 1).count();
        if ones % 2 == 0 {
            self.coefficient
        } else {
            -self.coefficient
        }
    }
}

/// The LABS Hamiltonian on `qubits` qubits, with like terms merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabsHamiltonian {
    qubits: usize,
    terms: Vec<PauliTerm>,
}

impl LabsHamiltonian {
    pub fn new(qubits: usize) -> Self {
        let mut merged: BTreeMap<Vec<usize>, i64> = BTreeMap::new();

        for k in 1..qubits {
            for i in 0..qubits - k {
                for j in 0..qubits - k {
                    // Z_a Z_a = I, so repeated indices cancel pairwise.
                    let mut support = BTreeSet::new();
                    for q in [i, i + k, j, j + k] {
                        if !support.remove(&q) {
                            support.insert(q);
                        }
                    }
                    *merged.entry(support.into_iter().collect()).or_insert(0) += 1;
                }
            }
        }

        let terms = merged
            .into_iter()
            .filter(|(_, c)| *c != 0)
            .map(|(qubits, coefficient)| PauliTerm {
                coefficient,
                qubits,
            })
            .collect();

        Self { qubits, terms }
    }

    pub fn num_qubits(&self) -> usize {
        self.qubits
    }

    pub fn terms(&self) -> &[PauliTerm] {
        &self.terms
    }

    /// Coefficient of the identity term.
    pub fn constant(&self) -> i64 {
        self.terms
            .iter()
            .find(|t| t.qubits.is_empty())
            .map(|t| t.coefficient)
            .unwrap_or(0)
    }

    /// Expectation value on the basis state `bits`.
    pub fn expectation(&self, bits: &Bitstring) -> LabsResult<i64> {
        if bits.len() != self.qubits {
            return Err(LabsError::LengthMismatch {
                expected: self.qubits,
                actual: bits.len(),
            });
        }
        let b = bits.as_slice();
        Ok(self.terms.iter().map(|t| t.eigenvalue(b)).sum())
    }
}

/// [`EnergyOracle`] backed by [`LabsHamiltonian`].
#[derive(Debug, Clone, Default)]
pub struct HamiltonianOracle;

impl HamiltonianOracle {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EnergyOracle for HamiltonianOracle {
    fn name(&self) -> &str {
        "ising-hamiltonian"
    }

    fn encoding(&self) -> SpinEncoding {
        SpinEncoding::ZeroIsPlus
    }

    async fn oracle_energy(&self, bits: &Bitstring) -> Result<i64, CollaboratorError> {
        LabsHamiltonian::new(bits.len())
            .expectation(bits)
            .map_err(|e| CollaboratorError::Rejected(e.to_string()))
    }
}
