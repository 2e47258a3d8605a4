//! Published reference values used as regression anchors.

use crate::energy::Energy;
use crate::sequence::Sequence;
use serde::{Deserialize, Serialize};

/// Minimum energy for one length, with the number of sequences attaining it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownOptimum {
    pub length: usize,
    pub energy: Energy,
    pub ground_states: usize,
}

/// Optimal LABS energies for N = 1..=13.
#[rustfmt::skip]
pub const KNOWN_OPTIMA: &[KnownOptimum] = &[
    KnownOptimum { length: 1, energy: 0, ground_states: 2 },
    KnownOptimum { length: 2, energy: 1, ground_states: 4 },
    KnownOptimum { length: 3, energy: 1, ground_states: 4 },
    KnownOptimum { length: 4, energy: 2, ground_states: 8 },
    KnownOptimum { length: 5, energy: 2, ground_states: 4 },
    KnownOptimum { length: 6, energy: 7, ground_states: 28 },
    KnownOptimum { length: 7, energy: 3, ground_states: 4 },
    KnownOptimum { length: 8, energy: 8, ground_states: 16 },
    KnownOptimum { length: 9, energy: 12, ground_states: 24 },
    KnownOptimum { length: 10, energy: 13, ground_states: 40 },
    KnownOptimum { length: 11, energy: 5, ground_states: 4 },
    KnownOptimum { length: 12, energy: 10, ground_states: 16 },
    KnownOptimum { length: 13, energy: 6, ground_states: 4 },
];

pub fn known_optimum(length: usize) -> Option<KnownOptimum> {
    KNOWN_OPTIMA.iter().find(|o| o.length == length).copied()
}

/// A sequence with a known energy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSequence {
    pub label: String,
    pub sequence: Sequence,
    pub energy: Energy,
}

/// Hand-checked sequences: the degenerate lengths and the Barker codes.
pub fn reference_sequences() -> Vec<ReferenceSequence> {
    [
        ("empty", vec![], 0),
        ("single", vec![1], 0),
        ("barker_4", vec![1, 1, 1, -1], 2),
        ("barker_7", vec![1, 1, 1, -1, -1, 1, -1], 3),
        ("barker_11", vec![1, 1, 1, -1, -1, -1, 1, -1, -1, 1, -1], 5),
        ("barker_13", vec![1, 1, 1, 1, 1, -1, -1, 1, 1, -1, 1, -1, 1], 6),
    ]
    .into_iter()
    .filter_map(|(label, spins, energy)| {
        Sequence::new(spins).ok().map(|sequence| ReferenceSequence {
            label: label.to_string(),
            sequence,
            energy,
        })
    })
    .collect()
}

/// A sequence and rotation for which linear autocorrelation is known to
/// change the energy. A cyclic implementation would not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationExample {
    pub sequence: Sequence,
    pub rotation: isize,
}

pub fn rotation_examples() -> Vec<RotationExample> {
    [(vec![1, -1, 1, 1, -1], 1), (vec![1, -1, 1, 1, -1, 1], 1)]
        .into_iter()
        .filter_map(|(spins, rotation)| {
            Sequence::new(spins)
                .ok()
                .map(|sequence| RotationExample { sequence, rotation })
        })
        .collect()
}
