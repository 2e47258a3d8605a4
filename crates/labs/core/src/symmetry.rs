//! The LABS invariance group and symmetry orbits.

use crate::sequence::Sequence;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One element of the four-element group {identity, flip, reverse, flip∘reverse}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symmetry {
    Identity,
    Flip,
    Reverse,
    FlipReverse,
}

impl Symmetry {
    pub const ALL: [Symmetry; 4] = [
        Symmetry::Identity,
        Symmetry::Flip,
        Symmetry::Reverse,
        Symmetry::FlipReverse,
    ];

    /// The three non-identity elements.
    pub const NON_TRIVIAL: [Symmetry; 3] =
        [Symmetry::Flip, Symmetry::Reverse, Symmetry::FlipReverse];

    pub fn apply(self, sequence: &Sequence) -> Sequence {
        match self {
            Symmetry::Identity => sequence.clone(),
            Symmetry::Flip => sequence.flipped(),
            Symmetry::Reverse => sequence.reversed(),
            Symmetry::FlipReverse => sequence.flipped_reversed(),
        }
    }

    pub fn is_identity(self) -> bool {
        matches!(self, Symmetry::Identity)
    }
}

impl fmt::Display for Symmetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symmetry::Identity => write!(f, "identity"),
            Symmetry::Flip => write!(f, "flip"),
            Symmetry::Reverse => write!(f, "reverse"),
            Symmetry::FlipReverse => write!(f, "flip+reverse"),
        }
    }
}

/// The distinct images of a sequence under [`Symmetry::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Orbit {
    members: BTreeSet<Sequence>,
}

impl Orbit {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, sequence: &Sequence) -> bool {
        self.members.contains(sequence)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sequence> {
        self.members.iter()
    }

    /// Least member in sequence order; identical for every member of the orbit.
    pub fn canonical(&self) -> Option<&Sequence> {
        self.members.first()
    }

    pub fn into_members(self) -> BTreeSet<Sequence> {
        self.members
    }
}

/// Orbit of `sequence` under the invariance group.
pub fn orbit(sequence: &Sequence) -> Orbit {
    Orbit {
        members: Symmetry::ALL.iter().map(|g| g.apply(sequence)).collect(),
    }
}

/// Cyclic rotation right by `r mod N`. Not a symmetry of the energy.
pub fn rotate(sequence: &Sequence, r: isize) -> Sequence {
    sequence.rotated(r)
}
