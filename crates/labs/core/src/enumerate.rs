//! Exhaustive enumeration of every sequence of a given length.
//!
//! Sequences are generated in lexicographic order with -1 before +1 at each
//! position (position 0 most significant), evaluated, then stably sorted by
//! energy, so ties keep generation order.

use crate::energy::{AutocorrelationEnergy, Energy, EnergyModel};
use crate::error::{LabsError, LabsResult};
use crate::sequence::Sequence;
use serde::{Deserialize, Serialize};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Largest length whose index space fits in a `u64` counter.
pub const MAX_ENUMERABLE_LENGTH: usize = 63;

/// Every sequence of one length with its energy, ascending by energy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enumeration {
    length: usize,
    entries: Vec<(Sequence, Energy)>,
}

impl Enumeration {
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(Sequence, Energy)] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Sequence, Energy)> {
        self.entries.iter()
    }

    /// The first entry: a minimum-energy sequence.
    pub fn best(&self) -> Option<&(Sequence, Energy)> {
        self.entries.first()
    }

    pub fn best_energy(&self) -> Option<Energy> {
        self.best().map(|(_, e)| *e)
    }

    /// All entries at the minimum energy, in generation order.
    pub fn ground_states(&self) -> &[(Sequence, Energy)] {
        match self.best_energy() {
            Some(min) => {
                let end = self.entries.partition_point(|(_, e)| *e == min);
                &self.entries[..end]
            }
            None => &[],
        }
    }

    pub fn into_entries(self) -> Vec<(Sequence, Energy)> {
        self.entries
    }
}

/// The `index`-th sequence of length `length` in generation order.
///
/// Bit `length - 1 - i` of `index` set means position `i` is +1.
pub fn sequence_at(length: usize, index: u64) -> Sequence {
    Sequence::from_fn(length, |i| (index >> (length - 1 - i)) & 1 == 1)
}

/// Enumerate all 2^N sequences of length `length` with the canonical energy.
///
/// Cost is exponential: 2^N sequences at O(N²) each. Intended for N up to
/// about 20.
pub fn enumerate_all(length: usize) -> LabsResult<Enumeration> {
    enumerate_with(length, &AutocorrelationEnergy)
}

/// Enumerate all 2^N sequences, evaluating each with `model`.
///
/// Same exponential cost as [`enumerate_all`].
pub fn enumerate_with(length: usize, model: &dyn EnergyModel) -> LabsResult<Enumeration> {
    if length > MAX_ENUMERABLE_LENGTH {
        return Err(LabsError::EnumerationTooLarge { length });
    }
    let count: u64 = 1 << length;

    let mut entries = evaluate(length, count, model);
    entries.sort_by_key(|(_, e)| *e);

    Ok(Enumeration { length, entries })
}

#[cfg(feature = "rayon")]
fn evaluate(length: usize, count: u64, model: &dyn EnergyModel) -> Vec<(Sequence, Energy)> {
    (0..count)
        .into_par_iter()
        .map(|index| {
            let sequence = sequence_at(length, index);
            let e = model.energy(&sequence);
            (sequence, e)
        })
        .collect()
}

#[cfg(not(feature = "rayon"))]
fn evaluate(length: usize, count: u64, model: &dyn EnergyModel) -> Vec<(Sequence, Energy)> {
    (0..count)
        .map(|index| {
            let sequence = sequence_at(length, index);
            let e = model.energy(&sequence);
            (sequence, e)
        })
        .collect()
}
