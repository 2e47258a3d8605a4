//! The validated ±1 sequence type.
//!
//! A [`Sequence`] is checked once at construction; every operation that
//! changes it (flip, reversal, rotation) returns a new value.

use crate::error::{LabsError, LabsResult};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A fixed-length sequence of spins, each exactly +1 or -1.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<i8>", into = "Vec<i8>")]
pub struct Sequence {
    spins: Vec<i8>,
}

impl Sequence {
    /// Build a sequence, rejecting any value outside {+1, -1}.
    pub fn new(spins: Vec<i8>) -> LabsResult<Self> {
        if let Some((index, &value)) = spins
            .iter()
            .enumerate()
            .find(|(_, v)| !is_spin(**v as i64))
        {
            return Err(LabsError::InvalidInput {
                index,
                value: value as i64,
            });
        }
        Ok(Self { spins })
    }

    /// Build a sequence from any integer slice.
    pub fn from_values<T>(values: &[T]) -> LabsResult<Self>
    where
        T: Copy + Into<i64>,
    {
        let mut spins = Vec::with_capacity(values.len());
        for (index, value) in values.iter().map(|v| (*v).into()).enumerate() {
            if !is_spin(value) {
                return Err(LabsError::InvalidInput { index, value });
            }
            spins.push(value as i8);
        }
        Ok(Self { spins })
    }

    /// Build a sequence where `positive(i)` decides whether position `i` is +1.
    pub fn from_fn(len: usize, mut positive: impl FnMut(usize) -> bool) -> Self {
        Self {
            spins: (0..len).map(|i| if positive(i) { 1 } else { -1 }).collect(),
        }
    }

    /// Draw a uniformly random sequence of the given length.
    pub fn random<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        Self::from_fn(len, |_| rng.gen_bool(0.5))
    }

    pub fn len(&self) -> usize {
        self.spins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spins.is_empty()
    }

    pub fn as_slice(&self) -> &[i8] {
        &self.spins
    }

    pub fn get(&self, index: usize) -> Option<i8> {
        self.spins.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = i8> + '_ {
        self.spins.iter().copied()
    }

    /// Global sign flip: every spin negated.
    pub fn flipped(&self) -> Self {
        Self {
            spins: self.spins.iter().map(|s| -s).collect(),
        }
    }

    /// Reversal: spin order inverted.
    pub fn reversed(&self) -> Self {
        Self {
            spins: self.spins.iter().rev().copied().collect(),
        }
    }

    /// Flip then reverse.
    pub fn flipped_reversed(&self) -> Self {
        Self {
            spins: self.spins.iter().rev().map(|s| -s).collect(),
        }
    }

    /// Cyclic rotation right by `r` positions (negative `r` rotates left).
    pub fn rotated(&self, r: isize) -> Self {
        let n = self.spins.len();
        if n == 0 {
            return self.clone();
        }
        let shift = r.rem_euclid(n as isize) as usize;
        let mut spins = self.spins.clone();
        spins.rotate_right(shift);
        Self { spins }
    }
}

fn is_spin(value: i64) -> bool {
    value == 1 || value == -1
}

impl TryFrom<Vec<i8>> for Sequence {
    type Error = LabsError;

    fn try_from(spins: Vec<i8>) -> Result<Self, Self::Error> {
        Self::new(spins)
    }
}

impl From<Sequence> for Vec<i8> {
    fn from(sequence: Sequence) -> Self {
        sequence.spins
    }
}

impl AsRef<[i8]> for Sequence {
    fn as_ref(&self) -> &[i8] {
        &self.spins
    }
}

/// Compact form: `+` for +1, `-` for -1.
impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for spin in &self.spins {
            f.write_str(if *spin > 0 { "+" } else { "-" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sequence({})", self)
    }
}

impl FromStr for Sequence {
    type Err = LabsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut spins = Vec::with_capacity(s.len());
        for c in s.chars().filter(|c| !c.is_whitespace()) {
            match c {
                '+' => spins.push(1),
                '-' => spins.push(-1),
                other => {
                    return Err(LabsError::Parse(format!(
                        "unexpected character '{}' in sequence",
                        other
                    )))
                }
            }
        }
        Ok(Self { spins })
    }
}
