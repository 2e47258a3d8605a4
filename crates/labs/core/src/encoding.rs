//! Bitstring encoding of spin sequences.
//!
//! Oracles and measurement-based tooling speak in 0/1 bitstrings. The
//! mapping between bits and spins is a fixed bijection chosen explicitly by
//! the caller; nothing in this module assumes both sides share it.

use crate::error::{LabsError, LabsResult};
use crate::sequence::Sequence;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated list of bits, each 0 or 1.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Bitstring {
    bits: Vec<u8>,
}

impl Bitstring {
    pub fn new(bits: Vec<u8>) -> LabsResult<Self> {
        if let Some((index, &value)) = bits.iter().enumerate().find(|(_, b)| **b > 1) {
            return Err(LabsError::InvalidBit {
                index,
                value: value as i64,
            });
        }
        Ok(Self { bits })
    }

    /// Parse a string of `0` and `1` characters, e.g. `"0110"`.
    pub fn parse(text: &str) -> LabsResult<Self> {
        let mut bits = Vec::with_capacity(text.len());
        for (index, c) in text.chars().enumerate() {
            match c {
                '0' => bits.push(0),
                '1' => bits.push(1),
                other => {
                    return Err(LabsError::InvalidBit {
                        index,
                        value: other as i64,
                    })
                }
            }
        }
        Ok(Self { bits })
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bits
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.bits.clone()
    }
}

impl TryFrom<Vec<u8>> for Bitstring {
    type Error = LabsError;

    fn try_from(bits: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(bits)
    }
}

impl From<Bitstring> for Vec<u8> {
    fn from(bits: Bitstring) -> Self {
        bits.bits
    }
}

impl fmt::Display for Bitstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            f.write_str(if *bit == 0 { "0" } else { "1" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for Bitstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bitstring({})", self)
    }
}

/// Bijection between bits and spins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinEncoding {
    /// 0 ↔ +1, 1 ↔ -1 (`s = 1 - 2b`). Matches a Z-basis measurement where
    /// |0⟩ has eigenvalue +1.
    #[default]
    ZeroIsPlus,
    /// 0 ↔ -1, 1 ↔ +1 (`s = 2b - 1`).
    ZeroIsMinus,
}

impl SpinEncoding {
    pub fn bit_for(self, spin: i8) -> u8 {
        match (self, spin > 0) {
            (SpinEncoding::ZeroIsPlus, true) | (SpinEncoding::ZeroIsMinus, false) => 0,
            _ => 1,
        }
    }

    pub fn spin_for(self, bit: u8) -> i8 {
        match (self, bit == 0) {
            (SpinEncoding::ZeroIsPlus, true) | (SpinEncoding::ZeroIsMinus, false) => 1,
            _ => -1,
        }
    }

    pub fn encode(self, sequence: &Sequence) -> Bitstring {
        Bitstring {
            bits: sequence.iter().map(|s| self.bit_for(s)).collect(),
        }
    }

    pub fn decode(self, bits: &Bitstring) -> Sequence {
        Sequence::from_fn(bits.len(), |i| self.spin_for(bits.bits[i]) > 0)
    }

    /// Decode and require a specific length.
    pub fn decode_exact(self, bits: &Bitstring, expected: usize) -> LabsResult<Sequence> {
        if bits.len() != expected {
            return Err(LabsError::LengthMismatch {
                expected,
                actual: bits.len(),
            });
        }
        Ok(self.decode(bits))
    }

    /// The other convention.
    pub fn inverse(self) -> Self {
        match self {
            SpinEncoding::ZeroIsPlus => SpinEncoding::ZeroIsMinus,
            SpinEncoding::ZeroIsMinus => SpinEncoding::ZeroIsPlus,
        }
    }
}

impl fmt::Display for SpinEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpinEncoding::ZeroIsPlus => write!(f, "0->+1, 1->-1"),
            SpinEncoding::ZeroIsMinus => write!(f, "0->-1, 1->+1"),
        }
    }
}
