//! LABS Core
//!
//! Exact energy evaluation for Low Autocorrelation Binary Sequences and the
//! building blocks used to validate it.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`sequence`] | validated ±1 [`Sequence`] |
//! | [`encoding`] | [`Bitstring`] and the [`SpinEncoding`] bijection |
//! | [`energy`] | [`energy()`], autocorrelations, [`EnergyModel`] |
//! | [`enumerate`] | exhaustive [`enumerate_all`] ranked by energy |
//! | [`symmetry`] | the invariance group, [`orbit`], [`rotate`] |
//! | [`reference`] | known optima and regression examples |
//!
//! # Quick Start
//!
//! ```rust
//! use labs_core::{energy, enumerate_all, orbit, Sequence};
//!
//! let s: Sequence = "+++-".parse().unwrap();
//! assert_eq!(energy(&s), 2);
//! assert!(orbit(&s).iter().all(|m| energy(m) == 2));
//!
//! let all = enumerate_all(4).unwrap();
//! assert_eq!(all.len(), 16);
//! assert_eq!(all.best_energy(), Some(2));
//! ```

pub mod encoding;
pub mod energy;
pub mod enumerate;
pub mod error;
pub mod reference;
pub mod sequence;
pub mod symmetry;

// Re-export key types at crate root.
pub use encoding::{Bitstring, SpinEncoding};
pub use energy::{
    autocorrelation, autocorrelations, energy, energy_of, merit_factor, AutocorrelationEnergy,
    Energy, EnergyModel, FnModel,
};
pub use enumerate::{enumerate_all, enumerate_with, sequence_at, Enumeration};
pub use error::{LabsError, LabsResult};
pub use reference::{known_optimum, KnownOptimum, RotationExample, KNOWN_OPTIMA};
pub use sequence::Sequence;
pub use symmetry::{orbit, rotate, Orbit, Symmetry};
