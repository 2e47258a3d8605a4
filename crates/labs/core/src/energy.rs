//! Exact LABS energy evaluation.
//!
//! `E(s) = Σ_{k=1}^{N-1} C_k(s)²` with the linear (non-cyclic)
//! autocorrelation `C_k(s) = Σ_{i=0}^{N-k-1} s[i]·s[i+k]`. All arithmetic is
//! integer; the result is exact and is used as ground truth elsewhere.

use crate::error::LabsResult;
use crate::sequence::Sequence;

/// LABS energy. Always non-negative.
pub type Energy = u64;

/// Autocorrelation of `sequence` at lag `k`. Zero for `k >= N`.
pub fn autocorrelation(sequence: &Sequence, k: usize) -> i64 {
    let s = sequence.as_slice();
    if k >= s.len() {
        return 0;
    }
    s.iter()
        .zip(&s[k..])
        .map(|(a, b)| (*a as i64) * (*b as i64))
        .sum()
}

/// All autocorrelations `C_1 .. C_{N-1}`.
pub fn autocorrelations(sequence: &Sequence) -> Vec<i64> {
    (1..sequence.len())
        .map(|k| autocorrelation(sequence, k))
        .collect()
}

/// Exact energy of a sequence. O(N²).
pub fn energy(sequence: &Sequence) -> Energy {
    (1..sequence.len())
        .map(|k| {
            let c = autocorrelation(sequence, k);
            (c * c) as Energy
        })
        .sum()
}

/// Energy of raw values; fails with `InvalidInput` on anything outside {+1, -1}.
pub fn energy_of<T>(values: &[T]) -> LabsResult<Energy>
where
    T: Copy + Into<i64>,
{
    Ok(energy(&Sequence::from_values(values)?))
}

/// Merit factor `N² / (2E)`. `None` when the energy is zero.
pub fn merit_factor(sequence: &Sequence) -> Option<f64> {
    let e = energy(sequence);
    if e == 0 {
        return None;
    }
    let n = sequence.len() as f64;
    Some(n * n / (2.0 * e as f64))
}

/// An energy implementation under validation.
///
/// The conformance suite checks any model against the LABS invariants;
/// [`AutocorrelationEnergy`] is the canonical one.
pub trait EnergyModel: Send + Sync {
    /// Name used in reports.
    fn name(&self) -> &str;

    fn energy(&self, sequence: &Sequence) -> Energy;
}

/// The canonical linear-autocorrelation energy.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutocorrelationEnergy;

impl EnergyModel for AutocorrelationEnergy {
    fn name(&self) -> &str {
        "autocorrelation"
    }

    fn energy(&self, sequence: &Sequence) -> Energy {
        energy(sequence)
    }
}

/// Adapts a plain function or closure into an [`EnergyModel`].
pub struct FnModel<F> {
    name: String,
    f: F,
}

impl<F> FnModel<F>
where
    F: Fn(&Sequence) -> Energy + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> EnergyModel for FnModel<F>
where
    F: Fn(&Sequence) -> Energy + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn energy(&self, sequence: &Sequence) -> Energy {
        (self.f)(sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LabsError;

    fn seq(text: &str) -> Sequence {
        text.parse().unwrap()
    }

    #[test]
    fn test_barker_four() {
        assert_eq!(energy_of(&[1i64, 1, 1, -1]).unwrap(), 2);
    }

    #[test]
    fn test_trivial_lengths() {
        assert_eq!(energy(&Sequence::new(vec![]).unwrap()), 0);
        assert_eq!(energy(&seq("+")), 0);
        assert_eq!(energy(&seq("-")), 0);
        assert_eq!(energy(&seq("++")), 1);
    }

    #[test]
    fn test_hand_computed_five() {
        // C = [-2, -1, 2, -1]
        let s = seq("+-++-");
        assert_eq!(autocorrelations(&s), vec![-2, -1, 2, -1]);
        assert_eq!(energy(&s), 10);
    }

    #[test]
    fn test_barker_thirteen() {
        let s = seq("+++++--++-+-+");
        assert_eq!(energy(&s), 6);
        let f = merit_factor(&s).unwrap();
        assert!((f - 169.0 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_autocorrelation_out_of_range_lag() {
        assert_eq!(autocorrelation(&seq("+-+"), 3), 0);
        assert_eq!(autocorrelation(&seq("+-+"), 7), 0);
    }

    #[test]
    fn test_energy_of_rejects_invalid() {
        let err = energy_of(&[1i32, 0, -1]).unwrap_err();
        assert_eq!(err, LabsError::InvalidInput { index: 1, value: 0 });
    }

    #[test]
    fn test_merit_factor_none_for_zero_energy() {
        assert!(merit_factor(&seq("+")).is_none());
    }

    #[test]
    fn test_fn_model() {
        let model = FnModel::new("constant", |_: &Sequence| 42);
        assert_eq!(model.name(), "constant");
        assert_eq!(model.energy(&seq("+-")), 42);
        assert_eq!(AutocorrelationEnergy.energy(&seq("+++-")), 2);
    }
}
