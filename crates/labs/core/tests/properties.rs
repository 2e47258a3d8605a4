//! Property tests: energy is invariant under the LABS symmetry group.

use labs_core::*;
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

/// Generate a random sequence of length `min..max`.
fn arb_sequence(min: usize, max: usize) -> impl Strategy<Value = Sequence> {
    prop::collection::vec(prop_oneof![Just(1i8), Just(-1i8)], min..max)
        .prop_map(|spins| Sequence::new(spins).expect("strategy only yields spins"))
}

/// Cyclic autocorrelation, the classic mistake the negative check guards against.
fn cyclic_energy(s: &Sequence) -> Energy {
    let v = s.as_slice();
    let n = v.len();
    (1..n)
        .map(|k| {
            let c: i64 = (0..n).map(|i| (v[i] * v[(i + k) % n]) as i64).sum();
            (c * c) as Energy
        })
        .sum()
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// E(s) = E(-s) = E(rev s) = E(-rev s).
    #[test]
    fn energy_invariant_under_group(s in arb_sequence(0, 40)) {
        let e = energy(&s);
        for g in Symmetry::ALL {
            prop_assert_eq!(energy(&g.apply(&s)), e, "transform {}", g);
        }
    }

    /// Orbits have 1, 2 or 4 members, all at the same energy.
    #[test]
    fn orbit_size_and_energy(s in arb_sequence(0, 24)) {
        let o = orbit(&s);
        prop_assert!(matches!(o.len(), 1 | 2 | 4));
        prop_assert!(o.contains(&s));
        let e = energy(&s);
        prop_assert!(o.iter().all(|m| energy(m) == e));
    }

    /// Only the empty sequence has a singleton orbit.
    #[test]
    fn non_empty_orbits_have_at_least_two_members(s in arb_sequence(1, 24)) {
        prop_assert!(orbit(&s).len() >= 2);
    }

    /// Rotating by N is the identity; rotating right then left restores.
    #[test]
    fn rotation_wraps(s in arb_sequence(1, 30), r in -50isize..50) {
        prop_assert_eq!(rotate(&s, s.len() as isize), s.clone());
        prop_assert_eq!(rotate(&rotate(&s, r), -r), s);
    }

    /// Cyclic energy is rotation invariant; linear energy is the one under test.
    #[test]
    fn cyclic_energy_is_rotation_invariant(s in arb_sequence(2, 20), r in 1isize..20) {
        prop_assert_eq!(cyclic_energy(&rotate(&s, r)), cyclic_energy(&s));
    }

    /// Energy equals the sum of squared autocorrelations and is reached from raw values.
    #[test]
    fn energy_matches_autocorrelations(s in arb_sequence(0, 40)) {
        let from_lags: i64 = autocorrelations(&s).iter().map(|c| c * c).sum();
        prop_assert_eq!(energy(&s), from_lags as Energy);
        let raw: Vec<i64> = s.iter().map(i64::from).collect();
        prop_assert_eq!(energy_of(&raw).unwrap(), energy(&s));
    }

    /// Encoding then decoding with the same convention is lossless.
    #[test]
    fn encoding_is_a_bijection(s in arb_sequence(0, 40), zero_is_plus in any::<bool>()) {
        let encoding = if zero_is_plus {
            SpinEncoding::ZeroIsPlus
        } else {
            SpinEncoding::ZeroIsMinus
        };
        let bits = encoding.encode(&s);
        prop_assert_eq!(encoding.decode_exact(&bits, s.len()).unwrap(), s);
    }
}
