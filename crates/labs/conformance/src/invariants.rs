//! LABS invariant checks and the suite that runs them.
//!
//! Positive checks assert the energy is unchanged by every element of the
//! symmetry group. The negative check asserts that a cyclic rotation *does*
//! change the energy on known examples, which catches implementations that
//! use cyclic instead of linear autocorrelation. Rotation equality is not
//! impossible in general, so it is reported as a warning.

use crate::config::SamplingConfig;
use crate::findings::Finding;
use crate::reports::{TestCategory, TestResult};
use labs_core::reference::{known_optimum, reference_sequences, RotationExample};
use labs_core::{
    enumerate_with, merit_factor, orbit, rotate, AutocorrelationEnergy, Energy, EnergyModel,
    Enumeration, Sequence, Symmetry,
};
use rand::Rng;
use std::sync::Arc;
use std::time::Instant;

/// Assert `E(s) == E(g(s))`.
pub fn check_symmetry(
    model: &dyn EnergyModel,
    sequence: &Sequence,
    transform: Symmetry,
) -> Result<(), Finding> {
    let energy = model.energy(sequence);
    check_against(model, sequence, transform, energy)
}

fn check_against(
    model: &dyn EnergyModel,
    sequence: &Sequence,
    transform: Symmetry,
    energy: Energy,
) -> Result<(), Finding> {
    let transformed_energy = model.energy(&transform.apply(sequence));
    if transformed_energy == energy {
        Ok(())
    } else {
        Err(Finding::InvariantViolation {
            sequence: sequence.clone(),
            transform,
            energy,
            transformed_energy,
        })
    }
}

pub fn check_flip(model: &dyn EnergyModel, sequence: &Sequence) -> Result<(), Finding> {
    check_symmetry(model, sequence, Symmetry::Flip)
}

pub fn check_reversal(model: &dyn EnergyModel, sequence: &Sequence) -> Result<(), Finding> {
    check_symmetry(model, sequence, Symmetry::Reverse)
}

pub fn check_flip_reverse(model: &dyn EnergyModel, sequence: &Sequence) -> Result<(), Finding> {
    check_symmetry(model, sequence, Symmetry::FlipReverse)
}

/// All three positive checks; stops at the first violation.
pub fn check_symmetries(model: &dyn EnergyModel, sequence: &Sequence) -> Result<(), Finding> {
    let energy = model.energy(sequence);
    for transform in Symmetry::NON_TRIVIAL {
        check_against(model, sequence, transform, energy)?;
    }
    Ok(())
}

/// The orbit has 1, 2 or 4 members and all share the energy of `sequence`.
pub fn check_orbit(model: &dyn EnergyModel, sequence: &Sequence) -> Result<(), Finding> {
    let members = orbit(sequence);
    let energy = model.energy(sequence);

    let size_ok = match members.len() {
        1 => sequence.is_empty(),
        2 | 4 => true,
        _ => false,
    };
    if !size_ok || !members.contains(sequence) {
        return Err(Finding::OrbitViolation {
            sequence: sequence.clone(),
            orbit_size: members.len(),
            member: None,
            energy,
            member_energy: None,
        });
    }

    for member in members.iter() {
        let member_energy = model.energy(member);
        if member_energy != energy {
            return Err(Finding::OrbitViolation {
                sequence: sequence.clone(),
                orbit_size: members.len(),
                member: Some(member.clone()),
                energy,
                member_energy: Some(member_energy),
            });
        }
    }
    Ok(())
}

/// Negative check: `None` when rotation changed the energy as expected.
pub fn check_rotation(
    model: &dyn EnergyModel,
    sequence: &Sequence,
    rotation: isize,
) -> Option<Finding> {
    let energy = model.energy(sequence);
    if model.energy(&rotate(sequence, rotation)) == energy {
        Some(Finding::NegativeCheckAnomaly {
            sequence: sequence.clone(),
            rotation,
            energy,
        })
    } else {
        None
    }
}

/// Runs invariant checks for one energy model.
pub struct InvariantSuite {
    model: Arc<dyn EnergyModel>,
}

impl InvariantSuite {
    /// Suite over the canonical autocorrelation energy
    pub fn new() -> Self {
        Self::with_model(Arc::new(AutocorrelationEnergy))
    }

    /// Suite over any energy model
    pub fn with_model(model: Arc<dyn EnergyModel>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &dyn EnergyModel {
        self.model.as_ref()
    }

    /// Reference values: degenerate lengths and Barker codes.
    pub fn run_reference(&self) -> Vec<TestResult> {
        reference_sequences()
            .into_iter()
            .map(|reference| {
                let start = Instant::now();
                let name = format!("reference_{}", reference.label);
                let actual = self.model.energy(&reference.sequence);

                let findings = if actual == reference.energy {
                    Vec::new()
                } else {
                    vec![Finding::ReferenceMismatch {
                        label: reference.label.clone(),
                        sequence: Some(reference.sequence.clone()),
                        expected: reference.energy,
                        actual: Some(actual),
                    }]
                };

                let mut result = TestResult::from_findings(name, 1, findings, start.elapsed());
                result.add_detail("sequence", reference.sequence.to_string());
                result
            })
            .collect()
    }

    /// Random-sampling mode: positive checks on `samples_per_length`
    /// sequences for every configured length.
    pub fn run_random<R: Rng + ?Sized>(
        &self,
        sampling: &SamplingConfig,
        rng: &mut R,
    ) -> Vec<TestResult> {
        (sampling.min_length..=sampling.max_length)
            .map(|n| {
                let samples: Vec<Sequence> = (0..sampling.samples_per_length)
                    .map(|_| Sequence::random(n, rng))
                    .collect();
                self.run_universe(format!("symmetry_random_n{}", n), &samples, |s| {
                    check_symmetries(self.model(), s)
                })
            })
            .collect()
    }

    /// Random-sampling mode for orbits.
    pub fn run_random_orbits<R: Rng + ?Sized>(
        &self,
        sampling: &SamplingConfig,
        rng: &mut R,
    ) -> Vec<TestResult> {
        (sampling.min_length..=sampling.max_length)
            .map(|n| {
                let samples: Vec<Sequence> = (0..sampling.samples_per_length)
                    .map(|_| Sequence::random(n, rng))
                    .collect();
                self.run_universe(format!("orbit_random_n{}", n), &samples, |s| {
                    check_orbit(self.model(), s)
                })
            })
            .collect()
    }

    /// Exhaustive mode for one length: the enumeration contract, the known
    /// optimum, and positive and orbit checks over every sequence.
    ///
    /// Cost is exponential in `length`.
    pub fn run_exhaustive(&self, length: usize) -> Vec<(TestCategory, TestResult)> {
        let start = Instant::now();
        let enumeration = match enumerate_with(length, self.model()) {
            Ok(e) => e,
            Err(e) => {
                let finding = Finding::InvalidInput {
                    context: format!("enumeration of N={}", length),
                    reason: e.to_string(),
                };
                return vec![(
                    TestCategory::Enumeration,
                    TestResult::from_findings(
                        format!("enumeration_n{}", length),
                        0,
                        vec![finding],
                        start.elapsed(),
                    ),
                )];
            }
        };

        let mut enumeration_result = TestResult::from_findings(
            format!("enumeration_n{}", length),
            enumeration.len(),
            check_enumeration(&enumeration),
            start.elapsed(),
        );
        if let Some(best) = enumeration.best_energy() {
            enumeration_result.add_detail("best_energy", best.to_string());
        }
        enumeration_result.add_detail(
            "ground_states",
            enumeration.ground_states().len().to_string(),
        );

        let mut results = vec![(TestCategory::Enumeration, enumeration_result)];

        if let Some(optimum) = known_optimum(length) {
            results.push((TestCategory::Reference, check_known_optimum(&enumeration)));
            tracing::debug!(length, optimum = optimum.energy, "checked known optimum");
        }

        let universe: Vec<Sequence> = enumeration.iter().map(|(s, _)| s.clone()).collect();
        results.push((
            TestCategory::Symmetry,
            self.run_universe(format!("symmetry_exhaustive_n{}", length), &universe, |s| {
                check_symmetries(self.model(), s)
            }),
        ));
        results.push((
            TestCategory::Orbit,
            self.run_universe(format!("orbit_exhaustive_n{}", length), &universe, |s| {
                check_orbit(self.model(), s)
            }),
        ));

        results
    }

    /// Negative checks on known (sequence, rotation) examples.
    pub fn run_negative(&self, examples: &[RotationExample]) -> Vec<TestResult> {
        examples
            .iter()
            .map(|example| {
                let start = Instant::now();
                let name = format!("rotation_{}_r{}", example.sequence, example.rotation);
                let n = example.sequence.len() as isize;

                let finding = if n < 2 || example.rotation.rem_euclid(n) == 0 {
                    Some(Finding::InvalidInput {
                        context: name.clone(),
                        reason: format!(
                            "rotation {} is trivial for length {}",
                            example.rotation, n
                        ),
                    })
                } else {
                    check_rotation(self.model(), &example.sequence, example.rotation)
                };

                if let Some(f) = &finding {
                    tracing::warn!(test = %name, "{}", f);
                }

                let findings = finding.into_iter().collect();
                let mut result = TestResult::from_findings(name, 1, findings, start.elapsed());
                result.add_detail("sequence", example.sequence.to_string());
                result.add_detail("rotation", example.rotation.to_string());
                result
            })
            .collect()
    }

    /// Run `check` over `universe`, aborting the test at the first failure.
    fn run_universe<F>(&self, name: String, universe: &[Sequence], check: F) -> TestResult
    where
        F: Fn(&Sequence) -> Result<(), Finding>,
    {
        let start = Instant::now();
        let mut checked = 0;
        let mut findings = Vec::new();

        for sequence in universe {
            checked += 1;
            if let Err(finding) = check(sequence) {
                tracing::warn!(test = %name, "{}", finding);
                findings.push(finding);
                break;
            }
        }

        tracing::debug!(test = %name, checked, "universe checked");
        TestResult::from_findings(name, checked, findings, start.elapsed())
    }
}

impl Default for InvariantSuite {
    fn default() -> Self {
        Self::new()
    }
}

/// Contract of an enumeration result: 2^N distinct entries, sorted, first is minimal.
pub fn check_enumeration(enumeration: &Enumeration) -> Vec<Finding> {
    let length = enumeration.length();
    let mut findings = Vec::new();

    let expected = 1usize << length;
    if enumeration.len() != expected {
        findings.push(Finding::EnumerationViolation {
            length,
            reason: format!("expected {} entries, got {}", expected, enumeration.len()),
        });
    }

    if let Some(i) = enumeration
        .entries()
        .windows(2)
        .position(|w| w[0].1 > w[1].1)
    {
        findings.push(Finding::EnumerationViolation {
            length,
            reason: format!("not sorted by energy at position {}", i),
        });
    }

    let min = enumeration.iter().map(|(_, e)| *e).min();
    if enumeration.best_energy() != min {
        findings.push(Finding::EnumerationViolation {
            length,
            reason: format!(
                "first energy {:?} is not the minimum {:?}",
                enumeration.best_energy(),
                min
            ),
        });
    }

    let distinct: std::collections::BTreeSet<&Sequence> =
        enumeration.iter().map(|(s, _)| s).collect();
    if distinct.len() != enumeration.len() {
        findings.push(Finding::EnumerationViolation {
            length,
            reason: format!(
                "{} duplicate sequences",
                enumeration.len() - distinct.len()
            ),
        });
    }

    if let Some((s, _)) = enumeration.iter().find(|(s, _)| s.len() != length) {
        findings.push(Finding::EnumerationViolation {
            length,
            reason: format!("sequence {} has length {}", s, s.len()),
        });
    }

    findings
}

/// Minimum of an enumeration against the published optimum.
fn check_known_optimum(enumeration: &Enumeration) -> TestResult {
    let start = Instant::now();
    let length = enumeration.length();
    let name = format!("optimum_n{}", length);

    let Some(optimum) = known_optimum(length) else {
        return TestResult::skipped(name, format!("no published optimum for N={}", length));
    };

    let actual = enumeration.best_energy();
    let findings = if actual == Some(optimum.energy) {
        Vec::new()
    } else {
        vec![Finding::ReferenceMismatch {
            label: name.clone(),
            sequence: enumeration.best().map(|(s, _)| s.clone()),
            expected: optimum.energy,
            actual,
        }]
    };

    let mut result = TestResult::from_findings(name, 1, findings, start.elapsed());
    if let Some((best, _)) = enumeration.best() {
        result.add_detail("best_sequence", best.to_string());
        if let Some(f) = merit_factor(best) {
            result.add_detail("best_merit_factor", format!("{:.3}", f));
        }
    }
    result
}
