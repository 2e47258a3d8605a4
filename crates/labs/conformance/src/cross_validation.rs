//! Cross-validation of the classical energy against external collaborators.
//!
//! The harness owns a single fixed [`SpinEncoding`](labs_core::SpinEncoding)
//! and records it in every mismatch, so a sign-convention error can be told
//! apart from a real computation bug. Each collaborator call is awaited on
//! its own; errors become findings and the remaining trials still run.

use crate::collaborators::{EnergyOracle, Optimizer};
use crate::config::CrossValidationConfig;
use crate::findings::{Finding, MismatchSource};
use crate::reports::TestResult;
use labs_core::{enumerate_with, merit_factor, AutocorrelationEnergy, EnergyModel, Sequence};
use rand::Rng;
use std::sync::Arc;
use std::time::Instant;

/// Compares an energy model against an oracle and an optimizer.
pub struct CrossValidator {
    config: CrossValidationConfig,
    model: Arc<dyn EnergyModel>,
}

impl CrossValidator {
    pub fn new(config: CrossValidationConfig) -> Self {
        Self::with_model(config, Arc::new(AutocorrelationEnergy))
    }

    pub fn with_model(config: CrossValidationConfig, model: Arc<dyn EnergyModel>) -> Self {
        Self { config, model }
    }

    pub fn config(&self) -> &CrossValidationConfig {
        &self.config
    }

    /// `energy(s) == oracle_energy(encode(s))` on `oracle_trials` random sequences.
    pub async fn validate_oracle<R>(&self, oracle: &dyn EnergyOracle, rng: &mut R) -> TestResult
    where
        R: Rng + Send + ?Sized,
    {
        let start = Instant::now();
        let encoding = self.config.encoding;
        let trials = self.config.oracle_trials;
        let mut findings = Vec::new();
        let mut agreed = 0usize;

        tracing::info!(
            oracle = oracle.name(),
            trials,
            length = self.config.sequence_length,
            %encoding,
            "validating oracle agreement"
        );

        for trial in 0..trials {
            let sequence = Sequence::random(self.config.sequence_length, rng);
            let classical = self.model.energy(&sequence);
            let bits = encoding.encode(&sequence);

            match oracle.oracle_energy(&bits).await {
                Ok(reported) if reported == classical as i64 => agreed += 1,
                Ok(reported) => {
                    let finding = Finding::CrossValidationMismatch {
                        source: MismatchSource::OracleVsClassical,
                        sequence,
                        bits: Some(bits),
                        encoding,
                        expected: classical as i64,
                        actual: reported,
                    };
                    tracing::warn!(trial, "{}", finding);
                    findings.push(finding);
                }
                Err(e) => {
                    tracing::warn!(trial, error = %e, "oracle call failed");
                    findings.push(Finding::CollaboratorFailure {
                        collaborator: oracle.name().to_string(),
                        operation: "oracle_energy".to_string(),
                        sequence: Some(sequence),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let mut result =
            TestResult::from_findings("oracle_agreement", trials, findings, start.elapsed());
        result.add_detail("oracle", oracle.name());
        result.add_detail("encoding", encoding.to_string());
        result.add_detail("oracle_encoding", oracle.encoding().to_string());
        result.add_detail("agreed", agreed.to_string());
        if oracle.encoding() != encoding {
            result.add_warning(format!(
                "oracle documents encoding {} but harness encodes with {}",
                oracle.encoding(),
                encoding
            ));
        }
        result
    }

    /// Optimizer contract on `optimizer_trials` random starts: the reported
    /// energy matches its sequence, never exceeds the start energy, and
    /// (optionally) matches the oracle.
    pub async fn validate_optimizer<R>(
        &self,
        optimizer: &dyn Optimizer,
        oracle: Option<&dyn EnergyOracle>,
        rng: &mut R,
    ) -> TestResult
    where
        R: Rng + Send + ?Sized,
    {
        let start = Instant::now();
        let encoding = self.config.encoding;
        let trials = self.config.optimizer_trials;
        let budget = self.config.optimizer_budget;
        let oracle = oracle.filter(|_| self.config.cross_check_optimizer_with_oracle);
        let mut findings = Vec::new();
        let mut improved = 0usize;
        let mut total_reduction = 0u64;
        let mut best_merit: Option<f64> = None;

        tracing::info!(
            optimizer = optimizer.name(),
            trials,
            budget,
            "validating optimizer"
        );

        for trial in 0..trials {
            let initial = Sequence::random(self.config.sequence_length, rng);
            let initial_energy = self.model.energy(&initial);

            let outcome = match optimizer.optimize(&initial, budget).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::warn!(trial, error = %e, "optimizer call failed");
                    findings.push(Finding::CollaboratorFailure {
                        collaborator: optimizer.name().to_string(),
                        operation: "optimize".to_string(),
                        sequence: Some(initial),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            if outcome.best.len() != initial.len() {
                findings.push(Finding::InvalidInput {
                    context: format!("{} outcome", optimizer.name()),
                    reason: format!(
                        "returned length {} for input length {}",
                        outcome.best.len(),
                        initial.len()
                    ),
                });
                continue;
            }

            let recomputed = self.model.energy(&outcome.best);
            let reported = outcome.best_energy;
            if let Some(f) = merit_factor(&outcome.best) {
                best_merit = Some(best_merit.map_or(f, |m| m.max(f)));
            }

            if reported != recomputed as i64 {
                findings.push(Finding::CrossValidationMismatch {
                    source: MismatchSource::OptimizerVsRecomputed,
                    sequence: outcome.best.clone(),
                    bits: None,
                    encoding,
                    expected: recomputed as i64,
                    actual: reported,
                });
            }

            if reported > initial_energy as i64 || recomputed > initial_energy {
                let finding = Finding::OptimizerRegression {
                    initial: initial.clone(),
                    initial_energy,
                    best: outcome.best.clone(),
                    reported_energy: reported,
                    recomputed_energy: recomputed,
                };
                tracing::warn!(trial, "{}", finding);
                findings.push(finding);
            } else if recomputed < initial_energy {
                improved += 1;
                total_reduction += initial_energy - recomputed;
            }

            if let Some(oracle) = oracle {
                let bits = encoding.encode(&outcome.best);
                match oracle.oracle_energy(&bits).await {
                    Ok(measured) if measured == reported => {}
                    Ok(measured) => findings.push(Finding::CrossValidationMismatch {
                        source: MismatchSource::OptimizerVsOracle,
                        sequence: outcome.best.clone(),
                        bits: Some(bits),
                        encoding,
                        expected: measured,
                        actual: reported,
                    }),
                    Err(e) => findings.push(Finding::CollaboratorFailure {
                        collaborator: oracle.name().to_string(),
                        operation: "oracle_energy".to_string(),
                        sequence: Some(outcome.best.clone()),
                        reason: e.to_string(),
                    }),
                }
            }
        }

        let mut result =
            TestResult::from_findings("optimizer_contract", trials, findings, start.elapsed());
        result.add_detail("optimizer", optimizer.name());
        result.add_detail("budget", budget.to_string());
        result.add_detail("improved", improved.to_string());
        result.add_detail("total_reduction", total_reduction.to_string());
        if let Some(f) = best_merit {
            result.add_detail("best_merit_factor", format!("{:.3}", f));
        }
        if self.config.cross_check_optimizer_with_oracle && oracle.is_none() {
            result.add_warning("no oracle supplied; end-to-end optimizer check skipped");
        }
        result
    }

    /// For every length up to `ground_truth_max_length`, the optimizer must
    /// not report an energy below the exhaustive optimum. Records the gap.
    ///
    /// Enumerates 2^N sequences per length.
    pub async fn validate_ground_truth<R>(
        &self,
        optimizer: &dyn Optimizer,
        rng: &mut R,
    ) -> TestResult
    where
        R: Rng + Send + ?Sized,
    {
        let max_length = self.config.ground_truth_max_length;
        if max_length < 2 {
            return TestResult::skipped(
                "optimizer_ground_truth",
                "ground truth comparison disabled",
            );
        }

        let start = Instant::now();
        let budget = self.config.optimizer_budget;
        let mut findings = Vec::new();
        let mut gaps = Vec::new();
        let mut checks = 0;

        for length in 2..=max_length {
            let optimum = match enumerate_with(length, self.model.as_ref()) {
                Ok(e) => e.best_energy().unwrap_or(0),
                Err(e) => {
                    findings.push(Finding::InvalidInput {
                        context: format!("ground truth N={}", length),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let initial = Sequence::random(length, rng);
            checks += 1;
            match optimizer.optimize(&initial, budget).await {
                Ok(outcome) => {
                    if outcome.best_energy < optimum as i64 {
                        findings.push(Finding::CrossValidationMismatch {
                            source: MismatchSource::OptimizerVsGroundTruth,
                            sequence: outcome.best,
                            bits: None,
                            encoding: self.config.encoding,
                            expected: optimum as i64,
                            actual: outcome.best_energy,
                        });
                    } else {
                        gaps.push(format!("N={}:{}", length, outcome.best_energy - optimum as i64));
                    }
                }
                Err(e) => findings.push(Finding::CollaboratorFailure {
                    collaborator: optimizer.name().to_string(),
                    operation: "optimize".to_string(),
                    sequence: Some(initial),
                    reason: e.to_string(),
                }),
            }
        }

        let mut result =
            TestResult::from_findings("optimizer_ground_truth", checks, findings, start.elapsed());
        result.add_detail("optimizer", optimizer.name());
        result.add_detail("gaps", gaps.join(" "));
        result
    }
}
