//! Validation framework

use crate::collaborators::{EnergyOracle, Optimizer};
use crate::config::ValidationConfig;
use crate::cross_validation::CrossValidator;
use crate::error::ValidationResult;
use crate::invariants::InvariantSuite;
use crate::reports::{TestCategory, TestResult, ValidationReport};
use labs_core::{AutocorrelationEnergy, EnergyModel};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Instant;

/// Validation runner
pub struct ValidationRunner {
    config: ValidationConfig,
    model: Arc<dyn EnergyModel>,
}

impl ValidationRunner {
    /// Create a runner over the autocorrelation energy
    pub fn new(config: ValidationConfig) -> ValidationResult<Self> {
        Self::with_model(config, Arc::new(AutocorrelationEnergy))
    }

    /// Create a runner over a custom energy model
    pub fn with_model(
        config: ValidationConfig,
        model: Arc<dyn EnergyModel>,
    ) -> ValidationResult<Self> {
        config.validate()?;
        Ok(Self { config, model })
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    pub fn model(&self) -> &dyn EnergyModel {
        self.model.as_ref()
    }

    /// Run the invariant suite only, seeded from the configuration.
    pub fn run_invariants(&self) -> ValidationReport {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let start = Instant::now();
        let mut report = ValidationReport::new(self.model.name(), self.config.seed);
        self.run_invariants_with_rng(&mut report, &mut rng);
        report.duration = start.elapsed();
        report.finalize();
        report
    }

    /// Run the invariant suite, appending to `report`.
    pub fn run_invariants_with_rng<R: Rng + ?Sized>(
        &self,
        report: &mut ValidationReport,
        rng: &mut R,
    ) {
        let suite = InvariantSuite::with_model(Arc::clone(&self.model));

        if self.config.run_reference {
            tracing::info!("Running reference checks...");
            report.add_results(TestCategory::Reference, suite.run_reference());
        }

        tracing::info!(
            min = self.config.sampling.min_length,
            max = self.config.sampling.max_length,
            samples = self.config.sampling.samples_per_length,
            "Running random-sampling checks..."
        );
        report.add_results(
            TestCategory::Symmetry,
            suite.run_random(&self.config.sampling, rng),
        );
        report.add_results(
            TestCategory::Orbit,
            suite.run_random_orbits(&self.config.sampling, rng),
        );

        for &length in &self.config.exhaustive.lengths {
            tracing::info!(length, "Running exhaustive checks...");
            for (category, result) in suite.run_exhaustive(length) {
                report.add_results(category, vec![result]);
            }
        }

        tracing::info!("Running negative checks...");
        report.add_results(
            TestCategory::Negative,
            suite.run_negative(&self.config.negative.examples),
        );
    }

    /// Run the invariant suite and, when collaborators are supplied, the
    /// cross-validation checks. Missing collaborators are reported as skipped.
    pub async fn run(
        &self,
        oracle: Option<Arc<dyn EnergyOracle>>,
        optimizer: Option<Arc<dyn Optimizer>>,
    ) -> ValidationReport {
        let start = Instant::now();
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut report = ValidationReport::new(self.model.name(), self.config.seed);

        tracing::info!(
            model = self.model.name(),
            seed = self.config.seed,
            "Starting LABS validation"
        );

        self.run_invariants_with_rng(&mut report, &mut rng);

        tracing::info!("Running cross-validation...");
        let validator = CrossValidator::with_model(
            self.config.cross_validation.clone(),
            Arc::clone(&self.model),
        );
        let mut results = Vec::new();

        match &oracle {
            Some(oracle) => {
                results.push(validator.validate_oracle(oracle.as_ref(), &mut rng).await)
            }
            None => results.push(TestResult::skipped(
                "oracle_agreement",
                "No oracle supplied",
            )),
        }

        match &optimizer {
            Some(optimizer) => {
                let oracle = oracle.as_deref();
                results.push(
                    validator
                        .validate_optimizer(optimizer.as_ref(), oracle, &mut rng)
                        .await,
                );
                results.push(
                    validator
                        .validate_ground_truth(optimizer.as_ref(), &mut rng)
                        .await,
                );
            }
            None => {
                results.push(TestResult::skipped(
                    "optimizer_contract",
                    "No optimizer supplied",
                ));
                results.push(TestResult::skipped(
                    "optimizer_ground_truth",
                    "No optimizer supplied",
                ));
            }
        }

        report.add_results(TestCategory::CrossValidation, results);

        report.duration = start.elapsed();
        report.finalize();

        tracing::info!(
            "Validation complete: {} passed, {} failed, {} skipped",
            report.passed_count(),
            report.failed_count(),
            report.skipped_count()
        );

        report
    }
}
