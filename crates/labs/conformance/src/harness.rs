//! Test harness for running validation in downstream test suites

use crate::collaborators::{EnergyOracle, Optimizer};
use crate::config::ValidationConfig;
use crate::error::ValidationResult;
use crate::framework::ValidationRunner;
use crate::reports::ValidationReport;
use labs_core::EnergyModel;
use std::sync::Arc;

/// Test harness for LABS validation
pub struct TestHarness {
    config: ValidationConfig,
    oracle: Option<Arc<dyn EnergyOracle>>,
    optimizer: Option<Arc<dyn Optimizer>>,
}

impl TestHarness {
    /// Create a new test harness with default configuration
    pub fn new() -> Self {
        Self::with_config(ValidationConfig::default())
    }

    /// Create a test harness with custom configuration
    pub fn with_config(config: ValidationConfig) -> Self {
        Self {
            config,
            oracle: None,
            optimizer: None,
        }
    }

    pub fn with_oracle(mut self, oracle: Arc<dyn EnergyOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    pub fn with_optimizer(mut self, optimizer: Arc<dyn Optimizer>) -> Self {
        self.optimizer = Some(optimizer);
        self
    }

    /// Run validation of `model` and return the report
    pub async fn run(&self, model: Arc<dyn EnergyModel>) -> ValidationResult<ValidationReport> {
        let runner = ValidationRunner::with_model(self.config.clone(), model)?;
        Ok(runner.run(self.oracle.clone(), self.optimizer.clone()).await)
    }

    /// Run validation and panic with the full report if it is not valid
    pub async fn assert_valid(&self, model: Arc<dyn EnergyModel>) {
        let report = match self.run(model).await {
            Ok(report) => report,
            Err(e) => panic!("validation could not start: {}", e),
        };

        if !report.is_valid() {
            panic!(
                "Energy model '{}' failed validation:\n{}",
                report.model_name,
                report.to_text()
            );
        }
    }

    /// Run validation for several models
    pub async fn run_all(
        &self,
        models: Vec<Arc<dyn EnergyModel>>,
    ) -> ValidationResult<Vec<ValidationReport>> {
        let mut reports = Vec::new();

        for model in models {
            reports.push(self.run(model).await?);
        }

        Ok(reports)
    }

    /// Run validation for several models and return whether all are valid
    pub async fn check_all_valid(
        &self,
        models: Vec<Arc<dyn EnergyModel>>,
    ) -> ValidationResult<(bool, Vec<ValidationReport>)> {
        let reports = self.run_all(models).await?;
        let all_valid = reports.iter().all(|r| r.is_valid());
        Ok((all_valid, reports))
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
