//! Validation run configuration.
//!
//! Every run is driven by an explicit seed so a failing report can be
//! reproduced exactly.

use crate::error::{ValidationError, ValidationResult};
use labs_core::enumerate::MAX_ENUMERABLE_LENGTH;
use labs_core::reference::{rotation_examples, RotationExample};
use labs_core::SpinEncoding;
use serde::{Deserialize, Serialize};

/// Configuration for a validation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Seed for every random draw in the run. Must fit in an `i64`, the
    /// TOML integer range.
    pub seed: u64,

    /// Run reference value checks
    pub run_reference: bool,

    /// Random-sampling mode
    pub sampling: SamplingConfig,

    /// Exhaustive mode
    pub exhaustive: ExhaustiveConfig,

    /// Rotation-based negative checks
    pub negative: NegativeConfig,

    /// Oracle and optimizer cross-validation
    pub cross_validation: CrossValidationConfig,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            seed: 0x1AB5,
            run_reference: true,
            sampling: SamplingConfig::default(),
            exhaustive: ExhaustiveConfig::default(),
            negative: NegativeConfig::default(),
            cross_validation: CrossValidationConfig::default(),
        }
    }
}

impl ValidationConfig {
    /// Small run for quick regression.
    pub fn quick() -> Self {
        Self {
            sampling: SamplingConfig {
                samples_per_length: 10,
                min_length: 3,
                max_length: 6,
            },
            exhaustive: ExhaustiveConfig {
                lengths: vec![3, 4, 5, 6],
            },
            cross_validation: CrossValidationConfig {
                oracle_trials: 10,
                optimizer_trials: 5,
                ground_truth_max_length: 6,
                ..CrossValidationConfig::default()
            },
            ..Self::default()
        }
    }

    /// Broad run: more samples, longer sequences, larger exhaustive sweep.
    pub fn thorough() -> Self {
        Self {
            sampling: SamplingConfig {
                samples_per_length: 200,
                min_length: 1,
                max_length: 64,
            },
            exhaustive: ExhaustiveConfig {
                lengths: (1..=14).collect(),
            },
            cross_validation: CrossValidationConfig {
                oracle_trials: 500,
                optimizer_trials: 100,
                ground_truth_max_length: 12,
                ..CrossValidationConfig::default()
            },
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject configurations that cannot produce a meaningful run.
    pub fn validate(&self) -> ValidationResult<()> {
        if i64::try_from(self.seed).is_err() {
            return Err(ValidationError::InvalidConfiguration(format!(
                "seed {} exceeds the TOML integer range",
                self.seed
            )));
        }

        let s = &self.sampling;
        if s.min_length > s.max_length {
            return Err(ValidationError::InvalidConfiguration(format!(
                "sampling.min_length {} exceeds max_length {}",
                s.min_length, s.max_length
            )));
        }

        if let Some(n) = self
            .exhaustive
            .lengths
            .iter()
            .copied()
            .find(|n| *n > MAX_ENUMERABLE_LENGTH)
        {
            return Err(ValidationError::InvalidConfiguration(format!(
                "exhaustive length {} cannot be enumerated",
                n
            )));
        }

        let cv = &self.cross_validation;
        if cv.sequence_length == 0 {
            return Err(ValidationError::InvalidConfiguration(
                "cross_validation.sequence_length must be positive".to_string(),
            ));
        }
        if cv.ground_truth_max_length > MAX_ENUMERABLE_LENGTH {
            return Err(ValidationError::InvalidConfiguration(format!(
                "cross_validation.ground_truth_max_length {} cannot be enumerated",
                cv.ground_truth_max_length
            )));
        }

        Ok(())
    }

    /// Load configuration from TOML
    pub fn from_toml(content: &str) -> ValidationResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| ValidationError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file
    pub async fn from_file(path: &str) -> ValidationResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ValidationError::Io(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> ValidationResult<String> {
        toml::to_string_pretty(self).map_err(|e| ValidationError::ConfigParse(e.to_string()))
    }
}

/// Random-sampling universe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Sequences drawn for each length
    pub samples_per_length: usize,

    /// Shortest length sampled (inclusive)
    pub min_length: usize,

    /// Longest length sampled (inclusive)
    pub max_length: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            samples_per_length: 50,
            min_length: 1,
            max_length: 32,
        }
    }
}

/// Exhaustive universe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExhaustiveConfig {
    /// Each length is enumerated in full (2^N sequences)
    pub lengths: Vec<usize>,
}

impl Default for ExhaustiveConfig {
    fn default() -> Self {
        Self {
            lengths: (1..=10).collect(),
        }
    }
}

/// Negative (rotation) checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NegativeConfig {
    pub examples: Vec<RotationExample>,
}

impl Default for NegativeConfig {
    fn default() -> Self {
        Self {
            examples: rotation_examples(),
        }
    }
}

/// Cross-validation against external collaborators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossValidationConfig {
    /// Bit/spin convention used when talking to the oracle
    pub encoding: SpinEncoding,

    /// Length of sampled sequences
    pub sequence_length: usize,

    /// Random sequences compared against the oracle
    pub oracle_trials: usize,

    /// Random starts handed to the optimizer
    pub optimizer_trials: usize,

    /// Iteration budget passed to the optimizer
    pub optimizer_budget: usize,

    /// Also check the optimizer's best energy against the oracle
    pub cross_check_optimizer_with_oracle: bool,

    /// Compare optimizer results to exhaustive optima up to this length (0 disables)
    pub ground_truth_max_length: usize,
}

impl Default for CrossValidationConfig {
    fn default() -> Self {
        Self {
            encoding: SpinEncoding::ZeroIsPlus,
            sequence_length: 10,
            oracle_trials: 100,
            optimizer_trials: 20,
            optimizer_budget: 100,
            cross_check_optimizer_with_oracle: true,
            ground_truth_max_length: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ValidationConfig::default();
        assert!(config.run_reference);
        assert_eq!(config.negative.examples.len(), 2);
        assert_eq!(config.cross_validation.sequence_length, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(ValidationConfig::quick().validate().is_ok());
        assert!(ValidationConfig::thorough().validate().is_ok());
        assert!(
            ValidationConfig::quick().sampling.samples_per_length
                < ValidationConfig::thorough().sampling.samples_per_length
        );
    }

    #[test]
    fn test_rejects_inverted_length_range() {
        let mut config = ValidationConfig::default();
        config.sampling.min_length = 9;
        config.sampling.max_length = 3;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_rejects_unenumerable_length() {
        let mut config = ValidationConfig::default();
        config.exhaustive.lengths.push(64);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_seed_outside_toml_range() {
        let config = ValidationConfig::quick().with_seed(u64::MAX);
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidConfiguration(_))
        ));

        let largest = ValidationConfig::quick().with_seed(i64::MAX as u64);
        assert!(largest.validate().is_ok());
        let restored = ValidationConfig::from_toml(&largest.to_toml().unwrap()).unwrap();
        assert_eq!(restored.seed, i64::MAX as u64);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ValidationConfig::quick().with_seed(99);
        let text = config.to_toml().unwrap();
        let restored = ValidationConfig::from_toml(&text).unwrap();
        assert_eq!(restored.seed, 99);
        assert_eq!(restored.exhaustive.lengths, vec![3, 4, 5, 6]);
        assert_eq!(restored.negative.examples, config.negative.examples);
        assert_eq!(restored.cross_validation.encoding, SpinEncoding::ZeroIsPlus);
    }

    #[test]
    fn test_from_toml_reports_parse_errors() {
        assert!(matches!(
            ValidationConfig::from_toml("seed = \"nope\""),
            Err(ValidationError::ConfigParse(_))
        ));
    }

    #[tokio::test]
    async fn test_from_file_missing() {
        let result = ValidationConfig::from_file("/nonexistent/labs.toml").await;
        assert!(matches!(result, Err(ValidationError::Io(_))));
    }
}
