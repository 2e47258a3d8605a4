//! LABS Validation Suite
//!
//! Property-based and exhaustive checks that an energy model behaves like
//! the LABS energy, plus a harness that cross-validates it against external
//! collaborators.
//!
//! # Check Categories
//!
//! - **Reference**: degenerate lengths, Barker codes, tabulated optima
//! - **Enumeration**: the exhaustive ranking contract for a length
//! - **Symmetry**: flip, reversal and flip+reversal leave the energy unchanged
//! - **Orbit**: every member of a symmetry orbit shares one energy
//! - **Negative**: cyclic rotation must change the energy on known examples
//!   (reported as a warning, never a failure)
//! - **Cross-validation**: agreement with an [`EnergyOracle`] and the
//!   contract of an [`Optimizer`]
//!
//! Every random draw comes from one seeded generator, so a report is
//! reproducible from its seed.
//!
//! # Example
//!
//! ```rust,ignore
//! use labs_conformance::{HamiltonianOracle, ValidationConfig, ValidationRunner};
//! use std::sync::Arc;
//!
//! let runner = ValidationRunner::new(ValidationConfig::quick())?;
//! let report = runner.run(Some(Arc::new(HamiltonianOracle::new())), None).await;
//! println!("{}", report.to_text());
//! ```

pub mod collaborators;
pub mod config;
pub mod cross_validation;
pub mod error;
pub mod findings;
pub mod framework;
pub mod harness;
pub mod invariants;
pub mod oracle;
pub mod reports;

pub use collaborators::{CollaboratorError, EnergyOracle, Optimizer, OptimizerOutcome};
pub use config::{
    CrossValidationConfig, ExhaustiveConfig, NegativeConfig, SamplingConfig, ValidationConfig,
};
pub use cross_validation::CrossValidator;
pub use error::{ValidationError, ValidationResult};
pub use findings::{Finding, MismatchSource, Severity};
pub use framework::ValidationRunner;
pub use harness::TestHarness;
pub use invariants::InvariantSuite;
pub use oracle::{HamiltonianOracle, LabsHamiltonian, PauliTerm};
pub use reports::{ReportSummary, TestCategory, TestResult, TestStatus, ValidationReport};
