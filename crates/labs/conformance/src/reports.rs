//! Validation reporting

use crate::findings::{Finding, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use uuid::Uuid;

/// Test status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
}

/// Test category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestCategory {
    Reference,
    Enumeration,
    Symmetry,
    Orbit,
    Negative,
    CrossValidation,
}

impl TestCategory {
    pub const ALL: [TestCategory; 6] = [
        TestCategory::Reference,
        TestCategory::Enumeration,
        TestCategory::Symmetry,
        TestCategory::Orbit,
        TestCategory::Negative,
        TestCategory::CrossValidation,
    ];

    fn order(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(usize::MAX)
    }
}

impl std::fmt::Display for TestCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestCategory::Reference => write!(f, "Reference"),
            TestCategory::Enumeration => write!(f, "Enumeration"),
            TestCategory::Symmetry => write!(f, "Symmetry"),
            TestCategory::Orbit => write!(f, "Orbit"),
            TestCategory::Negative => write!(f, "Negative"),
            TestCategory::CrossValidation => write!(f, "Cross-Validation"),
        }
    }
}

/// Individual test result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub status: TestStatus,
    pub duration: Duration,
    /// Number of sequences or trials the test evaluated.
    pub checks: usize,
    pub error: Option<String>,
    pub warnings: Vec<String>,
    pub findings: Vec<Finding>,
    pub details: HashMap<String, String>,
}

impl TestResult {
    /// Create a passed test result
    pub fn passed(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Passed,
            duration,
            checks: 0,
            error: None,
            warnings: Vec::new(),
            findings: Vec::new(),
            details: HashMap::new(),
        }
    }

    /// Create a skipped test result
    pub fn skipped(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Skipped,
            duration: Duration::ZERO,
            checks: 0,
            error: None,
            warnings: vec![reason.into()],
            findings: Vec::new(),
            details: HashMap::new(),
        }
    }

    /// Build a result from the findings of a run: failed if any is an error.
    pub fn from_findings(
        name: impl Into<String>,
        checks: usize,
        findings: Vec<Finding>,
        duration: Duration,
    ) -> Self {
        let mut result = Self::passed(name, duration);
        result.checks = checks;
        for finding in findings {
            result.add_finding(finding);
        }
        result
    }

    /// Record a finding. Errors fail the test; warnings are noted.
    pub fn add_finding(&mut self, finding: Finding) {
        match finding.severity() {
            Severity::Error => {
                self.status = TestStatus::Failed;
                let errors = self.error_count() + 1;
                self.error = Some(if errors == 1 {
                    finding.to_string()
                } else {
                    format!("{} findings, first: {}", errors, self.first_error_text())
                });
            }
            Severity::Warning => self.warnings.push(finding.to_string()),
        }
        self.findings.push(finding);
    }

    /// Add a warning to the result
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Add a detail to the result
    pub fn add_detail(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.details.insert(key.into(), value.into());
    }

    pub fn is_failed(&self) -> bool {
        self.status == TestStatus::Failed
    }

    /// Number of error-severity findings.
    pub fn error_count(&self) -> usize {
        self.findings.iter().filter(|f| f.is_error()).count()
    }

    fn first_error_text(&self) -> String {
        self.findings
            .iter()
            .find(|f| f.is_error())
            .map(|f| f.to_string())
            .unwrap_or_default()
    }
}

/// Report summary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub warnings: usize,
    pub checks: usize,
    pub valid: bool,
}

/// Complete validation report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub run_id: Uuid,
    pub model_name: String,
    pub seed: u64,
    pub timestamp: DateTime<Utc>,
    pub duration: Duration,
    pub results: HashMap<TestCategory, Vec<TestResult>>,
    pub summary: ReportSummary,
}

impl ValidationReport {
    /// Create a new report
    pub fn new(model_name: impl Into<String>, seed: u64) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            model_name: model_name.into(),
            seed,
            timestamp: Utc::now(),
            duration: Duration::ZERO,
            results: HashMap::new(),
            summary: ReportSummary::default(),
        }
    }

    /// Append results for a category
    pub fn add_results(&mut self, category: TestCategory, results: Vec<TestResult>) {
        self.results.entry(category).or_default().extend(results);
    }

    /// Finalize the report and compute summary
    pub fn finalize(&mut self) {
        let mut summary = ReportSummary::default();

        for results in self.results.values() {
            for result in results {
                summary.total += 1;
                summary.checks += result.checks;
                summary.warnings += result.warnings.len();
                match result.status {
                    TestStatus::Passed => summary.passed += 1,
                    TestStatus::Failed => summary.failed += 1,
                    TestStatus::Skipped => summary.skipped += 1,
                }
            }
        }

        summary.valid = summary.failed == 0;
        self.summary = summary;
    }

    /// Get passed count
    pub fn passed_count(&self) -> usize {
        self.summary.passed
    }

    /// Get failed count
    pub fn failed_count(&self) -> usize {
        self.summary.failed
    }

    /// Get skipped count
    pub fn skipped_count(&self) -> usize {
        self.summary.skipped
    }

    /// Check if every executed test passed
    pub fn is_valid(&self) -> bool {
        self.summary.valid
    }

    /// Results of one category, empty if it did not run.
    pub fn category(&self, category: TestCategory) -> &[TestResult] {
        self.results
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Find a result by name across all categories.
    pub fn result(&self, name: &str) -> Option<&TestResult> {
        self.results.values().flatten().find(|r| r.name == name)
    }

    /// Every finding in the report.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.results
            .values()
            .flatten()
            .flat_map(|r| r.findings.iter())
    }

    fn sorted_categories(&self) -> Vec<TestCategory> {
        let mut categories: Vec<_> = self.results.keys().copied().collect();
        categories.sort_by_key(|c| c.order());
        categories
    }

    /// Generate a text report
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str("╔════════════════════════════════════════════════════════════╗\n");
        output.push_str("║  LABS Validation Report                                    ║\n");
        output.push_str("╠════════════════════════════════════════════════════════════╣\n");
        output.push_str(&format!("║  Model: {:<50} ║\n", self.model_name));
        output.push_str(&format!("║  Seed: {:<51} ║\n", self.seed));
        output.push_str(&format!(
            "║  Timestamp: {:<46} ║\n",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        output.push_str(&format!(
            "║  Duration: {:<47} ║\n",
            format!("{:?}", self.duration)
        ));
        output.push_str("╠════════════════════════════════════════════════════════════╣\n");

        for category in self.sorted_categories() {
            let results = &self.results[&category];
            output.push_str(&format!("║  {} Tests:\n", category));
            output.push_str("╟────────────────────────────────────────────────────────────╢\n");

            for result in results {
                let status_icon = match result.status {
                    TestStatus::Passed => "✓",
                    TestStatus::Failed => "✗",
                    TestStatus::Skipped => "○",
                };

                output.push_str(&format!(
                    "║  {} {:<38} {:>6} {:>8?}\n",
                    status_icon, result.name, result.checks, result.duration
                ));

                if let Some(error) = &result.error {
                    output.push_str(&format!("║      Error: {}\n", error));
                }

                for warning in &result.warnings {
                    output.push_str(&format!("║      Warning: {}\n", warning));
                }
            }

            output.push_str("╟────────────────────────────────────────────────────────────╢\n");
        }

        output.push_str("╠════════════════════════════════════════════════════════════╣\n");
        output.push_str("║  Summary:                                                  ║\n");
        output.push_str(&format!(
            "║    Total: {:<5}  Passed: {:<5}  Failed: {:<5}  Skipped: {:<3} ║\n",
            self.summary.total, self.summary.passed, self.summary.failed, self.summary.skipped
        ));
        output.push_str(&format!(
            "║    Sequences checked: {:<9}  Warnings: {:<15} ║\n",
            self.summary.checks, self.summary.warnings
        ));
        output.push_str("║                                                            ║\n");

        if self.summary.valid {
            output.push_str("║  Result: ✓ VALID                                           ║\n");
        } else {
            output.push_str("║  Result: ✗ INVALID                                         ║\n");
        }

        output.push_str("╚════════════════════════════════════════════════════════════╝\n");

        output
    }

    /// Generate JSON report
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
