// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use tracing::{info, warn};

/// The properties a [`ValidationReport`] can carry verdicts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    /// A Markov blanket is exactly the set of necessary variables.
    MinimalSufficiency,
    /// Pruning removes variables whose conditional contribution is below τ.
    RedundancyPruning,
    /// One-variable additions and deletions lower the HV of the optimum.
    HvMaximization,
    /// Derived from [`Property::HvMaximization`]: perturbations are detectable.
    Falsifiability,
    /// Strict one-variable supersets of the optimum score lower.
    SupersetPenalty,
    /// The optimum dominates a perturbation across bootstrap resamples.
    BootstrapRobustness,
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::MinimalSufficiency => "MinimalCausalSufficiency",
            Self::RedundancyPruning => "RedundancyPruning",
            Self::HvMaximization => "HvMaximization&Fragility",
            Self::Falsifiability => "EmpiricalFalsifiability",
            Self::SupersetPenalty => "SupersetPenalty",
            Self::BootstrapRobustness => "BootstrapRobustness",
        };
        f.write_str(label)
    }
}

/// Verdict on one property plus the numbers backing it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub property: Property,
    pub passed: bool,
    pub evidence: Vec<(String, f64)>,
}

impl ValidationResult {
    pub fn new(property: Property, passed: bool) -> Self {
        Self {
            property,
            passed,
            evidence: Vec::new(),
        }
    }

    pub fn with_evidence(mut self, label: impl Into<String>, value: f64) -> Self {
        self.evidence.push((label.into(), value));
        self
    }

    pub fn evidence(&self, label: &str) -> Option<f64> {
        self.evidence
            .iter()
            .find(|(l, _)| l == label)
            .map(|&(_, v)| v)
    }
}

/// Append-only diagnostic log: free-text lines plus recorded verdicts, both in
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    lines: Vec<String>,
    results: Vec<ValidationResult>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(title: impl Into<String>) -> Self {
        let mut report = Self::new();
        report.line(title);
        report
    }

    pub fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Record a FAIL/WARN evidence line; also emitted as a warning event.
    pub fn warn_line(&mut self, line: impl Into<String>) {
        let line = line.into();
        warn!(evidence = %line.trim(), "validation check failed");
        self.lines.push(line);
    }

    pub fn record(&mut self, result: ValidationResult) {
        info!(property = %result.property, passed = result.passed, "verdict");
        self.results.push(result);
    }

    /// Falsifiability follows the most recent HV-maximisation verdict. Returns
    /// `None` (and records nothing) if that check has not run.
    pub fn record_falsifiability(&mut self) -> Option<bool> {
        let fragile = self.verdict(Property::HvMaximization)?;
        self.line("\n--- Empirical Falsifiability ---");
        if fragile {
            self.line("   Supported: perturbation fragility holds, so the subset is exposed to empirical test.");
        } else {
            self.warn_line("   Not supported: perturbation fragility did not fully hold.");
        }
        self.record(ValidationResult::new(Property::Falsifiability, fragile));
        Some(fragile)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn results(&self) -> &[ValidationResult] {
        &self.results
    }

    /// Most recent verdict for `property`.
    pub fn verdict(&self, property: Property) -> Option<bool> {
        self.results
            .iter()
            .rev()
            .find(|r| r.property == property)
            .map(|r| r.passed)
    }

    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    /// One `property: Supported | Check FAILs` line per recorded verdict.
    pub fn summary(&self) -> Vec<String> {
        self.results
            .iter()
            .map(|r| {
                let status = if r.passed { "Supported" } else { "Check FAILs" };
                format!("{}: {}", r.property, status)
            })
            .collect()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
