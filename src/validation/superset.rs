// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::estimators::dataset::{Dataset, VarId, VariableSet};
use crate::estimators::traits::EntropyEstimator;
use crate::selection::scoring::{hv_score, HvScore};
use crate::validation::lowers_hv;
use crate::validation::report::{Property, ValidationReport, ValidationResult};

#[derive(Debug, Clone, PartialEq)]
pub struct SupersetOutcome {
    pub passed: bool,
    pub optimal: HvScore,
    /// `(added variable, HV of S* ∪ {added}, passed)`.
    pub supersets: Vec<(VarId, HvScore, bool)>,
}

impl SupersetOutcome {
    pub fn violations(&self) -> usize {
        self.supersets.iter().filter(|(_, _, ok)| !ok).count()
    }
}

/// Check that every strict one-variable superset of `optimal` scores strictly
/// below it. Vacuously true when no variable is left to add.
pub fn validate_superset_penalty<E>(
    est: &mut E,
    dataset: &Dataset,
    target: VarId,
    optimal: &VariableSet,
    epsilon: f64,
    report: &mut ValidationReport,
) -> SupersetOutcome
where
    E: EntropyEstimator + ?Sized,
{
    let best = hv_score(est, dataset, target, optimal);
    report.line("\n--- Validating Superset Penalty ---");
    report.line("   ∀S~ ⊃ S*, HV(S~) < HV(S*)");
    report.line(format!(
        "   (S* = {}, HV(S*) = {:.4})",
        dataset.format_set(optimal),
        best.hv
    ));

    let additions: Vec<VarId> = dataset
        .variable_ids()
        .filter(|&v| v != target && !optimal.contains(v))
        .collect();
    if additions.is_empty() {
        report.line(format!(
            "  S* ({}) already contains every other variable. No strict supersets to form.",
            dataset.format_set(optimal)
        ));
        report.record(
            ValidationResult::new(Property::SupersetPenalty, true)
                .with_evidence("supersets_tested", 0.0),
        );
        return SupersetOutcome {
            passed: true,
            optimal: best,
            supersets: Vec::new(),
        };
    }

    let mut supersets = Vec::with_capacity(additions.len());
    for x in additions {
        let score = hv_score(est, dataset, target, &optimal.with(x));
        let passed = lowers_hv(score.hv, best.hv, epsilon);
        let line = format!(
            "  Superset S~ = S* ∪ {{{}}}: HV(S~) = {:.4}  ({})",
            dataset.name(x),
            score.hv,
            if passed { "PASS" } else { "FAIL" }
        );
        if passed {
            report.line(line);
        } else {
            report.warn_line(line);
        }
        supersets.push((x, score, passed));
    }

    let outcome = SupersetOutcome {
        passed: supersets.iter().all(|(_, _, ok)| *ok),
        optimal: best,
        supersets,
    };
    let violations = outcome.violations();
    report.line(if outcome.passed {
        "Superset Penalty Conclusion: Supported".to_owned()
    } else {
        format!("Superset Penalty Conclusion: FAIL – {violations} violation(s)")
    });
    report.record(
        ValidationResult::new(Property::SupersetPenalty, outcome.passed)
            .with_evidence("hv_optimal", best.hv)
            .with_evidence("supersets_tested", outcome.supersets.len() as f64)
            .with_evidence("violations", violations as f64),
    );
    outcome
}
