// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::estimators::dataset::{Dataset, VarId, VariableSet};
use crate::estimators::traits::EntropyEstimator;
use crate::selection::scoring::{hv_score, HvScore};
use crate::validation::lowers_hv;
use crate::validation::report::{Property, ValidationReport, ValidationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerturbationKind {
    Add(VarId),
    Delete(VarId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Perturbation {
    pub kind: PerturbationKind,
    pub subset: VariableSet,
    pub score: HvScore,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FragilityOutcome {
    pub passed: bool,
    pub optimal: HvScore,
    pub perturbations: Vec<Perturbation>,
}

impl FragilityOutcome {
    pub fn n_passed(&self) -> usize {
        self.perturbations.iter().filter(|p| p.passed).count()
    }
}

/// Check that `optimal` is a strict local HV maximum: every one-variable
/// addition (from the non-target columns) and every one-variable deletion must
/// lower HV, or merely not raise it when `HV(S*)` is within `epsilon` of zero.
pub fn validate_hv_fragility<E>(
    est: &mut E,
    dataset: &Dataset,
    target: VarId,
    optimal: &VariableSet,
    epsilon: f64,
    report: &mut ValidationReport,
) -> FragilityOutcome
where
    E: EntropyEstimator + ?Sized,
{
    let t_name = dataset.name(target);
    report.line("\n--- Validating HV Score Maximization & Perturbation Fragility ---");
    report.line("   S* = argmax_S HV(S) where HV(S) = I(T;S)/DL(S); ∀S~ ≠ S*, HV(S~) < HV(S*)");
    report.line(format!("Optimal set S* = {}", dataset.format_set(optimal)));

    let best = hv_score(est, dataset, target, optimal);
    if optimal.is_empty() {
        report.line("  S* is empty. I(T;S*) = 0, DL(S*) = 0, HV(S*) = 0 (by convention).");
    }
    report.line(format!("  I({t_name}; S*) = {:.4}", best.information));
    report.line(format!("  DL(S*) = {}", best.description_length));
    report.line(format!("  HV(S*) = {:.4}", best.hv));

    let additions = dataset
        .variable_ids()
        .filter(|&v| v != target && !optimal.contains(v))
        .map(|v| (PerturbationKind::Add(v), optimal.with(v)));
    let deletions = optimal
        .iter()
        .map(|v| (PerturbationKind::Delete(v), optimal.without(v)));
    let candidates: Vec<(PerturbationKind, VariableSet)> = additions.chain(deletions).collect();

    let mut perturbations = Vec::with_capacity(candidates.len());
    for (kind, subset) in candidates {
        let score = hv_score(est, dataset, target, &subset);
        let passed = lowers_hv(score.hv, best.hv, epsilon);
        let (verb, var) = match kind {
            PerturbationKind::Add(v) => ("Add", v),
            PerturbationKind::Delete(v) => ("Del", v),
        };
        report.line(format!(
            "  Perturbation ({verb} {}): S~ = {}",
            dataset.name(var),
            dataset.format_set(&subset)
        ));
        let detail = format!(
            "    I(T;S~)={:.4}, DL(S~)={}, HV(S~)={:.4} ({})",
            score.information,
            score.description_length,
            score.hv,
            if passed { "PASS" } else { "FAIL" }
        );
        if passed {
            report.line(detail);
        } else {
            report.warn_line(detail);
        }
        perturbations.push(Perturbation {
            kind,
            subset,
            score,
            passed,
        });
    }

    let outcome = FragilityOutcome {
        passed: perturbations.iter().all(|p| p.passed),
        optimal: best,
        perturbations,
    };
    report.line(format!(
        "HV Maximization & Perturbation Fragility Conclusion: {}. ({}/{} perturbations lowered HV score).",
        if outcome.passed { "Supported" } else { "Partially Supported/Check FAILs" },
        outcome.n_passed(),
        outcome.perturbations.len()
    ));
    report.record(
        ValidationResult::new(Property::HvMaximization, outcome.passed)
            .with_evidence("hv_optimal", best.hv)
            .with_evidence("perturbations_passed", outcome.n_passed() as f64)
            .with_evidence("perturbations_tested", outcome.perturbations.len() as f64),
    );
    outcome
}
