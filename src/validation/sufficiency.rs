// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::error::Result;
use crate::estimators::dataset::{Dataset, VarId, VariableSet};
use crate::estimators::mutual_information::conditional_mutual_information;
use crate::estimators::traits::EntropyEstimator;
use crate::validation::graph::CausalGraph;
use crate::validation::report::{Property, ValidationReport, ValidationResult};

#[derive(Debug, Clone, PartialEq)]
pub struct SufficiencyOutcome {
    pub passed: bool,
    pub blanket: VariableSet,
    /// `I(x; T | blanket \ {x})` for every blanket member.
    pub inside: Vec<(VarId, f64)>,
    /// `I(y; T | blanket)` for every other non-target variable.
    pub outside: Vec<(VarId, f64)>,
}

/// Check that `blanket` is minimally sufficient for `target`: each member adds
/// more than `tolerance` bits given the rest, and every other variable adds at
/// most `tolerance` bits given the whole blanket.
pub fn validate_minimal_sufficiency<E>(
    est: &mut E,
    dataset: &Dataset,
    target: VarId,
    blanket: &VariableSet,
    tolerance: f64,
    report: &mut ValidationReport,
) -> SufficiencyOutcome
where
    E: EntropyEstimator + ?Sized,
{
    let t_name = dataset.name(target);
    report.line(format!(
        "\n--- Validating Minimal Causal Sufficiency (Target: {t_name}) ---"
    ));
    report.line("   S = MB(T) iff (∀X ∈ S, I(X;T|S\\{X}) > 0) ∧ (∀Y ∉ S, I(Y;T|S) ≈ 0)");
    report.line(format!(
        "Markov blanket MB({t_name}) = {}",
        dataset.format_set(blanket)
    ));

    let mut passed = true;
    let mut inside = Vec::with_capacity(blanket.len());
    report.line(format!(
        "\nChecking I(X; {t_name} | MB\\{{X}}) > 0 for X in MB({t_name}):"
    ));
    if blanket.is_empty() {
        report.line("Markov blanket is empty. Skipping this part of validation.");
    }
    for x in blanket.iter() {
        let rest = blanket.without(x);
        let cmi = conditional_mutual_information(est, dataset, x, target, &rest);
        report.line(format!(
            "  I({}; {t_name} | {}) = {cmi:.4}",
            dataset.name(x),
            dataset.format_set(&rest)
        ));
        if cmi <= tolerance {
            report.warn_line(format!(
                "  WARN: CMI for {} is close to zero. Expected > 0.",
                dataset.name(x)
            ));
            passed = false;
        }
        inside.push((x, cmi));
    }

    let others: Vec<VarId> = dataset
        .variable_ids()
        .filter(|&v| v != target && !blanket.contains(v))
        .collect();
    let mut outside = Vec::with_capacity(others.len());
    report.line(format!(
        "\nChecking I(Y; {t_name} | MB) ≈ 0 for Y not in MB({t_name}):"
    ));
    if others.is_empty() {
        report.line("No variables outside MB to test.");
    }
    for y in others {
        let cmi = conditional_mutual_information(est, dataset, y, target, blanket);
        report.line(format!(
            "  I({}; {t_name} | {}) = {cmi:.4}",
            dataset.name(y),
            dataset.format_set(blanket)
        ));
        if cmi > tolerance {
            report.warn_line(format!(
                "  WARN: CMI for {} (outside MB) is NOT close to zero. Expected ≈0.",
                dataset.name(y)
            ));
            passed = false;
        }
        outside.push((y, cmi));
    }

    report.line(format!(
        "Minimal Causal Sufficiency Conclusion: {}",
        if passed { "Supported" } else { "Partially Supported/Check WARNs" }
    ));
    let min_inside = inside.iter().map(|&(_, c)| c).fold(f64::INFINITY, f64::min);
    let max_outside = outside.iter().map(|&(_, c)| c).fold(0.0, f64::max);
    let mut result = ValidationResult::new(Property::MinimalSufficiency, passed)
        .with_evidence("max_outside_cmi", max_outside);
    if min_inside.is_finite() {
        result = result.with_evidence("min_inside_cmi", min_inside);
    }
    report.record(result);

    SufficiencyOutcome {
        passed,
        blanket: blanket.clone(),
        inside,
        outside,
    }
}

/// [`validate_minimal_sufficiency`] against the Markov blanket a reference
/// graph assigns to `target`.
pub fn validate_minimal_sufficiency_for_graph<E>(
    est: &mut E,
    dataset: &Dataset,
    graph: &CausalGraph,
    target: &str,
    tolerance: f64,
    report: &mut ValidationReport,
) -> Result<SufficiencyOutcome>
where
    E: EntropyEstimator + ?Sized,
{
    let target_id = dataset.var(target)?;
    let blanket = graph.markov_blanket_in(dataset, target)?;
    Ok(validate_minimal_sufficiency(
        est, dataset, target_id, &blanket, tolerance, report,
    ))
}
