// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::estimators::dataset::{Dataset, VarId, VariableSet};
use crate::estimators::mutual_information::joint_mutual_information;
use crate::estimators::traits::EntropyEstimator;
use crate::selection::pruning::{prune_redundant, PruneAction, PruneOutcome};
use crate::validation::report::{Property, ValidationReport, ValidationResult};

/// Run the redundancy pruner on `initial` and log every decision.
///
/// This is a processing step rather than a pass/fail check: its verdict is
/// always positive. The evidence compares the summed CMIs of the pruned
/// variables with the observed drop in `I(T;S)`.
pub fn validate_redundancy_pruning<E>(
    est: &mut E,
    dataset: &Dataset,
    target: VarId,
    initial: &[VarId],
    tau: f64,
    report: &mut ValidationReport,
) -> PruneOutcome
where
    E: EntropyEstimator + ?Sized,
{
    let t_name = dataset.name(target);
    let initial_set: VariableSet = initial.iter().copied().collect();
    report.line(format!(
        "\n--- Validating Informational Necessity & Redundancy Pruning (Target: {t_name}) ---"
    ));
    report.line("   X ∈ S_final iff X ∈ S_initial ∧ I(X;T|S_initial\\{X}) > τ");
    report.line(format!(
        "Initial set S = {}, Tau = {tau}",
        dataset.format_set(&initial_set)
    ));
    if initial.is_empty() {
        report.line("Initial set S is empty. Skipping.");
        report.record(ValidationResult::new(Property::RedundancyPruning, true));
        return PruneOutcome::default();
    }

    let outcome = prune_redundant(est, dataset, target, initial, tau);
    for decision in &outcome.decisions {
        let x_name = dataset.name(decision.variable);
        let cond = dataset.format_set(&decision.conditioning);
        match decision.action {
            PruneAction::Pruned => report.line(format!(
                "  I({x_name}; {t_name} | {cond}) = {:.4} <= {tau}. Pruning {x_name}.",
                decision.cmi
            )),
            PruneAction::Kept => report.line(format!(
                "  I({x_name}; {t_name} | {cond}) = {:.4} > {tau}. Keeping {x_name}.",
                decision.cmi
            )),
        }
    }

    let pruned_total = outcome.pruned_cmi_total();
    let before = joint_mutual_information(est, dataset, target, &initial_set);
    let after = joint_mutual_information(est, dataset, target, &outcome.retained);
    report.line(format!(
        "Final S' after pruning: {}",
        dataset.format_set(&outcome.retained)
    ));
    report.line(format!(
        "Sum of CMIs of pruned variables: ~{pruned_total:.4}; observed drop I(T;S) - I(T;S') = {:.4}",
        before - after
    ));
    report.record(
        ValidationResult::new(Property::RedundancyPruning, true)
            .with_evidence("pruned_cmi_total", pruned_total)
            .with_evidence("information_drop", before - after)
            .with_evidence("retained", outcome.retained.len() as f64),
    );
    outcome
}
