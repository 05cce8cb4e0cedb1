// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-pass redundancy pruning.
//!
//! Candidates are visited once, in the order given. Each is tested against the
//! *current* working set, which shrinks as variables are removed, so the result
//! depends on the visiting order. It is not iterated to a fixed point.

use tracing::debug;

use crate::estimators::dataset::{Dataset, VarId, VariableSet};
use crate::estimators::mutual_information::conditional_mutual_information;
use crate::estimators::traits::EntropyEstimator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneAction {
    Kept,
    Pruned,
}

/// One visit of the pruner.
#[derive(Debug, Clone, PartialEq)]
pub struct PruneDecision {
    pub variable: VarId,
    /// Working set minus `variable` at the moment of the test.
    pub conditioning: VariableSet,
    /// `I(variable; T | conditioning)`.
    pub cmi: f64,
    pub action: PruneAction,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PruneOutcome {
    pub retained: VariableSet,
    /// Decisions in visiting order.
    pub decisions: Vec<PruneDecision>,
}

impl PruneOutcome {
    pub fn pruned(&self) -> impl Iterator<Item = &PruneDecision> {
        self.decisions
            .iter()
            .filter(|d| d.action == PruneAction::Pruned)
    }

    /// Sum of the CMIs of the pruned variables, each taken at its own test.
    pub fn pruned_cmi_total(&self) -> f64 {
        self.pruned().map(|d| d.cmi).sum()
    }
}

/// Remove every candidate whose `I(x; T | working \ {x})` is `<= tau` at the
/// time it is visited.
pub fn prune_redundant<E>(
    est: &mut E,
    dataset: &Dataset,
    target: VarId,
    initial: &[VarId],
    tau: f64,
) -> PruneOutcome
where
    E: EntropyEstimator + ?Sized,
{
    let mut working: VariableSet = initial.iter().copied().collect();
    let mut decisions = Vec::with_capacity(working.len());

    for &x in initial {
        // Repeated candidates are only visited once.
        if !working.contains(x) || decisions.iter().any(|d: &PruneDecision| d.variable == x) {
            continue;
        }
        let conditioning = working.without(x);
        let cmi = conditional_mutual_information(est, dataset, x, target, &conditioning);
        let action = if cmi <= tau {
            working.remove(x);
            PruneAction::Pruned
        } else {
            PruneAction::Kept
        };
        debug!(
            variable = dataset.name(x),
            cmi,
            tau,
            ?action,
            "redundancy test"
        );
        decisions.push(PruneDecision {
            variable: x,
            conditioning,
            cmi,
            action,
        });
    }

    PruneOutcome {
        retained: working,
        decisions,
    }
}
