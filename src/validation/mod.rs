// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property validators.
//!
//! Each check appends evidence lines and a [`ValidationResult`] to a shared
//! [`ValidationReport`] and returns its own outcome. Failed checks never
//! error; they come back with `passed == false` and WARN/FAIL lines in the log.

pub mod bootstrap;
pub mod fragility;
pub mod graph;
pub mod pruning;
pub mod report;
pub mod sufficiency;
pub mod suite;
pub mod superset;

pub use bootstrap::{
    bootstrap_hv_matrix, bootstrap_hv_values, default_perturbation,
    validate_bootstrap_robustness, BootstrapOutcome,
};
pub use fragility::{validate_hv_fragility, FragilityOutcome, Perturbation, PerturbationKind};
pub use graph::CausalGraph;
pub use pruning::validate_redundancy_pruning;
pub use report::{Property, ValidationReport, ValidationResult};
pub use sufficiency::{
    validate_minimal_sufficiency, validate_minimal_sufficiency_for_graph, SufficiencyOutcome,
};
pub use suite::{run_property_suite, SuiteOutcome};
pub use superset::{validate_superset_penalty, SupersetOutcome};

/// `candidate` counts as lower than `reference` when it is strictly below it,
/// or, if `reference` is within `epsilon` of zero, when it does not exceed it.
pub(crate) fn lowers_hv(candidate: f64, reference: f64, epsilon: f64) -> bool {
    if reference > epsilon {
        candidate < reference
    } else {
        candidate <= reference
    }
}
