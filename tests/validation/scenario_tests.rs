// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sufficiency, pruning, fragility and superset checks on sampled scenarios.

use infosubset::estimators::{Dataset, VarId};
use infosubset::validation::{
    validate_hv_fragility, validate_minimal_sufficiency, validate_minimal_sufficiency_for_graph,
    validate_redundancy_pruning, validate_superset_penalty, PerturbationKind, Property,
};

use crate::test_helpers::*;

const TOL: f64 = 1e-3;
const EPS: f64 = 1e-9;

fn scenario_1_data(n: usize, seed: u64) -> (Dataset, VarId) {
    let ds = scenario_1().sample(n, seed);
    let t = ds.var("T").unwrap();
    (ds, t)
}

#[test]
fn graph_blanket_is_minimally_sufficient() {
    init_tracing();
    let scenario = scenario_1();
    let ds = scenario.sample(100_000, 42);
    let mut cache = EntropyCache::for_dataset(&ds);
    let mut report = ValidationReport::new();

    let outcome = validate_minimal_sufficiency_for_graph(
        &mut cache,
        &ds,
        &scenario.graph(),
        "T",
        TOL,
        &mut report,
    )
    .unwrap();
    assert!(outcome.passed, "{report}");
    assert_eq!(outcome.blanket, ds.var_set(&["X1", "X2", "X3", "Y1"]).unwrap());
    assert_eq!(outcome.inside.len(), 4);
    assert_eq!(outcome.outside.len(), 1);
    assert_eq!(report.verdict(Property::MinimalSufficiency), Some(true));

    let result = &report.results()[0];
    assert!(result.evidence("max_outside_cmi").unwrap() <= TOL);
    assert!(result.evidence("min_inside_cmi").unwrap() > TOL);
}

#[test]
fn blanket_missing_a_cause_fails() {
    let (ds, t) = scenario_1_data(20_000, 1);
    let blanket = ds.var_set(&["X1", "X3", "Y1"]).unwrap();
    let mut cache = EntropyCache::for_dataset(&ds);
    let mut report = ValidationReport::new();
    let outcome = validate_minimal_sufficiency(&mut cache, &ds, t, &blanket, TOL, &mut report);
    assert!(!outcome.passed);
    let x2 = ds.var("X2").unwrap();
    let (_, cmi) = outcome.outside.iter().find(|(v, _)| *v == x2).copied().unwrap();
    assert!(cmi > 0.05);
    assert!(report.lines().iter().any(|l| l.contains("WARN: CMI for X2")));
}

#[test]
fn blanket_with_irrelevant_member_fails() {
    let (ds, t) = scenario_1_data(100_000, 2);
    let blanket = ds.var_set(&["X1", "X2", "X3", "X4", "Y1"]).unwrap();
    let mut cache = EntropyCache::for_dataset(&ds);
    let mut report = ValidationReport::new();
    let outcome = validate_minimal_sufficiency(&mut cache, &ds, t, &blanket, TOL, &mut report);
    assert!(!outcome.passed);
    assert!(outcome.outside.is_empty());
    assert_eq!(report.verdict(Property::MinimalSufficiency), Some(false));
}

#[test]
fn pruning_validator_recovers_blanket_without_spouse() {
    let scenario = scenario_1();
    let ds = scenario.sample(20_000, 3);
    let t = ds.var("T").unwrap();
    let blanket = scenario.graph().markov_blanket_in(&ds, "T").unwrap();
    let mut cache = EntropyCache::for_dataset(&ds);
    let mut report = ValidationReport::new();

    let outcome =
        validate_redundancy_pruning(&mut cache, &ds, t, blanket.as_slice(), 0.02, &mut report);
    assert_eq!(outcome.retained, ds.var_set(&["X1", "X2", "Y1"]).unwrap());
    assert_eq!(report.verdict(Property::RedundancyPruning), Some(true));
    let result = &report.results()[0];
    assert_eq!(result.evidence("retained"), Some(3.0));
    // Dropping the weak spouse loses only a few millibits.
    assert!(result.evidence("information_drop").unwrap() < 0.02);
    assert!(report
        .lines()
        .iter()
        .any(|l| l.contains("Pruning X3.")));
}

#[test]
fn pruning_validator_passes_on_empty_input() {
    let (ds, t) = scenario_1_data(100, 4);
    let mut cache = EntropyCache::for_dataset(&ds);
    let mut report = ValidationReport::new();
    let outcome = validate_redundancy_pruning(&mut cache, &ds, t, &[], 0.02, &mut report);
    assert!(outcome.retained.is_empty());
    assert_eq!(report.verdict(Property::RedundancyPruning), Some(true));
}

#[test]
fn optimum_is_fragile_to_every_single_change() {
    let (ds, t) = scenario_1_data(20_000, 5);
    let optimal = ds.var_set(&["X1"]).unwrap();
    let mut cache = EntropyCache::for_dataset(&ds);
    let mut report = ValidationReport::new();

    let outcome = validate_hv_fragility(&mut cache, &ds, t, &optimal, EPS, &mut report);
    assert!(outcome.passed, "{report}");
    // X2, X3, X4, Y1 added; X1 deleted.
    assert_eq!(outcome.perturbations.len(), 5);
    assert_eq!(outcome.n_passed(), 5);
    let deletions = outcome
        .perturbations
        .iter()
        .filter(|p| matches!(p.kind, PerturbationKind::Delete(_)))
        .count();
    assert_eq!(deletions, 1);

    assert_eq!(report.record_falsifiability(), Some(true));
    assert_eq!(report.verdict(Property::Falsifiability), Some(true));
}

#[test]
fn non_optimal_set_is_not_fragile() {
    let (ds, t) = scenario_1_data(20_000, 6);
    let subset = ds.var_set(&["X1", "X2"]).unwrap();
    let mut cache = EntropyCache::for_dataset(&ds);
    let mut report = ValidationReport::new();

    let outcome = validate_hv_fragility(&mut cache, &ds, t, &subset, EPS, &mut report);
    assert!(!outcome.passed);
    let x2 = ds.var("X2").unwrap();
    let drop_x2 = outcome
        .perturbations
        .iter()
        .find(|p| p.kind == PerturbationKind::Delete(x2))
        .unwrap();
    assert!(!drop_x2.passed);
    assert!(drop_x2.score.hv > outcome.optimal.hv);
    assert_eq!(report.record_falsifiability(), Some(false));
}

#[test]
fn empty_optimum_uses_non_strict_comparison() {
    let ds = Dataset::from_columns(vec![
        ("flat", vec![1, 1, 1, 1, 1, 1, 1, 1]),
        ("t", vec![0, 1, 1, 0, 1, 0, 0, 1]),
    ])
    .unwrap();
    let mut cache = EntropyCache::for_dataset(&ds);
    let mut report = ValidationReport::new();
    let outcome = validate_hv_fragility(&mut cache, &ds, 1, &VariableSet::new(), EPS, &mut report);
    assert_eq!(outcome.optimal.hv, 0.0);
    assert_eq!(outcome.perturbations.len(), 1);
    assert!(outcome.passed);
}

#[test]
fn supersets_of_optimum_are_penalised() {
    let (ds, t) = scenario_1_data(20_000, 7);
    let optimal = ds.var_set(&["X1"]).unwrap();
    let mut cache = EntropyCache::for_dataset(&ds);
    let mut report = ValidationReport::new();
    let outcome = validate_superset_penalty(&mut cache, &ds, t, &optimal, EPS, &mut report);
    assert!(outcome.passed, "{report}");
    assert_eq!(outcome.supersets.len(), 4);
    assert_eq!(outcome.violations(), 0);
    for (_, score, _) in &outcome.supersets {
        assert_eq!(score.description_length, 2);
        assert!(score.hv < outcome.optimal.hv);
    }
}

#[test]
fn superset_check_is_vacuous_when_nothing_can_be_added() {
    let (ds, t) = scenario_1_data(500, 8);
    let everything: VariableSet = ds.variable_ids().filter(|&v| v != t).collect();
    let mut cache = EntropyCache::for_dataset(&ds);
    let mut report = ValidationReport::new();
    let outcome = validate_superset_penalty(&mut cache, &ds, t, &everything, EPS, &mut report);
    assert!(outcome.passed);
    assert!(outcome.supersets.is_empty());
    assert_eq!(report.results()[0].evidence("supersets_tested"), Some(0.0));
}

#[test]
fn weak_subset_fails_superset_penalty() {
    let (ds, t) = scenario_1_data(20_000, 9);
    let weak = ds.var_set(&["X4"]).unwrap();
    let mut cache = EntropyCache::for_dataset(&ds);
    let mut report = ValidationReport::new();
    let outcome = validate_superset_penalty(&mut cache, &ds, t, &weak, EPS, &mut report);
    assert!(!outcome.passed);
    let x1 = ds.var("X1").unwrap();
    assert!(outcome
        .supersets
        .iter()
        .any(|(v, _, ok)| *v == x1 && !ok));
    assert_eq!(report.verdict(Property::SupersetPenalty), Some(false));
}
