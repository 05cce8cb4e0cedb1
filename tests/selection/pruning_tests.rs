// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use infosubset::estimators::Dataset;
use infosubset::selection::{prune_redundant, PruneAction};

use crate::test_helpers::*;

/// `x` and an exact copy `x_copy`, with `t = x`.
fn duplicated_driver(n: usize, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let rows = (0..n).map(|_| {
        let x = rng.gen_range(0..2);
        vec![x, x, x]
    });
    Dataset::from_rows(&["x", "x_copy", "t"], rows.collect::<Vec<_>>()).unwrap()
}

#[test]
fn empty_candidate_list_is_a_no_op() {
    let ds = random_dataset(30, &[2, 2], 0);
    let mut cache = EntropyCache::for_dataset(&ds);
    let outcome = prune_redundant(&mut cache, &ds, 1, &[], 0.02);
    assert!(outcome.retained.is_empty());
    assert!(outcome.decisions.is_empty());
    assert_eq!(outcome.pruned_cmi_total(), 0.0);
}

#[test]
fn pruning_depends_on_visiting_order() {
    let ds = duplicated_driver(200, 5);
    let (x, x_copy, t) = (0, 1, 2);
    let mut cache = EntropyCache::for_dataset(&ds);

    let forward = prune_redundant(&mut cache, &ds, t, &[x, x_copy], 0.02);
    assert_eq!(forward.retained, VariableSet::singleton(x_copy));
    assert_eq!(forward.decisions[0].action, PruneAction::Pruned);
    assert_eq!(forward.decisions[0].conditioning, VariableSet::singleton(x_copy));
    // x_copy is then tested against the shrunken, empty working set.
    assert!(forward.decisions[1].conditioning.is_empty());
    assert_eq!(forward.decisions[1].action, PruneAction::Kept);

    let backward = prune_redundant(&mut cache, &ds, t, &[x_copy, x], 0.02);
    assert_eq!(backward.retained, VariableSet::singleton(x));
}

#[test]
fn repeated_candidates_are_visited_once() {
    let ds = duplicated_driver(100, 6);
    let mut cache = EntropyCache::for_dataset(&ds);
    let outcome = prune_redundant(&mut cache, &ds, 2, &[0, 0, 0], 0.02);
    assert_eq!(outcome.decisions.len(), 1);
    assert_eq!(outcome.retained, VariableSet::singleton(0));
}

#[test]
fn huge_threshold_prunes_everything() {
    let ds = scenario_3().sample(1000, 2);
    let t = ds.var("T").unwrap();
    let candidates = ds.vars(&["M1", "M2"]).unwrap();
    let mut cache = EntropyCache::for_dataset(&ds);
    let outcome = prune_redundant(&mut cache, &ds, t, &candidates, 10.0);
    assert!(outcome.retained.is_empty());
    assert_eq!(outcome.pruned().count(), 2);
    assert!(outcome.pruned_cmi_total() > 0.0);
}

#[test]
fn mediators_survive_pruning() {
    let ds = scenario_3().sample(5000, 31);
    let t = ds.var("T").unwrap();
    let candidates = ds.vars(&["M1", "M2"]).unwrap();
    let mut cache = EntropyCache::for_dataset(&ds);
    let outcome = prune_redundant(&mut cache, &ds, t, &candidates, 0.02);
    assert_eq!(outcome.retained, ds.var_set(&["M1", "M2"]).unwrap());
    assert!(outcome.decisions.iter().all(|d| d.cmi > 0.02));
}

#[test]
fn upstream_causes_are_pruned_behind_mediators() {
    let ds = scenario_3().sample(5000, 32);
    let t = ds.var("T").unwrap();
    let candidates = ds.vars(&["A", "B", "M1", "M2"]).unwrap();
    let mut cache = EntropyCache::for_dataset(&ds);
    let outcome = prune_redundant(&mut cache, &ds, t, &candidates, 0.02);
    assert_eq!(outcome.retained, ds.var_set(&["M1", "M2"]).unwrap());
}

#[test]
fn spouse_is_pruned_from_scenario_blanket() {
    let ds = scenario_1().sample(20_000, 3);
    let t = ds.var("T").unwrap();
    let blanket = ds.vars(&["X1", "X2", "X3", "Y1"]).unwrap();
    let mut cache = EntropyCache::for_dataset(&ds);
    let outcome = prune_redundant(&mut cache, &ds, t, &blanket, 0.02);
    assert_eq!(outcome.retained, ds.var_set(&["X1", "X2", "Y1"]).unwrap());

    let x3 = ds.var("X3").unwrap();
    let pruned: Vec<_> = outcome.pruned().collect();
    assert_eq!(pruned.len(), 1);
    assert_eq!(pruned[0].variable, x3);
    assert_eq!(pruned[0].conditioning, ds.var_set(&["X1", "X2", "Y1"]).unwrap());
}
