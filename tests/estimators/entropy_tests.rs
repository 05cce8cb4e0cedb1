// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use infosubset::estimators::entropy::{
    entropy_bits, entropy_from_probs, DiscreteEntropy, GlobalValue, LocalValues,
};
use infosubset::estimators::{Dataset, VariableSet};

use crate::test_helpers::*;

#[test]
fn discrete_entropy_known_example() {
    let ds = Dataset::from_columns(vec![("x", vec![1, 1, 2, 3, 3, 4, 5])]).unwrap();
    let x = VariableSet::singleton(0);
    let est = DiscreteEntropy::new(&ds, &x);

    // H = log2(7) - 4/7 bits
    let expected_h = 7f64.log2() - 4.0 / 7.0;
    assert_abs_diff_eq!(est.global_value(), expected_h, epsilon = 1e-12);
    assert_abs_diff_eq!(entropy_bits(&ds, &x), expected_h, epsilon = 1e-12);
    assert_eq!(est.n_states(), 5);

    let two = -(2.0f64 / 7.0).log2();
    let one = -(1.0f64 / 7.0).log2();
    let expected_locals = [two, two, one, two, two, one, one];
    let locals = est.local_values();
    assert_eq!(locals.len(), 7);
    for (i, &val) in locals.iter().enumerate() {
        assert_abs_diff_eq!(val, expected_locals[i], epsilon = 1e-12);
    }
}

#[test]
fn joint_entropy_of_independent_uniform_bits() {
    let ds = Dataset::from_rows(
        &["a", "b"],
        vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]],
    )
    .unwrap();
    assert_abs_diff_eq!(entropy_bits(&ds, &VariableSet::singleton(0)), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(
        entropy_bits(&ds, &ds.var_set(&["a", "b"]).unwrap()),
        2.0,
        epsilon = 1e-12
    );
}

#[test]
fn entropy_edge_cases_are_zero() {
    let ds = random_dataset(20, &[3], 1);
    assert_eq!(entropy_bits(&ds, &VariableSet::new()), 0.0);

    let empty = Dataset::from_rows(&["a"], Vec::<Vec<i32>>::new()).unwrap();
    assert_eq!(entropy_bits(&empty, &VariableSet::singleton(0)), 0.0);
    assert_eq!(DiscreteEntropy::new(&empty, &VariableSet::singleton(0)).global_value(), 0.0);

    let constant = Dataset::from_columns(vec![("c", vec!["k"; 9])]).unwrap();
    assert_eq!(entropy_bits(&constant, &VariableSet::singleton(0)), 0.0);
}

#[test]
fn entropy_from_probs_skips_zero_mass() {
    assert_eq!(entropy_from_probs(Vec::<f64>::new()), 0.0);
    assert_abs_diff_eq!(entropy_from_probs([0.5, 0.5]), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(entropy_from_probs([0.5, 0.0, 0.5]), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(entropy_from_probs([0.25; 4]), 2.0, epsilon = 1e-12);
}

#[test]
fn missing_values_count_as_a_category() {
    let ds = Dataset::from_columns(vec![("m", vec![Some("a"), None, Some("a"), None])]).unwrap();
    assert_abs_diff_eq!(entropy_bits(&ds, &VariableSet::singleton(0)), 1.0, epsilon = 1e-12);
}

#[test]
fn entropy_is_bounded_by_alphabet_size() {
    for seed in 0..5 {
        let ds = random_dataset(300, &[2, 3, 5], seed);
        let all: VariableSet = ds.variable_ids().collect();
        let h = entropy_bits(&ds, &all);
        assert!(h >= 0.0);
        assert!(h <= 30f64.log2() + 1e-12);
        // Joint entropy is at least the largest marginal.
        for v in ds.variable_ids() {
            assert!(h + 1e-12 >= entropy_bits(&ds, &VariableSet::singleton(v)));
        }
    }
}

#[test]
fn local_values_average_to_global_value() {
    let ds = random_dataset(250, &[4, 3], 21);
    let vars = ds.var_set(&["V0", "V1"]).unwrap();
    let est = DiscreteEntropy::new(&ds, &vars);
    assert_abs_diff_eq!(est.global_from_local(), est.global_value(), epsilon = 1e-10);
    assert_eq!(est.n_samples(), 250);
}
