// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use infosubset::estimators::cache::CacheStats;
use infosubset::estimators::entropy::entropy_bits;
use infosubset::estimators::{EntropyCache, EntropyEstimator, VariableSet};

use crate::test_helpers::*;

fn all_subsets(k: usize) -> Vec<VariableSet> {
    (0u32..(1 << k))
        .map(|mask| (0..k).filter(|&j| mask & (1 << j) != 0).collect())
        .collect()
}

#[test]
fn cached_entropy_matches_direct_computation() {
    let ds = random_dataset(200, &[2, 3, 4], 5);
    let mut cache = EntropyCache::for_dataset(&ds);
    let mut direct = DirectEntropy;
    for subset in all_subsets(3) {
        let cached = cache.entropy(&ds, &subset);
        assert_eq!(cached, direct.entropy(&ds, &subset));
        // Second request is a hit with the identical value.
        assert_eq!(cache.entropy(&ds, &subset), cached);
    }
    // The empty set is answered without touching the table.
    assert_eq!(cache.len(), 7);
    assert_eq!(
        cache.stats(),
        CacheStats {
            hits: 7,
            misses: 7,
            bypassed: 0
        }
    );
}

#[test]
fn key_is_order_insensitive() {
    let ds = random_dataset(100, &[2, 2, 2], 8);
    let mut cache = EntropyCache::for_dataset(&ds);
    let a: VariableSet = [2usize, 0].into_iter().collect();
    let b: VariableSet = [0usize, 2, 0].into_iter().collect();
    let h = cache.get_entropy(&ds, &a);
    assert_eq!(cache.get_entropy(&ds, &b), h);
    assert_eq!(cache.stats().hits, 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn swapping_datasets_never_serves_stale_values() {
    let d1 = random_dataset(300, &[2, 5], 1);
    let d2 = random_dataset(300, &[2, 5], 2);
    let both = VariableSet::from(&[0usize, 1][..]);
    let h1 = entropy_bits(&d1, &both);
    let h2 = entropy_bits(&d2, &both);
    assert_ne!(h1, h2);

    let mut cache = EntropyCache::new();
    cache.set_active(&d1);
    assert_eq!(cache.get_entropy(&d1, &both), h1);
    cache.set_active(&d2);
    assert!(cache.is_empty());
    assert_eq!(cache.get_entropy(&d2, &both), h2);
    cache.set_active(&d1);
    assert_eq!(cache.get_entropy(&d1, &both), h1);
    assert_eq!(cache.stats().misses, 3);
}

#[test]
fn reinstalling_same_dataset_clears_table() {
    let ds = random_dataset(50, &[3], 3);
    let mut cache = EntropyCache::for_dataset(&ds);
    cache.get_entropy(&ds, &VariableSet::singleton(0));
    assert_eq!(cache.len(), 1);
    cache.set_active(&ds);
    assert!(cache.is_empty());
    assert!(cache.is_active(&ds));
}

#[test]
fn inactive_dataset_is_computed_uncached() {
    let d1 = random_dataset(80, &[3, 3], 4);
    let d2 = random_dataset(80, &[3, 3], 5);
    let mut cache = EntropyCache::for_dataset(&d1);
    let x = VariableSet::singleton(1);
    assert_eq!(cache.get_entropy(&d2, &x), entropy_bits(&d2, &x));
    assert!(cache.is_empty());
    assert_eq!(cache.stats().bypassed, 1);
    assert!(cache.is_active(&d1));

    cache.clear_active();
    assert_eq!(cache.active(), None);
    assert_eq!(cache.get_entropy(&d1, &x), entropy_bits(&d1, &x));
    assert_eq!(cache.stats().bypassed, 2);
}

#[test]
fn clones_share_the_active_slot_but_resamples_do_not() {
    let ds = random_dataset(60, &[2, 2], 6);
    let cache = EntropyCache::for_dataset(&ds);
    assert!(cache.is_active(&ds.clone()));
    let mut rng = StdRng::seed_from_u64(0);
    assert!(!cache.is_active(&ds.resample(&mut rng)));
}

#[test]
fn scoped_activation_restores_previous_dataset() {
    let d1 = random_dataset(120, &[2, 4], 7);
    let d2 = random_dataset(120, &[2, 4], 8);
    let x = VariableSet::singleton(1);
    let mut cache = EntropyCache::for_dataset(&d1);
    let h1 = cache.get_entropy(&d1, &x);

    {
        let mut scope = cache.scoped(&d2);
        assert!(scope.is_active(&d2));
        assert!(scope.is_empty());
        assert_eq!(scope.entropy(&d2, &x), entropy_bits(&d2, &x));
        assert_eq!(scope.len(), 1);
    }

    assert!(cache.is_active(&d1));
    assert!(cache.is_empty());
    assert_eq!(cache.get_entropy(&d1, &x), h1);
}

#[test]
fn nested_scopes_unwind_in_order() {
    let d0 = random_dataset(40, &[2], 9);
    let d1 = random_dataset(40, &[2], 10);
    let d2 = random_dataset(40, &[2], 11);
    let mut cache = EntropyCache::for_dataset(&d0);
    {
        let mut outer = cache.scoped(&d1);
        {
            let inner = outer.scoped(&d2);
            assert!(inner.is_active(&d2));
        }
        assert!(outer.is_active(&d1));
    }
    assert!(cache.is_active(&d0));

    let mut empty = EntropyCache::new();
    {
        let _scope = empty.scoped(&d0);
    }
    assert_eq!(empty.active(), None);
}
