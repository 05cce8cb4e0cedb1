// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Memoised entropy scoped to one active dataset.
//!
//! An [`EntropyCache`] remembers `H(S)` per canonical [`VariableSet`], but only
//! for the dataset it currently treats as *active*. Installing any dataset
//! (even the same one again) clears the memo table, so a value computed against
//! one dataset can never be served for another. Requests against a dataset that
//! is not active are computed directly and not stored.
//!
//! Temporary substitution (one bootstrap resample, say) goes through
//! [`EntropyCache::scoped`], which restores the previously active dataset and
//! clears the table again when the guard is dropped.
//!
//! The cache holds no lock: concurrent computations use one cache each.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use tracing::trace;

use crate::estimators::dataset::{Dataset, DatasetId, VariableSet};
use crate::estimators::entropy::entropy_bits;
use crate::estimators::traits::EntropyEstimator;

/// Hit/miss counters. Observational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Requests for a dataset other than the active one.
    pub bypassed: u64,
}

#[derive(Debug, Default)]
pub struct EntropyCache {
    active: Option<DatasetId>,
    memo: HashMap<VariableSet, f64>,
    stats: CacheStats,
}

impl EntropyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache with `dataset` already installed as active.
    pub fn for_dataset(dataset: &Dataset) -> Self {
        let mut cache = Self::new();
        cache.set_active(dataset);
        cache
    }

    /// Install `dataset` as active and unconditionally clear the memo table.
    pub fn set_active(&mut self, dataset: &Dataset) {
        self.install(Some(dataset.id()));
    }

    /// Drop the active dataset; every request is then computed directly.
    pub fn clear_active(&mut self) {
        self.install(None);
    }

    pub fn active(&self) -> Option<DatasetId> {
        self.active
    }

    pub fn is_active(&self, dataset: &Dataset) -> bool {
        self.active == Some(dataset.id())
    }

    fn install(&mut self, active: Option<DatasetId>) {
        trace!(?active, dropped = self.memo.len(), "entropy cache swap");
        self.active = active;
        self.memo.clear();
    }

    /// `H(vars)` in bits, memoised when `dataset` is the active dataset.
    pub fn get_entropy(&mut self, dataset: &Dataset, vars: &VariableSet) -> f64 {
        if vars.is_empty() {
            return 0.0;
        }
        if !self.is_active(dataset) {
            self.stats.bypassed += 1;
            return entropy_bits(dataset, vars);
        }
        if let Some(&h) = self.memo.get(vars) {
            self.stats.hits += 1;
            return h;
        }
        self.stats.misses += 1;
        let h = entropy_bits(dataset, vars);
        self.memo.insert(vars.clone(), h);
        h
    }

    /// Make `dataset` active until the returned guard is dropped; the previous
    /// active dataset is then reinstalled and the memo table cleared.
    pub fn scoped(&mut self, dataset: &Dataset) -> ScopedActivation<'_> {
        let previous = self.active;
        self.set_active(dataset);
        ScopedActivation {
            cache: self,
            previous,
        }
    }

    /// Number of memoised entries.
    pub fn len(&self) -> usize {
        self.memo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

impl EntropyEstimator for EntropyCache {
    fn entropy(&mut self, dataset: &Dataset, vars: &VariableSet) -> f64 {
        self.get_entropy(dataset, vars)
    }
}

/// Guard returned by [`EntropyCache::scoped`].
pub struct ScopedActivation<'c> {
    cache: &'c mut EntropyCache,
    previous: Option<DatasetId>,
}

impl Deref for ScopedActivation<'_> {
    type Target = EntropyCache;

    fn deref(&self) -> &EntropyCache {
        self.cache
    }
}

impl DerefMut for ScopedActivation<'_> {
    fn deref_mut(&mut self) -> &mut EntropyCache {
        self.cache
    }
}

impl EntropyEstimator for ScopedActivation<'_> {
    fn entropy(&mut self, dataset: &Dataset, vars: &VariableSet) -> f64 {
        self.cache.get_entropy(dataset, vars)
    }
}

impl Drop for ScopedActivation<'_> {
    fn drop(&mut self) {
        self.cache.install(self.previous);
    }
}

/// Uncached entropy: every request is counted from scratch.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectEntropy;

impl EntropyEstimator for DirectEntropy {
    fn entropy(&mut self, dataset: &Dataset, vars: &VariableSet) -> f64 {
        entropy_bits(dataset, vars)
    }
}
