// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HV-optimal subset search strategies.
//!
//! Defines the [`SubsetSearch`] trait and concrete implementations.

use tracing::{info, instrument, warn};

use crate::config::EngineConfig;
use crate::error::{InfoSubsetError, Result};
use crate::estimators::dataset::{Dataset, VarId, VariableSet};
use crate::estimators::traits::EntropyEstimator;
use crate::selection::scoring::{hv_score, HvScore};

/// Pools above this size make exhaustive enumeration impractical.
pub const RECOMMENDED_MAX_POOL: usize = 15;

/// Best subset found by a search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub subset: VariableSet,
    pub score: HvScore,
    /// Number of subsets scored.
    pub evaluated: usize,
}

impl SearchOutcome {
    fn empty() -> Self {
        Self {
            subset: VariableSet::new(),
            score: HvScore::ZERO,
            evaluated: 0,
        }
    }
}

/// A strategy for choosing a high-HV subset from a candidate pool.
pub trait SubsetSearch {
    /// Search `candidates` for the subset with the greatest HV score with
    /// respect to `target`. Returns the empty set when no non-empty subset
    /// scores above zero.
    fn search<E>(
        &self,
        est: &mut E,
        dataset: &Dataset,
        target: VarId,
        candidates: &[VarId],
    ) -> Result<SearchOutcome>
    where
        E: EntropyEstimator + ?Sized;
}

/// Enum wrapper for runtime strategy selection with static dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchStrategy {
    BruteForce(BruteForceSearch),
    GreedyForward(GreedyForwardSearch),
}

impl SubsetSearch for SearchStrategy {
    fn search<E>(
        &self,
        est: &mut E,
        dataset: &Dataset,
        target: VarId,
        candidates: &[VarId],
    ) -> Result<SearchOutcome>
    where
        E: EntropyEstimator + ?Sized,
    {
        match self {
            Self::BruteForce(s) => s.search(est, dataset, target, candidates),
            Self::GreedyForward(s) => s.search(est, dataset, target, candidates),
        }
    }
}

/// Exhaustive enumeration of every non-empty subset, by increasing size and in
/// lexicographic candidate order within a size.
///
/// A subset replaces the incumbent only if it beats it by more than `epsilon`,
/// so among near-ties the first (smallest) subset wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BruteForceSearch {
    pub epsilon: f64,
    /// Refuse pools larger than this. `None` enumerates whatever it is given.
    pub pool_limit: Option<usize>,
}

impl Default for BruteForceSearch {
    fn default() -> Self {
        Self {
            epsilon: 1e-9,
            pool_limit: None,
        }
    }
}

impl BruteForceSearch {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            epsilon: config.hv_epsilon,
            pool_limit: config.max_search_pool,
        }
    }

    pub fn with_pool_limit(mut self, limit: usize) -> Self {
        self.pool_limit = Some(limit);
        self
    }
}

impl SubsetSearch for BruteForceSearch {
    #[instrument(skip(self, est, dataset, candidates), fields(pool = candidates.len()))]
    fn search<E>(
        &self,
        est: &mut E,
        dataset: &Dataset,
        target: VarId,
        candidates: &[VarId],
    ) -> Result<SearchOutcome>
    where
        E: EntropyEstimator + ?Sized,
    {
        let pool = dedup_in_order(candidates);
        if let Some(limit) = self.pool_limit {
            if pool.len() > limit {
                return Err(InfoSubsetError::SearchPoolTooLarge {
                    size: pool.len(),
                    limit,
                });
            }
        }
        if pool.len() > RECOMMENDED_MAX_POOL {
            warn!(
                pool = pool.len(),
                subsets = 2f64.powi(pool.len() as i32) - 1.0,
                "exhaustive search over a large pool"
            );
        }
        let outcome = exhaustive(est, dataset, target, &pool, self.epsilon);
        info!(
            subset = %dataset.format_set(&outcome.subset),
            hv = outcome.score.hv,
            evaluated = outcome.evaluated,
            "brute-force optimum"
        );
        Ok(outcome)
    }
}

/// Exhaustive HV optimum over `candidates` with the default tie tolerance and
/// no pool limit. The caller is responsible for keeping the pool small.
pub fn brute_force_optimum<E>(
    est: &mut E,
    dataset: &Dataset,
    target: VarId,
    candidates: &[VarId],
) -> SearchOutcome
where
    E: EntropyEstimator + ?Sized,
{
    let pool = dedup_in_order(candidates);
    exhaustive(est, dataset, target, &pool, BruteForceSearch::default().epsilon)
}

fn exhaustive<E>(
    est: &mut E,
    dataset: &Dataset,
    target: VarId,
    pool: &[VarId],
    epsilon: f64,
) -> SearchOutcome
where
    E: EntropyEstimator + ?Sized,
{
    let mut best = SearchOutcome::empty();
    for size in 1..=pool.len() {
        let mut combo: Vec<usize> = (0..size).collect();
        loop {
            let subset: VariableSet = combo.iter().map(|&i| pool[i]).collect();
            let score = hv_score(est, dataset, target, &subset);
            best.evaluated += 1;
            if score.hv > best.score.hv + epsilon {
                best.subset = subset;
                best.score = score;
            }
            if !next_combination(&mut combo, pool.len()) {
                break;
            }
        }
    }
    best
}

/// Advance `combo` (strictly increasing indices into `0..n`) to the next
/// combination in lexicographic order. Returns `false` after the last one.
fn next_combination(combo: &mut [usize], n: usize) -> bool {
    let k = combo.len();
    let mut i = k;
    while i > 0 {
        i -= 1;
        if combo[i] < n - k + i {
            combo[i] += 1;
            for j in i + 1..k {
                combo[j] = combo[j - 1] + 1;
            }
            return true;
        }
    }
    false
}

/// Forward selection: repeatedly add the candidate that raises HV the most,
/// stopping when no addition improves it by more than `epsilon`.
///
/// Quadratic in the pool size, but not guaranteed to find the exhaustive optimum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreedyForwardSearch {
    pub epsilon: f64,
}

impl Default for GreedyForwardSearch {
    fn default() -> Self {
        Self { epsilon: 1e-9 }
    }
}

impl SubsetSearch for GreedyForwardSearch {
    #[instrument(skip(self, est, dataset, candidates), fields(pool = candidates.len()))]
    fn search<E>(
        &self,
        est: &mut E,
        dataset: &Dataset,
        target: VarId,
        candidates: &[VarId],
    ) -> Result<SearchOutcome>
    where
        E: EntropyEstimator + ?Sized,
    {
        let pool = dedup_in_order(candidates);
        let mut current = SearchOutcome::empty();
        loop {
            let mut step: Option<(VariableSet, HvScore)> = None;
            for &x in pool.iter().filter(|&&x| !current.subset.contains(x)) {
                let subset = current.subset.with(x);
                let score = hv_score(est, dataset, target, &subset);
                current.evaluated += 1;
                let incumbent = step.as_ref().map_or(current.score.hv, |(_, s)| s.hv);
                if score.hv > incumbent + self.epsilon {
                    step = Some((subset, score));
                }
            }
            match step {
                Some((subset, score)) => {
                    current.subset = subset;
                    current.score = score;
                }
                None => break,
            }
        }
        info!(
            subset = %dataset.format_set(&current.subset),
            hv = current.score.hv,
            evaluated = current.evaluated,
            "greedy forward optimum"
        );
        Ok(current)
    }
}

fn dedup_in_order(candidates: &[VarId]) -> Vec<VarId> {
    let mut seen = VariableSet::new();
    candidates.iter().copied().filter(|&v| seen.insert(v)).collect()
}
