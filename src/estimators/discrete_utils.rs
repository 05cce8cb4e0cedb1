// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::Array1;
use std::collections::HashMap;

use crate::estimators::dataset::{Dataset, VarId};

/// Joint state spaces up to this size are counted in a dense vector indexed by
/// the mixed-radix state code; larger ones fall back to hashing.
pub const MAX_DENSE_STATES: usize = 4096;

/// Occupied-state counts of a joint variable, without the state labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JointCounts {
    /// Count of every observed joint state (no zeros).
    pub counts: Vec<usize>,
    /// Total number of samples.
    pub n: usize,
}

impl JointCounts {
    pub fn n_states(&self) -> usize {
        self.counts.len()
    }

    /// Empirical probability `count / n` of each observed state.
    pub fn probabilities(&self) -> impl Iterator<Item = f64> + '_ {
        let n_f = self.n as f64;
        self.counts.iter().map(move |&c| c as f64 / n_f)
    }
}

/// Empirical probability mass table of a joint variable, keyed by the tuple of
/// per-column codes in the order the variables were requested.
#[derive(Debug, Clone, Default)]
pub struct EmpiricalDistribution {
    pub probs: HashMap<Vec<i32>, f64>,
    pub n: usize,
}

impl EmpiricalDistribution {
    pub fn len(&self) -> usize {
        self.probs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    pub fn prob(&self, state: &[i32]) -> f64 {
        self.probs.get(state).copied().unwrap_or(0.0)
    }
}

/// Count joint occurrences of `vars` into a probability mass table.
///
/// An empty variable list yields an empty table with `n = 0`.
pub fn empirical_distribution(dataset: &Dataset, vars: &[VarId]) -> EmpiricalDistribution {
    if vars.is_empty() {
        return EmpiricalDistribution::default();
    }
    let codes = dataset.codes();
    let mut counts: HashMap<Vec<i32>, usize> = HashMap::new();
    for row in codes.rows() {
        let key: Vec<i32> = vars.iter().map(|&v| row[v]).collect();
        *counts.entry(key).or_insert(0) += 1;
    }
    let n = dataset.n_samples();
    let n_f = n as f64;
    let probs = counts
        .into_iter()
        .map(|(state, cnt)| (state, cnt as f64 / n_f))
        .collect();
    EmpiricalDistribution { probs, n }
}

/// Count the occupied joint states of `vars`.
///
/// Small state spaces are counted densely over the mixed-radix code; otherwise
/// rows are first reduced to compact joint ids.
pub fn count_joint_states(dataset: &Dataset, vars: &[VarId]) -> JointCounts {
    let n = dataset.n_samples();
    if vars.is_empty() || n == 0 {
        return JointCounts { counts: Vec::new(), n };
    }

    if let Some(space) = state_space_size(dataset, vars) {
        if space <= MAX_DENSE_STATES {
            let strides = radix_strides(dataset, vars);
            let mut dense = vec![0usize; space];
            for row in dataset.codes().rows() {
                let mut code = 0usize;
                for (&v, &stride) in vars.iter().zip(strides.iter()) {
                    code += row[v] as usize * stride;
                }
                dense[code] += 1;
            }
            dense.retain(|&c| c != 0);
            return JointCounts { counts: dense, n };
        }
    }

    let (ids, n_states) = reduce_joint_space_compact(dataset, vars);
    let mut counts = vec![0usize; n_states];
    for &id in ids.iter() {
        counts[id as usize] += 1;
    }
    JointCounts { counts, n }
}

/// Map every sample's joint state over `vars` to a compact id in
/// `0..n_states`, preserving first-occurrence order.
///
/// Returns the id per sample and the number of distinct states.
pub fn reduce_joint_space_compact(dataset: &Dataset, vars: &[VarId]) -> (Array1<i32>, usize) {
    let n = dataset.n_samples();
    if vars.is_empty() {
        // Every sample shares the single empty state.
        return (Array1::zeros(n), usize::from(n > 0));
    }

    let codes = dataset.codes();
    let mut out: Vec<i32> = Vec::with_capacity(n);

    if state_space_size(dataset, vars).is_some() {
        let strides = radix_strides(dataset, vars);
        let mut map: HashMap<usize, i32> = HashMap::new();
        for row in codes.rows() {
            let mut code = 0usize;
            for (&v, &stride) in vars.iter().zip(strides.iter()) {
                code += row[v] as usize * stride;
            }
            let next = map.len() as i32;
            out.push(*map.entry(code).or_insert(next));
        }
        return (Array1::from(out), map.len());
    }

    // State space too large for a machine word: key on the code tuple itself.
    let mut map: HashMap<Vec<i32>, i32> = HashMap::new();
    for row in codes.rows() {
        let key: Vec<i32> = vars.iter().map(|&v| row[v]).collect();
        let next = map.len() as i32;
        out.push(*map.entry(key).or_insert(next));
    }
    (Array1::from(out), map.len())
}

/// Product of the column cardinalities, or `None` on overflow.
fn state_space_size(dataset: &Dataset, vars: &[VarId]) -> Option<usize> {
    let schema = dataset.schema();
    vars.iter()
        .try_fold(1usize, |acc, &v| acc.checked_mul(schema.cardinality(v).max(1)))
}

fn radix_strides(dataset: &Dataset, vars: &[VarId]) -> Vec<usize> {
    let schema = dataset.schema();
    let mut strides = Vec::with_capacity(vars.len());
    let mut stride = 1usize;
    for &v in vars {
        strides.push(stride);
        stride *= schema.cardinality(v).max(1);
    }
    strides
}
