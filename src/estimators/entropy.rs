// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::Array1;

use crate::estimators::dataset::{Dataset, VariableSet};
use crate::estimators::discrete_utils::{count_joint_states, reduce_joint_space_compact};
pub use crate::estimators::traits::{GlobalValue, LocalValues};

/// Shannon entropy in bits of a probability mass function: `-Σ p log2 p` over
/// `p > 0`. An empty input gives `0.0`.
pub fn entropy_from_probs<I>(probs: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut h = 0.0_f64;
    for p in probs {
        if p > 0.0 {
            h -= p * p.log2();
        }
    }
    h
}

/// Plug-in joint entropy `H(vars)` in bits, computed directly from counts.
pub fn entropy_bits(dataset: &Dataset, vars: &VariableSet) -> f64 {
    if vars.is_empty() || dataset.n_samples() == 0 {
        return 0.0;
    }
    let counts = count_joint_states(dataset, vars.as_slice());
    entropy_from_probs(counts.probabilities())
}

/// Maximum-likelihood joint entropy estimator (log base 2) over a subset of
/// dataset columns.
///
/// The global value is `H = -Σ p_i log2 p_i` with `p_i = n_i / N`; local values are
/// the per-sample surprisals `-log2 p(x_t)`, whose mean is the global value.
pub struct DiscreteEntropy {
    state_ids: Array1<i32>,
    counts: Vec<usize>,
}

impl DiscreteEntropy {
    pub fn new(dataset: &Dataset, vars: &VariableSet) -> Self {
        let (state_ids, n_states) = reduce_joint_space_compact(dataset, vars.as_slice());
        let mut counts = vec![0usize; n_states];
        for &id in state_ids.iter() {
            counts[id as usize] += 1;
        }
        Self { state_ids, counts }
    }

    pub fn n_samples(&self) -> usize {
        self.state_ids.len()
    }

    pub fn n_states(&self) -> usize {
        self.counts.len()
    }
}

impl GlobalValue for DiscreteEntropy {
    fn global_value(&self) -> f64 {
        let n_f = self.n_samples() as f64;
        if n_f == 0.0 {
            return 0.0;
        }
        entropy_from_probs(self.counts.iter().map(|&c| c as f64 / n_f))
    }
}

impl LocalValues for DiscreteEntropy {
    fn local_values(&self) -> Array1<f64> {
        let n_f = self.n_samples() as f64;
        self.state_ids
            .mapv(|id| -(self.counts[id as usize] as f64 / n_f).log2())
    }
}
