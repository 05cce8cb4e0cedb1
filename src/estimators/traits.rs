// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::Array1;

use crate::estimators::dataset::{Dataset, VariableSet};

pub trait GlobalValue {
    /// Compute and return the global value of the measure.
    fn global_value(&self) -> f64;
}

pub trait LocalValues: GlobalValue {
    /// Compute and return the per-sample values of the measure.
    fn local_values(&self) -> Array1<f64>;

    /// Global value recovered as the mean of the local values (0.0 when there
    /// are no samples).
    fn global_from_local(&self) -> f64 {
        self.local_values().mean().unwrap_or(0.0)
    }
}

/// Source of joint Shannon entropies (bits) over variable subsets of a dataset.
///
/// Every information measure in the crate is derived from this one seam, so any
/// implementation (memoised or direct) can back them.
pub trait EntropyEstimator {
    /// Joint entropy `H(vars)` in bits; `0.0` for an empty set or dataset.
    fn entropy(&mut self, dataset: &Dataset, vars: &VariableSet) -> f64;
}
