// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mutual information measures derived from joint entropies.
//!
//! All three measures use the entropy-summation formulas and are clamped at
//! zero, since plug-in estimation noise can push the sums slightly negative.
//! No separate bias correction is applied: finite-sample bias is inherited from
//! the entropy estimator.

use crate::estimators::dataset::{Dataset, VarId, VariableSet};
use crate::estimators::traits::EntropyEstimator;

/// `I(X;T) = H(X) + H(T) - H(X,T)`.
pub fn mutual_information<E>(est: &mut E, dataset: &Dataset, x: VarId, t: VarId) -> f64
where
    E: EntropyEstimator + ?Sized,
{
    let h_x = est.entropy(dataset, &VariableSet::singleton(x));
    let h_t = est.entropy(dataset, &VariableSet::singleton(t));
    let h_xt = est.entropy(dataset, &VariableSet::from_iter([x, t]));
    (h_x + h_t - h_xt).max(0.0)
}

/// `I(X;T|S) = H(X,S) + H(T,S) - H(S) - H(X,T,S)`. With an empty `S` this is
/// [`mutual_information`].
pub fn conditional_mutual_information<E>(
    est: &mut E,
    dataset: &Dataset,
    x: VarId,
    t: VarId,
    cond: &VariableSet,
) -> f64
where
    E: EntropyEstimator + ?Sized,
{
    let h_xs = est.entropy(dataset, &cond.with(x));
    let h_ts = est.entropy(dataset, &cond.with(t));
    let h_s = est.entropy(dataset, cond);
    let h_xts = est.entropy(dataset, &cond.with(x).with(t));
    (h_xs + h_ts - h_s - h_xts).max(0.0)
}

/// `I(T;S) = H(T) + H(S) - H(T,S)` between the target and a whole subset;
/// `0.0` for an empty subset.
pub fn joint_mutual_information<E>(
    est: &mut E,
    dataset: &Dataset,
    t: VarId,
    subset: &VariableSet,
) -> f64
where
    E: EntropyEstimator + ?Sized,
{
    if subset.is_empty() {
        return 0.0;
    }
    let h_t = est.entropy(dataset, &VariableSet::singleton(t));
    let h_s = est.entropy(dataset, subset);
    let h_ts = est.entropy(dataset, &subset.with(t));
    (h_t + h_s - h_ts).max(0.0)
}
