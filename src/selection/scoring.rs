// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::estimators::dataset::{Dataset, VarId, VariableSet};
use crate::estimators::mutual_information::joint_mutual_information;
use crate::estimators::traits::EntropyEstimator;

/// How the complexity of a subset is measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptionLength {
    /// `DL(S) = |S|`.
    #[default]
    Count,
}

impl DescriptionLength {
    pub fn of(self, subset: &VariableSet) -> usize {
        match self {
            Self::Count => subset.len(),
        }
    }
}

/// `DL(S) = |S|`.
pub fn description_length(subset: &VariableSet) -> usize {
    DescriptionLength::Count.of(subset)
}

/// Hard-to-vary score of a subset together with its two factors.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HvScore {
    /// `I(T;S)` in bits.
    pub information: f64,
    /// `DL(S)`.
    pub description_length: usize,
    /// `I(T;S) / DL(S)`, or `0.0` when `DL(S) = 0`.
    pub hv: f64,
}

impl HvScore {
    pub const ZERO: HvScore = HvScore {
        information: 0.0,
        description_length: 0,
        hv: 0.0,
    };
}

/// `HV(S) = I(T;S) / DL(S)`, with `HV(∅) = 0.0`.
pub fn hv_score<E>(est: &mut E, dataset: &Dataset, target: VarId, subset: &VariableSet) -> HvScore
where
    E: EntropyEstimator + ?Sized,
{
    let dl = description_length(subset);
    if dl == 0 {
        return HvScore::ZERO;
    }
    let information = joint_mutual_information(est, dataset, target, subset);
    HvScore {
        information,
        description_length: dl,
        hv: information / dl as f64,
    }
}
