// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod cache;
pub mod dataset;
pub mod discrete_utils;
pub mod entropy;
pub mod mutual_information;
pub mod traits;

pub use cache::{EntropyCache, DirectEntropy};
pub use dataset::{Dataset, DatasetId, VarId, VariableSet};
pub use traits::{EntropyEstimator, GlobalValue, LocalValues};
