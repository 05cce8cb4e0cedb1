// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subset selection: redundancy pruning, HV scoring and optimum search.

pub mod pruning;
pub mod scoring;
pub mod search;

pub use pruning::{prune_redundant, PruneAction, PruneDecision, PruneOutcome};
pub use scoring::{description_length, hv_score, DescriptionLength, HvScore};
pub use search::{
    brute_force_optimum, BruteForceSearch, GreedyForwardSearch, SearchOutcome, SearchStrategy,
    SubsetSearch,
};
