// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # infosubset
//!
//! Information-theoretic subset scoring and validation over categorical data.
//! Given a table of discrete samples and a target column, the crate estimates
//! entropy, mutual information and conditional mutual information from
//! empirical frequencies, prunes redundant variables, scores subsets with a
//! complexity-normalised "hard-to-vary" (HV) criterion and checks a set of
//! theoretical properties against data drawn from known causal structures.
//!
//! ## Quick Start
//!
//! ```rust
//! use infosubset::estimators::{Dataset, EntropyCache, VariableSet};
//! use infosubset::estimators::mutual_information::mutual_information;
//! use infosubset::selection::{brute_force_optimum, hv_score};
//!
//! let ds = Dataset::from_rows(
//!     &["x", "noise", "t"],
//!     vec![vec![0, 0, 0], vec![1, 0, 1], vec![0, 1, 0], vec![1, 1, 1]],
//! )
//! .unwrap();
//! let (x, t) = (ds.var("x").unwrap(), ds.var("t").unwrap());
//!
//! let mut cache = EntropyCache::for_dataset(&ds);
//! assert!((mutual_information(&mut cache, &ds, x, t) - 1.0).abs() < 1e-12);
//!
//! let best = brute_force_optimum(&mut cache, &ds, t, &[x, ds.var("noise").unwrap()]);
//! assert_eq!(best.subset, VariableSet::singleton(x));
//! assert_eq!(hv_score(&mut cache, &ds, t, &VariableSet::new()).hv, 0.0);
//! ```
//!
//! ## Layers
//!
//! 1. **Estimators** ([`estimators`]): datasets of compact categorical codes,
//!    joint-state counting, plug-in entropy in bits, a dataset-scoped entropy
//!    cache and the MI / CMI / joint-MI measures derived from it.
//! 2. **Selection** ([`selection`]): redundancy pruning, description length,
//!    HV scoring and subset search strategies.
//! 3. **Validation** ([`validation`]): minimal sufficiency, pruning effect,
//!    HV maximisation and perturbation fragility, superset penalty and
//!    bootstrap robustness, each reporting into an append-only log.
//!
//! ## Limitations
//!
//! Only finite discrete alphabets are supported, and all estimates are
//! plug-in (maximum likelihood) with no bias correction. Exhaustive search is
//! exponential in the candidate pool; keep pools small (about 15 variables).

pub mod config;
pub mod error;
pub mod estimators;
pub mod selection;
pub mod validation;

pub use config::EngineConfig;
pub use error::{ConfigError, InfoSubsetError, Result};
