// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Engine configuration.
//!
//! [`EngineConfig`] gathers every tunable used by pruning, search and the
//! property validators. Defaults reproduce the self-test setup the engine was
//! calibrated on.
//!
//! ```rust
//! use infosubset::config::EngineConfig;
//!
//! let cfg = EngineConfig::default();
//! cfg.validate().unwrap();
//! assert_eq!(cfg.n_boot, 100);
//! assert!(cfg.seed.is_none());
//! ```

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Tunables for the pruner, the subset search and the validators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Redundancy-pruning threshold τ in bits. A variable is pruned when its
    /// conditional contribution is `<= tau`. Default: **0.02**.
    pub tau: f64,

    /// Minimal-sufficiency tolerance in bits. Default: **1e-3**.
    pub cmi_tolerance: f64,

    /// Tie tolerance of the subset search, and the level below which an HV
    /// score counts as zero in the perturbation checks. Default: **1e-9**.
    pub hv_epsilon: f64,

    /// Number of bootstrap resamples. Default: **100**.
    pub n_boot: usize,

    /// Minimum fraction of resamples in which HV(S*) must beat HV(S~).
    /// Default: **0.95**.
    pub dominance_threshold: f64,

    /// RNG seed for bootstrap resampling. `None` draws from OS entropy, so
    /// robustness results are not bit-reproducible. Default: **None**.
    pub seed: Option<u64>,

    /// Optional cap on the brute-force candidate pool. Default: **None**.
    pub max_search_pool: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tau: 0.02,
            cmi_tolerance: 1e-3,
            hv_epsilon: 1e-9,
            n_boot: 100,
            dominance_threshold: 0.95,
            seed: None,
            max_search_pool: None,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a configuration from a JSON string. Missing fields
    /// take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let cfg: EngineConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load and validate a configuration from a JSON file.
    pub fn from_json(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Pretty-printed JSON form of this configuration.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every field and report the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tau.is_finite() && self.tau >= 0.0) {
            return Err(ConfigError::invalid_value("tau", "must be finite and >= 0.0"));
        }
        if !(self.cmi_tolerance.is_finite() && self.cmi_tolerance >= 0.0) {
            return Err(ConfigError::invalid_value(
                "cmi_tolerance",
                "must be finite and >= 0.0",
            ));
        }
        if !(self.hv_epsilon.is_finite() && self.hv_epsilon >= 0.0) {
            return Err(ConfigError::invalid_value(
                "hv_epsilon",
                "must be finite and >= 0.0",
            ));
        }
        if self.n_boot == 0 {
            return Err(ConfigError::invalid_value("n_boot", "must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.dominance_threshold) {
            return Err(ConfigError::invalid_value(
                "dominance_threshold",
                format!("must lie in [0, 1], got {}", self.dominance_threshold),
            ));
        }
        if self.max_search_pool == Some(0) {
            return Err(ConfigError::invalid_value("max_search_pool", "must be > 0 when set"));
        }
        Ok(())
    }

    /// RNG for bootstrap resampling: seeded when `seed` is set, otherwise from
    /// OS entropy.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
