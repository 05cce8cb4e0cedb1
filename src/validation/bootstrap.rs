// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bootstrap robustness of an HV optimum.
//!
//! Each resample is installed in the caller's [`EntropyCache`] through
//! [`EntropyCache::scoped`], so its entropies are memoised while it is being
//! scored and the previously active dataset is reinstalled (with a cleared
//! table) as soon as the resample is done.

use ndarray::{Array1, Array2};
use rand::Rng;
use tracing::{debug, instrument};

use crate::estimators::cache::EntropyCache;
use crate::estimators::dataset::{Dataset, VarId, VariableSet};
use crate::selection::scoring::hv_score;
use crate::validation::report::{Property, ValidationReport, ValidationResult};

#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapOutcome {
    pub passed: bool,
    pub n_boot: usize,
    /// Perturbed subset S~, or `None` when the check was vacuous.
    pub perturbed: Option<VariableSet>,
    /// Resamples with `HV(S*) > HV(S~)`.
    pub dominance_count: usize,
    pub dominance_ratio: f64,
    pub optimal_hv: Array1<f64>,
    pub perturbed_hv: Array1<f64>,
}

/// HV of each subset on `n_boot` resamples of `dataset` (with replacement).
///
/// Row `b` holds the scores on resample `b`, column `j` belongs to
/// `subsets[j]`; all subsets of one row are scored on the same resample.
#[instrument(skip(cache, dataset, subsets, rng), fields(n = dataset.n_samples()))]
pub fn bootstrap_hv_matrix<R>(
    cache: &mut EntropyCache,
    dataset: &Dataset,
    target: VarId,
    subsets: &[&VariableSet],
    n_boot: usize,
    rng: &mut R,
) -> Array2<f64>
where
    R: Rng + ?Sized,
{
    let mut scores = Array2::<f64>::zeros((n_boot, subsets.len()));
    if subsets.iter().all(|s| s.is_empty()) {
        return scores;
    }
    for b in 0..n_boot {
        let resample = dataset.resample(rng);
        let mut scope = cache.scoped(&resample);
        for (j, subset) in subsets.iter().enumerate() {
            scores[[b, j]] = hv_score(&mut *scope, &resample, target, subset).hv;
        }
        debug!(resample = b, scores = ?scores.row(b).to_vec(), "bootstrap resample scored");
    }
    scores
}

/// HV of one subset on `n_boot` resamples; all zeros for an empty subset.
pub fn bootstrap_hv_values<R>(
    cache: &mut EntropyCache,
    dataset: &Dataset,
    target: VarId,
    subset: &VariableSet,
    n_boot: usize,
    rng: &mut R,
) -> Array1<f64>
where
    R: Rng + ?Sized,
{
    bootstrap_hv_matrix(cache, dataset, target, &[subset], n_boot, rng).column(0).to_owned()
}

/// `S* ∪ {first non-target column not in S*}`, or `None` if every column is
/// already used.
pub fn default_perturbation(
    dataset: &Dataset,
    target: VarId,
    optimal: &VariableSet,
) -> Option<VariableSet> {
    dataset
        .variable_ids()
        .find(|&v| v != target && !optimal.contains(v))
        .map(|v| optimal.with(v))
}

/// Check that `HV(S*) > HV(S~)` on at least `dominance_threshold` of `n_boot`
/// paired resamples. When `perturbed` is `None`, S~ defaults to
/// [`default_perturbation`]; if none can be formed the check is vacuously true.
#[allow(clippy::too_many_arguments)]
pub fn validate_bootstrap_robustness<R>(
    cache: &mut EntropyCache,
    dataset: &Dataset,
    target: VarId,
    optimal: &VariableSet,
    perturbed: Option<&VariableSet>,
    n_boot: usize,
    dominance_threshold: f64,
    rng: &mut R,
    report: &mut ValidationReport,
) -> BootstrapOutcome
where
    R: Rng + ?Sized,
{
    report.line(format!(
        "\n--- Validating Bootstrap Robustness (n_boot={n_boot}) ---"
    ));
    report.line(format!(
        "   P_bootstrap(HV(S*) > HV(S~)) ≥ {:.0}%",
        dominance_threshold * 100.0
    ));

    let perturbed = perturbed
        .cloned()
        .or_else(|| default_perturbation(dataset, target, optimal));
    let Some(perturbed) = perturbed else {
        report.line("  No rejected variables to form a perturbed set S~. Robustness is vacuously true.");
        report.record(ValidationResult::new(Property::BootstrapRobustness, true));
        return BootstrapOutcome {
            passed: true,
            n_boot,
            perturbed: None,
            dominance_count: 0,
            dominance_ratio: 0.0,
            optimal_hv: Array1::zeros(0),
            perturbed_hv: Array1::zeros(0),
        };
    };
    report.line(format!(
        "  Comparing S* = {} with S~ = {}",
        dataset.format_set(optimal),
        dataset.format_set(&perturbed)
    ));

    let scores = bootstrap_hv_matrix(cache, dataset, target, &[optimal, &perturbed], n_boot, rng);
    let optimal_hv = scores.column(0).to_owned();
    let perturbed_hv = scores.column(1).to_owned();
    let dominance_count = optimal_hv
        .iter()
        .zip(perturbed_hv.iter())
        .filter(|(a, b)| a > b)
        .count();
    let dominance_ratio = if n_boot > 0 {
        dominance_count as f64 / n_boot as f64
    } else {
        0.0
    };
    let passed = dominance_ratio >= dominance_threshold;

    let line = format!(
        "  HV(S*) > HV(S~) in {:.1}% of {n_boot} bootstrap resamples ({dominance_count}/{n_boot}) ({})",
        dominance_ratio * 100.0,
        if passed { "PASS" } else { "FAIL" }
    );
    if passed {
        report.line(line);
    } else {
        report.warn_line(line);
    }
    let (mean_opt, std_opt) = mean_std(&optimal_hv);
    let (mean_pert, std_pert) = mean_std(&perturbed_hv);
    report.line(format!(
        "    Mean HV(S*): {mean_opt:.4} (std: {std_opt:.4}), Mean HV(S~): {mean_pert:.4} (std: {std_pert:.4})"
    ));
    report.record(
        ValidationResult::new(Property::BootstrapRobustness, passed)
            .with_evidence("dominance_ratio", dominance_ratio)
            .with_evidence("mean_hv_optimal", mean_opt)
            .with_evidence("mean_hv_perturbed", mean_pert),
    );

    BootstrapOutcome {
        passed,
        n_boot,
        perturbed: Some(perturbed),
        dominance_count,
        dominance_ratio,
        optimal_hv,
        perturbed_hv,
    }
}

fn mean_std(values: &Array1<f64>) -> (f64, f64) {
    match values.mean() {
        Some(mean) => (mean, values.std(0.0)),
        None => (0.0, 0.0),
    }
}
