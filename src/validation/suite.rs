// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end property run against a reference causal graph.
//!
//! Order: minimal sufficiency of the graph's Markov blanket, pruning of that
//! blanket with τ, brute-force HV optimum over the survivors, fragility,
//! falsifiability, superset penalty and bootstrap robustness of the optimum.
//! Each check still stands alone; this is one way to chain them.

use rand::Rng;
use tracing::info;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::estimators::cache::EntropyCache;
use crate::estimators::dataset::{Dataset, VariableSet};
use crate::selection::pruning::PruneOutcome;
use crate::selection::search::{BruteForceSearch, SearchOutcome, SubsetSearch};
use crate::validation::bootstrap::{validate_bootstrap_robustness, BootstrapOutcome};
use crate::validation::fragility::{validate_hv_fragility, FragilityOutcome};
use crate::validation::graph::CausalGraph;
use crate::validation::pruning::validate_redundancy_pruning;
use crate::validation::report::ValidationReport;
use crate::validation::sufficiency::{validate_minimal_sufficiency, SufficiencyOutcome};
use crate::validation::superset::{validate_superset_penalty, SupersetOutcome};

#[derive(Debug, Clone)]
pub struct SuiteOutcome {
    pub sufficiency: SufficiencyOutcome,
    pub pruning: PruneOutcome,
    pub optimum: SearchOutcome,
    pub fragility: FragilityOutcome,
    pub superset: SupersetOutcome,
    pub bootstrap: BootstrapOutcome,
}

impl SuiteOutcome {
    pub fn optimal_set(&self) -> &VariableSet {
        &self.optimum.subset
    }
}

/// Run every property check for `target` on `dataset`, appending to `report`.
///
/// `dataset` is made active in `cache` for the duration of the run; the
/// previously active dataset is restored afterwards.
pub fn run_property_suite<R>(
    cache: &mut EntropyCache,
    dataset: &Dataset,
    graph: &CausalGraph,
    target: &str,
    config: &EngineConfig,
    rng: &mut R,
    report: &mut ValidationReport,
) -> Result<SuiteOutcome>
where
    R: Rng + ?Sized,
{
    config.validate()?;
    let target_id = dataset.var(target)?;
    let blanket = graph.markov_blanket_in(dataset, target)?;
    let mut scope = cache.scoped(dataset);
    report.line(format!("Samples: {}", dataset.n_samples()));

    let sufficiency = validate_minimal_sufficiency(
        &mut *scope,
        dataset,
        target_id,
        &blanket,
        config.cmi_tolerance,
        report,
    );

    let pruning = validate_redundancy_pruning(
        &mut *scope,
        dataset,
        target_id,
        blanket.as_slice(),
        config.tau,
        report,
    );

    report.line("\n--- Complexity Penalty ---");
    report.line("   DL(S) is the number of variables in S.");
    let optimum = BruteForceSearch::from_config(config).search(
        &mut *scope,
        dataset,
        target_id,
        pruning.retained.as_slice(),
    )?;

    let fragility = validate_hv_fragility(
        &mut *scope,
        dataset,
        target_id,
        &optimum.subset,
        config.hv_epsilon,
        report,
    );
    report.record_falsifiability();

    let superset = validate_superset_penalty(
        &mut *scope,
        dataset,
        target_id,
        &optimum.subset,
        config.hv_epsilon,
        report,
    );

    let bootstrap = validate_bootstrap_robustness(
        &mut *scope,
        dataset,
        target_id,
        &optimum.subset,
        None,
        config.n_boot,
        config.dominance_threshold,
        rng,
        report,
    );

    info!(
        target_name = target,
        optimum = %dataset.format_set(&optimum.subset),
        all_passed = report.all_passed(),
        "property suite finished"
    );
    Ok(SuiteOutcome {
        sufficiency,
        pruning,
        optimum,
        fragility,
        superset,
        bootstrap,
    })
}
