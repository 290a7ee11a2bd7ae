//! Annealing passes over growing generator sets.
//!
//! [`Optimizer::optimize`] runs one pass for an explicit generator list.
//! [`Optimizer::sweep`] repeats the pass with the first `m` Hamiltonian terms
//! as generators for `m = 2..=n_terms` and keeps every result.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::annealing::{AnnealOutcome, ProgressObserver, SimulatedAnnealer, random_angles};
use crate::cache::ComposeCache;
use crate::config::AnnealingConfig;
use crate::error::AnnealResult;
use crate::expansion::PauliExpansion;
use crate::expectation::EnergyEvaluator;
use crate::format::{AnsatzStrings, format_ansatz};
use crate::hamiltonian::{Hamiltonian, MIN_SWEEP_TERMS, WeightedTerm};

/// Everything one annealing pass produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Number of generators.
    pub m: usize,
    /// Generators the ansatz was built from.
    pub generators: Vec<WeightedTerm>,
    /// Optimized angles, one per generator.
    pub angles: Vec<f64>,
    /// Energy at `angles`.
    pub energy: f64,
    /// Ansatz expansion at `angles`.
    pub expansion: PauliExpansion,
    /// Symbolic and numeric ansatz strings.
    pub ansatz: AnsatzStrings,
    /// Schedule statistics.
    pub outcome: AnnealOutcome,
}

/// Results of an m-sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    /// One result per `m`, in increasing order.
    pub entries: Vec<OptimizationResult>,
    /// Index into `entries` of the lowest energy.
    pub best_index: usize,
}

impl SweepReport {
    /// The lowest-energy pass.
    pub fn best(&self) -> Option<&OptimizationResult> {
        self.entries.get(self.best_index)
    }
}

/// Runs annealing passes against a fixed Hamiltonian.
///
/// Owns the compose cache, so products computed in one pass are reused by
/// every later pass.
#[derive(Debug)]
pub struct Optimizer {
    hamiltonian: Hamiltonian,
    config: AnnealingConfig,
    cache: ComposeCache,
}

impl Optimizer {
    /// Validate `config` and allocate the cache.
    pub fn new(hamiltonian: Hamiltonian, config: AnnealingConfig) -> AnnealResult<Self> {
        config.validate()?;
        let cache = ComposeCache::new(config.cache_capacity)?;
        Ok(Self {
            hamiltonian,
            config,
            cache,
        })
    }

    /// The Hamiltonian every pass is evaluated against.
    pub fn hamiltonian(&self) -> &Hamiltonian {
        &self.hamiltonian
    }

    /// The validated annealing configuration.
    pub fn config(&self) -> &AnnealingConfig {
        &self.config
    }

    /// The compose cache shared by all passes.
    pub fn cache(&self) -> &ComposeCache {
        &self.cache
    }

    /// One annealing pass over `generators` starting at `initial`.
    pub fn optimize<R, O>(
        &self,
        generators: &[WeightedTerm],
        initial: &[f64],
        rng: &mut R,
        observer: &O,
    ) -> AnnealResult<OptimizationResult>
    where
        R: Rng + ?Sized,
        O: ProgressObserver + ?Sized,
    {
        let evaluator = EnergyEvaluator::new(self.hamiltonian.terms(), generators, &self.cache)
            .with_prune_epsilon(self.config.prune_epsilon);

        let outcome = SimulatedAnnealer::new(&evaluator, &self.config).run(initial, rng, observer)?;
        let expansion = evaluator.ansatz(&outcome.best_angles)?;
        let ansatz = format_ansatz(generators, &expansion);

        let stats = self.cache.statistics();
        info!(
            m = generators.len(),
            energy = outcome.best_energy,
            u_terms = expansion.len(),
            "pass finished"
        );
        debug!(
            hits = stats.hits,
            misses = stats.misses,
            hit_rate = stats.hit_rate(),
            "compose cache"
        );

        Ok(OptimizationResult {
            m: generators.len(),
            generators: generators.to_vec(),
            angles: outcome.best_angles.clone(),
            energy: outcome.best_energy,
            expansion,
            ansatz,
            outcome,
        })
    }

    /// Run passes for `m = 2..=n_terms`, each from a fresh uniform start.
    ///
    /// `observer_factory` is called once per pass with `m`.
    pub fn sweep<R, O, F>(&self, rng: &mut R, mut observer_factory: F) -> AnnealResult<SweepReport>
    where
        R: Rng + ?Sized,
        O: ProgressObserver,
        F: FnMut(usize) -> O,
    {
        self.hamiltonian.ensure_min_terms(MIN_SWEEP_TERMS)?;

        let mut entries = Vec::new();
        for m in MIN_SWEEP_TERMS..=self.hamiltonian.n_terms() {
            let generators = self.hamiltonian.generators(m)?;
            let initial = random_angles(m, rng);
            let observer = observer_factory(m);
            entries.push(self.optimize(generators, &initial, rng, &observer)?);
        }

        let best_index = entries
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.energy.total_cmp(&b.1.energy))
            .map_or(0, |(i, _)| i);

        info!(passes = entries.len(), best_m = best_index + MIN_SWEEP_TERMS, "sweep finished");
        Ok(SweepReport {
            entries,
            best_index,
        })
    }
}
