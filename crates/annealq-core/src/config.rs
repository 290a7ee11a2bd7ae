//! Annealing configuration.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with `ANNEALQ_` prefix)
//!
//! Precedence (highest to lowest): environment variables, configuration
//! file, default values. Command-line flags are layered on top by the CLI.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_CACHE_CAPACITY;
use crate::error::{AnnealError, AnnealResult};
use crate::expansion::DEFAULT_PRUNE_EPSILON;

/// Energy a Metropolis candidate is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptanceReference {
    /// Best energy seen so far; biases acceptance toward global improvement.
    #[default]
    BestKnown,
    /// Energy of the current state (textbook Metropolis).
    Current,
}

/// How thermalization candidates are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThermalizationStrategy {
    /// Gaussian perturbation of the current vector at the level's step size.
    #[default]
    LocalPerturbation,
    /// Fresh draw scaled by the generator coefficient magnitudes.
    CoefficientScaled,
}

/// Parameters of the cooling schedule and the evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnealingConfig {
    /// Starting temperature T₀.
    #[serde(default = "default_initial_temperature")]
    pub initial_temperature: f64,

    /// Factor applied to T after each level, in (0, 1).
    #[serde(default = "default_cooling_rate")]
    pub cooling_rate: f64,

    /// The schedule stops once T ≤ this value.
    #[serde(default = "default_minimum_temperature")]
    pub minimum_temperature: f64,

    /// Main-phase iterations per temperature level.
    #[serde(default = "default_iterations_per_temperature")]
    pub iterations_per_temperature: usize,

    /// Gaussian standard deviation at T₀; scaled by T/T₀ as the system cools.
    #[serde(default = "default_step_size")]
    pub step_size: f64,

    /// Thermalization iterations as a fraction of `iterations_per_temperature`.
    #[serde(default = "default_thermalization_fraction")]
    pub thermalization_fraction: f64,

    /// Coefficient magnitude below which expansion entries are dropped.
    #[serde(default = "default_prune_epsilon")]
    pub prune_epsilon: f64,

    /// Capacity of the compose cache.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Reference energy for the Metropolis test.
    #[serde(default)]
    pub acceptance: AcceptanceReference,

    /// Thermalization candidate strategy.
    #[serde(default)]
    pub thermalization: ThermalizationStrategy,

    /// Seed for reproducible runs; `None` draws from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_initial_temperature() -> f64 {
    50.0
}

fn default_cooling_rate() -> f64 {
    0.98
}

fn default_minimum_temperature() -> f64 {
    1e-6
}

fn default_iterations_per_temperature() -> usize {
    38
}

fn default_step_size() -> f64 {
    0.05
}

fn default_thermalization_fraction() -> f64 {
    0.2
}

fn default_prune_epsilon() -> f64 {
    DEFAULT_PRUNE_EPSILON
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: default_initial_temperature(),
            cooling_rate: default_cooling_rate(),
            minimum_temperature: default_minimum_temperature(),
            iterations_per_temperature: default_iterations_per_temperature(),
            step_size: default_step_size(),
            thermalization_fraction: default_thermalization_fraction(),
            prune_epsilon: default_prune_epsilon(),
            cache_capacity: default_cache_capacity(),
            acceptance: AcceptanceReference::default(),
            thermalization: ThermalizationStrategy::default(),
            seed: None,
        }
    }
}

impl AnnealingConfig {
    /// Load configuration from a YAML file and validate it.
    ///
    /// Missing fields take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> AnnealResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AnnealError::Config(format!("{}: {e}", path.display())))?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from YAML text and validate it.
    pub fn from_yaml(contents: &str) -> AnnealResult<Self> {
        let config: AnnealingConfig =
            serde_yaml_ng::from_str(contents).map_err(|e| AnnealError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from `ANNEALQ_*` environment variables.
    ///
    /// Unparseable values are reported rather than ignored.
    pub fn apply_env(mut self) -> AnnealResult<Self> {
        if let Some(v) = env_value("ANNEALQ_INITIAL_TEMP")? {
            self.initial_temperature = v;
        }
        if let Some(v) = env_value("ANNEALQ_COOLING_RATE")? {
            self.cooling_rate = v;
        }
        if let Some(v) = env_value("ANNEALQ_MIN_TEMP")? {
            self.minimum_temperature = v;
        }
        if let Some(v) = env_value("ANNEALQ_ITERATIONS")? {
            self.iterations_per_temperature = v;
        }
        if let Some(v) = env_value("ANNEALQ_STEP_SIZE")? {
            self.step_size = v;
        }
        if let Some(v) = env_value("ANNEALQ_SEED")? {
            self.seed = Some(v);
        }
        Ok(self)
    }

    /// Set the initial temperature.
    #[must_use]
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    /// Set the cooling rate.
    #[must_use]
    pub fn with_cooling_rate(mut self, r: f64) -> Self {
        self.cooling_rate = r;
        self
    }

    /// Set the terminal temperature.
    #[must_use]
    pub fn with_minimum_temperature(mut self, t: f64) -> Self {
        self.minimum_temperature = t;
        self
    }

    /// Set the main-phase iteration count per level.
    #[must_use]
    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    /// Set the step size at T₀.
    #[must_use]
    pub fn with_step_size(mut self, s: f64) -> Self {
        self.step_size = s;
        self
    }

    /// Set the Metropolis reference energy.
    #[must_use]
    pub fn with_acceptance(mut self, acceptance: AcceptanceReference) -> Self {
        self.acceptance = acceptance;
        self
    }

    /// Set the thermalization strategy.
    #[must_use]
    pub fn with_thermalization(mut self, strategy: ThermalizationStrategy) -> Self {
        self.thermalization = strategy;
        self
    }

    /// Set the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Thermalization iterations per level: ⌊fraction · iterations⌋.
    pub fn thermalization_steps(&self) -> usize {
        (self.thermalization_fraction * self.iterations_per_temperature as f64).floor() as usize
    }

    /// Check every parameter range.
    ///
    /// A minimum temperature at or above the initial one is accepted and
    /// yields an empty schedule.
    pub fn validate(&self) -> AnnealResult<()> {
        if !(self.initial_temperature.is_finite() && self.initial_temperature > 0.0) {
            return Err(invalid(format!(
                "initial_temperature must be positive and finite, got {}",
                self.initial_temperature
            )));
        }
        if !(self.minimum_temperature.is_finite() && self.minimum_temperature > 0.0) {
            return Err(invalid(format!(
                "minimum_temperature must be positive and finite, got {}",
                self.minimum_temperature
            )));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(invalid(format!(
                "cooling_rate must lie in (0, 1), got {}",
                self.cooling_rate
            )));
        }
        if self.iterations_per_temperature == 0 {
            return Err(invalid("iterations_per_temperature must be at least 1".into()));
        }
        if !(self.step_size.is_finite() && self.step_size >= 0.0) {
            return Err(invalid(format!(
                "step_size must be non-negative and finite, got {}",
                self.step_size
            )));
        }
        if !(0.0..=1.0).contains(&self.thermalization_fraction) {
            return Err(invalid(format!(
                "thermalization_fraction must lie in [0, 1], got {}",
                self.thermalization_fraction
            )));
        }
        if !(self.prune_epsilon.is_finite() && self.prune_epsilon > 0.0) {
            return Err(invalid(format!(
                "prune_epsilon must be positive and finite, got {}",
                self.prune_epsilon
            )));
        }
        if self.cache_capacity == 0 {
            return Err(invalid("cache_capacity must be at least 1".into()));
        }
        Ok(())
    }
}

fn invalid(message: String) -> AnnealError {
    AnnealError::InvalidConfig(message)
}

fn env_value<T: std::str::FromStr>(key: &str) -> AnnealResult<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| AnnealError::Config(format!("{key}={raw}: {e}"))),
        Err(_) => Ok(None),
    }
}
