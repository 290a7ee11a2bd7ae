//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};

use annealq_core::annealing::ProgressObserver;
use annealq_core::config::{AcceptanceReference, AnnealingConfig, ThermalizationStrategy};
use annealq_core::hamiltonian::{HamiltonianData, parse_hamiltonian};

/// Metropolis reference energy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AcceptanceArg {
    /// Compare against the best energy seen so far
    Best,
    /// Compare against the current state
    Current,
}

impl From<AcceptanceArg> for AcceptanceReference {
    fn from(arg: AcceptanceArg) -> Self {
        match arg {
            AcceptanceArg::Best => AcceptanceReference::BestKnown,
            AcceptanceArg::Current => AcceptanceReference::Current,
        }
    }
}

/// Thermalization candidate strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThermalizationArg {
    /// Gaussian perturbation of the current angles
    Local,
    /// Fresh draw scaled by the generator weights
    Scaled,
}

impl From<ThermalizationArg> for ThermalizationStrategy {
    fn from(arg: ThermalizationArg) -> Self {
        match arg {
            ThermalizationArg::Local => ThermalizationStrategy::LocalPerturbation,
            ThermalizationArg::Scaled => ThermalizationStrategy::CoefficientScaled,
        }
    }
}

/// Annealing schedule options shared by `run` and `schedule`.
#[derive(Debug, Clone, Default, Args)]
pub struct TuningArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Random seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Initial temperature
    #[arg(long)]
    pub initial_temp: Option<f64>,

    /// Cooling rate in (0, 1)
    #[arg(long)]
    pub cooling_rate: Option<f64>,

    /// Terminal temperature
    #[arg(long)]
    pub min_temp: Option<f64>,

    /// Main-phase iterations per temperature level
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Gaussian step size at the initial temperature
    #[arg(long)]
    pub step_size: Option<f64>,

    /// Metropolis reference energy
    #[arg(long, value_enum)]
    pub acceptance: Option<AcceptanceArg>,

    /// Thermalization strategy
    #[arg(long, value_enum)]
    pub thermalization: Option<ThermalizationArg>,
}

impl TuningArgs {
    /// Replace every field of `config` that has a flag set.
    pub fn apply_to(&self, mut config: AnnealingConfig) -> AnnealingConfig {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(t) = self.initial_temp {
            config.initial_temperature = t;
        }
        if let Some(r) = self.cooling_rate {
            config.cooling_rate = r;
        }
        if let Some(t) = self.min_temp {
            config.minimum_temperature = t;
        }
        if let Some(n) = self.iterations {
            config.iterations_per_temperature = n;
        }
        if let Some(s) = self.step_size {
            config.step_size = s;
        }
        if let Some(a) = self.acceptance {
            config.acceptance = a.into();
        }
        if let Some(t) = self.thermalization {
            config.thermalization = t.into();
        }
        config
    }
}

/// Build the effective configuration: flags over `ANNEALQ_*` variables over
/// the config file over defaults.
pub fn resolve_config(args: &TuningArgs) -> Result<AnnealingConfig> {
    let base = match &args.config {
        Some(path) => AnnealingConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {path}"))?,
        None => AnnealingConfig::default(),
    };
    let config = base
        .apply_env()
        .context("Invalid ANNEALQ_* environment override")?;
    let config = args.apply_to(config);

    config.validate().context("Invalid annealing parameters")?;
    Ok(config)
}

/// Load a Hamiltonian definition file.
pub fn load_hamiltonian(path: &str) -> Result<HamiltonianData> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;

    parse_hamiltonian(&source).with_context(|| format!("Failed to parse Hamiltonian: {path}"))
}

/// Create a progress bar for annealing passes.
pub fn create_progress_bar(len: u64, message: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )?
        .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    Ok(pb)
}

/// Forwards annealing iterations to a progress bar.
pub struct BarObserver(pub ProgressBar);

impl ProgressObserver for BarObserver {
    fn advance(&self, delta: u64) {
        self.0.inc(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_replace_only_what_they_set() {
        let base = AnnealingConfig::default()
            .with_cooling_rate(0.9)
            .with_iterations_per_temperature(12);
        let args = TuningArgs {
            iterations: Some(20),
            seed: Some(3),
            acceptance: Some(AcceptanceArg::Current),
            ..TuningArgs::default()
        };

        let config = args.apply_to(base);
        assert!((config.cooling_rate - 0.9).abs() < 1e-15);
        assert_eq!(config.iterations_per_temperature, 20);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.acceptance, AcceptanceReference::Current);
        assert_eq!(
            config.thermalization,
            ThermalizationStrategy::LocalPerturbation
        );
    }

    #[test]
    fn test_resolve_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anneal.yaml");
        fs::write(&path, "cooling_rate: 0.9\niterations_per_temperature: 12\n").unwrap();

        let args = TuningArgs {
            config: Some(path.to_str().unwrap().to_string()),
            iterations: Some(20),
            thermalization: Some(ThermalizationArg::Scaled),
            ..TuningArgs::default()
        };
        let config = resolve_config(&args).unwrap();
        assert!((config.cooling_rate - 0.9).abs() < 1e-15);
        assert_eq!(config.iterations_per_temperature, 20);
        assert_eq!(
            config.thermalization,
            ThermalizationStrategy::CoefficientScaled
        );
    }

    #[test]
    fn test_resolve_rejects_invalid_flag() {
        let args = TuningArgs {
            cooling_rate: Some(1.5),
            ..TuningArgs::default()
        };
        let err = resolve_config(&args).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid annealing parameters"));
    }
}
