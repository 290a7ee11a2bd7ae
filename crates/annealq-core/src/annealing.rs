//! Simulated annealing over the ansatz angle space.
//!
//! The state is one angle vector θ ∈ [0, 2π)^m. Starting at T₀ the
//! temperature is multiplied by the cooling rate after every level until it
//! drops to the configured floor. Each level runs
//!
//!   1. a thermalization phase of ⌊0.2 · n⌋ unconditional moves, then
//!   2. a main phase of `n` Metropolis moves whose Gaussian step shrinks as
//!      `step_size · T / T₀`.
//!
//! A candidate with energy difference Δ is accepted if Δ < 0 or with
//! probability exp(−Δ / T). By default Δ is measured against the best energy
//! seen so far rather than the current one, see
//! [`AcceptanceReference`](crate::config::AcceptanceReference).
//!
//! All randomness comes from the caller's generator, so a seeded generator
//! reproduces a run exactly:
//!
//! ```rust
//! use annealq_core::annealing::{SimulatedAnnealer, random_angles};
//! use annealq_core::cache::ComposeCache;
//! use annealq_core::config::AnnealingConfig;
//! use annealq_core::expectation::EnergyEvaluator;
//! use annealq_core::hamiltonian::WeightedTerm;
//! use rand::SeedableRng;
//!
//! let h = vec![WeightedTerm::real(1.0, "33".parse().unwrap())];
//! let g = vec![WeightedTerm::real(1.0, "10".parse().unwrap())];
//! let cache = ComposeCache::default();
//! let evaluator = EnergyEvaluator::new(&h, &g, &cache);
//! let config = AnnealingConfig::default()
//!     .with_initial_temperature(1.0)
//!     .with_minimum_temperature(0.01)
//!     .with_cooling_rate(0.8)
//!     .with_iterations_per_temperature(10)
//!     .with_step_size(0.5);
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(3);
//! let start = random_angles(1, &mut rng);
//! let outcome = SimulatedAnnealer::new(&evaluator, &config)
//!     .run(&start, &mut rng, &())
//!     .unwrap();
//! assert!(outcome.best_energy <= 1.0);
//! ```

use std::f64::consts::TAU;

use rand::Rng;
use rand_distr::{Distribution, Normal, StandardNormal};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{AcceptanceReference, AnnealingConfig, ThermalizationStrategy};
use crate::error::{AnnealError, AnnealResult};
use crate::expectation::EnergyEvaluator;
use crate::hamiltonian::WeightedTerm;

/// Standard deviation of the noise added by [`shifted_angles`].
pub const SHIFT_NOISE: f64 = 0.1;

/// Number of temperature levels: how often `t` is multiplied by
/// `cooling_rate` while it stays above `minimum`.
///
/// Returns 0 for a cooling rate outside (0, 1), a non-finite start or a
/// negative minimum, since such a schedule never terminates.
pub fn calculate_temp_steps(initial: f64, cooling_rate: f64, minimum: f64) -> usize {
    if !(cooling_rate > 0.0 && cooling_rate < 1.0) || !initial.is_finite() || !(minimum >= 0.0) {
        return 0;
    }
    let mut t = initial;
    let mut steps = 0;
    while t > minimum {
        t *= cooling_rate;
        steps += 1;
    }
    steps
}

/// Total inner iterations of a run, thermalization included.
///
/// Matches the number of [`ProgressObserver::advance`] units a run reports.
pub fn total_iterations(config: &AnnealingConfig) -> u64 {
    let levels = calculate_temp_steps(
        config.initial_temperature,
        config.cooling_rate,
        config.minimum_temperature,
    ) as u64;
    levels * (config.thermalization_steps() + config.iterations_per_temperature) as u64
}

/// Receives one tick per inner iteration.
///
/// Implementations must not influence the search.
pub trait ProgressObserver {
    /// Advance the counter by `delta` iterations.
    fn advance(&self, delta: u64);
}

impl ProgressObserver for () {
    fn advance(&self, _delta: u64) {}
}

impl<T: ProgressObserver + ?Sized> ProgressObserver for &T {
    fn advance(&self, delta: u64) {
        (**self).advance(delta);
    }
}

/// Result of one annealing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnealOutcome {
    /// Best-ever angle vector.
    pub best_angles: Vec<f64>,
    /// Energy of `best_angles`.
    pub best_energy: f64,
    /// Temperature at which the best state was found.
    pub best_temperature: f64,
    /// Temperature after the last level.
    pub final_temperature: f64,
    /// Inner iterations executed.
    pub iterations: u64,
    /// Main-phase candidates accepted.
    pub accepted: u64,
    /// Temperature levels executed.
    pub temperature_levels: usize,
}

impl AnnealOutcome {
    /// Fraction of main-phase candidates that were accepted.
    pub fn acceptance_rate(&self, config: &AnnealingConfig) -> f64 {
        let main = self.temperature_levels as u64 * config.iterations_per_temperature as u64;
        if main == 0 {
            0.0
        } else {
            self.accepted as f64 / main as f64
        }
    }
}

/// Metropolis annealer driving an [`EnergyEvaluator`].
#[derive(Debug, Clone, Copy)]
pub struct SimulatedAnnealer<'a, 'c> {
    evaluator: &'a EnergyEvaluator<'c>,
    config: &'a AnnealingConfig,
}

impl<'a, 'c> SimulatedAnnealer<'a, 'c> {
    /// Create an annealer for the evaluator's generator list.
    pub fn new(evaluator: &'a EnergyEvaluator<'c>, config: &'a AnnealingConfig) -> Self {
        Self { evaluator, config }
    }

    /// Anneal from `initial` and return the best state found.
    ///
    /// The initial vector is evaluated first and is the first best-ever
    /// candidate, so a schedule with zero levels still yields a finite
    /// result. Any evaluation error aborts the run.
    pub fn run<R, O>(&self, initial: &[f64], rng: &mut R, observer: &O) -> AnnealResult<AnnealOutcome>
    where
        R: Rng + ?Sized,
        O: ProgressObserver + ?Sized,
    {
        self.config.validate()?;

        let n = self.evaluator.n_parameters();
        if initial.len() != n {
            return Err(AnnealError::DimensionMismatch {
                angles: initial.len(),
                generators: n,
            });
        }

        let config = self.config;
        let t0 = config.initial_temperature;
        let thermalization_steps = config.thermalization_steps();

        let mut current = initial.to_vec();
        let mut current_energy = self.evaluator.energy(&current)?;
        let mut best_angles = current.clone();
        let mut best_energy = current_energy;
        let mut best_temperature = t0;

        let mut t = t0;
        let mut levels = 0usize;
        let mut iterations = 0u64;
        let mut accepted = 0u64;

        info!(
            n_parameters = n,
            initial_energy = current_energy,
            levels = calculate_temp_steps(t0, config.cooling_rate, config.minimum_temperature),
            "starting annealing"
        );

        while t > config.minimum_temperature {
            let sigma = config.step_size * (t / t0);

            for _ in 0..thermalization_steps {
                let candidate = match config.thermalization {
                    ThermalizationStrategy::LocalPerturbation => perturb(&current, sigma, rng)?,
                    ThermalizationStrategy::CoefficientScaled => {
                        shifted_angles(self.evaluator.generators(), rng)
                    }
                };
                let energy = self.evaluator.energy(&candidate)?;
                if energy < best_energy {
                    best_energy = energy;
                    best_angles.clone_from(&candidate);
                    best_temperature = t;
                }
                current = candidate;
                current_energy = energy;
                iterations += 1;
                observer.advance(1);
            }

            for _ in 0..config.iterations_per_temperature {
                let candidate = perturb(&current, sigma, rng)?;
                let energy = self.evaluator.energy(&candidate)?;

                let reference = match config.acceptance {
                    AcceptanceReference::BestKnown => best_energy,
                    AcceptanceReference::Current => current_energy,
                };
                let diff = energy - reference;

                if diff < 0.0 || rng.r#gen::<f64>() < (-diff / t).exp() {
                    if energy < best_energy {
                        best_energy = energy;
                        best_angles.clone_from(&candidate);
                        best_temperature = t;
                    }
                    current = candidate;
                    current_energy = energy;
                    accepted += 1;
                }
                iterations += 1;
                observer.advance(1);
            }

            t *= config.cooling_rate;
            levels += 1;
            debug!(level = levels, temperature = t, best_energy, "finished temperature level");
        }

        info!(
            best_energy,
            iterations,
            accepted,
            evaluations = self.evaluator.evaluations(),
            "annealing finished"
        );

        Ok(AnnealOutcome {
            best_angles,
            best_energy,
            best_temperature,
            final_temperature: t,
            iterations,
            accepted,
            temperature_levels: levels,
        })
    }
}

/// Wrap an angle into [0, 2π).
pub fn wrap_angle(theta: f64) -> f64 {
    // rem_euclid rounds tiny negative inputs up to exactly TAU.
    let wrapped = theta.rem_euclid(TAU);
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Uniform start vector in [0, 1)^m.
pub fn random_angles<R: Rng + ?Sized>(m: usize, rng: &mut R) -> Vec<f64> {
    (0..m).map(|_| rng.r#gen::<f64>()).collect()
}

/// Start vector proportional to the generator weights.
///
/// Angle k is `|c_k| / ‖c‖ · 2π` plus N(0, [`SHIFT_NOISE`]) noise. A list
/// whose coefficients all vanish yields zeros without drawing noise.
pub fn shifted_angles<R: Rng + ?Sized>(generators: &[WeightedTerm], rng: &mut R) -> Vec<f64> {
    let magnitudes: Vec<f64> = generators.iter().map(|g| g.coeff.norm()).collect();
    let norm = magnitudes.iter().map(|m| m * m).sum::<f64>().sqrt();
    if norm < 1e-12 {
        return vec![0.0; generators.len()];
    }
    magnitudes
        .into_iter()
        .map(|m| {
            let z: f64 = rng.sample(StandardNormal);
            m / norm * TAU + SHIFT_NOISE * z
        })
        .collect()
}

fn perturb<R: Rng + ?Sized>(angles: &[f64], sigma: f64, rng: &mut R) -> AnnealResult<Vec<f64>> {
    if sigma == 0.0 {
        return Ok(angles.to_vec());
    }
    let noise = Normal::new(0.0, sigma)
        .map_err(|e| AnnealError::InvalidConfig(format!("step size {sigma}: {e}")))?;
    Ok(angles
        .iter()
        .map(|&theta| wrap_angle(theta + noise.sample(rng)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_temp_steps_counts_multiplications() {
        assert_eq!(calculate_temp_steps(1.0, 0.5, 0.1), 4);
        assert_eq!(calculate_temp_steps(1.0, 0.5, 1.0), 0);
        assert_eq!(calculate_temp_steps(1.0, 0.5, 2.0), 0);
        assert_eq!(calculate_temp_steps(1.0, 1.0, 0.1), 0);
        assert_eq!(calculate_temp_steps(1.0, 0.5, -0.1), 0);
        assert_eq!(calculate_temp_steps(1.0, 0.5, f64::NAN), 0);
    }

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(-0.5) - (TAU - 0.5)).abs() < 1e-12);
        assert!((wrap_angle(TAU + 0.25) - 0.25).abs() < 1e-12);
        assert_eq!(wrap_angle(0.0), 0.0);
        for theta in [-1e-17, -f64::MIN_POSITIVE, -TAU * 1e-18] {
            let w = wrap_angle(theta);
            assert!((0.0..TAU).contains(&w), "{theta} wrapped to {w}");
        }
    }

    #[test]
    fn test_perturb_zero_sigma_is_identity() {
        let mut rng = StdRng::seed_from_u64(1);
        let angles = vec![7.0, -1.0];
        assert_eq!(perturb(&angles, 0.0, &mut rng).unwrap(), angles);
    }

    #[test]
    fn test_perturb_wraps() {
        let mut rng = StdRng::seed_from_u64(1);
        let out = perturb(&[0.0; 16], 3.0, &mut rng).unwrap();
        assert!(out.iter().all(|t| (0.0..TAU).contains(t)));
    }

    #[test]
    fn test_random_angles_range() {
        let mut rng = StdRng::seed_from_u64(9);
        let v = random_angles(32, &mut rng);
        assert_eq!(v.len(), 32);
        assert!(v.iter().all(|t| (0.0..1.0).contains(t)));
    }

    #[test]
    fn test_shifted_angles_zero_coefficients() {
        let mut rng = StdRng::seed_from_u64(9);
        let g = vec![
            WeightedTerm::real(0.0, "1".parse().unwrap()),
            WeightedTerm::real(0.0, "3".parse().unwrap()),
        ];
        assert_eq!(shifted_angles(&g, &mut rng), vec![0.0, 0.0]);
    }
}
