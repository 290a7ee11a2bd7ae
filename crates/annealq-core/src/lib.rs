//! `annealq-core`: ansatz energy minimisation by simulated annealing.
//!
//! Given a Hamiltonian `H = Σ c_k P_k` over Pauli strings, the crate searches
//! for the angles θ of a product-of-exponentials ansatz
//!
//!   U(θ) = Π_k exp(i θ_k c_k P_k)
//!
//! that minimise ⟨0…0| U† H U |0…0⟩. Everything is computed symbolically in
//! the Pauli basis:
//!
//! - [`pauli`]: single-qubit products and string composition
//! - [`cache`]: thread-safe LRU memo of compositions
//! - [`ansatz`]: Euler expansion of U(θ) into a sparse [`PauliExpansion`]
//! - [`expectation`]: the U†HU sandwich and its reference-state value
//! - [`annealing`]: the cooling schedule and Metropolis search
//! - [`sweep`]: passes over growing generator sets with explicit results
//!
//! # Quick start
//!
//! ```rust
//! use annealq_core::config::AnnealingConfig;
//! use annealq_core::hamiltonian::parse_hamiltonian;
//! use annealq_core::sweep::Optimizer;
//! use rand::SeedableRng;
//!
//! // H = ZZ + 0.5 XI
//! let data = parse_hamiltonian("1.0 0.0 33\n0.5 0.0 10\n").unwrap();
//! let config = AnnealingConfig::default()
//!     .with_initial_temperature(1.0)
//!     .with_minimum_temperature(0.05)
//!     .with_cooling_rate(0.7)
//!     .with_iterations_per_temperature(5);
//!
//! let optimizer = Optimizer::new(data.hamiltonian, config).unwrap();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let report = optimizer.sweep(&mut rng, |_m| ()).unwrap();
//!
//! assert_eq!(report.entries.len(), 1);
//! assert!(report.best().unwrap().ansatz.numeric.starts_with("U = "));
//! ```

pub mod annealing;
pub mod ansatz;
pub mod cache;
pub mod config;
pub mod error;
pub mod expansion;
pub mod expectation;
pub mod format;
pub mod hamiltonian;
pub mod pauli;
pub mod sweep;

pub use annealing::{AnnealOutcome, ProgressObserver, SimulatedAnnealer};
pub use ansatz::{AnsatzBuilder, build_ansatz};
pub use cache::{CacheStatistics, ComposeCache};
pub use config::{AcceptanceReference, AnnealingConfig, ThermalizationStrategy};
pub use error::{AnnealError, AnnealResult};
pub use expansion::PauliExpansion;
pub use expectation::{EnergyEvaluator, expectation, sandwich};
pub use hamiltonian::{Hamiltonian, HamiltonianData, WeightedTerm, parse_hamiltonian};
pub use pauli::{PauliOp, PauliString, compose};
pub use sweep::{OptimizationResult, Optimizer, SweepReport};
