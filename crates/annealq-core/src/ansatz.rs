//! Product-of-exponentials ansatz in the Pauli basis.
//!
//! The trial unitary is
//!
//!   U(θ) = Π_k exp(i θ_k c_k P_k)
//!
//! expanded one generator at a time with Euler's formula
//!
//!   exp(i θ c P) → cos θ · I  +  i sin θ · c · P.
//!
//! The coefficient `c_k` scales the generator branch only; it is never folded
//! into the trigonometric argument. Each step maps every existing entry
//! `(s, a)` to two contributions, `(s, a cos θ)` and
//! `(s·P, a · i sin θ · c · phase(s·P))`, so the number of keys can at most
//! double per generator.

use num_complex::Complex64;
use tracing::trace;

use crate::cache::ComposeCache;
use crate::error::{AnnealError, AnnealResult};
use crate::expansion::{DEFAULT_PRUNE_EPSILON, PauliExpansion};
use crate::hamiltonian::WeightedTerm;

/// Expands angle vectors into a [`PauliExpansion`] of the ansatz.
#[derive(Debug, Clone, Copy)]
pub struct AnsatzBuilder<'c> {
    cache: &'c ComposeCache,
    n_qubits: usize,
    prune_epsilon: f64,
}

impl<'c> AnsatzBuilder<'c> {
    /// Builder for ansätze on `n_qubits` qubits using the shared cache.
    pub fn new(cache: &'c ComposeCache, n_qubits: usize) -> Self {
        Self {
            cache,
            n_qubits,
            prune_epsilon: DEFAULT_PRUNE_EPSILON,
        }
    }

    /// Override the pruning threshold.
    #[must_use]
    pub fn with_prune_epsilon(mut self, epsilon: f64) -> Self {
        self.prune_epsilon = epsilon;
        self
    }

    /// Qubit width of the built ansätze.
    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    /// Expand `U(angles)` for the given generators.
    ///
    /// Fails with [`AnnealError::DimensionMismatch`] when the lengths differ
    /// and with [`AnnealError::ShapeMismatch`] when a generator has the wrong
    /// width.
    pub fn build(
        &self,
        angles: &[f64],
        generators: &[WeightedTerm],
    ) -> AnnealResult<PauliExpansion> {
        if angles.len() != generators.len() {
            return Err(AnnealError::DimensionMismatch {
                angles: angles.len(),
                generators: generators.len(),
            });
        }

        let mut current = PauliExpansion::identity(self.n_qubits);

        for (&theta, generator) in angles.iter().zip(generators) {
            let (sin, cos) = theta.sin_cos();
            let rotation = Complex64::new(0.0, sin) * generator.coeff;
            let mut next = PauliExpansion::zero(self.n_qubits);

            for (pauli, &coeff) in current.iter() {
                next.add(pauli.clone(), coeff * cos);

                let (phase, product) = self.cache.compose(pauli, &generator.pauli)?;
                next.add(product, coeff * rotation * phase);
            }

            current = next;
        }

        current.prune(self.prune_epsilon);
        trace!(
            n_generators = generators.len(),
            n_terms = current.len(),
            "expanded ansatz"
        );
        Ok(current)
    }
}

/// Expand `U(angles)` with an explicit cache and pruning threshold.
///
/// The qubit width is taken from the first generator; an empty generator
/// list yields the zero-qubit identity.
pub fn build_ansatz(
    angles: &[f64],
    generators: &[WeightedTerm],
    cache: &ComposeCache,
    prune_epsilon: f64,
) -> AnnealResult<PauliExpansion> {
    let n_qubits = generators.first().map_or(0, |g| g.pauli.len());
    AnsatzBuilder::new(cache, n_qubits)
        .with_prune_epsilon(prune_epsilon)
        .build(angles, generators)
}
