//! Expectation values ⟨0…0| U† H U |0…0⟩.
//!
//! [`sandwich`] forms U†HU in the Pauli basis as a full triple product,
//!
//!   U†HU = Σ_h Σ_j Σ_k  conj(u_j) · c_h · u_k · (P_j P_h P_k),
//!
//! which costs `O(|H|·|U|²)` compositions per call. [`expectation`] then
//! keeps only strings made of I and Z: those are diagonal with eigenvalue +1
//! on |0…0⟩, every string containing an X or Y has zero expectation there.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::trace;

use crate::ansatz::AnsatzBuilder;
use crate::cache::ComposeCache;
use crate::error::{AnnealError, AnnealResult};
use crate::expansion::{DEFAULT_PRUNE_EPSILON, PauliExpansion};
use crate::hamiltonian::WeightedTerm;

/// Compute the Pauli expansion of `U† H U`.
///
/// `u` must span the same width as every Hamiltonian term, otherwise the
/// composition fails with [`AnnealError::ShapeMismatch`].
pub fn sandwich(
    u: &PauliExpansion,
    hamiltonian: &[WeightedTerm],
    cache: &ComposeCache,
) -> AnnealResult<PauliExpansion> {
    let mut out = PauliExpansion::zero(u.n_qubits());
    let entries: Vec<_> = u.iter().collect();

    for term in hamiltonian {
        for &(j_pauli, &j_coeff) in &entries {
            let (c1, mid) = cache.compose(j_pauli, &term.pauli)?;
            let left = j_coeff.conj() * term.coeff * c1;

            for &(k_pauli, &k_coeff) in &entries {
                let (c2, product) = cache.compose(&mid, k_pauli)?;
                out.add(product, left * k_coeff * c2);
            }
        }
    }

    Ok(out)
}

/// Real expectation of an operator in the all-zero reference state.
pub fn expectation(operator: &PauliExpansion) -> f64 {
    operator
        .iter()
        .filter(|(pauli, _)| pauli.is_diagonal())
        .map(|(_, coeff)| coeff.re)
        .sum()
}

/// Energy of the ansatz state for a fixed Hamiltonian and generator list.
///
/// Chains ansatz expansion, the U†HU sandwich and the reference-state
/// reduction. A non-finite result fails with [`AnnealError::Computation`].
#[derive(Debug)]
pub struct EnergyEvaluator<'c> {
    hamiltonian: Vec<WeightedTerm>,
    generators: Vec<WeightedTerm>,
    cache: &'c ComposeCache,
    n_qubits: usize,
    prune_epsilon: f64,
    evaluations: AtomicU64,
}

impl<'c> EnergyEvaluator<'c> {
    /// Create an evaluator. Widths are checked on the first call.
    pub fn new(
        hamiltonian: &[WeightedTerm],
        generators: &[WeightedTerm],
        cache: &'c ComposeCache,
    ) -> Self {
        let n_qubits = hamiltonian
            .first()
            .or_else(|| generators.first())
            .map_or(0, |t| t.pauli.len());
        Self {
            hamiltonian: hamiltonian.to_vec(),
            generators: generators.to_vec(),
            cache,
            n_qubits,
            prune_epsilon: DEFAULT_PRUNE_EPSILON,
            evaluations: AtomicU64::new(0),
        }
    }

    /// Override the pruning threshold used for U and U†HU.
    #[must_use]
    pub fn with_prune_epsilon(mut self, epsilon: f64) -> Self {
        self.prune_epsilon = epsilon;
        self
    }

    /// Generator terms of the ansatz.
    pub fn generators(&self) -> &[WeightedTerm] {
        &self.generators
    }

    /// Number of angles expected by [`energy`](Self::energy).
    pub fn n_parameters(&self) -> usize {
        self.generators.len()
    }

    /// Hamiltonian terms.
    pub fn hamiltonian(&self) -> &[WeightedTerm] {
        &self.hamiltonian
    }

    /// The compose cache shared by every evaluation.
    pub fn cache(&self) -> &'c ComposeCache {
        self.cache
    }

    /// Expand the ansatz for `angles`.
    pub fn ansatz(&self, angles: &[f64]) -> AnnealResult<PauliExpansion> {
        AnsatzBuilder::new(self.cache, self.n_qubits)
            .with_prune_epsilon(self.prune_epsilon)
            .build(angles, &self.generators)
    }

    /// ⟨0…0| U†(angles) H U(angles) |0…0⟩.
    pub fn energy(&self, angles: &[f64]) -> AnnealResult<f64> {
        let u = self.ansatz(angles)?;
        let uhu = sandwich(&u, &self.hamiltonian, self.cache)?.pruned(self.prune_epsilon);
        let energy = expectation(&uhu);
        self.evaluations.fetch_add(1, Ordering::Relaxed);

        if !energy.is_finite() {
            return Err(AnnealError::Computation { energy });
        }
        trace!(energy, u_terms = u.len(), uhu_terms = uhu.len(), "evaluated energy");
        Ok(energy)
    }

    /// Number of completed energy evaluations.
    pub fn evaluations(&self) -> u64 {
        self.evaluations.load(Ordering::Relaxed)
    }
}
