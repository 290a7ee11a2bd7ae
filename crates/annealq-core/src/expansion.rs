//! Sparse Pauli-basis operator expansion.
//!
//! An operator is stored as `Σ_s c_s · P_s` over Pauli strings `P_s`; absent
//! keys have coefficient zero. Both the ansatz U and the sandwich U†HU use
//! this representation.

use num_complex::Complex64;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::pauli::PauliString;

/// Default magnitude below which coefficients are pruned.
pub const DEFAULT_PRUNE_EPSILON: f64 = 1e-12;

/// Linear combination of Pauli strings on a fixed number of qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauliExpansion {
    n_qubits: usize,
    terms: FxHashMap<PauliString, Complex64>,
}

impl PauliExpansion {
    /// An empty (zero) operator.
    pub fn zero(n_qubits: usize) -> Self {
        Self {
            n_qubits,
            terms: FxHashMap::default(),
        }
    }

    /// The identity operator `1 · I…I`.
    pub fn identity(n_qubits: usize) -> Self {
        let mut expansion = Self::zero(n_qubits);
        expansion.add(PauliString::identity(n_qubits), Complex64::new(1.0, 0.0));
        expansion
    }

    /// Number of qubits every key spans.
    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    /// Accumulate `coeff` onto the entry for `pauli`.
    pub fn add(&mut self, pauli: PauliString, coeff: Complex64) {
        debug_assert_eq!(pauli.len(), self.n_qubits);
        *self.terms.entry(pauli).or_default() += coeff;
    }

    /// Coefficient of `pauli` (zero when absent).
    pub fn get(&self, pauli: &PauliString) -> Complex64 {
        self.terms.get(pauli).copied().unwrap_or_default()
    }

    /// True if `pauli` has an entry.
    pub fn contains(&self, pauli: &PauliString) -> bool {
        self.terms.contains_key(pauli)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// True if no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterate over entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&PauliString, &Complex64)> {
        self.terms.iter()
    }

    /// Entries sorted by Pauli string, for deterministic display.
    pub fn sorted(&self) -> Vec<(&PauliString, Complex64)> {
        let mut v: Vec<_> = self.terms.iter().map(|(k, c)| (k, *c)).collect();
        v.sort_by(|a, b| a.0.cmp(b.0));
        v
    }

    /// Drop every entry whose magnitude is below `epsilon`.
    ///
    /// Non-finite entries are kept so that callers can detect them.
    pub fn prune(&mut self, epsilon: f64) {
        self.terms.retain(|_, c| !(c.norm() < epsilon));
    }

    /// Builder form of [`prune`](Self::prune).
    #[must_use]
    pub fn pruned(mut self, epsilon: f64) -> Self {
        self.prune(epsilon);
        self
    }

    /// Σ |c_s|², equal to 1 for any unitary expressed in this basis
    /// normalised so that the identity has weight 1.
    pub fn weight(&self) -> f64 {
        self.terms.values().map(Complex64::norm_sqr).sum()
    }
}
