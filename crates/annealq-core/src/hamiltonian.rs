//! Weighted Pauli-string Hamiltonians.
//!
//! A Hamiltonian is an ordered sum of weighted Pauli strings,
//!
//!   H = Σ_k  c_k · P_k,   c_k ∈ ℂ,
//!
//! where every `P_k` spans the same number of qubits. The same type doubles
//! as the generator list of an ansatz: the first `m` terms of a Hamiltonian
//! are the usual choice of generators when sweeping over `m`.
//!
//! # Text format
//!
//! One term per line, `<real> <imag> <digits>`:
//!
//! ```text
//! # H = ZZ - 0.5 XX
//! 1.0  0.0 33
//! -0.5 0.0 11
//! 0.0  0.0 00
//! ```
//!
//! Zero-weight lines are left out of the Hamiltonian but kept in the
//! catalog of encountered strings.
//!
//! ```rust
//! use annealq_core::hamiltonian::parse_hamiltonian;
//!
//! let data = parse_hamiltonian("1.0 0.0 33\n0.0 0.0 00\n").unwrap();
//! assert_eq!(data.hamiltonian.n_terms(), 1);
//! assert_eq!(data.catalog.len(), 2);
//! ```

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AnnealError, AnnealResult};
use crate::pauli::PauliString;

/// Minimum number of usable terms for an ansatz sweep.
pub const MIN_SWEEP_TERMS: usize = 2;

/// A single weighted Pauli term `coeff · pauli`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedTerm {
    /// Complex coefficient.
    pub coeff: Complex64,
    /// The Pauli string.
    pub pauli: PauliString,
}

impl WeightedTerm {
    /// Create a new term.
    pub fn new(coeff: Complex64, pauli: PauliString) -> Self {
        Self { coeff, pauli }
    }

    /// Shorthand for a real coefficient.
    pub fn real(coeff: f64, pauli: PauliString) -> Self {
        Self::new(Complex64::new(coeff, 0.0), pauli)
    }
}

/// An immutable, ordered list of weighted Pauli terms on a fixed width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hamiltonian {
    n_qubits: usize,
    terms: Vec<WeightedTerm>,
}

impl Hamiltonian {
    /// Create from a list of terms, checking that all strings share one width.
    ///
    /// An empty list yields a zero-qubit Hamiltonian.
    pub fn from_terms(terms: Vec<WeightedTerm>) -> AnnealResult<Self> {
        let n_qubits = terms.first().map_or(0, |t| t.pauli.len());
        if let Some(bad) = terms.iter().find(|t| t.pauli.len() != n_qubits) {
            return Err(AnnealError::ShapeMismatch {
                left: n_qubits,
                right: bad.pauli.len(),
            });
        }
        Ok(Self { n_qubits, terms })
    }

    /// All terms, in input order.
    pub fn terms(&self) -> &[WeightedTerm] {
        &self.terms
    }

    /// Number of terms.
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// True if there are no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Qubit count shared by every term.
    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    /// The first `m` terms, used as ansatz generators.
    pub fn generators(&self, m: usize) -> AnnealResult<&[WeightedTerm]> {
        self.terms
            .get(..m)
            .ok_or(AnnealError::DimensionMismatch {
                angles: m,
                generators: self.terms.len(),
            })
    }

    /// Fail with [`AnnealError::InsufficientTerms`] below `required` terms.
    pub fn ensure_min_terms(&self, required: usize) -> AnnealResult<()> {
        if self.terms.len() < required {
            return Err(AnnealError::InsufficientTerms {
                found: self.terms.len(),
                required,
            });
        }
        Ok(())
    }

    /// Σ |c_k|, an upper bound on the spectral norm.
    pub fn lambda(&self) -> f64 {
        self.terms.iter().map(|t| t.coeff.norm()).sum()
    }
}

/// Result of parsing a Hamiltonian definition.
#[derive(Debug, Clone, PartialEq)]
pub struct HamiltonianData {
    /// Non-zero terms in file order.
    pub hamiltonian: Hamiltonian,
    /// Every parsed Pauli string, zero-weight ones included, in file order.
    pub catalog: Vec<PauliString>,
}

/// Parse the line-oriented Hamiltonian format.
///
/// Lines without exactly three whitespace-separated fields are skipped, as
/// are lines starting with `#`. Numbers that fail to parse are reported
/// with their 1-based line number.
pub fn parse_hamiltonian(source: &str) -> AnnealResult<HamiltonianData> {
    let mut terms = Vec::new();
    let mut catalog: Vec<PauliString> = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let [re, im, digits] = fields.as_slice() else {
            if !line.is_empty() {
                debug!(line = line_no, "skipping line without three fields");
            }
            continue;
        };

        let re = parse_float(re, line_no)?;
        let im = parse_float(im, line_no)?;
        let pauli: PauliString = digits.parse()?;

        if let Some(first) = catalog.first() {
            if first.len() != pauli.len() {
                return Err(AnnealError::ShapeMismatch {
                    left: first.len(),
                    right: pauli.len(),
                });
            }
        }

        let coeff = Complex64::new(re, im);
        if coeff != Complex64::new(0.0, 0.0) {
            terms.push(WeightedTerm::new(coeff, pauli.clone()));
        }
        catalog.push(pauli);
    }

    let hamiltonian = Hamiltonian::from_terms(terms)?;
    debug!(
        n_terms = hamiltonian.n_terms(),
        n_strings = catalog.len(),
        n_qubits = hamiltonian.n_qubits(),
        "parsed Hamiltonian"
    );
    Ok(HamiltonianData {
        hamiltonian,
        catalog,
    })
}

fn parse_float(field: &str, line: usize) -> AnnealResult<f64> {
    field.parse::<f64>().map_err(|e| AnnealError::Parse {
        line,
        message: format!("invalid number '{field}': {e}"),
    })
}
