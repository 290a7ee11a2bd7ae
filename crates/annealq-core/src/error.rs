//! Error types for the annealq core.

use thiserror::Error;

/// Errors produced by the Pauli algebra, the ansatz/energy evaluators and the
/// annealing optimizer.
///
/// None of these are retried internally: each one points at a defect in the
/// input data or the parameters, not at a transient condition.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnnealError {
    /// A Pauli index outside {0, 1, 2, 3}.
    #[error("Invalid Pauli operator index {index}: expected 0 (I), 1 (X), 2 (Y) or 3 (Z)")]
    InvalidOperator {
        /// The offending index.
        index: u32,
    },

    /// A character that names no Pauli operator.
    #[error("Invalid Pauli symbol '{0}': expected one of 0-3 or I, X, Y, Z")]
    InvalidSymbol(char),

    /// Two Pauli strings of different length were composed.
    #[error("Pauli string length mismatch: {left} vs {right} qubits")]
    ShapeMismatch {
        /// Length of the left operand.
        left: usize,
        /// Length of the right operand.
        right: usize,
    },

    /// The angle vector does not match the number of generator terms.
    #[error("Angle vector has {angles} entries but {generators} generator terms were given")]
    DimensionMismatch {
        /// Length of the angle vector.
        angles: usize,
        /// Number of generator terms.
        generators: usize,
    },

    /// An energy evaluation produced NaN or an infinity.
    #[error("Energy evaluation produced a non-finite value ({energy})")]
    Computation {
        /// The non-finite energy.
        energy: f64,
    },

    /// Too few usable Hamiltonian terms to build an ansatz sweep.
    #[error("At least {required} non-zero Pauli terms are required, found {found}")]
    InsufficientTerms {
        /// Number of usable terms.
        found: usize,
        /// Minimum required.
        required: usize,
    },

    /// Annealing parameters out of range.
    #[error("Invalid annealing configuration: {0}")]
    InvalidConfig(String),

    /// A Hamiltonian definition line could not be parsed.
    #[error("Line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// A configuration file could not be read or deserialized.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for annealq core operations.
pub type AnnealResult<T> = Result<T, AnnealError>;
