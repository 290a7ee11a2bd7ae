//! Pauli algebra.
//!
//! Single-qubit operators are indexed I=0, X=1, Y=2, Z=3. Their products
//! close over the Pauli group up to a phase in {1, -1, i, -i}:
//!
//! ```text
//!   XY =  iZ    YX = -iZ
//!   ZX =  iY    XZ = -iY
//!   YZ =  iX    ZY = -iX
//! ```
//!
//! A [`PauliString`] is the tensor product of one operator per qubit, and
//! [`compose`] multiplies two strings qubit by qubit.
//!
//! # Example
//!
//! ```rust
//! use annealq_core::pauli::{compose, PauliString};
//! use num_complex::Complex64;
//!
//! let xx: PauliString = "11".parse().unwrap();
//! let zz: PauliString = "33".parse().unwrap();
//! let (coeff, product) = compose(&xx, &zz).unwrap();
//! // (XZ)⊗(XZ) = (-iY)⊗(-iY) = -YY
//! assert_eq!(product.to_string(), "22");
//! assert!((coeff - Complex64::new(-1.0, 0.0)).norm() < 1e-15);
//! ```

use std::fmt;
use std::str::FromStr;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{AnnealError, AnnealResult};

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PauliOp {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl PauliOp {
    /// All four operators in index order.
    pub const ALL: [PauliOp; 4] = [PauliOp::I, PauliOp::X, PauliOp::Y, PauliOp::Z];

    /// Operator for a raw index in {0, 1, 2, 3}.
    pub fn from_index(index: u8) -> AnnealResult<Self> {
        match index {
            0 => Ok(PauliOp::I),
            1 => Ok(PauliOp::X),
            2 => Ok(PauliOp::Y),
            3 => Ok(PauliOp::Z),
            other => Err(AnnealError::InvalidOperator {
                index: u32::from(other),
            }),
        }
    }

    /// Raw index of this operator.
    pub fn index(self) -> u8 {
        match self {
            PauliOp::I => 0,
            PauliOp::X => 1,
            PauliOp::Y => 2,
            PauliOp::Z => 3,
        }
    }

    /// Letter name (`I`, `X`, `Y`, `Z`).
    pub fn label(self) -> char {
        match self {
            PauliOp::I => 'I',
            PauliOp::X => 'X',
            PauliOp::Y => 'Y',
            PauliOp::Z => 'Z',
        }
    }

    /// True for I and Z, the operators that leave |0⟩ invariant.
    pub fn is_diagonal(self) -> bool {
        matches!(self, PauliOp::I | PauliOp::Z)
    }

    /// Product `self · rhs` as a (coefficient, operator) pair.
    pub fn multiply(self, rhs: PauliOp) -> (Complex64, PauliOp) {
        let (phase, op) = product(self, rhs);
        (phase_value(phase), op)
    }
}

impl fmt::Display for PauliOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Product of two Pauli operators as (power of i, result).
///
/// Keeping the phase as an exponent makes string composition exact; the
/// complex value is only materialised once per string.
fn product(a: PauliOp, b: PauliOp) -> (u8, PauliOp) {
    use PauliOp::{I, X, Y, Z};
    match (a, b) {
        (I, I) | (X, X) | (Y, Y) | (Z, Z) => (0, I),
        (I, q) => (0, q),
        (p, I) => (0, p),
        (X, Y) => (1, Z),
        (Y, X) => (3, Z),
        (Z, X) => (1, Y),
        (X, Z) => (3, Y),
        (Y, Z) => (1, X),
        (Z, Y) => (3, X),
    }
}

/// `i^exponent`.
fn phase_value(exponent: u8) -> Complex64 {
    match exponent % 4 {
        0 => Complex64::new(1.0, 0.0),
        1 => Complex64::new(0.0, 1.0),
        2 => Complex64::new(-1.0, 0.0),
        _ => Complex64::new(0.0, -1.0),
    }
}

/// Multiply two single-qubit Pauli operators given by raw index.
///
/// Returns `(coefficient, result_index)`. Fails with
/// [`AnnealError::InvalidOperator`] if either index is outside {0, 1, 2, 3}.
pub fn multiply_single(i: u8, j: u8) -> AnnealResult<(Complex64, u8)> {
    let (coeff, op) = PauliOp::from_index(i)?.multiply(PauliOp::from_index(j)?);
    Ok((coeff, op.index()))
}

/// A fixed-length tensor product of Pauli operators, one per qubit.
///
/// Qubit 0 is the first entry. Unlike a sparse representation the identity
/// factors are stored explicitly, so two strings are only comparable when
/// they have the same length. Serializes as its digit form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PauliString {
    ops: Vec<PauliOp>,
}

impl PauliString {
    /// The identity string on `n_qubits` qubits.
    pub fn identity(n_qubits: usize) -> Self {
        Self {
            ops: vec![PauliOp::I; n_qubits],
        }
    }

    /// Build from typed operators.
    pub fn from_ops(ops: impl IntoIterator<Item = PauliOp>) -> Self {
        Self {
            ops: ops.into_iter().collect(),
        }
    }

    /// Build from raw indices, validating each one.
    pub fn from_indices(indices: &[u8]) -> AnnealResult<Self> {
        let ops = indices
            .iter()
            .map(|&i| PauliOp::from_index(i))
            .collect::<AnnealResult<Vec<_>>>()?;
        Ok(Self { ops })
    }

    /// Number of qubits.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// True for the zero-qubit string.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The per-qubit operators.
    pub fn ops(&self) -> &[PauliOp] {
        &self.ops
    }

    /// Raw indices, one per qubit.
    pub fn indices(&self) -> Vec<u8> {
        self.ops.iter().map(|op| op.index()).collect()
    }

    /// True if every factor is the identity.
    pub fn is_identity(&self) -> bool {
        self.ops.iter().all(|&op| op == PauliOp::I)
    }

    /// True if every factor is I or Z.
    ///
    /// Such strings have |0…0⟩ as an eigenvector with eigenvalue +1; every
    /// other string has zero expectation in that state.
    pub fn is_diagonal(&self) -> bool {
        self.ops.iter().all(|op| op.is_diagonal())
    }

    /// Letter form, e.g. `ZIX`.
    pub fn label(&self) -> String {
        self.ops.iter().map(|op| op.label()).collect()
    }
}

/// Digit form, e.g. `301` for Z⊗I⊗X.
impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in &self.ops {
            write!(f, "{}", op.index())?;
        }
        Ok(())
    }
}

/// Parses digit (`"0321"`) or letter (`"IZYX"`) notation.
impl FromStr for PauliString {
    type Err = AnnealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ops = s
            .chars()
            .map(|c| match c {
                'I' | 'i' => Ok(PauliOp::I),
                'X' | 'x' => Ok(PauliOp::X),
                'Y' | 'y' => Ok(PauliOp::Y),
                'Z' | 'z' => Ok(PauliOp::Z),
                _ => match c.to_digit(10) {
                    Some(d) if d <= 3 => PauliOp::from_index(d as u8),
                    Some(d) => Err(AnnealError::InvalidOperator { index: d }),
                    None => Err(AnnealError::InvalidSymbol(c)),
                },
            })
            .collect::<AnnealResult<Vec<_>>>()?;
        Ok(Self { ops })
    }
}

impl From<PauliString> for String {
    fn from(pauli: PauliString) -> Self {
        pauli.to_string()
    }
}

impl TryFrom<String> for PauliString {
    type Error = AnnealError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Compose two equal-length Pauli strings.
///
/// Returns the overall phase (always of unit magnitude) and the product
/// string. Fails with [`AnnealError::ShapeMismatch`] on unequal lengths.
pub fn compose(s1: &PauliString, s2: &PauliString) -> AnnealResult<(Complex64, PauliString)> {
    if s1.len() != s2.len() {
        return Err(AnnealError::ShapeMismatch {
            left: s1.len(),
            right: s2.len(),
        });
    }

    let mut exponent = 0u8;
    let ops = s1
        .ops
        .iter()
        .zip(&s2.ops)
        .map(|(&a, &b)| {
            let (phase, op) = product(a, b);
            exponent = (exponent + phase) % 4;
            op
        })
        .collect();

    Ok((phase_value(exponent), PauliString { ops }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-15
    }

    #[test]
    fn test_cyclic_products() {
        let i = Complex64::new(0.0, 1.0);
        assert_eq!(multiply_single(1, 2).unwrap(), (i, 3));
        assert_eq!(multiply_single(2, 1).unwrap(), (-i, 3));
        assert_eq!(multiply_single(3, 1).unwrap(), (i, 2));
        assert_eq!(multiply_single(1, 3).unwrap(), (-i, 2));
        assert_eq!(multiply_single(2, 3).unwrap(), (i, 1));
        assert_eq!(multiply_single(3, 2).unwrap(), (-i, 1));
    }

    #[test]
    fn test_invalid_index() {
        assert!(matches!(
            multiply_single(4, 0),
            Err(AnnealError::InvalidOperator { index: 4 })
        ));
        assert!(matches!(
            PauliString::from_indices(&[0, 7]),
            Err(AnnealError::InvalidOperator { index: 7 })
        ));
    }

    #[test]
    fn test_parse_digits_and_letters() {
        let digits: PauliString = "0123".parse().unwrap();
        let letters: PauliString = "IXYZ".parse().unwrap();
        assert_eq!(digits, letters);
        assert_eq!(digits.to_string(), "0123");
        assert_eq!(digits.label(), "IXYZ");
    }

    #[test]
    fn test_parse_rejects_bad_symbols() {
        assert!(matches!(
            "05".parse::<PauliString>(),
            Err(AnnealError::InvalidOperator { index: 5 })
        ));
        assert!(matches!(
            "0q".parse::<PauliString>(),
            Err(AnnealError::InvalidSymbol('q'))
        ));
    }

    #[test]
    fn test_compose_phases_multiply() {
        // (XY)⊗(YX) = (iZ)⊗(-iZ) = ZZ
        let a: PauliString = "12".parse().unwrap();
        let b: PauliString = "21".parse().unwrap();
        let (c, s) = compose(&a, &b).unwrap();
        assert!(close(c, Complex64::new(1.0, 0.0)));
        assert_eq!(s.to_string(), "33");

        // (XX)⊗(YY) = I⊗I
        let (c, s) = compose(&a, &a).unwrap();
        assert!(close(c, Complex64::new(1.0, 0.0)));
        assert!(s.is_identity());

        // (XY)⊗(ZZ) = (-iY)⊗(iX) = YX
        let zz: PauliString = "33".parse().unwrap();
        let (c, s) = compose(&a, &zz).unwrap();
        assert!(close(c, Complex64::new(1.0, 0.0)));
        assert_eq!(s.to_string(), "21");

        // (XI)⊗(YI) → iZ⊗I
        let xi: PauliString = "10".parse().unwrap();
        let yi: PauliString = "20".parse().unwrap();
        let (c, s) = compose(&xi, &yi).unwrap();
        assert!(close(c, Complex64::new(0.0, 1.0)));
        assert_eq!(s.to_string(), "30");
    }

    #[test]
    fn test_compose_shape_mismatch() {
        let a = PauliString::identity(2);
        let b = PauliString::identity(3);
        assert!(matches!(
            compose(&a, &b),
            Err(AnnealError::ShapeMismatch { left: 2, right: 3 })
        ));
    }

    #[test]
    fn test_diagonal_strings() {
        assert!("0303".parse::<PauliString>().unwrap().is_diagonal());
        assert!(!"0313".parse::<PauliString>().unwrap().is_diagonal());
        assert!(PauliString::identity(3).is_identity());
    }
}
