//! Presentation strings for Hamiltonians, ansätze and compositions.
//!
//! ```rust
//! use annealq_core::format::{format_complex, format_number};
//! use num_complex::Complex64;
//!
//! assert_eq!(format_number(2.0), "2");
//! assert_eq!(format_number(0.125), "0.125");
//! assert_eq!(format_complex(Complex64::new(0.5, -1.0)), "0.5-i");
//! ```

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::cache::ComposeCache;
use crate::error::AnnealResult;
use crate::expansion::PauliExpansion;
use crate::hamiltonian::{Hamiltonian, WeightedTerm};
use crate::pauli::PauliString;

const ZERO_TOLERANCE: f64 = 1e-12;

/// Symbolic and numeric descriptions of an optimized ansatz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsatzStrings {
    /// `U(θ) = e^(iθ_1*c*σ_s) * ...`
    pub symbolic: String,
    /// `U = c*σ_s + ...`
    pub numeric: String,
}

/// One row of the composition table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionRow {
    /// Left operand.
    pub left: PauliString,
    /// Right operand.
    pub right: PauliString,
    /// Phase of `left · right`.
    pub coeff: Complex64,
    /// Resulting string.
    pub product: PauliString,
}

/// Integers print without decimals; anything else gets at most four.
pub fn format_number(value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() < ZERO_TOLERANCE {
        return format!("{}", rounded as i64);
    }
    let text = format!("{value:.4}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// `a+bi` with unit imaginary parts shortened to `i` / `-i`.
pub fn format_complex(value: Complex64) -> String {
    let real = (value.re.abs() >= ZERO_TOLERANCE).then(|| format_number(value.re));
    let imag = (value.im.abs() >= ZERO_TOLERANCE).then(|| {
        if (value.im - 1.0).abs() < ZERO_TOLERANCE {
            "i".to_string()
        } else if (value.im + 1.0).abs() < ZERO_TOLERANCE {
            "-i".to_string()
        } else {
            format!("{}i", format_number(value.im))
        }
    });

    match (real, imag) {
        (None, None) => "0".to_string(),
        (Some(re), None) => re,
        (None, Some(im)) => im,
        (Some(re), Some(im)) if im.starts_with('-') => format!("{re}{im}"),
        (Some(re), Some(im)) => format!("{re}+{im}"),
    }
}

/// `σ_33` for a unit coefficient, `<c>*σ_33` otherwise.
pub fn format_operator(coeff: Complex64, pauli: &PauliString) -> String {
    if (coeff - Complex64::new(1.0, 0.0)).norm() < ZERO_TOLERANCE {
        format!("σ_{pauli}")
    } else {
        format!("{}*σ_{pauli}", format_complex(coeff))
    }
}

/// `H = t1 + t2 + ...` in term order.
pub fn format_hamiltonian(hamiltonian: &Hamiltonian) -> String {
    let terms: Vec<String> = hamiltonian
        .terms()
        .iter()
        .map(|t| format_operator(t.coeff, &t.pauli))
        .collect();
    format!("H = {}", terms.join(" + "))
}

/// Describe the ansatz both as a product of exponentials over `generators`
/// and as the expanded sum held in `expansion`.
pub fn format_ansatz(generators: &[WeightedTerm], expansion: &PauliExpansion) -> AnsatzStrings {
    let factors: Vec<String> = generators
        .iter()
        .enumerate()
        .map(|(k, g)| format!("e^(iθ_{}*{}*σ_{})", k + 1, format_complex(g.coeff), g.pauli))
        .collect();

    let terms: Vec<String> = expansion
        .sorted()
        .into_iter()
        .map(|(pauli, coeff)| format!("{}*σ_{pauli}", format_complex(coeff)))
        .collect();

    AnsatzStrings {
        symbolic: format!("U(θ) = {}", factors.join(" * ")),
        numeric: format!("U = {}", terms.join(" + ")),
    }
}

/// Compose every ordered pair of `strings`.
pub fn composition_table(
    strings: &[PauliString],
    cache: &ComposeCache,
) -> AnnealResult<Vec<CompositionRow>> {
    let mut rows = Vec::with_capacity(strings.len() * strings.len());
    for left in strings {
        for right in strings {
            let (coeff, product) = cache.compose(left, right)?;
            rows.push(CompositionRow {
                left: left.clone(),
                right: right.clone(),
                coeff,
                product,
            });
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-2.0), "-2");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-0.25), "-0.25");
        assert_eq!(format_number(0.00001), "0");
        assert_eq!(format_number(-0.00001), "0");
    }

    #[test]
    fn test_format_complex() {
        assert_eq!(format_complex(Complex64::new(0.0, 0.0)), "0");
        assert_eq!(format_complex(Complex64::new(0.0, 1.0)), "i");
        assert_eq!(format_complex(Complex64::new(0.0, -1.0)), "-i");
        assert_eq!(format_complex(Complex64::new(1.5, 0.0)), "1.5");
        assert_eq!(format_complex(Complex64::new(1.0, 2.0)), "1+2i");
        assert_eq!(format_complex(Complex64::new(1.0, -0.5)), "1-0.5i");
        assert_eq!(format_complex(Complex64::new(1e-14, 1.0)), "i");
    }

    #[test]
    fn test_format_operator() {
        let zz: PauliString = "33".parse().unwrap();
        assert_eq!(format_operator(Complex64::new(1.0, 0.0), &zz), "σ_33");
        assert_eq!(format_operator(Complex64::new(-0.5, 0.0), &zz), "-0.5*σ_33");
    }
}
