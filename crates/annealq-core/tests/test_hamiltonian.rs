//! Tests for Hamiltonian parsing and term access.

use annealq_core::error::AnnealError;
use annealq_core::hamiltonian::{Hamiltonian, MIN_SWEEP_TERMS, WeightedTerm, parse_hamiltonian};
use annealq_core::pauli::PauliString;
use num_complex::Complex64;

fn ps(s: &str) -> PauliString {
    s.parse().unwrap()
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

#[test]
fn zero_terms_stay_in_catalog() {
    let data = parse_hamiltonian("1.0 0.0 33\n0.0 0.0 00\n").unwrap();
    assert_eq!(data.hamiltonian.n_terms(), 1);
    assert_eq!(data.hamiltonian.terms()[0].coeff, Complex64::new(1.0, 0.0));
    assert_eq!(data.hamiltonian.terms()[0].pauli, ps("33"));
    assert_eq!(data.catalog, vec![ps("33"), ps("00")]);
}

#[test]
fn skips_comments_blank_and_short_lines() {
    let source = "# transverse field\n\n1.0 0.0 33\nnot_a_term\n-0.5 0.25 10\n1 2 3 4\n";
    let data = parse_hamiltonian(source).unwrap();
    assert_eq!(data.hamiltonian.n_terms(), 2);
    assert_eq!(data.hamiltonian.n_qubits(), 2);
    assert_eq!(
        data.hamiltonian.terms()[1].coeff,
        Complex64::new(-0.5, 0.25)
    );
}

#[test]
fn letter_notation_is_accepted() {
    let data = parse_hamiltonian("1.0 0.0 ZZ\n0.5 0.0 XI\n").unwrap();
    assert_eq!(data.catalog, vec![ps("33"), ps("10")]);
}

#[test]
fn malformed_number_reports_line() {
    let err = parse_hamiltonian("1.0 0.0 33\n1.x 0.0 11\n").unwrap_err();
    match err {
        AnnealError::Parse { line, message } => {
            assert_eq!(line, 2);
            assert!(message.contains("1.x"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn invalid_digit_is_rejected() {
    assert!(matches!(
        parse_hamiltonian("1.0 0.0 34\n"),
        Err(AnnealError::InvalidOperator { index: 4 })
    ));
}

#[test]
fn inconsistent_width_is_rejected() {
    assert!(matches!(
        parse_hamiltonian("1.0 0.0 33\n1.0 0.0 333\n"),
        Err(AnnealError::ShapeMismatch { left: 2, right: 3 })
    ));
}

#[test]
fn empty_source_gives_empty_hamiltonian() {
    let data = parse_hamiltonian("").unwrap();
    assert!(data.hamiltonian.is_empty());
    assert!(data.catalog.is_empty());
}

// ---------------------------------------------------------------------------
// Hamiltonian
// ---------------------------------------------------------------------------

#[test]
fn from_terms_checks_width() {
    let err = Hamiltonian::from_terms(vec![
        WeightedTerm::real(1.0, ps("3")),
        WeightedTerm::real(1.0, ps("33")),
    ])
    .unwrap_err();
    assert!(matches!(err, AnnealError::ShapeMismatch { left: 1, right: 2 }));
}

#[test]
fn sweep_needs_two_terms() {
    let h = Hamiltonian::from_terms(vec![WeightedTerm::real(1.0, ps("3"))]).unwrap();
    assert!(matches!(
        h.ensure_min_terms(MIN_SWEEP_TERMS),
        Err(AnnealError::InsufficientTerms {
            found: 1,
            required: 2
        })
    ));
}

#[test]
fn serializes_to_json() {
    let h = Hamiltonian::from_terms(vec![WeightedTerm::real(0.5, ps("30"))]).unwrap();
    let json = serde_json::to_value(&h).unwrap();
    assert_eq!(json["n_qubits"], 2);
    assert_eq!(json["terms"][0]["pauli"], "30");
}
