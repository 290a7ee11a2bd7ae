//! Tests for the presentation strings.

use annealq_core::ansatz::build_ansatz;
use annealq_core::cache::ComposeCache;
use annealq_core::expansion::DEFAULT_PRUNE_EPSILON;
use annealq_core::format::{composition_table, format_ansatz, format_hamiltonian};
use annealq_core::hamiltonian::{WeightedTerm, parse_hamiltonian};
use annealq_core::pauli::PauliString;
use num_complex::Complex64;

fn ps(s: &str) -> PauliString {
    s.parse().unwrap()
}

#[test]
fn hamiltonian_string() {
    let data = parse_hamiltonian("1.0 0.0 33\n-0.5 0.0 10\n0.0 1.0 02\n").unwrap();
    assert_eq!(
        format_hamiltonian(&data.hamiltonian),
        "H = σ_33 + -0.5*σ_10 + i*σ_02"
    );
}

#[test]
fn ansatz_strings_at_zero_angles() {
    let cache = ComposeCache::default();
    let generators = vec![
        WeightedTerm::real(1.0, ps("11")),
        WeightedTerm::real(0.5, ps("10")),
    ];
    let u = build_ansatz(&[0.0, 0.0], &generators, &cache, DEFAULT_PRUNE_EPSILON).unwrap();
    let strings = format_ansatz(&generators, &u);
    assert_eq!(
        strings.symbolic,
        "U(θ) = e^(iθ_1*1*σ_11) * e^(iθ_2*0.5*σ_10)"
    );
    assert_eq!(strings.numeric, "U = 1*σ_00");
}

#[test]
fn ansatz_numeric_is_sorted() {
    let cache = ComposeCache::default();
    let generators = vec![WeightedTerm::real(1.0, ps("3"))];
    let u = build_ansatz(&[std::f64::consts::FRAC_PI_4], &generators, &cache, DEFAULT_PRUNE_EPSILON)
        .unwrap();
    let strings = format_ansatz(&generators, &u);
    assert_eq!(strings.numeric, "U = 0.7071*σ_0 + 0.7071i*σ_3");
}

#[test]
fn composition_table_covers_all_pairs() {
    let cache = ComposeCache::default();
    let catalog = vec![ps("1"), ps("2"), ps("3")];
    let rows = composition_table(&catalog, &cache).unwrap();
    assert_eq!(rows.len(), 9);

    let xy = &rows[1];
    assert_eq!(xy.left, ps("1"));
    assert_eq!(xy.right, ps("2"));
    assert_eq!(xy.product, ps("3"));
    assert!((xy.coeff - Complex64::new(0.0, 1.0)).norm() < 1e-15);

    assert!(rows[0].product.is_identity());
}
