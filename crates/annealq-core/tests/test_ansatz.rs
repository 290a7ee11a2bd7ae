//! Tests for the ansatz expansion.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use annealq_core::ansatz::{AnsatzBuilder, build_ansatz};
use annealq_core::cache::ComposeCache;
use annealq_core::error::AnnealError;
use annealq_core::expansion::DEFAULT_PRUNE_EPSILON;
use annealq_core::hamiltonian::WeightedTerm;
use annealq_core::pauli::PauliString;
use num_complex::Complex64;
use proptest::prelude::*;

fn ps(s: &str) -> PauliString {
    s.parse().unwrap()
}

fn close(a: Complex64, b: Complex64) -> bool {
    (a - b).norm() < 1e-12
}

// ---------------------------------------------------------------------------
// Basic shapes
// ---------------------------------------------------------------------------

#[test]
fn zero_angles_give_identity() {
    let cache = ComposeCache::default();
    let generators = vec![
        WeightedTerm::real(1.0, ps("11")),
        WeightedTerm::real(0.5, ps("30")),
    ];
    let u = build_ansatz(&[0.0, 0.0], &generators, &cache, DEFAULT_PRUNE_EPSILON).unwrap();
    assert_eq!(u.len(), 1);
    assert!(close(u.get(&ps("00")), Complex64::new(1.0, 0.0)));
}

#[test]
fn empty_generators_give_identity_on_given_width() {
    let cache = ComposeCache::default();
    let u = AnsatzBuilder::new(&cache, 3).build(&[], &[]).unwrap();
    assert_eq!(u.len(), 1);
    assert_eq!(u.n_qubits(), 3);
    assert!(close(u.get(&PauliString::identity(3)), Complex64::new(1.0, 0.0)));
}

#[test]
fn angle_count_must_match() {
    let cache = ComposeCache::default();
    let generators = vec![WeightedTerm::real(1.0, ps("1"))];
    assert!(matches!(
        build_ansatz(&[0.1, 0.2], &generators, &cache, DEFAULT_PRUNE_EPSILON),
        Err(AnnealError::DimensionMismatch {
            angles: 2,
            generators: 1
        })
    ));
}

#[test]
fn generator_width_must_match() {
    let cache = ComposeCache::default();
    let generators = vec![WeightedTerm::real(1.0, ps("1"))];
    assert!(matches!(
        AnsatzBuilder::new(&cache, 2).build(&[0.3], &generators),
        Err(AnnealError::ShapeMismatch { .. })
    ));
}

// ---------------------------------------------------------------------------
// Euler expansion
// ---------------------------------------------------------------------------

#[test]
fn single_generator_euler_form() {
    let cache = ComposeCache::default();
    let theta = 0.3_f64;
    let generators = vec![WeightedTerm::real(1.0, ps("1"))];
    let u = build_ansatz(&[theta], &generators, &cache, DEFAULT_PRUNE_EPSILON).unwrap();
    assert!(close(u.get(&ps("0")), Complex64::new(theta.cos(), 0.0)));
    assert!(close(u.get(&ps("1")), Complex64::new(0.0, theta.sin())));
}

#[test]
fn coefficient_scales_generator_branch_only() {
    let cache = ComposeCache::default();
    let theta = FRAC_PI_4;
    let generators = vec![WeightedTerm::real(0.5, ps("3"))];
    let u = build_ansatz(&[theta], &generators, &cache, DEFAULT_PRUNE_EPSILON).unwrap();
    assert!(close(u.get(&ps("0")), Complex64::new(theta.cos(), 0.0)));
    assert!(close(u.get(&ps("3")), Complex64::new(0.0, 0.5 * theta.sin())));
}

#[test]
fn quarter_turn_is_pruned_to_generator() {
    let cache = ComposeCache::default();
    let generators = vec![WeightedTerm::real(1.0, ps("10"))];
    let u = build_ansatz(&[FRAC_PI_2], &generators, &cache, DEFAULT_PRUNE_EPSILON).unwrap();
    assert_eq!(u.len(), 1);
    assert!(close(u.get(&ps("10")), Complex64::new(0.0, 1.0)));
}

#[test]
fn two_generators_compose_in_order() {
    // (cos a + i sin a X)(cos b + i sin b Z): the X·Z branch carries XZ = -iY.
    let cache = ComposeCache::default();
    let (a, b) = (0.4_f64, 0.9_f64);
    let generators = vec![
        WeightedTerm::real(1.0, ps("1")),
        WeightedTerm::real(1.0, ps("3")),
    ];
    let u = build_ansatz(&[a, b], &generators, &cache, DEFAULT_PRUNE_EPSILON).unwrap();
    let i = Complex64::new(0.0, 1.0);
    let expected_y = i * a.sin() * i * b.sin() * (-i);
    assert!(close(u.get(&ps("0")), Complex64::new(a.cos() * b.cos(), 0.0)));
    assert!(close(u.get(&ps("1")), i * a.sin() * b.cos()));
    assert!(close(u.get(&ps("3")), i * a.cos() * b.sin()));
    assert!(close(u.get(&ps("2")), expected_y));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn unit_generators_preserve_weight(angles in prop::collection::vec(0.0_f64..6.3, 3)) {
        let cache = ComposeCache::default();
        let generators = vec![
            WeightedTerm::real(1.0, ps("11")),
            WeightedTerm::real(1.0, ps("30")),
            WeightedTerm::real(-1.0, ps("02")),
        ];
        let u = build_ansatz(&angles, &generators, &cache, DEFAULT_PRUNE_EPSILON).unwrap();
        prop_assert!((u.weight() - 1.0).abs() < 1e-9);
        prop_assert!(u.len() <= 8);
    }
}
