//! Smoke tests for the polytope vertex generators.
//!
//! We assert counts, unit norms, and the nearest-neighbour inner product that
//! the topology derivation later keys on.

use super::special;
use nalgebra::Vector4;

fn max_off_diagonal(verts: &[Vector4<f64>]) -> f64 {
    verts[1..]
        .iter()
        .map(|v| verts[0].dot(v))
        .fold(f64::NEG_INFINITY, f64::max)
}

fn all_unit(verts: &[Vector4<f64>]) -> bool {
    verts.iter().all(|v| (v.norm() - 1.0).abs() < 1e-12)
}

fn all_distinct(verts: &[Vector4<f64>]) -> bool {
    verts
        .iter()
        .enumerate()
        .all(|(i, a)| verts[i + 1..].iter().all(|b| (a - b).norm() > 1e-6))
}

#[test]
fn cell16_basic_props() {
    let v = special::cell16_vertices();
    assert_eq!(v.len(), 8);
    assert!(all_unit(&v));
    assert!(all_distinct(&v));
    assert!(max_off_diagonal(&v).abs() < 1e-12);
}

#[test]
fn cell24_basic_props() {
    let v = special::cell24_vertices();
    assert_eq!(v.len(), 24);
    assert!(all_unit(&v));
    assert!(all_distinct(&v));
    assert!((max_off_diagonal(&v) - 0.5).abs() < 1e-12);
}

#[test]
fn cell600_basic_props() {
    let v = special::cell600_vertices();
    assert_eq!(v.len(), 120);
    assert!(all_unit(&v));
    assert!(all_distinct(&v));
    // Neighbours subtend 36°: cos 36° = φ/2.
    let phi = (1.0 + 5f64.sqrt()) / 2.0;
    assert!((max_off_diagonal(&v) - phi / 2.0).abs() < 1e-12);
}

#[test]
fn cell600_index_order_is_stable() {
    let v = special::cell600_vertices();
    let phi = (1.0 + 5f64.sqrt()) / 2.0;
    let close = |i: usize, x: [f64; 4]| (v[i] - Vector4::from(x)).amax() < 1e-12;
    assert!(close(0, [1.0, 0.0, 0.0, 0.0]));
    assert!(close(7, [0.0, 0.0, 0.0, -1.0]));
    // Half-integer family: w flips first, x last.
    assert!(close(8, [0.5, 0.5, 0.5, 0.5]));
    assert!(close(9, [0.5, 0.5, 0.5, -0.5]));
    assert!(close(10, [0.5, 0.5, -0.5, 0.5]));
    assert!(close(23, [-0.5, -0.5, -0.5, -0.5]));
    // Golden family, identity permutation: the 1/(2φ) entry flips first.
    assert!(close(24, [phi / 2.0, 0.5, 1.0 / (2.0 * phi), 0.0]));
    assert!(close(25, [phi / 2.0, 0.5, -1.0 / (2.0 * phi), 0.0]));
    assert!(close(28, [-phi / 2.0, 0.5, 1.0 / (2.0 * phi), 0.0]));
}
