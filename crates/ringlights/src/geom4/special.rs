//! Vertex sets of the regular 4D polytopes used by the puzzle.
//!
//! Purpose
//! - Generate the unit-3-sphere vertices of the 16-cell, 24-cell and 600-cell
//!   deterministically, so every derived index (rings, bundles, clicks) is
//!   stable across runs.
//!
//! Coordinates
//! - 16-cell: the eight `±e_i`.
//! - 24-cell: `(±1, ±1, 0, 0)/√2` over all six coordinate pairs.
//! - 600-cell: `±e_i`, `(±½, ±½, ±½, ±½)`, and the even permutations of
//!   `(±φ/2, ±½, ±1/(2φ), 0)` with φ the golden ratio.

use nalgebra::Vector4;

use super::util::{even_permutations4, push_unique};

const DEDUP_TOL: f64 = 1e-8;

fn unit_axes() -> Vec<Vector4<f64>> {
    let mut verts = Vec::with_capacity(8);
    for i in 0..4 {
        for s in [1.0, -1.0] {
            let mut v = Vector4::zeros();
            v[i] = s;
            verts.push(v);
        }
    }
    verts
}

/// 16-cell (cross polytope): 8 vertices.
pub fn cell16_vertices() -> Vec<Vector4<f64>> {
    unit_axes()
}

/// 24-cell: 24 vertices.
pub fn cell24_vertices() -> Vec<Vector4<f64>> {
    let h = std::f64::consts::FRAC_1_SQRT_2;
    let mut verts = Vec::with_capacity(24);
    for i in 0..4 {
        for j in i + 1..4 {
            for si in [1.0, -1.0] {
                for sj in [1.0, -1.0] {
                    let mut v = Vector4::zeros();
                    v[i] = si * h;
                    v[j] = sj * h;
                    verts.push(v);
                }
            }
        }
    }
    verts
}

/// 600-cell: 120 vertices (the binary icosahedral group as unit quaternions).
pub fn cell600_vertices() -> Vec<Vector4<f64>> {
    let phi = (1.0 + 5f64.sqrt()) / 2.0;
    let mut verts = Vec::with_capacity(120);
    for v in unit_axes() {
        push_unique(&mut verts, v, DEDUP_TOL);
    }
    // The last coordinate's sign changes fastest.
    for bits in 0..16u32 {
        let sign = |k: u32| if bits & (1 << (3 - k)) == 0 { 0.5 } else { -0.5 };
        push_unique(&mut verts, Vector4::new(sign(0), sign(1), sign(2), sign(3)), DEDUP_TOL);
    }
    // base[k] is placed at the position p with perm[p] == k; the zero entry takes no sign.
    let base = [phi / 2.0, 0.5, 1.0 / (2.0 * phi), 0.0];
    for perm in even_permutations4() {
        for bits in 0..8u32 {
            let mut v = Vector4::zeros();
            for (pos, &k) in perm.iter().enumerate() {
                let s = if k < 3 && bits & (1 << (2 - k)) != 0 { -1.0 } else { 1.0 };
                v[pos] = s * base[k];
            }
            push_unique(&mut verts, v, DEDUP_TOL);
        }
    }
    verts
}
