//! Small utilities: permutations, order-preserving dedup, and quantization.

use nalgebra::Vector4;

/// All permutations of `0..4` with even parity, lexicographic.
pub(crate) fn even_permutations4() -> Vec<[usize; 4]> {
    let mut out = Vec::with_capacity(12);
    for a in 0..4 {
        for b in 0..4 {
            for c in 0..4 {
                for d in 0..4 {
                    let p = [a, b, c, d];
                    if is_permutation(&p) && is_even(p) {
                        out.push(p);
                    }
                }
            }
        }
    }
    out
}

fn is_permutation(p: &[usize; 4]) -> bool {
    let mut seen = [false; 4];
    for &i in p {
        if seen[i] {
            return false;
        }
        seen[i] = true;
    }
    true
}

/// Parity by counting transpositions while sorting in place.
fn is_even(mut p: [usize; 4]) -> bool {
    let mut swaps = 0;
    for i in 0..4 {
        while p[i] != i {
            let j = p[i];
            p.swap(i, j);
            swaps += 1;
        }
    }
    swaps % 2 == 0
}

/// Append `v` unless an existing point lies within `tol` (max-abs metric).
pub(crate) fn push_unique(points: &mut Vec<Vector4<f64>>, v: Vector4<f64>, tol: f64) {
    if points.iter().all(|p| (p - v).amax() >= tol) {
        points.push(v);
    }
}

/// Round each component to `decimals` places as integers.
///
/// Integer keys compare exactly and carry no signed zero.
pub(crate) fn quantize4(v: Vector4<f64>, decimals: u32) -> [i64; 4] {
    let s = 10f64.powi(decimals as i32);
    [
        (v[0] * s).round() as i64,
        (v[1] * s).round() as i64,
        (v[2] * s).round() as i64,
        (v[3] * s).round() as i64,
    ]
}
