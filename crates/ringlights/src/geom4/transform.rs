//! Pure 4D transforms: plane rotations, composition, stereographic projection,
//! and great-circle interpolation on S³.
//!
//! Conventions
//! - Matrices act on column vectors: `apply(p, m) = m · p`.
//! - `compose(m1, m2) = m1 · m2`, i.e. `m2` acts first. The rotation
//!   controller left-multiplies increments onto the accumulated orientation.
//! - Projection is from the pole `(0, 0, 0, −1)` onto the hyperplane `w = 0`.

use nalgebra::{Matrix4, Vector3, Vector4};

use super::cfg::{ARC_EPS, PROJ_CLAMP, PROJ_EPS};

/// Coordinate axis of R⁴; `W` is the fourth (“hidden”) axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
    W,
}

impl Axis {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
            Axis::W => 3,
        }
    }

    /// The three spatial axes, in the order the controller applies them.
    pub const SPATIAL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

/// Rotation by `angle` in the coordinate plane spanned by `a` and `b`.
///
/// Rotates `a` towards `b` for positive angles. Panics if `a == b`.
pub fn rotation_plane(a: Axis, b: Axis, angle: f64) -> Matrix4<f64> {
    assert!(a != b, "rotation plane needs two distinct axes, got {a:?} twice");
    let (i, j) = (a.index(), b.index());
    let (s, c) = angle.sin_cos();
    let mut m = Matrix4::identity();
    m[(i, i)] = c;
    m[(i, j)] = -s;
    m[(j, i)] = s;
    m[(j, j)] = c;
    m
}

/// `m1 · m2`: apply `m2`, then `m1`.
#[inline]
pub fn compose(m1: &Matrix4<f64>, m2: &Matrix4<f64>) -> Matrix4<f64> {
    m1 * m2
}

#[inline]
pub fn apply(p: Vector4<f64>, m: &Matrix4<f64>) -> Vector4<f64> {
    m * p
}

/// Stereographic projection `(x, y, z, w) ↦ (x, y, z) / (1 + w)`.
///
/// Near the pole the radial distance is clamped to `PROJ_CLAMP` keeping the
/// direction of `(x, y, z)`; exactly at the pole there is no direction and
/// the result is `+z · PROJ_CLAMP`. The output is always finite.
pub fn project(p: Vector4<f64>) -> Vector3<f64> {
    let xyz = p.xyz();
    let denom = 1.0 + p.w;
    if denom < PROJ_EPS {
        let n = xyz.norm();
        if n < 1e-12 {
            return Vector3::new(0.0, 0.0, PROJ_CLAMP);
        }
        return xyz * (PROJ_CLAMP / n);
    }
    let r = xyz / denom;
    let n = r.norm();
    if n > PROJ_CLAMP {
        r * (PROJ_CLAMP / n)
    } else {
        r
    }
}

/// Spherical linear interpolation from `p1` to `p2` with `segments + 1` points.
///
/// Both inputs should be unit vectors. When `sin θ` vanishes (coincident or
/// antipodal endpoints) the arc is undefined and only `[p1, p2]` is returned.
pub fn great_circle_arc(p1: Vector4<f64>, p2: Vector4<f64>, segments: usize) -> Vec<Vector4<f64>> {
    let segments = segments.max(1);
    let theta = p1.dot(&p2).clamp(-1.0, 1.0).acos();
    let sin_theta = theta.sin();
    if sin_theta.abs() < ARC_EPS {
        return vec![p1, p2];
    }
    (0..=segments)
        .map(|i| {
            let t = i as f64 / segments as f64;
            let wa = ((1.0 - t) * theta).sin() / sin_theta;
            let wb = (t * theta).sin() / sin_theta;
            p1 * wa + p2 * wb
        })
        .collect()
}

/// Max-abs deviation of `MᵀM` from the identity.
pub fn orthogonality_error(m: &Matrix4<f64>) -> f64 {
    (m.transpose() * m - Matrix4::identity()).amax()
}

/// Gram–Schmidt on the columns; keeps a near-rotation a rotation (det +1).
pub fn reorthonormalize(m: &Matrix4<f64>) -> Matrix4<f64> {
    let mut cols: [Vector4<f64>; 4] = [
        m.column(0).into_owned(),
        m.column(1).into_owned(),
        m.column(2).into_owned(),
        m.column(3).into_owned(),
    ];
    for k in 0..4 {
        for j in 0..k {
            let proj = cols[j].dot(&cols[k]);
            cols[k] -= cols[j] * proj;
        }
        let n = cols[k].norm();
        if n > 0.0 {
            cols[k] /= n;
        }
    }
    Matrix4::from_columns(&cols)
}
