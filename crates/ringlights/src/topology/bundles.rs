//! Bundle assignment: group rings into vertex-disjoint color classes.
//!
//! Hopf quotient
//! - A great circle through unit quaternions `v1, v2` is the orbit of `v1`
//!   under left multiplication by the one-parameter subgroup through
//!   `v2·v1⁻¹`. Rings whose first-edge quotients `v1·v2⁻¹` generate the same
//!   subgroup are Clifford-parallel, hence vertex-disjoint. Traversal
//!   direction only swaps the quotient for its inverse, so the class key is
//!   the smaller of the two canonical forms.
//!
//! Disjoint cover
//! - Depth-first partition: the lowest unassigned ring seeds the next bundle,
//!   which is extended with disjoint rings until it covers every vertex.

use std::collections::BTreeMap;

use nalgebra::{Quaternion, Vector4};

use super::types::{DerivationError, Ring, TopologyCfg};
use crate::geom4::util::quantize4;

type QuatKey = [i64; 4];

/// Coordinates `(x, y, z, w)` read as the quaternion `x + y·i + z·j + w·k`.
#[inline]
fn as_quaternion(v: Vector4<f64>) -> Quaternion<f64> {
    Quaternion::new(v[0], v[1], v[2], v[3])
}

/// Rounded components in `(w, i, j, k)` order, first non-zero made positive.
fn canonical_key(q: &Quaternion<f64>, decimals: u32) -> QuatKey {
    let mut key = quantize4(Vector4::new(q.w, q.i, q.j, q.k), decimals);
    if let Some(&lead) = key.iter().find(|&&c| c != 0) {
        if lead < 0 {
            for c in key.iter_mut() {
                *c = -*c;
            }
        }
    }
    key
}

/// Class key of a ring: equal for rings whose quotients are equal or inverse.
fn hopf_key(vertices: &[Vector4<f64>], ring: &[usize], decimals: u32) -> QuatKey {
    let q1 = as_quaternion(vertices[ring[0]]);
    let q2 = as_quaternion(vertices[ring[1]]);
    // Unit quaternions: the inverse is the conjugate.
    let quotient = (q1 * q2.conjugate()).normalize();
    let fwd = canonical_key(&quotient, decimals);
    let inv = canonical_key(&quotient.conjugate(), decimals);
    fwd.min(inv)
}

/// Bundle index per ring, numbered by first appearance.
pub(crate) fn hopf_bundles(
    vertices: &[Vector4<f64>],
    rings: &[Vec<usize>],
    cfg: &TopologyCfg,
) -> Vec<usize> {
    let mut classes: BTreeMap<QuatKey, usize> = BTreeMap::new();
    rings
        .iter()
        .map(|r| {
            let key = hopf_key(vertices, r, cfg.quat_decimals);
            let next = classes.len();
            *classes.entry(key).or_insert(next)
        })
        .collect()
}

pub(crate) fn singleton_bundles(rings: &[Vec<usize>]) -> Vec<usize> {
    (0..rings.len()).collect()
}

/// Partition rings into bundles of `n / ring_len` disjoint rings each.
pub(crate) fn disjoint_cover_bundles(
    vertex_count: usize,
    rings: &[Vec<usize>],
) -> Result<Vec<usize>, DerivationError> {
    if vertex_count > 128 {
        return Err(DerivationError::TooManyVertices {
            count: vertex_count,
        });
    }
    let ring_len = rings.first().map_or(0, Vec::len);
    if ring_len == 0 || vertex_count % ring_len != 0 {
        return Err(DerivationError::NoPartition);
    }
    let mut search = CoverSearch {
        masks: rings
            .iter()
            .map(|r| r.iter().fold(0u128, |m, &v| m | (1u128 << v)))
            .collect(),
        full: if vertex_count == 128 {
            u128::MAX
        } else {
            (1u128 << vertex_count) - 1
        },
        size: vertex_count / ring_len,
        assign: vec![None; rings.len()],
    };
    if !search.partition(0) {
        return Err(DerivationError::NoPartition);
    }
    Ok(search.assign.into_iter().flatten().collect())
}

struct CoverSearch {
    masks: Vec<u128>,
    full: u128,
    size: usize,
    assign: Vec<Option<usize>>,
}

impl CoverSearch {
    fn partition(&mut self, bundle: usize) -> bool {
        let Some(seed) = self.assign.iter().position(Option::is_none) else {
            return true;
        };
        let mut members = vec![seed];
        self.extend(bundle, self.masks[seed], &mut members, seed + 1)
    }

    fn extend(
        &mut self,
        bundle: usize,
        covered: u128,
        members: &mut Vec<usize>,
        start: usize,
    ) -> bool {
        if members.len() == self.size {
            if covered != self.full {
                return false;
            }
            for &m in members.iter() {
                self.assign[m] = Some(bundle);
            }
            if self.partition(bundle + 1) {
                return true;
            }
            for &m in members.iter() {
                self.assign[m] = None;
            }
            return false;
        }
        for r in start..self.masks.len() {
            if self.assign[r].is_some() || self.masks[r] & covered != 0 {
                continue;
            }
            members.push(r);
            if self.extend(bundle, covered | self.masks[r], members, r + 1) {
                return true;
            }
            members.pop();
        }
        false
    }
}

/// Equal sizes, vertex-disjoint members, and the expected bundle count.
pub(crate) fn validate_bundles(
    rings: &[Ring],
    vertex_count: usize,
    expected: usize,
) -> Result<usize, DerivationError> {
    let count = rings.iter().map(|r| r.bundle + 1).max().unwrap_or(0);
    if count != expected {
        return Err(DerivationError::BundleCount {
            expected,
            found: count,
        });
    }
    let mut sizes = vec![0usize; count];
    let mut owner: Vec<Vec<bool>> = vec![vec![false; vertex_count]; count];
    for r in rings {
        sizes[r.bundle] += 1;
        for &v in &r.vertices {
            if owner[r.bundle][v] {
                return Err(DerivationError::OverlappingBundle { bundle: r.bundle });
            }
            owner[r.bundle][v] = true;
        }
    }
    if sizes.iter().any(|&s| s != sizes[0]) {
        return Err(DerivationError::UnequalBundles { sizes });
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_key_flips_sign_and_drops_negative_zero() {
        let q = Quaternion::new(-0.0, -0.5, 0.5, -0.0);
        assert_eq!(canonical_key(&q, 6), [0, 500_000, -500_000, 0]);
    }

    #[test]
    fn inverse_quotients_share_a_key() {
        let s = 0.5f64.sqrt();
        let v = [
            Vector4::new(1.0, 0.0, 0.0, 0.0),
            Vector4::new(s, s, 0.0, 0.0),
        ];
        let fwd = hopf_key(&v, &[0, 1], 6);
        let back = hopf_key(&v, &[1, 0], 6);
        assert_eq!(fwd, back);
    }

    #[test]
    fn cover_rejects_odd_split() {
        let rings = vec![vec![0, 1, 2], vec![1, 2, 3]];
        assert_eq!(
            disjoint_cover_bundles(4, &rings),
            Err(DerivationError::NoPartition)
        );
    }

    #[test]
    fn cover_pairs_disjoint_rings() {
        let rings = vec![vec![0, 1], vec![0, 2], vec![2, 3], vec![1, 3]];
        let b = disjoint_cover_bundles(4, &rings).unwrap();
        assert_eq!(b, vec![0, 1, 0, 1]);
    }
}
