//! Edge discovery and ring tracing.
//!
//! Edges are the pairs at the nearest-neighbour inner product of vertex 0
//! (regular polytopes have one edge-length class). Rings are traced by
//! reflecting the previous vertex through the current one, which walks the
//! great circle spanned by an edge until it closes.

use std::collections::BTreeSet;

use nalgebra::Vector4;

use super::types::{DerivationError, TopologyCfg};

pub(crate) type EdgeSet = BTreeSet<(usize, usize)>;

#[inline]
pub(crate) fn edge_key(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}

/// Check the input lies on S³ and holds at least one pair.
pub(crate) fn check_vertices(
    vertices: &[Vector4<f64>],
    cfg: &TopologyCfg,
) -> Result<(), DerivationError> {
    if vertices.len() < 2 {
        return Err(DerivationError::TooFewVertices {
            count: vertices.len(),
        });
    }
    for (i, v) in vertices.iter().enumerate() {
        let norm = v.norm();
        if !((norm - 1.0).abs() <= cfg.unit_eps) {
            return Err(DerivationError::NotOnSphere { vertex: i, norm });
        }
    }
    Ok(())
}

/// All pairs whose inner product matches the nearest-neighbour threshold.
pub(crate) fn find_edges(
    vertices: &[Vector4<f64>],
    cfg: &TopologyCfg,
) -> Result<(EdgeSet, f64), DerivationError> {
    let v0 = vertices[0];
    let threshold = vertices[1..]
        .iter()
        .map(|v| v0.dot(v))
        .fold(f64::NEG_INFINITY, f64::max);
    if threshold >= 1.0 - cfg.edge_eps {
        return Err(DerivationError::DuplicateVertex { threshold });
    }
    let mut edges = EdgeSet::new();
    for i in 0..vertices.len() {
        for j in i + 1..vertices.len() {
            if (vertices[i].dot(&vertices[j]) - threshold).abs() < cfg.edge_eps {
                edges.insert((i, j));
            }
        }
    }
    if edges.is_empty() {
        return Err(DerivationError::NoEdges);
    }
    Ok((edges, threshold))
}

/// Reflect `a` through the axis of `b`: `2·proj_b(a) − a`.
#[inline]
pub(crate) fn reflect_through(a: Vector4<f64>, b: Vector4<f64>) -> Vector4<f64> {
    let proj = b * (a.dot(&b) / b.dot(&b));
    proj * 2.0 - a
}

/// Unique vertex within `match_eps` of `p`.
fn match_vertex(
    vertices: &[Vector4<f64>],
    p: Vector4<f64>,
    from: (usize, usize),
    cfg: &TopologyCfg,
) -> Result<usize, DerivationError> {
    let mut hits = vertices
        .iter()
        .enumerate()
        .filter(|(_, v)| (*v - p).norm() < cfg.match_eps)
        .map(|(i, _)| i);
    let first = hits
        .next()
        .ok_or(DerivationError::UnmatchedReflection { from })?;
    let extra = hits.count();
    if extra > 0 {
        return Err(DerivationError::AmbiguousReflection {
            from,
            matches: extra + 1,
        });
    }
    Ok(first)
}

/// Consume every edge into closed rings; rings start at the smallest unused edge.
pub(crate) fn trace_rings(
    vertices: &[Vector4<f64>],
    edges: &EdgeSet,
    cfg: &TopologyCfg,
) -> Result<Vec<Vec<usize>>, DerivationError> {
    let mut unused = edges.clone();
    let mut rings = Vec::new();
    while let Some(&(a, b)) = unused.iter().next() {
        let mut ring = vec![a];
        let (mut prev, mut cur) = (a, b);
        loop {
            let key = edge_key(prev, cur);
            if !edges.contains(&key) {
                return Err(DerivationError::NotAnEdge { edge: key });
            }
            if !unused.remove(&key) {
                return Err(DerivationError::EdgeReused { edge: key });
            }
            if cur == a {
                break;
            }
            ring.push(cur);
            if ring.len() > vertices.len() {
                return Err(DerivationError::OpenRing { start: (a, b) });
            }
            let reflected = reflect_through(vertices[prev], vertices[cur]);
            let next = match_vertex(vertices, reflected, (prev, cur), cfg)?;
            prev = cur;
            cur = next;
        }
        rings.push(ring);
    }
    Ok(rings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom4::cell16_vertices;

    #[test]
    fn reflection_walks_the_square() {
        let a = Vector4::new(1.0, 0.0, 0.0, 0.0);
        let b = Vector4::new(0.0, 1.0, 0.0, 0.0);
        let r = reflect_through(a, b);
        assert!((r - Vector4::new(-1.0, 0.0, 0.0, 0.0)).amax() < 1e-12);
    }

    #[test]
    fn cell16_edges_skip_antipodes() {
        let v = cell16_vertices();
        let (edges, t) = find_edges(&v, &TopologyCfg::default()).unwrap();
        assert!(t.abs() < 1e-12);
        assert_eq!(edges.len(), 24);
        // (0, 1) is (+e1, −e1).
        assert!(!edges.contains(&(0, 1)));
    }

    #[test]
    fn cell16_first_ring_is_a_square() {
        let v = cell16_vertices();
        let cfg = TopologyCfg::default();
        let (edges, _) = find_edges(&v, &cfg).unwrap();
        let rings = trace_rings(&v, &edges, &cfg).unwrap();
        assert_eq!(rings.len(), 6);
        // Smallest edge (0, 2): +e1, +e2, −e1, −e2.
        assert_eq!(rings[0], vec![0, 2, 1, 3]);
    }
}
