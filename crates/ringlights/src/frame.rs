//! Renderer-ready snapshot: projected vertices and ring polylines.
//!
//! Each ring is drawn as the concatenation of its edges' great-circle arcs,
//! sampled on S³ after rotation and then projected, so the curves stay true
//! to the 4D geometry instead of straight chords in R³.

use nalgebra::{Matrix4, Vector3};

use crate::geom4::{apply, great_circle_arc, project};
use crate::topology::{PolytopeDescriptor, Rgb};

/// One ring's projected polyline. The last point repeats the first.
#[derive(Clone, Debug, PartialEq)]
pub struct RingPath {
    pub ring: usize,
    pub bundle: usize,
    pub color: Rgb,
    pub lit: bool,
    pub points: Vec<Vector3<f64>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Projected vertex positions, indexed like the descriptor's vertices.
    pub vertices: Vec<Vector3<f64>>,
    /// One path per ring, in ring order.
    pub rings: Vec<RingPath>,
}

impl Frame {
    pub fn lit_rings(&self) -> impl Iterator<Item = &RingPath> + '_ {
        self.rings.iter().filter(|r| r.lit)
    }
}

/// Build the frame for `descriptor` seen through `orientation`.
///
/// Panics if `ring_states` has fewer entries than the descriptor has rings.
pub fn build_frame(
    descriptor: &PolytopeDescriptor,
    orientation: &Matrix4<f64>,
    ring_states: &[bool],
    arc_segments: usize,
) -> Frame {
    assert!(
        ring_states.len() >= descriptor.ring_count(),
        "ring_states has {} entries for {} rings",
        ring_states.len(),
        descriptor.ring_count()
    );
    let rotated: Vec<_> = descriptor
        .vertices()
        .iter()
        .map(|&v| apply(v, orientation))
        .collect();
    let vertices = rotated.iter().map(|&p| project(p)).collect();

    let rings = descriptor
        .rings()
        .iter()
        .enumerate()
        .map(|(i, ring)| {
            let mut points = vec![project(rotated[ring.vertices[0]])];
            for (a, b) in ring.edges() {
                let arc = great_circle_arc(rotated[a], rotated[b], arc_segments);
                points.extend(arc.into_iter().skip(1).map(project));
            }
            RingPath {
                ring: i,
                bundle: ring.bundle,
                color: descriptor.bundle_color(ring.bundle),
                lit: ring_states[i],
                points,
            }
        })
        .collect();

    Frame { vertices, rings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::default_initial_orientation;
    use crate::shapes::Shape;
    use crate::topology::TopologyCfg;

    #[test]
    fn one_closed_path_per_ring() {
        let d = Shape::Cell24.derive(&TopologyCfg::default()).unwrap();
        let m = default_initial_orientation();
        let mut states = vec![false; d.ring_count()];
        states[3] = true;
        let f = build_frame(&d, &m, &states, 8);
        assert_eq!(f.vertices.len(), 24);
        assert_eq!(f.rings.len(), 16);
        for path in &f.rings {
            assert_eq!(path.points.len(), d.ring_len() * 8 + 1);
            let first = path.points[0];
            let last = path.points[path.points.len() - 1];
            assert!((first - last).norm() < 1e-9);
            let v0 = d.rings()[path.ring].vertices[0];
            assert!((first - f.vertices[v0]).norm() < 1e-12);
            assert!(path.points.iter().all(|p| p.iter().all(|c| c.is_finite())));
            assert_eq!(path.color, d.bundle_color(path.bundle));
        }
        let lit: Vec<usize> = f.lit_rings().map(|r| r.ring).collect();
        assert_eq!(lit, vec![3]);
    }

    #[test]
    fn arc_joints_hit_the_ring_vertices() {
        let d = Shape::Cell16.derive(&TopologyCfg::default()).unwrap();
        let m = Matrix4::identity();
        let f = build_frame(&d, &m, &[false; 6], 4);
        for path in &f.rings {
            let ring = &d.rings()[path.ring];
            for (k, &v) in ring.vertices.iter().enumerate() {
                assert!((path.points[k * 4] - f.vertices[v]).norm() < 1e-9);
            }
        }
    }

    #[test]
    #[should_panic(expected = "ring_states")]
    fn short_ring_states_panic() {
        let d = Shape::Cell16.derive(&TopologyCfg::default()).unwrap();
        build_frame(&d, &Matrix4::identity(), &[false; 5], 4);
    }
}
