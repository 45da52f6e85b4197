//! Polytope topology: edges, great-circle rings, and color bundles derived
//! from raw vertex coordinates on the unit 3-sphere.
//!
//! Purpose
//! - Turn a vertex list into the static `PolytopeDescriptor` every other
//!   component reads: rings (the puzzle's toggle units) with bundle tags, the
//!   bundle palette, and the vertex→ring incidence.
//!
//! Why this design
//! - Derivation is all-or-nothing. Every stage validates against the known
//!   `Combinatorics` of the input, and any mismatch is a `DerivationError`;
//!   a shape that fails is not offered rather than rendered half-consistent.
//! - Ordered sets and first-appearance numbering keep ring and bundle indices
//!   stable across runs for the same vertex order.
//!
//! Split
//! - `types.rs` (descriptor, config, errors), `build.rs` (edges and ring
//!   tracing), `bundles.rs` (Hopf quotient and disjoint-cover grouping).

mod build;
mod bundles;
mod types;

pub use types::{
    BundleStrategy, Combinatorics, DerivationError, PolytopeDef, PolytopeDescriptor, Rgb, Ring,
    TopologyCfg, PALETTE,
};

use build::{check_vertices, find_edges, trace_rings};
use bundles::{disjoint_cover_bundles, hopf_bundles, singleton_bundles, validate_bundles};

/// Derive edges, rings, bundles and incidence for `def`.
pub fn derive(def: &PolytopeDef, cfg: &TopologyCfg) -> Result<PolytopeDescriptor, DerivationError> {
    let verts = &def.vertices;
    let expected = def.expected;
    check_vertices(verts, cfg)?;

    let (edges, threshold) = find_edges(verts, cfg)?;
    if edges.len() != expected.edges {
        return Err(DerivationError::EdgeCount {
            expected: expected.edges,
            found: edges.len(),
        });
    }

    let traced = trace_rings(verts, &edges, cfg)?;
    if traced.len() != expected.rings {
        return Err(DerivationError::RingCount {
            expected: expected.rings,
            found: traced.len(),
        });
    }
    if let Some((ring, r)) = traced
        .iter()
        .enumerate()
        .find(|(_, r)| r.len() != expected.ring_len)
    {
        return Err(DerivationError::RingLength {
            ring,
            expected: expected.ring_len,
            found: r.len(),
        });
    }

    let tags = match def.bundles {
        BundleStrategy::Singleton => singleton_bundles(&traced),
        BundleStrategy::HopfQuotient => hopf_bundles(verts, &traced, cfg),
        BundleStrategy::DisjointCover => disjoint_cover_bundles(verts.len(), &traced)?,
    };
    let rings: Vec<Ring> = traced
        .into_iter()
        .zip(tags)
        .map(|(vertices, bundle)| Ring { vertices, bundle })
        .collect();
    let bundle_count = validate_bundles(&rings, verts.len(), expected.bundles)?;
    if bundle_count > PALETTE.len() {
        return Err(DerivationError::PaletteExhausted {
            bundles: bundle_count,
        });
    }

    let vertex_rings = incidence(verts.len(), &rings)?;

    tracing::debug!(
        name = %def.name,
        edges = edges.len(),
        rings = rings.len(),
        bundles = bundle_count,
        threshold,
        "derived polytope topology"
    );

    Ok(PolytopeDescriptor {
        name: def.name.clone(),
        vertices: verts.clone(),
        rings,
        bundle_colors: PALETTE[..bundle_count].to_vec(),
        vertex_rings,
        edge_threshold: threshold,
    })
}

/// Vertex → ring indices; every vertex must lie on the same number of rings.
fn incidence(vertex_count: usize, rings: &[Ring]) -> Result<Vec<Vec<usize>>, DerivationError> {
    let mut map = vec![Vec::new(); vertex_count];
    for (i, r) in rings.iter().enumerate() {
        for &v in &r.vertices {
            map[v].push(i);
        }
    }
    let expected = map[0].len();
    if let Some((vertex, found)) = map
        .iter()
        .map(Vec::len)
        .enumerate()
        .find(|&(_, n)| n != expected || n == 0)
    {
        return Err(DerivationError::IrregularIncidence {
            vertex,
            expected,
            found,
        });
    }
    Ok(map)
}
