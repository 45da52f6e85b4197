//! Data types for polytope topology: rings, descriptors, derivation inputs,
//! and the derivation error.

use std::fmt;

use nalgebra::Vector4;

use crate::geom4::cfg::{MATCH_EPS, QUAT_DECIMALS, UNIT_EPS};

/// Derivation tolerances.
#[derive(Clone, Copy, Debug)]
pub struct TopologyCfg {
    /// `|a·b − threshold|` below which a pair is an edge.
    pub edge_eps: f64,
    /// Distance below which a reflected point matches a vertex.
    pub match_eps: f64,
    /// `|‖v‖ − 1|` allowed on input vertices.
    pub unit_eps: f64,
    /// Decimal places kept when canonicalizing quaternion quotients.
    pub quat_decimals: u32,
}

impl Default for TopologyCfg {
    fn default() -> Self {
        Self {
            edge_eps: MATCH_EPS,
            match_eps: MATCH_EPS,
            unit_eps: UNIT_EPS,
            quat_decimals: QUAT_DECIMALS,
        }
    }
}

/// Known counts a derivation must reproduce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Combinatorics {
    pub edges: usize,
    pub rings: usize,
    pub ring_len: usize,
    pub bundles: usize,
}

/// How rings are grouped into color bundles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BundleStrategy {
    /// Every ring is its own bundle.
    Singleton,
    /// Group by the Hopf class of the first-edge quaternion quotient.
    HopfQuotient,
    /// Backtracking partition into vertex-disjoint covers.
    DisjointCover,
}

/// Raw input to `derive`.
#[derive(Clone, Debug)]
pub struct PolytopeDef {
    pub name: String,
    pub vertices: Vec<Vector4<f64>>,
    pub expected: Combinatorics,
    pub bundles: BundleStrategy,
}

/// A closed great-circle cycle of vertex indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ring {
    pub vertices: Vec<usize>,
    pub bundle: usize,
}

impl Ring {
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains(&self, v: usize) -> bool {
        self.vertices.contains(&v)
    }

    /// Consecutive vertex pairs, including the wraparound edge.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

/// 24-bit display color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: (hex >> 16) as u8,
            g: (hex >> 8) as u8,
            b: hex as u8,
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Bundle colors, assigned by bundle index.
pub const PALETTE: [Rgb; 12] = [
    Rgb::from_hex(0xff3366),
    Rgb::from_hex(0x33ff66),
    Rgb::from_hex(0x3366ff),
    Rgb::from_hex(0xffcc00),
    Rgb::from_hex(0xff6633),
    Rgb::from_hex(0xcc33ff),
    Rgb::from_hex(0x33ccff),
    Rgb::from_hex(0xff33cc),
    Rgb::from_hex(0x66ff33),
    Rgb::from_hex(0xff9933),
    Rgb::from_hex(0x9933ff),
    Rgb::from_hex(0x33ffcc),
];

/// Static result of a derivation. Never mutated after `derive` returns.
#[derive(Clone, Debug)]
pub struct PolytopeDescriptor {
    pub(crate) name: String,
    pub(crate) vertices: Vec<Vector4<f64>>,
    pub(crate) rings: Vec<Ring>,
    pub(crate) bundle_colors: Vec<Rgb>,
    pub(crate) vertex_rings: Vec<Vec<usize>>,
    pub(crate) edge_threshold: f64,
}

impl PolytopeDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn vertices(&self) -> &[Vector4<f64>] {
        &self.vertices
    }
    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }
    pub fn bundle_colors(&self) -> &[Rgb] {
        &self.bundle_colors
    }
    /// Inner product shared by every edge.
    pub fn edge_threshold(&self) -> f64 {
        self.edge_threshold
    }
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }
    pub fn bundle_count(&self) -> usize {
        self.bundle_colors.len()
    }
    pub fn ring_len(&self) -> usize {
        self.rings.first().map_or(0, Ring::len)
    }
    /// Rings through each vertex; the same for every vertex.
    pub fn rings_per_vertex(&self) -> usize {
        self.vertex_rings.first().map_or(0, Vec::len)
    }
    /// Indices of the rings that contain vertex `v`.
    pub fn vertex_rings(&self, v: usize) -> &[usize] {
        &self.vertex_rings[v]
    }
    pub fn incidence(&self) -> &[Vec<usize>] {
        &self.vertex_rings
    }
    pub fn bundle_color(&self, bundle: usize) -> Rgb {
        self.bundle_colors[bundle]
    }
    /// Ring indices in bundle `b`, ascending.
    pub fn bundle_rings(&self, b: usize) -> Vec<usize> {
        (0..self.rings.len())
            .filter(|&i| self.rings[i].bundle == b)
            .collect()
    }
    /// All edges as `(lo, hi)` pairs, recovered from ring membership.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut out: Vec<(usize, usize)> = self
            .rings
            .iter()
            .flat_map(|r| r.edges().map(|(a, b)| (a.min(b), a.max(b))))
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }
}

/// Reasons a vertex set cannot be turned into a consistent ring topology.
#[derive(Debug, Clone, PartialEq)]
pub enum DerivationError {
    /// Fewer than two vertices.
    TooFewVertices { count: usize },
    /// A vertex is not on the unit 3-sphere.
    NotOnSphere { vertex: usize, norm: f64 },
    /// The nearest neighbour of vertex 0 coincides with it.
    DuplicateVertex { threshold: f64 },
    /// No pair matches the edge threshold.
    NoEdges,
    EdgeCount { expected: usize, found: usize },
    /// A reflection step landed on no vertex.
    UnmatchedReflection { from: (usize, usize) },
    /// A reflection step matched several vertices.
    AmbiguousReflection { from: (usize, usize), matches: usize },
    /// A reflection step produced a non-edge.
    NotAnEdge { edge: (usize, usize) },
    /// A traced edge was already consumed by an earlier ring.
    EdgeReused { edge: (usize, usize) },
    /// A trace ran past the vertex count without closing.
    OpenRing { start: (usize, usize) },
    RingCount { expected: usize, found: usize },
    RingLength { ring: usize, expected: usize, found: usize },
    BundleCount { expected: usize, found: usize },
    UnequalBundles { sizes: Vec<usize> },
    OverlappingBundle { bundle: usize },
    /// Disjoint-cover search found no partition.
    NoPartition,
    /// Disjoint-cover bitsets hold at most 128 vertices.
    TooManyVertices { count: usize },
    /// Vertices lie on different numbers of rings.
    IrregularIncidence { vertex: usize, expected: usize, found: usize },
    PaletteExhausted { bundles: usize },
}

impl fmt::Display for DerivationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewVertices { count } => write!(f, "need at least 2 vertices, got {count}"),
            Self::NotOnSphere { vertex, norm } => {
                write!(f, "vertex {vertex} has norm {norm}, expected 1")
            }
            Self::DuplicateVertex { threshold } => write!(
                f,
                "nearest-neighbour inner product {threshold} means duplicate vertices"
            ),
            Self::NoEdges => write!(f, "no vertex pair matches the edge threshold"),
            Self::EdgeCount { expected, found } => {
                write!(f, "expected {expected} edges, found {found}")
            }
            Self::UnmatchedReflection { from } => {
                write!(f, "reflection along edge {from:?} matches no vertex")
            }
            Self::AmbiguousReflection { from, matches } => write!(
                f,
                "reflection along edge {from:?} matches {matches} vertices"
            ),
            Self::NotAnEdge { edge } => write!(f, "traced pair {edge:?} is not an edge"),
            Self::EdgeReused { edge } => write!(f, "edge {edge:?} lies on two rings"),
            Self::OpenRing { start } => write!(f, "ring starting at {start:?} never closes"),
            Self::RingCount { expected, found } => {
                write!(f, "expected {expected} rings, found {found}")
            }
            Self::RingLength {
                ring,
                expected,
                found,
            } => write!(f, "ring {ring} has {found} vertices, expected {expected}"),
            Self::BundleCount { expected, found } => {
                write!(f, "expected {expected} bundles, found {found}")
            }
            Self::UnequalBundles { sizes } => write!(f, "unequal bundle sizes {sizes:?}"),
            Self::OverlappingBundle { bundle } => {
                write!(f, "bundle {bundle} has rings sharing a vertex")
            }
            Self::NoPartition => write!(f, "no partition into vertex-disjoint bundles"),
            Self::TooManyVertices { count } => {
                write!(f, "disjoint-cover search supports 128 vertices, got {count}")
            }
            Self::IrregularIncidence {
                vertex,
                expected,
                found,
            } => write!(
                f,
                "vertex {vertex} lies on {found} rings, expected {expected}"
            ),
            Self::PaletteExhausted { bundles } => write!(
                f,
                "{bundles} bundles exceed the {}-color palette",
                PALETTE.len()
            ),
        }
    }
}

impl std::error::Error for DerivationError {}
