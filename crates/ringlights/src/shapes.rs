//! The three shipped polytopes and their known combinatorics.

use std::fmt;
use std::str::FromStr;

use crate::geom4::{cell16_vertices, cell24_vertices, cell600_vertices};
use crate::topology::{
    derive, BundleStrategy, Combinatorics, DerivationError, PolytopeDef, PolytopeDescriptor,
    TopologyCfg,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Cell16,
    Cell24,
    Cell600,
}

impl Shape {
    pub const ALL: [Shape; 3] = [Shape::Cell16, Shape::Cell24, Shape::Cell600];

    pub fn name(self) -> &'static str {
        match self {
            Shape::Cell16 => "16-cell",
            Shape::Cell24 => "24-cell",
            Shape::Cell600 => "600-cell",
        }
    }

    pub fn combinatorics(self) -> Combinatorics {
        match self {
            Shape::Cell16 => Combinatorics {
                edges: 24,
                rings: 6,
                ring_len: 4,
                bundles: 6,
            },
            Shape::Cell24 => Combinatorics {
                edges: 96,
                rings: 16,
                ring_len: 6,
                bundles: 4,
            },
            Shape::Cell600 => Combinatorics {
                edges: 720,
                rings: 72,
                ring_len: 10,
                bundles: 6,
            },
        }
    }

    /// The 16-cell's Hopf classes would give only 3 colors; one bundle per
    /// ring shows 6.
    pub fn bundle_strategy(self) -> BundleStrategy {
        match self {
            Shape::Cell16 => BundleStrategy::Singleton,
            Shape::Cell24 | Shape::Cell600 => BundleStrategy::HopfQuotient,
        }
    }

    pub fn definition(self) -> PolytopeDef {
        let vertices = match self {
            Shape::Cell16 => cell16_vertices(),
            Shape::Cell24 => cell24_vertices(),
            Shape::Cell600 => cell600_vertices(),
        };
        PolytopeDef {
            name: self.name().to_string(),
            vertices,
            expected: self.combinatorics(),
            bundles: self.bundle_strategy(),
        }
    }

    pub fn derive(self, cfg: &TopologyCfg) -> Result<PolytopeDescriptor, DerivationError> {
        derive(&self.definition(), cfg)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownShape(pub String);

impl fmt::Display for UnknownShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown polytope '{}' (expected 16-cell, 24-cell or 600-cell)",
            self.0
        )
    }
}

impl std::error::Error for UnknownShape {}

impl FromStr for Shape {
    type Err = UnknownShape;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "16-cell" | "16cell" | "16" => Ok(Shape::Cell16),
            "24-cell" | "24cell" | "24" => Ok(Shape::Cell24),
            "600-cell" | "600cell" | "600" => Ok(Shape::Cell600),
            _ => Err(UnknownShape(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for shape in Shape::ALL {
            assert_eq!(shape.name().parse::<Shape>(), Ok(shape));
        }
        assert_eq!("600".parse::<Shape>(), Ok(Shape::Cell600));
        assert!("tesseract".parse::<Shape>().is_err());
    }

    #[test]
    fn expected_counts_are_consistent() {
        for shape in Shape::ALL {
            let c = shape.combinatorics();
            let n = shape.definition().vertices.len();
            // Every edge lies on exactly one ring.
            assert_eq!(c.rings * c.ring_len, c.edges);
            // Bundles tile the vertex set.
            if shape.bundle_strategy() != BundleStrategy::Singleton {
                assert_eq!(c.rings / c.bundles * c.ring_len, n);
            }
        }
    }
}
