//! 4D geometry on the unit 3-sphere: rotations, projection, and the shipped
//! polytope vertex sets.
//!
//! Purpose
//! - Stateless linear algebra for everything that turns a vertex in R⁴ into a
//!   point the renderer can draw: coordinate-plane rotations, composition,
//!   stereographic projection, great-circle arcs.
//! - Vertex generators for the three regular polytopes the puzzle ships.
//!
//! Assumptions and conventions
//! - Points are `nalgebra::Vector4<f64>` in `(x, y, z, w)` order; `w` is the
//!   projected-away axis.
//! - Rotations are `Matrix4<f64>` acting on column vectors.
//! - Tolerances are fixed constants in `cfg`; nothing here returns errors.
//!   Degenerate inputs (pole, zero-length arcs) degrade to finite fallbacks.

pub mod cfg;
pub mod special;
pub mod transform;
pub(crate) mod util;

pub use special::{cell16_vertices, cell24_vertices, cell600_vertices};
pub use transform::{
    apply, compose, great_circle_arc, orthogonality_error, project, reorthonormalize,
    rotation_plane, Axis,
};

#[cfg(test)]
mod tests_special;
