//! Core of the ring-lights puzzle: 4D polytope topology, rotation, and game
//! state.
//!
//! Layout
//! - `geom4`: S³ vertex sets and the 4D transform kernel (plane rotations,
//!   stereographic projection, great-circle arcs).
//! - `topology`: edges, great-circle rings and color bundles derived from
//!   vertex coordinates.
//! - `rotation`, `puzzle`: the two stateful components, each notifying
//!   listeners through `events`.
//! - `frame`, `session`: renderer-facing snapshot and the owner tying the
//!   pieces together.
//!
//! API Policy
//! - Internal to this workspace. There is no stable public API; `api` is the
//!   curated surface the CLI imports from.

pub mod api;
pub mod events;
pub mod frame;
pub mod geom4;
pub mod puzzle;
pub mod rotation;
pub mod session;
pub mod shapes;
pub mod topology;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::{Matrix4 as Mat4, Vector3 as Vec3, Vector4 as Vec4};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::puzzle::{Mode, PuzzleState, WinEvent, WinKind};
    pub use crate::rotation::RotationController;
    pub use crate::session::{Session, SessionCfg};
    pub use crate::shapes::Shape;
    pub use crate::topology::{PolytopeDescriptor, TopologyCfg};
    pub use nalgebra::{Matrix4 as Mat4, Vector3 as Vec3, Vector4 as Vec4};
}
