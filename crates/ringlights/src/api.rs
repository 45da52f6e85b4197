//! Curated internal API (UNSTABLE).
//!
//! Important
//! - Not a public API. A convenience surface for the CLI, benches and demos;
//!   breaking changes are allowed.

// Topology
pub use crate::shapes::{Shape, UnknownShape};
pub use crate::topology::{
    derive, BundleStrategy, Combinatorics, DerivationError, PolytopeDef, PolytopeDescriptor, Rgb,
    Ring, TopologyCfg, PALETTE,
};
// 4D transforms
pub use crate::geom4::{
    apply, cell16_vertices, cell24_vertices, cell600_vertices, compose, great_circle_arc,
    orthogonality_error, project, reorthonormalize, rotation_plane, Axis,
};
// Stateful components
pub use crate::events::{DirtyFlag, ListenerId, Listeners};
pub use crate::puzzle::{Board, Mode, PuzzleState, ScrambleCfg, ScrambleReport, WinEvent, WinKind};
pub use crate::rotation::{default_initial_orientation, ControllerCfg, ResetTarget, RotationController};
// Rendering
pub use crate::frame::{build_frame, Frame, RingPath};
pub use crate::session::{Session, SessionCfg};
