//! Tolerance defaults for 4D geometry (internal).
//!
//! Policy
//! - Numerical guards for the pure transforms are fixed constants; callers
//!   never tune them. Derivation tolerances that depend on the input data live
//!   in `topology::TopologyCfg` instead, with these values as defaults.

/// Below this value of `1 + w` a point counts as sitting on the projection pole.
pub const PROJ_EPS: f64 = 1e-6;
/// Largest radial distance `project` ever returns.
pub const PROJ_CLAMP: f64 = 1e3;
/// `sin θ` below which a great-circle arc collapses to its two endpoints.
pub(crate) const ARC_EPS: f64 = 1e-9;
/// Max-abs tolerance for `MᵀM ≈ I` on orientation matrices.
pub const ORTHO_EPS: f64 = 1e-6;

/// Default absolute tolerance for matching inner products and vertex positions.
pub(crate) const MATCH_EPS: f64 = 1e-4;
/// Default tolerance for `‖v‖ ≈ 1` on input vertices.
pub(crate) const UNIT_EPS: f64 = 1e-6;
/// Decimal places kept when canonicalizing quaternion quotients.
pub(crate) const QUAT_DECIMALS: u32 = 6;
