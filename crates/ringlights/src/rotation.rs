//! Accumulated 4D orientation steered by (view direction, scalar delta) input.
//!
//! Purpose
//! - Own the single orientation matrix the renderer projects with, and turn a
//!   scroll/pinch delta seen from the current camera direction into a 4D
//!   rotation that mixes the spatial axes with the hidden `w` axis.
//!
//! Model
//! - The view direction's components weight the three planes xw, yw, zw.
//!   Each active plane rotates by `delta · speed · weight`.
//! - The planes do not commute, so the increment is the palindrome
//!   `X(a/2)·Y(b/2)·Z(c)·Y(b/2)·X(a/2)`: x, then y, then z in leading order,
//!   and negating `delta` yields the exact inverse.
//! - This deliberately departs from applying the planes strictly one after
//!   another (`Z(c)·Y(b)·X(a)`). That product is not undone by negating
//!   `delta`: at large deltas the residual is visible. The palindrome agrees
//!   with it to first order in the angles and keeps scroll reversal exact.
//! - The orientation is replaced (never edited in place) and periodically
//!   re-orthonormalized; listeners receive a snapshot.

use nalgebra::{Matrix4, Vector3};

use crate::events::{ListenerId, Listeners};
use crate::geom4::cfg::ORTHO_EPS;
use crate::geom4::{compose, orthogonality_error, reorthonormalize, rotation_plane, Axis};

/// Where `reset` returns to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetTarget {
    /// The configured symmetry-breaking start orientation.
    Initial,
    /// The identity; on shapes with a vertex at `±e_w` it lands on the view
    /// center and on the projection pole.
    Identity,
}

#[derive(Clone, Copy, Debug)]
pub struct ControllerCfg {
    /// Radians per unit of delta at full weight.
    pub speed: f64,
    /// Weights with `|w| <= weight_eps` leave their plane untouched.
    pub weight_eps: f64,
    pub initial: Matrix4<f64>,
    pub reset_to: ResetTarget,
    /// Re-orthonormalize after this many steps (0 disables).
    pub renorm_every: u32,
}

impl Default for ControllerCfg {
    fn default() -> Self {
        Self {
            speed: 0.002,
            weight_eps: 1e-6,
            initial: default_initial_orientation(),
            reset_to: ResetTarget::Initial,
            renorm_every: 32,
        }
    }
}

/// xw by 0.31, then yw by 0.17, then zw by 0.23 radians.
///
/// Keeps every vertex of the shipped shapes off the view center `±e_w`.
pub fn default_initial_orientation() -> Matrix4<f64> {
    let x = rotation_plane(Axis::X, Axis::W, 0.31);
    let y = rotation_plane(Axis::Y, Axis::W, 0.17);
    let z = rotation_plane(Axis::Z, Axis::W, 0.23);
    compose(&z, &compose(&y, &x))
}

/// Owner of the accumulated orientation.
pub struct RotationController {
    cfg: ControllerCfg,
    orientation: Matrix4<f64>,
    steps_since_renorm: u32,
    listeners: Listeners<Matrix4<f64>>,
}

impl RotationController {
    /// Panics if `cfg.initial` is not a rotation.
    pub fn new(cfg: ControllerCfg) -> Self {
        assert_rotation(&cfg.initial);
        Self {
            orientation: cfg.initial,
            cfg,
            steps_since_renorm: 0,
            listeners: Listeners::new(),
        }
    }

    pub fn cfg(&self) -> &ControllerCfg {
        &self.cfg
    }

    /// Snapshot of the current orientation.
    pub fn orientation(&self) -> Matrix4<f64> {
        self.orientation
    }

    pub fn subscribe(&mut self, f: impl FnMut(&Matrix4<f64>) + 'static) -> ListenerId {
        self.listeners.subscribe(f)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Incremental rotation for `delta` seen along `view_dir`, without applying it.
    pub fn increment(&self, view_dir: Vector3<f64>, delta: f64) -> Option<Matrix4<f64>> {
        let angles: Vec<(Axis, f64)> = Axis::SPATIAL
            .iter()
            .zip(view_dir.iter())
            .filter(|(_, w)| w.abs() > self.cfg.weight_eps)
            .map(|(&axis, &w)| (axis, delta * self.cfg.speed * w))
            .filter(|&(_, angle)| angle != 0.0)
            .collect();
        let (&(last_axis, last_angle), outer) = angles.split_last()?;
        let mut inc = rotation_plane(last_axis, Axis::W, last_angle);
        for &(axis, angle) in outer.iter().rev() {
            let half = rotation_plane(axis, Axis::W, angle / 2.0);
            inc = compose(&half, &compose(&inc, &half));
        }
        Some(inc)
    }

    /// Left-multiply the increment for (`view_dir`, `delta`) and notify.
    ///
    /// No-op (and no notification) when every plane is inactive.
    pub fn rotate(&mut self, view_dir: Vector3<f64>, delta: f64) {
        let Some(inc) = self.increment(view_dir, delta) else {
            return;
        };
        let mut next = compose(&inc, &self.orientation);
        self.steps_since_renorm += 1;
        if self.cfg.renorm_every > 0 && self.steps_since_renorm >= self.cfg.renorm_every {
            next = reorthonormalize(&next);
            self.steps_since_renorm = 0;
        }
        self.replace(next);
    }

    /// Restore the configured reset target and notify.
    pub fn reset(&mut self) {
        let target = match self.cfg.reset_to {
            ResetTarget::Initial => self.cfg.initial,
            ResetTarget::Identity => Matrix4::identity(),
        };
        self.steps_since_renorm = 0;
        self.replace(target);
    }

    /// Replace the orientation wholesale. Panics unless `m` is a rotation.
    pub fn set_orientation(&mut self, m: Matrix4<f64>) {
        assert_rotation(&m);
        self.steps_since_renorm = 0;
        self.replace(m);
    }

    fn replace(&mut self, m: Matrix4<f64>) {
        self.orientation = m;
        self.listeners.emit(&self.orientation);
    }
}

impl Default for RotationController {
    fn default() -> Self {
        Self::new(ControllerCfg::default())
    }
}

fn assert_rotation(m: &Matrix4<f64>) {
    let err = orthogonality_error(m);
    assert!(
        err <= ORTHO_EPS,
        "orientation is not orthogonal (max |MᵀM − I| = {err})"
    );
    assert!(m.determinant() > 0.0, "orientation must not reflect");
}
