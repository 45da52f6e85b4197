//! One running puzzle: the derived shape, the view, the board, and a dirty
//! flag that turns any number of changes into a single rebuilt frame.

use nalgebra::{Matrix4, Vector3};

use crate::events::{DirtyFlag, ListenerId};
use crate::frame::{build_frame, Frame};
use crate::puzzle::{Board, PuzzleState, ScrambleCfg, ScrambleReport, WinEvent};
use crate::rotation::{ControllerCfg, RotationController};
use crate::shapes::Shape;
use crate::topology::{DerivationError, PolytopeDescriptor, TopologyCfg};

#[derive(Clone, Copy, Debug)]
pub struct SessionCfg {
    pub topology: TopologyCfg,
    pub controller: ControllerCfg,
    pub scramble: ScrambleCfg,
    /// Samples per ring edge in frames.
    pub arc_segments: usize,
    pub seed: u64,
}

impl Default for SessionCfg {
    fn default() -> Self {
        Self {
            topology: TopologyCfg::default(),
            controller: ControllerCfg::default(),
            scramble: ScrambleCfg::default(),
            arc_segments: 16,
            seed: 0,
        }
    }
}

pub struct Session {
    cfg: SessionCfg,
    shape: Shape,
    descriptor: PolytopeDescriptor,
    controller: RotationController,
    puzzle: PuzzleState,
    dirty: DirtyFlag,
}

impl Session {
    /// Derive `shape` and start in Exploration with the initial orientation.
    pub fn new(shape: Shape, cfg: SessionCfg) -> Result<Self, DerivationError> {
        let descriptor = shape.derive(&cfg.topology)?;
        let dirty = DirtyFlag::new();
        let mut controller = RotationController::new(cfg.controller);
        let mut puzzle = PuzzleState::new(&descriptor, cfg.scramble, cfg.seed);
        {
            let d = dirty.clone();
            controller.subscribe(move |_| d.mark());
        }
        {
            let d = dirty.clone();
            puzzle.subscribe_change(move |_| d.mark());
        }
        dirty.mark();
        tracing::info!(
            shape = shape.name(),
            rings = descriptor.ring_count(),
            bundles = descriptor.bundle_count(),
            "session started"
        );
        Ok(Self {
            cfg,
            shape,
            descriptor,
            controller,
            puzzle,
            dirty,
        })
    }

    pub fn cfg(&self) -> &SessionCfg {
        &self.cfg
    }
    pub fn shape(&self) -> Shape {
        self.shape
    }
    pub fn descriptor(&self) -> &PolytopeDescriptor {
        &self.descriptor
    }
    pub fn orientation(&self) -> Matrix4<f64> {
        self.controller.orientation()
    }
    pub fn board(&self) -> &Board {
        self.puzzle.board()
    }
    pub fn puzzle(&self) -> &PuzzleState {
        &self.puzzle
    }

    /// Switch shapes. On failure the current shape stays active. The
    /// orientation is kept; the board is reset.
    pub fn select(&mut self, shape: Shape) -> Result<(), DerivationError> {
        let descriptor = match shape.derive(&self.cfg.topology) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(shape = shape.name(), error = %e, "shape unavailable");
                return Err(e);
            }
        };
        self.puzzle.rebind(&descriptor);
        self.descriptor = descriptor;
        self.shape = shape;
        tracing::info!(shape = shape.name(), "shape selected");
        Ok(())
    }

    pub fn rotate(&mut self, view_dir: Vector3<f64>, delta: f64) {
        self.controller.rotate(view_dir, delta);
    }
    pub fn reset_view(&mut self) {
        self.controller.reset();
    }
    pub fn click_vertex(&mut self, v: usize) {
        self.puzzle.click_vertex(v);
    }
    pub fn scramble(&mut self) -> ScrambleReport {
        self.puzzle.scramble()
    }
    pub fn reset(&mut self) {
        self.puzzle.reset();
    }

    pub fn subscribe_win(&mut self, f: impl FnMut(&WinEvent) + 'static) -> ListenerId {
        self.puzzle.subscribe_win(f)
    }
    pub fn unsubscribe_win(&mut self, id: ListenerId) -> bool {
        self.puzzle.unsubscribe_win(id)
    }

    /// The current frame, unconditionally.
    pub fn frame(&self) -> Frame {
        build_frame(
            &self.descriptor,
            &self.controller.orientation(),
            self.puzzle.ring_states(),
            self.cfg.arc_segments,
        )
    }

    /// A new frame if anything changed since the last call.
    pub fn next_frame(&mut self) -> Option<Frame> {
        self.dirty.take().then(|| self.frame())
    }
}
