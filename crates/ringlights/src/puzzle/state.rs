//! Ring-toggle state machine.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::events::{ListenerId, Listeners};
use crate::topology::PolytopeDescriptor;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Free play after a reset; wins are not detected.
    Exploration,
    /// After a scramble; the first uniform ring state wins.
    Challenge,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WinKind {
    RingsOff,
    RingsOn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WinEvent {
    pub kind: WinKind,
    /// Move count including the winning click.
    pub moves: u32,
}

/// The observable game data handed to change listeners.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    ring_states: Vec<bool>,
    move_count: u32,
    mode: Mode,
    has_won: bool,
}

impl Board {
    fn cleared(rings: usize) -> Self {
        Self {
            ring_states: vec![false; rings],
            move_count: 0,
            mode: Mode::Exploration,
            has_won: false,
        }
    }

    pub fn ring_states(&self) -> &[bool] {
        &self.ring_states
    }
    pub fn move_count(&self) -> u32 {
        self.move_count
    }
    pub fn mode(&self) -> Mode {
        self.mode
    }
    pub fn has_won(&self) -> bool {
        self.has_won
    }
    pub fn lit_count(&self) -> usize {
        self.ring_states.iter().filter(|&&on| on).count()
    }
    pub fn all_off(&self) -> bool {
        self.ring_states.iter().all(|&on| !on)
    }
    pub fn all_on(&self) -> bool {
        self.ring_states.iter().all(|&on| on)
    }
    fn is_uniform(&self) -> bool {
        self.all_off() || self.all_on()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ScrambleCfg {
    /// Random draws before falling back to the deterministic scramble.
    pub max_attempts: u32,
}

impl Default for ScrambleCfg {
    fn default() -> Self {
        Self { max_attempts: 64 }
    }
}

/// How a scramble was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrambleReport {
    /// Random draws made (rejected ones included).
    pub attempts: u32,
    /// True when every draw was uniform and vertex 0 alone was toggled.
    pub fallback: bool,
}

/// Puzzle session state: the board, the incidence it toggles through, and
/// the change/win listeners.
pub struct PuzzleState {
    vertex_rings: Vec<Vec<usize>>,
    board: Board,
    cfg: ScrambleCfg,
    rng: StdRng,
    on_change: Listeners<Board>,
    on_win: Listeners<WinEvent>,
}

impl PuzzleState {
    /// Puzzle over `descriptor`'s rings with a seeded RNG.
    pub fn new(descriptor: &PolytopeDescriptor, cfg: ScrambleCfg, seed: u64) -> Self {
        Self::from_incidence(
            descriptor.incidence().to_vec(),
            descriptor.ring_count(),
            cfg,
            seed,
        )
    }

    /// Puzzle over an explicit vertex → rings incidence.
    ///
    /// Panics unless every vertex toggles a non-empty proper subset (no repeats) of
    /// `0..ring_count`.
    pub fn from_incidence(
        vertex_rings: Vec<Vec<usize>>,
        ring_count: usize,
        cfg: ScrambleCfg,
        seed: u64,
    ) -> Self {
        check_incidence(&vertex_rings, ring_count);
        Self {
            vertex_rings,
            board: Board::cleared(ring_count),
            cfg,
            rng: StdRng::seed_from_u64(seed),
            on_change: Listeners::new(),
            on_win: Listeners::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn ring_states(&self) -> &[bool] {
        self.board.ring_states()
    }
    pub fn move_count(&self) -> u32 {
        self.board.move_count
    }
    pub fn mode(&self) -> Mode {
        self.board.mode
    }
    pub fn has_won(&self) -> bool {
        self.board.has_won
    }
    pub fn vertex_count(&self) -> usize {
        self.vertex_rings.len()
    }

    pub fn subscribe_change(&mut self, f: impl FnMut(&Board) + 'static) -> ListenerId {
        self.on_change.subscribe(f)
    }
    pub fn unsubscribe_change(&mut self, id: ListenerId) -> bool {
        self.on_change.unsubscribe(id)
    }
    pub fn subscribe_win(&mut self, f: impl FnMut(&WinEvent) + 'static) -> ListenerId {
        self.on_win.subscribe(f)
    }
    pub fn unsubscribe_win(&mut self, id: ListenerId) -> bool {
        self.on_win.unsubscribe(id)
    }

    /// Toggle every ring through `v` and count the move.
    ///
    /// In Challenge mode before the first win, a uniform result wins: change
    /// listeners run first (already seeing `has_won`), then win listeners.
    /// Panics if `v` is out of range.
    pub fn click_vertex(&mut self, v: usize) {
        assert!(
            v < self.vertex_rings.len(),
            "vertex {v} out of range (puzzle has {} vertices)",
            self.vertex_rings.len()
        );
        self.toggle(v);
        self.board.move_count += 1;
        let win = if self.board.mode == Mode::Challenge && !self.board.has_won {
            self.evaluate_win()
        } else {
            None
        };
        self.on_change.emit(&self.board);
        if let Some(event) = win {
            tracing::debug!(kind = ?event.kind, moves = event.moves, "puzzle won");
            self.on_win.emit(&event);
        }
    }

    /// Random non-uniform start in Challenge mode; one change notification.
    pub fn scramble(&mut self) -> ScrambleReport {
        let mut attempts = 0;
        let mut accepted = false;
        while attempts < self.cfg.max_attempts {
            attempts += 1;
            self.clear();
            for v in 0..self.vertex_rings.len() {
                if self.rng.gen_bool(0.5) {
                    self.toggle(v);
                }
            }
            if !self.board.is_uniform() {
                accepted = true;
                break;
            }
            tracing::debug!(attempt = attempts, "rejected uniform scramble");
        }
        if !accepted {
            self.clear();
            self.toggle(0);
            tracing::debug!(attempts, "scramble fell back to a single toggle");
        }
        self.board.mode = Mode::Challenge;
        self.on_change.emit(&self.board);
        ScrambleReport {
            attempts,
            fallback: !accepted,
        }
    }

    /// All rings off, Exploration mode; notifies.
    pub fn reset(&mut self) {
        self.clear();
        self.on_change.emit(&self.board);
    }

    /// Switch to another polytope's incidence and reset. Listeners are kept.
    pub fn rebind(&mut self, descriptor: &PolytopeDescriptor) {
        check_incidence(descriptor.incidence(), descriptor.ring_count());
        self.vertex_rings = descriptor.incidence().to_vec();
        self.board = Board::cleared(descriptor.ring_count());
        self.on_change.emit(&self.board);
    }

    fn clear(&mut self) {
        self.board = Board::cleared(self.board.ring_states.len());
    }

    fn toggle(&mut self, v: usize) {
        for &r in &self.vertex_rings[v] {
            self.board.ring_states[r] = !self.board.ring_states[r];
        }
    }

    fn evaluate_win(&mut self) -> Option<WinEvent> {
        let kind = if self.board.all_off() {
            WinKind::RingsOff
        } else if self.board.all_on() {
            WinKind::RingsOn
        } else {
            return None;
        };
        self.board.has_won = true;
        Some(WinEvent {
            kind,
            moves: self.board.move_count,
        })
    }
}

fn check_incidence(vertex_rings: &[Vec<usize>], ring_count: usize) {
    assert!(!vertex_rings.is_empty(), "puzzle needs at least one vertex");
    for (v, rings) in vertex_rings.iter().enumerate() {
        assert!(!rings.is_empty(), "vertex {v} toggles no ring");
        assert!(
            rings.iter().all(|&r| r < ring_count),
            "vertex {v} names a ring outside 0..{ring_count}"
        );
        let distinct: BTreeSet<usize> = rings.iter().copied().collect();
        assert!(
            distinct.len() == rings.len(),
            "vertex {v} repeats a ring; a double toggle cancels out"
        );
        assert!(
            distinct.len() < ring_count,
            "vertex {v} toggles every ring; scrambles could not avoid uniform states"
        );
    }
}
