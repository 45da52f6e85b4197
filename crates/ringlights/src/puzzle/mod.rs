//! Lights-out style puzzle over a polytope's rings.
//!
//! Purpose
//! - Track which rings are lit, count moves, and detect the win once per
//!   scrambled challenge.
//!
//! Rules
//! - Clicking vertex `v` flips every ring through `v`. Flips commute and
//!   clicking twice restores the board, so a scramble is just a random subset
//!   of clicks and is always solvable.
//! - `scramble` enters Challenge mode; the first click that leaves all rings
//!   off (or all on) wins. `reset` returns to Exploration, where nothing wins.
//!
//! Notifications
//! - Change listeners receive the `Board` after every click, scramble, reset
//!   and rebind. Win listeners fire at most once per scramble, right after the
//!   change notification of the winning click.

mod state;

pub use state::{Board, Mode, PuzzleState, ScrambleCfg, ScrambleReport, WinEvent, WinKind};

#[cfg(test)]
mod tests;
