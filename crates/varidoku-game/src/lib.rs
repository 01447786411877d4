//! Play-session state machine for varidoku puzzles.
//!
//! A [`PuzzleSession`] owns the mutable state of one play-through: the
//! current grid, the selection, remaining lives, the clock, and the
//! win/loss status. Geometry stays in `varidoku-core`; the session resolves
//! a [`Topology`](varidoku_core::Topology) once at construction and never
//! branches on the game type afterwards.
//!
//! The engine owns no scheduling primitive. Two callbacks are driven by the
//! host instead:
//!
//! - the clock: call [`PuzzleSession::tick`] once per elapsed wall-clock
//!   second; it counts only while the timer runs and the session is still
//!   playing;
//! - the wrong-cell flash: a wrong input returns a [`WrongCellClear`]
//!   token, to be handed back via [`PuzzleSession::clear_wrong_cell`] after
//!   [`WRONG_CELL_CLEAR_DELAY`]. Stale tokens (superseded, cancelled, or
//!   after a terminal transition) clear nothing, so late or repeated fires
//!   are harmless.

use std::time::Duration;

use derive_more::{Display, Error, From, IsVariant};
use varidoku_core::{CageError, Position, TopologyError};

pub use self::session::PuzzleSession;

mod session;

/// How long a wrong-cell marker stays visible before the host clears it.
pub const WRONG_CELL_CLEAR_DELAY: Duration = Duration::from_millis(600);

/// Lives a fresh session starts with.
pub const INITIAL_LIVES: u8 = 3;

/// Overall state of a play-through.
///
/// Transitions only move forward: `Playing → Won` and `Playing → Lost`,
/// both terminal. Every operation on a terminal session is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum GameStatus {
    /// The session accepts input.
    Playing,
    /// Every existing cell is filled; terminal.
    Won,
    /// All lives are spent; terminal.
    Lost,
}

/// Result of a [`PuzzleSession::input_digit`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Nothing happened: no selection, a non-editable or already-filled
    /// cell, or a terminal session. Never an error.
    Ignored,
    /// The digit matched the solution and was written.
    Placed {
        /// The cell that was filled; the selection is cleared.
        cell: Position,
        /// Whether this placement completed the board.
        solved: bool,
    },
    /// The digit did not match the solution.
    Wrong {
        /// The cell now marked wrong.
        cell: Position,
        /// Lives left after the miss.
        lives_remaining: u8,
        /// Whether the miss spent the last life.
        lost: bool,
        /// Token for the delayed marker clear; schedule
        /// [`PuzzleSession::clear_wrong_cell`] with it after
        /// [`WRONG_CELL_CLEAR_DELAY`].
        clear: WrongCellClear,
    },
}

/// One-shot token for the delayed wrong-cell clear.
///
/// Each wrong input issues a fresh token and invalidates all earlier ones,
/// giving reschedule semantics without the engine owning a timer: however a
/// host schedules the callback, only the newest token still clears, and
/// only while the session is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrongCellClear {
    pub(crate) epoch: u64,
}

/// Error constructing a [`PuzzleSession`].
///
/// Construction fails as a whole; no partial session exists afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From)]
pub enum SessionError {
    /// The game type has no topology for the puzzle's dimensions.
    #[display("{_0}")]
    Topology(TopologyError),
    /// The killer cage definitions are inconsistent.
    #[display("{_0}")]
    Cage(CageError),
}
