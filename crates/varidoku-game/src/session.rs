use log::debug;
use varidoku_core::{
    CageIndex, GameType, Grid, Position, Puzzle, Topology, max_visible_cage_size,
};

use crate::{GameStatus, INITIAL_LIVES, InputOutcome, SessionError, WrongCellClear};

/// A single play-through of one puzzle.
///
/// The session owns every piece of mutable play state and is mutated only
/// through its own operations; quitting, retrying, or advancing to the next
/// puzzle discards it and builds a fresh one. Gameplay guards are silent:
/// an operation that does not apply (terminal status, nonexistent cell,
/// non-editable cell) simply does nothing.
///
/// # Example
///
/// ```
/// use varidoku_core::{GameType, Grid, Puzzle};
/// use varidoku_game::{InputOutcome, PuzzleSession};
///
/// // A toy 9×9 "solution" of all 1s, played from an all-blank start.
/// let solution = Grid::new(9, 9, 1_u8);
/// let puzzle = Puzzle::new(solution, Some(Grid::new(9, 9, 0)), None, Vec::new()).unwrap();
/// let mut session = PuzzleSession::new(puzzle, GameType::Classic, "Medium").unwrap();
///
/// session.select_cell(varidoku_core::Position::new(0, 0));
/// assert!(matches!(session.input_digit(1), InputOutcome::Placed { .. }));
/// ```
#[derive(Debug, Clone)]
pub struct PuzzleSession {
    topology: Topology,
    cage_index: Option<CageIndex>,
    puzzle: Puzzle,
    grid: Grid<u8>,
    prefilled: Grid<bool>,
    selection: Option<Position>,
    lives_remaining: u8,
    status: GameStatus,
    wrong_cell: Option<Position>,
    wrong_cell_epoch: u64,
    elapsed_seconds: u32,
    timer_running: bool,
}

impl PuzzleSession {
    /// Creates a session for one play-through.
    ///
    /// Resolves the board topology, builds the cage index when the puzzle
    /// ships cages (the difficulty label only feeds the cage visibility
    /// cutoff), and derives the non-editable cell map: a cell is prefilled
    /// when it does not exist or carries a given value.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] when the game type has no topology for
    /// the puzzle's dimensions or the cage definitions are inconsistent.
    pub fn new(
        puzzle: Puzzle,
        game_type: GameType,
        difficulty_name: &str,
    ) -> Result<Self, SessionError> {
        let topology =
            Topology::resolve(game_type, puzzle.rows(), puzzle.cols(), puzzle.regions())?;
        let cage_index = if puzzle.cages().is_empty() {
            None
        } else {
            Some(CageIndex::build(
                puzzle.cages().to_vec(),
                puzzle.rows(),
                puzzle.cols(),
                max_visible_cage_size(difficulty_name),
            )?)
        };

        let grid = puzzle.starting_grid();
        let mut prefilled = Grid::new(puzzle.rows(), puzzle.cols(), false);
        for pos in grid.positions() {
            prefilled[pos] = !puzzle.exists(pos) || grid[pos] != 0;
        }

        Ok(Self {
            topology,
            cage_index,
            puzzle,
            grid,
            prefilled,
            selection: None,
            lives_remaining: INITIAL_LIVES,
            status: GameStatus::Playing,
            wrong_cell: None,
            wrong_cell_epoch: 0,
            elapsed_seconds: 0,
            timer_running: false,
        })
    }

    /// The resolved board geometry.
    #[must_use]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// The cage index, present only for killer puzzles.
    #[must_use]
    pub fn cage_index(&self) -> Option<&CageIndex> {
        self.cage_index.as_ref()
    }

    /// The immutable puzzle being played.
    #[must_use]
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// The current play grid (0 marks a blank).
    #[must_use]
    pub fn grid(&self) -> &Grid<u8> {
        &self.grid
    }

    /// Whether the cell at `pos` cannot be edited (given or nonexistent).
    ///
    /// Out-of-bounds positions count as non-editable.
    #[must_use]
    pub fn is_prefilled(&self, pos: Position) -> bool {
        self.prefilled.get(pos).copied().unwrap_or(true)
    }

    /// The selected cell, if any.
    #[must_use]
    pub fn selection(&self) -> Option<Position> {
        self.selection
    }

    /// Lives left.
    #[must_use]
    pub fn lives_remaining(&self) -> u8 {
        self.lives_remaining
    }

    /// Current status of the play-through.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// The cell currently flashed as wrong, if any.
    #[must_use]
    pub fn wrong_cell(&self) -> Option<Position> {
        self.wrong_cell
    }

    /// Seconds counted by the session clock so far.
    #[must_use]
    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    /// Whether the clock is currently counting.
    #[must_use]
    pub fn is_timer_running(&self) -> bool {
        self.timer_running
    }

    /// Selects a cell.
    ///
    /// No-op on a terminal session and for nonexistent cells. Prefilled
    /// cells are selectable (a host highlights their peers) but stay
    /// non-editable.
    pub fn select_cell(&mut self, pos: Position) {
        if !self.status.is_playing() || !self.puzzle.exists(pos) {
            return;
        }
        self.selection = Some(pos);
    }

    /// Inputs a digit into the selected cell.
    ///
    /// Guards first: the session must be playing, a selection must exist,
    /// and the selected cell must be editable and still blank; otherwise
    /// the call is [`InputOutcome::Ignored`]. A correct digit is written,
    /// the selection is cleared, and the win check runs. A wrong digit
    /// marks the cell, spends a life, and issues a fresh
    /// [`WrongCellClear`] token; the third miss ends the session.
    pub fn input_digit(&mut self, digit: u8) -> InputOutcome {
        if !self.status.is_playing() {
            return InputOutcome::Ignored;
        }
        let Some(cell) = self.selection else {
            return InputOutcome::Ignored;
        };
        if self.prefilled[cell] || self.grid[cell] != 0 {
            return InputOutcome::Ignored;
        }

        if self.puzzle.solution()[cell] == digit {
            self.grid[cell] = digit;
            self.selection = None;
            let solved = self.check_win();
            InputOutcome::Placed { cell, solved }
        } else {
            self.wrong_cell = Some(cell);
            self.wrong_cell_epoch += 1;
            self.lives_remaining -= 1;
            let lost = self.lives_remaining == 0;
            if lost {
                self.status = GameStatus::Lost;
                self.timer_running = false;
                debug!("session lost after {} seconds", self.elapsed_seconds);
            }
            InputOutcome::Wrong {
                cell,
                lives_remaining: self.lives_remaining,
                lost,
                clear: WrongCellClear {
                    epoch: self.wrong_cell_epoch,
                },
            }
        }
    }

    /// Clears the wrong-cell marker for a previously issued token.
    ///
    /// The host calls this [`crate::WRONG_CELL_CLEAR_DELAY`] after the
    /// token was issued. Stale tokens — superseded by a newer wrong input,
    /// invalidated by [`cancel_pending_wrong_cell_clear`], or arriving
    /// after a terminal transition — clear nothing.
    ///
    /// [`cancel_pending_wrong_cell_clear`]: Self::cancel_pending_wrong_cell_clear
    pub fn clear_wrong_cell(&mut self, clear: WrongCellClear) {
        if !self.status.is_playing() || clear.epoch != self.wrong_cell_epoch {
            return;
        }
        self.wrong_cell = None;
    }

    /// Invalidates every outstanding [`WrongCellClear`] token.
    ///
    /// Lets a host tear down its scheduling primitive without racing a
    /// callback that is already queued.
    pub fn cancel_pending_wrong_cell_clear(&mut self) {
        self.wrong_cell_epoch += 1;
    }

    /// Starts the session clock; a no-op when already running or terminal.
    pub fn start_timer(&mut self) {
        if self.timer_running || !self.status.is_playing() {
            return;
        }
        self.timer_running = true;
    }

    /// Pauses the session clock.
    pub fn pause_timer(&mut self) {
        self.timer_running = false;
    }

    /// Advances the clock by one second.
    ///
    /// The host calls this once per elapsed wall-clock second; the call
    /// counts only while the timer runs and the session is still playing,
    /// so a late or stray tick after a terminal transition is harmless.
    pub fn tick(&mut self) {
        if self.timer_running && self.status.is_playing() {
            self.elapsed_seconds += 1;
        }
    }

    /// The elapsed time as zero-padded `MM:SS`.
    #[must_use]
    pub fn formatted_time(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.elapsed_seconds / 60,
            self.elapsed_seconds % 60
        )
    }

    /// Number of cells currently holding `digit` (0 for blanks).
    #[must_use]
    pub fn count_occurrences(&self, digit: u8) -> usize {
        if digit == 0 {
            return 0;
        }
        self.grid
            .positions()
            .filter(|&pos| self.grid[pos] == digit)
            .count()
    }

    /// Whether every occurrence of `digit` on the board is placed.
    ///
    /// Compares against the solution's own count of `digit`, so sparse
    /// boards (killer, flower) where a digit occurs fewer times than the
    /// digit range suggests are handled correctly. A host disables the
    /// digit's input key on `true`.
    #[must_use]
    pub fn is_number_fully_placed(&self, digit: u8) -> bool {
        digit > 0 && self.count_occurrences(digit) >= self.puzzle.solution_digit_count(digit)
    }

    /// Win check: every existing cell filled.
    ///
    /// Fill completeness is sufficient because only solution-matching
    /// digits are ever written.
    fn check_win(&mut self) -> bool {
        let unfilled = self
            .grid
            .positions()
            .any(|pos| self.puzzle.exists(pos) && self.grid[pos] == 0);
        if unfilled {
            return false;
        }
        self.status = GameStatus::Won;
        self.timer_running = false;
        debug!("session won in {} seconds", self.elapsed_seconds);
        true
    }
}
