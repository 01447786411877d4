//! Board geometry: topology resolution and the membership oracle.
//!
//! A [`Topology`] is resolved once per play-through and is the single source
//! of truth for "are these two cells mutually constrained". Three membership
//! strategies exist, tried in priority order:
//!
//! 1. **Sub-boards** (samurai, flower, mini-samurai) — a cell may belong to
//!    *several* overlapping sub-boards; two cells are constrained when any
//!    common sub-board places them in the same local box.
//! 2. **Regions** (jigsaw, or any puzzle shipping an explicit region map) —
//!    region id equality.
//! 3. **Plain boxing** (classic, 16×16, killer, windoku) — box quotient
//!    equality.
//!
//! Windoku's four shaded windows are an *additive* constraint layered on top
//! of plain boxing; they are queried separately via
//! [`Topology::same_overlap_window`].

use derive_more::{Display, Error};

use crate::{GameType, Grid, Position};

/// One full board-sized constraint unit of an overlapping layout.
///
/// Sub-boards overlap at shared cells: a position may be covered by more
/// than one sub-board, and membership is a one-to-many relation rather than
/// a partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubBoard {
    /// Top row of the sub-board on the host grid.
    pub start_row: u8,
    /// Left column of the sub-board on the host grid.
    pub start_col: u8,
    /// Side length in cells.
    pub size: u8,
    /// Rows per internal box.
    pub box_rows: u8,
    /// Columns per internal box.
    pub box_cols: u8,
    /// Marks the central sub-board of the layout.
    pub is_center: bool,
}

impl SubBoard {
    const fn new(
        start_row: u8,
        start_col: u8,
        size: u8,
        box_rows: u8,
        box_cols: u8,
        is_center: bool,
    ) -> Self {
        Self {
            start_row,
            start_col,
            size,
            box_rows,
            box_cols,
            is_center,
        }
    }

    /// Whether the sub-board covers `pos`.
    #[must_use]
    pub const fn contains(&self, pos: Position) -> bool {
        pos.row >= self.start_row
            && pos.row < self.start_row + self.size
            && pos.col >= self.start_col
            && pos.col < self.start_col + self.size
    }

    /// Local box coordinates of `pos` within this sub-board.
    ///
    /// Only meaningful when [`contains`](Self::contains) holds.
    const fn local_box(&self, pos: Position) -> (u8, u8) {
        (
            (pos.row - self.start_row) / self.box_rows,
            (pos.col - self.start_col) / self.box_cols,
        )
    }
}

/// A fixed extra constraint rectangle layered on top of normal boxing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Top row of the window.
    pub start_row: u8,
    /// Left column of the window.
    pub start_col: u8,
    /// Height in cells.
    pub rows: u8,
    /// Width in cells.
    pub cols: u8,
}

impl Window {
    const fn new(start_row: u8, start_col: u8, rows: u8, cols: u8) -> Self {
        Self {
            start_row,
            start_col,
            rows,
            cols,
        }
    }

    /// Whether the window covers `pos`.
    #[must_use]
    pub const fn contains(&self, pos: Position) -> bool {
        pos.row >= self.start_row
            && pos.row < self.start_row + self.rows
            && pos.col >= self.start_col
            && pos.col < self.start_col + self.cols
    }
}

const WINDOKU_WINDOWS: [Window; 4] = [
    Window::new(1, 1, 3, 3),
    Window::new(1, 5, 3, 3),
    Window::new(5, 1, 3, 3),
    Window::new(5, 5, 3, 3),
];

// Gattai-5: four corner boards plus a marked center.
const SAMURAI_BOARDS: [SubBoard; 5] = [
    SubBoard::new(0, 0, 9, 3, 3, false),
    SubBoard::new(0, 12, 9, 3, 3, false),
    SubBoard::new(6, 6, 9, 3, 3, true),
    SubBoard::new(12, 0, 9, 3, 3, false),
    SubBoard::new(12, 12, 9, 3, 3, false),
];

// Four petals around the center; the 3×3 grid corners hold no cells (the
// solution grid marks them nonexistent).
const FLOWER_BOARDS: [SubBoard; 5] = [
    SubBoard::new(0, 3, 9, 3, 3, false),
    SubBoard::new(3, 0, 9, 3, 3, false),
    SubBoard::new(3, 3, 9, 3, 3, true),
    SubBoard::new(3, 6, 9, 3, 3, false),
    SubBoard::new(6, 3, 9, 3, 3, false),
];

const MINI_SAMURAI_BOARDS: [SubBoard; 5] = [
    SubBoard::new(0, 0, 4, 2, 2, false),
    SubBoard::new(0, 2, 4, 2, 2, false),
    SubBoard::new(1, 1, 4, 2, 2, true),
    SubBoard::new(2, 0, 4, 2, 2, false),
    SubBoard::new(2, 2, 4, 2, 2, false),
];

/// Immutable geometric description of a board.
///
/// Resolved once per session from the variant tag and the puzzle's
/// dimensions; every downstream component (membership queries, border and
/// label derivation, the play session) consumes only this value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    game_type: GameType,
    grid_rows: u8,
    grid_cols: u8,
    box_rows: u8,
    box_cols: u8,
    max_digit: u8,
    sub_boards: Vec<SubBoard>,
    windows: Vec<Window>,
    regions: Option<Grid<u8>>,
}

/// Error resolving a [`Topology`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum TopologyError {
    /// No topology entry matches the game type at these dimensions.
    #[display("{game_type} has no topology for a {rows}x{cols} grid")]
    UnsupportedDimensions {
        /// Requested variant.
        game_type: GameType,
        /// Puzzle row count.
        rows: u8,
        /// Puzzle column count.
        cols: u8,
    },
    /// The variant needs an explicit region map and none was provided.
    #[display("{game_type} requires a region map")]
    MissingRegions {
        /// Requested variant.
        game_type: GameType,
    },
}

impl Topology {
    /// Resolves the board geometry for a variant at the given dimensions.
    ///
    /// A region map is attached whenever the puzzle ships one (jigsaw
    /// requires it; windoku collections may carry one as well), and takes
    /// over from plain boxing in membership queries. Sub-board layouts come
    /// from a static per-variant table.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::UnsupportedDimensions`] when the variant has
    /// no entry for `rows × cols`, and [`TopologyError::MissingRegions`]
    /// when a jigsaw puzzle arrives without its region map.
    pub fn resolve(
        game_type: GameType,
        rows: u8,
        cols: u8,
        regions: Option<&Grid<u8>>,
    ) -> Result<Self, TopologyError> {
        let mismatch = |expected: u8| rows != expected || cols != expected;
        let unsupported = TopologyError::UnsupportedDimensions {
            game_type,
            rows,
            cols,
        };

        let (box_rows, box_cols, max_digit, sub_boards, windows) = match game_type {
            GameType::Classic | GameType::Killer | GameType::Jigsaw => {
                if mismatch(9) {
                    return Err(unsupported);
                }
                if game_type == GameType::Jigsaw && regions.is_none() {
                    return Err(TopologyError::MissingRegions { game_type });
                }
                (3, 3, 9, Vec::new(), Vec::new())
            }
            GameType::Classic16 => {
                if mismatch(16) {
                    return Err(unsupported);
                }
                (4, 4, 16, Vec::new(), Vec::new())
            }
            GameType::Windoku => {
                if mismatch(9) {
                    return Err(unsupported);
                }
                (3, 3, 9, Vec::new(), WINDOKU_WINDOWS.to_vec())
            }
            GameType::Samurai => {
                if mismatch(21) {
                    return Err(unsupported);
                }
                (3, 3, 9, SAMURAI_BOARDS.to_vec(), Vec::new())
            }
            GameType::Flower => {
                if mismatch(15) {
                    return Err(unsupported);
                }
                (3, 3, 9, FLOWER_BOARDS.to_vec(), Vec::new())
            }
            GameType::MiniSamurai => {
                if mismatch(6) {
                    return Err(unsupported);
                }
                (2, 2, 4, MINI_SAMURAI_BOARDS.to_vec(), Vec::new())
            }
        };

        Ok(Self {
            game_type,
            grid_rows: rows,
            grid_cols: cols,
            box_rows,
            box_cols,
            max_digit,
            sub_boards,
            windows,
            regions: regions.cloned(),
        })
    }

    /// The variant this topology was resolved for.
    #[must_use]
    pub fn game_type(&self) -> GameType {
        self.game_type
    }

    /// Board row count.
    #[must_use]
    pub fn grid_rows(&self) -> u8 {
        self.grid_rows
    }

    /// Board column count.
    #[must_use]
    pub fn grid_cols(&self) -> u8 {
        self.grid_cols
    }

    /// Rows per box under plain boxing.
    #[must_use]
    pub fn box_rows(&self) -> u8 {
        self.box_rows
    }

    /// Columns per box under plain boxing.
    #[must_use]
    pub fn box_cols(&self) -> u8 {
        self.box_cols
    }

    /// Largest digit placeable on this board.
    #[must_use]
    pub fn max_digit(&self) -> u8 {
        self.max_digit
    }

    /// Sub-boards of an overlapping layout; empty otherwise.
    #[must_use]
    pub fn sub_boards(&self) -> &[SubBoard] {
        &self.sub_boards
    }

    /// Extra constraint windows; nonempty only for windoku.
    #[must_use]
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    /// Explicit region map, when the puzzle ships one.
    #[must_use]
    pub fn regions(&self) -> Option<&Grid<u8>> {
        self.regions.as_ref()
    }

    /// Whether two cells are mutually constrained by a box, region, or
    /// sub-board box.
    ///
    /// For overlapping layouts, *any* sub-board covering both cells may
    /// claim the pair; cells sharing no sub-board are unconstrained even
    /// when both exist. The query is symmetric in its arguments.
    #[must_use]
    pub fn same_constraint_group(&self, a: Position, b: Position) -> bool {
        if !self.sub_boards.is_empty() {
            return self.sub_boards.iter().any(|board| {
                board.contains(a) && board.contains(b) && board.local_box(a) == board.local_box(b)
            });
        }
        if let Some(regions) = &self.regions {
            return regions[a] == regions[b];
        }
        a.row / self.box_rows == b.row / self.box_rows
            && a.col / self.box_cols == b.col / self.box_cols
    }

    /// Whether `pos` falls inside any extra constraint window.
    #[must_use]
    pub fn in_overlap_window(&self, pos: Position) -> bool {
        self.windows.iter().any(|window| window.contains(pos))
    }

    /// Whether both cells fall inside one extra constraint window.
    ///
    /// Window membership is additive to [`same_constraint_group`]: a
    /// windoku pair may be constrained by a window, by a box, by both, or
    /// by neither. Variants without windows always answer `false`.
    ///
    /// [`same_constraint_group`]: Self::same_constraint_group
    #[must_use]
    pub fn same_overlap_window(&self, a: Position, b: Position) -> bool {
        self.windows
            .iter()
            .any(|window| window.contains(a) && window.contains(b))
    }
}
