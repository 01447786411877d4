//! Immutable puzzle input values.

use derive_more::{Display, Error};

use crate::{Cage, Grid, Position};

/// A puzzle as delivered by a provider, validated and ready for play.
///
/// The solution grid is authoritative for board shape: a cell whose solution
/// value is 0 does not exist (flower corners, sparse killer boards) and is
/// excluded from selection, input, and win checks. [`exists`](Self::exists)
/// is the one predicate encoding that rule.
///
/// # Examples
///
/// ```
/// use varidoku_core::{Grid, Position, Puzzle};
///
/// let solution = Grid::from_rows(vec![
///     vec![1, 2, 0, 0],
///     vec![3, 4, 0, 0],
///     vec![0, 0, 1, 2],
///     vec![0, 0, 3, 4],
/// ]).unwrap();
/// let puzzle = Puzzle::new(solution, None, None, Vec::new()).unwrap();
///
/// assert!(puzzle.exists(Position::new(0, 0)));
/// assert!(!puzzle.exists(Position::new(0, 3)));
/// assert_eq!(puzzle.solution_digit_count(1), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    solution: Grid<u8>,
    given: Option<Grid<u8>>,
    regions: Option<Grid<u8>>,
    cages: Vec<Cage>,
}

/// Error constructing a [`Puzzle`] from inconsistent parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum PuzzleError {
    /// The given grid's dimensions differ from the solution's.
    #[display("given grid is {given_rows}x{given_cols}, solution is {rows}x{cols}")]
    GivenShapeMismatch {
        /// Rows of the given grid.
        given_rows: u8,
        /// Columns of the given grid.
        given_cols: u8,
        /// Rows of the solution grid.
        rows: u8,
        /// Columns of the solution grid.
        cols: u8,
    },
    /// The region map's dimensions differ from the solution's.
    #[display("region map is {region_rows}x{region_cols}, solution is {rows}x{cols}")]
    RegionShapeMismatch {
        /// Rows of the region map.
        region_rows: u8,
        /// Columns of the region map.
        region_cols: u8,
        /// Rows of the solution grid.
        rows: u8,
        /// Columns of the solution grid.
        cols: u8,
    },
    /// A cage references a cell outside the solution grid.
    #[display("cage {cage} references out-of-bounds cell {cell}")]
    CageCellOutOfBounds {
        /// Index of the offending cage.
        cage: usize,
        /// The out-of-bounds cell.
        cell: Position,
    },
}

impl Puzzle {
    /// Assembles a puzzle, validating that every part agrees on dimensions.
    ///
    /// `given` is `None` for killer puzzles, where play starts from an
    /// all-blank grid.
    ///
    /// # Errors
    ///
    /// Returns a [`PuzzleError`] naming the first inconsistency found; no
    /// partial puzzle is produced.
    pub fn new(
        solution: Grid<u8>,
        given: Option<Grid<u8>>,
        regions: Option<Grid<u8>>,
        cages: Vec<Cage>,
    ) -> Result<Self, PuzzleError> {
        let (rows, cols) = (solution.rows(), solution.cols());
        if let Some(given) = &given
            && (given.rows(), given.cols()) != (rows, cols)
        {
            return Err(PuzzleError::GivenShapeMismatch {
                given_rows: given.rows(),
                given_cols: given.cols(),
                rows,
                cols,
            });
        }
        if let Some(regions) = &regions
            && (regions.rows(), regions.cols()) != (rows, cols)
        {
            return Err(PuzzleError::RegionShapeMismatch {
                region_rows: regions.rows(),
                region_cols: regions.cols(),
                rows,
                cols,
            });
        }
        for (index, cage) in cages.iter().enumerate() {
            if let Some(&cell) = cage.cells.iter().find(|cell| !solution.contains(**cell)) {
                return Err(PuzzleError::CageCellOutOfBounds { cage: index, cell });
            }
        }
        Ok(Self {
            solution,
            given,
            regions,
            cages,
        })
    }

    /// Board row count.
    #[must_use]
    pub fn rows(&self) -> u8 {
        self.solution.rows()
    }

    /// Board column count.
    #[must_use]
    pub fn cols(&self) -> u8 {
        self.solution.cols()
    }

    /// The full solution grid (0 marks a nonexistent cell).
    #[must_use]
    pub fn solution(&self) -> &Grid<u8> {
        &self.solution
    }

    /// The starting values, when the puzzle ships any (0 marks a blank).
    #[must_use]
    pub fn given(&self) -> Option<&Grid<u8>> {
        self.given.as_ref()
    }

    /// The explicit region map, when the puzzle ships one.
    #[must_use]
    pub fn regions(&self) -> Option<&Grid<u8>> {
        self.regions.as_ref()
    }

    /// The sum cages, empty for non-killer puzzles.
    #[must_use]
    pub fn cages(&self) -> &[Cage] {
        &self.cages
    }

    /// Whether the cell at `pos` exists.
    ///
    /// Nonexistent cells (and out-of-bounds positions) are excluded from
    /// selection, input, and win checks.
    #[must_use]
    pub fn exists(&self, pos: Position) -> bool {
        self.solution.get(pos).is_some_and(|&digit| digit > 0)
    }

    /// Number of existing cells whose solution digit is `digit`.
    ///
    /// On sparse boards a digit can occur fewer times than the digit range
    /// suggests; this count is the reference for "fully placed" checks.
    #[must_use]
    pub fn solution_digit_count(&self, digit: u8) -> usize {
        if digit == 0 {
            return 0;
        }
        self.solution
            .positions()
            .filter(|&pos| self.solution[pos] == digit)
            .count()
    }

    /// The grid a fresh session starts from: the given values, or all
    /// blanks when the puzzle ships none.
    #[must_use]
    pub fn starting_grid(&self) -> Grid<u8> {
        self.given
            .clone()
            .unwrap_or_else(|| Grid::new(self.rows(), self.cols(), 0))
    }
}
