//! Killer cages: index construction and presentation queries.
//!
//! Cage sums are informational. Input validation happens cell-by-cell
//! against the solution grid, so a cage's sum is never enforced as a play
//! constraint; the queries here exist for sum labels, cage borders, and
//! cage highlighting only.

use derive_more::{Display, Error};

use crate::{Grid, Position};

/// A sum cage: member cells plus a target sum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cage {
    /// Member cells in the puzzle's stored order. The first entry anchors
    /// the sum label.
    pub cells: Vec<Position>,
    /// Target sum of the member cells.
    pub sum: u32,
}

/// Which sides of a cell carry a cage border.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CageBorders {
    /// Border above the cell.
    pub top: bool,
    /// Border to the right of the cell.
    pub right: bool,
    /// Border below the cell.
    pub bottom: bool,
    /// Border to the left of the cell.
    pub left: bool,
}

impl CageBorders {
    /// Whether no side carries a border.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        !(self.top || self.right || self.bottom || self.left)
    }
}

/// Largest cage size still rendered for a difficulty label.
///
/// Purely a presentation cutoff: cages larger than this (or single-cell
/// cages) draw no sum label, borders, or highlight, but their cells play
/// exactly like any others.
#[must_use]
pub fn max_visible_cage_size(difficulty_name: &str) -> usize {
    match difficulty_name {
        "Beginner" => 3,
        "Expert" => 5,
        _ => 4,
    }
}

/// Precomputed cell→cage lookup with per-cage metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CageIndex {
    lookup: Grid<Option<u16>>,
    cages: Vec<Cage>,
    max_visible_cage_size: usize,
}

/// Error building a [`CageIndex`] from inconsistent cage definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum CageError {
    /// A cage lists a cell outside the board.
    #[display("cage {cage} lists out-of-bounds cell {cell}")]
    CellOutOfBounds {
        /// Index of the offending cage.
        cage: usize,
        /// The out-of-bounds cell.
        cell: Position,
    },
    /// A cell appears in more than one cage.
    #[display("cell {cell} belongs to cages {first} and {second}")]
    CellInTwoCages {
        /// The doubly-claimed cell.
        cell: Position,
        /// Index of the cage that claimed the cell first.
        first: usize,
        /// Index of the cage that claimed it again.
        second: usize,
    },
}

impl CageIndex {
    /// Builds the cell→cage lookup for a `rows × cols` board.
    ///
    /// Cells not referenced by any cage stay unassigned and answer `None`
    /// from [`cage_at`](Self::cage_at).
    ///
    /// # Errors
    ///
    /// Returns a [`CageError`] when a cage references a cell outside the
    /// board or a cell is claimed by two cages.
    pub fn build(
        cages: Vec<Cage>,
        rows: u8,
        cols: u8,
        max_visible_cage_size: usize,
    ) -> Result<Self, CageError> {
        let mut lookup = Grid::new(rows, cols, None);
        for (index, cage) in cages.iter().enumerate() {
            for &cell in &cage.cells {
                if !lookup.contains(cell) {
                    return Err(CageError::CellOutOfBounds { cage: index, cell });
                }
                if let Some(first) = lookup[cell] {
                    return Err(CageError::CellInTwoCages {
                        cell,
                        first: usize::from(first),
                        second: index,
                    });
                }
                #[expect(clippy::cast_possible_truncation)]
                {
                    lookup[cell] = Some(index as u16);
                }
            }
        }
        Ok(Self {
            lookup,
            cages,
            max_visible_cage_size,
        })
    }

    /// The cages in their stored order.
    #[must_use]
    pub fn cages(&self) -> &[Cage] {
        &self.cages
    }

    /// The presentation cutoff this index was built with.
    #[must_use]
    pub fn max_visible_cage_size(&self) -> usize {
        self.max_visible_cage_size
    }

    /// Index of the cage owning `pos`, or `None` for unassigned or
    /// out-of-bounds positions.
    #[must_use]
    pub fn cage_at(&self, pos: Position) -> Option<u16> {
        self.lookup.get(pos).copied().flatten()
    }

    /// Target sum shown at `pos`, if any.
    ///
    /// A label appears only on the first cell of a cage's stored ordering,
    /// and only for cages whose size is within `[2, max_visible_cage_size]`.
    #[must_use]
    pub fn sum_label(&self, pos: Position) -> Option<u32> {
        let index = self.cage_at(pos)?;
        if !self.cage_visible(index) {
            return None;
        }
        let cage = &self.cages[usize::from(index)];
        (cage.cells.first() == Some(&pos)).then_some(cage.sum)
    }

    /// Cage border sides for `pos`.
    ///
    /// A side carries a border where the neighbor (or the grid edge) does
    /// not belong to the same cage; suppressed entirely for cages outside
    /// the visibility cutoff.
    #[must_use]
    pub fn borders(&self, pos: Position) -> CageBorders {
        let Some(index) = self.cage_at(pos) else {
            return CageBorders::default();
        };
        if !self.cage_visible(index) {
            return CageBorders::default();
        }
        let differs = |d_row: i8, d_col: i8| {
            pos.offset(d_row, d_col)
                .and_then(|neighbor| self.cage_at(neighbor))
                != Some(index)
        };
        CageBorders {
            top: differs(-1, 0),
            right: differs(0, 1),
            bottom: differs(1, 0),
            left: differs(0, -1),
        }
    }

    /// Whether both cells belong to one cage within the visibility cutoff.
    #[must_use]
    pub fn same_visible_cage(&self, a: Position, b: Position) -> bool {
        match (self.cage_at(a), self.cage_at(b)) {
            (Some(first), Some(second)) => first == second && self.cage_visible(first),
            _ => false,
        }
    }

    fn cage_visible(&self, index: u16) -> bool {
        let size = self.cages[usize::from(index)].cells.len();
        (2..=self.max_visible_cage_size).contains(&size)
    }
}
