//! Thick-boundary derivation between adjacent cells.
//!
//! Presentation code asks, for each pair of horizontally or vertically
//! adjacent cells, whether a thick separator lies between them. The answer
//! falls out of the membership oracle: a separator sits exactly where two
//! existing neighbors are not mutually constrained. Nonexistent cells carry
//! no separators at all (the gap itself marks the board edge there).

use crate::{Position, Puzzle, Topology};

/// Whether a thick boundary separates two adjacent cells.
///
/// `a` and `b` are expected to be orthogonal neighbors; the result for
/// non-adjacent pairs is well-defined (group complement) but not meaningful
/// for rendering.
#[must_use]
pub fn is_separator(puzzle: &Puzzle, topology: &Topology, a: Position, b: Position) -> bool {
    if !puzzle.exists(a) || !puzzle.exists(b) {
        return false;
    }
    !topology.same_constraint_group(a, b)
}

/// Whether any row has a thick boundary between columns `col` and `col + 1`.
///
/// Layout code widens the whole gap between two grid columns when any cell
/// pair along it is separated.
#[must_use]
pub fn column_has_separator(puzzle: &Puzzle, topology: &Topology, col: u8) -> bool {
    if col + 1 >= topology.grid_cols() {
        return false;
    }
    (0..topology.grid_rows()).any(|row| {
        is_separator(
            puzzle,
            topology,
            Position::new(row, col),
            Position::new(row, col + 1),
        )
    })
}

/// Whether any column has a thick boundary between rows `row` and `row + 1`.
#[must_use]
pub fn row_has_separator(puzzle: &Puzzle, topology: &Topology, row: u8) -> bool {
    if row + 1 >= topology.grid_rows() {
        return false;
    }
    (0..topology.grid_cols()).any(|col| {
        is_separator(
            puzzle,
            topology,
            Position::new(row, col),
            Position::new(row + 1, col),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameType, Grid};

    fn classic_puzzle() -> (Puzzle, Topology) {
        let solution = Grid::new(9, 9, 1_u8);
        let puzzle = Puzzle::new(solution, None, None, Vec::new()).unwrap();
        let topology = Topology::resolve(GameType::Classic, 9, 9, None).unwrap();
        (puzzle, topology)
    }

    #[test]
    fn test_classic_separators_sit_on_box_boundaries() {
        let (puzzle, topology) = classic_puzzle();
        assert!(is_separator(
            &puzzle,
            &topology,
            Position::new(0, 2),
            Position::new(0, 3)
        ));
        assert!(!is_separator(
            &puzzle,
            &topology,
            Position::new(0, 1),
            Position::new(0, 2)
        ));
        assert!(is_separator(
            &puzzle,
            &topology,
            Position::new(2, 0),
            Position::new(3, 0)
        ));

        assert!(column_has_separator(&puzzle, &topology, 2));
        assert!(!column_has_separator(&puzzle, &topology, 3));
        assert!(!column_has_separator(&puzzle, &topology, 8));
        assert!(row_has_separator(&puzzle, &topology, 5));
        assert!(!row_has_separator(&puzzle, &topology, 4));
    }

    #[test]
    fn test_region_separators_follow_region_map() {
        let mut regions = Grid::new(9, 9, 0_u8);
        for pos in regions.positions() {
            regions[pos] = pos.row;
        }
        let solution = Grid::new(9, 9, 1_u8);
        let puzzle = Puzzle::new(solution, None, Some(regions.clone()), Vec::new()).unwrap();
        let topology = Topology::resolve(GameType::Jigsaw, 9, 9, Some(&regions)).unwrap();

        // Row stripes: every horizontal neighbor pair shares a region, every
        // vertical pair crosses one.
        assert!(!is_separator(
            &puzzle,
            &topology,
            Position::new(0, 2),
            Position::new(0, 3)
        ));
        assert!(is_separator(
            &puzzle,
            &topology,
            Position::new(0, 0),
            Position::new(1, 0)
        ));
        assert!(!column_has_separator(&puzzle, &topology, 2));
        assert!(row_has_separator(&puzzle, &topology, 0));
    }

    #[test]
    fn test_nonexistent_cells_carry_no_separator() {
        // Flower board: the 3×3 corners do not exist.
        let mut solution = Grid::new(15, 15, 1_u8);
        for pos in solution.positions() {
            let corner_row = pos.row < 3 || pos.row >= 12;
            let corner_col = pos.col < 3 || pos.col >= 12;
            if corner_row && corner_col {
                solution[pos] = 0;
            }
        }
        let puzzle = Puzzle::new(solution, None, None, Vec::new()).unwrap();
        let topology = Topology::resolve(GameType::Flower, 15, 15, None).unwrap();

        // Both cells in the nonexistent corner.
        assert!(!is_separator(
            &puzzle,
            &topology,
            Position::new(0, 0),
            Position::new(0, 1)
        ));
        // Edge between a corner gap and the north petal.
        assert!(!is_separator(
            &puzzle,
            &topology,
            Position::new(0, 2),
            Position::new(0, 3)
        ));
        // Interior petal box boundary still separates.
        assert!(is_separator(
            &puzzle,
            &topology,
            Position::new(0, 5),
            Position::new(0, 6)
        ));
    }
}
