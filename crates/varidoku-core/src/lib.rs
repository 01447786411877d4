//! Core data structures for multi-variant Sudoku boards.
//!
//! This crate describes a puzzle's *geometry* and *static data*; it holds no
//! mutable play state. It is organized around three ideas:
//!
//! 1. **Board data** — [`Position`], the dynamically sized [`Grid`]
//!    container, and the immutable [`Puzzle`] input value delivered by a
//!    provider.
//! 2. **Topology** — [`Topology`] is resolved once per play-through from a
//!    [`GameType`] and the puzzle's dimensions. It carries box dimensions,
//!    overlapping sub-boards, extra constraint windows, and an optional
//!    region map, and answers every "are these two cells mutually
//!    constrained" query. Downstream code never branches on the game type
//!    again.
//! 3. **Presentation derivation** — [`border::is_separator`] and
//!    [`CageIndex`] compute thick-boundary placement and cage sum labels
//!    from the same static data.
//!
//! # Examples
//!
//! ```
//! use varidoku_core::{GameType, Position, Topology};
//!
//! let topology = Topology::resolve(GameType::Classic, 9, 9, None).unwrap();
//!
//! // (0,0) and (2,2) share the top-left 3×3 box; (0,0) and (0,3) do not.
//! assert!(topology.same_constraint_group(Position::new(0, 0), Position::new(2, 2)));
//! assert!(!topology.same_constraint_group(Position::new(0, 0), Position::new(0, 3)));
//! ```

pub mod border;
pub mod cage;
pub mod game_type;
pub mod grid;
pub mod position;
pub mod puzzle;
pub mod topology;

// Re-export commonly used types
pub use self::{
    cage::{Cage, CageBorders, CageError, CageIndex, max_visible_cage_size},
    game_type::GameType,
    grid::{Grid, GridShapeError},
    position::Position,
    puzzle::{Puzzle, PuzzleError},
    topology::{SubBoard, Topology, TopologyError, Window},
};
