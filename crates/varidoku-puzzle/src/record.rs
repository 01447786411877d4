//! Persisted puzzle records and their conversion to engine input.

use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use varidoku_core::{Cage, Grid, GridShapeError, Position, Puzzle, PuzzleError};

/// A puzzle collection file: `{ "puzzles": [record, ...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleCollection {
    /// The records in their stored order.
    pub puzzles: Vec<PuzzleRecord>,
}

/// One puzzle in its persisted form.
///
/// The shape round-trips exactly: absent optional fields stay absent when
/// re-serialized (an explicit JSON `null` is accepted on input and comes
/// back out as absent). `solution` values at or below 0 mark nonexistent
/// cells; [`to_puzzle`](Self::to_puzzle) normalizes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleRecord {
    /// Stable identifier within the collection.
    pub id: i64,
    /// Numeric difficulty rank used for ordering.
    pub difficulty: i32,
    /// Human-readable difficulty label.
    pub difficulty_name: String,
    /// Starting grid; absent for killer puzzles, which start all-blank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub puzzle: Option<Vec<Vec<i32>>>,
    /// Full solution grid.
    pub solution: Vec<Vec<i32>>,
    /// Region map for jigsaw-style variants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<Vec<i32>>>,
    /// Sum cages for killer variants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cages: Option<Vec<CageRecord>>,
}

/// One cage of a killer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CageRecord {
    /// Member cells as `[row, col]` pairs, in stored order.
    pub cells: Vec<[u8; 2]>,
    /// Target sum.
    pub sum: u32,
}

/// Error converting a [`PuzzleRecord`] into an engine [`Puzzle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From)]
pub enum RecordError {
    /// A grid field was empty, ragged, or oversized.
    #[display("{_0}")]
    #[from]
    Shape(GridShapeError),
    /// The record's parts disagree on dimensions.
    #[display("{_0}")]
    #[from]
    Puzzle(PuzzleError),
    /// A digit value does not fit the engine's digit range.
    #[display("digit {value} at ({row}, {col}) is out of range")]
    DigitOutOfRange {
        /// Row of the offending value.
        row: usize,
        /// Column of the offending value.
        col: usize,
        /// The stored value.
        value: i32,
    },
    /// A region id does not fit the engine's region range.
    #[display("region id {value} at ({row}, {col}) is out of range")]
    RegionOutOfRange {
        /// Row of the offending value.
        row: usize,
        /// Column of the offending value.
        col: usize,
        /// The stored value.
        value: i32,
    },
}

impl PuzzleRecord {
    /// Converts the persisted form into a validated engine [`Puzzle`].
    ///
    /// Solution and starting values at or below 0 become the engine's 0
    /// sentinel (nonexistent and blank respectively); a missing `puzzle`
    /// field becomes a blank start.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] when a grid is malformed, a value is out
    /// of range, or the parts disagree on dimensions.
    pub fn to_puzzle(&self) -> Result<Puzzle, RecordError> {
        let solution = digit_grid(&self.solution)?;
        let given = self.puzzle.as_deref().map(digit_grid).transpose()?;
        let regions = self.regions.as_deref().map(region_grid).transpose()?;
        let cages = self
            .cages
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|cage| Cage {
                cells: cage
                    .cells
                    .iter()
                    .map(|&[row, col]| Position::new(row, col))
                    .collect(),
                sum: cage.sum,
            })
            .collect();
        Ok(Puzzle::new(solution, given, regions, cages)?)
    }
}

/// Converts stored digit rows; values at or below 0 collapse to the 0
/// sentinel.
fn digit_grid(rows: &[Vec<i32>]) -> Result<Grid<u8>, RecordError> {
    convert_rows(rows, |value| {
        if value <= 0 {
            Some(0)
        } else {
            u8::try_from(value).ok()
        }
    })
}

fn region_grid(rows: &[Vec<i32>]) -> Result<Grid<u8>, RecordError> {
    convert_rows(rows, |value| u8::try_from(value).ok()).map_err(|err| match err {
        RecordError::DigitOutOfRange { row, col, value } => {
            RecordError::RegionOutOfRange { row, col, value }
        }
        other => other,
    })
}

fn convert_rows(
    rows: &[Vec<i32>],
    convert: impl Fn(i32) -> Option<u8>,
) -> Result<Grid<u8>, RecordError> {
    let mut data = Vec::with_capacity(rows.len());
    for (row, row_values) in rows.iter().enumerate() {
        let mut converted = Vec::with_capacity(row_values.len());
        for (col, &value) in row_values.iter().enumerate() {
            let digit =
                convert(value).ok_or(RecordError::DigitOutOfRange { row, col, value })?;
            converted.push(digit);
        }
        data.push(converted);
    }
    Ok(Grid::from_rows(data)?)
}
