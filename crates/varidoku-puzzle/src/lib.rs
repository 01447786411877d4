//! Puzzle storage for varidoku: the persisted record shape and a
//! directory-backed provider.
//!
//! Collections live in JSON files, one per game type, shaped as
//! `{ "puzzles": [record, ...] }`. [`PuzzleRecord`] is the exact persisted
//! form and round-trips through serde unchanged;
//! [`PuzzleRecord::to_puzzle`] converts it into the validated engine input
//! ([`varidoku_core::Puzzle`]).
//!
//! [`PuzzleLibrary`] is the provider: it lists available difficulties and
//! picks a random puzzle matching a requested difficulty label. A missing
//! puzzle is an ordinary `None` — the caller decides the fallback.

pub use self::{
    provider::PuzzleLibrary,
    record::{CageRecord, PuzzleCollection, PuzzleRecord, RecordError},
};

mod provider;
mod record;
