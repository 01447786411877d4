//! Directory-backed puzzle provider.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use derive_more::{Display, Error, From};
use log::warn;
use rand::RngExt;
use varidoku_core::GameType;

use crate::{PuzzleCollection, PuzzleRecord};

/// A puzzle library rooted at a directory of JSON collection files.
///
/// Each game type maps to one collection file (`<stem>.json`). A missing or
/// malformed collection degrades to an empty puzzle list with a warning;
/// a difficulty with no matching puzzle is an ordinary `None`.
///
/// # Examples
///
/// ```no_run
/// use varidoku_core::GameType;
/// use varidoku_puzzle::PuzzleLibrary;
///
/// let library = PuzzleLibrary::new("assets/puzzles");
/// let difficulties = library.available_difficulties(GameType::Classic);
/// if let Some(first) = difficulties.first() {
///     let record = library.load_puzzle(GameType::Classic, first);
///     assert!(record.is_some());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PuzzleLibrary {
    root: PathBuf,
}

#[derive(Debug, Display, Error, From)]
enum CollectionError {
    #[display("{_0}")]
    Io(io::Error),
    #[display("{_0}")]
    Parse(serde_json::Error),
}

impl PuzzleLibrary {
    /// Creates a library reading from `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Collection file stem for a game type.
    ///
    /// Samurai ships no stock collection and maps to `None`; its topology
    /// is still fully supported for puzzles delivered by other means.
    #[must_use]
    pub fn collection_stem(game_type: GameType) -> Option<&'static str> {
        match game_type {
            GameType::Classic => Some("sudoku"),
            GameType::Classic16 => Some("sudoku_16"),
            GameType::Jigsaw => Some("sudoku_jigsaw"),
            GameType::Windoku => Some("sudoku_windoku"),
            GameType::Killer => Some("sudoku_killer"),
            GameType::Flower => Some("sudoku_flower"),
            GameType::MiniSamurai => Some("sudoku_samurai_4"),
            GameType::Samurai => None,
        }
    }

    /// Loads every record of a game type's collection.
    ///
    /// Returns an empty list (after logging a warning) when the game type
    /// has no collection file or the file cannot be read or parsed.
    #[must_use]
    pub fn load_puzzles(&self, game_type: GameType) -> Vec<PuzzleRecord> {
        let Some(stem) = Self::collection_stem(game_type) else {
            return Vec::new();
        };
        let path = self.root.join(format!("{stem}.json"));
        match read_collection(&path) {
            Ok(collection) => collection.puzzles,
            Err(err) => {
                warn!(
                    "failed to load {game_type} puzzles from {}: {err}",
                    path.display()
                );
                Vec::new()
            }
        }
    }

    /// Distinct difficulty labels of a game type's collection.
    ///
    /// Ordered by ascending numeric difficulty rank; labels tied on rank
    /// keep their first-seen order.
    #[must_use]
    pub fn available_difficulties(&self, game_type: GameType) -> Vec<String> {
        let mut puzzles = self.load_puzzles(game_type);
        puzzles.sort_by_key(|record| record.difficulty);
        let mut ordered: Vec<String> = Vec::new();
        for record in puzzles {
            if !ordered.contains(&record.difficulty_name) {
                ordered.push(record.difficulty_name);
            }
        }
        ordered
    }

    /// Picks a random puzzle matching a difficulty label.
    ///
    /// Returns `None` when no record matches; the caller decides the
    /// fallback.
    #[must_use]
    pub fn load_puzzle(&self, game_type: GameType, difficulty_name: &str) -> Option<PuzzleRecord> {
        self.load_puzzle_with_rng(game_type, difficulty_name, &mut rand::rng())
    }

    /// [`load_puzzle`](Self::load_puzzle) with a caller-supplied RNG.
    #[must_use]
    pub fn load_puzzle_with_rng<R: RngExt>(
        &self,
        game_type: GameType,
        difficulty_name: &str,
        rng: &mut R,
    ) -> Option<PuzzleRecord> {
        let mut matching: Vec<_> = self
            .load_puzzles(game_type)
            .into_iter()
            .filter(|record| record.difficulty_name == difficulty_name)
            .collect();
        if matching.is_empty() {
            return None;
        }
        let index = rng.random_range(0..matching.len());
        Some(matching.swap_remove(index))
    }
}

fn read_collection(path: &Path) -> Result<PuzzleCollection, CollectionError> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rand::SeedableRng as _;
    use rand_pcg::Pcg64;
    use tempfile::TempDir;

    use super::*;

    fn record(id: i64, difficulty: i32, name: &str) -> PuzzleRecord {
        PuzzleRecord {
            id,
            difficulty,
            difficulty_name: name.to_owned(),
            puzzle: Some(vec![vec![0]]),
            solution: vec![vec![1]],
            regions: None,
            cages: None,
        }
    }

    fn write_collection(dir: &TempDir, stem: &str, puzzles: Vec<PuzzleRecord>) {
        let collection = PuzzleCollection { puzzles };
        let json = serde_json::to_string(&collection).unwrap();
        fs::write(dir.path().join(format!("{stem}.json")), json).unwrap();
    }

    #[test]
    fn test_load_puzzles_reads_collection_file() {
        let dir = TempDir::new().unwrap();
        write_collection(&dir, "sudoku", vec![record(1, 1, "Beginner")]);

        let library = PuzzleLibrary::new(dir.path());
        let puzzles = library.load_puzzles(GameType::Classic);
        assert_eq!(puzzles.len(), 1);
        assert_eq!(puzzles[0].id, 1);
    }

    #[test]
    fn test_missing_or_malformed_collections_degrade_to_empty() {
        let dir = TempDir::new().unwrap();
        let library = PuzzleLibrary::new(dir.path());
        assert!(library.load_puzzles(GameType::Classic).is_empty());

        fs::write(dir.path().join("sudoku_16.json"), "not json").unwrap();
        assert!(library.load_puzzles(GameType::Classic16).is_empty());

        // Samurai has no stock collection at all.
        write_collection(&dir, "sudoku_samurai", vec![record(1, 1, "Beginner")]);
        assert!(library.load_puzzles(GameType::Samurai).is_empty());
    }

    #[test]
    fn test_available_difficulties_order_by_rank_with_stable_ties() {
        let dir = TempDir::new().unwrap();
        write_collection(
            &dir,
            "sudoku",
            vec![
                record(1, 3, "Hard"),
                record(2, 1, "Beginner"),
                record(3, 2, "Tricky"),
                record(4, 2, "Medium"),
                record(5, 2, "Tricky"),
                record(6, 1, "Beginner"),
            ],
        );

        let library = PuzzleLibrary::new(dir.path());
        assert_eq!(
            library.available_difficulties(GameType::Classic),
            ["Beginner", "Tricky", "Medium", "Hard"]
        );
    }

    #[test]
    fn test_load_puzzle_filters_by_difficulty() {
        let dir = TempDir::new().unwrap();
        write_collection(
            &dir,
            "sudoku",
            vec![record(1, 1, "Beginner"), record(2, 3, "Hard")],
        );

        let library = PuzzleLibrary::new(dir.path());
        let mut rng = Pcg64::seed_from_u64(42);

        let picked = library
            .load_puzzle_with_rng(GameType::Classic, "Hard", &mut rng)
            .unwrap();
        assert_eq!(picked.id, 2);

        assert_eq!(
            library.load_puzzle_with_rng(GameType::Classic, "Expert", &mut rng),
            None
        );
    }

    #[test]
    fn test_load_puzzle_picks_among_all_matches() {
        let dir = TempDir::new().unwrap();
        write_collection(
            &dir,
            "sudoku",
            vec![
                record(1, 1, "Beginner"),
                record(2, 1, "Beginner"),
                record(3, 1, "Beginner"),
            ],
        );

        let library = PuzzleLibrary::new(dir.path());
        let mut rng = Pcg64::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..64 {
            let picked = library
                .load_puzzle_with_rng(GameType::Classic, "Beginner", &mut rng)
                .unwrap();
            seen.insert(picked.id);
        }
        assert_eq!(seen.len(), 3);
    }
}
