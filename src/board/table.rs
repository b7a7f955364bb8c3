//! Board tables
//!
//! Boards are static data: compiled-in defaults, with an optional RON file
//! override. Every board is validated when it is built — a bad board is a
//! configuration error that must stop the program before a session starts.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::square::{Square, SquareKind};

/// Fixed number of squares on every board
pub const BOARD_SQUARES: usize = 50;

/// Name of the board used when no board is picked explicitly
pub const REFERENCE_BOARD: &str = "The First Loser";

/// Default location of the board override file
pub const BOARD_FILE: &str = "assets/data/boards.ron";

/// Board configuration errors, all fatal at load time
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board '{name}' has {found} squares, expected {expected}")]
    WrongSize {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("board '{name}' must end on a hazard square")]
    MissingTerminalHazard { name: String },
    #[error("failed to read board file {path}: {message}")]
    Io { path: String, message: String },
    #[error("failed to parse board file {path}: {message}")]
    Parse { path: String, message: String },
}

/// A validated, read-only board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    name: String,
    squares: Vec<Square>,
}

impl Board {
    /// Build a board, enforcing the size and terminal-hazard invariants
    pub fn new(name: impl Into<String>, squares: Vec<Square>) -> Result<Self, BoardError> {
        let name = name.into();
        if squares.len() != BOARD_SQUARES {
            return Err(BoardError::WrongSize {
                name,
                expected: BOARD_SQUARES,
                found: squares.len(),
            });
        }
        if squares.last().map(|s| s.kind) != Some(SquareKind::Hazard) {
            return Err(BoardError::MissingTerminalHazard { name });
        }
        Ok(Self { name, squares })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.squares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    /// Index of the final square
    pub fn last_index(&self) -> usize {
        self.squares.len() - 1
    }

    /// The square at `index`; callers keep positions in `0..len()`
    pub fn square(&self, index: usize) -> &Square {
        &self.squares[index]
    }

    pub fn squares(&self) -> &[Square] {
        &self.squares
    }
}

/// Raw board record as it appears in RON files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardDef {
    pub name: String,
    pub squares: Vec<Square>,
}

/// Raw board file contents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSetDef {
    pub boards: Vec<BoardDef>,
}

/// Named collection of validated boards
#[derive(Debug, Clone)]
pub struct BoardSet {
    boards: Vec<Board>,
}

impl BoardSet {
    /// Load boards from the override file if present, else the built-ins
    pub fn load() -> Result<Self, BoardError> {
        let path = Path::new(BOARD_FILE);
        if path.exists() {
            log::info!("Loading boards from {}", path.display());
            Self::load_file(path)
        } else {
            log::info!("No board file at {}, using built-in boards", path.display());
            Self::builtin()
        }
    }

    /// Load and validate a specific RON board file
    pub fn load_file(path: &Path) -> Result<Self, BoardError> {
        let content = fs::read_to_string(path).map_err(|e| BoardError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let def: BoardSetDef = ron::from_str(&content).map_err(|e| BoardError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_def(def)
    }

    /// The compiled-in board set
    pub fn builtin() -> Result<Self, BoardError> {
        Self::from_def(builtin_board_defs())
    }

    fn from_def(def: BoardSetDef) -> Result<Self, BoardError> {
        let boards = def
            .boards
            .into_iter()
            .map(|b| Board::new(b.name, b.squares))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { boards })
    }

    /// Find a board by name
    pub fn find(&self, name: &str) -> Option<&Board> {
        self.boards.iter().find(|b| b.name == name)
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }
}

/// Built-in board definitions (hardcoded fallback)
pub fn builtin_board_defs() -> BoardSetDef {
    use SquareKind::*;

    let reward = |amount: i16| Square::with_params(Reward, [amount, 0, 0]);

    BoardSetDef {
        boards: vec![BoardDef {
            name: REFERENCE_BOARD.to_string(),
            squares: vec![
                // === Tiles 0-9: easy opening stretch ===
                Square::new(NoOp),
                Square::new(NoOp),
                Square::new(EncounterLand),
                Square::new(NoOp),
                reward(5),
                Square::new(NoOp),
                Square::new(EncounterLand),
                Square::new(NoOp),
                Square::new(NoOp),
                reward(10),
                // === Tiles 10-19: into the caves ===
                Square::new(EncounterLand),
                Square::new(NoOp),
                Square::new(EncounterCave),
                Square::new(NoOp),
                reward(5),
                Square::new(EncounterCave),
                Square::new(NoOp),
                Square::new(EncounterCave),
                Square::new(NoOp),
                reward(20),
                // === Tiles 20-29: the waterfront ===
                Square::new(NoOp),
                Square::new(EncounterWater),
                Square::new(NoOp),
                Square::new(EncounterWater),
                reward(10),
                Square::new(NoOp),
                Square::new(EncounterWater),
                Square::new(NoOp),
                Square::new(EncounterLand),
                reward(20),
                // === Tiles 30-39: mixed terrain ===
                Square::new(EncounterCave),
                Square::new(NoOp),
                Square::new(EncounterLand),
                Square::new(NoOp),
                reward(25),
                Square::new(EncounterWater),
                Square::new(NoOp),
                Square::new(EncounterCave),
                Square::new(NoOp),
                reward(30),
                // === Tiles 40-49: the home stretch, ending on the hazard ===
                Square::new(EncounterLand),
                Square::new(EncounterCave),
                Square::new(NoOp),
                Square::new(EncounterWater),
                reward(50),
                Square::new(EncounterCave),
                Square::new(NoOp),
                Square::new(EncounterWater),
                reward(100),
                Square::new(Hazard),
            ],
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_boards_validate() {
        let set = BoardSet::builtin().expect("built-in boards must be valid");
        let board = set.find(REFERENCE_BOARD).expect("reference board present");
        assert_eq!(board.len(), BOARD_SQUARES);
        assert_eq!(board.square(board.last_index()).kind, SquareKind::Hazard);
    }

    #[test]
    fn test_wrong_size_rejected() {
        let squares = vec![Square::new(SquareKind::Hazard); 10];
        let err = Board::new("short", squares).unwrap_err();
        assert_eq!(
            err,
            BoardError::WrongSize {
                name: "short".to_string(),
                expected: BOARD_SQUARES,
                found: 10,
            }
        );
    }

    #[test]
    fn test_missing_terminal_hazard_rejected() {
        let squares = vec![Square::new(SquareKind::NoOp); BOARD_SQUARES];
        let err = Board::new("no-end", squares).unwrap_err();
        assert_eq!(
            err,
            BoardError::MissingTerminalHazard {
                name: "no-end".to_string(),
            }
        );
    }

    #[test]
    fn test_round_trips_through_ron() {
        let def = builtin_board_defs();
        let text = ron::ser::to_string(&def).expect("serialize");
        let parsed: BoardSetDef = ron::from_str(&text).expect("parse");
        let set = BoardSet::from_def(parsed).expect("validate");
        assert_eq!(set.boards().len(), 1);
        // Reward parameters survive the trip.
        let board = set.find(REFERENCE_BOARD).unwrap();
        assert_eq!(board.square(4).kind, SquareKind::Reward);
        assert_eq!(board.square(4).params[0], 5);
    }
}
