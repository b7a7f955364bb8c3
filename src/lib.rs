//! Pachisi - A turn-based board-traversal minigame
//!
//! Roll the die, walk the board, and survive whatever square
//! you land on.

pub mod audio;
pub mod board;
pub mod game;
pub mod host;
pub mod ui;

// Re-export commonly used types
pub use board::{Board, BoardSet, Square, SquareKind, BOARD_SQUARES};
pub use game::{MinigameController, Phase, SessionConfig, TickOutcome};
