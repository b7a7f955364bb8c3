//! Board module - Static board data and validation

mod square;
mod table;

pub use square::{Square, SquareKind, SQUARE_PARAMS};
pub use table::{
    builtin_board_defs, Board, BoardDef, BoardError, BoardSet, BoardSetDef, BOARD_FILE,
    BOARD_SQUARES, REFERENCE_BOARD,
};
