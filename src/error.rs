//! Error types for the tictactoe-space crate

use thiserror::Error;

/// Main error type for state space construction and solving
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("illegal move: position {position} is already occupied on board {board}")]
    IllegalMove { position: usize, board: String },

    #[error("position {position} is out of bounds (must be 0-8)")]
    InvalidPosition { position: usize },

    #[error("cannot expand ply {ply}: tree frontier is ply {frontier} and the last expandable ply is 8")]
    LevelOutOfRange { ply: usize, frontier: usize },

    #[error("tree must be expanded to ply 9 before solving (last built ply is {last_ply})")]
    IncompleteTree { last_ply: usize },

    #[error("non-terminal board {board} at ply {ply} has no children")]
    InconsistentTree { ply: usize, board: String },

    #[error("child {child} of board {board} at ply {ply} has no resolved value")]
    UnresolvedChild {
        ply: usize,
        board: String,
        child: usize,
    },

    #[error("board {board} at ply {ply} is already resolved as {existing}, refusing to assign {computed}")]
    ValueConflict {
        ply: usize,
        board: String,
        existing: String,
        computed: String,
    },

    #[error("board string has the wrong length: expected {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid piece counts: X={x_count}, O={o_count} (X must be equal or ahead by 1)")]
    InvalidPieceCounts { x_count: usize, o_count: usize },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
