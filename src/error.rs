//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Largest supported board side and piece width (one `u64` per row).
pub const MAX_SIZE: usize = 64;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("board has no cells")]
    EmptyBoard,

    #[error("board is not square: row {row} has {len} cells, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("board size {size} exceeds the maximum of {max}", max = MAX_SIZE)]
    BoardTooLarge { size: usize },

    #[error("piece has no filled cells")]
    EmptyPiece,

    #[error("piece is jagged: row {row} has {len} cells, expected {expected}")]
    JaggedPiece {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("piece width {width} exceeds the maximum of {max}", max = MAX_SIZE)]
    PieceTooLarge { width: usize },

    #[error("piece {index} is malformed")]
    MalformedPiece {
        index: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("no piece with index {index} (batch has {count})")]
    UnknownPiece { index: usize, count: usize },

    #[error("piece {piece} cannot be placed at row {row}, column {col}")]
    InvalidPlacement { piece: usize, row: usize, col: usize },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("[{section}] section at line {line} is invalid")]
    InvalidSection {
        section: &'static str,
        line: usize,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attaches the batch index of the piece that failed validation.
    pub fn in_piece(self, index: usize) -> Self {
        Error::MalformedPiece {
            index,
            source: Box::new(self),
        }
    }
}
