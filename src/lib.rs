//! Line-Clear Puzzle Solver Library
//!
//! Finds where to drop a small batch of pieces on a square board so that
//! the most rows and columns are completed and cleared, using a bounded
//! lookahead search.
//!
//! The core is split into the move generator ([`movegen`]), the placement
//! and line-clear engine ([`engine`]) and the lookahead search ([`solver`]).
//! [`replay`] and [`report`] turn a search result back into a readable
//! sequence of boards, and [`puzzle`] reads puzzles from text files.

pub mod engine;
pub mod error;
pub mod grid;
pub mod movegen;
pub mod pieces;
pub mod puzzle;
pub mod replay;
pub mod report;
pub mod solver;

pub use error::{Error, Result};
pub use grid::Board;
pub use movegen::Position;
pub use pieces::Piece;
pub use puzzle::Puzzle;
pub use replay::{replay, Step};
pub use solver::{solve, solve_matrices, Placement, SearchConfig, SearchResult, Solver};
