//! Placement and line clearing.
//!
//! Both steps take a board by reference and return a fresh one; callers keep
//! the input board for sibling branches.

use crate::grid::{Board, Rows};
use crate::movegen::{fits, Position};
use crate::pieces::Piece;

/// Places `piece` at `at`, or returns `None` if it does not fit there.
pub fn try_place(board: &Board, piece: &Piece, at: Position) -> Option<Board> {
    if !fits(board, piece, at) {
        return None;
    }

    let mut rows: Rows = board.rows().into();
    for (offset, &cells) in piece.rows().iter().enumerate() {
        rows[at.row + offset] |= cells << at.col;
    }

    Some(Board::from_rows(board.size(), rows))
}

/// Places `piece` at an anchor produced by the move generator.
///
/// # Panics
///
/// Panics if the piece does not fit at `at`. Anchors must come from
/// [`crate::movegen::positions`].
pub fn place(board: &Board, piece: &Piece, at: Position) -> Board {
    match try_place(board, piece, at) {
        Some(placed) => placed,
        None => panic!(
            "illegal placement of a {}x{} piece at row {}, column {}",
            piece.height(),
            piece.width(),
            at.row,
            at.col
        ),
    }
}

/// Clears every full row and column and returns the number of lines cleared.
///
/// Rows and columns are judged against the board as passed in, so a cell at
/// the crossing of a full row and a full column is cleared once and both
/// lines score.
pub fn clear_lines(board: &Board) -> (Board, u32) {
    let full = board.full_row();
    let full_cols = board.rows().iter().fold(full, |acc, &row| acc & row);

    let mut lines = full_cols.count_ones();
    let mut rows = Rows::with_capacity(board.size());
    for &row in board.rows() {
        if row == full {
            lines += 1;
            rows.push(0);
        } else {
            rows.push(row & !full_cols);
        }
    }

    (Board::from_rows(board.size(), rows), lines)
}

/// Places `piece` at `at` and clears the lines it completes.
pub fn apply(board: &Board, piece: &Piece, at: Position) -> (Board, u32) {
    clear_lines(&place(board, piece, at))
}
