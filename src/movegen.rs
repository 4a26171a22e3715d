//! Legal placement enumeration.
//!
//! A piece fits at an anchor when every filled piece cell lands on an
//! in-bounds, empty board cell. Checking a row is a single shift and AND
//! against the board's row mask.

use crate::grid::Board;
use crate::pieces::Piece;

/// Top-left anchor of a piece on the board.
///
/// Ordering is row-major, the order in which anchors are generated.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Returns whether `piece` can be placed with its top-left corner at `at`.
#[inline]
pub fn fits(board: &Board, piece: &Piece, at: Position) -> bool {
    let size = board.size();
    if at.row + piece.height() > size || at.col + piece.width() > size {
        return false;
    }

    piece
        .rows()
        .iter()
        .zip(&board.rows()[at.row..])
        .all(|(&cells, &occupied)| (cells << at.col) & occupied == 0)
}

/// Lazily yields every anchor where `piece` fits, in row-major order.
pub fn positions<'a>(board: &'a Board, piece: &'a Piece) -> impl Iterator<Item = Position> + 'a {
    // number of anchors per axis that keep the bounding box on the board
    let rows = (board.size() + 1).saturating_sub(piece.height());
    let cols = (board.size() + 1).saturating_sub(piece.width());

    (0..rows)
        .flat_map(move |row| (0..cols).map(move |col| Position::new(row, col)))
        .filter(move |&at| fits(board, piece, at))
}

/// Collects every legal anchor for `piece`; empty when it fits nowhere.
pub fn legal_positions(board: &Board, piece: &Piece) -> Vec<Position> {
    positions(board, piece).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::stock;

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    #[test]
    fn test_empty_board_allows_every_in_bounds_anchor() {
        let board = Board::empty(4).unwrap();
        let square = stock("square").unwrap();

        let found = legal_positions(&board, &square);
        assert_eq!(found.len(), 9);
        assert_eq!(found.first(), Some(&Position::new(0, 0)));
        assert_eq!(found.last(), Some(&Position::new(2, 2)));
    }

    #[test]
    fn test_positions_are_row_major() {
        let board = Board::empty(5).unwrap();
        let tee = stock("tee").unwrap();

        let found = legal_positions(&board, &tee);
        let mut sorted = found.clone();
        sorted.sort();
        assert_eq!(found, sorted);
    }

    #[test]
    fn test_single_full_row_scenario_offers_gap() {
        let board = board("##.\n...\n...");
        let dot = stock("dot").unwrap();

        let found = legal_positions(&board, &dot);
        assert_eq!(found.len(), 7);
        assert!(found.contains(&Position::new(0, 2)));
        assert!(!found.contains(&Position::new(0, 0)));
    }

    #[test]
    fn test_full_board_has_no_positions() {
        let board = board("##\n##");
        let dot = stock("dot").unwrap();
        assert!(legal_positions(&board, &dot).is_empty());
    }

    #[test]
    fn test_empty_piece_cells_may_overlap_filled_board_cells() {
        // the corner's missing top-right cell sits on the filled board cell
        let board = board(".#\n..");
        let corner = stock("corner").unwrap();
        assert_eq!(legal_positions(&board, &corner), vec![Position::new(0, 0)]);
    }

    #[test]
    fn test_piece_larger_than_board_has_no_positions() {
        let board = Board::empty(3).unwrap();
        let line = stock("line4").unwrap();
        assert!(legal_positions(&board, &line).is_empty());
        assert!(!fits(&board, &line, Position::new(0, 0)));
    }

    #[test]
    fn test_fits_rejects_out_of_bounds_anchor() {
        let board = Board::empty(3).unwrap();
        let domino = stock("domino").unwrap();
        assert!(fits(&board, &domino, Position::new(2, 1)));
        assert!(!fits(&board, &domino, Position::new(2, 2)));
        assert!(!fits(&board, &domino, Position::new(3, 0)));
    }

    #[test]
    fn test_full_width_board_shifts_safely() {
        let row = ".".repeat(64);
        let text = vec![row; 64].join("\n");
        let board = board(&text);
        let dot = stock("dot").unwrap();
        assert!(fits(&board, &dot, Position::new(63, 63)));
        assert_eq!(legal_positions(&board, &dot).len(), 64 * 64);
    }
}
