//! Human-readable rendering of boards and placement sequences.

use crate::error::Result;
use crate::grid::{Board, EMPTY, FILLED};
use crate::pieces::Piece;
use crate::replay::{replay, Step};
use crate::solver::SearchResult;

/// Character used to highlight the cells of the piece just placed.
pub const PLACED: char = '@';

pub fn format_board(board: &Board) -> String {
    board.to_string()
}

/// Draws the board after `step`, highlighting the cells `piece` covered.
///
/// Highlighted cells are drawn even if the placement cleared them. Panics if
/// `piece` does not lie inside the board at the step's anchor.
pub fn format_step(step: &Step, piece: &Piece) -> String {
    let size = step.board.size();
    let at = step.placement.position;
    let mut grid: Vec<Vec<char>> = (0..size)
        .map(|row| {
            (0..size)
                .map(|col| if step.board.is_filled(row, col) { FILLED } else { EMPTY })
                .collect()
        })
        .collect();
    for (row, col) in piece.cells() {
        grid[at.row + row][at.col + col] = PLACED;
    }

    let mut output = String::with_capacity(size * (size + 1));
    for row in grid {
        output.extend(row);
        output.push('\n');
    }
    output
}

/// Renders a full solution: one section per placement, then the final board.
///
/// Anchors are shown as (column, row) counted from 1 at the bottom-left
/// corner, the way the board is read on screen.
pub fn format_report(board: &Board, pieces: &[Piece], result: &SearchResult) -> Result<String> {
    if result.placements.is_empty() {
        return Ok("No valid placement found.\n".to_string());
    }

    let steps = replay(board, pieces, &result.placements)?;
    let size = board.size();
    let mut output = String::new();

    for step in &steps {
        let at = step.placement.position;
        output.push_str(&format!(
            "Placing piece {} at ({}, {}):\n",
            step.placement.piece + 1,
            at.col + 1,
            size - at.row
        ));
        output.push_str(&format_step(step, &pieces[step.placement.piece]));
        match step.lines {
            0 => {}
            1 => output.push_str("Cleared 1 line.\n"),
            lines => output.push_str(&format!("Cleared {lines} lines.\n")),
        }
        output.push('\n');
    }

    output.push_str(&format!("Final board (score {}):\n", result.score));
    output.push_str(&format_board(&result.board));
    Ok(output)
}
