//! Re-applies a chosen placement order to recover intermediate boards.

use crate::engine::{clear_lines, try_place};
use crate::error::{Error, Result};
use crate::grid::Board;
use crate::pieces::Piece;
use crate::solver::Placement;

/// The board after one placement of a replayed order.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Step {
    pub placement: Placement,
    /// Lines cleared by this placement.
    pub lines: u32,
    /// Board after the placement and its clears.
    pub board: Board,
}

/// Replays `placements` from `board`, validating each one.
///
/// Unlike the search, the placements here come from the caller, so an
/// unknown piece or an illegal anchor is reported rather than trusted.
pub fn replay(board: &Board, pieces: &[Piece], placements: &[Placement]) -> Result<Vec<Step>> {
    let mut current = board.clone();
    let mut steps = Vec::with_capacity(placements.len());

    for &placement in placements {
        let piece = pieces.get(placement.piece).ok_or(Error::UnknownPiece {
            index: placement.piece,
            count: pieces.len(),
        })?;

        let placed =
            try_place(&current, piece, placement.position).ok_or(Error::InvalidPlacement {
                piece: placement.piece,
                row: placement.position.row,
                col: placement.position.col,
            })?;
        let (cleared, lines) = clear_lines(&placed);

        steps.push(Step {
            placement,
            lines,
            board: cleared.clone(),
        });
        current = cleared;
    }

    Ok(steps)
}
