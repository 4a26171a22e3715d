//! Bounded-depth lookahead search over piece placements.
//!
//! Pieces are placed in batch order; the search only chooses where each
//! one goes. Every branch works on its own board value, so nothing is
//! undone when the search backs out of a branch.
//!
//! Branch selection:
//! - the highest total score at the end of the branch wins
//! - ties keep the branch found first (row-major anchor order)
//! - a branch that had to skip a piece for lack of room loses to any
//!   branch that did not

use log::{debug, trace};

use crate::engine::apply;
use crate::error::Result;
use crate::grid::Board;
use crate::movegen::{positions, Position};
use crate::pieces::Piece;

/// Number of pieces the search looks ahead by default.
pub const DEFAULT_LOOKAHEAD: usize = 3;

/// Search tuning knobs.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SearchConfig {
    /// Pieces explored before the search stops. Pieces past this horizon
    /// are left unplaced.
    pub depth: usize,
    /// Anchors explored per piece, taken in row-major order. `None`
    /// explores all of them.
    pub max_positions: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_LOOKAHEAD,
            max_positions: None,
        }
    }
}

/// One chosen move: which piece of the batch, and where it goes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Placement {
    pub piece: usize,
    pub position: Position,
}

/// Outcome of a search.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SearchResult {
    /// Board after every placement and clear.
    pub board: Board,
    /// Lines cleared along the chosen branch.
    pub score: u32,
    /// Placements in the order they are applied.
    pub placements: Vec<Placement>,
}

/// A node of the search tree.
#[derive(Clone)]
struct SearchState {
    board: Board,
    next_piece: usize,
    score: u32,
    placements: Vec<Placement>,
    stalled: bool,
}

impl SearchState {
    /// Returns whether this finished branch should replace `best`.
    fn beats(&self, best: &SearchState) -> bool {
        match (self.stalled, best.stalled) {
            (false, true) => true,
            (true, false) => false,
            _ => self.score > best.score,
        }
    }

    /// Follows the branch that places `piece` at `at`.
    fn child(&self, piece: &Piece, at: Position) -> SearchState {
        let (board, lines) = apply(&self.board, piece, at);

        let mut placements = Vec::with_capacity(self.placements.len() + 1);
        placements.extend_from_slice(&self.placements);
        placements.push(Placement {
            piece: self.next_piece,
            position: at,
        });

        SearchState {
            board,
            next_piece: self.next_piece + 1,
            score: self.score + lines,
            placements,
            stalled: self.stalled,
        }
    }
}

impl From<SearchState> for SearchResult {
    fn from(state: SearchState) -> Self {
        Self {
            board: state.board,
            score: state.score,
            placements: state.placements,
        }
    }
}

/// Lookahead solver with a fixed configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct Solver {
    config: SearchConfig,
}

impl Solver {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Chooses placements for `pieces`, in order, maximizing lines cleared.
    pub fn solve(&self, board: &Board, pieces: &[Piece]) -> SearchResult {
        let mut search = Search {
            pieces,
            max_positions: self.config.max_positions.map_or(usize::MAX, |cap| cap.max(1)),
            nodes: 0,
        };

        let root = SearchState {
            board: board.clone(),
            next_piece: 0,
            score: 0,
            placements: Vec::new(),
            stalled: false,
        };
        let best = search.explore(root, self.config.depth);

        debug!(
            "explored {} nodes: score {}, placed {} of {} pieces",
            search.nodes,
            best.score,
            best.placements.len(),
            pieces.len()
        );
        best.into()
    }
}

/// Per-call search context.
struct Search<'a> {
    pieces: &'a [Piece],
    max_positions: usize,
    nodes: u64,
}

impl Search<'_> {
    fn explore(&mut self, state: SearchState, depth: usize) -> SearchState {
        self.nodes += 1;

        let index = state.next_piece;
        if index == self.pieces.len() || depth == 0 {
            return state;
        }

        let pieces = self.pieces;
        let piece = &pieces[index];
        let mut best: Option<SearchState> = None;

        for at in positions(&state.board, piece).take(self.max_positions) {
            let outcome = self.explore(state.child(piece, at), depth - 1);
            trace!(
                "piece {index} at ({}, {}) leads to score {}",
                at.row,
                at.col,
                outcome.score
            );

            if best.as_ref().map_or(true, |best| outcome.beats(best)) {
                best = Some(outcome);
            }
        }

        match best {
            Some(best) => best,
            None => {
                debug!("piece {index} has no legal position, skipping it");
                let skipped = SearchState {
                    next_piece: index + 1,
                    stalled: true,
                    ..state
                };
                self.explore(skipped, depth - 1)
            }
        }
    }
}

/// Solves with [`SearchConfig::default`].
pub fn solve(board: &Board, pieces: &[Piece]) -> SearchResult {
    Solver::default().solve(board, pieces)
}

/// Validates raw matrices and solves with the given configuration.
///
/// Malformed input is rejected before any search starts; piece errors carry
/// the piece's batch index.
pub fn solve_matrices(
    board: &[Vec<bool>],
    pieces: &[Vec<Vec<bool>>],
    config: SearchConfig,
) -> Result<SearchResult> {
    let board = Board::from_matrix(board)?;
    let pieces = pieces
        .iter()
        .enumerate()
        .map(|(index, matrix)| Piece::from_matrix(matrix).map_err(|err| err.in_piece(index)))
        .collect::<Result<Vec<_>>>()?;

    Ok(Solver::new(config).solve(&board, &pieces))
}
