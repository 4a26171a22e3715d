//! Piece shapes and the stock catalogue.
//!
//! A piece is stored like a board row (one bitmask per row) but is
//! rectangular rather than square, and always cropped to the minimal
//! bounding box of its filled cells.

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashSet;

use crate::error::{Error, Result, MAX_SIZE};
use crate::grid::{parse_matrix, row_to_mask, Rows, EMPTY, FILLED};

/// A (row, column) cell coordinate.
pub type Cell = (usize, usize);

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Piece {
    height: usize,
    width: usize,
    rows: Rows,
}

impl Piece {
    /// Builds a piece from a row-major matrix.
    ///
    /// The shape may be drawn anywhere inside the matrix; empty border rows
    /// and columns are trimmed so the result is its bounding box.
    pub fn from_matrix<R: AsRef<[bool]>>(matrix: &[R]) -> Result<Self> {
        let expected = matrix.first().map_or(0, |row| row.as_ref().len());
        if expected > MAX_SIZE {
            return Err(Error::PieceTooLarge { width: expected });
        }

        let mut masks = Rows::with_capacity(matrix.len());
        for (row, cells) in matrix.iter().enumerate() {
            let cells = cells.as_ref();
            if cells.len() != expected {
                return Err(Error::JaggedPiece {
                    row,
                    len: cells.len(),
                    expected,
                });
            }
            masks.push(row_to_mask(cells));
        }

        Self::cropped(&masks).ok_or(Error::EmptyPiece)
    }

    /// Builds a piece from absolute cell coordinates.
    pub fn from_cells(cells: &[Cell]) -> Result<Self> {
        let (Some(top), Some(left)) = (
            cells.iter().map(|&(row, _)| row).min(),
            cells.iter().map(|&(_, col)| col).min(),
        ) else {
            return Err(Error::EmptyPiece);
        };
        let bottom = cells.iter().map(|&(row, _)| row).max().unwrap_or(top);
        let right = cells.iter().map(|&(_, col)| col).max().unwrap_or(left);

        let width = right - left + 1;
        if width > MAX_SIZE {
            return Err(Error::PieceTooLarge { width });
        }

        let mut rows: Rows = smallvec::smallvec![0; bottom - top + 1];
        for &(row, col) in cells {
            rows[row - top] |= 1 << (col - left);
        }

        Ok(Self {
            height: rows.len(),
            width,
            rows,
        })
    }

    /// Crops row masks to the bounding box of their set bits.
    fn cropped(masks: &[u64]) -> Option<Self> {
        let top = masks.iter().position(|&row| row != 0)?;
        let bottom = masks.iter().rposition(|&row| row != 0)?;
        let occupied = masks.iter().fold(0, |acc, &row| acc | row);

        let left = occupied.trailing_zeros() as usize;
        let right = 63 - occupied.leading_zeros() as usize;

        Some(Self {
            height: bottom - top + 1,
            width: right - left + 1,
            rows: masks[top..=bottom].iter().map(|&row| row >> left).collect(),
        })
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Row bitmasks, top row first, bit 0 at the left edge.
    #[inline]
    pub fn rows(&self) -> &[u64] {
        &self.rows
    }

    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        col < self.width && self.rows.get(row).is_some_and(|mask| (mask >> col) & 1 == 1)
    }

    /// Number of filled cells.
    pub fn cell_count(&self) -> u32 {
        self.rows.iter().map(|row| row.count_ones()).sum()
    }

    /// Filled cells relative to the top-left corner, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height)
            .flat_map(move |row| (0..self.width).map(move |col| (row, col)))
            .filter(|&(row, col)| self.is_filled(row, col))
    }

    pub fn to_matrix(&self) -> Vec<Vec<bool>> {
        (0..self.height)
            .map(|row| (0..self.width).map(|col| self.is_filled(row, col)).collect())
            .collect()
    }
}

impl FromStr for Piece {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        Self::from_matrix(&parse_matrix(text)?)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let cell = if self.is_filled(row, col) { FILLED } else { EMPTY };
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Splits a grid into its 4-connected shapes.
///
/// Shapes are returned in row-major order of their first cell, each cropped
/// to its bounding box. Rows may differ in length.
pub fn extract_shapes<R: AsRef<[bool]>>(grid: &[R]) -> Result<Vec<Piece>> {
    let filled = |row: usize, col: usize| {
        grid.get(row)
            .and_then(|cells| cells.as_ref().get(col).copied())
            .unwrap_or(false)
    };

    let mut visited: FxHashSet<Cell> = FxHashSet::default();
    let mut shapes = Vec::new();

    for (row, cells) in grid.iter().enumerate() {
        for col in 0..cells.as_ref().len() {
            if !filled(row, col) || !visited.insert((row, col)) {
                continue;
            }

            // flood fill from the first unvisited cell of this shape
            let mut stack = vec![(row, col)];
            let mut shape = vec![(row, col)];
            while let Some((r, c)) = stack.pop() {
                let neighbours = [
                    r.checked_sub(1).map(|up| (up, c)),
                    Some((r + 1, c)),
                    c.checked_sub(1).map(|left| (r, left)),
                    Some((r, c + 1)),
                ];
                for (nr, nc) in neighbours.into_iter().flatten() {
                    if filled(nr, nc) && visited.insert((nr, nc)) {
                        shape.push((nr, nc));
                        stack.push((nr, nc));
                    }
                }
            }

            shapes.push(Piece::from_cells(&shape)?);
        }
    }

    Ok(shapes)
}

/// Stock shapes from the game's piece pool, drawn top row first.
pub const SHAPES: &[(&str, &[&str])] = &[
    ("dot", &["#"]),
    ("domino", &["##"]),
    ("domino-v", &["#", "#"]),
    ("line3", &["###"]),
    ("line3-v", &["#", "#", "#"]),
    ("line4", &["####"]),
    ("line4-v", &["#", "#", "#", "#"]),
    ("line5", &["#####"]),
    ("line5-v", &["#", "#", "#", "#", "#"]),
    ("square", &["##", "##"]),
    ("big-square", &["###", "###", "###"]),
    ("corner", &["#.", "##"]),
    ("big-corner", &["###", "#..", "#.."]),
    ("ell", &["#.", "#.", "##"]),
    ("tee", &["###", ".#."]),
    ("ess", &[".##", "##."]),
    ("zed", &["##.", ".##"]),
];

/// Looks up a stock shape by name.
pub fn stock(name: &str) -> Option<Piece> {
    let (_, rows) = SHAPES.iter().find(|(shape, _)| *shape == name)?;
    let matrix: Vec<Vec<bool>> = rows
        .iter()
        .map(|row| row.chars().map(|ch| ch == FILLED).collect())
        .collect();
    Piece::from_matrix(&matrix).ok()
}
