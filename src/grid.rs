//! Square board representation.
//!
//! Each row is a `u64` bitmask where bit `c` is set when column `c` is
//! filled. Row 0 is the top row. Boards are values: every operation that
//! changes cells returns a new board and leaves the input untouched.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::error::{Error, Result, MAX_SIZE};

/// Row bitmasks, stored inline for boards and pieces up to 8 rows tall.
pub type Rows = SmallVec<[u64; 8]>;

/// Character used to draw a filled cell.
pub const FILLED: char = '#';
/// Character used to draw an empty cell.
pub const EMPTY: char = '.';

/// Returns a mask with the lowest `width` bits set.
#[inline(always)]
pub const fn full_mask(width: usize) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

/// Parses one row of cell characters.
///
/// `#`, `X`, `x` and `1` are filled; `.`, `0` and `_` are empty. Returns the
/// first unrecognized character on failure.
pub fn parse_row(line: &str) -> std::result::Result<Vec<bool>, char> {
    line.chars()
        .map(|ch| match ch {
            '#' | 'X' | 'x' | '1' => Ok(true),
            '.' | '0' | '_' => Ok(false),
            other => Err(other),
        })
        .collect()
}

/// Parses a block of text into a cell matrix, one row per non-blank line.
pub(crate) fn parse_matrix(text: &str) -> Result<Vec<Vec<bool>>> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line, row)| {
            parse_row(row).map_err(|ch| Error::Parse {
                line,
                message: format!("unexpected cell character {ch:?}"),
            })
        })
        .collect()
}

/// An N×N board of filled and empty cells.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Board {
    size: usize,
    rows: Rows,
}

impl Board {
    /// Side length of the boards the game is played on.
    pub const DEFAULT_SIZE: usize = 8;

    /// Creates an empty board of the given side length.
    pub fn empty(size: usize) -> Result<Self> {
        check_size(size)?;
        Ok(Self {
            size,
            rows: SmallVec::from_elem(0, size),
        })
    }

    /// Builds a board from a row-major matrix, rejecting non-square input.
    pub fn from_matrix<R: AsRef<[bool]>>(matrix: &[R]) -> Result<Self> {
        let size = matrix.len();
        check_size(size)?;

        let mut rows = Rows::with_capacity(size);
        for (row, cells) in matrix.iter().enumerate() {
            let cells = cells.as_ref();
            if cells.len() != size {
                return Err(Error::NotSquare {
                    row,
                    len: cells.len(),
                    expected: size,
                });
            }
            rows.push(row_to_mask(cells));
        }

        Ok(Self { size, rows })
    }

    /// Wraps row masks that are already known to fit a `size`×`size` board.
    pub(crate) fn from_rows(size: usize, rows: Rows) -> Self {
        debug_assert_eq!(rows.len(), size);
        debug_assert!(rows.iter().all(|&row| row & !full_mask(size) == 0));
        Self { size, rows }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row bitmasks, top row first.
    #[inline]
    pub fn rows(&self) -> &[u64] {
        &self.rows
    }

    /// Mask of a completely filled row on this board.
    #[inline]
    pub fn full_row(&self) -> u64 {
        full_mask(self.size)
    }

    /// Returns whether the cell at (`row`, `col`) is filled.
    ///
    /// Out-of-range coordinates read as empty.
    #[inline]
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        col < self.size && self.rows.get(row).is_some_and(|mask| (mask >> col) & 1 == 1)
    }

    /// Number of filled cells.
    pub fn filled_count(&self) -> u32 {
        self.rows.iter().map(|row| row.count_ones()).sum()
    }

    pub fn is_clear(&self) -> bool {
        self.rows.iter().all(|&row| row == 0)
    }

    /// Converts back to the nested matrix form used at the crate boundary.
    pub fn to_matrix(&self) -> Vec<Vec<bool>> {
        (0..self.size)
            .map(|row| (0..self.size).map(|col| self.is_filled(row, col)).collect())
            .collect()
    }
}

impl FromStr for Board {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        Self::from_matrix(&parse_matrix(text)?)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let cell = if self.is_filled(row, col) { FILLED } else { EMPTY };
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Packs a row of cells into a bitmask, bit `c` for column `c`.
///
/// Callers guarantee `cells.len() <= 64`.
pub(crate) fn row_to_mask(cells: &[bool]) -> u64 {
    cells
        .iter()
        .enumerate()
        .filter(|(_, &filled)| filled)
        .fold(0, |mask, (col, _)| mask | 1 << col)
}

fn check_size(size: usize) -> Result<()> {
    match size {
        0 => Err(Error::EmptyBoard),
        size if size > MAX_SIZE => Err(Error::BoardTooLarge { size }),
        _ => Ok(()),
    }
}
