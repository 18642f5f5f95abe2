//! A square bitgrid with a board size chosen at runtime.
//!
//! Boards are represented as an `n×n` grid packed into a vector of `u64`
//! words. Basic accessors and bitwise set operations are provided; the
//! binary operators require both operands to share the same size.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const WORD_BITS: usize = u64::BITS as usize;

/// Errors returned by bitgrid operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    /// Row or column index is out of bounds `[0..n)`.
    #[error("index out of bounds: row={row}, col={col}")]
    IndexOutOfBounds { row: usize, col: usize },
}

/// An `n×n` bitgrid stored row-major in `u64` words.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitGrid {
    size: usize,
    words: Vec<u64>,
}

impl BitGrid {
    /// Create an empty grid (all bits cleared) of side length `size`.
    pub fn new(size: usize) -> Self {
        let bits = size * size;
        BitGrid {
            size,
            words: vec![0; bits.div_ceil(WORD_BITS)],
        }
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns true if no bits are set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Gets the bit at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Result<bool, GridError> {
        let idx = self.index(row, col)?;
        Ok((self.words[idx / WORD_BITS] >> (idx % WORD_BITS)) & 1 != 0)
    }

    /// Sets the bit at (row, col) to 1.
    pub fn set(&mut self, row: usize, col: usize) -> Result<(), GridError> {
        let idx = self.index(row, col)?;
        self.words[idx / WORD_BITS] |= 1 << (idx % WORD_BITS);
        Ok(())
    }

    /// Clears the bit at (row, col) to 0.
    pub fn clear(&mut self, row: usize, col: usize) -> Result<(), GridError> {
        let idx = self.index(row, col)?;
        self.words[idx / WORD_BITS] &= !(1 << (idx % WORD_BITS));
        Ok(())
    }

    /// True if any bit is set in both grids. Both must share the same size.
    pub fn overlaps(&self, other: &BitGrid) -> bool {
        assert_eq!(self.size, other.size, "bitgrid size mismatch");
        self.words
            .iter()
            .zip(other.words.iter())
            .any(|(a, b)| a & b != 0)
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if row >= self.size || col >= self.size {
            Err(GridError::IndexOutOfBounds { row, col })
        } else {
            Ok(row * self.size + col)
        }
    }

    /// Creates a grid from an iterator over `(row, col)` positions.
    pub fn from_positions<I>(size: usize, iter: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut grid = Self::new(size);
        for (r, c) in iter {
            grid.set(r, c)?;
        }
        Ok(grid)
    }

    /// Iterator over the set bits of the grid, row-major.
    pub fn iter_set_bits(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.size;
        (0..n * n).filter_map(move |idx| {
            let bit = (self.words[idx / WORD_BITS] >> (idx % WORD_BITS)) & 1;
            (bit != 0).then_some((idx / n, idx % n))
        })
    }
}

impl BitAnd for &BitGrid {
    type Output = BitGrid;
    fn bitand(self, rhs: Self) -> BitGrid {
        assert_eq!(self.size, rhs.size, "bitgrid size mismatch");
        BitGrid {
            size: self.size,
            words: self
                .words
                .iter()
                .zip(rhs.words.iter())
                .map(|(a, b)| a & b)
                .collect(),
        }
    }
}

impl BitOr for &BitGrid {
    type Output = BitGrid;
    fn bitor(self, rhs: Self) -> BitGrid {
        assert_eq!(self.size, rhs.size, "bitgrid size mismatch");
        BitGrid {
            size: self.size,
            words: self
                .words
                .iter()
                .zip(rhs.words.iter())
                .map(|(a, b)| a | b)
                .collect(),
        }
    }
}

impl BitAndAssign<&BitGrid> for BitGrid {
    fn bitand_assign(&mut self, rhs: &BitGrid) {
        assert_eq!(self.size, rhs.size, "bitgrid size mismatch");
        for (a, b) in self.words.iter_mut().zip(rhs.words.iter()) {
            *a &= b;
        }
    }
}

impl BitOrAssign<&BitGrid> for BitGrid {
    fn bitor_assign(&mut self, rhs: &BitGrid) {
        assert_eq!(self.size, rhs.size, "bitgrid size mismatch");
        for (a, b) in self.words.iter_mut().zip(rhs.words.iter()) {
            *a |= b;
        }
    }
}

impl fmt::Debug for BitGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitGrid<{}>:", self.size)?;
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for BitGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.size {
            for c in 0..self.size {
                let bit = if self.get(r, c).unwrap_or(false) {
                    '■'
                } else {
                    '□'
                };
                write!(f, "{} ", bit)?;
            }
            if r + 1 < self.size {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
