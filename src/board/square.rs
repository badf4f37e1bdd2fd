/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Context, Result};

/// Represents a single square on an `8x8` chess board.
///
/// A square is a `(row, column)` pair with both components in `[0, 7]`.
/// `(0, 0)` is a fixed corner of the board: row `0` is the far side from the
/// seated player's point of view and row `7` is the near side, so the seated
/// player's pawns travel toward row `0`.
///
/// Internally encoded as `row * 8 + column`:
/// ```text
/// 0|  0  1  2  3  4  5  6  7
/// 1|  8  9 10 11 12 13 14 15
/// 2| 16 17 18 19 20 21 22 23
/// 3| 24 25 26 27 28 29 30 31
/// 4| 32 33 34 35 36 37 38 39
/// 5| 40 41 42 43 44 45 46 47
/// 6| 48 49 50 51 52 53 54 55
/// 7| 56 57 58 59 60 61 62 63
///  +------------------------
///     0  1  2  3  4  5  6  7
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Square(u8);

impl Square {
    /// Number of rows on the board.
    pub const ROWS: u8 = 8;

    /// Number of columns on the board.
    pub const COLS: u8 = 8;

    /// Total number of squares on the board.
    pub const COUNT: usize = Self::ROWS as usize * Self::COLS as usize;

    /// Creates a new [`Square`] from the provided row and column.
    ///
    /// # Panics
    /// If either `row` or `col` is greater than `7`.
    ///
    /// # Example
    /// ```
    /// # use ruy::Square;
    /// let sq = Square::new(6, 4);
    /// assert_eq!(sq.row(), 6);
    /// assert_eq!(sq.col(), 4);
    /// ```
    #[inline(always)]
    pub const fn new(row: u8, col: u8) -> Self {
        assert!(
            row < Self::ROWS && col < Self::COLS,
            "Square coordinates must be in [0, 7]"
        );
        Self(row * Self::COLS + col)
    }

    /// The row of this [`Square`], in `[0, 7]`.
    #[inline(always)]
    pub const fn row(self) -> u8 {
        self.0 >> 3
    }

    /// The column of this [`Square`], in `[0, 7]`.
    #[inline(always)]
    pub const fn col(self) -> u8 {
        self.0 & 7
    }

    /// The flat index of this [`Square`], in `[0, 63]`.
    ///
    /// Useful for indexing into lists.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the square `rows` and `cols` away from this one, if it is
    /// still on the board.
    ///
    /// # Example
    /// ```
    /// # use ruy::Square;
    /// assert_eq!(Square::new(6, 4).offset(-2, 0), Some(Square::new(4, 4)));
    /// assert_eq!(Square::new(0, 0).offset(-1, 0), None);
    /// ```
    #[inline(always)]
    pub fn offset(self, rows: i8, cols: i8) -> Option<Self> {
        let row = self.row() as i8 + rows;
        let col = self.col() as i8 + cols;

        ((0..Self::ROWS as i8).contains(&row) && (0..Self::COLS as i8).contains(&col))
            .then(|| Self::new(row as u8, col as u8))
    }

    /// Returns an iterator over all 64 squares, in row-major order.
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (0..Self::COUNT as u8).map(Self)
    }
}

impl fmt::Display for Square {
    /// A square displays as `row,col`, matching the format accepted by [`FromStr`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row(), self.col())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({}, {})", self.row(), self.col())
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;

    /// Parses a [`Square`] from a `row,col` pair such as `6,4`.
    fn from_str(s: &str) -> Result<Self> {
        let (row, col) = s
            .split_once(',')
            .with_context(|| format!("Invalid square {s:?}: expected the format \"row,col\""))?;

        let row = row
            .trim()
            .parse::<u8>()
            .with_context(|| format!("Invalid row in square {s:?}"))?;
        let col = col
            .trim()
            .parse::<u8>()
            .with_context(|| format!("Invalid column in square {s:?}"))?;

        if row >= Self::ROWS || col >= Self::COLS {
            bail!("Invalid square {s:?}: row and column must be in [0, 7]");
        }

        Ok(Self::new(row, col))
    }
}
