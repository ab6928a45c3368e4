/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{anyhow, bail, Result};

use super::{is_valid_coordinate, wraps_edge, NUM_SQUARES, SQUARES_PER_ROW};

/// A linear index of a square on the board, in `[0, 64)`.
///
/// Coordinate `0` is a1, `7` is h1, `56` is a8 and `63` is h8.
/// Column `0` is the a-file and row `0` is the first rank.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Coordinate(u8);

impl Coordinate {
    pub const A1: Self = Self(0);
    pub const B1: Self = Self(1);
    pub const C1: Self = Self(2);
    pub const D1: Self = Self(3);
    pub const E1: Self = Self(4);
    pub const F1: Self = Self(5);
    pub const G1: Self = Self(6);
    pub const H1: Self = Self(7);
    pub const A8: Self = Self(56);
    pub const B8: Self = Self(57);
    pub const C8: Self = Self(58);
    pub const D8: Self = Self(59);
    pub const E8: Self = Self(60);
    pub const F8: Self = Self(61);
    pub const G8: Self = Self(62);
    pub const H8: Self = Self(63);

    /// Creates a [`Coordinate`] from a linear index, if it lies on the board.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::Coordinate;
    /// assert_eq!(Coordinate::new(4), Some(Coordinate::E1));
    /// assert!(Coordinate::new(64).is_none());
    /// assert!(Coordinate::new(-1).is_none());
    /// ```
    #[inline(always)]
    pub const fn new(coordinate: i32) -> Option<Self> {
        if is_valid_coordinate(coordinate) {
            Some(Self(coordinate as u8))
        } else {
            None
        }
    }

    /// Creates a [`Coordinate`] from a `usize` index, if it lies on the board.
    #[inline(always)]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < NUM_SQUARES {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Creates a [`Coordinate`] from a column (0 is the a-file) and a row (0 is the first rank).
    ///
    /// # Example
    /// ```
    /// # use gambit_types::Coordinate;
    /// assert_eq!(Coordinate::from_parts(4, 0), Some(Coordinate::E1));
    /// assert_eq!(Coordinate::from_parts(7, 7), Some(Coordinate::H8));
    /// assert!(Coordinate::from_parts(8, 0).is_none());
    /// ```
    #[inline(always)]
    pub const fn from_parts(column: u8, row: u8) -> Option<Self> {
        if column < SQUARES_PER_ROW as u8 && row < SQUARES_PER_ROW as u8 {
            Some(Self(row * SQUARES_PER_ROW as u8 + column))
        } else {
            None
        }
    }

    /// Parses a [`Coordinate`] from its algebraic name, such as `"e4"`.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::Coordinate;
    /// assert_eq!(Coordinate::from_uci("a1").unwrap(), Coordinate::A1);
    /// assert_eq!(Coordinate::from_uci("h8").unwrap().index(), 63);
    /// assert!(Coordinate::from_uci("i9").is_err());
    /// ```
    pub fn from_uci(uci: &str) -> Result<Self> {
        let mut chars = uci.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            bail!("Invalid coordinate {uci:?}: must be a file and a rank, such as \"e4\"");
        };

        if !('a'..='h').contains(&file) {
            bail!("Invalid coordinate {uci:?}: file must be in a..=h. Got {file:?}");
        }
        if !('1'..='8').contains(&rank) {
            bail!("Invalid coordinate {uci:?}: rank must be in 1..=8. Got {rank:?}");
        }

        Self::from_parts(file as u8 - b'a', rank as u8 - b'1')
            .ok_or(anyhow!("Invalid coordinate {uci:?}"))
    }

    /// Returns the algebraic name of this [`Coordinate`], such as `"e4"`.
    pub fn to_uci(&self) -> String {
        let file = (b'a' + self.column()) as char;
        let rank = (b'1' + self.row()) as char;
        format!("{file}{rank}")
    }

    /// Fetches the inner linear index as a `usize`.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Fetches the inner linear index as an `i32`, for offset arithmetic.
    #[inline(always)]
    pub const fn value(self) -> i32 {
        self.0 as i32
    }

    /// The column of this coordinate, where 0 is the a-file.
    #[inline(always)]
    pub const fn column(self) -> u8 {
        self.0 % SQUARES_PER_ROW as u8
    }

    /// The row of this coordinate, where 0 is the first rank.
    #[inline(always)]
    pub const fn row(self) -> u8 {
        self.0 / SQUARES_PER_ROW as u8
    }

    /// Steps `offset` squares away from `self`.
    ///
    /// Returns `None` if the step leaves the board or wraps around its left or right edge.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::Coordinate;
    /// assert_eq!(Coordinate::A1.offset(8), Coordinate::new(8));
    /// assert_eq!(Coordinate::H1.offset(1), None); // would wrap onto a2
    /// assert_eq!(Coordinate::A1.offset(-8), None); // leaves the board
    /// assert_eq!(Coordinate::H1.offset(2), None); // would wrap onto b2
    /// ```
    #[inline(always)]
    pub const fn offset(self, offset: i8) -> Option<Self> {
        if wraps_edge(self.value(), offset as i32) {
            return None;
        }
        Self::new(self.value() + offset as i32)
    }

    /// Mirrors this coordinate onto the opposite side of the board (a1 <-> a8).
    #[inline(always)]
    pub const fn flipped(self) -> Self {
        Self(self.0 ^ 56)
    }

    /// An iterator over all 64 coordinates, in ascending order.
    #[inline(always)]
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..NUM_SQUARES as u8).map(Self)
    }
}

impl FromStr for Coordinate {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.to_uci(), self.0)
    }
}
