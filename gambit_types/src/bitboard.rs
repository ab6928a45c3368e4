/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{BitOr, BitOrAssign},
};

use super::{Coordinate, SQUARES_PER_ROW};

/// A set of [`Coordinate`]s, stored as one bit per square.
///
/// Bit `n` is set if coordinate `n` is in the set.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(u64);

impl Bitboard {
    /// A [`Bitboard`] with no squares set.
    pub const EMPTY_BOARD: Self = Self(0);

    /// Creates a [`Bitboard`] containing only `coordinate`.
    #[inline(always)]
    pub const fn from_coordinate(coordinate: Coordinate) -> Self {
        Self(1 << coordinate.index())
    }

    /// Adds `coordinate` to the set.
    #[inline(always)]
    pub fn set(&mut self, coordinate: Coordinate) {
        self.0 |= 1 << coordinate.index();
    }

    /// Returns `true` if `coordinate` is in the set.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::{Bitboard, Coordinate};
    /// let board = Bitboard::from(Coordinate::E1);
    /// assert!(board.contains(Coordinate::E1));
    /// assert!(!board.contains(Coordinate::E8));
    /// ```
    #[inline(always)]
    pub const fn contains(&self, coordinate: Coordinate) -> bool {
        self.0 & (1 << coordinate.index()) != 0
    }

    /// Returns `true` if `self` and `other` share any squares.
    #[inline(always)]
    pub const fn intersects(&self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Number of squares in the set.
    #[inline(always)]
    pub const fn population(&self) -> u32 {
        self.0.count_ones()
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub const fn is_nonempty(&self) -> bool {
        self.0 != 0
    }

    /// Removes and returns the lowest coordinate in the set, if any.
    #[inline(always)]
    pub fn pop_lsb(&mut self) -> Option<Coordinate> {
        let lsb = self.lsb()?;
        self.0 &= self.0 - 1;
        Some(lsb)
    }

    /// Returns the lowest coordinate in the set, if any.
    #[inline(always)]
    pub const fn lsb(&self) -> Option<Coordinate> {
        if self.0 == 0 {
            None
        } else {
            Coordinate::from_index(self.0.trailing_zeros() as usize)
        }
    }

    /// An iterator over the coordinates in this set, in ascending order.
    #[inline(always)]
    pub const fn iter(&self) -> BitboardIter {
        BitboardIter { bits: *self }
    }
}

impl From<Coordinate> for Bitboard {
    #[inline(always)]
    fn from(value: Coordinate) -> Self {
        Self::from_coordinate(value)
    }
}

impl FromIterator<Coordinate> for Bitboard {
    fn from_iter<T: IntoIterator<Item = Coordinate>>(iter: T) -> Self {
        let mut board = Self::EMPTY_BOARD;
        for coordinate in iter {
            board.set(coordinate);
        }
        board
    }
}

impl BitOr for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline(always)]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitOrAssign<Coordinate> for Bitboard {
    #[inline(always)]
    fn bitor_assign(&mut self, rhs: Coordinate) {
        self.set(rhs);
    }
}

/// Iterates over the coordinates of a [`Bitboard`], lowest first.
pub struct BitboardIter {
    bits: Bitboard,
}

impl Iterator for BitboardIter {
    type Item = Coordinate;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.bits.pop_lsb()
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bits.population() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for BitboardIter {}

impl IntoIterator for Bitboard {
    type Item = Coordinate;
    type IntoIter = BitboardIter;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Bitboard {
    /// Prints the set as an 8x8 grid, rank 8 at the top. `X` marks a member square.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..SQUARES_PER_ROW as u8).rev() {
            for column in 0..SQUARES_PER_ROW as u8 {
                let member = Coordinate::from_parts(column, row).is_some_and(|c| self.contains(c));
                let glyph = if member { 'X' } else { '.' };
                write!(f, "{glyph}")?;
                if column != SQUARES_PER_ROW as u8 - 1 {
                    write!(f, " ")?;
                }
            }
            if row != 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bitboard({:#018X})", self.0)
    }
}
