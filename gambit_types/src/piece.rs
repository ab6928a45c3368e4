/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use anyhow::{bail, Result};

use super::Coordinate;

/// One of the two sides of a game of chess.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
pub enum Alliance {
    #[default]
    White,
    Black,
}

impl Alliance {
    /// Number of alliances.
    pub const COUNT: usize = 2;

    /// Both alliances, White first.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::White, Self::Black]
    }

    /// The other side.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::Alliance;
    /// assert_eq!(Alliance::White.opponent(), Alliance::Black);
    /// assert_eq!(Alliance::Black.opponent(), Alliance::White);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Index for per-side arrays: White is `0`, Black is `1`.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    #[inline(always)]
    pub const fn is_black(&self) -> bool {
        matches!(self, Self::Black)
    }

    /// The sign of this side's forward direction: `1` for White, `-1` for Black.
    #[inline(always)]
    pub const fn direction(&self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    /// The row this side's pieces start on (0 for White, 7 for Black).
    #[inline(always)]
    pub const fn back_row(&self) -> u8 {
        match self {
            Self::White => 0,
            Self::Black => 7,
        }
    }

    /// The row this side's Pawns start on.
    #[inline(always)]
    pub const fn pawn_row(&self) -> u8 {
        match self {
            Self::White => 1,
            Self::Black => 6,
        }
    }

    /// The row on which this side's Pawns promote.
    #[inline(always)]
    pub const fn promotion_row(&self) -> u8 {
        self.opponent().back_row()
    }

    /// Places a first-rank coordinate on this side's back row (e1 -> e8 for Black).
    #[inline(always)]
    pub const fn relative(&self, coordinate: Coordinate) -> Coordinate {
        match self {
            Self::White => coordinate,
            Self::Black => coordinate.flipped(),
        }
    }
}

impl fmt::Display for Alliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::White => write!(f, "White"),
            Self::Black => write!(f, "Black"),
        }
    }
}

/// The kind of a chess piece, independent of its side.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Kinds a Pawn may promote to, in the order promotion moves are generated.
    ///
    /// The first entry is the default promotion.
    pub const PROMOTIONS: [Self; 4] = [Self::Queen, Self::Rook, Self::Bishop, Self::Knight];

    /// Parses a [`PieceKind`] from its letter, ignoring case.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::PieceKind;
    /// assert_eq!(PieceKind::from_uci('n').unwrap(), PieceKind::Knight);
    /// assert_eq!(PieceKind::from_uci('Q').unwrap(), PieceKind::Queen);
    /// assert!(PieceKind::from_uci('x').is_err());
    /// ```
    pub fn from_uci(kind: char) -> Result<Self> {
        match kind.to_ascii_lowercase() {
            'p' => Ok(Self::Pawn),
            'n' => Ok(Self::Knight),
            'b' => Ok(Self::Bishop),
            'r' => Ok(Self::Rook),
            'q' => Ok(Self::Queen),
            'k' => Ok(Self::King),
            _ => bail!("Invalid char for PieceKind: {kind:?}"),
        }
    }

    /// The lowercase letter of this kind.
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    /// Full name of this kind.
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pawn => "Pawn",
            Self::Knight => "Knight",
            Self::Bishop => "Bishop",
            Self::Rook => "Rook",
            Self::Queen => "Queen",
            Self::King => "King",
        }
    }

    /// Returns `true` if a Pawn may promote to this kind.
    #[inline(always)]
    pub const fn is_promotion(&self) -> bool {
        matches!(self, Self::Knight | Self::Bishop | Self::Rook | Self::Queen)
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A chess piece standing on a particular square.
///
/// Pieces are plain values. Two pieces are equal if their kind, alliance, position and
/// move history all match. Moving a piece produces a new value via [`Piece::moved_to`];
/// the original is never altered.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    alliance: Alliance,
    position: Coordinate,
    has_moved: bool,
}

impl Piece {
    /// Creates a new, unmoved [`Piece`].
    ///
    /// # Example
    /// ```
    /// # use gambit_types::{Alliance, Coordinate, Piece, PieceKind};
    /// let king = Piece::new(PieceKind::King, Alliance::White, Coordinate::E1);
    /// assert_eq!(king.position(), Coordinate::E1);
    /// assert!(!king.has_moved());
    /// ```
    #[inline(always)]
    pub const fn new(kind: PieceKind, alliance: Alliance, position: Coordinate) -> Self {
        Self {
            kind,
            alliance,
            position,
            has_moved: false,
        }
    }

    /// Returns a copy of `self` with its move-history flag set to `has_moved`.
    #[inline(always)]
    pub const fn with_moved(self, has_moved: bool) -> Self {
        Self { has_moved, ..self }
    }

    /// Creates an unmoved [`Piece`] from its letter: uppercase for White, lowercase for Black.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::{Alliance, Coordinate, Piece, PieceKind};
    /// let pawn = Piece::from_uci('p', Coordinate::A8).unwrap();
    /// assert_eq!(pawn.alliance(), Alliance::Black);
    /// assert_eq!(pawn.kind(), PieceKind::Pawn);
    /// ```
    pub fn from_uci(piece: char, position: Coordinate) -> Result<Self> {
        let kind = PieceKind::from_uci(piece)?;
        let alliance = if piece.is_ascii_uppercase() {
            Alliance::White
        } else {
            Alliance::Black
        };
        Ok(Self::new(kind, alliance, position))
    }

    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline(always)]
    pub const fn alliance(&self) -> Alliance {
        self.alliance
    }

    #[inline(always)]
    pub const fn position(&self) -> Coordinate {
        self.position
    }

    /// Returns `true` if this piece has moved at any point in the game.
    #[inline(always)]
    pub const fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Produces this piece relocated to `destination`, flagged as having moved.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::{Alliance, Coordinate, Piece, PieceKind};
    /// let rook = Piece::new(PieceKind::Rook, Alliance::White, Coordinate::H1);
    /// let moved = rook.moved_to(Coordinate::F1);
    /// assert_eq!(moved.position(), Coordinate::F1);
    /// assert!(moved.has_moved());
    /// assert_ne!(rook, moved);
    /// ```
    #[inline(always)]
    pub const fn moved_to(self, destination: Coordinate) -> Self {
        Self {
            position: destination,
            has_moved: true,
            ..self
        }
    }

    /// Produces this piece with its kind replaced by `kind`.
    #[inline(always)]
    pub const fn promoted(self, kind: PieceKind) -> Self {
        Self { kind, ..self }
    }

    /// Returns `true` if `other` belongs to the opposing side.
    #[inline(always)]
    pub const fn is_enemy_of(&self, other: &Self) -> bool {
        self.alliance.index() != other.alliance.index()
    }

    #[inline(always)]
    pub const fn is_pawn(&self) -> bool {
        matches!(self.kind, PieceKind::Pawn)
    }

    #[inline(always)]
    pub const fn is_rook(&self) -> bool {
        matches!(self.kind, PieceKind::Rook)
    }

    #[inline(always)]
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    /// The letter of this piece: uppercase for White, lowercase for Black.
    #[inline(always)]
    pub const fn char(&self) -> char {
        let c = self.kind.char();
        match self.alliance {
            Alliance::White => c.to_ascii_uppercase(),
            Alliance::Black => c,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let moved = if self.has_moved { "" } else { ", unmoved" };
        write!(
            f,
            "{} {} on {}{moved}",
            self.alliance, self.kind, self.position
        )
    }
}
