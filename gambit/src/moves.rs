/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use anyhow::{bail, Result};

use super::{Board, BoardBuilder, Coordinate, Piece, PieceKind};

/// Which side of the board a castle happens on.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CastleSide {
    /// Kingside: the King moves two squares towards the h-file.
    Short,
    /// Queenside: the King moves two squares towards the a-file.
    Long,
}

impl CastleSide {
    /// Both sides, kingside first.
    pub const ALL: [Self; 2] = [Self::Short, Self::Long];

    /// Where the castling Rook starts, from White's perspective.
    #[inline(always)]
    pub const fn rook_origin(&self) -> Coordinate {
        match self {
            Self::Short => Coordinate::H1,
            Self::Long => Coordinate::A1,
        }
    }

    /// Where the castling Rook ends up, from White's perspective.
    #[inline(always)]
    pub const fn rook_destination(&self) -> Coordinate {
        match self {
            Self::Short => Coordinate::F1,
            Self::Long => Coordinate::D1,
        }
    }

    /// Where the King ends up, from White's perspective.
    #[inline(always)]
    pub const fn king_destination(&self) -> Coordinate {
        match self {
            Self::Short => Coordinate::G1,
            Self::Long => Coordinate::C1,
        }
    }

    /// Squares strictly between the King and the Rook, from White's perspective.
    #[inline(always)]
    pub const fn between(&self) -> &'static [Coordinate] {
        match self {
            Self::Short => &[Coordinate::F1, Coordinate::G1],
            Self::Long => &[Coordinate::D1, Coordinate::C1, Coordinate::B1],
        }
    }
}

/// A request to change the state of a [`Board`].
///
/// Every variant except [`Move::Null`] records the piece being moved (as it stands *before* the move)
/// and its destination. Moves cannot be built outside of this crate; obtain them from a
/// [`Player`](crate::Player)'s legal moves or [`Board::find_move`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Move {
    /// A non-capturing move, including single Pawn pushes.
    #[non_exhaustive]
    Quiet { piece: Piece, to: Coordinate },

    /// A move that captures the enemy piece standing on the destination.
    #[non_exhaustive]
    Capture {
        piece: Piece,
        to: Coordinate,
        captured: Piece,
    },

    /// A Pawn moving two squares forward from its starting row.
    #[non_exhaustive]
    PawnDoublePush { piece: Piece, to: Coordinate },

    /// A Pawn capturing an enemy Pawn that just double-pushed past it.
    ///
    /// The captured Pawn is not on the destination square, but beside the capturing Pawn.
    #[non_exhaustive]
    EnPassantCapture {
        piece: Piece,
        to: Coordinate,
        captured: Piece,
    },

    /// A Pawn reaching the last row, optionally capturing, and becoming `promotion`.
    #[non_exhaustive]
    Promotion {
        piece: Piece,
        to: Coordinate,
        captured: Option<Piece>,
        promotion: PieceKind,
    },

    /// Kingside castling.
    #[non_exhaustive]
    ShortCastle {
        king: Piece,
        to: Coordinate,
        rook: Piece,
        rook_to: Coordinate,
    },

    /// Queenside castling.
    #[non_exhaustive]
    LongCastle {
        king: Piece,
        to: Coordinate,
        rook: Piece,
        rook_to: Coordinate,
    },

    /// Sentinel for "no matching move". It can never be executed.
    Null,
}

impl Move {
    #[inline(always)]
    pub(crate) const fn quiet(piece: Piece, to: Coordinate) -> Self {
        Self::Quiet { piece, to }
    }

    #[inline(always)]
    pub(crate) const fn capture(piece: Piece, to: Coordinate, captured: Piece) -> Self {
        Self::Capture {
            piece,
            to,
            captured,
        }
    }

    #[inline(always)]
    pub(crate) const fn pawn_double_push(piece: Piece, to: Coordinate) -> Self {
        Self::PawnDoublePush { piece, to }
    }

    #[inline(always)]
    pub(crate) const fn en_passant(piece: Piece, to: Coordinate, captured: Piece) -> Self {
        Self::EnPassantCapture {
            piece,
            to,
            captured,
        }
    }

    #[inline(always)]
    pub(crate) const fn promotion(
        piece: Piece,
        to: Coordinate,
        captured: Option<Piece>,
        promotion: PieceKind,
    ) -> Self {
        Self::Promotion {
            piece,
            to,
            captured,
            promotion,
        }
    }

    /// Creates a castling move for `king` with `rook`.
    ///
    /// The destinations are taken from `side`, relative to the King's alliance.
    pub(crate) const fn castle(side: CastleSide, king: Piece, rook: Piece) -> Self {
        let alliance = king.alliance();
        let to = alliance.relative(side.king_destination());
        let rook_to = alliance.relative(side.rook_destination());

        match side {
            CastleSide::Short => Self::ShortCastle {
                king,
                to,
                rook,
                rook_to,
            },
            CastleSide::Long => Self::LongCastle {
                king,
                to,
                rook,
                rook_to,
            },
        }
    }

    /// The piece being moved, as it stands before the move. `None` for [`Move::Null`].
    #[inline(always)]
    pub const fn moved_piece(&self) -> Option<Piece> {
        match *self {
            Self::Quiet { piece, .. }
            | Self::Capture { piece, .. }
            | Self::PawnDoublePush { piece, .. }
            | Self::EnPassantCapture { piece, .. }
            | Self::Promotion { piece, .. } => Some(piece),
            Self::ShortCastle { king, .. } | Self::LongCastle { king, .. } => Some(king),
            Self::Null => None,
        }
    }

    /// The square the moved piece starts on.
    #[inline(always)]
    pub const fn origin(&self) -> Option<Coordinate> {
        match self.moved_piece() {
            Some(piece) => Some(piece.position()),
            None => None,
        }
    }

    /// The square the moved piece lands on.
    #[inline(always)]
    pub const fn destination(&self) -> Option<Coordinate> {
        match *self {
            Self::Quiet { to, .. }
            | Self::Capture { to, .. }
            | Self::PawnDoublePush { to, .. }
            | Self::EnPassantCapture { to, .. }
            | Self::Promotion { to, .. }
            | Self::ShortCastle { to, .. }
            | Self::LongCastle { to, .. } => Some(to),
            Self::Null => None,
        }
    }

    /// The enemy piece removed by this move, if any.
    #[inline(always)]
    pub const fn captured_piece(&self) -> Option<Piece> {
        match *self {
            Self::Capture { captured, .. } | Self::EnPassantCapture { captured, .. } => {
                Some(captured)
            }
            Self::Promotion { captured, .. } => captured,
            _ => None,
        }
    }

    /// For castling moves, the Rook and the square it moves to.
    #[inline(always)]
    pub const fn castle_rook(&self) -> Option<(Piece, Coordinate)> {
        match *self {
            Self::ShortCastle { rook, rook_to, .. } | Self::LongCastle { rook, rook_to, .. } => {
                Some((rook, rook_to))
            }
            _ => None,
        }
    }

    /// The side castled on, if this is a castling move.
    #[inline(always)]
    pub const fn castle_side(&self) -> Option<CastleSide> {
        match self {
            Self::ShortCastle { .. } => Some(CastleSide::Short),
            Self::LongCastle { .. } => Some(CastleSide::Long),
            _ => None,
        }
    }

    /// The kind a Pawn becomes, if this is a promotion.
    #[inline(always)]
    pub const fn promotion_kind(&self) -> Option<PieceKind> {
        match *self {
            Self::Promotion { promotion, .. } => Some(promotion),
            _ => None,
        }
    }

    #[inline(always)]
    pub const fn is_capture(&self) -> bool {
        self.captured_piece().is_some()
    }

    #[inline(always)]
    pub const fn is_castle(&self) -> bool {
        self.castle_side().is_some()
    }

    #[inline(always)]
    pub const fn is_en_passant(&self) -> bool {
        matches!(self, Self::EnPassantCapture { .. })
    }

    #[inline(always)]
    pub const fn is_pawn_double_push(&self) -> bool {
        matches!(self, Self::PawnDoublePush { .. })
    }

    #[inline(always)]
    pub const fn is_promotion(&self) -> bool {
        matches!(self, Self::Promotion { .. })
    }

    #[inline(always)]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if this move goes from `origin` to `destination`.
    #[inline(always)]
    pub fn connects(&self, origin: Coordinate, destination: Coordinate) -> bool {
        self.origin() == Some(origin) && self.destination() == Some(destination)
    }

    /// Applies this move to `board`, producing the next [`Board`].
    ///
    /// `board` itself is left untouched.
    ///
    /// # Panics
    /// If this is [`Move::Null`], or if the moved piece is not on `board`. Use [`Move::try_execute`] for a `Result`.
    ///
    /// # Example
    /// ```
    /// # use gambit::*;
    /// let board = Board::standard();
    /// let mv = board.find_move_uci("g1f3").unwrap();
    /// let after = mv.execute(&board);
    ///
    /// assert_eq!(after.side_to_move(), Alliance::Black);
    /// assert!(after.piece_at(Coordinate::G1).is_none());
    /// assert!(board.piece_at(Coordinate::G1).is_some());
    /// ```
    pub fn execute(&self, board: &Board) -> Board {
        match self.try_execute(board) {
            Ok(next) => next,
            Err(e) => panic!("Failed to apply {} to\n{board}: {e}", self),
        }
    }

    /// Applies this move to `board`, producing the next [`Board`].
    ///
    /// Fails if this is [`Move::Null`] or if the move does not belong to `board`.
    pub fn try_execute(&self, board: &Board) -> Result<Board> {
        let (Some(piece), Some(to)) = (self.moved_piece(), self.destination()) else {
            bail!("Cannot execute a null move");
        };

        if board.piece_at(piece.position()) != Some(piece) {
            bail!("{piece:?} is not on the board this move was applied to");
        }

        let alliance = piece.alliance();
        let captured = self.captured_piece();
        let castle_rook = self.castle_rook();

        let mut builder = BoardBuilder::new();

        // Every friendly piece that isn't moving stays where it is
        for &friendly in board.active_pieces(alliance) {
            let is_rook = castle_rook.is_some_and(|(rook, _)| rook == friendly);
            if friendly != piece && !is_rook {
                builder.place(friendly);
            }
        }

        // Every enemy piece that isn't captured stays where it is
        for &enemy in board.active_pieces(alliance.opponent()) {
            if Some(enemy) != captured {
                builder.place(enemy);
            }
        }

        let mut moved = piece.moved_to(to);
        if let Some(promotion) = self.promotion_kind() {
            moved = moved.promoted(promotion);
        }
        builder.place(moved);

        if let Some((rook, rook_to)) = castle_rook {
            builder.place(rook.moved_to(rook_to));
        }

        // Reset on pawn moves and captures
        let halfmove = if piece.is_pawn() || captured.is_some() {
            0
        } else {
            board.halfmove() + 1
        };
        let fullmove = board.fullmove() + alliance.is_black() as usize;

        let en_passant_pawn = self.is_pawn_double_push().then_some(moved);

        Ok(builder
            .side_to_move(alliance.opponent())
            .en_passant_pawn(en_passant_pawn)
            .counters(halfmove, fullmove)
            .build())
    }

    /// Formats this move in long algebraic notation, such as `e2e4` or `e7e8q`.
    ///
    /// Castling is written as the King's move (`e1g1`). [`Move::Null`] is `0000`.
    pub fn to_uci(&self) -> String {
        let (Some(from), Some(to)) = (self.origin(), self.destination()) else {
            return String::from("0000");
        };

        match self.promotion_kind() {
            Some(kind) => format!("{from}{to}{}", kind.char()),
            None => format!("{from}{to}"),
        }
    }
}

impl Default for Move {
    #[inline(always)]
    fn default() -> Self {
        Self::Null
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShortCastle { .. } => write!(f, "O-O"),
            Self::LongCastle { .. } => write!(f, "O-O-O"),
            _ => write!(f, "{}", self.to_uci()),
        }
    }
}
