/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use super::{is_attacked, Board, Coordinate, Move, PieceKind};

/// The result of asking a [`Board`] to make a move.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum MoveStatus {
    /// The move was legal and has been made.
    Done,

    /// The move is not among the legal moves of the side to move.
    IllegalMove,

    /// The move was found among the legal moves, but making it left the mover's King attacked.
    ///
    /// Legal move generation should make this unreachable.
    LeavesPlayerInCheck,
}

impl MoveStatus {
    /// Returns `true` if the move was made.
    #[inline(always)]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for MoveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Done => write!(f, "done"),
            Self::IllegalMove => write!(f, "illegal move"),
            Self::LeavesPlayerInCheck => write!(f, "leaves player in check"),
        }
    }
}

/// A [`Board`] together with how it was reached.
///
/// On anything but [`MoveStatus::Done`], the board is the one the move was attempted on.
#[derive(Clone, Debug)]
pub struct MoveTransition {
    board: Board,
    mv: Move,
    status: MoveStatus,
    gives_check: bool,
}

impl MoveTransition {
    /// The board after this transition.
    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Consumes this transition, yielding the board after it.
    #[inline(always)]
    pub fn into_board(self) -> Board {
        self.board
    }

    /// The move that was attempted. [`Move::Null`] if no legal move matched the request.
    #[inline(always)]
    pub const fn mv(&self) -> Move {
        self.mv
    }

    #[inline(always)]
    pub const fn status(&self) -> MoveStatus {
        self.status
    }

    /// Returns `true` if the move was made and it attacks the opponent's King.
    #[inline(always)]
    pub const fn gives_check(&self) -> bool {
        self.gives_check
    }
}

impl Board {
    /// Attempts to move the piece on `origin` to `destination`.
    ///
    /// Promotions default to a Queen; see [`Board::attempt_move_with_promotion`].
    ///
    /// # Example
    /// ```
    /// # use gambit::*;
    /// let board = Board::standard();
    /// let e2 = Coordinate::from_uci("e2").unwrap();
    /// let e5 = Coordinate::from_uci("e5").unwrap();
    ///
    /// let transition = board.attempt_move(e2, e5);
    /// assert_eq!(transition.status(), MoveStatus::IllegalMove);
    /// assert_eq!(transition.board(), &board);
    /// ```
    pub fn attempt_move(&self, origin: Coordinate, destination: Coordinate) -> MoveTransition {
        let player = self.current_player();
        let mv = player.find_move(origin, destination);
        self.attempt_among(player.legal_moves(), mv)
    }

    /// Attempts to move the piece on `origin` to `destination`, promoting to `promotion`.
    ///
    /// `promotion` is ignored if the move does not promote.
    pub fn attempt_move_with_promotion(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        promotion: PieceKind,
    ) -> MoveTransition {
        let player = self.current_player();
        let mv = player.find_move_with_promotion(origin, destination, promotion);
        self.attempt_among(player.legal_moves(), mv)
    }

    /// Attempts to make `mv`.
    ///
    /// `mv` must be one of the legal moves of the side to move, otherwise this yields
    /// [`MoveStatus::IllegalMove`] and leaves the board as it is.
    pub fn attempt(&self, mv: Move) -> MoveTransition {
        self.attempt_among(&self.legal_moves(), mv)
    }

    fn attempt_among(&self, legal_moves: &[Move], mv: Move) -> MoveTransition {
        let mover = self.side_to_move();

        if mv.is_null() || !legal_moves.contains(&mv) {
            tracing::debug!(%mv, %mover, "rejected illegal move");
            return self.unchanged(mv, MoveStatus::IllegalMove);
        }

        let next = mv.execute(self);

        let exposed = next
            .king(mover)
            .is_some_and(|king| is_attacked(&next, king.position(), mover.opponent()));
        if exposed {
            tracing::error!(%mv, %mover, "legal move left its own King attacked\n{:?}", self);
            return self.unchanged(mv, MoveStatus::LeavesPlayerInCheck);
        }

        let gives_check = next.is_in_check();
        tracing::debug!(%mv, %mover, gives_check, "made move");

        MoveTransition {
            board: next,
            mv,
            status: MoveStatus::Done,
            gives_check,
        }
    }

    #[inline(always)]
    fn unchanged(&self, mv: Move, status: MoveStatus) -> MoveTransition {
        MoveTransition {
            board: self.clone(),
            mv,
            status,
            gives_check: false,
        }
    }
}
