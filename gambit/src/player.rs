/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use anyhow::{anyhow, bail, Result};

use super::{
    compute_attacks_by, is_attacked, piece_moves, Alliance, Bitboard, Board, CastleSide,
    Coordinate, Move, MoveList, Piece, PieceKind,
};

/// How a game stands from the point of view of the side to move.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum GameOutcome {
    /// The side to move has at least one legal move.
    Ongoing,

    /// The side to move is in check and has no legal moves.
    Checkmate { loser: Alliance },

    /// The side to move is not in check, but has no legal moves.
    Stalemate,
}

impl GameOutcome {
    /// Returns `true` if the game has ended.
    #[inline(always)]
    pub const fn is_over(&self) -> bool {
        !matches!(self, Self::Ongoing)
    }

    /// The side that won, if the game ended in checkmate.
    #[inline(always)]
    pub const fn winner(&self) -> Option<Alliance> {
        match self {
            Self::Checkmate { loser } => Some(loser.opponent()),
            _ => None,
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ongoing => write!(f, "ongoing"),
            Self::Checkmate { loser } => write!(f, "{} wins by checkmate", loser.opponent()),
            Self::Stalemate => write!(f, "draw by stalemate"),
        }
    }
}

/// One side's view of a [`Board`].
///
/// Constructing a [`Player`] computes the opponent's attacks and the side's legal moves once;
/// everything else is read from those.
#[derive(Clone, Debug)]
pub struct Player<'a> {
    /// The board this view was computed from.
    board: &'a Board,

    /// The side this view belongs to.
    alliance: Alliance,

    /// This side's King, if it has one.
    king: Option<Piece>,

    /// Whether the opponent attacks this side's King.
    in_check: bool,

    /// Candidate moves that do not leave this side's King attacked.
    legal_moves: MoveList,
}

impl<'a> Player<'a> {
    /// Computes `alliance`'s view of `board`.
    ///
    /// # Example
    /// ```
    /// # use gambit::*;
    /// let board = Board::standard();
    /// let white = Player::new(&board, Alliance::White);
    /// assert_eq!(white.legal_moves().len(), 20);
    /// assert!(!white.is_in_check());
    /// ```
    pub fn new(board: &'a Board, alliance: Alliance) -> Self {
        let opponent_attacks = compute_attacks_by(board, alliance.opponent());
        let king = board.king(alliance);
        let in_check = king.is_some_and(|king| opponent_attacks.contains(king.position()));

        let mut legal_moves = MoveList::new();
        for &piece in board.active_pieces(alliance) {
            let candidates = piece_moves(board, piece);
            let castles = piece
                .is_king()
                .then(|| castle_moves(board, piece, opponent_attacks, in_check))
                .into_iter()
                .flatten();

            for mv in candidates.into_iter().chain(castles) {
                if is_safe(board, mv, alliance) && legal_moves.try_push(mv).is_err() {
                    tracing::warn!(%mv, "more than {} legal moves; ignoring", legal_moves.len());
                }
            }
        }

        tracing::trace!(
            %alliance,
            count = legal_moves.len(),
            in_check,
            "generated legal moves"
        );

        Self {
            board,
            alliance,
            king,
            in_check,
            legal_moves,
        }
    }

    #[inline(always)]
    pub const fn alliance(&self) -> Alliance {
        self.alliance
    }

    #[inline(always)]
    pub const fn board(&self) -> &'a Board {
        self.board
    }

    #[inline(always)]
    pub const fn king(&self) -> Option<Piece> {
        self.king
    }

    /// Every legal move for this side, grouped by piece in coordinate order.
    #[inline(always)]
    pub fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    /// Consumes this view, yielding its legal moves.
    #[inline(always)]
    pub fn into_legal_moves(self) -> MoveList {
        self.legal_moves
    }

    /// Returns `true` if this side's King is attacked.
    #[inline(always)]
    pub const fn is_in_check(&self) -> bool {
        self.in_check
    }

    /// Returns `true` if this side is in check and cannot get out of it.
    #[inline(always)]
    pub fn is_in_checkmate(&self) -> bool {
        self.in_check && self.legal_moves.is_empty()
    }

    /// Returns `true` if this side is not in check and has no legal moves.
    #[inline(always)]
    pub fn is_in_stalemate(&self) -> bool {
        !self.in_check && self.legal_moves.is_empty()
    }

    /// Classifies the game from this side's point of view.
    pub fn outcome(&self) -> GameOutcome {
        if !self.legal_moves.is_empty() {
            GameOutcome::Ongoing
        } else if self.in_check {
            GameOutcome::Checkmate {
                loser: self.alliance,
            }
        } else {
            GameOutcome::Stalemate
        }
    }

    /// Finds the legal move from `origin` to `destination`.
    ///
    /// If several moves connect those squares (promotions), the Queen promotion is chosen.
    /// Returns [`Move::Null`] if there is no such move.
    pub fn find_move(&self, origin: Coordinate, destination: Coordinate) -> Move {
        self.legal_moves
            .iter()
            .copied()
            .find(|mv| mv.connects(origin, destination))
            .unwrap_or_default()
    }

    /// Finds the legal move from `origin` to `destination` that promotes to `promotion`.
    ///
    /// `promotion` is ignored for moves that do not promote.
    pub fn find_move_with_promotion(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        promotion: PieceKind,
    ) -> Move {
        self.legal_moves
            .iter()
            .copied()
            .find(|mv| {
                mv.connects(origin, destination)
                    && mv.promotion_kind().map_or(true, |kind| kind == promotion)
            })
            .unwrap_or_default()
    }
}

/// Castling moves available to `king`.
///
/// The King and Rook must both be unmoved and on their home squares, nothing may stand
/// between them, and the King may not start on, pass over, or land on an attacked square.
fn castle_moves(
    board: &Board,
    king: Piece,
    opponent_attacks: Bitboard,
    in_check: bool,
) -> impl Iterator<Item = Move> + '_ {
    let alliance = king.alliance();
    let home = king.position() == alliance.relative(Coordinate::E1);
    let can_castle = home && !king.has_moved() && !in_check;

    CastleSide::ALL
        .into_iter()
        .filter(move |_| can_castle)
        .filter_map(move |side| {
            let rook = board.piece_at(alliance.relative(side.rook_origin()))?;
            if !rook.is_rook() || rook.alliance() != alliance || rook.has_moved() {
                return None;
            }

            let blocked = side
                .between()
                .iter()
                .any(|&square| board.has(alliance.relative(square)));
            if blocked {
                return None;
            }

            // The King passes over the Rook's destination on its way
            let passed = alliance.relative(side.rook_destination());
            let landed = alliance.relative(side.king_destination());
            let path = Bitboard::from(passed) | Bitboard::from(landed);
            if opponent_attacks.intersects(path) {
                return None;
            }

            Some(Move::castle(side, king, rook))
        })
}

/// Returns `true` if making `mv` does not leave `alliance`'s King attacked.
///
/// Boards without a King for `alliance` are always safe.
#[inline(always)]
fn is_safe(board: &Board, mv: Move, alliance: Alliance) -> bool {
    let next = mv.execute(board);
    next.king(alliance)
        .map_or(true, |king| !is_attacked(&next, king.position(), alliance.opponent()))
}

impl Board {
    /// The view of the side to move.
    #[inline(always)]
    pub fn current_player(&self) -> Player<'_> {
        Player::new(self, self.side_to_move())
    }

    /// The view of `alliance`.
    #[inline(always)]
    pub fn player(&self, alliance: Alliance) -> Player<'_> {
        Player::new(self, alliance)
    }

    /// Legal moves of the side to move.
    ///
    /// # Example
    /// ```
    /// # use gambit::*;
    /// let board = Board::default();
    /// assert_eq!(board.legal_moves().len(), 20);
    /// ```
    #[inline(always)]
    pub fn legal_moves(&self) -> MoveList {
        self.current_player().into_legal_moves()
    }

    /// Legal moves of `alliance`, as if it were that side's turn.
    #[inline(always)]
    pub fn legal_moves_for(&self, alliance: Alliance) -> MoveList {
        self.player(alliance).into_legal_moves()
    }

    /// Returns `true` if the side to move is in check.
    pub fn is_in_check(&self) -> bool {
        self.king(self.side_to_move()).is_some_and(|king| {
            is_attacked(self, king.position(), self.side_to_move().opponent())
        })
    }

    /// Classifies the game from the side to move's point of view.
    ///
    /// # Example
    /// ```
    /// # use gambit::*;
    /// let mut board = Board::standard();
    /// for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
    ///     board = board.find_move_uci(uci).unwrap().execute(&board);
    /// }
    /// assert_eq!(board.outcome(), GameOutcome::Checkmate { loser: Alliance::White });
    /// ```
    #[inline(always)]
    pub fn outcome(&self) -> GameOutcome {
        self.current_player().outcome()
    }

    /// Finds the legal move of the side to move from `origin` to `destination`.
    ///
    /// Promotions default to a Queen. Returns [`Move::Null`] if there is no such move.
    #[inline(always)]
    pub fn find_move(&self, origin: Coordinate, destination: Coordinate) -> Move {
        self.current_player().find_move(origin, destination)
    }

    /// Finds the legal move of the side to move written in UCI notation, such as `e2e4` or `e7e8n`.
    ///
    /// Castling is written as the King's move (`e1g1`).
    ///
    /// # Example
    /// ```
    /// # use gambit::*;
    /// let board = Board::standard();
    /// assert!(board.find_move_uci("e2e4").is_ok());
    /// assert!(board.find_move_uci("e2e5").is_err());
    /// assert!(board.find_move_uci("e2").is_err());
    /// ```
    pub fn find_move_uci(&self, uci: &str) -> Result<Move> {
        let (Some(from), Some(to)) = (uci.get(0..2), uci.get(2..4)) else {
            bail!("Move must be of the form <from><to>[promotion]. Got {uci:?}");
        };

        let from = Coordinate::from_uci(from)?;
        let to = Coordinate::from_uci(to)?;
        let player = self.current_player();

        let mv = match uci.get(4..) {
            Some("") | None => player.find_move(from, to),
            Some(promotion) => {
                let mut chars = promotion.chars();
                let (Some(kind), None) = (chars.next(), chars.next()) else {
                    bail!("Invalid promotion in {uci:?}");
                };
                let kind = PieceKind::from_uci(kind)?;
                if !kind.is_promotion() {
                    bail!("Cannot promote to a {kind}");
                }
                player.find_move_with_promotion(from, to, kind)
            }
        };

        if mv.is_null() {
            return Err(anyhow!(
                "{uci} is not a legal move for {}",
                self.side_to_move()
            ));
        }

        Ok(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoardBuilder;

    fn coord(uci: &str) -> Coordinate {
        Coordinate::from_uci(uci).unwrap()
    }

    #[test]
    fn standard_position_has_twenty_moves_for_each_side() {
        let board = Board::standard();
        assert_eq!(board.legal_moves_for(Alliance::White).len(), 20);
        assert_eq!(board.legal_moves_for(Alliance::Black).len(), 20);
        assert_eq!(board.outcome(), GameOutcome::Ongoing);
    }

    #[test]
    fn pinned_pieces_cannot_leave_the_pin() {
        let king = Piece::new(PieceKind::King, Alliance::White, coord("e1"));
        let knight = Piece::new(PieceKind::Knight, Alliance::White, coord("e2"));
        let rook = Piece::new(PieceKind::Rook, Alliance::Black, coord("e8"));
        let board = BoardBuilder::new()
            .place(king)
            .place(knight)
            .place(rook)
            .build();

        let moves = board.legal_moves();
        assert!(moves.iter().all(|mv| mv.moved_piece() == Some(king)));
        assert!(!board.is_in_check());
    }

    #[test]
    fn king_cannot_step_into_pawn_attacks() {
        let king = Piece::new(PieceKind::King, Alliance::White, coord("e4"));
        let pawn = Piece::new(PieceKind::Pawn, Alliance::Black, coord("e6"));
        let board = BoardBuilder::new().place(king).place(pawn).build();

        // d5 and f5 are attacked by the pawn even though nothing stands there
        let destinations = board
            .legal_moves()
            .iter()
            .map(|mv| mv.destination().unwrap())
            .collect::<Vec<_>>();
        assert!(!destinations.contains(&coord("d5")));
        assert!(!destinations.contains(&coord("f5")));
        assert!(destinations.contains(&coord("e5")));
    }

    #[test]
    fn castling_is_generated_when_permitted() {
        let board = BoardBuilder::new()
            .place(Piece::new(PieceKind::King, Alliance::White, Coordinate::E1))
            .place(Piece::new(PieceKind::Rook, Alliance::White, Coordinate::H1))
            .place(Piece::new(PieceKind::Rook, Alliance::White, Coordinate::A1))
            .build();

        let castles = board
            .legal_moves()
            .into_iter()
            .filter_map(|mv| mv.castle_side())
            .collect::<Vec<_>>();
        assert_eq!(castles, [CastleSide::Short, CastleSide::Long]);
    }

    #[test]
    fn castling_through_an_attacked_square_is_not_generated() {
        let board = BoardBuilder::new()
            .place(Piece::new(PieceKind::King, Alliance::White, Coordinate::E1))
            .place(Piece::new(PieceKind::Rook, Alliance::White, Coordinate::H1))
            .place(Piece::new(PieceKind::Rook, Alliance::White, Coordinate::A1))
            .place(Piece::new(PieceKind::Rook, Alliance::Black, coord("f8")))
            .build();

        let castles = board
            .legal_moves()
            .into_iter()
            .filter_map(|mv| mv.castle_side())
            .collect::<Vec<_>>();
        assert_eq!(castles, [CastleSide::Long]);
    }

    #[test]
    fn long_castle_only_needs_b1_empty_not_safe() {
        let board = BoardBuilder::new()
            .place(Piece::new(PieceKind::King, Alliance::White, Coordinate::E1))
            .place(Piece::new(PieceKind::Rook, Alliance::White, Coordinate::A1))
            .place(Piece::new(PieceKind::Rook, Alliance::Black, coord("b8")))
            .build();

        assert!(board.legal_moves().iter().any(Move::is_castle));
    }

    #[test]
    fn outcomes_are_exclusive() {
        // Black King in the corner, boxed in by a White Queen
        let board = BoardBuilder::new()
            .place(Piece::new(PieceKind::King, Alliance::Black, Coordinate::H8))
            .place(Piece::new(PieceKind::Queen, Alliance::White, coord("g6")))
            .place(Piece::new(PieceKind::King, Alliance::White, coord("f7")))
            .side_to_move(Alliance::Black)
            .build();

        let black = board.current_player();
        assert!(black.is_in_stalemate());
        assert!(!black.is_in_checkmate());
        assert_eq!(board.outcome(), GameOutcome::Stalemate);
        assert!(board.outcome().winner().is_none());

        let board = BoardBuilder::new()
            .place(Piece::new(PieceKind::King, Alliance::Black, Coordinate::H8))
            .place(Piece::new(PieceKind::Queen, Alliance::White, coord("g7")))
            .place(Piece::new(PieceKind::King, Alliance::White, coord("f6")))
            .side_to_move(Alliance::Black)
            .build();

        let outcome = board.outcome();
        assert_eq!(outcome, GameOutcome::Checkmate { loser: Alliance::Black });
        assert_eq!(outcome.winner(), Some(Alliance::White));
        assert!(outcome.is_over());
    }

    #[test]
    fn find_move_prefers_queen_promotion() {
        let board = BoardBuilder::new()
            .place(Piece::new(PieceKind::Pawn, Alliance::White, coord("a7")))
            .build();

        let mv = board.find_move(coord("a7"), coord("a8"));
        assert_eq!(mv.promotion_kind(), Some(PieceKind::Queen));

        let rook = board.find_move_uci("a7a8r").unwrap();
        assert_eq!(rook.promotion_kind(), Some(PieceKind::Rook));

        assert!(board.find_move_uci("a7a8k").is_err());
        assert!(board.find_move(coord("a7"), coord("b8")).is_null());
    }
}
