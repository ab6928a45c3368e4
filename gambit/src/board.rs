/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt::{self, Write};

use super::{
    Alliance, Coordinate, Piece, PieceKind, PieceList, NUM_SQUARES, SQUARES_PER_ROW,
};

/// Glyph printed for an empty square by [`Board::render`].
pub const EMPTY_GLYPH: char = '-';

/// One of the 64 squares of a [`Board`]: either empty, or occupied by a [`Piece`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Square {
    coordinate: Coordinate,
    occupant: Option<Piece>,
}

/// Every possible empty square, indexed by coordinate.
///
/// Empty squares carry nothing but their coordinate, so they are all built once, at compile time.
pub const EMPTY_SQUARES: [Square; NUM_SQUARES] = {
    let mut squares = [Square {
        coordinate: Coordinate::A1,
        occupant: None,
    }; NUM_SQUARES];

    let mut i = 0;
    while i < NUM_SQUARES {
        squares[i].coordinate = match Coordinate::from_index(i) {
            Some(coordinate) => coordinate,
            None => unreachable!(),
        };
        i += 1;
    }

    squares
};

impl Square {
    /// Creates the [`Square`] at `coordinate` holding `occupant`.
    ///
    /// If `occupant` is `None`, the square is taken from [`EMPTY_SQUARES`].
    ///
    /// # Example
    /// ```
    /// # use gambit::*;
    /// let empty = Square::new(Coordinate::E1, None);
    /// assert!(!empty.is_occupied());
    ///
    /// let king = Piece::new(PieceKind::King, Alliance::White, Coordinate::E1);
    /// let occupied = Square::new(Coordinate::E1, Some(king));
    /// assert_eq!(occupied.piece(), Some(king));
    /// ```
    #[inline(always)]
    pub const fn new(coordinate: Coordinate, occupant: Option<Piece>) -> Self {
        match occupant {
            Some(_) => Self {
                coordinate,
                occupant,
            },
            None => Self::empty(coordinate),
        }
    }

    /// Fetches the empty [`Square`] at `coordinate`.
    #[inline(always)]
    pub const fn empty(coordinate: Coordinate) -> Self {
        EMPTY_SQUARES[coordinate.index()]
    }

    #[inline(always)]
    pub const fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    #[inline(always)]
    pub const fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// The piece on this square, if any.
    #[inline(always)]
    pub const fn piece(&self) -> Option<Piece> {
        self.occupant
    }

    /// The glyph [`Board::render`] uses for this square.
    #[inline(always)]
    pub const fn glyph(&self) -> char {
        match self.occupant {
            Some(piece) => piece.char(),
            None => EMPTY_GLYPH,
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// An immutable snapshot of a game of chess.
///
/// A [`Board`] holds the 64 squares, each side's active pieces, the side to move, and the Pawn
/// (if any) that may be captured en passant on this turn. It is never modified after it is built:
/// every transition creates a new [`Board`], either through a [`BoardBuilder`] or by
/// [executing](crate::Move::execute) a [`Move`](crate::Move).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// One square per coordinate.
    squares: [Square; NUM_SQUARES],

    /// Active pieces of each side, ordered by coordinate.
    pieces: [PieceList; Alliance::COUNT],

    /// The side whose turn it is.
    side_to_move: Alliance,

    /// The Pawn that double-pushed on the transition that produced this board.
    en_passant_pawn: Option<Piece>,

    /// Used to enforce the fifty-move rule.
    ///
    /// - Incremented after each move.
    /// - Reset after a capture or a pawn moves.
    halfmove: usize,

    /// Number of moves since the beginning of the game.
    ///
    /// A fullmove is a complete turn by white and then by black.
    fullmove: usize,
}

impl Board {
    /// Creates the standard starting position.
    ///
    /// # Example
    /// ```
    /// # use gambit::*;
    /// let board = Board::standard();
    /// assert_eq!(board.side_to_move(), Alliance::White);
    /// assert_eq!(board.active_pieces(Alliance::White).len(), 16);
    /// assert_eq!(board.active_pieces(Alliance::Black).len(), 16);
    /// ```
    pub fn standard() -> Self {
        const BACK_ROW: [PieceKind; SQUARES_PER_ROW] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut builder = BoardBuilder::new();
        for alliance in Alliance::all() {
            for (column, kind) in BACK_ROW.into_iter().enumerate() {
                let column = column as u8;
                if let Some(coordinate) = Coordinate::from_parts(column, alliance.back_row()) {
                    builder.place(Piece::new(kind, alliance, coordinate));
                }
                if let Some(coordinate) = Coordinate::from_parts(column, alliance.pawn_row()) {
                    builder.place(Piece::new(PieceKind::Pawn, alliance, coordinate));
                }
            }
        }

        builder.side_to_move(Alliance::White).build()
    }

    /// Starts a [`BoardBuilder`] pre-filled with this board's contents.
    pub fn to_builder(&self) -> BoardBuilder {
        let mut builder = BoardBuilder::new();
        for alliance in Alliance::all() {
            for &piece in self.active_pieces(alliance) {
                builder.place(piece);
            }
        }
        builder
            .side_to_move(self.side_to_move)
            .en_passant_pawn(self.en_passant_pawn)
            .counters(self.halfmove, self.fullmove);
        builder
    }

    /// All 64 squares, a1 first.
    #[inline(always)]
    pub const fn squares(&self) -> &[Square; NUM_SQUARES] {
        &self.squares
    }

    /// Fetches the [`Piece`] at `coordinate`, if there is one.
    ///
    /// # Example
    /// ```
    /// # use gambit::*;
    /// let board = Board::standard();
    /// assert_eq!(board.piece_at(Coordinate::E1).unwrap().kind(), PieceKind::King);
    /// assert!(board.piece_at(Coordinate::from_uci("e4").unwrap()).is_none());
    /// ```
    #[inline(always)]
    pub const fn piece_at(&self, coordinate: Coordinate) -> Option<Piece> {
        self.squares[coordinate.index()].piece()
    }

    /// Returns `true` if there is a piece at `coordinate`.
    #[inline(always)]
    pub const fn has(&self, coordinate: Coordinate) -> bool {
        self.squares[coordinate.index()].is_occupied()
    }

    /// The pieces `alliance` still has on the board, ordered by coordinate.
    #[inline(always)]
    pub fn active_pieces(&self, alliance: Alliance) -> &[Piece] {
        &self.pieces[alliance.index()]
    }

    /// The King of `alliance`, if it is on the board.
    pub fn king(&self, alliance: Alliance) -> Option<Piece> {
        self.active_pieces(alliance)
            .iter()
            .copied()
            .find(Piece::is_king)
    }

    /// Returns the current player as an [`Alliance`].
    #[inline(always)]
    pub const fn side_to_move(&self) -> Alliance {
        self.side_to_move
    }

    /// The Pawn that may be captured en passant on this turn, if any.
    #[inline(always)]
    pub const fn en_passant_pawn(&self) -> Option<Piece> {
        self.en_passant_pawn
    }

    /// If en passant can be performed, returns the square a capturing Pawn would land on.
    ///
    /// # Example
    /// ```
    /// # use gambit::*;
    /// let board = Board::standard();
    /// let e2 = Coordinate::from_uci("e2").unwrap();
    /// let e4 = Coordinate::from_uci("e4").unwrap();
    /// let after = board.attempt_move(e2, e4).into_board();
    /// assert_eq!(after.ep_square(), Some(Coordinate::from_uci("e3").unwrap()));
    /// ```
    pub fn ep_square(&self) -> Option<Coordinate> {
        let pawn = self.en_passant_pawn?;
        pawn.position().offset(-8 * pawn.alliance().direction())
    }

    /// Returns the half-move counter of the current position.
    #[inline(always)]
    pub const fn halfmove(&self) -> usize {
        self.halfmove
    }

    /// Returns the full-move counter of the current position.
    #[inline(always)]
    pub const fn fullmove(&self) -> usize {
        self.fullmove
    }

    /// Returns `true` if the half-move counter is 100 or greater.
    ///
    /// Since "half-move" increases with ply, the 50-move rule takes effect at 100 ply.
    #[inline(always)]
    pub const fn can_draw_by_fifty(&self) -> bool {
        self.halfmove >= 100
    }

    /// Renders the board as an 8x8 grid, rank 8 first.
    ///
    /// White pieces are uppercase, Black pieces lowercase, and empty squares are [`EMPTY_GLYPH`].
    ///
    /// # Example
    /// ```
    /// # use gambit::*;
    /// let grid = Board::standard().render();
    /// let rows = grid.lines().collect::<Vec<_>>();
    /// assert_eq!(rows[0], "r n b q k b n r");
    /// assert_eq!(rows[4], "- - - - - - - -");
    /// assert_eq!(rows[7], "R N B Q K B N R");
    /// ```
    pub fn render(&self) -> String {
        // 8 rows of 8 glyphs, each followed by a space or newline
        let mut grid = String::with_capacity(NUM_SQUARES * 2);

        for row in (0..SQUARES_PER_ROW).rev() {
            let squares = &self.squares[row * SQUARES_PER_ROW..(row + 1) * SQUARES_PER_ROW];
            for (column, square) in squares.iter().enumerate() {
                grid.push(square.glyph());
                if column != SQUARES_PER_ROW - 1 {
                    grid.push(' ');
                }
            }
            grid.push('\n');
        }

        grid
    }
}

impl Default for Board {
    #[inline(always)]
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = self.render();

        for (i, line) in grid.lines().enumerate() {
            let rank = SQUARES_PER_ROW - i;
            write!(f, "{rank}| {line}")?;

            match rank {
                7 => write!(f, "          Side: {}", self.side_to_move)?,
                6 => {
                    let ep = self
                        .ep_square()
                        .map(|ep| ep.to_uci())
                        .unwrap_or(String::from("-"));
                    write!(f, "            EP: {ep}")?
                }
                5 => write!(f, "     Half-move: {}", self.halfmove)?,
                4 => write!(f, "     Full-move: {}", self.fullmove)?,
                _ => {}
            }
            writeln!(f)?;
        }

        let footer = (0..SQUARES_PER_ROW as u8).fold(String::new(), |mut acc, column| {
            _ = write!(acc, "{} ", (b'a' + column) as char);
            acc
        });
        write!(f, " +{}\n   {}", "--".repeat(SQUARES_PER_ROW), footer.trim_end())
    }
}

/// Assembles a [`Board`] from individual pieces.
///
/// This is the only way to create a [`Board`] other than [`Board::standard`] and executing a move.
///
/// # Example
/// ```
/// # use gambit::*;
/// let board = BoardBuilder::new()
///     .place(Piece::new(PieceKind::King, Alliance::White, Coordinate::E1))
///     .place(Piece::new(PieceKind::King, Alliance::Black, Coordinate::E8))
///     .side_to_move(Alliance::Black)
///     .build();
///
/// assert_eq!(board.side_to_move(), Alliance::Black);
/// assert_eq!(board.render().lines().next(), Some("- - - - k - - -"));
/// ```
#[derive(Clone, Debug)]
pub struct BoardBuilder {
    placements: [Option<Piece>; NUM_SQUARES],
    side_to_move: Alliance,
    en_passant_pawn: Option<Piece>,
    halfmove: usize,
    fullmove: usize,
}

impl BoardBuilder {
    /// Creates an empty builder: no pieces, White to move, no en passant, counters at `0` and `1`.
    pub const fn new() -> Self {
        Self {
            placements: [None; NUM_SQUARES],
            side_to_move: Alliance::White,
            en_passant_pawn: None,
            halfmove: 0,
            fullmove: 1,
        }
    }

    /// Places `piece` at its own position, replacing anything already there.
    pub fn place(&mut self, piece: Piece) -> &mut Self {
        self.placements[piece.position().index()] = Some(piece);
        self
    }

    /// Sets the side to move.
    pub fn side_to_move(&mut self, alliance: Alliance) -> &mut Self {
        self.side_to_move = alliance;
        self
    }

    /// Sets the Pawn that may be captured en passant.
    ///
    /// Anything other than a Pawn that is actually placed on this builder is ignored by [`BoardBuilder::build`].
    pub fn en_passant_pawn(&mut self, pawn: Option<Piece>) -> &mut Self {
        self.en_passant_pawn = pawn;
        self
    }

    /// Sets the half-move and full-move counters.
    pub fn counters(&mut self, halfmove: usize, fullmove: usize) -> &mut Self {
        self.halfmove = halfmove;
        self.fullmove = fullmove;
        self
    }

    /// Builds the [`Board`].
    pub fn build(&self) -> Board {
        let mut pieces: [PieceList; Alliance::COUNT] = Default::default();
        let mut squares = EMPTY_SQUARES;

        for (index, placement) in self.placements.iter().enumerate() {
            let Some(piece) = *placement else {
                continue;
            };

            squares[index] = Square::new(piece.position(), Some(piece));
            // At most 64 pieces fit on the board, but never more than 16 per side in a real game
            if pieces[piece.alliance().index()].try_push(piece).is_err() {
                tracing::warn!(%piece, "too many pieces for {}; ignoring", piece.alliance());
                squares[index] = Square::empty(piece.position());
            }
        }

        let en_passant_pawn = self.en_passant_pawn.filter(|pawn| {
            pawn.is_pawn() && self.placements[pawn.position().index()] == Some(*pawn)
        });

        Board {
            squares,
            pieces,
            side_to_move: self.side_to_move,
            en_passant_pawn,
            halfmove: self.halfmove,
            fullmove: self.fullmove,
        }
    }
}

impl Default for BoardBuilder {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl From<&Board> for BoardBuilder {
    fn from(value: &Board) -> Self {
        value.to_builder()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_squares_know_their_coordinates() {
        for coordinate in Coordinate::iter() {
            let square = Square::empty(coordinate);
            assert_eq!(square.coordinate(), coordinate);
            assert!(!square.is_occupied());
        }
    }

    #[test]
    fn every_occupied_square_is_in_exactly_one_piece_list() {
        let board = Board::standard();

        for square in board.squares() {
            let in_white = board.active_pieces(Alliance::White).iter().any(|p| Some(*p) == square.piece());
            let in_black = board.active_pieces(Alliance::Black).iter().any(|p| Some(*p) == square.piece());

            match square.piece() {
                Some(piece) => {
                    assert_eq!(in_white, piece.alliance() == Alliance::White);
                    assert_eq!(in_black, piece.alliance() == Alliance::Black);
                }
                None => assert!(!in_white && !in_black),
            }
        }
    }

    #[test]
    fn active_pieces_are_ordered_by_coordinate() {
        let board = Board::standard();
        for alliance in Alliance::all() {
            let positions = board
                .active_pieces(alliance)
                .iter()
                .map(Piece::position)
                .collect::<Vec<_>>();
            let mut sorted = positions.clone();
            sorted.sort();
            assert_eq!(positions, sorted);
        }
    }

    #[test]
    fn builder_drops_invalid_en_passant_pawns() {
        let knight = Piece::new(PieceKind::Knight, Alliance::White, Coordinate::B1);
        let board = BoardBuilder::new()
            .place(knight)
            .en_passant_pawn(Some(knight))
            .build();
        assert!(board.en_passant_pawn().is_none());

        let absent = Piece::new(PieceKind::Pawn, Alliance::White, Coordinate::new(28).unwrap());
        let board = BoardBuilder::new().en_passant_pawn(Some(absent)).build();
        assert!(board.en_passant_pawn().is_none());
    }

    #[test]
    fn builder_round_trips_a_board() {
        let board = Board::standard();
        assert_eq!(board.to_builder().build(), board);
    }

    #[test]
    fn debug_output_shows_metadata() {
        let text = format!("{:?}", Board::standard());
        assert!(text.starts_with("8| r n b q k b n r"));
        assert!(text.contains("Side: White"));
        assert!(text.ends_with("a b c d e f g h"));
    }
}
