/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{
    Alliance, Bitboard, Board, Coordinate, Move, Piece, PieceKind, BISHOP_VECTORS,
    KING_OFFSETS, KNIGHT_OFFSETS, MAX_NUM_MOVES, MAX_NUM_PIECES, QUEEN_VECTORS, ROOK_VECTORS,
};

/// An alias for an [`arrayvec::ArrayVec`] containing at most [`MAX_NUM_MOVES`] moves.
pub type MoveList = arrayvec::ArrayVec<Move, MAX_NUM_MOVES>;

/// An alias for an [`arrayvec::ArrayVec`] containing one side's active pieces.
pub type PieceList = arrayvec::ArrayVec<Piece, MAX_NUM_PIECES>;

/// Most candidate moves a single piece can have: a Queen in the centre of an empty board reaches 27 squares.
pub const MAX_PIECE_MOVES: usize = 32;

/// An alias for an [`arrayvec::ArrayVec`] holding the candidate moves of a single piece.
pub type PieceMoveList = arrayvec::ArrayVec<Move, MAX_PIECE_MOVES>;

/// Generates the candidate moves of `piece` on `board`.
///
/// Candidates follow each piece's movement geometry but ignore whether the move would leave the
/// mover's own King attacked; see [`Player`](crate::Player) for legal moves. Castling is also
/// left to the [`Player`](crate::Player), as it depends on the opponent's attacks.
///
/// Moves are ordered by the piece's offset table, and sliders list nearer squares first.
///
/// # Example
/// ```
/// # use gambit::*;
/// let knight = Piece::new(PieceKind::Knight, Alliance::White, Coordinate::A1);
/// let board = BoardBuilder::new().place(knight).build();
/// assert_eq!(piece_moves(&board, knight).len(), 2);
/// ```
pub fn piece_moves(board: &Board, piece: Piece) -> PieceMoveList {
    let mut moves = PieceMoveList::new();

    match piece.kind() {
        PieceKind::Pawn => pawn_moves(board, piece, &mut moves),
        PieceKind::Knight => step_moves(board, piece, &KNIGHT_OFFSETS, &mut moves),
        PieceKind::Bishop => slider_moves(board, piece, &BISHOP_VECTORS, &mut moves),
        PieceKind::Rook => slider_moves(board, piece, &ROOK_VECTORS, &mut moves),
        PieceKind::Queen => slider_moves(board, piece, &QUEEN_VECTORS, &mut moves),
        PieceKind::King => step_moves(board, piece, &KING_OFFSETS, &mut moves),
    }

    moves
}

/// Creates and appends a [`Move`] that is either a quiet or capture, if `to` is not friendly.
#[inline(always)]
fn serialize_normal_move(board: &Board, piece: Piece, to: Coordinate, moves: &mut PieceMoveList) {
    match board.piece_at(to) {
        None => moves.push(Move::quiet(piece, to)),
        Some(occupant) if occupant.is_enemy_of(&piece) => {
            moves.push(Move::capture(piece, to, occupant))
        }
        Some(_) => {}
    }
}

/// Knight and King moves: one independent step per offset.
fn step_moves(board: &Board, piece: Piece, offsets: &[i8], moves: &mut PieceMoveList) {
    for &offset in offsets {
        if let Some(to) = piece.position().offset(offset) {
            serialize_normal_move(board, piece, to, moves);
        }
    }
}

/// Bishop, Rook and Queen moves: walk each ray until it leaves the board or hits a piece.
fn slider_moves(board: &Board, piece: Piece, vectors: &[i8], moves: &mut PieceMoveList) {
    for &vector in vectors {
        let mut current = piece.position();

        // The edge check in `offset` is made against `current`, so a ray stops before wrapping
        while let Some(to) = current.offset(vector) {
            serialize_normal_move(board, piece, to, moves);
            if board.has(to) {
                break;
            }
            current = to;
        }
    }
}

/// Pawn moves: pushes, double pushes, captures, en passant, and promotions.
fn pawn_moves(board: &Board, pawn: Piece, moves: &mut PieceMoveList) {
    let alliance = pawn.alliance();
    let forward = 8 * alliance.direction();

    if let Some(to) = pawn.position().offset(forward) {
        if !board.has(to) {
            serialize_pawn_move(pawn, to, None, moves);

            // Only an unmoved Pawn on its starting row may jump, and only over an empty square
            let on_start_row = pawn.position().row() == alliance.pawn_row();
            if !pawn.has_moved() && on_start_row {
                if let Some(jump) = to.offset(forward) {
                    if !board.has(jump) {
                        moves.push(Move::pawn_double_push(pawn, jump));
                    }
                }
            }
        }
    }

    // Towards the a-file first, then towards the h-file
    for side in [-1, 1] {
        let Some(to) = pawn.position().offset(forward + side) else {
            continue;
        };

        match board.piece_at(to) {
            Some(occupant) if occupant.is_enemy_of(&pawn) => {
                serialize_pawn_move(pawn, to, Some(occupant), moves)
            }
            Some(_) => {}
            None => {
                if let Some(target) = en_passant_target(board, pawn, side) {
                    moves.push(Move::en_passant(pawn, to, target));
                }
            }
        }
    }
}

/// Appends a Pawn move to `to`, expanding it into one move per promotion kind on the last row.
#[inline(always)]
fn serialize_pawn_move(
    pawn: Piece,
    to: Coordinate,
    captured: Option<Piece>,
    moves: &mut PieceMoveList,
) {
    if to.row() == pawn.alliance().promotion_row() {
        for kind in PieceKind::PROMOTIONS {
            moves.push(Move::promotion(pawn, to, captured, kind));
        }
    } else if let Some(captured) = captured {
        moves.push(Move::capture(pawn, to, captured));
    } else {
        moves.push(Move::quiet(pawn, to));
    }
}

/// The enemy Pawn `pawn` may capture en passant by moving diagonally towards `side`, if any.
///
/// That Pawn must be the board's en passant Pawn and stand directly beside `pawn`.
#[inline(always)]
fn en_passant_target(board: &Board, pawn: Piece, side: i8) -> Option<Piece> {
    let target = board.en_passant_pawn()?;
    let beside = pawn.position().offset(side)?;
    (target.is_enemy_of(&pawn) && target.position() == beside).then_some(target)
}

/// Fetch the pseudo-legal attacks of `piece` on `board`.
///
/// Unlike [`piece_moves`], this includes squares occupied by friendly pieces (they are defended),
/// and Pawns attack both forward diagonals whether or not anything stands there.
/// Pawn pushes are not attacks.
///
/// # Example
/// ```
/// # use gambit::*;
/// let pawn = Piece::new(PieceKind::Pawn, Alliance::White, Coordinate::A1.offset(8).unwrap());
/// let board = BoardBuilder::new().place(pawn).build();
/// let attacks = attacks_for(&board, pawn);
/// assert_eq!(attacks.population(), 1);
/// assert!(attacks.contains(Coordinate::from_uci("b3").unwrap()));
/// ```
pub fn attacks_for(board: &Board, piece: Piece) -> Bitboard {
    let from = piece.position();

    match piece.kind() {
        PieceKind::Pawn => pawn_attacks(from, piece.alliance()),
        PieceKind::Knight => step_attacks(from, &KNIGHT_OFFSETS),
        PieceKind::Bishop => ray_attacks(board, from, &BISHOP_VECTORS),
        PieceKind::Rook => ray_attacks(board, from, &ROOK_VECTORS),
        PieceKind::Queen => ray_attacks(board, from, &QUEEN_VECTORS),
        PieceKind::King => step_attacks(from, &KING_OFFSETS),
    }
}

/// Computes a [`Bitboard`] of all squares attacked by `alliance`.
///
/// This is a raw attack map, meaning the squares on this map are unsafe for the enemy King to occupy.
/// No check-safety filtering is applied.
pub fn compute_attacks_by(board: &Board, alliance: Alliance) -> Bitboard {
    board
        .active_pieces(alliance)
        .iter()
        .fold(Bitboard::EMPTY_BOARD, |attacks, &piece| {
            attacks | attacks_for(board, piece)
        })
}

/// Computes a [`Bitboard`] of all the `alliance` pieces that attack `square`.
///
/// This _only_ includes the attackers themselves, not their rays.
/// It works outwards from `square`, so it is cheaper than [`compute_attacks_by`] for a single square.
pub fn compute_attackers_to(board: &Board, square: Coordinate, alliance: Alliance) -> Bitboard {
    let mut attackers = Bitboard::EMPTY_BOARD;

    let mut collect = |from: Option<Coordinate>, kinds: &[PieceKind]| {
        let Some(from) = from else {
            return;
        };
        if let Some(piece) = board.piece_at(from) {
            if piece.alliance() == alliance && kinds.contains(&piece.kind()) {
                attackers |= from;
            }
        }
    };

    for offset in KNIGHT_OFFSETS {
        collect(square.offset(offset), &[PieceKind::Knight]);
    }
    for offset in KING_OFFSETS {
        collect(square.offset(offset), &[PieceKind::King]);
    }

    // An attacking Pawn stands one row *behind* `square`, from its own point of view
    let backward = -8 * alliance.direction();
    for side in [-1, 1] {
        collect(square.offset(backward + side), &[PieceKind::Pawn]);
    }

    for vector in QUEEN_VECTORS {
        let diagonal = BISHOP_VECTORS.contains(&vector);
        let sliders: &[PieceKind] = if diagonal {
            &[PieceKind::Bishop, PieceKind::Queen]
        } else {
            &[PieceKind::Rook, PieceKind::Queen]
        };

        let blocker = first_piece_along(board, square, vector);
        collect(blocker, sliders);
    }

    attackers
}

/// Returns `true` if any `alliance` piece attacks `square`.
#[inline(always)]
pub fn is_attacked(board: &Board, square: Coordinate, alliance: Alliance) -> bool {
    compute_attackers_to(board, square, alliance).is_nonempty()
}

/// Fetch the raw, unblocked attacks for a pawn of the provided alliance on the provided square.
#[inline(always)]
pub fn pawn_attacks(square: Coordinate, alliance: Alliance) -> Bitboard {
    let forward = 8 * alliance.direction();
    [-1, 1]
        .into_iter()
        .filter_map(|side| square.offset(forward + side))
        .collect()
}

/// Attacks of a piece that steps once along each of `offsets`.
#[inline(always)]
fn step_attacks(square: Coordinate, offsets: &[i8]) -> Bitboard {
    offsets
        .iter()
        .filter_map(|&offset| square.offset(offset))
        .collect()
}

/// Attacks of a slider: each ray up to and including its first blocker.
fn ray_attacks(board: &Board, square: Coordinate, vectors: &[i8]) -> Bitboard {
    let mut attacks = Bitboard::EMPTY_BOARD;

    for &vector in vectors {
        let mut current = square;
        while let Some(to) = current.offset(vector) {
            attacks |= to;
            if board.has(to) {
                break;
            }
            current = to;
        }
    }

    attacks
}

/// Walks from `square` along `vector` and returns the first occupied square, if any.
fn first_piece_along(board: &Board, square: Coordinate, vector: i8) -> Option<Coordinate> {
    let mut current = square;
    while let Some(to) = current.offset(vector) {
        if board.has(to) {
            return Some(to);
        }
        current = to;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoardBuilder;

    fn coord(uci: &str) -> Coordinate {
        Coordinate::from_uci(uci).unwrap()
    }

    fn alone(kind: PieceKind, uci: &str) -> (Board, Piece) {
        let piece = Piece::new(kind, Alliance::White, coord(uci));
        (BoardBuilder::new().place(piece).build(), piece)
    }

    /// Checks if `moves` and `legal` contain all the same destinations, ignoring order
    fn destinations_match(moves: &[Move], legal: &[&str]) {
        let mut found = moves
            .iter()
            .map(|mv| mv.destination().unwrap().to_uci())
            .collect::<Vec<_>>();
        let mut expected = legal.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        found.sort();
        expected.sort();
        assert_eq!(found, expected);
    }

    #[test]
    fn knight_in_corner_has_two_moves() {
        let (board, knight) = alone(PieceKind::Knight, "a1");
        destinations_match(&piece_moves(&board, knight), &["b3", "c2"]);
    }

    #[test]
    fn knight_near_edges_never_wraps() {
        let (board, knight) = alone(PieceKind::Knight, "b4");
        destinations_match(
            &piece_moves(&board, knight),
            &["a2", "c2", "d3", "d5", "a6", "c6"],
        );

        let (board, knight) = alone(PieceKind::Knight, "g5");
        destinations_match(
            &piece_moves(&board, knight),
            &["h3", "f3", "e4", "e6", "h7", "f7"],
        );

        for coordinate in Coordinate::iter() {
            let knight = Piece::new(PieceKind::Knight, Alliance::White, coordinate);
            let board = BoardBuilder::new().place(knight).build();
            for mv in piece_moves(&board, knight) {
                let to = mv.destination().unwrap();
                let columns = coordinate.column().abs_diff(to.column());
                let rows = coordinate.row().abs_diff(to.row());
                assert!(
                    (columns, rows) == (1, 2) || (columns, rows) == (2, 1),
                    "{coordinate} -> {to}"
                );
            }
        }
    }

    #[test]
    fn rook_in_centre_has_fourteen_moves() {
        let (board, rook) = alone(PieceKind::Rook, "d4");
        let moves = piece_moves(&board, rook);
        assert_eq!(moves.len(), 14);
        assert!(moves.iter().all(|mv| matches!(mv, Move::Quiet { .. })));
    }

    #[test]
    fn sliders_list_nearer_squares_first() {
        let (board, bishop) = alone(PieceKind::Bishop, "c1");
        let moves = piece_moves(&board, bishop)
            .iter()
            .map(|mv| mv.destination().unwrap().to_uci())
            .collect::<Vec<_>>();
        // -9 and -7 leave the board, +7 reaches b2 and a3, +9 runs to h6
        assert_eq!(moves, ["b2", "a3", "d2", "e3", "f4", "g5", "h6"]);
    }

    #[test]
    fn rook_blockers() {
        let rook = Piece::new(PieceKind::Rook, Alliance::White, coord("d4"));
        let friend = Piece::new(PieceKind::Pawn, Alliance::White, coord("d7"));
        let enemy = Piece::new(PieceKind::Knight, Alliance::Black, coord("f4"));
        let board = BoardBuilder::new()
            .place(rook)
            .place(friend)
            .place(enemy)
            .build();

        let moves = piece_moves(&board, rook);
        destinations_match(
            &moves,
            &["d1", "d2", "d3", "d5", "d6", "a4", "b4", "c4", "e4", "f4"],
        );

        let captures = moves.iter().filter(|mv| mv.is_capture()).collect::<Vec<_>>();
        assert_eq!(captures.len(), 1);
        assert_eq!(captures[0].captured_piece(), Some(enemy));
    }

    #[test]
    fn queen_and_king_on_empty_board() {
        let (board, queen) = alone(PieceKind::Queen, "d4");
        assert_eq!(piece_moves(&board, queen).len(), 27);

        let (board, king) = alone(PieceKind::King, "h1");
        destinations_match(&piece_moves(&board, king), &["g1", "g2", "h2"]);
    }

    #[test]
    fn pawn_pushes_and_double_pushes() {
        let (board, pawn) = alone(PieceKind::Pawn, "e2");
        let moves = piece_moves(&board, pawn);
        destinations_match(&moves, &["e3", "e4"]);
        assert!(moves[1].is_pawn_double_push());

        // A Pawn that has moved cannot jump, even from its starting row
        let moved = pawn.with_moved(true);
        let board = BoardBuilder::new().place(moved).build();
        destinations_match(&piece_moves(&board, moved), &["e3"]);

        // Blocked on the intermediate square: no pushes at all
        let blocker = Piece::new(PieceKind::Knight, Alliance::Black, coord("e3"));
        let board = BoardBuilder::new().place(pawn).place(blocker).build();
        assert!(piece_moves(&board, pawn).is_empty());
    }

    #[test]
    fn black_pawns_move_down_the_board() {
        let pawn = Piece::new(PieceKind::Pawn, Alliance::Black, coord("a7"));
        let victim = Piece::new(PieceKind::Bishop, Alliance::White, coord("b6"));
        let board = BoardBuilder::new().place(pawn).place(victim).build();
        destinations_match(&piece_moves(&board, pawn), &["a6", "a5", "b6"]);
    }

    #[test]
    fn pawns_promote_to_every_kind_queen_first() {
        let pawn = Piece::new(PieceKind::Pawn, Alliance::White, coord("g7"));
        let victim = Piece::new(PieceKind::Rook, Alliance::Black, coord("h8"));
        let board = BoardBuilder::new().place(pawn).place(victim).build();

        let moves = piece_moves(&board, pawn);
        assert_eq!(moves.len(), 8);
        assert!(moves.iter().all(Move::is_promotion));
        assert_eq!(moves[0].promotion_kind(), Some(PieceKind::Queen));
        assert_eq!(moves[4].captured_piece(), Some(victim));
    }

    #[test]
    fn en_passant_requires_the_adjacent_en_passant_pawn() {
        let pawn = Piece::new(PieceKind::Pawn, Alliance::White, coord("e5")).with_moved(true);
        let jumper = Piece::new(PieceKind::Pawn, Alliance::Black, coord("d5")).with_moved(true);
        let other = Piece::new(PieceKind::Pawn, Alliance::Black, coord("f5")).with_moved(true);

        let board = BoardBuilder::new()
            .place(pawn)
            .place(jumper)
            .place(other)
            .en_passant_pawn(Some(jumper))
            .build();

        let moves = piece_moves(&board, pawn);
        let en_passant = moves.iter().filter(|mv| mv.is_en_passant()).collect::<Vec<_>>();
        assert_eq!(en_passant.len(), 1);
        assert_eq!(en_passant[0].destination(), Some(coord("d6")));
        assert_eq!(en_passant[0].captured_piece(), Some(jumper));
    }

    #[test]
    fn en_passant_does_not_wrap_across_edges() {
        let pawn = Piece::new(PieceKind::Pawn, Alliance::White, coord("h5")).with_moved(true);
        let jumper = Piece::new(PieceKind::Pawn, Alliance::Black, coord("a6")).with_moved(true);
        let board = BoardBuilder::new()
            .place(pawn)
            .place(jumper)
            .en_passant_pawn(Some(jumper))
            .build();

        assert!(!piece_moves(&board, pawn).iter().any(Move::is_en_passant));
    }

    #[test]
    fn attack_maps_include_defended_and_empty_squares() {
        let board = Board::standard();
        let attacks = compute_attacks_by(&board, Alliance::White);

        // Every square on rank 3 is attacked by a Pawn or Knight
        for column in 0..8 {
            assert!(attacks.contains(Coordinate::from_parts(column, 2).unwrap()));
        }
        // Rank 4 is unreachable on the first move
        assert!(!attacks.contains(coord("e4")));
        // The Queen defends her neighbours
        assert!(attacks.contains(coord("d2")));
    }

    #[test]
    fn attackers_to_agrees_with_attack_map() {
        let board = Board::standard();
        for alliance in Alliance::all() {
            let map = compute_attacks_by(&board, alliance);
            for square in Coordinate::iter() {
                assert_eq!(
                    map.contains(square),
                    is_attacked(&board, square, alliance),
                    "{alliance} on {square}"
                );
            }
        }
    }

    #[test]
    fn pawn_attacks_stay_on_the_board() {
        assert_eq!(pawn_attacks(coord("a2"), Alliance::White).population(), 1);
        assert_eq!(pawn_attacks(coord("h7"), Alliance::Black).population(), 1);
        assert!(pawn_attacks(coord("d8"), Alliance::White).is_empty());
    }
}
