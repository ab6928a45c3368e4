/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

#![allow(dead_code)]

use gambit::*;

/// Parses a coordinate such as `e4`, panicking on bad input.
pub fn coord(uci: &str) -> Coordinate {
    Coordinate::from_uci(uci).unwrap()
}

/// Builds a board from a diagram in the format printed by [`Board::render`].
///
/// Rank 8 comes first, one rank per line. Whitespace between glyphs is ignored, and both `-` and `.`
/// mark empty squares. Pieces standing on their starting squares are unmoved; all others have moved.
pub fn diagram(text: &str, side_to_move: Alliance) -> Board {
    let rows = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>();
    assert_eq!(rows.len(), 8, "a diagram needs 8 ranks:\n{text}");

    let mut builder = BoardBuilder::new();
    for (i, line) in rows.into_iter().enumerate() {
        let glyphs = line
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<Vec<_>>();
        assert_eq!(glyphs.len(), 8, "a rank needs 8 squares: {line:?}");

        let row = 7 - i as u8;
        for (column, glyph) in glyphs.into_iter().enumerate() {
            if glyph == '-' || glyph == '.' {
                continue;
            }

            let coordinate = Coordinate::from_parts(column as u8, row).unwrap();
            let piece = Piece::from_uci(glyph, coordinate).unwrap();
            builder.place(piece.with_moved(!is_home(piece)));
        }
    }

    builder.side_to_move(side_to_move).build()
}

/// Returns `true` if `piece` stands where it would at the start of a game.
fn is_home(piece: Piece) -> bool {
    let alliance = piece.alliance();
    let position = piece.position();

    match piece.kind() {
        PieceKind::Pawn => position.row() == alliance.pawn_row(),
        PieceKind::King => position == alliance.relative(Coordinate::E1),
        PieceKind::Rook => {
            position == alliance.relative(Coordinate::A1)
                || position == alliance.relative(Coordinate::H1)
        }
        _ => position.row() == alliance.back_row(),
    }
}

/// Plays `moves`, given in UCI notation, from `board`. Panics if any of them is illegal.
pub fn play(board: &Board, moves: &[&str]) -> Board {
    moves.iter().fold(board.clone(), |board, uci| {
        let mv = board
            .find_move_uci(uci)
            .unwrap_or_else(|e| panic!("{e}\n{board:?}"));
        let transition = board.attempt(mv);
        assert_eq!(transition.status(), MoveStatus::Done, "{uci}");
        transition.into_board()
    })
}

/// Destinations of the legal moves of the piece on `origin`, sorted.
pub fn destinations_from(board: &Board, origin: &str) -> Vec<String> {
    let origin = coord(origin);
    let mut found = board
        .legal_moves()
        .iter()
        .filter(|mv| mv.origin() == Some(origin))
        .map(|mv| mv.destination().unwrap().to_uci())
        .collect::<Vec<_>>();
    found.sort();
    found.dedup();
    found
}
