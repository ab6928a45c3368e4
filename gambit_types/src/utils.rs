/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Number of squares on a chessboard.
pub const NUM_SQUARES: usize = 64;

/// Number of squares in a single row (or column).
pub const SQUARES_PER_ROW: usize = 8;

/// Maximum number of moves available in any legal chess position.
///
/// See [this position](https://www.chessprogramming.org/Chess_Position#cite_note-4).
pub const MAX_NUM_MOVES: usize = 218;

/// Maximum number of pieces a single side can have on the board.
pub const MAX_NUM_PIECES: usize = 16;

/// Knight jumps, as linear offsets.
pub const KNIGHT_OFFSETS: [i8; 8] = [-17, -15, -10, -6, 6, 10, 15, 17];

/// Diagonal ray directions, as linear offsets.
pub const BISHOP_VECTORS: [i8; 4] = [-9, -7, 7, 9];

/// Orthogonal ray directions, as linear offsets.
pub const ROOK_VECTORS: [i8; 4] = [-8, -1, 1, 8];

/// All eight ray directions, as linear offsets.
pub const QUEEN_VECTORS: [i8; 8] = [-9, -8, -7, -1, 1, 7, 8, 9];

/// Single steps in all eight directions, as linear offsets.
pub const KING_OFFSETS: [i8; 8] = QUEEN_VECTORS;

/// Returns `true` if `coordinate` lies within `[0, 64)`.
///
/// # Example
/// ```
/// # use gambit_types::is_valid_coordinate;
/// assert!(is_valid_coordinate(0));
/// assert!(is_valid_coordinate(63));
/// assert!(!is_valid_coordinate(64));
/// assert!(!is_valid_coordinate(-1));
/// ```
#[inline(always)]
pub const fn is_valid_coordinate(coordinate: i32) -> bool {
    coordinate >= 0 && coordinate < NUM_SQUARES as i32
}

/// Returns `true` if `coordinate` is a valid coordinate on column `column` (0 is the a-file).
///
/// # Example
/// ```
/// # use gambit_types::is_in_column;
/// assert!(is_in_column(0, 0));
/// assert!(is_in_column(57, 1));
/// assert!(!is_in_column(7, 0));
/// assert!(!is_in_column(64, 0));
/// ```
#[inline(always)]
pub const fn is_in_column(coordinate: i32, column: u8) -> bool {
    is_valid_coordinate(coordinate) && coordinate % SQUARES_PER_ROW as i32 == column as i32
}

/// Returns `true` if `coordinate` is a valid coordinate on row `row` (0 is the first rank).
///
/// # Example
/// ```
/// # use gambit_types::is_in_row;
/// assert!(is_in_row(8, 1));
/// assert!(is_in_row(15, 1));
/// assert!(!is_in_row(16, 1));
/// assert!(!is_in_row(-8, 0));
/// ```
#[inline(always)]
pub const fn is_in_row(coordinate: i32, row: u8) -> bool {
    is_valid_coordinate(coordinate) && coordinate / SQUARES_PER_ROW as i32 == row as i32
}

/// Columns `offset` moves, read as the shortest horizontal step.
///
/// An offset is a whole number of rows plus a step of at most four columns either way.
/// A four-column step takes the sign of the offset.
///
/// # Example
/// ```
/// # use gambit_types::horizontal_step;
/// assert_eq!(horizontal_step(8), 0);
/// assert_eq!(horizontal_step(15), -1);
/// assert_eq!(horizontal_step(-6), 2);
/// assert_eq!(horizontal_step(-4), -4);
/// ```
#[inline(always)]
pub const fn horizontal_step(offset: i32) -> i32 {
    let width = SQUARES_PER_ROW as i32;
    match offset.rem_euclid(width) {
        step @ 0..=3 => step,
        4 if offset < 0 => -4,
        4 => 4,
        step => step - width,
    }
}

/// Returns `true` if adding `offset` to `coordinate` would wrap around the left or right edge of the board.
///
/// An offset wraps when its [`horizontal_step`] would carry the column past the a- or h-file:
/// an offset that steps one column to the left is excluded from the a-file,
/// an offset that steps two columns to the left is excluded from the a- and b-files, and so on.
/// Vertical offsets (`-16`, `-8`, `8`, `16`) never wrap. Invalid coordinates never wrap.
///
/// This must be evaluated against the square a step is taken *from*, never the square it lands on.
///
/// # Example
/// ```
/// # use gambit_types::wraps_edge;
/// // A Knight on a1 cannot jump "left"
/// assert!(wraps_edge(0, 15));
/// assert!(wraps_edge(0, 6));
/// // but it can jump "right"
/// assert!(!wraps_edge(0, 10));
/// assert!(!wraps_edge(0, 17));
/// // Two columns right of the h-file is off the board
/// assert!(wraps_edge(7, 2));
/// ```
#[inline(always)]
pub const fn wraps_edge(coordinate: i32, offset: i32) -> bool {
    if !is_valid_coordinate(coordinate) {
        return false;
    }

    let column = coordinate % SQUARES_PER_ROW as i32 + horizontal_step(offset);
    column < 0 || column >= SQUARES_PER_ROW as i32
}
