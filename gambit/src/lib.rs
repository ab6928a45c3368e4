/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

#![doc = include_str!("../README.md")]

pub use gambit_types::*;

/// An immutable chessboard: squares, active pieces, side to move, and en passant state.
mod board;
/// Candidate move generation and attack maps for pieces on a board.
mod movegen;
/// Enums and structs for modeling the movement of a piece on a chessboard.
mod moves;
/// Utility function for performance testing.
mod perft;
/// Per-side view of a board: legal moves, check, checkmate and stalemate.
mod player;
/// Evaluating a requested move against a board.
mod transition;

pub use board::*;
pub use movegen::*;
pub use moves::*;
pub use perft::*;
pub use player::*;
pub use transition::*;

/// Re-exports all the things you'll need.
pub mod prelude {
    pub use crate::board::*;
    pub use crate::movegen::*;
    pub use crate::moves::*;
    pub use crate::perft::*;
    pub use crate::player::*;
    pub use crate::transition::*;
    pub use gambit_types::*;
}
