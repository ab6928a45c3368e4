/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

#![doc = include_str!("../README.md")]

/// A compact set of board coordinates.
pub mod bitboard;
/// Linear board coordinates and their conversions.
pub mod coordinate;
/// Alliances, piece kinds, and the positioned [`Piece`] value.
pub mod piece;
/// Board geometry: validity predicates, offset tables and edge-wrap rules.
pub mod utils;

pub use bitboard::*;
pub use coordinate::*;
pub use piece::*;
pub use utils::*;

/// Re-exports all the things you'll need.
pub mod prelude {
    pub use crate::bitboard::*;
    pub use crate::coordinate::*;
    pub use crate::piece::*;
    pub use crate::utils::*;
}
