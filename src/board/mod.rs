/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Pseudo-legal and legal move generation, checks, and castling eligibility.
mod movegen;

/// Pieces, their colors, and their kinds.
mod piece;

/// Board positions: occupancy, rosters, and the apply/undo mutation protocol.
mod position;

/// Squares of the 8x8 board.
mod square;

pub use piece::*;
pub use position::*;
pub use square::*;
