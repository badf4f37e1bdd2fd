/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Board representation: squares, pieces, positions, and move generation.
mod board;

/// Line-oriented commands accepted by the engine's driver.
mod cli;

/// The interactive driver tying the game state to stdin commands.
mod engine;

/// Static evaluation of chess positions.
mod eval;

/// Committed game state: turn order, outcome, and position history.
mod game;

/// Pseudo-random numbers for the search's fallback move.
mod prng;

/// Scores assigned to positions during evaluation and search.
mod score;

/// Minimax search with alpha-beta pruning.
mod search;

pub use board::*;
pub use cli::*;
pub use engine::*;
pub use eval::*;
pub use game::*;
pub use prng::*;
pub use score::*;
pub use search::*;
