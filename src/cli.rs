/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use clap::{builder::PossibleValue, Parser, ValueEnum};

use crate::{Color, Square};

/// A command to be sent to the engine.
///
/// Squares are written as `row,col`, e.g. `play 6,4 4,4`.
#[derive(Debug, Clone, Parser)]
#[command(multicall = true, about, rename_all = "lower", override_usage("<COMMAND>"))]
pub enum EngineCommand {
    /// Step one committed move backward in history.
    #[command(alias = "b")]
    Back,

    /// List the captured pieces of both sides.
    Captured,

    /// Print a visual representation of the current board.
    #[command(alias = "d")]
    Display,

    /// Print the static evaluation of the current position, from the
    /// side-to-move's point of view.
    Eval,

    /// Quit the engine.
    #[command(alias = "quit")]
    Exit,

    /// Step one committed move forward in history.
    #[command(alias = "f")]
    Forward,

    /// Search for and commit the best move for the side to move.
    Go {
        /// Override the number of plies to look ahead.
        #[arg(short, long)]
        depth: Option<usize>,
    },

    /// Show all legal destinations for the piece on the given square.
    Moves { square: Square },

    /// Start a new game, optionally choosing the human side.
    New { color: Option<Color> },

    /// Commit a move from one square to another, if it is legal.
    Play { from: Square, to: Square },

    /// Report whose turn it is and how the game stands.
    Status,
}

impl ValueEnum for Color {
    fn value_variants<'a>() -> &'a [Self] {
        &[Color::White, Color::Black]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        let value = PossibleValue::new(self.name());

        // Single-letter aliases for convenience
        Some(match self {
            Color::White => value.alias("w"),
            Color::Black => value.alias("b"),
        })
    }
}
