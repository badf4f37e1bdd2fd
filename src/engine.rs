/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::io;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    Color, EngineCommand, Evaluator, Game, Outcome, Search, DEFAULT_DEPTH,
};

/// The interactive driver tying a [`Game`] to line-oriented commands.
///
/// This is the stand-in for a real UI collaborator: it only calls the
/// engine's public operations and prints their results. All work happens
/// synchronously on the calling thread; a search runs to completion before
/// the next command is read.
#[derive(Debug)]
pub struct Engine {
    /// The game being played, as known to the engine.
    ///
    /// Replaced wholesale when the engine is told to start a new game.
    game: Game,
}

impl Engine {
    /// Constructs a new [`Engine`] instance to be executed with [`Engine::run`].
    pub fn new() -> Self {
        Self {
            game: Game::new(Color::White),
        }
    }

    /// Returns a string of the engine's name and current version.
    pub fn name(&self) -> String {
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    /// Execute the main event loop for the engine, reading commands from
    /// `stdin` until end-of-input or an `exit` command.
    pub fn run(&mut self) -> Result<()> {
        let mut buffer = String::with_capacity(128);

        loop {
            buffer.clear();
            let bytes = io::stdin()
                .read_line(&mut buffer)
                .context("Failed to read line when parsing commands")?;

            // For ctrl + d
            if bytes == 0 {
                break;
            }

            let line = buffer.trim();
            if line.is_empty() {
                continue;
            }

            match EngineCommand::try_parse_from(line.split_ascii_whitespace()) {
                Ok(cmd) => {
                    if !self.handle(cmd) {
                        break;
                    }
                }

                // An invalid command was received; print the error and keep running
                Err(err) => eprintln!("{err}"),
            }
        }

        Ok(())
    }

    /// Handle the execution of a single [`EngineCommand`].
    ///
    /// Returns `false` when the engine should quit.
    pub fn handle(&mut self, cmd: EngineCommand) -> bool {
        match cmd {
            EngineCommand::Back => {
                if self.game.back() {
                    self.display();
                }
            }

            EngineCommand::Captured => self.captured(),

            EngineCommand::Display => self.display(),

            EngineCommand::Eval => {
                let evaluator = Evaluator::new(self.game.position(), self.game.info().turn());
                println!("{}", evaluator.eval());
            }

            EngineCommand::Exit => return false,

            EngineCommand::Forward => {
                if self.game.forward() {
                    self.display();
                }
            }

            EngineCommand::Go { depth } => self.go(depth.unwrap_or(DEFAULT_DEPTH)),

            EngineCommand::Moves { square } => {
                let moves = self.game.selectable_moves(square);

                // If there are none, print "(none)"
                let moves_string = if moves.is_empty() {
                    String::from("(none)")
                } else {
                    moves
                        .into_iter()
                        .map(|sq| sq.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                println!("{moves_string}");
            }

            EngineCommand::New { color } => {
                self.game = Game::new(color.unwrap_or_default());
                self.display();
            }

            EngineCommand::Play { from, to } => {
                // An illegal attempt is silently ignored: the board is
                // reprinted unchanged, mirroring a UI that simply does not
                // react to a bad click.
                self.game.commit(from, to);
                self.display();
                self.announce_outcome();
            }

            EngineCommand::Status => self.status(),
        }

        true
    }

    /// Executes the `go` command: search for the side to move, then commit
    /// whatever the search chose.
    fn go(&mut self, depth: usize) {
        if self.game.info().outcome() != Outcome::Ongoing {
            self.announce_outcome();
            return;
        }

        let side = self.game.info().turn();
        let result = Search::new(self.game.position(), side, depth).start();

        match result.bestmove {
            Some((piece, dest)) => {
                let from = self.game.position()[piece].square;
                println!(
                    "{side} plays {from} -> {dest} (score {}, {} nodes)",
                    result.score, result.nodes
                );
                self.game.commit_piece(piece, dest);
                self.display();
                self.announce_outcome();
            }
            None => println!("{side} has no legal moves"),
        }
    }

    /// Executes the `display` command, printing the current position.
    fn display(&self) {
        println!("{}", self.game.position());
    }

    /// Executes the `captured` command, listing both sides' fallen pieces.
    fn captured(&self) {
        let position = self.game.position();
        for color in Color::all() {
            let captured = position.player(color).captured();
            let list = if captured.is_empty() {
                String::from("(none)")
            } else {
                captured
                    .iter()
                    .map(|&id| position[id].kind.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            println!("{color} pieces captured: {list}");
        }
    }

    /// Executes the `status` command.
    fn status(&self) {
        let info = self.game.info();
        match info.outcome() {
            Outcome::Ongoing => {
                let check = if self.game.position().is_in_check(info.turn()) {
                    " (in check)"
                } else {
                    ""
                };
                println!("{} to move{check}", info.turn());
            }
            outcome => println!("{outcome}"),
        }
    }

    /// Prints the outcome after a committed move, if the game just ended.
    fn announce_outcome(&self) {
        let outcome = self.game.info().outcome();
        if outcome != Outcome::Ongoing {
            println!("{outcome}");
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
