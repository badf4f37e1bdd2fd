/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{Color, PieceId, Position, Square};

/// How a game stands: still being played, won, or drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Outcome {
    /// The game is still going.
    #[default]
    Ongoing,

    /// The named side delivered checkmate.
    Winner(Color),

    /// The side to move has no legal move but is not in check.
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ongoing => f.write_str("ongoing"),
            Self::Winner(color) => write!(f, "checkmate, {color} wins"),
            Self::Draw => f.write_str("stalemate, drawn"),
        }
    }
}

/// Per-game state: whose turn it is, how the game stands, and which color
/// the human chose to play.
///
/// Created at game start, refreshed after every committed move, and replaced
/// wholesale on a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameInfo {
    turn: Color,
    outcome: Outcome,
    player_color: Color,
}

impl GameInfo {
    /// Fresh info for a game where the human plays `player_color`.
    ///
    /// White always moves first.
    pub fn new(player_color: Color) -> Self {
        Self {
            turn: Color::White,
            outcome: Outcome::default(),
            player_color,
        }
    }

    /// The side whose turn it is.
    #[inline(always)]
    pub const fn turn(&self) -> Color {
        self.turn
    }

    /// How the game currently stands.
    #[inline(always)]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// The color the human chose to play.
    #[inline(always)]
    pub const fn player_color(&self) -> Color {
        self.player_color
    }

    /// The color of the automated opponent.
    #[inline(always)]
    pub const fn engine_color(&self) -> Color {
        self.player_color.opponent()
    }
}

/// A committed game: an ordered history of [`Position`] snapshots plus the
/// [`GameInfo`] describing where things stand.
///
/// Every committed move clones the current snapshot, applies the move to the
/// clone, and appends it, so earlier positions remain intact for review.
/// Stepping backward and then committing a move discards the abandoned
/// future, exactly like branching off a replay.
#[derive(Debug, Clone)]
pub struct Game {
    info: GameInfo,
    history: Vec<Position>,
    index: usize,
}

impl Game {
    /// Starts a new game with the human seated at the bottom as
    /// `player_color`.
    pub fn new(player_color: Color) -> Self {
        Self {
            info: GameInfo::new(player_color),
            history: vec![Position::new(player_color)],
            index: 0,
        }
    }

    /// The position currently on display.
    #[inline(always)]
    pub fn position(&self) -> &Position {
        &self.history[self.index]
    }

    /// Turn, outcome, and chosen colors.
    #[inline(always)]
    pub const fn info(&self) -> &GameInfo {
        &self.info
    }

    /// Number of committed moves leading up to the current position.
    #[inline(always)]
    pub fn ply(&self) -> usize {
        self.index
    }

    /// The legal destinations for the piece on `square`, as the UI should
    /// offer them: empty when the square is vacant, when the piece belongs
    /// to the side not on turn, or when the game is over.
    pub fn selectable_moves(&self, square: Square) -> Vec<Square> {
        if self.info.outcome != Outcome::Ongoing {
            return Vec::new();
        }

        let Some(piece) = self.position().piece_at(square) else {
            return Vec::new();
        };

        if self.position()[piece].color != self.info.turn {
            return Vec::new();
        }

        self.position().legal_moves(piece)
    }

    /// Commits the move of the piece on `from` to `to`, appending a new
    /// snapshot and refreshing the turn and outcome.
    ///
    /// Returns `false` — leaving the game provably unchanged — if there is
    /// no piece on `from`, the piece is not the mover's, the destination is
    /// not legal, or the game is already over. Illegal attempts are a
    /// defensive no-op, never an error.
    pub fn commit(&mut self, from: Square, to: Square) -> bool {
        if self.info.outcome != Outcome::Ongoing {
            return false;
        }

        let Some(piece) = self.position().piece_at(from) else {
            return false;
        };

        if self.position()[piece].color != self.info.turn {
            return false;
        }

        if !self.position().legal_moves(piece).contains(&to) {
            return false;
        }

        let mut next = self.position().clone();
        next.apply(piece, to);

        self.history.truncate(self.index + 1);
        self.history.push(next);
        self.index += 1;
        self.refresh();

        true
    }

    /// Commits a move chosen by the search, given as a piece id valid for
    /// the current snapshot.
    ///
    /// Same no-op semantics as [`commit`](Self::commit).
    pub fn commit_piece(&mut self, piece: PieceId, to: Square) -> bool {
        self.commit(self.position()[piece].square, to)
    }

    /// Steps one committed move backward in history, if possible.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }

        self.index -= 1;
        self.refresh();
        true
    }

    /// Steps one committed move forward in history, if possible.
    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.history.len() {
            return false;
        }

        self.index += 1;
        self.refresh();
        true
    }

    /// Re-derives the turn and outcome from the current snapshot.
    ///
    /// The turn follows from the ply count (White moves first); the outcome
    /// is recomputed rather than cached so that stepping through history
    /// always reports the truth of the displayed position.
    fn refresh(&mut self) {
        self.info.turn = if self.index % 2 == 0 {
            Color::White
        } else {
            Color::Black
        };

        self.info.outcome = outcome_of(self.position(), self.info.turn);
    }
}

/// Computes how a position stands with `to_move` on turn: a checkmated side
/// loses, a stalemated side to move draws, anything else is still ongoing.
pub fn outcome_of(position: &Position, to_move: Color) -> Outcome {
    for color in Color::all() {
        if position.is_checkmate(color) {
            return Outcome::Winner(color.opponent());
        }
    }

    if position.is_stalemate(to_move) {
        return Outcome::Draw;
    }

    Outcome::Ongoing
}
