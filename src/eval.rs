/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Color, PieceKind, Position, Score};

/// Encapsulates the logic of scoring a chess position.
///
/// Scores are always computed relative to a chosen *perspective* side: a
/// positive/high number is good for that side, a negative number is better
/// for its opponent. During search, the perspective is the automated side.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    /// The position to evaluate.
    position: &'a Position,

    /// The side from whose point of view the score is computed.
    perspective: Color,
}

impl<'a> Evaluator<'a> {
    /// Construct a new [`Evaluator`] for the given perspective.
    #[inline(always)]
    pub fn new(position: &'a Position, perspective: Color) -> Self {
        Self {
            position,
            perspective,
        }
    }

    /// Evaluate the position: the in-play material of the perspective side
    /// minus the in-play material of its opponent.
    ///
    /// Captured pieces contribute nothing, so winning an exchange shows up
    /// directly in the score.
    pub fn eval(self) -> Score {
        let mut score = Score::DRAW;

        for color in Color::all() {
            for &id in self.position.in_play(color) {
                let value = value_of(self.position[id].kind);
                if color == self.perspective {
                    score += value;
                } else {
                    score -= value;
                }
            }
        }

        score
    }
}

/// Returns a value of the provided [`PieceKind`], in centipawns.
///
/// Values are obtained from here: <https://www.chessprogramming.org/Simplified_Evaluation_Function>
///
/// # Example
/// ```
/// # use ruy::{value_of, PieceKind};
/// assert_eq!(value_of(PieceKind::Queen), 900);
/// ```
#[inline(always)]
pub const fn value_of(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 0, // King is invaluable, but 0 is easier to work with in computations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Square;

    #[test]
    fn test_standard_setup_is_balanced() {
        let position = Position::new(Color::White);
        assert_eq!(Evaluator::new(&position, Color::White).eval(), Score::DRAW);
        assert_eq!(Evaluator::new(&position, Color::Black).eval(), Score::DRAW);
    }

    #[test]
    fn test_material_counts_only_in_play_pieces() {
        let mut position = Position::empty(Color::White);
        position.place(Color::White, PieceKind::King, Square::new(7, 4));
        position.place(Color::Black, PieceKind::King, Square::new(0, 4));
        let rook = position.place(Color::White, PieceKind::Rook, Square::new(4, 0));
        position.place(Color::Black, PieceKind::Knight, Square::new(4, 4));

        let score = Evaluator::new(&position, Color::White).eval();
        assert_eq!(score, Score(value_of(PieceKind::Rook) - value_of(PieceKind::Knight)));

        // Capturing the knight removes it from the evaluation entirely
        position.apply_move(rook, Square::new(4, 4));
        let score = Evaluator::new(&position, Color::White).eval();
        assert_eq!(score, Score(value_of(PieceKind::Rook)));

        // And the opposing perspective sees the mirror image
        let score = Evaluator::new(&position, Color::Black).eval();
        assert_eq!(score, -Score(value_of(PieceKind::Rook)));
    }
}
