/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Color, Evaluator, PieceId, Position, Score, Square, XoShiRo};

/// Default number of plies to search when the caller does not supply one.
pub const DEFAULT_DEPTH: usize = 2;

/// The result of a search, containing the best move found, score, and total
/// nodes searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchResult {
    /// Number of nodes searched.
    pub nodes: u64,

    /// Best move found during the search: the piece to move and its
    /// destination. `None` only when the searching side has no legal move.
    pub bestmove: Option<(PieceId, Square)>,

    /// Evaluation of the position after `bestmove` is made.
    pub score: Score,
}

/// Executes a fixed-depth minimax search with alpha-beta pruning,
/// maximizing for one side.
///
/// The search owns a private working copy of the position. Each candidate
/// move is applied to that copy, explored, and reversed before the next
/// candidate, so the caller's position is never touched and no history
/// accumulates mid-search.
///
/// Runs synchronously to completion; there is no budget or cancellation.
pub struct Search {
    /// The working copy of the position being searched.
    position: Position,

    /// The side the search maximizes for.
    engine: Color,

    /// How many plies deep to look.
    depth: usize,

    /// Number of nodes visited so far.
    nodes: u64,

    /// Source of the fallback move, see [`Search::random_option`].
    prng: XoShiRo,
}

impl Search {
    /// Construct a new [`Search`] that will pick a move for `engine` on (a
    /// copy of) the provided position.
    pub fn new(position: &Position, engine: Color, depth: usize) -> Self {
        Self {
            position: position.clone(),
            engine,
            depth,
            nodes: 0,
            prng: XoShiRo::new(),
        }
    }

    /// Runs the search to completion and returns its result.
    pub fn start(mut self) -> SearchResult {
        // A random legal move up front, so that *some* legal move is
        // returned even if no candidate ever raises the initial bound.
        let mut best = self.random_option();
        let mut best_score = -Score::INF;
        let mut alpha = -Score::INF;

        let options = self.options(self.engine);
        if options.is_empty() {
            // No move to make: the game is already decided at the root.
            let score = if self.position.is_in_check(self.engine) {
                -Score::MATE
            } else {
                Score::DRAW
            };

            return SearchResult {
                nodes: self.nodes,
                bestmove: None,
                score,
            };
        }

        for (piece, dest) in options {
            let undo = self.position.apply(piece, dest);
            let score = self.minimax(self.depth.saturating_sub(1), alpha, Score::INF, false);
            self.position.undo(undo);

            if score > best_score {
                best_score = score;
                best = Some((piece, dest));
            }
            alpha = alpha.max(best_score);
        }

        SearchResult {
            nodes: self.nodes,
            bestmove: best,
            score: best_score,
        }
    }

    /// Recursive minimax with a running `[alpha, beta]` window.
    ///
    /// `maximizing` is `true` when it is the engine side's turn within the
    /// search tree. Terminals, in order: the engine's opponent is
    /// checkmated, the engine is checkmated, the depth budget is exhausted,
    /// or the mover has no legal move while not in check (a dead draw).
    fn minimax(&mut self, depth: usize, mut alpha: Score, mut beta: Score, maximizing: bool) -> Score {
        self.nodes += 1;

        if self.position.is_checkmate(self.engine.opponent()) {
            return Score::MATE;
        }
        if self.position.is_checkmate(self.engine) {
            return -Score::MATE;
        }
        if depth == 0 {
            return Evaluator::new(&self.position, self.engine).eval();
        }

        let mover = if maximizing {
            self.engine
        } else {
            self.engine.opponent()
        };

        let options = self.options(mover);
        if options.is_empty() {
            // Checkmates were handled above, so this is stalemate.
            return Score::DRAW;
        }

        if maximizing {
            let mut best = -Score::INF;
            for (piece, dest) in options {
                let undo = self.position.apply(piece, dest);
                let score = self.minimax(depth - 1, alpha, beta, false);
                self.position.undo(undo);

                best = best.max(score);
                alpha = alpha.max(best);
                if alpha >= beta {
                    break;
                }
            }
            best
        } else {
            let mut best = Score::INF;
            for (piece, dest) in options {
                let undo = self.position.apply(piece, dest);
                let score = self.minimax(depth - 1, alpha, beta, true);
                self.position.undo(undo);

                best = best.min(score);
                beta = beta.min(best);
                if alpha >= beta {
                    break;
                }
            }
            best
        }
    }

    /// Every legal `(piece, destination)` pair available to `side`, in no
    /// particular order.
    fn options(&self, side: Color) -> Vec<(PieceId, Square)> {
        self.position
            .in_play(side)
            .iter()
            .flat_map(|&id| {
                self.position
                    .legal_moves(id)
                    .into_iter()
                    .map(move |dest| (id, dest))
            })
            .collect()
    }

    /// Picks a uniformly random piece among those with at least one legal
    /// move, then a uniformly random destination for it.
    fn random_option(&mut self) -> Option<(PieceId, Square)> {
        let mut movable = Vec::new();
        for &id in self.position.in_play(self.engine) {
            let moves = self.position.legal_moves(id);
            if !moves.is_empty() {
                movable.push((id, moves));
            }
        }

        if movable.is_empty() {
            return None;
        }

        let (id, moves) = &movable[self.prng.next_index(movable.len())];
        let dest = moves[self.prng.next_index(moves.len())];
        Some((*id, dest))
    }
}
