/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{CastleSide, Color, Piece, PieceId, PieceKind, Position, Square};

/// Ray directions for a rook, and half of a queen.
const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Ray directions for a bishop, and the other half of a queen.
const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// The 8 squares adjacent to a king.
const ADJACENT: [(i8, i8); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// The 8 leaps of a knight.
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, 1),
    (-2, -1),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (1, 2),
    (-1, 2),
];

impl Position {
    /// Produces the squares `piece` could reach, ignoring whether the move
    /// would leave its own king in check.
    ///
    /// Geometry and blocking only: a destination is rejected if it is off
    /// the board, occupied by a same-color piece, or (for sliders) shadowed
    /// by any piece closer along the ray. Output order is unspecified.
    pub fn pseudo_legal_moves(&self, piece: PieceId) -> Vec<Square> {
        let piece = &self[piece];
        let mut moves = Vec::new();

        match piece.kind {
            PieceKind::Pawn => self.pawn_moves(piece, &mut moves),
            PieceKind::Knight => self.leaper_moves(piece, &KNIGHT_JUMPS, &mut moves),
            PieceKind::King => self.leaper_moves(piece, &ADJACENT, &mut moves),
            PieceKind::Bishop => self.slider_moves(piece, &DIAGONALS, &mut moves),
            PieceKind::Rook => self.slider_moves(piece, &ORTHOGONALS, &mut moves),
            PieceKind::Queen => {
                self.slider_moves(piece, &ORTHOGONALS, &mut moves);
                self.slider_moves(piece, &DIAGONALS, &mut moves);
            }
        }

        moves
    }

    /// Walks each ray outward from the piece, stopping at the board edge or
    /// the first occupied square. The first enemy square on a ray is itself
    /// reachable; a friendly square is not.
    fn slider_moves(&self, piece: &Piece, directions: &[(i8, i8); 4], moves: &mut Vec<Square>) {
        for &(dr, dc) in directions {
            let mut sq = piece.square;
            while let Some(dest) = sq.offset(dr, dc) {
                match self.color_at(dest) {
                    None => {
                        moves.push(dest);
                        sq = dest;
                    }
                    Some(color) if color != piece.color => {
                        moves.push(dest);
                        break;
                    }
                    Some(_) => break,
                }
            }
        }
    }

    /// Kings and knights move by fixed offsets with no blocking check.
    fn leaper_moves(&self, piece: &Piece, offsets: &[(i8, i8); 8], moves: &mut Vec<Square>) {
        for &(dr, dc) in offsets {
            if let Some(dest) = piece.square.offset(dr, dc) {
                if self.color_at(dest) != Some(piece.color) {
                    moves.push(dest);
                }
            }
        }
    }

    /// Forward-one when unoccupied, forward-two when additionally unmoved
    /// with a clear intermediate square, and the two forward-diagonals only
    /// as captures.
    fn pawn_moves(&self, piece: &Piece, moves: &mut Vec<Square>) {
        let forward = self.forward(piece.color);

        if let Some(one) = piece.square.offset(forward, 0) {
            if self.piece_at(one).is_none() {
                moves.push(one);

                if !piece.has_moved {
                    if let Some(two) = one.offset(forward, 0) {
                        if self.piece_at(two).is_none() {
                            moves.push(two);
                        }
                    }
                }
            }
        }

        for dc in [-1, 1] {
            if let Some(diagonal) = piece.square.offset(forward, dc) {
                if self
                    .color_at(diagonal)
                    .is_some_and(|color| color != piece.color)
                {
                    moves.push(diagonal);
                }
            }
        }
    }

    /// The two forward-diagonal squares a pawn guards, regardless of what
    /// stands on them.
    ///
    /// A pawn's attack set is not its move set: the diagonals only become
    /// *moves* when an enemy occupies them, but they are guarded either way,
    /// and the forward pushes are never attacks at all.
    fn pawn_attacks(&self, piece: &Piece) -> Vec<Square> {
        let forward = self.forward(piece.color);
        [-1, 1]
            .into_iter()
            .filter_map(|dc| piece.square.offset(forward, dc))
            .collect()
    }

    /// Returns `true` if any of `by`'s in-play pieces attacks `target`:
    /// pawns through the squares they guard, every other piece through its
    /// pseudo-legal moves.
    pub fn is_square_attacked(&self, target: Square, by: Color) -> bool {
        self.in_play(by).iter().any(|&id| {
            let piece = &self[id];
            match piece.kind {
                PieceKind::Pawn => self.pawn_attacks(piece).contains(&target),
                _ => self.pseudo_legal_moves(id).contains(&target),
            }
        })
    }

    /// Returns `true` if `side`'s king is attacked by any opposing piece.
    pub fn is_in_check(&self, side: Color) -> bool {
        let king_square = self[self.king(side)].square;
        self.is_square_attacked(king_square, side.opponent())
    }

    /// Produces the squares `piece` may actually move to: pseudo-legal
    /// destinations that do not leave the mover's own king in check, plus
    /// castling destinations when `piece` is an eligible king.
    ///
    /// Each candidate is vetted by applying it to a scratch copy with the
    /// real mutator and reversing it afterwards, so the position observable
    /// to the caller is never altered.
    pub fn legal_moves(&self, piece: PieceId) -> Vec<Square> {
        let color = self[piece].color;
        let mut scratch = self.clone();

        let mut moves = self.pseudo_legal_moves(piece);
        moves.retain(|&dest| {
            let undo = scratch.apply_move(piece, dest);
            let safe = !scratch.is_in_check(color);
            scratch.undo(undo);
            safe
        });

        if self[piece].kind == PieceKind::King {
            moves.extend(self.castle_moves(piece));
        }

        moves
    }

    /// Returns `true` if `side` has at least one legal move among all of its
    /// in-play pieces.
    pub fn has_any_legal_move(&self, side: Color) -> bool {
        self.in_play(side)
            .iter()
            .any(|&id| !self.legal_moves(id).is_empty())
    }

    /// Returns `true` if `side`'s king is in check and no legal move exists
    /// for any of `side`'s pieces.
    pub fn is_checkmate(&self, side: Color) -> bool {
        self.is_in_check(side) && !self.has_any_legal_move(side)
    }

    /// Returns `true` if `side`'s king is NOT in check yet no legal move
    /// exists for any of `side`'s pieces.
    pub fn is_stalemate(&self, side: Color) -> bool {
        !self.is_in_check(side) && !self.has_any_legal_move(side)
    }

    /// The castling destinations currently available to `king`: for each
    /// eligible side, the square two columns toward that side's rook.
    fn castle_moves(&self, king: PieceId) -> Vec<Square> {
        let from = self[king].square;

        CastleSide::all()
            .into_iter()
            .filter(|&side| self.castle_eligible(king, side))
            .map(|side| {
                let dir: i8 = if side.rook_col() > from.col() { 1 } else { -1 };
                from.offset(0, 2 * dir).expect("castle eligibility guarantees room")
            })
            .collect()
    }

    /// Checks every castling precondition for one side of the board:
    ///
    /// 1. a same-color, never-moved rook stands on the king's row in that
    ///    side's corner, at least three columns away;
    /// 2. the king has never moved;
    /// 3. the squares strictly between king and rook are empty;
    /// 4. the king is not currently in check;
    /// 5. neither square the king crosses (including its destination) is
    ///    attacked by an opposing piece.
    fn castle_eligible(&self, king: PieceId, side: CastleSide) -> bool {
        let king_piece = &self[king];
        if king_piece.has_moved {
            return false;
        }

        let from = king_piece.square;
        let row = from.row();
        let rook_square = Square::new(row, side.rook_col());
        let Some(rook) = self.piece_at(rook_square) else {
            return false;
        };

        let rook_piece = &self[rook];
        if rook_piece.kind != PieceKind::Rook
            || rook_piece.color != king_piece.color
            || rook_piece.has_moved
        {
            return false;
        }

        // The king travels two columns, so its destination must still lie
        // strictly between it and the rook.
        let span = side.rook_col() as i8 - from.col() as i8;
        if span.abs() < 3 {
            return false;
        }

        let dir = span.signum();
        let mut col = from.col() as i8 + dir;
        while col != side.rook_col() as i8 {
            if self.piece_at(Square::new(row, col as u8)).is_some() {
                return false;
            }
            col += dir;
        }

        if self.is_in_check(king_piece.color) {
            return false;
        }

        let enemy = king_piece.color.opponent();
        (1..=2).all(|step| {
            let transit = Square::new(row, (from.col() as i8 + dir * step) as u8);
            !self.is_square_attacked(transit, enemy)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kings_only() -> Position {
        let mut position = Position::empty(Color::White);
        position.place(Color::White, PieceKind::King, Square::new(7, 4));
        position.place(Color::Black, PieceKind::King, Square::new(0, 4));
        position
    }

    fn assert_moves(mut actual: Vec<Square>, mut expected: Vec<Square>) {
        actual.sort();
        expected.sort();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_knight_leaps_over_blockers() {
        let position = Position::new(Color::White);
        let knight = position.piece_at(Square::new(7, 1)).unwrap();

        // Boxed in by its own pawns, yet both forward leaps are available
        assert_moves(
            position.pseudo_legal_moves(knight),
            vec![Square::new(5, 0), Square::new(5, 2)],
        );
    }

    #[test]
    fn test_pawn_steps() {
        let mut position = kings_only();
        let pawn = position.place(Color::White, PieceKind::Pawn, Square::new(6, 3));

        // Unmoved: single and double step
        assert_moves(
            position.pseudo_legal_moves(pawn),
            vec![Square::new(5, 3), Square::new(4, 3)],
        );

        // A blocker on the intermediate square stops both steps
        let blocker = position.place(Color::Black, PieceKind::Knight, Square::new(5, 3));
        assert_moves(position.pseudo_legal_moves(pawn), vec![]);

        // A blocker on the destination square stops only the double step
        let undo = position.apply_move(blocker, Square::new(4, 3));
        assert_moves(position.pseudo_legal_moves(pawn), vec![Square::new(5, 3)]);
        position.undo(undo);

        // Diagonals only as captures
        position.place(Color::Black, PieceKind::Pawn, Square::new(5, 2));
        position.place(Color::White, PieceKind::Pawn, Square::new(5, 4));
        assert_moves(position.pseudo_legal_moves(pawn), vec![Square::new(5, 2)]);
    }

    #[test]
    fn test_pawn_direction_follows_orientation() {
        let mut position = Position::empty(Color::Black);
        position.place(Color::White, PieceKind::King, Square::new(0, 4));
        position.place(Color::Black, PieceKind::King, Square::new(7, 4));

        // With Black seated at the bottom, White's pawns advance toward row 7
        let pawn = position.place(Color::White, PieceKind::Pawn, Square::new(1, 0));
        assert_moves(
            position.pseudo_legal_moves(pawn),
            vec![Square::new(2, 0), Square::new(3, 0)],
        );
    }

    #[test]
    fn test_slider_stops_at_first_blocker() {
        let mut position = kings_only();
        let rook = position.place(Color::White, PieceKind::Rook, Square::new(3, 3));
        position.place(Color::Black, PieceKind::Pawn, Square::new(3, 5));
        position.place(Color::White, PieceKind::Pawn, Square::new(5, 3));

        let moves = position.pseudo_legal_moves(rook);

        // The enemy pawn's square is reachable; nothing beyond it is
        assert!(moves.contains(&Square::new(3, 5)));
        assert!(!moves.contains(&Square::new(3, 6)));
        assert!(!moves.contains(&Square::new(3, 7)));

        // The friendly pawn's square is not reachable, nor past it
        assert!(moves.contains(&Square::new(4, 3)));
        assert!(!moves.contains(&Square::new(5, 3)));
        assert!(!moves.contains(&Square::new(6, 3)));
    }

    #[test]
    fn test_no_moves_beyond_any_blocker() {
        // Blocking symmetry on the full starting position: no slider ray
        // extends past the first occupied square in its direction.
        let position = Position::new(Color::White);
        for color in Color::all() {
            for &id in position.in_play(color) {
                let piece = &position[id];
                if !matches!(
                    piece.kind,
                    PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
                ) {
                    continue;
                }

                for dest in position.pseudo_legal_moves(id) {
                    let dr = (dest.row() as i8 - piece.square.row() as i8).signum();
                    let dc = (dest.col() as i8 - piece.square.col() as i8).signum();
                    let mut sq = piece.square.offset(dr, dc).unwrap();
                    while sq != dest {
                        assert!(
                            position.piece_at(sq).is_none(),
                            "{piece} reaches {dest} through occupied {sq}"
                        );
                        sq = sq.offset(dr, dc).unwrap();
                    }
                }
            }
        }
    }

    #[test]
    fn test_check_detection() {
        let mut position = kings_only();
        assert!(!position.is_in_check(Color::Black));

        position.place(Color::White, PieceKind::Rook, Square::new(5, 4));
        assert!(position.is_in_check(Color::Black));
        assert!(!position.is_in_check(Color::White));

        // Interpose a piece and the check disappears
        position.place(Color::Black, PieceKind::Bishop, Square::new(3, 4));
        assert!(!position.is_in_check(Color::Black));
    }

    #[test]
    fn test_pawn_guards_empty_diagonals_but_not_its_path() {
        let mut position = kings_only();
        position.place(Color::Black, PieceKind::Pawn, Square::new(3, 3));

        // With White seated, a black pawn advances toward row 7 and guards
        // both forward diagonals even though they are empty
        assert!(position.is_square_attacked(Square::new(4, 2), Color::Black));
        assert!(position.is_square_attacked(Square::new(4, 4), Color::Black));

        // The squares it can push to are not attacked
        assert!(!position.is_square_attacked(Square::new(4, 3), Color::Black));
        assert!(!position.is_square_attacked(Square::new(5, 3), Color::Black));
    }

    #[test]
    fn test_pawn_check_detection_unchanged() {
        let mut position = kings_only();
        // Diagonally adjacent to the black king, on the attacking side
        position.place(Color::White, PieceKind::Pawn, Square::new(1, 3));

        assert!(position.is_in_check(Color::Black));

        // A pawn directly in front of the king gives no check
        let mut position = kings_only();
        position.place(Color::White, PieceKind::Pawn, Square::new(1, 4));
        assert!(!position.is_in_check(Color::Black));
    }

    #[test]
    fn test_legal_moves_never_leave_own_king_attacked() {
        let mut position = kings_only();
        // This knight is pinned against its king by the enemy rook
        let knight = position.place(Color::Black, PieceKind::Knight, Square::new(2, 4));
        position.place(Color::White, PieceKind::Rook, Square::new(5, 4));

        assert!(!position.pseudo_legal_moves(knight).is_empty());
        assert_moves(position.legal_moves(knight), vec![]);
    }

    #[test]
    fn test_legal_moves_must_resolve_check() {
        let mut position = kings_only();
        position.place(Color::White, PieceKind::Rook, Square::new(5, 4));
        let bishop = position.place(Color::Black, PieceKind::Bishop, Square::new(2, 2));

        // The king is in check; the bishop's only legal move blocks the ray
        assert_moves(position.legal_moves(bishop), vec![Square::new(4, 4)]);
    }

    #[test]
    fn test_filter_leaves_position_untouched() {
        let position = Position::new(Color::White);
        let snapshot = position.clone();

        for color in Color::all() {
            for &id in position.in_play(color) {
                let _ = position.legal_moves(id);
            }
        }

        assert_eq!(position, snapshot);
    }

    #[test]
    fn test_checkmate_back_rank() {
        let mut position = kings_only();
        position.place(Color::White, PieceKind::Rook, Square::new(0, 0));
        position.place(Color::White, PieceKind::Rook, Square::new(1, 7));

        assert!(position.is_in_check(Color::Black));
        assert!(position.is_checkmate(Color::Black));
        assert!(!position.is_checkmate(Color::White));
    }

    #[test]
    fn test_check_with_escape_is_not_checkmate() {
        let mut position = kings_only();
        position.place(Color::White, PieceKind::Rook, Square::new(0, 0));

        assert!(position.is_in_check(Color::Black));
        assert!(!position.is_checkmate(Color::Black));
    }

    #[test]
    fn test_cornered_king_is_stalemate_not_checkmate() {
        // A lone king in the corner, every adjacent square covered by the
        // two queens, but the king itself unattacked.
        let mut position = Position::empty(Color::White);
        position.place(Color::White, PieceKind::King, Square::new(7, 7));
        let king = position.place(Color::Black, PieceKind::King, Square::new(0, 0));
        position.place(Color::White, PieceKind::Queen, Square::new(1, 2));
        position.place(Color::White, PieceKind::Queen, Square::new(2, 1));

        assert!(!position.is_in_check(Color::Black));
        assert_moves(position.legal_moves(king), vec![]);
        assert!(!position.is_checkmate(Color::Black));
        assert!(position.is_stalemate(Color::Black));
    }

    #[test]
    fn test_castling_both_sides_when_clear() {
        let mut position = Position::empty(Color::White);
        let king = position.place(Color::White, PieceKind::King, Square::new(7, 4));
        position.place(Color::White, PieceKind::Rook, Square::new(7, 0));
        position.place(Color::White, PieceKind::Rook, Square::new(7, 7));
        position.place(Color::Black, PieceKind::King, Square::new(0, 4));

        let moves = position.legal_moves(king);
        assert!(moves.contains(&Square::new(7, 6)), "king-side castle missing");
        assert!(moves.contains(&Square::new(7, 2)), "queen-side castle missing");
    }

    #[test]
    fn test_castling_requires_unmoved_pieces() {
        let mut position = Position::empty(Color::White);
        let king = position.place(Color::White, PieceKind::King, Square::new(7, 4));
        let rook = position.place(Color::White, PieceKind::Rook, Square::new(7, 7));
        position.place(Color::Black, PieceKind::King, Square::new(0, 4));

        // Move the rook away and back; rights are gone for good
        position.apply_move(rook, Square::new(5, 7));
        position.apply_move(rook, Square::new(7, 7));
        assert!(!position.legal_moves(king).contains(&Square::new(7, 6)));
    }

    #[test]
    fn test_castling_blocked_by_intervening_piece() {
        let mut position = Position::empty(Color::White);
        let king = position.place(Color::White, PieceKind::King, Square::new(7, 4));
        position.place(Color::White, PieceKind::Rook, Square::new(7, 7));
        position.place(Color::White, PieceKind::Bishop, Square::new(7, 5));
        position.place(Color::Black, PieceKind::King, Square::new(0, 4));

        assert!(!position.legal_moves(king).contains(&Square::new(7, 6)));
    }

    #[test]
    fn test_castling_denied_while_in_check() {
        let mut position = Position::empty(Color::White);
        let king = position.place(Color::White, PieceKind::King, Square::new(7, 4));
        position.place(Color::White, PieceKind::Rook, Square::new(7, 7));
        position.place(Color::Black, PieceKind::King, Square::new(0, 4));
        position.place(Color::Black, PieceKind::Rook, Square::new(3, 4));

        assert!(position.is_in_check(Color::White));
        assert!(!position.legal_moves(king).contains(&Square::new(7, 6)));
    }

    #[test]
    fn test_castling_denied_through_attacked_square() {
        let mut position = Position::empty(Color::White);
        let king = position.place(Color::White, PieceKind::King, Square::new(7, 4));
        position.place(Color::White, PieceKind::Rook, Square::new(7, 7));
        position.place(Color::Black, PieceKind::King, Square::new(0, 4));
        // Covers the square the king would cross, but not the king itself
        position.place(Color::Black, PieceKind::Rook, Square::new(3, 5));

        assert!(!position.is_in_check(Color::White));
        assert!(!position.legal_moves(king).contains(&Square::new(7, 6)));
    }

    #[test]
    fn test_castling_into_attacked_destination_denied() {
        let mut position = Position::empty(Color::White);
        let king = position.place(Color::White, PieceKind::King, Square::new(7, 4));
        position.place(Color::White, PieceKind::Rook, Square::new(7, 7));
        position.place(Color::Black, PieceKind::King, Square::new(0, 4));
        position.place(Color::Black, PieceKind::Rook, Square::new(3, 6));

        assert!(!position.legal_moves(king).contains(&Square::new(7, 6)));
    }

    #[test]
    fn test_castling_denied_through_pawn_guarded_square() {
        // The transit square is empty, so only a pawn-aware attack model
        // can see that the king would cross a guarded square.
        let mut position = Position::empty(Color::White);
        let king = position.place(Color::White, PieceKind::King, Square::new(7, 4));
        position.place(Color::White, PieceKind::Rook, Square::new(7, 7));
        position.place(Color::Black, PieceKind::King, Square::new(0, 4));
        let pawn = position.place(Color::Black, PieceKind::Pawn, Square::new(6, 6));

        assert!(!position.is_in_check(Color::White));
        assert!(!position.legal_moves(king).contains(&Square::new(7, 6)));

        // Move the pawn out of guarding range and the castle reappears
        position.apply_move(pawn, Square::new(4, 6));
        assert!(position.legal_moves(king).contains(&Square::new(7, 6)));
    }
}
