/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Index};

use crate::{Color, Piece, PieceId, PieceKind, Square};

/// The back row of a standard setup, from column `0` to column `7`.
///
/// Both sides use the same order, so the kings of both colors start on
/// column `4` regardless of which color is seated at the bottom.
const BACK_ROW: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// One side's piece bookkeeping within a [`Position`].
///
/// Holds the ids of the pieces still in play, the ids of the pieces that have
/// been captured, and a reference to the side's king. All three resolve
/// through the position's arena, so relocating or capturing a piece updates a
/// single source of truth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Player {
    in_play: Vec<PieceId>,
    captured: Vec<PieceId>,
    king: Option<PieceId>,
}

impl Player {
    /// Ids of this side's pieces still in play, in no particular order.
    #[inline(always)]
    pub fn in_play(&self) -> &[PieceId] {
        &self.in_play
    }

    /// Ids of this side's captured pieces, in capture order.
    #[inline(always)]
    pub fn captured(&self) -> &[PieceId] {
        &self.captured
    }
}

/// Which side of the board a castle happens on, identified by the column of
/// the participating rook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    /// Castling toward the rook on column `7`.
    King,
    /// Castling toward the rook on column `0`.
    Queen,
}

impl CastleSide {
    /// Both castle sides.
    #[inline(always)]
    pub const fn all() -> [Self; 2] {
        [Self::King, Self::Queen]
    }

    /// The starting column of the rook that participates in this castle.
    #[inline(always)]
    pub const fn rook_col(&self) -> u8 {
        match self {
            Self::King => Square::COLS - 1,
            Self::Queen => 0,
        }
    }

    /// Interprets a king move as a castle, if it is one.
    ///
    /// A castle presents itself as the king traveling exactly two columns
    /// along its own row; anything else is an ordinary move.
    #[inline(always)]
    pub fn of_destination(from: Square, to: Square) -> Option<Self> {
        if from.row() != to.row() {
            return None;
        }

        match to.col() as i8 - from.col() as i8 {
            2 => Some(Self::King),
            -2 => Some(Self::Queen),
            _ => None,
        }
    }
}

/// A captured piece, along with where it sat in its side's in-play roster.
///
/// The roster index lets [`Position::undo`] re-insert the piece exactly where
/// it was removed from, restoring the roster bit-for-bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture {
    piece: PieceId,
    roster_index: usize,
}

/// Everything needed to reverse a single application of the mutator.
///
/// Every call to [`Position::apply_move`] or [`Position::apply_castle`]
/// returns one of these; feeding it back to [`Position::undo`] restores the
/// exact prior position: occupancy, rosters, and has-moved flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Undo {
    /// Reverses an ordinary relocation, possibly with a capture.
    Move {
        piece: PieceId,
        from: Square,
        had_moved: bool,
        capture: Option<Capture>,
    },
    /// Reverses a castle. Neither piece had moved before, by eligibility.
    Castle {
        king: PieceId,
        king_from: Square,
        rook: PieceId,
        rook_from: Square,
    },
}

/// A complete board state: an arena of pieces, an `8x8` occupancy grid of
/// ids into that arena, and per-side rosters.
///
/// Invariant: every in-play piece occupies the grid at exactly its recorded
/// square, every grid entry points back at a piece standing on that square,
/// and each square holds at most one piece. Captured pieces appear on no
/// grid square.
///
/// The position knows its *orientation*: the color seated at the bottom two
/// rows, whose pawns therefore advance toward row `0`. The opposing pawns
/// advance toward row `7`.
///
/// A position supports two modes of evolution. Interactive play treats it as
/// a value: clone it, apply one move to the clone, and keep the clone as the
/// next snapshot in the game's history. Search instead mutates one position
/// in place through [`apply_move`](Self::apply_move) /
/// [`apply_castle`](Self::apply_castle) and reverses each mutation with
/// [`undo`](Self::undo) before trying the next branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// The arena. Pieces are pushed at setup and never removed; capture only
    /// changes roster membership.
    pieces: Vec<Piece>,

    /// Occupancy, indexed by [`Square::index`].
    grid: [Option<PieceId>; Square::COUNT],

    /// Per-side rosters, indexed by [`Color::index`].
    players: [Player; Color::COUNT],

    /// The color seated at the bottom of the board (rows 6 and 7).
    orientation: Color,
}

impl Position {
    /// Creates a standard starting position with `orientation`'s pieces on
    /// the bottom two rows.
    pub fn new(orientation: Color) -> Self {
        let mut position = Self::empty(orientation);

        position.fill_back_row(orientation, Square::ROWS - 1);
        position.fill_pawn_row(orientation, Square::ROWS - 2);
        position.fill_back_row(orientation.opponent(), 0);
        position.fill_pawn_row(orientation.opponent(), 1);

        position
    }

    /// Creates an empty board with the provided orientation.
    ///
    /// Useful for setting up custom positions with [`place`](Self::place).
    pub fn empty(orientation: Color) -> Self {
        Self {
            pieces: Vec::with_capacity(32),
            grid: [None; Square::COUNT],
            players: [Player::default(), Player::default()],
            orientation,
        }
    }

    /// Places a new, not-yet-moved piece on an empty square, returning its id.
    ///
    /// # Panics
    /// If the square is occupied, or if a second king is placed for a side.
    pub fn place(&mut self, color: Color, kind: PieceKind, square: Square) -> PieceId {
        assert!(
            self.piece_at(square).is_none(),
            "cannot place a {} on occupied square {square}",
            kind.name()
        );

        let id = PieceId(self.pieces.len() as u8);
        self.pieces.push(Piece::new(color, kind, square));
        self.grid[square.index()] = Some(id);

        let player = &mut self.players[color.index()];
        player.in_play.push(id);
        if kind == PieceKind::King {
            assert!(
                player.king.is_none(),
                "{} already has a king on the board",
                color.name()
            );
            player.king = Some(id);
        }

        id
    }

    fn fill_pawn_row(&mut self, color: Color, row: u8) {
        for col in 0..Square::COLS {
            self.place(color, PieceKind::Pawn, Square::new(row, col));
        }
    }

    fn fill_back_row(&mut self, color: Color, row: u8) {
        for (col, &kind) in BACK_ROW.iter().enumerate() {
            self.place(color, kind, Square::new(row, col as u8));
        }
    }

    /// The color seated at the bottom two rows of the board.
    #[inline(always)]
    pub const fn orientation(&self) -> Color {
        self.orientation
    }

    /// The row direction `color`'s pawns advance in: `-1` for the seated
    /// color, `+1` for its opponent.
    #[inline(always)]
    pub fn forward(&self, color: Color) -> i8 {
        if color == self.orientation {
            -1
        } else {
            1
        }
    }

    /// The id of the piece standing on `square`, if any.
    #[inline(always)]
    pub fn piece_at(&self, square: Square) -> Option<PieceId> {
        self.grid[square.index()]
    }

    /// The color of the piece standing on `square`, if any.
    #[inline(always)]
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.piece_at(square).map(|id| self[id].color)
    }

    /// One side's roster bookkeeping.
    #[inline(always)]
    pub fn player(&self, color: Color) -> &Player {
        &self.players[color.index()]
    }

    /// Ids of `color`'s pieces still in play.
    #[inline(always)]
    pub fn in_play(&self, color: Color) -> &[PieceId] {
        &self.players[color.index()].in_play
    }

    /// The id of `color`'s king.
    ///
    /// # Panics
    /// If the side has no king. A kingless side indicates a corrupted setup
    /// or a caller bug, so this fails fast rather than limping onward.
    #[inline(always)]
    pub fn king(&self, color: Color) -> PieceId {
        self.players[color.index()]
            .king
            .unwrap_or_else(|| panic!("no {} king on the board", color.name()))
    }

    /// Applies a move of `piece` to `dest`, dispatching to
    /// [`apply_castle`](Self::apply_castle) when the move is a king
    /// traveling two columns.
    ///
    /// This is the commit entry point for callers holding a destination that
    /// came out of the legality filter.
    pub fn apply(&mut self, piece: PieceId, dest: Square) -> Undo {
        if self[piece].kind == PieceKind::King {
            if let Some(side) = CastleSide::of_destination(self[piece].square, dest) {
                return self.apply_castle(piece, side);
            }
        }

        self.apply_move(piece, dest)
    }

    /// Relocates one piece to `dest`, marking it moved and capturing any
    /// opposing piece already standing there.
    ///
    /// A captured piece is transferred from its side's in-play roster to its
    /// captured roster; its arena slot (and therefore its id) survives.
    ///
    /// # Panics
    /// If the destination holds a piece of the mover's own color. That can
    /// only happen when a caller bypasses move generation, and continuing
    /// would corrupt the board invariant.
    pub fn apply_move(&mut self, piece: PieceId, dest: Square) -> Undo {
        let mover_color = self[piece].color;
        let from = self[piece].square;
        debug_assert_eq!(
            self.grid[from.index()],
            Some(piece),
            "piece {piece:?} is not standing on its recorded square {from}"
        );

        let occupant = self.grid[dest.index()];
        let capture = occupant.map(|victim| {
            let victim_color = self[victim].color;
            assert!(
                victim_color != mover_color,
                "capture target on {dest} is the mover's own color"
            );

            let player = &mut self.players[victim_color.index()];
            let roster_index = player
                .in_play
                .iter()
                .position(|&id| id == victim)
                .expect("piece on the grid is missing from its in-play roster");
            player.in_play.remove(roster_index);
            player.captured.push(victim);

            Capture {
                piece: victim,
                roster_index,
            }
        });

        self.grid[from.index()] = None;
        self.grid[dest.index()] = Some(piece);

        let mover = &mut self.pieces[piece.index()];
        let had_moved = mover.has_moved;
        mover.square = dest;
        mover.has_moved = true;

        Undo::Move {
            piece,
            from,
            had_moved,
            capture,
        }
    }

    /// Relocates the king and the applicable rook in one operation: the king
    /// two columns toward the rook, the rook to the square the king crossed.
    /// Both are marked moved. Castling never captures.
    ///
    /// The caller is responsible for eligibility (see
    /// [`legal_moves`](Self::legal_moves)); this only performs the geometry.
    pub fn apply_castle(&mut self, king: PieceId, side: CastleSide) -> Undo {
        let king_from = self[king].square;
        let row = king_from.row();
        let rook_from = Square::new(row, side.rook_col());
        let rook = self
            .piece_at(rook_from)
            .expect("castling with no rook in the corner");
        assert_eq!(
            self[rook].kind,
            PieceKind::Rook,
            "castling with a non-rook on {rook_from}"
        );

        let dir: i8 = if side.rook_col() > king_from.col() { 1 } else { -1 };
        let king_dest = king_from
            .offset(0, 2 * dir)
            .expect("castling king destination is off the board");
        let rook_dest = king_from
            .offset(0, dir)
            .expect("castling rook destination is off the board");

        debug_assert!(
            !self[king].has_moved && !self[rook].has_moved,
            "castling with a previously-moved king or rook"
        );
        debug_assert!(
            self.piece_at(king_dest).is_none() && self.piece_at(rook_dest).is_none(),
            "castling through occupied squares"
        );

        self.grid[king_from.index()] = None;
        self.grid[rook_from.index()] = None;
        self.grid[king_dest.index()] = Some(king);
        self.grid[rook_dest.index()] = Some(rook);

        let king_piece = &mut self.pieces[king.index()];
        king_piece.square = king_dest;
        king_piece.has_moved = true;

        let rook_piece = &mut self.pieces[rook.index()];
        rook_piece.square = rook_dest;
        rook_piece.has_moved = true;

        Undo::Castle {
            king,
            king_from,
            rook,
            rook_from,
        }
    }

    /// Reverses a mutation, restoring the exact position that existed before
    /// the corresponding `apply_*` call.
    ///
    /// Undo values must be consumed in reverse order of their creation.
    pub fn undo(&mut self, undo: Undo) {
        match undo {
            Undo::Move {
                piece,
                from,
                had_moved,
                capture,
            } => {
                let dest = self[piece].square;
                self.grid[dest.index()] = None;
                self.grid[from.index()] = Some(piece);

                let mover = &mut self.pieces[piece.index()];
                mover.square = from;
                mover.has_moved = had_moved;

                if let Some(Capture {
                    piece: victim,
                    roster_index,
                }) = capture
                {
                    // The victim never left its square, so only the grid and
                    // the rosters need repair.
                    self.grid[dest.index()] = Some(victim);

                    let victim_color = self.pieces[victim.index()].color;
                    let player = &mut self.players[victim_color.index()];
                    let popped = player.captured.pop();
                    debug_assert_eq!(
                        popped,
                        Some(victim),
                        "undo out of order: another capture was applied after this one"
                    );
                    player.in_play.insert(roster_index, victim);
                }
            }

            Undo::Castle {
                king,
                king_from,
                rook,
                rook_from,
            } => {
                let king_dest = self[king].square;
                let rook_dest = self[rook].square;
                self.grid[king_dest.index()] = None;
                self.grid[rook_dest.index()] = None;
                self.grid[king_from.index()] = Some(king);
                self.grid[rook_from.index()] = Some(rook);

                let king_piece = &mut self.pieces[king.index()];
                king_piece.square = king_from;
                king_piece.has_moved = false;

                let rook_piece = &mut self.pieces[rook.index()];
                rook_piece.square = rook_from;
                rook_piece.has_moved = false;
            }
        }
    }
}

impl Index<PieceId> for Position {
    type Output = Piece;

    #[inline(always)]
    fn index(&self, id: PieceId) -> &Self::Output {
        &self.pieces[id.index()]
    }
}

impl fmt::Display for Position {
    /// Draws the board as a grid with row indices down the left side and
    /// column indices along the bottom. White pieces are uppercase.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let divider = "  +---+---+---+---+---+---+---+---+";

        for row in 0..Square::ROWS {
            writeln!(f, "{divider}")?;
            write!(f, "{row} |")?;
            for col in 0..Square::COLS {
                let square = Square::new(row, col);
                let c = self
                    .piece_at(square)
                    .map(|id| self[id].char())
                    .unwrap_or(' ');
                write!(f, " {c} |")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{divider}")?;
        write!(f, "  ")?;
        for col in 0..Square::COLS {
            write!(f, "  {col} ")?;
        }

        Ok(())
    }
}
