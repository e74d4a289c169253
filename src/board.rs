/*
  Shogidō, a shogi position and move-generation core.
  Copyright (C) 2022 The Shogido Authors (see AUTHORS.md file)

  Shogidō is free software: you can redistribute it and/or modify
  it under the terms of the GNU General Public License as published by
  the Free Software Foundation, either version 3 of the License, or
  (at your option) any later version.

  Shogidō is distributed in the hope that it will be useful,
  but WITHOUT ANY WARRANTY; without even the implied warranty of
  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
  GNU General Public License for more details.

  You should have received a copy of the GNU General Public License
  along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/

//! The mutable position core: piece placement, hands, side to move, and the
//! `push`/`pop` pair that makes and unmakes moves while keeping a mailbox,
//! per-kind bitboards, the king cache, the incremental Zobrist hash, and the
//! transposition counter all in lockstep.

use crate::{
    bitboard::Bitboard,
    color::Color,
    error::{ShogiError, ShogiResult},
    hand::Hand,
    moves::Move,
    occupancy::Occupancy,
    piece::{Piece, PieceKind},
    square::Square,
    zobrist,
};

use log::{trace, warn};
use nohash_hasher::IntMap;

use std::{
    collections::hash_map::Entry,
    fmt::{Display, Formatter},
};

/// The starting SFEN every game of shogi begins from.
pub const STARTING_SFEN: &str =
    "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1";

/// `(file, rank, kind)` triples for one color's half of the starting
/// position; the other color's half is the point reflection of this one
/// (`file' = 8 - file`, `rank' = 8 - rank`).
const STARTING_WHITE_HALF: [(u8, u8, PieceKind); 20] = [
    (0, 0, PieceKind::Lance),
    (1, 0, PieceKind::Knight),
    (2, 0, PieceKind::Silver),
    (3, 0, PieceKind::Gold),
    (4, 0, PieceKind::King),
    (5, 0, PieceKind::Gold),
    (6, 0, PieceKind::Silver),
    (7, 0, PieceKind::Knight),
    (8, 0, PieceKind::Lance),
    (1, 1, PieceKind::Rook),
    (7, 1, PieceKind::Bishop),
    (0, 2, PieceKind::Pawn),
    (1, 2, PieceKind::Pawn),
    (2, 2, PieceKind::Pawn),
    (3, 2, PieceKind::Pawn),
    (4, 2, PieceKind::Pawn),
    (5, 2, PieceKind::Pawn),
    (6, 2, PieceKind::Pawn),
    (7, 2, PieceKind::Pawn),
    (8, 2, PieceKind::Pawn),
];

#[derive(Clone, Debug)]
/// The mutable core of a shogi position.
///
/// A `Board` owns its move and capture stacks exclusively; nothing else may
/// alias them. It is mutated only through [`Board::push`], [`Board::pop`],
/// [`Board::clear`], and the piece-placement primitives
/// [`Board::set_piece_at`]/[`Board::remove_piece_at`] that those build on.
pub struct Board {
    /// Bitboard of each piece kind, of either color.
    kind_bb: [Bitboard; PieceKind::NUM_KINDS],
    /// Per-square piece kind, for O(1) lookup without scanning bitboards.
    mailbox: [Option<PieceKind>; Square::NUM],
    /// Aggregate occupancy, kept coherent with `kind_bb` and `mailbox`.
    occupancy: Occupancy,
    /// Each color's king square, or `None` if that color has no king on the
    /// board (only possible on a hand-built or partially-set-up `Board`).
    king_sq: [Option<Square>; Color::NUM],
    /// Each color's hand of droppable pieces.
    hands: [Hand; Color::NUM],
    /// The side to move.
    pub side_to_move: Color,
    /// The 1-based ply counter.
    pub ply: u32,
    /// LIFO stack of moves played, for `pop` to undo.
    move_stack: Vec<Move>,
    /// LIFO stack of the piece kind captured at each ply (`None` if the move
    /// was a non-capturing board move, a drop, or the null move).
    capture_stack: Vec<Option<PieceKind>>,
    /// Incremental hash of the board-only component (piece-square-color
    /// keys). Side-to-move and hand contributions are folded in on demand by
    /// [`Board::full_hash`], not kept incrementally, since they change on
    /// every single ply anyway.
    hash: u64,
    /// Occurrence count of every full hash reached so far in this line,
    /// keyed by [`Board::full_hash`]. Used for fourfold-repetition detection.
    transpositions: IntMap<u64, u64>,
}

impl Board {
    #[must_use]
    /// An empty board: no pieces, no hands, ply 1, Black to move.
    pub fn empty() -> Board {
        let mut transpositions = IntMap::default();
        let hash = 0;
        transpositions.insert(hash, 1);
        Board {
            kind_bb: [Bitboard::EMPTY; PieceKind::NUM_KINDS],
            mailbox: [None; Square::NUM],
            occupancy: Occupancy::new(),
            king_sq: [None, None],
            hands: [Hand::new(), Hand::new()],
            side_to_move: Color::Black,
            ply: 1,
            move_stack: Vec::new(),
            capture_stack: Vec::new(),
            hash,
            transpositions,
        }
    }

    #[must_use]
    /// A board set up in the standard starting position.
    pub fn new() -> Board {
        let mut board = Board::empty();
        board.reset();
        board
    }

    /// Install the standard starting position, discarding any prior state.
    pub fn reset(&mut self) {
        self.clear();
        for &(file, rank, kind) in &STARTING_WHITE_HALF {
            self.set_piece_at(Square::new(file, rank), Piece::new(kind, Color::White), false, false)
                .expect("starting position placement never touches hand counts");
            self.set_piece_at(
                Square::new(8 - file, 8 - rank),
                Piece::new(kind, Color::Black),
                false,
                false,
            )
            .expect("starting position placement never touches hand counts");
        }
        self.transpositions.clear();
        self.transpositions.insert(self.full_hash(), 1);
    }

    /// Empty the board entirely: no pieces, no hands, ply reset to 1, Black
    /// to move. Unlike [`Board::empty`], this mutates an existing `Board` in
    /// place (used by SFEN parsing to reset before installing a new position).
    pub fn clear(&mut self) {
        self.kind_bb = [Bitboard::EMPTY; PieceKind::NUM_KINDS];
        self.mailbox = [None; Square::NUM];
        self.occupancy = Occupancy::new();
        self.king_sq = [None, None];
        self.hands = [Hand::new(), Hand::new()];
        self.side_to_move = Color::Black;
        self.ply = 1;
        self.move_stack.clear();
        self.capture_stack.clear();
        self.hash = 0;
        self.transpositions.clear();
        self.transpositions.insert(self.full_hash(), 1);
    }

    #[inline(always)]
    #[must_use]
    /// The piece kind occupying `square`, if any.
    pub fn piece_kind_at(&self, square: Square) -> Option<PieceKind> {
        self.mailbox[usize::from(square)]
    }

    #[must_use]
    /// The piece occupying `square`, if any.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let kind = self.piece_kind_at(square)?;
        let color = if self.occupancy.of(Color::Black).contains(square) {
            Color::Black
        } else {
            Color::White
        };
        Some(Piece::new(kind, color))
    }

    #[inline(always)]
    #[must_use]
    /// All squares holding a piece of `kind`, of either color.
    pub fn bitboard_of(&self, kind: PieceKind) -> Bitboard {
        self.kind_bb[kind as usize]
    }

    #[inline(always)]
    #[must_use]
    /// The aggregate occupancy.
    pub const fn occupancy(&self) -> &Occupancy {
        &self.occupancy
    }

    #[inline(always)]
    #[must_use]
    /// `color`'s king square, if that color has a king on the board.
    pub const fn king_square(&self, color: Color) -> Option<Square> {
        self.king_sq[color as usize]
    }

    #[inline(always)]
    #[must_use]
    /// `color`'s hand of droppable pieces.
    pub const fn hand(&self, color: Color) -> &Hand {
        &self.hands[color as usize]
    }

    #[inline(always)]
    /// Mutable access to `color`'s hand, for SFEN parsing to populate
    /// directly without going through a move.
    pub(crate) fn hand_mut(&mut self, color: Color) -> &mut Hand {
        &mut self.hands[color as usize]
    }

    /// Clear and reinsert the current position's full hash into the
    /// transposition counter. Used by SFEN parsing after installing a new
    /// position out from under the counter that [`Board::clear`] seeded for
    /// an empty board.
    pub(crate) fn reseed_transpositions(&mut self) {
        self.transpositions.clear();
        self.transpositions.insert(self.full_hash(), 1);
    }

    #[inline(always)]
    #[must_use]
    /// The number of moves played so far, without unmaking any.
    pub fn ply_count(&self) -> usize {
        self.move_stack.len()
    }

    #[must_use]
    /// The full Zobrist hash: the incremental board-only hash, XOR'd with the
    /// side-to-move key and both colors' hand encodings.
    pub fn full_hash(&self) -> u64 {
        let mut h = self.hash;
        if self.side_to_move == Color::White {
            h ^= zobrist::SIDE_TO_MOVE_KEY;
        }
        h ^= zobrist::hand_key(Color::Black, &self.hands[Color::Black as usize]);
        h ^= zobrist::hand_key(Color::White, &self.hands[Color::White as usize]);
        h
    }

    #[must_use]
    /// How many times the current full hash has occurred so far in this
    /// line (counting the current position itself).
    pub fn repetition_count(&self) -> u64 {
        *self.transpositions.get(&self.full_hash()).unwrap_or(&0)
    }

    /// Remove whatever piece occupies `square` (a no-op if it's empty). If
    /// `into_hand`, the removed piece's demoted kind is deposited into the
    /// side-to-move's hand (the capturing side, during a `push` that hasn't
    /// flipped turn yet).
    pub fn remove_piece_at(&mut self, square: Square, into_hand: bool) {
        let Some(kind) = self.mailbox[usize::from(square)] else {
            return;
        };
        let color = if self.occupancy.of(Color::Black).contains(square) {
            Color::Black
        } else {
            Color::White
        };
        if into_hand {
            self.hands[self.side_to_move as usize].add(kind);
        }
        self.mailbox[usize::from(square)] = None;
        self.kind_bb[kind as usize].remove(square);
        self.occupancy.toggle(square, color);
        self.hash ^= zobrist::square_key(square, kind, color);
        if kind == PieceKind::King {
            self.king_sq[color as usize] = None;
        }
    }

    /// Place `piece` on `square`, replacing and (optionally) capturing
    /// whatever was there. If `from_hand`, one `piece.kind` is first removed
    /// from the side-to-move's hand.
    ///
    /// # Errors
    ///
    /// Returns [`ShogiError::HandUnderflow`] if `from_hand` is set and the
    /// side to move holds no `piece.kind`.
    pub fn set_piece_at(
        &mut self,
        square: Square,
        piece: Piece,
        from_hand: bool,
        into_hand: bool,
    ) -> ShogiResult<()> {
        if from_hand {
            self.hands[self.side_to_move as usize].remove(piece.kind)?;
        }
        self.remove_piece_at(square, into_hand);
        self.mailbox[usize::from(square)] = Some(piece.kind);
        self.kind_bb[piece.kind as usize].insert(square);
        self.occupancy.toggle(square, piece.color);
        self.hash ^= zobrist::square_key(square, piece.kind, piece.color);
        if piece.kind == PieceKind::King {
            self.king_sq[piece.color as usize] = Some(square);
        }
        Ok(())
    }

    /// Play `mv`, pushing it (and whatever it captured) onto the undo
    /// stacks. Trusts its input: `mv` should already have passed legality
    /// checking, or reversibility is not guaranteed.
    pub fn push(&mut self, mv: Move) {
        self.ply += 1;
        let captured = mv.to().and_then(|sq| self.piece_kind_at(sq));
        self.capture_stack.push(captured);
        self.move_stack.push(mv);

        match mv {
            Move::Null => {
                self.side_to_move = !self.side_to_move;
                trace!("push: null move, ply {}", self.ply);
                return;
            }
            Move::Drop { to, kind } => {
                self.set_piece_at(to, Piece::new(kind, self.side_to_move), true, true)
                    .expect("drop move played without the dropped kind in hand");
            }
            Move::Board { from, to, promote } => {
                let mut kind = self.piece_kind_at(from).expect("move source is empty");
                if promote {
                    kind = kind.promote().expect("promote flag set on an unpromotable kind");
                }
                self.remove_piece_at(from, false);
                self.set_piece_at(to, Piece::new(kind, self.side_to_move), false, true)
                    .expect("set_piece_at with from_hand=false cannot underflow a hand");
            }
        }
        self.side_to_move = !self.side_to_move;
        let h = self.full_hash();
        *self.transpositions.entry(h).or_insert(0) += 1;
        trace!("push: {mv} -> ply {}, hash {h:#x}", self.ply);
    }

    /// Undo the last move played, reversing `push` exactly.
    ///
    /// # Errors
    ///
    /// Returns [`ShogiError::EmptyStack`] if no move has been pushed.
    pub fn pop(&mut self) -> ShogiResult<Move> {
        let mv = self.move_stack.pop().ok_or(ShogiError::EmptyStack)?;

        let full = self.full_hash();
        match self.transpositions.entry(full) {
            Entry::Occupied(mut e) => {
                let count = e.get_mut();
                if *count == 0 {
                    warn!("pop: transposition count already zero for hash {full:#x}");
                } else {
                    *count -= 1;
                    if *count == 0 {
                        e.remove();
                    }
                }
            }
            Entry::Vacant(_) => {
                warn!("pop: no transposition entry for hash {full:#x}");
            }
        }

        self.ply -= 1;
        let captured = self.capture_stack.pop().ok_or(ShogiError::EmptyStack)?;

        if let Move::Null = mv {
            self.side_to_move = !self.side_to_move;
            trace!("pop: undid null move, ply {}", self.ply);
            return Ok(mv);
        }

        // `self.side_to_move` is still the side that moved *after* `mv` (the
        // opponent of whoever played it); the mover is the other color.
        let captured_color = self.side_to_move;
        let mover = !self.side_to_move;

        match mv {
            Move::Drop { to, kind } => {
                self.remove_piece_at(to, false);
                self.hands[mover as usize].add(kind);
            }
            Move::Board { from, to, promote } => {
                let mut kind = self.piece_kind_at(to).expect("pop: destination is empty");
                if promote {
                    kind = kind.demote();
                }
                self.set_piece_at(from, Piece::new(kind, mover), false, false)
                    .expect("set_piece_at with from_hand=false cannot underflow a hand");
                if let Some(captured_kind) = captured {
                    self.hands[mover as usize].remove(captured_kind)?;
                    self.set_piece_at(to, Piece::new(captured_kind, captured_color), false, false)
                        .expect("set_piece_at with from_hand=false cannot underflow a hand");
                } else {
                    self.remove_piece_at(to, false);
                }
            }
            Move::Null => unreachable!("handled above"),
        }
        self.side_to_move = mover;
        trace!("pop: undid {mv}, ply {}", self.ply);
        Ok(mv)
    }

    /// Whether any piece of `color` attacks `square`, under the current
    /// occupancy.
    ///
    /// This asks, for every piece kind, "what would a piece of this kind
    /// standing on `square` and moving as the *opposite* of `color` be able
    /// to reach?" — any overlap with an actual `color` piece of that kind
    /// means that piece attacks `square`.
    #[must_use]
    pub fn is_attacked_by(&self, color: Color, square: Square) -> bool {
        PieceKind::ALL_KINDS.into_iter().any(|kind| {
            let reach = crate::attacks::attacks_from(kind, square, !color, self.occupancy.all);
            !(reach & self.kind_bb[kind as usize] & self.occupancy.of(color)).is_empty()
        })
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Board) -> bool {
        self.kind_bb == other.kind_bb
            && self.occupancy == other.occupancy
            && self.hands == other.hands
            && self.side_to_move == other.side_to_move
    }
}

impl Eq for Board {}

impl Display for Board {
    /// Render the board as a 9x9 grid, White's back rank first, matching
    /// SFEN row order. Black pieces are uppercase, White's lowercase,
    /// promoted pieces keep a `+` prefix, empty squares are `.`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for rank in 0..9 {
            for file in 0..9 {
                match self.piece_at(Square::new(file, rank)) {
                    Some(p) => write!(f, "{:>3}", p.sfen_symbol())?,
                    None => write!(f, "  .")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_piece_counts() {
        let board = Board::new();
        assert_eq!(board.bitboard_of(PieceKind::Pawn).len(), 18);
        assert_eq!(board.bitboard_of(PieceKind::King).len(), 2);
        assert_eq!(board.occupancy().all.len(), 40);
        assert_eq!(board.king_square(Color::Black), Some(Square::new(4, 8)));
        assert_eq!(board.king_square(Color::White), Some(Square::new(4, 0)));
    }

    #[test]
    fn push_pop_is_reversible() {
        let mut board = Board::new();
        let before = board.clone();
        let mv = Move::normal(Square::new(2, 6), Square::new(2, 5));
        board.push(mv);
        assert_ne!(board, before);
        board.pop().unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn captured_piece_goes_to_hand() {
        let mut board = Board::empty();
        board
            .set_piece_at(Square::new(4, 4), Piece::new(PieceKind::Rook, Color::Black), false, false)
            .unwrap();
        board
            .set_piece_at(Square::new(4, 0), Piece::new(PieceKind::Pawn, Color::White), false, false)
            .unwrap();
        board.push(Move::normal(Square::new(4, 4), Square::new(4, 0)));
        assert_eq!(board.hand(Color::Black).count(PieceKind::Pawn), 1);
        assert_eq!(board.piece_at(Square::new(4, 0)).unwrap().kind, PieceKind::Rook);

        board.pop().unwrap();
        assert_eq!(board.hand(Color::Black).count(PieceKind::Pawn), 0);
        assert_eq!(board.piece_at(Square::new(4, 0)).unwrap().kind, PieceKind::Pawn);
    }

    #[test]
    fn drop_and_undo_drop_restores_hand() {
        let mut board = Board::empty();
        board
            .set_piece_at(Square::new(0, 0), Piece::new(PieceKind::King, Color::White), false, false)
            .unwrap();
        board
            .set_piece_at(Square::new(8, 8), Piece::new(PieceKind::King, Color::Black), false, false)
            .unwrap();
        board.hands[Color::Black as usize].add(PieceKind::Gold);

        board.push(Move::drop(Square::new(4, 4), PieceKind::Gold));
        assert_eq!(board.hand(Color::Black).count(PieceKind::Gold), 0);
        assert_eq!(board.piece_kind_at(Square::new(4, 4)), Some(PieceKind::Gold));

        board.pop().unwrap();
        assert_eq!(board.hand(Color::Black).count(PieceKind::Gold), 1);
        assert_eq!(board.piece_kind_at(Square::new(4, 4)), None);
    }

    #[test]
    fn promotion_make_and_unmake_roundtrips_kind() {
        let mut board = Board::empty();
        board
            .set_piece_at(Square::new(4, 2), Piece::new(PieceKind::Pawn, Color::Black), false, false)
            .unwrap();
        board.push(Move::promoting(Square::new(4, 2), Square::new(4, 1)));
        assert_eq!(board.piece_kind_at(Square::new(4, 1)), Some(PieceKind::PromPawn));
        board.pop().unwrap();
        assert_eq!(board.piece_kind_at(Square::new(4, 2)), Some(PieceKind::Pawn));
    }

    #[test]
    fn full_hash_matches_after_round_trip() {
        let mut board = Board::new();
        let h0 = board.full_hash();
        board.push(Move::normal(Square::new(2, 6), Square::new(2, 5)));
        board.push(Move::normal(Square::new(2, 2), Square::new(2, 3)));
        board.pop().unwrap();
        board.pop().unwrap();
        assert_eq!(board.full_hash(), h0);
    }

    #[test]
    fn empty_pop_is_an_error() {
        let mut board = Board::new();
        assert_eq!(board.pop(), Err(ShogiError::EmptyStack));
    }

    #[test]
    fn repetition_count_increases_on_revisit() {
        let mut board = Board::new();
        assert_eq!(board.repetition_count(), 1);
        let a = Move::normal(Square::new(1, 8), Square::new(2, 6));
        let b = Move::normal(Square::new(1, 0), Square::new(2, 2));
        let a_back = Move::normal(Square::new(2, 6), Square::new(1, 8));
        let b_back = Move::normal(Square::new(2, 2), Square::new(1, 0));
        board.push(a);
        board.push(b);
        board.push(a_back);
        board.push(b_back);
        assert_eq!(board.repetition_count(), 2);
    }

    #[test]
    fn is_attacked_by_sees_a_rook_on_an_open_file() {
        let mut board = Board::empty();
        board
            .set_piece_at(Square::new(4, 4), Piece::new(PieceKind::Rook, Color::Black), false, false)
            .unwrap();
        assert!(board.is_attacked_by(Color::Black, Square::new(4, 0)));
        assert!(!board.is_attacked_by(Color::White, Square::new(4, 0)));
    }
}
