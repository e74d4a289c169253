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

//! Definitions of moves, which can describe any legal playable move: sliding
//! a piece across the board, dropping a piece from hand, or passing
//! (a "null move", used only by search and never playable over USI).

use crate::{error::ShogiError, piece::PieceKind, square::Square};

use std::fmt::{Debug, Display, Formatter};

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
/// A single playable move.
///
/// Unlike a chess move, a shogi move cannot be expressed as a pair of
/// squares plus a promotion flag: a drop has no origin square at all. Rather
/// than force drops to borrow a sentinel board square (the source of a
/// latent bug in other shogi implementations, where a from-square of zero is
/// mistaken for "no from-square"), this is a genuine tagged union over the
/// three kinds of move.
pub enum Move {
    /// Move the piece on `from` to `to`, optionally promoting it.
    Board {
        /// The square the piece starts on.
        from: Square,
        /// The square the piece ends on.
        to: Square,
        /// Whether the piece promotes as part of this move.
        promote: bool,
    },
    /// Drop a piece of `kind` from hand onto `to`.
    Drop {
        /// The square the piece is dropped onto.
        to: Square,
        /// The (always unpromoted) kind of piece dropped.
        kind: PieceKind,
    },
    /// The null move: passes the turn without changing the board. Never
    /// legal to play over USI; used by search to probe "what if it were the
    /// other side's turn".
    Null,
}

impl Move {
    #[inline(always)]
    #[must_use]
    /// Construct a non-promoting board move.
    pub const fn normal(from: Square, to: Square) -> Move {
        Move::Board {
            from,
            to,
            promote: false,
        }
    }

    #[inline(always)]
    #[must_use]
    /// Construct a promoting board move.
    pub const fn promoting(from: Square, to: Square) -> Move {
        Move::Board {
            from,
            to,
            promote: true,
        }
    }

    #[inline(always)]
    #[must_use]
    /// Construct a drop move.
    pub const fn drop(to: Square, kind: PieceKind) -> Move {
        Move::Drop { to, kind }
    }

    #[inline(always)]
    #[must_use]
    /// The destination square of this move. Both board moves and drops have
    /// one; the null move does not.
    pub const fn to(self) -> Option<Square> {
        match self {
            Move::Board { to, .. } | Move::Drop { to, .. } => Some(to),
            Move::Null => None,
        }
    }

    #[inline(always)]
    #[must_use]
    /// Whether this move is a drop from hand.
    pub const fn is_drop(self) -> bool {
        matches!(self, Move::Drop { .. })
    }

    #[inline(always)]
    #[must_use]
    /// Whether this move promotes the moved piece.
    pub const fn is_promotion(self) -> bool {
        matches!(self, Move::Board { promote: true, .. })
    }

    /// Construct a `Move` from its USI string representation, such as
    /// `"7g7f"`, `"8h2b+"`, or `"P*5e"`.
    ///
    /// # Errors
    ///
    /// Returns [`ShogiError::InvalidUsi`] if `s` is not a well-formed USI
    /// move string.
    pub fn from_usi(s: &str) -> Result<Move, ShogiError> {
        if s == "0000" {
            return Ok(Move::Null);
        }
        let bytes = s.as_bytes();
        if bytes.len() >= 2 && bytes[1] == b'*' {
            let kind = PieceKind::from_sfen_letter(bytes[0] as char).ok_or_else(|| {
                ShogiError::InvalidUsi {
                    reason: format!("unrecognized drop piece letter {:?}", bytes[0] as char),
                }
            })?;
            let to = Square::from_usi(&s[2..])?;
            return Ok(Move::Drop { to, kind });
        }

        if s.len() != 4 && s.len() != 5 {
            return Err(ShogiError::InvalidUsi {
                reason: format!("move must be 4 or 5 characters, got {s:?}"),
            });
        }
        let from = Square::from_usi(&s[0..2])?;
        let to = Square::from_usi(&s[2..4])?;
        let promote = match s.len() {
            4 => false,
            5 if &s[4..5] == "+" => true,
            _ => {
                return Err(ShogiError::InvalidUsi {
                    reason: format!("unrecognized move suffix in {s:?}"),
                })
            }
        };
        Ok(Move::Board { from, to, promote })
    }

    #[must_use]
    /// Render this move as a USI move string.
    pub fn to_usi(self) -> String {
        match self {
            Move::Board { from, to, promote } => {
                format!("{from}{to}{}", if promote { "+" } else { "" })
            }
            Move::Drop { to, kind } => format!("{}*{to}", kind.sfen_letter()),
            Move::Null => "0000".to_string(),
        }
    }

    #[inline(always)]
    #[must_use]
    /// Get a number uniquely representing this move, suitable for use as a
    /// transposition-table key or move-list comparison. The encoding may
    /// change from version to version.
    ///
    /// From-square codes 81..87 denote a drop of `DROPPABLE_KINDS[code - 81]`
    /// rather than a board square; 127 denotes the null move. A board move's
    /// `from` is always in 0..81, so these ranges never collide.
    pub fn value(self) -> u16 {
        match self {
            Move::Board { from, to, promote } => {
                from.index() as u16 | ((to.index() as u16) << 7) | ((promote as u16) << 14)
            }
            Move::Drop { to, kind } => {
                let drop_code = 81 + PieceKind::DROPPABLE_KINDS
                    .iter()
                    .position(|&k| k == kind)
                    .expect("kind is a droppable kind") as u16;
                drop_code | ((to.index() as u16) << 7)
            }
            Move::Null => 127,
        }
    }

    #[must_use]
    /// Reconstruct a move from a value previously returned by
    /// [`Move::value`].
    pub fn from_val(val: u16) -> Move {
        let from_code = val & 0x7F;
        if from_code == 127 {
            return Move::Null;
        }
        let to = Square::from_index(((val >> 7) & 0x7F) as u8);
        if from_code >= 81 {
            let kind = PieceKind::DROPPABLE_KINDS[(from_code - 81) as usize];
            Move::Drop { to, kind }
        } else {
            let from = Square::from_index(from_code as u8);
            let promote = (val >> 14) & 1 != 0;
            Move::Board { from, to, promote }
        }
    }
}

impl Debug for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_usi())
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            Move::Board { from, to, promote } => {
                write!(f, "{from} -> {to}")?;
                if promote {
                    write!(f, " [promote]")?;
                }
                Ok(())
            }
            Move::Drop { to, kind } => write!(f, "{kind}* -> {to}"),
            Move::Null => write!(f, "(null)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usi_board_move_roundtrip() {
        let m = Move::from_usi("7g7f").unwrap();
        assert_eq!(
            m,
            Move::normal(Square::from_usi("7g").unwrap(), Square::from_usi("7f").unwrap())
        );
        assert_eq!(m.to_usi(), "7g7f");
    }

    #[test]
    fn usi_promotion_move_roundtrip() {
        let m = Move::from_usi("8h2b+").unwrap();
        assert!(m.is_promotion());
        assert_eq!(m.to_usi(), "8h2b+");
    }

    #[test]
    fn usi_drop_move_roundtrip() {
        let m = Move::from_usi("P*5e").unwrap();
        assert_eq!(
            m,
            Move::drop(Square::from_usi("5e").unwrap(), PieceKind::Pawn)
        );
        assert!(m.is_drop());
        assert_eq!(m.to_usi(), "P*5e");
    }

    #[test]
    fn value_roundtrip_for_all_move_kinds() {
        let board_move = Move::promoting(Square::from_index(0), Square::from_index(80));
        assert_eq!(Move::from_val(board_move.value()), board_move);

        let drop_move = Move::drop(Square::from_index(40), PieceKind::Rook);
        assert_eq!(Move::from_val(drop_move.value()), drop_move);

        assert_eq!(Move::from_val(Move::Null.value()), Move::Null);
    }

    #[test]
    fn zero_from_square_is_not_mistaken_for_a_drop() {
        // A board move from Square 0 (9a) must round-trip distinctly from
        // any drop, since a drop's "from" code starts at 81.
        let m = Move::normal(Square::from_index(0), Square::from_index(1));
        assert!(!m.is_drop());
        assert_eq!(Move::from_val(m.value()), m);
    }

    #[test]
    fn rejects_malformed_usi() {
        assert!(Move::from_usi("abc").is_err());
        assert!(Move::from_usi("7g7f?").is_err());
        assert!(Move::from_usi("X*5e").is_err());
    }
}
