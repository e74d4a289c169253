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

//! Pieces, which contain no information about their color or current square.

use crate::color::Color;

use std::fmt::{Display, Formatter, Result};

#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
/// The type of a piece, independent of its color or square.
///
/// The ordering of elements of this enumeration is highly intentional: the
/// eight unpromoted kinds come first in the same order as their SFEN board
/// letters, followed by their six promotable variants in matching order
/// (Gold and King never promote). This keeps `promote`/`demote` simple
/// offset arithmetic and lets the Zobrist key table and the hand encoding
/// both index straight off `PieceKind as u8`.
pub enum PieceKind {
    Pawn = 0,
    Lance,
    Knight,
    Silver,
    Gold,
    Bishop,
    Rook,
    King,
    PromPawn,
    PromLance,
    PromKnight,
    PromSilver,
    PromBishop,
    PromRook,
}

impl PieceKind {
    /// Total number of piece kinds, promoted and unpromoted.
    pub const NUM_KINDS: usize = 14;

    /// Array containing all piece kinds.
    pub const ALL_KINDS: [PieceKind; PieceKind::NUM_KINDS] = [
        PieceKind::Pawn,
        PieceKind::Lance,
        PieceKind::Knight,
        PieceKind::Silver,
        PieceKind::Gold,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::King,
        PieceKind::PromPawn,
        PieceKind::PromLance,
        PieceKind::PromKnight,
        PieceKind::PromSilver,
        PieceKind::PromBishop,
        PieceKind::PromRook,
    ];

    /// The seven kinds that can be dropped from a hand. Gold and King are
    /// never captured-and-held as a promoted piece (Gold doesn't promote
    /// and King is never captured), so they're excluded here too.
    pub const DROPPABLE_KINDS: [PieceKind; 7] = [
        PieceKind::Pawn,
        PieceKind::Lance,
        PieceKind::Knight,
        PieceKind::Silver,
        PieceKind::Gold,
        PieceKind::Bishop,
        PieceKind::Rook,
    ];

    #[inline(always)]
    #[must_use]
    /// Whether this kind is able to promote at all.
    pub const fn is_promotable(self) -> bool {
        !matches!(
            self,
            PieceKind::Gold
                | PieceKind::King
                | PieceKind::PromPawn
                | PieceKind::PromLance
                | PieceKind::PromKnight
                | PieceKind::PromSilver
                | PieceKind::PromBishop
                | PieceKind::PromRook
        )
    }

    #[inline(always)]
    #[must_use]
    /// Whether this kind is itself a promoted piece.
    pub const fn is_promoted(self) -> bool {
        matches!(
            self,
            PieceKind::PromPawn
                | PieceKind::PromLance
                | PieceKind::PromKnight
                | PieceKind::PromSilver
                | PieceKind::PromBishop
                | PieceKind::PromRook
        )
    }

    #[inline(always)]
    #[must_use]
    /// The promoted form of this kind, or `None` if this kind cannot promote
    /// (Gold, King, or an already-promoted kind).
    pub const fn promote(self) -> Option<PieceKind> {
        match self {
            PieceKind::Pawn => Some(PieceKind::PromPawn),
            PieceKind::Lance => Some(PieceKind::PromLance),
            PieceKind::Knight => Some(PieceKind::PromKnight),
            PieceKind::Silver => Some(PieceKind::PromSilver),
            PieceKind::Bishop => Some(PieceKind::PromBishop),
            PieceKind::Rook => Some(PieceKind::PromRook),
            _ => None,
        }
    }

    #[inline(always)]
    #[must_use]
    /// The unpromoted form of this kind. A no-op on a kind that is already
    /// unpromoted.
    pub const fn demote(self) -> PieceKind {
        match self {
            PieceKind::PromPawn => PieceKind::Pawn,
            PieceKind::PromLance => PieceKind::Lance,
            PieceKind::PromKnight => PieceKind::Knight,
            PieceKind::PromSilver => PieceKind::Silver,
            PieceKind::PromBishop => PieceKind::Bishop,
            PieceKind::PromRook => PieceKind::Rook,
            other => other,
        }
    }

    #[inline(always)]
    #[must_use]
    /// The maximum number of this kind a single hand can ever hold. Always
    /// queried on an unpromoted (droppable) kind.
    pub const fn hand_capacity(self) -> u8 {
        match self {
            PieceKind::Pawn => 18,
            PieceKind::Lance | PieceKind::Knight | PieceKind::Silver | PieceKind::Gold => 4,
            PieceKind::Bishop | PieceKind::Rook => 2,
            _ => 0,
        }
    }

    #[must_use]
    /// The uppercase SFEN letter for this kind, with a leading `+` if
    /// promoted.
    pub const fn sfen_letter(self) -> &'static str {
        match self {
            PieceKind::Pawn => "P",
            PieceKind::Lance => "L",
            PieceKind::Knight => "N",
            PieceKind::Silver => "S",
            PieceKind::Gold => "G",
            PieceKind::Bishop => "B",
            PieceKind::Rook => "R",
            PieceKind::King => "K",
            PieceKind::PromPawn => "+P",
            PieceKind::PromLance => "+L",
            PieceKind::PromKnight => "+N",
            PieceKind::PromSilver => "+S",
            PieceKind::PromBishop => "+B",
            PieceKind::PromRook => "+R",
        }
    }

    /// Parse an unpromoted SFEN letter (uppercase, no `+` prefix) into a
    /// kind. Returns `None` for anything else, including promoted letters.
    #[must_use]
    pub const fn from_sfen_letter(c: char) -> Option<PieceKind> {
        match c {
            'P' => Some(PieceKind::Pawn),
            'L' => Some(PieceKind::Lance),
            'N' => Some(PieceKind::Knight),
            'S' => Some(PieceKind::Silver),
            'G' => Some(PieceKind::Gold),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.sfen_letter())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
/// A piece kind bound to the color of the player who owns it.
pub struct Piece {
    /// The kind of this piece.
    pub kind: PieceKind,
    /// The color of the player owning this piece.
    pub color: Color,
}

impl Piece {
    #[inline(always)]
    #[must_use]
    /// Construct a new `Piece` from a kind and a color.
    pub const fn new(kind: PieceKind, color: Color) -> Piece {
        Piece { kind, color }
    }

    #[must_use]
    /// This piece's SFEN symbol: Black's letters are uppercase, White's are
    /// lowercase, and promoted kinds keep their `+` prefix either way.
    pub fn sfen_symbol(self) -> String {
        match self.color {
            Color::Black => self.kind.sfen_letter().to_string(),
            Color::White => self.kind.sfen_letter().to_lowercase(),
        }
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.sfen_symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promote_demote_roundtrip() {
        for kind in PieceKind::ALL_KINDS {
            if let Some(promoted) = kind.promote() {
                assert!(promoted.is_promoted());
                assert_eq!(promoted.demote(), kind);
            }
        }
    }

    #[test]
    fn gold_and_king_never_promote() {
        assert_eq!(PieceKind::Gold.promote(), None);
        assert_eq!(PieceKind::King.promote(), None);
    }

    #[test]
    fn hand_capacities() {
        assert_eq!(PieceKind::Pawn.hand_capacity(), 18);
        assert_eq!(PieceKind::Bishop.hand_capacity(), 2);
        assert_eq!(PieceKind::Rook.hand_capacity(), 2);
        assert_eq!(PieceKind::Gold.hand_capacity(), 4);
    }

    #[test]
    fn sfen_symbols_are_case_by_color() {
        let black_rook = Piece::new(PieceKind::Rook, Color::Black);
        let white_rook = Piece::new(PieceKind::Rook, Color::White);
        assert_eq!(black_rook.sfen_symbol(), "R");
        assert_eq!(white_rook.sfen_symbol(), "r");

        let white_prom_bishop = Piece::new(PieceKind::PromBishop, Color::White);
        assert_eq!(white_prom_bishop.sfen_symbol(), "+b");
    }

    #[test]
    fn sfen_letter_roundtrip_unpromoted() {
        for letter in ['P', 'L', 'N', 'S', 'G', 'B', 'R', 'K'] {
            let kind = PieceKind::from_sfen_letter(letter).unwrap();
            assert_eq!(kind.sfen_letter(), letter.to_string());
        }
    }
}
