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

//! Aggregate occupancy: which squares are occupied at all, and by which
//! color, kept incrementally in step with a `Board`'s piece placement.

use crate::{bitboard::Bitboard, color::Color, square::Square};

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
/// The set of occupied squares on a board, split out by color so that
/// move generation can mask "my pieces" and "their pieces" in one AND.
pub struct Occupancy {
    /// Every occupied square, of either color.
    pub all: Bitboard,
    /// Occupied squares, indexed by `Color as usize`.
    pub by_color: [Bitboard; Color::NUM],
}

impl Occupancy {
    #[inline(always)]
    #[must_use]
    /// An occupancy with no squares occupied.
    pub const fn new() -> Occupancy {
        Occupancy {
            all: Bitboard::EMPTY,
            by_color: [Bitboard::EMPTY, Bitboard::EMPTY],
        }
    }

    #[inline(always)]
    /// Flip the occupancy of `sq` for `color`. Used identically for placing
    /// and removing a piece: calling this twice in a row on the same
    /// arguments restores the original occupancy.
    pub fn toggle(&mut self, sq: Square, color: Color) {
        let bb = Bitboard::from(sq);
        self.all ^= bb;
        self.by_color[color as usize] ^= bb;
    }

    #[inline(always)]
    #[must_use]
    /// All squares occupied by `color`'s pieces.
    pub const fn of(&self, color: Color) -> Bitboard {
        self.by_color[color as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_is_identity() {
        let mut occ = Occupancy::new();
        let sq = Square::new(4, 4);
        occ.toggle(sq, Color::Black);
        assert!(occ.all.contains(sq));
        assert!(occ.of(Color::Black).contains(sq));
        occ.toggle(sq, Color::Black);
        assert_eq!(occ, Occupancy::new());
    }

    #[test]
    fn colors_stay_disjoint() {
        let mut occ = Occupancy::new();
        occ.toggle(Square::new(0, 0), Color::Black);
        occ.toggle(Square::new(1, 0), Color::White);
        assert!((occ.of(Color::Black) & occ.of(Color::White)).is_empty());
        assert_eq!(occ.all.len(), 2);
    }
}
