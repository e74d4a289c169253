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

//! Representation of the two players.

use std::{mem::transmute, ops::Not};

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// An enum representing the two colors a piece or player can be.
pub enum Color {
    /// Black, the first player to move in a game.
    Black = 0,
    /// White, the second player to move in a game.
    White = 1,
}

impl Color {
    /// Total number of colors.
    pub const NUM: usize = 2;

    #[inline(always)]
    #[must_use]
    /// Rank indices (0-indexed from White's back rank) of the three ranks in
    /// which pieces of this color must promote.
    pub const fn promotion_zone(&self) -> [u8; 3] {
        match self {
            Color::Black => [0, 1, 2],
            Color::White => [6, 7, 8],
        }
    }

    #[inline(always)]
    #[must_use]
    /// Rank index (0-indexed from White's back rank) of the farthest rank a
    /// piece of this color can reach, beyond which a Pawn or Lance has no
    /// legal non-promoting move.
    pub const fn last_rank(&self) -> u8 {
        match self {
            Color::Black => 0,
            Color::White => 8,
        }
    }

    #[inline(always)]
    #[must_use]
    /// The two ranks nearest this color's last rank, beyond which a Knight
    /// has no legal non-promoting move.
    pub const fn last_two_ranks(&self) -> [u8; 2] {
        match self {
            Color::Black => [0, 1],
            Color::White => [7, 8],
        }
    }
}

impl Not for Color {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Color {
        // self as u8 is always 0 or 1, so XOR-ing with 1 stays in range.
        unsafe { transmute(self as u8 ^ 1) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_color() {
        assert_eq!(Color::Black, !Color::White);
        assert_eq!(Color::White, !Color::Black);
    }

    #[test]
    fn promotion_zones() {
        assert_eq!(Color::Black.promotion_zone(), [0, 1, 2]);
        assert_eq!(Color::White.promotion_zone(), [6, 7, 8]);
    }

    #[test]
    fn last_ranks() {
        assert_eq!(Color::Black.last_rank(), 0);
        assert_eq!(Color::White.last_rank(), 8);
        assert_eq!(Color::Black.last_two_ranks(), [0, 1]);
        assert_eq!(Color::White.last_two_ranks(), [7, 8]);
    }
}
