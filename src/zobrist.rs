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

//! Zobrist hash key generation for boards and hands.
//!
//! A position's hash is the XOR of: one key per occupied (square, piece
//! kind, color) triple; the side-to-move key, present iff it is White's
//! turn; and a hand contribution per color, computed by encoding that
//! color's hand counts as a single mixed-radix integer and XOR-ing together
//! one key per set bit of that integer. The latter trick lets 17 keys stand
//! in for the 106,875 distinct hand states a single color can be in (`19 *
//! 5 * 5 * 5 * 5 * 3 * 3`, the product of one more than each droppable
//! kind's hand capacity), rather than needing a key per state.
//!
//! Unlike the source project's frozen hardcoded tables, the
//! piece-square-color table here (2,268 keys) is large enough that writing
//! it out literally would be unreviewable, so it's generated once at
//! process start from a fixed seed instead; the same `fastrand`-driven
//! generator the source project uses to print *its* frozen table (see
//! `print_keys` below) is simply left running behind a `Lazy`, producing the
//! same numbers on every run.

use crate::{color::Color, hand::Hand, piece::PieceKind, square::Square};

use once_cell::sync::Lazy;

/// The key XOR'd into a position's hash when it is White's turn to move.
pub const SIDE_TO_MOVE_KEY: u64 = 0x9e37_79b9_7f4a_7c15;

/// One key per (square, piece kind, color). Indexed `[square][kind][color]`.
static SQUARE_KEYS: Lazy<[[[u64; Color::NUM]; PieceKind::NUM_KINDS]; Square::NUM]> =
    Lazy::new(|| {
        fastrand::seed(12345);
        let mut keys = [[[0u64; Color::NUM]; PieceKind::NUM_KINDS]; Square::NUM];
        for sq in &mut keys {
            for kind in sq.iter_mut() {
                for color_key in kind.iter_mut() {
                    *color_key = fastrand::u64(..);
                }
            }
        }
        keys
    });

/// One key per bit of a color's encoded hand integer (see module docs).
/// Black and White use disjoint key sets, so two colors holding identical
/// hands don't cancel each other's contribution to zero.
static HAND_KEYS: Lazy<[[u64; HAND_ENCODING_BITS]; Color::NUM]> = Lazy::new(|| {
    let mut keys = [[0u64; HAND_ENCODING_BITS]; Color::NUM];
    for color in &mut keys {
        for key in color.iter_mut() {
            *key = fastrand::u64(..);
        }
    }
    keys
});

/// `106_875` distinct hand states (`19 * 5 * 5 * 5 * 5 * 3 * 3`) fit in 17
/// bits (`2^17 = 131_072`).
const HAND_ENCODING_BITS: usize = 17;

/// The radix of each droppable kind's count in the mixed-radix hand
/// encoding, in the same order as [`PieceKind::DROPPABLE_KINDS`].
const HAND_RADICES: [u32; 7] = [19, 5, 5, 5, 5, 3, 3];

#[must_use]
/// Encode a hand's counts as a single integer in `0..106_875`, via mixed
/// radix arithmetic in the order Pawn, Lance, Knight, Silver, Gold, Bishop,
/// Rook.
fn encode_hand(hand: &Hand) -> u32 {
    let mut value = 0u32;
    for (i, &kind) in PieceKind::DROPPABLE_KINDS.iter().enumerate().rev() {
        value = value * HAND_RADICES[i] + u32::from(hand.count(kind));
    }
    value
}

#[must_use]
/// The Zobrist contribution of `color`'s hand.
pub fn hand_key(color: Color, hand: &Hand) -> u64 {
    let encoded = encode_hand(hand);
    let keys = &HAND_KEYS[color as usize];
    (0..HAND_ENCODING_BITS as u32)
        .filter(|bit| (encoded >> bit) & 1 != 0)
        .map(|bit| keys[bit as usize])
        .fold(0, |acc, k| acc ^ k)
}

#[inline]
#[must_use]
/// Get the Zobrist key for a piece of `kind` and `color` standing on `sq`.
pub fn square_key(sq: Square, kind: PieceKind, color: Color) -> u64 {
    SQUARE_KEYS[usize::from(sq)][kind as usize][color as usize]
}

#[allow(unused)]
/// Helper used while developing this module to confirm that the generated
/// tables look like the kind of output the frozen-constant version of this
/// module would have printed. Not part of the public API.
fn print_keys() {
    fastrand::seed(12345);
    println!("pub const SIDE_TO_MOVE_KEY: u64 = 0x{:x};", fastrand::u64(..));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_keys_are_pairwise_distinct_on_one_square() {
        let sq = Square::new(4, 4);
        let mut seen = std::collections::HashSet::new();
        for kind in PieceKind::ALL_KINDS {
            for color in [Color::Black, Color::White] {
                assert!(seen.insert(square_key(sq, kind, color)));
            }
        }
    }

    #[test]
    fn empty_hands_encode_to_zero() {
        assert_eq!(encode_hand(&Hand::new()), 0);
    }

    #[test]
    fn hand_key_changes_when_hand_changes() {
        let empty = Hand::new();
        let mut one_pawn = Hand::new();
        one_pawn.add(PieceKind::Pawn);
        assert_ne!(
            hand_key(Color::Black, &empty),
            hand_key(Color::Black, &one_pawn)
        );
    }

    #[test]
    fn identical_hands_on_both_colors_do_not_cancel() {
        let mut hand = Hand::new();
        hand.add(PieceKind::Rook);
        let black = hand_key(Color::Black, &hand);
        let white = hand_key(Color::White, &hand);
        assert_ne!(black ^ white, 0);
    }
}
