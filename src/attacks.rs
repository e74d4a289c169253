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

//! Precomputed and on-the-fly attack generation for every piece kind.
//!
//! Leaper pieces (Pawn, Knight, Silver, Gold, King, and the promoted minor
//! pieces, which all move like a Gold) get their attack sets precomputed
//! once into process-wide tables. Sliding pieces (Lance, Bishop, Rook, and
//! their promoted forms) are computed on the fly by walking a ray of shift
//! primitives out from the source square until a blocker or the edge of the
//! board is hit; an occupied square blocks the ray but is itself included in
//! the attack set, since it may hold a capturable enemy piece.

use crate::{bitboard::Bitboard, color::Color, piece::PieceKind, square::Square};

use once_cell::sync::Lazy;

type ShiftFn = fn(Bitboard) -> Bitboard;

const SILVER_STEPS: [[ShiftFn; 5]; 2] = [
    // Black moves towards rank 0.
    [
        Bitboard::shift_up,
        Bitboard::shift_up_left,
        Bitboard::shift_up_right,
        Bitboard::shift_down_left,
        Bitboard::shift_down_right,
    ],
    // White moves towards rank 8.
    [
        Bitboard::shift_down,
        Bitboard::shift_down_left,
        Bitboard::shift_down_right,
        Bitboard::shift_up_left,
        Bitboard::shift_up_right,
    ],
];

const GOLD_STEPS: [[ShiftFn; 6]; 2] = [
    [
        Bitboard::shift_up,
        Bitboard::shift_down,
        Bitboard::shift_left,
        Bitboard::shift_right,
        Bitboard::shift_up_left,
        Bitboard::shift_up_right,
    ],
    [
        Bitboard::shift_down,
        Bitboard::shift_up,
        Bitboard::shift_left,
        Bitboard::shift_right,
        Bitboard::shift_down_left,
        Bitboard::shift_down_right,
    ],
];

const KING_STEPS: [ShiftFn; 8] = [
    Bitboard::shift_up,
    Bitboard::shift_down,
    Bitboard::shift_left,
    Bitboard::shift_right,
    Bitboard::shift_up_left,
    Bitboard::shift_up_right,
    Bitboard::shift_down_left,
    Bitboard::shift_down_right,
];

fn leaper_attacks(sq: Square, steps: &[ShiftFn]) -> Bitboard {
    let origin = Bitboard::from(sq);
    steps.iter().fold(Bitboard::EMPTY, |acc, step| acc | step(origin))
}

fn knight_attacks_for(sq: Square, color: Color) -> Bitboard {
    let origin = Bitboard::from(sq);
    let two_forward = match color {
        Color::Black => origin.shift_up_2(),
        Color::White => origin.shift_down_2(),
    };
    two_forward.shift_left() | two_forward.shift_right()
}

/// Pawn attacks, indexed `[color][square]`.
static PAWN_ATTACKS: Lazy<[[Bitboard; Square::NUM]; Color::NUM]> = Lazy::new(|| {
    let mut table = [[Bitboard::EMPTY; Square::NUM]; Color::NUM];
    for idx in 0..Square::NUM as u8 {
        let sq = Square::from_index(idx);
        let origin = Bitboard::from(sq);
        table[Color::Black as usize][idx as usize] = origin.shift_up();
        table[Color::White as usize][idx as usize] = origin.shift_down();
    }
    table
});

/// Knight attacks, indexed `[color][square]`.
static KNIGHT_ATTACKS: Lazy<[[Bitboard; Square::NUM]; Color::NUM]> = Lazy::new(|| {
    let mut table = [[Bitboard::EMPTY; Square::NUM]; Color::NUM];
    for idx in 0..Square::NUM as u8 {
        let sq = Square::from_index(idx);
        table[Color::Black as usize][idx as usize] = knight_attacks_for(sq, Color::Black);
        table[Color::White as usize][idx as usize] = knight_attacks_for(sq, Color::White);
    }
    table
});

/// Silver attacks, indexed `[color][square]`.
static SILVER_ATTACKS: Lazy<[[Bitboard; Square::NUM]; Color::NUM]> = Lazy::new(|| {
    let mut table = [[Bitboard::EMPTY; Square::NUM]; Color::NUM];
    for idx in 0..Square::NUM as u8 {
        let sq = Square::from_index(idx);
        table[Color::Black as usize][idx as usize] = leaper_attacks(sq, &SILVER_STEPS[0]);
        table[Color::White as usize][idx as usize] = leaper_attacks(sq, &SILVER_STEPS[1]);
    }
    table
});

/// Gold attacks (also used for the four promoted minor pieces, which all
/// move like a Gold), indexed `[color][square]`.
static GOLD_ATTACKS: Lazy<[[Bitboard; Square::NUM]; Color::NUM]> = Lazy::new(|| {
    let mut table = [[Bitboard::EMPTY; Square::NUM]; Color::NUM];
    for idx in 0..Square::NUM as u8 {
        let sq = Square::from_index(idx);
        table[Color::Black as usize][idx as usize] = leaper_attacks(sq, &GOLD_STEPS[0]);
        table[Color::White as usize][idx as usize] = leaper_attacks(sq, &GOLD_STEPS[1]);
    }
    table
});

/// King attacks (color-independent), indexed `[square]`.
static KING_ATTACKS: Lazy<[Bitboard; Square::NUM]> = Lazy::new(|| {
    let mut table = [Bitboard::EMPTY; Square::NUM];
    for idx in 0..Square::NUM as u8 {
        let sq = Square::from_index(idx);
        table[idx as usize] = leaper_attacks(sq, &KING_STEPS);
    }
    table
});

/// Walk one ray of shift primitives from `sq`, stopping at (and including)
/// the first square occupied in `occ`, or at the edge of the board.
fn ray(sq: Square, occ: Bitboard, step: ShiftFn) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    let mut cur = step(Bitboard::from(sq));
    while !cur.is_empty() {
        attacks |= cur;
        if !(cur & occ).is_empty() {
            break;
        }
        cur = step(cur);
    }
    attacks
}

#[must_use]
/// Attacks of a Lance of `color` standing on `sq`, given board occupancy
/// `occ`.
pub fn lance_attacks(sq: Square, color: Color, occ: Bitboard) -> Bitboard {
    match color {
        Color::Black => ray(sq, occ, Bitboard::shift_up),
        Color::White => ray(sq, occ, Bitboard::shift_down),
    }
}

#[must_use]
/// Attacks of a Bishop standing on `sq`, given board occupancy `occ`.
pub fn bishop_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    ray(sq, occ, Bitboard::shift_up_left)
        | ray(sq, occ, Bitboard::shift_up_right)
        | ray(sq, occ, Bitboard::shift_down_left)
        | ray(sq, occ, Bitboard::shift_down_right)
}

#[must_use]
/// Attacks of a Rook standing on `sq`, given board occupancy `occ`.
pub fn rook_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    ray(sq, occ, Bitboard::shift_up)
        | ray(sq, occ, Bitboard::shift_down)
        | ray(sq, occ, Bitboard::shift_left)
        | ray(sq, occ, Bitboard::shift_right)
}

#[must_use]
/// Attacks of a promoted Bishop (a "Horse"): a Bishop's slide plus a King's
/// step.
pub fn prom_bishop_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    bishop_attacks(sq, occ) | KING_ATTACKS[usize::from(sq)]
}

#[must_use]
/// Attacks of a promoted Rook (a "Dragon"): a Rook's slide plus a King's
/// step.
pub fn prom_rook_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    rook_attacks(sq, occ) | KING_ATTACKS[usize::from(sq)]
}

#[must_use]
/// Dispatch to the correct attack computation for a piece of `kind` and
/// `color` standing on `sq`, given board occupancy `occ`.
///
/// `occ` should be the full board occupancy (both colors); this function
/// does not filter out attacks on friendly pieces, since callers need that
/// information differently (move generation excludes them, `is_attacked_by`
/// wants them included).
pub fn attacks_from(kind: PieceKind, sq: Square, color: Color, occ: Bitboard) -> Bitboard {
    match kind {
        PieceKind::Pawn => PAWN_ATTACKS[color as usize][usize::from(sq)],
        PieceKind::Knight => KNIGHT_ATTACKS[color as usize][usize::from(sq)],
        PieceKind::Silver => SILVER_ATTACKS[color as usize][usize::from(sq)],
        PieceKind::Gold
        | PieceKind::PromPawn
        | PieceKind::PromLance
        | PieceKind::PromKnight
        | PieceKind::PromSilver => GOLD_ATTACKS[color as usize][usize::from(sq)],
        PieceKind::King => KING_ATTACKS[usize::from(sq)],
        PieceKind::Lance => lance_attacks(sq, color, occ),
        PieceKind::Bishop => bishop_attacks(sq, occ),
        PieceKind::Rook => rook_attacks(sq, occ),
        PieceKind::PromBishop => prom_bishop_attacks(sq, occ),
        PieceKind::PromRook => prom_rook_attacks(sq, occ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pawn_attacks_one_square_forward() {
        let sq = Square::new(4, 4);
        let black = attacks_from(PieceKind::Pawn, sq, Color::Black, Bitboard::EMPTY);
        assert_eq!(black, Bitboard::from(Square::new(4, 3)));
        let white = attacks_from(PieceKind::Pawn, sq, Color::White, Bitboard::EMPTY);
        assert_eq!(white, Bitboard::from(Square::new(4, 5)));
    }

    #[test]
    fn king_attacks_all_eight_neighbors_in_center() {
        let sq = Square::new(4, 4);
        let attacks = attacks_from(PieceKind::King, sq, Color::Black, Bitboard::EMPTY);
        assert_eq!(attacks.len(), 8);
    }

    #[test]
    fn lance_slides_until_blocked() {
        let sq = Square::new(4, 8);
        let blocker = Square::new(4, 3);
        let occ = Bitboard::from(blocker);
        let attacks = lance_attacks(sq, Color::Black, occ);
        // Every square between rank 7 down to rank 3 inclusive (the blocker
        // itself is included as a capture target), none beyond it.
        for rank in 3..8 {
            assert!(attacks.contains(Square::new(4, rank)));
        }
        assert!(!attacks.contains(Square::new(4, 2)));
    }

    #[test]
    fn rook_attacks_cross_on_empty_board() {
        let sq = Square::new(4, 4);
        let attacks = rook_attacks(sq, Bitboard::EMPTY);
        assert_eq!(attacks.len(), 16);
    }

    #[test]
    fn bishop_attacks_on_empty_board_from_center() {
        let sq = Square::new(4, 4);
        let attacks = bishop_attacks(sq, Bitboard::EMPTY);
        assert_eq!(attacks.len(), 16);
    }

    #[test]
    fn prom_rook_adds_diagonal_steps_to_rook() {
        let sq = Square::new(4, 4);
        let dragon = prom_rook_attacks(sq, Bitboard::EMPTY);
        let rook = rook_attacks(sq, Bitboard::EMPTY);
        assert!(dragon.len() > rook.len());
        for corner in [
            Square::new(3, 3),
            Square::new(5, 3),
            Square::new(3, 5),
            Square::new(5, 5),
        ] {
            assert!(dragon.contains(corner));
        }
    }
}
