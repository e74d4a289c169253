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

//! A player's hand: the multiset of captured pieces available to drop.

use crate::{error::ShogiError, piece::PieceKind};

/// The number of droppable kinds a hand tracks counts for.
const NUM_DROPPABLE: usize = 7;

#[inline(always)]
const fn slot(kind: PieceKind) -> usize {
    match kind {
        PieceKind::Pawn => 0,
        PieceKind::Lance => 1,
        PieceKind::Knight => 2,
        PieceKind::Silver => 3,
        PieceKind::Gold => 4,
        PieceKind::Bishop => 5,
        PieceKind::Rook => 6,
        _ => unreachable!("hand slots are only defined for droppable kinds"),
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Hash)]
/// The set of pieces a single player holds off the board, ready to be
/// dropped back onto it. Counts are always stored against the unpromoted
/// kind: a captured Tokin is a Pawn in hand.
pub struct Hand {
    counts: [u8; NUM_DROPPABLE],
}

impl Hand {
    #[inline(always)]
    #[must_use]
    /// Construct an empty hand.
    pub const fn new() -> Hand {
        Hand {
            counts: [0; NUM_DROPPABLE],
        }
    }

    #[inline(always)]
    #[must_use]
    /// The number of `kind` currently held. `kind` is demoted first, so
    /// querying a promoted kind returns the count of its unpromoted form.
    pub const fn count(&self, kind: PieceKind) -> u8 {
        self.counts[slot(kind.demote())]
    }

    #[inline(always)]
    #[must_use]
    /// Whether this hand holds at least one of `kind` (after demotion).
    pub const fn contains(&self, kind: PieceKind) -> bool {
        self.count(kind) > 0
    }

    #[inline(always)]
    #[must_use]
    /// Whether this hand holds nothing at all.
    pub const fn is_empty(&self) -> bool {
        let mut i = 0;
        while i < NUM_DROPPABLE {
            if self.counts[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Add one `kind` to this hand, demoting it first (a captured promoted
    /// piece always returns to hand as its base kind).
    ///
    /// # Panics
    ///
    /// Panics in debug builds if this would exceed `kind`'s hand capacity;
    /// a `Board` driven only through legal captures never triggers this,
    /// since no more copies of a kind can be captured than exist in the
    /// game.
    pub fn add(&mut self, kind: PieceKind) {
        let i = slot(kind.demote());
        debug_assert!(self.counts[i] < kind.demote().hand_capacity());
        self.counts[i] += 1;
    }

    /// Remove one `kind` from this hand (demoted first).
    ///
    /// # Errors
    ///
    /// Returns [`ShogiError::HandUnderflow`] if this hand holds none of
    /// `kind`.
    pub fn remove(&mut self, kind: PieceKind) -> Result<(), ShogiError> {
        let demoted = kind.demote();
        let i = slot(demoted);
        if self.counts[i] == 0 {
            return Err(ShogiError::HandUnderflow { kind: demoted });
        }
        self.counts[i] -= 1;
        Ok(())
    }

    /// Iterate over the droppable kinds currently held, along with their
    /// counts, skipping kinds with a zero count.
    pub fn iter(&self) -> impl Iterator<Item = (PieceKind, u8)> + '_ {
        PieceKind::DROPPABLE_KINDS
            .into_iter()
            .filter_map(|kind| {
                let n = self.counts[slot(kind)];
                (n > 0).then_some((kind, n))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_remove() {
        let mut hand = Hand::new();
        assert!(hand.is_empty());
        hand.add(PieceKind::Pawn);
        assert_eq!(hand.count(PieceKind::Pawn), 1);
        assert!(!hand.is_empty());
        hand.remove(PieceKind::Pawn).unwrap();
        assert_eq!(hand.count(PieceKind::Pawn), 0);
    }

    #[test]
    fn remove_from_empty_is_underflow() {
        let mut hand = Hand::new();
        let err = hand.remove(PieceKind::Rook).unwrap_err();
        assert_eq!(
            err,
            ShogiError::HandUnderflow {
                kind: PieceKind::Rook
            }
        );
    }

    #[test]
    fn add_demotes_promoted_kinds() {
        let mut hand = Hand::new();
        hand.add(PieceKind::PromRook);
        assert_eq!(hand.count(PieceKind::Rook), 1);
        assert_eq!(hand.count(PieceKind::PromRook), 1);
    }

    #[test]
    fn iter_skips_empty_slots() {
        let mut hand = Hand::new();
        hand.add(PieceKind::Gold);
        hand.add(PieceKind::Gold);
        let held: Vec<_> = hand.iter().collect();
        assert_eq!(held, vec![(PieceKind::Gold, 2)]);
    }
}
