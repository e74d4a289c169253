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

//! Predicates describing whether, and why, a game has ended.

use crate::{board::Board, movegen};

#[must_use]
/// Whether the side to move is currently in check.
pub fn is_check(board: &Board) -> bool {
    board
        .king_square(board.side_to_move)
        .is_some_and(|king_sq| board.is_attacked_by(!board.side_to_move, king_sq))
}

#[must_use]
/// Whether the side to move is checkmated: in check, with no legal reply.
pub fn is_checkmate(board: &Board) -> bool {
    is_check(board) && !movegen::has_legal_moves(board)
}

#[must_use]
/// Whether the side to move is stalemated: not in check, but with no legal
/// move. Unlike chess, this is not a drawn position in shogi (the side with
/// no legal move loses), but the predicate itself is definitional either
/// way.
pub fn is_stalemate(board: &Board) -> bool {
    !is_check(board) && !movegen::has_legal_moves(board)
}

#[must_use]
/// Whether `board`'s current position has occurred four or more times,
/// counting the current occurrence (sennichite).
pub fn is_fourfold_repetition(board: &Board) -> bool {
    board.repetition_count() >= 4
}

#[must_use]
/// Whether the game is over for any of the reasons this module can detect:
/// checkmate, stalemate, or fourfold repetition.
pub fn is_game_over(board: &Board) -> bool {
    is_checkmate(board) || is_stalemate(board) || is_fourfold_repetition(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{moves::Move, sfen};

    #[test]
    fn starting_position_is_not_check_or_over() {
        let board = Board::new();
        assert!(!is_check(&board));
        assert!(!is_game_over(&board));
    }

    #[test]
    fn illegal_pawn_drop_mate_position_has_other_legal_moves() {
        // Black is not currently in check here; the scenario is about one
        // specific drop (to 9b) that would deliver an illegal drop-pawn
        // checkmate, not about the position as a whole being mate.
        let board = sfen::parse("kn7/9/1G7/9/9/9/9/9/9 b P 1").unwrap();
        assert!(movegen::has_legal_moves(&board));
        assert!(!is_checkmate(&board));
        assert!(!is_game_over(&board));
    }

    #[test]
    fn blockade_position_is_stalemate() {
        let board = sfen::parse(
            "+R+N+SGKG+S+N+R/+B+N+SG+LG+S+N+B/P+LPP+LPP+LP/1P2P2P1/9/9/9/9/6k2 b - 200",
        )
        .unwrap();
        assert!(!is_check(&board));
        assert!(is_stalemate(&board));
        assert!(is_game_over(&board));
    }

    #[test]
    /// Scenario test 6: pushing a repeating 12-move shuffle does not yet
    /// trigger fourfold repetition, but the thirteenth repeat of the
    /// position does.
    fn fourfold_repetition_triggers_on_thirteenth_move() {
        let mut board = sfen::parse(
            "ln3g2l/1r2g1sk1/1pp1ppn2/p2ps1ppp/1PP6/2GP4P/P1N1PPPP1/1R2S1SK1/L4G1NL w Bb 44",
        )
        .unwrap();
        let moves = [
            "9d9e", "8h6h", "8b6b", "6h8h", "6b8b", "8h6h", "8b6b", "6h8h", "6b8b", "8h6h",
            "8b6b", "6h8h",
        ];
        for usi in moves {
            board.push(Move::from_usi(usi).unwrap());
            assert!(!is_fourfold_repetition(&board), "premature fourfold at {usi}");
        }
        board.push(Move::from_usi("6b8b").unwrap());
        assert!(is_fourfold_repetition(&board));
        assert!(is_game_over(&board));
    }
}
