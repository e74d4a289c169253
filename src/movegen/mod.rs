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

//! Generation and verification of pseudo-legal and legal moves in a
//! position.

use crate::{
    attacks,
    board::Board,
    color::Color,
    moves::Move,
    piece::PieceKind,
    square::Square,
};

#[must_use]
/// Whether a piece of `kind` belonging to `color` can make a non-promoting
/// move to `to` at all. Forbids only the forced-promotion cases: a Pawn or
/// Lance landing on the farthest rank, or a Knight landing on either of the
/// two farthest ranks, since such a piece could never move again.
fn can_move_without_promotion(to: Square, kind: PieceKind, color: Color) -> bool {
    match kind {
        PieceKind::Pawn | PieceKind::Lance => to.rank() != color.last_rank(),
        PieceKind::Knight => !color.last_two_ranks().contains(&to.rank()),
        _ => true,
    }
}

/// Whether `color` already has an unpromoted pawn on `to`'s file (the
/// "nifu" double-pawn rule, which bans only a *second* unpromoted pawn).
fn is_double_pawn(board: &Board, to: Square, color: Color) -> bool {
    (0..9).any(|rank| {
        let sq = Square::new(to.file(), rank);
        board
            .piece_at(sq)
            .is_some_and(|p| p.color == color && p.kind == PieceKind::Pawn)
    })
}

#[must_use]
/// Re-validate `mv` against `board` without consulting any generated move
/// list. Never panics on malformed input; simply returns `false`.
///
/// Rejects: the null move, moves from a square the mover does not occupy,
/// moves onto a square the mover already occupies, promotion flags on an
/// unpromotable kind or outside both sides' promotion zones, and drops that
/// violate the drop rules (unheld kind, occupied destination, unplayable
/// landing square, or nifu).
pub fn is_pseudo_legal(board: &Board, mv: Move) -> bool {
    let mover = board.side_to_move;
    match mv {
        Move::Null => false,
        Move::Board { from, to, promote } => {
            let Some(piece) = board.piece_at(from) else {
                return false;
            };
            if piece.color != mover || board.occupancy().of(mover).contains(to) {
                return false;
            }
            if promote {
                if !piece.kind.is_promotable() {
                    return false;
                }
                if !from.in_promotion_zone(mover) && !to.in_promotion_zone(mover) {
                    return false;
                }
            } else if !can_move_without_promotion(to, piece.kind, mover) {
                return false;
            }
            attacks::attacks_from(piece.kind, from, mover, board.occupancy().all).contains(to)
        }
        Move::Drop { to, kind } => {
            if !board.hand(mover).contains(kind) || board.piece_kind_at(to).is_some() {
                return false;
            }
            if !can_move_without_promotion(to, kind, mover) {
                return false;
            }
            kind != PieceKind::Pawn || !is_double_pawn(board, to, mover)
        }
    }
}

/// Append every pseudo-legal board move (sliding or stepping a piece already
/// on the board) to `moves`.
fn generate_board_moves(board: &Board, moves: &mut Vec<Move>) {
    let mover = board.side_to_move;
    let own = board.occupancy().of(mover);
    for from in own {
        let Some(kind) = board.piece_kind_at(from) else {
            continue;
        };
        let reach = attacks::attacks_from(kind, from, mover, board.occupancy().all) & !own;
        for to in reach {
            if can_move_without_promotion(to, kind, mover) {
                moves.push(Move::normal(from, to));
            }
            if kind.is_promotable() && (from.in_promotion_zone(mover) || to.in_promotion_zone(mover))
            {
                moves.push(Move::promoting(from, to));
            }
        }
    }
}

/// Append every pseudo-legal drop to `moves`.
fn generate_drops(board: &Board, moves: &mut Vec<Move>) {
    let mover = board.side_to_move;
    let empty = !board.occupancy().all;
    for (kind, _count) in board.hand(mover).iter() {
        for to in empty {
            if !can_move_without_promotion(to, kind, mover) {
                continue;
            }
            if kind == PieceKind::Pawn && is_double_pawn(board, to, mover) {
                continue;
            }
            moves.push(Move::drop(to, kind));
        }
    }
}

#[must_use]
/// Every pseudo-legal move in `board` for the side to move: legal-shaped,
/// but not yet checked for leaving the mover's own king in check or for
/// illegal drop-pawn checkmate.
pub fn pseudo_legal_moves(board: &Board) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    generate_board_moves(board, &mut moves);
    generate_drops(board, &mut moves);
    moves
}

/// Whether dropping a pawn of `mover`'s color onto `pawn_sq` (already played
/// on `after`, a clone of the pre-drop position) is an illegal drop-pawn
/// checkmate ("uchifuzume").
///
/// The narrow check the specification asks for: the pawn must check the
/// opponent's king; every escape square open to that king must itself be
/// attacked by the mover; and no non-king opponent piece may be able to
/// capture the pawn.
fn is_uchifuzume(after: &Board, pawn_sq: Square, mover: Color) -> bool {
    let opponent = !mover;
    let Some(king_sq) = after.king_square(opponent) else {
        return false;
    };
    if !attacks::attacks_from(PieceKind::Pawn, pawn_sq, mover, after.occupancy().all)
        .contains(king_sq)
    {
        return false;
    }

    let escapes =
        attacks::attacks_from(PieceKind::King, king_sq, opponent, after.occupancy().all)
            & !after.occupancy().of(opponent);
    for to in escapes {
        if !after.is_attacked_by(mover, to) {
            return false;
        }
    }

    let capturable_by_non_king = PieceKind::ALL_KINDS
        .into_iter()
        .filter(|&kind| kind != PieceKind::King)
        .any(|kind| {
            let reach = attacks::attacks_from(kind, pawn_sq, mover, after.occupancy().all);
            !(reach & after.bitboard_of(kind) & after.occupancy().of(opponent)).is_empty()
        });

    !capturable_by_non_king
}

#[must_use]
/// Whether `mv` (assumed pseudo-legal on `board`) is fully legal: playing it
/// must not leave the mover's own king in check, and a pawn drop must not
/// be an uchifuzume.
///
/// Plays `mv` out on a cloned board to answer both questions, rather than
/// mutating and restoring `board` in place, so callers keep their own
/// position untouched.
pub fn is_legal(board: &Board, mv: Move) -> bool {
    let mover = board.side_to_move;
    let mut after = board.clone();
    after.push(mv);

    if let Some(king_sq) = after.king_square(mover) {
        if after.is_attacked_by(!mover, king_sq) {
            return false;
        }
    }

    if let Move::Drop {
        to,
        kind: PieceKind::Pawn,
    } = mv
    {
        if is_uchifuzume(&after, to, mover) {
            return false;
        }
    }

    true
}

#[must_use]
/// Every legal move in `board` for the side to move.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    pseudo_legal_moves(board)
        .into_iter()
        .filter(|&mv| is_legal(board, mv))
        .collect()
}

#[must_use]
/// Whether the side to move has at least one legal move, without
/// necessarily enumerating all of them.
pub fn has_legal_moves(board: &Board) -> bool {
    pseudo_legal_moves(board)
        .into_iter()
        .any(|mv| is_legal(board, mv))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{hand::Hand, sfen};

    #[test]
    fn starting_position_has_thirty_legal_moves() {
        let board = Board::new();
        assert_eq!(legal_moves(&board).len(), 30);
    }

    #[test]
    fn starting_position_depth_two_perft_is_900() {
        let board = Board::new();
        let mut total = 0u64;
        for mv in legal_moves(&board) {
            let mut next = board.clone();
            next.push(mv);
            total += legal_moves(&next).len() as u64;
        }
        assert_eq!(total, 900);
    }

    #[test]
    fn blockade_position_has_no_pseudo_legal_moves() {
        let board = sfen::parse(
            "+R+N+SGKG+S+N+R/+B+N+SG+LG+S+N+B/P+LPP+LPP+LP/1P2P2P1/9/9/9/9/6k2 b - 200",
        )
        .unwrap();
        assert_eq!(pseudo_legal_moves(&board).len(), 0);
    }

    #[test]
    fn lone_bishop_has_twenty_two_legal_moves() {
        let board = sfen::parse("9/9/9/9/4B4/9/9/9/9 b - 1").unwrap();
        assert_eq!(legal_moves(&board).len(), 22);
    }

    #[test]
    fn double_pawn_drop_is_excluded_and_total_is_sixty_five() {
        let board = sfen::parse("k8/9/9/9/9/9/9/9/P8 b P 1").unwrap();
        let moves = legal_moves(&board);
        assert_eq!(moves.len(), 65);
        assert!(!moves
            .iter()
            .any(|m| matches!(m, Move::Drop { to, kind: PieceKind::Pawn } if to.file() == 0)));
    }

    #[test]
    fn illegal_pawn_drop_mate_is_excluded() {
        let board = sfen::parse("kn7/9/1G7/9/9/9/9/9/9 b P 1").unwrap();
        let moves = legal_moves(&board);
        assert_eq!(moves.len(), 76);
        let mate_square = Square::from_usi("9b").unwrap();
        assert!(!moves
            .iter()
            .any(|m| matches!(m, Move::Drop { to, kind: PieceKind::Pawn } if *to == mate_square)));
    }

    #[test]
    fn is_legal_rejects_self_check() {
        let mut board = Board::empty();
        board
            .set_piece_at(
                Square::new(4, 8),
                crate::piece::Piece::new(PieceKind::King, Color::Black),
                false,
                false,
            )
            .unwrap();
        board
            .set_piece_at(
                Square::new(4, 0),
                crate::piece::Piece::new(PieceKind::Rook, Color::White),
                false,
                false,
            )
            .unwrap();
        board
            .set_piece_at(
                Square::new(4, 7),
                crate::piece::Piece::new(PieceKind::Silver, Color::Black),
                false,
                false,
            )
            .unwrap();
        // The silver blocks the rook's check along file 4; sidestepping it
        // exposes the king.
        let mv = Move::normal(Square::new(4, 7), Square::new(3, 6));
        assert!(!is_legal(&board, mv));
    }

    #[test]
    fn is_pseudo_legal_rejects_null_move() {
        let board = Board::new();
        assert!(!is_pseudo_legal(&board, Move::Null));
    }

    #[test]
    fn is_pseudo_legal_rejects_drop_of_unheld_kind() {
        let board = Board::new();
        assert_eq!(board.hand(Color::Black), &Hand::new());
        assert!(!is_pseudo_legal(
            &board,
            Move::drop(Square::new(4, 4), PieceKind::Gold)
        ));
    }
}
