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

//! Parsing and emitting SFEN ("Shogi Forsyth-Edwards Notation") position
//! strings, the interchange format between this core and the text-format
//! parsers (CSA, KIF) that sit outside it.

use crate::{
    board::Board,
    color::Color,
    error::{ShogiError, ShogiResult},
    piece::{Piece, PieceKind},
    square::Square,
};

/// Parse an SFEN string into a fresh `Board`.
///
/// # Errors
///
/// Returns [`ShogiError::InvalidSfen`] if the string does not have four
/// space-separated fields, the board part does not have nine rows each
/// summing to nine columns, a row contains a double digit or double `+`
/// prefix, Gold or King is promoted, the turn token is neither `b` nor `w`,
/// or the ply field is not a non-negative integer.
pub fn parse(s: &str) -> ShogiResult<Board> {
    let parts: Vec<&str> = s.split_whitespace().collect();
    if parts.len() != 4 {
        return Err(ShogiError::InvalidSfen {
            reason: format!("expected 4 space-separated fields, got {}", parts.len()),
        });
    }

    let rows: Vec<&str> = parts[0].split('/').collect();
    if rows.len() != 9 {
        return Err(ShogiError::InvalidSfen {
            reason: format!("expected 9 rows in board field, got {}", rows.len()),
        });
    }
    for row in &rows {
        validate_row(row)?;
    }

    let turn = match parts[1] {
        "b" => Color::Black,
        "w" => Color::White,
        other => {
            return Err(ShogiError::InvalidSfen {
                reason: format!("unknown turn token {other:?}"),
            })
        }
    };

    let ply: u32 = parts[3].parse().map_err(|_| ShogiError::InvalidSfen {
        reason: format!("ply must be a non-negative integer, got {:?}", parts[3]),
    })?;

    let mut board = Board::empty();
    place_pieces(&mut board, &rows)?;
    parse_hands(&mut board, parts[2])?;
    board.side_to_move = turn;
    board.ply = if ply == 0 { 1 } else { ply };
    board.reseed_transpositions();
    Ok(board)
}

/// Check one `/`-delimited row of the board field for well-formedness,
/// without placing any pieces.
fn validate_row(row: &str) -> ShogiResult<()> {
    let mut sum = 0u32;
    let mut prev_digit = false;
    let mut prev_plus = false;
    for c in row.chars() {
        if let Some(d) = c.to_digit(10) {
            if prev_digit {
                return Err(ShogiError::InvalidSfen {
                    reason: format!("two consecutive digits in row {row:?}"),
                });
            }
            if prev_plus {
                return Err(ShogiError::InvalidSfen {
                    reason: format!("cannot promote a run of empty squares in row {row:?}"),
                });
            }
            sum += d;
            prev_digit = true;
            prev_plus = false;
        } else if c == '+' {
            if prev_plus {
                return Err(ShogiError::InvalidSfen {
                    reason: format!("double promotion prefix in row {row:?}"),
                });
            }
            prev_plus = true;
            prev_digit = false;
        } else if let Some(kind) = PieceKind::from_sfen_letter(c.to_ascii_uppercase()) {
            if prev_plus && matches!(kind, PieceKind::Gold | PieceKind::King) {
                return Err(ShogiError::InvalidSfen {
                    reason: format!("Gold and King cannot promote in row {row:?}"),
                });
            }
            sum += 1;
            prev_digit = false;
            prev_plus = false;
        } else {
            return Err(ShogiError::InvalidSfen {
                reason: format!("invalid character {c:?} in row {row:?}"),
            });
        }
    }
    if sum != 9 {
        return Err(ShogiError::InvalidSfen {
            reason: format!("row {row:?} covers {sum} columns, expected 9"),
        });
    }
    Ok(())
}

/// Place the pieces described by the (already-validated) board rows onto
/// `board`. Square indices run row-major from White's back rank, matching
/// the order rows and characters are read in.
fn place_pieces(board: &mut Board, rows: &[&str]) -> ShogiResult<()> {
    let mut idx: u8 = 0;
    for row in rows {
        let mut prev_plus = false;
        for c in row.chars() {
            if c == '+' {
                prev_plus = true;
                continue;
            }
            if let Some(d) = c.to_digit(10) {
                idx += d as u8;
            } else {
                let upper = c.to_ascii_uppercase();
                let mut kind = PieceKind::from_sfen_letter(upper).ok_or_else(|| {
                    ShogiError::InvalidSfen {
                        reason: format!("unknown piece letter {c:?}"),
                    }
                })?;
                if prev_plus {
                    kind = kind.promote().ok_or_else(|| ShogiError::InvalidSfen {
                        reason: format!("{upper} cannot promote"),
                    })?;
                }
                let color = if c.is_ascii_uppercase() {
                    Color::Black
                } else {
                    Color::White
                };
                board
                    .set_piece_at(Square::from_index(idx), Piece::new(kind, color), false, false)
                    .expect("sfen placement never touches hand counts");
                idx += 1;
            }
            prev_plus = false;
        }
    }
    Ok(())
}

/// Parse the hand field (`[count]<letter>` repeated, or `-` for no pieces
/// held) into `board`'s hands.
fn parse_hands(board: &mut Board, field: &str) -> ShogiResult<()> {
    if field == "-" {
        return Ok(());
    }
    let mut count: u32 = 0;
    for c in field.chars() {
        if let Some(d) = c.to_digit(10) {
            count = count * 10 + d;
        } else {
            let upper = c.to_ascii_uppercase();
            let kind = PieceKind::from_sfen_letter(upper).ok_or_else(|| ShogiError::InvalidSfen {
                reason: format!("unknown piece letter {c:?} in hand field"),
            })?;
            if kind == PieceKind::King {
                return Err(ShogiError::InvalidSfen {
                    reason: "King cannot be held in hand".to_string(),
                });
            }
            let color = if c.is_ascii_uppercase() {
                Color::Black
            } else {
                Color::White
            };
            let n = if count == 0 { 1 } else { count };
            for _ in 0..n {
                board.hand_mut(color).add(kind);
            }
            count = 0;
        }
    }
    Ok(())
}

#[must_use]
/// Emit `board` as an SFEN string.
pub fn emit(board: &Board) -> String {
    let mut s = String::new();
    for rank in 0..9 {
        let mut empty = 0u8;
        for file in 0..9 {
            match board.piece_at(Square::new(file, rank)) {
                None => empty += 1,
                Some(p) => {
                    if empty > 0 {
                        s.push_str(&empty.to_string());
                        empty = 0;
                    }
                    s.push_str(&p.sfen_symbol());
                }
            }
        }
        if empty > 0 {
            s.push_str(&empty.to_string());
        }
        if rank != 8 {
            s.push('/');
        }
    }

    s.push(' ');
    s.push(if board.side_to_move == Color::Black {
        'b'
    } else {
        'w'
    });
    s.push(' ');

    let mut any_hand = false;
    for color in [Color::Black, Color::White] {
        for (kind, count) in board.hand(color).iter() {
            any_hand = true;
            if count > 1 {
                s.push_str(&count.to_string());
            }
            s.push_str(&Piece::new(kind, color).sfen_symbol());
        }
    }
    if !any_hand {
        s.push('-');
    }

    s.push(' ');
    s.push_str(&board.ply.to_string());
    s
}
