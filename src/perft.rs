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

//! Performance testing, or "perft." Perft counts the legal move tree rooted
//! at a position to a fixed depth, which is both a speed benchmark and a
//! correctness check on move generation: a wrong node count at some depth
//! means the generator produces an illegal move, misses a legal one, or gets
//! promotion/drop bookkeeping wrong somewhere above that depth.

use std::time::Instant;

use crate::{board::Board, movegen, sfen};

#[allow(dead_code)]
/// Run perft from the position described by `sfen_str` to `depth` and print
/// the node count and speed to stdout, returning the node count.
///
/// # Panics
///
/// Panics if `sfen_str` is not a well-formed SFEN string.
pub fn perft(sfen_str: &str, depth: u8) -> u64 {
    let board = sfen::parse(sfen_str).expect("perft requires a well-formed SFEN");
    let tic = Instant::now();
    let num_nodes = perft_search(&board, depth);
    let toc = Instant::now();
    let time = toc - tic;
    let speed = (num_nodes as f64) / time.as_secs_f64();
    println!(
        "time {:.2} secs, num nodes {num_nodes}: {speed:.0} nodes/sec",
        time.as_secs_f64()
    );

    num_nodes
}

/// The core recursive search: count leaf positions at `depth` plies below
/// `board`, playing and unplaying each legal move on a clone.
fn perft_search(board: &Board, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut total = 0;
    for mv in movegen::legal_moves(board) {
        let mut next = board.clone();
        next.push(mv);
        total += perft_search(&next, depth - 1);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::STARTING_SFEN;

    #[test]
    /// Scenario test 1: legal-move counts from the starting position at
    /// depths 1 and 2.
    fn perft_start_position() {
        perft_assistant(STARTING_SFEN, &[1, 30, 900]);
    }

    fn perft_assistant(sfen_str: &str, node_counts: &[u64]) {
        for (depth, &expected) in node_counts.iter().enumerate() {
            assert_eq!(perft(sfen_str, depth as u8), expected);
        }
    }
}
