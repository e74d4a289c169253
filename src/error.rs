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

//! Typed error kinds surfaced by input-validation failures.
//!
//! Invariant violations inside the core (a corrupted `Board`, a `pop` that
//! somehow unbalances the capture stack) are programmer errors and panic
//! instead of routing through this enum; see each variant's doc comment for
//! which category it belongs to.

use thiserror::Error;

/// Errors the core can raise when it is handed untrusted input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShogiError {
    /// An SFEN string failed to parse.
    #[error("invalid SFEN: {reason}")]
    InvalidSfen {
        /// Human-readable description of the offending field or token.
        reason: String,
    },

    /// A USI move string failed to parse.
    #[error("invalid USI move string: {reason}")]
    InvalidUsi {
        /// Human-readable description of why the string was rejected.
        reason: String,
    },

    /// A `Move` was constructed from contradictory parts.
    #[error("invalid move: {reason}")]
    InvalidMove {
        /// Human-readable description of the contradiction.
        reason: String,
    },

    /// A hand was asked to remove a piece kind it does not contain.
    ///
    /// A `Board` driven only through `push`/`pop` on moves that passed
    /// `is_legal` never triggers this; it exists to turn an internal
    /// consistency violation into a catchable error for embedders that
    /// would rather not abort.
    #[error("hand underflow: no {kind:?} in hand")]
    HandUnderflow {
        /// The piece kind that was missing.
        kind: crate::piece::PieceKind,
    },

    /// `pop` was called with no matching prior `push`.
    ///
    /// Like [`ShogiError::HandUnderflow`], a correctly driven `Board` never
    /// hits this path.
    #[error("pop called with an empty move stack")]
    EmptyStack,
}

/// Convenience alias for the core's typed `Result`.
pub type ShogiResult<T> = Result<T, ShogiError>;
