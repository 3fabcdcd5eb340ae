// This file is part of the chessrules library.
// Copyright (C) 2026 The chessrules developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Move legality, check and checkmate rules for standard chess.
//!
//! Every decision is derived from the board geometry on demand: there are
//! no cached attack maps, and probing a move never leaves a trace.
//!
//! # Examples
//!
//! Probe and commit moves:
//!
//! ```
//! use chessrules::{Board, Color, Square};
//!
//! let mut board = Board::new();
//!
//! // 1. e4
//! assert!(board.attempt_move(Square::E2, Square::E4, Color::White));
//! board.commit_move(Square::E2, Square::E4);
//!
//! assert_eq!(board.turn(), Color::Black);
//! assert_eq!(board.legal_moves(Color::Black).len(), 20);
//! ```
//!
//! Detect game end conditions:
//!
//! ```
//! # use chessrules::{Board, Color};
//! # let board = Board::new();
//! assert!(!board.is_checkmate(Color::White));
//! assert!(!board.is_stalemate(Color::White));
//! assert_eq!(board.outcome(), None); // no winner yet
//! ```
//!
//! The same operations are available as free functions on raw zero-based
//! `(row, col)` coordinates, where row 0 is White's back rank and column 0
//! is the a-file:
//!
//! ```
//! use chessrules::Color;
//!
//! let mut board = chessrules::new_game();
//! assert!(chessrules::attempt_move((1, 4), (3, 4), Color::White, &mut board));
//! assert!(!chessrules::attempt_move((1, 4), (8, 4), Color::White, &mut board));
//! chessrules::commit_move((1, 4), (3, 4), &mut board);
//! assert!(!chessrules::is_check(Color::Black, &mut board));
//! ```
//!
//! Also supports [FEN](fen) for positions and [UCI](uci) coordinates for
//! moves.
//!
//! # Feature flags
//!
//! * `std`: Enabled by default. Implements `std` support in dependencies.
//!   For `no_std` environments, this must be disabled with
//!   `default-features = false`.
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   types with unique natural representations.
//! * `arbitrary`: Implements
//!   [`arbitrary::Arbitrary`](https://docs.rs/arbitrary/1/arbitrary/trait.Arbitrary.html)
//!   for vocabulary types.
//! * `nohash-hasher`: Implements
//!   [`nohash_hasher::IsEnabled`](https://docs.rs/nohash-hasher/0.2/nohash_hasher/trait.IsEnabled.html)
//!   for sensible types.
//!
//! # Logging
//!
//! Committed moves, promotions, finished games and rejected setups are
//! reported as [`tracing`](https://docs.rs/tracing/0.1) events at `DEBUG`
//! level. Rejected move probes are reported at `TRACE` level.

#![no_std]
#![doc(html_root_url = "https://docs.rs/chessrules/0.1.0")]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

#[cfg(any(test, feature = "std"))]
extern crate std;

mod castling_side;
mod check;
mod color;
mod legality;
mod outcome;
mod perft;
mod role;
mod square;
mod types;
mod util;

pub mod board;
pub mod fen;
pub mod movement;
pub mod uci;

pub use board::Board;
pub use castling_side::{ByCastlingSide, CastlingSide};
pub use color::{ByColor, Color, ParseColorError};
pub use legality::{Effects, PlayError, PromotionError};
pub use outcome::{MoveList, Outcome, ParseOutcomeError};
pub use perft::perft;
pub use role::Role;
pub use square::{ParseSquareError, Square};
pub use types::Piece;

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Square {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Role {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Color {}

fn square(coords: (i32, i32)) -> Option<Square> {
    Square::try_from(coords).ok()
}

/// A board in the standard starting position, White to move.
pub fn new_game() -> Board {
    Board::new()
}

/// Tests if `side` may move the piece on `start` to `end`, given as
/// `(row, col)`. Coordinates off the board are rejected.
///
/// See [`Board::attempt_move()`].
pub fn attempt_move(start: (i32, i32), end: (i32, i32), side: Color, board: &mut Board) -> bool {
    match (square(start), square(end)) {
        (Some(from), Some(to)) => board.attempt_move(from, to, side),
        _ => false,
    }
}

/// Executes a move that [`attempt_move()`] accepted with the same
/// coordinates.
///
/// Returns `None` without touching the board if a coordinate is off the
/// board. See [`Board::commit_move()`].
pub fn commit_move(start: (i32, i32), end: (i32, i32), board: &mut Board) -> Option<Effects> {
    Some(board.commit_move(square(start)?, square(end)?))
}

/// Tests if a pawn of either side stands on the first or last rank at
/// `(row, col)`.
pub fn needs_promotion(board: &Board, row: i32, col: i32) -> bool {
    square((row, col)).is_some_and(|sq| board.needs_promotion(sq))
}

/// Replaces the pawn at `(row, col)` with a fresh piece of `role`.
///
/// # Errors
///
/// See [`Board::promote()`]. Coordinates off the board are
/// [`PromotionError::NotPromotable`].
pub fn promote(board: &mut Board, row: i32, col: i32, role: Role) -> Result<(), PromotionError> {
    let sq = square((row, col)).ok_or(PromotionError::NotPromotable)?;
    board.promote(sq, role)
}

/// Tests if the king of `side` is attacked.
///
/// If `side` is the side to move, the result is also stored as
/// [`Board::in_check()`]. Otherwise the flag is left alone.
/// [`Board::is_check()`] answers the same question but never writes the
/// flag.
pub fn is_check(side: Color, board: &mut Board) -> bool {
    if side == board.turn() {
        board.refresh_check()
    } else {
        board.is_check(side)
    }
}

/// Tests if `side` is in check and has no legal move.
pub fn is_checkmate(side: Color, board: &mut Board) -> bool {
    is_check(side, board) && !board.has_any_legal_move(side)
}

/// Tests if `side` is not in check but has no legal move.
pub fn is_stalemate(side: Color, board: &mut Board) -> bool {
    !is_check(side, board) && !board.has_any_legal_move(side)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_coordinates() {
        let mut board = new_game();
        assert!(!attempt_move((-1, 4), (1, 4), Color::White, &mut board));
        assert!(!attempt_move((1, 4), (1, 8), Color::White, &mut board));
        assert_eq!(commit_move((1, 4), (9, 4), &mut board), None);
        assert!(!needs_promotion(&board, 7, -1));
        assert_eq!(
            promote(&mut board, 8, 0, Role::Queen),
            Err(PromotionError::NotPromotable)
        );
        assert_eq!(board, new_game());
    }

    #[test]
    fn test_promotion_by_coordinates() {
        let mut board = Board::empty();
        board.set_piece_at(Square::C7, Color::White.pawn().moved());
        board.set_piece_at(Square::E1, Color::White.king());
        board.set_piece_at(Square::A1, Color::Black.king());
        assert!(attempt_move((6, 2), (7, 2), Color::White, &mut board));
        assert_eq!(
            commit_move((6, 2), (7, 2), &mut board),
            Some(Effects::PROMOTION_PENDING)
        );
        assert!(needs_promotion(&board, 7, 2));
        assert_eq!(promote(&mut board, 7, 2, Role::Queen), Ok(()));
        assert_eq!(board.piece_at(Square::C8), Some(Color::White.queen().moved()));
    }

    #[test]
    fn test_is_check_updates_flag() {
        let mut board = Board::empty();
        board.set_piece_at(Square::E1, Color::White.king());
        board.set_piece_at(Square::E8, Color::Black.king());
        board.set_piece_at(Square::E4, Color::Black.rook());
        assert!(!board.in_check());
        assert!(!is_check(Color::Black, &mut board));
        assert!(!board.in_check());
        assert!(is_check(Color::White, &mut board));
        assert!(board.in_check());
        assert!(!is_checkmate(Color::White, &mut board));
        assert!(!is_stalemate(Color::White, &mut board));
    }

    #[test]
    fn test_scholars_mate() {
        let mut board = new_game();
        for (start, end) in [
            ((1, 4), (3, 4)),
            ((6, 4), (4, 4)),
            ((0, 5), (3, 2)),
            ((7, 1), (5, 2)),
            ((0, 3), (4, 7)),
            ((7, 6), (5, 5)),
            ((4, 7), (6, 5)),
        ] {
            let side = board.turn();
            assert!(attempt_move(start, end, side, &mut board), "{start:?} {end:?}");
            commit_move(start, end, &mut board);
        }
        assert!(board.in_check());
        assert!(is_checkmate(Color::Black, &mut board));
        assert!(!is_checkmate(Color::White, &mut board));
    }
}
