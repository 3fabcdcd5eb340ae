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

//! Geometric movement rules, one per [`Role`].
//!
//! These rules answer whether the piece on one square could move to another
//! on an unchanging board. They know nothing about king safety; that is
//! layered on top by [`Board::attempt_move`](crate::Board::attempt_move).
//!
//! # Examples
//!
//! ```
//! use chessrules::{movement, Board, Square};
//!
//! let board = Board::new();
//! assert!(movement::can_reach(&board, Square::G1, Square::F3));
//! assert!(movement::can_reach(&board, Square::E2, Square::E4));
//!
//! // The bishop is still hemmed in by its own pawns.
//! assert!(!movement::can_reach(&board, Square::F1, Square::C4));
//! ```

use crate::{board::Board, color::Color, role::Role, square::Square, types::Piece};

/// How a pawn gets from one square to another.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum PawnStep {
    /// One square straight ahead onto an empty square.
    Single,
    /// Two squares straight ahead from the pawn's first move.
    Double,
    /// One square diagonally forward onto an enemy piece.
    Capture,
    /// One square diagonally forward onto an empty square, capturing the
    /// enemy pawn on the given square beside the origin.
    EnPassant(Square),
}

/// Tests if the piece on `from` could move to `to`, ignoring king safety.
///
/// Returns `false` if `from` is empty or `from == to`. Castling is not a
/// geometric king move and is handled by the legality engine.
pub fn can_reach(board: &Board, from: Square, to: Square) -> bool {
    let Some(piece) = board.piece_at(from) else {
        return false;
    };
    if from == to {
        return false;
    }
    match piece.role {
        Role::Pawn => pawn_step(board, from, to).is_some(),
        Role::Knight => knight_reaches(board, piece, from, to),
        Role::Bishop | Role::Rook | Role::Queen => slider_reaches(board, piece, from, to),
        Role::King => king_reaches(board, piece, from, to),
    }
}

/// Tests if the piece on `from` controls `target`.
///
/// This is the geometry used to detect attacks. Whatever stands on `target`
/// is disregarded, as if it were lifted from the board. Pawns control only
/// the two squares diagonally in front of them.
pub fn attacks(board: &Board, from: Square, target: Square) -> bool {
    let Some(piece) = board.piece_at(from) else {
        return false;
    };
    if from == target {
        return false;
    }
    let (drow, dcol) = from.delta(target);
    match piece.role {
        Role::Pawn => drow == piece.color.pawn_direction() && dcol.abs() == 1,
        Role::Knight => is_knight_delta(drow, dcol),
        Role::King => from.distance(target) == 1,
        Role::Bishop | Role::Rook | Role::Queen => {
            aligned(piece.role, drow, dcol) && path_is_clear(board, from, target)
        }
    }
}

/// Classifies a pawn move, or returns `None` if the pawn on `from` cannot
/// make it.
///
/// A double step is only reported as eligible. Recording it for en passant
/// is up to [`Board::commit_move`](crate::Board::commit_move).
pub fn pawn_step(board: &Board, from: Square, to: Square) -> Option<PawnStep> {
    let pawn = board.piece_at(from).filter(|piece| piece.role == Role::Pawn)?;
    let forward = pawn.color.pawn_direction();
    let (drow, dcol) = from.delta(to);

    if dcol == 0 {
        if drow == forward {
            board.is_empty_at(to).then_some(PawnStep::Single)
        } else if drow == 2 * forward && !pawn.has_moved {
            let skipped = from.offset(forward, 0)?;
            (board.is_empty_at(skipped) && board.is_empty_at(to)).then_some(PawnStep::Double)
        } else {
            None
        }
    } else if drow == forward && dcol.abs() == 1 {
        match board.piece_at(to) {
            Some(victim) if victim.color != pawn.color => Some(PawnStep::Capture),
            Some(_) => None,
            None => {
                let beside = Square::at(from.row(), to.col());
                en_passant_victim(board, pawn.color, beside).then_some(PawnStep::EnPassant(beside))
            }
        }
    } else {
        None
    }
}

/// Tests if `sq` holds an enemy pawn that advanced two squares on the
/// immediately preceding half-move.
fn en_passant_victim(board: &Board, us: Color, sq: Square) -> bool {
    let Some(victim) = board.piece_at(sq) else {
        return false;
    };
    victim.is(!us, Role::Pawn)
        && matches!(
            (victim.last_double_step, board.turn_counter().checked_sub(1)),
            (Some(stamp), Some(previous)) if stamp == previous
        )
}

fn knight_reaches(board: &Board, knight: Piece, from: Square, to: Square) -> bool {
    let (drow, dcol) = from.delta(to);
    is_knight_delta(drow, dcol) && !is_friendly(board, knight.color, to)
}

fn king_reaches(board: &Board, king: Piece, from: Square, to: Square) -> bool {
    from.distance(to) == 1 && !is_friendly(board, king.color, to)
}

/// Walks the ray from `from` toward `to` one square at a time.
fn slider_reaches(board: &Board, slider: Piece, from: Square, to: Square) -> bool {
    let (drow, dcol) = from.delta(to);
    if !aligned(slider.role, drow, dcol) {
        return false;
    }
    let step = (drow.signum(), dcol.signum());
    let mut sq = from;
    loop {
        sq = match sq.offset(step.0, step.1) {
            Some(next) => next,
            None => return false,
        };
        match board.piece_at(sq) {
            Some(occupant) => return occupant.color != slider.color && sq == to,
            None if sq == to => return true,
            None => (),
        }
    }
}

/// Tests if every square strictly between two aligned squares is empty.
fn path_is_clear(board: &Board, from: Square, to: Square) -> bool {
    let (drow, dcol) = from.delta(to);
    let step = (drow.signum(), dcol.signum());
    let mut sq = from;
    loop {
        sq = match sq.offset(step.0, step.1) {
            Some(next) => next,
            None => return false,
        };
        if sq == to {
            return true;
        }
        if !board.is_empty_at(sq) {
            return false;
        }
    }
}

const fn aligned(role: Role, drow: i8, dcol: i8) -> bool {
    let diagonal = drow != 0 && drow.abs() == dcol.abs();
    let orthogonal = (drow == 0) != (dcol == 0);
    match role {
        Role::Bishop => diagonal,
        Role::Rook => orthogonal,
        Role::Queen => diagonal || orthogonal,
        _ => false,
    }
}

const fn is_knight_delta(drow: i8, dcol: i8) -> bool {
    matches!(
        (drow.unsigned_abs(), dcol.unsigned_abs()),
        (1, 2) | (2, 1)
    )
}

fn is_friendly(board: &Board, color: Color, sq: Square) -> bool {
    board.color_at(sq) == Some(color)
}
