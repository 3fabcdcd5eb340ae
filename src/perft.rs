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

//! Count legal move paths.
//!
//! # Examples
//!
//! ```
//! use chessrules::{perft, Board};
//!
//! let board = Board::new();
//! assert_eq!(perft(&board, 1), 20);
//! assert_eq!(perft(&board, 2), 400);
//! ```

use crate::{board::Board, role::Role};

/// Counts legal move paths of a given length, starting with the side to
/// move.
///
/// Each promotion role counts as a separate move. Paths with mate or
/// stalemate are not counted unless it occurs in the final position.
/// Useful for comparing, testing and debugging the rules against known
/// reference numbers.
pub fn perft(board: &Board, depth: u32) -> u64 {
    if depth < 1 {
        return 1;
    }

    let turn = board.turn();
    let moves = board.legal_moves(turn);

    let mut nodes = 0;
    for (from, to) in moves {
        let promotes = board.role_at(from) == Some(Role::Pawn)
            && to.row() == turn.promotion_rank();

        if depth == 1 {
            nodes += if promotes { Role::PROMOTIONS.len() as u64 } else { 1 };
            continue;
        }

        let mut child = board.clone();
        child.commit_move(from, to);
        if promotes {
            for role in Role::PROMOTIONS {
                let mut promoted = child.clone();
                if promoted.promote(to, role).is_ok() {
                    nodes += perft(&promoted, depth - 1);
                }
            }
        } else {
            nodes += perft(&child, depth - 1);
        }
    }
    nodes
}
