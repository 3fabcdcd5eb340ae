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

//! The 8x8 board with the game state the rules depend on.

use core::{fmt, fmt::Write as _};

use crate::{
    color::Color,
    role::Role,
    square::Square,
    types::Piece,
};

/// [`Piece`] positions on the board, plus the counters the rules need.
///
/// Besides the grid, a board tracks the side to move, the number of
/// committed half-moves (which decides en passant eligibility) and whether
/// the side to move is currently in check.
///
/// # Examples
///
/// ```
/// use chessrules::{Board, Color, Square};
///
/// let board = Board::new();
/// assert_eq!(board.piece_at(Square::E1), Some(Color::White.king()));
/// assert_eq!(board.piece_at(Square::E4), None);
/// assert_eq!(board.turn(), Color::White);
/// assert_eq!(board.turn_counter(), 0);
///
/// assert_eq!(board.to_string(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
/// ```
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Board {
    grid: [[Option<Piece>; 8]; 8],
    turn: Color,
    turn_counter: u32,
    pub(crate) in_check: bool,
}

const BACKRANK: [Role; 8] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

impl Board {
    /// The standard starting position.
    pub fn new() -> Board {
        let mut board = Board::empty();
        for color in Color::ALL {
            for (col, role) in (0..8).zip(BACKRANK) {
                board.grid[usize::from(color.backrank())][col] = Some(role.of(color));
            }
            board.grid[usize::from(color.pawn_rank())] = [Some(color.pawn()); 8];
        }
        board
    }

    /// A board without any pieces, White to move.
    pub const fn empty() -> Board {
        Board {
            grid: [[None; 8]; 8],
            turn: Color::White,
            turn_counter: 0,
            in_check: false,
        }
    }

    #[inline]
    pub const fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.grid[sq.row() as usize][sq.col() as usize]
    }

    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|piece| piece.color)
    }

    #[inline]
    pub fn role_at(&self, sq: Square) -> Option<Role> {
        self.piece_at(sq).map(|piece| piece.role)
    }

    #[inline]
    pub const fn is_empty_at(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    #[inline]
    pub(crate) fn cell_mut(&mut self, sq: Square) -> &mut Option<Piece> {
        &mut self.grid[usize::from(sq.row())][usize::from(sq.col())]
    }

    /// Places a piece, returning the piece it replaces.
    pub fn set_piece_at(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        self.cell_mut(sq).replace(piece)
    }

    /// Removes and returns the piece on `sq`.
    pub fn remove_piece_at(&mut self, sq: Square) -> Option<Piece> {
        self.cell_mut(sq).take()
    }

    /// The side to move.
    #[inline]
    pub const fn turn(&self) -> Color {
        self.turn
    }

    pub fn set_turn(&mut self, turn: Color) {
        self.turn = turn;
    }

    /// Number of half-moves committed on this board.
    #[inline]
    pub const fn turn_counter(&self) -> u32 {
        self.turn_counter
    }

    pub fn set_turn_counter(&mut self, turn_counter: u32) {
        self.turn_counter = turn_counter;
    }

    /// Advances to the next half-move: bumps the counter and hands the move
    /// to the other side.
    pub(crate) fn advance_turn(&mut self) {
        self.turn_counter = self.turn_counter.wrapping_add(1);
        self.turn = !self.turn;
    }

    /// Whether the side to move was in check when the flag was last
    /// recomputed: after every committed move, on setup, and on
    /// [`crate::is_check`] calls for the side to move.
    #[inline]
    pub const fn in_check(&self) -> bool {
        self.in_check
    }

    /// Iterates over all pieces, ordered by row and then by column.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    /// Iterates over the squares holding pieces of `color`.
    pub fn squares_of(&self, color: Color) -> impl Iterator<Item = Square> + '_ {
        self.pieces()
            .filter(move |(_, piece)| piece.color == color)
            .map(|(sq, _)| sq)
    }

    /// Number of pieces on the board.
    pub fn occupied_count(&self) -> usize {
        self.pieces().count()
    }

    /// Finds the king of `color`.
    pub fn king_of(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| piece.is(color, Role::King))
            .map(|(sq, _)| sq)
    }

    /// Writes the piece placement field of a FEN.
    pub fn write_board_fen<W: fmt::Write>(&self, f: &mut W) -> fmt::Result {
        for row in (0..8).rev() {
            let mut empty = 0;
            for col in 0..8 {
                match self.piece_at(Square::at(row, col)) {
                    Some(piece) => {
                        if empty > 0 {
                            f.write_char(char::from(b'0' + empty))?;
                            empty = 0;
                        }
                        f.write_char(piece.char())?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                f.write_char(char::from(b'0' + empty))?;
            }
            if row > 0 {
                f.write_char('/')?;
            }
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_board_fen(f)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..8).rev() {
            for col in 0..8 {
                f.write_char(
                    self.piece_at(Square::at(row, col))
                        .map_or('.', |piece| piece.char()),
                )?;
                f.write_char(if col < 7 { ' ' } else { '\n' })?;
            }
        }
        writeln!(
            f,
            "turn: {}, half-moves: {}, in check: {}",
            self.turn, self.turn_counter, self.in_check
        )
    }
}

#[cfg(test)]
mod tests {
    use std::string::ToString;

    use super::*;

    #[test]
    fn test_initial_position() {
        let board = Board::new();
        assert_eq!(board.occupied_count(), 32);
        assert_eq!(board.king_of(Color::White), Some(Square::E1));
        assert_eq!(board.king_of(Color::Black), Some(Square::E8));
        assert_eq!(board.piece_at(Square::D1), Some(Color::White.queen()));
        assert_eq!(board.piece_at(Square::D8), Some(Color::Black.queen()));
        assert_eq!(board.role_at(Square::G8), Some(Role::Knight));
        assert_eq!(board.squares_of(Color::Black).count(), 16);
        assert!(board.pieces().all(|(_, piece)| !piece.has_moved));
        assert!(!board.in_check());
    }

    #[test]
    fn test_set_and_remove() {
        let mut board = Board::empty();
        assert_eq!(board.set_piece_at(Square::C3, Color::Black.bishop()), None);
        assert_eq!(
            board.set_piece_at(Square::C3, Color::White.knight()),
            Some(Color::Black.bishop())
        );
        assert_eq!(board.color_at(Square::C3), Some(Color::White));
        assert_eq!(board.remove_piece_at(Square::C3), Some(Color::White.knight()));
        assert!(board.is_empty_at(Square::C3));
        assert_eq!(board.king_of(Color::White), None);
    }

    #[test]
    fn test_advance_turn() {
        let mut board = Board::new();
        board.advance_turn();
        assert_eq!(board.turn(), Color::Black);
        assert_eq!(board.turn_counter(), 1);
        board.advance_turn();
        assert_eq!(board.turn(), Color::White);
        assert_eq!(board.turn_counter(), 2);
    }

    #[test]
    fn test_board_fen() {
        let mut board = Board::empty();
        board.set_piece_at(Square::E1, Color::White.king());
        board.set_piece_at(Square::E8, Color::Black.king());
        board.set_piece_at(Square::A7, Color::White.pawn());
        assert_eq!(board.to_string(), "4k3/P7/8/8/8/8/8/4K3");
    }
}
