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

//! King safety: attacked squares and check detection.
//!
//! Everything here is recomputed from the grid by scanning the opposing
//! pieces. There are no cached attack maps.

use crate::{board::Board, color::Color, movement, square::Square};

impl Board {
    /// Tests if any piece not belonging to `side` attacks `sq`.
    ///
    /// Whatever stands on `sq` is disregarded, so this answers both "may my
    /// king step here" for empty squares and "is this piece attacked" for
    /// occupied ones.
    ///
    /// # Examples
    ///
    /// ```
    /// use chessrules::{Board, Color, Square};
    ///
    /// let board = Board::new();
    /// assert!(board.is_square_attacked(Color::White, Square::F6));
    /// assert!(!board.is_square_attacked(Color::White, Square::E5));
    /// ```
    pub fn is_square_attacked(&self, side: Color, sq: Square) -> bool {
        self.attackers(!side, sq).next().is_some()
    }

    /// Iterates over the squares of `attacker` pieces that attack `sq`.
    pub fn attackers(&self, attacker: Color, sq: Square) -> impl Iterator<Item = Square> + '_ {
        self.squares_of(attacker)
            .filter(move |&from| movement::attacks(self, from, sq))
    }

    /// Tests if the king of `side` is attacked.
    ///
    /// A side without a king is never in check. The stored
    /// [`Board::in_check()`] flag is not updated, see
    /// [`is_check()`](crate::is_check) for that.
    pub fn is_check(&self, side: Color) -> bool {
        self.king_of(side)
            .is_some_and(|king| self.is_square_attacked(side, king))
    }

    /// Iterates over the squares of the pieces giving check to `side`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chessrules::{fen::Fen, Color, Square};
    ///
    /// let board = "4k3/8/8/8/1b6/8/8/4K2r w - - 0 1"
    ///     .parse::<Fen>()?
    ///     .into_board()?;
    ///
    /// assert!(board.checkers(Color::White).eq([Square::H1, Square::B4]));
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    pub fn checkers(&self, side: Color) -> impl Iterator<Item = Square> + '_ {
        self.king_of(side)
            .into_iter()
            .flat_map(move |king| self.attackers(!side, king))
    }

    /// Recomputes the flag telling whether the side to move is in check.
    pub(crate) fn refresh_check(&mut self) -> bool {
        self.in_check = self.is_check(self.turn());
        self.in_check
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kings() -> Board {
        let mut board = Board::empty();
        board.set_piece_at(Square::E1, Color::White.king());
        board.set_piece_at(Square::E8, Color::Black.king());
        board
    }

    #[test]
    fn test_initial_position_is_quiet() {
        let board = Board::new();
        assert!(!board.is_check(Color::White));
        assert!(!board.is_check(Color::Black));
        assert!(board.is_square_attacked(Color::Black, Square::E3));
        assert!(!board.is_square_attacked(Color::Black, Square::E4));
    }

    #[test]
    fn test_slider_check_and_block() {
        let mut board = kings();
        board.set_piece_at(Square::E5, Color::Black.rook());
        assert!(board.is_check(Color::White));
        assert!(!board.is_check(Color::Black));
        assert!(board.checkers(Color::White).eq([Square::E5]));
        // Querying does not touch the stored flag.
        assert!(!board.in_check());
        assert!(board.refresh_check());
        assert!(board.in_check());

        board.set_piece_at(Square::E3, Color::White.knight());
        assert!(!board.is_check(Color::White));
    }

    #[test]
    fn test_pawn_gives_check_only_diagonally() {
        let mut board = kings();
        board.set_piece_at(Square::E2, Color::Black.pawn().moved());
        assert!(!board.is_check(Color::White));
        board.remove_piece_at(Square::E2);
        board.set_piece_at(Square::D2, Color::Black.pawn().moved());
        assert!(board.is_check(Color::White));
        // A pawn never attacks backward.
        board.remove_piece_at(Square::D2);
        board.set_piece_at(Square::D4, Color::Black.pawn().moved());
        assert!(board.is_square_attacked(Color::White, Square::E3));
        assert!(!board.is_square_attacked(Color::White, Square::E5));
    }

    #[test]
    fn test_attacked_square_sees_through_its_occupant() {
        let mut board = kings();
        board.set_piece_at(Square::A4, Color::Black.queen());
        board.set_piece_at(Square::D4, Color::White.bishop());
        assert!(board.is_square_attacked(Color::White, Square::D4));
        assert!(!board.is_square_attacked(Color::White, Square::E4));
        assert!(board.is_square_attacked(Color::White, Square::A1));
    }

    #[test]
    fn test_missing_king_is_never_in_check() {
        let mut board = Board::empty();
        board.set_piece_at(Square::A1, Color::Black.queen());
        assert!(!board.is_check(Color::White));
        assert_eq!(board.checkers(Color::White).count(), 0);
    }

    #[test]
    fn test_refresh_check() {
        let mut board = kings();
        board.set_piece_at(Square::H4, Color::Black.bishop());
        assert!(board.refresh_check());
        assert!(board.in_check());
        board.set_piece_at(Square::F2, Color::White.pawn());
        assert!(!board.refresh_check());
    }
}
