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

use core::fmt;

use crate::{color::Color, role::Role};

/// A piece with [`Color`], [`Role`] and the state the rules need to remember
/// about it.
///
/// Pieces are owned by the board square they stand on. A piece is dropped
/// when captured and replaced wholesale on promotion.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Piece {
    pub color: Color,
    pub role: Role,
    /// Set the first time the piece is moved, including as the king or rook
    /// of a castling move.
    pub has_moved: bool,
    /// For pawns: the turn counter value at which the pawn last advanced two
    /// squares.
    pub last_double_step: Option<u32>,
}

impl Piece {
    /// A fresh, unmoved piece.
    #[inline]
    pub const fn new(color: Color, role: Role) -> Piece {
        Piece {
            color,
            role,
            has_moved: false,
            last_double_step: None,
        }
    }

    /// The same piece, marked as moved.
    #[must_use]
    #[inline]
    pub const fn moved(self) -> Piece {
        Piece {
            has_moved: true,
            ..self
        }
    }

    #[inline]
    pub const fn is(self, color: Color, role: Role) -> bool {
        self.color as u8 == color as u8 && self.role as u8 == role as u8
    }

    /// FEN letter: uppercase for White, lowercase for Black.
    pub const fn char(self) -> char {
        match self.color {
            Color::White => self.role.upper_char(),
            Color::Black => self.role.char(),
        }
    }

    /// Gets a fresh piece from its FEN letter.
    ///
    /// # Examples
    ///
    /// ```
    /// use chessrules::{Color, Piece};
    ///
    /// assert_eq!(Piece::from_char('Q'), Some(Color::White.queen()));
    /// assert_eq!(Piece::from_char('n'), Some(Color::Black.knight()));
    /// assert_eq!(Piece::from_char('x'), None);
    /// ```
    pub const fn from_char(ch: char) -> Option<Piece> {
        let Some(role) = Role::from_char(ch) else {
            return None;
        };
        Some(role.of(Color::from_white(ch.is_ascii_uppercase())))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color.char(), self.role.upper_char())
    }
}
