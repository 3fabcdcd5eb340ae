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

use core::ops;

use crate::{color::Color, square::Square};

/// Column of both kings in the initial position.
pub(crate) const KING_HOME_COL: u8 = 4;

/// `KingSide` (O-O) or `QueenSide` (O-O-O).
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    #[inline]
    pub const fn is_queen_side(self) -> bool {
        matches!(self, CastlingSide::QueenSide)
    }

    #[inline]
    pub const fn is_king_side(self) -> bool {
        matches!(self, CastlingSide::KingSide)
    }

    /// Recognizes a castling attempt from the king's origin and destination:
    /// two columns along the mover's back rank, starting from the king's
    /// home square.
    pub const fn from_king_move(color: Color, from: Square, to: Square) -> Option<CastlingSide> {
        let backrank = color.backrank();
        if from.row() != backrank || to.row() != backrank || from.col() != KING_HOME_COL {
            return None;
        }
        match to.col() {
            6 => Some(CastlingSide::KingSide),
            2 => Some(CastlingSide::QueenSide),
            _ => None,
        }
    }

    /// Column the king lands on.
    pub const fn king_to_col(self) -> u8 {
        match self {
            CastlingSide::KingSide => 6,
            CastlingSide::QueenSide => 2,
        }
    }

    /// Column the rook lands on.
    pub const fn rook_to_col(self) -> u8 {
        match self {
            CastlingSide::KingSide => 5,
            CastlingSide::QueenSide => 3,
        }
    }

    /// Corner column the rook starts from.
    pub const fn rook_from_col(self) -> u8 {
        match self {
            CastlingSide::KingSide => 7,
            CastlingSide::QueenSide => 0,
        }
    }

    pub const fn king_from(color: Color) -> Square {
        Square::at(color.backrank(), KING_HOME_COL)
    }

    pub const fn king_to(self, color: Color) -> Square {
        Square::at(color.backrank(), self.king_to_col())
    }

    pub const fn rook_from(self, color: Color) -> Square {
        Square::at(color.backrank(), self.rook_from_col())
    }

    pub const fn rook_to(self, color: Color) -> Square {
        Square::at(color.backrank(), self.rook_to_col())
    }

    /// Squares strictly between king and rook. All of them must be empty.
    pub fn between(self, color: Color) -> impl Iterator<Item = Square> {
        let (lo, hi) = match self {
            CastlingSide::KingSide => (KING_HOME_COL + 1, self.rook_from_col()),
            CastlingSide::QueenSide => (self.rook_from_col() + 1, KING_HOME_COL),
        };
        let row = color.backrank();
        (lo..hi).map(move |col| Square::at(row, col))
    }

    /// Squares the king stands on, passes through and lands on. None of
    /// them may be attacked.
    pub fn king_path(self, color: Color) -> impl Iterator<Item = Square> {
        let (lo, hi) = match self {
            CastlingSide::KingSide => (KING_HOME_COL, self.king_to_col()),
            CastlingSide::QueenSide => (self.king_to_col(), KING_HOME_COL),
        };
        let row = color.backrank();
        (lo..=hi).map(move |col| Square::at(row, col))
    }

    #[must_use]
    #[inline]
    pub const fn other(self) -> CastlingSide {
        match self {
            CastlingSide::KingSide => CastlingSide::QueenSide,
            CastlingSide::QueenSide => CastlingSide::KingSide,
        }
    }

    /// `KingSide` and `QueenSide`, in this order.
    pub const ALL: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];
}

impl ops::Not for CastlingSide {
    type Output = CastlingSide;

    #[inline]
    fn not(self) -> CastlingSide {
        self.other()
    }
}

/// Container with values for each [`CastlingSide`].
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug, Hash)]
pub struct ByCastlingSide<T> {
    pub king_side: T,
    pub queen_side: T,
}

impl<T> ByCastlingSide<T> {
    #[inline]
    pub fn new_with<F>(mut init: F) -> ByCastlingSide<T>
    where
        F: FnMut(CastlingSide) -> T,
    {
        ByCastlingSide {
            king_side: init(CastlingSide::KingSide),
            queen_side: init(CastlingSide::QueenSide),
        }
    }

    #[inline]
    pub const fn get(&self, side: CastlingSide) -> &T {
        match side {
            CastlingSide::KingSide => &self.king_side,
            CastlingSide::QueenSide => &self.queen_side,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, side: CastlingSide) -> &mut T {
        match side {
            CastlingSide::KingSide => &mut self.king_side,
            CastlingSide::QueenSide => &mut self.queen_side,
        }
    }
}

impl<T> ops::Index<CastlingSide> for ByCastlingSide<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: CastlingSide) -> &T {
        self.get(index)
    }
}

impl<T> ops::IndexMut<CastlingSide> for ByCastlingSide<T> {
    #[inline]
    fn index_mut(&mut self, index: CastlingSide) -> &mut T {
        self.get_mut(index)
    }
}
