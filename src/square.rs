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

use core::{error::Error, fmt, num::TryFromIntError, str::FromStr};

use crate::util::out_of_range_error;

/// A square of the 8x8 board.
///
/// Rows are ranks counted from White's side (row 0 is rank 1) and columns
/// are files (column 0 is the a-file). A `Square` is always on the board, so
/// coordinates outside `0..8` are rejected when constructing one.
///
/// # Examples
///
/// ```
/// use chessrules::Square;
///
/// let sq = Square::new(3, 4).expect("on the board");
/// assert_eq!(sq, Square::E4);
/// assert_eq!(sq.to_string(), "e4");
///
/// assert_eq!(Square::new(8, 0), None);
/// assert!(Square::try_from((-1, 3)).is_err());
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Square(u8);

impl Square {
    /// Gets the square at `row` and `col`, or `None` if either is off the
    /// board.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Square> {
        if row < 8 && col < 8 {
            Some(Square(row * 8 + col))
        } else {
            None
        }
    }

    #[inline]
    pub(crate) const fn at(row: u8, col: u8) -> Square {
        debug_assert!(row < 8 && col < 8);
        Square(row * 8 + col)
    }

    /// Gets the square with index `index` (`a1 = 0`, `b1 = 1`, ..., `h8 = 63`).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Square> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.0 >> 3
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.0 & 7
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Moves the square by a row and column delta, or `None` when that
    /// leaves the board.
    ///
    /// # Examples
    ///
    /// ```
    /// use chessrules::Square;
    ///
    /// assert_eq!(Square::E2.offset(2, 0), Some(Square::E4));
    /// assert_eq!(Square::H1.offset(0, 1), None);
    /// ```
    #[inline]
    pub const fn offset(self, drow: i8, dcol: i8) -> Option<Square> {
        let row = self.row() as i16 + drow as i16;
        let col = self.col() as i16 + dcol as i16;
        if 0 <= row && row < 8 && 0 <= col && col < 8 {
            Some(Square::at(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Signed row and column deltas from `self` to `other`.
    #[inline]
    pub const fn delta(self, other: Square) -> (i8, i8) {
        (
            other.row() as i8 - self.row() as i8,
            other.col() as i8 - self.col() as i8,
        )
    }

    /// Chebyshev distance: the number of king steps from `self` to `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chessrules::Square;
    ///
    /// assert_eq!(Square::D2.distance(Square::G3), 3);
    /// ```
    pub const fn distance(self, other: Square) -> u8 {
        let (drow, dcol) = self.delta(other);
        let (drow, dcol) = (drow.unsigned_abs(), dcol.unsigned_abs());
        if drow > dcol {
            drow
        } else {
            dcol
        }
    }

    /// Gets the file letter, `a` through `h`.
    pub const fn file_char(self) -> char {
        (b'a' + self.col()) as char
    }

    /// Gets the rank digit, `1` through `8`.
    pub const fn rank_char(self) -> char {
        (b'1' + self.row()) as char
    }

    /// Parses a square name like `e4`.
    ///
    /// # Errors
    ///
    /// Errors with [`ParseSquareError`] if `s` is not a file letter followed
    /// by a rank digit.
    pub fn from_ascii(s: &[u8]) -> Result<Square, ParseSquareError> {
        match *s {
            [file @ b'a'..=b'h', rank @ b'1'..=b'8'] => Ok(Square::at(rank - b'1', file - b'a')),
            _ => Err(ParseSquareError),
        }
    }

    /// All 64 squares, ordered by row and then by column.
    pub fn all() -> impl DoubleEndedIterator<Item = Square> + ExactSizeIterator {
        (0..64).map(Square)
    }

    pub const A1: Square = Square(0);
    pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A2: Square = Square(8);
    pub const B2: Square = Square(9);
    pub const C2: Square = Square(10);
    pub const D2: Square = Square(11);
    pub const E2: Square = Square(12);
    pub const F2: Square = Square(13);
    pub const G2: Square = Square(14);
    pub const H2: Square = Square(15);
    pub const A3: Square = Square(16);
    pub const B3: Square = Square(17);
    pub const C3: Square = Square(18);
    pub const D3: Square = Square(19);
    pub const E3: Square = Square(20);
    pub const F3: Square = Square(21);
    pub const G3: Square = Square(22);
    pub const H3: Square = Square(23);
    pub const A4: Square = Square(24);
    pub const B4: Square = Square(25);
    pub const C4: Square = Square(26);
    pub const D4: Square = Square(27);
    pub const E4: Square = Square(28);
    pub const F4: Square = Square(29);
    pub const G4: Square = Square(30);
    pub const H4: Square = Square(31);
    pub const A5: Square = Square(32);
    pub const B5: Square = Square(33);
    pub const C5: Square = Square(34);
    pub const D5: Square = Square(35);
    pub const E5: Square = Square(36);
    pub const F5: Square = Square(37);
    pub const G5: Square = Square(38);
    pub const H5: Square = Square(39);
    pub const A6: Square = Square(40);
    pub const B6: Square = Square(41);
    pub const C6: Square = Square(42);
    pub const D6: Square = Square(43);
    pub const E6: Square = Square(44);
    pub const F6: Square = Square(45);
    pub const G6: Square = Square(46);
    pub const H6: Square = Square(47);
    pub const A7: Square = Square(48);
    pub const B7: Square = Square(49);
    pub const C7: Square = Square(50);
    pub const D7: Square = Square(51);
    pub const E7: Square = Square(52);
    pub const F7: Square = Square(53);
    pub const G7: Square = Square(54);
    pub const H7: Square = Square(55);
    pub const A8: Square = Square(56);
    pub const B8: Square = Square(57);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            self.file_char().to_ascii_uppercase(),
            self.rank_char()
        )
    }
}

/// Error when parsing an invalid square name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid square name")
    }
}

impl Error for ParseSquareError {}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        Square::from_ascii(s.as_bytes())
    }
}

macro_rules! try_square_from_int_pair_impl {
    ($($t:ty)+) => {
        $(impl TryFrom<($t, $t)> for Square {
            type Error = TryFromIntError;

            /// Converts a `(row, col)` pair, rejecting coordinates off the
            /// board.
            #[inline]
            fn try_from((row, col): ($t, $t)) -> Result<Square, TryFromIntError> {
                let row = u8::try_from(row)?;
                let col = u8::try_from(col)?;
                Square::new(row, col).ok_or_else(out_of_range_error)
            }
        })+
    }
}

try_square_from_int_pair_impl! { u8 i8 u16 i16 u32 i32 u64 i64 usize isize }

impl From<Square> for (u8, u8) {
    #[inline]
    fn from(sq: Square) -> (u8, u8) {
        (sq.row(), sq.col())
    }
}

#[cfg(feature = "arbitrary")]
impl arbitrary::Arbitrary<'_> for Square {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Square> {
        u.int_in_range::<u8>(0..=63).map(Square)
    }

    #[inline]
    fn size_hint(_depth: usize) -> (usize, Option<usize>) {
        (1, Some(1))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Square {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let name = [self.file_char() as u8, self.rank_char() as u8];
        serializer.serialize_str(core::str::from_utf8(&name).map_err(serde::ser::Error::custom)?)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Square {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SquareVisitor;

        impl serde::de::Visitor<'_> for SquareVisitor {
            type Value = Square;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("square name")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(SquareVisitor)
    }
}
