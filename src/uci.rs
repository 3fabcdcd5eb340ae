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

//! Parse and write moves in coordinate notation, as used by the Universal
//! Chess Interface.
//!
//! # Examples
//!
//! Parsing moves, with or without separating spaces:
//!
//! ```
//! use chessrules::{uci::Uci, Role, Square};
//!
//! let uci: Uci = "g1f3".parse()?;
//! assert_eq!(uci, Uci { from: Square::G1, to: Square::F3, promotion: None });
//!
//! let uci: Uci = "e7 e8 N".parse()?;
//! assert_eq!(uci.promotion, Some(Role::Knight));
//! assert_eq!(uci.to_string(), "e7e8n");
//! # Ok::<_, chessrules::uci::ParseUciError>(())
//! ```
//!
//! Playing them on a board:
//!
//! ```
//! use chessrules::{uci::Uci, Board, Color, Square};
//!
//! let mut board = Board::new();
//! let uci: Uci = "e2 e4".parse()?;
//! uci.play(&mut board, Color::White)?;
//! assert_eq!(board.piece_at(Square::E4).map(|p| p.role), Some(chessrules::Role::Pawn));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use core::{error::Error, fmt, str::FromStr};

use crate::{
    board::Board,
    color::Color,
    legality::{Effects, PlayError},
    role::Role,
    square::Square,
};

/// Error when parsing an invalid move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseUciError;

impl fmt::Display for ParseUciError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid uci")
    }
}

impl Error for ParseUciError {}

/// A move given by its origin, destination and optional promotion.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Uci {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Role>,
}

impl Uci {
    /// Parses a move from two square names and an optional promotion
    /// letter (`n`, `b`, `r` or `q`, in either case). Spaces between the
    /// parts are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ParseUciError`] if `uci` is not syntactically valid.
    pub fn from_ascii(uci: &[u8]) -> Result<Uci, ParseUciError> {
        let mut buf = [0; 5];
        let mut len = 0;
        for &ch in uci.iter().filter(|ch| !ch.is_ascii_whitespace()) {
            *buf.get_mut(len).ok_or(ParseUciError)? = ch;
            len += 1;
        }
        if len < 4 {
            return Err(ParseUciError);
        }

        let from = Square::from_ascii(&buf[0..2]).map_err(|_| ParseUciError)?;
        let to = Square::from_ascii(&buf[2..4]).map_err(|_| ParseUciError)?;
        let promotion = if len == 5 {
            Some(
                Role::from_char(char::from(buf[4]))
                    .filter(|role| role.is_promotion_target())
                    .ok_or(ParseUciError)?,
            )
        } else {
            None
        };

        Ok(Uci {
            from,
            to,
            promotion,
        })
    }

    /// Plays the move on `board` for `side`. A missing promotion selects a
    /// queen when the move promotes.
    ///
    /// # Errors
    ///
    /// Errors with [`PlayError`] and leaves the board unchanged if the move
    /// is illegal.
    pub fn play(&self, board: &mut Board, side: Color) -> Result<Effects, PlayError> {
        board.play(self.from, self.to, side, self.promotion)
    }

    fn write_ascii(&self, buf: &mut [u8; 5]) -> usize {
        buf[0] = self.from.file_char() as u8;
        buf[1] = self.from.rank_char() as u8;
        buf[2] = self.to.file_char() as u8;
        buf[3] = self.to.rank_char() as u8;
        match self.promotion {
            Some(role) => {
                buf[4] = role.char() as u8;
                5
            }
            None => 4,
        }
    }
}

impl FromStr for Uci {
    type Err = ParseUciError;

    fn from_str(uci: &str) -> Result<Uci, ParseUciError> {
        Uci::from_ascii(uci.as_bytes())
    }
}

impl fmt::Display for Uci {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0; 5];
        let len = self.write_ascii(&mut buf);
        f.write_str(core::str::from_utf8(&buf[..len]).map_err(|_| fmt::Error)?)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Uci {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut buf = [0; 5];
        let len = self.write_ascii(&mut buf);
        serializer
            .serialize_str(core::str::from_utf8(&buf[..len]).map_err(serde::ser::Error::custom)?)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Uci {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct UciVisitor;

        impl serde::de::Visitor<'_> for UciVisitor {
            type Value = Uci;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("move in uci notation")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(UciVisitor)
    }
}

#[cfg(test)]
mod tests {
    use std::string::ToString;

    use super::*;

    #[test]
    fn test_parse() {
        let expected = Uci {
            from: Square::E7,
            to: Square::E8,
            promotion: Some(Role::Queen),
        };
        for text in ["e7e8q", "e7 e8 q", "e7e8Q", " e7 e8Q "] {
            assert_eq!(text.parse(), Ok(expected), "{text}");
        }
        assert_eq!(
            "a1 h8".parse(),
            Ok(Uci {
                from: Square::A1,
                to: Square::H8,
                promotion: None
            })
        );
    }

    #[test]
    fn test_invalid() {
        for text in ["", "e2", "e2e", "e2e9", "i2e4", "e7e8k", "e7e8p", "e7e8qq", "e7e8x"] {
            assert_eq!(text.parse::<Uci>(), Err(ParseUciError), "{text}");
        }
    }

    #[test]
    fn test_write_ascii() {
        let uci = Uci {
            from: Square::B2,
            to: Square::A1,
            promotion: Some(Role::Rook),
        };
        let mut buf = [0; 5];
        let len = uci.write_ascii(&mut buf);
        assert_eq!(&buf[..len], b"b2a1r");
        assert_eq!(uci.to_string(), "b2a1r");
    }

    #[test]
    fn test_play() {
        let mut board = Board::new();
        let uci: Uci = "e2e5".parse().expect("valid uci");
        assert_eq!(
            uci.play(&mut board, Color::White),
            Err(PlayError::IllegalMove {
                from: Square::E2,
                to: Square::E5
            })
        );
        assert_eq!(board, Board::new());
    }
}
