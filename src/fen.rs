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

//! Parse and write Forsyth-Edwards-Notation.
//!
//! FEN describes a position with a few summary fields. These are mapped onto
//! the per-piece state the rules work with: castling rights decide which
//! kings and rooks count as unmoved, and the en passant square stamps the
//! pawn that just advanced two squares.
//!
//! # Examples
//!
//! ```
//! use chessrules::{fen::Fen, Board, Color, Square};
//!
//! let fen: Fen = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2".parse()?;
//! let mut board = fen.into_board()?;
//!
//! assert_eq!(board.turn(), Color::White);
//! assert_eq!(board.turn_counter(), 2);
//! assert!(board.attempt_move(Square::G1, Square::F3, Color::White));
//!
//! assert_eq!(
//!     Fen::from_board(&board).to_string(),
//!     "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2"
//! );
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use core::{error::Error, fmt, str::FromStr};

use tracing::debug;

use crate::{
    board::Board,
    castling_side::{ByCastlingSide, CastlingSide},
    color::{ByColor, Color},
    role::Role,
    square::Square,
    types::Piece,
};

/// Errors that can occur when parsing a FEN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseFenError {
    InvalidFen,
    InvalidBoard,
    InvalidTurn,
    InvalidCastling,
    InvalidEpSquare,
    InvalidHalfmoveClock,
    InvalidFullmoves,
}

impl fmt::Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParseFenError::InvalidFen => "invalid fen",
            ParseFenError::InvalidBoard => "invalid board part in fen",
            ParseFenError::InvalidTurn => "invalid turn part in fen",
            ParseFenError::InvalidCastling => "invalid castling part in fen",
            ParseFenError::InvalidEpSquare => "invalid ep square in fen",
            ParseFenError::InvalidHalfmoveClock => "invalid halfmove clock in fen",
            ParseFenError::InvalidFullmoves => "invalid fullmove part in fen",
        })
    }
}

impl Error for ParseFenError {}

/// Reasons for a FEN to not describe a playable position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PositionError {
    /// A side has no king.
    MissingKing(Color),
    /// A side has more than one king.
    TooManyKings(Color),
    /// There are pawns on the first or last rank.
    PawnsOnBackrank,
    /// A castling right without the king and rook on their home squares.
    InvalidCastlingRights,
    /// The en passant square does not lie behind a pawn that could have just
    /// advanced two squares.
    InvalidEpSquare,
    /// The side not to move is in check.
    OppositeCheck,
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::MissingKing(color) => write!(f, "{color} king missing"),
            PositionError::TooManyKings(color) => write!(f, "too many {color} kings"),
            PositionError::PawnsOnBackrank => f.write_str("pawns on backrank"),
            PositionError::InvalidCastlingRights => f.write_str("invalid castling rights"),
            PositionError::InvalidEpSquare => f.write_str("invalid en passant square"),
            PositionError::OppositeCheck => f.write_str("opposite side in check"),
        }
    }
}

impl Error for PositionError {}

/// A parsed FEN.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Fen {
    /// Piece placement. Only the grid is meaningful until the FEN is turned
    /// into a board with [`Fen::into_board()`].
    pub placement: Board,
    pub turn: Color,
    pub castling_rights: ByColor<ByCastlingSide<bool>>,
    pub ep_square: Option<Square>,
    pub halfmoves: u32,
    pub fullmoves: u32,
}

impl Default for Fen {
    fn default() -> Fen {
        Fen::from_board(&Board::new())
    }
}

impl Fen {
    /// An empty board with White to move.
    pub fn empty() -> Fen {
        Fen {
            placement: Board::empty(),
            turn: Color::White,
            castling_rights: ByColor::default(),
            ep_square: None,
            halfmoves: 0,
            fullmoves: 1,
        }
    }

    /// Describes a board.
    ///
    /// Castling rights are derived from unmoved kings and rooks on their
    /// home squares, the en passant square from a pawn that advanced two
    /// squares on the previous half-move. The board does not count
    /// half-moves since the last capture or pawn move, so the half-move
    /// clock is always 0.
    pub fn from_board(board: &Board) -> Fen {
        let turn = board.turn();
        let castling_rights = ByColor::new_with(|color| {
            let king_ready = board
                .piece_at(CastlingSide::king_from(color))
                .is_some_and(|king| king.is(color, Role::King) && !king.has_moved);
            ByCastlingSide::new_with(|side| {
                king_ready
                    && board
                        .piece_at(side.rook_from(color))
                        .is_some_and(|rook| rook.is(color, Role::Rook) && !rook.has_moved)
            })
        });
        let previous = board.turn_counter().checked_sub(1);
        let ep_square = board
            .pieces()
            .find(|(_, piece)| {
                piece.is(!turn, Role::Pawn)
                    && piece.last_double_step.is_some()
                    && piece.last_double_step == previous
            })
            .and_then(|(sq, _)| sq.offset(turn.pawn_direction(), 0));

        Fen {
            placement: board.clone(),
            turn,
            castling_rights,
            ep_square,
            halfmoves: 0,
            fullmoves: board.turn_counter() / 2 + 1,
        }
    }

    /// Sets up a board for play.
    ///
    /// # Errors
    ///
    /// Errors with [`PositionError`] if the position is not playable.
    pub fn into_board(self) -> Result<Board, PositionError> {
        self.setup().inspect_err(|err| debug!(%err, fen = %self, "rejected setup"))
    }

    fn setup(&self) -> Result<Board, PositionError> {
        let mut board = self.placement.clone();

        for color in Color::ALL {
            match board.pieces().filter(|(_, p)| p.is(color, Role::King)).count() {
                0 => return Err(PositionError::MissingKing(color)),
                1 => (),
                _ => return Err(PositionError::TooManyKings(color)),
            }
        }
        if board
            .pieces()
            .any(|(sq, p)| p.role == Role::Pawn && (sq.row() == 0 || sq.row() == 7))
        {
            return Err(PositionError::PawnsOnBackrank);
        }

        for sq in Square::all() {
            let Some(piece) = board.piece_at(sq) else {
                continue;
            };
            let rights = self.castling_rights.get(piece.color);
            let unmoved = match piece.role {
                Role::Pawn => sq.row() == piece.color.pawn_rank(),
                Role::King => {
                    sq == CastlingSide::king_from(piece.color)
                        && (rights.king_side || rights.queen_side)
                }
                Role::Rook => CastlingSide::ALL
                    .into_iter()
                    .any(|side| *rights.get(side) && sq == side.rook_from(piece.color)),
                Role::Knight | Role::Bishop | Role::Queen => true,
            };
            board.set_piece_at(
                sq,
                Piece {
                    has_moved: !unmoved,
                    last_double_step: None,
                    ..piece
                },
            );
        }

        for color in Color::ALL {
            for side in CastlingSide::ALL {
                if !*self.castling_rights.get(color).get(side) {
                    continue;
                }
                let unmoved = |sq: Square, role: Role| {
                    board
                        .piece_at(sq)
                        .is_some_and(|p| p.is(color, role) && !p.has_moved)
                };
                if !unmoved(CastlingSide::king_from(color), Role::King)
                    || !unmoved(side.rook_from(color), Role::Rook)
                {
                    return Err(PositionError::InvalidCastlingRights);
                }
            }
        }

        let ply = self
            .fullmoves
            .saturating_sub(1)
            .saturating_mul(2)
            .saturating_add(u32::from(self.turn.is_black()));

        // A pawn can only have just advanced if a half-move was played.
        let ply = if self.ep_square.is_some() { ply.max(1) } else { ply };
        board.set_turn_counter(ply);

        if let Some(ep_square) = self.ep_square {
            let pawn_sq = ep_square
                .offset(-self.turn.pawn_direction(), 0)
                .filter(|_| ep_square.row() == self.turn.fold_wb(5, 2))
                .filter(|_| board.is_empty_at(ep_square))
                .ok_or(PositionError::InvalidEpSquare)?;
            let pawn = board
                .piece_at(pawn_sq)
                .filter(|p| p.is(!self.turn, Role::Pawn))
                .ok_or(PositionError::InvalidEpSquare)?;
            board.set_piece_at(
                pawn_sq,
                Piece {
                    last_double_step: Some(ply - 1),
                    ..pawn
                },
            );
        }

        board.set_turn(self.turn);
        if board.is_check(!self.turn) {
            return Err(PositionError::OppositeCheck);
        }
        board.refresh_check();
        Ok(board)
    }

    /// Parses a FEN.
    ///
    /// # Errors
    ///
    /// Errors with [`ParseFenError`] if `fen` is not syntactically valid.
    pub fn from_ascii(fen: &[u8]) -> Result<Fen, ParseFenError> {
        core::str::from_utf8(fen)
            .map_err(|_| ParseFenError::InvalidFen)?
            .parse()
    }

    fn parse_placement(part: &str) -> Option<Board> {
        let mut board = Board::empty();
        let mut row: u8 = 7;
        let mut col: u8 = 0;
        for ch in part.chars() {
            if ch == '/' {
                if col != 8 || row == 0 {
                    return None;
                }
                row -= 1;
                col = 0;
            } else if let Some(empty) = ch.to_digit(10) {
                if !(1..=8).contains(&empty) {
                    return None;
                }
                col += empty as u8;
                if col > 8 {
                    return None;
                }
            } else {
                let piece = Piece::from_char(ch)?;
                board.set_piece_at(Square::new(row, col)?, piece);
                col += 1;
            }
        }
        (row == 0 && col == 8).then_some(board)
    }

    fn parse_castling(part: &str) -> Option<ByColor<ByCastlingSide<bool>>> {
        let mut rights = ByColor::<ByCastlingSide<bool>>::default();
        if part == "-" {
            return Some(rights);
        }
        for ch in part.chars() {
            let color = Color::from_white(ch.is_ascii_uppercase());
            let side = match ch.to_ascii_lowercase() {
                'k' => CastlingSide::KingSide,
                'q' => CastlingSide::QueenSide,
                _ => return None,
            };
            let right = rights.get_mut(color).get_mut(side);
            if *right {
                return None;
            }
            *right = true;
        }
        Some(rights)
    }
}

impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(fen: &str) -> Result<Fen, ParseFenError> {
        let mut parts = fen.split_ascii_whitespace();
        let mut result = Fen::empty();

        let board_part = parts.next().ok_or(ParseFenError::InvalidFen)?;
        result.placement = Fen::parse_placement(board_part).ok_or(ParseFenError::InvalidBoard)?;

        result.turn = match parts.next() {
            Some("w") | None => Color::White,
            Some("b") => Color::Black,
            Some(_) => return Err(ParseFenError::InvalidTurn),
        };

        if let Some(castling_part) = parts.next() {
            result.castling_rights =
                Fen::parse_castling(castling_part).ok_or(ParseFenError::InvalidCastling)?;
        }

        match parts.next() {
            Some("-") | None => (),
            Some(ep_part) => {
                result.ep_square =
                    Some(ep_part.parse().map_err(|_| ParseFenError::InvalidEpSquare)?);
            }
        }

        if let Some(halfmoves_part) = parts.next() {
            result.halfmoves = btoi::btou(halfmoves_part.as_bytes())
                .map_err(|_| ParseFenError::InvalidHalfmoveClock)?;
        }

        if let Some(fullmoves_part) = parts.next() {
            result.fullmoves = btoi::btou(fullmoves_part.as_bytes())
                .ok()
                .filter(|&n: &u32| n > 0)
                .ok_or(ParseFenError::InvalidFullmoves)?;
        }

        if parts.next().is_some() {
            return Err(ParseFenError::InvalidFen);
        }

        Ok(result)
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.placement.write_board_fen(f)?;
        write!(f, " {} ", self.turn.char())?;

        let mut any_rights = false;
        for color in [Color::White, Color::Black] {
            for side in CastlingSide::ALL {
                if *self.castling_rights.get(color).get(side) {
                    let ch = if side.is_king_side() { 'K' } else { 'Q' };
                    write!(f, "{}", color.fold_wb(ch, ch.to_ascii_lowercase()))?;
                    any_rights = true;
                }
            }
        }
        if !any_rights {
            f.write_str("-")?;
        }

        match self.ep_square {
            Some(sq) => write!(f, " {sq}")?,
            None => f.write_str(" -")?,
        }
        write!(f, " {} {}", self.halfmoves, self.fullmoves)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Fen {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Fen {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct FenVisitor;

        impl serde::de::Visitor<'_> for FenVisitor {
            type Value = Fen;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("fen")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(FenVisitor)
    }
}

#[cfg(test)]
mod tests {
    use std::string::ToString;

    use super::*;

    #[test]
    fn test_initial_position() {
        let fen = Fen::default();
        assert_eq!(
            fen.to_string(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
        assert_eq!(fen.to_string().parse::<Fen>(), Ok(fen.clone()));
        assert_eq!(fen.into_board(), Ok(Board::new()));
    }

    #[test]
    fn test_played_board_survives_fen() {
        let mut board = Board::new();
        assert!(board.play(Square::E2, Square::E4, Color::White, None).is_ok());
        let fen = Fen::from_board(&board);
        assert_eq!(
            fen.to_string(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
        assert_eq!(fen.into_board(), Ok(board));
    }

    #[test]
    fn test_castling_rights_map_to_unmoved_pieces() {
        let board = "r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1"
            .parse::<Fen>()
            .expect("valid fen")
            .into_board()
            .expect("legal position");
        let has_moved = |sq| board.piece_at(sq).map(|p| p.has_moved);
        assert_eq!(has_moved(Square::E1), Some(false));
        assert_eq!(has_moved(Square::H1), Some(false));
        assert_eq!(has_moved(Square::A1), Some(true));
        assert_eq!(has_moved(Square::E8), Some(false));
        assert_eq!(has_moved(Square::A8), Some(false));
        assert_eq!(has_moved(Square::H8), Some(true));
        assert_eq!(
            Fen::from_board(&board).to_string(),
            "r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1"
        );

        let board = "r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1"
            .parse::<Fen>()
            .expect("valid fen")
            .into_board()
            .expect("legal position");
        assert_eq!(board.piece_at(Square::E1).map(|p| p.has_moved), Some(true));
    }

    #[test]
    fn test_en_passant_square() {
        let mut board = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 3"
            .parse::<Fen>()
            .expect("valid fen")
            .into_board()
            .expect("legal position");
        assert_eq!(board.turn_counter(), 4);
        assert_eq!(
            board.piece_at(Square::D5).and_then(|p| p.last_double_step),
            Some(3)
        );
        assert!(board.attempt_move(Square::E5, Square::D6, Color::White));

        let fen: Fen = "4k3/8/8/3pP3/8/8/8/4K3 w - e6 0 3".parse().expect("valid fen");
        assert_eq!(fen.into_board(), Err(PositionError::InvalidEpSquare));
    }

    #[test]
    fn test_position_errors() {
        for (fen, err) in [
            ("8/8/8/8/8/8/8/4K3 w - - 0 1", PositionError::MissingKing(Color::Black)),
            ("4k3/8/8/8/8/8/8/3KK3 w - - 0 1", PositionError::TooManyKings(Color::White)),
            ("4k2P/8/8/8/8/8/8/4K3 w - - 0 1", PositionError::PawnsOnBackrank),
            ("4k3/8/8/8/8/8/8/4K3 w K - 0 1", PositionError::InvalidCastlingRights),
            ("4k3/4R3/8/8/8/8/8/4K3 w - - 0 1", PositionError::OppositeCheck),
        ] {
            let fen: Fen = fen.parse().expect("valid fen");
            assert_eq!(fen.into_board(), Err(err));
        }
    }

    #[test]
    fn test_check_flag_on_setup() {
        let board = "4k3/8/8/8/8/8/8/r3K3 w - - 0 1"
            .parse::<Fen>()
            .expect("valid fen")
            .into_board()
            .expect("legal position");
        assert!(board.in_check());
    }

    #[test]
    fn test_invalid_fen() {
        for (fen, err) in [
            ("", ParseFenError::InvalidFen),
            ("8/8/8/8/8/8/8 w - - 0 1", ParseFenError::InvalidBoard),
            ("9/8/8/8/8/8/8/8 w - - 0 1", ParseFenError::InvalidBoard),
            ("8/8/8/8/8/8/8/7x w - - 0 1", ParseFenError::InvalidBoard),
            ("8/8/8/8/8/8/8/8 x - - 0 1", ParseFenError::InvalidTurn),
            ("8/8/8/8/8/8/8/8 w KK - 0 1", ParseFenError::InvalidCastling),
            ("8/8/8/8/8/8/8/8 w - e9 0 1", ParseFenError::InvalidEpSquare),
            ("8/8/8/8/8/8/8/8 w - - x 1", ParseFenError::InvalidHalfmoveClock),
            ("8/8/8/8/8/8/8/8 w - - 0 0", ParseFenError::InvalidFullmoves),
            ("8/8/8/8/8/8/8/8 w - - 0 1 x", ParseFenError::InvalidFen),
        ] {
            assert_eq!(fen.parse::<Fen>(), Err(err), "{fen}");
        }
    }
}
