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

//! Checkmate and stalemate detection.
//!
//! A side has a legal move if any of its pieces can legally move to any
//! square. The scan probes every origin against every destination with
//! [`Board::attempt_move`] on a scratch copy of the board.

use core::{error::Error, fmt, str::FromStr};

use arrayvec::ArrayVec;
use tracing::debug;

use crate::{board::Board, color::Color, square::Square};

/// A container for `(from, to)` moves that can be stored inline on the
/// stack.
///
/// A side with `n` pieces has at most `n * (64 - n) <= 1024` moves, so the
/// list never overflows, even for boards with arbitrary material.
pub type MoveList = ArrayVec<(Square, Square), 1024>;

/// Outcome of a game.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Outcome {
    /// The side to move is checkmated.
    Decisive { winner: Color },
    /// The side to move is not in check but has no legal move.
    Stalemate,
}

impl Outcome {
    pub const fn winner(self) -> Option<Color> {
        match self {
            Outcome::Decisive { winner } => Some(winner),
            Outcome::Stalemate => None,
        }
    }

    pub const fn from_winner(winner: Option<Color>) -> Outcome {
        match winner {
            Some(winner) => Outcome::Decisive { winner },
            None => Outcome::Stalemate,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Outcome::Decisive {
                winner: Color::White,
            } => "1-0",
            Outcome::Decisive {
                winner: Color::Black,
            } => "0-1",
            Outcome::Stalemate => "1/2-1/2",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing the textual representation of an [`Outcome`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOutcomeError;

impl fmt::Display for ParseOutcomeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid outcome")
    }
}

impl Error for ParseOutcomeError {}

impl FromStr for Outcome {
    type Err = ParseOutcomeError;

    fn from_str(s: &str) -> Result<Outcome, ParseOutcomeError> {
        match s {
            "1-0" => Ok(Outcome::Decisive {
                winner: Color::White,
            }),
            "0-1" => Ok(Outcome::Decisive {
                winner: Color::Black,
            }),
            "1/2-1/2" => Ok(Outcome::Stalemate),
            _ => Err(ParseOutcomeError),
        }
    }
}

impl Board {
    /// Tests if `side` has at least one legal move. Stops at the first one
    /// found.
    pub fn has_any_legal_move(&self, side: Color) -> bool {
        let mut probe = self.clone();
        self.squares_of(side).any(|from| {
            Square::all().any(|to| probe.attempt_move(from, to, side))
        })
    }

    /// Collects all legal `(from, to)` moves of `side`, ordered by origin
    /// and then by destination.
    ///
    /// A pawn move onto the last rank is listed once. The promotion role
    /// is chosen afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use chessrules::{Board, Color, Square};
    ///
    /// let board = Board::new();
    /// let moves = board.legal_moves(Color::White);
    /// assert_eq!(moves.len(), 20);
    /// assert!(moves.contains(&(Square::G1, Square::F3)));
    /// ```
    pub fn legal_moves(&self, side: Color) -> MoveList {
        let mut probe = self.clone();
        let mut moves = MoveList::new();
        for from in self.squares_of(side) {
            for to in Square::all() {
                if probe.attempt_move(from, to, side) {
                    moves.push((from, to));
                }
            }
        }
        moves
    }

    /// Tests if `side` is in check and has no legal move.
    pub fn is_checkmate(&self, side: Color) -> bool {
        self.is_check(side) && !self.has_any_legal_move(side)
    }

    /// Tests if `side` is not in check but has no legal move.
    pub fn is_stalemate(&self, side: Color) -> bool {
        !self.is_check(side) && !self.has_any_legal_move(side)
    }

    /// Checks if the game is over for the side to move.
    ///
    /// # Examples
    ///
    /// ```
    /// use chessrules::{Board, Color, Outcome, Square};
    ///
    /// let mut board = Board::new();
    /// for (from, to) in [
    ///     (Square::F2, Square::F3),
    ///     (Square::E7, Square::E5),
    ///     (Square::G2, Square::G4),
    ///     (Square::D8, Square::H4),
    /// ] {
    ///     assert_eq!(board.outcome(), None);
    ///     board.play(from, to, board.turn(), None)?;
    /// }
    ///
    /// assert_eq!(board.outcome(), Some(Outcome::Decisive { winner: Color::Black }));
    /// # Ok::<_, chessrules::PlayError>(())
    /// ```
    pub fn outcome(&self) -> Option<Outcome> {
        let turn = self.turn();
        if self.has_any_legal_move(turn) {
            return None;
        }
        let outcome = if self.is_check(turn) {
            Outcome::Decisive { winner: !turn }
        } else {
            Outcome::Stalemate
        };
        debug!(%outcome, turn_counter = self.turn_counter(), "game over");
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::string::ToString;

    use super::*;

    #[test]
    fn test_crowded_board() {
        let mut board = Board::empty();
        for row in [0, 2, 4, 6] {
            for col in [0, 2, 4, 6] {
                let sq = Square::new(row, col).expect("on board");
                board.set_piece_at(sq, Color::White.queen().moved());
            }
        }
        board.set_piece_at(Square::A1, Color::White.king().moved());
        board.set_piece_at(Square::H7, Color::Black.king().moved());

        let moves = board.legal_moves(Color::White);
        assert_eq!(moves.len(), 105);

        let mut scratch = board.clone();
        let expected = board
            .squares_of(Color::White)
            .flat_map(|from| Square::all().map(move |to| (from, to)))
            .filter(|&(from, to)| scratch.attempt_move(from, to, Color::White))
            .count();
        assert_eq!(moves.len(), expected);
    }

    fn back_rank() -> Board {
        let mut board = Board::empty();
        board.set_piece_at(Square::G1, Color::White.king().moved());
        for sq in [Square::F2, Square::G2, Square::H2] {
            board.set_piece_at(sq, Color::White.pawn());
        }
        board.set_piece_at(Square::A1, Color::Black.rook().moved());
        board.set_piece_at(Square::G8, Color::Black.king());
        board
    }

    #[test]
    fn test_back_rank_mate() {
        let mut board = back_rank();
        assert!(board.is_checkmate(Color::White));
        assert!(!board.is_stalemate(Color::White));
        assert!(board.legal_moves(Color::White).is_empty());
        assert_eq!(
            board.outcome(),
            Some(Outcome::Decisive {
                winner: Color::Black
            })
        );

        board.remove_piece_at(Square::A1);
        assert!(!board.is_checkmate(Color::White));
        assert_eq!(board.outcome(), None);
    }

    #[test]
    fn test_mate_lifted_by_capture() {
        let mut board = back_rank();
        board.set_piece_at(Square::D4, Color::White.bishop());
        assert!(board.is_check(Color::White));
        assert!(!board.is_checkmate(Color::White));
        assert!(board
            .legal_moves(Color::White)
            .iter()
            .eq(&[(Square::D4, Square::A1)]));
    }

    #[test]
    fn test_stalemate() {
        let mut board = Board::empty();
        board.set_piece_at(Square::A8, Color::Black.king().moved());
        board.set_piece_at(Square::C7, Color::White.queen().moved());
        board.set_piece_at(Square::E1, Color::White.king().moved());
        board.set_turn(Color::Black);
        assert!(board.is_stalemate(Color::Black));
        assert!(!board.is_checkmate(Color::Black));
        assert_eq!(board.outcome(), Some(Outcome::Stalemate));
        assert!(!board.is_stalemate(Color::White));
    }

    #[test]
    fn test_initial_position() {
        let board = Board::new();
        assert!(board.has_any_legal_move(Color::White));
        assert!(board.has_any_legal_move(Color::Black));
        assert_eq!(board.legal_moves(Color::Black).len(), 20);
        assert_eq!(board.outcome(), None);
    }

    #[test]
    fn test_outcome_text() {
        for outcome in [
            Outcome::Decisive {
                winner: Color::White,
            },
            Outcome::Decisive {
                winner: Color::Black,
            },
            Outcome::Stalemate,
        ] {
            assert_eq!(outcome.to_string().parse(), Ok(outcome));
        }
        assert_eq!(Outcome::from_winner(Some(Color::Black)).to_string(), "0-1");
        assert_eq!("1/2".parse::<Outcome>(), Err(ParseOutcomeError));
        assert_eq!(Outcome::Stalemate.winner(), None);
    }
}
