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

//! Deciding whether a move is legal, and carrying it out.
//!
//! Moves are played in two phases. [`Board::attempt_move`] probes a move
//! without leaving a trace, then [`Board::commit_move`] executes it. A pawn
//! that reaches the last rank is promoted in a third step with
//! [`Board::promote`]. [`Board::play`] bundles all three.
//!
//! # Examples
//!
//! ```
//! use chessrules::{Board, Color, Effects, Square};
//!
//! let mut board = Board::new();
//! assert!(board.attempt_move(Square::E2, Square::E4, Color::White));
//! assert!(!board.attempt_move(Square::E2, Square::E5, Color::White));
//!
//! let effects = board.commit_move(Square::E2, Square::E4);
//! assert_eq!(effects, Effects::DOUBLE_STEP);
//! assert_eq!(board.turn(), Color::Black);
//! ```

use core::{error::Error, fmt, mem};

use bitflags::bitflags;
use tracing::{debug, trace};

use crate::{
    board::Board,
    castling_side::CastlingSide,
    color::Color,
    movement::{self, PawnStep},
    role::Role,
    square::Square,
    types::Piece,
};

bitflags! {
    /// What happened on the board when a move was committed.
    #[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
    pub struct Effects: u8 {
        /// A piece was captured.
        const CAPTURE = 1;
        /// The capture was en passant. Always comes with `CAPTURE`.
        const EN_PASSANT = 2;
        /// The king castled and the rook was relocated.
        const CASTLE = 4;
        /// A pawn advanced two squares and may be captured en passant on
        /// the next half-move.
        const DOUBLE_STEP = 8;
        /// A pawn reached the last rank and waits for [`Board::promote`].
        const PROMOTION_PENDING = 16;
        /// The pawn was promoted. Only reported by [`Board::play`].
        const PROMOTION = 32;
        /// The side now to move is in check.
        const CHECK = 64;
    }
}

/// Error when promoting a piece.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum PromotionError {
    /// There is no pawn on a last rank at the given square.
    NotPromotable,
    /// Pawns may only be promoted to a knight, bishop, rook or queen.
    InvalidRole,
}

impl fmt::Display for PromotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PromotionError::NotPromotable => "no pawn to promote on this square",
            PromotionError::InvalidRole => "cannot promote to pawn or king",
        })
    }
}

impl Error for PromotionError {}

/// Error when playing a move with [`Board::play`].
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum PlayError {
    /// The move is illegal for the given side. The board is unchanged.
    IllegalMove { from: Square, to: Square },
    /// The requested promotion is not a knight, bishop, rook or queen. The
    /// board is unchanged.
    InvalidPromotion(Role),
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::IllegalMove { from, to } => write!(f, "illegal move {from}{to}"),
            PlayError::InvalidPromotion(role) => {
                write!(f, "cannot promote to {}", role.upper_char())
            }
        }
    }
}

impl Error for PlayError {}

/// The board changes beyond relocating the moving piece.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Extra {
    None,
    EnPassant(Square),
    Castle(CastlingSide),
}

impl Board {
    /// Tests if `side` may move the piece on `from` to `to`.
    ///
    /// The board is left exactly as it was found. To carry the move out,
    /// call [`Board::commit_move`] with the same squares.
    ///
    /// # Examples
    ///
    /// ```
    /// use chessrules::{Board, Color, Square};
    ///
    /// let mut board = Board::new();
    /// assert!(board.attempt_move(Square::G1, Square::F3, Color::White));
    ///
    /// // Not White's piece.
    /// assert!(!board.attempt_move(Square::G8, Square::F6, Color::White));
    ///
    /// // Blocked by the own pawn.
    /// assert!(!board.attempt_move(Square::F1, Square::C4, Color::White));
    /// ```
    pub fn attempt_move(&mut self, from: Square, to: Square, side: Color) -> bool {
        if from == to {
            trace!(%from, %to, %side, "rejected: null move");
            return false;
        }
        let Some(piece) = self.piece_at(from) else {
            trace!(%from, %to, %side, "rejected: empty origin");
            return false;
        };
        if piece.color != side {
            trace!(%from, %to, %side, "rejected: not own piece");
            return false;
        }

        let extra = match piece.role {
            Role::King => self.king_extra(piece, from, to),
            Role::Pawn => movement::pawn_step(self, from, to).map(|step| match step {
                PawnStep::EnPassant(victim) => Extra::EnPassant(victim),
                PawnStep::Single | PawnStep::Double | PawnStep::Capture => Extra::None,
            }),
            Role::Knight | Role::Bishop | Role::Rook | Role::Queen => {
                movement::can_reach(self, from, to).then_some(Extra::None)
            }
        };
        let Some(extra) = extra else {
            trace!(%from, %to, %side, role = ?piece.role, "rejected: unreachable");
            return false;
        };

        let safe = self.keeps_king_safe(from, to, side, extra);
        if !safe {
            trace!(%from, %to, %side, "rejected: king left in check");
        }
        safe
    }

    /// The king rule: castling, or a single step onto an unattacked square.
    fn king_extra(&self, king: Piece, from: Square, to: Square) -> Option<Extra> {
        if let Some(castling_side) = CastlingSide::from_king_move(king.color, from, to) {
            return self
                .may_castle(king, castling_side)
                .then_some(Extra::Castle(castling_side));
        }
        (movement::can_reach(self, from, to) && !self.is_square_attacked(king.color, to))
            .then_some(Extra::None)
    }

    fn may_castle(&self, king: Piece, castling_side: CastlingSide) -> bool {
        let color = king.color;
        let rook_ready = self
            .piece_at(castling_side.rook_from(color))
            .is_some_and(|rook| rook.is(color, Role::Rook) && !rook.has_moved);

        // The king path starts on the home square, so this also rules out
        // castling out of check.
        !king.has_moved
            && rook_ready
            && castling_side.between(color).all(|sq| self.is_empty_at(sq))
            && castling_side
                .king_path(color)
                .all(|sq| !self.is_square_attacked(color, sq))
    }

    /// Plays the move on the grid, looks for check, and puts every touched
    /// square back.
    fn keeps_king_safe(&mut self, from: Square, to: Square, side: Color, extra: Extra) -> bool {
        let moving = self.remove_piece_at(from);
        let displaced = mem::replace(self.cell_mut(to), moving);

        let lifted = match extra {
            Extra::None => None,
            Extra::EnPassant(victim) => Some((victim, self.remove_piece_at(victim))),
            Extra::Castle(castling_side) => {
                let rook = self.remove_piece_at(castling_side.rook_from(side));
                *self.cell_mut(castling_side.rook_to(side)) = rook;
                Some((castling_side.rook_from(side), rook))
            }
        };

        let safe = !self.is_check(side);

        if let Some((sq, piece)) = lifted {
            if let Extra::Castle(castling_side) = extra {
                self.remove_piece_at(castling_side.rook_to(side));
            }
            *self.cell_mut(sq) = piece;
        }
        *self.cell_mut(to) = displaced;
        *self.cell_mut(from) = moving;

        safe
    }

    /// Executes a move previously accepted by [`Board::attempt_move`].
    ///
    /// The move is not validated again. Committing a move that was not
    /// accepted leaves the board in an unspecified (but memory-safe) state.
    ///
    /// Hands the turn to the other side and recomputes
    /// [`Board::in_check()`] for it.
    pub fn commit_move(&mut self, from: Square, to: Square) -> Effects {
        let mut effects = Effects::empty();
        let Some(piece) = self.remove_piece_at(from) else {
            debug!(%from, %to, "nothing to commit");
            return effects;
        };
        let mut piece = piece.moved();

        match piece.role {
            Role::King => {
                if let Some(castling_side) = CastlingSide::from_king_move(piece.color, from, to) {
                    if let Some(rook) = self.remove_piece_at(castling_side.rook_from(piece.color)) {
                        self.set_piece_at(castling_side.rook_to(piece.color), rook.moved());
                    }
                    effects |= Effects::CASTLE;
                }
            }
            Role::Pawn => {
                let (drow, dcol) = from.delta(to);
                if dcol != 0 && self.is_empty_at(to) {
                    self.remove_piece_at(Square::at(from.row(), to.col()));
                    effects |= Effects::CAPTURE | Effects::EN_PASSANT;
                } else if drow.abs() == 2 {
                    piece.last_double_step = Some(self.turn_counter());
                    effects |= Effects::DOUBLE_STEP;
                }
                if to.row() == piece.color.promotion_rank() {
                    effects |= Effects::PROMOTION_PENDING;
                }
            }
            Role::Knight | Role::Bishop | Role::Rook | Role::Queen => (),
        }

        if self.set_piece_at(to, piece).is_some() {
            effects |= Effects::CAPTURE;
        }

        self.advance_turn();
        if self.refresh_check() {
            effects |= Effects::CHECK;
        }

        debug!(%from, %to, ?effects, turn_counter = self.turn_counter(), "committed move");
        effects
    }

    /// Tests if a pawn of either side stands on row 0 or row 7 at `sq`.
    pub fn needs_promotion(&self, sq: Square) -> bool {
        self.piece_at(sq).is_some_and(|piece| {
            piece.role == Role::Pawn && (sq.row() == 0 || sq.row() == 7)
        })
    }

    /// Replaces the pawn on `sq` with a fresh piece of `role` and the same
    /// color.
    ///
    /// The new piece counts as moved. The check flag of the side to move is
    /// recomputed, since the promoted piece may give check.
    ///
    /// # Errors
    ///
    /// * [`PromotionError::NotPromotable`] unless
    ///   [`Board::needs_promotion()`] holds for `sq`.
    /// * [`PromotionError::InvalidRole`] if `role` is a pawn or king.
    ///
    /// # Examples
    ///
    /// ```
    /// use chessrules::{Board, Color, Role, Square};
    ///
    /// let mut board = Board::empty();
    /// board.set_piece_at(Square::C8, Color::White.pawn());
    /// board.promote(Square::C8, Role::Knight)?;
    /// assert_eq!(board.piece_at(Square::C8), Some(Color::White.knight().moved()));
    /// # Ok::<_, chessrules::PromotionError>(())
    /// ```
    pub fn promote(&mut self, sq: Square, role: Role) -> Result<(), PromotionError> {
        let Some(pawn) = self.piece_at(sq).filter(|_| self.needs_promotion(sq)) else {
            return Err(PromotionError::NotPromotable);
        };
        if !role.is_promotion_target() {
            return Err(PromotionError::InvalidRole);
        }
        self.set_piece_at(sq, role.of(pawn.color).moved());
        self.refresh_check();
        debug!(%sq, ?role, "promoted");
        Ok(())
    }

    /// Attempts, commits and (if needed) promotes in one call.
    ///
    /// A missing `promotion` selects a queen. It is ignored when the move
    /// does not promote.
    ///
    /// # Errors
    ///
    /// Errors with [`PlayError`] and leaves the board unchanged if the move
    /// is illegal or `promotion` names a pawn or king.
    ///
    /// # Examples
    ///
    /// ```
    /// use chessrules::{Board, Color, Effects, PlayError, Square};
    ///
    /// let mut board = Board::new();
    /// board.play(Square::E2, Square::E4, Color::White, None)?;
    /// board.play(Square::D7, Square::D5, Color::Black, None)?;
    ///
    /// let effects = board.play(Square::E4, Square::D5, Color::White, None)?;
    /// assert_eq!(effects, Effects::CAPTURE);
    ///
    /// assert_eq!(
    ///     board.play(Square::E8, Square::E6, Color::Black, None),
    ///     Err(PlayError::IllegalMove { from: Square::E8, to: Square::E6 })
    /// );
    /// # Ok::<_, PlayError>(())
    /// ```
    pub fn play(
        &mut self,
        from: Square,
        to: Square,
        side: Color,
        promotion: Option<Role>,
    ) -> Result<Effects, PlayError> {
        let role = promotion.unwrap_or(Role::Queen);
        if !role.is_promotion_target() {
            return Err(PlayError::InvalidPromotion(role));
        }
        if !self.attempt_move(from, to, side) {
            return Err(PlayError::IllegalMove { from, to });
        }

        let mut effects = self.commit_move(from, to);
        if effects.contains(Effects::PROMOTION_PENDING) {
            self.promote(to, role)
                .map_err(|_| PlayError::InvalidPromotion(role))?;
            effects.remove(Effects::PROMOTION_PENDING);
            effects.insert(Effects::PROMOTION);
            effects.set(Effects::CHECK, self.in_check());
        }
        Ok(effects)
    }
}
