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

use core::num::TryFromIntError;

pub(crate) fn out_of_range_error() -> TryFromIntError {
    // TryFromIntError has a private constructor, so obtain one from a
    // conversion that always overflows.
    match u8::try_from(u16::MAX) {
        Err(err) => err,
        Ok(_) => unreachable!("u16::MAX fits into u8"),
    }
}
