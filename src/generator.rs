/*
generator.rs

Copyright 2026 Wordwheel contributors

This file is part of Wordwheel.

Wordwheel is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Wordwheel is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Wordwheel. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Generate word wheel rounds.
//!
//! A round is composed of two parts:
//!
//! * The letters of the wheel.
//!   [`wheel::pick_wheel_letters`] starts from a base word of the pool, adds letters from words
//!   that share letters with it, and completes the wheel with vowels and common consonants.
//!   The resulting [`wheel::Wheel`] object also lists the pool words that can be spelled with the
//!   letters.
//!
//! * A crossword board.
//!   [`selection::select_board_words`] selects words among the words that can be spelled,
//!   preferring words the player has never seen.
//!   [`crossword::build_crossword`] then places these words on a grid.
//!
//! [`round::generate_round`] runs these steps until a good round is found, and returns a
//! [`round::Round`] object.
//! All the random decisions come from a [`rng::Mulberry32`] generator seeded from the grade, the
//! round index, the session salt, and the attempt number: the same request always gives the same
//! round.
//!
//! [`validate::validate_generated_round`] verifies a generated round against the pool.

pub mod crossword;
pub mod letter_set;
pub mod rng;
pub mod round;
pub mod selection;
pub mod validate;
pub mod wheel;
