/*
lib.rs

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

//! Word wheel round generator.
//!
//! The player spells words with the letters of a wheel to fill a small crossword board.
//! This crate loads the word pools ([`pool`]), selects the parameters of each grade
//! ([`grade_config`]), remembers the words already played ([`freshness`]), and generates the
//! rounds ([`generator`]).

pub mod freshness;
pub mod generator;
pub mod grade_config;
pub mod pool;
