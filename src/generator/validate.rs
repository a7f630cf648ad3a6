/*
validate.rs

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

//! Verify generated rounds.
//!
//! These checks are not part of the generation. They are used by the tests and by the
//! `--validate` command line option.

use std::collections::HashSet;

use super::crossword::{Board, Placement};
use super::letter_set::{LetterCounts, normalize_word};
use super::round::Round;

/// Type of errors.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("the board has no words")]
    NoWords,

    #[error("the board has no cells")]
    NoCells,

    #[error("'{0}' is not in the word pool")]
    UnknownWord(String),

    #[error("'{0}' cannot be spelled with the wheel letters")]
    NotSpellable(String),

    /// A letter of a word does not match its cell.
    #[error("cell ({x}, {y}) does not match word {id}")]
    CellMismatch { x: i32, y: i32, id: usize },

    /// Some words cannot be reached from the others through crossings.
    #[error("the words are not all connected")]
    Disconnected,
}

/// Verify that the board has words, and that every word is in the pool and can be spelled with
/// the wheel letters.
///
/// # Errors
///
/// The function returns the first problem found.
pub fn check_round(round: &Round, pool_words: &HashSet<String>) -> Result<(), ValidationError> {
    if round.board.words.is_empty() {
        return Err(ValidationError::NoWords);
    }
    if round.board.cells.is_empty() {
        return Err(ValidationError::NoCells);
    }

    let wheel: LetterCounts = round.wheel_counts();
    for placement in &round.board.words {
        let word: String = normalize_word(&placement.text);
        if !pool_words.contains(&word) {
            return Err(ValidationError::UnknownWord(word));
        }
        if !wheel.can_build(&word) {
            return Err(ValidationError::NotSpellable(word));
        }
    }
    Ok(())
}

/// Verify the board structure: every word matches its cells, every cell belongs to a word, and
/// all the words are connected.
///
/// # Errors
///
/// The function returns the first problem found.
pub fn check_board(board: &Board) -> Result<(), ValidationError> {
    for placement in &board.words {
        for (x, y, letter) in placement.cells() {
            match board.cell_at(x, y) {
                Some(cell) if cell.letter == letter && cell.owners.contains(&placement.id) => (),
                _ => {
                    return Err(ValidationError::CellMismatch {
                        x,
                        y,
                        id: placement.id,
                    });
                }
            }
        }
    }

    for cell in &board.cells {
        let owned: bool = !cell.owners.is_empty()
            && cell.owners.iter().all(|id| {
                board.words.get(*id).is_some_and(|p: &Placement| {
                    p.cells()
                        .any(|(x, y, c)| x == cell.x && y == cell.y && c == cell.letter)
                })
            });
        if !owned {
            return Err(ValidationError::CellMismatch {
                x: cell.x,
                y: cell.y,
                id: cell.owners.first().copied().unwrap_or_default(),
            });
        }
    }

    if !board.is_connected() {
        return Err(ValidationError::Disconnected);
    }
    Ok(())
}

/// Whether every board word is in the pool and can be spelled with the wheel letters.
pub fn validate_generated_round(round: &Round, pool_words: &HashSet<String>) -> bool {
    check_round(round, pool_words).is_ok()
}
