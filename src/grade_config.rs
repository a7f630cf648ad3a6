/*
grade_config.rs

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

//! Difficulty parameters for each grade.
//!
//! The [`GradeConfig`] table is static and read-only. Use [`GradeConfig::for_grade`] to retrieve
//! the parameters for a grade, and [`GradeConfig::round_config`] to derive the parameters for a
//! given round of a session, which get slightly harder as the session progresses.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest grade.
pub const MIN_GRADE: u8 = 1;

/// Highest grade.
pub const MAX_GRADE: u8 = 5;

/// Word counts never drop below this value when constraints are relaxed.
const RELAX_FLOOR: usize = 3;

/// Highest difficulty tier reached within a session.
const MAX_DIFFICULTY_TIER: usize = 9;

/// Number of rounds played before the difficulty tier increases.
const ROUNDS_PER_TIER: usize = 3;

/// Type of errors.
#[derive(Error, Debug, PartialEq)]
pub enum GradeConfigError {
    /// The grade is outside the table.
    #[error("unknown grade config: {0}")]
    UnknownGrade(u8),
}

/// Parameters for a difficulty tier.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GradeConfig {
    /// Grade (1 to 5).
    pub grade: u8,

    /// Number of letters in the wheel.
    pub wheel_size: usize,

    /// Shortest word allowed on the board.
    pub min_word_length: usize,

    /// Longest word allowed on the board. Words longer than the wheel are never used.
    pub max_word_length: usize,

    /// Number of words the generator tries to put on the board.
    pub target_words: usize,

    /// Minimum number of words for a board to be accepted.
    pub min_board_words: usize,

    /// Maximum number of times a single letter can appear in the wheel.
    pub max_letter_repeat: usize,

    /// Number of hints available to the player.
    pub hint_budget: usize,

    /// Number of wrong words before a hint is suggested.
    pub misses_for_hint: usize,

    /// Points for a solved word.
    pub score_base: u32,

    /// Extra points per letter.
    pub word_length_bonus: u32,

    /// Difficulty tier within the session. See [`GradeConfig::round_config`].
    #[serde(default)]
    pub difficulty_tier: usize,
}

#[allow(clippy::too_many_arguments)]
const fn grade(
    grade: u8,
    wheel_size: usize,
    max_word_length: usize,
    target_words: usize,
    min_board_words: usize,
    hint_budget: usize,
    misses_for_hint: usize,
    score_base: u32,
    word_length_bonus: u32,
) -> GradeConfig {
    GradeConfig {
        grade,
        wheel_size,
        min_word_length: 3,
        max_word_length,
        target_words,
        min_board_words,
        max_letter_repeat: 2,
        hint_budget,
        misses_for_hint,
        score_base,
        word_length_bonus,
        difficulty_tier: 0,
    }
}

/// The grade table.
const GRADE_CONFIGS: [GradeConfig; 5] = [
    grade(1, 7, 5, 4, 3, 4, 2, 10, 2),
    grade(2, 7, 6, 4, 3, 4, 2, 12, 2),
    grade(3, 8, 6, 5, 4, 3, 2, 14, 3),
    grade(4, 8, 7, 5, 4, 3, 3, 16, 3),
    grade(5, 9, 7, 6, 5, 2, 3, 18, 4),
];

impl GradeConfig {
    /// Return the parameters for the given grade.
    pub fn for_grade(grade: u8) -> Result<GradeConfig, GradeConfigError> {
        if !(MIN_GRADE..=MAX_GRADE).contains(&grade) {
            return Err(GradeConfigError::UnknownGrade(grade));
        }
        Ok(GRADE_CONFIGS[usize::from(grade - MIN_GRADE)].clone())
    }

    /// Return the parameters for all the grades.
    pub fn all() -> Vec<GradeConfig> {
        GRADE_CONFIGS.to_vec()
    }

    /// Longest word that fits both the grade and the wheel.
    pub fn allowed_max_length(&self) -> usize {
        self.max_word_length.min(self.wheel_size)
    }

    /// Whether a word of that length can go on the board.
    pub fn accepts_length(&self, len: usize) -> bool {
        len >= self.min_word_length && len <= self.allowed_max_length()
    }

    /// Number of buildable words a wheel must offer to be accepted.
    pub fn required_buildable(&self) -> usize {
        self.min_board_words
            .max((self.target_words * 3).div_ceil(4))
    }

    /// Parameters for the given round of a session.
    ///
    /// Every three rounds the difficulty tier goes up (up to tier 9). Every five tiers the board
    /// gets one more word (at most two more), and every four tiers the player gets one less hint
    /// (at least one).
    pub fn round_config(&self, round_serial: usize) -> GradeConfig {
        let tier: usize = MAX_DIFFICULTY_TIER.min(round_serial / ROUNDS_PER_TIER);
        let boost: usize = (tier / 5).min(2);

        GradeConfig {
            target_words: self.target_words + boost,
            min_board_words: self.min_board_words + boost,
            hint_budget: self.hint_budget.saturating_sub(tier / 4).max(1),
            difficulty_tier: tier,
            ..self.clone()
        }
    }

    /// Loosen the word length and word count constraints by `level` notches.
    ///
    /// Values never go below three, and lower values are raised to three even at level 0.
    pub fn relaxed(&self, level: usize) -> GradeConfig {
        let relax = |value: usize| value.saturating_sub(level).max(RELAX_FLOOR);
        GradeConfig {
            min_word_length: relax(self.min_word_length),
            target_words: relax(self.target_words),
            min_board_words: relax(self.min_board_words),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lookup() {
        let c: GradeConfig = GradeConfig::for_grade(3).unwrap();
        assert_eq!(c.wheel_size, 8);
        assert_eq!(c.target_words, 5);
        assert_eq!(c.min_board_words, 4);
        assert_eq!(GradeConfig::all().len(), 5);
        assert_eq!(
            GradeConfig::for_grade(0),
            Err(GradeConfigError::UnknownGrade(0))
        );
        assert_eq!(
            GradeConfig::for_grade(6),
            Err(GradeConfigError::UnknownGrade(6))
        );
    }

    #[test]
    fn required_buildable_uses_three_quarters_of_target() {
        let c: GradeConfig = GradeConfig::for_grade(5).unwrap();
        // max(5, ceil(6 * 0.75) = 5)
        assert_eq!(c.required_buildable(), 5);
        let c: GradeConfig = GradeConfig {
            target_words: 10,
            min_board_words: 2,
            ..c
        };
        assert_eq!(c.required_buildable(), 8);
    }

    #[test]
    fn difficulty_ramp() {
        let base: GradeConfig = GradeConfig::for_grade(1).unwrap();
        assert_eq!(base.round_config(0), base);

        let tier5: GradeConfig = base.round_config(15);
        assert_eq!(tier5.difficulty_tier, 5);
        assert_eq!(tier5.target_words, base.target_words + 1);
        assert_eq!(tier5.min_board_words, base.min_board_words + 1);
        assert_eq!(tier5.hint_budget, 3);

        let capped: GradeConfig = base.round_config(1000);
        assert_eq!(capped.difficulty_tier, 9);
        assert_eq!(capped.target_words, base.target_words + 1);
        assert_eq!(capped.hint_budget, 2);
    }

    #[test]
    fn relaxation_never_goes_below_three() {
        let c: GradeConfig = GradeConfig::for_grade(5).unwrap();
        let r: GradeConfig = c.relaxed(1);
        assert_eq!(r.target_words, 5);
        assert_eq!(r.min_board_words, 4);
        assert_eq!(r.min_word_length, 3);
        let r: GradeConfig = c.relaxed(3);
        assert_eq!(r.target_words, 3);
        assert_eq!(r.min_board_words, 3);

        let small: GradeConfig = GradeConfig {
            min_word_length: 2,
            target_words: 2,
            min_board_words: 2,
            ..c
        };
        let r: GradeConfig = small.relaxed(0);
        assert_eq!(r.min_word_length, 3);
        assert_eq!(r.target_words, 3);
        assert_eq!(r.min_board_words, 3);
        assert!(!r.accepts_length(2));
        assert_eq!(small.relaxed(2).min_board_words, 3);
    }
}
