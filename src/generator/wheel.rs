/*
wheel.rs

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

//! Pick the letters of the wheel.
//!
//! A base word is selected from the pool, preferably a word the player has not seen yet.
//! Letters from words that share letters with the base word (the helpers) are then added, and the
//! wheel is completed with vowels and common consonants.
//! The wheel is accepted when enough words from the pool can be spelled with its letters.

use log::debug;

use super::letter_set::LetterCounts;
use super::rng::Mulberry32;
use crate::freshness::Freshness;
use crate::grade_config::GradeConfig;
use crate::pool::WordEntry;

/// Maximum number of wheels to try before giving up.
pub const MAX_WHEEL_ATTEMPTS: usize = 500;

/// Before that attempt, the base word is taken from the unseen words if any.
const UNSEEN_BASE_ATTEMPTS: usize = 260;

/// Before that attempt, the base word is taken from the words that are not recent if any.
const NON_RECENT_BASE_ATTEMPTS: usize = 380;

/// Number of words drawn when picking the base word.
const BASE_SAMPLE_SIZE: usize = 10;

/// Probability to add a letter that is not yet in the wheel.
const NEW_LETTER_ODDS: f64 = 0.72;

/// Probability to skip a recently used helper word.
const RECENT_HELPER_SKIP_ODDS: f64 = 0.72;

/// Probability to skip a helper word already seen.
const SEEN_HELPER_SKIP_ODDS: f64 = 0.3;

/// Probability to pad the wheel with a vowel instead of a common consonant.
const VOWEL_ODDS: f64 = 0.56;

/// Number of random padding letters to try before completing the wheel in alphabetical order.
const MAX_PADDING_DRAWS: usize = 256;

const VOWELS: [char; 6] = ['a', 'e', 'i', 'o', 'u', 'y'];
const COMMONS: [char; 8] = ['t', 'r', 'n', 's', 'l', 'd', 'm', 'p'];

/// Type of errors.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WheelError {
    /// No candidate word fits the length constraints.
    #[error("no candidate word between {min} and {max} letters")]
    NoCandidates { min: usize, max: usize },

    /// No wheel with enough buildable words was found.
    #[error("no letter wheel found after {0} attempts")]
    Exhausted(usize),
}

/// Letters of the wheel and the words that can be spelled with them.
#[derive(Debug, Clone)]
pub struct Wheel<'a> {
    /// Letters, in display order. The length is the wheel size.
    pub letters: Vec<char>,

    /// Pool words that fit the length constraints and can be spelled with the letters.
    pub buildable: Vec<&'a WordEntry>,
}

/// Pick the best of a few randomly drawn words.
///
/// Long words and words used less often get a better score.
fn pick_base<'a>(
    entries: &[&'a WordEntry],
    rng: &mut Mulberry32,
    freshness: &Freshness,
) -> Option<&'a WordEntry> {
    if entries.is_empty() {
        return None;
    }

    let mut best: Option<&'a WordEntry> = None;
    let mut best_score: f64 = f64::NEG_INFINITY;
    for _ in 0..BASE_SAMPLE_SIZE.min(entries.len()) {
        let entry: &'a WordEntry = entries[rng.random_int(0, entries.len() - 1)];
        let usage: f64 = freshness.usage(&entry.word) as f64;
        let score: f64 = entry.word.len() as f64 * 2.0 - usage * 5.0 + rng.next_f64() * 1.5;
        if score > best_score {
            best_score = score;
            best = Some(entry);
        }
    }
    best.or_else(|| rng.pick_one(entries).copied())
}

/// Add one occurrence of the letter unless the letter has reached the repeat limit.
fn add_capped(counts: &mut LetterCounts, letter: char, max_repeat: usize) -> bool {
    if counts.get(letter) >= max_repeat {
        return false;
    }
    counts.add(letter);
    true
}

/// Complete the wheel with vowels and common consonants.
///
/// Return `false` when no letter can be added without exceeding the repeat limit.
fn pad(counts: &mut LetterCounts, config: &GradeConfig, rng: &mut Mulberry32) -> bool {
    let mut draws: usize = 0;
    while counts.total() < config.wheel_size && draws < MAX_PADDING_DRAWS {
        draws += 1;
        let letters: &[char] = if rng.chance(VOWEL_ODDS) {
            &VOWELS
        } else {
            &COMMONS
        };
        if let Some(letter) = rng.pick_one(letters) {
            add_capped(counts, *letter, config.max_letter_repeat);
        }
    }

    // The usual letters are all at their limit: use the rest of the alphabet
    for letter in 'a'..='z' {
        while counts.total() < config.wheel_size {
            if !add_capped(counts, letter, config.max_letter_repeat) {
                break;
            }
        }
    }
    counts.total() >= config.wheel_size
}

/// Pick the letters of the wheel.
///
/// # Errors
///
/// The function returns an error if no word in the pool fits the length constraints, or if no
/// wheel with enough buildable words is found after [`MAX_WHEEL_ATTEMPTS`] attempts.
pub fn pick_wheel_letters<'a>(
    pool: &'a [WordEntry],
    config: &GradeConfig,
    rng: &mut Mulberry32,
    freshness: &Freshness,
) -> Result<Wheel<'a>, WheelError> {
    let candidates: Vec<&'a WordEntry> = pool
        .iter()
        .filter(|e| config.accepts_length(e.word.len()))
        .collect();
    if candidates.is_empty() {
        return Err(WheelError::NoCandidates {
            min: config.min_word_length,
            max: config.allowed_max_length(),
        });
    }
    let candidate_counts: Vec<LetterCounts> = candidates
        .iter()
        .map(|e| LetterCounts::from_word(&e.word))
        .collect();

    let unseen: Vec<&'a WordEntry> = candidates
        .iter()
        .copied()
        .filter(|e| !freshness.is_seen(&e.word))
        .collect();
    let non_recent: Vec<&'a WordEntry> = candidates
        .iter()
        .copied()
        .filter(|e| !freshness.is_recent(&e.word))
        .collect();
    let required: usize = config.required_buildable();

    // Helper order is shuffled again at each attempt
    let mut helper_order: Vec<usize> = (0..candidates.len()).collect();

    for attempt in 0..MAX_WHEEL_ATTEMPTS {
        let base_pool: &[&'a WordEntry] = if !unseen.is_empty() && attempt < UNSEEN_BASE_ATTEMPTS
        {
            &unseen
        } else if !non_recent.is_empty() && attempt < NON_RECENT_BASE_ATTEMPTS {
            &non_recent
        } else {
            &candidates
        };

        let Some(base) = pick_base(base_pool, rng, freshness) else {
            break;
        };

        let base_counts: LetterCounts = LetterCounts::from_word(&base.word);
        let mut counts: LetterCounts = base_counts;
        counts.clamp(config.max_letter_repeat);

        rng.shuffle(&mut helper_order);
        for &i in &helper_order {
            if counts.total() >= config.wheel_size {
                break;
            }
            let helper: &WordEntry = candidates[i];
            if helper.word == base.word || candidate_counts[i].overlap(&base_counts) == 0 {
                continue;
            }
            if freshness.is_recent(&helper.word) && rng.chance(RECENT_HELPER_SKIP_ODDS) {
                continue;
            }
            if freshness.is_seen(&helper.word) && rng.chance(SEEN_HELPER_SKIP_ODDS) {
                continue;
            }

            for letter in helper.word.chars() {
                if counts.total() >= config.wheel_size {
                    break;
                }
                if counts.get(letter) >= config.max_letter_repeat {
                    continue;
                }
                if !rng.chance(NEW_LETTER_ODDS) && !counts.contains(letter) {
                    continue;
                }
                counts.add(letter);
            }
        }

        if !pad(&mut counts, config, rng) {
            debug!(
                "Wheel attempt {attempt}: cannot fill {} letters",
                config.wheel_size
            );
            continue;
        }

        let mut letters: Vec<char> = counts.expand();
        rng.shuffle(&mut letters);
        letters.truncate(config.wheel_size);

        let source: LetterCounts = letters.iter().copied().collect();
        let buildable: Vec<&'a WordEntry> = candidates
            .iter()
            .copied()
            .filter(|e| source.can_build(&e.word))
            .collect();

        if buildable.len() >= required {
            debug!(
                "Wheel attempt {attempt}: base '{}', letters {source}, {} buildable words",
                base.word,
                buildable.len()
            );
            return Ok(Wheel { letters, buildable });
        }
    }

    Err(WheelError::Exhausted(MAX_WHEEL_ATTEMPTS))
}
