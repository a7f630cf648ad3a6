/*
letter_set.rs

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

//! Letter multisets.
//!
//! Words are compared through their letter histogram, a [`LetterCounts`] object.
//! Only the 26 lowercase ASCII letters are counted.

use std::fmt;

/// Number of letters in the alphabet.
const ALPHABET_SIZE: usize = 26;

/// Lowercase the word and remove everything that is not a letter between `a` and `z`.
pub fn normalize_word(raw: &str) -> String {
    raw.chars()
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_lowercase)
        .collect()
}

/// Index of the letter in the histogram.
fn slot(letter: char) -> Option<usize> {
    let l: char = letter.to_ascii_lowercase();
    if l.is_ascii_lowercase() {
        Some(l as usize - 'a' as usize)
    } else {
        None
    }
}

/// Letter histogram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LetterCounts {
    counts: [u8; ALPHABET_SIZE],
}

impl LetterCounts {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the histogram of the given word. The word is normalized first.
    pub fn from_word(word: &str) -> Self {
        word.chars().collect()
    }

    /// Number of occurrences of the letter.
    pub fn get(&self, letter: char) -> usize {
        slot(letter).map_or(0, |i| usize::from(self.counts[i]))
    }

    /// Whether the letter is present at least once.
    pub fn contains(&self, letter: char) -> bool {
        self.get(letter) > 0
    }

    /// Add one occurrence of the letter. Characters outside `a`-`z` are ignored.
    pub fn add(&mut self, letter: char) {
        if let Some(i) = slot(letter) {
            self.counts[i] = self.counts[i].saturating_add(1);
        }
    }

    /// Limit every count to `max`.
    pub fn clamp(&mut self, max: usize) {
        let cap: u8 = u8::try_from(max).unwrap_or(u8::MAX);
        for c in self.counts.iter_mut() {
            *c = (*c).min(cap);
        }
    }

    /// Total number of letters (size of the expanded multiset).
    pub fn total(&self) -> usize {
        self.counts.iter().map(|c| usize::from(*c)).sum()
    }

    /// Highest count of any letter.
    pub fn max_repeat(&self) -> usize {
        self.counts
            .iter()
            .map(|c| usize::from(*c))
            .max()
            .unwrap_or(0)
    }

    /// Iterate over the letters with a non-zero count, in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .map(|(i, c)| ((b'a' + i as u8) as char, usize::from(*c)))
    }

    /// Expand the histogram into a flat list of letters, in alphabetical order.
    pub fn expand(&self) -> Vec<char> {
        self.iter()
            .flat_map(|(letter, count)| std::iter::repeat_n(letter, count))
            .collect()
    }

    /// Whether the word can be spelled with these letters, each letter being used at most as many
    /// times as it is present. Empty words cannot be built.
    pub fn can_build(&self, word: &str) -> bool {
        let needed: LetterCounts = LetterCounts::from_word(word);
        needed.total() > 0 && needed.counts.iter().zip(self.counts.iter()).all(|(n, a)| n <= a)
    }

    /// Number of letters the two histograms have in common: the sum over the alphabet of the
    /// minimum of both counts.
    pub fn overlap(&self, other: &LetterCounts) -> usize {
        self.counts
            .iter()
            .zip(other.counts.iter())
            .map(|(a, b)| usize::from(*a.min(b)))
            .sum()
    }
}

impl FromIterator<char> for LetterCounts {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut counts: LetterCounts = LetterCounts::new();
        for letter in iter.into_iter().flat_map(char::to_lowercase) {
            counts.add(letter);
        }
        counts
    }
}

impl fmt::Display for LetterCounts {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (letter, count) in self.iter() {
            write!(f, "{letter}{count}")?;
        }
        Ok(())
    }
}

/// Histogram of a word.
pub fn count_letters(source: &str) -> LetterCounts {
    LetterCounts::from_word(source)
}

/// Flat letter list of a histogram.
pub fn expand_counts(counts: &LetterCounts) -> Vec<char> {
    counts.expand()
}

/// Whether the word can be spelled with the letters in `source_counts`.
pub fn can_build_word(word: &str, source_counts: &LetterCounts) -> bool {
    source_counts.can_build(word)
}

/// Number of letters two words have in common.
pub fn overlap_count(word_a: &str, word_b: &str) -> usize {
    count_letters(word_a).overlap(&count_letters(word_b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize() {
        assert_eq!(normalize_word("Ice-Cream 2!"), "icecream");
        assert_eq!(normalize_word("Été"), "t");
        assert_eq!(normalize_word("  "), "");
    }

    #[test]
    fn counts_from_words_and_letter_lists() {
        let counts: LetterCounts = count_letters("Banana");
        assert_eq!(counts.get('a'), 3);
        assert_eq!(counts.get('n'), 2);
        assert_eq!(counts.get('b'), 1);
        assert_eq!(counts.get('z'), 0);
        assert_eq!(counts.total(), 6);

        let wheel: LetterCounts = ['C', 'A', 'T'].into_iter().collect();
        assert_eq!(wheel, count_letters("act"));
    }

    #[test]
    fn expand_is_inverse_of_count() {
        let counts: LetterCounts = count_letters("letter");
        let expanded: Vec<char> = expand_counts(&counts);
        assert_eq!(expanded, vec!['e', 'e', 'l', 'r', 't', 't']);
        assert_eq!(expanded.into_iter().collect::<LetterCounts>(), counts);
    }

    #[test]
    fn build_words_from_multiset() {
        let source: LetterCounts = count_letters("cart");
        assert!(can_build_word("cat", &source));
        assert!(can_build_word("Art", &source));
        assert!(!can_build_word("tact", &source));
        assert!(!can_build_word("dog", &source));
        assert!(!can_build_word("", &source));
        assert!(!can_build_word("123", &source));
    }

    #[test]
    fn overlap_is_symmetric() {
        assert_eq!(overlap_count("letter", "settle"), 5);
        assert_eq!(overlap_count("settle", "letter"), 5);
        assert_eq!(overlap_count("cat", "dog"), 0);
        assert_eq!(overlap_count("tar", "rat"), 3);
    }

    #[test]
    fn clamp_limits_repeats() {
        let mut counts: LetterCounts = count_letters("tomato");
        counts.clamp(1);
        assert_eq!(counts.max_repeat(), 1);
        assert_eq!(counts.to_string(), "a1m1o1t1");
    }
}
