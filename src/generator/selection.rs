/*
selection.rs

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

//! Select the words for the board.
//!
//! Words are selected one at a time among the words that share at least one letter with a word
//! already selected, so that the layout engine has a chance to cross them.
//! Unseen words are always preferred over words seen before, which are preferred over recent
//! words (see [`FreshnessTier`]).

use log::debug;
use serde::Serialize;

use super::letter_set::LetterCounts;
use super::rng::Mulberry32;
use crate::freshness::{Freshness, FreshnessTier, NUM_TIERS};
use crate::grade_config::GradeConfig;
use crate::pool::WordEntry;

/// Weight of the letters shared with the words already selected.
const OVERLAP_WEIGHT: f64 = 9.0;

/// Weight of the number of remaining words the candidate could cross.
const FUTURE_CROSS_WEIGHT: f64 = 3.0;

/// Weight of the word length.
const LENGTH_WEIGHT: f64 = 2.0;

/// Penalty per previous use of the word.
const USAGE_PENALTY: f64 = 11.0;

/// Counters describing how the words were selected.
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SelectionStats {
    /// Recent words were available but a fresher tier was used instead.
    pub recent_word_reuse_blocked: bool,

    /// At least one word came from a tier other than [`FreshnessTier::Unseen`].
    pub freshness_fallback_used: bool,

    pub fresh_words_used: usize,
    pub reused_words_used: usize,
    pub recent_words_used: usize,
}

/// Selected words.
#[derive(Debug, Clone, Default)]
pub struct Selection<'a> {
    /// Words in selection order.
    pub words: Vec<&'a WordEntry>,

    pub stats: SelectionStats,
}

/// Candidate word.
struct Candidate<'a> {
    entry: &'a WordEntry,
    counts: LetterCounts,
    consumed: bool,
}

/// Select up to `config.target_words` words from the buildable words.
pub fn select_board_words<'a>(
    buildable: &[&'a WordEntry],
    config: &GradeConfig,
    rng: &mut Mulberry32,
    freshness: &Freshness,
) -> Selection<'a> {
    let mut order: Vec<&'a WordEntry> = buildable.to_vec();
    rng.shuffle(&mut order);
    let mut source: Vec<Candidate<'a>> = order
        .into_iter()
        .map(|entry| Candidate {
            entry,
            counts: LetterCounts::from_word(&entry.word),
            consumed: false,
        })
        .collect();

    let target: usize = config.target_words.min(source.len());
    let mut selected: Vec<usize> = Vec::with_capacity(target);
    let mut stats: SelectionStats = SelectionStats::default();

    while selected.len() < target {
        // Partition the crossable candidates by tier
        let mut tiers: [Vec<usize>; NUM_TIERS] = Default::default();
        for (i, candidate) in source.iter().enumerate() {
            if candidate.consumed {
                continue;
            }
            let crossable: bool = selected.is_empty()
                || selected
                    .iter()
                    .any(|&s| candidate.counts.overlap(&source[s].counts) > 0);
            if crossable {
                tiers[freshness.tier(&candidate.entry.word) as usize].push(i);
            }
        }

        let Some(tier_index) = tiers.iter().position(|t| !t.is_empty()) else {
            debug!("No more crossable words after {} words", selected.len());
            break;
        };
        let tier: FreshnessTier =
            FreshnessTier::from_repr(tier_index).unwrap_or(FreshnessTier::Recent);

        if !tiers[FreshnessTier::Recent as usize].is_empty() && tier < FreshnessTier::Recent {
            stats.recent_word_reuse_blocked = true;
        }
        if tier > FreshnessTier::Unseen {
            stats.freshness_fallback_used = true;
        }

        let mut best: usize = tiers[tier_index][0];
        let mut best_score: f64 = f64::NEG_INFINITY;
        for &i in &tiers[tier_index] {
            let score: f64 = score_candidate(i, &source, &selected, rng, freshness);
            if score > best_score {
                best_score = score;
                best = i;
            }
        }

        match tier {
            FreshnessTier::Unseen => stats.fresh_words_used += 1,
            FreshnessTier::Seen => stats.reused_words_used += 1,
            FreshnessTier::Recent => {
                stats.reused_words_used += 1;
                stats.recent_words_used += 1;
            }
        }
        source[best].consumed = true;
        selected.push(best);
    }

    Selection {
        words: selected.iter().map(|&i| source[i].entry).collect(),
        stats,
    }
}

/// Score a candidate.
///
/// Candidates that share many letters with the selected words, that could cross many of the
/// remaining words, and that are long get a better score. Words used often get a penalty.
fn score_candidate(
    index: usize,
    source: &[Candidate],
    selected: &[usize],
    rng: &mut Mulberry32,
    freshness: &Freshness,
) -> f64 {
    let candidate: &Candidate = &source[index];
    let overlap: usize = selected
        .iter()
        .map(|&s| candidate.counts.overlap(&source[s].counts))
        .sum();
    let future_crosses: usize = source
        .iter()
        .enumerate()
        .filter(|(i, other)| {
            *i != index && !other.consumed && candidate.counts.overlap(&other.counts) > 0
        })
        .count();
    let usage: usize = freshness.usage(&candidate.entry.word);

    overlap as f64 * OVERLAP_WEIGHT
        + future_crosses as f64 * FUTURE_CROSS_WEIGHT
        + candidate.entry.word.len() as f64 * LENGTH_WEIGHT
        - usage as f64 * USAGE_PENALTY
        + rng.next_f64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::letter_set::overlap_count;

    fn entries(words: &[&str]) -> Vec<WordEntry> {
        words
            .iter()
            .map(|w| WordEntry::new(w, "clue", "everyday-life", 1))
            .collect()
    }

    fn config(target_words: usize) -> GradeConfig {
        GradeConfig {
            target_words,
            min_board_words: 2,
            ..GradeConfig::for_grade(1).unwrap()
        }
    }

    #[test]
    fn every_word_shares_letters_with_an_earlier_word() {
        let pool: Vec<WordEntry> = entries(&["cat", "car", "art", "tar", "rat", "dog", "god"]);
        let refs: Vec<&WordEntry> = pool.iter().collect();
        let mut rng: Mulberry32 = Mulberry32::from_seed_str("selection");
        let selection: Selection =
            select_board_words(&refs, &config(4), &mut rng, &Freshness::default());

        assert_eq!(selection.words.len(), 4);
        for (k, word) in selection.words.iter().enumerate().skip(1) {
            assert!(
                selection.words[..k]
                    .iter()
                    .any(|w| overlap_count(&w.word, &word.word) > 0)
            );
        }
        assert_eq!(selection.stats.fresh_words_used, 4);
        assert!(!selection.stats.freshness_fallback_used);
        assert!(!selection.stats.recent_word_reuse_blocked);
    }

    #[test]
    fn fresh_words_come_first() {
        let pool: Vec<WordEntry> = entries(&["cat", "car", "art", "tar", "rat"]);
        let refs: Vec<&WordEntry> = pool.iter().collect();
        let freshness: Freshness = Freshness::new(["cat", "car", "art"], ["cat"], [("cat", 4)]);
        let mut rng: Mulberry32 = Mulberry32::new(3);
        let selection: Selection = select_board_words(&refs, &config(5), &mut rng, &freshness);

        let words: Vec<&str> = selection.words.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words.len(), 5);
        // Unseen first, then seen, recent last
        let mut firsts: Vec<&str> = words[..2].to_vec();
        firsts.sort_unstable();
        assert_eq!(firsts, vec!["rat", "tar"]);
        let mut middle: Vec<&str> = words[2..4].to_vec();
        middle.sort_unstable();
        assert_eq!(middle, vec!["art", "car"]);
        assert_eq!(words[4], "cat");

        assert_eq!(selection.stats.fresh_words_used, 2);
        assert_eq!(selection.stats.reused_words_used, 3);
        assert_eq!(selection.stats.recent_words_used, 1);
        assert!(selection.stats.freshness_fallback_used);
        assert!(selection.stats.recent_word_reuse_blocked);
    }

    #[test]
    fn stops_when_nothing_can_cross() {
        let pool: Vec<WordEntry> = entries(&["cat", "dog"]);
        let refs: Vec<&WordEntry> = pool.iter().collect();
        let mut rng: Mulberry32 = Mulberry32::new(5);
        let selection: Selection =
            select_board_words(&refs, &config(4), &mut rng, &Freshness::default());
        assert_eq!(selection.words.len(), 1);
    }
}
