/*
round.rs

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

//! Assemble a complete round.
//!
//! The generator runs the whole pipeline (wheel letters, word selection, and crossword layout)
//! repeatedly, each attempt with its own seed.
//! Every [`RELAX_INTERVAL`] attempts, the word length and word count constraints are loosened.
//! The generator keeps the round that reuses the fewest words (see [`FreshnessSummary`]), and
//! returns as soon as a round uses only unseen words, or [`IMPROVEMENT_WINDOW`] attempts after
//! the first valid round.

use log::{Level, debug, log_enabled};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use super::crossword::{Board, build_crossword};
use super::letter_set::LetterCounts;
use super::rng::Mulberry32;
use super::selection::{Selection, SelectionStats, select_board_words};
use super::wheel::{Wheel, pick_wheel_letters};
use crate::freshness::Freshness;
use crate::grade_config::GradeConfig;
use crate::pool::{DEFAULT_CLUE, Theme, WordEntry, WordPool};

/// Maximum number of attempts for a round.
pub const MAX_ROUND_ATTEMPTS: usize = 500;

/// Number of attempts between two relaxations of the constraints.
pub const RELAX_INTERVAL: usize = 140;

/// Number of attempts after the first valid round before returning the best round.
pub const IMPROVEMENT_WINDOW: usize = 24;

/// Type of errors.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RoundError {
    /// The pool (or the theme) has no words.
    #[error("no pool entries available for grade {0}")]
    EmptyPool(u8),

    /// No valid round was found.
    #[error("failed to generate round for grade {0}")]
    Exhausted(u8),
}

/// Parameters of a round.
#[derive(Debug, Clone, Copy)]
pub struct RoundRequest<'a> {
    pub grade: u8,

    /// Index of the round in the session.
    pub round_index: usize,

    /// Session value mixed into the seed so that two sessions get different rounds.
    pub session_salt: u64,

    pub pool: &'a WordPool,

    /// Only use the words of that theme.
    pub theme_id: Option<&'a str>,

    pub config: &'a GradeConfig,

    /// Words the player has already seen.
    pub freshness: &'a Freshness,
}

impl<'a> RoundRequest<'a> {
    /// Create a request for all the words of the pool. The grade comes from the configuration.
    pub fn new(
        round_index: usize,
        session_salt: u64,
        pool: &'a WordPool,
        config: &'a GradeConfig,
        freshness: &'a Freshness,
    ) -> Self {
        Self {
            grade: config.grade,
            round_index,
            session_salt,
            pool,
            theme_id: None,
            config,
            freshness,
        }
    }

    /// Restrict the round to the words of the theme.
    pub fn with_theme(self, theme_id: &'a str) -> Self {
        Self {
            theme_id: Some(theme_id),
            ..self
        }
    }

    /// Seed of the given attempt.
    pub fn seed(&self, attempt: usize) -> String {
        format!(
            "{}-{}-{}-{attempt}",
            self.grade, self.round_index, self.session_salt
        )
    }
}

/// Clue and themes of a board word.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WordMeta {
    /// Identifier of the placement on the board.
    pub id: usize,
    pub text: String,
    pub clue: String,
    pub labels: Vec<String>,
    pub primary_theme_id: String,
}

/// Diagnostic counters.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WordPoolMeta {
    /// Number of words in the grade pool.
    pub grade_pool_size: usize,

    pub recent_word_reuse_blocked: bool,

    /// Unseen buildable words could form a board on their own.
    pub fresh_crossword_available: bool,

    pub freshness_fallback_used: bool,
    pub fresh_words_used: usize,
    pub reused_words_used: usize,
    pub recent_words_used: usize,
    pub max_word_usage_in_board: usize,
    pub total_word_usage_in_board: usize,
    pub board_word_count: usize,
    pub seen_words_count: usize,
    pub recent_words_count: usize,
}

/// A generated round.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    /// Seed of the attempt that produced the round.
    pub seed: String,

    pub grade: u8,
    pub round_index: usize,

    /// Uppercase letters of the wheel.
    pub wheel_letters: Vec<char>,

    pub board: Board,

    /// Metadata of the board words, indexed by placement identifier.
    pub words: Vec<WordMeta>,

    /// Board words in alphabetical order.
    pub valid_words: Vec<String>,

    /// Placement identifier of each board word.
    pub word_lookup: BTreeMap<String, usize>,

    pub theme: Option<Theme>,

    /// Parameters after relaxation.
    pub config: GradeConfig,

    pub word_pool_meta: WordPoolMeta,
}

impl Round {
    /// Histogram of the wheel letters.
    pub fn wheel_counts(&self) -> LetterCounts {
        self.wheel_letters.iter().copied().collect()
    }
}

/// How fresh the words of a board are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FreshnessSummary {
    pub board_word_count: usize,
    pub fresh_words_used: usize,
    pub reused_words_used: usize,
    pub recent_words_used: usize,
    pub total_word_usage_in_board: usize,
    pub max_word_usage_in_board: usize,
}

impl FreshnessSummary {
    /// Summarize the given words.
    pub fn of_words<'w, I: IntoIterator<Item = &'w str>>(words: I, freshness: &Freshness) -> Self {
        let mut summary: FreshnessSummary = FreshnessSummary::default();
        for word in words {
            let usage: usize = freshness.usage(word);
            summary.board_word_count += 1;
            summary.total_word_usage_in_board += usage;
            summary.max_word_usage_in_board = summary.max_word_usage_in_board.max(usage);
            if !freshness.is_seen(word) {
                summary.fresh_words_used += 1;
                continue;
            }
            summary.reused_words_used += 1;
            if freshness.is_recent(word) {
                summary.recent_words_used += 1;
            }
        }
        summary
    }

    /// Whether no word has been seen before.
    pub fn is_perfect(&self) -> bool {
        self.reused_words_used == 0 && self.recent_words_used == 0
    }

    /// Ordering key: greater is better.
    ///
    /// More unseen words first, then fewer reused words, fewer recent words, lower maximum
    /// usage, lower total usage, and finally more words.
    #[allow(clippy::type_complexity)]
    fn key(
        &self,
    ) -> (
        usize,
        Reverse<usize>,
        Reverse<usize>,
        Reverse<usize>,
        Reverse<usize>,
        usize,
    ) {
        (
            self.fresh_words_used,
            Reverse(self.reused_words_used),
            Reverse(self.recent_words_used),
            Reverse(self.max_word_usage_in_board),
            Reverse(self.total_word_usage_in_board),
            self.board_word_count,
        )
    }

    /// Whether this summary is strictly better than the other one.
    pub fn is_better_than(&self, other: &FreshnessSummary) -> bool {
        self.key() > other.key()
    }
}

/// Whether the overlap graph of the words has a connected component of at least `min_size`
/// words. Two words are connected when they share at least one letter.
pub fn has_connected_component_at_least(entries: &[&WordEntry], min_size: usize) -> bool {
    if min_size <= 1 {
        return !entries.is_empty();
    }
    if entries.len() < min_size {
        return false;
    }

    let counts: Vec<LetterCounts> = entries
        .iter()
        .map(|e| LetterCounts::from_word(&e.word))
        .collect();
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); entries.len()];
    for i in 0..counts.len() {
        for j in (i + 1)..counts.len() {
            if counts[i].overlap(&counts[j]) > 0 {
                adjacency[i].push(j);
                adjacency[j].push(i);
            }
        }
    }

    let mut visited: Vec<bool> = vec![false; entries.len()];
    for start in 0..entries.len() {
        if visited[start] {
            continue;
        }
        let mut component_size: usize = 0;
        let mut stack: Vec<usize> = vec![start];
        visited[start] = true;
        while let Some(current) = stack.pop() {
            component_size += 1;
            if component_size >= min_size {
                return true;
            }
            for &next in &adjacency[current] {
                if !visited[next] {
                    visited[next] = true;
                    stack.push(next);
                }
            }
        }
    }
    false
}

/// Best candidate of a round search.
#[derive(Debug)]
struct BestRound<T> {
    best: Option<(FreshnessSummary, T)>,
    first_valid_attempt: Option<usize>,
}

impl<T> Default for BestRound<T> {
    fn default() -> Self {
        Self {
            best: None,
            first_valid_attempt: None,
        }
    }
}

impl<T> BestRound<T> {
    /// Record a valid candidate and return whether the search is over.
    ///
    /// A perfect candidate always wins and ends the search. Otherwise the search ends
    /// [`IMPROVEMENT_WINDOW`] attempts after the first valid candidate.
    fn offer(&mut self, attempt: usize, summary: FreshnessSummary, candidate: T) -> bool {
        if summary.is_perfect() {
            self.best = Some((summary, candidate));
            return true;
        }
        if self
            .best
            .as_ref()
            .is_none_or(|(b, _)| summary.is_better_than(b))
        {
            self.best = Some((summary, candidate));
        }
        match self.first_valid_attempt {
            None => {
                self.first_valid_attempt = Some(attempt);
                false
            }
            Some(first) => attempt - first >= IMPROVEMENT_WINDOW,
        }
    }

    fn into_best(self) -> Option<T> {
        self.best.map(|(_, candidate)| candidate)
    }
}

/// Build the round object from the results of an attempt.
#[allow(clippy::too_many_arguments)]
fn assemble_round(
    request: &RoundRequest,
    seed: String,
    config: GradeConfig,
    wheel: &Wheel,
    selection: &Selection,
    board: Board,
    lookup: &HashMap<&str, &WordEntry>,
    summary: &FreshnessSummary,
    fresh_crossword_available: bool,
) -> Round {
    let words: Vec<WordMeta> = board
        .words
        .iter()
        .map(|p| {
            let entry: Option<&&WordEntry> = lookup.get(p.text.as_str());
            WordMeta {
                id: p.id,
                text: p.text.clone(),
                clue: entry
                    .map(|e| e.clue.clone())
                    .filter(|c| !c.is_empty())
                    .unwrap_or_else(|| DEFAULT_CLUE.to_string()),
                labels: entry.map(|e| e.labels.clone()).unwrap_or_default(),
                primary_theme_id: entry
                    .map(|e| e.primary_theme_id.clone())
                    .unwrap_or_default(),
            }
        })
        .collect();

    let mut valid_words: Vec<String> = board.words.iter().map(|p| p.text.clone()).collect();
    valid_words.sort_unstable();
    let word_lookup: BTreeMap<String, usize> = board
        .words
        .iter()
        .map(|p| (p.text.clone(), p.id))
        .collect();

    let theme: Option<Theme> = request.theme_id.map(|id| {
        request.pool.theme(id).cloned().unwrap_or_else(|| Theme {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
        })
    });

    let stats: SelectionStats = selection.stats;
    let word_pool_meta: WordPoolMeta = WordPoolMeta {
        grade_pool_size: request.pool.len(),
        recent_word_reuse_blocked: stats.recent_word_reuse_blocked,
        fresh_crossword_available,
        freshness_fallback_used: stats.freshness_fallback_used,
        fresh_words_used: summary.fresh_words_used,
        reused_words_used: summary.reused_words_used,
        recent_words_used: summary.recent_words_used,
        max_word_usage_in_board: summary.max_word_usage_in_board,
        total_word_usage_in_board: summary.total_word_usage_in_board,
        board_word_count: summary.board_word_count,
        seen_words_count: request.freshness.seen_count(),
        recent_words_count: request.freshness.recent_count(),
    };

    Round {
        seed,
        grade: request.grade,
        round_index: request.round_index,
        wheel_letters: wheel
            .letters
            .iter()
            .map(char::to_ascii_uppercase)
            .collect(),
        board,
        words,
        valid_words,
        word_lookup,
        theme,
        config,
        word_pool_meta,
    }
}

/// Generate a round.
///
/// The result only depends on the request: the same request always produces the same round.
///
/// # Errors
///
/// The function returns an error if the pool (or the theme) has no words, or if no valid round
/// is found after [`MAX_ROUND_ATTEMPTS`] attempts.
pub fn generate_round(request: &RoundRequest) -> Result<Round, RoundError> {
    let source: &[WordEntry] = match request.theme_id {
        Some(theme_id) => request.pool.theme_entries(theme_id),
        None => &request.pool.entries,
    };
    if source.is_empty() {
        return Err(RoundError::EmptyPool(request.grade));
    }

    let lookup: HashMap<&str, &WordEntry> = source.iter().map(|e| (e.word.as_str(), e)).collect();
    let freshness: &Freshness = request.freshness;
    let mut search: BestRound<Round> = BestRound::default();

    for attempt in 0..MAX_ROUND_ATTEMPTS {
        let seed: String = request.seed(attempt);
        let mut rng: Mulberry32 = Mulberry32::from_seed_str(&seed);
        let config: GradeConfig = request.config.relaxed(attempt / RELAX_INTERVAL);

        let wheel: Wheel = match pick_wheel_letters(source, &config, &mut rng, freshness) {
            Ok(w) => w,
            Err(e) => {
                debug!("Attempt {attempt}: {e}");
                continue;
            }
        };

        let fresh: Vec<&WordEntry> = wheel
            .buildable
            .iter()
            .copied()
            .filter(|e| !freshness.is_seen(&e.word))
            .collect();
        let fresh_crossword_available: bool =
            has_connected_component_at_least(&fresh, config.min_board_words);
        let selection_source: &[&WordEntry] = if fresh_crossword_available {
            &fresh
        } else {
            &wheel.buildable
        };

        let selection: Selection =
            select_board_words(selection_source, &config, &mut rng, freshness);
        if selection.words.len() < config.min_board_words {
            continue;
        }

        let texts: Vec<&str> = selection.words.iter().map(|e| e.word.as_str()).collect();
        let board: Board = match build_crossword(&texts, config.min_board_words, &mut rng) {
            Ok(b) => b,
            Err(e) => {
                debug!("Attempt {attempt}: {e}");
                continue;
            }
        };

        // Reject words from other themes
        if let Some(theme_id) = request.theme_id
            && board.words.iter().any(|p| {
                lookup
                    .get(p.text.as_str())
                    .map(|e| e.primary_theme_id.as_str())
                    != Some(theme_id)
            })
        {
            continue;
        }

        let summary: FreshnessSummary =
            FreshnessSummary::of_words(board.words.iter().map(|p| p.text.as_str()), freshness);
        let round: Round = assemble_round(
            request,
            seed,
            config,
            &wheel,
            &selection,
            board,
            &lookup,
            &summary,
            fresh_crossword_available,
        );

        if search.offer(attempt, summary, round) {
            debug!("Attempt {attempt}: search stopped");
            break;
        }
    }

    match search.into_best() {
        Some(round) => {
            log_round(&round);
            Ok(round)
        }
        None => Err(RoundError::Exhausted(request.grade)),
    }
}

fn log_round(round: &Round) {
    if log_enabled!(Level::Debug) {
        debug!(
            "Round {}: wheel {}, words {:?}, {} fresh, {} reused",
            round.seed,
            round.wheel_letters.iter().collect::<String>(),
            round.valid_words,
            round.word_pool_meta.fresh_words_used,
            round.word_pool_meta.reused_words_used
        );
        for line in round.board.to_string().lines() {
            debug!("    {line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(words: &[&str]) -> Vec<WordEntry> {
        words
            .iter()
            .map(|w| WordEntry::new(w, "clue", "everyday-life", 1))
            .collect()
    }

    #[test]
    fn connected_components() {
        let pool: Vec<WordEntry> = entries(&["cat", "dog", "god", "bib"]);
        let refs: Vec<&WordEntry> = pool.iter().collect();
        assert!(has_connected_component_at_least(&refs, 2));
        assert!(!has_connected_component_at_least(&refs, 3));
        assert!(has_connected_component_at_least(&refs, 1));
        assert!(!has_connected_component_at_least(&[], 1));
        assert!(has_connected_component_at_least(&refs[..1], 0));
    }

    #[test]
    fn summary_order() {
        let freshness: Freshness =
            Freshness::new(["cat", "car"], ["cat"], [("cat", 3), ("car", 1)]);
        let a: FreshnessSummary = FreshnessSummary::of_words(["tar", "rat", "car"], &freshness);
        let b: FreshnessSummary = FreshnessSummary::of_words(["tar", "rat", "cat"], &freshness);
        let c: FreshnessSummary = FreshnessSummary::of_words(["tar", "rat"], &freshness);

        assert_eq!(a.fresh_words_used, 2);
        assert_eq!(a.reused_words_used, 1);
        assert_eq!(b.recent_words_used, 1);
        assert_eq!(b.max_word_usage_in_board, 3);
        assert!(a.is_better_than(&b));
        assert!(!b.is_better_than(&a));
        // Same number of unseen words, but no reused word
        assert!(c.is_better_than(&a));
        assert!(c.is_perfect());
        assert!(!a.is_better_than(&a));
    }

    #[test]
    fn perfect_candidate_ends_the_search() {
        let freshness: Freshness = Freshness::new(["cat"], ["cat"], [("cat", 1)]);
        let reused: FreshnessSummary = FreshnessSummary::of_words(["cat", "tar"], &freshness);
        let perfect: FreshnessSummary = FreshnessSummary::of_words(["rat"], &freshness);

        let mut search: BestRound<&str> = BestRound::default();
        assert!(!search.offer(0, reused, "first"));
        assert!(search.offer(1, perfect, "perfect"));
        assert_eq!(search.into_best(), Some("perfect"));
    }

    #[test]
    fn search_stops_after_the_improvement_window() {
        let freshness: Freshness = Freshness::new(["cat", "car"], ["car"], [("car", 2)]);
        let worse: FreshnessSummary = FreshnessSummary::of_words(["car", "tar"], &freshness);
        let better: FreshnessSummary = FreshnessSummary::of_words(["cat", "tar"], &freshness);

        let mut search: BestRound<usize> = BestRound::default();
        assert!(!search.offer(5, worse, 5));
        assert!(!search.offer(6, better, 6));
        // Not strictly better: the earlier candidate is kept
        assert!(!search.offer(7, better, 7));
        for attempt in 8..(5 + IMPROVEMENT_WINDOW) {
            assert!(!search.offer(attempt, worse, attempt));
        }
        assert!(search.offer(5 + IMPROVEMENT_WINDOW, worse, 29));
        assert_eq!(search.into_best(), Some(6));
    }

    #[test]
    fn empty_search_has_no_best() {
        let search: BestRound<Round> = BestRound::default();
        assert!(search.into_best().is_none());
    }

    #[test]
    fn seed_string() {
        let pool: WordPool = WordPool::default();
        let config: GradeConfig = GradeConfig::for_grade(2).unwrap();
        let freshness: Freshness = Freshness::default();
        let request: RoundRequest = RoundRequest::new(4, 1000, &pool, &config, &freshness);
        assert_eq!(request.seed(7), "2-4-1000-7");
        assert_eq!(generate_round(&request), Err(RoundError::EmptyPool(2)));
        assert_eq!(
            generate_round(&request.with_theme("animals")),
            Err(RoundError::EmptyPool(2))
        );
    }
}
