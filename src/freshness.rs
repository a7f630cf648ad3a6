/*
freshness.rs

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

//! Remember the words the player has already seen.
//!
//! The caller owns a [`FreshnessMemory`] object per grade, and updates it with the words of every
//! completed round.
//! Before generating a round, the caller takes a [`Freshness`] snapshot of that memory.
//! The generator only reads the snapshot; it never updates the memory.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use strum_macros::FromRepr;

use crate::generator::letter_set::normalize_word;

/// Size of the recent word window when the grade has no specific value.
const DEFAULT_RECENT_WINDOW: usize = 32;

/// Size of the recent word window for the given grade.
pub fn recent_window(grade: u8) -> usize {
    match grade {
        1 => 28,
        2 => 30,
        3 => 34,
        4 => 38,
        5 => 42,
        _ => DEFAULT_RECENT_WINDOW,
    }
}

/// Freshness classification of a word.
///
/// The generator always prefers the lowest tier available.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, FromRepr,
)]
#[repr(usize)]
pub enum FreshnessTier {
    /// The word has never been seen.
    Unseen = 0,
    /// The word has been seen, but not recently.
    Seen = 1,
    /// The word is in the recent window.
    Recent = 2,
}

/// Number of freshness tiers.
pub const NUM_TIERS: usize = 3;

/// Per-grade word memory, owned by the caller.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FreshnessMemory {
    /// Every word seen during the session.
    pub seen_words: HashSet<String>,

    /// Most recent words, the most recent last.
    pub recent_words: VecDeque<String>,

    /// Number of rounds each word was used in.
    pub word_use_counts: HashMap<String, usize>,

    /// Maximum length of [`FreshnessMemory::recent_words`].
    window: usize,
}

impl FreshnessMemory {
    /// Create an empty memory for the given grade.
    pub fn new(grade: u8) -> Self {
        Self::with_window(recent_window(grade))
    }

    /// Create an empty memory with a specific recent window size.
    pub fn with_window(window: usize) -> Self {
        Self {
            seen_words: HashSet::new(),
            recent_words: VecDeque::with_capacity(window + 1),
            word_use_counts: HashMap::new(),
            window,
        }
    }

    /// Size of the recent window.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Forget everything (new session or new grade).
    pub fn reset(&mut self) {
        self.seen_words.clear();
        self.recent_words.clear();
        self.word_use_counts.clear();
    }

    /// Record the words of a completed round.
    pub fn remember_round_words<S: AsRef<str>>(&mut self, words: &[S]) {
        for raw in words {
            let word: String = raw.as_ref().to_lowercase();
            if word.is_empty() {
                continue;
            }
            self.recent_words.retain(|w| *w != word);
            self.recent_words.push_back(word.clone());
            *self.word_use_counts.entry(word.clone()).or_insert(0) += 1;
            self.seen_words.insert(word);
        }
        while self.recent_words.len() > self.window {
            self.recent_words.pop_front();
        }
        debug!(
            "Word memory: {} seen, {} recent",
            self.seen_words.len(),
            self.recent_words.len()
        );
    }

    /// Take a read-only snapshot for the generator.
    pub fn snapshot(&self) -> Freshness {
        Freshness::new(
            self.seen_words.iter(),
            self.recent_words.iter(),
            self.word_use_counts.iter().map(|(w, c)| (w, *c)),
        )
    }
}

/// Read-only freshness hints used by the generator.
///
/// All the words are normalized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Freshness {
    seen: HashSet<String>,
    recent: HashSet<String>,
    usage: HashMap<String, usize>,
}

impl Freshness {
    /// Build the hints from seen words, recent words, and use counts.
    pub fn new<S, R, U, A, B, C>(seen: S, recent: R, usage: U) -> Self
    where
        S: IntoIterator<Item = A>,
        R: IntoIterator<Item = B>,
        U: IntoIterator<Item = (C, usize)>,
        A: AsRef<str>,
        B: AsRef<str>,
        C: AsRef<str>,
    {
        let normalized = |w: &str| Some(normalize_word(w)).filter(|n| !n.is_empty());
        Self {
            seen: seen
                .into_iter()
                .filter_map(|w| normalized(w.as_ref()))
                .collect(),
            recent: recent
                .into_iter()
                .filter_map(|w| normalized(w.as_ref()))
                .collect(),
            usage: usage
                .into_iter()
                .filter_map(|(w, c)| normalized(w.as_ref()).map(|n| (n, c)))
                .collect(),
        }
    }

    /// Whether the word has been seen.
    pub fn is_seen(&self, word: &str) -> bool {
        self.seen.contains(word)
    }

    /// Whether the word is in the recent window.
    pub fn is_recent(&self, word: &str) -> bool {
        self.recent.contains(word)
    }

    /// Number of rounds the word has been used in.
    pub fn usage(&self, word: &str) -> usize {
        self.usage.get(word).copied().unwrap_or(0)
    }

    /// Freshness tier of the word.
    pub fn tier(&self, word: &str) -> FreshnessTier {
        if !self.is_seen(word) {
            FreshnessTier::Unseen
        } else if !self.is_recent(word) {
            FreshnessTier::Seen
        } else {
            FreshnessTier::Recent
        }
    }

    /// Number of seen words.
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    /// Number of recent words.
    pub fn recent_count(&self) -> usize {
        self.recent.len()
    }
}
