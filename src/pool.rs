/*
pool.rs

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

//! Load the word pools.
//!
//! A pool file is a JSON document with the following structure:
//!
//! ```json
//! {
//!   "grade": 1,
//!   "themes": [{"id": "animals", "title": "Animals", "description": "Furry friends"}],
//!   "words": [{"word": "cat", "clue": "A pet that purrs", "labels": ["animals"]}]
//! }
//! ```
//!
//! Loading the file produces a [`WordPool`] object: the words are normalized and deduplicated,
//! and each word gets a primary theme and a frequency band.
//! A [`PoolCache`] object keeps the pools already loaded.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use thiserror::Error;

use crate::generator::letter_set::normalize_word;
use crate::grade_config::GradeConfig;

/// Theme used when a word has no valid label.
pub const FALLBACK_THEME_ID: &str = "everyday-life";

/// Clue used when a word comes without one.
pub const DEFAULT_CLUE: &str = "A common everyday word.";

/// A theme must have at least that many words to be used for themed rounds.
const MIN_THEME_ENTRIES: usize = 20;

/// A pool must hold that many words for each target word of its grade.
pub const WORDS_PER_TARGET: usize = 4;

/// Type of errors.
#[derive(Error, Debug)]
pub enum PoolError {
    /// The pool file cannot be read.
    #[error("cannot read the grade {grade} pool: {source}")]
    Io {
        grade: u8,
        #[source]
        source: std::io::Error,
    },

    /// The pool file is not valid JSON.
    #[error("invalid grade {grade} pool: {source}")]
    Json {
        grade: u8,
        #[source]
        source: serde_json::Error,
    },

    /// The JSON document does not have the expected structure.
    #[error("invalid grade{grade}.json schema: {reason}")]
    Schema { grade: u8, reason: String },

    /// No usable word in the pool.
    #[error("no pool entries available for grade {0}")]
    Empty(u8),

    /// Not enough words in the pool.
    #[error("grade {grade} pool has {found} words, at least {required} are required")]
    TooSmall {
        grade: u8,
        found: usize,
        required: usize,
    },
}

/// Word frequency band, derived from the word length.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyBand {
    High,
    Medium,
    Low,
}

impl FrequencyBand {
    /// Short words are the most frequent.
    pub fn from_word(word: &str) -> Self {
        match word.len() {
            0..=4 => FrequencyBand::High,
            5..=6 => FrequencyBand::Medium,
            _ => FrequencyBand::Low,
        }
    }
}

/// Theme description.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Theme {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// A word from the pool.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    /// Normalized word (lowercase, `a` to `z` only). Unique in the pool.
    pub word: String,

    /// Clue displayed to the player.
    pub clue: String,

    /// Theme identifiers.
    pub labels: Vec<String>,

    /// Main theme of the word.
    pub primary_theme_id: String,

    /// Grade of the pool the word comes from.
    pub grade: u8,

    /// Generic tags: `core`, `grade-N`, and the labels.
    pub tags: Vec<String>,

    pub frequency_band: FrequencyBand,
}

impl WordEntry {
    /// Create an entry with a single theme. The word is normalized.
    pub fn new(word: &str, clue: &str, theme_id: &str, grade: u8) -> Self {
        let word: String = normalize_word(word);
        Self {
            frequency_band: FrequencyBand::from_word(&word),
            word,
            clue: clue.to_string(),
            labels: vec![theme_id.to_string()],
            primary_theme_id: theme_id.to_string(),
            grade,
            tags: vec![
                "core".to_string(),
                format!("grade-{grade}"),
                theme_id.to_string(),
            ],
        }
    }
}

/// Word record as found in the pool file.
#[derive(Deserialize, Debug, Default)]
struct RawWord {
    #[serde(default)]
    word: Option<String>,
    #[serde(default)]
    clue: Option<String>,
    #[serde(default)]
    labels: Option<Vec<serde_json::Value>>,
}

/// Pool file.
#[derive(Deserialize, Debug)]
struct RawPool {
    #[serde(default)]
    themes: Option<Vec<Theme>>,
    #[serde(default)]
    words: Option<Vec<RawWord>>,
}

/// Word pool for a grade.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct WordPool {
    pub grade: u8,

    /// Normalized, deduplicated words.
    pub entries: Vec<WordEntry>,

    /// Themes declared in the pool file.
    pub themes: Vec<Theme>,

    /// Words grouped by primary theme. Every declared theme has an entry.
    pub theme_index: HashMap<String, Vec<WordEntry>>,
}

impl WordPool {
    /// Build a pool from a list of entries, for example to generate a round from a custom word
    /// list.
    pub fn from_entries(grade: u8, themes: Vec<Theme>, entries: Vec<WordEntry>) -> Self {
        let mut theme_index: HashMap<String, Vec<WordEntry>> = themes
            .iter()
            .map(|t| (t.id.clone(), Vec::new()))
            .collect();
        let mut unique: HashSet<String> = HashSet::with_capacity(entries.len());
        let mut kept: Vec<WordEntry> = Vec::with_capacity(entries.len());

        for entry in entries {
            if entry.word.is_empty() || !unique.insert(entry.word.clone()) {
                continue;
            }
            theme_index
                .entry(entry.primary_theme_id.clone())
                .or_default()
                .push(entry.clone());
            kept.push(entry);
        }

        Self {
            grade,
            entries: kept,
            themes,
            theme_index,
        }
    }

    /// Parse the JSON pool document.
    ///
    /// # Errors
    ///
    /// The method returns an error if the document is not valid JSON, if the `themes` or `words`
    /// arrays are missing, or if the pool has no usable words.
    pub fn from_json_str(grade: u8, json: &str) -> Result<Self, PoolError> {
        let raw: RawPool =
            serde_json::from_str(json).map_err(|source| PoolError::Json { grade, source })?;
        Self::from_raw(grade, raw)
    }

    /// Read and parse a JSON pool file.
    pub fn from_file(grade: u8, path: &std::path::Path) -> Result<Self, PoolError> {
        debug!("Loading grade {grade} pool from {path:?}");
        let file: File = File::open(path).map_err(|source| PoolError::Io { grade, source })?;
        let raw: RawPool = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| PoolError::Json { grade, source })?;
        Self::from_raw(grade, raw)
    }

    fn from_raw(grade: u8, raw: RawPool) -> Result<Self, PoolError> {
        let (Some(raw_themes), Some(raw_words)) = (raw.themes, raw.words) else {
            return Err(PoolError::Schema {
                grade,
                reason: "expected { grade, themes, words }".to_string(),
            });
        };

        let themes: Vec<Theme> = raw_themes
            .into_iter()
            .map(|t| Theme {
                id: t.id.trim().to_string(),
                title: t.title.trim().to_string(),
                description: t.description.trim().to_string(),
            })
            .filter(|t| !t.id.is_empty())
            .collect();
        let theme_ids: HashSet<&str> = themes.iter().map(|t| t.id.as_str()).collect();
        let fallback: Option<&str> = themes
            .iter()
            .find(|t| t.id == FALLBACK_THEME_ID)
            .or(themes.first())
            .map(|t| t.id.as_str());

        let mut entries: Vec<WordEntry> = Vec::with_capacity(raw_words.len());
        for raw_word in raw_words {
            let word: String = normalize_word(raw_word.word.as_deref().unwrap_or(""));
            if word.is_empty() {
                continue;
            }

            let mut labels: Vec<String> = Vec::new();
            for label in raw_word.labels.unwrap_or_default() {
                let label: String = match label {
                    serde_json::Value::String(s) => s.trim().to_string(),
                    serde_json::Value::Number(n) => n.to_string(),
                    _ => continue,
                };
                if theme_ids.contains(label.as_str()) && !labels.contains(&label) {
                    labels.push(label);
                }
            }
            if labels.is_empty()
                && let Some(f) = fallback
            {
                labels.push(f.to_string());
            }

            let primary_theme_id: String = labels
                .iter()
                .find(|l| *l != FALLBACK_THEME_ID)
                .or(labels.first())
                .map(String::as_str)
                .or(fallback)
                .unwrap_or(FALLBACK_THEME_ID)
                .to_string();

            let clue: String = match raw_word.clue.as_deref().map(str::trim) {
                Some(c) if !c.is_empty() => c.to_string(),
                _ => DEFAULT_CLUE.to_string(),
            };

            let mut tags: Vec<String> = vec!["core".to_string(), format!("grade-{grade}")];
            tags.extend(labels.iter().cloned());

            entries.push(WordEntry {
                frequency_band: FrequencyBand::from_word(&word),
                word,
                clue,
                labels,
                primary_theme_id,
                grade,
                tags,
            });
        }

        let pool: WordPool = Self::from_entries(grade, themes, entries);
        if pool.entries.is_empty() {
            return Err(PoolError::Empty(grade));
        }
        debug!(
            "Grade {grade} pool: {} words, {} themes",
            pool.entries.len(),
            pool.themes.len()
        );
        Ok(pool)
    }

    /// Verify that the pool has enough words.
    pub fn validate(&self, min_size: usize) -> Result<(), PoolError> {
        if self.entries.is_empty() {
            return Err(PoolError::Empty(self.grade));
        }
        if self.entries.len() < min_size {
            return Err(PoolError::TooSmall {
                grade: self.grade,
                found: self.entries.len(),
                required: min_size,
            });
        }
        Ok(())
    }

    /// Verify that the pool has enough words for rounds with the given parameters.
    pub fn validate_for(&self, config: &GradeConfig) -> Result<(), PoolError> {
        self.validate(config.target_words * WORDS_PER_TARGET)
    }

    /// Number of words in the pool.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Words whose primary theme is the given theme.
    pub fn theme_entries(&self, theme_id: &str) -> &[WordEntry] {
        self.theme_index
            .get(theme_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Theme with the given identifier.
    pub fn theme(&self, theme_id: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.id == theme_id)
    }

    /// Set of the words in the pool.
    pub fn word_set(&self) -> HashSet<String> {
        self.entries.iter().map(|e| e.word.clone()).collect()
    }

    /// Themes with enough words for generating themed rounds with the given configuration.
    pub fn eligible_themes(&self, config: &GradeConfig) -> Vec<&Theme> {
        let required: usize = MIN_THEME_ENTRIES.max(config.target_words * 4);
        self.themes
            .iter()
            .filter(|t| self.theme_entries(&t.id).len() >= required)
            .collect()
    }
}

/// Cache for the pools already loaded.
///
/// Pool files are named `grade<N>.json` in the data directory.
pub struct PoolCache {
    /// Directory that contains the pool files.
    data_dir: PathBuf,

    /// Loaded pools, by grade.
    pools: HashMap<u8, WordPool>,
}

impl PoolCache {
    /// Create a [`PoolCache`] object for the given data directory.
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            pools: HashMap::new(),
        }
    }

    /// Path of the pool file for the grade.
    pub fn pool_path(&self, grade: u8) -> PathBuf {
        self.data_dir.join(format!("grade{grade}.json"))
    }

    /// Return the pool for the grade, loading it if needed.
    pub fn get_or_load(&mut self, grade: u8) -> Result<&WordPool, PoolError> {
        if !self.pools.contains_key(&grade) {
            let pool: WordPool = WordPool::from_file(grade, &self.pool_path(grade))?;
            self.pools.insert(grade, pool);
        }
        self.pools.get(&grade).ok_or(PoolError::Empty(grade))
    }

    /// Whether the pool for the grade is loaded.
    pub fn is_loaded(&self, grade: u8) -> bool {
        self.pools.contains_key(&grade)
    }

    /// Drop the pool for the grade. It is loaded again on next use.
    pub fn invalidate(&mut self, grade: u8) {
        self.pools.remove(&grade);
    }

    /// Drop all the pools.
    pub fn clear(&mut self) {
        self.pools.clear();
    }
}
