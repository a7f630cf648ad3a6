/*
cli_options.rs

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

//! Process command-line options.
//!
//! These options are intended for developers working on the word pools.
//! In command-line mode, Wordwheel generates rounds from a pool and prints them, or verifies
//! that every eligible theme of a pool produces valid rounds.
//!
//! # Examples
//!
//! List the themes of the grade 1 pool:
//!
//! ```
//! $ wordwheel --ls -g 1
//! everyday-life (53 words): Everyday life
//! animals (56 words): Animals
//! nature (30 words): Nature
//! ```
//!
//! Generate two rounds for grade 1, with a fixed session salt:
//!
//! ```
//! $ wordwheel -g 1 -c 2 -S 1000
//! Round 0 (seed 1-0-1000-0)
//! Wheel: S T A R E N O
//! STONE
//! ..A..
//! ..R..
//! ...
//! ```
//!
//! Verify 100 themed rounds for every grade:
//!
//! ```
//! $ wordwheel --validate -c 100
//! ```

use clap::Parser;
use log::debug;
use rand::Rng;
use std::collections::HashSet;
use std::env;
use std::path::PathBuf;
use std::time::Instant;

use wordwheel::freshness::{Freshness, FreshnessMemory};
use wordwheel::generator::round::{Round, RoundError, RoundRequest, generate_round};
use wordwheel::generator::validate::{check_board, check_round};
use wordwheel::grade_config::{GradeConfig, MAX_GRADE, MIN_GRADE};
use wordwheel::pool::{PoolCache, PoolError, Theme, WordPool};

/// Session salt used by the validation sweep.
const VALIDATION_SALT: u64 = 732455;

/// Generate word wheel rounds for developers.
#[derive(Parser)]
#[command(about, long_about = None, version)]
struct Args {
    /// List the themes of the pool
    #[arg(short, long, default_value_t = false)]
    ls: bool,

    /// Word pool file (JSON). By default, the grade<N>.json file from the data directory is used
    #[arg(short, long)]
    pool: Option<PathBuf>,

    /// Directory that contains the grade<N>.json pool files
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Grade (1 to 5). The validation sweep uses all the grades when not set
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=5))]
    grade: Option<u8>,

    /// Number of rounds to generate
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Session salt. A random salt is used when not set
    #[arg(short = 'S', long)]
    salt: Option<u64>,

    /// Only use the words of that theme
    #[arg(short, long)]
    theme: Option<String>,

    /// Print the rounds in JSON
    #[arg(short, long, default_value_t = false)]
    json: bool,

    /// Generate rounds for every eligible theme and verify them
    #[arg(long, default_value_t = false)]
    validate: bool,

    /// Print some statistics after generating the rounds
    #[arg(short, long, default_value_t = false)]
    summary: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Generation statistics.
#[derive(Default)]
struct Stats {
    rounds: usize,
    errors: usize,
    total: f32,
    max: f32,
    fresh_words: usize,
    reused_words: usize,
}

impl Stats {
    fn record(&mut self, duration: f32) {
        self.total += duration;
        if duration > self.max {
            self.max = duration;
        }
    }

    fn print(&self) {
        let count: f32 = (self.rounds + self.errors).max(1) as f32;
        println!(
            "
        total time = {}s
      average time = {}s
          max time = {}s
            rounds = {}
       fresh words = {}
      reused words = {}
            errors = {}",
            self.total,
            self.total / count,
            self.max,
            self.rounds,
            self.fresh_words,
            self.reused_words,
            self.errors
        );
    }
}

/// Load the pool for the grade, from the `--pool` file or from the data directory, and check
/// that it is large enough for the grade.
fn load_pool(args: &Args, cache: &mut PoolCache, grade: u8) -> Result<WordPool, PoolError> {
    let pool: WordPool = match &args.pool {
        Some(path) => WordPool::from_file(grade, path)?,
        None => cache.get_or_load(grade)?.clone(),
    };
    // The grade is range-checked by the argument parser
    if let Ok(config) = GradeConfig::for_grade(grade) {
        pool.validate_for(&config)?;
    }
    Ok(pool)
}

/// Print a round in text format.
fn print_round(round: &Round) {
    println!("Round {} (seed {})", round.round_index, round.seed);
    if let Some(theme) = &round.theme {
        println!("Theme: {} ({})", theme.title, theme.id);
    }
    let wheel: Vec<String> = round.wheel_letters.iter().map(char::to_string).collect();
    println!("Wheel: {}", wheel.join(" "));
    print!("{}", round.board);
    for word in &round.words {
        println!("  {:>2} {:<10} {}", word.id, word.text, word.clue);
    }
    println!();
}

/// Generate the requested rounds, updating the word memory after each round.
///
/// Return an error message when the pool cannot produce any round.
fn generate(args: &Args, pool: &WordPool, grade: u8, salt: u64) -> Result<Stats, String> {
    let base: GradeConfig = GradeConfig::for_grade(grade).map_err(|e| e.to_string())?;
    let mut memory: FreshnessMemory = FreshnessMemory::new(grade);
    let mut stats: Stats = Stats::default();

    for round_index in 0..args.count {
        debug!("Round {round_index}");
        let config: GradeConfig = base.round_config(round_index);
        let freshness: Freshness = memory.snapshot();
        let mut request: RoundRequest =
            RoundRequest::new(round_index, salt, pool, &config, &freshness);
        if let Some(theme_id) = args.theme.as_deref() {
            request = request.with_theme(theme_id);
        }

        let start: Instant = Instant::now();
        let round: Round = match generate_round(&request) {
            Ok(r) => r,
            Err(e @ RoundError::EmptyPool(_)) => return Err(e.to_string()),
            Err(e) => {
                stats.errors += 1;
                eprintln!("Round {round_index}: {e}");
                continue;
            }
        };
        stats.record(start.elapsed().as_secs_f32());
        stats.rounds += 1;
        stats.fresh_words += round.word_pool_meta.fresh_words_used;
        stats.reused_words += round.word_pool_meta.reused_words_used;

        memory.remember_round_words(&round.valid_words);

        if args.json {
            match serde_json::to_string_pretty(&round) {
                Ok(s) => println!("{s}"),
                Err(e) => eprintln!("Cannot serialize round {round_index}: {e}"),
            }
        } else {
            print_round(&round);
        }
    }
    Ok(stats)
}

/// Generate themed rounds for every eligible theme of the grade pool, and verify them.
///
/// Return an error message on the first invalid round.
fn validate_grade(
    pool: &WordPool,
    grade: u8,
    count: usize,
    stats: &mut Stats,
) -> Result<(), String> {
    let config: GradeConfig = GradeConfig::for_grade(grade).map_err(|e| e.to_string())?;
    let pool_words: HashSet<String> = pool.word_set();
    let themes: Vec<&Theme> = pool.eligible_themes(&config);
    if themes.is_empty() {
        return Err(format!("No eligible themes found for grade {grade}"));
    }
    println!("Validating grade {grade} with {count} rounds...");

    let freshness: Freshness = Freshness::default();
    for i in 0..count {
        let theme: &Theme = themes[i % themes.len()];
        let request: RoundRequest =
            RoundRequest::new(i, VALIDATION_SALT, pool, &config, &freshness).with_theme(&theme.id);

        let start: Instant = Instant::now();
        let round: Round =
            generate_round(&request).map_err(|e| format!("Grade {grade}, round {i}: {e}"))?;
        stats.record(start.elapsed().as_secs_f32());
        stats.rounds += 1;

        check_round(&round, &pool_words)
            .and_then(|()| check_board(&round.board))
            .map_err(|e| {
                format!("Invalid round generated for grade {grade} at index {i}: {e}")
            })?;
        if round.words.iter().any(|w| w.primary_theme_id != theme.id) {
            return Err(format!(
                "Theme leakage in grade {grade}, round {i}: expected all words in theme '{}'",
                theme.id
            ));
        }

        if (i + 1) % 25 == 0 || i + 1 == count {
            println!("Grade {grade}: {}/{count}", i + 1);
        }
    }
    Ok(())
}

/// Parse and process command-line options.
///
/// Return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        println!("DEBUG");
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    let mut cache: PoolCache = PoolCache::new(args.data_dir.clone());

    //
    // Validation sweep
    //
    if args.validate {
        let grades: Vec<u8> = match args.grade {
            Some(g) => vec![g],
            None => (MIN_GRADE..=MAX_GRADE).collect(),
        };
        let mut stats: Stats = Stats::default();
        for grade in grades {
            let result: Result<(), String> = load_pool(&args, &mut cache, grade)
                .map_err(|e| e.to_string())
                .and_then(|pool| validate_grade(&pool, grade, args.count, &mut stats));
            if let Err(msg) = result {
                eprintln!("Error: {msg}");
                return 1;
            }
            cache.invalidate(grade);
        }
        if args.summary {
            stats.print();
        }
        println!("All procedural generation checks passed.");
        return 0;
    }

    let grade: u8 = args.grade.unwrap_or(MIN_GRADE);
    let pool: WordPool = match load_pool(&args, &mut cache, grade) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };

    //
    // List the themes
    //
    if args.ls {
        for theme in &pool.themes {
            println!(
                "{} ({} words): {}",
                theme.id,
                pool.theme_entries(&theme.id).len(),
                theme.title
            );
        }
        return 0;
    }

    //
    // Generate the rounds
    //
    let salt: u64 = args.salt.unwrap_or_else(|| rand::rng().random());
    debug!("Session salt {salt}");
    match generate(&args, &pool, grade, salt) {
        Ok(stats) => {
            if args.summary {
                stats.print();
            }
            if stats.errors > 0 { 1 } else { 0 }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}
