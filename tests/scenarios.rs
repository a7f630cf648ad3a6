use std::collections::HashSet;

use wordwheel::freshness::Freshness;
use wordwheel::generator::letter_set::LetterCounts;
use wordwheel::generator::round::{Round, RoundRequest, generate_round};
use wordwheel::generator::validate::{check_board, validate_generated_round};
use wordwheel::grade_config::GradeConfig;
use wordwheel::pool::{Theme, WordEntry, WordPool};

fn pool(words: &[&str]) -> WordPool {
    let themes: Vec<Theme> = vec![Theme {
        id: "everyday-life".to_string(),
        title: "Everyday life".to_string(),
        description: String::new(),
    }];
    let entries: Vec<WordEntry> = words
        .iter()
        .map(|w| WordEntry::new(w, "", "everyday-life", 1))
        .collect();
    WordPool::from_entries(1, themes, entries)
}

fn small_config() -> GradeConfig {
    GradeConfig {
        wheel_size: 5,
        min_word_length: 3,
        max_word_length: 3,
        target_words: 3,
        min_board_words: 3,
        max_letter_repeat: 2,
        ..GradeConfig::for_grade(1).expect("grade exists")
    }
}

#[test]
fn three_letter_words_cross() {
    let pool: WordPool = pool(&["cat", "car", "art", "tar", "rat"]);
    let config: GradeConfig = small_config();
    let freshness: Freshness = Freshness::default();
    let request: RoundRequest = RoundRequest::new(0, 1000, &pool, &config, &freshness);
    let round: Round = generate_round(&request).expect("round generated");

    assert!(round.seed.starts_with("1-0-1000-"));
    assert_eq!(round.wheel_letters.len(), 5);
    let wheel: LetterCounts = round.wheel_counts();
    for letter in ['a', 'r', 't'] {
        assert!(wheel.contains(letter), "{letter} missing from the wheel");
    }

    assert!(round.board.words.len() >= 3);
    assert!(round.board.cells.iter().any(|c| c.owners.len() > 1));
    assert_eq!(check_board(&round.board), Ok(()));
    assert!(validate_generated_round(&round, &pool.word_set()));

    // Missing clues get the default one
    assert!(
        round
            .words
            .iter()
            .all(|w| w.clue == wordwheel::pool::DEFAULT_CLUE)
    );
    assert_eq!(generate_round(&request), Ok(round));
}

#[test]
fn recent_word_is_left_out() {
    let pool: WordPool = pool(&["cat", "car", "art", "tar", "rat"]);
    let config: GradeConfig = small_config();
    let freshness: Freshness = Freshness::new(["cat"], ["cat"], [("cat", 1)]);

    for round_index in 0..10 {
        let request: RoundRequest =
            RoundRequest::new(round_index, 1000, &pool, &config, &freshness);
        let round: Round = generate_round(&request).expect("round generated");
        assert!(
            !round.valid_words.iter().any(|w| w == "cat"),
            "round {round_index} uses 'cat': {:?}",
            round.valid_words
        );
        assert!(round.word_pool_meta.fresh_crossword_available);
        assert_eq!(
            round.word_pool_meta.fresh_words_used,
            round.board.words.len()
        );
        assert_eq!(round.word_pool_meta.seen_words_count, 1);
        assert_eq!(round.word_pool_meta.recent_words_count, 1);
    }
}

#[test]
fn repeated_letters_respect_the_limit() {
    let pool: WordPool = pool(&[
        "tomato", "atom", "moat", "mat", "tam", "oat", "tom", "mot",
    ]);
    let config: GradeConfig = GradeConfig {
        wheel_size: 6,
        min_word_length: 3,
        max_word_length: 6,
        target_words: 3,
        min_board_words: 3,
        max_letter_repeat: 1,
        ..GradeConfig::for_grade(1).expect("grade exists")
    };
    let freshness: Freshness = Freshness::default();

    for round_index in 0..10 {
        let request: RoundRequest =
            RoundRequest::new(round_index, 5, &pool, &config, &freshness);
        let round: Round = generate_round(&request).expect("round generated");
        let wheel: LetterCounts = round.wheel_counts();
        assert_eq!(wheel.total(), 6);
        assert_eq!(wheel.max_repeat(), 1, "{:?}", round.wheel_letters);
        assert!(!round.valid_words.iter().any(|w| w == "tomato"));
        assert!(validate_generated_round(&round, &pool.word_set()));
    }
}

#[test]
fn two_letter_words_are_never_used() {
    let pool: WordPool = pool(&["at", "ta", "an", "na", "tan", "ant", "nat"]);
    let config: GradeConfig = GradeConfig {
        wheel_size: 4,
        min_word_length: 2,
        max_word_length: 3,
        target_words: 2,
        min_board_words: 2,
        max_letter_repeat: 1,
        ..GradeConfig::for_grade(1).expect("grade exists")
    };
    let freshness: Freshness = Freshness::default();

    for round_index in 0..5 {
        let request: RoundRequest =
            RoundRequest::new(round_index, 3, &pool, &config, &freshness);
        let round: Round = generate_round(&request).expect("round generated");
        assert_eq!(round.config.min_word_length, 3);
        assert_eq!(round.config.min_board_words, 3);
        assert!(round.board.words.len() >= 3);
        assert!(
            round.valid_words.iter().all(|w| w.len() >= 3),
            "{:?}",
            round.valid_words
        );
    }
}

#[test]
fn unknown_words_fail_validation() {
    let pool: WordPool = pool(&["cat", "car", "art", "tar", "rat"]);
    let config: GradeConfig = small_config();
    let freshness: Freshness = Freshness::default();
    let round: Round = generate_round(&RoundRequest::new(1, 9, &pool, &config, &freshness))
        .expect("round generated");

    let mut words: HashSet<String> = pool.word_set();
    assert!(validate_generated_round(&round, &words));
    words.remove(&round.valid_words[0]);
    assert!(!validate_generated_round(&round, &words));
}
