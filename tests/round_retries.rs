use wordwheel::freshness::Freshness;
use wordwheel::generator::round::{
    IMPROVEMENT_WINDOW, RELAX_INTERVAL, Round, RoundError, RoundRequest, generate_round,
};
use wordwheel::grade_config::GradeConfig;
use wordwheel::pool::{Theme, WordEntry, WordPool};

const WORDS: [&str; 5] = ["cat", "car", "art", "tar", "rat"];

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

fn config(min_word_length: usize) -> GradeConfig {
    GradeConfig {
        wheel_size: 5,
        min_word_length,
        max_word_length: 4,
        target_words: 3,
        min_board_words: 3,
        max_letter_repeat: 2,
        ..GradeConfig::for_grade(1).expect("grade exists")
    }
}

/// Attempt number at the end of the seed.
fn attempt_of(round: &Round) -> usize {
    round
        .seed
        .rsplit('-')
        .next()
        .and_then(|a| a.parse().ok())
        .expect("seed ends with the attempt")
}

#[test]
fn best_reused_round_is_returned_within_the_window() {
    let pool: WordPool = pool(&WORDS);
    let config: GradeConfig = GradeConfig {
        max_word_length: 3,
        ..config(3)
    };
    let freshness: Freshness = Freshness::new(WORDS, Vec::<&str>::new(), WORDS.map(|w| (w, 1)));
    let request: RoundRequest = RoundRequest::new(0, 1, &pool, &config, &freshness);

    let round: Round = generate_round(&request).expect("round generated");
    assert!(round.seed.starts_with("1-0-1-"));
    assert!(
        attempt_of(&round) <= IMPROVEMENT_WINDOW,
        "seed {}",
        round.seed
    );
    assert!(round.word_pool_meta.reused_words_used > 0);
    assert_eq!(round.word_pool_meta.fresh_words_used, 0);
    assert!(!round.word_pool_meta.fresh_crossword_available);
    assert_eq!(round.config.min_word_length, 3);
}

#[test]
fn unconnected_words_exhaust_the_attempts() {
    let pool: WordPool = pool(&["cat", "dog"]);
    let config: GradeConfig = config(3);
    let freshness: Freshness = Freshness::default();
    let request: RoundRequest = RoundRequest::new(0, 1, &pool, &config, &freshness);

    assert_eq!(generate_round(&request), Err(RoundError::Exhausted(1)));
}

#[test]
fn relaxed_constraints_make_the_round_possible() {
    // Only "cart" has four letters, so no round exists until the minimum length drops to 3
    let mut words: Vec<&str> = WORDS.to_vec();
    words.push("cart");
    let pool: WordPool = pool(&words);
    let config: GradeConfig = GradeConfig {
        target_words: 4,
        min_board_words: 4,
        ..config(4)
    };
    let freshness: Freshness = Freshness::default();
    let request: RoundRequest = RoundRequest::new(0, 1, &pool, &config, &freshness);

    let round: Round = generate_round(&request).expect("round generated");
    let attempt: usize = attempt_of(&round);
    assert!(attempt >= RELAX_INTERVAL, "seed {}", round.seed);
    assert!(attempt < 2 * RELAX_INTERVAL, "seed {}", round.seed);
    assert_eq!(round.config.min_word_length, 3);
    assert_eq!(round.config.target_words, 3);
    assert_eq!(round.config.min_board_words, 3);
    assert!(round.board.words.len() >= 3);
    assert!(round.valid_words.iter().any(|w| w.len() == 3));
}
