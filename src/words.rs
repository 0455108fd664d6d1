//! Stimulus Word Generation
//!
//! Draws the next word for a question: pool selection, emotional split and
//! display color. Pure with respect to the supplied random source, so
//! deterministic tests can fix the sequence.

use rand::prelude::*;

use crate::types::{
    GameColor, GameMode, GameWord, WordCategory, EMOTIONAL_WORD_PROBABILITY, GAME_COLORS,
    NEGATIVE_WORDS, NEUTRAL_WORDS, POSITIVE_WORDS,
};

/// Generate the next stimulus for `mode`.
///
/// Modes that permit emotional words draw from the emotional pool with a
/// fixed probability of [`EMOTIONAL_WORD_PROBABILITY`] per call, with an
/// independent 50/50 positive/negative split; everything else falls back to
/// the neutral pool. The display color is drawn uniformly from the palette,
/// independent of the word's meaning.
pub fn generate<R: Rng>(mode: GameMode, rng: &mut R) -> GameWord {
    let config = mode.config();
    let use_emotional = config.use_emotional_words && rng.gen_bool(EMOTIONAL_WORD_PROBABILITY);

    let (text, is_emotional, category) = if use_emotional {
        let is_positive = rng.gen_bool(0.5);
        let pool: &[&str] = if is_positive {
            &POSITIVE_WORDS
        } else {
            &NEGATIVE_WORDS
        };
        let category = if is_positive {
            WordCategory::Positive
        } else {
            WordCategory::Negative
        };
        (pick(pool, rng), true, category)
    } else {
        (pick(&NEUTRAL_WORDS, rng), false, WordCategory::Neutral)
    };

    let display_color = pick_color(rng);

    GameWord {
        text: text.to_string(),
        display_color,
        is_emotional,
        category: Some(category),
    }
}

fn pick<'a, R: Rng>(pool: &[&'a str], rng: &mut R) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}

fn pick_color<R: Rng>(rng: &mut R) -> GameColor {
    GAME_COLORS[rng.gen_range(0..GAME_COLORS.len())]
}

// ==================== Tests ====================
