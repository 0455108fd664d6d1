//! Statistics Aggregation
//!
//! Pure reduction of a session's [`QuestionResult`] list into summary
//! statistics. Defined for any input length, including empty: every rate
//! whose denominator is zero defaults to 0 instead of dividing by zero.

use std::collections::HashMap;

use crate::types::{GameStats, QuestionResult, SensitiveWord};

/// Composite anti-interference index from percentage-scale rates.
///
/// `correct_fraction / (emotional_error_fraction + 1) × 100`: perfect
/// accuracy with no emotional errors yields exactly 100, and any emotional
/// error rate strictly dampens the index. The denominator is always >= 1, so
/// the natural range already fits [0, 100]; the clamp guards the bound
/// against future formula changes.
pub fn anti_interference_index(correct_rate: f64, emotional_error_rate: f64) -> f64 {
    let correct_fraction = correct_rate / 100.0;
    let error_fraction = emotional_error_rate / 100.0;
    let index = correct_fraction / (error_fraction + 1.0) * 100.0;
    index.clamp(0.0, 100.0)
}

/// Reduce a completed result list into [`GameStats`].
pub fn aggregate(results: &[QuestionResult]) -> GameStats {
    let total_questions = results.len();
    let total_correct = results.iter().filter(|r| r.is_correct).count();

    let emotional: Vec<&QuestionResult> =
        results.iter().filter(|r| r.word.is_emotional).collect();
    let emotional_total = emotional.len();
    let emotional_correct = emotional.iter().filter(|r| r.is_correct).count();

    let correct_rate = if total_questions > 0 {
        total_correct as f64 / total_questions as f64 * 100.0
    } else {
        0.0
    };

    let emotional_error_rate = if emotional_total > 0 {
        (emotional_total - emotional_correct) as f64 / emotional_total as f64 * 100.0
    } else {
        0.0
    };

    let average_response_time = if total_questions > 0 {
        results.iter().map(|r| r.response_time as f64).sum::<f64>() / total_questions as f64
    } else {
        0.0
    };

    GameStats {
        total_correct,
        total_questions,
        correct_rate,
        emotional_correct,
        emotional_total,
        emotional_error_rate,
        average_response_time,
        anti_interference_index: anti_interference_index(correct_rate, emotional_error_rate),
        max_combo: max_combo(results),
        sensitive_words: rank_sensitive_words(results),
    }
}

/// Longest run of consecutive correct answers.
fn max_combo(results: &[QuestionResult]) -> u32 {
    let mut best = 0u32;
    let mut streak = 0u32;
    for result in results {
        if result.is_correct {
            streak += 1;
            best = best.max(streak);
        } else {
            streak = 0;
        }
    }
    best
}

/// Group emotional-word results by text and rank words with at least one
/// error, descending by error count. The average time spans all appearances
/// of the word, not just the wrong ones. The full ranked list is retained;
/// callers truncate for display.
fn rank_sensitive_words(results: &[QuestionResult]) -> Vec<SensitiveWord> {
    struct WordTally {
        errors: u32,
        total_time: u64,
        appearances: u32,
    }

    let mut tallies: HashMap<&str, WordTally> = HashMap::new();
    for result in results.iter().filter(|r| r.word.is_emotional) {
        let tally = tallies.entry(result.word.text.as_str()).or_insert(WordTally {
            errors: 0,
            total_time: 0,
            appearances: 0,
        });
        tally.appearances += 1;
        tally.total_time += result.response_time;
        if !result.is_correct {
            tally.errors += 1;
        }
    }

    let mut ranked: Vec<SensitiveWord> = tallies
        .into_iter()
        .filter(|(_, tally)| tally.errors > 0)
        .map(|(word, tally)| SensitiveWord {
            word: word.to_string(),
            error_count: tally.errors,
            avg_time: tally.total_time as f64 / tally.appearances as f64,
        })
        .collect();

    // Secondary key keeps ties deterministic across hash iteration orders
    ranked.sort_by(|a, b| {
        b.error_count
            .cmp(&a.error_count)
            .then_with(|| a.word.cmp(&b.word))
    });
    ranked
}

// ==================== Tests ====================
