//! Psychological Resilience Report
//!
//! Maps summary statistics to the five-axis radar profile, the weighted
//! composite score, categorical labels and templated commentary. Every
//! quantitative field is a pure function of the stats; the only random draw
//! is which pre-templated comment string is chosen.

use rand::Rng;

use crate::types::{
    EmotionalStability, GameStats, PsychReport, RadarData, ResponseSpeed,
};

// ==================== Text Tables ====================

const FUNNY_COMMENTS_HIGH: [&str; 3] = [
    "你的大脑像是装了防火墙，情绪干扰对你来说就是小菜一碟！🧠✨",
    "心理学家看了都说强！你是天生的抗压小能手！💪",
    "你的专注力堪比激光，情绪词对你毫无影响！🎯",
];

const FUNNY_COMMENTS_MEDIUM: [&str; 3] = [
    "你的心理素质还不错，偶尔被情绪词绊一下也是人之常情～😊",
    "表现良好！继续练习，你离心理大师不远了！🌟",
    "情绪有时会给你使绊子，但你总能站稳脚跟！⚡",
];

const FUNNY_COMMENTS_LOW: [&str; 3] = [
    "情绪词是你的克星？没关系，承认自己是人类也很重要～😄",
    "你的心可能比较柔软，这不是缺点，是特点！💖",
    "建议：下次遇到\"失败\"这个词，心里默念\"假的假的\"～🙈",
];

const SUGGESTION_SPEED_FAST: &str = "反应速度很快！继续保持这种敏锐度。";
const SUGGESTION_SPEED_MEDIUM: &str = "反应速度适中，可以尝试提高专注度来加快反应。";
const SUGGESTION_SPEED_SLOW: &str = "建议多做一些快速反应训练，提升信息处理速度。";

const SUGGESTION_ACCURACY_HIGH: &str = "准确率非常高！你的判断力很棒。";
const SUGGESTION_ACCURACY_MEDIUM: &str = "准确率还可以，建议放慢一点确保看清颜色。";
const SUGGESTION_ACCURACY_LOW: &str = "多注意观察文字的颜色而非内容，这需要练习。";

const SUGGESTION_EMOTIONAL_STABLE: &str = "面对情绪词时表现稳定，心理韧性很强。";
const SUGGESTION_EMOTIONAL_AFFECTED: &str = "情绪词对你有一定影响，这很正常，多练习会改善。";
const SUGGESTION_EMOTIONAL_SENSITIVE: &str = "对情绪词比较敏感，建议在日常生活中多练习情绪觉察。";

// ==================== Axis Weights ====================

const WEIGHT_SPEED: f64 = 0.15;
const WEIGHT_ACCURACY: f64 = 0.30;
const WEIGHT_STABILITY: f64 = 0.25;
const WEIGHT_FOCUS: f64 = 0.15;
const WEIGHT_RESILIENCE: f64 = 0.15;

/// Combo value at which the focus axis saturates at 100
const FOCUS_SATURATION_COMBO: f64 = 10.0;

/// Number of sensitive words surfaced in the report
const SENSITIVE_AREA_LIMIT: usize = 3;

// ==================== Report Generation ====================

/// Generate the post-game report from summary statistics.
///
/// The random source only picks the comment text; fixing the seed fixes the
/// whole report.
pub fn generate<R: Rng>(stats: &GameStats, rng: &mut R) -> PsychReport {
    let speed_score = clamp_axis(100.0 - (stats.average_response_time - 500.0) / 30.0);
    let accuracy_score = clamp_axis(stats.correct_rate);
    let stability_score = clamp_axis(100.0 - stats.emotional_error_rate);
    let focus_score = clamp_axis(stats.max_combo as f64 / FOCUS_SATURATION_COMBO * 100.0);
    let resilience_score = clamp_axis(stats.anti_interference_index);

    let overall_score = (speed_score * WEIGHT_SPEED
        + accuracy_score * WEIGHT_ACCURACY
        + stability_score * WEIGHT_STABILITY
        + focus_score * WEIGHT_FOCUS
        + resilience_score * WEIGHT_RESILIENCE)
        .round() as u32;

    let response_speed = speed_label(stats.average_response_time);
    let emotional_stability = stability_label(stats.emotional_error_rate);

    let sensitive_areas: Vec<String> = stats
        .sensitive_words
        .iter()
        .take(SENSITIVE_AREA_LIMIT)
        .map(|w| format!("\"{}\"", w.word))
        .collect();

    let suggestions = vec![
        speed_suggestion(response_speed).to_string(),
        accuracy_suggestion(stats.correct_rate).to_string(),
        emotional_suggestion(stats.emotional_error_rate).to_string(),
    ];

    let pool = comment_pool(overall_score);
    let funny_comment = pool[rng.gen_range(0..pool.len())].to_string();

    PsychReport {
        overall_score,
        anti_interference_index: stats.anti_interference_index.round() as u32,
        response_speed,
        emotional_stability,
        sensitive_areas,
        suggestions,
        funny_comment,
        radar_data: RadarData {
            speed: speed_score.round() as u32,
            accuracy: accuracy_score.round() as u32,
            stability: stability_score.round() as u32,
            focus: focus_score.round() as u32,
            resilience: resilience_score.round() as u32,
        },
    }
}

fn clamp_axis(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

fn speed_label(average_response_time: f64) -> ResponseSpeed {
    if average_response_time < 1_000.0 {
        ResponseSpeed::Fast
    } else if average_response_time < 2_000.0 {
        ResponseSpeed::Medium
    } else {
        ResponseSpeed::Slow
    }
}

fn stability_label(emotional_error_rate: f64) -> EmotionalStability {
    if emotional_error_rate < 20.0 {
        EmotionalStability::High
    } else if emotional_error_rate < 40.0 {
        EmotionalStability::Medium
    } else {
        EmotionalStability::Low
    }
}

fn speed_suggestion(label: ResponseSpeed) -> &'static str {
    match label {
        ResponseSpeed::Fast => SUGGESTION_SPEED_FAST,
        ResponseSpeed::Medium => SUGGESTION_SPEED_MEDIUM,
        ResponseSpeed::Slow => SUGGESTION_SPEED_SLOW,
    }
}

fn accuracy_suggestion(correct_rate: f64) -> &'static str {
    if correct_rate > 80.0 {
        SUGGESTION_ACCURACY_HIGH
    } else if correct_rate > 60.0 {
        SUGGESTION_ACCURACY_MEDIUM
    } else {
        SUGGESTION_ACCURACY_LOW
    }
}

fn emotional_suggestion(emotional_error_rate: f64) -> &'static str {
    if emotional_error_rate < 20.0 {
        SUGGESTION_EMOTIONAL_STABLE
    } else if emotional_error_rate < 40.0 {
        SUGGESTION_EMOTIONAL_AFFECTED
    } else {
        SUGGESTION_EMOTIONAL_SENSITIVE
    }
}

fn comment_pool(overall_score: u32) -> &'static [&'static str; 3] {
    if overall_score > 70 {
        &FUNNY_COMMENTS_HIGH
    } else if overall_score > 40 {
        &FUNNY_COMMENTS_MEDIUM
    } else {
        &FUNNY_COMMENTS_LOW
    }
}

// ==================== Tests ====================
