//! Shared Types and Configuration Tables
//!
//! Data model used across the engine, aggregation, report and history
//! modules, plus the static mode/word/color tables the game is tuned with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==================== Constants ====================

/// Fixed pre-game countdown before the first question (ms)
pub const COUNTDOWN_MS: u64 = 3_000;

/// Engine clock resolution: the host ticks the engine at this interval (ms)
pub const TICK_MS: u64 = 100;

/// Display delay before advancing after an answered question (ms)
pub const ANSWER_ADVANCE_DELAY_MS: u64 = 500;

/// Display delay before advancing after a timed-out question (ms)
pub const TIMEOUT_ADVANCE_DELAY_MS: u64 = 800;

/// Base score awarded for a correct answer
pub const SCORE_BASE: u32 = 100;

/// Extra score per combo step, applied to the combo value before the answer
pub const COMBO_BONUS: u32 = 10;

/// Probability that an emotional-word-eligible question draws from the
/// emotional pool instead of the neutral pool
pub const EMOTIONAL_WORD_PROBABILITY: f64 = 0.7;

/// Maximum number of sessions retained in the history store
pub const MAX_STORED_SESSIONS: usize = 50;

// ==================== Game Mode ====================

/// Game mode variants, each bound to a static [`ModeConfig`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Normal,
    Stress,
    Extreme,
}

/// Static per-mode configuration
#[derive(Clone, Debug)]
pub struct ModeConfig {
    /// Display name
    pub name: &'static str,
    /// Display emoji
    pub emoji: &'static str,
    /// Short description shown on the mode card
    pub description: &'static str,
    /// Per-question time limit (seconds)
    pub time_limit_secs: u64,
    /// Number of questions per session
    pub total_questions: usize,
    /// Whether emotional words are eligible in this mode
    pub use_emotional_words: bool,
    /// Whether the flashing visual distractor is active
    pub has_flash_effect: bool,
}

const NORMAL_CONFIG: ModeConfig = ModeConfig {
    name: "普通模式",
    emoji: "🌿",
    description: "轻松热身，使用中性词汇",
    time_limit_secs: 5,
    total_questions: 20,
    use_emotional_words: false,
    has_flash_effect: false,
};

const STRESS_CONFIG: ModeConfig = ModeConfig {
    name: "压力模式",
    emoji: "😰",
    description: "情绪词干扰，考验专注力",
    time_limit_secs: 4,
    total_questions: 20,
    use_emotional_words: true,
    has_flash_effect: false,
};

const EXTREME_CONFIG: ModeConfig = ModeConfig {
    name: "极限模式",
    emoji: "🔥",
    description: "背景闪烁+情绪词，终极挑战",
    time_limit_secs: 3,
    total_questions: 20,
    use_emotional_words: true,
    has_flash_effect: true,
};

impl GameMode {
    /// All modes, in menu order
    pub const ALL: [GameMode; 3] = [GameMode::Normal, GameMode::Stress, GameMode::Extreme];

    /// Static configuration for this mode
    pub fn config(self) -> &'static ModeConfig {
        match self {
            GameMode::Normal => &NORMAL_CONFIG,
            GameMode::Stress => &STRESS_CONFIG,
            GameMode::Extreme => &EXTREME_CONFIG,
        }
    }

    /// Per-question time limit in milliseconds
    pub fn time_limit_ms(self) -> u64 {
        self.config().time_limit_secs * 1_000
    }
}

// ==================== Colors ====================

/// The fixed four-color palette, used both as word-display color and as the
/// selectable answers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameColor {
    Red,
    Blue,
    Green,
    Yellow,
}

/// Palette in answer-button order
pub const GAME_COLORS: [GameColor; 4] = [
    GameColor::Red,
    GameColor::Blue,
    GameColor::Green,
    GameColor::Yellow,
];

impl GameColor {
    /// Display name of the color
    pub fn display_name(self) -> &'static str {
        match self {
            GameColor::Red => "红",
            GameColor::Blue => "蓝",
            GameColor::Green => "绿",
            GameColor::Yellow => "黄",
        }
    }

    /// HSL swatch used by the presentation layer
    pub fn hsl(self) -> &'static str {
        match self {
            GameColor::Red => "hsl(0, 80%, 55%)",
            GameColor::Blue => "hsl(210, 90%, 55%)",
            GameColor::Green => "hsl(140, 70%, 45%)",
            GameColor::Yellow => "hsl(45, 100%, 50%)",
        }
    }
}

// ==================== Word Pools ====================

// 中性词库
pub const NEUTRAL_WORDS: [&str; 24] = [
    "桌子", "椅子", "天空", "大地", "苹果", "香蕉", "书本", "铅笔",
    "窗户", "门口", "花朵", "树叶", "河流", "山峰", "太阳", "月亮",
    "星星", "云朵", "石头", "草地", "鱼儿", "鸟儿", "房子", "道路",
];

// 情绪词库
pub const POSITIVE_WORDS: [&str; 8] = [
    "成功", "胜利", "快乐", "幸福", "优秀", "完美", "棒极了", "厉害",
];

pub const NEGATIVE_WORDS: [&str; 8] = [
    "失败", "错误", "焦虑", "紧张", "糟糕", "可怕", "危险", "压力",
];

// ==================== Stimulus and Results ====================

/// Emotional category of a stimulus word
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordCategory {
    Positive,
    Negative,
    Neutral,
}

/// A single stimulus: the printed text and the ink color it is shown in.
///
/// The display color is drawn independently of the text's meaning, so a
/// color-name word may coincide with its own ink color about as often as
/// chance allows. That is standard Stroop-test behavior.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameWord {
    /// Display text
    pub text: String,
    /// Ink color the text is rendered in (the correct answer)
    pub display_color: GameColor,
    /// Whether the word came from the emotional pool
    pub is_emotional: bool,
    /// Emotional category, when classified
    pub category: Option<WordCategory>,
}

/// Immutable record of one resolved question.
///
/// Created exactly once per question index, by exactly one of answer or
/// timeout. A `None` selected color signifies a timeout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    /// The word that was shown
    pub word: GameWord,
    /// The color the player selected; `None` on timeout
    pub selected_color: Option<GameColor>,
    /// The correct color (the word's display color)
    pub correct_color: GameColor,
    /// Whether the selection matched the display color
    pub is_correct: bool,
    /// Response time in milliseconds; the full time limit on timeout
    pub response_time: u64,
    /// Ordinal index of the question within the session
    pub question_index: usize,
}

/// One completed playthrough, immutable once created
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    /// Session identifier (UUID v4)
    pub id: String,
    /// Mode the session was played in
    pub mode: GameMode,
    /// Wall-clock start of the session
    pub start_time: DateTime<Utc>,
    /// Wall-clock end of the session
    pub end_time: Option<DateTime<Utc>>,
    /// Per-question results in question-index order
    pub results: Vec<QuestionResult>,
    /// Number of questions answered or timed out
    pub total_questions: usize,
    /// Number of correct answers
    pub correct_count: usize,
    /// Longest run of consecutive correct answers
    pub combo_max: u32,
}

// ==================== Derived Statistics ====================

/// An emotional word that produced at least one incorrect answer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitiveWord {
    /// The word text
    pub word: String,
    /// Number of incorrect answers on this word
    pub error_count: u32,
    /// Average response time across all appearances (ms)
    pub avg_time: f64,
}

/// Summary statistics derived from a session's results.
///
/// Recomputed on demand; rates are percentages in [0, 100] and default to 0
/// when their denominator is 0.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStats {
    /// Number of correct answers
    pub total_correct: usize,
    /// Number of questions resolved
    pub total_questions: usize,
    /// Correct answers as a percentage of all questions
    pub correct_rate: f64,
    /// Correct answers among emotional-word questions
    pub emotional_correct: usize,
    /// Number of emotional-word questions
    pub emotional_total: usize,
    /// Errors among emotional-word questions, as a percentage
    pub emotional_error_rate: f64,
    /// Mean response time over all questions (ms)
    pub average_response_time: f64,
    /// Composite anti-interference index in [0, 100]
    pub anti_interference_index: f64,
    /// Longest run of consecutive correct answers
    pub max_combo: u32,
    /// Emotional words with errors, descending by error count
    pub sensitive_words: Vec<SensitiveWord>,
}

// ==================== Psychological Report ====================

/// Response-speed tier derived from the average response time
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseSpeed {
    Fast,
    Medium,
    Slow,
}

/// Emotional-stability tier derived from the emotional error rate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalStability {
    High,
    Medium,
    Low,
}

/// Five normalized axis scores, each in [0, 100]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarData {
    pub speed: u32,
    pub accuracy: u32,
    pub stability: u32,
    pub focus: u32,
    pub resilience: u32,
}

/// Post-game psychological resilience report
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PsychReport {
    /// Weighted composite score in [0, 100]
    pub overall_score: u32,
    /// Anti-interference index, rounded
    pub anti_interference_index: u32,
    /// Response-speed label
    pub response_speed: ResponseSpeed,
    /// Emotional-stability label
    pub emotional_stability: EmotionalStability,
    /// Up to 3 sensitive words, quoted for display
    pub sensitive_areas: Vec<String>,
    /// One suggestion per dimension: speed, accuracy, emotional
    pub suggestions: Vec<String>,
    /// One comment drawn from the score tier's pool
    pub funny_comment: String,
    /// Five-axis radar profile
    pub radar_data: RadarData,
}

// ==================== Durable History ====================

/// Process-durable aggregate of completed sessions
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameHistory {
    /// Completed sessions, most recent first, capped at
    /// [`MAX_STORED_SESSIONS`]
    pub sessions: Vec<GameSession>,
    /// Best session score ever observed (correct count × 100)
    pub best_score: u32,
    /// Best anti-interference index ever observed
    pub best_anti_interference_index: f64,
    /// Total sessions ever recorded, including trimmed ones
    pub total_games_played: u32,
}

impl Default for GameHistory {
    fn default() -> Self {
        Self {
            sessions: Vec::new(),
            best_score: 0,
            best_anti_interference_index: 0.0,
            total_games_played: 0,
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_config_values() {
        let normal = GameMode::Normal.config();
        assert_eq!(normal.time_limit_secs, 5);
        assert_eq!(normal.total_questions, 20);
        assert!(!normal.use_emotional_words);
        assert!(!normal.has_flash_effect);

        let stress = GameMode::Stress.config();
        assert_eq!(stress.time_limit_secs, 4);
        assert!(stress.use_emotional_words);
        assert!(!stress.has_flash_effect);

        let extreme = GameMode::Extreme.config();
        assert_eq!(extreme.time_limit_secs, 3);
        assert!(extreme.use_emotional_words);
        assert!(extreme.has_flash_effect);
    }

    #[test]
    fn test_time_limit_ms() {
        assert_eq!(GameMode::Normal.time_limit_ms(), 5_000);
        assert_eq!(GameMode::Stress.time_limit_ms(), 4_000);
        assert_eq!(GameMode::Extreme.time_limit_ms(), 3_000);
    }

    #[test]
    fn test_mode_serde_lowercase() {
        let json = serde_json::to_string(&GameMode::Extreme).expect("Failed to serialize");
        assert_eq!(json, "\"extreme\"");
        let back: GameMode = serde_json::from_str("\"normal\"").expect("Failed to deserialize");
        assert_eq!(back, GameMode::Normal);
    }

    #[test]
    fn test_color_serde_lowercase() {
        let json = serde_json::to_string(&GameColor::Yellow).expect("Failed to serialize");
        assert_eq!(json, "\"yellow\"");
        let back: GameColor = serde_json::from_str("\"red\"").expect("Failed to deserialize");
        assert_eq!(back, GameColor::Red);
    }

    #[test]
    fn test_color_display_names() {
        assert_eq!(GameColor::Red.display_name(), "红");
        assert_eq!(GameColor::Blue.display_name(), "蓝");
        assert_eq!(GameColor::Green.display_name(), "绿");
        assert_eq!(GameColor::Yellow.display_name(), "黄");
    }

    #[test]
    fn test_word_pools_nonempty_and_distinct() {
        assert_eq!(NEUTRAL_WORDS.len(), 24);
        assert_eq!(POSITIVE_WORDS.len(), 8);
        assert_eq!(NEGATIVE_WORDS.len(), 8);
        for word in POSITIVE_WORDS {
            assert!(!NEGATIVE_WORDS.contains(&word));
        }
    }

    #[test]
    fn test_question_result_serde_camel_case() {
        let result = QuestionResult {
            word: GameWord {
                text: "桌子".to_string(),
                display_color: GameColor::Blue,
                is_emotional: false,
                category: Some(WordCategory::Neutral),
            },
            selected_color: None,
            correct_color: GameColor::Blue,
            is_correct: false,
            response_time: 5_000,
            question_index: 3,
        };

        let json = serde_json::to_string(&result).expect("Failed to serialize");
        assert!(json.contains("\"selectedColor\":null"));
        assert!(json.contains("\"responseTime\":5000"));
        assert!(json.contains("\"questionIndex\":3"));
        assert!(json.contains("\"displayColor\":\"blue\""));

        let back: QuestionResult = serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(back, result);
    }

    #[test]
    fn test_game_history_default_is_empty() {
        let history = GameHistory::default();
        assert!(history.sessions.is_empty());
        assert_eq!(history.best_score, 0);
        assert_eq!(history.best_anti_interference_index, 0.0);
        assert_eq!(history.total_games_played, 0);
    }

    #[test]
    fn test_history_serde_field_names() {
        let history = GameHistory::default();
        let json = serde_json::to_string(&history).expect("Failed to serialize");
        assert!(json.contains("\"sessions\""));
        assert!(json.contains("\"bestScore\""));
        assert!(json.contains("\"bestAntiInterferenceIndex\""));
        assert!(json.contains("\"totalGamesPlayed\""));
    }
}
