//! Session State Machine
//!
//! Orchestrates one playthrough: `idle → countdown → playing → result`.
//!
//! Timing is host-driven and deterministic: the presentation layer calls
//! [`GameEngine::tick`] every [`TICK_MS`] milliseconds, and the engine
//! decrements the pre-game countdown, the per-question time budget and the
//! post-answer display delays in fixed steps. The active word and the
//! pending-advance delay are owned `Option` handles; clearing them revokes
//! the corresponding timer, so a cancelled question can never time out late
//! and a reset session can never be resurrected by a stale delay.

use chrono::Utc;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;
use uuid::Uuid;

use crate::stats;
use crate::types::{
    GameColor, GameMode, GameSession, GameStats, GameWord, QuestionResult,
    ANSWER_ADVANCE_DELAY_MS, COMBO_BONUS, COUNTDOWN_MS, SCORE_BASE, TICK_MS,
    TIMEOUT_ADVANCE_DELAY_MS,
};
use crate::words;

// ==================== Phases and Outcomes ====================

/// Lifecycle phase of a session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    /// No game running; a mode may or may not be selected
    Idle,
    /// Fixed pre-game delay before the first question
    Countdown,
    /// One active question at a time
    Playing,
    /// All questions resolved
    Result,
}

/// Outcome of the most recently resolved question
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Wrong,
    Timeout,
}

// ==================== Engine ====================

/// The game-state/scoring engine.
///
/// All inbound UI actions (`set_mode`, `start_game`, `select_color`,
/// `reset_game`) are defensive: invalid in the current phase means a silent
/// no-op, never an error.
pub struct GameEngine {
    phase: GamePhase,
    mode: Option<GameMode>,
    current_question: usize,
    current_word: Option<GameWord>,
    countdown_left: u64,
    time_left: u64,
    question_elapsed: u64,
    score: u32,
    combo: u32,
    max_combo: u32,
    results: Vec<QuestionResult>,
    last_result: Option<AnswerOutcome>,
    /// Remaining display delay before advancing to the next question
    pending_advance: Option<u64>,
    session_id: String,
    started_at: chrono::DateTime<Utc>,
    completed: Option<GameSession>,
    completion_notified: bool,
    rng: ChaCha8Rng,
}

impl GameEngine {
    /// Create an engine seeded from system time.
    pub fn new() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::with_seed(seed)
    }

    /// Create an engine with a fixed seed (for deterministic tests).
    pub fn with_seed(seed: u64) -> Self {
        Self {
            phase: GamePhase::Idle,
            mode: None,
            current_question: 0,
            current_word: None,
            countdown_left: 0,
            time_left: 0,
            question_elapsed: 0,
            score: 0,
            combo: 0,
            max_combo: 0,
            results: Vec::new(),
            last_result: None,
            pending_advance: None,
            session_id: String::new(),
            started_at: Utc::now(),
            completed: None,
            completion_notified: false,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    // ==================== Inbound Actions ====================

    /// Select the game mode. Returns the engine to `idle`.
    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = Some(mode);
        self.phase = GamePhase::Idle;
    }

    /// Start a new session. No-op unless a mode is selected.
    pub fn start_game(&mut self) {
        if self.mode.is_none() {
            debug!("start_game ignored: no mode selected");
            return;
        }

        self.session_id = Uuid::new_v4().to_string();
        self.started_at = Utc::now();
        self.current_question = 0;
        self.current_word = None;
        self.time_left = 0;
        self.question_elapsed = 0;
        self.score = 0;
        self.combo = 0;
        self.max_combo = 0;
        self.results.clear();
        self.last_result = None;
        self.pending_advance = None;
        self.completed = None;
        self.completion_notified = false;

        self.countdown_left = COUNTDOWN_MS;
        self.phase = GamePhase::Countdown;
        debug!(mode = ?self.mode, "session started");
    }

    /// Advance the engine clock by one fixed [`TICK_MS`] step.
    pub fn tick(&mut self) {
        match self.phase {
            GamePhase::Countdown => {
                self.countdown_left = self.countdown_left.saturating_sub(TICK_MS);
                if self.countdown_left == 0 {
                    self.phase = GamePhase::Playing;
                    self.pose_question();
                }
            }
            GamePhase::Playing => {
                if let Some(delay) = self.pending_advance {
                    let left = delay.saturating_sub(TICK_MS);
                    if left == 0 {
                        self.pending_advance = None;
                        self.advance();
                    } else {
                        self.pending_advance = Some(left);
                    }
                } else if self.current_word.is_some() {
                    self.question_elapsed += TICK_MS;
                    self.time_left = self.time_left.saturating_sub(TICK_MS);
                    if self.time_left == 0 {
                        self.handle_timeout();
                    }
                }
            }
            GamePhase::Idle | GamePhase::Result => {}
        }
    }

    /// Submit a color selection for the active question.
    ///
    /// Valid only in `playing` with an active word; ignored otherwise.
    /// Taking the active word out cancels its countdown, so the question is
    /// resolved exactly once even if a timeout was imminent.
    pub fn select_color(&mut self, color: GameColor) {
        if self.phase != GamePhase::Playing {
            debug!(?color, "select_color ignored: not playing");
            return;
        }
        let Some(word) = self.current_word.take() else {
            debug!(?color, "select_color ignored: no active question");
            return;
        };

        let response_time = self.question_elapsed;
        let is_correct = color == word.display_color;
        let correct_color = word.display_color;

        self.results.push(QuestionResult {
            word,
            selected_color: Some(color),
            correct_color,
            is_correct,
            response_time,
            question_index: self.current_question,
        });

        if is_correct {
            // Combo bonus uses the combo value before this answer
            self.score += SCORE_BASE + self.combo * COMBO_BONUS;
            self.combo += 1;
            self.max_combo = self.max_combo.max(self.combo);
            self.last_result = Some(AnswerOutcome::Correct);
        } else {
            self.combo = 0;
            self.last_result = Some(AnswerOutcome::Wrong);
        }

        self.pending_advance = Some(ANSWER_ADVANCE_DELAY_MS);
    }

    /// Abandon the game from any phase and return to `idle`.
    ///
    /// Cancels the active question and any pending advance; idempotent.
    pub fn reset_game(&mut self) {
        self.phase = GamePhase::Idle;
        self.mode = None;
        self.current_question = 0;
        self.current_word = None;
        self.countdown_left = 0;
        self.time_left = 0;
        self.question_elapsed = 0;
        self.score = 0;
        self.combo = 0;
        self.max_combo = 0;
        self.results.clear();
        self.last_result = None;
        self.pending_advance = None;
        self.completed = None;
        self.completion_notified = false;
    }

    // ==================== Internal Transitions ====================

    fn pose_question(&mut self) {
        let Some(mode) = self.mode else { return };
        self.current_word = Some(words::generate(mode, &mut self.rng));
        self.time_left = mode.time_limit_ms();
        self.question_elapsed = 0;
        self.last_result = None;
    }

    fn handle_timeout(&mut self) {
        let Some(mode) = self.mode else { return };
        let Some(word) = self.current_word.take() else {
            return;
        };

        let correct_color = word.display_color;
        self.results.push(QuestionResult {
            word,
            selected_color: None,
            correct_color,
            is_correct: false,
            response_time: mode.time_limit_ms(),
            question_index: self.current_question,
        });

        self.combo = 0;
        self.last_result = Some(AnswerOutcome::Timeout);
        self.pending_advance = Some(TIMEOUT_ADVANCE_DELAY_MS);
        debug!(question = self.current_question, "question timed out");
    }

    fn advance(&mut self) {
        let next = self.current_question + 1;
        if next >= self.total_questions() {
            self.finish();
        } else {
            self.current_question = next;
            self.pose_question();
        }
    }

    fn finish(&mut self) {
        self.phase = GamePhase::Result;
        self.current_word = None;
        self.completed = Some(self.build_session());
        debug!(session = %self.session_id, "session complete");
    }

    fn build_session(&self) -> GameSession {
        GameSession {
            id: self.session_id.clone(),
            mode: self.mode.unwrap_or(GameMode::Normal),
            start_time: self.started_at,
            end_time: Some(Utc::now()),
            results: self.results.clone(),
            total_questions: self.results.len(),
            correct_count: self.results.iter().filter(|r| r.is_correct).count(),
            combo_max: self.max_combo,
        }
    }

    // ==================== Read Accessors ====================

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn mode(&self) -> Option<GameMode> {
        self.mode
    }

    /// Zero-based index of the active question
    pub fn current_question(&self) -> usize {
        self.current_question
    }

    /// Question count for the selected mode (the default mode's count when
    /// none is selected, mirroring what the mode-selection screen shows)
    pub fn total_questions(&self) -> usize {
        self.mode
            .unwrap_or(GameMode::Normal)
            .config()
            .total_questions
    }

    pub fn current_word(&self) -> Option<&GameWord> {
        self.current_word.as_ref()
    }

    /// Remaining countdown before the first question (ms)
    pub fn countdown_left_ms(&self) -> u64 {
        self.countdown_left
    }

    /// Remaining time budget for the active question (ms)
    pub fn time_left_ms(&self) -> u64 {
        self.time_left
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    pub fn results(&self) -> &[QuestionResult] {
        &self.results
    }

    /// Outcome of the most recently resolved question, cleared when the next
    /// question is posed
    pub fn last_result(&self) -> Option<AnswerOutcome> {
        self.last_result
    }

    // ==================== Outbound Snapshots ====================

    /// Summary statistics over the results recorded so far.
    ///
    /// Pure recomputation on every call; cheap and always consistent with
    /// the result list.
    pub fn stats(&self) -> GameStats {
        stats::aggregate(&self.results)
    }

    /// Snapshot of the session. After completion this is the fixed
    /// end-of-game session; mid-game it reflects the results so far.
    pub fn session(&self) -> GameSession {
        match &self.completed {
            Some(session) => session.clone(),
            None => self.build_session(),
        }
    }

    /// One-shot completion event: returns the completed session the first
    /// time it is called after the engine reaches `result`, and `None` on
    /// every later call until a new session completes. Subscribers persist
    /// history or generate the report exactly once per session.
    pub fn take_completed_session(&mut self) -> Option<GameSession> {
        if self.completion_notified {
            return None;
        }
        match &self.completed {
            Some(session) => {
                self.completion_notified = true;
                Some(session.clone())
            }
            None => None,
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    /// Tick through the 3s countdown into the playing phase.
    fn start_playing(engine: &mut GameEngine, mode: GameMode) {
        engine.set_mode(mode);
        engine.start_game();
        assert_eq!(engine.phase(), GamePhase::Countdown);
        for _ in 0..(COUNTDOWN_MS / TICK_MS) {
            engine.tick();
        }
        assert_eq!(engine.phase(), GamePhase::Playing);
    }

    /// Answer the active question, correctly or not, then tick through the
    /// display delay.
    fn answer(engine: &mut GameEngine, correct: bool) {
        let display_color = engine
            .current_word()
            .expect("no active question")
            .display_color;
        let selection = if correct {
            display_color
        } else {
            wrong_color(display_color)
        };
        engine.select_color(selection);
        for _ in 0..(ANSWER_ADVANCE_DELAY_MS / TICK_MS) {
            engine.tick();
        }
    }

    fn wrong_color(color: GameColor) -> GameColor {
        match color {
            GameColor::Red => GameColor::Blue,
            _ => GameColor::Red,
        }
    }

    #[test]
    fn test_start_requires_mode() {
        let mut engine = GameEngine::with_seed(1);
        engine.start_game();
        assert_eq!(engine.phase(), GamePhase::Idle);
    }

    #[test]
    fn test_countdown_duration() {
        let mut engine = GameEngine::with_seed(1);
        engine.set_mode(GameMode::Normal);
        engine.start_game();
        assert_eq!(engine.countdown_left_ms(), COUNTDOWN_MS);

        for _ in 0..(COUNTDOWN_MS / TICK_MS - 1) {
            engine.tick();
            assert_eq!(engine.phase(), GamePhase::Countdown);
        }
        engine.tick();
        assert_eq!(engine.phase(), GamePhase::Playing);
        assert!(engine.current_word().is_some());
        assert_eq!(engine.time_left_ms(), GameMode::Normal.time_limit_ms());
    }

    #[test]
    fn test_correct_answer_scores_and_combos() {
        let mut engine = GameEngine::with_seed(2);
        start_playing(&mut engine, GameMode::Normal);

        answer(&mut engine, true);
        assert_eq!(engine.score(), 100);
        assert_eq!(engine.combo(), 1);

        answer(&mut engine, true);
        assert_eq!(engine.score(), 210); // 100 + (100 + 1*10)
        assert_eq!(engine.combo(), 2);

        answer(&mut engine, true);
        assert_eq!(engine.score(), 330); // + (100 + 2*10)
        assert_eq!(engine.max_combo(), 3);
    }

    #[test]
    fn test_wrong_answer_resets_combo_keeps_score() {
        let mut engine = GameEngine::with_seed(3);
        start_playing(&mut engine, GameMode::Normal);

        answer(&mut engine, true);
        answer(&mut engine, false);
        assert_eq!(engine.score(), 100);
        assert_eq!(engine.combo(), 0);
        assert_eq!(engine.max_combo(), 1);
        assert_eq!(engine.results().len(), 2);
        assert!(!engine.results()[1].is_correct);
    }

    #[test]
    fn test_response_time_tracks_elapsed_ticks() {
        let mut engine = GameEngine::with_seed(4);
        start_playing(&mut engine, GameMode::Normal);

        for _ in 0..8 {
            engine.tick();
        }
        let color = engine.current_word().expect("no word").display_color;
        engine.select_color(color);
        assert_eq!(engine.results()[0].response_time, 800);
    }

    #[test]
    fn test_timeout_records_full_limit_and_resets_combo() {
        let mut engine = GameEngine::with_seed(5);
        start_playing(&mut engine, GameMode::Normal);

        answer(&mut engine, true);
        assert_eq!(engine.combo(), 1);

        // Run the full 5s budget out
        let ticks = GameMode::Normal.time_limit_ms() / TICK_MS;
        for _ in 0..ticks {
            engine.tick();
        }

        let result = &engine.results()[1];
        assert_eq!(result.selected_color, None);
        assert!(!result.is_correct);
        assert_eq!(result.response_time, GameMode::Normal.time_limit_ms());
        assert_eq!(engine.combo(), 0);
        assert_eq!(engine.last_result(), Some(AnswerOutcome::Timeout));
    }

    #[test]
    fn test_timeout_advance_delay_is_800ms() {
        let mut engine = GameEngine::with_seed(6);
        start_playing(&mut engine, GameMode::Normal);

        let ticks = GameMode::Normal.time_limit_ms() / TICK_MS;
        for _ in 0..ticks {
            engine.tick();
        }
        assert_eq!(engine.current_question(), 0);

        // One tick short of the delay: still on the timed-out question
        for _ in 0..(TIMEOUT_ADVANCE_DELAY_MS / TICK_MS - 1) {
            engine.tick();
        }
        assert_eq!(engine.current_question(), 0);
        engine.tick();
        assert_eq!(engine.current_question(), 1);
        assert!(engine.current_word().is_some());
    }

    #[test]
    fn test_select_ignored_outside_playing() {
        let mut engine = GameEngine::with_seed(7);
        engine.select_color(GameColor::Red);
        assert!(engine.results().is_empty());

        engine.set_mode(GameMode::Normal);
        engine.start_game();
        engine.select_color(GameColor::Red); // countdown: ignored
        assert!(engine.results().is_empty());
    }

    #[test]
    fn test_select_ignored_during_display_delay() {
        let mut engine = GameEngine::with_seed(8);
        start_playing(&mut engine, GameMode::Normal);

        let color = engine.current_word().expect("no word").display_color;
        engine.select_color(color);
        assert_eq!(engine.results().len(), 1);

        // No active word during the delay: further selections are no-ops
        engine.select_color(GameColor::Red);
        engine.select_color(GameColor::Blue);
        assert_eq!(engine.results().len(), 1);
    }

    #[test]
    fn test_answer_cancels_question_timer() {
        let mut engine = GameEngine::with_seed(9);
        start_playing(&mut engine, GameMode::Normal);

        // Run the budget down to the final tick, then answer
        let ticks = GameMode::Normal.time_limit_ms() / TICK_MS - 1;
        for _ in 0..ticks {
            engine.tick();
        }
        let color = engine.current_word().expect("no word").display_color;
        engine.select_color(color);

        // Ticking on cannot produce a second result for the same index
        for _ in 0..20 {
            engine.tick();
        }
        let zero_indexed: Vec<usize> = engine
            .results()
            .iter()
            .filter(|r| r.question_index == 0)
            .map(|r| r.question_index)
            .collect();
        assert_eq!(zero_indexed.len(), 1);
    }

    #[test]
    fn test_reset_cancels_pending_advance() {
        let mut engine = GameEngine::with_seed(10);
        start_playing(&mut engine, GameMode::Normal);

        let color = engine.current_word().expect("no word").display_color;
        engine.select_color(color);
        engine.reset_game();

        assert_eq!(engine.phase(), GamePhase::Idle);
        assert_eq!(engine.mode(), None);
        assert_eq!(engine.score(), 0);
        assert!(engine.results().is_empty());

        // A stale delay must not resurrect the session
        for _ in 0..50 {
            engine.tick();
        }
        assert_eq!(engine.phase(), GamePhase::Idle);
        assert!(engine.results().is_empty());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut engine = GameEngine::with_seed(11);
        start_playing(&mut engine, GameMode::Stress);
        engine.reset_game();
        engine.reset_game();
        assert_eq!(engine.phase(), GamePhase::Idle);
    }

    #[test]
    fn test_full_session_exactly_once_per_index() {
        let mut engine = GameEngine::with_seed(12);
        start_playing(&mut engine, GameMode::Extreme);

        let total = GameMode::Extreme.config().total_questions;
        for i in 0..total {
            answer(&mut engine, i % 3 != 0);
        }

        assert_eq!(engine.phase(), GamePhase::Result);
        assert_eq!(engine.results().len(), total);
        for (i, result) in engine.results().iter().enumerate() {
            assert_eq!(result.question_index, i);
        }
    }

    #[test]
    fn test_completion_event_fires_once() {
        let mut engine = GameEngine::with_seed(13);
        start_playing(&mut engine, GameMode::Normal);

        let total = GameMode::Normal.config().total_questions;
        for _ in 0..total {
            answer(&mut engine, true);
        }

        assert_eq!(engine.phase(), GamePhase::Result);
        let session = engine
            .take_completed_session()
            .expect("completion event missing");
        assert_eq!(session.total_questions, total);
        assert_eq!(session.correct_count, total);
        assert!(session.end_time.is_some());
        assert!(engine.take_completed_session().is_none());

        // A fresh session re-arms the event
        engine.set_mode(GameMode::Normal);
        engine.start_game();
        for _ in 0..(COUNTDOWN_MS / TICK_MS) {
            engine.tick();
        }
        for _ in 0..total {
            answer(&mut engine, false);
        }
        assert!(engine.take_completed_session().is_some());
    }

    #[test]
    fn test_session_snapshot_mid_game() {
        let mut engine = GameEngine::with_seed(14);
        start_playing(&mut engine, GameMode::Normal);
        answer(&mut engine, true);

        let snapshot = engine.session();
        assert_eq!(snapshot.total_questions, 1);
        assert_eq!(snapshot.correct_count, 1);
        assert_eq!(snapshot.mode, GameMode::Normal);
        assert!(!snapshot.id.is_empty());
    }

    #[test]
    fn test_ticks_in_idle_and_result_are_noops() {
        let mut engine = GameEngine::with_seed(15);
        for _ in 0..10 {
            engine.tick();
        }
        assert_eq!(engine.phase(), GamePhase::Idle);

        start_playing(&mut engine, GameMode::Normal);
        let total = GameMode::Normal.config().total_questions;
        for _ in 0..total {
            answer(&mut engine, true);
        }
        assert_eq!(engine.phase(), GamePhase::Result);
        let recorded = engine.results().len();
        for _ in 0..100 {
            engine.tick();
        }
        assert_eq!(engine.results().len(), recorded);
        assert_eq!(engine.phase(), GamePhase::Result);
    }
}
