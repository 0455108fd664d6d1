//! Durable Session History
//!
//! Persists completed sessions and running bests to a single JSON file.
//! Storage problems never propagate to the caller: a missing or corrupt
//! file loads as the empty default, and a failed write is logged while the
//! in-memory state still updates. The worst case is history lost across a
//! restart, never a crash.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::types::{GameHistory, GameSession, GameStats, MAX_STORED_SESSIONS};

// ==================== Error Types ====================

/// Storage-layer error, used by the internal fallible operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

// ==================== Progress Trend ====================

/// Per-game point of the recent progress trend
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressPoint {
    /// 1-based position within the trend window, oldest first
    pub game: usize,
    /// Session score (correct count × 100)
    pub score: u32,
    /// Correct answers as a percentage
    pub correct_rate: f64,
}

/// Number of sessions the progress trend looks back over
const PROGRESS_TREND_WINDOW: usize = 10;

// ==================== History Store ====================

/// File-backed store for [`GameHistory`].
pub struct HistoryStore {
    path: PathBuf,
    history: GameHistory,
}

impl HistoryStore {
    /// Open the store at `path`, loading existing history.
    ///
    /// Absent or unparseable data substitutes the empty default; the
    /// failure is logged, never surfaced.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let history = match Self::load_from(&path) {
            Ok(Some(history)) => history,
            Ok(None) => {
                debug!(path = %path.display(), "no history file, starting empty");
                GameHistory::default()
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "failed to load game history, starting empty");
                GameHistory::default()
            }
        };
        Self { path, history }
    }

    /// Current in-memory history.
    pub fn history(&self) -> &GameHistory {
        &self.history
    }

    /// Record a completed session: prepend it, trim to the
    /// [`MAX_STORED_SESSIONS`] most recent, update the bests, bump the
    /// total-played counter and persist synchronously.
    pub fn add_session(&mut self, session: GameSession, stats: &GameStats) -> &GameHistory {
        let score = session.correct_count as u32 * 100;

        self.history.sessions.insert(0, session);
        self.history.sessions.truncate(MAX_STORED_SESSIONS);
        self.history.best_score = self.history.best_score.max(score);
        self.history.best_anti_interference_index = self
            .history
            .best_anti_interference_index
            .max(stats.anti_interference_index);
        self.history.total_games_played += 1;

        self.persist();
        &self.history
    }

    /// Reset to the empty default and persist.
    pub fn clear(&mut self) -> &GameHistory {
        self.history = GameHistory::default();
        self.persist();
        &self.history
    }

    /// The `count` most recent sessions, most recent first.
    pub fn recent_sessions(&self, count: usize) -> &[GameSession] {
        let end = count.min(self.history.sessions.len());
        &self.history.sessions[..end]
    }

    /// Score and accuracy per game over the last sessions, oldest first,
    /// for trend charts.
    pub fn progress_trend(&self) -> Vec<ProgressPoint> {
        self.history
            .sessions
            .iter()
            .take(PROGRESS_TREND_WINDOW)
            .rev()
            .enumerate()
            .map(|(index, session)| ProgressPoint {
                game: index + 1,
                score: session.correct_count as u32 * 100,
                // Multiply before dividing so rates like 11/20 come out as
                // exact percentages
                correct_rate: if session.total_questions > 0 {
                    session.correct_count as f64 * 100.0 / session.total_questions as f64
                } else {
                    0.0
                },
            })
            .collect()
    }

    // ==================== Persistence ====================

    fn load_from(path: &Path) -> StorageResult<Option<GameHistory>> {
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(path)?;
        let history = serde_json::from_str(&data)?;
        Ok(Some(history))
    }

    fn persist(&self) {
        if let Err(err) = self.try_persist() {
            warn!(path = %self.path.display(), %err, "failed to save game history");
        }
    }

    fn try_persist(&self) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_string(&self.history)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

// ==================== Tests ====================
