//! # stroop-core - Stroop 反应游戏核心引擎
//!
//! Core engine for a Stroop-effect psychological reaction game: the player
//! is shown a word whose text and ink color conflict and must name the ink
//! color under a time limit. This crate owns everything with actual game
//! logic; rendering is an external collaborator driving the engine through
//! a narrow API.
//!
//! ## Design goals
//!
//! - **Deterministic** - host-driven 100ms ticks and a seedable RNG; every
//!   session can be replayed exactly in tests
//! - **Defensive** - invalid inputs are no-ops, storage problems degrade to
//!   defaults, nothing in this crate is fatal
//! - **Pure derivations** - statistics and the report are recomputed from
//!   the result list on demand, never cached mutable state
//!
//! ## Module structure
//!
//! - [`engine`] - timed session state machine (idle → countdown → playing →
//!   result), scoring and combo tracking
//! - [`words`] - stimulus generation (word pools, emotional split, display
//!   color)
//! - [`stats`] - aggregation of per-question results into summary statistics
//! - [`report`] - five-axis radar profile, composite score and commentary
//! - [`history`] - file-backed session history with running bests
//! - [`types`] - shared data model and configuration tables
//!
//! ## Usage example
//!
//! ```rust
//! use stroop_core::{GameEngine, GameMode, GamePhase};
//!
//! let mut engine = GameEngine::with_seed(42);
//! engine.set_mode(GameMode::Normal);
//! engine.start_game();
//!
//! // The host ticks the engine every 100ms
//! while engine.phase() == GamePhase::Countdown {
//!     engine.tick();
//! }
//!
//! // Answer the active question
//! if let Some(word) = engine.current_word() {
//!     let color = word.display_color;
//!     engine.select_color(color);
//! }
//! ```

// ============================================================================
// Module declarations
// ============================================================================

pub mod engine;
pub mod history;
pub mod report;
pub mod stats;
pub mod types;
pub mod words;

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export all public types
pub use types::*;

/// Re-export the session state machine
pub use engine::{AnswerOutcome, GameEngine, GamePhase};

/// Re-export the history store
pub use history::{HistoryStore, ProgressPoint, StorageError, StorageResult};
