//! # agrilearn-core - learning analytics for the AgriLearn education game
//!
//! Pure-Rust implementation of the game's Learning Progress &
//! Recommendation Model:
//!
//! - **InteractionLedger** - authoritative per-specialty interaction counters
//! - **ProgressModel** - normalized progress fractions and competency bands
//! - **RecommendationEngine** - affinity/history/progress-blended ranking
//! - **AchievementEvaluator** - one-shot threshold unlocks
//!
//! The crate owns no rendering, audio, input or persistence. The game's
//! presentation layer reports events (`record_interaction`,
//! `record_session`, `record_assessment`), reads back progress and ranked
//! recommendations, and subscribes to achievement unlocks for celebratory
//! display. Everything runs synchronously in bounded time; the
//! [`AnalyticsEngine`] facade serializes concurrent callers behind one lock.
//!
//! Scoring noise is drawn from a seedable RNG and can be disabled entirely
//! ([`AnalyticsConfig::deterministic`]), so ranking is reproducible in tests.
//!
//! ## Example
//!
//! ```rust
//! use agrilearn_core::{AnalyticsConfig, AnalyticsEngine, Specialty};
//!
//! let engine = AnalyticsEngine::new(AnalyticsConfig::default());
//! let unlocked = engine.record_interaction(Specialty::SoilScience);
//! assert_eq!(unlocked.len(), 1); // "First Steps"
//!
//! assert!(engine.specialty_progress(Specialty::SoilScience) > 0.0);
//! let top = engine.top_recommendations(3);
//! assert_eq!(top.len(), 3);
//! ```

pub mod achievements;
pub mod config;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod progress;
pub mod recommend;
pub mod search;
pub mod types;

pub use achievements::AchievementEvaluator;
pub use config::{
    AchievementThresholds, AnalyticsConfig, ProgressWeights, RecommendationWeights,
};
pub use engine::AnalyticsEngine;
pub use error::{AnalyticsError, Result};
pub use ledger::InteractionLedger;
pub use progress::{competency_level, ProgressModel};
pub use recommend::RecommendationEngine;
pub use search::search_suggestions;
pub use types::{
    Achievement, AchievementKind, AssessmentResult, CompetencyLevel, InteractionRecord,
    Recommendation, Specialty,
};
