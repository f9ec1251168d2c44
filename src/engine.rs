use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use crate::achievements::AchievementEvaluator;
use crate::config::AnalyticsConfig;
use crate::error::Result;
use crate::ledger::InteractionLedger;
use crate::progress::ProgressModel;
use crate::recommend::RecommendationEngine;
use crate::search;
use crate::types::{
    Achievement, AssessmentResult, CompetencyLevel, InteractionRecord, Recommendation, Specialty,
};

struct Inner {
    ledger: InteractionLedger,
    recommender: RecommendationEngine,
    achievements: AchievementEvaluator,
}

/// Facade wiring the ledger, models and achievement evaluator together.
///
/// The presentation layer holds one of these and passes it where needed;
/// there is no global registry. All mutating paths go through a single
/// `RwLock`, which serializes concurrent callers and preserves the
/// monotonicity and incremental-mean invariants. Every operation completes
/// synchronously in bounded time.
pub struct AnalyticsEngine {
    config: AnalyticsConfig,
    progress: ProgressModel,
    inner: RwLock<Inner>,
}

impl AnalyticsEngine {
    pub fn new(config: AnalyticsConfig) -> Self {
        let recommender = RecommendationEngine::new(
            config.recommendation.clone(),
            config.default_affinity,
        );
        Self::build(config, recommender)
    }

    /// Engine with a fixed RNG seed, for reproducible recommendation noise.
    pub fn with_seed(config: AnalyticsConfig, seed: u64) -> Self {
        let recommender = RecommendationEngine::with_seed(
            config.recommendation.clone(),
            config.default_affinity,
            seed,
        );
        Self::build(config, recommender)
    }

    fn build(config: AnalyticsConfig, recommender: RecommendationEngine) -> Self {
        let progress = ProgressModel::new(config.progress.clone());
        let achievements = AchievementEvaluator::new(config.achievements.clone());
        Self {
            config,
            progress,
            inner: RwLock::new(Inner {
                ledger: InteractionLedger::new(),
                recommender,
                achievements,
            }),
        }
    }

    /// Records one interaction with the specialty, then re-evaluates
    /// achievement thresholds. Newly crossed unlocks are delivered to
    /// registered observers and returned.
    pub fn record_interaction(&self, specialty: Specialty) -> Vec<Achievement> {
        let mut inner = self.inner.write();
        inner.ledger.record_interaction(specialty);

        let total = inner.ledger.total_interactions();
        let selected = inner.ledger.selected_specialties();
        inner.achievements.evaluate(total, &selected)
    }

    pub fn record_session(&self, specialty: Specialty, duration_seconds: f64) -> Result<()> {
        self.inner
            .write()
            .ledger
            .record_session(specialty, duration_seconds)
    }

    /// Stores an assessment outcome and returns the graded result.
    pub fn record_assessment(
        &self,
        specialty: Specialty,
        score: f64,
    ) -> Result<AssessmentResult> {
        let level = self.progress.competency_level(score)?;
        self.inner.write().ledger.record_assessment(specialty, score)?;

        let passed = score >= self.config.pass_threshold;
        debug!(
            specialty = specialty.display_name(),
            score,
            passed,
            "assessment recorded"
        );
        Ok(AssessmentResult {
            specialty,
            score,
            level,
            passed,
            feedback: assessment_feedback(specialty, level, passed),
        })
    }

    pub fn specialty_progress(&self, specialty: Specialty) -> f64 {
        self.progress
            .progress_for(&self.inner.read().ledger, specialty)
    }

    pub fn overall_progress(&self) -> f64 {
        self.progress.overall_progress(&self.inner.read().ledger)
    }

    pub fn competency_level(&self, mastery: f64) -> Result<CompetencyLevel> {
        self.progress.competency_level(mastery)
    }

    pub fn top_recommendations(&self, k: usize) -> Vec<Recommendation> {
        let mut inner = self.inner.write();
        let Inner {
            ledger, recommender, ..
        } = &mut *inner;
        recommender.top_recommendations(k, ledger, &self.progress)
    }

    pub fn search_suggestions(&self, query: &str) -> Vec<Specialty> {
        search::search_suggestions(query)
    }

    pub fn set_affinity(&self, specialty: Specialty, value: f64) -> Result<()> {
        self.inner.write().recommender.set_affinity(specialty, value)
    }

    pub fn randomize_affinities(&self) {
        self.inner.write().recommender.randomize_affinities();
    }

    pub fn on_achievement_unlocked(
        &self,
        observer: impl Fn(&Achievement) + Send + Sync + 'static,
    ) {
        self.inner.write().achievements.on_unlock(observer);
    }

    pub fn recent_achievements(&self, n: usize) -> Vec<Achievement> {
        self.inner.read().achievements.recent(n)
    }

    /// Snapshot of one specialty's counters.
    pub fn record(&self, specialty: Specialty) -> InteractionRecord {
        self.inner.read().ledger.get(specialty)
    }

    pub fn total_interactions(&self) -> u64 {
        self.inner.read().ledger.total_interactions()
    }

    pub fn most_active(&self, n: usize) -> Vec<Specialty> {
        self.inner.read().ledger.most_active(n)
    }

    pub fn strongest_areas(&self, n: usize) -> Vec<(Specialty, f64)> {
        self.progress.strongest_areas(&self.inner.read().ledger, n)
    }

    pub fn weakest_areas(&self, n: usize) -> Vec<(Specialty, f64)> {
        self.progress.weakest_areas(&self.inner.read().ledger, n)
    }

    /// Serializable ledger view for the external persistence layer.
    pub fn snapshot(&self) -> HashMap<Specialty, InteractionRecord> {
        self.inner.read().ledger.snapshot()
    }

    /// Restores ledger state saved by an earlier [`snapshot`](Self::snapshot).
    pub fn restore(&self, records: HashMap<Specialty, InteractionRecord>) {
        self.inner.write().ledger = InteractionLedger::from_snapshot(records);
    }
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new(AnalyticsConfig::default())
    }
}

fn assessment_feedback(specialty: Specialty, level: CompetencyLevel, passed: bool) -> String {
    let name = specialty.display_name();
    match (passed, level) {
        (true, CompetencyLevel::Expert) => {
            format!("Outstanding command of {name}. Consider mentoring others.")
        }
        (true, CompetencyLevel::Advanced) => {
            format!("Strong grasp of {name}. Expert level is within reach.")
        }
        (true, _) => format!("Passed. Keep building on your {name} fundamentals."),
        (false, _) => format!("Not yet. More {name} practice before the next attempt."),
    }
}
