use crate::config::ProgressWeights;
use crate::error::{AnalyticsError, Result};
use crate::ledger::InteractionLedger;
use crate::types::{CompetencyLevel, InteractionRecord, Specialty};

const EXPERT_THRESHOLD: f64 = 0.9;
const ADVANCED_THRESHOLD: f64 = 0.7;
const INTERMEDIATE_THRESHOLD: f64 = 0.5;
const BEGINNER_THRESHOLD: f64 = 0.3;

/// Maps a mastery score to its competency band, thresholds evaluated
/// top-down with the first match winning.
pub fn competency_level(mastery: f64) -> Result<CompetencyLevel> {
    if !mastery.is_finite() || !(0.0..=1.0).contains(&mastery) {
        return Err(AnalyticsError::InvalidArgument(format!(
            "mastery must be in [0,1], got {mastery}"
        )));
    }

    Ok(match mastery {
        m if m >= EXPERT_THRESHOLD => CompetencyLevel::Expert,
        m if m >= ADVANCED_THRESHOLD => CompetencyLevel::Advanced,
        m if m >= INTERMEDIATE_THRESHOLD => CompetencyLevel::Intermediate,
        m if m >= BEGINNER_THRESHOLD => CompetencyLevel::Beginner,
        _ => CompetencyLevel::Novice,
    })
}

/// Translates ledger counters into normalized progress values.
///
/// `specialty_progress` is monotone in every counter and always clamped to
/// `[0,1]`; `overall_progress` is the exact arithmetic mean over the closed
/// specialty set, with no rounding applied.
#[derive(Debug, Clone, Default)]
pub struct ProgressModel {
    weights: ProgressWeights,
}

impl ProgressModel {
    pub fn new(weights: ProgressWeights) -> Self {
        Self { weights }
    }

    pub fn specialty_progress(&self, record: &InteractionRecord) -> f64 {
        let raw = record.total_interactions as f64 * self.weights.per_interaction
            + record.session_count as f64 * self.weights.per_session
            + record.completed_assessments as f64 * self.weights.per_assessment;
        raw.clamp(0.0, 1.0)
    }

    pub fn progress_for(&self, ledger: &InteractionLedger, specialty: Specialty) -> f64 {
        self.specialty_progress(&ledger.get(specialty))
    }

    pub fn overall_progress(&self, ledger: &InteractionLedger) -> f64 {
        let total: f64 = Specialty::ALL
            .iter()
            .map(|s| self.progress_for(ledger, *s))
            .sum();
        total / Specialty::COUNT as f64
    }

    pub fn competency_level(&self, mastery: f64) -> Result<CompetencyLevel> {
        competency_level(mastery)
    }

    /// The `n` specialties with the highest recorded mastery, strongest
    /// first, ties broken by declaration order.
    pub fn strongest_areas(&self, ledger: &InteractionLedger, n: usize) -> Vec<(Specialty, f64)> {
        let mut areas = self.mastery_by_specialty(ledger);
        areas.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.index().cmp(&b.0.index()))
        });
        areas.truncate(n);
        areas
    }

    /// The `n` specialties with the lowest recorded mastery, weakest first,
    /// ties broken by declaration order.
    pub fn weakest_areas(&self, ledger: &InteractionLedger, n: usize) -> Vec<(Specialty, f64)> {
        let mut areas = self.mastery_by_specialty(ledger);
        areas.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.index().cmp(&b.0.index()))
        });
        areas.truncate(n);
        areas
    }

    fn mastery_by_specialty(&self, ledger: &InteractionLedger) -> Vec<(Specialty, f64)> {
        Specialty::ALL
            .iter()
            .map(|s| (*s, ledger.get(*s).mastery))
            .collect()
    }
}
