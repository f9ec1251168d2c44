use std::cmp::Ordering;
use std::collections::HashMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::config::RecommendationWeights;
use crate::error::{AnalyticsError, Result};
use crate::ledger::InteractionLedger;
use crate::progress::ProgressModel;
use crate::types::{Recommendation, Specialty};

const AFFINITY_SEED_MIN: f64 = 0.5;

/// Scores and ranks specialties for personalized suggestion.
///
/// The score blends affinity, interaction history, session length and
/// learning progress. A small uniform noise term in `[0, noise_scale)` is
/// added by default to avoid deterministic ties and encourage discovery;
/// the RNG is seedable and the term can be disabled outright, so ranking
/// is reproducible when it needs to be.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    weights: RecommendationWeights,
    affinities: HashMap<Specialty, f64>,
    default_affinity: f64,
    rng: ChaCha8Rng,
}

impl RecommendationEngine {
    pub fn new(weights: RecommendationWeights, default_affinity: f64) -> Self {
        Self {
            weights,
            affinities: HashMap::new(),
            default_affinity,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Fixes the RNG seed so the noise term (and seeded affinities) are
    /// reproducible.
    pub fn with_seed(weights: RecommendationWeights, default_affinity: f64, seed: u64) -> Self {
        Self {
            weights,
            affinities: HashMap::new(),
            default_affinity,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Inferred preference strength for the specialty, defaulting until
    /// something better is known.
    pub fn affinity(&self, specialty: Specialty) -> f64 {
        self.affinities
            .get(&specialty)
            .copied()
            .unwrap_or(self.default_affinity)
    }

    pub fn set_affinity(&mut self, specialty: Specialty, value: f64) -> Result<()> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(AnalyticsError::InvalidArgument(format!(
                "affinity must be in [0,1], got {value}"
            )));
        }
        self.affinities.insert(specialty, value);
        Ok(())
    }

    /// Draws a fresh affinity in `[0.5, 1.0)` for every specialty from the
    /// injected RNG. Stands in until real preference signals arrive.
    pub fn randomize_affinities(&mut self) {
        for specialty in Specialty::ALL {
            let value = self.rng.gen_range(AFFINITY_SEED_MIN..1.0);
            self.affinities.insert(specialty, value);
        }
    }

    /// Weighted recommendation score. Reads the ledger, never mutates it;
    /// count-valued inputs are squashed to `[0,1]` before weighting so no
    /// single factor can dominate.
    pub fn score(
        &mut self,
        specialty: Specialty,
        ledger: &InteractionLedger,
        progress: &ProgressModel,
    ) -> f64 {
        let record = ledger.get(specialty);
        let interactions = saturate(
            record.total_interactions as f64,
            self.weights.interaction_half_point,
        );
        let session_length = saturate(
            record.average_session_length,
            self.weights.session_half_point_secs,
        );
        let specialty_progress = progress.specialty_progress(&record);

        let mut score = self.weights.affinity * self.affinity(specialty)
            + self.weights.interactions * interactions
            + self.weights.session_length * session_length
            + self.weights.progress * specialty_progress;

        if self.weights.noise_enabled {
            score += self.rng.gen::<f64>() * self.weights.noise_scale;
        }
        score
    }

    /// Scores every specialty, sorts descending (ties broken by declaration
    /// order) and returns the first `k`, or fewer if the universe is smaller.
    pub fn top_recommendations(
        &mut self,
        k: usize,
        ledger: &InteractionLedger,
        progress: &ProgressModel,
    ) -> Vec<Recommendation> {
        let mut ranked: Vec<Recommendation> = Specialty::ALL
            .iter()
            .map(|s| Recommendation {
                specialty: *s,
                score: self.score(*s, ledger, progress),
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then(a.specialty.index().cmp(&b.specialty.index()))
        });
        ranked.truncate(k);

        debug!(k, returned = ranked.len(), "recommendations generated");
        ranked
    }
}

fn saturate(value: f64, half_point: f64) -> f64 {
    if value <= 0.0 {
        return 0.0;
    }
    value / (value + half_point)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deterministic_engine() -> RecommendationEngine {
        let mut weights = RecommendationWeights::default();
        weights.noise_enabled = false;
        RecommendationEngine::with_seed(weights, 0.5, 42)
    }

    #[test]
    fn affinity_defaults_until_set() {
        let mut engine = deterministic_engine();
        assert_eq!(engine.affinity(Specialty::Composting), 0.5);

        engine.set_affinity(Specialty::Composting, 0.9).unwrap();
        assert_eq!(engine.affinity(Specialty::Composting), 0.9);
    }

    #[test]
    fn affinity_out_of_range_is_rejected() {
        let mut engine = deterministic_engine();
        assert!(engine.set_affinity(Specialty::SoilScience, 1.5).is_err());
        assert!(engine.set_affinity(Specialty::SoilScience, -0.1).is_err());
        assert_eq!(engine.affinity(Specialty::SoilScience), 0.5);
    }

    #[test]
    fn randomized_affinities_stay_in_seed_range() {
        let mut engine = deterministic_engine();
        engine.randomize_affinities();
        for specialty in Specialty::ALL {
            let a = engine.affinity(specialty);
            assert!((0.5..1.0).contains(&a), "affinity {a} out of seed range");
        }
    }

    #[test]
    fn scoring_does_not_mutate_the_ledger() {
        let mut engine = deterministic_engine();
        let mut ledger = InteractionLedger::new();
        ledger.record_interaction(Specialty::SoilScience);
        let before = ledger.get(Specialty::SoilScience);

        engine.top_recommendations(3, &ledger, &ProgressModel::default());

        let after = ledger.get(Specialty::SoilScience);
        assert_eq!(before.total_interactions, after.total_interactions);
        assert_eq!(ledger.total_interactions(), 1);
    }

    #[test]
    fn noise_disabled_gives_stable_ranking() {
        let mut engine = deterministic_engine();
        let mut ledger = InteractionLedger::new();
        ledger.record_interaction(Specialty::WaterManagement);
        ledger.record_session(Specialty::WaterManagement, 120.0).unwrap();
        ledger.record_interaction(Specialty::Composting);
        let progress = ProgressModel::default();

        let first = engine.top_recommendations(3, &ledger, &progress);
        let second = engine.top_recommendations(3, &ledger, &progress);
        assert_eq!(first, second);
        assert_eq!(first[0].specialty, Specialty::WaterManagement);
        assert_eq!(first[1].specialty, Specialty::Composting);
    }

    #[test]
    fn ties_break_in_declaration_order() {
        let mut engine = deterministic_engine();
        let ledger = InteractionLedger::new();

        // Fresh ledger plus uniform affinity means every score ties.
        let ranked = engine.top_recommendations(3, &ledger, &ProgressModel::default());
        assert_eq!(ranked[0].specialty, Specialty::SoilScience);
        assert_eq!(ranked[1].specialty, Specialty::PlantBiology);
        assert_eq!(ranked[2].specialty, Specialty::WaterManagement);
    }

    #[test]
    fn noise_stays_within_configured_scale() {
        let mut weights = RecommendationWeights::default();
        weights.affinity = 0.0;
        weights.interactions = 0.0;
        weights.session_length = 0.0;
        weights.progress = 0.0;
        let mut engine = RecommendationEngine::with_seed(weights, 0.5, 7);
        let ledger = InteractionLedger::new();
        let progress = ProgressModel::default();

        for specialty in Specialty::ALL {
            let score = engine.score(specialty, &ledger, &progress);
            assert!((0.0..0.1).contains(&score), "noise-only score {score}");
        }
    }

    #[test]
    fn same_seed_reproduces_scores() {
        let weights = RecommendationWeights::default();
        let mut a = RecommendationEngine::with_seed(weights.clone(), 0.5, 99);
        let mut b = RecommendationEngine::with_seed(weights, 0.5, 99);
        let ledger = InteractionLedger::new();
        let progress = ProgressModel::default();

        for specialty in Specialty::ALL {
            assert_eq!(
                a.score(specialty, &ledger, &progress),
                b.score(specialty, &ledger, &progress)
            );
        }
    }

    #[test]
    fn k_larger_than_universe_returns_everything() {
        let mut engine = deterministic_engine();
        let ledger = InteractionLedger::new();
        let ranked = engine.top_recommendations(50, &ledger, &ProgressModel::default());
        assert_eq!(ranked.len(), Specialty::COUNT);
    }
}
