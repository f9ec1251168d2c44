use serde::{Deserialize, Serialize};

const PER_INTERACTION_WEIGHT: f64 = 0.02;
const PER_SESSION_WEIGHT: f64 = 0.05;
const PER_ASSESSMENT_WEIGHT: f64 = 0.10;

const AFFINITY_WEIGHT: f64 = 0.4;
const INTERACTIONS_WEIGHT: f64 = 0.2;
const SESSION_LENGTH_WEIGHT: f64 = 0.1;
const PROGRESS_WEIGHT: f64 = 0.3;
const NOISE_SCALE: f64 = 0.1;

const INTERACTION_HALF_POINT: f64 = 10.0;
const SESSION_HALF_POINT_SECS: f64 = 60.0;

const FIRST_STEPS_INTERACTIONS: u64 = 1;
const DEDICATED_LEARNER_INTERACTIONS: u64 = 10;

const PASS_THRESHOLD: f64 = 0.6;
const DEFAULT_AFFINITY: f64 = 0.5;

/// Weights converting raw ledger counters into a saturating progress
/// fraction. Each unit contributes its weight until the sum clamps at 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressWeights {
    pub per_interaction: f64,
    pub per_session: f64,
    pub per_assessment: f64,
}

impl Default for ProgressWeights {
    fn default() -> Self {
        Self {
            per_interaction: PER_INTERACTION_WEIGHT,
            per_session: PER_SESSION_WEIGHT,
            per_assessment: PER_ASSESSMENT_WEIGHT,
        }
    }
}

/// Blend weights for the recommendation score. Affinity, interaction
/// history, session length and progress sum to 1.0; the noise term sits on
/// top of that to break ties and encourage discovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationWeights {
    pub affinity: f64,
    pub interactions: f64,
    pub session_length: f64,
    pub progress: f64,
    /// Scale of the uniform noise term; draws land in `[0, noise_scale)`.
    pub noise_scale: f64,
    /// Disable for deterministic ranking (exact-score tests are infeasible
    /// with noise on).
    pub noise_enabled: bool,
    /// Interaction count at which the interaction-history term reaches 0.5.
    pub interaction_half_point: f64,
    /// Average session length (seconds) at which the session term reaches 0.5.
    pub session_half_point_secs: f64,
}

impl Default for RecommendationWeights {
    fn default() -> Self {
        Self {
            affinity: AFFINITY_WEIGHT,
            interactions: INTERACTIONS_WEIGHT,
            session_length: SESSION_LENGTH_WEIGHT,
            progress: PROGRESS_WEIGHT,
            noise_scale: NOISE_SCALE,
            noise_enabled: true,
            interaction_half_point: INTERACTION_HALF_POINT,
            session_half_point_secs: SESSION_HALF_POINT_SECS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementThresholds {
    pub first_steps_interactions: u64,
    pub dedicated_learner_interactions: u64,
}

impl Default for AchievementThresholds {
    fn default() -> Self {
        Self {
            first_steps_interactions: FIRST_STEPS_INTERACTIONS,
            dedicated_learner_interactions: DEDICATED_LEARNER_INTERACTIONS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    pub progress: ProgressWeights,
    pub recommendation: RecommendationWeights,
    pub achievements: AchievementThresholds,
    /// Minimum assessment score counted as a pass.
    pub pass_threshold: f64,
    /// Affinity assumed for a specialty before anything is known about it.
    pub default_affinity: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            progress: ProgressWeights::default(),
            recommendation: RecommendationWeights::default(),
            achievements: AchievementThresholds::default(),
            pass_threshold: PASS_THRESHOLD,
            default_affinity: DEFAULT_AFFINITY,
        }
    }
}

impl AnalyticsConfig {
    /// Default configuration with the noise term switched off.
    pub fn deterministic() -> Self {
        let mut config = Self::default();
        config.recommendation.noise_enabled = false;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommendation_weights_sum_to_one() {
        let w = RecommendationWeights::default();
        let sum = w.affinity + w.interactions + w.session_length + w.progress;
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn deterministic_config_disables_noise() {
        assert!(!AnalyticsConfig::deterministic().recommendation.noise_enabled);
        assert!(AnalyticsConfig::default().recommendation.noise_enabled);
    }
}
