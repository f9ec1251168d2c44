use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One fixed category of agricultural expertise the learner can engage with.
///
/// The set is closed; declaration order is the deterministic tie-breaker
/// everywhere ranked output is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Specialty {
    SoilScience,
    PlantBiology,
    WaterManagement,
    Composting,
    PestManagement,
    Permaculture,
    GeneralAgriculture,
}

impl Specialty {
    pub const ALL: [Specialty; 7] = [
        Specialty::SoilScience,
        Specialty::PlantBiology,
        Specialty::WaterManagement,
        Specialty::Composting,
        Specialty::PestManagement,
        Specialty::Permaculture,
        Specialty::GeneralAgriculture,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Position in declaration order.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::SoilScience => "Soil Science",
            Self::PlantBiology => "Plant Biology",
            Self::WaterManagement => "Water Management",
            Self::Composting => "Composting",
            Self::PestManagement => "Pest Management",
            Self::Permaculture => "Permaculture",
            Self::GeneralAgriculture => "General Agriculture",
        }
    }
}

/// Discrete competency band derived from a `[0,1]` mastery score.
///
/// Never stored; always recomputed from the underlying mastery value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum CompetencyLevel {
    #[default]
    Novice,
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl CompetencyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Novice => "novice",
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }
}

/// Per-specialty interaction counters owned by the [`InteractionLedger`].
///
/// `total_interactions` is monotonically non-decreasing for the lifetime of
/// the record. Records are created lazily on first touch and never destroyed
/// during a session.
///
/// [`InteractionLedger`]: crate::ledger::InteractionLedger
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRecord {
    pub total_interactions: u64,
    pub session_count: u64,
    /// Incremental mean of recorded session durations, in seconds.
    pub average_session_length: f64,
    pub completed_assessments: u64,
    /// Latest assessment-derived mastery score in `[0,1]`.
    pub mastery: f64,
    pub last_interaction_time: Option<DateTime<Utc>>,
}

/// Graded outcome of a single assessment, returned to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub specialty: Specialty,
    /// Normalized score in `[0,1]`.
    pub score: f64,
    pub level: CompetencyLevel,
    pub passed: bool,
    pub feedback: String,
}

/// Transient ranked projection; regenerated on every recommendation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub specialty: Specialty,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AchievementKind {
    FirstSteps,
    DedicatedLearner,
    WellRounded,
}

impl AchievementKind {
    pub const ALL: [AchievementKind; 3] = [
        AchievementKind::FirstSteps,
        AchievementKind::DedicatedLearner,
        AchievementKind::WellRounded,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::FirstSteps => "First Steps",
            Self::DedicatedLearner => "Dedicated Learner",
            Self::WellRounded => "Well Rounded",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::FirstSteps => "Started your agricultural learning journey!",
            Self::DedicatedLearner => "Completed 10 specialist interactions!",
            Self::WellRounded => "Explored all agricultural specialties!",
        }
    }
}

/// An unlocked achievement. Created exactly once per [`AchievementKind`];
/// re-evaluating a crossed threshold never produces a second one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub kind: AchievementKind,
    pub title: String,
    pub description: String,
    pub unlocked_at: DateTime<Utc>,
}

impl Achievement {
    pub fn new(kind: AchievementKind) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            description: kind.description().to_string(),
            unlocked_at: Utc::now(),
        }
    }
}
