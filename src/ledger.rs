use std::collections::{HashMap, HashSet};

use chrono::Utc;
use tracing::debug;

use crate::error::{AnalyticsError, Result};
use crate::types::{InteractionRecord, Specialty};

/// Authoritative in-memory store of per-specialty interaction counters.
///
/// The ledger exclusively owns all [`InteractionRecord`]s; every other model
/// component reads immutable snapshots at computation time. Persistence
/// across process restarts is an external collaborator's concern.
#[derive(Debug, Clone, Default)]
pub struct InteractionLedger {
    records: HashMap<Specialty, InteractionRecord>,
}

impl InteractionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the interaction counter and stamps the interaction time.
    /// Always succeeds.
    pub fn record_interaction(&mut self, specialty: Specialty) {
        let record = self.records.entry(specialty).or_default();
        record.total_interactions += 1;
        record.last_interaction_time = Some(Utc::now());
        debug!(
            specialty = specialty.display_name(),
            total = record.total_interactions,
            "interaction recorded"
        );
    }

    /// Records a completed session and folds its duration into the running
    /// mean: `avg += (duration - avg) / session_count`.
    pub fn record_session(&mut self, specialty: Specialty, duration_seconds: f64) -> Result<()> {
        if !duration_seconds.is_finite() || duration_seconds < 0.0 {
            return Err(AnalyticsError::InvalidArgument(format!(
                "session duration must be a non-negative number of seconds, got {duration_seconds}"
            )));
        }

        let record = self.records.entry(specialty).or_default();
        record.session_count += 1;
        record.average_session_length +=
            (duration_seconds - record.average_session_length) / record.session_count as f64;
        Ok(())
    }

    /// Stores the latest assessment-derived mastery score for the specialty
    /// and bumps the completed-assessment counter.
    pub fn record_assessment(&mut self, specialty: Specialty, score: f64) -> Result<()> {
        if !score.is_finite() || !(0.0..=1.0).contains(&score) {
            return Err(AnalyticsError::InvalidArgument(format!(
                "assessment score must be in [0,1], got {score}"
            )));
        }

        let record = self.records.entry(specialty).or_default();
        record.completed_assessments += 1;
        record.mastery = score;
        Ok(())
    }

    /// Immutable snapshot of the record; zero-valued for a specialty that
    /// has never been touched. Never fails.
    pub fn get(&self, specialty: Specialty) -> InteractionRecord {
        self.records.get(&specialty).cloned().unwrap_or_default()
    }

    /// Sum of interaction counters across all specialties.
    pub fn total_interactions(&self) -> u64 {
        self.records.values().map(|r| r.total_interactions).sum()
    }

    /// Specialties with at least one recorded interaction.
    pub fn selected_specialties(&self) -> HashSet<Specialty> {
        self.records
            .iter()
            .filter(|(_, r)| r.total_interactions > 0)
            .map(|(s, _)| *s)
            .collect()
    }

    /// The `n` specialties with the most interactions, busiest first, ties
    /// broken by declaration order. Untouched specialties are excluded.
    pub fn most_active(&self, n: usize) -> Vec<Specialty> {
        let mut active: Vec<(Specialty, u64)> = Specialty::ALL
            .iter()
            .map(|s| (*s, self.get(*s).total_interactions))
            .filter(|(_, count)| *count > 0)
            .collect();
        active.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.index().cmp(&b.0.index())));
        active.into_iter().take(n).map(|(s, _)| s).collect()
    }

    /// Cloned view of every touched record, keyed by specialty. Serializable
    /// for the external persistence layer.
    pub fn snapshot(&self) -> HashMap<Specialty, InteractionRecord> {
        self.records.clone()
    }

    /// Rebuilds a ledger from a previously taken snapshot.
    pub fn from_snapshot(records: HashMap<Specialty, InteractionRecord>) -> Self {
        Self { records }
    }
}
