use std::collections::HashSet;

use tracing::info;

use crate::config::AchievementThresholds;
use crate::types::{Achievement, AchievementKind, Specialty};

/// Callback invoked once per unlock. The presentation layer registers these
/// instead of subscribing to an engine-bound signal.
pub type UnlockObserver = Box<dyn Fn(&Achievement) + Send + Sync>;

/// Watches cumulative counters and fires each unlock exactly once.
///
/// Every achievement moves `Locked -> Unlocked` one way, for the process
/// lifetime. Thresholds are checked with `>=` behind an already-unlocked
/// guard, so counters that jump past a threshold (or get re-evaluated at
/// the same value) still unlock exactly once.
#[derive(Default)]
pub struct AchievementEvaluator {
    thresholds: AchievementThresholds,
    unlocked_kinds: HashSet<AchievementKind>,
    history: Vec<Achievement>,
    observers: Vec<UnlockObserver>,
}

impl AchievementEvaluator {
    pub fn new(thresholds: AchievementThresholds) -> Self {
        Self {
            thresholds,
            unlocked_kinds: HashSet::new(),
            history: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Registers an observer for future unlocks.
    pub fn on_unlock(&mut self, observer: impl Fn(&Achievement) + Send + Sync + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Checks every threshold against the current counters and returns the
    /// achievements newly unlocked by this call. Re-evaluating after a
    /// threshold was already crossed returns nothing for it.
    pub fn evaluate(
        &mut self,
        total_interactions: u64,
        selected: &HashSet<Specialty>,
    ) -> Vec<Achievement> {
        let mut newly_unlocked = Vec::new();

        if total_interactions >= self.thresholds.first_steps_interactions {
            self.unlock(AchievementKind::FirstSteps, &mut newly_unlocked);
        }
        if total_interactions >= self.thresholds.dedicated_learner_interactions {
            self.unlock(AchievementKind::DedicatedLearner, &mut newly_unlocked);
        }
        if Specialty::ALL.iter().all(|s| selected.contains(s)) {
            self.unlock(AchievementKind::WellRounded, &mut newly_unlocked);
        }

        for achievement in &newly_unlocked {
            for observer in &self.observers {
                observer(achievement);
            }
        }
        newly_unlocked
    }

    pub fn is_unlocked(&self, kind: AchievementKind) -> bool {
        self.unlocked_kinds.contains(&kind)
    }

    /// Every unlock so far, in unlock order.
    pub fn unlocked(&self) -> &[Achievement] {
        &self.history
    }

    /// The last `n` unlocks, newest first.
    pub fn recent(&self, n: usize) -> Vec<Achievement> {
        self.history.iter().rev().take(n).cloned().collect()
    }

    fn unlock(&mut self, kind: AchievementKind, out: &mut Vec<Achievement>) {
        if !self.unlocked_kinds.insert(kind) {
            return;
        }
        let achievement = Achievement::new(kind);
        info!(achievement = achievement.title, "achievement unlocked");
        self.history.push(achievement.clone());
        out.push(achievement);
    }
}

impl std::fmt::Debug for AchievementEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AchievementEvaluator")
            .field("thresholds", &self.thresholds)
            .field("unlocked_kinds", &self.unlocked_kinds)
            .field("observers", &self.observers.len())
            .finish()
    }
}
