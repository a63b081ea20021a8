use tracing::info;

/// A level the learner has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedLevel {
    /// The level number.
    pub level:           u32,
    /// XP awarded for the level.
    pub xp:              u32,
    /// Coins awarded for the level.
    pub coins:           u32,
    /// Stars earned, from 1 to 3.
    pub stars:           u8,
    /// Time spent on the level, in whole seconds.
    pub time_spent_secs: u64,
}

/// A snapshot of the learner's progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    /// Total experience points.
    pub xp:               u32,
    /// Total coins.
    pub coins:            u32,
    /// Remaining lives.
    pub lives:            u32,
    /// Finished levels, in completion order.
    pub completed_levels: Vec<CompletedLevel>,
}

impl Progress {
    /// Lives a new learner starts with.
    pub const STARTING_LIVES: u32 = 3;

    /// Tests whether `level` has already been completed.
    #[must_use]
    pub fn has_completed(&self, level: u32) -> bool {
        self.completed_levels.iter().any(|c| c.level == level)
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self { xp:               0,
               coins:            0,
               lives:            Self::STARTING_LIVES,
               completed_levels: Vec::new(), }
    }
}

/// The collaborator that stores learner progress.
///
/// The evaluator and grader never touch progress directly; a lesson session
/// reports through this trait so that storage stays the host's concern.
pub trait ProgressTracker {
    /// The current progress.
    fn progress(&self) -> &Progress;

    /// Adds experience points and coins.
    fn add_xp_and_coins(&mut self, xp: u32, coins: u32);

    /// Records a finished level together with its rewards.
    fn complete_level(&mut self,
                      level: u32,
                      xp: u32,
                      coins: u32,
                      stars: u8,
                      time_spent_secs: u64);
}

/// Keeps progress in memory. The `grade` command uses one per run.
///
/// # Example
/// ```
/// use pysnip::progress::{InMemoryProgress, ProgressTracker};
///
/// let mut tracker = InMemoryProgress::default();
/// tracker.complete_level(4, 50, 10, 3, 42);
/// tracker.complete_level(4, 50, 10, 3, 42);
///
/// assert_eq!(tracker.progress().xp, 50);
/// assert_eq!(tracker.progress().completed_levels.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryProgress {
    progress: Progress,
}

impl InMemoryProgress {
    /// Creates a tracker starting from an existing snapshot.
    #[must_use]
    pub const fn new(progress: Progress) -> Self {
        Self { progress }
    }
}

impl ProgressTracker for InMemoryProgress {
    fn progress(&self) -> &Progress {
        &self.progress
    }

    fn add_xp_and_coins(&mut self, xp: u32, coins: u32) {
        self.progress.xp = self.progress.xp.saturating_add(xp);
        self.progress.coins = self.progress.coins.saturating_add(coins);
    }

    fn complete_level(&mut self,
                      level: u32,
                      xp: u32,
                      coins: u32,
                      stars: u8,
                      time_spent_secs: u64) {
        if self.progress.has_completed(level) {
            return;
        }
        info!(level, xp, coins, stars, time_spent_secs, "level completed");
        self.add_xp_and_coins(xp, coins);
        self.progress.completed_levels.push(CompletedLevel { level,
                                                             xp,
                                                             coins,
                                                             stars,
                                                             time_spent_secs });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_learners_start_with_lives() {
        let tracker = InMemoryProgress::default();
        assert_eq!(tracker.progress().lives, Progress::STARTING_LIVES);
        assert!(!tracker.progress().has_completed(1));
    }

    #[test]
    fn rewards_saturate() {
        let mut tracker = InMemoryProgress::new(Progress { xp: u32::MAX - 1,
                                                           ..Progress::default() });
        tracker.add_xp_and_coins(10, 1);
        assert_eq!(tracker.progress().xp, u32::MAX);
        assert_eq!(tracker.progress().coins, 1);
    }
}
