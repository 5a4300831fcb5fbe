//! Engine tunables.

/// Consecutive out-of-stock weeks after which a variant becomes "notify me".
pub const DEFAULT_NOTIFY_ME_WEEKS: u32 = 4;

/// Status history entries kept per variant.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Classifier and batch processor configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// `backorder_weeks` threshold for the notify-me rule (inclusive).
    pub notify_me_weeks: u32,
    /// Maximum status history length per variant.
    pub history_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            notify_me_weeks: DEFAULT_NOTIFY_ME_WEEKS,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl EngineConfig {
    pub fn with_notify_me_weeks(mut self, weeks: u32) -> Self {
        self.notify_me_weeks = weeks;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }
}
