use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::{BotCategory, BotConfiguration};
use crate::values::{BotId, Timestamp};

/// Longest dispatch interval a bot may be configured with
///
/// Keeps the interval representable as a millisecond `Duration`.
pub const MAX_OPERATION_INTERVAL_SECS: u64 = i64::MAX as u64 / 1000;

/// An autonomous agent managed by the orchestrator
///
/// Bots are created once and never removed. After creation only `is_active`
/// and `configuration` change through control calls; the dispatch bookkeeping
/// (`last_dispatched_at` and the counters) is maintained by the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bot {
    pub id: BotId,
    pub name: String,
    pub category: BotCategory,
    pub is_active: bool,
    /// Minimum spacing between two dispatches of this bot
    pub operation_interval_secs: u64,
    /// Set when an operation is dispatched (not when it resolves)
    pub last_dispatched_at: Option<Timestamp>,
    pub total_operations: u64,
    pub successful_operations: u64,
    /// Probability in [0, 1] that an operation succeeds
    pub success_rate: f64,
    pub configuration: BotConfiguration,
}

impl Bot {
    /// Create an inactive bot that has never been dispatched
    pub fn new(
        id: impl Into<BotId>,
        name: impl Into<String>,
        category: BotCategory,
        operation_interval_secs: u64,
        success_rate: f64,
        configuration: BotConfiguration,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            is_active: false,
            operation_interval_secs,
            last_dispatched_at: None,
            total_operations: 0,
            successful_operations: 0,
            success_rate,
            configuration,
        }
    }

    /// Dispatch interval, saturating at `Duration::MAX` for out-of-range values
    pub fn operation_interval(&self) -> Duration {
        i64::try_from(self.operation_interval_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX)
    }

    /// Time elapsed since the last dispatch; `None` if never dispatched
    pub fn elapsed_since_dispatch(&self, now: Timestamp) -> Option<Duration> {
        self.last_dispatched_at.map(|at| now - at)
    }

    /// Returns true if the bot may be dispatched at `now`
    ///
    /// A bot that was never dispatched is always due.
    pub fn is_due(&self, now: Timestamp) -> bool {
        match self.elapsed_since_dispatch(now) {
            None => true,
            Some(elapsed) => elapsed >= self.operation_interval(),
        }
    }

    /// Record a dispatch: stamps the dispatch time and bumps the lifetime counter
    pub fn mark_dispatched(&mut self, now: Timestamp) {
        self.last_dispatched_at = Some(now);
        self.total_operations += 1;
    }

    pub fn record_success(&mut self) {
        self.successful_operations += 1;
    }

    pub fn reset_counters(&mut self) {
        self.total_operations = 0;
        self.successful_operations = 0;
    }

    /// Observed success ratio (0.0 - 1.0), 0 when nothing ran yet
    pub fn observed_success_rate(&self) -> f64 {
        if self.total_operations == 0 {
            0.0
        } else {
            self.successful_operations as f64 / self.total_operations as f64
        }
    }
}
