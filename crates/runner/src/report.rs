//! Snapshot and report types returned by the control surface
//!
//! Everything here serializes to JSON for the control panel.

use fleet_core::{Bot, BotCategory, BotId, Operation, TargetModule, Timestamp};
use serde::Serialize;

use crate::metrics::Metrics;

/// Outcome of a `start` / `stop` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlResult {
    pub success: bool,
    pub message: String,
}

impl ControlResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// What one scheduler pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TickSummary {
    /// Sequence number of the pass (0 when the orchestrator was stopped)
    pub tick: u64,
    pub dispatched: usize,
    pub completed: usize,
    pub failed: usize,
    /// Operations whose business outcome was a success
    pub successful: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusSnapshot {
    pub is_running: bool,
    pub bots: Vec<Bot>,
    pub metrics: Metrics,
    /// Newest first
    pub recent_operations: Vec<Operation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BotPerformance {
    pub bot_id: BotId,
    pub name: String,
    pub category: BotCategory,
    pub is_active: bool,
    pub total_operations: u64,
    pub successful_operations: u64,
    /// Observed success rate, percentage
    pub success_rate: f64,
    /// Configured success probability
    pub configured_success_rate: f64,
    pub last_dispatched_at: Option<Timestamp>,
}

impl From<&Bot> for BotPerformance {
    fn from(bot: &Bot) -> Self {
        Self {
            bot_id: bot.id.clone(),
            name: bot.name.clone(),
            category: bot.category,
            is_active: bot.is_active,
            total_operations: bot.total_operations,
            successful_operations: bot.successful_operations,
            success_rate: bot.observed_success_rate() * 100.0,
            configured_success_rate: bot.success_rate,
            last_dispatched_at: bot.last_dispatched_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleActivity {
    pub module: TargetModule,
    pub operations: u64,
    /// Share of all operations, percentage
    pub share: f64,
}

/// Read-only performance summary
#[derive(Debug, Clone, Serialize)]
pub struct DetailedReport {
    pub generated_at: Timestamp,
    pub is_running: bool,
    /// Seconds since the last `start` (0 when stopped)
    pub uptime_secs: i64,
    /// Percentage
    pub success_rate: f64,
    pub total_operations: u64,
    pub operations_per_minute: f64,
    pub bot_performance: Vec<BotPerformance>,
    /// Busiest modules first
    pub top_modules: Vec<ModuleActivity>,
    pub metrics: Metrics,
}

impl DetailedReport {
    pub fn build(
        generated_at: Timestamp,
        started_at: Option<Timestamp>,
        bots: &[Bot],
        metrics: &Metrics,
    ) -> Self {
        let uptime_secs = started_at
            .map(|at| (generated_at - at).num_seconds().max(0))
            .unwrap_or(0);

        let operations_per_minute = if uptime_secs > 0 {
            metrics.total_operations as f64 / (uptime_secs as f64 / 60.0)
        } else {
            0.0
        };

        let mut top_modules: Vec<ModuleActivity> = metrics
            .operations_by_module
            .iter()
            .map(|(module, count)| ModuleActivity {
                module: *module,
                operations: *count,
                share: if metrics.total_operations == 0 {
                    0.0
                } else {
                    *count as f64 / metrics.total_operations as f64 * 100.0
                },
            })
            .collect();
        top_modules.sort_by(|a, b| b.operations.cmp(&a.operations).then(a.module.cmp(&b.module)));

        Self {
            generated_at,
            is_running: started_at.is_some(),
            uptime_secs,
            success_rate: metrics.success_rate(),
            total_operations: metrics.total_operations,
            operations_per_minute,
            bot_performance: bots.iter().map(BotPerformance::from).collect(),
            top_modules,
            metrics: metrics.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone, Utc};
    use fleet_core::{BotConfiguration, OperationKind};

    #[test]
    fn test_control_result_constructors() {
        assert!(ControlResult::ok("started").success);
        let rejected = ControlResult::rejected("already running");
        assert!(!rejected.success);
        assert_eq!(rejected.message, "already running");
    }

    #[test]
    fn test_report_rates_and_ordering() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut metrics = Metrics::default();
        metrics.total_operations = 10;
        metrics.successful_operations = 8;
        metrics.failed_operations = 2;
        metrics.operations_by_module.insert(TargetModule::Analytics, 3);
        metrics.operations_by_module.insert(TargetModule::Marketplace, 7);
        metrics.operations_by_type.insert(OperationKind::PriceUpdate, 3);
        metrics.operations_by_type.insert(OperationKind::BuyCredits, 7);

        let mut bot = Bot::new(
            "trader-alpha",
            "Credit Trader Alpha",
            BotCategory::CreditTrader,
            120,
            0.9,
            BotConfiguration::for_category(BotCategory::CreditTrader),
        );
        bot.total_operations = 4;
        bot.successful_operations = 3;

        let report = DetailedReport::build(t0 + Duration::minutes(5), Some(t0), &[bot], &metrics);

        assert!(report.is_running);
        assert_eq!(report.uptime_secs, 300);
        assert_relative_eq!(report.success_rate, 80.0);
        assert_relative_eq!(report.operations_per_minute, 2.0);
        assert_eq!(report.top_modules[0].module, TargetModule::Marketplace);
        assert_relative_eq!(report.top_modules[0].share, 70.0);
        assert_relative_eq!(report.bot_performance[0].success_rate, 75.0);
    }

    #[test]
    fn test_report_when_stopped() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let report = DetailedReport::build(t0, None, &[], &Metrics::default());

        assert!(!report.is_running);
        assert_eq!(report.uptime_secs, 0);
        assert_relative_eq!(report.operations_per_minute, 0.0);
        assert!(report.top_modules.is_empty());
    }
}
