//! Running fleet metrics
//!
//! The aggregator consumes terminal operations only. Totals, per-module and
//! per-kind counters are kept so that each breakdown sums to the total.

use chrono::Utc;
use fleet_core::{Amount, Operation, OperationKind, TargetModule, Timestamp};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregate over every operation recorded since the last reset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub total_operations: u64,
    pub successful_operations: u64,
    pub failed_operations: u64,
    /// Running mean of operation durations
    pub average_duration_ms: f64,
    pub operations_by_module: BTreeMap<TargetModule, u64>,
    pub operations_by_type: BTreeMap<OperationKind, u64>,
    /// Sum of payload amounts
    pub volume_generated: Amount,
    /// Operations whose payload carried an amount
    pub credits_processed: u64,
    /// Operations whose payload carried a transaction id
    pub transactions_executed: u64,
    /// Sum of platform fees
    pub revenue_generated: Amount,
    pub last_updated: Option<Timestamp>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            total_operations: 0,
            successful_operations: 0,
            failed_operations: 0,
            average_duration_ms: 0.0,
            operations_by_module: BTreeMap::new(),
            operations_by_type: BTreeMap::new(),
            volume_generated: Decimal::ZERO,
            credits_processed: 0,
            transactions_executed: 0,
            revenue_generated: Decimal::ZERO,
            last_updated: None,
        }
    }
}

impl Metrics {
    /// Success rate as a percentage (0 - 100)
    pub fn success_rate(&self) -> f64 {
        if self.total_operations == 0 {
            0.0
        } else {
            self.successful_operations as f64 / self.total_operations as f64 * 100.0
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MetricsAggregator {
    metrics: Metrics,
}

impl MetricsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one resolved operation into the aggregate
    ///
    /// Returns false (and ignores the operation) if it is not terminal.
    pub fn update(&mut self, operation: &Operation) -> bool {
        if !operation.is_terminal() {
            log::warn!(
                "[{}] Ignoring non-terminal operation {} ({:?})",
                operation.bot_id,
                operation.id,
                operation.status
            );
            return false;
        }

        let m = &mut self.metrics;
        m.total_operations += 1;
        if operation.success {
            m.successful_operations += 1;
        } else {
            m.failed_operations += 1;
        }

        let n = m.total_operations as f64;
        let duration = operation.duration_ms.unwrap_or(0) as f64;
        m.average_duration_ms = (m.average_duration_ms * (n - 1.0) + duration) / n;

        *m.operations_by_module.entry(operation.target_module).or_insert(0) += 1;
        *m.operations_by_type.entry(operation.kind).or_insert(0) += 1;

        if let Some(details) = &operation.details {
            let result = &details.result;
            if let Some(amount) = result.amount() {
                m.volume_generated += amount;
                m.credits_processed += 1;
            }
            if let Some(fee) = result.platform_fee() {
                m.revenue_generated += fee;
            }
            if result.transaction_id().is_some() {
                m.transactions_executed += 1;
            }
        }

        m.last_updated = Some(operation.end_time.unwrap_or_else(Utc::now));
        true
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn snapshot(&self) -> Metrics {
        self.metrics.clone()
    }

    pub fn reset(&mut self) {
        self.metrics = Metrics::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone};
    use fleet_core::{Bot, BotCategory, BotConfiguration, OperationDetails, OperationResult};
    use rust_decimal_macros::dec;

    fn bot(category: BotCategory) -> Bot {
        Bot::new(
            "bot-1",
            "Bot One",
            category,
            60,
            1.0,
            BotConfiguration::for_category(category),
        )
    }

    fn trade(success: bool, duration_ms: i64, with_tx: bool) -> Operation {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut op = Operation::pending(
            &bot(BotCategory::CreditTrader),
            OperationKind::BuyCredits,
            start,
        );
        op.begin().unwrap();
        let result = OperationResult::Trade {
            credit_category: "solar_itc".into(),
            amount: dec!(10000),
            unit_price: dec!(0.92),
            platform_fee: dec!(250),
            transaction_id: with_tx.then(|| "0xabc".to_string()),
        };
        op.complete(
            Duration::milliseconds(duration_ms),
            success,
            OperationDetails::new(result, BTreeMap::new()),
        )
        .unwrap();
        op
    }

    fn fault(duration_ms: i64) -> Operation {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut op = Operation::pending(
            &bot(BotCategory::ComplianceMonitor),
            OperationKind::KycVerification,
            start,
        );
        op.begin().unwrap();
        op.fail(Duration::milliseconds(duration_ms), "boom").unwrap();
        op
    }

    #[test]
    fn test_counts_by_success_flag() {
        let mut agg = MetricsAggregator::new();
        agg.update(&trade(true, 1000, true));
        agg.update(&trade(false, 2000, false));
        agg.update(&fault(3000));

        let m = agg.metrics();
        assert_eq!(m.total_operations, 3);
        assert_eq!(m.successful_operations, 1);
        assert_eq!(m.failed_operations, 2);
        assert_eq!(m.total_operations, m.successful_operations + m.failed_operations);
        assert_relative_eq!(m.average_duration_ms, 2000.0);
        assert_relative_eq!(m.success_rate(), 100.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_breakdowns_sum_to_total() {
        let mut agg = MetricsAggregator::new();
        agg.update(&trade(true, 1000, true));
        agg.update(&trade(true, 1000, true));
        agg.update(&fault(500));

        let m = agg.metrics();
        assert_eq!(m.operations_by_module.values().sum::<u64>(), m.total_operations);
        assert_eq!(m.operations_by_type.values().sum::<u64>(), m.total_operations);
        assert_eq!(m.operations_by_module[&TargetModule::Marketplace], 2);
        assert_eq!(m.operations_by_module[&TargetModule::Compliance], 1);
        assert_eq!(m.operations_by_type[&OperationKind::BuyCredits], 2);
    }

    #[test]
    fn test_financial_rollups_skip_missing_fields() {
        let mut agg = MetricsAggregator::new();
        agg.update(&trade(true, 100, true));
        // Failed business outcome still carries an amount and fee
        agg.update(&trade(false, 100, false));
        agg.update(&fault(100));

        let m = agg.metrics();
        assert_eq!(m.volume_generated, dec!(20000));
        assert_eq!(m.credits_processed, 2);
        assert_eq!(m.revenue_generated, dec!(500));
        assert_eq!(m.transactions_executed, 1);
    }

    #[test]
    fn test_non_terminal_ignored() {
        let mut agg = MetricsAggregator::new();
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let op = Operation::pending(
            &bot(BotCategory::PriceOracle),
            OperationKind::PriceUpdate,
            start,
        );

        assert!(!agg.update(&op));
        assert_eq!(agg.metrics().total_operations, 0);
    }

    #[test]
    fn test_reset_zeroes_everything() {
        let mut agg = MetricsAggregator::new();
        agg.update(&trade(true, 1000, true));
        agg.reset();
        assert_eq!(agg.snapshot(), Metrics::default());
    }
}
