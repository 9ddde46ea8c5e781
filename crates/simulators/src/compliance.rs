//! Compliance Monitor simulator
//!
//! Reviews batches of records and flags a risk-dependent share of them.

use crate::common::{draw_latency, pick_credit_category, validate};
use crate::SimulatedOutcome;
use fleet_core::{Bot, BotCategory, OperationKind, OperationResult};
use fleet_ports::{RandomSource, SimulationResult};
use std::collections::BTreeMap;

/// Base probability that a reviewed record is flagged
const BASE_FLAG_RATE: f64 = 0.04;

pub fn simulate(
    bot: &Bot,
    kind: OperationKind,
    rng: &mut dyn RandomSource,
) -> SimulationResult<SimulatedOutcome> {
    validate(bot, kind, BotCategory::ComplianceMonitor)?;

    let success = rng.chance(bot.success_rate);
    let credit_category = pick_credit_category(bot, rng)?;

    let records_reviewed = match kind {
        OperationKind::KycVerification => rng.range_u32(1, 5),
        OperationKind::TransactionAudit => rng.range_u32(10, 50),
        _ => rng.range_u32(50, 200),
    };

    // Stricter monitors (low tolerance) flag more
    let flag_rate = BASE_FLAG_RATE / bot.configuration.risk_tolerance.factor();
    let flagged = (0..records_reviewed).filter(|_| rng.chance(flag_rate)).count() as u32;

    let confidence = rng.range_f64(0.80, 0.99);
    let latency = draw_latency(rng, 500, 2000);

    let mut metrics = BTreeMap::new();
    metrics.insert("confidence".to_string(), confidence);
    metrics.insert(
        "flag_rate".to_string(),
        flagged as f64 / records_reviewed.max(1) as f64,
    );
    metrics.insert("processing_time_ms".to_string(), latency.as_millis() as f64);

    Ok(SimulatedOutcome {
        success,
        result: OperationResult::Compliance {
            credit_category,
            records_reviewed,
            flagged,
        },
        metrics,
        latency,
    })
}
