//! Price Oracle simulator
//!
//! `min_amount`/`max_amount` are read as the price band per dollar of credit
//! face value (e.g. 0.85 - 0.98).

use crate::common::{
    draw_amount, draw_latency, pick_credit_category, validate, validate_amount_bounds,
};
use crate::SimulatedOutcome;
use fleet_core::{Bot, BotCategory, OperationKind, OperationResult};
use fleet_ports::{RandomSource, SimulationResult};
use std::collections::BTreeMap;

pub fn simulate(
    bot: &Bot,
    kind: OperationKind,
    rng: &mut dyn RandomSource,
) -> SimulationResult<SimulatedOutcome> {
    validate(bot, kind, BotCategory::PriceOracle)?;
    validate_amount_bounds(bot)?;

    let success = rng.chance(bot.success_rate);
    let credit_category = pick_credit_category(bot, rng)?;
    let price = draw_amount(bot, rng).round_dp(4);

    let max_move = 2.5 * (0.5 + bot.configuration.aggressiveness.clamp(0.0, 1.0));
    let price_change_pct = rng.range_f64(-max_move, max_move);

    // Heavier models are slower and more confident
    let (confidence, latency) = match kind {
        OperationKind::PriceUpdate => (rng.range_f64(0.70, 0.90), draw_latency(rng, 200, 800)),
        OperationKind::ValuationModel => (rng.range_f64(0.80, 0.97), draw_latency(rng, 600, 1800)),
        _ => (rng.range_f64(0.75, 0.95), draw_latency(rng, 400, 1200)),
    };

    let mut metrics = BTreeMap::new();
    metrics.insert("confidence".to_string(), confidence);
    metrics.insert("processing_time_ms".to_string(), latency.as_millis() as f64);
    if kind == OperationKind::RiskAssessment {
        metrics.insert("risk_score".to_string(), rng.range_f64(0.0, 100.0));
    }

    Ok(SimulatedOutcome {
        success,
        result: OperationResult::Valuation {
            credit_category,
            price,
            price_change_pct,
            confidence,
        },
        metrics,
        latency,
    })
}
