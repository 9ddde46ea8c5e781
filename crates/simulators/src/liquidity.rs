//! Liquidity Provider simulator

use crate::common::{
    draw_amount, draw_latency, pick_credit_category, platform_fee, to_decimal, transaction_hash,
    validate, validate_amount_bounds,
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
    validate(bot, kind, BotCategory::LiquidityProvider)?;
    validate_amount_bounds(bot)?;

    let success = rng.chance(bot.success_rate);
    let credit_category = pick_credit_category(bot, rng)?;
    let drawn = draw_amount(bot, rng);

    // Withdrawals and rebalances move a fraction of a full position
    let amount = match kind {
        OperationKind::RemoveLiquidity => {
            (drawn * to_decimal(rng.range_f64(0.2, 0.6), 4)).round_dp(2)
        }
        OperationKind::RebalancePool => {
            (drawn * to_decimal(rng.range_f64(0.05, 0.3), 4)).round_dp(2)
        }
        _ => drawn,
    };

    let utilization = rng.range_f64(0.35, 0.95);
    let apr = rng.range_f64(2.0, 12.0) * bot.configuration.risk_tolerance.factor();
    let transaction_id = success.then(|| transaction_hash(rng));
    let latency = draw_latency(rng, 1000, 3000);

    let mut metrics = BTreeMap::new();
    metrics.insert("pool_utilization".to_string(), utilization);
    metrics.insert("apr_pct".to_string(), apr);
    metrics.insert("processing_time_ms".to_string(), latency.as_millis() as f64);

    Ok(SimulatedOutcome {
        success,
        result: OperationResult::Liquidity {
            pool: format!("{credit_category}/USDC"),
            amount,
            platform_fee: platform_fee(bot, amount),
            transaction_id,
        },
        metrics,
        latency,
    })
}
