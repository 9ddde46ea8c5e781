//! Credit Trader simulator
//!
//! Buys and sells tokenized credits. Unit prices are quoted per dollar of
//! credit face value; aggressive buyers pay up, aggressive sellers discount.

use crate::common::{
    draw_amount, draw_latency, pick_credit_category, platform_fee, to_decimal, transaction_hash,
    validate, validate_amount_bounds,
};
use crate::SimulatedOutcome;
use fleet_core::{Bot, BotCategory, OperationKind, OperationResult};
use fleet_ports::{RandomSource, SimulationResult};
use std::collections::BTreeMap;

/// Base price of one dollar of credit face value
const BASE_UNIT_PRICE: f64 = 0.90;

pub fn simulate(
    bot: &Bot,
    kind: OperationKind,
    rng: &mut dyn RandomSource,
) -> SimulationResult<SimulatedOutcome> {
    validate(bot, kind, BotCategory::CreditTrader)?;
    validate_amount_bounds(bot)?;

    let aggressiveness = bot.configuration.aggressiveness.clamp(0.0, 1.0);
    let success = rng.chance(bot.success_rate);
    let credit_category = pick_credit_category(bot, rng)?;
    let mut amount = draw_amount(bot, rng);

    let jitter = rng.range_f64(-0.02, 0.02);
    let unit_price = match kind {
        OperationKind::BuyCredits => BASE_UNIT_PRICE + 0.04 * aggressiveness + jitter,
        OperationKind::SellCredits => BASE_UNIT_PRICE - 0.03 * aggressiveness + jitter,
        _ => BASE_UNIT_PRICE + jitter,
    };

    let mut metrics = BTreeMap::new();
    if kind == OperationKind::ArbitrageScan {
        // Only part of the size is executable at the quoted spread
        let spread_bps = rng.range_f64(5.0, 80.0);
        amount = (amount * to_decimal(spread_bps / 100.0, 4)).round_dp(2);
        metrics.insert("spread_bps".to_string(), spread_bps);
    }

    let slippage_bps = rng.range_f64(0.0, 25.0) * (0.5 + aggressiveness);
    let transaction_id = success.then(|| transaction_hash(rng));
    let latency = draw_latency(rng, 800, 2500);

    metrics.insert("slippage_bps".to_string(), slippage_bps);
    metrics.insert("processing_time_ms".to_string(), latency.as_millis() as f64);

    log::trace!("[{}] {} {} {} @ {:.4}", bot.id, kind, amount, credit_category, unit_price);

    Ok(SimulatedOutcome {
        success,
        result: OperationResult::Trade {
            credit_category,
            amount,
            unit_price: to_decimal(unit_price, 4),
            platform_fee: platform_fee(bot, amount),
            transaction_id,
        },
        metrics,
        latency,
    })
}
