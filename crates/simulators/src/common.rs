//! Draw helpers and validation shared by the category simulators

use fleet_core::{Bot, BotCategory, OperationKind};
use fleet_ports::{RandomSource, SimulationError, SimulationResult};
use rust_decimal::Decimal;
use std::fmt::Write;
use std::time::Duration;

/// Reject inputs the simulation cannot run with
pub(crate) fn validate(
    bot: &Bot,
    kind: OperationKind,
    expected: BotCategory,
) -> SimulationResult<()> {
    if kind.category() != expected {
        return Err(SimulationError::UnsupportedKind {
            kind,
            category: expected,
        });
    }
    if !(0.0..=1.0).contains(&bot.success_rate) || bot.success_rate.is_nan() {
        return Err(SimulationError::InvalidSuccessRate {
            bot_id: bot.id.clone(),
            rate: bot.success_rate,
        });
    }
    Ok(())
}

/// Require `min_amount <= max_amount` and a non-negative lower bound
pub(crate) fn validate_amount_bounds(bot: &Bot) -> SimulationResult<()> {
    let config = &bot.configuration;
    if config.min_amount.is_sign_negative() {
        return Err(invalid(bot, format!("min_amount {} is negative", config.min_amount)));
    }
    if config.min_amount > config.max_amount {
        return Err(invalid(
            bot,
            format!(
                "min_amount {} exceeds max_amount {}",
                config.min_amount, config.max_amount
            ),
        ));
    }
    Ok(())
}

pub(crate) fn invalid(bot: &Bot, reason: impl Into<String>) -> SimulationError {
    SimulationError::InvalidConfiguration {
        bot_id: bot.id.clone(),
        reason: reason.into(),
    }
}

/// Convert a float draw to a Decimal rounded to `dp` places
pub(crate) fn to_decimal(value: f64, dp: u32) -> Decimal {
    Decimal::from_f64_retain(value)
        .unwrap_or(Decimal::ZERO)
        .round_dp(dp)
}

/// Draw an amount in `[min_amount, max_amount]`
///
/// Risk tolerance skews the draw: high tolerance pushes toward the upper
/// bound, low tolerance toward the lower one.
pub(crate) fn draw_amount(bot: &Bot, rng: &mut dyn RandomSource) -> Decimal {
    let config = &bot.configuration;
    let fraction = (rng.next_f64() * config.risk_tolerance.factor()).min(1.0);
    let span = config.max_amount - config.min_amount;
    (config.min_amount + span * to_decimal(fraction, 6)).round_dp(2)
}

/// Pick a credit label from the bot's allow-list
pub(crate) fn pick_credit_category(
    bot: &Bot,
    rng: &mut dyn RandomSource,
) -> SimulationResult<String> {
    let categories = &bot.configuration.credit_categories;
    if categories.is_empty() {
        return Err(invalid(bot, "credit_categories allow-list is empty"));
    }
    Ok(categories[rng.index(categories.len())].clone())
}

pub(crate) fn platform_fee(bot: &Bot, amount: Decimal) -> Decimal {
    (amount * bot.configuration.platform_fee_rate).round_dp(2)
}

/// Simulated 32-byte transaction hash
pub(crate) fn transaction_hash(rng: &mut dyn RandomSource) -> String {
    let mut hash = String::with_capacity(66);
    hash.push_str("0x");
    for _ in 0..8 {
        let word = (rng.next_f64() * u32::MAX as f64) as u32;
        let _ = write!(hash, "{word:08x}");
    }
    hash
}

pub(crate) fn draw_latency(rng: &mut dyn RandomSource, min_ms: u32, max_ms: u32) -> Duration {
    Duration::from_millis(rng.range_u32(min_ms, max_ms) as u64)
}
