//! Document Processor simulator
//!
//! Only certificate issuance carries money: the certified credit amount and
//! the issuance fee.

use crate::common::{
    draw_amount, draw_latency, pick_credit_category, platform_fee, validate, validate_amount_bounds,
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
    validate(bot, kind, BotCategory::DocumentProcessor)?;

    let success = rng.chance(bot.success_rate);
    let credit_category = pick_credit_category(bot, rng)?;

    let (documents_processed, certified_amount) = match kind {
        OperationKind::DocumentExtraction => (rng.range_u32(1, 20), None),
        OperationKind::CreditVerification => (rng.range_u32(1, 5), None),
        _ => {
            validate_amount_bounds(bot)?;
            (1, Some(draw_amount(bot, rng)))
        }
    };

    let accuracy = rng.range_f64(0.90, 0.995);
    let pages = documents_processed * rng.range_u32(2, 40);
    let latency = draw_latency(rng, 1500, 4000);

    let mut metrics = BTreeMap::new();
    metrics.insert("accuracy".to_string(), accuracy);
    metrics.insert("pages_scanned".to_string(), pages as f64);
    metrics.insert("processing_time_ms".to_string(), latency.as_millis() as f64);

    Ok(SimulatedOutcome {
        success,
        result: OperationResult::Document {
            credit_category,
            documents_processed,
            certified_amount,
            platform_fee: certified_amount.map(|amount| platform_fee(bot, amount)),
        },
        metrics,
        latency,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SeededRandom;
    use fleet_core::BotConfiguration;
    use rust_decimal_macros::dec;

    fn processor() -> Bot {
        Bot::new(
            "docs-1",
            "Document Processor",
            BotCategory::DocumentProcessor,
            240,
            0.92,
            BotConfiguration::for_category(BotCategory::DocumentProcessor),
        )
    }

    #[test]
    fn test_certificate_issuance_carries_amount_and_fee() {
        let bot = processor();
        let outcome =
            simulate(&bot, OperationKind::CertificateIssuance, &mut SeededRandom::from_seed(8))
                .unwrap();

        let amount = outcome.result.amount().unwrap();
        assert_eq!(outcome.result.platform_fee(), Some((amount * dec!(0.01)).round_dp(2)));
    }

    #[test]
    fn test_extraction_has_no_amount() {
        let bot = processor();
        let outcome =
            simulate(&bot, OperationKind::DocumentExtraction, &mut SeededRandom::from_seed(8))
                .unwrap();

        assert!(outcome.result.amount().is_none());
        assert!(outcome.metrics["pages_scanned"] >= 2.0);
    }

    #[test]
    fn test_inverted_bounds_only_matter_for_issuance() {
        let mut bot = processor();
        bot.configuration.min_amount = dec!(10);
        bot.configuration.max_amount = dec!(1);

        let mut rng = SeededRandom::from_seed(8);
        assert!(simulate(&bot, OperationKind::DocumentExtraction, &mut rng).is_ok());
        assert!(simulate(&bot, OperationKind::CertificateIssuance, &mut rng).is_err());
    }
}
