use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::BotCategory;

/// Qualitative risk appetite of a bot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTolerance {
    Low,
    #[default]
    Medium,
    High,
}

impl RiskTolerance {
    /// Multiplier applied to risk-sensitive draws (sizes, flag rates)
    pub fn factor(&self) -> f64 {
        match self {
            RiskTolerance::Low => 0.5,
            RiskTolerance::Medium => 1.0,
            RiskTolerance::High => 1.5,
        }
    }
}

/// Tunable parameters of a bot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfiguration {
    /// Lower bound of simulated amounts
    pub min_amount: Decimal,
    /// Upper bound of simulated amounts
    pub max_amount: Decimal,
    /// Credit labels this bot is allowed to work with
    pub credit_categories: Vec<String>,
    /// How eagerly the bot acts (0.0 - 1.0)
    pub aggressiveness: f64,
    pub risk_tolerance: RiskTolerance,
    /// Platform fee charged on simulated amounts (e.g. 0.025 = 2.5%)
    pub platform_fee_rate: Decimal,
}

impl Default for BotConfiguration {
    fn default() -> Self {
        Self {
            min_amount: dec!(1000),
            max_amount: dec!(50000),
            credit_categories: default_credit_categories(),
            aggressiveness: 0.5,
            risk_tolerance: RiskTolerance::Medium,
            platform_fee_rate: dec!(0.025),
        }
    }
}

/// Credit programs the marketplace lists by default
pub fn default_credit_categories() -> Vec<String> {
    [
        "solar_itc",
        "wind_ptc",
        "low_income_housing",
        "historic_rehabilitation",
        "carbon_capture",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl BotConfiguration {
    /// Sensible starting configuration for a bot category
    pub fn for_category(category: BotCategory) -> Self {
        match category {
            BotCategory::CreditTrader => Self {
                min_amount: dec!(5000),
                max_amount: dec!(250000),
                aggressiveness: 0.6,
                ..Default::default()
            },
            BotCategory::LiquidityProvider => Self {
                min_amount: dec!(25000),
                max_amount: dec!(500000),
                aggressiveness: 0.4,
                risk_tolerance: RiskTolerance::Low,
                platform_fee_rate: dec!(0.003),
                ..Default::default()
            },
            BotCategory::ComplianceMonitor => Self {
                min_amount: dec!(0),
                max_amount: dec!(0),
                aggressiveness: 0.3,
                risk_tolerance: RiskTolerance::Low,
                platform_fee_rate: dec!(0),
                ..Default::default()
            },
            BotCategory::PriceOracle => Self {
                min_amount: dec!(0.85),
                max_amount: dec!(0.98),
                aggressiveness: 0.5,
                platform_fee_rate: dec!(0),
                ..Default::default()
            },
            BotCategory::DocumentProcessor => Self {
                min_amount: dec!(10000),
                max_amount: dec!(1000000),
                aggressiveness: 0.5,
                platform_fee_rate: dec!(0.01),
                ..Default::default()
            },
        }
    }

    /// Merge the fields set in `patch` into this configuration
    pub fn apply(&mut self, patch: &ConfigPatch) {
        if let Some(min_amount) = patch.min_amount {
            self.min_amount = min_amount;
        }
        if let Some(max_amount) = patch.max_amount {
            self.max_amount = max_amount;
        }
        if let Some(categories) = &patch.credit_categories {
            self.credit_categories = categories.clone();
        }
        if let Some(aggressiveness) = patch.aggressiveness {
            self.aggressiveness = aggressiveness;
        }
        if let Some(risk_tolerance) = patch.risk_tolerance {
            self.risk_tolerance = risk_tolerance;
        }
        if let Some(fee_rate) = patch.platform_fee_rate {
            self.platform_fee_rate = fee_rate;
        }
    }
}

/// Partial configuration update; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigPatch {
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    pub credit_categories: Option<Vec<String>>,
    pub aggressiveness: Option<f64>,
    pub risk_tolerance: Option<RiskTolerance>,
    pub platform_fee_rate: Option<Decimal>,
}

impl ConfigPatch {
    pub fn is_empty(&self) -> bool {
        self == &ConfigPatch::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_merges_only_set_fields() {
        let mut config = BotConfiguration::for_category(BotCategory::CreditTrader);
        let before = config.clone();

        let patch = ConfigPatch {
            max_amount: Some(dec!(75000)),
            risk_tolerance: Some(RiskTolerance::High),
            ..Default::default()
        };
        config.apply(&patch);

        assert_eq!(config.max_amount, dec!(75000));
        assert_eq!(config.risk_tolerance, RiskTolerance::High);
        assert_eq!(config.min_amount, before.min_amount);
        assert_eq!(config.credit_categories, before.credit_categories);
        assert_eq!(config.aggressiveness, before.aggressiveness);
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let mut config = BotConfiguration::default();
        let patch = ConfigPatch::default();
        assert!(patch.is_empty());

        config.apply(&patch);
        assert_eq!(config, BotConfiguration::default());
    }

    #[test]
    fn test_patch_deserializes_partial_json() {
        let patch: ConfigPatch =
            serde_json::from_str(r#"{"aggressiveness": 0.9, "credit_categories": ["wind_ptc"]}"#)
                .unwrap();

        assert_eq!(patch.aggressiveness, Some(0.9));
        assert_eq!(patch.credit_categories, Some(vec!["wind_ptc".to_string()]));
        assert!(patch.min_amount.is_none());
    }
}
