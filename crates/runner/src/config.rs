//! Configuration loading for the orchestrator
//!
//! Supports JSON configuration files for:
//! - Scheduler settings (tick cadence, per-operation timeout)
//! - Operation log and status sizing
//! - The bot fleet, with per-bot overrides on top of category defaults

use fleet_core::{
    Bot, BotCategory, BotConfiguration, BotId, ConfigPatch, MAX_OPERATION_INTERVAL_SECS,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::operation_log::DEFAULT_LOG_CAPACITY;

/// Largest accepted clock speed-up
pub const MAX_TIME_SCALE: u32 = 100_000;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Root configuration for the orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Scheduler cadence: how often due bots are evaluated
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Upper bound on a single operation's simulated work
    #[serde(default = "default_operation_timeout_ms")]
    pub operation_timeout_ms: u64,

    /// Operation log capacity (oldest entries evicted beyond this)
    #[serde(default = "default_log_capacity")]
    pub log_capacity: usize,

    /// Number of operations included in a status snapshot
    #[serde(default = "default_status_recent_limit")]
    pub status_recent_limit: usize,

    /// Random seed for reproducible runs (entropy if absent)
    #[serde(default)]
    pub seed: Option<u64>,

    /// Clock speed-up for demo runs (e.g. 60 = one minute per second)
    #[serde(default)]
    pub time_scale: Option<u32>,

    /// Bot fleet
    #[serde(default = "default_fleet")]
    pub bots: Vec<BotDefinition>,
}

fn default_tick_interval_ms() -> u64 {
    1_000
}

fn default_operation_timeout_ms() -> u64 {
    30_000
}

fn default_log_capacity() -> usize {
    DEFAULT_LOG_CAPACITY
}

fn default_status_recent_limit() -> usize {
    50
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            operation_timeout_ms: default_operation_timeout_ms(),
            log_capacity: default_log_capacity(),
            status_recent_limit: default_status_recent_limit(),
            seed: None,
            time_scale: None,
            bots: default_fleet(),
        }
    }
}

impl OrchestratorConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("tick_interval_ms must be positive".into()));
        }
        if self.operation_timeout_ms == 0 {
            return Err(ConfigError::Invalid("operation_timeout_ms must be positive".into()));
        }
        if self.log_capacity == 0 {
            return Err(ConfigError::Invalid("log_capacity must be positive".into()));
        }
        if let Some(scale) = self.time_scale {
            if scale > MAX_TIME_SCALE {
                return Err(ConfigError::Invalid(format!(
                    "time_scale {} exceeds {}",
                    scale, MAX_TIME_SCALE
                )));
            }
        }
        if self.bots.is_empty() {
            return Err(ConfigError::Invalid("at least one bot must be defined".into()));
        }

        let mut seen = HashSet::new();
        for bot in &self.bots {
            if !seen.insert(bot.id.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate bot id: {}", bot.id)));
            }
            bot.validate()?;
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }
}

/// One bot in the fleet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotDefinition {
    pub id: BotId,
    pub name: String,
    pub category: BotCategory,
    pub operation_interval_secs: u64,
    pub success_rate: f64,
    /// Overrides applied on top of the category defaults
    #[serde(default)]
    pub configuration: ConfigPatch,
}

impl BotDefinition {
    pub fn new(
        id: impl Into<BotId>,
        name: impl Into<String>,
        category: BotCategory,
        operation_interval_secs: u64,
        success_rate: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            operation_interval_secs,
            success_rate,
            configuration: ConfigPatch::default(),
        }
    }

    pub fn with_configuration(mut self, patch: ConfigPatch) -> Self {
        self.configuration = patch;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.id.trim().is_empty() {
            return Err(ConfigError::Invalid("bot id must not be empty".into()));
        }
        if self.operation_interval_secs == 0 {
            return Err(ConfigError::Invalid(format!(
                "{}: operation_interval_secs must be positive",
                self.id
            )));
        }
        if self.operation_interval_secs > MAX_OPERATION_INTERVAL_SECS {
            return Err(ConfigError::Invalid(format!(
                "{}: operation_interval_secs {} exceeds {}",
                self.id, self.operation_interval_secs, MAX_OPERATION_INTERVAL_SECS
            )));
        }
        if !(0.0..=1.0).contains(&self.success_rate) {
            return Err(ConfigError::Invalid(format!(
                "{}: success_rate {} outside [0, 1]",
                self.id, self.success_rate
            )));
        }
        Ok(())
    }

    /// Build the runtime bot (inactive, never dispatched)
    pub fn to_bot(&self) -> Bot {
        let mut configuration = BotConfiguration::for_category(self.category);
        configuration.apply(&self.configuration);

        Bot::new(
            self.id.clone(),
            self.name.clone(),
            self.category,
            self.operation_interval_secs,
            self.success_rate,
            configuration,
        )
    }
}

/// Five-bot fleet, one per category, staggered 120s - 240s
pub fn default_fleet() -> Vec<BotDefinition> {
    vec![
        BotDefinition::new(
            "trader-alpha",
            "Credit Trader Alpha",
            BotCategory::CreditTrader,
            120,
            0.92,
        ),
        BotDefinition::new(
            "liquidity-prime",
            "Liquidity Prime",
            BotCategory::LiquidityProvider,
            150,
            0.95,
        ),
        BotDefinition::new(
            "compliance-sentinel",
            "Compliance Sentinel",
            BotCategory::ComplianceMonitor,
            180,
            0.98,
        ),
        BotDefinition::new(
            "price-oracle",
            "Price Oracle",
            BotCategory::PriceOracle,
            210,
            0.97,
        ),
        BotDefinition::new(
            "doc-processor",
            "Document Processor",
            BotCategory::DocumentProcessor,
            240,
            0.90,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config_is_valid() {
        let config = OrchestratorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bots.len(), 5);
        assert_eq!(config.log_capacity, 1000);
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = OrchestratorConfig::from_json("{}").unwrap();
        assert_eq!(config.bots.len(), 5);
        assert_eq!(config.operation_timeout_ms, 30_000);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_parse_bot_overrides() {
        let json = r#"{
            "tick_interval_ms": 500,
            "seed": 7,
            "bots": [
                {
                    "id": "trader-x",
                    "name": "Trader X",
                    "category": "credit_trader",
                    "operation_interval_secs": 30,
                    "success_rate": 0.75,
                    "configuration": { "max_amount": "90000", "risk_tolerance": "high" }
                }
            ]
        }"#;

        let config = OrchestratorConfig::from_json(json).unwrap();
        assert_eq!(config.tick_interval_ms, 500);
        assert_eq!(config.seed, Some(7));

        let bot = config.bots[0].to_bot();
        assert_eq!(bot.configuration.max_amount, dec!(90000));
        assert_eq!(bot.configuration.risk_tolerance, fleet_core::RiskTolerance::High);
        // Untouched fields keep category defaults
        assert_eq!(bot.configuration.min_amount, dec!(5000));
        assert!(!bot.is_active);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut config = OrchestratorConfig::default();
        config.bots.push(config.bots[0].clone());

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn test_out_of_range_success_rate_rejected() {
        let mut config = OrchestratorConfig::default();
        config.bots[2].success_rate = 1.2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_interval_rejected() {
        for secs in [u64::MAX, 10_000_000_000_000_000, MAX_OPERATION_INTERVAL_SECS + 1] {
            let mut config = OrchestratorConfig::default();
            config.bots[0].operation_interval_secs = secs;

            let err = config.validate().unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("trader-alpha")));
        }

        let mut config = OrchestratorConfig::default();
        config.bots[0].operation_interval_secs = MAX_OPERATION_INTERVAL_SECS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_time_scale_bounded() {
        let mut config = OrchestratorConfig::default();
        config.time_scale = Some(3_000_000_000);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.time_scale = Some(MAX_TIME_SCALE);
        assert!(config.validate().is_ok());

        let json = r#"{ "time_scale": 4294967295 }"#;
        assert!(matches!(
            OrchestratorConfig::from_json(json),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = OrchestratorConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_sample_config_parses() {
        let config =
            OrchestratorConfig::from_json(include_str!("../../../config/fleet.json")).unwrap();
        assert_eq!(config.bots.len(), 5);
        assert_eq!(config.time_scale, Some(60));

        let docs = config.bots[4].to_bot();
        assert_eq!(docs.configuration.max_amount, dec!(2000000));
        assert_eq!(docs.configuration.platform_fee_rate, dec!(0.0125));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = OrchestratorConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
