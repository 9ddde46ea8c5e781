use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Simulator payload recorded on a resolved operation
///
/// Shaped per bot category. Faults are recorded as [`OperationResult::Error`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OperationResult {
    /// Credit purchase, sale or arbitrage scan
    Trade {
        credit_category: String,
        amount: Decimal,
        unit_price: Decimal,
        platform_fee: Decimal,
        transaction_id: Option<String>,
    },
    /// Pool deposit, withdrawal or rebalance
    Liquidity {
        pool: String,
        amount: Decimal,
        platform_fee: Decimal,
        transaction_id: Option<String>,
    },
    /// KYC check, audit pass or regulatory filing
    Compliance {
        credit_category: String,
        records_reviewed: u32,
        flagged: u32,
    },
    /// Price publication or valuation run
    Valuation {
        credit_category: String,
        price: Decimal,
        price_change_pct: f64,
        confidence: f64,
    },
    /// Document extraction, verification or certificate issuance
    Document {
        credit_category: String,
        documents_processed: u32,
        certified_amount: Option<Decimal>,
        platform_fee: Option<Decimal>,
    },
    /// Execution fault
    Error { error: String },
}

impl OperationResult {
    /// Monetary amount carried by the payload, if any
    pub fn amount(&self) -> Option<Decimal> {
        match self {
            OperationResult::Trade { amount, .. } | OperationResult::Liquidity { amount, .. } => {
                Some(*amount)
            }
            OperationResult::Document {
                certified_amount, ..
            } => *certified_amount,
            _ => None,
        }
    }

    /// Platform fee carried by the payload, if any
    pub fn platform_fee(&self) -> Option<Decimal> {
        match self {
            OperationResult::Trade { platform_fee, .. }
            | OperationResult::Liquidity { platform_fee, .. } => Some(*platform_fee),
            OperationResult::Document { platform_fee, .. } => *platform_fee,
            _ => None,
        }
    }

    /// Simulated on-chain transaction hash, if any
    pub fn transaction_id(&self) -> Option<&str> {
        match self {
            OperationResult::Trade { transaction_id, .. }
            | OperationResult::Liquidity { transaction_id, .. } => transaction_id.as_deref(),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            OperationResult::Error { error } => Some(error),
            _ => None,
        }
    }
}

/// Result data plus named sub-metrics (processing time, confidence, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationDetails {
    pub result: OperationResult,
    pub metrics: BTreeMap<String, f64>,
}

impl OperationDetails {
    pub fn new(result: OperationResult, metrics: BTreeMap<String, f64>) -> Self {
        Self { result, metrics }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            result: OperationResult::Error {
                error: message.into(),
            },
            metrics: BTreeMap::new(),
        }
    }
}
