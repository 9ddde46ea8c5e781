use serde::{Deserialize, Serialize};
use std::fmt;

use super::BotCategory;

/// Concrete unit of work a bot performs on a dispatch
///
/// Every kind belongs to exactly one [`BotCategory`]; the category decides
/// which kinds are drawn and with what weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    // Credit trading
    BuyCredits,
    SellCredits,
    ArbitrageScan,
    // Liquidity provisioning
    AddLiquidity,
    RemoveLiquidity,
    RebalancePool,
    // Compliance
    KycVerification,
    TransactionAudit,
    RegulatoryReport,
    // Pricing
    PriceUpdate,
    ValuationModel,
    RiskAssessment,
    // Document processing
    DocumentExtraction,
    CreditVerification,
    CertificateIssuance,
}

impl OperationKind {
    /// Category that owns this kind
    pub fn category(&self) -> BotCategory {
        match self {
            OperationKind::BuyCredits
            | OperationKind::SellCredits
            | OperationKind::ArbitrageScan => {
                BotCategory::CreditTrader
            }
            OperationKind::AddLiquidity
            | OperationKind::RemoveLiquidity
            | OperationKind::RebalancePool => BotCategory::LiquidityProvider,
            OperationKind::KycVerification
            | OperationKind::TransactionAudit
            | OperationKind::RegulatoryReport => BotCategory::ComplianceMonitor,
            OperationKind::PriceUpdate
            | OperationKind::ValuationModel
            | OperationKind::RiskAssessment => BotCategory::PriceOracle,
            OperationKind::DocumentExtraction
            | OperationKind::CreditVerification
            | OperationKind::CertificateIssuance => BotCategory::DocumentProcessor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::BuyCredits => "buy_credits",
            OperationKind::SellCredits => "sell_credits",
            OperationKind::ArbitrageScan => "arbitrage_scan",
            OperationKind::AddLiquidity => "add_liquidity",
            OperationKind::RemoveLiquidity => "remove_liquidity",
            OperationKind::RebalancePool => "rebalance_pool",
            OperationKind::KycVerification => "kyc_verification",
            OperationKind::TransactionAudit => "transaction_audit",
            OperationKind::RegulatoryReport => "regulatory_report",
            OperationKind::PriceUpdate => "price_update",
            OperationKind::ValuationModel => "valuation_model",
            OperationKind::RiskAssessment => "risk_assessment",
            OperationKind::DocumentExtraction => "document_extraction",
            OperationKind::CreditVerification => "credit_verification",
            OperationKind::CertificateIssuance => "certificate_issuance",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
