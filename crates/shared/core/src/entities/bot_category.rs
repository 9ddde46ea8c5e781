use serde::{Deserialize, Serialize};
use std::fmt;

use super::{OperationKind, TargetModule};

/// Kind of autonomous agent
///
/// Each category is bound to one domain simulator, one target module and a
/// fixed weighted table of operation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BotCategory {
    /// Buys and sells tokenized credits on the marketplace
    CreditTrader,
    /// Supplies and rebalances marketplace liquidity pools
    LiquidityProvider,
    /// KYC checks, transaction audits and regulatory reporting
    ComplianceMonitor,
    /// Publishes credit prices and valuations
    PriceOracle,
    /// Extracts and verifies credit documentation
    DocumentProcessor,
}

impl BotCategory {
    pub const ALL: [BotCategory; 5] = [
        BotCategory::CreditTrader,
        BotCategory::LiquidityProvider,
        BotCategory::ComplianceMonitor,
        BotCategory::PriceOracle,
        BotCategory::DocumentProcessor,
    ];

    /// Module every operation of this category is attributed to
    pub fn target_module(&self) -> TargetModule {
        match self {
            BotCategory::CreditTrader => TargetModule::Marketplace,
            BotCategory::LiquidityProvider => TargetModule::Liquidity,
            BotCategory::ComplianceMonitor => TargetModule::Compliance,
            BotCategory::PriceOracle => TargetModule::Analytics,
            BotCategory::DocumentProcessor => TargetModule::Documents,
        }
    }

    /// Weighted operation kinds valid for this category (weights are relative)
    pub fn operation_weights(&self) -> &'static [(OperationKind, u32)] {
        match self {
            BotCategory::CreditTrader => &[
                (OperationKind::BuyCredits, 40),
                (OperationKind::SellCredits, 40),
                (OperationKind::ArbitrageScan, 20),
            ],
            BotCategory::LiquidityProvider => &[
                (OperationKind::AddLiquidity, 50),
                (OperationKind::RemoveLiquidity, 20),
                (OperationKind::RebalancePool, 30),
            ],
            BotCategory::ComplianceMonitor => &[
                (OperationKind::KycVerification, 40),
                (OperationKind::TransactionAudit, 40),
                (OperationKind::RegulatoryReport, 20),
            ],
            BotCategory::PriceOracle => &[
                (OperationKind::PriceUpdate, 60),
                (OperationKind::ValuationModel, 25),
                (OperationKind::RiskAssessment, 15),
            ],
            BotCategory::DocumentProcessor => &[
                (OperationKind::DocumentExtraction, 50),
                (OperationKind::CreditVerification, 35),
                (OperationKind::CertificateIssuance, 15),
            ],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BotCategory::CreditTrader => "credit_trader",
            BotCategory::LiquidityProvider => "liquidity_provider",
            BotCategory::ComplianceMonitor => "compliance_monitor",
            BotCategory::PriceOracle => "price_oracle",
            BotCategory::DocumentProcessor => "document_processor",
        }
    }
}

impl fmt::Display for BotCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_tables_only_contain_own_kinds() {
        for category in BotCategory::ALL {
            let weights = category.operation_weights();
            assert!(!weights.is_empty());
            for (kind, weight) in weights {
                assert_eq!(kind.category(), category, "{kind} listed under {category}");
                assert!(*weight > 0);
            }
        }
    }

    #[test]
    fn test_target_modules_are_distinct() {
        let mut modules: Vec<_> = BotCategory::ALL.iter().map(|c| c.target_module()).collect();
        modules.sort();
        modules.dedup();
        assert_eq!(modules.len(), BotCategory::ALL.len());
    }
}
