use serde::{Deserialize, Serialize};
use std::fmt;

/// Marketplace module an operation is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetModule {
    Marketplace,
    Liquidity,
    Compliance,
    Analytics,
    Documents,
}

impl TargetModule {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetModule::Marketplace => "marketplace",
            TargetModule::Liquidity => "liquidity",
            TargetModule::Compliance => "compliance",
            TargetModule::Analytics => "analytics",
            TargetModule::Documents => "documents",
        }
    }
}

impl fmt::Display for TargetModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
