//! Fleet Core Domain
//!
//! Pure domain types for the bot fleet orchestrator.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    // Bots and their tuning
    Bot,
    MAX_OPERATION_INTERVAL_SECS,
    BotCategory,
    BotConfiguration,
    ConfigPatch,
    RiskTolerance,
    // Operations and their lifecycle
    LifecycleError,
    Operation,
    OperationDetails,
    OperationId,
    OperationKind,
    OperationResult,
    OperationStatus,
    TargetModule,
};
pub use values::{Amount, BotId, Timestamp};
