use fleet_core::{BotCategory, OperationKind};
use thiserror::Error;

/// Genuine simulator errors
///
/// A probabilistic "unsuccessful" outcome is not an error; it is reported as
/// `success = false` by the simulator. These variants mean the simulation
/// could not run at all.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Invalid configuration for {bot_id}: {reason}")]
    InvalidConfiguration { bot_id: String, reason: String },

    #[error("Success rate out of range for {bot_id}: {rate}")]
    InvalidSuccessRate { bot_id: String, rate: f64 },

    #[error("Operation kind {kind} is not handled by {category} simulator")]
    UnsupportedKind {
        kind: OperationKind,
        category: BotCategory,
    },

    #[error("Simulator error: {0}")]
    Internal(String),
}

pub type SimulationResult<T> = std::result::Result<T, SimulationError>;
