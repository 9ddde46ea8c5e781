//! Fleet runner errors

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Orchestrator service is not running")]
    ServiceUnavailable,
}

pub type Result<T> = std::result::Result<T, Error>;
