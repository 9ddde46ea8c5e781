//! Fleet Runner - Bot Orchestration Scheduler
//!
//! Runs a fleet of marketplace bots, each on its own cadence:
//!
//! - **Registry**: the bots, in registration order, and their tuning
//! - **Executor**: one fault-isolated, time-bounded simulator invocation
//! - **Metrics**: running totals, per-module and per-kind breakdowns
//! - **Operation Log**: bounded newest-first history
//! - **Orchestrator**: the tick loop and the control surface
//! - **Service**: the orchestrator in its own task behind a cloneable handle
//!
//! ## Architecture
//!
//! ```text
//!        control panel / binary
//!                 │ start, stop, configure, status, report
//!                 ▼
//!   ┌───────────────────────────┐
//!   │   OrchestratorHandle      │
//!   └─────────────┬─────────────┘
//!                 │ mpsc commands
//!                 ▼
//!   ┌───────────────────────────┐   interval
//!   │   OrchestratorService     │◄──────────── tick
//!   │  ┌─────────────────────┐  │
//!   │  │    Orchestrator     │  │
//!   │  └──┬──────────────┬───┘  │
//!   └─────┼──────────────┼──────┘
//!         │ due bots     │ resolved operations
//!         ▼              ▼
//!   ┌───────────┐  ┌───────────────────────────┐
//!   │ Executor  │  │ MetricsAggregator + Log   │
//!   └─────┬─────┘  └───────────────────────────┘
//!         │ SimulatorTable
//!         ▼
//!   trading │ liquidity │ compliance │ pricing │ documents
//! ```

pub mod config;
pub mod error;
pub mod executor;
pub mod metrics;
pub mod operation_log;
pub mod orchestrator;
pub mod registry;
pub mod report;
pub mod service;

// Re-export main types
pub use config::{BotDefinition, ConfigError, MAX_TIME_SCALE, OrchestratorConfig, default_fleet};
pub use error::{Error, Result};
pub use executor::{DEFAULT_OPERATION_TIMEOUT, OperationExecutor};
pub use metrics::{Metrics, MetricsAggregator};
pub use operation_log::{DEFAULT_LOG_CAPACITY, OperationLog};
pub use orchestrator::Orchestrator;
pub use registry::{BotRegistry, select_operation_kind};
pub use report::{
    BotPerformance, ControlResult, DetailedReport, ModuleActivity, StatusSnapshot, TickSummary,
};
pub use service::{OrchestratorHandle, OrchestratorService};
