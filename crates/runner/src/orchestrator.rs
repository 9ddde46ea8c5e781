//! Orchestrator engine
//!
//! Owns the fleet, the executor, the metrics and the operation log. All
//! mutation goes through `&mut self`, so a single owner (the service task,
//! or a test driving `tick()` by hand) serializes ticks and control calls.
//!
//! Rate limiting is dispatch-based: a bot's `last_dispatched_at` is stamped
//! when its operation starts, so the next dispatch happens no earlier than
//! one interval after the previous one started.

use fleet_core::{ConfigPatch, Operation, OperationStatus, Timestamp};
use fleet_ports::{Clock, RandomSource};
use fleet_simulators::{SeededRandom, SimulatorTable};
use std::sync::Arc;

use crate::config::OrchestratorConfig;
use crate::error::Result;
use crate::executor::OperationExecutor;
use crate::metrics::{Metrics, MetricsAggregator};
use crate::operation_log::OperationLog;
use crate::registry::{BotRegistry, select_operation_kind};
use crate::report::{ControlResult, DetailedReport, StatusSnapshot, TickSummary};

pub struct Orchestrator {
    config: OrchestratorConfig,
    registry: BotRegistry,
    executor: OperationExecutor,
    aggregator: MetricsAggregator,
    log: OperationLog,
    clock: Arc<dyn Clock>,
    rng: Box<dyn RandomSource>,
    /// Set while running
    started_at: Option<Timestamp>,
    ticks: u64,
}

impl Orchestrator {
    /// Build an orchestrator with the built-in simulators
    pub fn new(
        config: OrchestratorConfig,
        clock: Arc<dyn Clock>,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self> {
        Self::with_simulators(config, clock, rng, SimulatorTable::default())
    }

    /// Build an orchestrator with a custom simulator table
    pub fn with_simulators(
        config: OrchestratorConfig,
        clock: Arc<dyn Clock>,
        rng: Box<dyn RandomSource>,
        simulators: SimulatorTable,
    ) -> Result<Self> {
        config.validate()?;

        let registry = BotRegistry::from_definitions(&config.bots);
        let executor = OperationExecutor::new(simulators, config.operation_timeout());
        let log = OperationLog::new(config.log_capacity);

        log::info!(
            "Orchestrator created: {} bots, clock={}, rng={}",
            registry.len(),
            clock.name(),
            rng.name()
        );

        Ok(Self {
            config,
            registry,
            executor,
            aggregator: MetricsAggregator::new(),
            log,
            clock,
            rng,
            started_at: None,
            ticks: 0,
        })
    }

    /// Seeded from `config.seed` (entropy when unset)
    pub fn from_config(config: OrchestratorConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let rng = Box::new(SeededRandom::new(config.seed));
        Self::new(config, clock, rng)
    }

    /// Activate every bot and begin scheduling
    pub fn start(&mut self) -> ControlResult {
        if self.is_running() {
            return ControlResult::rejected("Orchestrator is already running");
        }

        self.registry.activate_all();
        self.started_at = Some(self.clock.now());

        log::info!("Orchestrator started with {} bots", self.registry.len());
        ControlResult::ok(format!(
            "Orchestrator started with {} bots",
            self.registry.len()
        ))
    }

    /// Deactivate every bot and stop scheduling
    pub fn stop(&mut self) -> ControlResult {
        if !self.is_running() {
            return ControlResult::rejected("Orchestrator is not running");
        }

        self.registry.deactivate_all();
        self.started_at = None;

        log::info!(
            "Orchestrator stopped after {} ticks ({} operations recorded)",
            self.ticks,
            self.aggregator.metrics().total_operations
        );
        ControlResult::ok("Orchestrator stopped")
    }

    /// One scheduler pass
    ///
    /// Every active bot whose interval has elapsed gets exactly one
    /// operation. Bots run one after another in registration order; each
    /// operation resolves before the next bot is dispatched. A no-op while
    /// stopped.
    pub async fn tick(&mut self) -> TickSummary {
        if !self.is_running() {
            return TickSummary::default();
        }

        self.ticks += 1;
        let mut summary = TickSummary {
            tick: self.ticks,
            ..Default::default()
        };

        let due = self.registry.due_bots(self.clock.now());
        for bot_id in due {
            let dispatched_at = self.clock.now();
            let Some(bot) = self.registry.get_mut(&bot_id) else {
                continue;
            };
            let kind = select_operation_kind(bot, self.rng.as_mut());
            bot.mark_dispatched(dispatched_at);
            let bot = bot.clone();

            let operation = self
                .executor
                .run(&bot, kind, dispatched_at, self.rng.as_mut())
                .await;

            summary.dispatched += 1;
            self.record(operation, &mut summary);
        }

        if summary.dispatched > 0 {
            log::debug!(
                "Tick {}: dispatched={} completed={} failed={}",
                summary.tick,
                summary.dispatched,
                summary.completed,
                summary.failed
            );
        }
        summary
    }

    fn record(&mut self, operation: Operation, summary: &mut TickSummary) {
        if operation.success {
            summary.successful += 1;
            if let Some(bot) = self.registry.get_mut(&operation.bot_id) {
                bot.record_success();
            }
        }
        match operation.status {
            OperationStatus::Failed => summary.failed += 1,
            _ => summary.completed += 1,
        }

        log::info!(
            "[{}] {} -> {} ({:?}, success={}, {}ms)",
            operation.bot_id,
            operation.kind,
            operation.target_module,
            operation.status,
            operation.success,
            operation.duration_ms.unwrap_or(0)
        );

        self.aggregator.update(&operation);
        self.log.append(operation);
    }

    /// Merge `patch` into a bot's configuration
    ///
    /// Returns false for an unknown bot; nothing else changes.
    pub fn configure(&mut self, bot_id: &str, patch: ConfigPatch) -> bool {
        let updated = self.registry.configure(bot_id, &patch);
        if updated {
            log::info!("[{}] Configuration updated", bot_id);
        } else {
            log::warn!("Configure rejected: unknown bot {}", bot_id);
        }
        updated
    }

    /// Toggle a single bot; false for an unknown bot
    pub fn set_bot_active(&mut self, bot_id: &str, active: bool) -> bool {
        let updated = self.registry.set_active(bot_id, active);
        if updated {
            log::info!("[{}] {}", bot_id, if active { "Activated" } else { "Deactivated" });
        }
        updated
    }

    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            is_running: self.is_running(),
            bots: self.registry.bots().to_vec(),
            metrics: self.aggregator.snapshot(),
            recent_operations: self.log.recent(self.config.status_recent_limit),
        }
    }

    pub fn report(&self) -> DetailedReport {
        DetailedReport::build(
            self.clock.now(),
            self.started_at,
            self.registry.bots(),
            self.aggregator.metrics(),
        )
    }

    /// Zero metrics, clear the log and per-bot counters
    ///
    /// Bot identity, configuration, activation and dispatch times are kept.
    pub fn reset_metrics(&mut self) {
        self.aggregator.reset();
        self.log.clear();
        self.registry.reset_counters();
        log::info!("Metrics reset");
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn metrics(&self) -> &Metrics {
        self.aggregator.metrics()
    }

    pub fn operation_log(&self) -> &OperationLog {
        &self.log
    }

    pub fn registry(&self) -> &BotRegistry {
        &self.registry
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("bots", &self.registry.len())
            .field("is_running", &self.is_running())
            .field("ticks", &self.ticks)
            .field("clock", &self.clock.name())
            .finish()
    }
}
