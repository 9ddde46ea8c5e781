//! Operation executor
//!
//! Runs one simulator invocation and turns whatever happens into a resolved
//! [`Operation`]. A missing simulator, a simulator error, a panic or a
//! timeout all end as `Failed`; nothing escapes to the scheduler.

use chrono::Duration as ChronoDuration;
use fleet_core::{Bot, Operation, OperationKind, Timestamp};
use fleet_ports::RandomSource;
use fleet_simulators::{SimulatedOutcome, SimulatorTable};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;
use tokio::time::Instant;

/// Default upper bound on one operation
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct OperationExecutor {
    simulators: SimulatorTable,
    timeout: Duration,
}

impl OperationExecutor {
    pub fn new(simulators: SimulatorTable, timeout: Duration) -> Self {
        Self { simulators, timeout }
    }

    /// Execute one operation of `kind` for `bot`
    ///
    /// The returned operation is always terminal. Its duration is the work
    /// time measured on the tokio clock and `end_time` is `started_at` plus
    /// that duration. With a scaled scheduler clock, `end_time` is therefore
    /// not a reading of the scheduler clock: durations stay in real work time.
    pub async fn run(
        &self,
        bot: &Bot,
        kind: OperationKind,
        started_at: Timestamp,
        rng: &mut dyn RandomSource,
    ) -> Operation {
        let clock = Instant::now();
        let mut operation = Operation::pending(bot, kind, started_at);
        if let Err(e) = operation.begin() {
            log::error!("[{}] {}", bot.id, e);
        }

        log::debug!("[{}] Executing {} on {}", bot.id, kind, operation.target_module);

        let outcome = match self.invoke(bot, kind, rng) {
            Ok(outcome) => outcome,
            Err(message) => {
                log::warn!("[{}] {} failed: {}", bot.id, kind, message);
                resolve_failed(&mut operation, clock, message);
                return operation;
            }
        };

        if tokio::time::timeout(self.timeout, tokio::time::sleep(outcome.latency))
            .await
            .is_err()
        {
            let message = format!("operation timed out after {}ms", self.timeout.as_millis());
            log::warn!("[{}] {} {}", bot.id, kind, message);
            resolve_failed(&mut operation, clock, message);
            return operation;
        }

        let success = outcome.success;
        if let Err(e) = operation.complete(elapsed_since(clock), success, outcome.into_details()) {
            log::error!("[{}] {}", bot.id, e);
        }

        log::debug!(
            "[{}] {} completed in {}ms (success: {})",
            bot.id,
            kind,
            operation.duration_ms.unwrap_or(0),
            success
        );
        operation
    }

    /// Look up and call the simulator, containing errors and panics
    fn invoke(
        &self,
        bot: &Bot,
        kind: OperationKind,
        rng: &mut dyn RandomSource,
    ) -> Result<SimulatedOutcome, String> {
        let simulator = self
            .simulators
            .get(bot.category)
            .ok_or_else(|| format!("no simulator registered for {}", bot.category))?;

        match catch_unwind(AssertUnwindSafe(|| simulator(bot, kind, rng))) {
            Ok(Ok(outcome)) => Ok(outcome),
            Ok(Err(e)) => Err(e.to_string()),
            Err(panic) => Err(format!("simulator panicked: {}", panic_message(&*panic))),
        }
    }
}

impl Default for OperationExecutor {
    fn default() -> Self {
        Self::new(SimulatorTable::default(), DEFAULT_OPERATION_TIMEOUT)
    }
}

fn resolve_failed(operation: &mut Operation, clock: Instant, message: String) {
    if let Err(e) = operation.fail(elapsed_since(clock), message) {
        log::error!("[{}] {}", operation.bot_id, e);
    }
}

fn elapsed_since(clock: Instant) -> ChronoDuration {
    ChronoDuration::from_std(clock.elapsed()).unwrap_or(ChronoDuration::zero())
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
