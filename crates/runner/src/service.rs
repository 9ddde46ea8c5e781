//! Async orchestrator service
//!
//! The engine lives in one tokio task. Control calls arrive on an mpsc
//! command queue and the scheduler timer fires on a tokio interval; the
//! task handles one at a time, so a control call that lands mid-tick waits
//! for the tick (and its in-flight operations) to finish.

use fleet_core::{BotId, ConfigPatch};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior};

use crate::error::{Error, Result};
use crate::orchestrator::Orchestrator;
use crate::report::{ControlResult, DetailedReport, StatusSnapshot, TickSummary};

const COMMAND_BUFFER: usize = 64;

enum Command {
    Start(oneshot::Sender<ControlResult>),
    Stop(oneshot::Sender<ControlResult>),
    Tick(oneshot::Sender<TickSummary>),
    Configure {
        bot_id: BotId,
        patch: ConfigPatch,
        reply: oneshot::Sender<bool>,
    },
    SetBotActive {
        bot_id: BotId,
        active: bool,
        reply: oneshot::Sender<bool>,
    },
    Status(oneshot::Sender<StatusSnapshot>),
    Report(oneshot::Sender<DetailedReport>),
    ResetMetrics(oneshot::Sender<()>),
    Shutdown,
}

enum Event {
    Command(Command),
    Tick,
    Closed,
}

pub struct OrchestratorService;

impl OrchestratorService {
    /// Move the engine into its own task
    ///
    /// The join handle yields the engine back after shutdown (or once every
    /// handle is dropped).
    pub fn spawn(orchestrator: Orchestrator) -> (OrchestratorHandle, JoinHandle<Orchestrator>) {
        let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
        let task = tokio::spawn(run(orchestrator, rx));
        (OrchestratorHandle { commands: tx }, task)
    }
}

async fn run(
    mut orchestrator: Orchestrator,
    mut commands: mpsc::Receiver<Command>,
) -> Orchestrator {
    let period = orchestrator.config().tick_interval();
    let mut ticker: Option<Interval> = None;

    log::info!("Orchestrator service started ({}ms tick)", period.as_millis());

    loop {
        let event = tokio::select! {
            command = commands.recv() => match command {
                Some(command) => Event::Command(command),
                None => Event::Closed,
            },
            _ = next_tick(&mut ticker) => Event::Tick,
        };

        match event {
            Event::Tick => {
                orchestrator.tick().await;
            }
            Event::Command(Command::Start(reply)) => {
                let result = orchestrator.start();
                if result.success {
                    let mut interval = tokio::time::interval(period);
                    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                    ticker = Some(interval);
                }
                let _ = reply.send(result);
            }
            Event::Command(Command::Stop(reply)) => {
                let result = orchestrator.stop();
                if result.success {
                    ticker = None;
                }
                let _ = reply.send(result);
            }
            Event::Command(Command::Tick(reply)) => {
                let _ = reply.send(orchestrator.tick().await);
            }
            Event::Command(Command::Configure { bot_id, patch, reply }) => {
                let _ = reply.send(orchestrator.configure(&bot_id, patch));
            }
            Event::Command(Command::SetBotActive { bot_id, active, reply }) => {
                let _ = reply.send(orchestrator.set_bot_active(&bot_id, active));
            }
            Event::Command(Command::Status(reply)) => {
                let _ = reply.send(orchestrator.status());
            }
            Event::Command(Command::Report(reply)) => {
                let _ = reply.send(orchestrator.report());
            }
            Event::Command(Command::ResetMetrics(reply)) => {
                orchestrator.reset_metrics();
                let _ = reply.send(());
            }
            Event::Command(Command::Shutdown) | Event::Closed => break,
        }
    }

    if orchestrator.is_running() {
        orchestrator.stop();
    }
    log::info!("Orchestrator service stopped");
    orchestrator
}

/// Resolves on the next timer tick; never while stopped
async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

/// Cloneable client for the service task
#[derive(Debug, Clone)]
pub struct OrchestratorHandle {
    commands: mpsc::Sender<Command>,
}

impl OrchestratorHandle {
    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(command(reply))
            .await
            .map_err(|_| Error::ServiceUnavailable)?;
        response.await.map_err(|_| Error::ServiceUnavailable)
    }

    pub async fn start(&self) -> Result<ControlResult> {
        self.request(Command::Start).await
    }

    pub async fn stop(&self) -> Result<ControlResult> {
        self.request(Command::Stop).await
    }

    /// Run one scheduler pass now, outside the timer
    pub async fn tick(&self) -> Result<TickSummary> {
        self.request(Command::Tick).await
    }

    pub async fn configure(&self, bot_id: impl Into<BotId>, patch: ConfigPatch) -> Result<bool> {
        let bot_id = bot_id.into();
        self.request(|reply| Command::Configure { bot_id, patch, reply })
            .await
    }

    pub async fn set_bot_active(&self, bot_id: impl Into<BotId>, active: bool) -> Result<bool> {
        let bot_id = bot_id.into();
        self.request(|reply| Command::SetBotActive {
            bot_id,
            active,
            reply,
        })
        .await
    }

    pub async fn status(&self) -> Result<StatusSnapshot> {
        self.request(Command::Status).await
    }

    pub async fn report(&self) -> Result<DetailedReport> {
        self.request(Command::Report).await
    }

    pub async fn reset_metrics(&self) -> Result<()> {
        self.request(Command::ResetMetrics).await
    }

    /// Ask the service task to exit
    pub async fn shutdown(&self) -> Result<()> {
        self.commands
            .send(Command::Shutdown)
            .await
            .map_err(|_| Error::ServiceUnavailable)
    }
}
