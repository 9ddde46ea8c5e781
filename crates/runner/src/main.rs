use fleet_clock::{SimulationClock, SystemClock, TimeScale};
use fleet_ports::Clock;
use fleet_runner::{Orchestrator, OrchestratorConfig, OrchestratorService};
use std::sync::Arc;
use std::time::Duration;

fn print_help() {
    eprintln!(
        r#"Fleet Runner - tax-credit marketplace bot orchestrator

USAGE:
    fleet-runner [OPTIONS]

OPTIONS:
    --config <PATH>         Load configuration from JSON file
    --duration-secs <N>     Stop after N seconds (default: run until Ctrl-C)
    --help                  Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG                Log level filter (default: info)

EXAMPLES:
    # Run the default five-bot fleet
    fleet-runner

    # Run a configured fleet for ten minutes
    fleet-runner --config config/fleet.json --duration-secs 600
"#
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut duration: Option<Duration> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_path = Some(args[i].clone());
            }
            "--duration-secs" | "-d" => {
                i += 1;
                let secs = args.get(i).and_then(|s| s.parse::<u64>().ok());
                match secs {
                    Some(secs) => duration = Some(Duration::from_secs(secs)),
                    None => {
                        eprintln!("Error: --duration-secs requires a number of seconds");
                        std::process::exit(1);
                    }
                }
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => {
            log::info!("Loading configuration from: {}", path);
            OrchestratorConfig::from_file(&path)?
        }
        None => {
            log::info!("Using default configuration");
            OrchestratorConfig::default()
        }
    };

    // A time scale compresses bot intervals for demos
    let clock: Arc<dyn Clock> = match config.time_scale {
        Some(factor) if factor > 1 => {
            log::info!("Clock running {}x faster than wall time", factor);
            let clock = SimulationClock::new(None);
            clock.set_time_scale(TimeScale::Fast(factor));
            Arc::new(clock)
        }
        _ => Arc::new(SystemClock::new()),
    };

    for bot in &config.bots {
        log::info!(
            "Bot {} ({}): every {}s, success rate {:.0}%",
            bot.id,
            bot.category,
            bot.operation_interval_secs,
            bot.success_rate * 100.0
        );
    }

    let orchestrator = Orchestrator::from_config(config, clock)?;
    let (handle, task) = OrchestratorService::spawn(orchestrator);

    let started = handle.start().await?;
    log::info!("{}", started.message);

    match duration {
        Some(duration) => {
            tokio::select! {
                _ = tokio::time::sleep(duration) => log::info!("Run duration elapsed"),
                _ = tokio::signal::ctrl_c() => log::info!("Interrupted"),
            }
        }
        None => {
            tokio::signal::ctrl_c().await?;
            log::info!("Interrupted");
        }
    }

    let report = handle.report().await?;
    let stopped = handle.stop().await?;
    log::info!("{}", stopped.message);

    handle.shutdown().await?;
    task.await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
