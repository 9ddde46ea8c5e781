//! Fleet Clock Infrastructure
//!
//! Provides time sources for the scheduler:
//!
//! - [`SystemClock`]: wall-clock time for production runs
//! - [`SimulationClock`]: scaled or frozen time for demos and tests
//! - [`RuntimeClock`]: follows tokio time, including a paused test runtime
//!
//! ## Usage
//!
//! ```ignore
//! use fleet_clock::{SimulationClock, TimeScale};
//! use chrono::Duration;
//!
//! // Frozen clock for deterministic tests
//! let clock = SimulationClock::fixed_at(start);
//! clock.advance(Duration::seconds(120)); // next bots become due
//!
//! // 60x accelerated clock: a 120s bot interval elapses every 2s of wall time
//! let demo = SimulationClock::new(None);
//! demo.set_time_scale(TimeScale::Fast(60));
//! ```

mod runtime;
mod simulation;
mod system;

pub use runtime::RuntimeClock;
pub use simulation::{SimulationClock, TimeScale};
pub use system::SystemClock;

// Re-export the Clock trait for convenience
pub use fleet_ports::Clock;
