//! Fleet Ports
//!
//! Port definitions (traits) for the bot fleet orchestrator.
//! These define the boundaries between the scheduling logic and the
//! time and randomness sources it depends on.

mod clock;
mod error;
mod random;

pub use clock::Clock;
pub use error::{SimulationError, SimulationResult};
pub use random::RandomSource;
