//! Fleet Simulators
//!
//! One pure simulator per bot category. Every simulator takes the bot, the
//! drawn operation kind and an injected [`RandomSource`], and returns a
//! [`SimulatedOutcome`]:
//!
//! - **trading**: credit purchases, sales and arbitrage scans
//! - **liquidity**: pool deposits, withdrawals and rebalances
//! - **compliance**: KYC checks, transaction audits, regulatory filings
//! - **pricing**: price publications, valuations and risk assessments
//! - **documents**: extraction, verification and certificate issuance
//!
//! A probabilistic failure is `success = false`; `Err` is reserved for
//! simulations that cannot run (e.g. inverted amount bounds).
//!
//! The [`SimulatorTable`] maps each category to its function so new
//! categories plug in without touching the executor.

mod common;
pub mod compliance;
pub mod documents;
pub mod liquidity;
mod outcome;
pub mod pricing;
mod random;
mod table;
pub mod trading;

pub use outcome::SimulatedOutcome;
pub use random::{ScriptedRandom, SeededRandom};
pub use table::{SimulatorFn, SimulatorTable};

// Re-export the ports simulators are written against
pub use fleet_ports::{RandomSource, SimulationError, SimulationResult};
