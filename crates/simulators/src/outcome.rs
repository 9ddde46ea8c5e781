use fleet_core::{OperationDetails, OperationResult};
use std::collections::BTreeMap;
use std::time::Duration;

/// What a simulator produced for one operation
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedOutcome {
    /// Business outcome of the draw against the bot's success rate
    pub success: bool,
    /// Category-shaped payload (present on success and on failure)
    pub result: OperationResult,
    /// Named sub-metrics (processing time, confidence, ...)
    pub metrics: BTreeMap<String, f64>,
    /// Simulated time the work takes; awaited by the executor
    pub latency: Duration,
}

impl SimulatedOutcome {
    pub fn into_details(self) -> OperationDetails {
        OperationDetails::new(self.result, self.metrics)
    }
}
