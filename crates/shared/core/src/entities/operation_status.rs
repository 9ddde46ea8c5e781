use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Operation lifecycle status
///
/// `Pending -> Executing -> Completed | Failed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationStatus {
    /// Created at dispatch, simulator not yet invoked
    Pending,
    /// Simulator call in progress
    Executing,
    /// Simulator returned normally (business outcome in `success`)
    Completed,
    /// Simulator faulted, timed out or was missing
    Failed,
}

impl OperationStatus {
    /// Returns true if the operation is in a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, OperationStatus::Completed | OperationStatus::Failed)
    }

    /// Returns true if moving to `next` is a legal lifecycle step
    pub fn can_transition_to(&self, next: OperationStatus) -> bool {
        matches!(
            (self, next),
            (OperationStatus::Pending, OperationStatus::Executing)
                | (OperationStatus::Executing, OperationStatus::Completed)
                | (OperationStatus::Executing, OperationStatus::Failed)
        )
    }
}

/// Rejected lifecycle step
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("Illegal operation transition: {from:?} -> {to:?}")]
    IllegalTransition {
        from: OperationStatus,
        to: OperationStatus,
    },
}
