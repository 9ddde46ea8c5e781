use chrono::Duration;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Bot, LifecycleError, OperationDetails, OperationKind, OperationStatus, TargetModule};
use crate::values::{BotId, Timestamp};

/// Unique identifier for an operation
pub type OperationId = Uuid;

/// One simulated unit of work dispatched on behalf of a bot
///
/// Created `Pending` at dispatch and resolved exactly once. `success` is the
/// business outcome; a `Failed` status means the simulation itself faulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub id: OperationId,
    pub bot_id: BotId,
    pub bot_name: String,
    pub kind: OperationKind,
    pub target_module: TargetModule,
    pub status: OperationStatus,
    pub start_time: Timestamp,
    /// Set only on resolution
    pub end_time: Option<Timestamp>,
    /// `end_time - start_time` in milliseconds, set on resolution
    pub duration_ms: Option<u64>,
    pub success: bool,
    pub details: Option<OperationDetails>,
}

impl Operation {
    /// Create a pending operation for `bot`
    pub fn pending(bot: &Bot, kind: OperationKind, start_time: Timestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            bot_id: bot.id.clone(),
            bot_name: bot.name.clone(),
            kind,
            target_module: bot.category.target_module(),
            status: OperationStatus::Pending,
            start_time,
            end_time: None,
            duration_ms: None,
            success: false,
            details: None,
        }
    }

    fn transition(&mut self, next: OperationStatus) -> Result<(), LifecycleError> {
        if !self.status.can_transition_to(next) {
            return Err(LifecycleError::IllegalTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    /// `Pending -> Executing`
    pub fn begin(&mut self) -> Result<(), LifecycleError> {
        self.transition(OperationStatus::Executing)
    }

    /// `Executing -> Completed` with the simulator's business outcome
    pub fn complete(
        &mut self,
        elapsed: Duration,
        success: bool,
        details: OperationDetails,
    ) -> Result<(), LifecycleError> {
        self.transition(OperationStatus::Completed)?;
        self.resolve(elapsed, success, details);
        Ok(())
    }

    /// `Executing -> Failed`; the message lands in `details.result`
    pub fn fail(
        &mut self,
        elapsed: Duration,
        error: impl Into<String>,
    ) -> Result<(), LifecycleError> {
        self.transition(OperationStatus::Failed)?;
        self.resolve(elapsed, false, OperationDetails::error(error));
        Ok(())
    }

    fn resolve(&mut self, elapsed: Duration, success: bool, details: OperationDetails) {
        let elapsed = elapsed.max(Duration::zero());
        self.end_time = Some(self.start_time + elapsed);
        self.duration_ms = Some(elapsed.num_milliseconds() as u64);
        self.success = success;
        self.details = Some(details);
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Resolution duration, zero while unresolved
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end - self.start_time,
            None => Duration::zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{BotCategory, BotConfiguration, OperationResult};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    fn test_operation() -> Operation {
        let bot = Bot::new(
            "lp-1",
            "Pool Keeper",
            BotCategory::LiquidityProvider,
            150,
            0.95,
            BotConfiguration::for_category(BotCategory::LiquidityProvider),
        );
        let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        Operation::pending(&bot, OperationKind::AddLiquidity, t0)
    }

    #[test]
    fn test_pending_operation_fields() {
        let op = test_operation();

        assert_eq!(op.status, OperationStatus::Pending);
        assert_eq!(op.target_module, TargetModule::Liquidity);
        assert_eq!(op.bot_id, "lp-1");
        assert!(op.end_time.is_none());
        assert!(op.details.is_none());
        assert_eq!(op.duration(), Duration::zero());
    }

    #[test]
    fn test_complete_sets_end_time_and_duration() {
        let mut op = test_operation();
        op.begin().unwrap();

        let details = OperationDetails::new(
            OperationResult::Liquidity {
                pool: "solar_itc/USDC".to_string(),
                amount: dec!(30000),
                platform_fee: dec!(90),
                transaction_id: None,
            },
            BTreeMap::new(),
        );
        op.complete(Duration::milliseconds(1500), true, details).unwrap();

        assert_eq!(op.status, OperationStatus::Completed);
        assert!(op.success);
        assert_eq!(op.duration_ms, Some(1500));
        assert_eq!(op.duration(), Duration::milliseconds(1500));
        assert_eq!(op.end_time, Some(op.start_time + Duration::milliseconds(1500)));
    }

    #[test]
    fn test_fail_records_error() {
        let mut op = test_operation();
        op.begin().unwrap();
        op.fail(Duration::milliseconds(5), "boom").unwrap();

        assert_eq!(op.status, OperationStatus::Failed);
        assert!(!op.success);
        let details = op.details.as_ref().unwrap();
        assert_eq!(details.result.error(), Some("boom"));
    }

    #[test]
    fn test_no_transition_after_terminal() {
        let mut op = test_operation();
        op.begin().unwrap();
        op.fail(Duration::zero(), "first").unwrap();

        let err = op.fail(Duration::zero(), "second").unwrap_err();
        assert_eq!(
            err,
            LifecycleError::IllegalTransition {
                from: OperationStatus::Failed,
                to: OperationStatus::Failed,
            }
        );
        assert_eq!(op.details.unwrap().result.error(), Some("first"));
    }

    #[test]
    fn test_cannot_complete_without_begin() {
        let mut op = test_operation();
        let result = op.complete(Duration::zero(), true, OperationDetails::error("x"));

        assert!(result.is_err());
        assert_eq!(op.status, OperationStatus::Pending);
    }
}
