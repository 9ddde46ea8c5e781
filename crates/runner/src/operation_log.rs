//! Bounded operation history
//!
//! Newest entry first. Once the log is full every append evicts the oldest
//! entry, so memory stays bounded no matter how long the fleet runs.

use fleet_core::{Operation, OperationId};
use std::collections::VecDeque;

/// Default number of operations retained
pub const DEFAULT_LOG_CAPACITY: usize = 1000;

#[derive(Debug, Clone)]
pub struct OperationLog {
    entries: VecDeque<Operation>,
    capacity: usize,
}

impl OperationLog {
    /// Create a log holding at most `capacity` entries (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepend a resolved operation
    ///
    /// Returns the evicted entry when the log was full.
    pub fn append(&mut self, operation: Operation) -> Option<Operation> {
        self.entries.push_front(operation);
        if self.entries.len() > self.capacity {
            self.entries.pop_back()
        } else {
            None
        }
    }

    /// The newest `limit` entries, newest first
    pub fn recent(&self, limit: usize) -> Vec<Operation> {
        self.entries.iter().take(limit).cloned().collect()
    }

    pub fn latest(&self) -> Option<&Operation> {
        self.entries.front()
    }

    pub fn get(&self, id: OperationId) -> Option<&Operation> {
        self.entries.iter().find(|op| op.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for OperationLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_core::{Bot, BotCategory, BotConfiguration, OperationKind};
    use chrono::{Duration, TimeZone, Utc};

    fn operation(seconds: i64) -> Operation {
        let bot = Bot::new(
            "trader-alpha",
            "Credit Trader Alpha",
            BotCategory::CreditTrader,
            120,
            1.0,
            BotConfiguration::for_category(BotCategory::CreditTrader),
        );
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(seconds);
        Operation::pending(&bot, OperationKind::BuyCredits, start)
    }

    #[test]
    fn test_newest_first() {
        let mut log = OperationLog::new(10);
        let first = operation(0);
        let second = operation(1);
        let second_id = second.id;

        log.append(first);
        log.append(second);

        assert_eq!(log.len(), 2);
        assert_eq!(log.latest().unwrap().id, second_id);
        assert_eq!(log.recent(1)[0].id, second_id);
    }

    #[test]
    fn test_evicts_oldest_beyond_capacity() {
        let mut log = OperationLog::new(3);
        let ops: Vec<_> = (0..5).map(operation).collect();
        let ids: Vec<_> = ops.iter().map(|op| op.id).collect();

        let evicted: Vec<_> = ops.into_iter().filter_map(|op| log.append(op)).collect();

        assert_eq!(log.len(), 3);
        assert_eq!(evicted.len(), 2);
        assert_eq!(evicted[0].id, ids[0]);
        assert_eq!(evicted[1].id, ids[1]);

        let retained: Vec<_> = log.iter().map(|op| op.id).collect();
        assert_eq!(retained, vec![ids[4], ids[3], ids[2]]);
        assert!(log.get(ids[0]).is_none());
        assert!(log.get(ids[3]).is_some());
    }

    #[test]
    fn test_recent_caps_at_len() {
        let mut log = OperationLog::default();
        log.append(operation(0));
        assert_eq!(log.capacity(), DEFAULT_LOG_CAPACITY);
        assert_eq!(log.recent(50).len(), 1);

        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let mut log = OperationLog::new(0);
        log.append(operation(0));
        log.append(operation(1));
        assert_eq!(log.len(), 1);
    }
}
