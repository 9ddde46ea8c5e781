use chrono::{Duration, Utc};
use fleet_core::Timestamp;
use fleet_ports::Clock;
use tokio::time::Instant;

/// Clock driven by the tokio runtime's time source
///
/// Reads `tokio::time::Instant`, so under a paused runtime
/// (`tokio::time::pause`, `#[tokio::test(start_paused = true)]`) the
/// scheduler sees exactly the virtual time the timers run on.
#[derive(Debug, Clone)]
pub struct RuntimeClock {
    origin_instant: Instant,
    origin_time: Timestamp,
}

impl RuntimeClock {
    /// Start the clock at `origin_time` (wall time if `None`)
    pub fn new(origin_time: Option<Timestamp>) -> Self {
        Self {
            origin_instant: Instant::now(),
            origin_time: origin_time.unwrap_or_else(Utc::now),
        }
    }
}

impl Clock for RuntimeClock {
    fn now(&self) -> Timestamp {
        let elapsed = Duration::from_std(self.origin_instant.elapsed()).unwrap_or(Duration::zero());
        self.origin_time + elapsed
    }

    fn name(&self) -> &str {
        "RuntimeClock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[tokio::test(start_paused = true)]
    async fn test_follows_paused_runtime() {
        let origin = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let clock = RuntimeClock::new(Some(origin));

        tokio::time::sleep(std::time::Duration::from_secs(90)).await;

        assert_eq!(clock.now() - origin, Duration::seconds(90));
    }
}
