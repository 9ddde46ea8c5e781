use chrono::{DateTime, Duration, Utc};
use fleet_core::Timestamp;
use fleet_ports::Clock;
use parking_lot::RwLock;
use std::sync::Arc;

/// Time scale modes for simulation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TimeScale {
    /// Real-time (1:1 ratio with wall clock)
    #[default]
    Normal,
    /// Accelerated time (multiplier applied to elapsed time)
    Fast(u32),
    /// Decelerated time (divisor applied to elapsed time)
    Slow(u32),
    /// Fixed time (only advances when explicitly moved)
    Fixed,
}

#[derive(Debug)]
struct ClockState {
    /// Simulated time at the reference point
    anchor_sim: Timestamp,
    /// Wall time at the reference point
    anchor_real: Timestamp,
    scale: TimeScale,
}

impl ClockState {
    fn current(&self, real_now: Timestamp) -> Timestamp {
        let real_elapsed = real_now - self.anchor_real;
        let sim_elapsed = match self.scale {
            TimeScale::Normal => Some(real_elapsed),
            TimeScale::Fast(multiplier) => {
                real_elapsed.checked_mul(i32::try_from(multiplier).unwrap_or(i32::MAX))
            }
            TimeScale::Slow(0) | TimeScale::Fixed => Some(Duration::zero()),
            TimeScale::Slow(divisor) => {
                real_elapsed.checked_div(i32::try_from(divisor).unwrap_or(i32::MAX))
            }
        };

        // Saturate instead of wrapping so time never runs backwards
        sim_elapsed
            .and_then(|elapsed| self.anchor_sim.checked_add_signed(elapsed))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Move the reference point to now so scale changes keep time continuous
    fn rebase(&mut self, real_now: Timestamp) {
        self.anchor_sim = self.current(real_now);
        self.anchor_real = real_now;
    }
}

/// Controllable simulation clock
///
/// Cloning shares the underlying state, so a test can keep one handle to
/// drive time while the orchestrator reads through another.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    inner: Arc<RwLock<ClockState>>,
}

impl SimulationClock {
    /// Create a real-time clock
    ///
    /// # Arguments
    /// * `initial_time` - Optional starting time. If None, uses current wall time.
    pub fn new(initial_time: Option<Timestamp>) -> Self {
        let real_now = Utc::now();
        Self {
            inner: Arc::new(RwLock::new(ClockState {
                anchor_sim: initial_time.unwrap_or(real_now),
                anchor_real: real_now,
                scale: TimeScale::Normal,
            })),
        }
    }

    /// Create a frozen clock that only moves through [`advance`](Self::advance)
    pub fn fixed_at(time: Timestamp) -> Self {
        let clock = Self::new(Some(time));
        clock.set_time_scale(TimeScale::Fixed);
        clock
    }

    pub fn set_time_scale(&self, scale: TimeScale) {
        let mut state = self.inner.write();
        state.rebase(Utc::now());
        state.scale = scale;
    }

    pub fn time_scale(&self) -> TimeScale {
        self.inner.read().scale
    }

    /// Advance the simulated time by a specified duration
    pub fn advance(&self, duration: Duration) {
        let mut state = self.inner.write();
        state.rebase(Utc::now());
        state.anchor_sim += duration;
    }

    /// Explicitly set the simulation time
    ///
    /// Warning: This can cause time discontinuities. Use with caution.
    pub fn set_time(&self, time: Timestamp) {
        let mut state = self.inner.write();
        state.anchor_sim = time;
        state.anchor_real = Utc::now();
    }
}

impl Clock for SimulationClock {
    fn now(&self) -> Timestamp {
        self.inner.read().current(Utc::now())
    }

    fn name(&self) -> &str {
        "SimulationClock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_mode() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let clock = SimulationClock::fixed_at(start);

        let time1 = clock.now();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let time2 = clock.now();

        // In fixed mode, time should not advance automatically
        assert_eq!(time1, start);
        assert_eq!(time1, time2);

        // Advance manually
        clock.advance(Duration::seconds(5));
        assert_eq!(clock.now() - time1, Duration::seconds(5));
    }

    #[test]
    fn test_clones_share_time() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let driver = SimulationClock::fixed_at(start);
        let reader = driver.clone();

        driver.advance(Duration::seconds(120));
        assert_eq!(reader.now(), start + Duration::seconds(120));
    }

    #[test]
    fn test_fast_mode_runs_ahead() {
        let clock = SimulationClock::new(None);
        clock.set_time_scale(TimeScale::Fast(100));

        let time1 = clock.now();
        std::thread::sleep(std::time::Duration::from_millis(20));
        let time2 = clock.now();

        // 20ms of wall time is at least 1s of simulated time at 100x
        assert!(time2 - time1 >= Duration::seconds(1));
    }

    #[test]
    fn test_huge_multiplier_never_runs_backwards() {
        let clock = SimulationClock::new(None);
        clock.set_time_scale(TimeScale::Fast(3_000_000_000));

        let time1 = clock.now();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let time2 = clock.now();

        assert!(time2 >= time1);
        assert!(time2 - time1 >= Duration::seconds(1));
    }

    #[test]
    fn test_huge_divisor_stays_monotonic() {
        let clock = SimulationClock::new(None);
        clock.set_time_scale(TimeScale::Slow(u32::MAX));

        let time1 = clock.now();
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(clock.now() >= time1);
    }

    #[test]
    fn test_set_time_jumps() {
        let clock = SimulationClock::fixed_at(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let target = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();

        clock.set_time(target);
        assert_eq!(clock.now(), target);
        assert_eq!(clock.time_scale(), TimeScale::Fixed);
    }
}
