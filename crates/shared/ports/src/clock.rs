use fleet_core::Timestamp;

/// Port for time abstraction
///
/// This allows the scheduler to use different time sources:
/// - Real system time for production
/// - Accelerated time for demos
/// - Fixed, manually advanced time for deterministic tests
pub trait Clock: Send + Sync {
    /// Get the current time according to this clock
    fn now(&self) -> Timestamp;

    /// Get the clock's name/identifier for debugging
    fn name(&self) -> &str {
        "Clock"
    }
}
