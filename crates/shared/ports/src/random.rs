/// Port for randomness
///
/// Simulators never call a global generator; they draw from the source they
/// are handed so tests can inject a seeded or scripted one.
pub trait RandomSource: Send {
    /// Uniform draw in `[0, 1)`
    fn next_f64(&mut self) -> f64;

    /// Get the source's name/identifier for debugging
    fn name(&self) -> &str {
        "RandomSource"
    }

    /// Bernoulli draw: true with the given probability
    fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    /// Uniform draw in `[low, high)`
    fn range_f64(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }

    /// Uniform integer draw in `[low, high]`
    fn range_u32(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        let span = (high - low) as f64 + 1.0;
        let offset = (self.next_f64() * span) as u32;
        low + offset.min(high - low)
    }

    /// Uniform index into a collection of `len` elements (`len > 0`)
    fn index(&mut self, len: usize) -> usize {
        let idx = (self.next_f64() * len as f64) as usize;
        idx.min(len.saturating_sub(1))
    }
}
