//! Time management for the beat detector
//!
//! The detector never reads a clock on its own; the caller passes a
//! millisecond timestamp with every sample. This module fixes the width of
//! that timestamp and provides a small clock abstraction for callers that
//! want one, with a fixed clock for tests and replay of recorded data.
//!
//! ## Wraparound
//!
//! A 32-bit millisecond counter wraps after ~49.7 days. All elapsed-time
//! arithmetic goes through [`elapsed_ms`], which uses wrapping subtraction,
//! so a wrap between two consecutive samples yields the correct small delta.

/// Timestamp in milliseconds from a monotonic counter (usually device boot)
pub type Timestamp = u32;

/// Milliseconds from `earlier` to `later`, tolerant of counter wraparound
#[inline]
pub fn elapsed_ms(earlier: Timestamp, later: Timestamp) -> u32 {
    later.wrapping_sub(earlier)
}

/// Source of time for the detector
pub trait TimeSource {
    /// Get current timestamp in milliseconds
    fn now(&self) -> Timestamp;
}

/// Fixed time source for testing
#[derive(Debug, Clone)]
pub struct FixedTime {
    timestamp: Timestamp,
}

impl FixedTime {
    /// Create at a fixed timestamp
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    /// Move forward, wrapping like a tick counter
    pub fn advance(&mut self, ms: u32) {
        self.timestamp = self.timestamp.wrapping_add(ms);
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::time::TIMESTAMP_WRAP_MS;

    #[test]
    fn fixed_time_advances() {
        let mut time = FixedTime::new(1000);
        assert_eq!(time.now(), 1000);

        time.advance(500);
        assert_eq!(time.now(), 1500);
    }

    #[test]
    fn elapsed_across_wrap() {
        let before_wrap = (TIMESTAMP_WRAP_MS - 200) as Timestamp;
        assert_eq!(elapsed_ms(before_wrap, 300), 500);

        let mut time = FixedTime::new(before_wrap);
        time.advance(500);
        assert_eq!(time.now(), 300);
    }

    #[test]
    fn elapsed_plain() {
        assert_eq!(elapsed_ms(1000, 1500), 500);
        assert_eq!(elapsed_ms(1000, 1000), 0);
    }
}
