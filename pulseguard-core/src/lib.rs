//! Core beat detection engine for PulseGuard
//!
//! Estimates heart rate from a filtered photoplethysmogram (PPG), one sample
//! at a time. Designed for wearables and sensor nodes with limited resources.
//!
//! Key constraints:
//! - O(1) work per sample, no allocation after construction
//! - No I/O and no clock access; the caller supplies millisecond timestamps
//! - Never fails on noisy input: bad intervals are discarded, not reported
//!
//! ```no_run
//! use pulseguard_core::BeatDetector;
//!
//! let mut detector = BeatDetector::default();
//!
//! // Feed filtered PPG samples with their timestamps
//! # let samples: [(i32, u32); 0] = [];
//! for (sample, timestamp_ms) in samples {
//!     let bpm = detector.process_sample(sample, timestamp_ms);
//!     if bpm > 0.0 {
//!         // Show or transmit the estimate
//!     }
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod constants;
pub mod detector;
pub mod errors;
pub mod extremum;
pub mod pool;
pub mod time;

// Public API
pub use constants::{HEART_RATE_EMPTY, HEART_RATE_ERROR};
pub use detector::{BeatDetector, Detection, DetectorConfig};
pub use errors::{DetectorError, DetectorResult};
pub use extremum::{ExtremumKind, ExtremumPhase, ExtremumTracker};
pub use pool::{DetectorHandle, DetectorPool};
pub use time::{TimeSource, Timestamp};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
