//! Error Types for the Beat Detection Core
//!
//! ## Design Philosophy
//!
//! A heart-rate monitor runs continuously on noisy input, so almost nothing in
//! the hot path is an error:
//!
//! - An implausible instantaneous rate (noise, double detection) is discarded
//!   and the last good estimate is kept.
//! - A zero-length beat interval is skipped.
//! - A signal that goes quiet for too long triggers an internal reset.
//!
//! None of these surface as `Err`. The only failures are the ones the caller
//! caused or must react to:
//!
//! ### Resource Exhaustion
//! - `AllocationFailure`: no detector slot could be obtained
//!
//! ### Programmer Errors
//! - `InvalidHandle`: a destroyed or never-issued handle was used
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use pulseguard_core::{DetectorError, DetectorPool};
//!
//! let mut pool: DetectorPool<2> = DetectorPool::new();
//! match pool.create(5) {
//!     Ok(handle) => {
//!         let _bpm = pool.process_sample(handle, 1200, 10);
//!     }
//!     Err(DetectorError::AllocationFailure) => {
//!         // Every channel slot is taken
//!     }
//!     Err(DetectorError::InvalidHandle) => unreachable!(),
//! }
//! ```
//!
//! Both variants are field-less, so `DetectorError` is a single byte and is
//! `Copy`.

use thiserror_no_std::Error;

/// Result type for detector operations
pub type DetectorResult<T> = Result<T, DetectorError>;

/// Detector errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorError {
    /// No storage available for a new detector instance
    #[error("Detector allocation failed: no free slot")]
    AllocationFailure,

    /// Handle does not refer to a live detector
    #[error("Invalid detector handle")]
    InvalidHandle,
}

#[cfg(feature = "defmt")]
impl defmt::Format for DetectorError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::AllocationFailure =>
                defmt::write!(fmt, "Detector allocation failed"),
            Self::InvalidHandle =>
                defmt::write!(fmt, "Invalid detector handle"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let msg = DetectorError::AllocationFailure.to_string();
        assert!(msg.contains("no free slot"));

        let msg = DetectorError::InvalidHandle.to_string();
        assert!(msg.contains("handle"));
    }

    #[test]
    fn error_is_small() {
        assert_eq!(core::mem::size_of::<DetectorError>(), 1);
    }
}
