//! Constants for PulseGuard Core
//!
//! Centralized constants used by the detector. Every numeric default lives
//! here with its unit in the name.
//!
//! ## Organization
//!
//! - **Time**: unit conversions and the stale-signal timeout
//! - **Heart rate**: physiological bounds, detector defaults, sentinels

/// Heart-rate bounds, detector defaults and sentinel values.
pub mod heart_rate;

/// Time-related constants for conversions and timeouts.
pub mod time;

// Re-export commonly used constants for convenience
pub use heart_rate::{
    DEFAULT_HYSTERESIS_DIVISOR, DEFAULT_POOL_CAPACITY, HEART_RATE_EMPTY, HEART_RATE_ERROR,
    HEART_RATE_MAX_BPM, HEART_RATE_MIN_BPM,
};
pub use time::{MS_PER_MINUTE, MS_PER_SECOND, STALE_SIGNAL_TIMEOUT_MS};
