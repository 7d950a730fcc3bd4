//! Heart-Rate Constants
//!
//! Physiological bounds, detector defaults and the sentinel values returned
//! through the handle API.

// ===== PHYSIOLOGICAL BOUNDS =====

/// Lowest accepted instantaneous heart rate (bpm).
///
/// Slower candidate rates are treated as missed beats or noise.
pub const HEART_RATE_MIN_BPM: f32 = 40.0;

/// Highest accepted instantaneous heart rate (bpm).
///
/// Faster candidate rates usually mean a dicrotic notch or a noise spike was
/// counted as a second beat.
pub const HEART_RATE_MAX_BPM: f32 = 240.0;

// ===== DETECTOR DEFAULTS =====

/// Default hysteresis divisor.
///
/// The hysteresis margin for the next cycle is `(max - min) / divisor`, i.e.
/// 20% of the previous peak-to-trough swing.
pub const DEFAULT_HYSTERESIS_DIVISOR: u32 = 5;

/// Default number of detector slots in a [`DetectorPool`](crate::DetectorPool).
pub const DEFAULT_POOL_CAPACITY: usize = 4;

// ===== SENTINEL VALUES =====

/// "No estimate yet" - returned before the first beat interval is known.
pub const HEART_RATE_EMPTY: f32 = 0.0;

/// Returned by [`DetectorPool::process_sample`](crate::DetectorPool::process_sample)
/// when the handle is invalid.
pub const HEART_RATE_ERROR: f32 = -1.0;
