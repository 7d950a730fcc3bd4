//! Time-Related Constants
//!
//! Time unit conversions and the timeout that governs stale-signal recovery
//! in the beat detector.

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: u32 = 1000;

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: u32 = 60;

/// Milliseconds per minute.
///
/// Numerator of the beat-interval to BPM conversion: `bpm = 60000 / period_ms`.
pub const MS_PER_MINUTE: u32 = MS_PER_SECOND * SECONDS_PER_MINUTE;

// ===== TIMEOUT VALUES =====

/// Stale-signal timeout (milliseconds).
///
/// If no beat is detected for longer than this after the previous beat, the
/// detector assumes contact with the signal was lost and drops its extremum
/// state, hysteresis and beat reference. 2 s corresponds to 30 bpm, well below
/// the lowest accepted rate.
pub const STALE_SIGNAL_TIMEOUT_MS: u32 = 2000;

// ===== COUNTER LIMITS =====

/// Span of the 32-bit millisecond counter before it wraps (~49.7 days).
///
/// Elapsed times are computed with wrapping subtraction, so a wrap between two
/// consecutive calls is harmless.
pub const TIMESTAMP_WRAP_MS: u64 = u32::MAX as u64 + 1;
