//! PPG beat detector
//!
//! Estimates instantaneous heart rate from a stream of filtered PPG samples,
//! one sample per call. Each detection cycle runs through four phases:
//!
//! 1. **Extrema**: a peak tracker and a trough tracker lock onto the swing
//!    of the waveform (see [`ExtremumTracker`]).
//! 2. **Threshold**: once both are confirmed, the midpoint between them is
//!    latched as the beat threshold for this cycle.
//! 3. **Crossing**: a beat is the falling edge through that threshold
//!    (previous sample at or above, current sample strictly below).
//! 4. **Rate**: the interval to the previous beat gives the BPM candidate,
//!    which is accepted only inside the configured bounds.
//!
//! After each beat the hysteresis margin for the next cycle is recomputed
//! as `(max - min) / divisor`, so the margin scales with signal amplitude.
//!
//! ## Cold start
//!
//! A fresh (or timed-out) detector runs its first cycle with zero
//! hysteresis: a sample equal to the running extremum already confirms it.
//!
//! ## Signal loss
//!
//! When no beat arrives within the stale timeout after the previous one, the
//! extrema, hysteresis and beat reference are dropped. The next beat is then
//! treated as a first beat again. The last accepted rate is kept.
//!
//! ```rust
//! use pulseguard_core::{BeatDetector, HEART_RATE_EMPTY};
//!
//! let mut detector = BeatDetector::default();
//! let bpm = detector.process_sample(512, 0);
//! assert_eq!(bpm, HEART_RATE_EMPTY);
//! ```

use core::num::NonZeroU32;

use crate::{
    constants::{
        heart_rate::{
            DEFAULT_HYSTERESIS_DIVISOR, HEART_RATE_EMPTY, HEART_RATE_MAX_BPM,
            HEART_RATE_MIN_BPM,
        },
        time::{MS_PER_MINUTE, STALE_SIGNAL_TIMEOUT_MS},
    },
    extremum::ExtremumTracker,
    time::{elapsed_ms, TimeSource, Timestamp},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Map a raw divisor to a usable one; zero selects the default
pub fn normalize_divisor(divisor: u32) -> NonZeroU32 {
    NonZeroU32::new(divisor).unwrap_or(DEFAULT_DIVISOR)
}

const DEFAULT_DIVISOR: NonZeroU32 = match NonZeroU32::new(DEFAULT_HYSTERESIS_DIVISOR) {
    Some(divisor) => divisor,
    None => panic!("default hysteresis divisor must be nonzero"),
};

/// Detector configuration, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DetectorConfig {
    /// Fraction of the last max-min swing used as hysteresis (`swing / divisor`)
    #[cfg_attr(feature = "serde", serde(deserialize_with = "divisor_or_default"))]
    hysteresis_divisor: NonZeroU32,

    /// Lowest accepted rate (bpm)
    heart_rate_min_bpm: f32,

    /// Highest accepted rate (bpm)
    heart_rate_max_bpm: f32,

    /// Time without a beat before the detector resets itself (ms)
    stale_timeout_ms: u32,
}

#[cfg(feature = "serde")]
fn divisor_or_default<'de, D>(deserializer: D) -> Result<NonZeroU32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = u32::deserialize(deserializer)?;
    Ok(normalize_divisor(raw))
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            hysteresis_divisor: DEFAULT_DIVISOR,
            heart_rate_min_bpm: HEART_RATE_MIN_BPM,
            heart_rate_max_bpm: HEART_RATE_MAX_BPM,
            stale_timeout_ms: STALE_SIGNAL_TIMEOUT_MS,
        }
    }
}

impl DetectorConfig {
    /// Default bounds with the given divisor (0 selects the default of 5)
    pub fn with_divisor(divisor: u32) -> Self {
        Self {
            hysteresis_divisor: normalize_divisor(divisor),
            ..Self::default()
        }
    }

    /// Override the accepted heart-rate range
    pub fn with_rate_bounds(mut self, min_bpm: f32, max_bpm: f32) -> Self {
        // Sanity check: can't have min > max
        let (min_bpm, max_bpm) = if min_bpm > max_bpm {
            (max_bpm, min_bpm)
        } else {
            (min_bpm, max_bpm)
        };
        self.heart_rate_min_bpm = min_bpm;
        self.heart_rate_max_bpm = max_bpm;
        self
    }

    /// Override the stale-signal timeout
    pub fn with_stale_timeout(mut self, timeout_ms: u32) -> Self {
        self.stale_timeout_ms = timeout_ms;
        self
    }

    /// Hysteresis divisor, never zero
    pub fn hysteresis_divisor(&self) -> NonZeroU32 {
        self.hysteresis_divisor
    }

    /// Lower rate bound (bpm)
    pub fn heart_rate_min_bpm(&self) -> f32 {
        self.heart_rate_min_bpm
    }

    /// Upper rate bound (bpm)
    pub fn heart_rate_max_bpm(&self) -> f32 {
        self.heart_rate_max_bpm
    }

    /// Stale-signal timeout (ms)
    pub fn stale_timeout_ms(&self) -> u32 {
        self.stale_timeout_ms
    }

    /// Whether a candidate rate lies inside the accepted bounds (inclusive)
    pub fn accepts(&self, bpm: f32) -> bool {
        bpm >= self.heart_rate_min_bpm && bpm <= self.heart_rate_max_bpm
    }
}

/// Outcome of one [`BeatDetector::step`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Detection {
    /// No beat on this sample
    NoBeat,
    /// No beat for longer than the stale timeout; detector state was dropped
    SignalLost,
    /// Beat detected, but there is no earlier beat to measure against
    FirstBeat,
    /// Beat detected and an interval measured
    Beat {
        /// Rate implied by the interval; `None` for a zero-length or
        /// backwards interval
        candidate_bpm: Option<f32>,
        /// Whether the candidate replaced the current estimate
        accepted: bool,
    },
}

impl Detection {
    /// True for every variant that corresponds to a detected beat
    pub fn is_beat(&self) -> bool {
        matches!(self, Self::FirstBeat | Self::Beat { .. })
    }
}

/// Per-signal beat detection state machine
#[derive(Debug, Clone)]
pub struct BeatDetector {
    config: DetectorConfig,

    /// Last sample that did not trigger a beat, for the edge test
    previous_sample: i32,

    max: ExtremumTracker,
    min: ExtremumTracker,

    /// Confirmation margin for the trackers, from the last completed cycle
    hysteresis: i64,

    /// Midpoint threshold, latched once per cycle
    beat_threshold: Option<i32>,

    last_beat_at: Option<Timestamp>,

    /// Last accepted estimate; `HEART_RATE_EMPTY` until the first one
    heart_rate: f32,
}

impl Default for BeatDetector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

impl BeatDetector {
    /// Fresh detector: no extrema, zero hysteresis, no estimate
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            previous_sample: 0,
            max: ExtremumTracker::peak(),
            min: ExtremumTracker::trough(),
            hysteresis: 0,
            beat_threshold: None,
            last_beat_at: None,
            heart_rate: HEART_RATE_EMPTY,
        }
    }

    /// Default rate bounds with the given hysteresis divisor (0 selects 5)
    pub fn with_divisor(divisor: u32) -> Self {
        Self::new(DetectorConfig::with_divisor(divisor))
    }

    /// Return to the just-created state, keeping the configuration
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    /// Feed one sample and get the current heart-rate estimate
    ///
    /// Returns [`HEART_RATE_EMPTY`] when this sample produced the first beat of
    /// a chain (no interval yet), otherwise the last accepted estimate, which
    /// is itself `HEART_RATE_EMPTY` until an interval has been accepted.
    pub fn process_sample(&mut self, sample: i32, timestamp: Timestamp) -> f32 {
        match self.step(sample, timestamp) {
            Detection::FirstBeat => HEART_RATE_EMPTY,
            _ => self.heart_rate,
        }
    }

    /// [`process_sample`](Self::process_sample) with the timestamp read from a clock
    pub fn process_sample_with<T: TimeSource>(&mut self, sample: i32, clock: &T) -> f32 {
        self.process_sample(sample, clock.now())
    }

    /// Feed one sample and report what happened
    pub fn step(&mut self, sample: i32, timestamp: Timestamp) -> Detection {
        self.min.update(sample, self.hysteresis);
        self.max.update(sample, self.hysteresis);

        if self.crossed_threshold(sample) {
            self.hysteresis = self.swing() / i64::from(self.config.hysteresis_divisor.get());
            self.reset_extrema();
            log_trace!("beat at {} ms, next hysteresis {}", timestamp, self.hysteresis);
            return self.register_beat(timestamp);
        }

        self.previous_sample = sample;

        if let Some(last_beat) = self.last_beat_at {
            if elapsed_ms(last_beat, timestamp) > self.config.stale_timeout_ms {
                log_debug!("no beat since {} ms, resetting at {} ms", last_beat, timestamp);
                self.reset_extrema();
                self.hysteresis = 0;
                self.last_beat_at = None;
                return Detection::SignalLost;
            }
        }

        Detection::NoBeat
    }

    /// Latch the threshold if needed, then test for a falling-edge crossing
    fn crossed_threshold(&mut self, sample: i32) -> bool {
        if !(self.max.is_found() && self.min.is_found()) {
            return false;
        }

        let threshold = match self.beat_threshold {
            Some(threshold) => threshold,
            None => {
                // Truncating midpoint, computed wide so extreme samples can't overflow
                let midpoint =
                    (i64::from(self.max.value()) + i64::from(self.min.value())) / 2;
                // Lies between min and max, so it fits back into i32
                let threshold = midpoint as i32;
                self.beat_threshold = Some(threshold);
                threshold
            }
        };

        sample < threshold && self.previous_sample >= threshold
    }

    fn swing(&self) -> i64 {
        i64::from(self.max.value()) - i64::from(self.min.value())
    }

    /// Max and min always reset together, with the threshold
    fn reset_extrema(&mut self) {
        self.max.reset();
        self.min.reset();
        self.beat_threshold = None;
    }

    fn register_beat(&mut self, timestamp: Timestamp) -> Detection {
        let Some(last_beat) = self.last_beat_at.replace(timestamp) else {
            return Detection::FirstBeat;
        };

        // Anything past i32::MAX is a timestamp from before the last beat
        let period_ms = elapsed_ms(last_beat, timestamp);
        if period_ms == 0 || period_ms > i32::MAX as u32 {
            log_debug!("skipped beat interval of {} ms", period_ms);
            return Detection::Beat { candidate_bpm: None, accepted: false };
        }

        let bpm = MS_PER_MINUTE as f32 / period_ms as f32;
        let accepted = self.config.accepts(bpm);
        if accepted {
            self.heart_rate = bpm;
        } else {
            log_debug!("rejected {} bpm (interval {} ms)", bpm, period_ms);
        }

        Detection::Beat { candidate_bpm: Some(bpm), accepted }
    }

    /// Configuration the detector was built with
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Last accepted estimate, `HEART_RATE_EMPTY` if none yet
    pub fn heart_rate(&self) -> f32 {
        self.heart_rate
    }

    /// Current confirmation margin
    pub fn hysteresis(&self) -> i64 {
        self.hysteresis
    }

    /// Threshold of the current cycle, once latched
    pub fn beat_threshold(&self) -> Option<i32> {
        self.beat_threshold
    }

    /// Time of the last beat, `None` after a reset
    pub fn last_beat_at(&self) -> Option<Timestamp> {
        self.last_beat_at
    }

    /// Sample used for the next edge test
    pub fn previous_sample(&self) -> i32 {
        self.previous_sample
    }

    /// Peak tracker
    pub fn max_tracker(&self) -> &ExtremumTracker {
        &self.max
    }

    /// Trough tracker
    pub fn min_tracker(&self) -> &ExtremumTracker {
        &self.min
    }
}
