//! Common test utilities for integration tests
//!
//! This module provides:
//! - Synthetic PPG waveform generators
//! - A deterministic RNG for reproducible noise
//! - A runner that feeds samples to a detector and records what happened

#![allow(dead_code)]

use pulseguard_core::{BeatDetector, Detection, Timestamp};

pub mod generators;

/// Xorshift RNG, seeded for reproducible runs
pub struct TestRng {
    state: u32,
}

impl TestRng {
    pub fn new(seed: u32) -> Self {
        // Xorshift state must be nonzero
        Self { state: seed.max(1) }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / 16777216.0
    }

    pub fn gen_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }
}

/// Everything a detector reported over a run
#[derive(Debug, Default)]
pub struct RunLog {
    pub detections: Vec<(Timestamp, Detection)>,
    pub estimates: Vec<f32>,
}

impl RunLog {
    /// Timestamps of every detected beat
    pub fn beat_times(&self) -> Vec<Timestamp> {
        self.detections
            .iter()
            .filter(|(_, d)| d.is_beat())
            .map(|&(t, _)| t)
            .collect()
    }

    pub fn beat_count(&self) -> usize {
        self.beat_times().len()
    }

    /// Gaps between consecutive beats (ms)
    pub fn beat_intervals(&self) -> Vec<u32> {
        self.beat_times().windows(2).map(|w| w[1].wrapping_sub(w[0])).collect()
    }

    pub fn count(&self, wanted: Detection) -> usize {
        self.detections.iter().filter(|(_, d)| *d == wanted).count()
    }

    /// Mean beat interval over the whole run (ms)
    pub fn mean_interval_ms(&self) -> Option<f32> {
        let beats = self.beat_times();
        let (first, last) = (beats.first()?, beats.last()?);
        if beats.len() < 2 {
            return None;
        }
        Some(last.wrapping_sub(*first) as f32 / (beats.len() - 1) as f32)
    }
}

/// Feed samples through `step`, also recording the estimate after each one
///
/// The estimate is what `process_sample` would have returned for that call.
pub fn run(detector: &mut BeatDetector, samples: &[(i32, Timestamp)]) -> RunLog {
    let mut log = RunLog::default();
    for &(sample, timestamp) in samples {
        let detection = detector.step(sample, timestamp);
        let estimate = match detection {
            Detection::FirstBeat => pulseguard_core::HEART_RATE_EMPTY,
            _ => detector.heart_rate(),
        };
        log.detections.push((timestamp, detection));
        log.estimates.push(estimate);
    }
    log
}

/// Estimate is either "none yet" or inside the default bounds
pub fn plausible(bpm: f32) -> bool {
    bpm == pulseguard_core::HEART_RATE_EMPTY || (40.0..=240.0).contains(&bpm)
}
