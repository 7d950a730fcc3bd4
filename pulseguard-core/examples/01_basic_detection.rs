//! Basic Beat Detection Example
//!
//! This example feeds a synthetic PPG waveform through a single detector
//! and prints what it sees on every beat.
//!
//! ## What You'll Learn
//!
//! - Creating a detector with the default configuration
//! - Feeding samples with millisecond timestamps
//! - Telling a first beat apart from a measured one
//! - What happens when the signal disappears
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_basic_detection
//! ```

use core::f32::consts::PI;

use pulseguard_core::{BeatDetector, Detection, DetectorConfig};

/// 50 Hz sensor
const SAMPLE_INTERVAL_MS: u32 = 20;

/// One PPG-like period: sharp systolic rise, slow decay
fn pulse(phase: f32) -> i32 {
    let value = if phase < 0.3 {
        -libm::cosf(PI * phase / 0.3)
    } else {
        libm::cosf(PI * (phase - 0.3) / 0.7)
    };
    libm::roundf(value * 1500.0) as i32
}

fn main() {
    println!("PulseGuard Basic Detection Example");
    println!("==================================\n");

    let config = DetectorConfig::default();
    println!("Detector configuration:");
    println!("  Hysteresis divisor: {}", config.hysteresis_divisor());
    println!(
        "  Accepted range: {} - {} bpm",
        config.heart_rate_min_bpm(),
        config.heart_rate_max_bpm()
    );
    println!("  Stale timeout: {} ms\n", config.stale_timeout_ms());

    let mut detector = BeatDetector::new(config);
    let mut now = 0u32;

    // 72 bpm is 833 ms per beat; round to whole samples
    let samples_per_beat = 42;
    println!("Phase 1: 10 beats at ~71 bpm");
    for i in 0..10 * samples_per_beat {
        let phase = (i % samples_per_beat) as f32 / samples_per_beat as f32;
        report(&mut detector, pulse(phase), now);
        now += SAMPLE_INTERVAL_MS;
    }

    println!("\nPhase 2: finger lifted for 3 seconds");
    for _ in 0..3000 / SAMPLE_INTERVAL_MS {
        report(&mut detector, 0, now);
        now += SAMPLE_INTERVAL_MS;
    }

    println!("\nPhase 3: signal back at 100 bpm");
    let samples_per_beat = 30;
    for i in 0..8 * samples_per_beat {
        let phase = (i % samples_per_beat) as f32 / samples_per_beat as f32;
        report(&mut detector, pulse(phase), now);
        now += SAMPLE_INTERVAL_MS;
    }

    println!("\nFinal estimate: {:.1} bpm", detector.heart_rate());
}

fn report(detector: &mut BeatDetector, sample: i32, now: u32) {
    match detector.step(sample, now) {
        Detection::NoBeat => {}
        Detection::SignalLost => println!("  t={:5}ms  signal lost, detector reset", now),
        Detection::FirstBeat => println!("  t={:5}ms  first beat, no rate yet", now),
        Detection::Beat { candidate_bpm: Some(bpm), accepted: true } => {
            println!("  t={:5}ms  beat  {:6.1} bpm", now, bpm)
        }
        Detection::Beat { candidate_bpm: Some(bpm), accepted: false } => {
            println!("  t={:5}ms  beat  {:6.1} bpm (rejected)", now, bpm)
        }
        Detection::Beat { candidate_bpm: None, .. } => {
            println!("  t={:5}ms  beat with zero interval, ignored", now)
        }
    }
}
