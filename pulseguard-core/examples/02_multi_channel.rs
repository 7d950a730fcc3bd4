//! Multi-Channel Pool Example
//!
//! Runs several detectors side by side from a fixed-capacity pool, the way
//! firmware monitoring more than one PPG channel would.
//!
//! ## What You'll Learn
//!
//! - Reserving detectors in a `DetectorPool`
//! - Handling pool exhaustion
//! - Why a destroyed handle stays invalid after its slot is reused
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_multi_channel
//! ```

use core::f32::consts::PI;

use pulseguard_core::{DetectorError, DetectorPool, HEART_RATE_EMPTY, HEART_RATE_ERROR};

const SAMPLE_INTERVAL_MS: u32 = 10;

fn sine(index: u32, samples_per_beat: u32, amplitude: f32) -> i32 {
    let phase = (index % samples_per_beat) as f32 / samples_per_beat as f32;
    libm::roundf(amplitude * libm::sinf(2.0 * PI * phase)) as i32
}

fn main() -> Result<(), DetectorError> {
    println!("PulseGuard Multi-Channel Example");
    println!("================================\n");

    let mut pool: DetectorPool<2> = DetectorPool::new();
    let finger = pool.create(0)?;
    let wrist = pool.create(4)?;
    println!("Created 2 detectors (capacity {})", pool.capacity());

    match pool.create(5) {
        Err(DetectorError::AllocationFailure) => println!("Third detector refused: pool full\n"),
        other => println!("Unexpected: {:?}\n", other),
    }

    // Finger at 60 bpm (100 samples), wrist at 120 bpm (50 samples)
    for i in 0..1000 {
        let now = i * SAMPLE_INTERVAL_MS;
        pool.process_sample(finger, sine(i, 100, 2000.0), now);
        pool.process_sample(wrist, sine(i, 50, 400.0), now);
    }

    for (name, handle) in [("finger", finger), ("wrist", wrist)] {
        let bpm = pool.get(handle).map_or(HEART_RATE_ERROR, |d| d.heart_rate());
        println!("  {:6}: {:.1} bpm", name, bpm);
    }

    println!("\nReplacing the wrist channel:");
    pool.destroy(wrist);
    let chest = pool.create(0)?;
    println!("  new handle reuses slot {}", chest.index());

    let stale = pool.process_sample(wrist, 0, 10_000);
    println!("  old wrist handle -> {} (HEART_RATE_ERROR)", stale);

    let fresh = pool.process_sample(chest, 0, 10_000);
    assert_eq!(fresh, HEART_RATE_EMPTY);
    println!("  new chest handle -> {} (no estimate yet)", fresh);

    Ok(())
}
