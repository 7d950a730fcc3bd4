//! Synthetic PPG waveform generators
//!
//! Produces exactly periodic pulse waveforms: the period is a whole number of
//! samples, so every period yields bit-identical sample values. That makes
//! beat counts deterministic. Optional noise is seeded and reproducible.

use core::f32::consts::PI;

use pulseguard_core::Timestamp;

use super::TestRng;

/// Shape of one pulse period
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PulseShape {
    /// Plain sine starting at zero on the rising edge
    Sine,
    /// Linear ramps between +amplitude and -amplitude, starting at zero
    Triangle,
    /// Trough at phase 0, fast systolic rise, slow diastolic decay
    Systolic {
        /// Fraction of the period spent rising (0, 1)
        rise_fraction: f32,
    },
}

/// Sample-by-sample PPG generator
pub struct PulseGenerator {
    shape: PulseShape,
    samples_per_beat: u32,
    sample_interval_ms: u32,
    amplitude: f32,
    noise_fraction: f32,
    rng: TestRng,
    index: u32,
    start_ms: Timestamp,
}

impl PulseGenerator {
    pub fn new(
        shape: PulseShape,
        samples_per_beat: u32,
        sample_interval_ms: u32,
        amplitude: f32,
    ) -> Self {
        Self {
            shape,
            samples_per_beat: samples_per_beat.max(2),
            sample_interval_ms,
            amplitude,
            noise_fraction: 0.0,
            rng: TestRng::new(0x5eed_1234),
            index: 0,
            start_ms: 0,
        }
    }

    /// Waveform whose period matches `bpm` at `sample_rate_hz`
    ///
    /// `60_000 / bpm` must be a multiple of the sample interval.
    pub fn at_rate(shape: PulseShape, bpm: u32, sample_rate_hz: u32, amplitude: f32) -> Self {
        let interval_ms = 1000 / sample_rate_hz;
        let period_ms = 60_000 / bpm;
        assert_eq!(period_ms % interval_ms, 0, "period must be a whole number of samples");
        Self::new(shape, period_ms / interval_ms, interval_ms, amplitude)
    }

    /// Add uniform noise of `fraction * amplitude`
    pub fn with_noise(mut self, fraction: f32, seed: u32) -> Self {
        self.noise_fraction = fraction;
        self.rng = TestRng::new(seed);
        self
    }

    pub fn starting_at(mut self, start_ms: Timestamp) -> Self {
        self.start_ms = start_ms;
        self
    }

    pub fn period_ms(&self) -> u32 {
        self.samples_per_beat * self.sample_interval_ms
    }

    pub fn samples_per_beat(&self) -> u32 {
        self.samples_per_beat
    }

    /// Timestamp the next sample will carry
    pub fn now(&self) -> Timestamp {
        self.start_ms.wrapping_add(self.index.wrapping_mul(self.sample_interval_ms))
    }

    /// Clean waveform value at a phase index within one period
    fn shape_value(&self, phase: u32) -> f32 {
        let n = self.samples_per_beat as f32;
        let p = phase as f32;
        match self.shape {
            PulseShape::Sine => libm::sinf(2.0 * PI * p / n),
            PulseShape::Triangle => {
                let x = p / n;
                if x < 0.25 {
                    4.0 * x
                } else if x < 0.75 {
                    2.0 - 4.0 * x
                } else {
                    4.0 * x - 4.0
                }
            }
            PulseShape::Systolic { rise_fraction } => {
                let rise = (rise_fraction * n).max(1.0);
                if p < rise {
                    -libm::cosf(PI * p / rise)
                } else {
                    libm::cosf(PI * (p - rise) / (n - rise))
                }
            }
        }
    }

    /// Next `(sample, timestamp)` pair
    pub fn next_sample(&mut self) -> (i32, Timestamp) {
        let timestamp = self.now();
        let phase = self.index % self.samples_per_beat;
        let mut value = self.amplitude * self.shape_value(phase);
        if self.noise_fraction > 0.0 {
            let span = self.noise_fraction * self.amplitude;
            value += self.rng.gen_range(-span, span);
        }
        self.index += 1;
        (libm::roundf(value) as i32, timestamp)
    }

    /// Generate whole periods
    pub fn beats(&mut self, count: u32) -> Vec<(i32, Timestamp)> {
        (0..count * self.samples_per_beat).map(|_| self.next_sample()).collect()
    }

    /// Hold a constant level for `duration_ms`, keeping the clock running
    pub fn flat(&mut self, level: i32, duration_ms: u32) -> Vec<(i32, Timestamp)> {
        let count = duration_ms / self.sample_interval_ms;
        (0..count)
            .map(|_| {
                let timestamp = self.now();
                self.index += 1;
                (level, timestamp)
            })
            .collect()
    }

    /// Restart the waveform at phase 0 from the current time
    pub fn restart_phase(&mut self) {
        self.start_ms = self.now();
        self.index = 0;
    }
}
