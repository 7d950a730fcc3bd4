//! Local extremum tracking with hysteresis
//!
//! A tracker latches the first sample it sees as its candidate extremum and
//! then waits for the signal to move away from it by at least the hysteresis
//! margin. Once that happens the candidate is confirmed and frozen until the
//! tracker is reset.
//!
//! ```text
//!            Idle ──(any sample)──▶ Searching ──(moved past margin)──▶ Found
//!              ▲                                                       │
//!              └──────────────────────── reset() ──────────────────────┘
//! ```
//!
//! The same type tracks peaks and troughs; only the direction of the
//! confirmation test differs.
//!
//! While searching, the candidate follows the signal whenever a sample goes
//! beyond it (higher for a peak, lower for a trough). A sample that extends
//! the candidate never confirms it on the same call.

/// Direction of the extremum being tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExtremumKind {
    /// Local maximum: confirmed once the signal falls by the margin
    Peak,
    /// Local minimum: confirmed once the signal rises by the margin
    Trough,
}

/// Tracking phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExtremumPhase {
    /// No candidate yet
    #[default]
    Idle,
    /// Candidate latched, waiting for confirmation
    Searching,
    /// Candidate confirmed and frozen
    Found,
}

/// Three-phase extremum tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtremumTracker {
    kind: ExtremumKind,
    phase: ExtremumPhase,
    value: i32,
}

impl ExtremumTracker {
    /// Create an idle tracker
    pub const fn new(kind: ExtremumKind) -> Self {
        Self {
            kind,
            phase: ExtremumPhase::Idle,
            value: 0,
        }
    }

    /// Idle peak tracker
    pub const fn peak() -> Self {
        Self::new(ExtremumKind::Peak)
    }

    /// Idle trough tracker
    pub const fn trough() -> Self {
        Self::new(ExtremumKind::Trough)
    }

    /// Feed one sample
    ///
    /// `hysteresis` is the confirmation margin. A zero margin confirms the
    /// candidate on the very next sample that is not beyond it.
    pub fn update(&mut self, sample: i32, hysteresis: i64) {
        match self.phase {
            ExtremumPhase::Idle => {
                self.value = sample;
                self.phase = ExtremumPhase::Searching;
            }
            ExtremumPhase::Searching => {
                let (beyond, confirmed) = {
                    let wide = i64::from(sample);
                    let candidate = i64::from(self.value);
                    match self.kind {
                        ExtremumKind::Peak => (wide > candidate, wide <= candidate - hysteresis),
                        ExtremumKind::Trough => (wide < candidate, wide >= candidate + hysteresis),
                    }
                };
                if beyond {
                    self.value = sample;
                } else if confirmed {
                    self.phase = ExtremumPhase::Found;
                }
            }
            ExtremumPhase::Found => {}
        }
    }

    /// Back to `Idle`, candidate cleared
    pub fn reset(&mut self) {
        self.phase = ExtremumPhase::Idle;
        self.value = 0;
    }

    /// Peak or trough
    pub fn kind(&self) -> ExtremumKind {
        self.kind
    }

    /// Current phase
    pub fn phase(&self) -> ExtremumPhase {
        self.phase
    }

    /// Candidate (or confirmed) extremum; 0 while idle
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Candidate confirmed
    pub fn is_found(&self) -> bool {
        self.phase == ExtremumPhase::Found
    }
}
