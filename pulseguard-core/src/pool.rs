//! Fixed-Capacity Detector Pool
//!
//! ## Overview
//!
//! Firmware that monitors several PPG channels (one detector per channel)
//! usually cannot allocate at runtime. `DetectorPool` reserves storage for
//! `N` detectors up front and hands out small copyable handles:
//!
//! - `create()` takes a free slot or fails with `AllocationFailure`
//! - `destroy()` frees a slot; stale handles are ignored
//! - `process_sample()` never panics and returns [`HEART_RATE_ERROR`] for a
//!   handle that does not refer to a live detector
//!
//! ## Stale Handles
//!
//! Each slot carries a generation counter that is bumped whenever the slot is
//! reused. A handle remembers the generation it was issued with, so a handle
//! kept after `destroy()` cannot reach the detector that later took its slot.
//!
//! ```text
//! slot 0: gen 0 [detector A]   handle{0, 0} -> A
//! destroy(handle{0, 0})        slot 0 free
//! create()                     slot 0: gen 1 [detector B], handle{0, 1}
//! process(handle{0, 0})        -> HEART_RATE_ERROR
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use pulseguard_core::{DetectorPool, HEART_RATE_EMPTY};
//!
//! let mut pool: DetectorPool<2> = DetectorPool::new();
//! let finger = pool.create(0)?; // 0 selects the default divisor
//! let wrist = pool.create(4)?;
//!
//! assert_eq!(pool.process_sample(finger, 2048, 10), HEART_RATE_EMPTY);
//! assert_eq!(pool.process_sample(wrist, 1900, 10), HEART_RATE_EMPTY);
//! assert!(pool.create(5).is_err());
//! # Ok::<(), pulseguard_core::DetectorError>(())
//! ```
//!
//! Calls for one handle must be serialized by the caller; the pool itself
//! takes `&mut self` and does no locking.

use heapless::Vec;

use crate::{
    constants::heart_rate::{DEFAULT_POOL_CAPACITY, HEART_RATE_ERROR},
    detector::{BeatDetector, DetectorConfig},
    errors::{DetectorError, DetectorResult},
    time::Timestamp,
};

/// Reference to a detector living in a [`DetectorPool`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DetectorHandle {
    index: usize,
    generation: u32,
}

impl DetectorHandle {
    /// Slot index inside the pool
    pub fn index(&self) -> usize {
        self.index
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    detector: Option<BeatDetector>,
}

/// Statically sized pool of beat detectors
#[derive(Debug, Clone)]
pub struct DetectorPool<const N: usize = DEFAULT_POOL_CAPACITY> {
    slots: Vec<Slot, N>,
    live: usize,
}

impl<const N: usize> Default for DetectorPool<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> DetectorPool<N> {
    /// Empty pool with room for `N` detectors
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            live: 0,
        }
    }

    /// Create a detector with default rate bounds
    ///
    /// A `hysteresis_divisor` of 0 selects the default of 5.
    pub fn create(&mut self, hysteresis_divisor: u32) -> DetectorResult<DetectorHandle> {
        self.create_with(DetectorConfig::with_divisor(hysteresis_divisor))
    }

    /// Create a detector with an explicit configuration
    pub fn create_with(&mut self, config: DetectorConfig) -> DetectorResult<DetectorHandle> {
        let detector = BeatDetector::new(config);

        // Reuse a freed slot first
        if let Some((index, slot)) = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(_, slot)| slot.detector.is_none())
        {
            slot.generation = slot.generation.wrapping_add(1);
            slot.detector = Some(detector);
            self.live += 1;
            return Ok(DetectorHandle { index, generation: slot.generation });
        }

        let index = self.slots.len();
        self.slots
            .push(Slot { generation: 0, detector: Some(detector) })
            .map_err(|_| {
                log_warn!("detector pool exhausted ({} slots)", N);
                DetectorError::AllocationFailure
            })?;
        self.live += 1;

        Ok(DetectorHandle { index, generation: 0 })
    }

    /// Release a detector; unknown or stale handles are a no-op
    pub fn destroy(&mut self, handle: DetectorHandle) {
        if let Some(slot) = self.slot_mut(handle) {
            slot.detector = None;
            self.live -= 1;
        }
    }

    /// Return a detector to its just-created state
    pub fn reset(&mut self, handle: DetectorHandle) -> DetectorResult<()> {
        self.get_mut(handle)
            .map(BeatDetector::reset)
            .ok_or(DetectorError::InvalidHandle)
    }

    /// Feed one sample to a detector
    ///
    /// Returns [`HEART_RATE_ERROR`] if the handle is invalid, otherwise the
    /// same value as [`BeatDetector::process_sample`].
    pub fn process_sample(
        &mut self,
        handle: DetectorHandle,
        sample: i32,
        timestamp: Timestamp,
    ) -> f32 {
        self.try_process_sample(handle, sample, timestamp)
            .unwrap_or(HEART_RATE_ERROR)
    }

    /// Like [`process_sample`](Self::process_sample), with the invalid
    /// handle reported as an error
    pub fn try_process_sample(
        &mut self,
        handle: DetectorHandle,
        sample: i32,
        timestamp: Timestamp,
    ) -> DetectorResult<f32> {
        self.get_mut(handle)
            .map(|detector| detector.process_sample(sample, timestamp))
            .ok_or(DetectorError::InvalidHandle)
    }

    /// Live detector behind a handle
    pub fn get(&self, handle: DetectorHandle) -> Option<&BeatDetector> {
        self.slots
            .get(handle.index)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.detector.as_ref())
    }

    /// Mutable access to a live detector
    pub fn get_mut(&mut self, handle: DetectorHandle) -> Option<&mut BeatDetector> {
        self.slot_mut(handle)
            .and_then(|slot| slot.detector.as_mut())
    }

    /// Live slot for a handle, `None` if stale or free
    fn slot_mut(&mut self, handle: DetectorHandle) -> Option<&mut Slot> {
        self.slots
            .get_mut(handle.index)
            .filter(|slot| slot.generation == handle.generation && slot.detector.is_some())
    }

    /// Number of live detectors
    pub fn len(&self) -> usize {
        self.live
    }

    /// No live detectors
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Maximum number of live detectors
    pub fn capacity(&self) -> usize {
        N
    }
}
