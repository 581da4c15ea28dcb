//! Time sources.
//!
//! Components never read the wall clock themselves; the caller passes time
//! in. [`Clock`] is the seam where the tracker facade obtains that time, so
//! tests can substitute a [`ManualClock`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Source of monotonic time in seconds
pub trait Clock: Send + Sync {
    /// Seconds since an arbitrary fixed origin
    fn now(&self) -> f64;
}

/// Production clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Settable clock shared between a test and the code under test.
///
/// Clones share the same time value.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    bits: Arc<AtomicU64>,
}

impl ManualClock {
    /// Clock starting at `start` seconds
    pub fn new(start: f64) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(start.to_bits())),
        }
    }

    pub fn set(&self, seconds: f64) {
        self.bits.store(seconds.to_bits(), Ordering::SeqCst);
    }

    /// Move the clock forward by `seconds`
    pub fn advance(&self, seconds: f64) {
        let next = self.now() + seconds;
        self.set(next);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::SeqCst))
    }
}
