//! Short-horizon motion predictor.
//!
//! Keeps the last few observed positions of the tracked entity and
//! extrapolates with the average velocity of the most recent samples.

use smallvec::SmallVec;

use crate::common::constants::{HISTORY_CAPACITY, VELOCITY_WINDOW};
use crate::common::vector::Vec3;

/// One observed position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistorySample {
    pub position: Vec3,
    /// Observation time in seconds
    pub timestamp: f64,
}

/// Bounded FIFO of recent positions for a single entity
#[derive(Debug, Clone, Default)]
pub struct MotionPredictor {
    /// Oldest first; never longer than [`HISTORY_CAPACITY`]
    history: SmallVec<[HistorySample; HISTORY_CAPACITY]>,
}

impl MotionPredictor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample, evicting the oldest on overflow.
    pub fn add_sample(&mut self, position: Vec3, timestamp: f64) {
        if self.history.len() == HISTORY_CAPACITY {
            self.history.remove(0);
        }
        self.history.push(HistorySample {
            position,
            timestamp,
        });
    }

    /// Predicted position `time_ahead` seconds after the newest sample.
    ///
    /// - no samples: zero vector
    /// - one sample: that sample's position
    /// - otherwise: newest position plus the mean velocity of consecutive
    ///   pairs among the last [`VELOCITY_WINDOW`] samples, skipping pairs
    ///   whose timestamps do not increase
    pub fn predict(&self, time_ahead: f64) -> Vec3 {
        let latest = match self.history.last() {
            None => return Vec3::zero(),
            Some(s) => s,
        };
        if self.history.len() < 2 {
            return latest.position;
        }

        let start = self.history.len().saturating_sub(VELOCITY_WINDOW);
        let window = &self.history[start..];

        let mut sum = Vec3::zero();
        let mut count = 0usize;
        for pair in window.windows(2) {
            let dt = pair[1].timestamp - pair[0].timestamp;
            if dt > 0.0 {
                sum = sum + (pair[1].position - pair[0].position) * (1.0 / dt);
                count += 1;
            }
        }

        if count == 0 {
            return latest.position;
        }
        let avg_velocity = sum * (1.0 / count as f64);
        latest.position + avg_velocity * time_ahead
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Newest sample, if any
    pub fn latest(&self) -> Option<&HistorySample> {
        self.history.last()
    }

    pub fn samples(&self) -> &[HistorySample] {
        &self.history
    }
}
