//! Loop statistics snapshot

use serde::Serialize;

use crate::registry::EntityId;

/// Smoothing weight of the newest frame time in [`FrameTimer`]
const FRAME_TIME_ALPHA: f64 = 0.1;

/// Point-in-time view of the control loop.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerStats {
    /// Smoothed ticks per second (0 before any timed tick)
    pub frame_rate: f64,
    /// Smoothed tick period in milliseconds
    pub frame_time_ms: f64,
    pub alignment_quality: f64,
    /// Hits per trigger attempt (0 before the first attempt)
    pub hit_rate: f64,
    pub lock_duration_seconds: f64,
    /// Entities currently registered
    pub tracked_count: usize,
    pub active_target_id: Option<EntityId>,
}

impl TrackerStats {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Exponentially smoothed tick period.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameTimer {
    /// Smoothed period in seconds; `None` until the first positive dt
    average: Option<f64>,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in one tick period. Zero and non-finite periods are skipped.
    pub fn record(&mut self, dt: f64) {
        if !(dt.is_finite() && dt > 0.0) {
            return;
        }
        self.average = Some(match self.average {
            None => dt,
            Some(avg) => avg + (dt - avg) * FRAME_TIME_ALPHA,
        });
    }

    pub fn frame_time_ms(&self) -> f64 {
        self.average.map_or(0.0, |avg| avg * 1000.0)
    }

    pub fn frame_rate(&self) -> f64 {
        self.average.map_or(0.0, |avg| 1.0 / avg)
    }
}
