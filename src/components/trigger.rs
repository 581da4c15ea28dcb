//! Rate-limited discrete action trigger.
//!
//! The action fires only when the rate interval has elapsed, the target is
//! within range and alignment quality meets the minimum. Each firing is
//! drawn as a hit or miss with probability
//! `alignment_quality * adaptive_accuracy`.
//!
//! `adaptive_accuracy` starts at [`INITIAL_ADAPTIVE_ACCURACY`] and is clamped
//! to `[0.1, 1.0]` by every [`ActionTrigger::update_accuracy`] call, so the
//! probability can exceed 1 until the first update.

use rand::Rng;
use serde::Serialize;

use crate::common::constants::{
    INITIAL_ADAPTIVE_ACCURACY, MAX_ADAPTIVE_ACCURACY, MIN_ADAPTIVE_ACCURACY,
};

/// Trigger gating parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerParams {
    /// Minimum seconds between firings
    pub fire_interval: f64,
    pub max_fire_distance: f64,
    /// Minimum alignment quality
    pub min_accuracy: f64,
}

/// Result of a [`ActionTrigger::fire`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FireOutcome {
    /// Gating failed; nothing happened
    Blocked,
    /// Fired and the draw succeeded
    Hit,
    /// Fired and the draw failed
    Miss,
}

impl FireOutcome {
    /// True when the action was actually performed
    #[inline]
    pub fn fired(self) -> bool {
        !matches!(self, FireOutcome::Blocked)
    }

    #[inline]
    pub fn is_hit(self) -> bool {
        matches!(self, FireOutcome::Hit)
    }
}

#[derive(Debug, Clone)]
pub struct ActionTrigger {
    params: TriggerParams,
    /// Time of the last firing, seconds
    last_fire: Option<f64>,
    consecutive_hits: u32,
    adaptive_accuracy: f64,
}

impl ActionTrigger {
    pub fn new(params: TriggerParams) -> Self {
        Self {
            params,
            last_fire: None,
            consecutive_hits: 0,
            adaptive_accuracy: INITIAL_ADAPTIVE_ACCURACY,
        }
    }

    /// All gates pass at time `now`.
    pub fn can_fire(&self, distance: f64, alignment_quality: f64, now: f64) -> bool {
        let rate_ok = match self.last_fire {
            None => true,
            Some(t) => now - t >= self.params.fire_interval,
        };
        rate_ok
            && distance <= self.params.max_fire_distance
            && alignment_quality >= self.params.min_accuracy
    }

    /// Attempt the action at time `now`.
    ///
    /// A blocked attempt leaves all state untouched.
    pub fn fire<R: Rng>(
        &mut self,
        distance: f64,
        alignment_quality: f64,
        now: f64,
        rng: &mut R,
    ) -> FireOutcome {
        if !self.can_fire(distance, alignment_quality, now) {
            return FireOutcome::Blocked;
        }
        self.last_fire = Some(now);

        let success_probability = alignment_quality * self.adaptive_accuracy;
        let draw: f64 = rng.gen();
        if draw < success_probability {
            self.consecutive_hits += 1;
            FireOutcome::Hit
        } else {
            self.consecutive_hits = 0;
            FireOutcome::Miss
        }
    }

    /// Set the adaptive accuracy from an observed hit rate.
    ///
    /// Non-finite rates are ignored.
    pub fn update_accuracy(&mut self, recent_hit_rate: f64) {
        if !recent_hit_rate.is_finite() {
            return;
        }
        self.adaptive_accuracy = recent_hit_rate.clamp(MIN_ADAPTIVE_ACCURACY, MAX_ADAPTIVE_ACCURACY);
    }

    #[inline]
    pub fn last_fire(&self) -> Option<f64> {
        self.last_fire
    }

    #[inline]
    pub fn consecutive_hits(&self) -> u32 {
        self.consecutive_hits
    }

    #[inline]
    pub fn adaptive_accuracy(&self) -> f64 {
        self.adaptive_accuracy
    }
}
