//! Tracker configuration
//!
//! [`TrackerConfig`] is supplied once at construction and never mutated
//! afterwards. Each component receives its own focused parameter struct
//! derived from it ([`ControllerParams`], [`TriggerParams`],
//! [`SelectionParams`], [`KalmanConfig`]), so no component reads shared
//! ambient state.
//!
//! Field names on the JSON side are camelCase (`dragForce`, `maxFPS`,
//! `kalman.R`, ...). Missing fields take their default values.

use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use crate::common::constants::MIN_TICK_RATE;
use crate::components::{ControllerParams, TriggerParams};
use crate::registry::SelectionParams;

/// Noise parameters for the per-axis estimators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KalmanConfig {
    /// Measurement noise (R)
    #[serde(rename = "R")]
    pub r: f64,
    /// Process noise (Q), injected additively on the covariance diagonal
    #[serde(rename = "Q")]
    pub q: f64,
}

impl Default for KalmanConfig {
    fn default() -> Self {
        Self { r: 0.1, q: 0.01 }
    }
}

/// Complete tracker configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackerConfig {
    // --- motion controller ---
    /// Gain from position error to desired velocity (per second)
    pub drag_force: f64,
    /// Distance beyond which the long-range multiplier applies
    pub max_distance: f64,
    /// Force multiplier for distant targets
    pub long_range_multiplier: f64,
    /// Per-tick velocity blend coefficient in [0, 1]
    pub smoothing_factor: f64,
    /// Snap distance, also the scale of alignment quality
    pub snap_threshold: f64,
    /// Maximum speed at which snapping is allowed
    pub velocity_threshold: f64,
    pub enable_snap: bool,
    /// Enable additive offset compensation
    pub recoil_compensation: bool,
    pub recoil_factor: f64,

    // --- prediction ---
    /// Prediction lookahead in milliseconds
    pub max_prediction_time_ms: f64,
    /// Weight of the predictor relative to the filter at full blend distance
    pub prediction_weight: f64,
    pub kalman: KalmanConfig,

    // --- selection ---
    /// Prefer entities of `preferred_category`
    pub head_lock_only: bool,
    /// Category favoured when `head_lock_only` is set
    pub preferred_category: String,
    /// Switch targets immediately, ignoring the cooldown
    pub instant_switch: bool,
    pub switch_delay_ms: f64,
    /// Entities not seen for this long are ignored
    pub target_timeout_ms: f64,
    pub max_target_distance: f64,
    /// Registry capacity
    pub max_targets: usize,

    // --- trigger ---
    pub fire_on_lock: bool,
    pub min_lock_time_seconds: f64,
    /// Minimum interval between actions in milliseconds
    pub fire_rate_ms: f64,
    pub max_fire_distance: f64,
    /// Minimum alignment quality required to fire
    pub min_accuracy: f64,

    // --- loop ---
    /// Tick rate in Hz
    #[serde(rename = "maxFPS")]
    pub max_fps: f64,
    /// Seed for the trigger's random draws; entropy when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rng_seed: Option<u64>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            drag_force: 5.0,
            max_distance: 5.0,
            long_range_multiplier: 1.5,
            smoothing_factor: 0.3,
            snap_threshold: 0.5,
            velocity_threshold: 2.0,
            enable_snap: true,
            recoil_compensation: false,
            recoil_factor: 0.5,
            max_prediction_time_ms: 100.0,
            prediction_weight: 0.5,
            kalman: KalmanConfig::default(),
            head_lock_only: false,
            preferred_category: "head".to_string(),
            instant_switch: false,
            switch_delay_ms: 200.0,
            target_timeout_ms: 1000.0,
            max_target_distance: 100.0,
            max_targets: 32,
            fire_on_lock: false,
            min_lock_time_seconds: 0.1,
            fire_rate_ms: 100.0,
            max_fire_distance: 50.0,
            min_accuracy: 0.8,
            max_fps: 144.0,
            rng_seed: None,
        }
    }
}

impl TrackerConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: TrackerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Serialize to pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Reject configurations that would divide by zero or run timers backwards.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("maxFPS", self.max_fps)?;
        in_range("maxFPS", self.max_fps, MIN_TICK_RATE, f64::MAX)?;
        positive("snapThreshold", self.snap_threshold)?;
        positive("maxTargetDistance", self.max_target_distance)?;

        non_negative("dragForce", self.drag_force)?;
        non_negative("maxDistance", self.max_distance)?;
        non_negative("longRangeMultiplier", self.long_range_multiplier)?;
        non_negative("velocityThreshold", self.velocity_threshold)?;
        non_negative("recoilFactor", self.recoil_factor)?;
        non_negative("maxPredictionTimeMs", self.max_prediction_time_ms)?;
        non_negative("predictionWeight", self.prediction_weight)?;
        non_negative("kalman.R", self.kalman.r)?;
        non_negative("kalman.Q", self.kalman.q)?;
        non_negative("switchDelayMs", self.switch_delay_ms)?;
        non_negative("targetTimeoutMs", self.target_timeout_ms)?;
        non_negative("minLockTimeSeconds", self.min_lock_time_seconds)?;
        non_negative("fireRateMs", self.fire_rate_ms)?;
        non_negative("maxFireDistance", self.max_fire_distance)?;
        non_negative("minAccuracy", self.min_accuracy)?;

        in_range("smoothingFactor", self.smoothing_factor, 0.0, 1.0)?;

        if self.max_targets == 0 {
            return Err(ConfigError::NonPositive {
                field: "maxTargets",
                value: 0.0,
            });
        }
        Ok(())
    }

    /// Tick period in seconds
    #[inline]
    pub fn tick_interval(&self) -> f64 {
        1.0 / self.max_fps
    }

    /// Prediction lookahead in seconds
    #[inline]
    pub fn lookahead_seconds(&self) -> f64 {
        self.max_prediction_time_ms / 1000.0
    }

    pub fn controller_params(&self) -> ControllerParams {
        ControllerParams {
            base_force: self.drag_force,
            max_distance: self.max_distance,
            long_range_multiplier: self.long_range_multiplier,
            smoothing_factor: self.smoothing_factor,
            snap_threshold: self.snap_threshold,
            velocity_threshold: self.velocity_threshold,
            enable_snap: self.enable_snap,
            compensation_enabled: self.recoil_compensation,
            compensation_factor: self.recoil_factor,
        }
    }

    pub fn trigger_params(&self) -> TriggerParams {
        TriggerParams {
            fire_interval: self.fire_rate_ms / 1000.0,
            max_fire_distance: self.max_fire_distance,
            min_accuracy: self.min_accuracy,
        }
    }

    pub fn selection_params(&self) -> SelectionParams {
        SelectionParams {
            target_timeout: self.target_timeout_ms / 1000.0,
            max_target_distance: self.max_target_distance,
            preferred_category: self
                .head_lock_only
                .then(|| self.preferred_category.clone()),
            instant_switch: self.instant_switch,
            switch_delay: self.switch_delay_ms / 1000.0,
            max_targets: self.max_targets,
        }
    }

    // --- builder-style setters ---

    pub fn with_max_fps(mut self, fps: f64) -> Self {
        self.max_fps = fps;
        self
    }

    pub fn with_kalman(mut self, r: f64, q: f64) -> Self {
        self.kalman = KalmanConfig { r, q };
        self
    }

    pub fn with_fire_on_lock(mut self, enabled: bool) -> Self {
        self.fire_on_lock = enabled;
        self
    }

    pub fn with_instant_switch(mut self, enabled: bool) -> Self {
        self.instant_switch = enabled;
        self
    }

    pub fn with_switch_delay_ms(mut self, delay_ms: f64) -> Self {
        self.switch_delay_ms = delay_ms;
        self
    }

    /// Enable preferred-category-only scoring for `category`
    pub fn with_preferred_category(mut self, category: impl Into<String>) -> Self {
        self.head_lock_only = true;
        self.preferred_category = category.into();
        self
    }

    pub fn with_max_targets(mut self, max_targets: usize) -> Self {
        self.max_targets = max_targets;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn in_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}
