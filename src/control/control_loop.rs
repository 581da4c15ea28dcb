//! One tick of the tracking and control pipeline.
//!
//! Per tick:
//!
//! 1. select the best entity from the registry (lock held for the pass);
//!    with nothing valid, reset estimation state and stop here
//! 2. feed the entity position to the predictor and the axis estimators
//! 3. blend filtered and predicted positions into the final target
//! 4. move the observer with the motion controller
//! 5. derive alignment quality and the lock duration
//! 6. fire the trigger once locked long enough
//! 7. advance the registry cooldown and the adaptive accuracy
//!
//! Time is always passed in, so a run is reproducible from its inputs.

use rand::Rng;
use serde::Serialize;

use crate::common::constants::{BLEND_DISTANCE, HIGH_CONFIDENCE_QUALITY, LOCK_QUALITY};
use crate::common::vector::Vec3;
use crate::components::{
    ActionTrigger, FireOutcome, MotionController, MotionPredictor, PositionEstimator,
};
use crate::registry::{EntityId, SharedRegistry, TrackedEntity};
use crate::reporter::{NoOpReporter, TickReporter};

use super::config::TrackerConfig;
use super::errors::ConfigError;
use super::stats::{FrameTimer, TrackerStats};

/// What happened during one tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickOutcome {
    /// Loop time of this tick, seconds
    pub time: f64,
    /// Elapsed time since the previous tick, seconds
    pub dt: f64,
    /// Selected entity, if any
    pub target: Option<EntityId>,
    /// Selected entity's distance to the observer before moving
    pub target_distance: f64,
    /// Blended filter/prediction position the observer moved toward
    pub final_target: Option<Vec3>,
    /// Observer position after the tick
    pub observer: Vec3,
    pub alignment_quality: f64,
    pub lock_duration: f64,
    /// Trigger result when it was evaluated this tick
    pub fire: Option<FireOutcome>,
}

/// Estimation, prediction, selection and control state for one observer
pub struct ControlLoop<P: TickReporter = NoOpReporter> {
    config: TrackerConfig,
    registry: SharedRegistry,

    estimator: PositionEstimator,
    predictor: MotionPredictor,
    controller: MotionController,
    trigger: ActionTrigger,

    /// Controlled position
    observer: Vec3,
    /// Entity tracked on the previous tick
    tracked: Option<EntityId>,
    /// Seconds of continuous alignment above [`LOCK_QUALITY`]
    lock_duration: f64,
    alignment_quality: f64,
    shots: u64,
    hits: u64,
    /// Time of the latest tick
    time: f64,
    frame_timer: FrameTimer,

    reporter: P,
}

impl ControlLoop<NoOpReporter> {
    /// Create a loop over `registry` with no reporting.
    pub fn new(config: TrackerConfig, registry: SharedRegistry) -> Result<Self, ConfigError> {
        Self::with_reporter(config, registry, NoOpReporter)
    }
}

impl<P: TickReporter> ControlLoop<P> {
    /// Create a loop that reports every tick to `reporter`.
    pub fn with_reporter(
        config: TrackerConfig,
        registry: SharedRegistry,
        reporter: P,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            estimator: PositionEstimator::new(config.kalman),
            predictor: MotionPredictor::new(),
            controller: MotionController::new(config.controller_params()),
            trigger: ActionTrigger::new(config.trigger_params()),
            observer: Vec3::zero(),
            tracked: None,
            lock_duration: 0.0,
            alignment_quality: 0.0,
            shots: 0,
            hits: 0,
            time: 0.0,
            frame_timer: FrameTimer::new(),
            config,
            registry,
            reporter,
        })
    }

    /// Run one tick `dt` seconds after the previous one.
    ///
    /// Loop time advances by `dt`; use [`tick_at`](Self::tick_at) when the
    /// caller owns the clock.
    pub fn tick<R: Rng>(&mut self, dt: f64, rng: &mut R) -> TickOutcome {
        let dt = sanitize_dt(dt);
        let now = self.time + dt;
        self.tick_at(now, dt, rng)
    }

    /// Run one tick at absolute time `now`, `dt` seconds after the previous one.
    pub fn tick_at<R: Rng>(&mut self, now: f64, dt: f64, rng: &mut R) -> TickOutcome {
        let dt = sanitize_dt(dt);
        if now.is_finite() {
            self.time = now;
        }
        let now = self.time;
        self.frame_timer.record(dt);

        let selection = self.registry.lock().select_best(self.observer, now);
        let target = match selection {
            Some(t) => t,
            None => return self.lose_target(dt),
        };

        if self.tracked != Some(target.id) {
            self.switch_to(&target);
        }

        // Estimation and prediction
        self.predictor.add_sample(target.position, now);
        let filtered = self.estimator.update_at(target.position, now);
        let predicted = self.predictor.predict(self.config.lookahead_seconds());

        let blend = (target.distance / BLEND_DISTANCE).min(1.0) * self.config.prediction_weight;
        let mut final_target = filtered.lerp(&predicted, blend);
        if !final_target.is_finite() {
            final_target = target.position;
        }

        // Motion
        let next = self
            .controller
            .compute_next(self.observer, final_target, dt);
        if next.is_finite() {
            self.observer = next;
        }

        // Alignment
        let error = self.observer.distance_to(&final_target);
        let quality = (1.0 - error / self.config.snap_threshold).max(0.0);
        self.alignment_quality = quality;
        if quality > LOCK_QUALITY {
            self.lock_duration += dt;
        } else {
            self.lock_duration = 0.0;
        }

        // Trigger
        let mut fire = None;
        if self.config.fire_on_lock && self.lock_duration > self.config.min_lock_time_seconds {
            let outcome = self.trigger.fire(target.distance, quality, now, rng);
            // Every attempt is a shot, blocked ones included; hits are
            // tallied from quality alone, independent of the draw
            self.shots += 1;
            if quality > HIGH_CONFIDENCE_QUALITY {
                self.hits += 1;
            }
            self.reporter.on_fire(target.id, outcome, quality);
            fire = Some(outcome);
        }

        self.registry.lock().tick(dt);
        if self.shots > 0 {
            self.trigger
                .update_accuracy(self.hits as f64 / self.shots as f64);
        }

        let outcome = TickOutcome {
            time: now,
            dt,
            target: Some(target.id),
            target_distance: target.distance,
            final_target: Some(final_target),
            observer: self.observer,
            alignment_quality: quality,
            lock_duration: self.lock_duration,
            fire,
        };
        self.reporter.on_tick(&outcome);
        outcome
    }

    /// New entity selected: history of the previous one no longer applies.
    fn switch_to(&mut self, target: &TrackedEntity) {
        self.reporter.on_selection_changed(self.tracked, target);
        self.estimator.reset();
        self.predictor.reset();
        self.lock_duration = 0.0;
        self.tracked = Some(target.id);
    }

    fn lose_target(&mut self, dt: f64) -> TickOutcome {
        if let Some(previous) = self.tracked.take() {
            self.reporter.on_target_lost(previous);
        }
        self.estimator.reset();
        self.predictor.reset();
        self.lock_duration = 0.0;
        self.alignment_quality = 0.0;

        let outcome = TickOutcome {
            time: self.time,
            dt,
            target: None,
            target_distance: 0.0,
            final_target: None,
            observer: self.observer,
            alignment_quality: 0.0,
            lock_duration: 0.0,
            fire: None,
        };
        self.reporter.on_tick(&outcome);
        outcome
    }

    /// Shift the observer against an externally applied offset.
    ///
    /// No-op unless offset compensation is enabled.
    pub fn apply_compensation(&mut self, offset: Vec3) {
        let compensated = self.controller.apply_compensation(self.observer, offset);
        if compensated.is_finite() {
            self.observer = compensated;
        }
    }

    /// Snapshot of the loop statistics.
    pub fn stats(&self) -> TrackerStats {
        let (tracked_count, active_target_id) = {
            let registry = self.registry.lock();
            (registry.len(), registry.selected_id())
        };
        TrackerStats {
            frame_rate: self.frame_timer.frame_rate(),
            frame_time_ms: self.frame_timer.frame_time_ms(),
            alignment_quality: self.alignment_quality,
            hit_rate: self.hit_rate(),
            lock_duration_seconds: self.lock_duration,
            tracked_count,
            active_target_id,
        }
    }

    /// Hits per trigger attempt, 0 before the first attempt
    pub fn hit_rate(&self) -> f64 {
        if self.shots == 0 {
            0.0
        } else {
            self.hits as f64 / self.shots as f64
        }
    }

    #[inline]
    pub fn observer(&self) -> Vec3 {
        self.observer
    }

    /// Place the observer, e.g. at the start of a run
    pub fn set_observer(&mut self, position: Vec3) {
        self.observer = position;
    }

    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    #[inline]
    pub fn lock_duration(&self) -> f64 {
        self.lock_duration
    }

    #[inline]
    pub fn shots(&self) -> u64 {
        self.shots
    }

    #[inline]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn trigger(&self) -> &ActionTrigger {
        &self.trigger
    }

    pub fn controller(&self) -> &MotionController {
        &self.controller
    }

    pub fn predictor(&self) -> &MotionPredictor {
        &self.predictor
    }

    pub fn estimator(&self) -> &PositionEstimator {
        &self.estimator
    }

    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn reporter(&self) -> &P {
        &self.reporter
    }

    pub fn reporter_mut(&mut self) -> &mut P {
        &mut self.reporter
    }
}

#[inline]
fn sanitize_dt(dt: f64) -> f64 {
    if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        0.0
    }
}
