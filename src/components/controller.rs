//! Smoothing motion controller.
//!
//! Turns a desired target position into the next commanded position:
//!
//! 1. `delta = target - current`, `distance = |delta|`
//! 2. `force = base_force` (times `long_range_multiplier` beyond `max_distance`)
//! 3. `velocity = lerp(velocity, delta * force, smoothing_factor)`
//! 4. `next = current + velocity * dt`
//!
//! The velocity blend is applied once per call and is not scaled by `dt`,
//! so the effective smoothing depends on the tick rate.
//!
//! Close to the target and moving slowly, the controller snaps: it returns
//! the target exactly instead of the smoothed step.

use crate::common::vector::Vec3;

/// Controller gains and thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerParams {
    /// Velocity per unit of position error (per second)
    pub base_force: f64,
    /// Distance beyond which `long_range_multiplier` applies
    pub max_distance: f64,
    pub long_range_multiplier: f64,
    /// Per-call velocity blend coefficient
    pub smoothing_factor: f64,
    pub snap_threshold: f64,
    pub velocity_threshold: f64,
    pub enable_snap: bool,
    /// Apply offset compensation in [`MotionController::apply_compensation`]
    pub compensation_enabled: bool,
    pub compensation_factor: f64,
}

/// Stateful motion controller
#[derive(Debug, Clone)]
pub struct MotionController {
    params: ControllerParams,
    velocity: Vec3,
    last_position: Vec3,
}

impl MotionController {
    pub fn new(params: ControllerParams) -> Self {
        Self {
            params,
            velocity: Vec3::zero(),
            last_position: Vec3::zero(),
        }
    }

    /// Next commanded position when moving from `current` toward `target`.
    pub fn compute_next(&mut self, current: Vec3, target: Vec3, dt: f64) -> Vec3 {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        let p = &self.params;

        let delta = target - current;
        let distance = delta.magnitude();

        let mut force = p.base_force;
        if distance > p.max_distance {
            force *= p.long_range_multiplier;
        }

        let desired_velocity = delta * force;
        let blended = self.velocity.lerp(&desired_velocity, p.smoothing_factor);
        if blended.is_finite() {
            self.velocity = blended;
        }

        let candidate = current + self.velocity * dt;

        let next = if p.enable_snap
            && distance < p.snap_threshold
            && self.velocity.magnitude() < p.velocity_threshold
        {
            target
        } else {
            candidate
        };

        self.last_position = next;
        next
    }

    /// Counteract an external offset: `position - offset * factor`.
    ///
    /// Returns `position` unchanged when compensation is disabled.
    pub fn apply_compensation(&self, position: Vec3, offset: Vec3) -> Vec3 {
        if !self.params.compensation_enabled {
            return position;
        }
        position + offset * (-self.params.compensation_factor)
    }

    /// Current smoothed velocity
    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Last position returned by [`compute_next`](Self::compute_next)
    #[inline]
    pub fn last_position(&self) -> Vec3 {
        self.last_position
    }

    #[inline]
    pub fn params(&self) -> &ControllerParams {
        &self.params
    }

    pub fn reset(&mut self) {
        self.velocity = Vec3::zero();
        self.last_position = Vec3::zero();
    }
}
