//! Constant-velocity recursive estimator, one scalar axis at a time.
//!
//! State is `[position, velocity]` with a 2×2 covariance `P`. The covariance
//! propagation is a simplified form rather than the textbook `F P Fᵀ + Q`:
//!
//! ```text
//! predict:  P00' = P00 + dt*P10 + dt*P01 + q
//!           P01' = P01 + dt*P11
//!           P10' = P10
//!           P11' = P11 + q
//!
//! update:   S  = P00 + R
//!           K0 = P00 / S,  K1 = P10 / S
//!           P00' = (1 - K0) * P00
//!           P01' = (1 - K0) * P01
//!           P10' = P10 - K1 * P00
//!           P11' = P11 - K1 * P01
//! ```
//!
//! The asymmetry (P01 and P10 evolve differently) is part of the estimator's
//! observable behavior and is kept as is.
//!
//! Time is always supplied by the caller, so runs are reproducible.

use nalgebra::Matrix2;

use crate::common::vector::Vec3;
use crate::control::KalmanConfig;

/// Scalar position/velocity estimator
#[derive(Debug, Clone)]
pub struct AxisEstimator {
    /// Position estimate
    position: f64,
    /// Velocity estimate
    velocity: f64,
    /// State covariance
    covariance: Matrix2<f64>,
    /// Measurement noise (R)
    measurement_noise: f64,
    /// Additive process noise (Q)
    process_noise: f64,
    initialized: bool,
    /// Time of the last accepted measurement, seconds
    last_update: f64,
}

impl AxisEstimator {
    /// Create an uninitialized estimator
    pub fn new(config: KalmanConfig) -> Self {
        Self {
            position: 0.0,
            velocity: 0.0,
            covariance: Matrix2::identity(),
            measurement_noise: config.r,
            process_noise: config.q,
            initialized: false,
            last_update: 0.0,
        }
    }

    /// Advance the state by `dt` seconds without a measurement.
    ///
    /// No-op before the first measurement. Non-finite or negative `dt` is
    /// treated as zero.
    pub fn predict(&mut self, dt: f64) {
        if !self.initialized {
            return;
        }
        let dt = sanitize_dt(dt);
        let p = self.covariance;
        let q = self.process_noise;

        self.position += self.velocity * dt;

        #[rustfmt::skip]
        let next = Matrix2::new(
            p[(0, 0)] + dt * p[(1, 0)] + dt * p[(0, 1)] + q,  p[(0, 1)] + dt * p[(1, 1)],
            p[(1, 0)],                                          p[(1, 1)] + q,
        );
        self.covariance = next;
    }

    /// Incorporate a measurement taken `dt` seconds after the previous one.
    ///
    /// The first measurement initializes the state to `[measurement, 0]` and
    /// is returned unchanged. Returns the updated position estimate.
    pub fn update(&mut self, measurement: f64, dt: f64) -> f64 {
        if !self.initialized {
            self.position = measurement;
            self.velocity = 0.0;
            self.initialized = true;
            return measurement;
        }

        self.predict(dt);

        let p = self.covariance;
        let s = p[(0, 0)] + self.measurement_noise;
        if !(s.is_finite() && s > 0.0) {
            // Degenerate innovation covariance: keep the prediction
            return self.position;
        }
        let k0 = p[(0, 0)] / s;
        let k1 = p[(1, 0)] / s;
        let residual = measurement - self.position;

        self.position += k0 * residual;
        self.velocity += k1 * residual;

        #[rustfmt::skip]
        let next = Matrix2::new(
            (1.0 - k0) * p[(0, 0)],          (1.0 - k0) * p[(0, 1)],
            p[(1, 0)] - k1 * p[(0, 0)],      p[(1, 1)] - k1 * p[(0, 1)],
        );
        self.covariance = next;

        self.position
    }

    /// [`update`](Self::update) using the estimator's own clock.
    ///
    /// `dt` is `now` minus the time of the previous measurement.
    pub fn update_at(&mut self, measurement: f64, now: f64) -> f64 {
        let dt = if self.initialized {
            now - self.last_update
        } else {
            0.0
        };
        self.last_update = now;
        self.update(measurement, dt)
    }

    /// Linear extrapolation `position + velocity * time_ahead`.
    ///
    /// Returns 0 before the first measurement.
    pub fn extrapolate(&self, time_ahead: f64) -> f64 {
        if !self.initialized {
            return 0.0;
        }
        self.position + self.velocity * time_ahead
    }

    /// Forget all state.
    pub fn reset(&mut self) {
        self.position = 0.0;
        self.velocity = 0.0;
        self.covariance = Matrix2::identity();
        self.initialized = false;
        self.last_update = 0.0;
    }

    #[inline]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[inline]
    pub fn covariance(&self) -> &Matrix2<f64> {
        &self.covariance
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[inline]
    pub fn last_update(&self) -> f64 {
        self.last_update
    }
}

/// Three axis estimators filtering a 3D position
#[derive(Debug, Clone)]
pub struct PositionEstimator {
    axes: [AxisEstimator; 3],
}

impl PositionEstimator {
    pub fn new(config: KalmanConfig) -> Self {
        Self {
            axes: [
                AxisEstimator::new(config),
                AxisEstimator::new(config),
                AxisEstimator::new(config),
            ],
        }
    }

    /// Feed each coordinate to its axis and return the filtered position
    pub fn update_at(&mut self, measurement: Vec3, now: f64) -> Vec3 {
        let [x, y, z] = measurement.to_array();
        Vec3::new(
            self.axes[0].update_at(x, now),
            self.axes[1].update_at(y, now),
            self.axes[2].update_at(z, now),
        )
    }

    pub fn extrapolate(&self, time_ahead: f64) -> Vec3 {
        Vec3::new(
            self.axes[0].extrapolate(time_ahead),
            self.axes[1].extrapolate(time_ahead),
            self.axes[2].extrapolate(time_ahead),
        )
    }

    pub fn velocity(&self) -> Vec3 {
        Vec3::new(
            self.axes[0].velocity(),
            self.axes[1].velocity(),
            self.axes[2].velocity(),
        )
    }

    pub fn axes(&self) -> &[AxisEstimator; 3] {
        &self.axes
    }

    pub fn reset(&mut self) {
        for axis in &mut self.axes {
            axis.reset();
        }
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
