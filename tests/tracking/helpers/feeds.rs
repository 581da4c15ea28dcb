//! Loop fixtures and synthetic position feeds

use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use tracklock_rs::{ControlLoop, DebugReporter, SharedRegistry, TargetRegistry, TrackerConfig, Vec3};

/// Tick period at the default 144 Hz
pub const DT: f64 = 1.0 / 144.0;

/// Control loop with a capturing reporter over a fresh registry
pub fn debug_loop(config: TrackerConfig) -> (ControlLoop<DebugReporter>, SharedRegistry) {
    let registry: SharedRegistry =
        Arc::new(Mutex::new(TargetRegistry::new(config.selection_params())));
    let control = ControlLoop::with_reporter(config, registry.clone(), DebugReporter::new())
        .expect("valid config");
    (control, registry)
}

/// Gaussian measurement noise around a true position
pub struct NoisyFeed {
    rng: StdRng,
    noise: Normal<f64>,
}

impl NoisyFeed {
    pub fn new(seed: u64, sigma: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            noise: Normal::new(0.0, sigma).expect("valid sigma"),
        }
    }

    pub fn measure(&mut self, truth: Vec3) -> Vec3 {
        Vec3::new(
            truth.x() + self.noise.sample(&mut self.rng),
            truth.y() + self.noise.sample(&mut self.rng),
            truth.z() + self.noise.sample(&mut self.rng),
        )
    }
}
