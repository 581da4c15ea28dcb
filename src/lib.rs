/*!
# tracklock - Fixed-rate target tracking and motion control

Tracks a set of moving entities reported by an external feed, selects the
best one each tick and steers an observer position toward it.

## Features

- Per-axis position/velocity estimators with literal covariance propagation
- Short-horizon linear motion prediction from recent history
- Scored target selection with switch hysteresis and bounded capacity
- Smoothed, force-driven motion with snapping
- Rate-limited, alignment-gated action trigger with adaptive accuracy
- Background runner at a configurable tick rate

## Modules

- [`control`] - Control loop, tracker facade, configuration
- [`components`] - Estimator, predictor, controller, trigger
- [`registry`] - Tracked entities and selection
- [`reporter`] - Tick observability
- [`common`] - Vector math, clocks, RNG, constants

## Example

```rust,no_run
use tracklock_rs::{Tracker, TrackerConfig, Vec3};

let config = TrackerConfig::default().with_fire_on_lock(true);
let tracker = Tracker::new(config).unwrap();

let id = tracker.add_target(Vec3::new(10.0, 0.0, 0.0), 2, "head");
tracker.start().unwrap();

// Feed positions from any thread
tracker.update_target(id, Vec3::new(10.2, 0.1, 0.0));

let stats = tracker.stats();
println!("quality {:.2}, locked {:.2}s", stats.alignment_quality, stats.lock_duration_seconds);
tracker.stop();
```
*/

// ============================================================================
// Core modules
// ============================================================================

/// Low-level utilities (vector math, clocks, RNG, constants)
pub mod common;

/// Tracking components (estimation, prediction, motion, trigger)
pub mod components;

/// Entity registry and target selection
pub mod registry;

/// Control loop and tracker facade
pub mod control;

/// Observability hooks for the control loop
pub mod reporter;

// ============================================================================
// Re-exports for convenience
// ============================================================================

// Core types
pub use common::vector::Vec3;
pub use registry::{EntityId, SharedRegistry, TargetRegistry, TrackedEntity};

// Configuration and errors
pub use control::{ConfigError, KalmanConfig, TrackerConfig};

// Loop and facade
pub use control::{ControlLoop, TickOutcome, Tracker, TrackerStats};

// Components
pub use components::{
    ActionTrigger, AxisEstimator, FireOutcome, MotionController, MotionPredictor,
    PositionEstimator,
};

// Time
pub use common::clock::{Clock, ManualClock, MonotonicClock};

// Reporters
pub use reporter::{CompositeReporter, DebugReporter, LoggingReporter, NoOpReporter, TickReporter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
