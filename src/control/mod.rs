//! Control loop, tracker facade and configuration

pub mod config;
pub mod control_loop;
pub mod errors;
pub mod stats;
pub mod tracker;

pub use config::{KalmanConfig, TrackerConfig};
pub use control_loop::{ControlLoop, TickOutcome};
pub use errors::ConfigError;
pub use stats::{FrameTimer, TrackerStats};
pub use tracker::Tracker;
