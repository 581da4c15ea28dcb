//! Core algorithmic components
//!
//! The building blocks driven by the control loop:
//!
//! - [`estimator`] - Per-axis constant-velocity filter and its 3D composition
//! - [`predictor`] - Short-horizon extrapolation from recent positions
//! - [`controller`] - Smoothed, snapping motion command
//! - [`trigger`] - Rate-limited, quality-gated discrete action

pub mod controller;
pub mod estimator;
pub mod predictor;
pub mod trigger;

pub use controller::{ControllerParams, MotionController};
pub use estimator::{AxisEstimator, PositionEstimator};
pub use predictor::{HistorySample, MotionPredictor};
pub use trigger::{ActionTrigger, FireOutcome, TriggerParams};
