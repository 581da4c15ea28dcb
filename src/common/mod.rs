//! Common utilities shared by the tracking components.
//!
//! Vector math, the time source abstraction, the deterministic RNG and
//! the numerical constants used for scoring, prediction and triggering.

pub mod clock;
pub mod constants;
pub mod rng;
pub mod vector;
