//! Target registry: candidate entities and per-cycle selection.
//!
//! - [`types`] - [`EntityId`] and [`TrackedEntity`]
//! - [`target_registry`] - [`TargetRegistry`] scoring, hysteresis and eviction

pub mod target_registry;
pub mod types;

use std::sync::Arc;

use parking_lot::Mutex;

pub use target_registry::{SelectionParams, TargetRegistry};
pub use types::{EntityId, TrackedEntity};

/// Registry shared between feed producers and the control loop.
///
/// The loop holds the lock for the whole filter, score and select pass.
pub type SharedRegistry = Arc<Mutex<TargetRegistry>>;
