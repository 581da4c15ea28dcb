//! Numerical constants shared by the tracking components
//!
//! These are fixed properties of the scoring and control laws. They are kept
//! separate from [`TrackerConfig`](crate::TrackerConfig), which holds the
//! user-tunable parameters.

// ============================================================================
// Target scoring
// ============================================================================

/// Score contributed per unit of priority
pub const PRIORITY_WEIGHT: f64 = 100.0;

/// Maximum score contributed by proximity
///
/// Scaled by `max(0, 1 - distance / max_target_distance)`.
pub const PROXIMITY_WEIGHT: f64 = 50.0;

/// Bonus for matching the preferred category in preferred-category-only mode
pub const CATEGORY_BONUS: f64 = 30.0;

/// Bonus for the entity that is already selected
///
/// Together with the switch cooldown this keeps near-equal candidates
/// from trading places every tick.
pub const INCUMBENT_BONUS: f64 = 20.0;

/// Health assigned to newly registered entities
pub const INITIAL_HEALTH: f64 = 100.0;

// ============================================================================
// Prediction
// ============================================================================

/// Maximum number of samples kept by the motion predictor
pub const HISTORY_CAPACITY: usize = 10;

/// Number of most recent samples used for the velocity average
pub const VELOCITY_WINDOW: usize = 3;

/// Target distance at which the prediction blend reaches full weight
pub const BLEND_DISTANCE: f64 = 20.0;

// ============================================================================
// Lock and trigger
// ============================================================================

/// Alignment quality above which lock time accumulates
pub const LOCK_QUALITY: f64 = 0.8;

/// Alignment quality above which a trigger attempt is tallied as a hit
pub const HIGH_CONFIDENCE_QUALITY: f64 = 0.9;

/// Adaptive accuracy value before the first accuracy update
///
/// Lies outside [`MIN_ADAPTIVE_ACCURACY`, `MAX_ADAPTIVE_ACCURACY`]; the first
/// shots can therefore see a success probability above 1.
pub const INITIAL_ADAPTIVE_ACCURACY: f64 = 10.0;

/// Lower bound applied by `ActionTrigger::update_accuracy`
pub const MIN_ADAPTIVE_ACCURACY: f64 = 0.1;

/// Upper bound applied by `ActionTrigger::update_accuracy`
pub const MAX_ADAPTIVE_ACCURACY: f64 = 1.0;

// ============================================================================
// Loop
// ============================================================================

/// Lowest accepted tick rate in Hz (one tick every 1000 s)
pub const MIN_TICK_RATE: f64 = 1e-3;
