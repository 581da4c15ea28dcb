//! Observability for control loop execution.
//!
//! This module provides the [`TickReporter`] trait, the telemetry sink of
//! the control loop. Reporters receive callbacks at key points of every tick
//! without the loop itself knowing how (or whether) the data is recorded.
//!
//! # Zero-Cost Abstraction
//!
//! The default [`NoOpReporter`] compiles to zero overhead - all callback
//! methods are empty and will be optimized away by the compiler.
//!
//! # Implementations
//!
//! - [`NoOpReporter`] - does nothing
//! - [`LoggingReporter`] - emits events through the `log` facade
//! - [`DebugReporter`] - captures every event for later inspection
//! - [`CompositeReporter`] - forwards to two reporters

use crate::components::FireOutcome;
use crate::control::TickOutcome;
use crate::registry::{EntityId, TrackedEntity};

// ============================================================================
// TickReporter Trait
// ============================================================================

/// Observability trait for control loop ticks.
///
/// All methods have default empty implementations, so you only need
/// to override the events you care about.
///
/// # Example
///
/// ```
/// use tracklock_rs::{TickOutcome, TickReporter};
///
/// struct CountingReporter {
///     ticks: usize,
/// }
///
/// impl TickReporter for CountingReporter {
///     fn on_tick(&mut self, _outcome: &TickOutcome) {
///         self.ticks += 1;
///     }
/// }
/// ```
pub trait TickReporter {
    /// Called at the end of every tick, including ticks without a target.
    fn on_tick(&mut self, _outcome: &TickOutcome) {}

    /// Called when the selection moves to a different entity.
    ///
    /// `previous` is `None` on first acquisition.
    fn on_selection_changed(&mut self, _previous: Option<EntityId>, _current: &TrackedEntity) {}

    /// Called when a selected entity is lost and nothing valid remains.
    fn on_target_lost(&mut self, _previous: EntityId) {}

    /// Called whenever the trigger was evaluated, including blocked attempts.
    fn on_fire(&mut self, _target: EntityId, _outcome: FireOutcome, _alignment_quality: f64) {}
}

// ============================================================================
// NoOpReporter
// ============================================================================

/// Zero-cost reporter that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpReporter;

impl NoOpReporter {
    pub fn new() -> Self {
        Self
    }
}

impl TickReporter for NoOpReporter {}

// ============================================================================
// DebugReporter
// ============================================================================

/// Reporter that captures all events for debugging.
///
/// Stores a copy of every tick outcome; memory grows with run length.
#[derive(Debug, Clone, Default)]
pub struct DebugReporter {
    ticks: Vec<TickOutcome>,
    /// (previous, new) selection ids
    selection_changes: Vec<(Option<EntityId>, EntityId)>,
    lost: Vec<EntityId>,
    /// (target, outcome, alignment quality)
    fires: Vec<(EntityId, FireOutcome, f64)>,
}

impl DebugReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all captured events.
    pub fn clear(&mut self) {
        self.ticks.clear();
        self.selection_changes.clear();
        self.lost.clear();
        self.fires.clear();
    }

    pub fn tick_events(&self) -> &[TickOutcome] {
        &self.ticks
    }

    pub fn selection_changes(&self) -> &[(Option<EntityId>, EntityId)] {
        &self.selection_changes
    }

    pub fn lost_events(&self) -> &[EntityId] {
        &self.lost
    }

    pub fn fire_events(&self) -> &[(EntityId, FireOutcome, f64)] {
        &self.fires
    }

    /// Total number of captured events across all types.
    pub fn total_events(&self) -> usize {
        self.ticks.len() + self.selection_changes.len() + self.lost.len() + self.fires.len()
    }
}

impl TickReporter for DebugReporter {
    fn on_tick(&mut self, outcome: &TickOutcome) {
        self.ticks.push(outcome.clone());
    }

    fn on_selection_changed(&mut self, previous: Option<EntityId>, current: &TrackedEntity) {
        self.selection_changes.push((previous, current.id));
    }

    fn on_target_lost(&mut self, previous: EntityId) {
        self.lost.push(previous);
    }

    fn on_fire(&mut self, target: EntityId, outcome: FireOutcome, alignment_quality: f64) {
        self.fires.push((target, outcome, alignment_quality));
    }
}

// ============================================================================
// LoggingReporter
// ============================================================================

/// Reporter that emits events through the `log` crate.
///
/// # Log Levels
///
/// - selection changes, lost targets, actual firings: INFO
/// - blocked trigger attempts: DEBUG
/// - per-tick summaries (verbose only): TRACE
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingReporter {
    /// Also log a line per tick
    verbose: bool,
}

impl LoggingReporter {
    pub fn new() -> Self {
        Self { verbose: false }
    }

    /// Create a verbose logging reporter that includes per-tick summaries.
    pub fn verbose() -> Self {
        Self { verbose: true }
    }
}

impl TickReporter for LoggingReporter {
    fn on_tick(&mut self, outcome: &TickOutcome) {
        if self.verbose {
            log::trace!(
                "tick t={:.4}s dt={:.4}s target={:?} quality={:.3} lock={:.3}s",
                outcome.time,
                outcome.dt,
                outcome.target,
                outcome.alignment_quality,
                outcome.lock_duration
            );
        }
    }

    fn on_selection_changed(&mut self, previous: Option<EntityId>, current: &TrackedEntity) {
        match previous {
            Some(prev) => log::info!(
                "Target switch {} -> {} ({}, priority {}, distance {:.2})",
                prev,
                current.id,
                current.category,
                current.priority,
                current.distance
            ),
            None => log::info!(
                "Target acquired {} ({}, priority {}, distance {:.2})",
                current.id,
                current.category,
                current.priority,
                current.distance
            ),
        }
    }

    fn on_target_lost(&mut self, previous: EntityId) {
        log::info!("Target lost {}", previous);
    }

    fn on_fire(&mut self, target: EntityId, outcome: FireOutcome, alignment_quality: f64) {
        if outcome.fired() {
            log::info!(
                "Action on {}: {:?} (quality {:.3})",
                target,
                outcome,
                alignment_quality
            );
        } else {
            log::debug!("Action on {} blocked (quality {:.3})", target, alignment_quality);
        }
    }
}

// ============================================================================
// CompositeReporter
// ============================================================================

/// Reporter that forwards events to two child reporters.
#[derive(Debug, Clone)]
pub struct CompositeReporter<A: TickReporter, B: TickReporter> {
    first: A,
    second: B,
}

impl<A: TickReporter, B: TickReporter> CompositeReporter<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn first(&self) -> &A {
        &self.first
    }

    pub fn first_mut(&mut self) -> &mut A {
        &mut self.first
    }

    pub fn second(&self) -> &B {
        &self.second
    }

    pub fn second_mut(&mut self) -> &mut B {
        &mut self.second
    }

    /// Consume and return both reporters.
    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: TickReporter, B: TickReporter> TickReporter for CompositeReporter<A, B> {
    fn on_tick(&mut self, outcome: &TickOutcome) {
        self.first.on_tick(outcome);
        self.second.on_tick(outcome);
    }

    fn on_selection_changed(&mut self, previous: Option<EntityId>, current: &TrackedEntity) {
        self.first.on_selection_changed(previous, current);
        self.second.on_selection_changed(previous, current);
    }

    fn on_target_lost(&mut self, previous: EntityId) {
        self.first.on_target_lost(previous);
        self.second.on_target_lost(previous);
    }

    fn on_fire(&mut self, target: EntityId, outcome: FireOutcome, alignment_quality: f64) {
        self.first.on_fire(target, outcome, alignment_quality);
        self.second.on_fire(target, outcome, alignment_quality);
    }
}

// ============================================================================
// Tests
// ============================================================================
