//! Tracked entity types

use std::fmt;

use serde::Serialize;

use crate::common::constants::INITIAL_HEALTH;
use crate::common::vector::Vec3;

/// Registry-unique entity identifier.
///
/// Issued from a monotonic counter and never reused by the same registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(pub(crate) u64);

impl EntityId {
    /// Raw counter value
    #[inline]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A candidate entity owned by the [`TargetRegistry`](super::TargetRegistry)
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedEntity {
    pub id: EntityId,
    pub position: Vec3,
    /// Higher is more important
    pub priority: u32,
    /// Free-form tag, e.g. "head" or "body"
    pub category: String,
    /// Time of the last position report, seconds
    pub last_seen: f64,
    pub visible: bool,
    pub health: f64,
    /// Distance to the observer as of the latest selection pass
    pub distance: f64,
}

impl TrackedEntity {
    pub(crate) fn new(
        id: EntityId,
        position: Vec3,
        priority: u32,
        category: String,
        now: f64,
    ) -> Self {
        Self {
            id,
            position,
            priority,
            category,
            last_seen: now,
            visible: true,
            health: INITIAL_HEALTH,
            distance: 0.0,
        }
    }

    /// Eligible for selection at time `now`: visible, seen within
    /// `timeout` seconds, alive, and at a finite position.
    #[inline]
    pub fn is_valid(&self, now: f64, timeout: f64) -> bool {
        self.visible
            && now - self.last_seen < timeout
            && self.health > 0.0
            && self.position.is_finite()
    }
}
