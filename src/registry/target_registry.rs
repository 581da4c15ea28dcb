//! Candidate pool with scored, hysteretic selection.
//!
//! # Scoring
//!
//! ```text
//! score = priority * 100
//!       + max(0, 1 - distance / max_target_distance) * 50
//!       + 30   if preferred-category mode is on and the category matches
//!       + 20   if the entity is the current selection
//! ```
//!
//! The highest score wins; ties go to the entity registered first.
//!
//! # Hysteresis
//!
//! Replacing a still-valid selection arms the switch cooldown to
//! `switch_delay`. First acquisition, and acquisition after the previous
//! selection was lost, leave the cooldown untouched. While it is running
//! (and instant switching is off) a better candidate does not replace a
//! still-valid selection; the cooldown is not re-armed by the deferred
//! switch.
//!
//! # Capacity
//!
//! When an `add` pushes the pool beyond `max_targets`, the entity with the
//! lowest priority is evicted (ties: least recently seen, then oldest id).
//! The entity being added is never the one evicted.

use crate::common::constants::{CATEGORY_BONUS, INCUMBENT_BONUS, PRIORITY_WEIGHT, PROXIMITY_WEIGHT};
use crate::common::vector::Vec3;

use super::types::{EntityId, TrackedEntity};

/// Selection policy parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionParams {
    /// Entities unseen for this many seconds are ignored
    pub target_timeout: f64,
    /// Distance at which the proximity score reaches zero
    pub max_target_distance: f64,
    /// Category earning [`CATEGORY_BONUS`]; `None` disables the bonus
    pub preferred_category: Option<String>,
    pub instant_switch: bool,
    /// Cooldown armed on every switch, seconds
    pub switch_delay: f64,
    pub max_targets: usize,
}

/// Owns the candidate entities and the current selection
#[derive(Debug, Clone)]
pub struct TargetRegistry {
    params: SelectionParams,
    /// Registration order is preserved
    entities: Vec<TrackedEntity>,
    next_id: u64,
    /// Resolved by lookup on every use; may refer to a removed entity
    /// only between a removal and the next selection pass
    selected: Option<EntityId>,
    /// Seconds until another switch is allowed
    switch_cooldown: f64,
}

impl TargetRegistry {
    pub fn new(params: SelectionParams) -> Self {
        Self {
            params,
            entities: Vec::new(),
            next_id: 1,
            selected: None,
            switch_cooldown: 0.0,
        }
    }

    /// Register a new entity seen at `now` and return its id.
    pub fn add(
        &mut self,
        position: Vec3,
        priority: u32,
        category: impl Into<String>,
        now: f64,
    ) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities
            .push(TrackedEntity::new(id, position, priority, category.into(), now));

        if self.entities.len() > self.params.max_targets {
            self.evict_one(id);
        }
        id
    }

    /// Evict the lowest-priority entity other than `keep`.
    fn evict_one(&mut self, keep: EntityId) {
        let victim = self
            .entities
            .iter()
            .enumerate()
            .filter(|(_, e)| e.id != keep)
            .min_by(|(_, a), (_, b)| {
                a.priority
                    .cmp(&b.priority)
                    .then(a.last_seen.total_cmp(&b.last_seen))
                    .then(a.id.cmp(&b.id))
            })
            .map(|(idx, _)| idx);

        if let Some(idx) = victim {
            let evicted = self.entities.remove(idx);
            log::debug!(
                "Registry full ({}): evicted {} (priority {})",
                self.params.max_targets,
                evicted.id,
                evicted.priority
            );
            if self.selected == Some(evicted.id) {
                self.selected = None;
            }
        }
    }

    /// Report a new position for `id` at `now`. Unknown ids are ignored.
    pub fn update(&mut self, id: EntityId, position: Vec3, now: f64) {
        if let Some(e) = self.get_mut(id) {
            e.position = position;
            e.last_seen = now;
            e.visible = true;
        }
    }

    /// Remove `id`; clears the selection when it was selected.
    pub fn remove(&mut self, id: EntityId) -> Option<TrackedEntity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        Some(self.entities.remove(idx))
    }

    /// Mark an entity visible or occluded. Unknown ids are ignored.
    pub fn set_visibility(&mut self, id: EntityId, visible: bool) {
        if let Some(e) = self.get_mut(id) {
            e.visible = visible;
        }
    }

    /// Set an entity's health. Unknown ids are ignored.
    pub fn set_health(&mut self, id: EntityId, health: f64) {
        if let Some(e) = self.get_mut(id) {
            e.health = health;
        }
    }

    /// Choose the entity to track this cycle.
    ///
    /// Recomputes every valid entity's distance to `observer`, scores them
    /// and applies the switch hysteresis. Returns a snapshot of the selected
    /// entity, or `None` (clearing the selection) when nothing is valid.
    pub fn select_best(&mut self, observer: Vec3, now: f64) -> Option<TrackedEntity> {
        let timeout = self.params.target_timeout;
        let selected = self.selected;

        let mut best: Option<(usize, f64)> = None;
        for (idx, entity) in self.entities.iter_mut().enumerate() {
            if !entity.is_valid(now, timeout) {
                continue;
            }
            entity.distance = observer.distance_to(&entity.position);
            let score = score_entity(&self.params, selected, entity);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((idx, score));
            }
        }

        let best_idx = match best {
            Some((idx, _)) => idx,
            None => {
                self.selected = None;
                return None;
            }
        };
        let best_id = self.entities[best_idx].id;

        let current_idx = selected.and_then(|id| {
            self.entities
                .iter()
                .position(|e| e.id == id && e.is_valid(now, timeout))
        });

        if let Some(cur) = current_idx {
            if cur == best_idx {
                return Some(self.entities[cur].clone());
            }
            if self.switch_cooldown > 0.0 && !self.params.instant_switch {
                return Some(self.entities[cur].clone());
            }
        }

        if current_idx.is_some() {
            self.switch_cooldown = self.params.switch_delay;
        }
        self.selected = Some(best_id);
        Some(self.entities[best_idx].clone())
    }

    /// Score of `id` against the current selection, if registered.
    ///
    /// Uses the distance from the latest selection pass.
    pub fn score(&self, id: EntityId) -> Option<f64> {
        self.get(id)
            .map(|e| score_entity(&self.params, self.selected, e))
    }

    /// Advance the switch cooldown by `dt` seconds, never below zero.
    ///
    /// Non-positive and non-finite `dt` are ignored.
    pub fn tick(&mut self, dt: f64) {
        if !(dt.is_finite() && dt > 0.0) {
            return;
        }
        self.switch_cooldown = (self.switch_cooldown - dt).max(0.0);
    }

    pub fn get(&self, id: EntityId) -> Option<&TrackedEntity> {
        self.entities.iter().find(|e| e.id == id)
    }

    fn get_mut(&mut self, id: EntityId) -> Option<&mut TrackedEntity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackedEntity> {
        self.entities.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    #[inline]
    pub fn selected_id(&self) -> Option<EntityId> {
        self.selected
    }

    #[inline]
    pub fn switch_cooldown(&self) -> f64 {
        self.switch_cooldown
    }

    #[inline]
    pub fn params(&self) -> &SelectionParams {
        &self.params
    }
}

fn score_entity(params: &SelectionParams, selected: Option<EntityId>, e: &TrackedEntity) -> f64 {
    let mut score = e.priority as f64 * PRIORITY_WEIGHT;
    score += (1.0 - e.distance / params.max_target_distance).max(0.0) * PROXIMITY_WEIGHT;
    if params.preferred_category.as_deref() == Some(e.category.as_str()) {
        score += CATEGORY_BONUS;
    }
    if selected == Some(e.id) {
        score += INCUMBENT_BONUS;
    }
    score
}
