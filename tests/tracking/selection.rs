//! Target selection through the loop and the facade

use std::sync::Arc;

use tracklock_rs::common::rng::SimpleRng;
use tracklock_rs::{DebugReporter, ManualClock, Tracker, TrackerConfig, Vec3};

use crate::helpers::feeds::{debug_loop, DT};

fn manual_tracker(config: TrackerConfig) -> (Tracker<DebugReporter>, ManualClock) {
    let clock = ManualClock::new(0.0);
    let tracker = Tracker::with_reporter(config.with_seed(5), DebugReporter::new())
        .expect("valid config")
        .with_clock(Arc::new(clock.clone()));
    (tracker, clock)
}

#[test]
fn test_single_valid_entity_is_always_selected() {
    let (mut control, registry) = debug_loop(TrackerConfig::default());
    // Far beyond the scoring range and lowest priority
    let id = registry
        .lock()
        .add(Vec3::new(500.0, 0.0, 0.0), 0, "body", 0.0);
    let mut rng = SimpleRng::new(1);

    let outcome = control.tick(DT, &mut rng);
    assert_eq!(outcome.target, Some(id));
}

#[test]
fn test_first_acquisition_does_not_defer_better_target() {
    let (tracker, clock) = manual_tracker(TrackerConfig::default().with_switch_delay_ms(200.0));
    let a = tracker.add_target(Vec3::new(1.0, 0.0, 0.0), 1, "body");
    clock.advance(DT);
    assert_eq!(tracker.step(DT).target, Some(a));

    let b = tracker.add_target(Vec3::new(2.0, 0.0, 0.0), 5, "body");
    clock.advance(DT);
    assert_eq!(tracker.step(DT).target, Some(b));
}

#[test]
fn test_hysteresis_defers_switch_until_cooldown_expires() {
    let (tracker, clock) = manual_tracker(TrackerConfig::default().with_switch_delay_ms(200.0));
    let a = tracker.add_target(Vec3::new(1.0, 0.0, 0.0), 1, "body");
    clock.advance(DT);
    assert_eq!(tracker.step(DT).target, Some(a));

    // Replacing a valid selection arms the cooldown
    let b = tracker.add_target(Vec3::new(2.0, 0.0, 0.0), 5, "body");
    clock.advance(DT);
    assert_eq!(tracker.step(DT).target, Some(b));

    let c = tracker.add_target(Vec3::new(3.0, 0.0, 0.0), 9, "body");
    let mut switched_after = None;
    for tick in 1..=100 {
        clock.advance(DT);
        tracker.update_target(a, Vec3::new(1.0, 0.0, 0.0));
        tracker.update_target(b, Vec3::new(2.0, 0.0, 0.0));
        tracker.update_target(c, Vec3::new(3.0, 0.0, 0.0));
        let outcome = tracker.step(DT);
        if outcome.target == Some(c) {
            switched_after = Some(tick);
            break;
        }
        assert_eq!(outcome.target, Some(b));
    }

    // 200ms at 144 Hz is ~29 ticks
    let ticks = switched_after.expect("never switched");
    assert!((27..=31).contains(&ticks), "switched after {} ticks", ticks);

    let changes = tracker.inspect_reporter(|r| r.selection_changes().to_vec());
    assert_eq!(changes, vec![(None, a), (Some(a), b), (Some(b), c)]);
}

#[test]
fn test_instant_switch_ignores_cooldown() {
    let (tracker, clock) = manual_tracker(TrackerConfig::default().with_instant_switch(true));
    let a = tracker.add_target(Vec3::new(1.0, 0.0, 0.0), 1, "body");
    clock.advance(DT);
    assert_eq!(tracker.step(DT).target, Some(a));

    let b = tracker.add_target(Vec3::new(2.0, 0.0, 0.0), 5, "body");
    clock.advance(DT);
    assert_eq!(tracker.step(DT).target, Some(b));
}

#[test]
fn test_invalid_selection_is_replaced_immediately() {
    let (tracker, clock) = manual_tracker(TrackerConfig::default());
    let a = tracker.add_target(Vec3::new(1.0, 0.0, 0.0), 5, "body");
    let b = tracker.add_target(Vec3::new(2.0, 0.0, 0.0), 1, "body");
    clock.advance(DT);
    assert_eq!(tracker.step(DT).target, Some(a));

    // Cooldown is still armed, but the selection is no longer eligible
    tracker.set_visibility(a, false);
    clock.advance(DT);
    assert_eq!(tracker.step(DT).target, Some(b));

    tracker.set_health(b, 0.0);
    clock.advance(DT);
    assert_eq!(tracker.step(DT).target, None);
    assert_eq!(tracker.stats().active_target_id, None);
}

#[test]
fn test_preferred_category_wins_close_contest() {
    let config = TrackerConfig::default().with_preferred_category("head");
    let (tracker, clock) = manual_tracker(config);
    tracker.add_target(Vec3::new(1.0, 0.0, 0.0), 1, "body");
    let head = tracker.add_target(Vec3::new(20.0, 0.0, 0.0), 1, "head");

    clock.advance(DT);
    assert_eq!(tracker.step(DT).target, Some(head));
}

#[test]
fn test_capacity_evicts_lowest_priority() {
    let (tracker, _clock) = manual_tracker(TrackerConfig::default().with_max_targets(2));
    let low = tracker.add_target(Vec3::new(1.0, 0.0, 0.0), 0, "body");
    let high = tracker.add_target(Vec3::new(2.0, 0.0, 0.0), 3, "body");
    let newest = tracker.add_target(Vec3::new(3.0, 0.0, 0.0), 1, "body");

    let registry = tracker.registry().lock();
    assert_eq!(registry.len(), 2);
    assert!(registry.get(low).is_none());
    assert!(registry.get(high).is_some());
    assert!(registry.get(newest).is_some());
}
