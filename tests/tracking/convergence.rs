//! Observer convergence under the smoothing law

use tracklock_rs::common::rng::SimpleRng;
use tracklock_rs::{TrackerConfig, Vec3};

use crate::helpers::assertions::{assert_non_increasing, assert_vec3_close};
use crate::helpers::feeds::{debug_loop, NoisyFeed, DT};

/// Ticks until the observer lands exactly on `target`, with the distance trace
fn run_to_snap(target: Vec3, max_ticks: usize) -> (Option<usize>, Vec<f64>) {
    let (mut control, registry) = debug_loop(TrackerConfig::default());
    let id = registry.lock().add(target, 1, "body", 0.0);
    let mut rng = SimpleRng::new(42);

    let mut distances = vec![control.observer().distance_to(&target)];
    for tick in 1..=max_ticks {
        let now = control.time() + DT;
        registry.lock().update(id, target, now);
        let outcome = control.tick(DT, &mut rng);
        distances.push(outcome.observer.distance_to(&target));
        if outcome.observer == target {
            return (Some(tick), distances);
        }
    }
    (None, distances)
}

#[test]
fn test_stationary_target_converges_monotonically() {
    let (snapped_at, distances) = run_to_snap(Vec3::new(10.0, 0.0, 0.0), 400);

    assert_non_increasing(&distances, 0.0, "distance to target");
    let ticks = snapped_at.expect("observer never snapped");
    assert!(ticks < 150, "snap took {} ticks", ticks);
}

#[test]
fn test_long_range_target_converges_monotonically() {
    let (snapped_at, distances) = run_to_snap(Vec3::new(30.0, -4.0, 2.0), 600);

    assert_non_increasing(&distances, 0.0, "distance to target");
    assert!(snapped_at.is_some());
}

#[test]
fn test_lock_builds_after_snap() {
    let target = Vec3::new(2.0, 1.0, 0.0);
    let (mut control, registry) = debug_loop(TrackerConfig::default());
    let id = registry.lock().add(target, 1, "body", 0.0);
    let mut rng = SimpleRng::new(1);

    for _ in 0..288 {
        let now = control.time() + DT;
        registry.lock().update(id, target, now);
        control.tick(DT, &mut rng);
    }

    let stats = control.stats();
    assert_eq!(stats.alignment_quality, 1.0);
    assert!(stats.lock_duration_seconds > 0.5);

    // Every tick was reported
    assert_eq!(control.reporter().tick_events().len(), 288);
}

#[test]
fn test_noisy_feed_settles_near_truth() {
    let truth = Vec3::new(5.0, 0.0, 0.0);
    let (mut control, registry) = debug_loop(TrackerConfig::default());
    let mut feed = NoisyFeed::new(3, 0.05);
    let id = registry.lock().add(feed.measure(truth), 1, "body", 0.0);
    let mut rng = SimpleRng::new(9);

    for tick in 0..288 {
        let now = control.time() + DT;
        registry.lock().update(id, feed.measure(truth), now);
        let outcome = control.tick(DT, &mut rng);

        assert!(outcome.observer.is_finite());
        if tick >= 144 {
            assert!(
                outcome.observer.distance_to(&truth) < 0.3,
                "tick {}: observer {:?}",
                tick,
                outcome.observer
            );
        }
    }

    // Per-axis filter settles on the measured mean
    let filtered = control.estimator().extrapolate(0.0);
    assert_vec3_close(filtered, truth, 0.1, "filtered position");
}
