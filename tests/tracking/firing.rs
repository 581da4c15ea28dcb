//! Lock-gated firing through the loop

use tracklock_rs::common::rng::SimpleRng;
use tracklock_rs::{FireOutcome, TrackerConfig, Vec3};

use crate::helpers::assertions::assert_scalar_close;
use crate::helpers::feeds::{debug_loop, DT};

fn run_locked(config: TrackerConfig, target: Vec3, ticks: usize) -> Vec<Option<FireOutcome>> {
    let (mut control, registry) = debug_loop(config);
    let id = registry.lock().add(target, 1, "body", 0.0);
    let mut rng = SimpleRng::new(17);

    (0..ticks)
        .map(|_| {
            let now = control.time() + DT;
            registry.lock().update(id, target, now);
            control.tick(DT, &mut rng).fire
        })
        .collect()
}

#[test]
fn test_no_firing_before_minimum_lock_time() {
    let config = TrackerConfig::default().with_fire_on_lock(true);
    let fires = run_locked(config, Vec3::new(0.2, 0.0, 0.0), 144);

    // min lock 0.1s: nothing is evaluated in the first ~14 ticks
    let first = fires
        .iter()
        .position(Option::is_some)
        .expect("trigger never evaluated");
    assert!((14..=16).contains(&first), "first evaluation at tick {}", first);
}

#[test]
fn test_fire_rate_is_limited() {
    let config = TrackerConfig::default().with_fire_on_lock(true);
    let fires = run_locked(config, Vec3::new(0.2, 0.0, 0.0), 288);

    let fired: Vec<usize> = fires
        .iter()
        .enumerate()
        .filter(|(_, f)| f.map_or(false, FireOutcome::fired))
        .map(|(i, _)| i)
        .collect();
    assert!(fired.len() >= 2);
    for pair in fired.windows(2) {
        let gap = (pair[1] - pair[0]) as f64 * DT;
        assert!(gap >= 0.1 - 1e-9, "fired {}s apart", gap);
    }
}

#[test]
fn test_quality_gate_blocks_every_attempt() {
    let config = TrackerConfig {
        min_accuracy: 1.5,
        ..TrackerConfig::default().with_fire_on_lock(true)
    };
    let fires = run_locked(config, Vec3::new(0.2, 0.0, 0.0), 100);

    assert!(fires.iter().flatten().count() > 0);
    assert!(fires.iter().flatten().all(|f| *f == FireOutcome::Blocked));
}

#[test]
fn test_hit_rate_counts_every_attempt() {
    let config = TrackerConfig::default().with_fire_on_lock(true);
    let (mut control, registry) = debug_loop(config);
    let target = Vec3::new(0.3, 0.0, 0.0);
    let id = registry.lock().add(target, 1, "body", 0.0);
    let mut rng = SimpleRng::new(23);

    let mut attempts = 0u64;
    let mut blocked = 0u64;
    for _ in 0..144 {
        let now = control.time() + DT;
        registry.lock().update(id, target, now);
        if let Some(outcome) = control.tick(DT, &mut rng).fire {
            attempts += 1;
            if !outcome.fired() {
                blocked += 1;
            }
        }
    }

    // Rate-limited attempts are shots too
    assert!(blocked > 0);
    assert_eq!(control.shots(), attempts);
    assert_scalar_close(control.stats().hit_rate, 1.0, 1e-12, "hit rate");
}
