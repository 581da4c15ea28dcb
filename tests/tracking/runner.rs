//! Background runner lifecycle

use std::thread;
use std::time::Duration;

use tracklock_rs::{DebugReporter, Tracker, TrackerConfig, Vec3};

fn fast_tracker() -> Tracker<DebugReporter> {
    let config = TrackerConfig::default().with_max_fps(400.0).with_seed(3);
    Tracker::with_reporter(config, DebugReporter::new()).expect("valid config")
}

#[test]
fn test_runner_moves_observer() {
    let tracker = fast_tracker();
    let target = Vec3::new(1.0, 0.0, 0.0);
    let id = tracker.add_target(target, 1, "body");

    tracker.start().expect("spawn");
    for _ in 0..20 {
        thread::sleep(Duration::from_millis(5));
        tracker.update_target(id, target);
    }
    tracker.stop();

    assert!(tracker.observer().x() > 0.0);
    assert_eq!(tracker.stats().active_target_id, Some(id));
}

#[test]
fn test_no_tick_after_stop() {
    let tracker = fast_tracker();
    tracker.add_target(Vec3::new(1.0, 0.0, 0.0), 1, "body");

    tracker.start().expect("spawn");
    thread::sleep(Duration::from_millis(40));
    tracker.stop();
    tracker.stop();

    let ticks = tracker.inspect_reporter(|r| r.tick_events().len());
    assert!(ticks > 0);
    thread::sleep(Duration::from_millis(40));
    assert_eq!(tracker.inspect_reporter(|r| r.tick_events().len()), ticks);
}

#[test]
fn test_feed_from_other_threads_while_running() {
    let tracker = std::sync::Arc::new(fast_tracker());
    tracker.start().expect("spawn");

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let tracker = tracker.clone();
            thread::spawn(move || {
                let id = tracker.add_target(Vec3::new(i as f64, 1.0, 0.0), i, "body");
                for step in 0..50 {
                    tracker.update_target(id, Vec3::new(i as f64, 1.0 + step as f64 * 0.01, 0.0));
                    thread::sleep(Duration::from_millis(1));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("feeder panicked");
    }
    tracker.stop();

    let stats = tracker.stats();
    assert_eq!(stats.tracked_count, 4);
    assert!(stats.active_target_id.is_some());
    assert!(tracker.observer().is_finite());
}

#[test]
fn test_drop_stops_runner() {
    let tracker = fast_tracker();
    tracker.start().expect("spawn");
    thread::sleep(Duration::from_millis(10));
    drop(tracker);
}
