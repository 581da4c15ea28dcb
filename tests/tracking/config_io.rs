//! Configuration parsing and validation

use tracklock_rs::{ConfigError, Tracker, TrackerConfig};

#[test]
fn test_partial_json_takes_defaults() {
    let config = TrackerConfig::from_json(r#"{"dragForce": 8.0, "maxFPS": 60}"#).unwrap();
    assert_eq!(config.drag_force, 8.0);
    assert_eq!(config.max_fps, 60.0);
    assert_eq!(config.smoothing_factor, TrackerConfig::default().smoothing_factor);
}

#[test]
fn test_json_round_trip_by_field_name() {
    let config = TrackerConfig::default()
        .with_fire_on_lock(true)
        .with_kalman(0.2, 0.02)
        .with_seed(99);
    let json = config.to_json_pretty();
    assert!(json.contains("\"fireOnLock\": true"));
    assert!(json.contains("\"maxFPS\""));
    assert!(json.contains("\"R\": 0.2"));

    let parsed = TrackerConfig::from_json(&json).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_invalid_json_values_rejected() {
    let zero_fps = TrackerConfig::from_json(r#"{"maxFPS": 0}"#);
    assert!(matches!(zero_fps, Err(ConfigError::NonPositive { field: "maxFPS", .. })));

    let negative = TrackerConfig::from_json(r#"{"fireRateMs": -5}"#);
    assert!(matches!(negative, Err(ConfigError::Negative { .. })));

    let garbage = TrackerConfig::from_json("{not json");
    assert!(matches!(garbage, Err(ConfigError::Parse(_))));
}

#[test]
fn test_tracker_rejects_bad_smoothing() {
    let config = TrackerConfig {
        smoothing_factor: 1.5,
        ..TrackerConfig::default()
    };
    let err = Tracker::new(config).err().expect("should reject");
    assert!(matches!(err, ConfigError::OutOfRange { .. }));
    assert!(err.to_string().contains("smoothingFactor"));
}

#[test]
fn test_tracker_rejects_vanishing_tick_rate() {
    let config = TrackerConfig::default().with_max_fps(1e-20);
    let err = Tracker::new(config).err().expect("should reject");
    assert!(matches!(err, ConfigError::OutOfRange { field: "maxFPS", .. }));
}
