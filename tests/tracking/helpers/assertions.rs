//! Numerical assertions with tolerance

use tracklock_rs::Vec3;

/// Compare scalar values with tolerance
pub fn assert_scalar_close(actual: f64, expected: f64, tolerance: f64, field_name: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {}, got {} (diff: {}, tolerance: {})",
        field_name,
        expected,
        actual,
        diff,
        tolerance
    );
}

/// Compare positions component-wise with tolerance
pub fn assert_vec3_close(actual: Vec3, expected: Vec3, tolerance: f64, field_name: &str) {
    let a = actual.to_array();
    let e = expected.to_array();
    for (i, axis) in ["x", "y", "z"].iter().enumerate() {
        assert_scalar_close(a[i], e[i], tolerance, &format!("{}.{}", field_name, axis));
    }
}

/// Sequence never increases by more than `slack`
pub fn assert_non_increasing(values: &[f64], slack: f64, field_name: &str) {
    for (i, pair) in values.windows(2).enumerate() {
        assert!(
            pair[1] <= pair[0] + slack,
            "{}: increased at step {} ({} -> {})",
            field_name,
            i + 1,
            pair[0],
            pair[1]
        );
    }
}
