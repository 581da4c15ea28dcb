//! 3D vector value type
//!
//! [`Vec3`] is a thin `Copy` wrapper around `nalgebra::Vector3<f64>`. Every
//! operation returns a new value, so sharing a position between components
//! never exposes in-place mutation.

use std::ops::{Add, Mul, Neg, Sub};

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Default per-component tolerance for [`Vec3::approx_eq_default`]
pub const DEFAULT_TOLERANCE: f64 = 0.001;

/// Immutable 3D vector (double precision)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vec3(Vector3<f64>);

impl Vec3 {
    /// Create a vector from components
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(Vector3::new(x, y, z))
    }

    /// The zero vector
    #[inline]
    pub fn zero() -> Self {
        Self(Vector3::zeros())
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    /// Components as an array `[x, y, z]`
    #[inline]
    pub fn to_array(&self) -> [f64; 3] {
        [self.0.x, self.0.y, self.0.z]
    }

    #[inline]
    pub fn scale(&self, factor: f64) -> Vec3 {
        Vec3(self.0 * factor)
    }

    #[inline]
    pub fn dot(&self, other: &Vec3) -> f64 {
        self.0.dot(&other.0)
    }

    #[inline]
    pub fn cross(&self, other: &Vec3) -> Vec3 {
        Vec3(self.0.cross(&other.0))
    }

    /// Euclidean length
    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.0.norm()
    }

    /// Unit vector in the same direction.
    ///
    /// A zero-length vector normalizes to the zero vector rather than NaN.
    pub fn normalize(&self) -> Vec3 {
        self.0
            .try_normalize(0.0)
            .map(Vec3)
            .unwrap_or(Vec3::zero())
    }

    /// Linear interpolation `self + (other - self) * t`.
    ///
    /// `t` is not clamped: values outside `[0, 1]` extrapolate.
    #[inline]
    pub fn lerp(&self, other: &Vec3, t: f64) -> Vec3 {
        Vec3(self.0 + (other.0 - self.0) * t)
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance_to(&self, other: &Vec3) -> f64 {
        (self.0 - other.0).norm()
    }

    /// Per-component absolute difference strictly below `tolerance`.
    ///
    /// Note this is a box test, not a Euclidean distance test.
    pub fn approx_eq(&self, other: &Vec3, tolerance: f64) -> bool {
        (self.0.x - other.0.x).abs() < tolerance
            && (self.0.y - other.0.y).abs() < tolerance
            && (self.0.z - other.0.z).abs() < tolerance
    }

    /// [`approx_eq`](Self::approx_eq) with [`DEFAULT_TOLERANCE`]
    #[inline]
    pub fn approx_eq_default(&self, other: &Vec3) -> bool {
        self.approx_eq(other, DEFAULT_TOLERANCE)
    }

    /// True when every component is finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }

    /// Borrow the underlying nalgebra vector
    #[inline]
    pub fn as_vector(&self) -> &Vector3<f64> {
        &self.0
    }
}

impl From<Vector3<f64>> for Vec3 {
    fn from(v: Vector3<f64>) -> Self {
        Vec3(v)
    }
}

impl From<Vec3> for Vector3<f64> {
    fn from(v: Vec3) -> Self {
        v.0
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(a: [f64; 3]) -> Self {
        Vec3::new(a[0], a[1], a[2])
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3(self.0 + rhs.0)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3(self.0 - rhs.0)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f64) -> Vec3 {
        Vec3(self.0 * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        Vec3(-self.0)
    }
}
