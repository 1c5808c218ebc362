//! Geometric primitives shared by the area solvers
//!
//! Provides a small 2D vector type plus the interpolation helpers used to
//! blend coverage estimates. All operations are plain `f64` arithmetic in a
//! fixed evaluation order so that generated tables are reproducible.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Sub};

/// Distance (in pixels) at which U-shape smoothing fades out completely.
pub const SMOOTH_MAX_DISTANCE: f64 = 32.0;

/// An ordered pair of real numbers.
///
/// Used both as a 2D point/displacement and as a pair of coverage values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Create a vector from its two components.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector with both components set to `v`.
    pub const fn splat(v: f64) -> Self {
        Self { x: v, y: v }
    }

    /// Componentwise square root.
    pub fn sqrt(self) -> Self {
        Self::new(self.x.sqrt(), self.y.sqrt())
    }

    /// Componentwise product.
    pub fn mul_elem(self, other: Vec2) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(rhs * self.x, rhs * self.y)
    }
}

impl Div<f64> for Vec2 {
    type Output = Vec2;

    fn div(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: Vec2, b: Vec2, p: f64) -> Vec2 {
    a + (b - a) * p
}

/// Clamp a value to the `[0, 1]` range.
pub fn saturate(a: f64) -> f64 {
    a.max(0.0).min(1.0)
}

/// Blend factor of the U-shape smoothing for a span of `d` pixels.
///
/// Zero means the square-root estimate is used as is, one means the raw area
/// is kept untouched.
pub fn smoothing_factor(d: f64, max_distance: f64) -> f64 {
    saturate(d / max_distance)
}

/// Smooth the two halves of a U pattern.
///
/// Short U shapes overestimate the area when both halves are added, so each
/// half is pulled towards `sqrt(2a) / 2` with a weight that fades out as the
/// span `d` approaches `max_distance`.
pub fn smooth_area(d: f64, a1: Vec2, a2: Vec2, max_distance: f64) -> (Vec2, Vec2) {
    let b1 = (a1 * 2.0).sqrt() * 0.5;
    let b2 = (a2 * 2.0).sqrt() * 0.5;
    let p = smoothing_factor(d, max_distance);
    (lerp(b1, a1, p), lerp(b2, a2, p))
}
