//! Minimal vector math for particle shapes and positional helpers.

use std::ops::{Add, Mul, Sub};

/// A 3D position or offset in world space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[must_use]
    pub fn cross(self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Rotate an offset so its local Z axis points along `direction`
    /// (yaw-only, used to orient flat shapes).
    #[must_use]
    pub fn rotate_to_direction(self, direction: Self) -> Self {
        let yaw = direction.z.atan2(direction.x) - std::f64::consts::FRAC_PI_2;
        let (sin_yaw, cos_yaw) = yaw.sin_cos();
        Self {
            x: self.x * cos_yaw - self.z * sin_yaw,
            y: self.y,
            z: self.x * sin_yaw + self.z * cos_yaw,
        }
    }

    /// Rodrigues rotation of `self` around `axis` by `angle` radians.
    #[must_use]
    pub fn rotate_around_axis(self, axis: Self, angle: f64) -> Self {
        let (sin_theta, cos_theta) = angle.sin_cos();
        self * cos_theta
            + axis.cross(self) * sin_theta
            + axis * (axis.dot(self) * (1.0 - cos_theta))
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}
