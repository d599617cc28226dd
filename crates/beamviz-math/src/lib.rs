#![warn(missing_docs)]

//! Math types for beam envelope geometry.
//!
//! Thin wrappers around nalgebra: the point type, the affine transform
//! used to place a transverse cross-section into the survey frame, and
//! tolerance constants. Lengths are in meters unless a caller scales them.

use nalgebra::{Matrix4, Vector4};

/// A point in 3D world space.
pub type Point3 = nalgebra::Point3<f64>;

/// A 4x4 affine transformation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = dx;
        m[(1, 3)] = dy;
        m[(2, 3)] = dz;
        Self { matrix: m }
    }

    /// Rotation about the Z axis by `angle` radians.
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = c;
        m[(0, 1)] = -s;
        m[(1, 0)] = s;
        m[(1, 1)] = c;
        Self { matrix: m }
    }

    /// Rotate about Z by `theta`, then translate to `origin`.
    ///
    /// This is the placement of a slice: local points are rotated first,
    /// the translation is added afterwards.
    pub fn placement(origin: &Point3, theta: f64) -> Self {
        Self::translation(origin.x, origin.y, origin.z).then(&Self::rotation_z(theta))
    }

    /// Compose: `self` then `other` (self * other).
    ///
    /// The resulting transform applies `other` first.
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }

    /// Inverse of this transform, if it exists.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Self { matrix })
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Tolerance for longitudinal comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in meters.
    pub linear: f64,
}

impl Tolerance {
    /// Default tolerance (1e-9 m).
    pub const DEFAULT: Self = Self { linear: 1e-9 };

    /// Check if `value` lies in `[lo, hi]`, widened by the tolerance.
    pub fn within(&self, value: f64, lo: f64, hi: f64) -> bool {
        value >= lo - self.linear && value <= hi + self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_identity_transform() {
        let t = Transform::identity();
        let p = Point3::new(1.0, 2.0, 3.0);
        let result = t.apply_point(&p);
        assert!((result - p).norm() < 1e-12);
    }

    #[test]
    fn test_translation() {
        let t = Transform::translation(10.0, 20.0, 30.0);
        let result = t.apply_point(&Point3::new(1.0, 2.0, 3.0));
        assert!((result.x - 11.0).abs() < 1e-12);
        assert!((result.y - 22.0).abs() < 1e-12);
        assert!((result.z - 33.0).abs() < 1e-12);
    }

    #[test]
    fn test_rotation_z_90() {
        let t = Transform::rotation_z(PI / 2.0);
        let result = t.apply_point(&Point3::new(1.0, 0.0, 0.0));
        assert!(result.x.abs() < 1e-12);
        assert!((result.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rotation_keeps_z() {
        let t = Transform::rotation_z(0.7);
        let result = t.apply_point(&Point3::new(0.0, 0.0, 4.0));
        assert!(result.x.abs() < 1e-12);
        assert!(result.y.abs() < 1e-12);
        assert!((result.z - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_placement_rotates_before_translating() {
        let origin = Point3::new(5.0, -2.0, 1.0);
        let t = Transform::placement(&origin, PI);
        let result = t.apply_point(&Point3::new(1.0, 0.0, 0.5));
        // (1, 0, 0.5) rotated by pi is (-1, 0, 0.5), then shifted.
        assert!((result.x - 4.0).abs() < 1e-12);
        assert!((result.y + 2.0).abs() < 1e-12);
        assert!((result.z - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_placement_inverse_recovers_local() {
        let origin = Point3::new(100.0, 3.0, -7.0);
        let t = Transform::placement(&origin, 0.3);
        let local = Point3::new(0.02, 0.0, -0.01);
        let world = t.apply_point(&local);
        let back = t.inverse().unwrap().apply_point(&world);
        assert!((back - local).norm() < 1e-9);
    }

    #[test]
    fn test_tolerance_within() {
        let tol = Tolerance::DEFAULT;
        assert!(tol.within(1.0 + 1e-10, 0.0, 1.0));
        assert!(tol.within(0.0, 0.0, 0.0));
        assert!(!tol.within(1.001, 0.0, 1.0));
    }
}
