//! Reference frame of one longitudinal slice.

use beamviz_math::{Point3, Transform};

/// Placement of a transverse cross-section in world space.
///
/// Local coordinates are `(horizontal, 0, vertical)`: the first axis points
/// radially in the bend plane before rotation, the third axis is vertical.
/// A local point is rotated by `theta` about the vertical axis and then
/// translated to `position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceFrame {
    /// World position of the slice origin.
    pub position: Point3,
    /// Rotation about the vertical (third) axis, in radians.
    pub theta: f64,
}

impl SliceFrame {
    /// Create a frame at `position` rotated by `theta`.
    pub fn new(position: Point3, theta: f64) -> Self {
        Self { position, theta }
    }

    /// Unrotated frame at the world origin.
    pub fn origin() -> Self {
        Self::new(Point3::origin(), 0.0)
    }

    /// Local-to-world transform.
    pub fn transform(&self) -> Transform {
        Transform::placement(&self.position, self.theta)
    }

    /// Map a local point to world space.
    pub fn to_world(&self, local: &Point3) -> Point3 {
        self.transform().apply_point(local)
    }

    /// Map a batch of local points to world space.
    pub fn place(&self, local: &[Point3]) -> Vec<Point3> {
        let t = self.transform();
        local.iter().map(|p| t.apply_point(p)).collect()
    }

    /// Map a transverse offset `(h, v)` to world space.
    pub fn transverse_to_world(&self, h: f64, v: f64) -> Point3 {
        self.to_world(&Point3::new(h, 0.0, v))
    }
}

impl Default for SliceFrame {
    fn default() -> Self {
        Self::origin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_identity_frame() {
        let f = SliceFrame::origin();
        let p = f.transverse_to_world(2.0, 3.0);
        assert_abs_diff_eq!(p, Point3::new(2.0, 0.0, 3.0), epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_then_translation() {
        for theta in [0.0, PI / 2.0, PI] {
            let f = SliceFrame::new(Point3::new(10.0, 20.0, 1.0), theta);
            let p = f.transverse_to_world(0.5, -0.25);
            let (s, c) = theta.sin_cos();
            let expected = Point3::new(10.0 + 0.5 * c, 20.0 + 0.5 * s, 1.0 - 0.25);
            assert_abs_diff_eq!(p, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_place_batch() {
        let f = SliceFrame::new(Point3::new(0.0, 0.0, 5.0), 0.0);
        let pts = f.place(&[Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 0.0, 1.0)]);
        assert_eq!(pts.len(), 2);
        assert_abs_diff_eq!(pts[1], Point3::new(0.0, 0.0, 6.0), epsilon = 1e-12);
    }
}
