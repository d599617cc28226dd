//! Closed-orbit centerline and its smooth interpolation.

use beamviz_math::Point3;

use crate::frame::SliceFrame;

/// Closed-orbit polyline: the orbit offset `(x, y)` of every slice, scaled by
/// `scale` and mapped into world space by the slice frame.
///
/// Per slice this is `position + (cos(theta) x, sin(theta) x, y) * scale`.
/// The output length is the shortest of the three inputs.
pub fn orbit_centerline(frames: &[SliceFrame], x: &[f64], y: &[f64], scale: f64) -> Vec<Point3> {
    frames
        .iter()
        .zip(x.iter().zip(y))
        .map(|(frame, (&xi, &yi))| frame.transverse_to_world(xi * scale, yi * scale))
        .collect()
}

/// Uniform Catmull-Rom spline through a sequence of control points.
///
/// The curve passes through every control point in order. Segment `i`
/// spans parameters `[i, i + 1]`; the end points are duplicated so the
/// first and last segments are well defined.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CenterlineCurve {
    /// Control points, in order.
    pub points: Vec<Point3>,
}

impl CenterlineCurve {
    /// Create a curve through `points`.
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    /// Parameter domain `(0, n - 1)`.
    pub fn domain(&self) -> (f64, f64) {
        (0.0, self.points.len().saturating_sub(1) as f64)
    }

    /// Evaluate the curve at parameter `t`, clamped to the domain.
    pub fn evaluate(&self, t: f64) -> Option<Point3> {
        let n = self.points.len();
        match n {
            0 => return None,
            1 => return Some(self.points[0]),
            _ => {}
        }
        let (t_min, t_max) = self.domain();
        let t = t.clamp(t_min, t_max);
        let seg = (t.floor() as usize).min(n - 2);
        Some(self.segment_point(seg, t - seg as f64))
    }

    /// Dense polyline with `points_per_segment` samples per segment.
    ///
    /// Every `points_per_segment`-th sample is a control point and the last
    /// sample is the last control point.
    pub fn sample(&self, points_per_segment: usize) -> Vec<Point3> {
        let n = self.points.len();
        if n < 2 {
            return self.points.clone();
        }
        let k = points_per_segment.max(1);
        let mut out = Vec::with_capacity((n - 1) * k + 1);
        for seg in 0..n - 1 {
            out.push(self.points[seg]);
            for j in 1..k {
                out.push(self.segment_point(seg, j as f64 / k as f64));
            }
        }
        out.push(self.points[n - 1]);
        out
    }

    fn segment_point(&self, seg: usize, u: f64) -> Point3 {
        let last = self.points.len() - 1;
        let p0 = self.points[seg.saturating_sub(1)].coords;
        let p1 = self.points[seg].coords;
        let p2 = self.points[(seg + 1).min(last)].coords;
        let p3 = self.points[(seg + 2).min(last)].coords;

        let u2 = u * u;
        let u3 = u2 * u;
        let c = 0.5
            * ((2.0 * p1)
                + (p2 - p0) * u
                + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * u2
                + (3.0 * p1 - p0 - 3.0 * p2 + p3) * u3);
        Point3::from(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_centerline_formula() {
        let theta = 0.3;
        let frames = [SliceFrame::new(Point3::new(10.0, 20.0, 1.5), theta)];
        let pts = orbit_centerline(&frames, &[2e-3], &[-1e-3], 300.0);
        let expected = Point3::new(
            10.0 + theta.cos() * 2e-3 * 300.0,
            20.0 + theta.sin() * 2e-3 * 300.0,
            1.5 - 1e-3 * 300.0,
        );
        assert_abs_diff_eq!(pts[0], expected, epsilon = 1e-12);
    }

    #[test]
    fn test_centerline_truncates_to_shortest() {
        let frames = vec![SliceFrame::origin(); 5];
        let pts = orbit_centerline(&frames, &[0.0; 4], &[0.0; 5], 1.0);
        assert_eq!(pts.len(), 4);
    }

    #[test]
    fn test_sample_passes_through_control_points() {
        let points: Vec<Point3> = (0..6)
            .map(|i| {
                let a = i as f64 * PI / 5.0;
                Point3::new(a.cos(), a.sin(), i as f64)
            })
            .collect();
        let curve = CenterlineCurve::new(points.clone());
        let dense = curve.sample(8);
        assert_eq!(dense.len(), 5 * 8 + 1);
        for (i, p) in points.iter().enumerate() {
            assert_abs_diff_eq!(dense[i * 8], *p, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_evaluate_at_knots() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(3.0, 1.0, 1.0),
        ];
        let curve = CenterlineCurve::new(points.clone());
        for (i, p) in points.iter().enumerate() {
            assert_abs_diff_eq!(curve.evaluate(i as f64).unwrap(), *p, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(curve.evaluate(99.0).unwrap(), points[2], epsilon = 1e-12);
    }

    #[test]
    fn test_straight_line_stays_straight() {
        let points: Vec<Point3> = (0..4).map(|i| Point3::new(0.0, 0.0, i as f64)).collect();
        let curve = CenterlineCurve::new(points);
        for p in curve.sample(5) {
            assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(curve.evaluate(1.5).unwrap().z, 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_curves() {
        assert!(CenterlineCurve::default().evaluate(0.0).is_none());
        assert!(CenterlineCurve::default().sample(4).is_empty());
        let single = CenterlineCurve::new(vec![Point3::new(1.0, 1.0, 1.0)]);
        assert_eq!(single.sample(4).len(), 1);
        assert_eq!(single.evaluate(3.0), Some(Point3::new(1.0, 1.0, 1.0)));
    }
}
