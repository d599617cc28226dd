//! Transverse cross-sections: ellipses, discrete polygons and rectangles.
//!
//! Every section is described in the local frame of a slice as points
//! `(horizontal, 0, vertical)` and placed into world space by a
//! [`SliceFrame`]. The point count is fixed per shape so that consecutive
//! slices can be stitched by the ruled mesher.

use std::f64::consts::PI;

use beamviz_math::Point3;

use crate::error::{MeshError, Result};
use crate::frame::SliceFrame;

/// Points per ellipse used by the default envelope rendering.
pub const DEFAULT_ELLIPSE_RESOLUTION: usize = 20;

/// Shape of one transverse cross-section.
#[derive(Debug, Clone, PartialEq)]
pub enum CrossSection {
    /// Ellipse with an off-centre orbit.
    Ellipse {
        /// Horizontal radius.
        rx: f64,
        /// Vertical radius.
        ry: f64,
        /// Horizontal centre offset, applied before rotation.
        beam_x: f64,
        /// Vertical centre offset.
        beam_y: f64,
        /// Number of points around the loop.
        resolution: usize,
    },
    /// Explicit polygon corners.
    Polygon {
        /// Horizontal coordinates.
        xs: Vec<f64>,
        /// Vertical coordinates.
        ys: Vec<f64>,
    },
    /// Axis-aligned rectangle.
    Rectangle {
        /// Lower horizontal extent.
        x_min: f64,
        /// Upper horizontal extent.
        x_max: f64,
        /// Lower vertical extent.
        y_min: f64,
        /// Upper vertical extent.
        y_max: f64,
        /// When false the outer side collapses onto the axis (`x_max = 0`).
        closed: bool,
    },
}

impl CrossSection {
    /// Number of boundary points this section produces.
    pub fn point_count(&self) -> usize {
        match self {
            CrossSection::Ellipse { resolution, .. } => *resolution,
            CrossSection::Polygon { xs, .. } => xs.len(),
            CrossSection::Rectangle { .. } => 4,
        }
    }

    /// Boundary points in the local slice frame.
    pub fn local_points(&self) -> Result<Vec<Point3>> {
        match self {
            CrossSection::Ellipse {
                rx,
                ry,
                beam_x,
                beam_y,
                resolution,
            } => {
                if *resolution < 3 {
                    return Err(MeshError::InvalidResolution(*resolution));
                }
                let n = *resolution as f64;
                Ok((0..*resolution)
                    .map(|i| {
                        let t = 2.0 * PI * i as f64 / n;
                        Point3::new(rx * t.cos() + beam_x, 0.0, ry * t.sin() + beam_y)
                    })
                    .collect())
            }
            CrossSection::Polygon { xs, ys } => {
                if xs.len() != ys.len() {
                    return Err(MeshError::PolygonLengthMismatch {
                        xs: xs.len(),
                        ys: ys.len(),
                    });
                }
                if xs.is_empty() {
                    return Err(MeshError::EmptyPolygon);
                }
                Ok(xs
                    .iter()
                    .zip(ys)
                    .map(|(&x, &y)| Point3::new(x, 0.0, y))
                    .collect())
            }
            CrossSection::Rectangle {
                x_min,
                x_max,
                y_min,
                y_max,
                closed,
            } => Ok(rectangle_corners(*x_min, *x_max, *y_min, *y_max, *closed)),
        }
    }

    /// Boundary points placed into world space by `frame`.
    pub fn place(&self, frame: &SliceFrame) -> Result<Vec<Point3>> {
        Ok(frame.place(&self.local_points()?))
    }
}

/// Ellipse of radii `(rx, ry)` around the orbit offset `(beam_x, beam_y)`,
/// placed at `frame`.
pub fn ellipse(
    rx: f64,
    ry: f64,
    beam_x: f64,
    beam_y: f64,
    frame: &SliceFrame,
    resolution: usize,
) -> Result<Vec<Point3>> {
    CrossSection::Ellipse {
        rx,
        ry,
        beam_x,
        beam_y,
        resolution,
    }
    .place(frame)
}

/// Beam-screen polygon with corners `(xs[i], ys[i])`, placed at `frame`.
pub fn screen_polygon(xs: &[f64], ys: &[f64], frame: &SliceFrame) -> Result<Vec<Point3>> {
    CrossSection::Polygon {
        xs: xs.to_vec(),
        ys: ys.to_vec(),
    }
    .place(frame)
}

/// Rectangular beam screen, placed at `frame`.
///
/// With `closed == false` the outer horizontal side is pulled onto the axis,
/// leaving a half-open shape.
pub fn rectangular_screen(
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    frame: &SliceFrame,
    closed: bool,
) -> Vec<Point3> {
    frame.place(&rectangle_corners(x_min, x_max, y_min, y_max, closed))
}

// Corner order: outer-bottom, inner-bottom, inner-top, outer-top.
fn rectangle_corners(x_min: f64, x_max: f64, y_min: f64, y_max: f64, closed: bool) -> Vec<Point3> {
    let x_max = if closed { x_max } else { 0.0 };
    vec![
        Point3::new(x_max, 0.0, y_min),
        Point3::new(x_min, 0.0, y_min),
        Point3::new(x_min, 0.0, y_max),
        Point3::new(x_max, 0.0, y_max),
    ]
}
