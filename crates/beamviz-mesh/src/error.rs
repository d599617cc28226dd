//! Error types for cross-section and mesh construction.

use thiserror::Error;

/// Errors that can occur while building sections or meshes.
#[derive(Error, Debug, PartialEq)]
pub enum MeshError {
    /// A slice has a different point count than the first slice.
    #[error("slice {slice} has {found} points, expected {expected}")]
    MismatchedPointCounts {
        /// Index of the offending slice.
        slice: usize,
        /// Point count of the first slice.
        expected: usize,
        /// Point count of the offending slice.
        found: usize,
    },

    /// Polygon coordinate arrays differ in length.
    #[error("polygon has {xs} x coordinates but {ys} y coordinates")]
    PolygonLengthMismatch {
        /// Number of x coordinates.
        xs: usize,
        /// Number of y coordinates.
        ys: usize,
    },

    /// Polygon has no points.
    #[error("polygon is empty")]
    EmptyPolygon,

    /// Points are not three-dimensional.
    #[error("points must be 3D, got dimension {0}")]
    NotThreeDimensional(usize),

    /// Ellipse resolution too low to enclose an area.
    #[error("ellipse resolution must be at least 3, got {0}")]
    InvalidResolution(usize),

    /// Flat coordinate buffer does not split into whole slices.
    #[error("{len} coordinates do not form slices of {points_per_poly} points in {dim}D")]
    FlatLengthMismatch {
        /// Buffer length.
        len: usize,
        /// Point dimension.
        dim: usize,
        /// Points per slice.
        points_per_poly: usize,
    },
}

/// Result type for mesh operations.
pub type Result<T> = std::result::Result<T, MeshError>;
