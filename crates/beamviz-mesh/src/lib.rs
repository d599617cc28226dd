#![warn(missing_docs)]

//! Cross-sections, ruled surfaces and centerlines for beamviz.
//!
//! A visualization is built from a sequence of longitudinal slices. Each
//! slice carries a [`SliceFrame`] (world position and rotation about the
//! vertical axis) and one [`CrossSection`]. Consecutive sections with the
//! same point count are stitched into a [`QuadMesh`] by [`ruled_surface`].
//!
//! # Example
//!
//! ```
//! use beamviz_math::Point3;
//! use beamviz_mesh::{ellipse, ruled_surface, SliceFrame};
//!
//! let rings: Vec<_> = (0..2)
//!     .map(|i| {
//!         let frame = SliceFrame::new(Point3::new(0.0, 0.0, i as f64), 0.0);
//!         ellipse(1.0, 1.0, 0.0, 0.0, &frame, 4).unwrap()
//!     })
//!     .collect();
//! let mesh = ruled_surface(&rings, true).unwrap();
//! assert_eq!(mesh.num_faces(), 4);
//! ```

pub mod centerline;
pub mod error;
pub mod frame;
pub mod mesh;
pub mod ruled;
pub mod section;

pub use centerline::{orbit_centerline, CenterlineCurve};
pub use error::{MeshError, Result};
pub use frame::SliceFrame;
pub use mesh::{QuadMesh, TriangleMesh};
pub use ruled::{ruled_surface, ruled_surface_from_flat, strip_faces};
pub use section::{
    ellipse, rectangular_screen, screen_polygon, CrossSection, DEFAULT_ELLIPSE_RESOLUTION,
};
