#![warn(missing_docs)]

//! beamviz: 3D beam envelopes and apertures around a lattice element.
//!
//! Optics and survey tables come from an external accelerator-physics
//! engine (see [`beamviz_optics`]); this crate turns them into a [`Scene`]
//! of surface meshes and orbit curves and hands it to a [`Renderer`].
//!
//! # Example
//!
//! ```rust,ignore
//! use beamviz::{two_beam_scene, BeamTables, Direction, VisualizationConfig};
//!
//! let config = VisualizationConfig::from_toml_str(r#"element_around = "ip5""#)?;
//! let beam1 = BeamTables::from_model(&mut lhcb1, &config, Direction::Forward)?;
//! let beam2 = BeamTables::from_model(&mut lhcb2, &config, Direction::Reverse)?;
//! let scene = two_beam_scene(&beam1, &beam2, None, &config)?;
//! scene.show(&mut viewer)?;
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod scene;
pub mod style;

pub use config::VisualizationConfig;
pub use error::{Result, VizError};
pub use pipeline::{
    aperture_item, beam_envelope_items, rectangular_aperture_item, slice_frame, two_beam_scene,
    ApertureSection, BeamTables, Direction,
};
pub use scene::{RenderItem, Renderer, Scene};
pub use style::{BeamStyle, Color, LineStyle, MeshStyle};

pub use beamviz_math;
pub use beamviz_mesh;
pub use beamviz_optics;
