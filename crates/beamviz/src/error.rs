//! Error types for scene assembly.

use beamviz_mesh::MeshError;
use beamviz_optics::OpticsError;
use thiserror::Error;

/// Errors returned while building or showing a visualization.
#[derive(Error, Debug)]
pub enum VizError {
    /// Table lookup, selection or envelope sizing failed.
    #[error("optics error: {0}")]
    Optics(#[from] OpticsError),

    /// Cross-section or mesh construction failed.
    #[error("mesh error: {0}")]
    Mesh(#[from] MeshError),

    /// Configuration text could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration values are out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The renderer rejected the scene.
    #[error("render error: {0}")]
    Render(String),
}

/// Result type for visualization operations.
pub type Result<T> = std::result::Result<T, VizError>;
