//! Visualization settings.

use beamviz_mesh::DEFAULT_ELLIPSE_RESOLUTION;
use beamviz_optics::BeamParameters;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, VizError};
use crate::style::{BeamStyle, BeamStyleOverride, MeshStyle, MeshStyleOverride};

/// Everything a visualization run needs besides the tables themselves.
///
/// Missing TOML keys fall back to the defaults of [`Default`]. Style tables
/// are laid over their beam or aperture preset, so a partial table only
/// changes the keys it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizationConfig {
    /// Element the view is centred on.
    pub element_around: String,
    /// Length of the displayed section (m).
    pub section_length: f64,
    /// Number of cut positions inserted around the element.
    pub cut_resolution: usize,
    /// Tolerance when inserting cuts (m).
    pub cut_tolerance: f64,
    /// Magnification of transverse offsets and sizes.
    pub scale: f64,
    /// Points per envelope ellipse.
    pub ellipse_resolution: usize,
    /// Interpolated points per orbit centerline segment.
    pub centerline_samples: usize,
    /// Scene title.
    pub title: String,
    /// Labels of the three world axes.
    pub axis_labels: [String; 3],
    /// Title of the vertical display axis.
    pub vertical_axis_title: String,
    /// Emittance, sigma multiple and energy spread.
    pub beam: BeamParameters,
    /// Beam 1 appearance.
    #[serde(deserialize_with = "beam1_style")]
    pub beam1: BeamStyle,
    /// Beam 2 appearance.
    #[serde(deserialize_with = "beam2_style")]
    pub beam2: BeamStyle,
    /// Polygonal aperture appearance.
    #[serde(deserialize_with = "polygon_aperture_style")]
    pub aperture: MeshStyle,
    /// Rectangular aperture appearance.
    #[serde(deserialize_with = "rectangular_aperture_style")]
    pub rectangular_aperture: MeshStyle,
}

fn beam1_style<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<BeamStyle, D::Error> {
    Ok(BeamStyleOverride::deserialize(d)?.apply(BeamStyle::beam1()))
}

fn beam2_style<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<BeamStyle, D::Error> {
    Ok(BeamStyleOverride::deserialize(d)?.apply(BeamStyle::beam2()))
}

fn polygon_aperture_style<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<MeshStyle, D::Error> {
    Ok(MeshStyleOverride::deserialize(d)?.apply(MeshStyle::polygon_aperture()))
}

fn rectangular_aperture_style<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<MeshStyle, D::Error> {
    Ok(MeshStyleOverride::deserialize(d)?.apply(MeshStyle::rectangular_aperture()))
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            element_around: "ip5".to_string(),
            section_length: 135.0,
            cut_resolution: 200,
            cut_tolerance: 0.01,
            scale: 300.0,
            ellipse_resolution: DEFAULT_ELLIPSE_RESOLUTION,
            centerline_samples: 8,
            title: "LHC Beam Envelopes at CMS (3σ, β*=30cm)".to_string(),
            axis_labels: ["X".to_string(), "Z".to_string(), "Y".to_string()],
            vertical_axis_title: "Z [m]".to_string(),
            beam: BeamParameters::default(),
            beam1: BeamStyle::beam1(),
            beam2: BeamStyle::beam2(),
            aperture: MeshStyle::polygon_aperture(),
            rectangular_aperture: MeshStyle::rectangular_aperture(),
        }
    }
}

impl VisualizationConfig {
    /// Parse from TOML text and validate.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML text.
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.section_length <= 0.0 {
            return Err(VizError::InvalidConfig(
                "section_length must be positive".into(),
            ));
        }
        if self.scale <= 0.0 {
            return Err(VizError::InvalidConfig("scale must be positive".into()));
        }
        if self.ellipse_resolution < 3 {
            return Err(VizError::InvalidConfig(
                "ellipse_resolution must be at least 3".into(),
            ));
        }
        if self.centerline_samples == 0 {
            return Err(VizError::InvalidConfig(
                "centerline_samples must be positive".into(),
            ));
        }
        if self.cut_resolution < 2 {
            return Err(VizError::InvalidConfig(
                "cut_resolution must be at least 2".into(),
            ));
        }
        if self.cut_tolerance < 0.0 {
            return Err(VizError::InvalidConfig(
                "cut_tolerance must not be negative".into(),
            ));
        }
        let b = &self.beam;
        if b.nemitt_x < 0.0 || b.nemitt_y < 0.0 {
            return Err(VizError::InvalidConfig(
                "emittances must not be negative".into(),
            ));
        }
        if b.n_sigmas < 0.0 || b.sigma_delta < 0.0 {
            return Err(VizError::InvalidConfig(
                "n_sigmas and sigma_delta must not be negative".into(),
            ));
        }
        if b.clip_half_width.is_some_and(|c| c <= 0.0) {
            return Err(VizError::InvalidConfig(
                "clip_half_width must be positive".into(),
            ));
        }
        let styles = [
            self.beam1.envelope,
            self.beam2.envelope,
            self.aperture,
            self.rectangular_aperture,
        ];
        if styles.iter().any(|s| !(0.0..=1.0).contains(&s.opacity)) {
            return Err(VizError::InvalidConfig(
                "opacity must be between 0 and 1".into(),
            ));
        }
        Ok(())
    }
}
