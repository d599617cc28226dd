//! Display styles attached to renderable items.

use serde::{Deserialize, Serialize};

/// RGB colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color(pub [f64; 3]);

impl Color {
    /// Pure blue.
    pub const BLUE: Self = Self([0.0, 0.0, 1.0]);
    /// Pure red.
    pub const RED: Self = Self([1.0, 0.0, 0.0]);
    /// Green as used by matplotlib-style `g`.
    pub const GREEN: Self = Self([0.0, 0.5, 0.0]);
    /// Orange.
    pub const ORANGE: Self = Self([1.0, 0.647, 0.0]);
    /// Black.
    pub const BLACK: Self = Self([0.0, 0.0, 0.0]);

    /// Red component.
    pub fn r(&self) -> f64 {
        self.0[0]
    }

    /// Green component.
    pub fn g(&self) -> f64 {
        self.0[1]
    }

    /// Blue component.
    pub fn b(&self) -> f64 {
        self.0[2]
    }

    /// True if every component is within `0.0..=1.0`.
    pub fn is_valid(&self) -> bool {
        self.0.iter().all(|c| (0.0..=1.0).contains(c))
    }
}

/// Style of a surface mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshStyle {
    /// Face colour.
    pub color: Color,
    /// Face opacity in `0.0..=1.0`.
    pub opacity: f64,
    /// Draw face edges.
    pub show_edges: bool,
    /// Edge colour, renderer default when unset.
    pub edge_color: Option<Color>,
}

impl Default for MeshStyle {
    fn default() -> Self {
        Self {
            color: Color::BLUE,
            opacity: 0.5,
            show_edges: true,
            edge_color: None,
        }
    }
}

impl MeshStyle {
    /// Beam 1 envelope.
    pub fn beam1() -> Self {
        Self::default()
    }

    /// Beam 2 envelope.
    pub fn beam2() -> Self {
        Self {
            color: Color::RED,
            ..Self::default()
        }
    }

    /// Polygonal beam screen.
    pub fn polygon_aperture() -> Self {
        Self {
            color: Color::ORANGE,
            opacity: 0.3,
            show_edges: true,
            edge_color: Some(Color::BLACK),
        }
    }

    /// Rectangular beam screen.
    pub fn rectangular_aperture() -> Self {
        Self {
            color: Color::GREEN,
            opacity: 0.5,
            show_edges: true,
            edge_color: None,
        }
    }
}

/// Style of a polyline or curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineStyle {
    /// Line colour.
    pub color: Color,
    /// Line width in screen units.
    pub line_width: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLUE,
            line_width: 5.0,
        }
    }
}

/// Mesh and centerline style for one beam.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamStyle {
    /// Envelope surface.
    pub envelope: MeshStyle,
    /// Closed-orbit centerline.
    pub orbit: LineStyle,
}

impl Default for BeamStyle {
    fn default() -> Self {
        Self::beam1()
    }
}

impl BeamStyle {
    /// Blue beam travelling clockwise.
    pub fn beam1() -> Self {
        Self {
            envelope: MeshStyle::beam1(),
            orbit: LineStyle {
                color: Color::BLUE,
                line_width: 5.0,
            },
        }
    }

    /// Red beam travelling counter-clockwise.
    pub fn beam2() -> Self {
        Self {
            envelope: MeshStyle::beam2(),
            orbit: LineStyle {
                color: Color::RED,
                line_width: 5.0,
            },
        }
    }
}

/// Partial [`MeshStyle`] read from configuration, laid over a preset.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct MeshStyleOverride {
    color: Option<Color>,
    opacity: Option<f64>,
    show_edges: Option<bool>,
    edge_color: Option<Color>,
}

impl MeshStyleOverride {
    pub(crate) fn apply(self, base: MeshStyle) -> MeshStyle {
        MeshStyle {
            color: self.color.unwrap_or(base.color),
            opacity: self.opacity.unwrap_or(base.opacity),
            show_edges: self.show_edges.unwrap_or(base.show_edges),
            edge_color: self.edge_color.or(base.edge_color),
        }
    }
}

/// Partial [`LineStyle`].
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct LineStyleOverride {
    color: Option<Color>,
    line_width: Option<f64>,
}

impl LineStyleOverride {
    pub(crate) fn apply(self, base: LineStyle) -> LineStyle {
        LineStyle {
            color: self.color.unwrap_or(base.color),
            line_width: self.line_width.unwrap_or(base.line_width),
        }
    }
}

/// Partial [`BeamStyle`].
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct BeamStyleOverride {
    envelope: MeshStyleOverride,
    orbit: LineStyleOverride,
}

impl BeamStyleOverride {
    pub(crate) fn apply(self, base: BeamStyle) -> BeamStyle {
        BeamStyle {
            envelope: self.envelope.apply(base.envelope),
            orbit: self.orbit.apply(base.orbit),
        }
    }
}
