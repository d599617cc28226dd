//! Renderable items and the renderer handoff.

use beamviz_math::Point3;
use beamviz_mesh::QuadMesh;
use serde::Serialize;

use crate::config::VisualizationConfig;
use crate::error::Result;
use crate::style::{LineStyle, MeshStyle};

/// One thing to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderItem {
    /// Quad surface mesh.
    Surface {
        /// Item label, e.g. `"beam1 envelope"`.
        label: String,
        /// Geometry.
        mesh: QuadMesh,
        /// Appearance.
        style: MeshStyle,
    },
    /// Smooth curve through ordered points.
    Curve {
        /// Item label.
        label: String,
        /// Points the curve passes through, in order.
        #[serde(serialize_with = "serialize_points")]
        points: Vec<Point3>,
        /// Appearance.
        style: LineStyle,
    },
}

impl RenderItem {
    /// Item label.
    pub fn label(&self) -> &str {
        match self {
            RenderItem::Surface { label, .. } | RenderItem::Curve { label, .. } => label,
        }
    }

    /// Surface mesh, if this item is one.
    pub fn as_surface(&self) -> Option<&QuadMesh> {
        match self {
            RenderItem::Surface { mesh, .. } => Some(mesh),
            RenderItem::Curve { .. } => None,
        }
    }

    /// Curve points, if this item is a curve.
    pub fn as_curve(&self) -> Option<&[Point3]> {
        match self {
            RenderItem::Curve { points, .. } => Some(points),
            RenderItem::Surface { .. } => None,
        }
    }
}

fn serialize_points<S: serde::Serializer>(
    points: &[Point3],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(points.iter().map(|p| [p.x, p.y, p.z]))
}

/// A complete visualization, assembled once and shown once.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scene {
    /// Window title.
    pub title: String,
    /// Labels of the three world axes.
    pub axis_labels: [String; 3],
    /// Title of the vertical display axis.
    pub vertical_axis_title: String,
    /// Magnification applied to transverse quantities.
    pub scale: f64,
    /// Items in drawing order.
    pub items: Vec<RenderItem>,
}

impl Scene {
    /// Empty scene carrying the titles of `config`.
    pub fn new(config: &VisualizationConfig) -> Self {
        Self {
            title: config.title.clone(),
            axis_labels: config.axis_labels.clone(),
            vertical_axis_title: config.vertical_axis_title.clone(),
            scale: config.scale,
            items: Vec::new(),
        }
    }

    /// Append items.
    pub fn extend(&mut self, items: impl IntoIterator<Item = RenderItem>) {
        self.items.extend(items);
    }

    /// Iterate over the surface meshes.
    pub fn surfaces(&self) -> impl Iterator<Item = &QuadMesh> {
        self.items.iter().filter_map(RenderItem::as_surface)
    }

    /// Iterate over the curves.
    pub fn curves(&self) -> impl Iterator<Item = &[Point3]> {
        self.items.iter().filter_map(RenderItem::as_curve)
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Hand the finished scene to `renderer`.
    pub fn show<R: Renderer + ?Sized>(&self, renderer: &mut R) -> Result<()> {
        log::debug!(
            "showing scene '{}' with {} items",
            self.title,
            self.items.len()
        );
        renderer.render(self)
    }
}

/// Display backend consuming a finished scene.
pub trait Renderer {
    /// Display `scene`. Called once per visualization.
    fn render(&mut self, scene: &Scene) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VizError;

    #[derive(Default)]
    struct Recorder {
        calls: usize,
        items: usize,
    }

    impl Renderer for Recorder {
        fn render(&mut self, scene: &Scene) -> Result<()> {
            self.calls += 1;
            self.items = scene.items.len();
            Ok(())
        }
    }

    struct Broken;

    impl Renderer for Broken {
        fn render(&mut self, _scene: &Scene) -> Result<()> {
            Err(VizError::Render("no display".into()))
        }
    }

    fn curve() -> RenderItem {
        RenderItem::Curve {
            label: "orbit".into(),
            points: vec![Point3::new(1.0, 2.0, 3.0)],
            style: LineStyle::default(),
        }
    }

    #[test]
    fn test_show_calls_renderer_once() {
        let mut scene = Scene::new(&VisualizationConfig::default());
        scene.extend([curve()]);
        let mut r = Recorder::default();
        scene.show(&mut r).unwrap();
        assert_eq!(r.calls, 1);
        assert_eq!(r.items, 1);
    }

    #[test]
    fn test_render_error_propagates() {
        let scene = Scene::default();
        assert!(matches!(scene.show(&mut Broken), Err(VizError::Render(_))));
    }

    #[test]
    fn test_item_accessors() {
        let item = curve();
        assert_eq!(item.label(), "orbit");
        assert!(item.as_surface().is_none());
        assert_eq!(item.as_curve().map(<[Point3]>::len), Some(1));
    }

    #[test]
    fn test_to_json() {
        let mut scene = Scene::new(&VisualizationConfig::default());
        scene.extend([curve()]);
        let value: serde_json::Value = serde_json::from_str(&scene.to_json().unwrap()).unwrap();
        assert_eq!(value["items"][0]["kind"], "curve");
        assert_eq!(value["items"][0]["points"][0][2], 3.0);
        assert_eq!(value["axis_labels"][1], "Z");
    }
}
