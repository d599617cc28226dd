//! Aperture (beam-screen) table.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::table::{check_column, pick, LongitudinalTable};

/// Beam-screen geometry per element, in the local transverse frame.
///
/// Rows whose `aperture_mask` is false carry no usable geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApertureTable {
    /// Element name.
    pub name: Vec<String>,
    /// Arc length (m).
    pub s: Vec<f64>,
    /// True where the row has a defined beam screen.
    pub aperture_mask: Vec<bool>,
    /// Horizontal polygon coordinates (m), one list per row.
    #[serde(default)]
    pub polygon_x_discrete: Vec<Vec<f64>>,
    /// Vertical polygon coordinates (m), one list per row.
    #[serde(default)]
    pub polygon_y_discrete: Vec<Vec<f64>>,
    /// Lower horizontal extent (m).
    #[serde(default)]
    pub x_aper_low: Vec<f64>,
    /// Upper horizontal extent (m).
    #[serde(default)]
    pub x_aper_high: Vec<f64>,
    /// Lower vertical extent (m).
    #[serde(default)]
    pub y_aper_low: Vec<f64>,
    /// Upper vertical extent (m).
    #[serde(default)]
    pub y_aper_high: Vec<f64>,
}

/// Rectangular extent of one aperture row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApertureExtent {
    /// Lower horizontal extent.
    pub x_min: f64,
    /// Upper horizontal extent.
    pub x_max: f64,
    /// Lower vertical extent.
    pub y_min: f64,
    /// Upper vertical extent.
    pub y_max: f64,
}

impl ApertureTable {
    /// Decode a table from JSON and check its shape.
    pub fn from_json(json: &str) -> Result<Self> {
        let table: Self = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Check column lengths.
    ///
    /// The polygon and extent column groups are optional, but a group that
    /// is present must cover every row.
    pub fn validate(&self) -> Result<()> {
        let n = self.s.len();
        check_column("name", &self.name, n)?;
        check_column("aperture_mask", &self.aperture_mask, n)?;
        if !self.polygon_x_discrete.is_empty() || !self.polygon_y_discrete.is_empty() {
            self.check_polygons()?;
        }
        if !self.x_aper_low.is_empty()
            || !self.x_aper_high.is_empty()
            || !self.y_aper_low.is_empty()
            || !self.y_aper_high.is_empty()
        {
            self.check_extents()?;
        }
        Ok(())
    }

    /// Check that the polygon columns cover every row.
    pub fn check_polygons(&self) -> Result<()> {
        let n = self.s.len();
        check_column("polygon_x_discrete", &self.polygon_x_discrete, n)?;
        check_column("polygon_y_discrete", &self.polygon_y_discrete, n)
    }

    /// Check that the extent columns cover every row.
    pub fn check_extents(&self) -> Result<()> {
        let n = self.s.len();
        check_column("x_aper_low", &self.x_aper_low, n)?;
        check_column("x_aper_high", &self.x_aper_high, n)?;
        check_column("y_aper_low", &self.y_aper_low, n)?;
        check_column("y_aper_high", &self.y_aper_high, n)
    }

    /// Indices of rows with a defined beam screen, in order.
    pub fn valid_indices(&self) -> Vec<usize> {
        self.aperture_mask
            .iter()
            .enumerate()
            .filter(|&(_, &valid)| valid)
            .map(|(i, _)| i)
            .collect()
    }

    /// Polygon `(xs, ys)` of row `i`.
    pub fn polygon(&self, i: usize) -> (&[f64], &[f64]) {
        (&self.polygon_x_discrete[i], &self.polygon_y_discrete[i])
    }

    /// Rectangular extent of row `i`.
    pub fn extent(&self, i: usize) -> ApertureExtent {
        ApertureExtent {
            x_min: self.x_aper_low[i],
            x_max: self.x_aper_high[i],
            y_min: self.y_aper_low[i],
            y_max: self.y_aper_high[i],
        }
    }
}

impl LongitudinalTable for ApertureTable {
    fn names(&self) -> &[String] {
        &self.name
    }

    fn s(&self) -> &[f64] {
        &self.s
    }

    fn take_rows(&self, indices: &[usize]) -> Self {
        Self {
            name: pick(&self.name, indices),
            s: pick(&self.s, indices),
            aperture_mask: pick(&self.aperture_mask, indices),
            polygon_x_discrete: pick_present(&self.polygon_x_discrete, indices),
            polygon_y_discrete: pick_present(&self.polygon_y_discrete, indices),
            x_aper_low: pick_present(&self.x_aper_low, indices),
            x_aper_high: pick_present(&self.x_aper_high, indices),
            y_aper_low: pick_present(&self.y_aper_low, indices),
            y_aper_high: pick_present(&self.y_aper_high, indices),
        }
    }
}

// Optional column groups stay empty when absent.
fn pick_present<T: Clone>(column: &[T], indices: &[usize]) -> Vec<T> {
    if column.is_empty() {
        Vec::new()
    } else {
        pick(column, indices)
    }
}
