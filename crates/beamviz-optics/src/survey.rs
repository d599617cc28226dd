//! Survey table: 3D placement of the reference frame along the beamline.

use beamviz_math::Point3;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::table::{check_column, pick, reversed_s, LongitudinalTable};

/// Per-position placement of the reference frame.
///
/// `X`, `Y`, `Z` use the survey convention: `Y` is vertical and the ring
/// lies in the `X`-`Z` plane. `theta` is the bend angle about `Y`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveyTable {
    /// Element name.
    pub name: Vec<String>,
    /// Arc length (m).
    pub s: Vec<f64>,
    /// World `X` (m).
    #[serde(rename = "X")]
    pub x: Vec<f64>,
    /// World `Y`, vertical (m).
    #[serde(rename = "Y")]
    pub y: Vec<f64>,
    /// World `Z` (m).
    #[serde(rename = "Z")]
    pub z: Vec<f64>,
    /// Bend angle of the frame (rad).
    pub theta: Vec<f64>,
}

/// The reference frame at one row of a [`SurveyTable`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurveyFrame {
    /// Arc length (m).
    pub s: f64,
    /// Survey position `(X, Y, Z)`.
    pub position: Point3,
    /// Bend angle (rad).
    pub theta: f64,
}

impl SurveyFrame {
    /// Position in the display frame, `(X, Z, Y)`.
    ///
    /// The vertical survey axis becomes the third coordinate so that the
    /// bend rotation is a rotation about the third axis.
    pub fn world_position(&self) -> Point3 {
        Point3::new(self.position.x, self.position.z, self.position.y)
    }
}

impl SurveyTable {
    /// Decode a table from JSON and check its shape.
    pub fn from_json(json: &str) -> Result<Self> {
        let table: Self = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Check that every column has as many rows as `s`.
    pub fn validate(&self) -> Result<()> {
        let n = self.s.len();
        check_column("name", &self.name, n)?;
        check_column("X", &self.x, n)?;
        check_column("Y", &self.y, n)?;
        check_column("Z", &self.z, n)?;
        check_column("theta", &self.theta, n)?;
        Ok(())
    }

    /// Frame at row `i`.
    pub fn frame(&self, i: usize) -> SurveyFrame {
        SurveyFrame {
            s: self.s[i],
            position: Point3::new(self.x[i], self.y[i], self.z[i]),
            theta: self.theta[i],
        }
    }

    /// All frames, in row order.
    pub fn frames(&self) -> Vec<SurveyFrame> {
        (0..self.len()).map(|i| self.frame(i)).collect()
    }

    /// The mirrored traversal used for the counter-rotating beam.
    ///
    /// Rows are reversed and `s` is re-measured from the new start; the
    /// frames themselves stay where they are.
    pub fn reverse(&self) -> Self {
        let indices: Vec<usize> = (0..self.len()).rev().collect();
        Self {
            s: reversed_s(&self.s),
            ..self.take_rows(&indices)
        }
    }
}

impl LongitudinalTable for SurveyTable {
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
            x: pick(&self.x, indices),
            y: pick(&self.y, indices),
            z: pick(&self.z, indices),
            theta: pick(&self.theta, indices),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SurveyTable {
        SurveyTable {
            name: vec!["a".into(), "b".into(), "c".into()],
            s: vec![0.0, 1.0, 3.0],
            x: vec![0.0, 0.0, 0.1],
            y: vec![0.5, 0.5, 0.5],
            z: vec![0.0, 1.0, 3.0],
            theta: vec![0.0, 0.0, 0.01],
        }
    }

    #[test]
    fn test_json_uses_survey_column_names() {
        let json = r#"{"name":["a"],"s":[0.0],"X":[1.0],"Y":[2.0],"Z":[3.0],"theta":[0.5]}"#;
        let t = SurveyTable::from_json(json).unwrap();
        assert_eq!(t.frame(0).position, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_world_position_swaps_vertical() {
        let f = sample().frame(2);
        assert_eq!(f.world_position(), Point3::new(0.1, 3.0, 0.5));
    }

    #[test]
    fn test_reverse() {
        let r = sample().reverse();
        assert_eq!(r.name, vec!["c", "b", "a"]);
        assert_eq!(r.s, vec![0.0, 2.0, 3.0]);
        assert_eq!(r.theta[0], 0.01);
        assert_eq!(r.frames().len(), 3);
    }

    #[test]
    fn test_reverse_twice_restores_order() {
        let t = sample();
        assert_eq!(t.reverse().reverse(), t);
    }
}
