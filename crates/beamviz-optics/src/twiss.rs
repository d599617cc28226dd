//! Linear optics (Twiss) table.

use serde::{Deserialize, Serialize};

use crate::error::{OpticsError, Result};
use crate::table::{check_column, pick, reversed_s, LongitudinalTable};

/// Per-position optics of one beam, as handed over by the optics engine.
///
/// Every column has one entry per row; rows are ordered by `s`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TwissTable {
    /// Element name.
    pub name: Vec<String>,
    /// Arc length (m).
    pub s: Vec<f64>,
    /// Horizontal closed-orbit offset (m).
    pub x: Vec<f64>,
    /// Vertical closed-orbit offset (m).
    pub y: Vec<f64>,
    /// Horizontal betatron function (m).
    pub betx: Vec<f64>,
    /// Vertical betatron function (m).
    pub bety: Vec<f64>,
    /// Horizontal dispersion (m).
    pub dx: Vec<f64>,
    /// Vertical dispersion (m).
    pub dy: Vec<f64>,
    /// Relativistic gamma of the reference particle.
    pub gamma0: Vec<f64>,
}

impl TwissTable {
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
        check_column("x", &self.x, n)?;
        check_column("y", &self.y, n)?;
        check_column("betx", &self.betx, n)?;
        check_column("bety", &self.bety, n)?;
        check_column("dx", &self.dx, n)?;
        check_column("dy", &self.dy, n)?;
        check_column("gamma0", &self.gamma0, n)?;
        Ok(())
    }

    /// Check that both betatron functions are non-negative on every row.
    pub fn check_betas(&self) -> Result<()> {
        for (plane, column) in [('x', &self.betx), ('y', &self.bety)] {
            if let Some((index, &value)) = column.iter().enumerate().find(|(_, b)| !(**b >= 0.0)) {
                return Err(OpticsError::NegativeBeta {
                    index,
                    plane,
                    value,
                });
            }
        }
        Ok(())
    }

    /// The same rows traversed in the opposite direction.
    pub fn reverse(&self) -> Self {
        let indices: Vec<usize> = (0..self.len()).rev().collect();
        Self {
            s: reversed_s(&self.s),
            ..self.take_rows(&indices)
        }
    }
}

impl LongitudinalTable for TwissTable {
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
            betx: pick(&self.betx, indices),
            bety: pick(&self.bety, indices),
            dx: pick(&self.dx, indices),
            dy: pick(&self.dy, indices),
            gamma0: pick(&self.gamma0, indices),
        }
    }
}
