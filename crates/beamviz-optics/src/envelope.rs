//! Sigma envelope of the beam along the beamline.
//!
//! The transverse half-width at each row is
//!
//! ```text
//! sig = n_sigmas * sqrt(nemitt / gamma0 * beta) + |D| * sigma_delta
//! ```
//!
//! i.e. a betatron term scaled to the requested number of sigmas plus a
//! dispersive contribution from the momentum spread.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::survey::{SurveyFrame, SurveyTable};
use crate::twiss::TwissTable;

/// Beam quality and envelope width settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamParameters {
    /// Normalized horizontal emittance (m rad).
    pub nemitt_x: f64,
    /// Normalized vertical emittance (m rad).
    pub nemitt_y: f64,
    /// Envelope width in units of beam sigma.
    pub n_sigmas: f64,
    /// Relative momentum spread.
    pub sigma_delta: f64,
    /// Clamp half-widths to this value when set (m).
    pub clip_half_width: Option<f64>,
}

impl Default for BeamParameters {
    fn default() -> Self {
        Self {
            nemitt_x: 2.5e-6,
            nemitt_y: 2.5e-6,
            n_sigmas: 3.0,
            sigma_delta: 8e-4,
            clip_half_width: None,
        }
    }
}

impl BeamParameters {
    /// Half-width for one plane at one row.
    pub fn half_width(&self, nemitt: f64, gamma0: f64, beta: f64, dispersion: f64) -> f64 {
        self.n_sigmas * (nemitt / gamma0 * beta).sqrt() + dispersion.abs() * self.sigma_delta
    }

    /// Horizontal and vertical half-widths for every row of `twiss`.
    ///
    /// Fails on negative beta functions.
    pub fn beam_sizes(&self, twiss: &TwissTable) -> Result<(Vec<f64>, Vec<f64>)> {
        twiss.validate()?;
        twiss.check_betas()?;
        let n = twiss.s.len();
        let mut sigx: Vec<f64> = (0..n)
            .map(|i| self.half_width(self.nemitt_x, twiss.gamma0[i], twiss.betx[i], twiss.dx[i]))
            .collect();
        let mut sigy: Vec<f64> = (0..n)
            .map(|i| self.half_width(self.nemitt_y, twiss.gamma0[i], twiss.bety[i], twiss.dy[i]))
            .collect();
        if let Some(max) = self.clip_half_width {
            sigx = clip(&sigx, max);
            sigy = clip(&sigy, max);
        }
        Ok((sigx, sigy))
    }
}

/// Clamp every value to `[-max_val, max_val]`.
pub fn clip(values: &[f64], max_val: f64) -> Vec<f64> {
    values.iter().map(|v| v.max(-max_val).min(max_val)).collect()
}

/// Shortest of several per-row sequence lengths.
///
/// Optics and survey selections made with the same `s` window can differ
/// by a row at the boundaries; callers truncate to this length.
pub fn common_length(lengths: &[(&str, usize)]) -> usize {
    let n = lengths.iter().map(|&(_, len)| len).min().unwrap_or(0);
    for &(what, len) in lengths {
        if len != n {
            log::warn!("truncating {what} from {len} to {n} rows");
        }
    }
    n
}

/// Per-row envelope of one beam paired with its survey frames.
///
/// All columns have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeamEnvelope {
    /// Arc length (m).
    pub s: Vec<f64>,
    /// Horizontal closed orbit (m).
    pub x: Vec<f64>,
    /// Vertical closed orbit (m).
    pub y: Vec<f64>,
    /// Horizontal half-width (m).
    pub sigx: Vec<f64>,
    /// Vertical half-width (m).
    pub sigy: Vec<f64>,
    /// Reference frame at each row.
    pub frames: Vec<SurveyFrame>,
}

impl BeamEnvelope {
    /// Size the beam and align it with the survey.
    pub fn compute(twiss: &TwissTable, survey: &SurveyTable, params: &BeamParameters) -> Result<Self> {
        survey.validate()?;
        let (sigx, sigy) = params.beam_sizes(twiss)?;
        let n = common_length(&[("twiss", twiss.s.len()), ("survey", survey.s.len())]);
        log::debug!("beam envelope over {n} rows");
        Ok(Self {
            s: twiss.s[..n].to_vec(),
            x: twiss.x[..n].to_vec(),
            y: twiss.y[..n].to_vec(),
            sigx: sigx[..n].to_vec(),
            sigy: sigy[..n].to_vec(),
            frames: (0..n).map(|i| survey.frame(i)).collect(),
        })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.s.len()
    }

    /// True if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.s.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OpticsError;
    use approx::assert_relative_eq;

    fn twiss(n: usize) -> TwissTable {
        TwissTable {
            name: (0..n).map(|i| format!("e{i}")).collect(),
            s: (0..n).map(|i| i as f64).collect(),
            x: vec![1e-3; n],
            y: vec![-1e-3; n],
            betx: (0..n).map(|i| 0.3 + i as f64).collect(),
            bety: (0..n).map(|i| 0.3 + 2.0 * i as f64).collect(),
            dx: vec![-0.5; n],
            dy: vec![0.0; n],
            gamma0: vec![7247.0; n],
        }
    }

    fn survey(n: usize) -> SurveyTable {
        SurveyTable {
            name: (0..n).map(|i| format!("e{i}")).collect(),
            s: (0..n).map(|i| i as f64).collect(),
            x: vec![0.0; n],
            y: vec![0.0; n],
            z: (0..n).map(|i| i as f64).collect(),
            theta: vec![0.0; n],
        }
    }

    #[test]
    fn test_half_width_formula() {
        let p = BeamParameters::default();
        let sig = p.half_width(2.5e-6, 7247.0, 100.0, -2.0);
        let expected = 3.0 * (2.5e-6_f64 / 7247.0 * 100.0).sqrt() + 2.0 * 8e-4;
        assert_relative_eq!(sig, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_sizes_non_negative() {
        let (sigx, sigy) = BeamParameters::default().beam_sizes(&twiss(50)).unwrap();
        assert!(sigx.iter().chain(sigy.iter()).all(|&s| s >= 0.0));
    }

    #[test]
    fn test_zero_beta_zero_dispersion() {
        let mut t = twiss(1);
        t.betx[0] = 0.0;
        t.dx[0] = 0.0;
        let (sigx, _) = BeamParameters::default().beam_sizes(&t).unwrap();
        assert_eq!(sigx[0], 0.0);
    }

    #[test]
    fn test_negative_beta_rejected() {
        let mut t = twiss(3);
        t.betx[1] = -0.1;
        let err = BeamParameters::default().beam_sizes(&t).unwrap_err();
        assert!(matches!(err, OpticsError::NegativeBeta { index: 1, plane: 'x', .. }));
    }

    #[test]
    fn test_short_survey_rejected() {
        let mut sv = survey(5);
        sv.z.pop();
        let err = BeamEnvelope::compute(&twiss(5), &sv, &BeamParameters::default()).unwrap_err();
        assert!(matches!(
            err,
            OpticsError::ColumnLengthMismatch {
                column: "Z",
                expected: 5,
                found: 4
            }
        ));
    }

    #[test]
    fn test_clip() {
        assert_eq!(clip(&[-3.0, 0.5, 2.0], 1.0), vec![-1.0, 0.5, 1.0]);
    }

    #[test]
    fn test_clip_half_width() {
        let params = BeamParameters {
            clip_half_width: Some(1e-4),
            ..Default::default()
        };
        let (sigx, _) = params.beam_sizes(&twiss(5)).unwrap();
        assert!(sigx.iter().all(|&s| s <= 1e-4));
    }

    #[test]
    fn test_length_alignment_truncates() {
        let env = BeamEnvelope::compute(&twiss(100), &survey(99), &BeamParameters::default()).unwrap();
        assert_eq!(env.len(), 99);
        assert_eq!(env.sigx.len(), 99);
        assert_eq!(env.sigy.len(), 99);
        assert_eq!(env.x.len(), 99);
        assert_eq!(env.frames.len(), 99);
    }

    #[test]
    fn test_survey_longer_than_twiss() {
        let env = BeamEnvelope::compute(&twiss(10), &survey(11), &BeamParameters::default()).unwrap();
        assert_eq!(env.len(), 10);
        assert_eq!(env.frames[9].s, 9.0);
    }

    #[test]
    fn test_common_length_empty() {
        assert_eq!(common_length(&[]), 0);
        assert_eq!(common_length(&[("a", 4), ("b", 4)]), 4);
    }
}
