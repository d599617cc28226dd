//! Contract for the lattice model owned by the external physics engine.
//!
//! beamviz never builds or tracks a lattice itself. It only asks a model
//! to cut itself finer around a point of interest, to compute its tables,
//! and to hand out a sub-range for aperture extraction.

use crate::aperture::ApertureTable;
use crate::error::{OpticsError, Result};
use crate::survey::SurveyTable;
use crate::table::LongitudinalTable;
use crate::twiss::TwissTable;

/// Which representation of the beam screen to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApertureOption {
    /// Discrete polygon per element.
    #[default]
    Poly,
    /// Rectangular extents per element.
    Extent,
}

/// A beamline as exposed by the physics engine.
pub trait BeamlineModel: Sized {
    /// Longitudinal position of the element `name`.
    fn element_s(&self, name: &str) -> Result<f64>;

    /// Insert cut points at the given positions (each within `s_tol`).
    fn cut_at_s(&mut self, cuts: &[f64], s_tol: f64);

    /// The sub-line from `name_from` through `name_until`.
    fn select(&self, name_from: &str, name_until: &str) -> Result<Self>;

    /// Optics of the line.
    fn twiss(&self) -> Result<TwissTable>;

    /// Survey of the line.
    fn survey(&self) -> Result<SurveyTable>;

    /// Beam-screen table of the line.
    fn aperture_table(&self, option: ApertureOption) -> Result<ApertureTable>;
}

/// `n` evenly spaced values from `start` to `end`, both included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + i as f64 * step).collect()
        }
    }
}

/// Slice `model` finely over `length` meters centred on `element`.
///
/// Returns the cut positions that were requested.
pub fn cut_around<M: BeamlineModel>(
    model: &mut M,
    element: &str,
    length: f64,
    resolution: usize,
    s_tol: f64,
) -> Result<Vec<f64>> {
    let s_around = model.element_s(element)?;
    let cuts = linspace(s_around - length / 2.0, s_around + length / 2.0, resolution);
    log::debug!("cutting around {element} at {} positions", cuts.len());
    model.cut_at_s(&cuts, s_tol);
    Ok(cuts)
}

/// First and last element names of the survey rows within `length`
/// meters centred on `element`.
pub fn aperture_window(survey: &SurveyTable, element: &str, length: f64) -> Result<(String, String)> {
    let (s_start, s_end) = survey.window_around(element, length)?;
    let rows = survey.rows_in_s(s_start, s_end);
    match (rows.name.first(), rows.name.last()) {
        (Some(first), Some(last)) => Ok((first.clone(), last.clone())),
        _ => Err(OpticsError::EmptySelection {
            from: format!("s={s_start}"),
            until: format!("s={s_end}"),
        }),
    }
}
