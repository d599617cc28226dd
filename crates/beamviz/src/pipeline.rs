//! From tables to renderable items.
//!
//! Beam envelopes are selected by an `s` window around an element, apertures
//! by an element name range. In both cases every surviving row becomes one
//! cross-section placed at its survey frame, and the sections are stitched
//! into a single ruled surface.

use beamviz_mesh::{
    ellipse, orbit_centerline, rectangular_screen, ruled_surface, screen_polygon, CenterlineCurve,
    MeshError, SliceFrame,
};
use beamviz_optics::{
    aperture_window, common_length, cut_around, ApertureOption, ApertureTable, BeamEnvelope,
    BeamlineModel, LongitudinalTable, SurveyFrame, SurveyTable, TwissTable,
};

use crate::config::VisualizationConfig;
use crate::error::Result;
use crate::scene::{RenderItem, Scene};
use crate::style::{BeamStyle, MeshStyle};

/// Direction in which a beam traverses its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Same order as the survey.
    #[default]
    Forward,
    /// Counter-rotating: tables are reversed after computation.
    Reverse,
}

/// Optics and survey of one beam.
#[derive(Debug, Clone, PartialEq)]
pub struct BeamTables {
    /// Optics rows.
    pub twiss: TwissTable,
    /// Survey rows, in the same traversal order as `twiss`.
    pub survey: SurveyTable,
}

impl BeamTables {
    /// Slice `model` around the configured element and read its tables.
    pub fn from_model<M: BeamlineModel>(
        model: &mut M,
        config: &VisualizationConfig,
        direction: Direction,
    ) -> Result<Self> {
        cut_around(
            model,
            &config.element_around,
            config.section_length,
            config.cut_resolution,
            config.cut_tolerance,
        )?;
        let twiss = model.twiss()?;
        let survey = model.survey()?;
        twiss.validate()?;
        survey.validate()?;
        Ok(match direction {
            Direction::Forward => Self { twiss, survey },
            Direction::Reverse => Self {
                twiss: twiss.reverse(),
                survey: survey.reverse(),
            },
        })
    }
}

/// Aperture rows of a named element range and the survey they are placed on.
#[derive(Debug, Clone, PartialEq)]
pub struct ApertureSection {
    /// Aperture table.
    pub table: ApertureTable,
    /// Survey of the line the apertures belong to.
    pub survey: SurveyTable,
    /// First element of the range.
    pub name_from: String,
    /// Last element of the range.
    pub name_until: String,
}

impl ApertureSection {
    /// Aperture of the configured window around the configured element.
    pub fn from_model<M: BeamlineModel>(
        model: &M,
        config: &VisualizationConfig,
        option: ApertureOption,
    ) -> Result<Self> {
        let survey = model.survey()?;
        survey.validate()?;
        let (name_from, name_until) =
            aperture_window(&survey, &config.element_around, config.section_length)?;
        let table = model.select(&name_from, &name_until)?.aperture_table(option)?;
        table.validate()?;
        Ok(Self {
            table,
            survey,
            name_from,
            name_until,
        })
    }
}

/// Slice frame for a survey frame, in display coordinates.
pub fn slice_frame(frame: &SurveyFrame) -> SliceFrame {
    SliceFrame::new(frame.world_position(), frame.theta)
}

/// Envelope surface and closed-orbit curve of one beam.
///
/// Rows within `section_length` around `element_around` are taken from both
/// tables; any length difference between them is truncated away. Sizes and
/// orbit offsets are multiplied by `scale`, positions are not.
pub fn beam_envelope_items(
    label: &str,
    twiss: &TwissTable,
    survey: &SurveyTable,
    style: &BeamStyle,
    config: &VisualizationConfig,
) -> Result<Vec<RenderItem>> {
    twiss.validate()?;
    survey.validate()?;
    let (s_start, s_end) = twiss.window_around(&config.element_around, config.section_length)?;
    let twiss = twiss.rows_in_s(s_start, s_end);
    let survey = survey.rows_in_s(s_start, s_end);
    let env = BeamEnvelope::compute(&twiss, &survey, &config.beam)?;

    let scale = config.scale;
    let frames: Vec<SliceFrame> = env.frames.iter().map(slice_frame).collect();
    let sections = frames
        .iter()
        .enumerate()
        .map(|(i, frame)| {
            ellipse(
                env.sigx[i] * scale,
                env.sigy[i] * scale,
                env.x[i] * scale,
                env.y[i] * scale,
                frame,
                config.ellipse_resolution,
            )
        })
        .collect::<std::result::Result<Vec<_>, MeshError>>()?;
    let mesh = ruled_surface(&sections, true)?;

    let control = orbit_centerline(&frames, &env.x, &env.y, scale);
    let points = CenterlineCurve::new(control).sample(config.centerline_samples);

    log::debug!(
        "{label}: {} slices, {} faces, {} centerline points",
        env.len(),
        mesh.num_faces(),
        points.len()
    );
    Ok(vec![
        RenderItem::Surface {
            label: format!("{label} envelope"),
            mesh,
            style: style.envelope,
        },
        RenderItem::Curve {
            label: format!("{label} orbit"),
            points,
            style: style.orbit,
        },
    ])
}

/// Rows `name_from..=name_until` of both tables, cut to a common length.
fn select_aperture_rows(
    aperture: &ApertureTable,
    survey: &SurveyTable,
    name_from: &str,
    name_until: &str,
) -> Result<(ApertureTable, SurveyTable, usize)> {
    aperture.validate()?;
    survey.validate()?;
    let aperture = aperture.rows_between(name_from, name_until)?;
    let survey = survey.rows_between(name_from, name_until)?;
    let n = common_length(&[("aperture", aperture.len()), ("survey", survey.len())]);
    Ok((aperture, survey, n))
}

/// Beam-screen surface from the discrete polygons of each valid row.
///
/// Rows whose aperture mask is false are dropped, not replaced. Polygon
/// coordinates are multiplied by `scale`.
pub fn aperture_item(
    aperture: &ApertureTable,
    survey: &SurveyTable,
    name_from: &str,
    name_until: &str,
    close: bool,
    style: &MeshStyle,
    scale: f64,
) -> Result<RenderItem> {
    let (aperture, survey, n) = select_aperture_rows(aperture, survey, name_from, name_until)?;
    aperture.check_polygons()?;

    let valid: Vec<usize> = aperture
        .valid_indices()
        .into_iter()
        .filter(|&i| i < n)
        .collect();
    if valid.len() < n {
        log::warn!(
            "skipping {} of {n} aperture rows without a beam screen",
            n - valid.len()
        );
    }

    let sections = valid
        .iter()
        .map(|&i| {
            let (xs, ys) = aperture.polygon(i);
            let xs: Vec<f64> = xs.iter().map(|v| v * scale).collect();
            let ys: Vec<f64> = ys.iter().map(|v| v * scale).collect();
            screen_polygon(&xs, &ys, &slice_frame(&survey.frame(i)))
        })
        .collect::<std::result::Result<Vec<_>, MeshError>>()?;
    let mesh = ruled_surface(&sections, close)?;

    log::debug!(
        "aperture {name_from}..{name_until}: {} sections, {} faces",
        sections.len(),
        mesh.num_faces()
    );
    Ok(RenderItem::Surface {
        label: format!("aperture {name_from}..{name_until}"),
        mesh,
        style: *style,
    })
}

/// Beam-screen surface from the rectangular extents of every row.
///
/// With `close == false` the outer side of each rectangle collapses onto
/// the axis and the strip is left open there.
pub fn rectangular_aperture_item(
    aperture: &ApertureTable,
    survey: &SurveyTable,
    name_from: &str,
    name_until: &str,
    close: bool,
    style: &MeshStyle,
    scale: f64,
) -> Result<RenderItem> {
    let (aperture, survey, n) = select_aperture_rows(aperture, survey, name_from, name_until)?;
    aperture.check_extents()?;

    let sections: Vec<_> = (0..n)
        .map(|i| {
            let e = aperture.extent(i);
            rectangular_screen(
                e.x_min * scale,
                e.x_max * scale,
                e.y_min * scale,
                e.y_max * scale,
                &slice_frame(&survey.frame(i)),
                close,
            )
        })
        .collect();
    let mesh = ruled_surface(&sections, close)?;

    log::debug!(
        "rectangular aperture {name_from}..{name_until}: {} faces",
        mesh.num_faces()
    );
    Ok(RenderItem::Surface {
        label: format!("rectangular aperture {name_from}..{name_until}"),
        mesh,
        style: *style,
    })
}

/// Both beam envelopes and, if given, the polygonal aperture around them.
pub fn two_beam_scene(
    beam1: &BeamTables,
    beam2: &BeamTables,
    aperture: Option<&ApertureSection>,
    config: &VisualizationConfig,
) -> Result<Scene> {
    config.validate()?;
    let mut scene = Scene::new(config);
    scene.extend(beam_envelope_items(
        "beam1",
        &beam1.twiss,
        &beam1.survey,
        &config.beam1,
        config,
    )?);
    scene.extend(beam_envelope_items(
        "beam2",
        &beam2.twiss,
        &beam2.survey,
        &config.beam2,
        config,
    )?);
    if let Some(section) = aperture {
        scene.extend([aperture_item(
            &section.table,
            &section.survey,
            &section.name_from,
            &section.name_until,
            true,
            &config.aperture,
            config.scale,
        )?]);
    }
    log::debug!("scene assembled with {} items", scene.items.len());
    Ok(scene)
}
