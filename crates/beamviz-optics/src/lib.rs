#![warn(missing_docs)]

//! Optics, survey and aperture tables for beamviz.
//!
//! The tables are produced by an external accelerator-physics engine; this
//! crate only describes their shape, selects sub-ranges of rows, and turns
//! optics into a sigma envelope aligned with the survey frames.
//!
//! # Example
//!
//! ```ignore
//! use beamviz_optics::{BeamEnvelope, BeamParameters, LongitudinalTable, TwissTable, SurveyTable};
//!
//! let twiss = TwissTable::from_json(&twiss_json)?;
//! let survey = SurveyTable::from_json(&survey_json)?;
//! let (s0, s1) = twiss.window_around("ip5", 135.0)?;
//! let env = BeamEnvelope::compute(
//!     &twiss.rows_in_s(s0, s1),
//!     &survey.rows_in_s(s0, s1),
//!     &BeamParameters::default(),
//! )?;
//! ```

pub mod aperture;
pub mod beamline;
pub mod envelope;
pub mod error;
pub mod survey;
pub mod table;
pub mod twiss;

pub use aperture::{ApertureExtent, ApertureTable};
pub use beamline::{aperture_window, cut_around, linspace, ApertureOption, BeamlineModel};
pub use envelope::{clip, common_length, BeamEnvelope, BeamParameters};
pub use error::{OpticsError, Result};
pub use survey::{SurveyFrame, SurveyTable};
pub use table::LongitudinalTable;
pub use twiss::TwissTable;
