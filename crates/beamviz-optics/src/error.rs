//! Error types for table access and envelope sizing.

use thiserror::Error;

/// Errors that can occur while selecting rows or sizing the beam.
#[derive(Error, Debug)]
pub enum OpticsError {
    /// A named element is absent from the table.
    #[error("element not found: {0}")]
    NotFound(String),

    /// A name range resolved to no rows.
    #[error("empty selection from {from} until {until}")]
    EmptySelection {
        /// First element of the range.
        from: String,
        /// Last element of the range.
        until: String,
    },

    /// A betatron function is negative (or not a number).
    #[error("negative bet{plane} at row {index}: {value}")]
    NegativeBeta {
        /// Row index in the optics table.
        index: usize,
        /// Transverse plane, `'x'` or `'y'`.
        plane: char,
        /// Offending value.
        value: f64,
    },

    /// A column does not have as many rows as the `s` column.
    #[error("column {column} has {found} rows, expected {expected}")]
    ColumnLengthMismatch {
        /// Column name.
        column: &'static str,
        /// Row count of the `s` column.
        expected: usize,
        /// Row count of the offending column.
        found: usize,
    },

    /// A table could not be decoded.
    #[error("invalid table json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for optics operations.
pub type Result<T> = std::result::Result<T, OpticsError>;
