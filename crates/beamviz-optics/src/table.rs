//! Row selection shared by all longitudinal tables.
//!
//! Optics, survey and aperture tables are column stores keyed by element
//! name and arc length `s`. Selections keep the rows in table order.

use beamviz_math::Tolerance;

use crate::error::{OpticsError, Result};

/// A table whose rows are ordered along the beamline.
pub trait LongitudinalTable: Sized {
    /// Element name of every row.
    fn names(&self) -> &[String];

    /// Arc-length coordinate of every row.
    fn s(&self) -> &[f64];

    /// Build a new table from the rows at `indices`, in that order.
    fn take_rows(&self, indices: &[usize]) -> Self;

    /// Number of rows.
    fn len(&self) -> usize {
        self.s().len()
    }

    /// True if the table has no rows.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the first row named exactly `name`.
    fn index_of(&self, name: &str) -> Result<usize> {
        self.names()
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| OpticsError::NotFound(name.to_string()))
    }

    /// Longitudinal position of the element `name`.
    fn s_of(&self, name: &str) -> Result<f64> {
        let idx = self.index_of(name)?;
        Ok(self.s()[idx])
    }

    /// Interval `[s - length/2, s + length/2]` centred on the element `name`.
    fn window_around(&self, name: &str, length: f64) -> Result<(f64, f64)> {
        let s = self.s_of(name)?;
        Ok((s - length / 2.0, s + length / 2.0))
    }

    /// Rows with `s_start <= s <= s_end`.
    fn rows_in_s(&self, s_start: f64, s_end: f64) -> Self {
        let tol = Tolerance::DEFAULT;
        let indices: Vec<usize> = self
            .s()
            .iter()
            .enumerate()
            .filter(|&(_, &s)| tol.within(s, s_start, s_end))
            .map(|(i, _)| i)
            .collect();
        log::debug!(
            "selected {} of {} rows in s = [{s_start}, {s_end}]",
            indices.len(),
            self.len()
        );
        self.take_rows(&indices)
    }

    /// Rows from `name_from` through `name_until`, both inclusive.
    fn rows_between(&self, name_from: &str, name_until: &str) -> Result<Self> {
        let start = self.index_of(name_from)?;
        let end = self.index_of(name_until)?;
        if end < start {
            return Err(OpticsError::EmptySelection {
                from: name_from.to_string(),
                until: name_until.to_string(),
            });
        }
        let indices: Vec<usize> = (start..=end).collect();
        Ok(self.take_rows(&indices))
    }
}

/// Gather `column[i]` for every index.
pub(crate) fn pick<T: Clone>(column: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&i| column[i].clone()).collect()
}

/// Check a column has `expected` rows.
pub(crate) fn check_column<T>(column: &'static str, values: &[T], expected: usize) -> Result<()> {
    if values.len() != expected {
        return Err(OpticsError::ColumnLengthMismatch {
            column,
            expected,
            found: values.len(),
        });
    }
    Ok(())
}

/// Arc length measured from the other end, for a reversed traversal.
///
/// The result is non-decreasing when `s` is.
pub(crate) fn reversed_s(s: &[f64]) -> Vec<f64> {
    let total = s.last().copied().unwrap_or(0.0);
    s.iter().rev().map(|&v| total - v).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Strip {
        names: Vec<String>,
        s: Vec<f64>,
    }

    impl LongitudinalTable for Strip {
        fn names(&self) -> &[String] {
            &self.names
        }

        fn s(&self) -> &[f64] {
            &self.s
        }

        fn take_rows(&self, indices: &[usize]) -> Self {
            Self {
                names: pick(&self.names, indices),
                s: pick(&self.s, indices),
            }
        }
    }

    fn strip() -> Strip {
        Strip {
            names: ["a", "b", "ip5", "c", "d"].iter().map(|n| n.to_string()).collect(),
            s: vec![0.0, 1.0, 2.0, 3.0, 4.0],
        }
    }

    #[test]
    fn test_s_of() {
        assert_eq!(strip().s_of("ip5").unwrap(), 2.0);
    }

    #[test]
    fn test_missing_name() {
        let err = strip().s_of("ip1").unwrap_err();
        assert!(matches!(err, OpticsError::NotFound(ref n) if n == "ip1"));
    }

    #[test]
    fn test_rows_in_s_inclusive() {
        let t = strip().rows_in_s(1.0, 3.0);
        assert_eq!(t.names, vec!["b", "ip5", "c"]);
    }

    #[test]
    fn test_window_around() {
        let (lo, hi) = strip().window_around("ip5", 2.0).unwrap();
        assert_eq!((lo, hi), (1.0, 3.0));
        assert_eq!(strip().rows_in_s(lo, hi).len(), 3);
    }

    #[test]
    fn test_rows_between() {
        let t = strip().rows_between("b", "c").unwrap();
        assert_eq!(t.s, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_rows_between_missing_end() {
        assert!(matches!(
            strip().rows_between("b", "zz"),
            Err(OpticsError::NotFound(_))
        ));
    }

    #[test]
    fn test_rows_between_backwards() {
        assert!(matches!(
            strip().rows_between("c", "a"),
            Err(OpticsError::EmptySelection { .. })
        ));
    }

    #[test]
    fn test_reversed_s() {
        assert_eq!(reversed_s(&[0.0, 1.0, 4.0]), vec![0.0, 3.0, 4.0]);
        assert!(reversed_s(&[]).is_empty());
    }
}
