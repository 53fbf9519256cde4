//! Manual outlier correction.
//!
//! Correction is an explicit, caller-identified operation on a single table
//! cell: nothing here scans a column and rewrites values on its own.
//! [`locate_extremes`] reports where the smallest and largest interval of each
//! column sits so a caller can decide which cell to correct.
//!
//! # Example
//!
//! ```
//! use labeled_hrv::dataset::loader::from_str;
//! use labeled_hrv::dataset::table::CollectionTable;
//! use labeled_hrv::preprocessing::outliers::correct_outlier;
//!
//! let ds = from_str(r#"{"c": {"ex1": {"description": "", "data": [10, 20, 999, 40, 50]}}}"#).unwrap();
//! let mut table = CollectionTable::build(&ds, "c", &["ex1"]).unwrap();
//! let replaced = correct_outlier(&mut table, 2, "ex1").unwrap();
//! assert_eq!(replaced, 999.0);
//! assert_eq!(table.column("ex1").unwrap().values, vec![10.0, 20.0, 30.0, 40.0, 50.0]);
//! ```

use log::info;
use serde::Serialize;

use crate::dataset::table::CollectionTable;
use crate::error::{HrvError, Result};

/// Trait for implementing interpolation strategies
#[cfg_attr(test, mockall::automock)]
pub trait Interpolator {
    /// Estimates a replacement for `window[idx]` from the other values of the window.
    ///
    /// # Arguments
    ///
    /// * `window` - The value to replace and its neighbors.
    /// * `idx` - The index with respect to the window of the value to replace.
    fn interpolate(&self, window: &[f64], idx: usize) -> Result<f64>;
}

/// Arithmetic mean of the immediate neighbors.
///
/// ```
/// use labeled_hrv::preprocessing::outliers::{Interpolator, NeighborMean};
///
/// assert_eq!(NeighborMean.interpolate(&[1.0, 2.0, 5.0], 1).unwrap(), 3.0);
/// assert!(NeighborMean.interpolate(&[1.0, 2.0, 5.0], 0).is_err());
/// ```
pub struct NeighborMean;

impl Interpolator for NeighborMean {
    fn interpolate(&self, window: &[f64], idx: usize) -> Result<f64> {
        if idx == 0 || idx + 1 >= window.len() {
            return Err(HrvError::IndexOutOfRange {
                column: "window".to_string(),
                row: idx,
                len: window.len(),
            });
        }
        Ok((window[idx - 1] + window[idx + 1]) / 2.0)
    }
}

/// Enum representing the available interpolation methods.
pub enum InterpolationMethod {
    /// Mean of the preceding and following value
    NeighborMean,
    /// Custom interpolation strategy
    Custom(Box<dyn Interpolator>),
}

impl Interpolator for InterpolationMethod {
    fn interpolate(&self, window: &[f64], idx: usize) -> Result<f64> {
        match self {
            InterpolationMethod::NeighborMean => NeighborMean.interpolate(window, idx),
            InterpolationMethod::Custom(interpolator) => interpolator.interpolate(window, idx),
        }
    }
}

/// Replaces the cell at `row` of column `condition` with the mean of its two
/// neighbors in that column and returns the value it replaced.
///
/// # Errors
///
/// `MissingCondition` if the table has no such column, `IndexOutOfRange` if the
/// row is the first or last of the column, or past its end.
pub fn correct_outlier(table: &mut CollectionTable, row: usize, condition: &str) -> Result<f64> {
    correct_outlier_with(table, row, condition, &InterpolationMethod::NeighborMean)
}

/// Like [`correct_outlier`] with a caller-chosen interpolation strategy.
///
/// The interpolator receives the window `[previous, current, next]` and index 1.
pub fn correct_outlier_with(
    table: &mut CollectionTable,
    row: usize,
    condition: &str,
    interpolator: &dyn Interpolator,
) -> Result<f64> {
    let collection = table.collection().to_string();
    let column = table.column_mut(condition)?;
    let len = column.len();
    if row == 0 || row + 1 >= len {
        return Err(HrvError::IndexOutOfRange {
            column: condition.to_string(),
            row,
            len,
        });
    }

    let replacement = interpolator.interpolate(&column.values[row - 1..=row + 1], 1)?;
    let original = std::mem::replace(&mut column.values[row], replacement);
    info!(
        "{}/{} row {}: replaced {} with {}",
        collection, condition, row, original, replacement
    );
    Ok(original)
}

/// Position and value of the extremes of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnExtremes {
    pub condition: String,
    pub min_row: usize,
    pub min: f64,
    pub max_row: usize,
    pub max: f64,
}

/// The row of the smallest and of the largest value of every non-empty column.
///
/// Ties resolve to the first occurrence.
pub fn locate_extremes(table: &CollectionTable) -> Vec<ColumnExtremes> {
    table
        .columns()
        .iter()
        .filter_map(|column| {
            let mut values = column.values.iter().copied().enumerate();
            let (first_row, first) = values.next()?;
            let (min_row, min, max_row, max) = values.fold(
                (first_row, first, first_row, first),
                |(min_row, min, max_row, max), (row, value)| {
                    let (min_row, min) = if value < min { (row, value) } else { (min_row, min) };
                    let (max_row, max) = if value > max { (row, value) } else { (max_row, max) };
                    (min_row, min, max_row, max)
                },
            );
            Some(ColumnExtremes {
                condition: column.condition.clone(),
                min_row,
                min,
                max_row,
                max,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::loader::from_str;

    fn table() -> CollectionTable {
        let ds = from_str(
            r#"{"collect2": {
                  "pre": {"description": "", "data": [10, 20, 999, 40, 50]},
                  "ex1": {"description": "", "data": [700, 710, 250, 705]}
               }}"#,
        )
        .unwrap();
        CollectionTable::build(&ds, "collect2", &["pre", "ex1"]).unwrap()
    }

    #[test]
    fn test_correct_outlier() {
        let mut table = table();
        assert_eq!(correct_outlier(&mut table, 2, "pre").unwrap(), 999.0);
        assert_eq!(
            table.column("pre").unwrap().values,
            vec![10.0, 20.0, 30.0, 40.0, 50.0]
        );
        // other columns untouched
        assert_eq!(table.cell(2, "ex1").unwrap(), Some(250.0));
    }

    #[test]
    fn test_correct_outlier_edges() {
        let mut table = table();
        for row in [0, 4, 9] {
            assert!(matches!(
                correct_outlier(&mut table, row, "pre"),
                Err(HrvError::IndexOutOfRange { .. })
            ));
        }
        // the last row of a shorter column is an edge too
        assert!(correct_outlier(&mut table, 3, "ex1").is_err());
        assert_eq!(table.column("pre").unwrap().values[0], 10.0);
    }

    #[test]
    fn test_correct_outlier_unknown_column() {
        let mut table = table();
        assert!(matches!(
            correct_outlier(&mut table, 2, "ex2"),
            Err(HrvError::MissingCondition { .. })
        ));
    }

    #[test]
    fn test_interpolation_method_enum() {
        let window = vec![1.0, 2.0, 3.0];
        let interpolator = InterpolationMethod::NeighborMean;
        assert_eq!(interpolator.interpolate(&window, 1).unwrap(), 2.0);
        let interpolator = InterpolationMethod::Custom(Box::new(NeighborMean));
        assert_eq!(interpolator.interpolate(&window, 1).unwrap(), 2.0);
        assert!(interpolator.interpolate(&window, 2).is_err());
    }

    #[test]
    fn test_correct_outlier_with_custom_interpolator() {
        let mut mock = MockInterpolator::new();
        mock.expect_interpolate()
            .withf(|window, idx| window.to_vec() == vec![20.0, 999.0, 40.0] && *idx == 1)
            .times(1)
            .returning(|window, _| Ok(window[0]));
        let method = InterpolationMethod::Custom(Box::new(mock));
        let mut table = table();
        correct_outlier_with(&mut table, 2, "pre", &method).unwrap();
        assert_eq!(table.cell(2, "pre").unwrap(), Some(20.0));
    }

    #[test]
    fn test_locate_extremes() {
        let extremes = locate_extremes(&table());
        assert_eq!(extremes.len(), 2);
        assert_eq!(extremes[0].condition, "pre");
        assert_eq!((extremes[0].max_row, extremes[0].max), (2, 999.0));
        assert_eq!((extremes[0].min_row, extremes[0].min), (0, 10.0));
        assert_eq!((extremes[1].min_row, extremes[1].min), (2, 250.0));
    }
}
