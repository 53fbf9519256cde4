//! Descriptive statistics per table column.

use nalgebra::DVectorView;
use serde::Serialize;

use super::time::sample_variance;
use crate::dataset::table::CollectionTable;
use crate::error::{HrvError, Result};

/// Count, location and spread of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDescription {
    pub condition: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation, `NaN` for a single value.
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Quantile of sorted data, interpolating linearly between the closest ranks.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * q;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

/// Describe one series.
///
/// # Errors
///
/// `InsufficientData` for an empty series.
pub fn describe(condition: &str, data: &[f64]) -> Result<ColumnDescription> {
    if data.is_empty() {
        return Err(HrvError::InsufficientData {
            what: "description",
            need: 1,
            got: 0,
        });
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);

    Ok(ColumnDescription {
        condition: condition.to_string(),
        count: data.len(),
        mean: DVectorView::from(data).mean(),
        std: if data.len() > 1 {
            sample_variance(data).sqrt()
        } else {
            f64::NAN
        },
        min: sorted[0],
        q25: quantile_sorted(&sorted, 0.25),
        median: quantile_sorted(&sorted, 0.5),
        q75: quantile_sorted(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    })
}

/// [`describe`] for every column of a table.
pub fn describe_table(table: &CollectionTable) -> Result<Vec<ColumnDescription>> {
    table
        .columns()
        .iter()
        .map(|column| describe(&column.condition, &column.values))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        let d = describe("pre", &[4.0, 1.0, 3.0, 2.0, 5.0]).unwrap();
        assert_eq!(d.count, 5);
        assert_eq!(d.mean, 3.0);
        assert_eq!(d.min, 1.0);
        assert_eq!(d.q25, 2.0);
        assert_eq!(d.median, 3.0);
        assert_eq!(d.q75, 4.0);
        assert_eq!(d.max, 5.0);
        assert!((d.std - 2.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_describe_interpolates_quartiles() {
        let d = describe("ex1", &[10.0, 20.0, 30.0, 40.0]).unwrap();
        assert_eq!(d.q25, 17.5);
        assert_eq!(d.median, 25.0);
        assert_eq!(d.q75, 32.5);
    }

    #[test]
    fn test_describe_single_value() {
        let d = describe("post", &[800.0]).unwrap();
        assert!(d.std.is_nan());
        assert_eq!(d.median, 800.0);
    }

    #[test]
    fn test_describe_empty() {
        assert!(describe("pre", &[]).is_err());
    }
}
