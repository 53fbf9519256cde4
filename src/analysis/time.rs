//! This module provides functions to calculate time-domain measures of heart rate variability (HRV).
//!
//! Currently the following metrics can be calculated:
//! - Root Mean Square of Successive Differences (RMSSD)
//! - Standard Deviation of RR intervals (SDRR)
//!
//! Standard deviations use the sample estimator (`n - 1` degrees of freedom)
//! everywhere in this crate, including the rolling variants.

use nalgebra::DVectorView;
use serde::Serialize;

use super::when_sufficient;
use crate::dataset::table::CollectionTable;
use crate::error::{HrvError, Result};

/// Successive differences `data[i] - data[i - 1]` for `i = 1..n`.
pub fn successive_differences(data: &[f64]) -> Vec<f64> {
    data.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Sample variance of a slice with at least two elements.
///
/// A slice of identical values has exactly zero variance.
pub(crate) fn sample_variance(data: &[f64]) -> f64 {
    if data.iter().all(|&v| v == data[0]) {
        return 0.0;
    }
    let view = DVectorView::from(data);
    let centered = view.add_scalar(-view.mean());
    centered.dot(&centered) / (data.len() as f64 - 1.0)
}

/// Root mean square of a non-empty slice.
pub(crate) fn root_mean_square(data: &[f64]) -> f64 {
    let view = DVectorView::from(data);
    (view.dot(&view) / data.len() as f64).sqrt()
}

/// Calculates the Root Mean Square of Successive Differences (RMSSD) from a slice of RR intervals.
///
/// RMSSD is the square root of the mean of the squared differences between
/// adjacent RR intervals.
///
/// # Errors
///
/// Returns `InsufficientData` if the input slice contains fewer than two elements.
pub fn calc_rmssd(data: &[f64]) -> Result<f64> {
    if data.len() < 2 {
        return Err(HrvError::InsufficientData {
            what: "RMSSD",
            need: 2,
            got: data.len(),
        });
    }
    let rr_points_a = DVectorView::from(&data[0..data.len() - 1]);
    let rr_points_b = DVectorView::from(&data[1..]);
    let successive_diffs = rr_points_b - rr_points_a;
    Ok((successive_diffs.dot(&successive_diffs) / (successive_diffs.len() as f64)).sqrt())
}

/// Calculates the Standard Deviation of RR intervals (SDRR) from a slice of RR intervals.
///
/// # Errors
///
/// Returns `InsufficientData` if the input slice contains fewer than two elements.
pub fn calc_sdrr(data: &[f64]) -> Result<f64> {
    if data.len() < 2 {
        return Err(HrvError::InsufficientData {
            what: "SDRR",
            need: 2,
            got: data.len(),
        });
    }
    Ok(sample_variance(data).sqrt())
}

/// Whole-series SDRR and RMSSD of one table column.
///
/// A column too short for a measure holds `None` for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeDomainStats {
    pub condition: String,
    pub sdrr: Option<f64>,
    pub rmssd: Option<f64>,
}

/// SDRR and RMSSD for every column of a table, in column order.
pub fn table_time_domain(table: &CollectionTable) -> Result<Vec<TimeDomainStats>> {
    table
        .columns()
        .iter()
        .map(|column| {
            Ok(TimeDomainStats {
                condition: column.condition.clone(),
                sdrr: when_sufficient(calc_sdrr(&column.values))?,
                rmssd: when_sufficient(calc_rmssd(&column.values))?,
            })
        })
        .collect()
}
