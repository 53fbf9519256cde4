//! Poincaré return map of RR intervals.
//!
//! The return map plots every interval against its predecessor. Besides the
//! raw lag-1 pairs this module derives the usual dispersion descriptors:
//!
//! - SD1: spread perpendicular to the identity line (short-term variability)
//! - SD2: spread along the identity line (long-term variability)
//!
//! # Example
//! ```rust
//! use labeled_hrv::analysis::nonlinear::{poincare_pairs, calc_poincare_metrics};
//!
//! let data = [1000.0, 1010.0, 1001.0, 1030.0, 1049.0];
//! assert_eq!(poincare_pairs(&data)[0], (1000.0, 1010.0));
//! let poincare = calc_poincare_metrics(&data).unwrap();
//! println!("SD1: {}, SD2: {}", poincare.sd1, poincare.sd2);
//! ```

use nalgebra::{DMatrix, DVectorView};
use serde::Serialize;

use super::when_sufficient;
use crate::dataset::table::CollectionTable;
use crate::error::{HrvError, Result};

/// Lag-1 pairs `(data[i - 1], data[i])` for `i = 1..n`.
///
/// Series with fewer than two values yield no pairs.
pub fn poincare_pairs(data: &[f64]) -> Vec<(f64, f64)> {
    data.windows(2).map(|w| (w[0], w[1])).collect()
}

/// SD1/SD2 descriptors of a Poincaré return map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PoincareMetrics {
    pub sd1: f64,
    pub sd2: f64,
}

impl PoincareMetrics {
    /// SD1 / SD2, `NaN` for a degenerate map with zero SD2.
    pub fn ratio(&self) -> f64 {
        if self.sd2 == 0.0 {
            f64::NAN
        } else {
            self.sd1 / self.sd2
        }
    }
}

/// Calculates SD1 and SD2 of the return map.
///
/// Both come from the sample covariance (`n - 1` degrees of freedom) of the
/// lag-1 pairs, projected on the axes `(1, -1) / sqrt(2)` for SD1 and
/// `(1, 1) / sqrt(2)` for SD2.
///
/// # Errors
///
/// `InsufficientData` when the series yields fewer than two pairs.
pub fn calc_poincare_metrics(data: &[f64]) -> Result<PoincareMetrics> {
    if data.len() < 3 {
        return Err(HrvError::InsufficientData {
            what: "Poincaré metrics",
            need: 3,
            got: data.len(),
        });
    }

    let previous = DVectorView::from(&data[0..data.len() - 1]);
    let current = DVectorView::from(&data[1..]);

    let centered = {
        let mut pairs = DMatrix::from_columns(&[previous, current]);
        let col_means = pairs.row_mean();
        for mut row in pairs.row_iter_mut() {
            row -= &col_means;
        }
        pairs
    };
    let cov = centered.transpose() * &centered / (centered.nrows() as f64 - 1.0);

    let mean_var = (cov[(0, 0)] + cov[(1, 1)]) / 2.0;
    // rounding can push a zero variance slightly negative
    Ok(PoincareMetrics {
        sd1: (mean_var - cov[(0, 1)]).max(0.0).sqrt(),
        sd2: (mean_var + cov[(0, 1)]).max(0.0).sqrt(),
    })
}

/// Poincaré descriptors of one table column, `None` if it has fewer than two pairs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnPoincare {
    pub condition: String,
    pub metrics: Option<PoincareMetrics>,
}

/// [`calc_poincare_metrics`] for every column of a table.
pub fn table_poincare(table: &CollectionTable) -> Result<Vec<ColumnPoincare>> {
    table
        .columns()
        .iter()
        .map(|column| {
            Ok(ColumnPoincare {
                condition: column.condition.clone(),
                metrics: when_sufficient(calc_poincare_metrics(&column.values))?,
            })
        })
        .collect()
}
