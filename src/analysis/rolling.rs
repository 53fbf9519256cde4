//! Trailing-window statistics over padded columns.
//!
//! All functions take a column as `&[Option<f64>]` (see
//! [`Column::padded`](crate::dataset::table::Column::padded)) and return one
//! entry per input row. Row `i` covers rows `i + 1 - window ..= i`. A row whose
//! window is incomplete, or contains any `None`, is `None` itself: missing
//! entries are never skipped inside a window.

use serde::Serialize;

use super::time::{root_mean_square, sample_variance};
use crate::dataset::table::CollectionTable;
use crate::error::{HrvError, Result};

/// Rolling output for one table column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollingColumn {
    pub condition: String,
    pub values: Vec<Option<f64>>,
}

impl RollingColumn {
    /// The last row that holds a value, with its index.
    pub fn last_valid(&self) -> Option<(usize, f64)> {
        self.values
            .iter()
            .enumerate()
            .rev()
            .find_map(|(i, v)| v.map(|v| (i, v)))
    }
}

fn check_window(window: usize) -> Result<()> {
    if window == 0 {
        return Err(HrvError::InvalidWindow(window));
    }
    Ok(())
}

/// Applies `func` to every complete trailing window of `values`.
///
/// `func` receives the window contents and may itself decline with `None`.
///
/// # Errors
///
/// `InvalidWindow` if `window` is zero. A window longer than the input is not
/// an error; every row is `None` then.
///
/// # Examples
///
/// ```
/// use labeled_hrv::analysis::rolling::rolling_apply;
///
/// let values = [Some(1.0), Some(2.0), None, Some(4.0), Some(5.0)];
/// let sums = rolling_apply(&values, 2, |w| Some(w.iter().sum())).unwrap();
/// assert_eq!(sums, vec![None, Some(3.0), None, None, Some(9.0)]);
/// ```
pub fn rolling_apply<F>(
    values: &[Option<f64>],
    window: usize,
    func: F,
) -> Result<Vec<Option<f64>>>
where
    F: Fn(&[f64]) -> Option<f64>,
{
    check_window(window)?;
    let mut buffer = Vec::with_capacity(window);
    Ok((0..values.len())
        .map(|idx| {
            if idx + 1 < window {
                return None;
            }
            buffer.clear();
            for value in &values[idx + 1 - window..=idx] {
                buffer.push((*value)?);
            }
            func(&buffer)
        })
        .collect())
}

/// Rolling sample standard deviation (`n - 1` degrees of freedom).
///
/// A window of one value has no degrees of freedom left, so every row is `None`.
pub fn rolling_std(values: &[Option<f64>], window: usize) -> Result<Vec<Option<f64>>> {
    rolling_apply(values, window, |w| {
        (w.len() >= 2).then(|| sample_variance(w).sqrt())
    })
}

/// First differences of a padded column, `None` at row 0 and wherever either
/// operand is missing.
pub fn padded_differences(values: &[Option<f64>]) -> Vec<Option<f64>> {
    std::iter::once(None)
        .chain(values.windows(2).map(|w| match (w[0], w[1]) {
            (Some(prev), Some(cur)) => Some(cur - prev),
            _ => None,
        }))
        .take(values.len())
        .collect()
}

/// Rolling RMSSD: root mean square of the successive differences in each window.
///
/// Differencing costs one row, so the first `window` rows are always `None`.
pub fn rolling_rmssd(values: &[Option<f64>], window: usize) -> Result<Vec<Option<f64>>> {
    let diffs = padded_differences(values);
    rolling_apply(&diffs, window, |w| Some(root_mean_square(w)))
}

fn per_column<F>(table: &CollectionTable, func: F) -> Result<Vec<RollingColumn>>
where
    F: Fn(&[Option<f64>]) -> Result<Vec<Option<f64>>>,
{
    let rows = table.row_count();
    table
        .columns()
        .iter()
        .map(|column| {
            Ok(RollingColumn {
                condition: column.condition.clone(),
                values: func(&column.padded(rows))?,
            })
        })
        .collect()
}

/// [`rolling_std`] for every column of a table.
pub fn table_rolling_std(table: &CollectionTable, window: usize) -> Result<Vec<RollingColumn>> {
    per_column(table, |values| rolling_std(values, window))
}

/// [`rolling_rmssd`] for every column of a table.
pub fn table_rolling_rmssd(table: &CollectionTable, window: usize) -> Result<Vec<RollingColumn>> {
    per_column(table, |values| rolling_rmssd(values, window))
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};

    use super::*;

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_rolling_std_constant_is_zero() {
        let values = some(&[850.0; 10]);
        let result = rolling_std(&values, 4).unwrap();
        assert!(result[..3].iter().all(Option::is_none));
        assert!(result[3..].iter().all(|v| *v == Some(0.0)));
    }

    #[test]
    fn test_rolling_std_fractional_constant_is_zero() {
        for (value, window, len) in [(812.3, 120, 125), (812.3, 3, 10), (0.1, 120, 130)] {
            let result = rolling_std(&vec![Some(value); len], window).unwrap();
            assert!(result[window - 1..].iter().all(|v| *v == Some(0.0)));
        }
    }

    #[test]
    fn test_rolling_std_values() {
        let values = some(&[1.0, 2.0, 3.0, 5.0]);
        let result = rolling_std(&values, 3).unwrap();
        assert_eq!(result[0], None);
        assert_eq!(result[1], None);
        assert!((result[2].unwrap() - 1.0).abs() < 1e-12);
        // [2, 3, 5]: mean 10/3, sample variance 7/3
        assert!((result[3].unwrap() - (7.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_rolling_std_window_one() {
        let values = some(&[1.0, 2.0, 3.0]);
        assert_eq!(rolling_std(&values, 1).unwrap(), vec![None, None, None]);
    }

    #[test]
    fn test_rolling_rmssd_constant_difference() {
        let values: Vec<_> = (0..20).map(|i| Some(900.0 - 7.0 * i as f64)).collect();
        let result = rolling_rmssd(&values, 5).unwrap();
        assert!(result[..5].iter().all(Option::is_none));
        for value in &result[5..] {
            assert!((value.unwrap() - 7.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_window_larger_than_series() {
        let values = some(&[800.0, 810.0, 790.0]);
        assert_eq!(rolling_std(&values, 10).unwrap(), vec![None; 3]);
        assert_eq!(rolling_rmssd(&values, 3).unwrap(), vec![None; 3]);
        assert!(rolling_std(&[], 2).unwrap().is_empty());
    }

    #[test]
    fn test_zero_window() {
        assert!(matches!(
            rolling_std(&some(&[1.0]), 0),
            Err(HrvError::InvalidWindow(0))
        ));
        assert!(rolling_rmssd(&some(&[1.0]), 0).is_err());
    }

    #[test]
    fn test_missing_entries_propagate() {
        let values = vec![Some(800.0), Some(810.0), Some(820.0), None, None];
        let result = rolling_std(&values, 2).unwrap();
        assert!(result[1].is_some());
        assert!(result[2].is_some());
        assert_eq!(result[3], None);
        assert_eq!(result[4], None);
    }

    #[test]
    fn test_padded_differences() {
        let values = vec![Some(10.0), Some(13.0), None, Some(20.0)];
        assert_eq!(
            padded_differences(&values),
            vec![None, Some(3.0), None, None]
        );
        assert!(padded_differences(&[]).is_empty());
    }

    #[test]
    fn test_rolling_matches_naive_recomputation() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let data: Vec<f64> = (0..200).map(|_| rng.gen_range(600.0..1100.0)).collect();
        let values = some(&data);
        let window = 17;
        let stds = rolling_std(&values, window).unwrap();
        let rmssds = rolling_rmssd(&values, window).unwrap();
        for idx in window..data.len() {
            let slice = &data[idx + 1 - window..=idx];
            let mean = slice.iter().sum::<f64>() / window as f64;
            let var = slice.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (window - 1) as f64;
            assert!((stds[idx].unwrap() - var.sqrt()).abs() < 1e-6);

            let diffs: Vec<f64> = (idx + 1 - window..=idx)
                .map(|i| data[i] - data[i - 1])
                .collect();
            let rms = (diffs.iter().map(|d| d * d).sum::<f64>() / window as f64).sqrt();
            assert!((rmssds[idx].unwrap() - rms).abs() < 1e-6);
        }
    }

    #[test]
    fn test_last_valid() {
        let column = RollingColumn {
            condition: "pre".into(),
            values: vec![None, Some(1.0), Some(2.0), None],
        };
        assert_eq!(column.last_valid(), Some((2, 2.0)));
    }
}
