/// This module contains the heart rate variability (HRV) statistics.
///
/// The available submodules are:
///
/// - `describe`: Count, mean, spread and quartiles of each column.
/// - `nonlinear`: Poincaré return map pairs and SD1/SD2.
/// - `rolling`: Trailing-window standard deviation and RMSSD.
/// - `time`: Whole-series time-domain measures.
pub mod describe;
pub mod nonlinear;
pub mod rolling;
pub mod time;

use crate::error::{HrvError, Result};

/// Maps an `InsufficientData` failure to "no value", passing other errors on.
pub(crate) fn when_sufficient<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(HrvError::InsufficientData { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}
