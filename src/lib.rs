//! HRV (Heart Rate Variability) statistics over labeled RR interval data
//!
//! This crate loads a dataset of RR intervals recorded in several collections
//! under a fixed set of experimental conditions, arranges each collection into a
//! column-aligned table and computes time-domain and Poincaré HRV statistics on it.
//!
//! ```rust
//! use labeled_hrv::analysis::rolling::rolling_rmssd;
//!
//! let rr = [Some(800.0), Some(810.0), Some(820.0), Some(830.0)];
//! let rmssd = rolling_rmssd(&rr, 2).unwrap();
//! assert_eq!(rmssd, vec![None, None, Some(10.0), Some(10.0)]);
//! ```

pub mod analysis;
pub mod config;
pub mod dataset;
pub mod error;
pub mod preprocessing;
pub mod report;

pub use error::{HrvError, LoadError, Result};
