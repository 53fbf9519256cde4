//! Data-cleaning steps applied to collection tables before analysis.
//!
//! The `outliers` submodule replaces caller-identified artefacts with the mean
//! of their neighbors and locates column extremes to help identify them.
pub mod outliers;
