//! Error types shared by every module of the crate.

use std::path::PathBuf;

use thiserror::Error;

/// Failure while reading or decoding a dataset document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed dataset document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Errors produced while loading, organizing or analysing RR interval data.
#[derive(Debug, Error)]
pub enum HrvError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("collection '{collection}' has no condition '{condition}'")]
    MissingCondition {
        collection: String,
        condition: String,
    },

    #[error("dataset has no collection '{0}'")]
    MissingCollection(String),

    #[error("row {row} of column '{column}' has no neighbor on both sides (column length {len})")]
    IndexOutOfRange {
        column: String,
        row: usize,
        len: usize,
    },

    #[error("series {collection}/{condition} contains no data")]
    EmptySeries {
        collection: String,
        condition: String,
    },

    #[error("series {collection}/{condition} has invalid interval {value} at index {index}")]
    InvalidValue {
        collection: String,
        condition: String,
        index: usize,
        value: f64,
    },

    #[error("window size must be at least 1, got {0}")]
    InvalidWindow(usize),

    #[error("{what} requires at least {need} values, got {got}")]
    InsufficientData {
        what: &'static str,
        need: usize,
        got: usize,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, HrvError>;
