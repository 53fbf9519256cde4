//! Reading and writing labeled RR interval documents.
//!
//! Expected JSON schema:
//!
//! ```json
//! {
//!   "collect1": {
//!     "pre": { "description": "before task", "data": [812.0, 798.0, ...] },
//!     "ex1": { "description": "exercise 1",  "data": [640.0, 655.0, ...] }
//!   }
//! }
//! ```
//!
//! Loading is all-or-nothing: any unreadable file, malformed document, record
//! without `data`, empty series or non-positive interval fails the whole load.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::debug;

use super::Dataset;
use crate::error::{LoadError, Result};

/// Load and validate a dataset from a JSON file.
pub fn load(path: &Path) -> Result<Dataset> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = from_reader(BufReader::new(file))?;
    debug!(
        "loaded {} collections ({} series) from {}",
        dataset.collections.len(),
        dataset.series_count(),
        path.display()
    );
    Ok(dataset)
}

/// Decode and validate a dataset from any reader.
pub fn from_reader<R: Read>(reader: R) -> Result<Dataset> {
    let dataset: Dataset = serde_json::from_reader(reader).map_err(LoadError::from)?;
    dataset.validate()?;
    Ok(dataset)
}

/// Decode and validate a dataset from a JSON string.
///
/// ```
/// use labeled_hrv::dataset::loader::from_str;
///
/// let ds = from_str(r#"{"collect1": {"pre": {"description": "rest", "data": [800, 810]}}}"#).unwrap();
/// assert_eq!(ds.series("collect1", "pre").unwrap().data, vec![800.0, 810.0]);
/// ```
pub fn from_str(text: &str) -> Result<Dataset> {
    let dataset: Dataset = serde_json::from_str(text).map_err(LoadError::from)?;
    dataset.validate()?;
    Ok(dataset)
}

/// Serialize a dataset in the same shape [`from_reader`] accepts.
pub fn to_writer<W: Write>(dataset: &Dataset, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, dataset).map_err(LoadError::from)?;
    Ok(())
}

/// Write a dataset to a JSON file.
pub fn save(dataset: &Dataset, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    to_writer(dataset, &mut writer)?;
    writer.flush().map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
