//! Analysis configuration.
//!
//! Every field has a default matching the reference recording protocol, so an
//! empty JSON object is a valid configuration file:
//!
//! ```json
//! {
//!   "conditions": ["pre", "ex1", "ex2", "post"],
//!   "collections": ["collect1", "collect2", "collect3", "collect4"],
//!   "window": 120
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dataset::table::DEFAULT_CONDITIONS;
use crate::error::{HrvError, LoadError, Result};

/// Default rolling window, in intervals.
pub const DEFAULT_WINDOW: usize = 120;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Column order of every collection table.
    pub conditions: Vec<String>,
    /// Collections to analyse, in report order.
    pub collections: Vec<String>,
    /// Rolling window size for SDRR and RMSSD.
    pub window: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            conditions: DEFAULT_CONDITIONS.iter().map(|c| c.to_string()).collect(),
            collections: (1..=4).map(|i| format!("collect{i}")).collect(),
            window: DEFAULT_WINDOW,
        }
    }
}

impl AnalysisConfig {
    /// Read a configuration file; missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| HrvError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(HrvError::Config("window must be at least 1".into()));
        }
        if self.conditions.is_empty() {
            return Err(HrvError::Config("no conditions configured".into()));
        }
        if self.collections.is_empty() {
            return Err(HrvError::Config("no collections configured".into()));
        }
        Ok(())
    }
}
