//! Labeled RR interval datasets.
//!
//! A [`Dataset`] maps collection identifiers to condition identifiers to a
//! [`SeriesRecord`] holding the recorded intervals in milliseconds:
//!
//! ```text
//!  labeled_data_RRI.json
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader  │  parse + validate → Dataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  table   │  one CollectionTable per collection, fixed column order
//!   └──────────┘
//! ```

pub mod loader;
pub mod table;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{HrvError, Result};

/// One recorded series: a human readable label and the RR intervals in ms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRecord {
    #[serde(default)]
    pub description: String,
    pub data: Vec<f64>,
}

impl SeriesRecord {
    pub fn new(description: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            description: description.into(),
            data,
        }
    }

    /// Smallest interval of the series, `None` when empty.
    pub fn min(&self) -> Option<f64> {
        self.data.iter().copied().reduce(f64::min)
    }

    /// Largest interval of the series, `None` when empty.
    pub fn max(&self) -> Option<f64> {
        self.data.iter().copied().reduce(f64::max)
    }
}

/// Condition identifier → series recorded under that condition.
pub type Collection = BTreeMap<String, SeriesRecord>;

/// Overview line for one series, as printed right after loading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub collection: String,
    pub condition: String,
    pub description: String,
    pub length: usize,
    pub min: f64,
    pub max: f64,
}

/// The complete labeled dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    pub collections: BTreeMap<String, Collection>,
}

impl Dataset {
    /// Build a dataset from already parsed collections, enforcing the series invariants.
    pub fn from_collections(collections: BTreeMap<String, Collection>) -> Result<Self> {
        let dataset = Self { collections };
        dataset.validate()?;
        Ok(dataset)
    }

    /// Check that every series is non-empty and holds finite, positive intervals.
    pub fn validate(&self) -> Result<()> {
        for (collection, conditions) in &self.collections {
            for (condition, record) in conditions {
                if record.data.is_empty() {
                    return Err(HrvError::EmptySeries {
                        collection: collection.clone(),
                        condition: condition.clone(),
                    });
                }
                if let Some((index, &value)) = record
                    .data
                    .iter()
                    .enumerate()
                    .find(|(_, v)| !v.is_finite() || **v <= 0.0)
                {
                    return Err(HrvError::InvalidValue {
                        collection: collection.clone(),
                        condition: condition.clone(),
                        index,
                        value,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn collection(&self, collection: &str) -> Result<&Collection> {
        self.collections
            .get(collection)
            .ok_or_else(|| HrvError::MissingCollection(collection.to_string()))
    }

    pub fn series(&self, collection: &str, condition: &str) -> Result<&SeriesRecord> {
        self.collection(collection)?
            .get(condition)
            .ok_or_else(|| HrvError::MissingCondition {
                collection: collection.to_string(),
                condition: condition.to_string(),
            })
    }

    /// Number of series across all collections.
    pub fn series_count(&self) -> usize {
        self.collections.values().map(|c| c.len()).sum()
    }

    /// Length, minimum and maximum of every series in collection/condition order.
    pub fn summary(&self) -> Vec<SeriesSummary> {
        self.collections
            .iter()
            .flat_map(|(collection, conditions)| {
                conditions.iter().map(move |(condition, record)| SeriesSummary {
                    collection: collection.clone(),
                    condition: condition.clone(),
                    description: record.description.clone(),
                    length: record.data.len(),
                    min: record.min().unwrap_or(f64::NAN),
                    max: record.max().unwrap_or(f64::NAN),
                })
            })
            .collect()
    }
}
