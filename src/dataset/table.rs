//! Column-aligned view of one collection.
//!
//! A [`CollectionTable`] holds one column per condition in a caller-defined
//! order. Rows are aligned by position, not by time: row `i` holds the `i`-th
//! interval of every condition. Columns may differ in length; the table has as
//! many rows as its longest column and reads past the end of a shorter column
//! yield `None`.

use log::{debug, warn};

use super::Dataset;
use crate::error::{HrvError, Result};

/// The default condition order of a recording session.
pub const DEFAULT_CONDITIONS: [&str; 4] = ["pre", "ex1", "ex2", "post"];

/// One condition's intervals inside a [`CollectionTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub condition: String,
    pub values: Vec<f64>,
}

impl Column {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The column padded with `None` up to `rows` entries.
    pub fn padded(&self, rows: usize) -> Vec<Option<f64>> {
        (0..rows.max(self.values.len()))
            .map(|i| self.values.get(i).copied())
            .collect()
    }
}

/// Per-collection table with a fixed column order.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionTable {
    collection: String,
    columns: Vec<Column>,
}

impl CollectionTable {
    /// Build the table for `collection`, one column per entry of `conditions`.
    ///
    /// Conditions present in the dataset but not listed are left out.
    ///
    /// # Errors
    ///
    /// `MissingCollection` if the collection does not exist, `MissingCondition`
    /// if any listed condition has no series in it.
    pub fn build<S: AsRef<str>>(
        dataset: &Dataset,
        collection: &str,
        conditions: &[S],
    ) -> Result<Self> {
        let columns = conditions
            .iter()
            .map(|condition| {
                let record = dataset.series(collection, condition.as_ref())?;
                Ok(Column {
                    condition: condition.as_ref().to_string(),
                    values: record.data.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let table = Self {
            collection: collection.to_string(),
            columns,
        };
        if table.is_ragged() {
            warn!(
                "collection '{}' has columns of unequal length, shorter ones are padded",
                collection
            );
        }
        debug!(
            "built table for '{}' with {} columns and {} rows",
            collection,
            table.columns.len(),
            table.row_count()
        );
        Ok(table)
    }

    /// Build one table per collection, in the order given.
    pub fn build_all<S: AsRef<str>, T: AsRef<str>>(
        dataset: &Dataset,
        conditions: &[S],
        collections: &[T],
    ) -> Result<Vec<Self>> {
        collections
            .iter()
            .map(|collection| Self::build(dataset, collection.as_ref(), conditions))
            .collect()
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn conditions(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.condition.as_str())
    }

    /// Number of rows, the length of the longest column.
    pub fn row_count(&self) -> usize {
        self.columns.iter().map(Column::len).max().unwrap_or(0)
    }

    pub fn is_ragged(&self) -> bool {
        let rows = self.row_count();
        self.columns.iter().any(|c| c.len() != rows)
    }

    fn column_index(&self, condition: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.condition == condition)
            .ok_or_else(|| HrvError::MissingCondition {
                collection: self.collection.clone(),
                condition: condition.to_string(),
            })
    }

    pub fn column(&self, condition: &str) -> Result<&Column> {
        let idx = self.column_index(condition)?;
        Ok(&self.columns[idx])
    }

    pub(crate) fn column_mut(&mut self, condition: &str) -> Result<&mut Column> {
        let idx = self.column_index(condition)?;
        Ok(&mut self.columns[idx])
    }

    /// The value at `row` of `condition`, `None` past the end of that column.
    pub fn cell(&self, row: usize, condition: &str) -> Result<Option<f64>> {
        Ok(self.column(condition)?.values.get(row).copied())
    }

    /// A column padded with `None` to the table's row count.
    pub fn padded_column(&self, condition: &str) -> Result<Vec<Option<f64>>> {
        Ok(self.column(condition)?.padded(self.row_count()))
    }
}
