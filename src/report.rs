//! End-to-end analysis of a dataset: tables, corrections and statistics.

use std::str::FromStr;

use log::debug;
use serde::Serialize;

use crate::analysis::describe::{describe_table, ColumnDescription};
use crate::analysis::nonlinear::{table_poincare, ColumnPoincare};
use crate::analysis::rolling::{table_rolling_rmssd, table_rolling_std, RollingColumn};
use crate::analysis::time::{table_time_domain, TimeDomainStats};
use crate::config::AnalysisConfig;
use crate::dataset::table::CollectionTable;
use crate::dataset::{Dataset, SeriesSummary};
use crate::error::{HrvError, Result};
use crate::preprocessing::outliers::{correct_outlier, locate_extremes, ColumnExtremes};

/// A single table cell addressed by collection, condition and row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellRef {
    pub collection: String,
    pub condition: String,
    pub row: usize,
}

impl FromStr for CellRef {
    type Err = HrvError;

    /// Parses `COLLECTION:CONDITION:ROW`.
    fn from_str(text: &str) -> Result<Self> {
        let invalid =
            || HrvError::Config(format!("expected COLLECTION:CONDITION:ROW, got '{text}'"));
        let mut parts = text.rsplitn(3, ':');
        let row = parts.next().ok_or_else(invalid)?;
        let condition = parts.next().ok_or_else(invalid)?;
        let collection = parts.next().ok_or_else(invalid)?;
        if collection.is_empty() || condition.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            collection: collection.to_string(),
            condition: condition.to_string(),
            row: row.parse().map_err(|_| invalid())?,
        })
    }
}

/// A correction that was applied before the statistics were computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedCorrection {
    pub cell: CellRef,
    pub original: f64,
    pub replacement: f64,
}

/// Statistics of one collection table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionReport {
    pub collection: String,
    pub rows: usize,
    pub description: Vec<ColumnDescription>,
    pub extremes: Vec<ColumnExtremes>,
    pub time_domain: Vec<TimeDomainStats>,
    pub poincare: Vec<ColumnPoincare>,
    pub rolling_std: Vec<RollingColumn>,
    pub rolling_rmssd: Vec<RollingColumn>,
}

impl CollectionReport {
    pub fn from_table(table: &CollectionTable, window: usize) -> Result<Self> {
        Ok(Self {
            collection: table.collection().to_string(),
            rows: table.row_count(),
            description: describe_table(table)?,
            extremes: locate_extremes(table),
            time_domain: table_time_domain(table)?,
            poincare: table_poincare(table)?,
            rolling_std: table_rolling_std(table, window)?,
            rolling_rmssd: table_rolling_rmssd(table, window)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub window: usize,
    pub summary: Vec<SeriesSummary>,
    pub corrections: Vec<AppliedCorrection>,
    pub collections: Vec<CollectionReport>,
}

impl Report {
    /// Build the configured tables, apply `corrections` in order, then analyse.
    ///
    /// # Errors
    ///
    /// Any table or correction failure aborts the whole report. A column too
    /// short for a statistic reports `None` for it instead.
    pub fn build(
        dataset: &Dataset,
        config: &AnalysisConfig,
        corrections: &[CellRef],
    ) -> Result<Self> {
        config.validate()?;
        let mut tables =
            CollectionTable::build_all(dataset, &config.conditions, &config.collections)?;

        let applied = corrections
            .iter()
            .map(|cell| {
                let table = tables
                    .iter_mut()
                    .find(|t| t.collection() == cell.collection)
                    .ok_or_else(|| HrvError::MissingCollection(cell.collection.clone()))?;
                let original = correct_outlier(table, cell.row, &cell.condition)?;
                let replacement = table.cell(cell.row, &cell.condition)?.unwrap_or(f64::NAN);
                Ok(AppliedCorrection {
                    cell: cell.clone(),
                    original,
                    replacement,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let collections = tables
            .iter()
            .map(|table| CollectionReport::from_table(table, config.window))
            .collect::<Result<Vec<_>>>()?;
        debug!("analysed {} collections", collections.len());

        Ok(Self {
            window: config.window,
            summary: dataset.summary(),
            corrections: applied,
            collections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::loader::from_str;

    fn dataset() -> Dataset {
        from_str(
            r#"{"a": {"pre": {"description": "", "data": [800, 810, 805, 2000, 815, 820]},
                      "post": {"description": "", "data": [900, 880, 890, 870]}}}"#,
        )
        .unwrap()
    }

    fn config() -> AnalysisConfig {
        AnalysisConfig {
            conditions: vec!["pre".into(), "post".into()],
            collections: vec!["a".into()],
            window: 2,
        }
    }

    #[test]
    fn test_build_with_correction() {
        let cell = CellRef {
            collection: "a".into(),
            condition: "pre".into(),
            row: 3,
        };
        let report = Report::build(&dataset(), &config(), &[cell]).unwrap();
        assert_eq!(report.corrections[0].original, 2000.0);
        assert_eq!(report.corrections[0].replacement, 810.0);
        let collection = &report.collections[0];
        assert_eq!(collection.rows, 6);
        assert_eq!(collection.extremes[0].max, 820.0);
        assert_eq!(collection.rolling_std[1].values.len(), 6);
        assert_eq!(collection.rolling_rmssd[1].values[5], None);
    }

    #[test]
    fn test_parse_cell_ref() {
        let cell: CellRef = "collect2:ex1:28".parse().unwrap();
        assert_eq!(cell.collection, "collect2");
        assert_eq!(cell.condition, "ex1");
        assert_eq!(cell.row, 28);
        assert!("collect2:ex1".parse::<CellRef>().is_err());
        assert!("collect2:ex1:-3".parse::<CellRef>().is_err());
        assert!(":ex1:3".parse::<CellRef>().is_err());
    }

    #[test]
    fn test_build_unknown_correction_collection() {
        let cell = CellRef {
            collection: "b".into(),
            condition: "pre".into(),
            row: 3,
        };
        assert!(matches!(
            Report::build(&dataset(), &config(), &[cell]),
            Err(HrvError::MissingCollection(_))
        ));
    }

    #[test]
    fn test_build_with_short_column() {
        let dataset = from_str(
            r#"{"a": {"pre": {"description": "", "data": [800, 810]},
                      "post": {"description": "", "data": [900, 880, 890, 870]}}}"#,
        )
        .unwrap();
        let report = Report::build(&dataset, &config(), &[]).unwrap();
        let collection = &report.collections[0];
        assert_eq!(collection.time_domain.len(), 2);
        assert_eq!(collection.poincare.len(), 2);

        let pre = &collection.time_domain[0];
        assert_eq!(pre.condition, "pre");
        assert!((pre.sdrr.unwrap() - 50.0f64.sqrt()).abs() < 1e-9);
        assert_eq!(pre.rmssd, Some(10.0));
        assert_eq!(collection.poincare[0].metrics, None);

        assert_eq!(collection.poincare[1].condition, "post");
        assert!(collection.poincare[1].metrics.is_some());
        assert!(collection.time_domain[1].sdrr.is_some());
    }
}
