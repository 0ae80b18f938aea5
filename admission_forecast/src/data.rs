//! Daily count series and CSV loading

use crate::error::{EvalError, Result};
use crate::utils::parse_date;
use chrono::NaiveDate;
use polars::prelude::{CsvReader, DataFrame, DataType, SerReader};
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Default name of the date column
pub const DEFAULT_DATE_COLUMN: &str = "ds";
/// Default name of the count column
pub const DEFAULT_VALUE_COLUMN: &str = "y";

/// One observation of a daily count
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Record {
    /// Calendar day of the observation
    pub date: NaiveDate,
    /// Recorded count
    pub value: f64,
}

impl Record {
    /// Create a new record
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Series of daily counts, ordered ascending by date
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    records: Vec<Record>,
}

impl Series {
    /// Create a series from records, sorting them ascending by date
    ///
    /// The sort is stable, so records sharing a date keep their input order.
    pub fn new(mut records: Vec<Record>) -> Self {
        records.sort_by_key(|r| r.date);
        Self { records }
    }

    /// Create a series from parallel vectors of dates and values
    pub fn from_parts(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(EvalError::Parse(format!(
                "Dates length ({}) doesn't match values length ({})",
                dates.len(),
                values.len()
            )));
        }

        Ok(Self::new(
            dates
                .into_iter()
                .zip(values)
                .map(|(date, value)| Record::new(date, value))
                .collect(),
        ))
    }

    /// Get the records
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Get the dates as a vector
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.records.iter().map(|r| r.date).collect()
    }

    /// Get the values as a vector
    pub fn values(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.value).collect()
    }

    /// First date in the series
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.date)
    }

    /// Last date in the series
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.date)
    }

    /// Records strictly before `date`
    pub fn before(&self, date: NaiveDate) -> Self {
        // Records are sorted, so the split point is a partition point
        let end = self.records.partition_point(|r| r.date < date);
        Self {
            records: self.records[..end].to_vec(),
        }
    }

    /// Records with `start <= date < end`
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            records: self
                .records
                .iter()
                .filter(|r| r.date >= start && r.date < end)
                .copied()
                .collect(),
        }
    }

    /// Recorded value on `date`, if any
    pub fn value_on(&self, date: NaiveDate) -> Option<f64> {
        let index = self.records.partition_point(|r| r.date < date);
        self.records
            .get(index)
            .filter(|r| r.date == date)
            .map(|r| r.value)
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get the length of the series
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Names of the two columns a count file must provide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Name of the date column
    pub date_column: String,
    /// Name of the count column
    pub value_column: String,
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            date_column: DEFAULT_DATE_COLUMN.to_string(),
            value_column: DEFAULT_VALUE_COLUMN.to_string(),
        }
    }
}

/// Data loader for daily count series
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a series from a CSV file with a header row
    pub fn from_csv<P: AsRef<Path>>(path: P, columns: &ColumnSpec) -> Result<Series> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        debug!(path = %path.display(), rows = df.height(), "read count file");
        Self::from_dataframe(&df, columns)
    }

    /// Create a series from an existing DataFrame
    pub fn from_dataframe(df: &DataFrame, columns: &ColumnSpec) -> Result<Series> {
        if df.height() == 0 {
            return Err(EvalError::Parse("Input contains no rows".to_string()));
        }

        let dates = Self::date_column(df, &columns.date_column)?;
        let values = Self::value_column(df, &columns.value_column)?;

        Series::from_parts(dates, values)
    }

    fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a polars::prelude::Series> {
        df.column(name).map_err(|_| {
            EvalError::Parse(format!(
                "Required column '{}' not found (columns: {})",
                name,
                df.get_column_names().join(", ")
            ))
        })
    }

    /// Parse the date column, whatever type the reader inferred for it
    fn date_column(df: &DataFrame, name: &str) -> Result<Vec<NaiveDate>> {
        let col = Self::column(df, name)?.cast(&DataType::Utf8)?;

        col.utf8()?
            .into_iter()
            .enumerate()
            .map(|(row, cell)| match cell {
                Some(text) => parse_date(text)
                    .map_err(|e| EvalError::Parse(format!("Row {}: {}", row + 1, e))),
                None => Err(EvalError::Parse(format!(
                    "Row {}: missing value in column '{}'",
                    row + 1,
                    name
                ))),
            })
            .collect()
    }

    /// Read the count column as f64, rejecting negative or non-finite counts
    fn value_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
        let col = Self::column(df, name)?;
        if !col.dtype().is_numeric() {
            return Err(EvalError::Parse(format!(
                "Column '{}' is not numeric ({})",
                name,
                col.dtype()
            )));
        }

        let col = col.cast(&DataType::Float64)?;
        col.f64()?
            .into_iter()
            .enumerate()
            .map(|(row, cell)| match cell {
                Some(value) if value.is_finite() && value >= 0.0 => Ok(value),
                Some(value) => Err(EvalError::Parse(format!(
                    "Row {}: '{}' is not a valid count in column '{}'",
                    row + 1,
                    value,
                    name
                ))),
                None => Err(EvalError::Parse(format!(
                    "Row {}: missing value in column '{}'",
                    row + 1,
                    name
                ))),
            })
            .collect()
    }
}
