//! Column extraction from a loaded parquet frame into plain Rust vectors.
//!
//! Required columns must exist; optional columns yield all-`None` when absent.
//! Every returned vector has exactly `height` entries.

use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;

use crate::loader::{DatasetFile, LoadError};

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

pub(crate) struct Frame<'a> {
    file: DatasetFile,
    df: &'a DataFrame,
}

impl<'a> Frame<'a> {
    pub(crate) fn new(file: DatasetFile, df: &'a DataFrame) -> Self {
        Self { file, df }
    }

    pub(crate) fn height(&self) -> usize {
        self.df.height()
    }

    fn cast(&self, column: &str, dtype: &DataType) -> Result<Option<Series>, LoadError> {
        let Ok(col) = self.df.column(column) else {
            return Ok(None);
        };
        col.as_materialized_series()
            .cast(dtype)
            .map(Some)
            .map_err(|source| LoadError::Polars {
                file: self.file,
                source,
            })
    }

    fn require<T>(&self, column: &str, values: Option<Vec<T>>) -> Result<Vec<T>, LoadError> {
        values.ok_or_else(|| LoadError::MissingColumn {
            file: self.file,
            column: column.to_string(),
        })
    }

    fn strings(&self, column: &str) -> Result<Option<Vec<Option<String>>>, LoadError> {
        let Some(series) = self.cast(column, &DataType::String)? else {
            return Ok(None);
        };
        let ca = series.str().map_err(|source| LoadError::Polars {
            file: self.file,
            source,
        })?;
        Ok(Some(ca.into_iter().map(|v| v.map(str::to_owned)).collect()))
    }

    fn ints(&self, column: &str) -> Result<Option<Vec<Option<i64>>>, LoadError> {
        let Some(series) = self.cast(column, &DataType::Int64)? else {
            return Ok(None);
        };
        let ca = series.i64().map_err(|source| LoadError::Polars {
            file: self.file,
            source,
        })?;
        Ok(Some(ca.into_iter().collect()))
    }

    fn floats(&self, column: &str) -> Result<Option<Vec<Option<f64>>>, LoadError> {
        let Some(series) = self.cast(column, &DataType::Float64)? else {
            return Ok(None);
        };
        let ca = series.f64().map_err(|source| LoadError::Polars {
            file: self.file,
            source,
        })?;
        Ok(Some(ca.into_iter().collect()))
    }

    pub(crate) fn required_str(&self, column: &str) -> Result<Vec<Option<String>>, LoadError> {
        let values = self.strings(column)?;
        self.require(column, values)
    }

    pub(crate) fn optional_str(&self, column: &str) -> Result<Vec<Option<String>>, LoadError> {
        Ok(self
            .strings(column)?
            .unwrap_or_else(|| vec![None; self.height()]))
    }

    pub(crate) fn required_i64(&self, column: &str) -> Result<Vec<Option<i64>>, LoadError> {
        let values = self.ints(column)?;
        self.require(column, values)
    }

    pub(crate) fn optional_i64(&self, column: &str) -> Result<Vec<Option<i64>>, LoadError> {
        Ok(self.ints(column)?.unwrap_or_else(|| vec![None; self.height()]))
    }

    pub(crate) fn required_f64(&self, column: &str) -> Result<Vec<Option<f64>>, LoadError> {
        let values = self.floats(column)?;
        self.require(column, values)
    }

    pub(crate) fn optional_f64(&self, column: &str) -> Result<Vec<Option<f64>>, LoadError> {
        Ok(self
            .floats(column)?
            .unwrap_or_else(|| vec![None; self.height()]))
    }

    /// Timestamps stored as text. Blank cells are `None`; anything unparseable
    /// fails the load.
    pub(crate) fn required_timestamp(
        &self,
        column: &str,
    ) -> Result<Vec<Option<NaiveDateTime>>, LoadError> {
        self.required_str(column)?
            .into_iter()
            .map(|cell| match cell.as_deref().map(str::trim) {
                None | Some("") => Ok(None),
                Some(text) => parse_timestamp(text).map(Some).ok_or_else(|| {
                    LoadError::InvalidTimestamp {
                        file: self.file,
                        column: column.to_string(),
                        value: text.to_string(),
                    }
                }),
            })
            .collect()
    }
}

/// Parses `2017-10-10 21:25:13`-style timestamps; a bare date means midnight.
pub(crate) fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
