use std::io::Cursor;

use polars::prelude::*;

use crate::errors::Error;

/// Parses CSV bytes (with a header row) into a `DataFrame`.
///
/// Values are kept as polars infers them; timestamps stay strings and are
/// parsed downstream.
pub fn read_csv_bytes(bytes: Vec<u8>) -> Result<DataFrame, Error> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(10_000))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()?;
    Ok(df)
}

/// Drops the positional-index column the published CSVs carry.
///
/// Some exports leave that header blank instead of `Unnamed: 0`, so when `column` is that name an
/// empty header is accepted as the same column. A missing column is an error.
pub fn drop_index_column(df: DataFrame, column: &str) -> Result<DataFrame, Error> {
    let names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|n| n.to_string())
        .collect();

    let found = names.iter().find(|n| {
        n.as_str() == column || (column == crate::catalog::DEFAULT_INDEX_COLUMN && n.is_empty())
    });

    match found {
        Some(name) => Ok(df.drop(name)?),
        None => Err(Error::MissingColumn(column.to_string())),
    }
}
