use std::path::PathBuf;

use thiserror::Error;

use crate::sources::SourceError;

/// The unified error type for the `olist_ingestor` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The remote source could not deliver the dataset bytes.
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// The downloaded archive is malformed or could not be extracted.
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// The archive extracted cleanly but did not contain the expected CSV.
    #[error("Archive member {} not found after extraction", .0.display())]
    MissingArchiveMember(PathBuf),

    /// The CSV has no stray index column to drop.
    #[error("Column `{0}` not found")]
    MissingColumn(String),

    /// An error related to configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the Polars library.
    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}
