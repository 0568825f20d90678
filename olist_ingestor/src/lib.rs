//! Offline preparation of the Olist datasets: download each published CSV
//! (or ZIP archive), drop the stray positional-index column and store it as
//! parquet for the dashboard to load.

#[cfg(feature = "cli")]
pub mod cli;
pub mod catalog;
pub mod errors;
pub mod io;
pub mod pipeline;
pub mod sources;

pub use catalog::{Catalog, DatasetSource};
pub use errors::Error;
pub use pipeline::{IngestReport, Ingestor};
