//! Source abstraction for raw dataset bytes.
//!
//! This module defines the [`DataSource`] trait, the seam between the ingest
//! pipeline and wherever the CSV/ZIP bytes come from. [`http::HttpSource`] is
//! the production implementation; tests plug in an in-memory map.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use olist_ingestor::sources::{DataSource, SourceError};
//!
//! struct Fixed(Vec<u8>);
//!
//! #[async_trait]
//! impl DataSource for Fixed {
//!     async fn fetch(&self, _url: &str) -> Result<Vec<u8>, SourceError> {
//!         Ok(self.0.clone())
//!     }
//! }
//! ```

pub mod http;

use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

/// Fetches the raw bytes behind a dataset URL.
#[async_trait]
pub trait DataSource {
    /// Returns the full response body for `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, SourceError>;
}

/// Errors that can occur within a `DataSource` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SourceError {
    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// Network failure or timeout while requesting `url`.
    #[snafu(display("Request to {url} failed: {source}"))]
    Request {
        url: String,
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The server answered with a non-success status.
    #[snafu(display("{url} answered HTTP {status}"))]
    Status {
        url: String,
        status: u16,
        backtrace: Backtrace,
    },

    /// The source has nothing registered for `url`.
    #[snafu(display("No data available for {url}"))]
    NotFound { url: String, backtrace: Backtrace },
}
