//! Best-effort ingestion of every catalog entry.
//!
//! Each dataset is fetched, cleaned and written independently. A failure is
//! logged with the offending URL and recorded in the [`IngestReport`]; it never
//! stops the remaining datasets.

use std::fmt;
use std::path::PathBuf;

use polars::prelude::DataFrame;

use crate::catalog::{Catalog, DatasetSource, SourceKind};
use crate::errors::Error;
use crate::io::{archive, csv, sink::ParquetSink};
use crate::sources::DataSource;

/// A dataset that made it to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenDataset {
    pub name: String,
    pub path: PathBuf,
    pub rows: usize,
    pub columns: usize,
}

/// A dataset that did not, and why.
#[derive(Debug)]
pub struct FailedDataset {
    pub name: String,
    pub url: String,
    pub error: Error,
}

/// Outcome of one ingestion run, successes and failures kept apart.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub written: Vec<WrittenDataset>,
    pub failed: Vec<FailedDataset>,
}

impl IngestReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

impl fmt::Display for IngestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.written.is_empty() {
            heading(f, "Written")?;
            for w in &self.written {
                writeln!(
                    f,
                    "+ {}  {} ({} rows x {} columns)",
                    w.name,
                    w.path.display(),
                    w.rows,
                    w.columns
                )?;
            }
        }
        if !self.failed.is_empty() {
            if !self.written.is_empty() {
                writeln!(f)?;
            }
            heading(f, "Failed")?;
            for e in &self.failed {
                writeln!(f, "- {}  {}: {}", e.name, e.url, e.error)?;
            }
        }
        if self.written.is_empty() && self.failed.is_empty() {
            writeln!(f, "No datasets selected")?;
        }
        Ok(())
    }
}

fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{title}")?;
    writeln!(f, "{}", "-".repeat(title.len()))
}

/// Runs catalog entries through fetch → (extract) → parse → drop index → write.
pub struct Ingestor<S> {
    source: S,
    sink: ParquetSink,
}

impl<S: DataSource> Ingestor<S> {
    pub fn new(source: S, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            source,
            sink: ParquetSink::new(out_dir),
        }
    }

    /// Ingests every dataset of `catalog`, collecting per-dataset outcomes.
    pub async fn run(&self, catalog: &Catalog) -> IngestReport {
        let mut report = IngestReport::default();

        for ds in &catalog.datasets {
            match self.ingest_one(ds).await {
                Ok(written) => {
                    tracing::info!(
                        dataset = %written.name,
                        path = %written.path.display(),
                        rows = written.rows,
                        "saved dataset"
                    );
                    report.written.push(written);
                }
                Err(error) => {
                    tracing::error!(dataset = %ds.name, url = %ds.url, %error, "error processing dataset");
                    report.failed.push(FailedDataset {
                        name: ds.name.clone(),
                        url: ds.url.clone(),
                        error,
                    });
                }
            }
        }

        report
    }

    /// Ingests a single dataset.
    pub async fn ingest_one(&self, ds: &DatasetSource) -> Result<WrittenDataset, Error> {
        let bytes = self.source.fetch(&ds.url).await?;

        let csv_bytes = match ds.kind() {
            SourceKind::DirectCsv => bytes,
            SourceKind::Zip { member } => {
                tokio::fs::create_dir_all(self.sink.dir()).await?;
                let path = archive::extract_member(bytes, self.sink.dir(), member)?;
                tokio::fs::read(&path).await?
            }
        };

        let df = csv::read_csv_bytes(csv_bytes)?;
        let mut df: DataFrame = csv::drop_index_column(df, &ds.drop_column)?;
        let path = self.sink.write(&mut df, &ds.output_file_name())?;

        Ok(WrittenDataset {
            name: ds.name.clone(),
            path,
            rows: df.height(),
            columns: df.width(),
        })
    }
}
