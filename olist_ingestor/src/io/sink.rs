use std::fs;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use tempfile::NamedTempFile;

use crate::errors::Error;

/// Writes data frames as parquet files into one directory.
///
/// Each write goes to a temporary file in the target directory and is renamed
/// into place, so re-running overwrites and a failed write leaves the previous
/// file untouched.
pub struct ParquetSink {
    dir: PathBuf,
}

impl ParquetSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `df` to `<dir>/<file_name>` and returns the final path.
    pub fn write(&self, df: &mut DataFrame, file_name: &str) -> Result<PathBuf, Error> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }

        let output_path = self.dir.join(file_name);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        ParquetWriter::new(tmp.as_file_mut()).finish(df)?;
        tmp.persist(&output_path).map_err(|e| e.error)?;

        Ok(output_path)
    }
}
