//! Per-session snapshot of the loaded tables.
//!
//! A [`Session`] loads the parquet files the first time they are asked for and
//! hands out the same `Arc<Tables>` afterwards. There is no process-wide cache:
//! a new session (or a new process) reads from disk again.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::loader::{LoadError, Tables, load_tables};

/// Owns the data directory and the lazily loaded snapshot.
#[derive(Debug)]
pub struct Session {
    data_dir: PathBuf,
    tables: OnceCell<Arc<Tables>>,
}

impl Session {
    /// A session reading from `data_dir`. Nothing is loaded yet.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            tables: OnceCell::new(),
        }
    }

    /// A session over tables that are already in memory.
    pub fn from_tables(data_dir: impl Into<PathBuf>, tables: Tables) -> Self {
        Self {
            data_dir: data_dir.into(),
            tables: OnceCell::with_value(Arc::new(tables)),
        }
    }

    /// Directory the tables are read from.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The snapshot, loading it on first use.
    ///
    /// A failed load is not cached; the next call tries again.
    pub fn tables(&self) -> Result<Arc<Tables>, LoadError> {
        self.tables
            .get_or_try_init(|| {
                tracing::info!(dir = %self.data_dir.display(), "loading dataset snapshot");
                load_tables(&self.data_dir).map(Arc::new)
            })
            .cloned()
    }

    /// Whether the snapshot has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.tables.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preloaded_session_never_touches_disk() {
        let session = Session::from_tables("/nonexistent", Tables::default());
        assert!(session.is_loaded());
        let a = session.tables().unwrap();
        let b = session.tables().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn failed_load_is_retried() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::new(dir.path());
        assert!(session.tables().is_err());
        assert!(!session.is_loaded());
    }
}
