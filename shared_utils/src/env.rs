use std::path::PathBuf;

use thiserror::Error;

/// Environment variable naming the directory that holds the parquet datasets.
pub const DATA_DIR_VAR: &str = "OLIST_DATA_DIR";

/// An environment variable required by the application is not set.
#[derive(Debug, Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVarError(pub String);

/// Reads an environment variable, returning a structured error if it's missing.
///
/// This is a thin wrapper around `std::env::var` that provides a more
/// ergonomic and specific error type for missing variables.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, MissingEnvVarError> {
    std::env::var(name).map_err(|_| MissingEnvVarError(name.to_string()))
}

/// Resolves the dataset directory: an explicit CLI value wins, then
/// `OLIST_DATA_DIR`, then `fallback`.
///
/// An empty `OLIST_DATA_DIR` counts as unset.
pub fn resolve_data_dir(explicit: Option<PathBuf>, fallback: PathBuf) -> PathBuf {
    if let Some(dir) = explicit {
        return dir;
    }
    match get_env_var(DATA_DIR_VAR) {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => fallback,
    }
}
