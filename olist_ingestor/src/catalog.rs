//! Dataset catalog: which CSV sources to ingest and where each one lands.
//!
//! The catalog is a TOML document with one `[[datasets]]` table per source:
//!
//! ```toml
//! [[datasets]]
//! name = "geolocation"
//! url = "https://example.org/geolocation_dataset.zip"
//! archive_member = "geolocation_dataset.csv"   # only for ZIP sources
//! drop_column = "Unnamed: 0"                   # optional, this is the default
//! ```
//!
//! Normalization trims every field, lowercases names and rejects empty or
//! duplicate names. The default catalog (the eight Olist tables) is embedded
//! in the binary; see [`Catalog::builtin`].

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Header given to an unnamed positional-index column in the published CSVs.
pub const DEFAULT_INDEX_COLUMN: &str = "Unnamed: 0";

const BUILTIN_CATALOG: &str = include_str!("../datasets.toml");

/// Ordered list of dataset sources.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    pub datasets: Vec<DatasetSource>,
}

/// One CSV source and the parquet file it produces.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DatasetSource {
    /// Dataset name; the output file is `<name>_df.parquet`.
    pub name: String,
    /// Where to fetch the CSV (or the ZIP archive holding it).
    pub url: String,
    /// CSV file expected inside the archive. Set only for ZIP sources.
    pub archive_member: Option<String>,
    /// Positional-index column left behind by an earlier export step.
    #[serde(default = "default_index_column")]
    pub drop_column: String,
}

fn default_index_column() -> String {
    DEFAULT_INDEX_COLUMN.to_string()
}

/// How a dataset's bytes are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind<'a> {
    /// The URL points straight at the CSV.
    DirectCsv,
    /// The URL points at a ZIP archive containing the named CSV.
    Zip { member: &'a str },
}

impl DatasetSource {
    pub fn kind(&self) -> SourceKind<'_> {
        match self.archive_member.as_deref() {
            Some(member) => SourceKind::Zip { member },
            None => SourceKind::DirectCsv,
        }
    }

    pub fn output_file_name(&self) -> String {
        format!("{}_df.parquet", self.name)
    }
}

impl Catalog {
    /// The eight Olist datasets the dashboard loads.
    pub fn builtin() -> Result<Self, Error> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Parse and normalize a catalog from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, Error> {
        let mut cat: Catalog =
            toml::from_str(s).map_err(|e| Error::Config(format!("invalid catalog TOML: {e}")))?;
        cat.normalize()?;
        Ok(cat)
    }

    /// Read a catalog file from disk, parse and normalize it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Config(format!(
                "read catalog file {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_toml_str(&text)
    }

    /// Trim fields, lowercase names and validate the entries in place.
    pub fn normalize(&mut self) -> Result<(), Error> {
        let mut seen = HashSet::new();
        for ds in &mut self.datasets {
            ds.name = ds.name.trim().to_lowercase();
            if ds.name.is_empty() {
                return Err(Error::Config("dataset name cannot be empty".into()));
            }
            if !seen.insert(ds.name.clone()) {
                return Err(Error::Config(format!("duplicate dataset name: {}", ds.name)));
            }

            ds.url = ds.url.trim().to_string();
            if ds.url.is_empty() {
                return Err(Error::Config(format!("dataset {} has an empty url", ds.name)));
            }

            ds.drop_column = ds.drop_column.trim().to_string();

            if let Some(member) = ds.archive_member.take() {
                let member = member.trim().to_string();
                if !member.to_lowercase().ends_with(".csv") {
                    return Err(Error::Config(format!(
                        "dataset {}: archive_member must name a .csv file, got '{member}'",
                        ds.name
                    )));
                }
                ds.archive_member = Some(member);
            }
        }
        Ok(())
    }

    /// Keep only the named datasets, preserving catalog order.
    ///
    /// Fails if a requested name is not in the catalog.
    pub fn select(mut self, names: &[String]) -> Result<Self, Error> {
        if names.is_empty() {
            return Ok(self);
        }
        let wanted: HashSet<String> = names.iter().map(|n| n.trim().to_lowercase()).collect();
        for name in &wanted {
            if !self.datasets.iter().any(|d| &d.name == name) {
                return Err(Error::Config(format!("unknown dataset: {name}")));
            }
        }
        self.datasets.retain(|d| wanted.contains(&d.name));
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_lists_the_eight_tables() {
        let cat = Catalog::builtin().unwrap();
        let names: Vec<_> = cat.datasets.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "orders_customers",
                "geolocation",
                "order_items",
                "order_payments",
                "order_reviews",
                "order",
                "products",
                "sellers",
            ]
        );

        let zipped: Vec<_> = cat
            .datasets
            .iter()
            .filter(|d| matches!(d.kind(), SourceKind::Zip { .. }))
            .collect();
        assert_eq!(zipped.len(), 1);
        assert_eq!(zipped[0].output_file_name(), "geolocation_df.parquet");
        assert!(cat.datasets.iter().all(|d| d.drop_column == DEFAULT_INDEX_COLUMN));
    }

    #[test]
    fn normalizes_names_and_members() {
        let cat = Catalog::from_toml_str(
            r#"
            [[datasets]]
            name = "  Geolocation "
            url = " https://example.org/geo.zip "
            archive_member = " geolocation_dataset.csv "
            drop_column = "idx"
            "#,
        )
        .unwrap();

        let ds = &cat.datasets[0];
        assert_eq!(ds.name, "geolocation");
        assert_eq!(ds.url, "https://example.org/geo.zip");
        assert_eq!(
            ds.kind(),
            SourceKind::Zip {
                member: "geolocation_dataset.csv"
            }
        );
        assert_eq!(ds.drop_column, "idx");
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = Catalog::from_toml_str(
            r#"
            [[datasets]]
            name = "order"
            url = "https://example.org/a.csv"
            [[datasets]]
            name = "ORDER"
            url = "https://example.org/b.csv"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate dataset name"));
    }

    #[test]
    fn archive_member_must_be_csv() {
        let err = Catalog::from_toml_str(
            r#"
            [[datasets]]
            name = "geo"
            url = "https://example.org/geo.zip"
            archive_member = "geo.json"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains(".csv"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = Catalog::from_toml_str(
            r#"
            [[datasets]]
            name = "geo"
            url = "https://example.org/geo.csv"
            format = "csv"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid catalog TOML"));
    }

    #[test]
    fn select_keeps_catalog_order_and_rejects_unknown() {
        let cat = Catalog::builtin().unwrap();
        let picked = cat
            .clone()
            .select(&["sellers".into(), "Order".into()])
            .unwrap();
        let names: Vec<_> = picked.datasets.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["order", "sellers"]);

        let err = cat.select(&["customers".into()]).unwrap_err();
        assert!(err.to_string().contains("unknown dataset: customers"));
    }
}
