#![deny(missing_docs)]
//! Olist customer-satisfaction dashboard.
//!
//! Loads the eight parquet tables written by `olist-ingest` into a per-session
//! snapshot and derives six views from it: rating distribution, delay impact,
//! seller performance, payment satisfaction, a geographic delay map and a
//! recommendations panel. Each view is rendered as text or JSON together with
//! a description of the figure an external renderer should draw.
//!
//! ```no_run
//! use olist_dashboard::{Dashboard, DashboardConfig, Selection, Session};
//!
//! let dashboard = Dashboard::new(Session::new("data"), &DashboardConfig::default(), None)?;
//! println!("{}", dashboard.report(Selection::All)?);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod dashboard;
pub mod loader;
pub mod models;
pub mod render;
pub mod session;
pub mod views;

pub use config::DashboardConfig;
pub use dashboard::{Dashboard, ParseViewError, Selection, View};
pub use loader::{DatasetFile, LoadError, Tables, load_tables};
pub use render::{DashboardReport, ViewReport};
pub use session::Session;
