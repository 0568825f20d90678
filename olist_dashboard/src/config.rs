//! Dashboard configuration file.
//!
//! Every key is optional; a missing file or an empty document gives the
//! defaults the dashboard ships with:
//!
//! ```toml
//! data_dir = "/srv/olist"        # overridden by --data-dir and OLIST_DATA_DIR
//! threshold_percent = 10         # seller table filter, 0..=100
//! late_rate_cutoff = 0.05        # seller overview cutoff, [0, 1]
//! top_n = 10                     # worst-offender ranking length
//! min_delay_days = 5             # geographic map filter, strict
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, ensure};
use serde::{Deserialize, Serialize};

use crate::views::geo::DEFAULT_MIN_DELAY_DAYS;
use crate::views::sellers::{
    DEFAULT_LATE_RATE_CUTOFF, DEFAULT_THRESHOLD_PERCENT, DEFAULT_TOP_N, DelayThreshold,
    SellerOptions,
};

/// Tunables read from TOML.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Where the parquet files live, when not given elsewhere.
    pub data_dir: Option<PathBuf>,
    /// Default seller threshold in whole percent.
    pub threshold_percent: u8,
    /// Delay rate above which a seller counts as late.
    pub late_rate_cutoff: f64,
    /// Number of sellers in the worst-offender ranking.
    pub top_n: usize,
    /// Geographic map keeps orders late by more than this many days.
    pub min_delay_days: i64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            threshold_percent: DEFAULT_THRESHOLD_PERCENT,
            late_rate_cutoff: DEFAULT_LATE_RATE_CUTOFF,
            top_n: DEFAULT_TOP_N,
            min_delay_days: DEFAULT_MIN_DELAY_DAYS,
        }
    }
}

impl DashboardConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        let cfg: Self = toml::from_str(s).context("invalid dashboard config TOML")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads, parses and validates a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("loading config {}", path.display()))
    }

    /// Rejects out-of-range values.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.threshold_percent <= 100,
            "threshold_percent must be within 0..=100, got {}",
            self.threshold_percent
        );
        ensure!(
            (0.0..=1.0).contains(&self.late_rate_cutoff),
            "late_rate_cutoff must be within [0, 1], got {}",
            self.late_rate_cutoff
        );
        ensure!(self.top_n > 0, "top_n must be at least 1");
        ensure!(
            self.min_delay_days >= 0,
            "min_delay_days must not be negative, got {}",
            self.min_delay_days
        );
        Ok(())
    }

    /// Seller view options, with `threshold_percent` replaced by `override_percent`
    /// when given.
    pub fn seller_options(&self, override_percent: Option<u8>) -> anyhow::Result<SellerOptions> {
        let percent = override_percent.unwrap_or(self.threshold_percent);
        Ok(SellerOptions {
            threshold: DelayThreshold::from_percent(percent)?,
            late_rate_cutoff: self.late_rate_cutoff,
            top_n: self.top_n,
        })
    }
}
