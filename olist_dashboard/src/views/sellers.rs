//! Seller delay performance.
//!
//! A seller's delay rate is the share of its order-item rows, joined to
//! orders, whose order arrived late. Rows whose order has an unknown delivery
//! status do not count either way; a seller left with no known rows has no
//! rate and is absent from every ranking.

use std::cmp::Ordering;
use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::loader::Tables;
use crate::views::stats::round2;

/// Default maximum delay rate shown in the filtered table (10%).
pub const DEFAULT_THRESHOLD_PERCENT: u8 = 10;
/// Sellers above this delay rate count as late in the overview.
pub const DEFAULT_LATE_RATE_CUTOFF: f64 = 0.05;
/// Length of the worst-offender ranking.
pub const DEFAULT_TOP_N: usize = 10;

/// A delay-rate threshold within [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct DelayThreshold(f64);

/// The threshold was outside its range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("delay threshold must be within {range}, got {value}")]
pub struct InvalidThreshold {
    range: &'static str,
    value: String,
}

impl DelayThreshold {
    /// From a whole percentage 0..=100, the slider's unit.
    pub fn from_percent(percent: u8) -> Result<Self, InvalidThreshold> {
        if percent > 100 {
            return Err(InvalidThreshold {
                range: "0..=100 percent",
                value: percent.to_string(),
            });
        }
        Ok(Self(f64::from(percent) / 100.0))
    }

    /// From a fraction in [0, 1].
    pub fn from_fraction(fraction: f64) -> Result<Self, InvalidThreshold> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(InvalidThreshold {
                range: "[0, 1]",
                value: fraction.to_string(),
            });
        }
        Ok(Self(fraction))
    }

    /// The threshold as a fraction.
    pub fn fraction(self) -> f64 {
        self.0
    }
}

impl Default for DelayThreshold {
    fn default() -> Self {
        Self(f64::from(DEFAULT_THRESHOLD_PERCENT) / 100.0)
    }
}

/// Knobs for [`seller_performance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SellerOptions {
    /// Maximum delay rate kept in [`SellerPerformance::within_threshold`].
    pub threshold: DelayThreshold,
    /// Rate above which a seller counts as late in the overview.
    pub late_rate_cutoff: f64,
    /// Length of [`SellerPerformance::worst_offenders`].
    pub top_n: usize,
}

impl Default for SellerOptions {
    fn default() -> Self {
        Self {
            threshold: DelayThreshold::default(),
            late_rate_cutoff: DEFAULT_LATE_RATE_CUTOFF,
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// One seller's delay rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SellerDelay {
    /// Seller key.
    pub seller_id: String,
    /// Late rows / known rows, within [0, 1].
    pub delay_rate: f64,
    /// Order-item rows with a known delivery status.
    pub rows: usize,
}

/// Count of sellers in one overview category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// Category label, e.g. `<= 5%`.
    pub label: String,
    /// Sellers in the category.
    pub count: usize,
}

/// How many sellers exceed the late-rate cutoff.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LateSellerOverview {
    /// Cutoff used, as a fraction.
    pub cutoff: f64,
    /// Sellers with a delay rate strictly above the cutoff.
    pub late_sellers: usize,
    /// Sellers with a delay rate.
    pub total_sellers: usize,
    /// `late_sellers / total_sellers` in percent, two decimals; 0 with no sellers.
    pub late_share_percent: f64,
    /// `<= cutoff` and `> cutoff` counts, in that order.
    pub split: [CategoryCount; 2],
}

/// Everything the seller view shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SellerPerformance {
    /// Threshold the table was filtered with.
    pub threshold: DelayThreshold,
    /// Sellers with `delay_rate <= threshold`, highest rate first.
    pub within_threshold: Vec<SellerDelay>,
    /// The highest delay rates among all sellers.
    pub worst_offenders: Vec<SellerDelay>,
    /// Cutoff statistics over all sellers.
    pub overview: LateSellerOverview,
}

/// Delay rate of every seller with at least one known-status row, highest
/// rate first, ties by seller id.
pub fn seller_delay_rates(tables: &Tables) -> Vec<SellerDelay> {
    let late_by_order: HashMap<&str, Option<bool>> = tables
        .orders
        .iter()
        .map(|o| (o.order_id.as_str(), o.delivery_status().is_late()))
        .collect();

    // seller -> (late rows, known rows)
    let mut tally: IndexMap<&str, (usize, usize)> = IndexMap::new();
    for item in &tables.order_items {
        let Some(Some(late)) = late_by_order.get(item.order_id.as_str()) else {
            continue;
        };
        let entry = tally.entry(item.seller_id.as_str()).or_default();
        entry.0 += usize::from(*late);
        entry.1 += 1;
    }

    let mut rates: Vec<SellerDelay> = tally
        .into_iter()
        .map(|(seller_id, (late, known))| SellerDelay {
            seller_id: seller_id.to_string(),
            delay_rate: late as f64 / known as f64,
            rows: known,
        })
        .collect();
    rates.sort_by(by_rate_desc);
    rates
}

fn by_rate_desc(a: &SellerDelay, b: &SellerDelay) -> Ordering {
    b.delay_rate
        .total_cmp(&a.delay_rate)
        .then_with(|| a.seller_id.cmp(&b.seller_id))
}

/// Sellers whose rate is at most `threshold`, keeping the input order.
pub fn filter_by_threshold(rates: &[SellerDelay], threshold: DelayThreshold) -> Vec<SellerDelay> {
    rates
        .iter()
        .filter(|s| s.delay_rate <= threshold.fraction())
        .cloned()
        .collect()
}

/// Counts sellers above `cutoff` and splits them into two categories.
pub fn late_seller_overview(rates: &[SellerDelay], cutoff: f64) -> LateSellerOverview {
    let total_sellers = rates.len();
    let late_sellers = rates.iter().filter(|s| s.delay_rate > cutoff).count();
    let late_share_percent = if total_sellers == 0 {
        0.0
    } else {
        round2(late_sellers as f64 / total_sellers as f64 * 100.0)
    };
    let pct = round2(cutoff * 100.0);

    LateSellerOverview {
        cutoff,
        late_sellers,
        total_sellers,
        late_share_percent,
        split: [
            CategoryCount {
                label: format!("<= {pct}%"),
                count: total_sellers - late_sellers,
            },
            CategoryCount {
                label: format!("> {pct}%"),
                count: late_sellers,
            },
        ],
    }
}

/// Builds the seller view: filtered table, worst offenders and overview.
pub fn seller_performance(tables: &Tables, options: &SellerOptions) -> SellerPerformance {
    let rates = seller_delay_rates(tables);
    SellerPerformance {
        threshold: options.threshold,
        within_threshold: filter_by_threshold(&rates, options.threshold),
        worst_offenders: rates.iter().take(options.top_n).cloned().collect(),
        overview: late_seller_overview(&rates, options.late_rate_cutoff),
    }
}
