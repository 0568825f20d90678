//! Typed rows of the eight Olist tables.
//!
//! Every struct mirrors the columns the dashboard reads from one parquet file;
//! columns it never looks at are not carried. Rows are immutable once loaded.

use chrono::NaiveDateTime;
use serde::Serialize;

/// Delivery outcome of an order relative to its estimate.
///
/// Missing timestamps are `Unknown` rather than on time, so incomplete records
/// are never counted as punctual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// Delivered on or before the estimated date.
    OnTime,
    /// Delivered strictly after the estimated date.
    Late,
    /// Either timestamp is missing.
    Unknown,
}

impl DeliveryStatus {
    /// `Some(true)` for late, `Some(false)` for on time, `None` when unknown.
    pub fn is_late(self) -> Option<bool> {
        match self {
            Self::OnTime => Some(false),
            Self::Late => Some(true),
            Self::Unknown => None,
        }
    }
}

/// A row of `order_df`.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    /// Unique order key.
    pub order_id: String,
    /// Customer who placed the order.
    pub customer_id: String,
    /// When the customer received the parcel.
    pub delivered_customer_date: Option<NaiveDateTime>,
    /// Delivery date promised at purchase time.
    pub estimated_delivery_date: Option<NaiveDateTime>,
}

const SECONDS_PER_DAY: i64 = 86_400;

impl Order {
    /// Classifies the order as on time, late or unknown.
    pub fn delivery_status(&self) -> DeliveryStatus {
        match (self.delivered_customer_date, self.estimated_delivery_date) {
            (Some(delivered), Some(estimated)) if delivered > estimated => DeliveryStatus::Late,
            (Some(_), Some(_)) => DeliveryStatus::OnTime,
            _ => DeliveryStatus::Unknown,
        }
    }

    /// Whole days between estimate and delivery, floored (`-2h` is `-1`).
    ///
    /// `None` when either timestamp is missing.
    pub fn delay_days(&self) -> Option<i64> {
        let delivered = self.delivered_customer_date?;
        let estimated = self.estimated_delivery_date?;
        let secs = (delivered - estimated).num_seconds();
        Some(secs.div_euclid(SECONDS_PER_DAY))
    }
}

/// A row of `orders_customers_df`: where a customer lives.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerLocation {
    /// Customer key referenced by [`Order::customer_id`].
    pub customer_id: String,
    /// Postal prefix used to find coordinates.
    pub zip_code_prefix: i64,
    /// Order key, when the export carries it.
    pub order_id: Option<String>,
    /// Customer city, when present.
    pub city: Option<String>,
    /// Customer state (UF), when present.
    pub state: Option<String>,
}

/// A row of `geolocation_df`. Several rows may share a zip prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPoint {
    /// Postal prefix this coordinate belongs to.
    pub zip_code_prefix: i64,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// A row of `order_items_df`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    /// Order the item belongs to.
    pub order_id: String,
    /// Seller who fulfilled the item.
    pub seller_id: String,
    /// Product sold, when present.
    pub product_id: Option<String>,
    /// Item price, when present.
    pub price: Option<f64>,
}

/// A row of `order_payments_df`.
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    /// Order being paid.
    pub order_id: String,
    /// Payment method, e.g. `credit_card`, `boleto` or the anomalous `not_defined`.
    pub payment_type: String,
    /// Amount paid with this method, when present.
    pub payment_value: Option<f64>,
}

/// Review score, always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ReviewScore(u8);

impl ReviewScore {
    /// Lowest possible score.
    pub const MIN: u8 = 1;
    /// Highest possible score.
    pub const MAX: u8 = 5;

    /// Returns `None` for values outside 1..=5.
    pub fn new(value: i64) -> Option<Self> {
        (i64::from(Self::MIN)..=i64::from(Self::MAX))
            .contains(&value)
            .then(|| Self(value as u8))
    }

    /// The score as a plain integer.
    pub fn get(self) -> u8 {
        self.0
    }

    /// The score as a float, for averaging.
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

/// A row of `order_reviews_df`.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    /// Reviewed order.
    pub order_id: String,
    /// Customer rating.
    pub score: ReviewScore,
}

/// A row of `products_df`.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product key.
    pub product_id: String,
    /// Category name in Portuguese, when present.
    pub category_name: Option<String>,
}

/// A row of `sellers_df`.
#[derive(Debug, Clone, PartialEq)]
pub struct Seller {
    /// Seller key.
    pub seller_id: String,
    /// Seller postal prefix, when present.
    pub zip_code_prefix: Option<i64>,
    /// Seller city, when present.
    pub city: Option<String>,
    /// Seller state (UF), when present.
    pub state: Option<String>,
}
