//! Table loader: reads the eight parquet files into typed, immutable tables.
//!
//! Loading is all-or-nothing. A missing file, an unreadable file, a missing
//! required column or an unparseable timestamp fails the whole load, because
//! no view can be drawn from a partial table set.
//!
//! Rows whose key columns are null, and reviews whose score is missing or
//! outside 1..=5, are dropped with a warning rather than failing the load.

mod columns;

use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::*;

use crate::models::{
    CustomerLocation, GeoPoint, Order, OrderItem, Payment, Product, Review, ReviewScore, Seller,
};
use columns::Frame;

/// The eight parquet files the dashboard needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetFile {
    /// `orders_customers_df.parquet`
    OrdersCustomers,
    /// `geolocation_df.parquet`
    Geolocation,
    /// `order_items_df.parquet`
    OrderItems,
    /// `order_payments_df.parquet`
    OrderPayments,
    /// `order_reviews_df.parquet`
    OrderReviews,
    /// `order_df.parquet`
    Orders,
    /// `products_df.parquet`
    Products,
    /// `sellers_df.parquet`
    Sellers,
}

impl DatasetFile {
    /// All files, in load order.
    pub const ALL: [DatasetFile; 8] = [
        DatasetFile::OrdersCustomers,
        DatasetFile::Geolocation,
        DatasetFile::OrderItems,
        DatasetFile::OrderPayments,
        DatasetFile::OrderReviews,
        DatasetFile::Orders,
        DatasetFile::Products,
        DatasetFile::Sellers,
    ];

    /// File name without extension, e.g. `order_df`.
    pub fn stem(self) -> &'static str {
        match self {
            Self::OrdersCustomers => "orders_customers_df",
            Self::Geolocation => "geolocation_df",
            Self::OrderItems => "order_items_df",
            Self::OrderPayments => "order_payments_df",
            Self::OrderReviews => "order_reviews_df",
            Self::Orders => "order_df",
            Self::Products => "products_df",
            Self::Sellers => "sellers_df",
        }
    }

    /// File name on disk, e.g. `order_df.parquet`.
    pub fn file_name(self) -> String {
        format!("{}.parquet", self.stem())
    }
}

impl fmt::Display for DatasetFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stem())
    }
}

/// Errors that abort a load.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file does not exist in the data directory.
    #[error("dataset file {} not found (run olist-ingest first?)", .path.display())]
    MissingFile {
        /// Expected location.
        path: PathBuf,
    },

    /// The file exists but could not be opened.
    #[error("failed to open {}: {source}", .path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid parquet.
    #[error("failed to read {}: {source}", .path.display())]
    Parquet {
        /// File that failed.
        path: PathBuf,
        /// Underlying polars error.
        source: PolarsError,
    },

    /// A column the dashboard relies on is absent.
    #[error("{file}: missing required column `{column}`")]
    MissingColumn {
        /// Dataset missing the column.
        file: DatasetFile,
        /// Column name.
        column: String,
    },

    /// A timestamp cell holds text that is not a date.
    #[error("{file}: column `{column}` holds an invalid timestamp '{value}'")]
    InvalidTimestamp {
        /// Dataset holding the cell.
        file: DatasetFile,
        /// Column name.
        column: String,
        /// Offending text.
        value: String,
    },

    /// A column could not be converted to the expected type.
    #[error("{file}: {source}")]
    Polars {
        /// Dataset being converted.
        file: DatasetFile,
        /// Underlying polars error.
        source: PolarsError,
    },
}

/// In-memory snapshot of all eight tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tables {
    /// Customer-to-zip rows.
    pub orders_customers: Vec<CustomerLocation>,
    /// Zip-to-coordinate rows.
    pub geolocation: Vec<GeoPoint>,
    /// Order-to-seller rows.
    pub order_items: Vec<OrderItem>,
    /// Payment rows.
    pub order_payments: Vec<Payment>,
    /// Review rows with valid scores.
    pub order_reviews: Vec<Review>,
    /// Orders with delivery timestamps.
    pub orders: Vec<Order>,
    /// Product catalog.
    pub products: Vec<Product>,
    /// Seller directory.
    pub sellers: Vec<Seller>,
}

impl Tables {
    /// Row count per file, in [`DatasetFile::ALL`] order.
    pub fn row_counts(&self) -> [(DatasetFile, usize); 8] {
        [
            (DatasetFile::OrdersCustomers, self.orders_customers.len()),
            (DatasetFile::Geolocation, self.geolocation.len()),
            (DatasetFile::OrderItems, self.order_items.len()),
            (DatasetFile::OrderPayments, self.order_payments.len()),
            (DatasetFile::OrderReviews, self.order_reviews.len()),
            (DatasetFile::Orders, self.orders.len()),
            (DatasetFile::Products, self.products.len()),
            (DatasetFile::Sellers, self.sellers.len()),
        ]
    }
}

/// Reads all eight files from `dir`.
pub fn load_tables(dir: &Path) -> Result<Tables, LoadError> {
    let tables = Tables {
        orders_customers: parse_orders_customers(&read_frame(dir, DatasetFile::OrdersCustomers)?)?,
        geolocation: parse_geolocation(&read_frame(dir, DatasetFile::Geolocation)?)?,
        order_items: parse_order_items(&read_frame(dir, DatasetFile::OrderItems)?)?,
        order_payments: parse_payments(&read_frame(dir, DatasetFile::OrderPayments)?)?,
        order_reviews: parse_reviews(&read_frame(dir, DatasetFile::OrderReviews)?)?,
        orders: parse_orders(&read_frame(dir, DatasetFile::Orders)?)?,
        products: parse_products(&read_frame(dir, DatasetFile::Products)?)?,
        sellers: parse_sellers(&read_frame(dir, DatasetFile::Sellers)?)?,
    };

    for (file, rows) in tables.row_counts() {
        tracing::debug!(%file, rows, "table loaded");
    }
    Ok(tables)
}

/// Reads one parquet file as a raw frame.
pub fn read_frame(dir: &Path, file: DatasetFile) -> Result<DataFrame, LoadError> {
    let path = dir.join(file.file_name());
    if !path.is_file() {
        return Err(LoadError::MissingFile { path });
    }
    let handle = File::open(&path).map_err(|source| LoadError::Io {
        path: path.clone(),
        source,
    })?;
    ParquetReader::new(handle)
        .finish()
        .map_err(|source| LoadError::Parquet { path, source })
}

fn warn_dropped(file: DatasetFile, dropped: usize, reason: &str) {
    if dropped > 0 {
        tracing::warn!(%file, dropped, reason, "rows skipped while loading");
    }
}

fn parse_orders_customers(df: &DataFrame) -> Result<Vec<CustomerLocation>, LoadError> {
    let frame = Frame::new(DatasetFile::OrdersCustomers, df);
    let customer_ids = frame.required_str("customer_id")?;
    let zips = frame.required_i64("customer_zip_code_prefix")?;
    let order_ids = frame.optional_str("order_id")?;
    let cities = frame.optional_str("customer_city")?;
    let states = frame.optional_str("customer_state")?;

    let mut rows = Vec::with_capacity(frame.height());
    for ((((customer_id, zip), order_id), city), state) in customer_ids
        .into_iter()
        .zip(zips)
        .zip(order_ids)
        .zip(cities)
        .zip(states)
    {
        if let (Some(customer_id), Some(zip_code_prefix)) = (customer_id, zip) {
            rows.push(CustomerLocation {
                customer_id,
                zip_code_prefix,
                order_id,
                city,
                state,
            });
        }
    }
    warn_dropped(
        DatasetFile::OrdersCustomers,
        frame.height() - rows.len(),
        "null customer_id or zip prefix",
    );
    Ok(rows)
}

fn parse_geolocation(df: &DataFrame) -> Result<Vec<GeoPoint>, LoadError> {
    let frame = Frame::new(DatasetFile::Geolocation, df);
    let zips = frame.required_i64("geolocation_zip_code_prefix")?;
    let lats = frame.required_f64("geolocation_lat")?;
    let lngs = frame.required_f64("geolocation_lng")?;

    let rows: Vec<GeoPoint> = zips
        .into_iter()
        .zip(lats)
        .zip(lngs)
        .filter_map(|((zip, lat), lng)| {
            Some(GeoPoint {
                zip_code_prefix: zip?,
                lat: lat?,
                lng: lng?,
            })
        })
        .collect();
    warn_dropped(
        DatasetFile::Geolocation,
        frame.height() - rows.len(),
        "null zip prefix or coordinate",
    );
    Ok(rows)
}

fn parse_order_items(df: &DataFrame) -> Result<Vec<OrderItem>, LoadError> {
    let frame = Frame::new(DatasetFile::OrderItems, df);
    let order_ids = frame.required_str("order_id")?;
    let seller_ids = frame.required_str("seller_id")?;
    let product_ids = frame.optional_str("product_id")?;
    let prices = frame.optional_f64("price")?;

    let rows: Vec<OrderItem> = order_ids
        .into_iter()
        .zip(seller_ids)
        .zip(product_ids)
        .zip(prices)
        .filter_map(|(((order_id, seller_id), product_id), price)| {
            Some(OrderItem {
                order_id: order_id?,
                seller_id: seller_id?,
                product_id,
                price,
            })
        })
        .collect();
    warn_dropped(
        DatasetFile::OrderItems,
        frame.height() - rows.len(),
        "null order_id or seller_id",
    );
    Ok(rows)
}

fn parse_payments(df: &DataFrame) -> Result<Vec<Payment>, LoadError> {
    let frame = Frame::new(DatasetFile::OrderPayments, df);
    let order_ids = frame.required_str("order_id")?;
    let types = frame.required_str("payment_type")?;
    let values = frame.optional_f64("payment_value")?;

    let rows: Vec<Payment> = order_ids
        .into_iter()
        .zip(types)
        .zip(values)
        .filter_map(|((order_id, payment_type), payment_value)| {
            Some(Payment {
                order_id: order_id?,
                payment_type: payment_type?,
                payment_value,
            })
        })
        .collect();
    warn_dropped(
        DatasetFile::OrderPayments,
        frame.height() - rows.len(),
        "null order_id or payment_type",
    );
    Ok(rows)
}

fn parse_reviews(df: &DataFrame) -> Result<Vec<Review>, LoadError> {
    let frame = Frame::new(DatasetFile::OrderReviews, df);
    let order_ids = frame.required_str("order_id")?;
    let scores = frame.required_i64("review_score")?;

    let rows: Vec<Review> = order_ids
        .into_iter()
        .zip(scores)
        .filter_map(|(order_id, score)| {
            Some(Review {
                order_id: order_id?,
                score: ReviewScore::new(score?)?,
            })
        })
        .collect();
    warn_dropped(
        DatasetFile::OrderReviews,
        frame.height() - rows.len(),
        "null order_id or score outside 1..=5",
    );
    Ok(rows)
}

fn parse_orders(df: &DataFrame) -> Result<Vec<Order>, LoadError> {
    let frame = Frame::new(DatasetFile::Orders, df);
    let order_ids = frame.required_str("order_id")?;
    let customer_ids = frame.required_str("customer_id")?;
    let delivered = frame.required_timestamp("order_delivered_customer_date")?;
    let estimated = frame.required_timestamp("order_estimated_delivery_date")?;

    let rows: Vec<Order> = order_ids
        .into_iter()
        .zip(customer_ids)
        .zip(delivered)
        .zip(estimated)
        .filter_map(|(((order_id, customer_id), delivered), estimated)| {
            Some(Order {
                order_id: order_id?,
                customer_id: customer_id?,
                delivered_customer_date: delivered,
                estimated_delivery_date: estimated,
            })
        })
        .collect();
    warn_dropped(
        DatasetFile::Orders,
        frame.height() - rows.len(),
        "null order_id or customer_id",
    );
    Ok(rows)
}

fn parse_products(df: &DataFrame) -> Result<Vec<Product>, LoadError> {
    let frame = Frame::new(DatasetFile::Products, df);
    let ids = frame.required_str("product_id")?;
    let categories = frame.optional_str("product_category_name")?;

    let rows: Vec<Product> = ids
        .into_iter()
        .zip(categories)
        .filter_map(|(product_id, category_name)| {
            Some(Product {
                product_id: product_id?,
                category_name,
            })
        })
        .collect();
    warn_dropped(
        DatasetFile::Products,
        frame.height() - rows.len(),
        "null product_id",
    );
    Ok(rows)
}

fn parse_sellers(df: &DataFrame) -> Result<Vec<Seller>, LoadError> {
    let frame = Frame::new(DatasetFile::Sellers, df);
    let ids = frame.required_str("seller_id")?;
    let zips = frame.optional_i64("seller_zip_code_prefix")?;
    let cities = frame.optional_str("seller_city")?;
    let states = frame.optional_str("seller_state")?;

    let rows: Vec<Seller> = ids
        .into_iter()
        .zip(zips)
        .zip(cities)
        .zip(states)
        .filter_map(|(((seller_id, zip_code_prefix), city), state)| {
            Some(Seller {
                seller_id: seller_id?,
                zip_code_prefix,
                city,
                state,
            })
        })
        .collect();
    warn_dropped(
        DatasetFile::Sellers,
        frame.height() - rows.len(),
        "null seller_id",
    );
    Ok(rows)
}
