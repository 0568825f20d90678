//! Where the badly delayed orders go.
//!
//! Customer rows are joined to orders on `customer_id`, then to every
//! geolocation row sharing the customer's zip prefix. A prefix usually has many
//! coordinate rows, so one order yields several points; the map keeps that
//! density and the number of distinct orders is reported next to it.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::loader::Tables;
use crate::models::{GeoPoint, Order};
use crate::views::stats::mean;

/// Orders must be late by strictly more than this many days to be mapped.
pub const DEFAULT_MIN_DELAY_DAYS: i64 = 5;

/// A map coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

impl LatLng {
    /// `(0, 0)`, the center used when nothing is mapped.
    pub const ORIGIN: Self = Self { lat: 0.0, lng: 0.0 };
}

/// Points to draw plus where to center the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoDelayMap {
    /// Filter applied: `delay > min_delay_days`.
    pub min_delay_days: i64,
    /// One point per (order, geolocation row) pair.
    pub points: Vec<LatLng>,
    /// Mean of the points, or [`LatLng::ORIGIN`] when there are none.
    pub center: LatLng,
    /// Distinct orders behind `points`.
    pub distinct_orders: usize,
}

/// Collects coordinates of orders delayed by more than `min_delay_days`.
pub fn geographic_delays(tables: &Tables, min_delay_days: i64) -> GeoDelayMap {
    let mut orders_by_customer: HashMap<&str, Vec<&Order>> = HashMap::new();
    for order in &tables.orders {
        orders_by_customer
            .entry(order.customer_id.as_str())
            .or_default()
            .push(order);
    }

    let mut coords_by_zip: HashMap<i64, Vec<&GeoPoint>> = HashMap::new();
    for geo in &tables.geolocation {
        coords_by_zip.entry(geo.zip_code_prefix).or_default().push(geo);
    }

    let mut points = Vec::new();
    let mut orders = HashSet::new();
    for customer in &tables.orders_customers {
        let Some(coords) = coords_by_zip.get(&customer.zip_code_prefix) else {
            continue;
        };
        let Some(customer_orders) = orders_by_customer.get(customer.customer_id.as_str()) else {
            continue;
        };
        for order in customer_orders {
            if !order.delay_days().is_some_and(|d| d > min_delay_days) {
                continue;
            }
            orders.insert(order.order_id.as_str());
            points.extend(coords.iter().map(|g| LatLng {
                lat: g.lat,
                lng: g.lng,
            }));
        }
    }

    let center = centroid(&points).unwrap_or(LatLng::ORIGIN);
    tracing::debug!(
        points = points.len(),
        orders = orders.len(),
        "geographic delay map built"
    );

    GeoDelayMap {
        min_delay_days,
        points,
        center,
        distinct_orders: orders.len(),
    }
}

/// Mean latitude and longitude; `None` for no points.
pub fn centroid(points: &[LatLng]) -> Option<LatLng> {
    let lats: Vec<f64> = points.iter().map(|p| p.lat).collect();
    let lngs: Vec<f64> = points.iter().map(|p| p.lng).collect();
    Some(LatLng {
        lat: mean(&lats)?,
        lng: mean(&lngs)?,
    })
}
