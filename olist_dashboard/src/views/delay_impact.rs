//! How late delivery shifts review scores.

use std::collections::HashMap;

use serde::Serialize;

use crate::loader::Tables;
use crate::models::DeliveryStatus;
use crate::views::stats::Summary;

/// Score distributions for on-time and late orders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelayImpact {
    /// Scores of reviews whose order arrived on time; `None` if there are none.
    pub on_time: Option<Summary>,
    /// Scores of reviews whose order arrived late; `None` if there are none.
    pub late: Option<Summary>,
    /// Reviews left out because the order's delivery status is unknown.
    pub unknown_excluded: usize,
}

/// Joins reviews to orders and summarizes scores per delivery status.
///
/// Reviews of orders that are not in the order table drop out (inner join).
pub fn delay_impact(tables: &Tables) -> DelayImpact {
    let status: HashMap<&str, DeliveryStatus> = tables
        .orders
        .iter()
        .map(|o| (o.order_id.as_str(), o.delivery_status()))
        .collect();

    let mut on_time = Vec::new();
    let mut late = Vec::new();
    let mut unknown_excluded = 0;

    for review in &tables.order_reviews {
        match status.get(review.order_id.as_str()) {
            Some(DeliveryStatus::OnTime) => on_time.push(review.score.as_f64()),
            Some(DeliveryStatus::Late) => late.push(review.score.as_f64()),
            Some(DeliveryStatus::Unknown) => unknown_excluded += 1,
            None => {}
        }
    }

    DelayImpact {
        on_time: Summary::of(on_time),
        late: Summary::of(late),
        unknown_excluded,
    }
}
