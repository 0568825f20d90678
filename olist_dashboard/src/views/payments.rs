//! Review score by payment method.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::loader::Tables;
use crate::models::ReviewScore;

/// Mean review score of one payment type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentScore {
    /// Payment method name as stored, e.g. `credit_card`.
    pub payment_type: String,
    /// Mean over every payment × review pair of that method.
    pub mean_score: f64,
    /// Number of payment × review pairs averaged.
    pub pairs: usize,
}

/// Joins payments and reviews on `order_id` and averages scores per payment
/// type, worst first.
///
/// The join is many-to-many: an order paid in two installments with one review
/// contributes that review twice to its payment type.
pub fn payment_satisfaction(tables: &Tables) -> Vec<PaymentScore> {
    let mut reviews: HashMap<&str, Vec<ReviewScore>> = HashMap::new();
    for review in &tables.order_reviews {
        reviews
            .entry(review.order_id.as_str())
            .or_default()
            .push(review.score);
    }

    // payment_type -> (score sum, pairs)
    let mut totals: IndexMap<&str, (f64, usize)> = IndexMap::new();
    for payment in &tables.order_payments {
        let Some(scores) = reviews.get(payment.order_id.as_str()) else {
            continue;
        };
        let entry = totals.entry(payment.payment_type.as_str()).or_default();
        for score in scores {
            entry.0 += score.as_f64();
            entry.1 += 1;
        }
    }

    let mut out: Vec<PaymentScore> = totals
        .into_iter()
        .map(|(payment_type, (sum, pairs))| PaymentScore {
            payment_type: payment_type.to_string(),
            mean_score: sum / pairs as f64,
            pairs,
        })
        .collect();
    out.sort_by(|a, b| {
        a.mean_score
            .total_cmp(&b.mean_score)
            .then_with(|| a.payment_type.cmp(&b.payment_type))
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Payment, Review};

    fn payment(order_id: &str, kind: &str) -> Payment {
        Payment {
            order_id: order_id.into(),
            payment_type: kind.into(),
            payment_value: Some(10.0),
        }
    }

    fn review(order_id: &str, score: i64) -> Review {
        Review {
            order_id: order_id.into(),
            score: ReviewScore::new(score).unwrap(),
        }
    }

    fn types(scores: &[PaymentScore]) -> Vec<&str> {
        scores.iter().map(|s| s.payment_type.as_str()).collect()
    }

    #[test]
    fn ordered_worst_first() {
        let tables = Tables {
            order_payments: vec![
                payment("a", "credit_card"),
                payment("b", "voucher"),
                payment("c", "not_defined"),
            ],
            order_reviews: vec![review("a", 4), review("b", 5), review("c", 2)],
            ..Default::default()
        };
        let scores = payment_satisfaction(&tables);
        assert_eq!(types(&scores), vec!["not_defined", "credit_card", "voucher"]);
        assert_eq!(scores[0].mean_score, 2.0);
    }

    #[test]
    fn join_is_many_to_many() {
        let tables = Tables {
            order_payments: vec![
                payment("a", "voucher"),
                payment("a", "voucher"),
                payment("b", "voucher"),
            ],
            // "a" has two reviews and two payment rows: four pairs
            order_reviews: vec![review("a", 5), review("a", 3), review("b", 1)],
            ..Default::default()
        };
        let scores = payment_satisfaction(&tables);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].pairs, 5);
        assert_eq!(scores[0].mean_score, (5.0 + 3.0 + 5.0 + 3.0 + 1.0) / 5.0);
    }

    #[test]
    fn unreviewed_orders_and_ties() {
        let tables = Tables {
            order_payments: vec![
                payment("a", "voucher"),
                payment("b", "boleto"),
                payment("z", "debit_card"),
            ],
            order_reviews: vec![review("a", 4), review("b", 4)],
            ..Default::default()
        };
        let scores = payment_satisfaction(&tables);
        // debit_card has no reviewed order; ties break by name
        assert_eq!(types(&scores), vec!["boleto", "voucher"]);
        assert!(payment_satisfaction(&Tables::default()).is_empty());
    }
}
