//! Distribution of review scores.

use serde::Serialize;

use crate::loader::Tables;
use crate::models::ReviewScore;

/// Number of reviews with one score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RatingBucket {
    /// Score 1..=5.
    pub score: u8,
    /// Reviews with that score.
    pub count: usize,
}

/// One bucket per score, zero-count buckets included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingDistribution {
    /// Buckets for scores 1 to 5, in order.
    pub buckets: Vec<RatingBucket>,
    /// Sum of all bucket counts.
    pub total: usize,
}

/// Counts reviews per score.
pub fn rating_distribution(tables: &Tables) -> RatingDistribution {
    let mut counts = [0usize; ReviewScore::MAX as usize];
    for review in &tables.order_reviews {
        counts[usize::from(review.score.get() - ReviewScore::MIN)] += 1;
    }

    let buckets = (ReviewScore::MIN..=ReviewScore::MAX)
        .zip(counts)
        .map(|(score, count)| RatingBucket { score, count })
        .collect();

    RatingDistribution {
        buckets,
        total: tables.order_reviews.len(),
    }
}
