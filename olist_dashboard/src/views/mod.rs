//! The aggregation engine: one pure function per dashboard view.
//!
//! Every function borrows the loaded [`Tables`](crate::loader::Tables) and
//! returns a fresh value. None of them fail; empty inputs give empty outputs.

pub mod delay_impact;
pub mod geo;
pub mod payments;
pub mod ratings;
pub mod recommendations;
pub mod sellers;
pub mod stats;

pub use delay_impact::{DelayImpact, delay_impact};
pub use geo::{DEFAULT_MIN_DELAY_DAYS, GeoDelayMap, LatLng, geographic_delays};
pub use payments::{PaymentScore, payment_satisfaction};
pub use ratings::{RatingBucket, RatingDistribution, rating_distribution};
pub use recommendations::{Recommendation, recommendations};
pub use sellers::{
    DelayThreshold, InvalidThreshold, SellerDelay, SellerOptions, SellerPerformance,
    seller_performance,
};
pub use stats::Summary;
