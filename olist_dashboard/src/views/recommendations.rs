//! The fixed action list closing the dashboard.

use serde::Serialize;

/// One recommended action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    /// Short imperative headline.
    pub title: &'static str,
    /// The finding that motivates it.
    pub rationale: &'static str,
}

const RECOMMENDATIONS: [Recommendation; 5] = [
    Recommendation {
        title: "Reduce delivery delays",
        rationale: "Largest measured effect: satisfaction drops from about 4.5 to 2 out of 5 when an order is late",
    },
    Recommendation {
        title: "Fix the \"not_defined\" payment anomaly",
        rationale: "Orders with an unrecorded payment method average 1.7 out of 5",
    },
    Recommendation {
        title: "Improve regional logistics",
        rationale: "Focus on the less well served North and West regions",
    },
    Recommendation {
        title: "Run a customer recovery programme",
        rationale: "Review every score of 2 or below systematically to find recurring problems",
    },
    Recommendation {
        title: "Train sellers",
        rationale: "Set up an excellence programme centred on punctuality and customer communication",
    },
];

/// The five recommendations, in priority order.
pub fn recommendations() -> &'static [Recommendation] {
    &RECOMMENDATIONS
}
