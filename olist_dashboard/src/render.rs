//! What each view looks like on screen.
//!
//! Drawing is left to an external renderer. This module describes the figures
//! to draw, attaches the commentary shown under them and prints a plain-text
//! version of every view for the terminal. [`ViewReport`] and
//! [`DashboardReport`] serialize to JSON for renderers.

use std::fmt;

use serde::Serialize;

use crate::dashboard::View;
use crate::views::{
    DelayImpact, GeoDelayMap, LatLng, PaymentScore, RatingDistribution, Recommendation,
    SellerDelay, SellerPerformance, Summary,
};
use crate::views::stats::round2;

/// Title shown above every view.
pub const DASHBOARD_TITLE: &str = "Olist customer satisfaction dashboard";

/// Initial zoom level of the delay map.
pub const MAP_ZOOM_START: u8 = 5;
/// Width of the delay map in pixels.
pub const MAP_WIDTH_PX: u32 = 725;

/// Chart types the renderer must support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Bars of occurrence counts per category.
    Count,
    /// Vertical bars.
    Bar,
    /// Horizontal bars, one per category on the y axis.
    BarHorizontal,
    /// Box plot per category.
    Box,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Count => "count",
            Self::Bar => "bar",
            Self::BarHorizontal => "horizontal bar",
            Self::Box => "box",
        })
    }
}

/// A figure to draw next to a view's data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Figure {
    /// A chart over the view's data.
    Chart {
        /// Chart type.
        kind: ChartKind,
        /// Figure title.
        title: String,
        /// X axis label; empty when the axis carries category names only.
        x_label: String,
        /// Y axis label.
        y_label: String,
    },
    /// A clustered marker map over the view's points.
    Map {
        /// Figure title.
        title: String,
        /// Initial center.
        center: LatLng,
        /// Initial zoom level.
        zoom_start: u8,
        /// Width in pixels.
        width: u32,
        /// Whether nearby markers are grouped.
        clustered: bool,
    },
}

impl Figure {
    fn chart(kind: ChartKind, title: impl Into<String>, x_label: &str, y_label: &str) -> Self {
        Self::Chart {
            kind,
            title: title.into(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
        }
    }
}

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chart {
                kind,
                title,
                x_label,
                y_label,
            } => write!(f, "{kind} chart \"{title}\" (x: {x_label}, y: {y_label})"),
            Self::Map {
                title,
                center,
                zoom_start,
                width,
                clustered,
            } => write!(
                f,
                "{}map \"{title}\" centered on ({:.4}, {:.4}), zoom {zoom_start}, {width}px wide",
                if *clustered { "clustered " } else { "" },
                center.lat,
                center.lng,
            ),
        }
    }
}

/// The computed data behind one view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ViewData {
    /// Review counts per score.
    Ratings(RatingDistribution),
    /// Score summaries by delivery status.
    DelayImpact(DelayImpact),
    /// Seller rankings.
    Sellers(SellerPerformance),
    /// Mean score per payment type.
    Payments(Vec<PaymentScore>),
    /// Delayed-order coordinates.
    Geo(GeoDelayMap),
    /// Fixed action list.
    Recommendations(&'static [Recommendation]),
}

/// One rendered view: data, figures and commentary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewReport {
    /// Which view this is.
    pub view: View,
    /// Section header.
    pub title: String,
    /// Figures to draw, in display order.
    pub figures: Vec<Figure>,
    /// Computed data.
    pub data: ViewData,
    /// Markdown paragraphs describing the finding.
    pub commentary: Vec<&'static str>,
}

const RATINGS_COMMENTARY: &str = "Most reviews are excellent (5/5), yet a worrying \
    share are very low (1/5). Finding out what drives this dissatisfied segment \
    and acting on it should come first.";

const DELAY_COMMENTARY: &str = "Orders delivered on time mostly score 4 or 5 stars. \
    Late orders are spread much wider with a far lower median, so late delivery \
    looks like a major cause of dissatisfaction. Shortening delivery times and \
    managing customer expectations about them should be a priority.";

const TOP_SELLERS_COMMENTARY: &str = "These sellers are the first candidates for \
    corrective action: find out what blocks them, and remind them how late \
    deliveries hurt the brand and the business.";

const SELLER_SPLIT_COMMENTARY: &str = "Most sellers keep their delay rate at or under \
    the cutoff, but a significant share exceed it. Bringing that share down \
    should lift customer satisfaction.";

const PAYMENTS_COMMENTARY: &str = "Most payment methods average around 4 out of 5. \
    Orders whose payment type is `not_defined` score far lower, which points at \
    transactions whose payment method was never recorded properly.";

const GEO_COMMENTARY: &str = "The map highlights the areas where long delivery delays \
    are most frequent.";

impl ViewReport {
    /// Rating distribution as a count plot.
    pub fn ratings(data: RatingDistribution) -> Self {
        let title = "Review score distribution";
        Self {
            view: View::Ratings,
            title: title.into(),
            figures: vec![Figure::chart(ChartKind::Count, title, "Score", "Orders")],
            data: ViewData::Ratings(data),
            commentary: vec![RATINGS_COMMENTARY],
        }
    }

    /// Score summaries as a box plot per delivery status.
    pub fn delay_impact(data: DelayImpact) -> Self {
        let title = "Impact of delays on review scores";
        Self {
            view: View::DelayImpact,
            title: title.into(),
            figures: vec![Figure::chart(ChartKind::Box, title, "Late?", "Review score")],
            data: ViewData::DelayImpact(data),
            commentary: vec![DELAY_COMMENTARY],
        }
    }

    /// Worst offenders as horizontal bars, the cutoff split as two bars.
    pub fn sellers(data: SellerPerformance, top_n: usize) -> Self {
        Self {
            view: View::Sellers,
            title: "Seller performance".into(),
            figures: vec![
                Figure::chart(
                    ChartKind::BarHorizontal,
                    format!("Top {top_n} late sellers"),
                    "Late order rate",
                    "Seller ID",
                ),
                Figure::chart(ChartKind::Bar, "Sellers by delay rate", "", "Sellers"),
            ],
            data: ViewData::Sellers(data),
            commentary: vec![TOP_SELLERS_COMMENTARY, SELLER_SPLIT_COMMENTARY],
        }
    }

    /// Mean score per payment type as bars, worst first.
    pub fn payments(data: Vec<PaymentScore>) -> Self {
        let title = "Mean review score by payment method";
        Self {
            view: View::Payments,
            title: title.into(),
            figures: vec![Figure::chart(ChartKind::Bar, title, "Payment method", "Mean score")],
            data: ViewData::Payments(data),
            commentary: vec![PAYMENTS_COMMENTARY],
        }
    }

    /// Delayed orders on a clustered map.
    pub fn geo(data: GeoDelayMap) -> Self {
        let title = "Delivery delay map";
        Self {
            view: View::Geo,
            title: title.into(),
            figures: vec![Figure::Map {
                title: title.into(),
                center: data.center,
                zoom_start: MAP_ZOOM_START,
                width: MAP_WIDTH_PX,
                clustered: true,
            }],
            data: ViewData::Geo(data),
            commentary: vec![GEO_COMMENTARY],
        }
    }

    /// The action list; no figure.
    pub fn recommendations(items: &'static [Recommendation]) -> Self {
        Self {
            view: View::Recommendations,
            title: "Recommendations".into(),
            figures: Vec::new(),
            data: ViewData::Recommendations(items),
            commentary: Vec::new(),
        }
    }
}

fn underline(f: &mut fmt::Formatter<'_>, title: &str, ch: char) -> fmt::Result {
    writeln!(f, "{title}")?;
    writeln!(f, "{}", ch.to_string().repeat(title.chars().count()))
}

fn write_summary(f: &mut fmt::Formatter<'_>, label: &str, summary: Option<&Summary>) -> fmt::Result {
    match summary {
        Some(s) => writeln!(
            f,
            "{label:<8} n={} mean={:.2} min={} q1={} median={} q3={} max={}",
            s.count, s.mean, s.min, s.q1, s.median, s.q3, s.max
        ),
        None => writeln!(f, "{label:<8} no reviews"),
    }
}

fn write_sellers(f: &mut fmt::Formatter<'_>, sellers: &[SellerDelay]) -> fmt::Result {
    if sellers.is_empty() {
        return writeln!(f, "(none)");
    }
    for s in sellers {
        writeln!(f, "{}  {:.4}  ({} items)", s.seller_id, s.delay_rate, s.rows)?;
    }
    Ok(())
}

impl fmt::Display for ViewData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ratings(dist) => {
                writeln!(f, "score  count")?;
                for b in &dist.buckets {
                    writeln!(f, "{:>5}  {:>5}", b.score, b.count)?;
                }
                writeln!(f, "total  {:>5}", dist.total)
            }
            Self::DelayImpact(impact) => {
                write_summary(f, "on time", impact.on_time.as_ref())?;
                write_summary(f, "late", impact.late.as_ref())?;
                writeln!(
                    f,
                    "excluded (unknown delivery status): {}",
                    impact.unknown_excluded
                )
            }
            Self::Sellers(perf) => {
                let pct = round2(perf.threshold.fraction() * 100.0);
                underline(f, &format!("Sellers with a delay rate <= {pct}%"), '-')?;
                write_sellers(f, &perf.within_threshold)?;
                writeln!(f)?;
                underline(f, "Worst offenders", '-')?;
                write_sellers(f, &perf.worst_offenders)?;
                writeln!(f)?;
                let o = &perf.overview;
                underline(f, "Overview", '-')?;
                writeln!(f, "late sellers:  {}", o.late_sellers)?;
                writeln!(f, "total sellers: {}", o.total_sellers)?;
                writeln!(f, "late share:    {}%", o.late_share_percent)?;
                for bucket in &o.split {
                    writeln!(f, "{:<8} {}", bucket.label, bucket.count)?;
                }
                Ok(())
            }
            Self::Payments(scores) => {
                if scores.is_empty() {
                    return writeln!(f, "(no reviewed payments)");
                }
                for s in scores {
                    writeln!(f, "{:<12} {:.2}  ({} pairs)", s.payment_type, s.mean_score, s.pairs)?;
                }
                Ok(())
            }
            Self::Geo(map) => {
                writeln!(f, "orders late by more than {} days", map.min_delay_days)?;
                writeln!(f, "points:          {}", map.points.len())?;
                writeln!(f, "distinct orders: {}", map.distinct_orders)
            }
            Self::Recommendations(items) => {
                for (i, r) in items.iter().enumerate() {
                    writeln!(f, "{}. {}: {}", i + 1, r.title, r.rationale)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for ViewReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        underline(f, &self.title, '=')?;
        write!(f, "{}", self.data)?;
        for figure in &self.figures {
            writeln!(f)?;
            writeln!(f, "Figure: {figure}")?;
        }
        for paragraph in &self.commentary {
            writeln!(f)?;
            writeln!(f, "{paragraph}")?;
        }
        Ok(())
    }
}

/// The dashboard title plus the selected views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    /// Always [`DASHBOARD_TITLE`].
    pub title: &'static str,
    /// Views in tab order.
    pub views: Vec<ViewReport>,
}

impl DashboardReport {
    /// Wraps `views` under the dashboard title.
    pub fn new(views: Vec<ViewReport>) -> Self {
        Self {
            title: DASHBOARD_TITLE,
            views,
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for DashboardReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        underline(f, self.title, '#')?;
        for view in &self.views {
            writeln!(f)?;
            write!(f, "{view}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::{RatingBucket, recommendations};

    fn distribution() -> RatingDistribution {
        let counts = [1, 0, 0, 1, 2];
        RatingDistribution {
            buckets: (1u8..=5)
                .zip(counts)
                .map(|(score, count)| RatingBucket { score, count })
                .collect(),
            total: 4,
        }
    }

    #[test]
    fn snapshot_ratings_report() {
        let report = ViewReport::ratings(distribution());
        insta::assert_json_snapshot!("ratings_report", &report);
    }

    #[test]
    fn ratings_text() {
        let text = ViewReport::ratings(distribution()).to_string();
        let expected = "\
Review score distribution
=========================
score  count
    1      1
    2      0
    3      0
    4      1
    5      2
total      4

Figure: count chart \"Review score distribution\" (x: Score, y: Orders)
";
        assert!(text.starts_with(expected), "got:\n{text}");
    }

    #[test]
    fn payments_text_and_json() {
        let report = ViewReport::payments(vec![
            PaymentScore {
                payment_type: "not_defined".into(),
                mean_score: 1.666_666,
                pairs: 3,
            },
            PaymentScore {
                payment_type: "voucher".into(),
                mean_score: 4.2,
                pairs: 5,
            },
        ]);
        let text = report.to_string();
        assert!(text.contains("not_defined  1.67  (3 pairs)"));
        assert!(text.contains("voucher      4.20  (5 pairs)"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["view"], "payments");
        assert_eq!(json["figures"][0]["kind"], "bar");
        assert_eq!(json["data"][0]["payment_type"], "not_defined");
    }

    #[test]
    fn map_figure_uses_fixed_zoom_and_width() {
        let report = ViewReport::geo(GeoDelayMap {
            min_delay_days: 5,
            points: Vec::new(),
            center: LatLng::ORIGIN,
            distinct_orders: 0,
        });
        let json = serde_json::to_value(&report).unwrap();
        let fig = &json["figures"][0];
        assert_eq!(fig["type"], "map");
        assert_eq!(fig["zoom_start"], 5);
        assert_eq!(fig["width"], 725);
        assert_eq!(fig["center"]["lat"], 0.0);
        assert!(report.to_string().contains("centered on (0.0000, 0.0000)"));
    }

    #[test]
    fn dashboard_report_has_title() {
        let report = DashboardReport::new(vec![ViewReport::recommendations(recommendations())]);
        let text = report.to_string();
        assert!(text.starts_with("Olist customer satisfaction dashboard\n#####"));
        assert!(text.contains("1. Reduce delivery delays: "));
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["title"], DASHBOARD_TITLE);
        assert_eq!(json["views"][0]["view"], "recommendations");
        assert!(json["views"][0]["figures"].as_array().unwrap().is_empty());
    }
}
