//! Ties the session, the configuration and the views together.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::config::DashboardConfig;
use crate::loader::LoadError;
use crate::render::{DashboardReport, ViewReport};
use crate::session::Session;
use crate::views::{self, SellerOptions};

/// The six dashboard views, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    /// Review score distribution.
    Ratings,
    /// Review scores of on-time versus late orders.
    DelayImpact,
    /// Seller delay rates.
    Sellers,
    /// Mean review score per payment method.
    Payments,
    /// Map of badly delayed orders.
    Geo,
    /// Fixed action list.
    Recommendations,
}

impl View {
    /// Every view in tab order.
    pub const ALL: [View; 6] = [
        View::Ratings,
        View::DelayImpact,
        View::Sellers,
        View::Payments,
        View::Geo,
        View::Recommendations,
    ];

    /// Name used on the command line and in JSON.
    pub fn name(self) -> &'static str {
        match self {
            View::Ratings => "ratings",
            View::DelayImpact => "delay-impact",
            View::Sellers => "sellers",
            View::Payments => "payments",
            View::Geo => "geo",
            View::Recommendations => "recommendations",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A view name that is not one of the known views.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown view `{0}` (expected one of: ratings, delay-impact, sellers, payments, geo, recommendations, all)")]
pub struct ParseViewError(String);

impl FromStr for View {
    type Err = ParseViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        View::ALL
            .into_iter()
            .find(|v| v.name() == wanted)
            .ok_or_else(|| ParseViewError(s.to_string()))
    }
}

/// Which views to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// Every view.
    #[default]
    All,
    /// A single view.
    Only(View),
}

impl Selection {
    /// Views covered by this selection, in tab order.
    pub fn views(self) -> Vec<View> {
        match self {
            Selection::All => View::ALL.to_vec(),
            Selection::Only(view) => vec![view],
        }
    }
}

impl FromStr for Selection {
    type Err = ParseViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Selection::All);
        }
        s.parse().map(Selection::Only)
    }
}

/// A session plus the parameters every view is computed with.
#[derive(Debug)]
pub struct Dashboard {
    session: Session,
    sellers: SellerOptions,
    min_delay_days: i64,
}

impl Dashboard {
    /// Builds a dashboard over `session`.
    ///
    /// `threshold_percent` replaces the configured seller threshold when given.
    pub fn new(
        session: Session,
        config: &DashboardConfig,
        threshold_percent: Option<u8>,
    ) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self {
            session,
            sellers: config.seller_options(threshold_percent)?,
            min_delay_days: config.min_delay_days,
        })
    }

    /// The underlying session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Options the seller view is computed with.
    pub fn seller_options(&self) -> &SellerOptions {
        &self.sellers
    }

    /// Computes one view, loading the snapshot if needed.
    pub fn view(&self, view: View) -> Result<ViewReport, LoadError> {
        let tables = self.session.tables()?;
        let report = match view {
            View::Ratings => ViewReport::ratings(views::rating_distribution(&tables)),
            View::DelayImpact => ViewReport::delay_impact(views::delay_impact(&tables)),
            View::Sellers => ViewReport::sellers(
                views::seller_performance(&tables, &self.sellers),
                self.sellers.top_n,
            ),
            View::Payments => ViewReport::payments(views::payment_satisfaction(&tables)),
            View::Geo => ViewReport::geo(views::geographic_delays(&tables, self.min_delay_days)),
            View::Recommendations => ViewReport::recommendations(views::recommendations()),
        };
        tracing::debug!(%view, "view computed");
        Ok(report)
    }

    /// Computes every selected view under the dashboard title.
    pub fn report(&self, selection: Selection) -> Result<DashboardReport, LoadError> {
        let views = selection
            .views()
            .into_iter()
            .map(|v| self.view(v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DashboardReport::new(views))
    }
}
