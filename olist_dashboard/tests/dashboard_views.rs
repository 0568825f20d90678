mod common;

use olist_dashboard::render::ViewData;
use olist_dashboard::views::LatLng;
use olist_dashboard::{Dashboard, DashboardConfig, Selection, Session, View};

fn dashboard(threshold: Option<u8>) -> (tempfile::TempDir, Dashboard) {
    let dir = common::fixture_dir();
    let dash = Dashboard::new(
        Session::new(dir.path()),
        &DashboardConfig::default(),
        threshold,
    )
    .unwrap();
    (dir, dash)
}

#[test]
fn rating_distribution_over_fixture() {
    let (_dir, dash) = dashboard(None);
    let ViewData::Ratings(dist) = dash.view(View::Ratings).unwrap().data else {
        panic!("wrong data for ratings view");
    };
    let counts: Vec<usize> = dist.buckets.iter().map(|b| b.count).collect();
    assert_eq!(counts, vec![1, 1, 0, 1, 1]);
    assert_eq!(dist.total, 4);
}

#[test]
fn delay_impact_excludes_undelivered_orders() {
    let (_dir, dash) = dashboard(None);
    let ViewData::DelayImpact(impact) = dash.view(View::DelayImpact).unwrap().data else {
        panic!("wrong data for delay view");
    };
    assert_eq!(impact.on_time.map(|s| (s.count, s.mean)), Some((1, 5.0)));
    assert_eq!(impact.late.map(|s| (s.count, s.mean)), Some((2, 1.5)));
    assert_eq!(impact.unknown_excluded, 1);
}

#[test]
fn seller_view_follows_threshold() {
    let (_dir, dash) = dashboard(None);
    let ViewData::Sellers(perf) = dash.view(View::Sellers).unwrap().data else {
        panic!("wrong data for sellers view");
    };
    let within: Vec<&str> = perf.within_threshold.iter().map(|s| s.seller_id.as_str()).collect();
    let worst: Vec<&str> = perf.worst_offenders.iter().map(|s| s.seller_id.as_str()).collect();
    assert_eq!(within, vec!["s2"]);
    // s3 only sold an undelivered order and has no rate
    assert_eq!(worst, vec!["s4", "s1", "s2"]);
    assert_eq!(perf.overview.late_sellers, 2);
    assert_eq!(perf.overview.total_sellers, 3);
    assert_eq!(perf.overview.late_share_percent, 66.67);

    let (_dir, dash) = dashboard(Some(50));
    let ViewData::Sellers(perf) = dash.view(View::Sellers).unwrap().data else {
        panic!("wrong data for sellers view");
    };
    let within: Vec<&str> = perf.within_threshold.iter().map(|s| s.seller_id.as_str()).collect();
    assert_eq!(within, vec!["s1", "s2"]);
}

#[test]
fn payments_worst_first() {
    let (_dir, dash) = dashboard(None);
    let ViewData::Payments(scores) = dash.view(View::Payments).unwrap().data else {
        panic!("wrong data for payments view");
    };
    let ranked: Vec<(&str, f64)> = scores
        .iter()
        .map(|s| (s.payment_type.as_str(), s.mean_score))
        .collect();
    assert_eq!(
        ranked,
        vec![
            ("not_defined", 2.0),
            ("credit_card", 3.0),
            ("boleto", 4.0),
            ("voucher", 5.0),
        ]
    );
}

#[test]
fn geo_map_keeps_only_long_delays() {
    let (_dir, dash) = dashboard(None);
    let report = dash.view(View::Geo).unwrap();
    let ViewData::Geo(map) = &report.data else {
        panic!("wrong data for geo view");
    };
    // o3 is 5.5 days late, which floors to 5 and is excluded
    assert_eq!(map.distinct_orders, 1);
    assert_eq!(map.points.len(), 2);
    assert_eq!(
        map.center,
        LatLng {
            lat: -23.625,
            lng: -46.625
        }
    );
    assert!(report.to_string().contains("distinct orders: 1"));
}

#[test]
fn full_report_as_text_and_json() {
    let (_dir, dash) = dashboard(None);
    let report = dash.report(Selection::All).unwrap();

    let text = report.to_string();
    assert!(text.starts_with("Olist customer satisfaction dashboard\n"));
    for title in [
        "Review score distribution\n=====",
        "Impact of delays on review scores\n=====",
        "Seller performance\n=====",
        "Mean review score by payment method\n=====",
        "Delivery delay map\n=====",
        "Recommendations\n=====",
    ] {
        assert!(text.contains(title), "missing section {title:?}");
    }

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    let views: Vec<&str> = json["views"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["view"].as_str().unwrap())
        .collect();
    assert_eq!(
        views,
        vec!["ratings", "delay-impact", "sellers", "payments", "geo", "recommendations"]
    );
    assert_eq!(json["views"][2]["data"]["threshold"], 0.1);
    assert_eq!(json["views"][4]["figures"][0]["zoom_start"], 5);
}

#[test]
fn missing_data_dir_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let dash = Dashboard::new(
        Session::new(dir.path().join("absent")),
        &DashboardConfig::default(),
        None,
    )
    .unwrap();
    let err = dash.report(Selection::Only(View::Recommendations)).unwrap_err();
    assert!(err.to_string().contains("orders_customers_df.parquet"));
}
