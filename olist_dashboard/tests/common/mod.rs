#![allow(dead_code)]

use std::fs::File;
use std::path::Path;

use polars::prelude::*;
use tempfile::TempDir;

/// Writes `df` as `<dir>/<file_name>`.
pub fn write_parquet(dir: &Path, file_name: &str, mut df: DataFrame) {
    let file = File::create(dir.join(file_name)).expect("create parquet file");
    ParquetWriter::new(file)
        .finish(&mut df)
        .expect("write parquet file");
}

pub fn orders() -> DataFrame {
    df!(
        "order_id" => ["o1", "o2", "o3", "o4"],
        "customer_id" => ["c1", "c2", "c3", "c4"],
        "order_status" => ["delivered", "delivered", "delivered", "shipped"],
        // o1 is 10 days late, o2 early, o3 5.5 days late, o4 never arrived
        "order_delivered_customer_date" => [
            Some("2018-01-20 00:00:00"),
            Some("2018-01-05 09:30:00"),
            Some("2018-01-15 12:00:00"),
            None
        ],
        "order_estimated_delivery_date" => [
            "2018-01-10 00:00:00",
            "2018-01-10 00:00:00",
            "2018-01-10 00:00:00",
            "2018-01-10 00:00:00"
        ]
    )
    .expect("orders frame")
}

pub fn order_reviews() -> DataFrame {
    df!(
        "review_id" => ["r1", "r2", "r3", "r4", "r5"],
        "order_id" => ["o1", "o2", "o3", "o4", "o9"],
        // r5 has an invalid score and is dropped at load
        "review_score" => [1i64, 5, 2, 4, 0]
    )
    .expect("reviews frame")
}

pub fn order_items() -> DataFrame {
    df!(
        "order_id" => ["o1", "o2", "o2", "o4", "o3"],
        "order_item_id" => [1i64, 1, 2, 1, 1],
        "product_id" => ["p1", "p1", "p2", "p2", "p1"],
        "seller_id" => ["s1", "s1", "s2", "s3", "s4"],
        "price" => [10.0, 20.0, 30.0, 40.0, 50.0]
    )
    .expect("items frame")
}

pub fn order_payments() -> DataFrame {
    df!(
        "order_id" => ["o1", "o2", "o2", "o3", "o4"],
        "payment_type" => ["credit_card", "credit_card", "voucher", "not_defined", "boleto"],
        "payment_value" => [10.0, 15.0, 5.0, 50.0, 40.0]
    )
    .expect("payments frame")
}

pub fn orders_customers() -> DataFrame {
    df!(
        "customer_id" => ["c1", "c2", "c3", "c4"],
        "customer_zip_code_prefix" => [1000i64, 2000, 1000, 3000],
        "customer_city" => ["sao paulo", "campinas", "sao paulo", "recife"],
        "customer_state" => ["SP", "SP", "SP", "PE"]
    )
    .expect("customers frame")
}

pub fn geolocation() -> DataFrame {
    df!(
        "geolocation_zip_code_prefix" => [1000i64, 1000, 2000],
        "geolocation_lat" => [-23.5, -23.75, -22.9],
        "geolocation_lng" => [-46.5, -46.75, -47.06]
    )
    .expect("geolocation frame")
}

pub fn products() -> DataFrame {
    df!(
        "product_id" => ["p1", "p2"],
        "product_category_name" => ["beleza_saude", "esporte_lazer"]
    )
    .expect("products frame")
}

pub fn sellers() -> DataFrame {
    df!(
        "seller_id" => ["s1", "s2", "s3", "s4"],
        "seller_zip_code_prefix" => [13023i64, 13844, 20031, 4195],
        "seller_city" => ["campinas", "mogi guacu", "rio de janeiro", "sao paulo"],
        "seller_state" => ["SP", "SP", "RJ", "SP"]
    )
    .expect("sellers frame")
}

/// A data directory holding all eight files.
pub fn fixture_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    write_all(dir.path());
    dir
}

pub fn write_all(dir: &Path) {
    write_parquet(dir, "orders_customers_df.parquet", orders_customers());
    write_parquet(dir, "geolocation_df.parquet", geolocation());
    write_parquet(dir, "order_items_df.parquet", order_items());
    write_parquet(dir, "order_payments_df.parquet", order_payments());
    write_parquet(dir, "order_reviews_df.parquet", order_reviews());
    write_parquet(dir, "order_df.parquet", orders());
    write_parquet(dir, "products_df.parquet", products());
    write_parquet(dir, "sellers_df.parquet", sellers());
}
