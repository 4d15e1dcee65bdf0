//! CSV import followed by filtering and reporting on a file-backed store

use crate::common::params;
use origin_filter::analysis::{OutputFormat, ReportFormatter, SalesFilterService};
use origin_filter::config::AppConfig;
use origin_filter::database::{Database, DEFAULT_BUSY_TIMEOUT};
use origin_filter::processor::OrderCsvImporter;
use origin_filter::types::FilterAttribute;
use std::io::Write;
use tempfile::TempDir;

const ORDERS_CSV: &str = "\
id,status,total,created_at,attribution_source,payment_gateway_title
1001,wc-completed,10.00,2024-01-03 09:15:00,google,Stripe
1002,wc-completed,20.00,2024-01-17 14:00:00,google,PayPal
1003,wc-processing,5.00,2024-01-29 18:30:00,google,Stripe
1004,wc-cancelled,99.99,2024-01-10 10:00:00,google,Stripe
1005,wc-completed,1250.50,2024-02-02 08:00:00,google,Stripe
1006,wc-completed,42.00,2024-01-05 11:00:00,facebook,Stripe
1007,wc-pending,15.00,2024-01-06 11:00:00,,PayPal
1008,wc-completed,not-a-number,2024-01-07 11:00:00,google,Stripe
";

fn imported_store(dir: &TempDir) -> String {
    let csv_path = dir.path().join("orders.csv");
    let mut file = std::fs::File::create(&csv_path).unwrap();
    file.write_all(ORDERS_CSV.as_bytes()).unwrap();

    let db_path = dir.path().join("orders.db").to_string_lossy().to_string();
    let database = Database::new(&db_path).unwrap();
    let mut importer = OrderCsvImporter::new(database);
    let stats = importer.import_path(&csv_path).unwrap();
    assert_eq!(stats.imported, 7);
    assert_eq!(stats.malformed_records, 1);
    db_path
}

fn read_only_service(db_path: &str) -> SalesFilterService<Database> {
    let database = Database::open_read_only(db_path, DEFAULT_BUSY_TIMEOUT).unwrap();
    SalesFilterService::from_config(database, &AppConfig::default()).unwrap()
}

#[test]
fn test_import_then_summarize_all_time() {
    let dir = TempDir::new().unwrap();
    let db_path = imported_store(&dir);
    let service = read_only_service(&db_path);

    let summary = service
        .summarize(&params(&[("order_origin", "google")]))
        .unwrap()
        .unwrap();
    let config = AppConfig::default();
    let output =
        ReportFormatter::format_summary(&summary, &config.currency, &OutputFormat::Console).unwrap();
    assert!(output.starts_with("Origin Filter applied successfully. Total of google: $1,285.50"));
}

#[test]
fn test_import_then_summarize_month() {
    let dir = TempDir::new().unwrap();
    let db_path = imported_store(&dir);
    let service = read_only_service(&db_path);

    let summary = service
        .summarize(&params(&[("attribution_source", "google"), ("m", "202401")]))
        .unwrap()
        .unwrap();
    assert_eq!(summary.result.count, 3);

    let html = ReportFormatter::format_summary(
        &summary,
        &AppConfig::default().currency,
        &OutputFormat::Html,
    )
    .unwrap();
    assert!(html.contains("notice-success"));
    assert!(html.contains("Total of google, 2024-01: <b>$35.00</b>"));
}

#[test]
fn test_import_then_list_choices() {
    let dir = TempDir::new().unwrap();
    let db_path = imported_store(&dir);
    let service = read_only_service(&db_path);

    let origins = service.filter_choices(FilterAttribute::AttributionSource);
    assert_eq!(origins.values, vec!["facebook", "google"]);

    let gateways = service.filter_choices(FilterAttribute::PaymentGatewayTitle);
    assert_eq!(gateways.values, vec!["PayPal", "Stripe"]);

    let json = ReportFormatter::format_choices(&gateways, None, &OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["attribute"], "payment_gateway_title");
    assert_eq!(value["unavailable"], false);
}

#[test]
fn test_import_then_list_orders_any_status() {
    let dir = TempDir::new().unwrap();
    let db_path = imported_store(&dir);
    let service = read_only_service(&db_path);

    let orders = service
        .list_orders(&params(&[("payment_gateway_title", "PayPal")]))
        .unwrap();
    let ids: Vec<u64> = orders.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![1002, 1007]);

    let output = ReportFormatter::format_orders(
        "PayPal",
        &orders,
        &AppConfig::default().currency,
        &OutputFormat::Console,
    )
    .unwrap();
    assert!(output.contains("#1007"));
    assert!(output.contains("pending"));
}

#[test]
fn test_reimport_replaces_orders() {
    let dir = TempDir::new().unwrap();
    let db_path = imported_store(&dir);

    let mut importer = OrderCsvImporter::new(Database::new(&db_path).unwrap());
    importer
        .import_reader(
            "id,status,total,created_at,attribution_source\n1001,refunded,10.00,2024-01-03 09:15:00,\n"
                .as_bytes(),
        )
        .unwrap();
    let database = importer.into_database();
    assert_eq!(database.order_count().unwrap(), 7);

    let service = read_only_service(&db_path);
    let summary = service
        .summarize(&params(&[("attribution_source", "google"), ("m", "202401")]))
        .unwrap()
        .unwrap();
    // 1001 lost both its counted status and its origin
    assert_eq!(summary.result.count, 2);
}
