//! End-to-end extraction + report assembly over the in-memory page.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{Local, TimeZone};
use fpscan_lib::{
    build_report_at, extract, write_report, FeatureMap, RunConfig, StaticPage,
    DEFAULT_FEATURE_SELECTOR, EXPECTED_FIELDS,
};
use tempfile::TempDir;

const SHORT_WAIT: Duration = Duration::from_millis(50);

fn run_config(extensions: Vec<PathBuf>) -> RunConfig {
    RunConfig {
        browser: "chromium".to_string(),
        privacy_max: true,
        incognito: false,
        extensions,
    }
}

fn fixed_timestamp() -> chrono::DateTime<Local> {
    Local.with_ymd_and_hms(2026, 8, 6, 15, 30, 0).unwrap()
}

#[tokio::test]
async fn scraped_page_produces_schema_shaped_report() {
    let page = StaticPage::new("Fingerprint Demo")
        .with_feature("Canvas Fingerprint", "abc123")
        .with_feature("User-Agent", "UA1")
        .with_feature("User-Agent", "UA2")
        .with_entry(Some("Broken Entry"), None)
        .with_feature("Not A Schema Field", "dropped later");

    let features = extract(&page, DEFAULT_FEATURE_SELECTOR, SHORT_WAIT).await;
    assert_eq!(features["User-Agent"], "UA2", "last duplicate wins");
    assert!(!features.contains_key("Broken Entry"));

    let title = "Fingerprint Demo";
    let report = build_report_at(
        &features,
        &EXPECTED_FIELDS,
        &run_config(Vec::new()),
        title,
        fixed_timestamp(),
    );

    // Exactly the schema keys, in schema order, no extras.
    let keys: Vec<&str> = report.features.keys().map(String::as_str).collect();
    assert_eq!(keys, EXPECTED_FIELDS.to_vec());
    assert_eq!(report.features["Canvas Fingerprint"], "abc123");
    assert_eq!(report.features["User-Agent"], "UA2");
    assert_eq!(report.features["WebGL Vendor"], "");
    assert!(!report.features.contains_key("Not A Schema Field"));
    assert!(report.has_features());
    assert_eq!(report.title, "Fingerprint Demo");
    assert_eq!(report.config.browser, "chromium");
    assert!(report.config.privacy_max);
}

#[tokio::test]
async fn blank_page_produces_all_empty_report() {
    let page = StaticPage::new("Blank");
    let features = extract(&page, DEFAULT_FEATURE_SELECTOR, SHORT_WAIT).await;
    assert!(features.is_empty());

    let report = build_report_at(
        &features,
        &EXPECTED_FIELDS,
        &run_config(Vec::new()),
        "Blank",
        fixed_timestamp(),
    );

    assert_eq!(report.features.len(), EXPECTED_FIELDS.len());
    assert!(report.features.values().all(String::is_empty));
    assert!(!report.has_features());
}

#[test]
fn report_serialization_is_idempotent_and_ordered() {
    let mut features = FeatureMap::new();
    features.insert("Canvas Fingerprint".into(), "abc123".into());
    features.insert("Comprehensive Fingerprint Hash".into(), "deadbeef".into());

    let extensions = vec![
        PathBuf::from("./x/ublock_origin_lite.crx"),
        PathBuf::from("./y/unknown.crx"),
    ];
    let run = run_config(extensions);

    let first = build_report_at(&features, &EXPECTED_FIELDS, &run, "t", fixed_timestamp());
    let second = build_report_at(&features, &EXPECTED_FIELDS, &run, "t", fixed_timestamp());

    let first_json = serde_json::to_string_pretty(&first).unwrap();
    let second_json = serde_json::to_string_pretty(&second).unwrap();
    assert_eq!(first_json, second_json, "same inputs must serialize identically");

    assert_eq!(first.config.extensions, vec!["ublock origin (lite)"]);

    // Schema order survives serialization.
    let canvas = first_json.find("\"Canvas Fingerprint\"").unwrap();
    let hash = first_json.find("\"Comprehensive Fingerprint Hash\"").unwrap();
    assert!(canvas < hash);
}

#[test]
fn written_report_round_trips_from_disk() {
    let mut features = FeatureMap::new();
    features.insert("Time Zone".into(), "Europe/Berlin".into());

    let report = build_report_at(
        &features,
        &EXPECTED_FIELDS,
        &run_config(Vec::new()),
        "t",
        fixed_timestamp(),
    );

    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("output.json");
    write_report(&report, &path).expect("write report");

    let parsed: fpscan_lib::Report =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("read report"))
            .expect("reparse report");
    assert_eq!(parsed.features["Time Zone"], "Europe/Berlin");
    assert_eq!(parsed.features.len(), EXPECTED_FIELDS.len());
    assert_eq!(parsed.timestamp, report.timestamp);
}
