//! Edge case tests for shiptrack-engine
//!
//! These tests cover boundary conditions, unusual inputs and the full
//! track / import / receipt flow against a real file.

use serde_json::json;
use shiptrack_engine::{
    parse_csv, receipt, CompanyProfile, Error, RecordStore, RowError, ShipmentRecord,
};
use std::fs;
use tempfile::TempDir;

fn create_test_store() -> (TempDir, RecordStore) {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::open(dir.path().join("shipments.json"));
    (dir, store)
}

// ============================================================================
// End to End
// ============================================================================

#[test]
fn upsert_track_and_receipt() {
    let (_dir, store) = create_test_store();
    let record = ShipmentRecord::new("TRK1")
        .with("status", "In Transit")
        .with("origin", "Shanghai")
        .with("destination", "Lagos");

    store.upsert("TRK1", record.clone()).unwrap();

    let tracked = store.resolve("TRK1").unwrap();
    assert_eq!(tracked, record);

    let pdf = receipt::render(&tracked, &CompanyProfile::default()).unwrap();
    assert!(!pdf.is_empty());

    assert!(store.resolve("UNKNOWN").is_none());
}

#[test]
fn csv_import_end_to_end() {
    let (_dir, store) = create_test_store();
    store
        .upsert(
            "TRK1",
            ShipmentRecord::new("TRK1").with("phone", "+234 800 000"),
        )
        .unwrap();

    let text = "\
trackingNumber,status,quantity,cbm
TRK1,Arrived,12,1.5
,Lost,3,
TRK2,Loaded,12 boxes,n/a
";
    let report = store.import(parse_csv(text).unwrap()).unwrap();

    assert_eq!(report.imported, 2);
    assert_eq!(
        report.errors,
        vec![RowError {
            row: 2,
            error: "missing trackingNumber".into()
        }]
    );

    let trk1 = store.get("TRK1").unwrap();
    assert_eq!(trk1.fields["status"], json!("Arrived"));
    assert_eq!(trk1.fields["quantity"], json!(12));
    assert_eq!(trk1.fields["cbm"], json!(1.5));
    assert_eq!(trk1.fields["phone"], json!("+234 800 000"));

    let trk2 = store.get("TRK2").unwrap();
    assert_eq!(trk2.fields["quantity"], json!("12 boxes"));
    assert_eq!(trk2.fields["cbm"], json!("n/a"));
}

#[test]
fn import_of_only_bad_rows_keeps_existing_data() {
    let (_dir, store) = create_test_store();
    store.upsert("TRK1", ShipmentRecord::new("TRK1")).unwrap();

    let report = store.import(parse_csv("status\nLost\nFound\n").unwrap()).unwrap();

    assert_eq!(report.imported, 0);
    assert_eq!(report.errors.len(), 2);
    assert_eq!(report.errors[1].row, 2);
    assert!(store.get("TRK1").is_some());
}

// ============================================================================
// Persistence Edge Cases
// ============================================================================

#[test]
fn corrupt_store_degrades_to_empty_then_recovers() {
    let (_dir, store) = create_test_store();
    fs::write(store.path(), "[1, 2, 3").unwrap();

    assert!(store.list().is_empty());
    assert!(store.resolve("TRK1").is_none());

    // The next write replaces the corrupt file with a valid one.
    store.upsert("TRK1", ShipmentRecord::new("TRK1")).unwrap();
    assert_eq!(store.list().len(), 1);
}

#[test]
fn wrong_shape_store_degrades_to_empty() {
    let (_dir, store) = create_test_store();
    fs::write(store.path(), r#"{"TRK1": "not a record"}"#).unwrap();
    assert!(store.load().is_empty());
}

#[test]
fn numeric_tracking_number_survives_unrelated_upsert() {
    let (_dir, store) = create_test_store();
    fs::write(
        store.path(),
        r#"{
  "TRK1": {"trackingNumber": "TRK1", "status": "Loaded"},
  "12345": {"trackingNumber": 12345, "status": "Arrived"}
}"#,
    )
    .unwrap();

    assert_eq!(store.load().len(), 2);
    assert_eq!(store.resolve("12345").unwrap().tracking_number, "12345");

    store.upsert("TRK9", ShipmentRecord::new("TRK9")).unwrap();

    let keys: Vec<_> = store.load().into_keys().collect();
    assert_eq!(keys, vec!["12345", "TRK1", "TRK9"]);
    assert_eq!(store.get("TRK1").unwrap().text("status"), "Loaded");
}

#[test]
fn malformed_entry_does_not_cost_the_rest_of_the_file() {
    let (_dir, store) = create_test_store();
    fs::write(
        store.path(),
        r#"{"TRK1": {"trackingNumber": "TRK1"}, "TRK2": ["not", "a", "record"]}"#,
    )
    .unwrap();

    store.upsert("TRK3", ShipmentRecord::new("TRK3")).unwrap();

    let keys: Vec<_> = store.load().into_keys().collect();
    assert_eq!(keys, vec!["TRK1", "TRK3"]);
}

#[test]
fn binary_upload_is_rejected_before_any_write() {
    let (_dir, store) = create_test_store();
    let err = parse_csv(b"PK\x03\x04\xff\xfe\x00\x9c\n\xc3(,\xa0").unwrap_err();

    assert!(matches!(err, Error::InvalidInput(_)));
    assert!(!store.path().exists());
}

#[test]
fn stray_temp_file_does_not_affect_store() {
    let (dir, store) = create_test_store();
    store.upsert("TRK1", ShipmentRecord::new("TRK1")).unwrap();

    // A writer that died before its rename leaves only a temp file behind.
    fs::write(dir.path().join(".tmpXYZ"), "{ half written").unwrap();

    assert_eq!(store.load().len(), 1);
}

#[test]
fn persisted_file_is_readable_json() {
    let (_dir, store) = create_test_store();
    store
        .upsert("TRK1", ShipmentRecord::new("TRK1").with("quantity", 3))
        .unwrap();

    let contents = fs::read_to_string(store.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        value,
        json!({"TRK1": {"trackingNumber": "TRK1", "quantity": 3}})
    );
}

// ============================================================================
// Key Consistency
// ============================================================================

#[test]
fn record_stored_under_foreign_key_is_found_by_declared_number() {
    let (_dir, store) = create_test_store();
    fs::write(
        store.path(),
        r#"{"legacy-1": {"trackingNumber": "TRK42", "status": "Delivered"}}"#,
    )
    .unwrap();

    let record = store.resolve("TRK42").unwrap();
    assert_eq!(record.text("status"), "Delivered");
    assert!(store.get("TRK42").is_none());
}

#[test]
fn merge_rejects_key_change_and_keeps_file() {
    let (_dir, store) = create_test_store();
    store.upsert("TRK1", ShipmentRecord::new("TRK1")).unwrap();
    let before = fs::read(store.path()).unwrap();

    let err = store
        .merge("TRK1", ShipmentRecord::new("TRK2").with("status", "x"))
        .unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(fs::read(store.path()).unwrap(), before);
}

// ============================================================================
// String Edge Cases
// ============================================================================

#[test]
fn unicode_fields_round_trip_through_store() {
    let (_dir, store) = create_test_store();
    let values = ["上海", "Лагос", "Café", "📦📦", "Line\nBreak"];

    for (i, value) in values.iter().enumerate() {
        let key = format!("TRK{}", i);
        store
            .upsert(&key, ShipmentRecord::new(key.clone()).with("goodsDescription", *value))
            .unwrap();
        assert_eq!(store.get(&key).unwrap().text("goodsDescription"), *value);
    }
}

#[test]
fn unicode_receipt_renders() {
    let record = ShipmentRecord::new("TRK-ü")
        .with("origin", "上海")
        .with("goodsDescription", "📦 ".repeat(100));

    let pdf = receipt::render(&record, &CompanyProfile::default()).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn receipt_layout_is_stable_across_calls() {
    let record = ShipmentRecord::new("TRK1")
        .with("userName", "Ada")
        .with("totalAmount", 1250.5);
    let company = CompanyProfile::default();

    let first = receipt::layout(&record, &company);
    let second = receipt::layout(&record, &company);
    assert_eq!(first.lines(), second.lines());
    assert!(first.lines().contains(&"1250.5"));
}
