//! Tests for export loading.

use std::io::Write;
use std::path::Path;

use shiptrack_ingest::{IngestError, load_export, read_export};
use shiptrack_model::ExportEntry;

const EXPORT: &str = r#"[
    {"trackDetails": [{"trackingNumber": "TN-1", "shipmentWeight": {"value": 2}}]},
    {"trackDetails": []},
    {"_id": {"$oid": "65a1"}}
]"#;

fn record(entry: &ExportEntry) -> &shiptrack_model::RawShipmentRecord {
    match entry {
        ExportEntry::Record(record) => record,
        ExportEntry::Rejected { reason, .. } => panic!("unexpected rejection: {reason}"),
    }
}

#[test]
fn reads_array_of_shipments() {
    let entries = read_export(EXPORT.as_bytes(), Path::new("export.json")).unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(
        record(&entries[0])
            .primary_detail()
            .and_then(|d| d.tracking_number()),
        Some("TN-1")
    );
    assert!(record(&entries[1]).primary_detail().is_none());
    assert!(record(&entries[2]).primary_detail().is_none());
}

#[test]
fn rejects_non_array_document() {
    let err = read_export(r#"{"trackDetails": []}"#.as_bytes(), Path::new("x.json"))
        .unwrap_err();
    assert!(matches!(err, IngestError::NotAnArray { found: "object", .. }));
}

#[test]
fn rejects_invalid_json() {
    let err = read_export("[{".as_bytes(), Path::new("x.json")).unwrap_err();
    assert!(matches!(err, IngestError::JsonParse { .. }));
}

#[test]
fn mistyped_record_is_rejected_in_place() {
    let doc = r#"[
        {"trackDetails": []},
        {"trackDetails": [{"trackingNumber": "TN-2", "events": "oops"}]},
        {"trackDetails": [{"trackingNumber": 42}]},
        {"trackDetails": [{"trackingNumber": "TN-4"}]}
    ]"#;
    let entries = read_export(doc.as_bytes(), Path::new("x.json")).unwrap();

    assert_eq!(entries.len(), 4);
    match &entries[1] {
        ExportEntry::Rejected {
            tracking_number,
            reason,
        } => {
            assert_eq!(tracking_number.as_deref(), Some("TN-2"));
            assert!(reason.contains("invalid type"), "{reason}");
        }
        ExportEntry::Record(_) => panic!("record 1 should be rejected"),
    }
    assert!(matches!(
        &entries[2],
        ExportEntry::Rejected {
            tracking_number: None,
            ..
        }
    ));
    assert_eq!(
        record(&entries[3])
            .primary_detail()
            .and_then(|d| d.tracking_number()),
        Some("TN-4")
    );
}

#[test]
fn loads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.json");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(EXPORT.as_bytes()).unwrap();
    drop(file);

    let entries = load_export(&path).unwrap();
    assert_eq!(entries.len(), 3);
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_export(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}
