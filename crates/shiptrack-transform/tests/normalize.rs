//! Tests for the record normalizer.

use serde_json::{Value, json};

use shiptrack_model::{ExportEntry, IssueKind, PaymentType, RawShipmentRecord, TargetTimezone};
use shiptrack_transform::{
    NormalizeError, RecordOutcome, SkipReason, format_local, normalize, normalize_entries,
    normalize_record, normalize_with_report,
};

fn ist() -> TargetTimezone {
    TargetTimezone::fixed(5, 30).unwrap()
}

fn record(value: Value) -> RawShipmentRecord {
    serde_json::from_value(value).expect("valid raw record")
}

fn millis(ts: &str) -> Value {
    json!({"$numberLong": ts})
}

/// A complete, delivered shipment. Pickup 2024-01-10T23:50:00Z, delivery
/// 2024-01-12T01:00:00Z; OD scans on 2024-01-11 and 2024-01-12 (IST).
fn delivered_shipment(tracking_number: &str) -> Value {
    json!({
        "trackDetails": [{
            "trackingNumber": tracking_number,
            "shipmentWeight": {"units": "KG", "value": 0.5},
            "specialHandlings": [
                {"type": "DELIVER_WEEKDAY"},
                {"type": "COD", "description": "Collect on Delivery"}
            ],
            "datesOrTimes": [
                {"type": "ACTUAL_PICKUP", "dateOrTimestamp": "2024-01-10T23:50:00Z"},
                {"type": "ACTUAL_DELIVERY", "dateOrTimestamp": "2024-01-12T01:00:00Z"}
            ],
            "events": [
                {"eventType": "DL", "timestamp": millis("1705021200000")},
                {"eventType": "OD", "timestamp": millis("1705017600000")},
                {"eventType": "OD", "timestamp": millis("1704940200000")},
                {"eventType": "PU", "timestamp": millis("1704930600000"),
                 "address": {"city": "BENGALURU", "postalCode": "560034"}}
            ],
            "shipperAddress": {"city": "Bengaluru", "stateOrProvinceCode": "KA", "postalCode": "560001"},
            "destinationAddress": {"city": "Mumbai", "stateOrProvinceCode": "MH", "postalCode": "400001"}
        }]
    })
}

#[test]
fn complete_record_normalizes() {
    let records = vec![record(delivered_shipment("777000111222"))];
    let shipments = normalize(&records, &ist()).unwrap();
    assert_eq!(shipments.len(), 1);
    let shipment = &shipments[0];
    assert_eq!(shipment.tracking_number, "777000111222");
    assert_eq!(shipment.payment_type, PaymentType::Cod);
    assert_eq!(format_local(&shipment.pickup_datetime), "2024-01-11 05:20:00");
    assert_eq!(format_local(&shipment.delivery_datetime), "2024-01-12 06:30:00");
    assert_eq!(shipment.days_taken, 1);
    assert_eq!(shipment.shipment_weight, "0.5");
    assert_eq!(shipment.pickup_pincode.as_deref(), Some("560034"));
    assert_eq!(shipment.pickup_city.as_deref(), Some("Bengaluru"));
    assert_eq!(shipment.pickup_state.as_deref(), Some("KA"));
    assert_eq!(shipment.drop_pincode.as_deref(), Some("400001"));
    assert_eq!(shipment.drop_city.as_deref(), Some("Mumbai"));
    assert_eq!(shipment.drop_state.as_deref(), Some("MH"));
    // OD on 01-11 and 01-12, DL on 01-12: already counted.
    assert_eq!(shipment.delivery_attempts, 2);
}

#[test]
fn no_special_handling_is_prepaid() {
    let mut value = delivered_shipment("1");
    value["trackDetails"][0]["specialHandlings"] = json!([]);
    let shipments = normalize(&[record(value)], &ist()).unwrap();
    assert_eq!(shipments[0].payment_type, PaymentType::Prepaid);
}

#[test]
fn delivery_without_od_scans_is_one_attempt() {
    let mut value = delivered_shipment("1");
    value["trackDetails"][0]["events"] = json!([
        {"eventType": "DL", "timestamp": millis("1704931200000")}
    ]);
    let shipments = normalize(&[record(value)], &ist()).unwrap();
    assert_eq!(shipments[0].delivery_attempts, 1);
}

#[test]
fn pickup_pincode_falls_back_to_shipper() {
    let mut value = delivered_shipment("1");
    value["trackDetails"][0]["events"] = json!([
        {"eventType": "PU", "timestamp": millis("1704930600000"), "address": {"city": "X"}},
        {"eventType": "DL", "timestamp": millis("1705021200000")}
    ]);
    let shipments = normalize(&[record(value)], &ist()).unwrap();
    assert_eq!(shipments[0].pickup_pincode.as_deref(), Some("560001"));
}

#[test]
fn missing_addresses_default_to_empty() {
    let mut value = delivered_shipment("1");
    let detail = value["trackDetails"][0].as_object_mut().unwrap();
    detail.remove("shipperAddress");
    detail.remove("destinationAddress");
    detail.insert(
        "events".to_string(),
        json!([{"eventType": "DL", "timestamp": millis("1705021200000")}]),
    );
    let shipments = normalize(&[record(value)], &ist()).unwrap();
    let shipment = &shipments[0];
    assert_eq!(shipment.pickup_pincode, None);
    assert_eq!(shipment.pickup_city, None);
    assert_eq!(shipment.drop_state, None);
}

#[test]
fn empty_track_details_are_skipped() {
    let records = vec![
        record(json!({"trackDetails": []})),
        record(json!({})),
        record(delivered_shipment("1")),
    ];
    let shipments = normalize(&records, &ist()).unwrap();
    assert_eq!(shipments.len(), 1);
    assert_eq!(
        normalize_record(0, &records[0], &ist()).unwrap(),
        RecordOutcome::Skipped {
            tracking_number: None,
            reason: SkipReason::NoTrackDetails,
        }
    );
}

#[test]
fn only_first_track_detail_is_used() {
    let mut value = delivered_shipment("FIRST");
    let second = delivered_shipment("SECOND")["trackDetails"][0].clone();
    value["trackDetails"].as_array_mut().unwrap().push(second);
    let shipments = normalize(&[record(value)], &ist()).unwrap();
    assert_eq!(shipments.len(), 1);
    assert_eq!(shipments[0].tracking_number, "FIRST");
}

#[test]
fn missing_milestones_are_skipped() {
    let mut value = delivered_shipment("NO-DELIVERY");
    value["trackDetails"][0]["datesOrTimes"] = json!([
        {"type": "ACTUAL_PICKUP", "dateOrTimestamp": "2024-01-10T23:50:00Z"}
    ]);
    let outcome = normalize_record(0, &record(value), &ist()).unwrap();
    assert_eq!(
        outcome,
        RecordOutcome::Skipped {
            tracking_number: Some("NO-DELIVERY".to_string()),
            reason: SkipReason::MissingDelivery,
        }
    );
}

#[test]
fn millisecond_milestones_are_accepted() {
    let mut value = delivered_shipment("1");
    value["trackDetails"][0]["datesOrTimes"] = json!([
        {"type": "ACTUAL_PICKUP", "dateOrTimestamp": "1704930600000"},
        {"type": "ACTUAL_DELIVERY", "dateOrTimestamp": "1705021200000"}
    ]);
    let shipments = normalize(&[record(value)], &ist()).unwrap();
    assert_eq!(format_local(&shipments[0].pickup_datetime), "2024-01-11 05:20:00");
    assert_eq!(shipments[0].days_taken, 1);
}

#[test]
fn negative_transit_passes_through() {
    let mut value = delivered_shipment("1");
    value["trackDetails"][0]["datesOrTimes"] = json!([
        {"type": "ACTUAL_PICKUP", "dateOrTimestamp": "2024-01-12T10:00:00Z"},
        {"type": "ACTUAL_DELIVERY", "dateOrTimestamp": "2024-01-10T10:00:00Z"}
    ]);
    let shipments = normalize(&[record(value)], &ist()).unwrap();
    assert_eq!(shipments[0].days_taken, -2);
}

#[test]
fn missing_delivered_event_is_malformed() {
    let mut value = delivered_shipment("NO-DL");
    value["trackDetails"][0]["events"] = json!([
        {"eventType": "OD", "timestamp": millis("1704940200000")}
    ]);
    let err = normalize(&[record(value)], &ist()).unwrap_err();
    assert_eq!(
        err,
        NormalizeError::MissingDeliveredEvent {
            tracking_number: "NO-DL".to_string()
        }
    );
}

#[test]
fn missing_tracking_number_and_weight_are_malformed() {
    let mut value = delivered_shipment("1");
    value["trackDetails"][0]
        .as_object_mut()
        .unwrap()
        .remove("trackingNumber");
    let err = normalize_record(7, &record(value), &ist()).unwrap_err();
    assert_eq!(err, NormalizeError::MissingTrackingNumber { index: 7 });

    let mut value = delivered_shipment("HEAVY");
    value["trackDetails"][0]["shipmentWeight"] = json!({"units": "KG"});
    let err = normalize_record(0, &record(value), &ist()).unwrap_err();
    assert!(matches!(err, NormalizeError::MissingWeight { .. }));
}

#[test]
fn unreadable_milestone_is_malformed() {
    let mut value = delivered_shipment("BAD-TS");
    value["trackDetails"][0]["datesOrTimes"][0]["dateOrTimestamp"] = json!("last week");
    let err = normalize_record(0, &record(value), &ist()).unwrap_err();
    assert!(matches!(
        err,
        NormalizeError::InvalidTimestamp { field: "ACTUAL_PICKUP", .. }
    ));
}

#[test]
fn report_isolates_malformed_records() {
    let mut broken = delivered_shipment("NO-DL");
    broken["trackDetails"][0]["events"] = json!([]);
    let records = vec![
        record(delivered_shipment("A")),
        record(json!({"trackDetails": []})),
        record(broken),
        record(delivered_shipment("B")),
    ];
    let report = normalize_with_report(&records, &ist());
    assert_eq!(report.input_count, 4);
    let numbers: Vec<&str> = report
        .shipments
        .iter()
        .map(|s| s.tracking_number.as_str())
        .collect();
    assert_eq!(numbers, vec!["A", "B"]);
    assert_eq!(report.issues.len(), 2);
    assert_eq!(report.issues[0].index, 1);
    assert_eq!(report.issues[0].kind, IssueKind::Skipped);
    assert_eq!(report.issues[1].index, 2);
    assert_eq!(report.issues[1].kind, IssueKind::Malformed);
    assert_eq!(report.issues[1].tracking_number.as_deref(), Some("NO-DL"));
    assert!(report.has_malformed());
    let counts = report.issue_counts();
    assert_eq!((counts.skipped, counts.malformed), (1, 1));
}

#[test]
fn rejected_entries_keep_their_position() {
    let entries = vec![
        ExportEntry::Record(record(delivered_shipment("A"))),
        ExportEntry::Rejected {
            tracking_number: Some("BAD".to_string()),
            reason: "invalid type: integer `7`, expected a string".to_string(),
        },
        ExportEntry::Record(record(delivered_shipment("B"))),
    ];
    let report = normalize_entries(&entries, &ist());

    assert_eq!(report.input_count, 3);
    assert_eq!(report.shipments.len(), 2);
    assert_eq!(report.issues.len(), 1);
    let issue = &report.issues[0];
    assert_eq!(issue.index, 1);
    assert_eq!(issue.kind, IssueKind::Malformed);
    assert_eq!(issue.tracking_number.as_deref(), Some("BAD"));
    assert!(issue.message.contains("does not match the export schema"));
}

#[test]
fn normalize_is_idempotent() {
    let records = vec![
        record(delivered_shipment("A")),
        record(delivered_shipment("B")),
    ];
    let first = normalize(&records, &ist()).unwrap();
    let second = normalize(&records, &ist()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn target_timezone_changes_calendar_days() {
    // 23:50Z pickup is the next day in IST but the same day in UTC.
    let records = vec![record(delivered_shipment("1"))];
    let in_ist = normalize(&records, &ist()).unwrap();
    let in_utc = normalize(&records, &TargetTimezone::utc()).unwrap();
    assert_eq!(in_ist[0].days_taken, 1);
    assert_eq!(in_utc[0].days_taken, 2);
}
