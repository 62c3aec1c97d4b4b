//! Record normalizer: raw tracking records to flat shipment rows.
//!
//! Each raw record is handled on its own and ends up in exactly one of three
//! places: the flat table, the skipped list (no track details, missing
//! pickup/delivery milestone) or the malformed list.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, warn};

use shiptrack_model::{
    ACTUAL_DELIVERY, ACTUAL_PICKUP, Address, DateOrTimestamp, ExportEntry, FlatShipmentRecord,
    IssueCounts, IssueKind, PaymentType, RawShipmentRecord, RecordIssue, ShipmentWeight,
    SpecialHandling, TargetTimezone, TrackDetail,
};

use crate::datetime::{calendar_days_between, to_target_timezone};
use crate::error::{NormalizeError, Result};
use crate::events::EventDigest;

/// Why a record was left out of the flat table without being an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoTrackDetails,
    MissingPickup,
    MissingDelivery,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTrackDetails => write!(f, "no track details"),
            Self::MissingPickup => write!(f, "no {ACTUAL_PICKUP} timestamp"),
            Self::MissingDelivery => write!(f, "no {ACTUAL_DELIVERY} timestamp"),
        }
    }
}

/// Result of normalizing a single well-formed record.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    Shipment(Box<FlatShipmentRecord>),
    Skipped {
        tracking_number: Option<String>,
        reason: SkipReason,
    },
}

/// Output of a lenient normalization run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizeReport {
    /// Number of raw records examined.
    pub input_count: usize,
    pub shipments: Vec<FlatShipmentRecord>,
    /// Skipped and malformed records, in input order.
    pub issues: Vec<RecordIssue>,
}

impl NormalizeReport {
    fn with_capacity(input_count: usize) -> Self {
        Self {
            input_count,
            shipments: Vec::with_capacity(input_count),
            issues: Vec::new(),
        }
    }

    fn record(&mut self, index: usize, outcome: Result<RecordOutcome>) {
        match outcome {
            Ok(RecordOutcome::Shipment(shipment)) => self.shipments.push(*shipment),
            Ok(RecordOutcome::Skipped {
                tracking_number,
                reason,
            }) => {
                debug!(
                    record_index = index,
                    tracking_number = tracking_number.as_deref().unwrap_or("-"),
                    reason = %reason,
                    "record skipped"
                );
                self.issues.push(RecordIssue {
                    index,
                    tracking_number,
                    kind: IssueKind::Skipped,
                    message: reason.to_string(),
                });
            }
            Err(error) => {
                warn!(record_index = index, error = %error, "malformed record");
                self.issues.push(RecordIssue {
                    index,
                    tracking_number: error.tracking_number().map(str::to_string),
                    kind: IssueKind::Malformed,
                    message: error.to_string(),
                });
            }
        }
    }

    pub fn issue_counts(&self) -> IssueCounts {
        IssueCounts::from_issues(&self.issues)
    }

    pub fn has_malformed(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.kind == IssueKind::Malformed)
    }
}

/// Normalize every record, stopping at the first malformed one.
///
/// Skipped records are dropped silently (they are logged at debug level).
pub fn normalize(
    records: &[RawShipmentRecord],
    timezone: &TargetTimezone,
) -> Result<Vec<FlatShipmentRecord>> {
    let mut shipments = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        match normalize_record(index, record, timezone)? {
            RecordOutcome::Shipment(shipment) => shipments.push(*shipment),
            RecordOutcome::Skipped {
                tracking_number,
                reason,
            } => {
                debug!(
                    record_index = index,
                    tracking_number = tracking_number.as_deref().unwrap_or("-"),
                    reason = %reason,
                    "record skipped"
                );
            }
        }
    }
    Ok(shipments)
}

/// Normalize every record, collecting skipped and malformed records as issues.
///
/// A malformed record never affects the processing of other records.
pub fn normalize_with_report(
    records: &[RawShipmentRecord],
    timezone: &TargetTimezone,
) -> NormalizeReport {
    let mut report = NormalizeReport::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        report.record(index, normalize_record(index, record, timezone));
    }
    report
}

/// Like [`normalize_with_report`], over decoded export entries.
///
/// Entries rejected at decode time become malformed issues at their original
/// position.
pub fn normalize_entries(entries: &[ExportEntry], timezone: &TargetTimezone) -> NormalizeReport {
    let mut report = NormalizeReport::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let outcome = match entry {
            ExportEntry::Record(record) => normalize_record(index, record, timezone),
            ExportEntry::Rejected {
                tracking_number,
                reason,
            } => Err(NormalizeError::SchemaMismatch {
                index,
                tracking_number: tracking_number.clone(),
                reason: reason.clone(),
            }),
        };
        report.record(index, outcome);
    }
    report
}

/// Normalize one raw record.
///
/// `index` is the record's position in the export and only labels errors.
pub fn normalize_record(
    index: usize,
    record: &RawShipmentRecord,
    timezone: &TargetTimezone,
) -> Result<RecordOutcome> {
    let Some(detail) = record.primary_detail() else {
        return Ok(RecordOutcome::Skipped {
            tracking_number: None,
            reason: SkipReason::NoTrackDetails,
        });
    };
    let tracking_number = detail
        .tracking_number()
        .ok_or(NormalizeError::MissingTrackingNumber { index })?
        .to_string();
    let shipment_weight = detail
        .shipment_weight
        .as_ref()
        .and_then(ShipmentWeight::display_value)
        .ok_or_else(|| NormalizeError::MissingWeight {
            tracking_number: tracking_number.clone(),
        })?;

    let milestones = milestone_map(detail.dates_or_times());
    let Some(pickup_raw) = milestones.get(ACTUAL_PICKUP) else {
        return Ok(RecordOutcome::Skipped {
            tracking_number: Some(tracking_number),
            reason: SkipReason::MissingPickup,
        });
    };
    let Some(delivery_raw) = milestones.get(ACTUAL_DELIVERY) else {
        return Ok(RecordOutcome::Skipped {
            tracking_number: Some(tracking_number),
            reason: SkipReason::MissingDelivery,
        });
    };
    let pickup_datetime = to_target_timezone(pickup_raw, timezone).map_err(|source| {
        NormalizeError::InvalidTimestamp {
            tracking_number: tracking_number.clone(),
            field: ACTUAL_PICKUP,
            source,
        }
    })?;
    let delivery_datetime = to_target_timezone(delivery_raw, timezone).map_err(|source| {
        NormalizeError::InvalidTimestamp {
            tracking_number: tracking_number.clone(),
            field: ACTUAL_DELIVERY,
            source,
        }
    })?;

    let digest = EventDigest::scan(detail.events(), timezone).map_err(|source| {
        NormalizeError::InvalidTimestamp {
            tracking_number: tracking_number.clone(),
            field: "event",
            source,
        }
    })?;
    let Some(delivered_on) = digest.delivered_on else {
        return Err(NormalizeError::MissingDeliveredEvent { tracking_number });
    };

    let shipper = detail.shipper_address.as_ref();
    let destination = detail.destination_address.as_ref();
    let pickup_pincode = digest
        .pickup_postal_code
        .clone()
        .or_else(|| owned(shipper.and_then(Address::postal_code)));

    Ok(RecordOutcome::Shipment(Box::new(FlatShipmentRecord {
        payment_type: payment_type(detail),
        days_taken: calendar_days_between(&pickup_datetime, &delivery_datetime),
        delivery_attempts: digest.delivery_attempts(delivered_on),
        tracking_number,
        pickup_datetime,
        delivery_datetime,
        shipment_weight,
        pickup_pincode,
        pickup_city: owned(shipper.and_then(Address::city)),
        pickup_state: owned(shipper.and_then(Address::state)),
        drop_pincode: owned(destination.and_then(Address::postal_code)),
        drop_city: owned(destination.and_then(Address::city)),
        drop_state: owned(destination.and_then(Address::state)),
    })))
}

/// COD when any special handling is tagged COD.
pub fn payment_type(detail: &TrackDetail) -> PaymentType {
    if detail.special_handlings().iter().any(SpecialHandling::is_cod) {
        PaymentType::Cod
    } else {
        PaymentType::Prepaid
    }
}

/// Map `datesOrTimes` type to raw value; the last entry for a type wins.
/// Entries with a blank type or value are ignored.
pub fn milestone_map(entries: &[DateOrTimestamp]) -> BTreeMap<&str, &str> {
    let mut map = BTreeMap::new();
    for entry in entries {
        let kind = entry.kind.as_deref().map(str::trim).unwrap_or("");
        let value = entry
            .date_or_timestamp
            .as_deref()
            .map(str::trim)
            .unwrap_or("");
        if kind.is_empty() || value.is_empty() {
            continue;
        }
        map.insert(kind, value);
    }
    map
}

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}
