//! Event stream digestion and delivery-attempt counting.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use shiptrack_model::{Address, EventKind, TargetTimezone, TrackEvent};

use crate::datetime::{TimestampError, local_date};

/// Everything the normalizer needs from a shipment's event list, gathered in
/// one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDigest {
    /// Distinct local dates with an `OD` (out for delivery) scan.
    pub out_for_delivery_dates: BTreeSet<NaiveDate>,
    /// Local date of the first `DL` (delivered) scan.
    pub delivered_on: Option<NaiveDate>,
    /// Postal code on the first `PU` (picked up) scan.
    pub pickup_postal_code: Option<String>,
}

impl EventDigest {
    /// Scan events in order. Events without a timestamp are ignored.
    pub fn scan(events: &[TrackEvent], timezone: &TargetTimezone) -> Result<Self, TimestampError> {
        let mut digest = Self::default();
        let mut seen_pickup = false;
        for event in events {
            match event.kind() {
                Some(EventKind::OutForDelivery) => {
                    if let Some(raw) = event.raw_timestamp() {
                        digest
                            .out_for_delivery_dates
                            .insert(local_date(&raw, timezone)?);
                    }
                }
                Some(EventKind::Delivered) if digest.delivered_on.is_none() => {
                    if let Some(raw) = event.raw_timestamp() {
                        digest.delivered_on = Some(local_date(&raw, timezone)?);
                    }
                }
                Some(EventKind::PickedUp) if !seen_pickup => {
                    seen_pickup = true;
                    digest.pickup_postal_code = event
                        .address
                        .as_ref()
                        .and_then(Address::postal_code)
                        .map(str::to_string);
                }
                _ => {}
            }
        }
        Ok(digest)
    }

    /// Delivery attempts for this shipment, given its delivery date.
    pub fn delivery_attempts(&self, delivered_on: NaiveDate) -> i64 {
        count_delivery_attempts(&self.out_for_delivery_dates, delivered_on)
    }
}

/// Count delivery attempts.
///
/// Every distinct out-for-delivery date is one attempt. The delivery itself
/// adds one more when it happened on a day without an `OD` scan, so a
/// shipment delivered without any `OD` scan has exactly one attempt.
pub fn count_delivery_attempts(
    out_for_delivery_dates: &BTreeSet<NaiveDate>,
    delivered_on: NaiveDate,
) -> i64 {
    let attempts = out_for_delivery_dates.len() as i64;
    if out_for_delivery_dates.contains(&delivered_on) {
        attempts
    } else {
        attempts + 1
    }
}
