use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Output timestamp layout: local wall-clock time without an offset suffix.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentType {
    #[serde(rename = "COD")]
    Cod,
    Prepaid,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cod => "COD",
            Self::Prepaid => "Prepaid",
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentType {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            v if v.eq_ignore_ascii_case("cod") => Ok(Self::Cod),
            v if v.eq_ignore_ascii_case("prepaid") => Ok(Self::Prepaid),
            other => Err(ModelError::UnknownPaymentType(other.to_string())),
        }
    }
}

/// One normalized shipment row.
///
/// Timestamps are already expressed in the run's target timezone.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatShipmentRecord {
    pub tracking_number: String,
    pub payment_type: PaymentType,
    pub pickup_datetime: DateTime<FixedOffset>,
    pub delivery_datetime: DateTime<FixedOffset>,
    /// Calendar-day difference between local delivery and pickup dates.
    pub days_taken: i64,
    pub shipment_weight: String,
    pub pickup_pincode: Option<String>,
    pub pickup_city: Option<String>,
    pub pickup_state: Option<String>,
    pub drop_pincode: Option<String>,
    pub drop_city: Option<String>,
    pub drop_state: Option<String>,
    pub delivery_attempts: i64,
}

/// Flat table columns, in output order.
pub const FLAT_COLUMNS: [&str; 13] = [
    "tracking_number",
    "payment_type",
    "pickup_datetime",
    "delivery_datetime",
    "days_taken",
    "shipment_weight",
    "pickup_pincode",
    "pickup_city",
    "pickup_state",
    "drop_pincode",
    "drop_city",
    "drop_state",
    "delivery_attempts",
];

/// Human-readable description for each flat table column.
pub fn column_description(column: &str) -> Option<&'static str> {
    let description = match column {
        "tracking_number" => "Carrier tracking number",
        "payment_type" => "COD when any special handling is COD, otherwise Prepaid",
        "pickup_datetime" => "Actual pickup time in the target timezone",
        "delivery_datetime" => "Actual delivery time in the target timezone",
        "days_taken" => "Calendar days between local pickup and delivery dates",
        "shipment_weight" => "Shipment weight as reported by the carrier",
        "pickup_pincode" => "Pickup scan postal code, falling back to the shipper address",
        "pickup_city" => "Shipper city",
        "pickup_state" => "Shipper state or province code",
        "drop_pincode" => "Destination postal code",
        "drop_city" => "Destination city",
        "drop_state" => "Destination state or province code",
        "delivery_attempts" => "Distinct out-for-delivery dates, plus one if delivered on another day",
        _ => return None,
    };
    Some(description)
}
