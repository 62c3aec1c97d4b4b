//! Raw tracking export schema.
//!
//! These types mirror the nested JSON export one-to-one. Every field is
//! optional so that a single odd record deserializes cleanly and the
//! normalizer can decide whether the gap is a skip or a malformed record.

use serde::Deserialize;
use serde_json::Value;

/// `datesOrTimes` type holding the carrier pickup instant.
pub const ACTUAL_PICKUP: &str = "ACTUAL_PICKUP";
/// `datesOrTimes` type holding the carrier delivery instant.
pub const ACTUAL_DELIVERY: &str = "ACTUAL_DELIVERY";
/// Special handling type marking cash-on-delivery shipments.
pub const COD_HANDLING: &str = "COD";

/// One shipment object from the export.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawShipmentRecord {
    #[serde(default)]
    pub track_details: Option<Vec<TrackDetail>>,
}

impl RawShipmentRecord {
    /// The track detail block used for normalization (always the first one).
    pub fn primary_detail(&self) -> Option<&TrackDetail> {
        self.track_details.as_deref().and_then(<[TrackDetail]>::first)
    }
}

/// One element of the export array after decoding.
#[derive(Debug, Clone)]
pub enum ExportEntry {
    Record(RawShipmentRecord),
    /// The element has a field of the wrong JSON type.
    Rejected {
        tracking_number: Option<String>,
        reason: String,
    },
}

/// A carrier track detail block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackDetail {
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub shipment_weight: Option<ShipmentWeight>,
    #[serde(default)]
    pub special_handlings: Option<Vec<SpecialHandling>>,
    #[serde(default)]
    pub dates_or_times: Option<Vec<DateOrTimestamp>>,
    #[serde(default)]
    pub events: Option<Vec<TrackEvent>>,
    #[serde(default)]
    pub shipper_address: Option<Address>,
    #[serde(default)]
    pub destination_address: Option<Address>,
}

impl TrackDetail {
    pub fn special_handlings(&self) -> &[SpecialHandling] {
        self.special_handlings.as_deref().unwrap_or(&[])
    }

    pub fn dates_or_times(&self) -> &[DateOrTimestamp] {
        self.dates_or_times.as_deref().unwrap_or(&[])
    }

    pub fn events(&self) -> &[TrackEvent] {
        self.events.as_deref().unwrap_or(&[])
    }

    /// Tracking number, trimmed; `None` when absent or blank.
    pub fn tracking_number(&self) -> Option<&str> {
        self.tracking_number
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// `shipmentWeight` block. The value is numeric in most exports but some
/// carriers emit it as text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShipmentWeight {
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub units: Option<String>,
}

impl ShipmentWeight {
    /// Render the weight as it should appear in the flat table.
    ///
    /// Numbers keep their JSON representation, strings pass through trimmed.
    /// Null, blank and structured values yield `None`.
    pub fn display_value(&self) -> Option<String> {
        match self.value.as_ref()? {
            Value::Number(number) => Some(number.to_string()),
            Value::String(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpecialHandling {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl SpecialHandling {
    pub fn is_cod(&self) -> bool {
        self.kind.as_deref() == Some(COD_HANDLING)
    }
}

/// Entry of the `datesOrTimes` list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateOrTimestamp {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub date_or_timestamp: Option<String>,
}

/// Scan event emitted by the carrier.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackEvent {
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub timestamp: Option<NumberLong>,
    #[serde(default)]
    pub address: Option<Address>,
}

impl TrackEvent {
    /// Parsed event kind; `None` when the event carries no type.
    pub fn kind(&self) -> Option<EventKind> {
        self.event_type.as_deref().map(EventKind::from_code)
    }

    /// Raw timestamp text (epoch milliseconds in practice).
    pub fn raw_timestamp(&self) -> Option<String> {
        self.timestamp.as_ref().and_then(NumberLong::as_text)
    }
}

/// Event type codes the normalizer cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// `OD`: out for delivery.
    OutForDelivery,
    /// `DL`: delivered.
    Delivered,
    /// `PU`: picked up.
    PickedUp,
    Other,
}

impl EventKind {
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "OD" => Self::OutForDelivery,
            "DL" => Self::Delivered,
            "PU" => Self::PickedUp,
            _ => Self::Other,
        }
    }
}

/// Extended-JSON 64-bit integer wrapper (`{"$numberLong": "1704931800000"}`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NumberLong {
    #[serde(rename = "$numberLong", default)]
    pub value: Option<Value>,
}

impl NumberLong {
    pub fn as_text(&self) -> Option<String> {
        match self.value.as_ref()? {
            Value::String(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state_or_province_code: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}

impl Address {
    /// Postal code, trimmed; `None` when absent or blank.
    pub fn postal_code(&self) -> Option<&str> {
        non_blank(self.postal_code.as_deref())
    }

    pub fn city(&self) -> Option<&str> {
        non_blank(self.city.as_deref())
    }

    pub fn state(&self) -> Option<&str> {
        non_blank(self.state_or_province_code.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}
