//! Error types for record normalization.

use thiserror::Error;

use crate::datetime::TimestampError;

/// A track detail block that breaks an assumption of the export format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("record #{index} has no tracking number")]
    MissingTrackingNumber { index: usize },

    #[error("record #{index} does not match the export schema: {reason}")]
    SchemaMismatch {
        index: usize,
        tracking_number: Option<String>,
        reason: String,
    },

    #[error("shipment {tracking_number} has no shipment weight")]
    MissingWeight { tracking_number: String },

    #[error("shipment {tracking_number} has no DL (delivered) event")]
    MissingDeliveredEvent { tracking_number: String },

    #[error("shipment {tracking_number} has an unreadable {field} timestamp: {source}")]
    InvalidTimestamp {
        tracking_number: String,
        field: &'static str,
        #[source]
        source: TimestampError,
    },
}

impl NormalizeError {
    /// Tracking number of the offending shipment, when it was readable.
    pub fn tracking_number(&self) -> Option<&str> {
        match self {
            Self::MissingTrackingNumber { .. } => None,
            Self::SchemaMismatch {
                tracking_number, ..
            } => tracking_number.as_deref(),
            Self::MissingWeight { tracking_number }
            | Self::MissingDeliveredEvent { tracking_number }
            | Self::InvalidTimestamp {
                tracking_number, ..
            } => Some(tracking_number),
        }
    }
}

/// Result type for normalization operations.
pub type Result<T> = std::result::Result<T, NormalizeError>;
