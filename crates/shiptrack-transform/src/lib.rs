//! Shipment record transformation.
//!
//! This crate turns raw tracking records into flat shipment rows:
//!
//! - **datetime**: epoch-millisecond and ISO 8601 timestamps into the target timezone
//! - **events**: single-pass event digestion and delivery-attempt counting
//! - **normalize**: the record normalizer (strict and reporting variants)
//! - **frame**: the flat table as a Polars DataFrame

pub mod datetime;
pub mod error;
pub mod events;
pub mod frame;
pub mod normalize;

pub use datetime::{
    TimestampError, calendar_days_between, format_local, local_date, parse_instant,
    to_target_timezone,
};
pub use error::{NormalizeError, Result};
pub use events::{EventDigest, count_delivery_attempts};
pub use frame::build_shipment_frame;
pub use normalize::{
    NormalizeReport, RecordOutcome, SkipReason, milestone_map, normalize, normalize_entries,
    normalize_record, normalize_with_report, payment_type,
};
