pub mod error;
pub mod issue;
pub mod options;
pub mod raw;
pub mod shipment;
pub mod summary;
pub mod timezone;

pub use error::{ModelError, Result};
pub use issue::{IssueCounts, IssueKind, RecordIssue};
pub use options::{MalformedRecordPolicy, ProcessingOptions};
pub use raw::{
    ACTUAL_DELIVERY, ACTUAL_PICKUP, Address, COD_HANDLING, DateOrTimestamp, EventKind, ExportEntry,
    NumberLong, RawShipmentRecord, ShipmentWeight, SpecialHandling, TrackDetail, TrackEvent,
};
pub use shipment::{
    DATETIME_FORMAT, FLAT_COLUMNS, FlatShipmentRecord, PaymentType, column_description,
};
pub use summary::{Metric, SummaryRow};
pub use timezone::{DEFAULT_TIMEZONE, TargetTimezone, parse_utc_offset};
