//! Summary statistics for the flat shipment table.
//!
//! Mean, median and mode are computed per metric column. Mode is strict: a
//! column with several values tied for the highest frequency has no mode and
//! is reported as an error instead of being resolved by an arbitrary pick.

pub mod aggregate;
pub mod error;

pub use aggregate::{Summary, mean, median, mode, summarize, summarize_shipments};
pub use error::{StatsError, SummaryError};
