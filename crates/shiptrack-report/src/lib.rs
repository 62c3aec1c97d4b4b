//! Output generation for shipment runs.
//!
//! Both CSV files are rendered in memory first and only then moved onto disk,
//! so a failed run never leaves a half-written table behind.

pub mod flat;
pub mod output;
pub mod summary;

pub use flat::render_flat_table;
pub use output::{FLAT_FILE_NAME, OutputPaths, SUMMARY_FILE_NAME, write_atomic, write_outputs};
pub use summary::{SUMMARY_HEADER, format_statistic, render_summary, write_summary_csv};
