//! Loading of the nested JSON tracking export.
//!
//! The export is a single JSON array with one object per shipment. Loading
//! decodes the whole document up front; normalization works on the decoded
//! records in memory.

pub mod error;
pub mod export;

pub use error::{IngestError, Result};
pub use export::{load_export, read_export};
