use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use shiptrack_model::{ExportEntry, RawShipmentRecord};

use crate::error::{IngestError, Result};

/// Load every entry of an export file.
pub fn load_export(path: &Path) -> Result<Vec<ExportEntry>> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = read_export(BufReader::new(file), path)?;
    debug!(
        path = %path.display(),
        record_count = entries.len(),
        rejected = entries
            .iter()
            .filter(|entry| matches!(entry, ExportEntry::Rejected { .. }))
            .count(),
        "export loaded"
    );
    Ok(entries)
}

/// Decode export entries from any reader.
///
/// The document as a whole must be a JSON array. Each element is decoded on
/// its own; one with a mistyped field becomes [`ExportEntry::Rejected`] and
/// keeps its position. `source` is only used to label errors.
pub fn read_export<R: Read>(reader: R, source: &Path) -> Result<Vec<ExportEntry>> {
    let document: Value =
        serde_json::from_reader(reader).map_err(|error| IngestError::JsonParse {
            path: source.to_path_buf(),
            source: error,
        })?;
    let Value::Array(items) = document else {
        return Err(IngestError::NotAnArray {
            path: source.to_path_buf(),
            found: json_kind(&document),
        });
    };
    Ok(items.into_iter().map(decode_entry).collect())
}

fn decode_entry(item: Value) -> ExportEntry {
    let tracking_number = item
        .pointer("/trackDetails/0/trackingNumber")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|number| !number.is_empty())
        .map(str::to_string);
    match serde_json::from_value::<RawShipmentRecord>(item) {
        Ok(record) => ExportEntry::Record(record),
        Err(error) => ExportEntry::Rejected {
            tracking_number,
            reason: error.to_string(),
        },
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
