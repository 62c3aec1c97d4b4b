//! Flat table CSV.

use anyhow::{Context, Result};
use polars::prelude::{CsvWriter, SerWriter};

use shiptrack_model::FlatShipmentRecord;
use shiptrack_transform::build_shipment_frame;

/// Render the flat table as CSV bytes, header included.
pub fn render_flat_table(shipments: &[FlatShipmentRecord]) -> Result<Vec<u8>> {
    let mut df = build_shipment_frame(shipments).context("build flat shipment frame")?;
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .finish(&mut df)
        .context("render flat table csv")?;
    Ok(buffer)
}
