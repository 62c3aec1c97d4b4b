//! Summary statistics CSV.

use std::path::Path;

use anyhow::{Context, Result};

use shiptrack_model::SummaryRow;

use crate::output::write_atomic;

pub const SUMMARY_HEADER: [&str; 4] = ["metric", "mean", "median", "mode"];

/// Shortest decimal form of a statistic: `2.0` renders as `2`, `2.5` as `2.5`.
pub fn format_statistic(value: f64) -> String {
    value.to_string()
}

/// Render summary rows as CSV bytes, header included.
pub fn render_summary(rows: &[SummaryRow]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(SUMMARY_HEADER)
        .context("write summary header")?;
    for row in rows {
        writer
            .write_record([
                row.metric.as_str().to_string(),
                format_statistic(row.mean),
                format_statistic(row.median),
                row.mode.to_string(),
            ])
            .with_context(|| format!("write summary row {}", row.metric))?;
    }
    writer.into_inner().context("flush summary csv")
}

pub fn write_summary_csv(path: &Path, rows: &[SummaryRow]) -> Result<()> {
    let bytes = render_summary(rows)?;
    write_atomic(path, &bytes)
}
