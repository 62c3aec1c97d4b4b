//! Shipment processing pipeline with explicit stages.
//!
//! The stages run in order:
//! 1. **Ingest**: load the JSON export
//! 2. **Normalize**: raw records to flat rows, collecting record issues
//! 3. **Summarize**: mean, median and mode per metric
//! 4. **Output**: write the flat table and summary CSV files
//!
//! Each stage takes the output of the previous stage and returns typed
//! results. Nothing touches the output directory before stage 4.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use shiptrack_ingest::load_export;
use shiptrack_model::{
    ExportEntry, FlatShipmentRecord, IssueKind, ProcessingOptions, SummaryRow,
};
use shiptrack_report::{OutputPaths, write_outputs};
use shiptrack_stats::summarize_shipments;
use shiptrack_transform::{NormalizeReport, normalize_entries};

// ============================================================================
// Stage 1: Ingest
// ============================================================================

pub fn ingest(input: &Path) -> Result<Vec<ExportEntry>> {
    let span = info_span!("ingest", input = %input.display());
    let _guard = span.enter();
    let start = Instant::now();
    let entries = load_export(input).with_context(|| format!("load {}", input.display()))?;
    info!(
        record_count = entries.len(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(entries)
}

// ============================================================================
// Stage 2: Normalize
// ============================================================================

/// Normalize all entries under `options`.
///
/// With [`MalformedRecordPolicy::Abort`](shiptrack_model::MalformedRecordPolicy)
/// the first malformed record, including one rejected at decode time, fails
/// the stage.
pub fn normalize(entries: &[ExportEntry], options: &ProcessingOptions) -> Result<NormalizeReport> {
    let span = info_span!("normalize", timezone = %options.timezone);
    let _guard = span.enter();
    let start = Instant::now();
    let report = normalize_entries(entries, &options.timezone);
    if options.is_strict()
        && let Some(issue) = report
            .issues
            .iter()
            .find(|issue| issue.kind == IssueKind::Malformed)
    {
        bail!(
            "malformed record {} (index {}): {}",
            issue.label(),
            issue.index,
            issue.message
        );
    }
    let counts = report.issue_counts();
    info!(
        input_count = report.input_count,
        shipment_count = report.shipments.len(),
        skipped = counts.skipped,
        malformed = counts.malformed,
        duration_ms = start.elapsed().as_millis(),
        "normalize complete"
    );
    Ok(report)
}

// ============================================================================
// Stage 3: Summarize
// ============================================================================

pub fn summarize(shipments: &[FlatShipmentRecord]) -> Result<Vec<SummaryRow>> {
    let span = info_span!("summarize", shipment_count = shipments.len());
    let _guard = span.enter();
    let start = Instant::now();
    let rows = summarize_shipments(shipments).context("summarize shipments")?;
    info!(
        metric_count = rows.len(),
        duration_ms = start.elapsed().as_millis(),
        "summarize complete"
    );
    Ok(rows)
}

// ============================================================================
// Stage 4: Output
// ============================================================================

pub fn output(
    output_dir: &Path,
    shipments: &[FlatShipmentRecord],
    rows: &[SummaryRow],
) -> Result<OutputPaths> {
    let span = info_span!("output", output_dir = %output_dir.display());
    let _guard = span.enter();
    let start = Instant::now();
    let paths = write_outputs(output_dir, shipments, rows)?;
    info!(
        flat_table = %paths.flat_table.display(),
        summary = %paths.summary.display(),
        duration_ms = start.elapsed().as_millis(),
        "output complete"
    );
    Ok(paths)
}
