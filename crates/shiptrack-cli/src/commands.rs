use anyhow::Result;
use comfy_table::Table;
use tracing::{info, info_span};

use shiptrack_model::{FLAT_COLUMNS, ProcessingOptions, column_description};
use shiptrack_cli::pipeline::{ingest, normalize, output, summarize};

use crate::cli::ProcessArgs;
use crate::summary::apply_table_style;
use crate::types::RunResult;

pub fn run_columns() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["#", "Column", "Description"]);
    apply_table_style(&mut table);
    for (position, column) in FLAT_COLUMNS.iter().enumerate() {
        table.add_row(vec![
            (position + 1).to_string(),
            (*column).to_string(),
            column_description(column).unwrap_or_default().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_process(args: &ProcessArgs) -> Result<RunResult> {
    let run_span = info_span!("process", input = %args.input.display());
    let _run_guard = run_span.enter();

    let mut options = ProcessingOptions::new(args.timezone);
    if args.strict {
        options = options.strict();
    }

    let entries = ingest(&args.input)?;
    let report = normalize(&entries, &options)?;
    let statistics = summarize(&report.shipments)?;

    let outputs = if args.dry_run {
        info!(output_dir = %args.output_dir.display(), "dry run, no files written");
        None
    } else {
        Some(output(&args.output_dir, &report.shipments, &statistics)?)
    };

    let has_errors = report.has_malformed();
    Ok(RunResult {
        input: args.input.clone(),
        output_dir: args.output_dir.clone(),
        timezone: options.timezone,
        input_count: report.input_count,
        shipment_count: report.shipments.len(),
        issues: report.issues,
        statistics,
        outputs,
        has_errors,
    })
}
