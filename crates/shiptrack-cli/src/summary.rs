use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use shiptrack_model::{IssueKind, RecordIssue};
use shiptrack_report::format_statistic;

use crate::types::RunResult;

pub fn print_summary(result: &RunResult) {
    println!("Input: {}", result.input.display());
    println!("Timezone: {}", result.timezone);
    match &result.outputs {
        Some(paths) => {
            println!("Flat table: {}", paths.flat_table.display());
            println!("Summary: {}", paths.summary.display());
        }
        None => println!("Output: dry run, nothing written to {}", result.output_dir.display()),
    }

    let counts = result.issue_counts();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Records"),
        header_cell("Shipments"),
        header_cell("Skipped"),
        header_cell("Malformed"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(result.input_count).add_attribute(Attribute::Bold),
        Cell::new(result.shipment_count)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        count_cell(counts.skipped, Color::Yellow),
        count_cell(counts.malformed, Color::Red),
    ]);
    println!("{table}");

    print_statistics_table(result);
    print_issue_table(&result.issues);
}

fn print_statistics_table(result: &RunResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Metric"),
        header_cell("Mean"),
        header_cell("Median"),
        header_cell("Mode"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for row in &result.statistics {
        table.add_row(vec![
            Cell::new(row.metric)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(format!("{:.2}", row.mean)),
            Cell::new(format_statistic(row.median)),
            Cell::new(row.mode),
        ]);
    }
    println!();
    println!("Statistics:");
    println!("{table}");
}

fn print_issue_table(issues: &[RecordIssue]) {
    if issues.is_empty() {
        return;
    }
    let mut ordered: Vec<&RecordIssue> = issues.iter().collect();
    ordered.sort_by_key(|issue| (kind_rank(issue.kind), issue.index));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Record"),
        header_cell("Tracking number"),
        header_cell("Kind"),
        header_cell("Reason"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    for issue in ordered {
        table.add_row(vec![
            Cell::new(issue.index),
            match &issue.tracking_number {
                Some(number) => Cell::new(number),
                None => dim_cell("-"),
            },
            kind_cell(issue.kind),
            Cell::new(&issue.message),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::UpperBoundary(Width::Fixed(20)),
            ColumnConstraint::UpperBoundary(Width::Fixed(10)),
            ColumnConstraint::UpperBoundary(Width::Percentage(70)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn kind_rank(kind: IssueKind) -> u8 {
    match kind {
        IssueKind::Malformed => 0,
        IssueKind::Skipped => 1,
    }
}

fn kind_cell(kind: IssueKind) -> Cell {
    match kind {
        IssueKind::Malformed => Cell::new("MALFORMED")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        IssueKind::Skipped => Cell::new("SKIPPED").fg(Color::Yellow),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
