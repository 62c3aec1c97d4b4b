use std::path::PathBuf;

use shiptrack_model::{IssueCounts, RecordIssue, SummaryRow, TargetTimezone};
use shiptrack_report::OutputPaths;

#[derive(Debug)]
pub struct RunResult {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub timezone: TargetTimezone,
    pub input_count: usize,
    pub shipment_count: usize,
    pub issues: Vec<RecordIssue>,
    pub statistics: Vec<SummaryRow>,
    /// `None` on a dry run.
    pub outputs: Option<OutputPaths>,
    pub has_errors: bool,
}

impl RunResult {
    pub fn issue_counts(&self) -> IssueCounts {
        IssueCounts::from_issues(&self.issues)
    }
}
