use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    /// Record intentionally excluded (no track details, missing timestamps).
    Skipped,
    /// Record violated an assumption of the export format.
    Malformed,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped => f.write_str("skipped"),
            Self::Malformed => f.write_str("malformed"),
        }
    }
}

/// A raw record that did not make it into the flat table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordIssue {
    /// Zero-based position of the record in the export.
    pub index: usize,
    pub tracking_number: Option<String>,
    pub kind: IssueKind,
    pub message: String,
}

impl RecordIssue {
    /// Tracking number when known, otherwise the record position.
    pub fn label(&self) -> String {
        match &self.tracking_number {
            Some(number) => number.clone(),
            None => format!("record #{}", self.index),
        }
    }
}

/// Tally of issues by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IssueCounts {
    pub skipped: usize,
    pub malformed: usize,
}

impl IssueCounts {
    pub fn from_issues(issues: &[RecordIssue]) -> Self {
        issues.iter().fold(Self::default(), |mut counts, issue| {
            match issue.kind {
                IssueKind::Skipped => counts.skipped += 1,
                IssueKind::Malformed => counts.malformed += 1,
            }
            counts
        })
    }
}
