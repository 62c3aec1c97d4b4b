use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric flat-table columns that get summary statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    DaysTaken,
    DeliveryAttempts,
}

impl Metric {
    /// Metrics in summary-table order.
    pub const ALL: [Metric; 2] = [Metric::DaysTaken, Metric::DeliveryAttempts];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DaysTaken => "days_taken",
            Self::DeliveryAttempts => "delivery_attempts",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mean, median and mode of one metric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub metric: Metric,
    pub mean: f64,
    pub median: f64,
    pub mode: i64,
}
