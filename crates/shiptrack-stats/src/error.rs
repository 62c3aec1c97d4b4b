//! Error types for summary statistics.

use thiserror::Error;

use shiptrack_model::Metric;

/// Errors from a single column computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("no values to summarize")]
    EmptyInput,

    #[error("no unique mode: values {values:?} each occur {count} times")]
    AmbiguousMode { values: Vec<i64>, count: usize },
}

/// Errors from summarizing the flat table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummaryError {
    #[error("no shipments survived normalization; nothing to summarize")]
    NoShipments,

    #[error("cannot summarize {metric}: {source}")]
    Metric {
        metric: Metric,
        #[source]
        source: StatsError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_errors_name_the_column() {
        let err = SummaryError::Metric {
            metric: Metric::DeliveryAttempts,
            source: StatsError::AmbiguousMode {
                values: vec![1, 2],
                count: 3,
            },
        };
        assert_eq!(
            err.to_string(),
            "cannot summarize delivery_attempts: no unique mode: values [1, 2] each occur 3 times"
        );
    }
}
