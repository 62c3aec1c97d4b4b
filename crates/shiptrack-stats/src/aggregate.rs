use std::collections::BTreeMap;

use tracing::debug;

use shiptrack_model::{FlatShipmentRecord, Metric, SummaryRow};

use crate::error::{StatsError, SummaryError};

/// Mean, median and mode of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub median: f64,
    pub mode: i64,
}

/// Population arithmetic mean.
pub fn mean(values: &[i64]) -> Result<f64, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    let total: i128 = values.iter().map(|v| i128::from(*v)).sum();
    Ok(total as f64 / values.len() as f64)
}

/// Median; the average of the two middle values for even-length input.
pub fn median(values: &[i64]) -> Result<f64, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Ok(sorted[mid] as f64)
    } else {
        Ok((sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0)
    }
}

/// The single most frequent value.
///
/// Fails with [`StatsError::AmbiguousMode`] when two or more values share the
/// highest frequency.
pub fn mode(values: &[i64]) -> Result<i64, StatsError> {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(*value).or_insert(0) += 1;
    }
    let Some(highest) = counts.values().copied().max() else {
        return Err(StatsError::EmptyInput);
    };
    let leaders: Vec<i64> = counts
        .iter()
        .filter(|(_, count)| **count == highest)
        .map(|(value, _)| *value)
        .collect();
    match leaders.as_slice() {
        [single] => Ok(*single),
        _ => Err(StatsError::AmbiguousMode {
            values: leaders,
            count: highest,
        }),
    }
}

pub fn summarize(values: &[i64]) -> Result<Summary, StatsError> {
    Ok(Summary {
        mean: mean(values)?,
        median: median(values)?,
        mode: mode(values)?,
    })
}

/// Summary rows for `days_taken` and `delivery_attempts`, in that order.
pub fn summarize_shipments(
    shipments: &[FlatShipmentRecord],
) -> Result<Vec<SummaryRow>, SummaryError> {
    if shipments.is_empty() {
        return Err(SummaryError::NoShipments);
    }
    Metric::ALL
        .iter()
        .map(|metric| {
            let column = metric_column(shipments, *metric);
            let summary = summarize(&column).map_err(|source| SummaryError::Metric {
                metric: *metric,
                source,
            })?;
            debug!(
                metric = %metric,
                mean = summary.mean,
                median = summary.median,
                mode = summary.mode,
                "metric summarized"
            );
            Ok(SummaryRow {
                metric: *metric,
                mean: summary.mean,
                median: summary.median,
                mode: summary.mode,
            })
        })
        .collect()
}

fn metric_column(shipments: &[FlatShipmentRecord], metric: Metric) -> Vec<i64> {
    shipments
        .iter()
        .map(|shipment| match metric {
            Metric::DaysTaken => shipment.days_taken,
            Metric::DeliveryAttempts => shipment.delivery_attempts,
        })
        .collect()
}
