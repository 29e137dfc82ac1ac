//! Aggregate statistics with provenance timestamps.
//!
//! For each sensor field the engine reports mean, minimum, maximum and median
//! of the non-null values, and pairs the extremes and the median with the
//! timestamp of a representative reading:
//!
//! - `min_timestamp` / `max_timestamp`: earliest reading whose value equals
//!   the extreme.
//! - `median_timestamp`: earliest reading whose value is `>=` the median. The
//!   median of an even-sized sample need not be a stored value, so this is the
//!   first reading at or above it rather than an exact match.

use chrono::{DateTime, Utc};
use log::debug;

use crate::algorithms::{mean, median};
use crate::api::{AggregateResult, FieldAggregate};
use crate::db::repository::{ReadingRepository, RepositoryError, RepositoryResult};
use crate::db::services as db_services;
use crate::models::{Reading, SensorField, TimeRange};

/// Compute the aggregate of one field over `readings`.
pub fn compute_field_aggregate(readings: &[Reading], field: SensorField) -> FieldAggregate {
    let values: Vec<f64> = readings.iter().filter_map(|r| r.value(field)).collect();
    if values.is_empty() {
        return FieldAggregate::default();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let median = median(&values);

    FieldAggregate {
        avg: mean(&values),
        min: Some(min),
        max: Some(max),
        median,
        min_timestamp: earliest_timestamp(readings, field, |v| v == min),
        max_timestamp: earliest_timestamp(readings, field, |v| v == max),
        median_timestamp: median.and_then(|m| earliest_timestamp(readings, field, |v| v >= m)),
    }
}

/// Compute aggregates for every sensor field.
pub fn compute_aggregates(readings: &[Reading]) -> AggregateResult {
    let mut result = AggregateResult::default();
    for field in SensorField::ALL {
        *result.field_mut(field) = compute_field_aggregate(readings, field);
    }
    result
}

/// Timestamp of the earliest reading whose `field` value satisfies `predicate`.
fn earliest_timestamp<P>(readings: &[Reading], field: SensorField, predicate: P) -> Option<DateTime<Utc>>
where
    P: Fn(f64) -> bool,
{
    readings
        .iter()
        .filter(|r| r.value(field).is_some_and(&predicate))
        .map(|r| r.timestamp)
        .min()
}

/// Fetch readings in `range` and compute their aggregates.
pub async fn get_aggregated_data(
    repo: &dyn ReadingRepository,
    range: TimeRange,
) -> RepositoryResult<AggregateResult> {
    let readings = db_services::fetch_readings(repo, range).await?;
    debug!("Aggregating {} readings in {}", readings.len(), range);

    tokio::task::spawn_blocking(move || compute_aggregates(&readings))
        .await
        .map_err(|e| RepositoryError::internal(format!("Task join error: {}", e)))
}

#[cfg(test)]
#[path = "statistics_tests.rs"]
mod statistics_tests;
