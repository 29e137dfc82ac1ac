//! Repository-agnostic operations used by the engines and HTTP handlers.
//!
//! Every function takes `&dyn ReadingRepository`, so the same call works
//! against the local store in tests and Postgres in production.

use log::{debug, info};

use super::repository::{ReadingRepository, RepositoryResult};
use crate::models::{Reading, SensorField, TimeRange};

/// Check that the underlying store is reachable.
pub async fn health_check(repo: &dyn ReadingRepository) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// Append a parsed batch; returns the number of readings stored.
pub async fn store_readings(
    repo: &dyn ReadingRepository,
    readings: &[Reading],
) -> RepositoryResult<usize> {
    let stored = repo.insert_many(readings).await?;
    info!("Stored {} readings", stored);
    Ok(stored)
}

/// Readings within `range`, ordered by timestamp then insertion.
pub async fn fetch_readings(
    repo: &dyn ReadingRepository,
    range: TimeRange,
) -> RepositoryResult<Vec<Reading>> {
    if range.is_empty() {
        debug!("Empty time range {}; skipping store query", range);
        return Ok(Vec::new());
    }
    let readings = repo.query(range).await?;
    debug!("Fetched {} readings for range {}", readings.len(), range);
    Ok(readings)
}

/// Readings with a value for `field`, ordered by timestamp then insertion.
pub async fn fetch_non_null(
    repo: &dyn ReadingRepository,
    field: SensorField,
) -> RepositoryResult<Vec<Reading>> {
    let readings = repo.query_non_null(field).await?;
    debug!("Fetched {} non-null {} readings", readings.len(), field);
    Ok(readings)
}

pub async fn count_readings(repo: &dyn ReadingRepository) -> RepositoryResult<usize> {
    repo.count().await
}
