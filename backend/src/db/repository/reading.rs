//! Reading store trait.

use async_trait::async_trait;

use super::error::{ErrorContext, RepositoryError, RepositoryResult};
use crate::models::{Reading, SensorField, TimeRange};

/// Repository trait for sensor readings.
///
/// Readings are append-only: there is no update or delete path, and repeated
/// timestamps are stored as separate rows.
///
/// Query results are ordered by timestamp ascending; readings sharing a
/// timestamp come back in insertion order.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ReadingRepository: Send + Sync {
    /// Check if the store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Append a batch of readings atomically.
    ///
    /// # Errors
    /// * `RepositoryError::ValidationError` if any reading is invalid; nothing
    ///   from the batch is stored in that case.
    async fn insert_many(&self, readings: &[Reading]) -> RepositoryResult<usize>;

    /// Readings whose timestamp lies within `range` (inclusive), nulls included.
    async fn query(&self, range: TimeRange) -> RepositoryResult<Vec<Reading>>;

    /// All readings where `field` is not null.
    async fn query_non_null(&self, field: SensorField) -> RepositoryResult<Vec<Reading>>;

    /// Total number of stored readings.
    async fn count(&self) -> RepositoryResult<usize>;
}

/// Validate a batch before it is written.
///
/// Measurements must be finite; NaN or infinite values would poison every
/// ordering-based statistic downstream.
pub fn validate_readings(readings: &[Reading]) -> RepositoryResult<()> {
    for (index, reading) in readings.iter().enumerate() {
        for field in SensorField::ALL {
            if let Some(value) = reading.value(field) {
                if !value.is_finite() {
                    return Err(RepositoryError::validation_with_context(
                        format!("{} value {} is not finite", field, value),
                        ErrorContext::new("insert_many")
                            .with_entity("reading")
                            .with_index(index)
                            .with_details(format!("timestamp={}", reading.timestamp.to_rfc3339())),
                    ));
                }
            }
        }
    }
    Ok(())
}
