//! In-memory local repository implementation.
//!
//! Readings live in a B-tree keyed by `(timestamp, sequence)`, which gives a
//! time index for range scans while keeping duplicate timestamps apart in
//! insertion order. Suitable for unit tests and local development.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

use crate::db::repository::*;
use crate::models::{Reading, SensorField, TimeRange};

type ReadingKey = (DateTime<Utc>, u64);

/// In-memory local repository.
///
/// # Example
/// ```
/// use sensor_stats::db::repositories::LocalRepository;
/// use sensor_stats::db::repository::ReadingRepository;
/// use sensor_stats::models::{Reading, TimeRange};
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// rt.block_on(async {
///     let repo = LocalRepository::new();
///     repo.insert_many(&[Reading::new(chrono::Utc::now(), Some(21.0), None, None)])
///         .await
///         .unwrap();
///     assert_eq!(repo.query(TimeRange::all()).await.unwrap().len(), 1);
/// });
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    readings: BTreeMap<ReadingKey, Reading>,
    next_sequence: u64,
    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            readings: BTreeMap::new(),
            next_sequence: 0,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write();
        data.readings.clear();
        data.next_sequence = 0;
    }

    /// Number of stored readings.
    pub fn len(&self) -> usize {
        self.data.read().readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_health(&self, operation: &str) -> RepositoryResult<()> {
        if self.data.read().is_healthy {
            Ok(())
        } else {
            Err(RepositoryError::connection_with_context(
                "Database is not healthy",
                ErrorContext::new(operation),
            ))
        }
    }

    fn scan<F>(&self, range: TimeRange, mut keep: F) -> Vec<Reading>
    where
        F: FnMut(&Reading) -> bool,
    {
        if range.is_empty() {
            return Vec::new();
        }

        let lower = match range.from {
            Some(from) => Bound::Included((from, u64::MIN)),
            None => Bound::Unbounded,
        };
        let upper = match range.to {
            Some(to) => Bound::Included((to, u64::MAX)),
            None => Bound::Unbounded,
        };

        self.data
            .read()
            .readings
            .range((lower, upper))
            .map(|(_, reading)| reading)
            .filter(|reading| keep(reading))
            .cloned()
            .collect()
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadingRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn insert_many(&self, readings: &[Reading]) -> RepositoryResult<usize> {
        self.check_health("insert_many")?;
        validate_readings(readings)?;

        let mut data = self.data.write();
        for reading in readings {
            let key = (reading.timestamp, data.next_sequence);
            data.next_sequence += 1;
            data.readings.insert(key, reading.clone());
        }
        Ok(readings.len())
    }

    async fn query(&self, range: TimeRange) -> RepositoryResult<Vec<Reading>> {
        self.check_health("query")?;
        Ok(self.scan(range, |_| true))
    }

    async fn query_non_null(&self, field: SensorField) -> RepositoryResult<Vec<Reading>> {
        self.check_health("query_non_null")?;
        Ok(self.scan(TimeRange::all(), |r| r.value(field).is_some()))
    }

    async fn count(&self) -> RepositoryResult<usize> {
        self.check_health("count")?;
        Ok(self.len())
    }
}
