//! Public API surface.
//!
//! Consolidates the payload types returned by the HTTP endpoints. All types
//! derive (or implement) `Serialize` so handlers can return them as JSON.

pub use crate::models::{Reading, SensorField, SeriesPoint, TimeRange};
pub use crate::routes::aggregated::AggregateResult;
pub use crate::routes::aggregated::FieldAggregate;
pub use crate::routes::anomalies::AnomaliesData;
pub use crate::routes::anomalies::AnomalyPoint;
pub use crate::routes::anomalies::AnomalyReport;
pub use crate::routes::anomalies::AnomalyStats;
pub use crate::routes::ingest::IngestResponse;
pub use crate::routes::processed::ProcessedData;

#[cfg(test)]
#[path = "api_tests.rs"]
mod api_tests;
