//! Request and response DTOs that are specific to the HTTP surface.
//!
//! Engine payloads (`AggregateResult`, `ProcessedData`, `AnomaliesData`) are
//! re-exported from [`crate::api`].

use serde::{Deserialize, Serialize};

pub use crate::api::{AggregateResult, AnomaliesData, IngestResponse, ProcessedData};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

/// Query parameters for `GET /aggregated`.
///
/// Bounds are kept as raw strings so an unparseable value can be reported
/// as a 400 instead of an extractor rejection.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AggregatedQuery {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

/// Query parameters for `GET /anomalies`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AnomaliesQuery {
    /// One of `temperature`, `humidity`, `air_quality`; all fields when absent
    #[serde(default)]
    pub sensor: Option<String>,
}
