//! HTTP handlers for the REST API.
//!
//! Each handler parses its request and delegates to the engines in
//! [`crate::services`].

use axum::{
    extract::{multipart::MultipartRejection, Multipart, Query, State},
    Json,
};
use chrono::{DateTime, Utc};

use super::dto::{
    AggregateResult, AggregatedQuery, AnomaliesData, AnomaliesQuery, HealthResponse,
    IngestResponse, ProcessedData,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;
use crate::models::{parse_timestamp, SensorField, TimeRange};
use crate::services::{self, IngestionError};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Multipart field carrying the uploaded CSV.
const UPLOAD_FIELD: &str = "file";

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Ingestion
// =============================================================================

/// POST /data
///
/// Accepts a multipart upload with a `file` part holding a CSV sensor log.
pub async fn ingest_data(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> HandlerResult<IngestResponse> {
    let mut multipart = multipart.map_err(|e| {
        log::debug!("Upload is not multipart: {}", e);
        IngestionError::MissingFile
    })?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;
        upload = Some((file_name, content));
        break;
    }

    let (file_name, content) = upload.ok_or(IngestionError::MissingFile)?;
    let records =
        services::ingest_csv(state.repository.as_ref(), &file_name, content.to_vec()).await?;

    Ok(Json(IngestResponse::new(records)))
}

// =============================================================================
// Engines
// =============================================================================

/// GET /aggregated?from=&to=
pub async fn get_aggregated(
    State(state): State<AppState>,
    Query(query): Query<AggregatedQuery>,
) -> HandlerResult<AggregateResult> {
    let range = TimeRange::new(
        parse_bound("from", query.from.as_deref())?,
        parse_bound("to", query.to.as_deref())?,
    );
    let result = services::get_aggregated_data(state.repository.as_ref(), range).await?;
    Ok(Json(result))
}

/// GET /processed
pub async fn get_processed(State(state): State<AppState>) -> HandlerResult<ProcessedData> {
    let result = services::get_processed_data(state.repository.as_ref()).await?;
    Ok(Json(result))
}

/// GET /anomalies?sensor=
pub async fn get_anomalies(
    State(state): State<AppState>,
    Query(query): Query<AnomaliesQuery>,
) -> HandlerResult<AnomaliesData> {
    let fields = match query.sensor.as_deref() {
        Some(sensor) => vec![sensor.parse::<SensorField>().map_err(AppError::BadRequest)?],
        None => SensorField::ALL.to_vec(),
    };
    let result = services::get_anomalies_data(state.repository.as_ref(), &fields).await?;
    Ok(Json(result))
}

// =============================================================================
// Fallbacks
// =============================================================================

pub async fn get_only() -> AppError {
    AppError::MethodNotAllowed("GET")
}

pub async fn post_only() -> AppError {
    AppError::MethodNotAllowed("POST")
}

pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

/// Empty or missing bounds leave that side of the range open.
fn parse_bound(name: &str, raw: Option<&str>) -> Result<Option<DateTime<Utc>>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => parse_timestamp(value).map(Some).ok_or_else(|| {
            AppError::BadRequest(format!("Invalid '{}' timestamp: {}", name, value))
        }),
    }
}
