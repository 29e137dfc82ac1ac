//! CSV ingestion adapter.
//!
//! Turns an uploaded sensor log into [`Reading`]s. The expected columns are
//! `timestamp, temperature, humidity, air_quality`; the first row is a header
//! and is skipped. A batch is all-or-nothing: the first malformed row aborts
//! parsing and nothing reaches the store.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord};
use log::{info, warn};

use crate::db::repository::{ReadingRepository, RepositoryError};
use crate::db::services as db_services;
use crate::models::{parse_timestamp, Reading};

/// Number of leading columns every data row must provide.
const REQUIRED_COLUMNS: usize = 4;

/// Errors raised while ingesting an upload.
#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    /// No file part was present in the upload.
    #[error("Please upload file.")]
    MissingFile,

    /// The uploaded file is not a CSV file.
    #[error("Invalid file format. Please upload a CSV file.")]
    InvalidFileFormat { file_name: String },

    /// A data row could not be converted into a reading.
    #[error("Invalid data format in row {row}: [{record}], error: {reason}")]
    MalformedRow {
        /// 1-based line number in the uploaded file.
        row: u64,
        /// The raw row, comma-joined.
        record: String,
        reason: String,
    },

    /// The CSV stream itself could not be read (bad UTF-8, I/O failure).
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The store rejected the parsed batch.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Reject uploads whose file name does not end in `.csv`.
pub fn validate_file_name(file_name: &str) -> Result<(), IngestionError> {
    if file_name.ends_with(".csv") {
        Ok(())
    } else {
        Err(IngestionError::InvalidFileFormat {
            file_name: file_name.to_string(),
        })
    }
}

/// Parse CSV content into readings.
///
/// Duplicate timestamps are kept as-is; deduplication happens at read time.
pub fn parse_readings<R: Read>(input: R) -> Result<Vec<Reading>, IngestionError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let mut readings = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = record.position().map(|p| p.line()).unwrap_or_default();
        let reading = parse_record(&record).map_err(|reason| IngestionError::MalformedRow {
            row,
            record: record.iter().collect::<Vec<_>>().join(","),
            reason,
        })?;
        readings.push(reading);
    }

    Ok(readings)
}

fn parse_record(record: &StringRecord) -> Result<Reading, String> {
    if record.len() < REQUIRED_COLUMNS {
        return Err(format!(
            "expected {} columns, found {}",
            REQUIRED_COLUMNS,
            record.len()
        ));
    }

    let raw_timestamp = &record[0];
    let timestamp = parse_timestamp(raw_timestamp)
        .ok_or_else(|| format!("invalid timestamp '{}'", raw_timestamp))?;

    Ok(Reading {
        timestamp,
        temperature: parse_measurement(&record[1], "temperature")?,
        humidity: parse_measurement(&record[2], "humidity")?,
        air_quality: parse_measurement(&record[3], "air_quality")?,
    })
}

/// Empty cells are missing measurements; anything else must be a finite
/// number, optionally padded with whitespace.
fn parse_measurement(raw: &str, column: &str) -> Result<Option<f64>, String> {
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        Ok(_) => Err(format!("{} value '{}' is not finite", column, raw)),
        Err(_) => Err(format!("could not convert {} value '{}' to float", column, raw)),
    }
}

/// Parse an uploaded CSV and append its readings to the store.
///
/// Returns the number of readings stored.
pub async fn ingest_csv(
    repo: &dyn ReadingRepository,
    file_name: &str,
    content: Vec<u8>,
) -> Result<usize, IngestionError> {
    validate_file_name(file_name)?;

    let readings = tokio::task::spawn_blocking(move || parse_readings(content.as_slice()))
        .await
        .map_err(|e| RepositoryError::internal(format!("Task join error: {}", e)))?
        .inspect_err(|e| warn!("Rejected upload '{}': {}", file_name, e))?;

    let count = db_services::store_readings(repo, &readings).await?;
    info!("Ingested {} readings from '{}'", count, file_name);
    Ok(count)
}
