//! Service layer for sensor analytics.
//!
//! This module sits between the HTTP handlers and the repository. Each engine
//! exposes a pure computation over an in-memory slice of readings plus an
//! async entry point that fetches its input from a [`ReadingRepository`] and
//! runs the computation on the blocking pool.
//!
//! [`ReadingRepository`]: crate::db::repository::ReadingRepository

pub mod deduplication;

pub mod ingestion;

pub mod outliers;

pub mod statistics;

pub use deduplication::{deduplicate, get_processed_data, iqr_filtered_series};
pub use ingestion::{ingest_csv, parse_readings, IngestionError};
pub use outliers::{detect_anomalies, get_anomalies_data};
pub use statistics::{compute_aggregates, compute_field_aggregate, get_aggregated_data};
