//! # Sensor Stats
//!
//! Statistics pipeline for time-stamped environmental sensor readings
//! (temperature, humidity, air quality).
//!
//! CSV uploads are parsed into [`models::Reading`]s and appended to a reading
//! store. Three engines run over the stored data:
//!
//! - **Statistics**: mean, min, max and median per field over a time window,
//!   each extreme tagged with the timestamp it came from
//! - **Outliers**: IQR fences and z-scores per field
//! - **Deduplication**: one value per timestamp, IQR-filtered, for charting
//!
//! ## Architecture
//!
//! - [`models`]: readings, sensor fields, timestamp parsing
//! - [`algorithms`]: numeric primitives (percentiles, pairwise sums, z-scores)
//! - [`services`]: the engines and the CSV ingestion adapter
//! - [`db`]: reading store trait, in-memory and Postgres implementations
//! - [`routes`]: response payload types per endpoint
//! - [`api`]: consolidated payload re-exports
//! - [`http`]: Axum router and handlers (feature `http-server`)

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod algorithms;
pub mod api;

pub mod db;
pub mod models;

pub mod routes;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
