use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::readings;
use crate::models::Reading;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = readings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)] // ingested_at is bookkeeping only
pub struct ReadingRow {
    pub reading_id: i64,
    pub recorded_at: DateTime<Utc>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub air_quality: Option<f64>,
    pub ingested_at: DateTime<Utc>,
}

impl From<ReadingRow> for Reading {
    fn from(row: ReadingRow) -> Self {
        Reading::new(row.recorded_at, row.temperature, row.humidity, row.air_quality)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = readings)]
pub struct NewReadingRow {
    pub recorded_at: DateTime<Utc>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub air_quality: Option<f64>,
}

impl From<&Reading> for NewReadingRow {
    fn from(reading: &Reading) -> Self {
        Self {
            recorded_at: reading.timestamp,
            temperature: reading.temperature,
            humidity: reading.humidity,
            air_quality: reading.air_quality,
        }
    }
}
