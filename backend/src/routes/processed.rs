use serde::{Deserialize, Serialize};

use crate::models::{SensorField, SeriesPoint};

// =========================================================
// Processed (outlier-filtered, deduplicated) series + route
// =========================================================

/// Clean per-sensor series for charting.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProcessedData {
    /// Number of stored readings before any filtering.
    #[serde(rename = "totalLogs")]
    pub total_logs: usize,
    pub temperature: Vec<SeriesPoint>,
    pub humidity: Vec<SeriesPoint>,
    pub air_quality: Vec<SeriesPoint>,
}

impl ProcessedData {
    pub fn series_mut(&mut self, field: SensorField) -> &mut Vec<SeriesPoint> {
        match field {
            SensorField::Temperature => &mut self.temperature,
            SensorField::Humidity => &mut self.humidity,
            SensorField::AirQuality => &mut self.air_quality,
        }
    }
}

/// Route function name constant for processed series
pub const GET_PROCESSED: &str = "processed";
