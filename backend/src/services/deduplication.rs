//! Timestamp deduplication of IQR-filtered sensor series.
//!
//! Uploads may repeat timestamps; the processed view keeps a single record per
//! timestamp. Among records sharing a timestamp the most complete one wins,
//! where completeness counts the non-null attributes among the target field
//! and the timestamp. Equally complete records resolve to the first one in
//! (timestamp, storage) order.

use log::debug;

use crate::algorithms::IqrBounds;
use crate::api::ProcessedData;
use crate::db::repository::{ReadingRepository, RepositoryError, RepositoryResult};
use crate::db::services as db_services;
use crate::models::{Reading, SensorField, SeriesPoint};

/// Collapse readings sharing a timestamp into one point per timestamp.
///
/// The output is ordered by timestamp ascending.
pub fn deduplicate(readings: &[Reading], field: SensorField) -> Vec<SeriesPoint> {
    let mut ordered: Vec<&Reading> = readings.iter().collect();
    // Stable: equal timestamps keep their relative input order.
    ordered.sort_by_key(|r| r.timestamp);

    let mut series: Vec<SeriesPoint> = Vec::new();
    let mut best: Option<&Reading> = None;

    for reading in ordered {
        match best {
            Some(current) if current.timestamp == reading.timestamp => {
                if reading.completeness(field) > current.completeness(field) {
                    best = Some(reading);
                }
            }
            _ => {
                if let Some(done) = best.replace(reading) {
                    series.push(point(done, field));
                }
            }
        }
    }
    if let Some(done) = best {
        series.push(point(done, field));
    }

    series
}

fn point(reading: &Reading, field: SensorField) -> SeriesPoint {
    SeriesPoint {
        timestamp: reading.timestamp,
        value: reading.value(field),
    }
}

/// Keep readings inside the IQR fences of `field`, then deduplicate them.
///
/// The fences are computed over every non-null value in `readings`; records
/// with a null `field` never fall inside them.
pub fn iqr_filtered_series(readings: &[Reading], field: SensorField) -> Vec<SeriesPoint> {
    let values: Vec<f64> = readings.iter().filter_map(|r| r.value(field)).collect();
    let Some(bounds) = IqrBounds::from_values(&values) else {
        return Vec::new();
    };

    let kept: Vec<Reading> = readings
        .iter()
        .filter(|r| r.value(field).is_some_and(|v| bounds.contains(v)))
        .cloned()
        .collect();

    deduplicate(&kept, field)
}

/// Build the processed view: the clean series of every sensor field.
pub async fn get_processed_data(repo: &dyn ReadingRepository) -> RepositoryResult<ProcessedData> {
    let mut data = ProcessedData {
        total_logs: db_services::count_readings(repo).await?,
        ..Default::default()
    };

    for field in SensorField::ALL {
        let readings = db_services::fetch_non_null(repo, field).await?;
        let fetched = readings.len();
        let series = tokio::task::spawn_blocking(move || iqr_filtered_series(&readings, field))
            .await
            .map_err(|e| RepositoryError::internal(format!("Task join error: {}", e)))?;
        debug!("Processed {}: {} readings -> {} points", field, fetched, series.len());
        *data.series_mut(field) = series;
    }

    Ok(data)
}
