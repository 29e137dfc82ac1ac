//! Outlier detection combining Tukey fences and z-scores.

use log::debug;

use crate::algorithms::{is_z_score_outlier, z_scores, IqrBounds};
use crate::api::{AnomaliesData, AnomalyPoint, AnomalyReport, AnomalyStats};
use crate::db::repository::{ReadingRepository, RepositoryError, RepositoryResult};
use crate::db::services as db_services;
use crate::models::{Reading, SensorField, SeriesPoint};

/// Scan one sensor field for anomalies.
///
/// Readings whose `field` is null are ignored. A value is anomalous when it
/// falls outside the IQR fences or its absolute z-score exceeds 3; both
/// verdicts are reported individually. The output keeps the input order.
pub fn detect_anomalies(readings: &[Reading], field: SensorField) -> AnomalyReport {
    let points: Vec<(&Reading, f64)> = readings
        .iter()
        .filter_map(|r| r.value(field).map(|v| (r, v)))
        .collect();
    let values: Vec<f64> = points.iter().map(|(_, v)| *v).collect();

    let Some(bounds) = IqrBounds::from_values(&values) else {
        return AnomalyReport::default();
    };
    let scores = z_scores(&values);

    let mut processed_data = Vec::with_capacity(points.len());
    let mut anomalies = Vec::new();

    for ((reading, value), z_score) in points.iter().zip(scores) {
        processed_data.push(SeriesPoint {
            timestamp: reading.timestamp,
            value: Some(*value),
        });

        let is_iqr_anomaly = bounds.is_outlier(*value);
        let is_z_score_anomaly = is_z_score_outlier(z_score);
        if is_iqr_anomaly || is_z_score_anomaly {
            anomalies.push(AnomalyPoint {
                timestamp: reading.timestamp,
                value: *value,
                z_score,
                is_iqr_anomaly,
                is_z_score_anomaly,
            });
        }
    }

    let stats = AnomalyStats {
        lower_bound: Some(bounds.lower_bound),
        upper_bound: Some(bounds.upper_bound),
        total_points: Some(processed_data.len()),
        anomaly_count: Some(anomalies.len()),
    };

    AnomalyReport {
        processed_data,
        anomalies,
        stats,
    }
}

/// Fetch every non-null reading of each requested field and scan it.
pub async fn get_anomalies_data(
    repo: &dyn ReadingRepository,
    fields: &[SensorField],
) -> RepositoryResult<AnomaliesData> {
    let mut data = AnomaliesData::new();
    for &field in fields {
        let readings = db_services::fetch_non_null(repo, field).await?;
        let report = tokio::task::spawn_blocking(move || detect_anomalies(&readings, field))
            .await
            .map_err(|e| RepositoryError::internal(format!("Task join error: {}", e)))?;
        debug!(
            "Anomaly scan for {}: {} of {} points flagged",
            field,
            report.anomalies.len(),
            report.processed_data.len()
        );
        data.insert(field, report);
    }
    Ok(data)
}
