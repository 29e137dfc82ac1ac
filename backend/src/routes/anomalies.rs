use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{SensorField, SeriesPoint};

// =========================================================
// Anomaly detection types + route
// =========================================================

/// A reading flagged by at least one outlier rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub z_score: f64,
    pub is_iqr_anomaly: bool,
    pub is_z_score_anomaly: bool,
}

/// Summary of an anomaly scan.
///
/// All members are absent for an empty dataset, which serializes as `{}`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnomalyStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_points: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anomaly_count: Option<usize>,
}

impl AnomalyStats {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Outlier scan of one sensor field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnomalyReport {
    pub processed_data: Vec<SeriesPoint>,
    pub anomalies: Vec<AnomalyPoint>,
    pub stats: AnomalyStats,
}

/// Anomaly reports keyed by sensor field name.
pub type AnomaliesData = BTreeMap<SensorField, AnomalyReport>;

/// Route function name constant for anomaly detection
pub const GET_ANOMALIES: &str = "anomalies";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_serializes_empty_stats() {
        let json = serde_json::to_value(AnomalyReport::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"processed_data": [], "anomalies": [], "stats": {}})
        );
    }

    #[test]
    fn test_reports_keyed_by_field_name() {
        let mut data = AnomaliesData::new();
        data.insert(SensorField::AirQuality, AnomalyReport::default());
        let json = serde_json::to_value(&data).unwrap();
        assert!(json.get("air_quality").is_some());
    }
}
