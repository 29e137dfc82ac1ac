use chrono::{TimeZone, Utc};
use serde_json::json;

use super::*;

#[test]
fn test_aggregate_result_is_flat() {
    let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut result = AggregateResult::default();
    *result.field_mut(SensorField::Humidity) = FieldAggregate {
        avg: Some(50.0),
        min: Some(40.0),
        max: Some(60.0),
        median: Some(50.0),
        min_timestamp: Some(ts),
        max_timestamp: Some(ts),
        median_timestamp: Some(ts),
    };

    let json = serde_json::to_value(&result).unwrap();
    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 21);
    assert_eq!(json["humidity_avg"], 50.0);
    assert_eq!(json["humidity_min_timestamp"], "2024-01-01T00:00:00Z");
    assert!(json["temperature_avg"].is_null());
    assert!(json["air_quality_median_timestamp"].is_null());
}

#[test]
fn test_ingest_response_shape() {
    let json = serde_json::to_value(IngestResponse::new(3)).unwrap();
    assert_eq!(
        json,
        json!({"message": "Records processed successfully!", "records": 3})
    );
}

#[test]
fn test_anomaly_point_shape() {
    let point = AnomalyPoint {
        timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 6, 30, 0).unwrap(),
        value: 100.0,
        z_score: 2.99,
        is_iqr_anomaly: true,
        is_z_score_anomaly: false,
    };
    let json = serde_json::to_value(point).unwrap();
    assert_eq!(json["timestamp"], "2024-01-01T06:30:00Z");
    assert_eq!(json["is_iqr_anomaly"], true);
    assert_eq!(json["is_z_score_anomaly"], false);
}

#[test]
fn test_series_point_keeps_null_values() {
    let point = SeriesPoint {
        timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        value: None,
    };
    let json = serde_json::to_value(point).unwrap();
    assert!(json["value"].is_null());
}
