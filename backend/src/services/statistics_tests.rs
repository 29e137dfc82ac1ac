use chrono::{DateTime, TimeZone, Utc};

use super::*;

fn ts(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, minute, 0).unwrap()
}

fn temperature_reading(minute: u32, value: Option<f64>) -> Reading {
    Reading::new(ts(minute), value, None, None)
}

#[test]
fn test_three_point_aggregate() {
    let readings = vec![
        temperature_reading(1, Some(10.0)),
        temperature_reading(2, Some(20.0)),
        temperature_reading(3, Some(30.0)),
    ];
    let agg = compute_field_aggregate(&readings, SensorField::Temperature);

    assert_eq!(agg.avg, Some(20.0));
    assert_eq!(agg.min, Some(10.0));
    assert_eq!(agg.min_timestamp, Some(ts(1)));
    assert_eq!(agg.max, Some(30.0));
    assert_eq!(agg.max_timestamp, Some(ts(3)));
    assert_eq!(agg.median, Some(20.0));
    assert_eq!(agg.median_timestamp, Some(ts(2)));
}

#[test]
fn test_nulls_are_excluded_not_zeroed() {
    let readings = vec![
        temperature_reading(1, None),
        temperature_reading(2, Some(4.0)),
        temperature_reading(3, None),
        temperature_reading(4, Some(8.0)),
    ];
    let agg = compute_field_aggregate(&readings, SensorField::Temperature);

    assert_eq!(agg.avg, Some(6.0));
    assert_eq!(agg.min, Some(4.0));
    assert_eq!(agg.min_timestamp, Some(ts(2)));
}

#[test]
fn test_even_median_resolves_to_first_reading_at_or_above() {
    // Median of {10, 20, 30, 40} is 25; the earliest reading >= 25 is at minute 2.
    let readings = vec![
        temperature_reading(1, Some(10.0)),
        temperature_reading(2, Some(40.0)),
        temperature_reading(3, Some(30.0)),
        temperature_reading(4, Some(20.0)),
    ];
    let agg = compute_field_aggregate(&readings, SensorField::Temperature);

    assert_eq!(agg.median, Some(25.0));
    assert_eq!(agg.median_timestamp, Some(ts(2)));
}

#[test]
fn test_tied_extremes_resolve_to_earliest_timestamp() {
    let readings = vec![
        temperature_reading(5, Some(30.0)),
        temperature_reading(2, Some(30.0)),
        temperature_reading(3, Some(10.0)),
        temperature_reading(4, Some(10.0)),
    ];
    let agg = compute_field_aggregate(&readings, SensorField::Temperature);

    assert_eq!(agg.max_timestamp, Some(ts(2)));
    assert_eq!(agg.min_timestamp, Some(ts(3)));
}

#[test]
fn test_min_timestamp_points_at_the_minimum_itself() {
    let readings = vec![
        temperature_reading(1, Some(30.0)),
        temperature_reading(2, Some(10.0)),
    ];
    let agg = compute_field_aggregate(&readings, SensorField::Temperature);
    assert_eq!(agg.min_timestamp, Some(ts(2)));
}

#[test]
fn test_field_without_values_is_all_null() {
    let readings = vec![temperature_reading(1, Some(10.0))];
    let agg = compute_field_aggregate(&readings, SensorField::Humidity);
    assert_eq!(agg, FieldAggregate::default());

    let empty = compute_aggregates(&[]);
    assert_eq!(empty, AggregateResult::default());
}

#[test]
fn test_compute_aggregates_covers_every_field() {
    let readings = vec![
        Reading::new(ts(1), Some(20.0), Some(40.0), Some(5.0)),
        Reading::new(ts(2), Some(22.0), None, Some(7.0)),
    ];
    let result = compute_aggregates(&readings);

    assert_eq!(result.temperature.avg, Some(21.0));
    assert_eq!(result.humidity.avg, Some(40.0));
    assert_eq!(result.humidity.median_timestamp, Some(ts(1)));
    assert_eq!(result.air_quality.max, Some(7.0));
}
