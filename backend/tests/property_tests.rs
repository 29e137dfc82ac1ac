//! Property tests for the numeric engines.

mod support;

use proptest::prelude::*;

use sensor_stats::algorithms::{mean, median, percentile, z_scores, IqrBounds};
use sensor_stats::models::SensorField;
use sensor_stats::services::{compute_field_aggregate, deduplicate, detect_anomalies};

use support::temperature_readings;

fn finite_values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e6f64..1.0e6, 1..200)
}

proptest! {
    #[test]
    fn median_lies_between_quartiles(values in finite_values()) {
        let bounds = IqrBounds::from_values(&values).unwrap();
        let m = median(&values).unwrap();
        prop_assert!(bounds.q1 <= m);
        prop_assert!(m <= bounds.q3);
    }

    #[test]
    fn percentiles_stay_within_range(values in finite_values(), q in 0.0f64..=100.0) {
        let p = percentile(&values, q).unwrap();
        let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(lo <= p && p <= hi);
    }

    #[test]
    fn constant_series_has_zero_z_scores(value in -1.0e6f64..1.0e6, len in 1usize..100) {
        let values = vec![value; len];
        prop_assert!(z_scores(&values).iter().all(|z| *z == 0.0));

        let report = detect_anomalies(&temperature_readings(&values), SensorField::Temperature);
        prop_assert!(report.anomalies.is_empty());
    }

    #[test]
    fn aggregate_is_ordered(values in finite_values()) {
        let agg = compute_field_aggregate(&temperature_readings(&values), SensorField::Temperature);
        let (min, max) = (agg.min.unwrap(), agg.max.unwrap());
        prop_assert!(min <= agg.median.unwrap() && agg.median.unwrap() <= max);

        let avg = agg.avg.unwrap();
        let tolerance = 1e-9 * max.abs().max(min.abs()).max(1.0);
        prop_assert!(min - tolerance <= avg && avg <= max + tolerance);
        prop_assert_eq!(Some(avg), mean(&values));
    }

    #[test]
    fn deduplicated_series_has_distinct_sorted_timestamps(
        minutes in prop::collection::vec(0i64..20, 0..60)
    ) {
        let readings: Vec<_> = minutes
            .iter()
            .map(|m| sensor_stats::models::Reading::new(support::ts(*m), Some(*m as f64), None, None))
            .collect();
        let series = deduplicate(&readings, SensorField::Temperature);

        prop_assert!(series.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        let mut distinct = minutes.clone();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(series.len(), distinct.len());
    }
}
