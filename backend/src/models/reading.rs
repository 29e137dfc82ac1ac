//! Sensor reading records and the sensor field selector.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One row of an environmental sensor log.
///
/// Every measurement is independently optional: a sensor that did not report
/// in a sampling period leaves its column empty rather than zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub timestamp: DateTime<Utc>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub air_quality: Option<f64>,
}

impl Reading {
    pub fn new(
        timestamp: DateTime<Utc>,
        temperature: Option<f64>,
        humidity: Option<f64>,
        air_quality: Option<f64>,
    ) -> Self {
        Self {
            timestamp,
            temperature,
            humidity,
            air_quality,
        }
    }

    /// Value of `field` on this reading.
    pub fn value(&self, field: SensorField) -> Option<f64> {
        (field.accessor())(self)
    }

    /// Number of non-null attributes among `field` and the timestamp.
    ///
    /// The timestamp always counts, so this is 2 when `field` is present and 1
    /// otherwise.
    pub fn completeness(&self, field: SensorField) -> usize {
        1 + usize::from(self.value(field).is_some())
    }
}

/// Accessor extracting one measurement column from a reading.
pub type FieldAccessor = fn(&Reading) -> Option<f64>;

/// The measurement column an engine operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorField {
    Temperature,
    Humidity,
    AirQuality,
}

impl SensorField {
    /// All sensor fields, in response order.
    pub const ALL: [SensorField; 3] = [
        SensorField::Temperature,
        SensorField::Humidity,
        SensorField::AirQuality,
    ];

    /// Column name used in CSV uploads and JSON payload keys.
    pub const fn as_str(self) -> &'static str {
        match self {
            SensorField::Temperature => "temperature",
            SensorField::Humidity => "humidity",
            SensorField::AirQuality => "air_quality",
        }
    }

    /// Pure accessor for this field.
    pub fn accessor(self) -> FieldAccessor {
        match self {
            SensorField::Temperature => |r: &Reading| r.temperature,
            SensorField::Humidity => |r: &Reading| r.humidity,
            SensorField::AirQuality => |r: &Reading| r.air_quality,
        }
    }
}

impl fmt::Display for SensorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensorField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "temperature" => Ok(Self::Temperature),
            "humidity" => Ok(Self::Humidity),
            "air_quality" => Ok(Self::AirQuality),
            _ => Err(format!("Unknown sensor field: {}", s)),
        }
    }
}

/// A single `{timestamp, value}` point of a per-sensor series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub value: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Reading {
        Reading::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Some(21.5),
            None,
            Some(40.0),
        )
    }

    #[test]
    fn test_accessor_table() {
        let reading = sample();
        assert_eq!(reading.value(SensorField::Temperature), Some(21.5));
        assert_eq!(reading.value(SensorField::Humidity), None);
        assert_eq!(reading.value(SensorField::AirQuality), Some(40.0));
    }

    #[test]
    fn test_completeness() {
        let reading = sample();
        assert_eq!(reading.completeness(SensorField::Temperature), 2);
        assert_eq!(reading.completeness(SensorField::Humidity), 1);
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in SensorField::ALL {
            assert_eq!(field.as_str().parse::<SensorField>().unwrap(), field);
            assert_eq!(
                serde_json::to_value(field).unwrap(),
                serde_json::Value::String(field.as_str().to_string())
            );
        }
        assert!("pressure".parse::<SensorField>().is_err());
    }
}
