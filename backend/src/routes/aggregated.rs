use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

use crate::models::SensorField;

// =========================================================
// Aggregated statistics types + route
// =========================================================

/// Mean/min/max/median of one sensor field, with provenance timestamps.
///
/// Every member is `None` when the field has no non-null values in range.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, Deserialize)]
pub struct FieldAggregate {
    pub avg: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub median: Option<f64>,
    pub min_timestamp: Option<DateTime<Utc>>,
    pub max_timestamp: Option<DateTime<Utc>>,
    pub median_timestamp: Option<DateTime<Utc>>,
}

/// Aggregates for every sensor field.
///
/// Serializes as a flat object keyed `<field>_<statistic>`, e.g.
/// `temperature_avg` or `air_quality_median_timestamp`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AggregateResult {
    pub temperature: FieldAggregate,
    pub humidity: FieldAggregate,
    pub air_quality: FieldAggregate,
}

impl AggregateResult {
    pub fn field(&self, field: SensorField) -> &FieldAggregate {
        match field {
            SensorField::Temperature => &self.temperature,
            SensorField::Humidity => &self.humidity,
            SensorField::AirQuality => &self.air_quality,
        }
    }

    pub fn field_mut(&mut self, field: SensorField) -> &mut FieldAggregate {
        match field {
            SensorField::Temperature => &mut self.temperature,
            SensorField::Humidity => &mut self.humidity,
            SensorField::AirQuality => &mut self.air_quality,
        }
    }
}

impl Serialize for AggregateResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(SensorField::ALL.len() * 7))?;
        for field in SensorField::ALL {
            let name = field.as_str();
            let agg = self.field(field);
            map.serialize_entry(&format!("{name}_avg"), &agg.avg)?;
            map.serialize_entry(&format!("{name}_min"), &agg.min)?;
            map.serialize_entry(&format!("{name}_max"), &agg.max)?;
            map.serialize_entry(&format!("{name}_min_timestamp"), &agg.min_timestamp)?;
            map.serialize_entry(&format!("{name}_max_timestamp"), &agg.max_timestamp)?;
            map.serialize_entry(&format!("{name}_median"), &agg.median)?;
            map.serialize_entry(&format!("{name}_median_timestamp"), &agg.median_timestamp)?;
        }
        map.end()
    }
}

/// Route function name constant for aggregated statistics
pub const GET_AGGREGATED: &str = "aggregated";
