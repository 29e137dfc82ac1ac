#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};
use sensor_stats::models::Reading;

static ENV_LOCK: Mutex<()> = Mutex::new(());

pub const CSV_HEADER: &str = "timestamp,temperature,humidity,air_quality\n";

/// Four rows; the last two share a timestamp and the gaps are spread across fields.
pub const SAMPLE_CSV: &str = "timestamp,temperature,humidity,air_quality\n\
2024-01-01T00:00:00Z,20.0,40.0,10.0\n\
2024-01-01T01:00:00Z,22.0,,12.0\n\
2024-01-01T02:00:00Z,24.0,50.0,\n\
2024-01-01T02:00:00Z,,55.0,14.0\n";

pub const MULTIPART_BOUNDARY: &str = "sensor-stats-test-boundary";

/// Minute offsets from 2024-01-01T00:00:00Z.
pub fn ts(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes)
}

/// One temperature-only reading per value, a minute apart.
pub fn temperature_readings(values: &[f64]) -> Vec<Reading> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| Reading::new(ts(i as i64), Some(*v), None, None))
        .collect()
}

/// Build a `multipart/form-data` body with a single file part.
pub fn multipart_body(field_name: &str, file_name: &str, content: &str) -> Vec<u8> {
    format!(
        "--{b}\r\n\
Content-Disposition: form-data; name=\"{field_name}\"; filename=\"{file_name}\"\r\n\
Content-Type: text/csv\r\n\r\n\
{content}\r\n\
--{b}--\r\n",
        b = MULTIPART_BOUNDARY
    )
    .into_bytes()
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY)
}

/// Runs `f` with environment variables temporarily modified.
///
/// Restores variables on unwind and serializes access to process-global env
/// vars, since tests run in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}
