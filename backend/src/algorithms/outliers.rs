//! Interquartile-range bounds and z-scores.

use serde::{Deserialize, Serialize};

use super::descriptive::{mean, percentile_sorted, population_std_dev};

/// Tukey fence multiplier applied to the interquartile range.
pub const IQR_MULTIPLIER: f64 = 1.5;

/// Absolute z-score above which a value is anomalous.
pub const Z_SCORE_THRESHOLD: f64 = 3.0;

/// Quartiles and Tukey fences of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IqrBounds {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl IqrBounds {
    /// Compute bounds from an unsorted sample, `None` when it is empty.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let q1 = percentile_sorted(&sorted, 25.0)?;
        let q3 = percentile_sorted(&sorted, 75.0)?;
        let iqr = q3 - q1;

        Some(Self {
            q1,
            q3,
            iqr,
            lower_bound: q1 - IQR_MULTIPLIER * iqr,
            upper_bound: q3 + IQR_MULTIPLIER * iqr,
        })
    }

    /// Whether `value` lies inside the fences, bounds included.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower_bound && value <= self.upper_bound
    }

    /// Whether `value` falls strictly outside the fences.
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower_bound || value > self.upper_bound
    }
}

/// Population z-score of every value, in input order.
///
/// A sample without variance has no meaningful scale; every value then scores 0.
/// Constant samples are detected directly since rounding in the mean can leave
/// a spurious non-zero deviation.
pub fn z_scores(values: &[f64]) -> Vec<f64> {
    let (Some(mean), Some(std_dev)) = (mean(values), population_std_dev(values)) else {
        return Vec::new();
    };

    if std_dev == 0.0 || values.iter().all(|v| *v == values[0]) {
        return vec![0.0; values.len()];
    }

    values.iter().map(|v| (v - mean) / std_dev).collect()
}

/// Whether a z-score breaches [`Z_SCORE_THRESHOLD`].
pub fn is_z_score_outlier(z_score: f64) -> bool {
    z_score.abs() > Z_SCORE_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iqr_bounds_fixture() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0];
        let bounds = IqrBounds::from_values(&values).unwrap();

        assert_eq!(bounds.q1, 3.25);
        assert_eq!(bounds.q3, 7.75);
        assert_eq!(bounds.iqr, 4.5);
        assert_eq!(bounds.lower_bound, -3.5);
        assert_eq!(bounds.upper_bound, 14.5);
        assert!(bounds.is_outlier(100.0));
        assert!(!bounds.is_outlier(9.0));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let bounds = IqrBounds::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!(bounds.contains(bounds.lower_bound));
        assert!(bounds.contains(bounds.upper_bound));
        assert!(!bounds.is_outlier(bounds.upper_bound));
    }

    #[test]
    fn test_iqr_bounds_empty() {
        assert!(IqrBounds::from_values(&[]).is_none());
    }

    #[test]
    fn test_z_scores_constant_sample() {
        let scores = z_scores(&[10.0, 10.0, 10.0, 10.0]);
        assert_eq!(scores, vec![0.0; 4]);
        assert!(scores.iter().all(|z| !is_z_score_outlier(*z)));
    }

    #[test]
    fn test_z_scores_population_scale() {
        let scores = z_scores(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(scores[0], -1.5);
        assert_eq!(scores[7], 2.0);
        assert!(z_scores(&[]).is_empty());
    }

    #[test]
    fn test_z_score_threshold_is_strict() {
        assert!(!is_z_score_outlier(3.0));
        assert!(is_z_score_outlier(-3.01));
    }
}
