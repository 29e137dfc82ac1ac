//! Numeric building blocks for the sensor statistics engines.
//!
//! # Components
//!
//! - [`descriptive`]: mean, median, percentiles, population standard deviation
//! - [`outliers`]: interquartile-range bounds and z-scores
//!
//! Both percentile and dispersion routines follow the conventions of the
//! common numeric array libraries (linear interpolation between closest ranks,
//! population variance, pairwise summation) so that fixtures computed with
//! those libraries reproduce exactly.

pub mod descriptive;
pub mod outliers;

pub use descriptive::{mean, median, pairwise_sum, percentile, percentile_sorted, population_std_dev};
pub use outliers::{is_z_score_outlier, z_scores, IqrBounds, IQR_MULTIPLIER, Z_SCORE_THRESHOLD};
