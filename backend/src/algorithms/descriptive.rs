//! Descriptive statistics over `f64` samples.

use std::cmp::Ordering;

/// Block size below which [`pairwise_sum`] falls back to an unrolled loop.
const PAIRWISE_BLOCK: usize = 128;

/// Sum with the reduction order used by vectorised array libraries.
///
/// The first element seeds the accumulator and the remainder is summed
/// pairwise: runs of up to 128 values are accumulated in eight interleaved
/// lanes, longer runs are split in halves (rounded down to a multiple of 8).
pub fn pairwise_sum(values: &[f64]) -> f64 {
    match values.split_first() {
        None => 0.0,
        Some((first, rest)) => first + pairwise_block(rest),
    }
}

fn pairwise_block(a: &[f64]) -> f64 {
    let n = a.len();
    if n < 8 {
        let mut res = 0.0;
        for v in a {
            res += v;
        }
        res
    } else if n <= PAIRWISE_BLOCK {
        let mut r = [0.0f64; 8];
        r.copy_from_slice(&a[..8]);
        let mut i = 8;
        while i < n - (n % 8) {
            for (j, lane) in r.iter_mut().enumerate() {
                *lane += a[i + j];
            }
            i += 8;
        }
        let mut res = ((r[0] + r[1]) + (r[2] + r[3])) + ((r[4] + r[5]) + (r[6] + r[7]));
        while i < n {
            res += a[i];
            i += 1;
        }
        res
    } else {
        let mut n2 = n / 2;
        n2 -= n2 % 8;
        pairwise_block(&a[..n2]) + pairwise_block(&a[n2..])
    }
}

/// Arithmetic mean, or `None` for an empty sample.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(pairwise_sum(values) / values.len() as f64)
}

/// Median of the sample; even-sized samples average the two central values.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sorted = sorted_copy(values);
    let count = sorted.len();
    let median = if count % 2 == 0 {
        (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
    } else {
        sorted[count / 2]
    };
    Some(median)
}

/// Population standard deviation (divides by `N`, not `N - 1`).
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let squared: Vec<f64> = values
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .collect();
    Some((pairwise_sum(&squared) / values.len() as f64).sqrt())
}

/// `q`-th percentile (`0..=100`) of an unsorted sample.
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    percentile_sorted(&sorted_copy(values), q)
}

/// `q`-th percentile (`0..=100`) of a sample sorted in non-decreasing order.
///
/// Uses linear interpolation between the closest ranks, with virtual index
/// `(n - 1) * q / 100`. The interpolation is evaluated from whichever
/// neighbour is closer, matching NumPy's `linear` method bit for bit.
pub fn percentile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 || !(0.0..=100.0).contains(&q) {
        return None;
    }
    if n == 1 {
        return Some(sorted[0]);
    }

    let virtual_index = (n - 1) as f64 * (q / 100.0);
    let below = virtual_index.floor();
    let lo = below as usize;
    if lo + 1 >= n {
        return Some(sorted[n - 1]);
    }
    let t = virtual_index - below;
    Some(lerp(sorted[lo], sorted[lo + 1], t))
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let diff = b - a;
    if t >= 0.5 {
        b - diff * (1.0 - t)
    } else {
        a + diff * t
    }
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}
