//! Summary statistics over numeric sequences
//!
//! Every function filters out NaN/±Inf before aggregating and is total:
//! degenerate inputs (empty, single value, zero variance) return 0 rather
//! than an error or NaN.
//!
//! Median is the element at index `n / 2` of the sorted sequence, i.e. the
//! upper of the two middle elements on even lengths; dashboards built on
//! these numbers expect that selection rather than the averaged midpoint.

use serde::{Deserialize, Serialize};

/// Finite values only, in input order
pub fn finite(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|v| v.is_finite()).collect()
}

pub fn count(values: &[f64]) -> usize {
    values.iter().filter(|v| v.is_finite()).count()
}

pub fn mean(values: &[f64]) -> f64 {
    let filtered = finite(values);
    if filtered.is_empty() {
        return 0.0;
    }
    filtered.iter().sum::<f64>() / filtered.len() as f64
}

pub fn median(values: &[f64]) -> f64 {
    let sorted = sorted_finite(values);
    if sorted.is_empty() {
        return 0.0;
    }
    sorted[sorted.len() / 2]
}

pub fn min(values: &[f64]) -> f64 {
    let filtered = finite(values);
    if filtered.is_empty() {
        return 0.0;
    }
    filtered.iter().copied().fold(f64::INFINITY, f64::min)
}

pub fn max(values: &[f64]) -> f64 {
    let filtered = finite(values);
    if filtered.is_empty() {
        return 0.0;
    }
    filtered.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Population standard deviation; 0 with fewer than two values
pub fn stdev(values: &[f64]) -> f64 {
    let filtered = finite(values);
    if filtered.len() < 2 {
        return 0.0;
    }
    let m = filtered.iter().sum::<f64>() / filtered.len() as f64;
    let variance =
        filtered.iter().map(|x| (x - m).powi(2)).sum::<f64>() / filtered.len() as f64;
    let sd = variance.sqrt();
    if sd.is_finite() {
        sd
    } else {
        0.0
    }
}

/// Pearson correlation coefficient
///
/// Sequences must have equal length; pairs where either side is non-finite
/// are dropped. Returns 0 when fewer than two pairs remain, when either side
/// has zero variance, or when the result is not finite.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() {
        return 0.0;
    }
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(a, b)| (*a, *b))
        .collect();
    pearson_pairs(&pairs)
}

/// Pearson correlation over already-paired observations
pub fn pearson_pairs(pairs: &[(f64, f64)]) -> f64 {
    let pairs: Vec<(f64, f64)> = pairs
        .iter()
        .copied()
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .collect();
    let n = pairs.len();
    if n < 2 {
        return 0.0;
    }

    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n as f64;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= 0.0 || var_y <= 0.0 {
        return 0.0;
    }
    let r = cov / (var_x.sqrt() * var_y.sqrt());
    if r.is_finite() {
        r.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Linear-interpolation quantile (`q` in `[0, 1]`) of the finite values
pub fn quantile(values: &[f64], q: f64) -> f64 {
    let sorted = sorted_finite(values);
    quantile_sorted(&sorted, q)
}

/// Linear-interpolation quantile over an already sorted slice
pub(crate) fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lower = pos.floor() as usize;
            let upper = pos.ceil() as usize;
            let frac = pos - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * frac
        }
    }
}

fn sorted_finite(values: &[f64]) -> Vec<f64> {
    let mut sorted = finite(values);
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Count, mean, median, min, max and standard deviation of one distribution
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub stdev: f64,
}

impl SummaryResult {
    pub fn from_values(values: &[f64]) -> Self {
        let filtered = finite(values);
        Self {
            count: filtered.len(),
            mean: mean(&filtered),
            median: median(&filtered),
            min: min(&filtered),
            max: max(&filtered),
            stdev: stdev(&filtered),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
