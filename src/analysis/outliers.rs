//! IQR (Tukey fence) outlier detection
//!
//! Zero is the "field absent" sentinel in analysis documents, so the fence
//! is fitted on the non-zero values only. It is then applied to every
//! original value, zeros included: with a positive lower fence, sentinel
//! zeros are flagged as low outliers.

use crate::analysis::stats;
use serde::{Deserialize, Serialize};

/// Fewest non-zero values needed to estimate quartiles
pub const MIN_FENCE_SAMPLE: usize = 4;

/// Fence width in interquartile ranges
pub const IQR_MULTIPLIER: f64 = 1.5;

/// Inclusive `[lower, upper]` bounds of non-outlying values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fence {
    pub q1: f64,
    pub q3: f64,
    pub lower: f64,
    pub upper: f64,
}

impl Fence {
    /// Tukey fence over the non-zero finite values, if there are enough of them
    pub fn fit(values: &[f64]) -> Option<Self> {
        let mut non_zero: Vec<f64> = values
            .iter()
            .copied()
            .filter(|v| v.is_finite() && *v != 0.0)
            .collect();
        if non_zero.len() < MIN_FENCE_SAMPLE {
            return None;
        }
        non_zero.sort_by(f64::total_cmp);

        let q1 = stats::quantile_sorted(&non_zero, 0.25);
        let q3 = stats::quantile_sorted(&non_zero, 0.75);
        let iqr = q3 - q1;
        Some(Self {
            q1,
            q3,
            lower: q1 - IQR_MULTIPLIER * iqr,
            upper: q3 + IQR_MULTIPLIER * iqr,
        })
    }

    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}

/// Per-value outlier flags aligned with the input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    pub flags: Vec<bool>,
    pub count: usize,
    pub fence: Option<Fence>,
}

impl OutlierReport {
    /// Indices of flagged values
    pub fn flagged_indices(&self) -> Vec<usize> {
        self.flags
            .iter()
            .enumerate()
            .filter(|(_, flagged)| **flagged)
            .map(|(idx, _)| idx)
            .collect()
    }
}

/// Flag values outside the non-zero IQR fence
///
/// Non-finite values are never flagged. Fewer than [`MIN_FENCE_SAMPLE`]
/// non-zero values yields all-false flags.
pub fn detect(values: &[f64]) -> OutlierReport {
    let fence = Fence::fit(values);
    let flags: Vec<bool> = match fence {
        Some(fence) => values
            .iter()
            .map(|v| v.is_finite() && fence.is_outlier(*v))
            .collect(),
        None => vec![false; values.len()],
    };
    let count = flags.iter().filter(|f| **f).count();
    OutlierReport {
        flags,
        count,
        fence,
    }
}
