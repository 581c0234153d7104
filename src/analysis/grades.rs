//! Self-relative grade classification
//!
//! Values are graded by their Z-score against the distribution they came
//! from, not by fixed cutoffs:
//!
//! | z            | grade          |
//! |--------------|----------------|
//! | z ≥ 1.0      | top            |
//! | z ≥ 0.3      | second         |
//! | z ≥ -0.3     | middle         |
//! | z ≥ -1.0     | fourth         |
//! | otherwise    | bottom         |
//!
//! Boundary values land in the higher grade. With zero spread every value
//! has z = 0 and lands in the middle grade.
//!
//! [`classify_fixed`] and [`assess`] grade against fixed lower bounds
//! instead, with the same tie rule.

use crate::analysis::stats;
use crate::utils::math::safe_percentage;
use serde::{Deserialize, Serialize};

/// Z-score lower bounds for the top four grades
pub const Z_THRESHOLDS: [f64; 4] = [1.0, 0.3, -0.3, -1.0];

/// Five ordinal grades, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    Top,
    Second,
    Middle,
    Fourth,
    Bottom,
}

impl Grade {
    pub const ALL: [Grade; 5] = [
        Grade::Top,
        Grade::Second,
        Grade::Middle,
        Grade::Fourth,
        Grade::Bottom,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Grade for a Z-score
    pub fn from_z_score(z: f64) -> Self {
        if z >= Z_THRESHOLDS[0] {
            Grade::Top
        } else if z >= Z_THRESHOLDS[1] {
            Grade::Second
        } else if z >= Z_THRESHOLDS[2] {
            Grade::Middle
        } else if z >= Z_THRESHOLDS[3] {
            Grade::Fourth
        } else {
            Grade::Bottom
        }
    }

    /// Grade against fixed descending lower bounds for the top four grades
    pub fn from_cutoffs(value: f64, cutoffs: [f64; 4]) -> Self {
        cutoffs
            .iter()
            .position(|cutoff| value >= *cutoff)
            .map(|idx| Grade::ALL[idx])
            .unwrap_or(Grade::Bottom)
    }
}

/// Display labels for the five grades of one report area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeScale {
    pub labels: [&'static str; 5],
}

/// Network quality / performance grades
pub const QUALITY_SCALE: GradeScale = GradeScale {
    labels: ["매우 우수", "우수", "보통", "미흡", "매우 미흡"],
};

/// Activity grades
pub const ACTIVITY_SCALE: GradeScale = GradeScale {
    labels: ["매우 활발", "활발", "보통", "비활발", "매우 비활발"],
};

/// Five-tier level of a headline average
pub const LEVEL_SCALE: GradeScale = GradeScale {
    labels: ["매우 높은", "높은", "보통", "낮은", "매우 낮은"],
};

/// Strength of a correlation coefficient, by magnitude
pub const CORRELATION_STRENGTH_SCALE: GradeScale = GradeScale {
    labels: ["매우 강한", "강한", "보통", "약한", "거의 없는"],
};

/// Fixed engagement-rate ranges in percent
pub const ENGAGEMENT_RANGE_SCALE: GradeScale = GradeScale {
    labels: [
        "매우 높음 (5% 이상)",
        "높음 (3-5%)",
        "보통 (1-3%)",
        "낮음 (0.5-1%)",
        "매우 낮음 (0.5% 미만)",
    ],
};

impl GradeScale {
    pub fn label(&self, grade: Grade) -> &'static str {
        self.labels[grade.index()]
    }
}

/// A single value with the grade it earned and that grade's label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub value: f64,
    pub grade: Grade,
    pub label: String,
}

impl Assessment {
    pub fn new(value: f64, grade: Grade, scale: GradeScale) -> Self {
        Self {
            value,
            grade,
            label: scale.label(grade).to_string(),
        }
    }
}

/// Grade one value against fixed cutoffs
pub fn assess(value: f64, cutoffs: [f64; 4], scale: GradeScale) -> Assessment {
    Assessment::new(value, Grade::from_cutoffs(value, cutoffs), scale)
}

/// One grade label and how many values landed in it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeBucket {
    pub grade: Grade,
    pub label: String,
    pub count: usize,
    pub percentage: f64,
}

/// Counts per grade, in grade order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeDistribution {
    pub buckets: Vec<GradeBucket>,
    pub total: usize,
    pub mean: f64,
    pub stdev: f64,
}

impl GradeDistribution {
    fn from_counts(scale: GradeScale, counts: [usize; 5], mean: f64, stdev: f64) -> Self {
        let total = counts.iter().sum();
        let buckets = Grade::ALL
            .iter()
            .map(|grade| GradeBucket {
                grade: *grade,
                label: scale.label(*grade).to_string(),
                count: counts[grade.index()],
                percentage: safe_percentage(counts[grade.index()], total),
            })
            .collect();
        Self {
            buckets,
            total,
            mean,
            stdev,
        }
    }

    pub fn count(&self, grade: Grade) -> usize {
        self.buckets
            .iter()
            .find(|b| b.grade == grade)
            .map(|b| b.count)
            .unwrap_or(0)
    }

    pub fn count_by_label(&self, label: &str) -> usize {
        self.buckets
            .iter()
            .find(|b| b.label == label)
            .map(|b| b.count)
            .unwrap_or(0)
    }
}

/// Grade every finite value of a distribution by Z-score
///
/// Bucket counts always sum to the number of finite input values.
pub fn classify(values: &[f64], scale: GradeScale) -> GradeDistribution {
    let filtered = stats::finite(values);
    let mean = stats::mean(&filtered);
    let sd = stats::stdev(&filtered);

    let mut counts = [0usize; 5];
    for value in &filtered {
        let z = if sd > 0.0 { (value - mean) / sd } else { 0.0 };
        counts[Grade::from_z_score(z).index()] += 1;
    }

    GradeDistribution::from_counts(scale, counts, mean, sd)
}

/// Grade with fixed absolute cutoffs (descending lower bounds for the top four grades)
pub fn classify_fixed(values: &[f64], cutoffs: [f64; 4], scale: GradeScale) -> GradeDistribution {
    let filtered = stats::finite(values);
    let mut counts = [0usize; 5];
    for value in &filtered {
        counts[Grade::from_cutoffs(*value, cutoffs).index()] += 1;
    }
    GradeDistribution::from_counts(scale, counts, stats::mean(&filtered), stats::stdev(&filtered))
}
