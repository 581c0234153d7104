//! Evaluation score results

use super::common::{CorrelationMatrix, MetricSeries};
use crate::analysis::grades::GradeDistribution;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub engagement: MetricSeries,
    pub activity: MetricSeries,
    pub communication: MetricSeries,
    pub growth_potential: MetricSeries,
    pub overall: MetricSeries,
    pub inference_confidence: MetricSeries,
    pub overall_grades: GradeDistribution,
    pub correlation: CorrelationMatrix,
}
