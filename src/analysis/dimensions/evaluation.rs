//! Evaluation scores: per-score summaries, inference confidence and the
//! score correlation matrix

use crate::analysis::extract::{evaluation_observation, EvaluationObservation};
use crate::analysis::grades::{classify, QUALITY_SCALE};
use crate::types::analysis_results::{CorrelationMatrix, EvaluationReport, MetricSeries};
use crate::types::record::{columns, AnalysisRecord};

/// Matrix metrics, in row/column order
pub const EVALUATION_METRICS: [&str; 5] = [
    "engagement",
    "activity",
    "communication",
    "growth_potential",
    "overall",
];

pub struct EvaluationAnalyser;

impl EvaluationAnalyser {
    pub const COLUMNS: &'static [&'static str] =
        &[columns::ID, columns::EVALUATION, columns::CONTENT_ANALYSIS];

    pub fn analyse(records: &[AnalysisRecord]) -> Option<EvaluationReport> {
        if records.is_empty() {
            return None;
        }
        let observations: Vec<EvaluationObservation> =
            records.iter().map(evaluation_observation).collect();

        let column = |f: fn(&EvaluationObservation) -> Option<f64>| -> Vec<Option<f64>> {
            observations.iter().map(f).collect()
        };
        let columns = vec![
            column(|o| o.engagement),
            column(|o| o.activity),
            column(|o| o.communication),
            column(|o| o.growth_potential),
            column(|o| o.overall),
        ];
        let series = |k: usize| MetricSeries::from_observations(columns[k].iter().copied());

        let overall = series(4);
        Some(EvaluationReport {
            engagement: series(0),
            activity: series(1),
            communication: series(2),
            growth_potential: series(3),
            overall_grades: classify(&overall.values, QUALITY_SCALE),
            overall,
            inference_confidence: MetricSeries::from_observations(
                observations.iter().map(|o| o.inference_confidence),
            ),
            correlation: CorrelationMatrix::from_columns(&EVALUATION_METRICS, &columns),
        })
    }
}
