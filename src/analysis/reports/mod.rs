//! Report formatting and output generation
//!
//! Renders a [`ReportAggregate`] via the [`ReportFormatter`] facade, either
//! as a human-readable console report or as the JSON aggregate.

pub mod console;
pub mod utils;

use crate::analysis::assembler::{DimensionOutcome, ReportAggregate};
use crate::errors::{AppError, AppResult};
use std::str::FromStr;

/// Output format options for analysis reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Console,
    Json,
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" | "text" => Ok(OutputFormat::Console),
            "json" => Ok(OutputFormat::Json),
            other => Err(AppError::Config(format!("Unknown output format: {}", other))),
        }
    }
}

/// Facade for all report formatting operations
pub struct ReportFormatter;

impl ReportFormatter {
    pub fn format_number(n: usize) -> String {
        utils::format_number(n)
    }

    pub fn format_aggregate(aggregate: &ReportAggregate, format: OutputFormat) -> AppResult<String> {
        match format {
            OutputFormat::Json => utils::export_json(&aggregate.to_json()?),
            OutputFormat::Console => {
                let mut output = String::new();
                for (dimension, outcome) in &aggregate.dimensions {
                    output.push_str(&format!("=== {} ===\n", dimension.title()));
                    match outcome {
                        DimensionOutcome::Available(report) => {
                            output.push_str(&console::format_report(report));
                        }
                        DimensionOutcome::Unavailable { reason } => {
                            output.push_str(&format!("Unavailable: {}\n", reason));
                        }
                    }
                    output.push('\n');
                }
                Ok(output)
            }
        }
    }
}
