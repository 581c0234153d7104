//! Type system for the statistics pipeline
//!
//! - `record`: Decoded analysis rows (one influencer analysis each)
//! - `analysis_results`: Per-dimension report structures

pub mod analysis_results;
pub mod record;

pub use record::AnalysisRecord;
