//! Statistics pipeline for influencer analysis documents
//!
//! Rows fetched by the [`PagedFetcher`](crate::fetch::PagedFetcher) are
//! decoded into records, metrics are extracted per dimension and summarised
//! into grades, outliers and correlations.
//!
//! ## Overview
//!
//! - **Normalisation** - Lenient decoding of JSON-ish text fields
//! - **Extraction** - Alias lookup with estimators for missing metrics
//! - **Statistics** - Summary statistics, Z-score grades, IQR outliers
//! - **Dimensions** - One analyser per report area
//! - **Assembly** - Fetch-and-aggregate orchestration with memoisation
//! - **Report Generation** - Console and JSON output
//!
//! ## Usage
//!
//! ```rust,no_run
//! use connecta_stats::analysis::{Dimension, OutputFormat, ReportAssembler, ReportFormatter};
//! use connecta_stats::errors::AppResult;
//! use connecta_stats::fetch::PagedFetcher;
//! use connecta_stats::source::sqlite::SqliteTableSource;
//!
//! async fn example() -> AppResult<()> {
//!     let source = SqliteTableSource::open("./snapshot.db")?;
//!     let fetcher = PagedFetcher::with_default_policy(source);
//!     let assembler = ReportAssembler::new(fetcher, "ai_influencer_analyses");
//!
//!     let aggregate = assembler.assemble(&Dimension::ALL).await;
//!     print!("{}", ReportFormatter::format_aggregate(&aggregate, OutputFormat::Console)?);
//!     Ok(())
//! }
//! ```

pub mod assembler;
pub mod cache;
pub mod dimensions;
pub mod extract;
pub mod grades;
pub mod normalize;
pub mod outliers;
pub mod reports;
pub mod stats;

// Re-export main types and interfaces
pub use assembler::{DimensionOutcome, ReportAggregate, ReportAssembler, NO_DATA};
pub use cache::{CacheKey, CacheStats, ReportCache};
pub use dimensions::{analyse_dimension, Dimension, DimensionReport};
pub use grades::{
    Assessment, Grade, GradeDistribution, GradeScale, ACTIVITY_SCALE, QUALITY_SCALE,
};
pub use outliers::{Fence, OutlierReport};
pub use reports::{OutputFormat, ReportFormatter};
pub use stats::SummaryResult;
