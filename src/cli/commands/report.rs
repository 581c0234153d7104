use crate::analysis::{Dimension, OutputFormat, ReportAssembler, ReportFormatter};
use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::fetch::PagedFetcher;
use crate::source::{Filter, RestTableSource, SqliteTableSource, TableSource};
use crate::types::record::columns;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

/// Compute report dimensions
#[derive(Args)]
pub struct ReportCommand {
    /// Dimension to compute (repeatable; default: all)
    #[arg(long = "dimension", short = 'd')]
    pub dimensions: Vec<Dimension>,

    /// Only include analyses for this platform
    #[arg(long)]
    pub platform: Option<String>,

    /// Output format (console or json)
    #[arg(long, default_value = "console")]
    pub format: OutputFormat,

    /// Write the report to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Read from a local SQLite snapshot instead of the hosted table (overrides config.toml)
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Rows per page (overrides config.toml)
    #[arg(long)]
    pub page_size: Option<usize>,
}

impl ReportCommand {
    pub async fn run(&self) -> AppResult<()> {
        let app_config = AppConfig::get_defaults()?;

        let mut policy = app_config.fetch.to_policy();
        if let Some(page_size) = self.page_size {
            if page_size == 0 {
                return Err(AppError::Config(
                    "--page-size must be greater than zero".to_string(),
                ));
            }
            policy.page_size = page_size;
        }

        let dimensions = if self.dimensions.is_empty() {
            Dimension::ALL.to_vec()
        } else {
            self.dimensions.clone()
        };
        let filters: Vec<Filter> = self
            .platform
            .iter()
            .map(|p| Filter::eq(columns::PLATFORM, p.as_str()))
            .collect();
        let table = app_config.source.table.clone();

        let output = match self.snapshot.as_ref().or(app_config.snapshot.path.as_ref()) {
            Some(path) => {
                info!("Reading analyses from snapshot: {}", path.display());
                let source = SqliteTableSource::open(path)?;
                self.render(PagedFetcher::new(source, policy), table, filters, &dimensions)
                    .await?
            }
            None => {
                info!("Reading analyses from: {}", app_config.source.url);
                let source = RestTableSource::new(&app_config.source)?;
                self.render(PagedFetcher::new(source, policy), table, filters, &dimensions)
                    .await?
            }
        };

        match &self.output {
            Some(path) => write_output_to_file(path, &output, "Report"),
            None => {
                print!("{}", output);
                Ok(())
            }
        }
    }

    async fn render<S: TableSource>(
        &self,
        fetcher: PagedFetcher<S>,
        table: String,
        filters: Vec<Filter>,
        dimensions: &[Dimension],
    ) -> AppResult<String> {
        let assembler = ReportAssembler::new(fetcher, table).with_filters(filters);
        let aggregate = assembler.assemble(dimensions).await;
        ReportFormatter::format_aggregate(&aggregate, self.format)
    }
}

/// Write output to file with safe directory creation
fn write_output_to_file(path: &PathBuf, content: &str, description: &str) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    println!("{} written to: {}", description, path.display());
    Ok(())
}
