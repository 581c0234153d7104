use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::fetch::PagedFetcher;
use crate::source::{RestTableSource, SqliteTableSource, TableSource};
use clap::Args;
use std::path::PathBuf;
use tracing::{error, info};

/// Test connectivity to the analyses table
#[derive(Args)]
pub struct TestSourceCommand {
    /// SQLite snapshot to test instead of the hosted table
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Source URL (overrides config.toml)
    #[arg(long)]
    pub url: Option<String>,
}

impl TestSourceCommand {
    pub async fn run(&self) -> AppResult<()> {
        info!("=== Testing Analyses Source ===");

        let app_config = AppConfig::get_defaults()?;
        let mut source_config = app_config.source.clone();
        if let Some(url) = &self.url {
            source_config.url = url.clone();
        }
        let policy = app_config.fetch.to_policy();

        let result = match self.snapshot.as_ref().or(app_config.snapshot.path.as_ref()) {
            Some(path) => {
                info!("Testing snapshot: {}", path.display());
                let source = SqliteTableSource::open(path)?;
                count_rows(PagedFetcher::new(source, policy), &source_config.table).await
            }
            None => {
                info!("Testing connection to: {}", source_config.url);
                let source = RestTableSource::new(&source_config)?;
                count_rows(PagedFetcher::new(source, policy), &source_config.table).await
            }
        };

        match result {
            Ok(total) => {
                println!("Source connection test PASSED");
                println!("Table {} holds {} analyses", source_config.table, total);
                Ok(())
            }
            Err(e) => {
                error!("Source connection test failed: {}", e);
                println!("Source connection test FAILED");
                println!("Error: {}", e);
                println!("\nTroubleshooting tips:");
                println!("1. Check that SUPABASE_URL points at the project");
                println!("2. Verify SUPABASE_KEY is a valid API key");
                println!("3. Ensure the table name in config.toml exists");
                Err(AppError::Source(e))
            }
        }
    }
}

async fn count_rows<S: TableSource>(
    fetcher: PagedFetcher<S>,
    table: &str,
) -> crate::errors::SourceResult<u64> {
    fetcher.count(table, &[]).await
}
