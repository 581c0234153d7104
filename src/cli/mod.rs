use crate::errors::AppResult;
use clap::{Parser, Subcommand};
use tracing_subscriber;

pub mod commands;

/// Influencer Analysis Statistics
#[derive(Parser)]
#[command(name = "connecta-stats")]
#[command(about = "Influencer AI-analysis statistics reports")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Compute report dimensions and print or write the aggregate
    Report(commands::report::ReportCommand),
    /// Test connectivity to the analyses table (exact row count)
    TestSource(commands::test_source::TestSourceCommand),
    /// Show the effective configuration (API key masked)
    Config(commands::config::ConfigCommand),
}

pub async fn run() -> AppResult<()> {
    // Initialise tracing subscriber to capture info!() macros
    // Uses RUST_LOG environment variable (defaults to "error" if not set)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report(command) => command.run().await,
        Commands::TestSource(command) => command.run().await,
        Commands::Config(command) => command.run(),
    }
}
