use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use clap::Args;

/// Show the effective configuration
#[derive(Args)]
pub struct ConfigCommand {}

impl ConfigCommand {
    pub fn run(&self) -> AppResult<()> {
        let app_config = AppConfig::get_defaults()?;
        let rendered = app_config
            .to_redacted_toml()
            .map_err(|e| AppError::Config(format!("Failed to render configuration: {}", e)))?;
        print!("{}", rendered);
        Ok(())
    }
}
