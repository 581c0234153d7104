use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::fetch::FetchPolicy;

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub fetch: FetchConfig,
    #[serde(default)]
    pub snapshot: SnapshotConfig,
}

/// Remote table source (PostgREST-style endpoint)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub url: String,
    pub api_key: String,
    pub table: String,
    pub timeout_seconds: u64,
}

/// Pagination and retry settings for the paged fetcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    pub page_size: usize,
    pub max_attempts: usize,
    pub initial_backoff_ms: u64,
    pub backoff_multiplier: f64,
    pub max_backoff_seconds: u64,
}

/// Optional local SQLite snapshot of the analyses table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotConfig {
    pub path: Option<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:54321".to_string(),
            api_key: String::new(),
            table: "ai_influencer_analyses".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            page_size: 1000,
            max_attempts: 3,
            initial_backoff_ms: 1000,
            backoff_multiplier: 2.0,
            max_backoff_seconds: 30,
        }
    }
}

impl FetchConfig {
    /// Convert to the runtime policy used by [`crate::fetch::PagedFetcher`]
    pub fn to_policy(&self) -> FetchPolicy {
        FetchPolicy {
            page_size: self.page_size.max(1),
            max_attempts: self.max_attempts.max(1),
            initial_backoff: Duration::from_millis(self.initial_backoff_ms),
            backoff_multiplier: self.backoff_multiplier,
            max_backoff_seconds: self.max_backoff_seconds,
        }
    }
}

impl AppConfig {
    /// Load configuration from config.toml file and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        let source = SourceConfig::default();
        let fetch = FetchConfig::default();
        let config = Config::builder()
            .set_default("source.url", source.url)?
            .set_default("source.api_key", source.api_key)?
            .set_default("source.table", source.table)?
            .set_default("source.timeout_seconds", source.timeout_seconds)?
            .set_default("fetch.page_size", fetch.page_size as i64)?
            .set_default("fetch.max_attempts", fetch.max_attempts as i64)?
            .set_default("fetch.initial_backoff_ms", fetch.initial_backoff_ms)?
            .set_default("fetch.backoff_multiplier", fetch.backoff_multiplier)?
            .set_default("fetch.max_backoff_seconds", fetch.max_backoff_seconds)?
            // Load from config.toml if it exists
            .add_source(File::with_name("config").required(false))
            // CONNECTA_SOURCE__URL, CONNECTA_FETCH__PAGE_SIZE, ...
            .add_source(
                config::Environment::with_prefix("CONNECTA")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        // Dedicated variables shared with the rest of the tooling
        if let Ok(url) = env::var("SUPABASE_URL") {
            app_config.source.url = url;
        }
        if let Ok(key) = env::var("SUPABASE_KEY") {
            app_config.source.api_key = key;
        }
        if let Ok(path) = env::var("CONNECTA_SNAPSHOT_PATH") {
            app_config.snapshot.path = Some(PathBuf::from(path));
        }

        if app_config.fetch.page_size == 0 {
            return Err(ConfigError::Message(
                "fetch.page_size must be greater than zero".to_string(),
            ));
        }

        Ok(app_config)
    }

    /// Get default config values for CLI argument defaults
    pub fn get_defaults() -> Result<Self, ConfigError> {
        match Self::load() {
            Ok(config) => Ok(config),
            Err(_) => Ok(Self {
                source: SourceConfig::default(),
                fetch: FetchConfig::default(),
                snapshot: SnapshotConfig::default(),
            }),
        }
    }

    /// Render the effective configuration as TOML with the API key masked
    pub fn to_redacted_toml(&self) -> Result<String, toml::ser::Error> {
        let mut redacted = self.clone();
        if !redacted.source.api_key.is_empty() {
            redacted.source.api_key = "********".to_string();
        }
        toml::to_string_pretty(&redacted)
    }
}
