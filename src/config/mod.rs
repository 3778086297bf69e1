mod file_config;

pub use file_config::FileConfig;

use anyhow::{bail, Result};
use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_REQUEST_TIMEOUT_SEC: u64 = 30;
pub const DEFAULT_PLAYLIST_BATCH_LIMIT: u32 = 50;
pub const DEFAULT_MARKET: &str = "ES";

/// CLI arguments that can be overridden by the TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub api_base_url: String,
    pub request_timeout_sec: u64,
    pub playlist_batch_limit: u32,
    pub market: String,
    pub dataset_dir: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_sec: DEFAULT_REQUEST_TIMEOUT_SEC,
            playlist_batch_limit: DEFAULT_PLAYLIST_BATCH_LIMIT,
            market: DEFAULT_MARKET.to_string(),
            dataset_dir: None,
        }
    }
}

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout_sec: u64,
    pub playlist_batch_limit: u32,
    pub market: String,
    /// Root directory for persisted datasets; `None` disables persistence.
    pub dataset_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let api_base_url = file.api_base_url.unwrap_or_else(|| cli.api_base_url.clone());
        if api_base_url.is_empty() {
            bail!("api_base_url must not be empty");
        }

        let request_timeout_sec = file.request_timeout_sec.unwrap_or(cli.request_timeout_sec);
        if request_timeout_sec == 0 {
            bail!("request_timeout_sec must be greater than zero");
        }

        let playlist_batch_limit = file.playlist_batch_limit.unwrap_or(cli.playlist_batch_limit);
        if playlist_batch_limit == 0 {
            bail!("playlist_batch_limit must be greater than zero");
        }

        let market = file.market.unwrap_or_else(|| cli.market.clone());

        let dataset_dir = file
            .dataset_dir
            .map(PathBuf::from)
            .or_else(|| cli.dataset_dir.clone());

        Ok(Self {
            api_base_url,
            request_timeout_sec,
            playlist_batch_limit,
            market,
            dataset_dir,
        })
    }
}
