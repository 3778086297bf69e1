use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use music_engagement::config::{
    AppConfig, CliConfig, FileConfig, DEFAULT_API_BASE_URL, DEFAULT_MARKET,
    DEFAULT_PLAYLIST_BATCH_LIMIT, DEFAULT_REQUEST_TIMEOUT_SEC,
};
use music_engagement::{
    DatasetSink, EngagementRepository, LocalFsDatasetSink, MusicApi, NoOpDatasetSink,
    SpotifyClient, UserContext,
};

#[derive(Parser, Debug)]
#[command(about = "Aggregate a user's music engagement into one report")]
struct CliArgs {
    /// Bearer access token for the streaming API.
    #[clap(long)]
    pub access_token: String,

    /// The user id the token belongs to.
    #[clap(long)]
    pub user_id: String,

    /// Optional TOML config file; values there override CLI flags.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Base URL of the streaming API.
    #[clap(long, default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    /// Timeout in seconds for each remote call.
    #[clap(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SEC)]
    pub request_timeout_sec: u64,

    /// Page size for the playlist collection fetch.
    #[clap(long, default_value_t = DEFAULT_PLAYLIST_BATCH_LIMIT)]
    pub playlist_batch_limit: u32,

    /// Market code for playlist-track requests.
    #[clap(long, default_value = DEFAULT_MARKET)]
    pub market: String,

    /// Root directory for persisted raw datasets. Omit to disable persistence.
    #[clap(long)]
    pub dataset_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };

    let cli_config = CliConfig {
        api_base_url: cli_args.api_base_url,
        request_timeout_sec: cli_args.request_timeout_sec,
        playlist_batch_limit: cli_args.playlist_batch_limit,
        market: cli_args.market,
        dataset_dir: cli_args.dataset_dir,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    let api: Arc<dyn MusicApi> = Arc::new(SpotifyClient::new(
        config.api_base_url.clone(),
        config.request_timeout_sec,
        config.playlist_batch_limit,
        config.market.clone(),
    )?);

    let sink: Arc<dyn DatasetSink> = match &config.dataset_dir {
        Some(dir) => {
            info!("Persisting raw datasets under {:?}", dir);
            Arc::new(LocalFsDatasetSink::new(dir.clone()))
        }
        None => Arc::new(NoOpDatasetSink),
    };

    let repository = EngagementRepository::new(api, sink);
    let ctx = UserContext::new(cli_args.access_token, cli_args.user_id);

    let report = repository.get_user_music_engagement(&ctx).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    // Dataset writes run in the background; let them land before the
    // runtime shuts down.
    repository.drain_dataset_writes().await;

    Ok(())
}
