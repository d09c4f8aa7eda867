use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::level_filters::LevelFilter;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use torzhok_bot::application::{NavigateUseCase, ResolveTokenUseCase};
use torzhok_bot::domain::errors::StartupError;
use torzhok_bot::domain::ports::CatalogSource;
use torzhok_bot::infrastructure::{
    AppConfig, ChatDispatcher, CliArgs, JsonCatalogSource, StorageManager, TelegramClient,
    UpdatePoller,
};

const TOKEN_ENV_VAR: &str = "TELEGRAM_TOKEN";

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.log_level.to_tracing_level()).into())
        .from_env_lossy();

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig, StartupError> {
    let storage = match args.config.as_deref() {
        Some(path) => StorageManager::with_dir(
            path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf(),
        ),
        None => StorageManager::new().map_err(|e| StartupError::config(e.to_string()))?,
    };

    let mut config = storage
        .load_config(args.config.as_deref())
        .map_err(|e| StartupError::config(e.to_string()))?;
    config.merge_with_args(args);

    Ok(config)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C, running until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let config = load_config(&args)?;

    init_logging(&config)?;

    info!(version = torzhok_bot::VERSION, "Starting {}", torzhok_bot::NAME);

    let resolved = ResolveTokenUseCase::new()
        .execute(args.token.clone(), std::env::var(TOKEN_ENV_VAR).ok())?;

    let catalog = JsonCatalogSource::new(&config.catalog_path)
        .load()
        .map_err(StartupError::from)
        .wrap_err_with(|| format!("catalog {}", config.catalog_path.display()))?;

    let client = Arc::new(
        TelegramClient::new(&resolved.token, &config.telegram).map_err(StartupError::from)?,
    );

    let me = client.get_me().await.map_err(StartupError::from)?;
    info!(
        bot = me.username.as_deref().unwrap_or(&me.first_name),
        entries = catalog.len(),
        "Connected to Bot API"
    );

    if let Err(e) = client.set_my_commands().await {
        warn!(error = %e, "Failed to publish command list");
    }

    let use_case = Arc::new(NavigateUseCase::new(Arc::new(catalog), client.clone()));
    let dispatcher = ChatDispatcher::new(use_case, config.telegram.worker_idle());
    let poller = UpdatePoller::new(client, dispatcher, config.telegram.poll_timeout())
        .with_bot_username(me.username);

    if let Err(e) = poller.run(shutdown_signal()).await {
        error!(error = %e, "Polling stopped");
        return Err(e.into());
    }

    Ok(())
}
