//! Infrastructure layer with external service adapters.

/// JSON catalog loading.
pub mod catalog_source;
/// Application configuration.
pub mod config;
/// Per-chat action dispatch.
pub mod dispatcher;
/// Telegram Bot API client and update polling.
pub mod telegram;

pub use catalog_source::JsonCatalogSource;
pub use config::{AppConfig, CliArgs, ConfigError, LogLevel, StorageManager, TelegramConfig};
pub use dispatcher::ChatDispatcher;
pub use telegram::{TelegramClient, UpdatePoller};
