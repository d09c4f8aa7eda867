//! Startup error types.

use thiserror::Error;

use super::{CatalogError, TransportError};

/// Errors that keep the bot from starting.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum StartupError {
    #[error("no bot token provided; set TELEGRAM_TOKEN or pass --token")]
    MissingToken,

    #[error("bot token has invalid format: {reason}")]
    InvalidToken { reason: String },

    #[error("failed to load configuration: {message}")]
    Config { message: String },

    #[error("failed to load catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("messaging platform unavailable: {0}")]
    Transport(#[from] TransportError),
}

impl StartupError {
    /// Creates invalid token error.
    #[must_use]
    pub fn invalid_token(reason: impl Into<String>) -> Self {
        Self::InvalidToken {
            reason: reason.into(),
        }
    }

    /// Creates config error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
