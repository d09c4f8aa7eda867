//! Token resolution use case.

use tracing::{debug, info};

use crate::application::dto::{ResolvedToken, TokenSource};
use crate::domain::entities::BotToken;
use crate::domain::errors::StartupError;

/// Resolves the bot token from the available sources.
#[derive(Debug, Default)]
pub struct ResolveTokenUseCase;

impl ResolveTokenUseCase {
    /// Creates new use case.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Resolves token from CLI or environment.
    ///
    /// Priority:
    /// 1. `--token`
    /// 2. Environment (`TELEGRAM_TOKEN`, `.env` included)
    ///
    /// # Errors
    /// Returns `StartupError::MissingToken` if no source has a value and
    /// `StartupError::InvalidToken` if the chosen value is malformed.
    pub fn execute(
        &self,
        cli_token: Option<String>,
        env_token: Option<String>,
    ) -> Result<ResolvedToken, StartupError> {
        let candidate = [
            (cli_token, TokenSource::CommandLine),
            (env_token, TokenSource::Environment),
        ]
        .into_iter()
        .find_map(|(value, source)| {
            value
                .filter(|s| !s.trim().is_empty())
                .map(|value| (value, source))
        });

        let Some((value, source)) = candidate else {
            debug!("No token found in any source");
            return Err(StartupError::MissingToken);
        };

        let token = BotToken::new(value).ok_or_else(|| {
            StartupError::invalid_token(format!(
                "token from {source} does not look like '<bot id>:<secret>'"
            ))
        })?;

        info!(token = %token, %source, "Using bot token");
        Ok(ResolvedToken::new(token, source))
    }
}
