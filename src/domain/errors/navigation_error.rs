//! Navigation error types.

use thiserror::Error;

use super::TransportError;

/// Failures that prevented a screen from reaching the user.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum NavigationError {
    #[error("failed to render {screen}: {source}")]
    Render {
        screen: String,
        #[source]
        source: TransportError,
    },

    #[error("failed to send photo for {screen}: {source}")]
    Photo {
        screen: String,
        #[source]
        source: TransportError,
    },
}

impl NavigationError {
    /// Creates render error.
    #[must_use]
    pub fn render(screen: impl Into<String>, source: TransportError) -> Self {
        Self::Render {
            screen: screen.into(),
            source,
        }
    }

    /// Creates photo send error.
    #[must_use]
    pub fn photo(screen: impl Into<String>, source: TransportError) -> Self {
        Self::Photo {
            screen: screen.into(),
            source,
        }
    }

    /// Returns whether the underlying transport failure was network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        match self {
            Self::Render { source, .. } | Self::Photo { source, .. } => source.is_network_error(),
        }
    }
}
