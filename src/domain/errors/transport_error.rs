//! Messaging transport error types.

use thiserror::Error;

const NOT_MODIFIED_MARKER: &str = "message is not modified";

/// Transport error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum TransportError {
    #[error("network error: {message}")]
    Network { message: String },

    #[error("API request rejected ({code}): {description}")]
    Api { code: i64, description: String },

    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("failed to decode API response: {message}")]
    Decode { message: String },

    #[error("unexpected transport error: {message}")]
    Unexpected { message: String },
}

impl TransportError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates API rejection error.
    #[must_use]
    pub fn api(code: i64, description: impl Into<String>) -> Self {
        Self::Api {
            code,
            description: description.into(),
        }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether an edit was rejected because nothing changed.
    #[must_use]
    pub fn is_not_modified(&self) -> bool {
        matches!(self, Self::Api { description, .. } if description.contains(NOT_MODIFIED_MARKER))
    }

    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::RateLimited { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_modified_detection() {
        let error = TransportError::api(
            400,
            "Bad Request: message is not modified: specified new message content is the same",
        );
        assert!(error.is_not_modified());
        assert!(!TransportError::api(400, "Bad Request: chat not found").is_not_modified());
        assert!(!TransportError::network(NOT_MODIFIED_MARKER).is_not_modified());
    }

    #[test]
    fn test_network_errors() {
        assert!(TransportError::RateLimited { retry_after_secs: 3 }.is_network_error());
        assert!(TransportError::network("timed out").is_network_error());
        assert!(!TransportError::api(403, "Forbidden: bot was blocked by the user").is_network_error());
    }
}
