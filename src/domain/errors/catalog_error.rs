//! Catalog loading error types.

use std::path::PathBuf;

use thiserror::Error;

/// Catalog loading error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum CatalogError {
    #[error("catalog source not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("invalid catalog entry #{index}: {reason}")]
    Validation { index: usize, reason: String },

    #[error("malformed catalog payload: {message}")]
    Parse { message: String },

    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// Creates not found error.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Creates validation error for the entry at `index`.
    #[must_use]
    pub fn validation(index: usize, reason: impl Into<String>) -> Self {
        Self::Validation {
            index,
            reason: reason.into(),
        }
    }

    /// Creates parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }
}
