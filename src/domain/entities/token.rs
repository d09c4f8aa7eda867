//! Bot API token value object.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Bot access token with validation and masking.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct BotToken {
    value: String,
}

impl BotToken {
    const MIN_SECRET_LENGTH: usize = 30;

    /// Creates new token with format validation (`<bot id>:<secret>`).
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into().trim().to_string();

        let (bot_id, secret) = value.split_once(':')?;

        if bot_id.is_empty() || !bot_id.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        if secret.len() < Self::MIN_SECRET_LENGTH
            || !secret
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return None;
        }

        Some(Self { value })
    }

    /// Creates token without validation.
    #[cfg(test)]
    #[must_use]
    pub fn new_unchecked(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Returns token as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Numeric bot identifier, the public half of the token.
    #[must_use]
    pub fn bot_id(&self) -> Option<&str> {
        self.value.split_once(':').map(|(id, _)| id)
    }

    /// Returns masked token for display.
    #[must_use]
    pub fn masked(&self) -> String {
        match self.bot_id() {
            Some(id) => format!("{id}:***"),
            None => "*".repeat(self.value.len().min(8)),
        }
    }
}

impl fmt::Debug for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotToken")
            .field("value", &self.masked())
            .finish()
    }
}

impl fmt::Display for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_valid_token() -> String {
        "123456789:AAHdqTcvCH1vGWJxfSeofSAs0K5PALDsaw_".to_string()
    }

    #[test]
    fn test_valid_token_creation() {
        let token = BotToken::new(make_valid_token());
        assert!(token.is_some());
        assert_eq!(token.unwrap().bot_id(), Some("123456789"));
    }

    #[test]
    fn test_token_is_trimmed() {
        let token = BotToken::new(format!("  {}\n", make_valid_token())).unwrap();
        assert_eq!(token.as_str(), make_valid_token());
    }

    #[test]
    fn test_invalid_token_without_separator() {
        assert!(BotToken::new("a".repeat(60)).is_none());
    }

    #[test]
    fn test_invalid_token_non_numeric_id() {
        assert!(BotToken::new("bot:AAHdqTcvCH1vGWJxfSeofSAs0K5PALDsaw_").is_none());
    }

    #[test]
    fn test_invalid_token_short_secret() {
        assert!(BotToken::new("123:short").is_none());
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let token = BotToken::new_unchecked(make_valid_token());
        let debug_output = format!("{token:?}");

        assert!(!debug_output.contains(&make_valid_token()));
        assert!(debug_output.contains("123456789:***"));
    }
}
