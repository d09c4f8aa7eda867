//! Messaging transport port definition.

use async_trait::async_trait;

use crate::domain::entities::{ChatId, Keyboard, MessageId};
use crate::domain::errors::TransportError;

/// How message text should be interpreted by the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextFormat {
    /// Sent as-is.
    #[default]
    Plain,
    /// Telegram's HTML subset; dynamic text must be escaped.
    Html,
}

/// Text message with an optional inline keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingText {
    /// Message body.
    pub text: String,
    /// Buttons under the message; empty means none.
    pub keyboard: Keyboard,
    /// Markup mode of `text`.
    pub format: TextFormat,
    /// Suppresses the preview card for the first link.
    pub disable_link_preview: bool,
}

impl OutgoingText {
    /// Plain text with no keyboard.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: Keyboard::new(),
            format: TextFormat::Plain,
            disable_link_preview: false,
        }
    }

    /// Attaches a keyboard.
    #[must_use]
    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = keyboard;
        self
    }

    /// Marks the text as HTML.
    #[must_use]
    pub const fn html(mut self) -> Self {
        self.format = TextFormat::Html;
        self
    }

    /// Disables the link preview.
    #[must_use]
    pub const fn without_link_preview(mut self) -> Self {
        self.disable_link_preview = true;
        self
    }
}

/// Photo referenced by URL, with a caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingPhoto {
    /// Public address the platform fetches the image from.
    pub image_url: String,
    /// Plain-text caption.
    pub caption: String,
}

impl OutgoingPhoto {
    /// Creates photo message.
    #[must_use]
    pub fn new(image_url: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            caption: caption.into(),
        }
    }
}

/// Port for the messaging platform the bot talks through.
#[async_trait]
pub trait TransportPort: Send + Sync {
    /// Sends a new text message and returns its reference.
    async fn send_text(
        &self,
        chat_id: ChatId,
        message: OutgoingText,
    ) -> Result<MessageId, TransportError>;

    /// Replaces text and keyboard of an existing message.
    async fn edit_text(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        message: OutgoingText,
    ) -> Result<(), TransportError>;

    /// Sends a photo and returns its message reference.
    async fn send_photo(
        &self,
        chat_id: ChatId,
        photo: OutgoingPhoto,
    ) -> Result<MessageId, TransportError>;

    /// Deletes a message.
    async fn delete_message(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
    ) -> Result<(), TransportError>;

    /// Acknowledges a button press so the client stops its progress indicator.
    async fn answer_callback(&self, callback_id: &str) -> Result<(), TransportError>;
}
