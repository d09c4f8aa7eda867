//! Render instruction produced for every screen.

use crate::domain::entities::Keyboard;
use crate::domain::ports::{OutgoingPhoto, OutgoingText};

/// What to show the user: a text message, its keyboard and an optional photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderInstruction {
    /// Message that replaces the current screen.
    pub message: OutgoingText,
    /// Photo to send after the message.
    pub photo: Option<OutgoingPhoto>,
}

impl RenderInstruction {
    /// Creates a text-only instruction.
    #[must_use]
    pub const fn new(message: OutgoingText) -> Self {
        Self {
            message,
            photo: None,
        }
    }

    /// Attaches a photo to send after the message.
    #[must_use]
    pub fn with_photo(mut self, photo: OutgoingPhoto) -> Self {
        self.photo = Some(photo);
        self
    }

    /// Message text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.message.text
    }

    /// Message keyboard.
    #[must_use]
    pub const fn keyboard(&self) -> &Keyboard {
        &self.message.keyboard
    }
}
