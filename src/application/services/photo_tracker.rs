//! Per-chat tracking of the photo currently on screen.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::domain::entities::{ChatId, MessageId};

/// Remembers at most one live photo message per chat.
///
/// The lock is only held for map access, never across transport calls.
#[derive(Debug, Default)]
pub struct PhotoTracker {
    slots: Mutex<HashMap<ChatId, MessageId>>,
}

impl PhotoTracker {
    /// Creates tracker with no live photos.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `message_id` as the chat's live photo and returns the one it replaced.
    pub fn record(&self, chat_id: ChatId, message_id: MessageId) -> Option<MessageId> {
        self.slots.lock().insert(chat_id, message_id)
    }

    /// Removes and returns the chat's live photo.
    pub fn take(&self, chat_id: ChatId) -> Option<MessageId> {
        self.slots.lock().remove(&chat_id)
    }

    /// Chat's live photo, if any.
    #[must_use]
    pub fn current(&self, chat_id: ChatId) -> Option<MessageId> {
        self.slots.lock().get(&chat_id).copied()
    }

    /// Number of chats with a live photo.
    #[cfg(test)]
    #[must_use]
    pub fn tracked_chats(&self) -> usize {
        self.slots.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_overwrites_previous_photo() {
        let tracker = PhotoTracker::new();
        let chat = ChatId(1);

        assert_eq!(tracker.record(chat, MessageId(10)), None);
        assert_eq!(tracker.record(chat, MessageId(11)), Some(MessageId(10)));
        assert_eq!(tracker.current(chat), Some(MessageId(11)));
        assert_eq!(tracker.tracked_chats(), 1);
    }

    #[test]
    fn test_take_clears_slot() {
        let tracker = PhotoTracker::new();
        let chat = ChatId(1);
        tracker.record(chat, MessageId(10));

        assert_eq!(tracker.take(chat), Some(MessageId(10)));
        assert_eq!(tracker.take(chat), None);
        assert_eq!(tracker.current(chat), None);
    }

    #[test]
    fn test_chats_are_independent() {
        let tracker = PhotoTracker::new();
        tracker.record(ChatId(1), MessageId(10));
        tracker.record(ChatId(2), MessageId(20));

        assert_eq!(tracker.take(ChatId(1)), Some(MessageId(10)));
        assert_eq!(tracker.current(ChatId(2)), Some(MessageId(20)));
    }
}
