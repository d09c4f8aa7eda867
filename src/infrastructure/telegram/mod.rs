//! Telegram Bot API adapter.

/// Bot API HTTP client.
pub mod client;
/// Bot API wire structures.
pub mod dto;
/// Long polling loop.
pub mod poller;

pub use client::TelegramClient;
pub use poller::{UpdatePoller, update_to_action};
