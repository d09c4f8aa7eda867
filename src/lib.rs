//! Torzhok bot - a Telegram guide to the sights of Torzhok.
//!
//! This crate implements the bot with clean architecture: a pure menu
//! state machine and screen renderer, a JSON attraction catalog, and a
//! long-polling Telegram transport.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "torzhok-bot";
