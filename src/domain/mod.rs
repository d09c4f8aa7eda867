//! Domain layer with core business entities and port definitions.

/// Catalog of points of interest.
pub mod catalog;
/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Commands, button actions and screens.
pub mod navigation;
/// Port definitions.
pub mod ports;

pub use catalog::Catalog;
pub use entities::{BotToken, ChatId, MessageId, PointOfInterest};
pub use errors::{CatalogError, NavigationError, StartupError, TransportError};
pub use navigation::{ActionKind, BotCommand, NavAction, Screen, UserAction};
pub use ports::{CatalogSource, TransportPort};
