//! Domain entity definitions.

mod chat;
mod keyboard;
mod point_of_interest;
mod token;

pub use chat::{ChatId, MessageId};
pub use keyboard::{Button, Keyboard};
pub use point_of_interest::{Coordinates, PointOfInterest};
pub use token::BotToken;
