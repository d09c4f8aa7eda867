//! Data transfer objects for the application layer.

mod render_dto;
mod token_dto;

pub use render_dto::RenderInstruction;
pub use token_dto::{ResolvedToken, TokenSource};
