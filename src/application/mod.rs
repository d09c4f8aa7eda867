//! Application layer with use cases, services and DTOs.

/// Data transfer objects.
pub mod dto;
/// Stateless and per-chat services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{RenderInstruction, ResolvedToken, TokenSource};
pub use use_cases::{NavigateUseCase, NavigationOutcome, ResolveTokenUseCase};
