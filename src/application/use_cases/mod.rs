//! Use case implementations.

mod navigate_use_case;
mod resolve_token_use_case;

pub use navigate_use_case::{NavigateUseCase, NavigationOutcome};
pub use resolve_token_use_case::ResolveTokenUseCase;
