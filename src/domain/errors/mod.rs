//! Domain error types.

mod catalog_error;
mod navigation_error;
mod startup_error;
mod transport_error;

pub use catalog_error::CatalogError;
pub use navigation_error::NavigationError;
pub use startup_error::StartupError;
pub use transport_error::TransportError;
