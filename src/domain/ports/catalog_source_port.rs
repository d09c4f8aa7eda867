//! Catalog source port definition.

use crate::domain::catalog::Catalog;
use crate::domain::errors::CatalogError;

/// Port for loading the catalog at startup.
pub trait CatalogSource: Send + Sync {
    /// Loads and validates the whole catalog; partial results are never returned.
    ///
    /// # Errors
    /// Returns `CatalogError::NotFound` when the source is missing and
    /// `CatalogError::Validation` when any record is incomplete.
    fn load(&self) -> Result<Catalog, CatalogError>;
}
