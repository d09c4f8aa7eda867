//! Read-only catalog of points of interest.

use std::collections::HashMap;

use crate::domain::entities::PointOfInterest;
use crate::domain::errors::CatalogError;

/// Immutable set of points of interest, indexed by identifier.
///
/// Entries keep the order they had in the source payload.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<PointOfInterest>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate identifiers.
    ///
    /// # Errors
    /// Returns `CatalogError::Validation` naming the first repeated identifier.
    pub fn new(entries: Vec<PointOfInterest>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(entries.len());

        for (position, entry) in entries.iter().enumerate() {
            if index.insert(entry.id().to_string(), position).is_some() {
                return Err(CatalogError::validation(
                    position,
                    format!("duplicate identifier '{}'", entry.id()),
                ));
            }
        }

        Ok(Self { entries, index })
    }

    /// Catalog with no entries.
    #[cfg(test)]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every entry in source order.
    #[must_use]
    pub fn all(&self) -> &[PointOfInterest] {
        &self.entries
    }

    /// Looks up an entry by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&PointOfInterest> {
        self.index.get(id).map(|&position| &self.entries[position])
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
