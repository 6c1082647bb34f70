//! # Navigation Catalog
//!
//! The fixed, ordered list of entries shown in the side pane. Built once at
//! startup; the selection refers to entries by [`EntryId`], never by copy.

use std::fmt;

use crate::core::page::PageKind;
use crate::core::resource::{Icon, ResourceResolver};

/// Stable index into the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(usize);

impl EntryId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEntry {
    pub page: PageKind,
    pub icon_key: String,
    pub label: String,
    pub icon: Icon,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    MissingIcon { page: PageKind, key: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::MissingIcon { page, key } => {
                write!(f, "icon resource '{key}' for the {page} page is missing")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

#[derive(Debug, Clone)]
pub struct NavigationCatalog {
    entries: Vec<NavigationEntry>,
}

impl NavigationCatalog {
    /// Builds the five entries, resolving each icon.
    ///
    /// Fails if any icon resource is missing: an entry is never created
    /// with an absent icon.
    pub fn new(resolver: &ResourceResolver) -> Result<Self, CatalogError> {
        let entries = PageKind::ALL
            .iter()
            .map(|&page| {
                let key = page.icon_key();
                let icon = resolver
                    .resolve_icon(key)
                    .ok_or_else(|| CatalogError::MissingIcon {
                        page,
                        key: key.to_string(),
                    })?;
                Ok(NavigationEntry {
                    page,
                    icon_key: key.to_string(),
                    label: page.label().to_string(),
                    icon,
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[NavigationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: EntryId) -> Option<&NavigationEntry> {
        self.entries.get(id.0)
    }

    /// Id for the entry at `index`, if it exists.
    pub fn id_at(&self, index: usize) -> Option<EntryId> {
        (index < self.entries.len()).then_some(EntryId(index))
    }

    pub fn id_of(&self, page: PageKind) -> Option<EntryId> {
        self.entries
            .iter()
            .position(|e| e.page == page)
            .map(EntryId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &NavigationEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (EntryId(i), e))
    }
}
