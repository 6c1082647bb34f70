//! # Page Switching
//!
//! ```text
//! select(entry)
//!   ├── None                     → no-op
//!   ├── unknown id               → logged no-op
//!   ├── entry.page == current    → keep page (local state survives)
//!   └── entry.page != current    → build page via factory, replace current
//! ```
//!
//! `NavigationState` is the single source of truth the renderer observes.
//! It is owned by the caller and passed in explicitly.

use log::{debug, warn};

use crate::core::catalog::{EntryId, NavigationCatalog};
use crate::core::page::{InstanceId, Page, PageKind};
use crate::core::resource::ResourceResolver;

#[derive(Debug, Clone, PartialEq)]
pub struct NavigationState {
    current: Page,
    selected: Option<EntryId>,
    pane_open: bool,
}

impl NavigationState {
    pub fn current_page(&self) -> &Page {
        &self.current
    }

    pub fn current_page_mut(&mut self) -> &mut Page {
        &mut self.current
    }

    pub fn active_kind(&self) -> PageKind {
        self.current.kind()
    }

    pub fn selected(&self) -> Option<EntryId> {
        self.selected
    }

    pub fn is_pane_open(&self) -> bool {
        self.pane_open
    }
}

pub struct PageSwitcher {
    catalog: NavigationCatalog,
    constructed: u64,
}

impl PageSwitcher {
    pub fn new(catalog: NavigationCatalog) -> Self {
        Self {
            catalog,
            constructed: 0,
        }
    }

    pub fn catalog(&self) -> &NavigationCatalog {
        &self.catalog
    }

    /// Number of pages built so far.
    pub fn constructed(&self) -> u64 {
        self.constructed
    }

    /// Home is shown and selected before any input arrives.
    pub fn initial_state(&mut self, resolver: &ResourceResolver) -> NavigationState {
        let current = self.build(PageKind::Home, resolver);
        NavigationState {
            current,
            selected: self.catalog.id_of(PageKind::Home),
            pane_open: false,
        }
    }

    pub fn select(
        &mut self,
        state: &mut NavigationState,
        resolver: &ResourceResolver,
        entry: Option<EntryId>,
    ) {
        let Some(id) = entry else {
            return;
        };
        let Some(target) = self.catalog.get(id).map(|e| e.page) else {
            warn!("Ignoring selection of unknown navigation entry {}", id.index());
            return;
        };

        state.selected = Some(id);
        if state.current.kind() == target {
            debug!("{target} page already active");
            return;
        }

        state.current = self.build(target, resolver);
        debug!(
            "Switched to {target} page (instance {})",
            state.current.instance.0
        );
    }

    /// Select the entry after the current selection, stopping at the end.
    pub fn select_next(&mut self, state: &mut NavigationState, resolver: &ResourceResolver) {
        let next = match state.selected {
            Some(id) => self.catalog.id_at(id.index() + 1).or(Some(id)),
            None => self.catalog.id_at(0),
        };
        self.select(state, resolver, next);
    }

    /// Select the entry before the current selection, stopping at the start.
    pub fn select_previous(&mut self, state: &mut NavigationState, resolver: &ResourceResolver) {
        let previous = match state.selected {
            Some(id) => self.catalog.id_at(id.index().saturating_sub(1)),
            None => self.catalog.id_at(0),
        };
        self.select(state, resolver, previous);
    }

    pub fn toggle_pane(&self, state: &mut NavigationState) {
        state.pane_open = !state.pane_open;
    }

    fn build(&mut self, kind: PageKind, resolver: &ResourceResolver) -> Page {
        self.constructed += 1;
        Page {
            instance: InstanceId(self.constructed),
            body: kind.factory()(resolver),
        }
    }
}
