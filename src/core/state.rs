//! # Application State
//!
//! Core launcher state. No terminal types here; presentation state lives in
//! the `tui` module.
//!
//! ```text
//! App
//! ├── resolver: ResourceResolver    // application + theme resources
//! ├── switcher: PageSwitcher        // catalog + page factories
//! ├── nav: NavigationState          // current page, selection, pane flag
//! ├── status_message: String        // title bar text
//! ├── console: Vec<String>          // recent notable events
//! └── crash_dialog_open: bool       // test-crash confirmation pending
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use chrono::Local;

use crate::core::catalog::{CatalogError, NavigationCatalog};
use crate::core::navigation::{NavigationState, PageSwitcher};
use crate::core::resource::ResourceResolver;

/// Console history is trimmed to this many lines.
pub const CONSOLE_CAPACITY: usize = 200;

pub struct App {
    pub resolver: ResourceResolver,
    pub switcher: PageSwitcher,
    pub nav: NavigationState,
    pub status_message: String,
    pub console: Vec<String>,
    pub crash_dialog_open: bool,
}

impl App {
    pub fn new(resolver: ResourceResolver) -> Result<Self, CatalogError> {
        let mut switcher = PageSwitcher::new(NavigationCatalog::new(&resolver)?);
        let nav = switcher.initial_state(&resolver);
        let mut app = Self {
            resolver,
            switcher,
            nav,
            status_message: String::from("Ready"),
            console: Vec::new(),
            crash_dialog_open: false,
        };
        app.log_console("Launcher started");
        Ok(app)
    }

    /// Append a timestamped line to the console history.
    pub fn log_console(&mut self, line: impl AsRef<str>) {
        let stamp = Local::now().format("%H:%M:%S");
        self.console.push(format!("[{stamp}] {}", line.as_ref()));
        if self.console.len() > CONSOLE_CAPACITY {
            let excess = self.console.len() - CONSOLE_CAPACITY;
            self.console.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::page::PageKind;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Ready");
        assert_eq!(app.nav.active_kind(), PageKind::Home);
        assert!(!app.crash_dialog_open);
        assert_eq!(app.console.len(), 1);
    }

    #[test]
    fn test_console_is_bounded() {
        let mut app = test_app();
        for i in 0..CONSOLE_CAPACITY + 10 {
            app.log_console(format!("line {i}"));
        }
        assert_eq!(app.console.len(), CONSOLE_CAPACITY);
        assert!(app.console.last().unwrap().ends_with(&format!("line {}", CONSOLE_CAPACITY + 9)));
    }
}
