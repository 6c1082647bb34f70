//! # Pages
//!
//! Page kinds and the page instances the switcher builds for them.
//!
//! Each kind maps to a factory function through [`PageKind::factory`], a
//! plain `match` resolved at compile time. Page bodies carry page-local
//! state (cursors, scroll offsets) that lives exactly as long as the page is
//! current.

use chrono::{DateTime, Local};
use std::fmt;

use crate::core::resource::ResourceResolver;

pub const UNKNOWN: &str = "Unknown";
const DEFAULT_WELCOME: &str = "Welcome!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Home,
    Management,
    Settings,
    Console,
    About,
}

impl PageKind {
    /// Every kind, in navigation order.
    pub const ALL: [PageKind; 5] = [
        PageKind::Home,
        PageKind::Management,
        PageKind::Settings,
        PageKind::Console,
        PageKind::About,
    ];

    pub fn icon_key(self) -> &'static str {
        match self {
            PageKind::Home => "HomeIcon",
            PageKind::Management => "ManagementIcon",
            PageKind::Settings => "SettingsIcon",
            PageKind::Console => "ConsoleIcon",
            PageKind::About => "AboutIcon",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PageKind::Home => "Home",
            PageKind::Management => "Management",
            PageKind::Settings => "Settings",
            PageKind::Console => "Console",
            PageKind::About => "About",
        }
    }

    pub fn factory(self) -> PageFactory {
        match self {
            PageKind::Home => build_home,
            PageKind::Management => build_management,
            PageKind::Settings => build_settings,
            PageKind::Console => build_console,
            PageKind::About => build_about,
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub type PageFactory = fn(&ResourceResolver) -> PageBody;

/// Identity of a constructed page. Unique per switcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstanceId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub instance: InstanceId,
    pub body: PageBody,
}

impl Page {
    pub fn kind(&self) -> PageKind {
        self.body.kind()
    }

    /// Move the page-local cursor by `delta` rows. No-op on pages without one.
    pub fn move_cursor(&mut self, delta: isize) {
        match &mut self.body {
            PageBody::Management(page) => {
                page.cursor = step(page.cursor, delta, page.rows.len());
            }
            PageBody::Settings(page) => {
                page.cursor = step(page.cursor, delta, page.rows.len());
            }
            // Moving up means scrolling back into older lines.
            PageBody::Console(page) => {
                page.scroll = page.scroll.saturating_add_signed(delta.saturating_neg());
            }
            PageBody::Home(_) | PageBody::About(_) => {}
        }
    }

    /// Keep the console scroll within `history` lines. No-op on other pages.
    pub fn clamp_scroll(&mut self, history: usize) {
        if let PageBody::Console(page) = &mut self.body {
            page.scroll = page.scroll.min(history.saturating_sub(1));
        }
    }
}

fn step(cursor: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    cursor.saturating_add_signed(delta).min(len - 1)
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageBody {
    Home(HomePage),
    Management(ManagementPage),
    Settings(SettingsPage),
    Console(ConsolePage),
    About(AboutPage),
}

impl PageBody {
    pub fn kind(&self) -> PageKind {
        match self {
            PageBody::Home(_) => PageKind::Home,
            PageBody::Management(_) => PageKind::Management,
            PageBody::Settings(_) => PageKind::Settings,
            PageBody::Console(_) => PageKind::Console,
            PageBody::About(_) => PageKind::About,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomePage {
    pub opened_at: DateTime<Local>,
    pub welcome: String,
}

/// Key/value listing of the application resource table.
#[derive(Debug, Clone, PartialEq)]
pub struct ManagementPage {
    pub rows: Vec<(String, String)>,
    pub cursor: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettingsPage {
    pub rows: Vec<(String, String)>,
    pub cursor: usize,
}

/// Lines scrolled back from the newest console entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsolePage {
    pub scroll: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AboutPage {
    pub version: String,
    pub build_number: String,
    pub release_date: String,
}

fn build_home(resolver: &ResourceResolver) -> PageBody {
    PageBody::Home(HomePage {
        opened_at: Local::now(),
        welcome: resolver
            .resolve_text("WelcomeText")
            .unwrap_or_else(|| DEFAULT_WELCOME.to_string()),
    })
}

fn build_management(resolver: &ResourceResolver) -> PageBody {
    let rows = resolver
        .application()
        .iter()
        .map(|(key, value)| (key.clone(), value.to_string()))
        .collect();
    PageBody::Management(ManagementPage { rows, cursor: 0 })
}

fn build_settings(resolver: &ResourceResolver) -> PageBody {
    let themes = resolver.themes();
    let rows = vec![
        ("Theme".to_string(), themes.active().to_string()),
        (
            "Available themes".to_string(),
            themes.names().collect::<Vec<_>>().join(", "),
        ),
        (
            "Application resources".to_string(),
            resolver.application().len().to_string(),
        ),
    ];
    PageBody::Settings(SettingsPage { rows, cursor: 0 })
}

fn build_console(_resolver: &ResourceResolver) -> PageBody {
    PageBody::Console(ConsolePage::default())
}

fn build_about(resolver: &ResourceResolver) -> PageBody {
    let text = |key: &str| {
        resolver
            .resolve_text(key)
            .unwrap_or_else(|| UNKNOWN.to_string())
    };
    PageBody::About(AboutPage {
        version: text("SoftwareVersion"),
        build_number: text("BuildNumber"),
        release_date: text("ReleaseDate"),
    })
}
