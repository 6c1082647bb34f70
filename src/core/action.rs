//! # Actions
//!
//! Everything that can happen in the launcher becomes an `Action`.
//! User presses Down? That's `Action::SelectNext`.
//! Crash dialog answered? That's `Action::TestCrashResolved(answer)`.
//!
//! The `update()` function applies an action to the state and returns the
//! `Effect` the adapter must carry out. No side effects here: opening URLs,
//! showing dialogs and crashing happen elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info};

use crate::core::catalog::EntryId;
use crate::core::links::LinkKind;
use crate::core::state::App;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Select(Option<EntryId>),
    SelectNext,
    SelectPrevious,
    TogglePane,
    /// Move the page-local cursor.
    ScrollPage(isize),
    OpenLink(LinkKind),
    RequestTestCrash,
    TestCrashResolved(bool),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    OpenUrl(String),
    ShowCrashDialog,
    Crash,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("Action: {action:?}");
    match action {
        Action::Select(entry) => {
            app.switcher.select(&mut app.nav, &app.resolver, entry);
            after_navigation(app);
            Effect::None
        }
        Action::SelectNext => {
            app.switcher.select_next(&mut app.nav, &app.resolver);
            after_navigation(app);
            Effect::None
        }
        Action::SelectPrevious => {
            app.switcher.select_previous(&mut app.nav, &app.resolver);
            after_navigation(app);
            Effect::None
        }
        Action::TogglePane => {
            app.switcher.toggle_pane(&mut app.nav);
            Effect::None
        }
        Action::ScrollPage(delta) => {
            let history = app.console.len();
            let page = app.nav.current_page_mut();
            page.move_cursor(delta);
            page.clamp_scroll(history);
            Effect::None
        }
        Action::OpenLink(link) => {
            let url = link.url(&app.resolver);
            app.status_message = format!("Opening {url}");
            app.log_console(format!("Opening {url}"));
            Effect::OpenUrl(url)
        }
        Action::RequestTestCrash => {
            if app.crash_dialog_open {
                return Effect::None;
            }
            app.crash_dialog_open = true;
            Effect::ShowCrashDialog
        }
        Action::TestCrashResolved(answer) => {
            app.crash_dialog_open = false;
            if answer {
                info!("Test crash confirmed");
                Effect::Crash
            } else {
                app.log_console("Test crash cancelled");
                Effect::None
            }
        }
        Action::Quit => Effect::Quit,
    }
}

fn after_navigation(app: &mut App) {
    let kind = app.nav.active_kind();
    app.status_message = kind.label().to_string();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::links::FALLBACK_URL;
    use crate::core::page::{PageBody, PageKind};
    use crate::test_support::test_app;

    #[test]
    fn test_select_updates_status() {
        let mut app = test_app();
        let about = app.switcher.catalog().id_of(PageKind::About);
        assert_eq!(update(&mut app, Action::Select(about)), Effect::None);
        assert_eq!(app.nav.active_kind(), PageKind::About);
        assert_eq!(app.status_message, "About");
    }

    #[test]
    fn test_select_none_changes_nothing() {
        let mut app = test_app();
        let before = app.nav.clone();
        update(&mut app, Action::Select(None));
        assert_eq!(app.nav, before);
    }

    #[test]
    fn test_toggle_pane() {
        let mut app = test_app();
        update(&mut app, Action::TogglePane);
        assert!(app.nav.is_pane_open());
        update(&mut app, Action::TogglePane);
        assert!(!app.nav.is_pane_open());
    }

    #[test]
    fn test_open_link_returns_url_effect() {
        let mut app = test_app();
        let effect = update(&mut app, Action::OpenLink(LinkKind::GitHub));
        assert_eq!(effect, Effect::OpenUrl(FALLBACK_URL.to_string()));
        assert!(app.console.last().unwrap().contains("Opening"));
    }

    #[test]
    fn test_crash_flow() {
        let mut app = test_app();
        assert_eq!(
            update(&mut app, Action::RequestTestCrash),
            Effect::ShowCrashDialog
        );
        // A second request while the dialog is up is ignored.
        assert_eq!(update(&mut app, Action::RequestTestCrash), Effect::None);
        assert_eq!(
            update(&mut app, Action::TestCrashResolved(true)),
            Effect::Crash
        );
        assert!(!app.crash_dialog_open);
    }

    #[test]
    fn test_declined_crash_returns_to_normal() {
        let mut app = test_app();
        update(&mut app, Action::RequestTestCrash);
        assert_eq!(
            update(&mut app, Action::TestCrashResolved(false)),
            Effect::None
        );
        assert!(!app.crash_dialog_open);
        assert_eq!(
            update(&mut app, Action::RequestTestCrash),
            Effect::ShowCrashDialog
        );
    }

    #[test]
    fn test_scroll_moves_page_cursor() {
        let mut app = test_app();
        let management = app.switcher.catalog().id_of(PageKind::Management);
        update(&mut app, Action::Select(management));
        update(&mut app, Action::ScrollPage(2));
        let PageBody::Management(page) = &app.nav.current_page().body else {
            panic!("expected management page");
        };
        assert_eq!(page.cursor, 2);
    }

    #[test]
    fn test_console_scroll_stops_at_oldest_line() {
        let mut app = test_app();
        app.log_console("second");
        app.log_console("third");
        let console = app.switcher.catalog().id_of(PageKind::Console);
        update(&mut app, Action::Select(console));

        for _ in 0..20 {
            update(&mut app, Action::ScrollPage(-1));
        }
        let scroll = |app: &App| match &app.nav.current_page().body {
            PageBody::Console(page) => page.scroll,
            other => panic!("expected console page, got {other:?}"),
        };
        assert_eq!(scroll(&app), app.console.len() - 1);

        // One PageDown moves back toward the newest line right away
        update(&mut app, Action::ScrollPage(1));
        assert_eq!(scroll(&app), app.console.len() - 2);
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
