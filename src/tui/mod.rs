//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! Nothing animates, so the loop only redraws after an event, after a
//! background action arrives, or on resize. Background actions come from
//! tasks spawned on the tokio runtime (the crash dialog waiter) through an
//! `mpsc` channel and are drained once per iteration.

mod component;
mod components;
mod event;
mod ui;

use log::{error, info};
use std::io::stdout;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::links;
use crate::core::page::PageKind;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{Answered, CrashPrompt};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const IDLE_POLL: Duration = Duration::from_millis(250);

/// TUI-specific presentation state (not part of core launcher logic)
pub struct TuiState {
    pub version: String,
    // Crash confirmation overlay (None = hidden)
    pub crash_prompt: Option<CrashPrompt>,
}

impl TuiState {
    pub fn new(version: String) -> Self {
        Self {
            version,
            crash_prompt: None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Disambiguated escape codes let Ctrl+Shift+F8 arrive with both
        // modifiers; terminals without the protocol ignore the request.
        execute!(
            stdout(),
            Hide,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (hidden cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags, Show);
    }
}

pub fn run(mut app: App) -> std::io::Result<()> {
    let mut tui = TuiState::new(ui::version_label(&app));

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel::<Action>();

    let mut needs_redraw = true; // Force first frame
    let result = loop {
        if needs_redraw {
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &app, &tui)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        let mut should_quit = false;

        // Background actions first (dialog answers)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            should_quit |= apply(&mut app, &mut tui, &tx, action);
        }

        let first_event = poll_event_timeout(IDLE_POLL);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if should_quit {
                break;
            }
            if matches!(event, TuiEvent::Resize) {
                continue;
            }
            if matches!(event, TuiEvent::ForceQuit) {
                should_quit |= apply(&mut app, &mut tui, &tx, Action::Quit);
                continue;
            }

            // When the crash prompt is open, route all events to it.
            // The answer itself comes back as a background action.
            if let Some(prompt) = tui.crash_prompt.as_mut() {
                if let Some(Answered(answer)) = prompt.handle_event(&event) {
                    info!("Crash prompt answered: {answer}");
                    tui.crash_prompt = None;
                }
                continue;
            }

            if let Some(action) = map_event(&app, event) {
                should_quit |= apply(&mut app, &mut tui, &tx, action);
            }
        }

        if should_quit {
            break Ok(());
        }
    };

    ratatui::restore();
    info!("Launcher shutting down");
    result
}

/// Translate a key event into a core action, given the current page.
fn map_event(app: &App, event: TuiEvent) -> Option<Action> {
    let on_about = app.nav.active_kind() == PageKind::About;
    match event {
        TuiEvent::Up => Some(Action::SelectPrevious),
        TuiEvent::Down => Some(Action::SelectNext),
        TuiEvent::PageUp => Some(Action::ScrollPage(-1)),
        TuiEvent::PageDown => Some(Action::ScrollPage(1)),
        TuiEvent::TogglePane => Some(Action::TogglePane),
        TuiEvent::Jump(index) => app
            .switcher
            .catalog()
            .id_at(index)
            .map(|id| Action::Select(Some(id))),
        TuiEvent::TestCrash => Some(Action::RequestTestCrash),
        TuiEvent::Escape | TuiEvent::Char('q') => Some(Action::Quit),
        TuiEvent::Char('w') if on_about => Some(Action::OpenLink(links::LinkKind::Website)),
        TuiEvent::Char('g') if on_about => Some(Action::OpenLink(links::LinkKind::GitHub)),
        TuiEvent::Char('c') if on_about => Some(Action::OpenLink(links::LinkKind::Community)),
        _ => None,
    }
}

/// Run an action through the reducer and carry out its effect.
/// Returns true when the launcher should quit.
fn apply(app: &mut App, tui: &mut TuiState, tx: &mpsc::Sender<Action>, action: Action) -> bool {
    match update(app, action) {
        Effect::None => false,
        Effect::Quit => true,
        Effect::OpenUrl(url) => {
            links::open_url(&url);
            false
        }
        Effect::ShowCrashDialog => {
            let (prompt, response) = CrashPrompt::open();
            tui.crash_prompt = Some(prompt);
            let tx = tx.clone();
            tokio::spawn(async move {
                let answer = response.wait().await;
                let _ = tx.send(Action::TestCrashResolved(answer));
            });
            false
        }
        Effect::Crash => {
            error!("User-initiated test crash");
            panic!("User-initiated test crash");
        }
    }
}
