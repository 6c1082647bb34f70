//! # Confirm Dialog Overlay
//!
//! Centered yes/no box drawn over the page. Opened by Ctrl+Shift+F8.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `CrashPrompt` (owning the core `ConfirmDialog`) lives in `TuiState`
//! - `ConfirmDialogView` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::core::dialog::{ConfirmDialog, DialogResponse, DialogState};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub const CRASH_TITLE: &str = "Confirm test crash";
pub const CRASH_MESSAGE: &str =
    "Start a test crash? The launcher will terminate unexpectedly.";

/// Emitted once the user has answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answered(pub bool);

pub struct CrashPrompt {
    pub dialog: ConfirmDialog,
}

impl CrashPrompt {
    pub fn open() -> (Self, DialogResponse) {
        let (dialog, response) = ConfirmDialog::open(CRASH_TITLE, CRASH_MESSAGE);
        (Self { dialog }, response)
    }
}

impl EventHandler for CrashPrompt {
    type Event = Answered;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Answered> {
        match event {
            TuiEvent::Char('y' | 'Y') | TuiEvent::Confirm => self.dialog.respond(true),
            TuiEvent::Char('n' | 'N') | TuiEvent::Escape => self.dialog.dismiss(),
            _ => return None,
        }
        match self.dialog.state() {
            DialogState::Resolved(answer) => Some(Answered(answer)),
            DialogState::AwaitingResponse => None,
        }
    }
}

pub struct ConfirmDialogView<'a> {
    dialog: &'a ConfirmDialog,
}

impl<'a> ConfirmDialogView<'a> {
    pub fn new(dialog: &'a ConfirmDialog) -> Self {
        Self { dialog }
    }
}

impl Component for ConfirmDialogView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(50, 30, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(format!(" {} ", self.dialog.title))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" y Yes  n No ").centered())
            .padding(Padding::horizontal(1));

        let lines = vec![
            Line::from(self.dialog.message.as_str()),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    "[y] Yes",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::raw("   "),
                Span::styled("[n] No", Style::default().fg(Color::Gray)),
            ])
            .alignment(Alignment::Right),
        ];

        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
            overlay,
        );
    }
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
