use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::core::page::{PageKind, UNKNOWN};
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ConfirmDialogView, NavPane, PageView, TitleBar};

const HELP: &str = " ↑/↓ Navigate  1-5 Jump  Tab Pane  PgUp/PgDn Scroll  Esc Quit";
const ABOUT_HELP: &str = "  w/g/c Links";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &TuiState) {
    use Constraint::{Length, Min};
    let [title_area, body_area, help_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());

    let pane_width = NavPane::width(app.nav.is_pane_open());
    let [pane_area, page_area] =
        Layout::horizontal([Length(pane_width), Min(0)]).areas(body_area);

    TitleBar::new(
        tui.version.clone(),
        app.nav.active_kind().label().to_string(),
        app.status_message.clone(),
    )
    .render(frame, title_area);

    NavPane::new(
        app.switcher.catalog().entries(),
        app.nav.selected(),
        app.nav.is_pane_open(),
    )
    .render(frame, pane_area);

    PageView::new(app.nav.current_page(), &app.console).render(frame, page_area);

    let help = if app.nav.active_kind() == PageKind::About {
        format!("{HELP}{ABOUT_HELP}")
    } else {
        HELP.to_string()
    };
    frame.render_widget(
        Span::styled(help, Style::default().fg(Color::DarkGray)),
        help_area,
    );

    if let Some(prompt) = &tui.crash_prompt {
        ConfirmDialogView::new(&prompt.dialog).render(frame, frame.area());
    }
}

/// Version shown in the title bar.
pub fn version_label(app: &App) -> String {
    app.resolver
        .resolve_text("SoftwareVersion")
        .unwrap_or_else(|| UNKNOWN.to_string())
}
