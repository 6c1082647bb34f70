//! # Page View
//!
//! Renders whichever page is current. Page-local state (cursors, console
//! scroll) is read from the page itself so it survives redraws and is only
//! reset when the switcher builds a new page.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Padding, Paragraph, Wrap};

use crate::core::page::{
    AboutPage, ConsolePage, HomePage, ManagementPage, Page, PageBody, SettingsPage,
};
use crate::tui::component::Component;

pub struct PageView<'a> {
    pub page: &'a Page,
    pub console: &'a [String],
}

impl<'a> PageView<'a> {
    pub fn new(page: &'a Page, console: &'a [String]) -> Self {
        Self { page, console }
    }
}

impl Component for PageView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title(format!(" {} ", self.page.kind()))
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1));

        match &self.page.body {
            PageBody::Home(page) => render_home(frame, area, block, page),
            PageBody::Management(page) => render_management(frame, area, block, page),
            PageBody::Settings(page) => render_settings(frame, area, block, page),
            PageBody::Console(page) => render_console(frame, area, block, page, self.console),
            PageBody::About(page) => render_about(frame, area, block, page),
        }
    }
}

fn render_home(frame: &mut Frame, area: Rect, block: Block, page: &HomePage) {
    let lines = vec![
        Line::from(Span::styled(
            page.welcome.clone(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Opened at {}", page.opened_at.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

fn render_rows(
    frame: &mut Frame,
    area: Rect,
    block: Block,
    rows: &[(String, String)],
    cursor: usize,
) {
    let key_width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let items: Vec<ListItem> = rows
        .iter()
        .map(|(key, value)| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{key:<key_width$}  "),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(value.clone()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected((!rows.is_empty()).then_some(cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_management(frame: &mut Frame, area: Rect, block: Block, page: &ManagementPage) {
    render_rows(frame, area, block, &page.rows, page.cursor);
}

fn render_settings(frame: &mut Frame, area: Rect, block: Block, page: &SettingsPage) {
    render_rows(frame, area, block, &page.rows, page.cursor);
}

fn render_console(
    frame: &mut Frame,
    area: Rect,
    block: Block,
    page: &ConsolePage,
    console: &[String],
) {
    let visible = area.height.saturating_sub(2) as usize;
    let end = console.len() - page.scroll.min(console.len().saturating_sub(1));
    let start = end.saturating_sub(visible);
    let lines: Vec<Line> = console[start..end]
        .iter()
        .map(|l| Line::from(l.as_str()))
        .collect();
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_about(frame: &mut Frame, area: Rect, block: Block, page: &AboutPage) {
    let dim = Style::default().fg(Color::DarkGray);
    let lines = vec![
        Line::from(Span::styled(
            "SwarmClone Launcher",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Version: {}", page.version)),
        Line::from(format!("Build: {}", page.build_number)),
        Line::from(format!("Released: {}", page.release_date)),
        Line::from(""),
        Line::from(vec![
            Span::styled("[w]", Style::default().fg(Color::Cyan)),
            Span::styled(" Website  ", dim),
            Span::styled("[g]", Style::default().fg(Color::Cyan)),
            Span::styled(" GitHub  ", dim),
            Span::styled("[c]", Style::default().fg(Color::Cyan)),
            Span::styled(" Community", dim),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
        area,
    );
}
