//! # Navigation Pane
//!
//! Side list of catalog entries. Collapsed it shows icons only; expanded it
//! adds the labels. Selection comes from `NavigationState`, never from the
//! list widget itself.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use unicode_width::UnicodeWidthStr;

use crate::core::catalog::{EntryId, NavigationEntry};
use crate::tui::component::Component;

const COLLAPSED_WIDTH: u16 = 6;
const EXPANDED_WIDTH: u16 = 22;

pub struct NavPane<'a> {
    pub entries: &'a [NavigationEntry],
    pub selected: Option<EntryId>,
    pub open: bool,
}

impl<'a> NavPane<'a> {
    pub fn new(entries: &'a [NavigationEntry], selected: Option<EntryId>, open: bool) -> Self {
        Self {
            entries,
            selected,
            open,
        }
    }

    pub fn width(open: bool) -> u16 {
        if open { EXPANDED_WIDTH } else { COLLAPSED_WIDTH }
    }
}

impl Component for NavPane<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        // Borders + highlight symbol + icon + gap.
        let label_width = (area.width as usize).saturating_sub(7);

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| {
                let mut spans = vec![Span::raw(entry.icon.glyph().to_string())];
                if self.open {
                    spans.push(Span::raw(" "));
                    spans.push(Span::raw(truncate_to_width(&entry.label, label_width)));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::RIGHT)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .highlight_symbol("▌")
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );

        let mut state = ListState::default().with_selected(self.selected.map(EntryId::index));
        frame.render_stateful_widget(list, area, &mut state);
    }
}

/// Truncate to `max_width` display columns (labels may be double-width).
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::NavigationCatalog;
    use crate::test_support::test_resolver;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_pane(open: bool) -> String {
        let catalog = NavigationCatalog::new(&test_resolver()).unwrap();
        let backend = TestBackend::new(NavPane::width(open), 7);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                NavPane::new(catalog.entries(), catalog.id_at(0), open).render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_expanded_pane_shows_labels() {
        let text = render_pane(true);
        assert!(text.contains("Home"));
        assert!(text.contains("Management"));
        assert!(text.contains("About"));
    }

    #[test]
    fn test_collapsed_pane_hides_labels() {
        let text = render_pane(false);
        assert!(!text.contains("Home"));
        assert!(text.contains("⌂"));
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Settings", 20), "Settings");
        assert_eq!(truncate_to_width("Management", 5), "Mana…");
        assert_eq!(truncate_to_width("主页设置", 5), "主页…");
    }
}
