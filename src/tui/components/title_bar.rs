//! # TitleBar Component
//!
//! Top status bar: launcher version, active page and status message.
//!
//! Stateless: all data arrives as props, so the bar doesn't care whether a
//! value came from resources (version) or core state (page, status).
//!
//! 1. **Status message**: `"SwarmClone Launcher v0.1.0 | Home | Opening …"`
//! 2. **Default**: `"SwarmClone Launcher v0.1.0 | Home"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

pub struct TitleBar {
    pub version: String,
    pub page_label: String,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(version: String, page_label: String, status_message: String) -> Self {
        Self {
            version,
            page_label,
            status_message,
        }
    }

    fn text(&self) -> String {
        // The page label already is the status after navigation.
        if self.status_message.is_empty() || self.status_message == self.page_label {
            format!("SwarmClone Launcher v{} | {}", self.version, self.page_label)
        } else {
            format!(
                "SwarmClone Launcher v{} | {} | {}",
                self.version, self.page_label, self.status_message
            )
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = Style::default().add_modifier(Modifier::BOLD);
        frame.render_widget(Span::styled(self.text(), style), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
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
    fn test_title_bar_with_status_message() {
        let mut title_bar = TitleBar::new(
            "0.1.0".to_string(),
            "About".to_string(),
            "Opening https://x".to_string(),
        );
        let text = rendered(&mut title_bar);
        assert!(text.contains("SwarmClone Launcher v0.1.0"));
        assert!(text.contains("About"));
        assert!(text.contains("Opening https://x"));
    }

    #[test]
    fn test_title_bar_hides_duplicate_status() {
        let mut title_bar =
            TitleBar::new("0.1.0".to_string(), "Home".to_string(), "Home".to_string());
        let text = rendered(&mut title_bar);
        assert_eq!(text.matches("Home").count(), 1);
    }
}
